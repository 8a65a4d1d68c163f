// --- File: crates/citabot_appointments/src/intent.rs ---
//! Keyword dispatch from a chat message to an appointment intent.
//!
//! This is not language understanding: the text is folded to lower-case ASCII
//! and each word is checked for a leading stem. Cancel wins over modify, modify over create,
//! so "quiero cambiar mi cita" is a modification even though it names a "cita".

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Create,
    Modify,
    Cancel,
    Unknown,
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Intent::Create => "create",
            Intent::Modify => "modify",
            Intent::Cancel => "cancel",
            Intent::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

pub(crate) const CANCEL_STEMS: &[&str] = &["cancel", "anul"];
pub(crate) const MODIFY_STEMS: &[&str] = &["cambi", "modific", "mover", "reprogram", "reagend", "reschedul"];
pub(crate) const CREATE_STEMS: &[&str] = &["agend", "reserv", "cita", "turno", "book", "schedul"];

/// Lower-cases and strips Spanish diacritics.
pub fn normalize(text: &str) -> String {
    text.chars()
        .flat_map(char::to_lowercase)
        .map(|c| match c {
            'á' | 'à' | 'â' | 'ä' => 'a',
            'é' | 'è' | 'ê' | 'ë' => 'e',
            'í' | 'ì' | 'î' | 'ï' => 'i',
            'ó' | 'ò' | 'ô' | 'ö' => 'o',
            'ú' | 'ù' | 'û' | 'ü' => 'u',
            'ñ' => 'n',
            other => other,
        })
        .collect()
}

/// True when some word starts with one of the stems. Stems inside a word
/// ("Facebook", "solicitar") do not count.
fn mentions_any(words: &[&str], stems: &[&str]) -> bool {
    words
        .iter()
        .any(|word| stems.iter().any(|stem| word.starts_with(stem)))
}

/// Classifies a message by keyword precedence: cancel, then modify, then create.
/// A keyword matches at the start of a word.
pub fn classify(text: &str) -> Intent {
    let text = normalize(text);
    let words: Vec<&str> = text
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .collect();

    if mentions_any(&words, CANCEL_STEMS) {
        Intent::Cancel
    } else if mentions_any(&words, MODIFY_STEMS) {
        Intent::Modify
    } else if mentions_any(&words, CREATE_STEMS) {
        Intent::Create
    } else {
        Intent::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_webhook_messages() {
        assert_eq!(
            classify("Hola, quiero agendar una cita para mañana a las 10am."),
            Intent::Create
        );
        assert_eq!(classify("Hola, quiero cambiar mi cita a las 11am."), Intent::Modify);
        assert_eq!(classify("Hola, quiero cancelar mi cita."), Intent::Cancel);
    }

    #[test]
    fn test_classify_variants() {
        assert_eq!(classify("¿Puedo RESERVAR un turno?"), Intent::Create);
        assert_eq!(classify("Necesito reprogramar la reunión"), Intent::Modify);
        assert_eq!(classify("Modificá el horario por favor"), Intent::Modify);
        assert_eq!(classify("Anulá todo"), Intent::Cancel);
        assert_eq!(classify("I want to book an appointment"), Intent::Create);
        assert_eq!(classify("Please reschedule my booking"), Intent::Modify);
    }

    #[test]
    fn test_classify_unknown() {
        assert_eq!(classify("Hola, ¿qué tal?"), Intent::Unknown);
        assert_eq!(classify(""), Intent::Unknown);
    }

    #[test]
    fn test_stems_inside_words_do_not_match() {
        assert_eq!(classify("Hola, te escribo desde Facebook"), Intent::Unknown);
        assert_eq!(classify("Felicitaciones por el nuevo local"), Intent::Unknown);
        assert_eq!(classify("Quisiera solicitar información de precios"), Intent::Unknown);
        assert_eq!(classify("¿Me podés decir cómo remover mi número?"), Intent::Unknown);
        assert_eq!(classify("Quiero reagendar mi cita"), Intent::Modify);
    }

    #[test]
    fn test_normalize_strips_accents() {
        assert_eq!(normalize("MAÑANA Cancelación Reunión"), "manana cancelacion reunion");
    }
}
