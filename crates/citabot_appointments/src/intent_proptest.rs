#[cfg(test)]
mod tests {
    use crate::intent::{classify, normalize, Intent, CANCEL_STEMS, CREATE_STEMS, MODIFY_STEMS};
    use proptest::prelude::*;
    use proptest::sample::select;

    // Letters that cannot spell any stem, so filler never adds an intent.
    const FILLER: &str = "[fghjkwxyz ]{0,30}";

    proptest! {
        #[test]
        fn cancel_stem_always_wins(
            prefix in FILLER,
            suffix in FILLER,
            cancel in select(CANCEL_STEMS),
            modify in select(MODIFY_STEMS),
            create in select(CREATE_STEMS),
        ) {
            let text = format!("{prefix} {create} {modify} {cancel} {suffix}");
            prop_assert_eq!(classify(&text), Intent::Cancel);
        }

        #[test]
        fn modify_stem_beats_create(
            prefix in FILLER,
            modify in select(MODIFY_STEMS),
            create in select(CREATE_STEMS),
        ) {
            let text = format!("{create} {prefix} {modify}");
            prop_assert_eq!(classify(&text), Intent::Modify);
        }

        #[test]
        fn stem_inside_a_word_is_ignored(
            head in "[fghjkwxyz]{1,5}",
            stem in select(CREATE_STEMS),
        ) {
            let text = format!("Hola, {head}{stem} por favor");
            prop_assert_eq!(classify(&text), Intent::Unknown);
        }

        #[test]
        fn filler_alone_is_unknown(text in FILLER) {
            prop_assert_eq!(classify(&text), Intent::Unknown);
        }

        #[test]
        fn classification_ignores_case(
            prefix in FILLER,
            stem in select(CREATE_STEMS),
        ) {
            let text = format!("{prefix}{stem}");
            prop_assert_eq!(classify(&text.to_uppercase()), classify(&text));
        }

        #[test]
        fn normalize_is_idempotent(text in "\\PC{0,60}") {
            let once = normalize(&text);
            prop_assert_eq!(normalize(&once), once);
        }
    }
}
