/// Rewrites Mexican mobile numbers from the `521XXXXXXXXXX` form the webhook
/// reports to the `52XXXXXXXXXX` form the Cloud API accepts.
///
/// Anything else is returned unchanged.
pub fn normalize_recipient(wa_id: &str) -> String {
    match wa_id.strip_prefix("521") {
        Some(rest) if wa_id.len() == 13 => format!("52{rest}"),
        _ => wa_id.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_mexican_mobile_drops_the_one() {
        assert_eq!(normalize_recipient("5215512345678"), "525512345678");
    }

    #[test]
    fn test_other_numbers_untouched() {
        assert_eq!(normalize_recipient("525512345678"), "525512345678");
        assert_eq!(normalize_recipient("54911234567890"), "54911234567890");
        assert_eq!(normalize_recipient("52155123456789"), "52155123456789");
        assert_eq!(normalize_recipient("15551234567"), "15551234567");
    }

    proptest! {
        #[test]
        fn non_mexican_ids_pass_through(id in "[0-9]{8,15}") {
            prop_assume!(!(id.starts_with("521") && id.len() == 13));
            prop_assert_eq!(normalize_recipient(&id), id);
        }
    }
}
