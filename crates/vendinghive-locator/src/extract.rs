//! Contact and opening-hours extraction from OSM tag sets.

use std::collections::HashMap;

/// Opening hours assumed when a feature has no `opening_hours` tag.
pub const DEFAULT_BUSINESS_HOURS: &str = "9:00-17:00";

const PHONE_KEYS: [&str; 3] = ["phone", "contact:phone", "telephone"];
const EMAIL_KEYS: [&str; 2] = ["email", "contact:email"];

/// First phone number found under the known tag keys, else empty.
#[must_use]
pub fn phone(tags: &HashMap<String, String>) -> String {
    first_present(tags, &PHONE_KEYS)
}

/// First email address found under the known tag keys, else empty.
#[must_use]
pub fn email(tags: &HashMap<String, String>) -> String {
    first_present(tags, &EMAIL_KEYS)
}

/// The feature's tagged opening hours, or [`DEFAULT_BUSINESS_HOURS`].
#[must_use]
pub fn business_hours(tags: &HashMap<String, String>) -> String {
    tags.get("opening_hours")
        .cloned()
        .unwrap_or_else(|| DEFAULT_BUSINESS_HOURS.to_string())
}

fn first_present(tags: &HashMap<String, String>, keys: &[&str]) -> String {
    keys.iter()
        .find_map(|key| tags.get(*key))
        .cloned()
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn phone_prefers_plain_key_over_contact_prefixed() {
        let t = tags(&[
            ("contact:phone", "+1-555-0200"),
            ("phone", "+1-555-0100"),
        ]);
        assert_eq!(phone(&t), "+1-555-0100");
    }

    #[test]
    fn phone_falls_through_key_order() {
        let t = tags(&[("telephone", "+1-555-0300")]);
        assert_eq!(phone(&t), "+1-555-0300");
        assert_eq!(phone(&HashMap::new()), "");
    }

    #[test]
    fn email_checks_both_keys() {
        let t = tags(&[("contact:email", "info@venue.example")]);
        assert_eq!(email(&t), "info@venue.example");
        assert_eq!(email(&HashMap::new()), "");
    }

    #[test]
    fn business_hours_defaults_when_untagged() {
        let t = tags(&[("opening_hours", "Mo-Fr 08:00-20:00")]);
        assert_eq!(business_hours(&t), "Mo-Fr 08:00-20:00");
        assert_eq!(business_hours(&HashMap::new()), "9:00-17:00");
    }
}
