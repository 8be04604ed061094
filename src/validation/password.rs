//! Password strength policy.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, OnceLock};

use crate::validation::Field;

/// Lowest and highest accepted `max_similarity`. Below 0.1 nearly every
/// password overlaps enough with some attribute to be rejected.
pub const SIMILARITY_RANGE: std::ops::RangeInclusive<f64> = 0.1..=1.0;

const BUNDLED_COMMON_PASSWORDS: &str = include_str!("common_passwords.txt");

/// Lowercased set of passwords rejected as too common.
#[derive(Clone, Debug)]
pub struct CommonPasswords(Arc<HashSet<String>>);

impl CommonPasswords {
    /// One password per line; blank lines are skipped, case is ignored.
    pub fn from_list(list: &str) -> Self {
        CommonPasswords(Arc::new(
            list.lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_lowercase)
                .collect(),
        ))
    }

    /// The short list compiled into the binary.
    pub fn bundled() -> Self {
        static BUNDLED: OnceLock<CommonPasswords> = OnceLock::new();
        BUNDLED
            .get_or_init(|| CommonPasswords::from_list(BUNDLED_COMMON_PASSWORDS))
            .clone()
    }

    pub fn contains(&self, password: &str) -> bool {
        self.0.contains(&password.trim().to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Clone, Debug)]
pub struct PasswordPolicy {
    pub min_length: usize,
    /// Overlap ratio at or above which a password counts as too close to
    /// another user attribute. Must lie in [`SIMILARITY_RANGE`].
    pub max_similarity: f64,
    pub common_passwords: CommonPasswords,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_length: 8,
            max_similarity: 0.7,
            common_passwords: CommonPasswords::bundled(),
        }
    }
}

impl PasswordPolicy {
    /// Runs every rule and returns the messages of those that fail.
    ///
    /// `attributes` are the other values supplied with the password (username,
    /// email); the password must not be too similar to any of them.
    pub fn check(&self, password: &str, attributes: &[(Field, &str)]) -> Vec<String> {
        let mut messages = Vec::new();

        if password.chars().count() < self.min_length {
            messages.push(format!(
                "is too short (minimum is {} characters)",
                self.min_length
            ));
        }

        if self.common_passwords.contains(password) {
            messages.push("is too common".to_string());
        }

        // decimal digits only: fractions and roman numerals don't count
        if !password.is_empty() && password.chars().all(|c| c.is_ascii_digit()) {
            messages.push("is entirely numeric".to_string());
        }

        if let Some(field) = self.similar_attribute(password, attributes) {
            messages.push(format!("is too similar to the {field}"));
        }

        messages
    }

    fn similar_attribute(&self, password: &str, attributes: &[(Field, &str)]) -> Option<Field> {
        let password = password.to_lowercase();

        attributes.iter().find_map(|(field, value)| {
            let value = value.to_lowercase();
            let similar = value
                .split(|c: char| !(c.is_alphanumeric() || c == '_'))
                .chain(std::iter::once(value.as_str()))
                .filter(|part| !part.is_empty())
                .filter(|part| !self.exceeds_length_ratio(&password, part))
                .any(|part| quick_ratio(&password, part) >= self.max_similarity);

            similar.then_some(*field)
        })
    }

    /// A very long password can't be meaningfully similar to a much shorter
    /// attribute, so those pairs are skipped.
    fn exceeds_length_ratio(&self, password: &str, part: &str) -> bool {
        let password_len = password.chars().count();
        let part_len = part.chars().count();
        let bound = self.max_similarity / 2.0 * password_len as f64;
        password_len >= 10 * part_len && (part_len as f64) < bound
    }
}

/// Upper bound on sequence similarity: twice the size of the character
/// multiset intersection over the combined length.
fn quick_ratio(a: &str, b: &str) -> f64 {
    let total = a.chars().count() + b.chars().count();
    if total == 0 {
        return 1.0;
    }

    let mut available: HashMap<char, usize> = HashMap::new();
    for c in b.chars() {
        *available.entry(c).or_default() += 1;
    }

    let mut matches = 0usize;
    for c in a.chars() {
        if let Some(count) = available.get_mut(&c) {
            if *count > 0 {
                *count -= 1;
                matches += 1;
            }
        }
    }

    2.0 * matches as f64 / total as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> PasswordPolicy {
        PasswordPolicy::default()
    }

    #[test]
    fn strong_password_passes() {
        let messages = policy().check(
            "c0rrect-h0rse-battery",
            &[(Field::Username, "jake"), (Field::Email, "jake@jake.jake")],
        );
        assert!(messages.is_empty(), "unexpected: {messages:?}");
    }

    #[test]
    fn short_numeric_common_password_reports_every_rule() {
        let messages = policy().check("12345", &[]);
        assert_eq!(
            messages,
            vec![
                "is too short (minimum is 8 characters)",
                "is too common",
                "is entirely numeric",
            ]
        );
    }

    #[test]
    fn common_check_ignores_case() {
        let messages = policy().check("PassWord", &[]);
        assert_eq!(messages, vec!["is too common"]);
    }

    #[test]
    fn min_length_is_configurable() {
        let policy = PasswordPolicy {
            min_length: 12,
            ..PasswordPolicy::default()
        };
        let messages = policy.check("tr0ub4dor&3", &[]);
        assert_eq!(messages, vec!["is too short (minimum is 12 characters)"]);
    }

    #[test]
    fn password_close_to_username_is_rejected() {
        let messages = policy().check("jacobsmith1", &[(Field::Username, "jacobsmith")]);
        assert_eq!(messages, vec!["is too similar to the username"]);
    }

    #[test]
    fn password_close_to_email_local_part_is_rejected() {
        let messages = policy().check(
            "marguerite",
            &[
                (Field::Username, "zz_top"),
                (Field::Email, "marguerite@example.org"),
            ],
        );
        assert_eq!(messages, vec!["is too similar to the email"]);
    }

    #[test]
    fn similarity_threshold_is_configurable() {
        let attributes = [(Field::Username, "jacobsmith")];

        // overlap ratio 16/21 ~ 0.76
        let lenient = PasswordPolicy {
            max_similarity: 0.9,
            ..PasswordPolicy::default()
        };
        assert_eq!(
            policy().check("jacobsmi123", &attributes),
            vec!["is too similar to the username"]
        );
        assert!(lenient.check("jacobsmi123", &attributes).is_empty());

        // overlap ratio 14/21 ~ 0.67
        let strict = PasswordPolicy {
            max_similarity: 0.5,
            ..PasswordPolicy::default()
        };
        assert!(policy().check("jacobsm1234", &attributes).is_empty());
        assert_eq!(
            strict.check("jacobsm1234", &attributes),
            vec!["is too similar to the username"]
        );
    }

    #[test]
    fn only_decimal_digits_are_numeric() {
        assert_eq!(policy().check("80417263", &[]), vec!["is entirely numeric"]);
        assert!(policy().check("\u{216B}\u{216B}\u{216B}\u{216B}\u{BD}\u{BD}\u{BD}\u{BD}", &[]).is_empty());
    }

    #[test]
    fn custom_common_list_replaces_bundled() {
        let policy = PasswordPolicy {
            common_passwords: CommonPasswords::from_list("Tr0ub4dor&3\n\n  zebra-crossing-42 \n"),
            ..PasswordPolicy::default()
        };
        assert_eq!(policy.common_passwords.len(), 2);
        assert_eq!(policy.check("ZEBRA-crossing-42", &[]), vec!["is too common"]);
        // no longer on the list
        assert!(policy.check("password1", &[]).is_empty());
    }

    #[test]
    fn bundled_list_is_loaded() {
        let bundled = CommonPasswords::bundled();
        assert!(!bundled.is_empty());
        assert!(bundled.contains("Password"));
    }

    #[test]
    fn quick_ratio_bounds() {
        assert_eq!(quick_ratio("abc", "abc"), 1.0);
        assert_eq!(quick_ratio("abc", "xyz"), 0.0);
        assert!((quick_ratio("abcd", "abxy") - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn long_password_skips_short_attribute() {
        let messages = policy().check(
            "a-very-long-passphrase-containing-al",
            &[(Field::Username, "al")],
        );
        assert!(messages.is_empty(), "unexpected: {messages:?}");
    }
}
