use phonenumber::country;

/// Maximum length of the normalized recipient field, `+` included.
pub const RECIPIENT_MAX_LEN: usize = 14;

/// Normalize a recipient field edit: strip everything outside digits, force
/// a leading `+`, truncate to [`RECIPIENT_MAX_LEN`].
///
/// Idempotent: applying it twice yields the same result as applying it
/// once. Stricter than the browser field it models, which leaves interior
/// `+` characters in place: here only the forced leading `+` survives, so
/// the output always stays inside the pattern alphabet.
pub fn normalize_recipient(raw: &str) -> String {
    let mut normalized = String::with_capacity(RECIPIENT_MAX_LEN);
    normalized.push('+');
    normalized.extend(raw.chars().filter(char::is_ascii_digit));
    normalized.truncate(RECIPIENT_MAX_LEN);
    normalized
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Accepted phone-number pattern for form validation.
///
/// The observed deployment accepts one country's mobile format; later label
/// variants suggest arbitrary country codes. Both intents are representable:
/// a fixed prefix + digit count, or full parsing via the `phonenumber`
/// crate metadata.
pub enum PhonePattern {
    /// A literal prefix followed by exactly `subscriber_digits` digits.
    Fixed {
        prefix: String,
        subscriber_digits: usize,
    },
    /// Parse with the `phonenumber` crate and require a valid number.
    /// The region resolves inputs without an explicit country prefix.
    Region(Option<country::Id>),
}

impl PhonePattern {
    /// Turkish mobile numbers, `+905` followed by nine digits.
    pub fn turkish_mobile() -> Self {
        Self::Fixed {
            prefix: "+905".to_owned(),
            subscriber_digits: 9,
        }
    }

    /// Whether the input satisfies the pattern.
    pub fn matches(&self, input: &str) -> bool {
        match self {
            Self::Fixed {
                prefix,
                subscriber_digits,
            } => input
                .strip_prefix(prefix.as_str())
                .is_some_and(|rest| {
                    rest.len() == *subscriber_digits
                        && rest.chars().all(|c| c.is_ascii_digit())
                }),
            Self::Region(region) => phonenumber::parse(*region, input)
                .map(|parsed| phonenumber::is_valid(&parsed))
                .unwrap_or(false),
        }
    }
}

impl Default for PhonePattern {
    fn default() -> Self {
        Self::turkish_mobile()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalization_strips_forces_plus_and_truncates() {
        assert_eq!(normalize_recipient("905551234567"), "+905551234567");
        assert_eq!(normalize_recipient("+90 555 123-45-67"), "+905551234567");
        assert_eq!(normalize_recipient("abc90x555y1234567z89"), "+9055512345678");
        assert_eq!(normalize_recipient(""), "+");
        // Interior plus signs are stripped along with other non-digits.
        assert_eq!(normalize_recipient("+90+555123456"), "+90555123456");
    }

    #[test]
    fn normalization_is_idempotent() {
        let inputs = [
            "",
            "+905551234567",
            "90 555 123 45 67",
            "call +90 (555) 123 45 67 now",
            "++++",
            "123456789012345678901234",
        ];
        for input in inputs {
            let once = normalize_recipient(input);
            let twice = normalize_recipient(&once);
            assert_eq!(once, twice, "input {input:?}");
            assert!(once.len() <= RECIPIENT_MAX_LEN, "input {input:?}");
        }
    }

    #[test]
    fn fixed_pattern_requires_prefix_and_digit_count() {
        let pattern = PhonePattern::turkish_mobile();
        assert!(pattern.matches("+905551234567"));
        assert!(!pattern.matches("+90555123456"));
        assert!(!pattern.matches("+9055512345678"));
        assert!(!pattern.matches("+15551234567"));
        assert!(!pattern.matches("+90555123456x"));
        assert!(!pattern.matches(""));
    }

    #[test]
    fn region_pattern_accepts_valid_international_numbers() {
        let pattern = PhonePattern::Region(None);
        assert!(pattern.matches("+14155552671"));
        assert!(!pattern.matches("+1"));
        assert!(!pattern.matches("not a number"));
    }
}
