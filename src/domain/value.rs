use crate::domain::validation::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Phone number the message is addressed to (`to`).
///
/// Invariant: non-empty. The value is otherwise preserved byte-for-byte —
/// the relay forwards whatever the caller supplied, unmodified. Stricter
/// pattern checks belong to the submission form, which owns the user-facing
/// validation policy.
pub struct Recipient(String);

impl Recipient {
    /// JSON field name used on both the relay and gateway wire (`to`).
    pub const FIELD: &'static str = "to";

    /// Create a validated (non-empty) recipient.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the validated phone number.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// SMS message text (`message`).
///
/// Invariants: non-empty, at most [`MessageBody::MAX_UNITS`] characters.
/// The value (including whitespace) is preserved byte-for-byte and
/// forwarded unmodified.
pub struct MessageBody(String);

impl MessageBody {
    /// JSON field name used on both the relay and gateway wire (`message`).
    pub const FIELD: &'static str = "message";

    /// Maximum message length in characters, enforced on both sides of the
    /// relay (the form truncates, the server rejects).
    pub const MAX_UNITS: usize = 320;

    /// Create validated message text.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        let actual = value.chars().count();
        if actual > Self::MAX_UNITS {
            return Err(ValidationError::BodyTooLong {
                max: Self::MAX_UNITS,
                actual,
            });
        }
        Ok(Self(value))
    }

    /// Borrow the message text as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Gateway authentication key, sent verbatim in the `Authorization` header.
///
/// Invariant: non-empty after trimming.
pub struct AuthKey(String);

impl AuthKey {
    /// HTTP header the key travels in.
    pub const HEADER: &'static str = "Authorization";

    /// Create a validated [`AuthKey`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::HEADER });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated key.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recipient_preserves_padding_and_rejects_empty() {
        let to = Recipient::new(" +905551234567 ").unwrap();
        assert_eq!(to.as_str(), " +905551234567 ");
        assert!(matches!(
            Recipient::new(""),
            Err(ValidationError::Empty { field: "to" })
        ));
        // Whitespace is content, not absence; the gateway sees it as sent.
        assert!(Recipient::new(" ").is_ok());
    }

    #[test]
    fn message_body_preserves_whitespace_but_rejects_empty() {
        let body = MessageBody::new(" Merhaba ").unwrap();
        assert_eq!(body.as_str(), " Merhaba ");
        assert!(matches!(
            MessageBody::new(""),
            Err(ValidationError::Empty { field: "message" })
        ));
        assert!(MessageBody::new(" ").is_ok());
    }

    #[test]
    fn message_body_enforces_character_cap() {
        let at_cap = "x".repeat(MessageBody::MAX_UNITS);
        assert!(MessageBody::new(at_cap).is_ok());

        let over_cap = "x".repeat(MessageBody::MAX_UNITS + 1);
        let err = MessageBody::new(over_cap).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::BodyTooLong {
                max: 320,
                actual: 321
            }
        ));
    }

    #[test]
    fn message_body_cap_counts_characters_not_bytes() {
        // Turkish text is multi-byte in UTF-8 but must count per character.
        let turkish = "ş".repeat(MessageBody::MAX_UNITS);
        assert!(MessageBody::new(turkish).is_ok());
    }

    #[test]
    fn auth_key_trims_and_rejects_empty() {
        let key = AuthKey::new(" secret ").unwrap();
        assert_eq!(key.as_str(), "secret");
        assert!(AuthKey::new("").is_err());
    }
}
