use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Empty { field: &'static str },
    BodyTooLong { max: usize, actual: usize },
    InvalidRecipient { input: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{field} must not be empty"),
            Self::BodyTooLong { max, actual } => {
                write!(f, "message too long: {actual} characters (max {max})")
            }
            Self::InvalidRecipient { input } => write!(f, "invalid phone number: {input}"),
        }
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::ValidationError;

    #[test]
    fn display_messages_are_human_readable() {
        let err = ValidationError::Empty { field: "to" };
        assert_eq!(err.to_string(), "to must not be empty");

        let err = ValidationError::BodyTooLong {
            max: 320,
            actual: 321,
        };
        assert_eq!(err.to_string(), "message too long: 321 characters (max 320)");

        let err = ValidationError::InvalidRecipient {
            input: "bad".to_owned(),
        };
        assert_eq!(err.to_string(), "invalid phone number: bad");
    }
}
