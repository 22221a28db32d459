//! Form layer: the client-side submission lifecycle.
//!
//! A headless model of the send form: normalized inputs, a four-phase state
//! machine with guarded transitions, and a relay client that drives it. No
//! rendering concerns live here.

mod client;
mod input;

pub use client::RelayFormClient;
pub use input::{PhonePattern, RECIPIENT_MAX_LEN, normalize_recipient};

use crate::domain::{MessageBody, OutboundMessage, Recipient, ValidationError};

/// Substituted when a failure envelope carries no message.
pub const ERR_UNKNOWN: &str = "Unknown error";
/// Substituted when the relay endpoint could not be reached at all.
pub const ERR_NETWORK: &str = "Network error";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
/// Submission lifecycle phase.
///
/// An error message is only representable in the `Error` variant, so
/// "success with an error" cannot be constructed. `Success` and `Error` are
/// terminal until the next submit; nothing auto-clears them.
pub enum FormState {
    #[default]
    Idle,
    Sending,
    Success,
    Error {
        message: String,
    },
}

impl FormState {
    /// Whether a submission is currently in flight.
    pub fn is_sending(&self) -> bool {
        matches!(self, Self::Sending)
    }

    /// The error message, when in the error phase.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Error { message } => Some(message),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Visual validation feedback for a field. Never blocks typing, only
/// submission.
pub enum FieldStatus {
    /// Nothing entered yet.
    Neutral,
    /// Entered but not acceptable.
    Invalid,
    /// Acceptable.
    Valid,
}

#[derive(Debug, thiserror::Error)]
/// Reasons a submit is refused before anything is dispatched.
pub enum FormError {
    /// A submission is already in flight; at most one at a time.
    #[error("a submission is already in flight")]
    InFlight,

    /// One of the fields failed validation.
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

#[derive(Debug, Clone)]
/// The send form: two inputs and the submission state machine.
pub struct SubmissionForm {
    pattern: PhonePattern,
    recipient: String,
    body: String,
    state: FormState,
}

impl Default for SubmissionForm {
    fn default() -> Self {
        Self::new()
    }
}

impl SubmissionForm {
    /// An empty form with the default phone pattern.
    pub fn new() -> Self {
        Self::with_pattern(PhonePattern::default())
    }

    /// An empty form validating recipients against `pattern`.
    pub fn with_pattern(pattern: PhonePattern) -> Self {
        Self {
            pattern,
            recipient: String::new(),
            body: String::new(),
            state: FormState::Idle,
        }
    }

    /// Replace the recipient field, normalizing as the browser form does:
    /// digits only, forced leading `+`, length-capped.
    pub fn set_recipient(&mut self, raw: &str) {
        self.recipient = normalize_recipient(raw);
    }

    /// Replace the message field, truncating to the shared 320-character
    /// cap. Anything past the cap never enters the field.
    pub fn set_body(&mut self, raw: &str) {
        self.body = raw.chars().take(MessageBody::MAX_UNITS).collect();
    }

    /// Current recipient field contents.
    pub fn recipient(&self) -> &str {
        &self.recipient
    }

    /// Current message field contents.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Characters still available in the message field, for the live
    /// indicator.
    pub fn remaining_chars(&self) -> usize {
        MessageBody::MAX_UNITS - self.body.chars().count()
    }

    /// Current lifecycle phase.
    pub fn state(&self) -> &FormState {
        &self.state
    }

    /// Field-level feedback for the recipient input.
    pub fn recipient_status(&self) -> FieldStatus {
        if self.recipient.is_empty() {
            FieldStatus::Neutral
        } else if self.pattern.matches(&self.recipient) {
            FieldStatus::Valid
        } else {
            FieldStatus::Invalid
        }
    }

    /// Whether the submit control is enabled. Agrees exactly with the
    /// guards in [`SubmissionForm::begin_submit`].
    pub fn can_submit(&self) -> bool {
        !self.state.is_sending()
            && !self.body.trim().is_empty()
            && self.pattern.matches(&self.recipient)
    }

    /// Transition to `Sending` and hand back the message to dispatch.
    ///
    /// Guarded: refused while a submission is in flight, and refused (with
    /// the state unchanged) when either field fails validation. A submit
    /// from `Success` or `Error` restarts the cycle.
    pub fn begin_submit(&mut self) -> Result<OutboundMessage, FormError> {
        if self.state.is_sending() {
            return Err(FormError::InFlight);
        }
        if !self.pattern.matches(&self.recipient) {
            return Err(FormError::Invalid(ValidationError::InvalidRecipient {
                input: self.recipient.clone(),
            }));
        }
        if self.body.trim().is_empty() {
            return Err(FormError::Invalid(ValidationError::Empty {
                field: MessageBody::FIELD,
            }));
        }
        let recipient = Recipient::new(self.recipient.clone())?;
        let body = MessageBody::new(self.body.clone())?;
        self.state = FormState::Sending;
        Ok(OutboundMessage::new(recipient, body))
    }

    /// Settle the in-flight submission as delivered to the gateway.
    pub fn settle_success(&mut self) {
        if self.state.is_sending() {
            self.state = FormState::Success;
        }
    }

    /// Settle the in-flight submission as failed. `None` substitutes the
    /// generic network-error message.
    pub fn settle_failure(&mut self, message: Option<String>) {
        if self.state.is_sending() {
            let message = message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| ERR_NETWORK.to_owned());
            self.state = FormState::Error { message };
        }
    }
}
