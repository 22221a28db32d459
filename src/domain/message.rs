use serde_json::json;

use crate::domain::value::{MessageBody, Recipient};

#[derive(Debug, Clone, PartialEq, Eq)]
/// One outbound SMS, owned for the duration of a single submission.
///
/// Constructed by the submission form (or the relay handler, server-side),
/// handed to the gateway client, and discarded once the relay responds.
pub struct OutboundMessage {
    recipient: Recipient,
    body: MessageBody,
}

impl OutboundMessage {
    /// Combine an already-validated recipient and body.
    pub fn new(recipient: Recipient, body: MessageBody) -> Self {
        Self { recipient, body }
    }

    /// The phone number the message is addressed to.
    pub fn recipient(&self) -> &Recipient {
        &self.recipient
    }

    /// The message text.
    pub fn body(&self) -> &MessageBody {
        &self.body
    }

    /// The JSON payload sent to both the relay endpoint and the gateway:
    /// `{"to": .., "message": ..}`, nothing else.
    pub fn to_wire_json(&self) -> serde_json::Value {
        json!({
            Recipient::FIELD: self.recipient.as_str(),
            MessageBody::FIELD: self.body.as_str(),
        })
    }
}
