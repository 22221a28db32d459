//! Domain layer: strong types with validation and invariants (no I/O).

mod message;
mod validation;
mod value;

pub use message::OutboundMessage;
pub use validation::ValidationError;
pub use value::{AuthKey, MessageBody, Recipient};
