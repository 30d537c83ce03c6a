//! Core types shared by the resolver and the publisher

mod cancellation;
mod envelope;
mod kind;

pub use cancellation::{CancelReason, CancellationToken};
pub use envelope::{
    message_id, NotificationEnvelope, HEADER_MESSAGE_ID, HEADER_TIMESTAMP, HEADER_TYPE,
};
pub use kind::{NotificationKind, UnknownKind};
