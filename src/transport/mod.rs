//! Transport layer: HTTP and wire-format details (serialization/deserialization).

mod query;
mod reply;
mod send_message;

pub use query::encode_query;
pub use reply::{Reply, decode_reply};
pub use send_message::encode_send_message_query;
