//! Domain layer: strong types with validation and invariants (no I/O).

mod query;
mod request;
mod response;
mod validation;
mod value;

pub use query::Query;
pub use request::{MESSAGE_SEND_ACTION, SendMessage, SendOptions};
pub use response::{DETAILS_FIELD, GatewayResponse, STATUS_FIELD};
pub use validation::ValidationError;
pub use value::{
    Charset, DataCoding, MessageClass, MessageText, Password, PhoneNumber, RawPhoneNumber,
    ReportMask, ReportUrl, SenderId, Username,
};
