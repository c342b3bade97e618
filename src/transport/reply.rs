use serde_json::Value;

use crate::domain::{DETAILS_FIELD, GatewayResponse, STATUS_FIELD};

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),
}

/// Gateway reply classified by the `status` convention.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Success(GatewayResponse),
    Failure { status: Value, message: String },
}

/// Decode a JSON object body and apply the status convention.
///
/// A missing or `null` status counts as success; anything other than the integer `1` fails.
pub fn decode_reply(json: &str) -> Result<Reply, TransportError> {
    let response: GatewayResponse = serde_json::from_str(json)?;

    match response.status() {
        None | Some(Value::Null) => Ok(Reply::Success(response)),
        Some(status) if status.as_i64() == Some(1) => Ok(Reply::Success(response)),
        Some(status) => {
            let status = status.clone();
            let message = details_message(response.get(DETAILS_FIELD));
            Ok(Reply::Failure { status, message })
        }
    }
}

fn details_message(details: Option<&Value>) -> String {
    match details {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}
