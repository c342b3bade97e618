use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field carrying the gateway's status convention (`1` = success).
pub const STATUS_FIELD: &str = "status";
/// Field carrying the human-readable result or failure message.
pub const DETAILS_FIELD: &str = "details";

/// Successful gateway reply: the decoded JSON object, kept whole.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GatewayResponse(Map<String, Value>);

impl GatewayResponse {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Raw `status` value, if the gateway sent one.
    pub fn status(&self) -> Option<&Value> {
        self.0.get(STATUS_FIELD)
    }

    /// `details` as a string, if present and a JSON string.
    pub fn details(&self) -> Option<&str> {
        self.0.get(DETAILS_FIELD).and_then(Value::as_str)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_fields(self) -> Map<String, Value> {
        self.0
    }
}
