use url::form_urlencoded;

use crate::domain::Query;

/// Encode as `application/x-www-form-urlencoded`, in insertion order.
///
/// Entries without a value are skipped, so an unset credential never reaches the wire.
pub fn encode_query(query: &Query) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in query.entries() {
        if let Some(value) = value {
            serializer.append_pair(key, value);
        }
    }
    serializer.finish()
}
