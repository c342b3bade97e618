use crate::domain::{
    Charset, DataCoding, MessageClass, MessageText, Query, RawPhoneNumber, ReportMask, ReportUrl,
    SendMessage, SenderId,
};

const AUTO_DETECT_ENCODING_FIELD: &str = "auto_detect_encoding";

/// Build the `message_send` parameters.
///
/// Every field is present in the mapping, optional ones as `None`, so the parameter set is
/// stable regardless of which options the caller filled in.
pub fn encode_send_message_query(request: &SendMessage) -> Query {
    let options = request.options();
    let mut query = Query::new();

    query.set(RawPhoneNumber::FIELD, Some(request.to().raw().to_owned()));
    query.set(MessageText::FIELD, Some(request.text().as_str().to_owned()));
    query.set(
        SenderId::FIELD,
        options.from.as_ref().map(|from| from.as_str().to_owned()),
    );
    query.set(ReportMask::FIELD, Some(options.report_mask.value().to_string()));
    query.set(
        ReportUrl::FIELD,
        options.report_url.as_ref().map(|url| url.as_str().to_owned()),
    );
    query.set(
        Charset::FIELD,
        options.charset.as_ref().map(|charset| charset.as_str().to_owned()),
    );
    query.set(
        DataCoding::FIELD,
        options.data_coding.map(|coding| coding.value().to_string()),
    );
    query.set(
        MessageClass::FIELD,
        Some(options.message_class.value().to_string()),
    );
    query.set(
        AUTO_DETECT_ENCODING_FIELD,
        Some(bool_flag(options.auto_detect_encoding).to_owned()),
    );

    query
}

fn bool_flag(value: bool) -> &'static str {
    if value { "1" } else { "0" }
}
