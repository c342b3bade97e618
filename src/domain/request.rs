use crate::domain::value::{
    Charset, DataCoding, MessageClass, MessageText, RawPhoneNumber, ReportMask, ReportUrl,
    SenderId,
};

/// Action selector for sending a single SMS.
pub const MESSAGE_SEND_ACTION: &str = "message_send";

#[derive(Debug, Clone, Default)]
pub struct SendOptions {
    pub from: Option<SenderId>,
    pub report_mask: ReportMask,
    pub report_url: Option<ReportUrl>,
    pub charset: Option<Charset>,
    pub data_coding: Option<DataCoding>,
    pub message_class: MessageClass,
    pub auto_detect_encoding: bool,
}

#[derive(Debug, Clone)]
pub struct SendMessage {
    to: RawPhoneNumber,
    text: MessageText,
    options: SendOptions,
}

impl SendMessage {
    pub fn new(to: RawPhoneNumber, text: MessageText, options: SendOptions) -> Self {
        Self { to, text, options }
    }

    /// Shorthand for a message with a sender id and default options otherwise.
    pub fn from_sender(to: RawPhoneNumber, text: MessageText, from: SenderId) -> Self {
        Self::new(
            to,
            text,
            SendOptions {
                from: Some(from),
                ..Default::default()
            },
        )
    }

    pub fn to(&self) -> &RawPhoneNumber {
        &self.to
    }

    pub fn text(&self) -> &MessageText {
        &self.text
    }

    pub fn options(&self) -> &SendOptions {
        &self.options
    }
}
