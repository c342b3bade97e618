use crate::domain::validation::ValidationError;

use phonenumber::country;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// PanaceaMobile account username.
///
/// Invariant: non-empty after trimming.
pub struct Username(String);

impl Username {
    /// Query field name used by PanaceaMobile (`username`).
    pub const FIELD: &'static str = "username";

    /// Create a validated [`Username`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated username.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, PartialEq, Eq, Hash)]
/// PanaceaMobile account password.
///
/// Invariant: must not be empty (whitespace is preserved and allowed).
pub struct Password(String);

impl Password {
    /// Query field name used by PanaceaMobile (`password`).
    pub const FIELD: &'static str = "password";

    /// Create a validated [`Password`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the password as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Password(***)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Sender id shown to the recipient (`from`).
///
/// Invariant: non-empty after trimming.
pub struct SenderId(String);

impl SenderId {
    /// Query field name used by PanaceaMobile (`from`).
    pub const FIELD: &'static str = "from";

    /// Create a validated [`SenderId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated sender id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// SMS message text (`text`).
///
/// Invariant: non-empty after trimming. The original value (including whitespace) is preserved.
pub struct MessageText(String);

impl MessageText {
    /// Query field name used by PanaceaMobile (`text`).
    pub const FIELD: &'static str = "text";

    /// Create validated message text.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the message text as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Character set of the message body (`charset`), e.g. `UTF-8`.
///
/// Invariant: non-empty after trimming.
pub struct Charset(String);

impl Charset {
    /// Query field name used by PanaceaMobile (`charset`).
    pub const FIELD: &'static str = "charset";

    /// Create a validated [`Charset`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// URL the gateway calls back with delivery reports (`report_url`).
///
/// Invariant: parses as an absolute URL.
pub struct ReportUrl(String);

impl ReportUrl {
    /// Query field name used by PanaceaMobile (`report_url`).
    pub const FIELD: &'static str = "report_url";

    /// Create a validated [`ReportUrl`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        url::Url::parse(trimmed).map_err(|_| ValidationError::InvalidUrl {
            field: Self::FIELD,
            input: trimmed.to_owned(),
        })?;
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the URL as it will be sent.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Unvalidated destination number as sent to PanaceaMobile (`to`).
///
/// Invariant: non-empty after trimming. This type does not normalize; if you want E.164
/// normalization, parse into [`PhoneNumber`] and convert it into [`RawPhoneNumber`].
pub struct RawPhoneNumber(String);

impl RawPhoneNumber {
    /// Query field name used by PanaceaMobile (`to`).
    pub const FIELD: &'static str = "to";

    /// Create a validated (non-empty) raw phone number.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Raw (trimmed) value as sent to PanaceaMobile.
    pub fn raw(&self) -> &str {
        &self.0
    }
}

impl From<PhoneNumber> for RawPhoneNumber {
    /// Convert an already-parsed phone number to a normalized raw value (E.164).
    fn from(value: PhoneNumber) -> Self {
        Self(value.e164)
    }
}

#[derive(Debug, Clone)]
/// Parsed phone number with an E.164 representation.
///
/// Equality, ordering, and hashing are based on the E.164 form.
pub struct PhoneNumber {
    raw: String,
    e164: String,
    parsed: phonenumber::PhoneNumber,
}

impl PhoneNumber {
    /// Query field name used by PanaceaMobile (`to`).
    pub const FIELD: &'static str = "to";

    /// Parse and normalize a phone number into E.164.
    ///
    /// `default_region` is used when the input does not contain an explicit country prefix.
    pub fn parse(
        default_region: Option<country::Id>,
        input: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let input = input.into();
        let raw = input.trim().to_owned();
        if raw.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }

        let parsed = phonenumber::parse(default_region, &raw)
            .map_err(|_| ValidationError::InvalidPhoneNumber { input: raw.clone() })?;

        let e164 = phonenumber::format(&parsed)
            .mode(phonenumber::Mode::E164)
            .to_string();

        Ok(Self { raw, e164, parsed })
    }

    /// Raw input after trimming.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Normalized E.164 representation.
    pub fn e164(&self) -> &str {
        &self.e164
    }

    /// The parsed phone number from the `phonenumber` crate.
    pub fn parsed(&self) -> &phonenumber::PhoneNumber {
        &self.parsed
    }
}

impl PartialEq for PhoneNumber {
    fn eq(&self, other: &Self) -> bool {
        self.e164 == other.e164
    }
}

impl Eq for PhoneNumber {}

impl std::hash::Hash for PhoneNumber {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.e164.hash(state);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Bitmask selecting which delivery reports the gateway posts to `report_url` (`report_mask`).
pub struct ReportMask(u32);

impl ReportMask {
    /// Query field name used by PanaceaMobile (`report_mask`).
    pub const FIELD: &'static str = "report_mask";

    /// Mask applied when the caller does not choose one.
    pub const DEFAULT: Self = Self(19);

    pub fn new(value: u32) -> Self {
        Self(value)
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for ReportMask {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// SMPP data coding scheme forwarded to the carrier (`data_coding`).
pub struct DataCoding(i32);

impl DataCoding {
    /// Query field name used by PanaceaMobile (`data_coding`).
    pub const FIELD: &'static str = "data_coding";

    pub fn new(value: i32) -> Self {
        Self(value)
    }

    pub fn value(self) -> i32 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Message class (`message_class`). `-1` leaves the class to the gateway.
pub struct MessageClass(i32);

impl MessageClass {
    /// Query field name used by PanaceaMobile (`message_class`).
    pub const FIELD: &'static str = "message_class";

    /// Let the gateway pick the class.
    pub const DEFAULT: Self = Self(-1);

    /// Class 0 ("flash") message, displayed immediately and not stored.
    pub const FLASH: Self = Self(0);

    pub fn new(value: i32) -> Self {
        Self(value)
    }

    pub fn value(self) -> i32 {
        self.0
    }
}

impl Default for MessageClass {
    fn default() -> Self {
        Self::DEFAULT
    }
}
