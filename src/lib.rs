//! Typed Rust client for the PanaceaMobile SMS gateway HTTP API.
//!
//! The crate is split into a domain layer of strong types, a transport layer for
//! wire-format details (query strings, the JSON `status` convention), and a small
//! client layer orchestrating requests.
//!
//! ```rust,no_run
//! use panacea::{
//!     ClientConfig, GatewayClient, MessageText, Password, RawPhoneNumber, SendMessage,
//!     SendOptions, Username,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), panacea::PanaceaError> {
//!     let config = ClientConfig::with_credentials(Username::new("...")?, Password::new("...")?);
//!     let client = GatewayClient::new(config);
//!     let to = RawPhoneNumber::new("+27000000000")?;
//!     let text = MessageText::new("hello")?;
//!     let response = client
//!         .send_message(SendMessage::new(to, text, SendOptions::default()))
//!         .await?;
//!     println!("{:?}", response.details());
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
mod transport;

pub use client::{
    ClientConfig, DEFAULT_URI, DEFAULT_USER_AGENT, GatewayClient, GatewayClientBuilder, Headers,
    PanaceaError,
};
pub use domain::{
    Charset, DataCoding, GatewayResponse, MessageClass, MessageText, Password, PhoneNumber, Query,
    RawPhoneNumber, ReportMask, ReportUrl, SendMessage, SendOptions, SenderId, Username,
    ValidationError,
};
