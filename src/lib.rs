//! Typed Rust client for the SMS Center (smsc.kz) HTTP API.
//!
//! The crate has a domain layer of strong types, a transport layer for wire-format
//! quirks, and a small client layer orchestrating requests.
//!
//! ```rust,no_run
//! use smsc::{MessageText, RawPhoneNumber, SenderId, SmscClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), smsc::SmscError> {
//!     let mut client = SmscClient::new("login", "password")?;
//!     let text = MessageText::new("hello")?;
//!     let phone = RawPhoneNumber::new("+77011234567")?;
//!     let sender = SenderId::new("Shop")?;
//!     let _resp = client.send_message_by_sms(&text, &phone, Some(&sender)).await?;
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
mod transport;

pub use client::{
    Credentials, DEFAULT_CHARSET, DEFAULT_CONNECTION_TIMEOUT, DEFAULT_HOST,
    DEFAULT_REQUEST_TIMEOUT, DEFAULT_USER_AGENT, SmscClient, SmscClientBuilder, SmscError,
};
pub use domain::{
    ApiError, Charset, CostMode, ErrorCode, HttpMethod, Login, MessageText, Params, Password,
    PhoneNumber, RawPhoneNumber, RawResponse, RequestInfo, ResponseFormat, SenderId,
    SmscResponse, ValidationError,
};
