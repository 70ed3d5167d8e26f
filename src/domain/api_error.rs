use crate::domain::validation::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Error code reported by SMS Center in the `error_code` field.
///
/// [`ErrorCode::Unknown`] is never produced from a remote `error_code`; the client uses it for
/// failures detected on its own side, such as a non-200 HTTP status.
pub enum ErrorCode {
    /// Failure not reported through `error_code` (code `0`).
    Unknown,
    /// Error in request parameters (code `1`).
    Params,
    /// Invalid login or password (code `2`).
    Login,
    /// Insufficient funds on the account (code `3`).
    Money,
    /// IP address temporarily blocked after frequent request errors (code `4`).
    IpBlocked,
    /// Invalid date format (code `5`).
    IncorrectDateFormat,
    /// Message blocked by text or sender name, or bulk/advertising messages sent without a
    /// contract (code `6`).
    SpamBlock,
    /// Invalid phone number format (code `7`).
    PhoneFormat,
    /// Message cannot be delivered to the given number (code `8`).
    CannotBeDelivered,
    /// Duplicate send request, too many identical cost requests per minute, or more than 15
    /// concurrent requests (code `9`).
    DosBlock,
}

impl ErrorCode {
    /// Map a remote `error_code` into a known variant.
    ///
    /// Only codes `1..=9` are accepted. Code `0` is rejected as well: it is reserved for
    /// errors that do not come from the remote `error_code` field.
    pub fn from_remote(code: i64) -> Result<Self, ValidationError> {
        Ok(match code {
            1 => Self::Params,
            2 => Self::Login,
            3 => Self::Money,
            4 => Self::IpBlocked,
            5 => Self::IncorrectDateFormat,
            6 => Self::SpamBlock,
            7 => Self::PhoneFormat,
            8 => Self::CannotBeDelivered,
            9 => Self::DosBlock,
            _ => return Err(ValidationError::UnknownErrorCode { code }),
        })
    }

    /// Returns `true` iff `code` is one of the remote error codes `1..=9`.
    pub fn is_valid(code: i64) -> bool {
        Self::from_remote(code).is_ok()
    }

    /// Integer code as used on the wire.
    pub fn as_i64(self) -> i64 {
        match self {
            Self::Unknown => 0,
            Self::Params => 1,
            Self::Login => 2,
            Self::Money => 3,
            Self::IpBlocked => 4,
            Self::IncorrectDateFormat => 5,
            Self::SpamBlock => 6,
            Self::PhoneFormat => 7,
            Self::CannotBeDelivered => 8,
            Self::DosBlock => 9,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Unknown => "unknown error",
            Self::Params => "error in request parameters",
            Self::Login => "invalid login or password",
            Self::Money => "insufficient funds on the account",
            Self::IpBlocked => "IP address temporarily blocked",
            Self::IncorrectDateFormat => "invalid date format",
            Self::SpamBlock => "message is forbidden by text or sender name",
            Self::PhoneFormat => "invalid phone number format",
            Self::CannotBeDelivered => "message cannot be delivered to the number",
            Self::DosBlock => "too many identical or concurrent requests",
        }
    }

    /// Whether this code indicates rejected credentials.
    pub fn is_auth_error(self) -> bool {
        matches!(self, Self::Login)
    }

    /// Whether this code indicates a temporary block caused by request volume.
    pub fn is_rate_limited(self) -> bool {
        matches!(self, Self::IpBlocked | Self::DosBlock)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message} (code {})", .code.as_i64())]
/// Error reported by SMS Center, or a non-200 HTTP response mapped to [`ErrorCode::Unknown`].
pub struct ApiError {
    message: String,
    code: ErrorCode,
}

impl ApiError {
    /// Create an error from a remote `error` message and `error_code`.
    ///
    /// Fails with [`ValidationError::UnknownErrorCode`] unless `code` is in `1..=9`.
    pub fn new(message: impl Into<String>, code: i64) -> Result<Self, ValidationError> {
        let code = ErrorCode::from_remote(code)?;
        Ok(Self {
            message: message.into(),
            code,
        })
    }

    pub(crate) fn http_status(status: u16) -> Self {
        Self {
            message: format!("SMS Center returned HTTP error #{status}"),
            code: ErrorCode::Unknown,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }
}
