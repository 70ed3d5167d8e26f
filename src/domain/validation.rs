use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Empty { field: &'static str },
    InvalidPhoneNumber { input: String },
    InvalidHost { input: String },
    UnknownErrorCode { code: i64 },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{field} must not be empty"),
            Self::InvalidPhoneNumber { input } => write!(f, "invalid phone number: {input}"),
            Self::InvalidHost { input } => write!(f, "invalid host URL: {input}"),
            Self::UnknownErrorCode { code } => {
                write!(f, "unknown SMS Center error code: {code}")
            }
        }
    }
}

impl std::error::Error for ValidationError {}
