//! Domain layer: strong types with validation and invariants (no I/O).

mod api_error;
mod request;
mod response;
mod validation;
mod value;

pub use api_error::{ApiError, ErrorCode};
pub use request::{CostMode, HttpMethod, Params, RequestInfo, ResponseFormat};
pub use response::{RawResponse, SmscResponse};
pub use validation::ValidationError;
pub use value::{Charset, Login, MessageText, Password, PhoneNumber, RawPhoneNumber, SenderId};
