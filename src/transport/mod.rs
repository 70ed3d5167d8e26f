//! Transport layer: wire-format details (parameter encoding and JSON decoding).

mod response;
mod send;

pub use response::{DecodedResponse, decode_json_response};
pub use send::{SEND_METHOD, encode_price_form, encode_send_many_form, encode_send_one_form};
