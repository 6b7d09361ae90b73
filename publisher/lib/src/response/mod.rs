//! Response handling module.
//!
//! [`RawResponse`] is what the HTTP client hands back; [`Response`] is the
//! envelope an endpoint returns once the body has been decoded according to
//! its status table. Decoding goes through the [`ResponseFormat`] trait.

mod envelope;
mod format;
mod value;

pub use envelope::{RawResponse, Response};
pub use format::{JsonFormat, ResponseFormat};
pub use value::ParsedResponse;
