//! Parsed response body types.

/// A response body decoded according to an endpoint's status table.
///
/// `Success` holds the documented success model; `Failure` holds the model
/// the server uses to report an application-level error (e.g. 404). Neither
/// is a Rust error: the request completed and the server answered.
///
/// ## Examples
///
/// ```rust
/// use publisher_sdk::ParsedResponse;
///
/// let parsed: ParsedResponse<u32, String> = ParsedResponse::Failure("not found".into());
/// assert!(parsed.is_failure());
/// assert_eq!(parsed.failure(), Some(&"not found".to_string()));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedResponse<T, E> {
    /// Body of a documented success status.
    Success(T),
    /// Body of a documented error status.
    Failure(E),
}

impl<T, E> ParsedResponse<T, E> {
    /// Returns `true` for a success body.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Returns `true` for an error body.
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure(_))
    }

    /// Borrows the success body, if any.
    pub fn success(&self) -> Option<&T> {
        match self {
            Self::Success(v) => Some(v),
            Self::Failure(_) => None,
        }
    }

    /// Borrows the error body, if any.
    pub fn failure(&self) -> Option<&E> {
        match self {
            Self::Success(_) => None,
            Self::Failure(e) => Some(e),
        }
    }

    /// Converts into a `Result`, with the error body on the `Err` side.
    pub fn into_result(self) -> Result<T, E> {
        match self {
            Self::Success(v) => Ok(v),
            Self::Failure(e) => Err(e),
        }
    }
}
