//! Shared parameter types.

/// An optional request parameter that distinguishes "not supplied" from any
/// supplied value.
///
/// Omitted parameters are dropped from the outgoing request entirely; they
/// are never sent as an empty string.
///
/// ## Examples
///
/// ```rust
/// use publisher_sdk::Param;
///
/// let key: Param<String> = Param::Provided("orders".to_string());
/// assert!(key.is_provided());
///
/// let missing: Param<String> = None.into();
/// assert_eq!(missing, Param::Omitted);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Param<T> {
    /// The caller supplied a value.
    Provided(T),
    /// The caller left the parameter unset.
    #[default]
    Omitted,
}

impl<T> Param<T> {
    /// Returns `true` if a value was supplied.
    pub fn is_provided(&self) -> bool {
        matches!(self, Self::Provided(_))
    }

    /// Returns `true` if the parameter was left unset.
    pub fn is_omitted(&self) -> bool {
        matches!(self, Self::Omitted)
    }

    /// Borrows the supplied value, if any.
    pub fn as_ref(&self) -> Param<&T> {
        match self {
            Self::Provided(v) => Param::Provided(v),
            Self::Omitted => Param::Omitted,
        }
    }

    /// Converts into an `Option`, mapping [`Param::Omitted`] to `None`.
    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Provided(v) => Some(v),
            Self::Omitted => None,
        }
    }

    /// Maps a supplied value, leaving an omitted parameter omitted.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Param<U> {
        match self {
            Self::Provided(v) => Param::Provided(f(v)),
            Self::Omitted => Param::Omitted,
        }
    }
}

impl<T> From<Option<T>> for Param<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Self::Provided(v),
            None => Self::Omitted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_omitted() {
        let param: Param<String> = Param::default();
        assert!(param.is_omitted());
        assert!(!param.is_provided());
    }

    #[test]
    fn test_from_option() {
        assert_eq!(Param::from(Some(3)), Param::Provided(3));
        assert_eq!(Param::<i32>::from(None), Param::Omitted);
    }

    #[test]
    fn test_provided_empty_string_is_still_provided() {
        let param = Param::Provided(String::new());
        assert!(param.is_provided());
        assert_eq!(param.into_option(), Some(String::new()));
    }

    #[test]
    fn test_map_and_as_ref() {
        let param = Param::Provided("a".to_string());
        assert_eq!(param.as_ref().map(|s| s.len()), Param::Provided(1));
        assert_eq!(Param::<String>::Omitted.map(|s| s.len()), Param::Omitted);
    }
}
