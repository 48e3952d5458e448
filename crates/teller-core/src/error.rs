use thiserror::Error;

/// Top-level error type for the Teller assistant.
///
/// Only configuration handling can surface errors to a caller; the chat
/// path recovers from every failure internally and never returns one.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TellerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<toml::de::Error> for TellerError {
    fn from(err: toml::de::Error) -> Self {
        TellerError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for TellerError {
    fn from(err: toml::ser::Error) -> Self {
        TellerError::Config(err.to_string())
    }
}

/// A specialized `Result` type for Teller operations.
pub type Result<T> = std::result::Result<T, TellerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TellerError::Config("missing field".to_string());
        assert_eq!(err.to_string(), "Configuration error: missing field");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: TellerError = io_err.into();
        assert!(matches!(err, TellerError::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_error_from_toml_de() {
        let bad_toml = "invalid = [[[";
        let parsed: std::result::Result<toml::Value, _> = toml::from_str(bad_toml);
        let err: TellerError = parsed.unwrap_err().into();
        assert!(matches!(err, TellerError::Config(_)));
    }

    #[test]
    fn test_result_type_with_question_mark() {
        fn inner() -> Result<String> {
            let io_result: std::result::Result<i32, std::io::Error> = Ok(42);
            let _value = io_result?;
            Ok("success".to_string())
        }

        assert_eq!(inner().unwrap(), "success");
    }

    #[test]
    fn test_error_debug_impl() {
        let err = TellerError::Config("test debug".to_string());
        let debug_str = format!("{:?}", err);
        assert!(debug_str.contains("Config"));
        assert!(debug_str.contains("test debug"));
    }
}
