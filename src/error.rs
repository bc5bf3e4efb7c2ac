use thiserror::Error;

pub type CaseApiResult<T> = Result<T, CaseApiError>;

/// Errors surfaced by the case API.
///
/// The type is `Clone` because a single failure is handed to every callback
/// registered on a [`FutureResult`](crate::deferred::FutureResult).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CaseApiError {
    #[error("Unknown case: {0}")]
    UnknownCase(String),

    #[error("Unknown {kind}: {value}")]
    UnknownVariant { kind: &'static str, value: String },

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Deferred result was dropped before it resolved")]
    Abandoned,

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<toml::de::Error> for CaseApiError {
    fn from(err: toml::de::Error) -> Self {
        CaseApiError::ConfigError(format!("Failed to parse catalog: {err}"))
    }
}

impl From<std::io::Error> for CaseApiError {
    fn from(err: std::io::Error) -> Self {
        CaseApiError::ConfigError(format!("Failed to read catalog: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CaseApiError::UnknownVariant {
            kind: "reward type",
            value: "gold".to_string(),
        };
        assert_eq!(err.to_string(), "Unknown reward type: gold");
        assert_eq!(
            CaseApiError::UnknownCase("vote".into()).to_string(),
            "Unknown case: vote"
        );
    }

    #[test]
    fn test_toml_error_maps_to_config_error() {
        let err: CaseApiError = toml::from_str::<toml::Value>("cases = [")
            .unwrap_err()
            .into();
        assert!(matches!(err, CaseApiError::ConfigError(_)));
    }
}
