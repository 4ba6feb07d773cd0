//! Error types for the entitlement engine

use thiserror::Error;

/// Entitlement engine error type
#[derive(Error, Debug)]
pub enum EntitlementError {
    /// Tier name is not one of `free`, `battery`, `pro`
    #[error("unknown tier: {0}")]
    UnknownTier(String),

    /// Persist scope name is not recognized
    #[error("unknown persist scope: {0}")]
    UnknownPersistScope(String),
}

/// Persistence adapter error type
///
/// The engine logs these and keeps running on its in-memory state.
#[derive(Error, Debug)]
pub enum StoreError {
    /// No record has been written yet
    #[error("no stored state at {0}")]
    Missing(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Record is not valid JSON or has the wrong shape
    #[error("malformed state record: {0}")]
    Json(#[from] serde_json::Error),

    /// Backend refused the operation
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Result type for fallible parsing in the entitlement engine
pub type EntitlementResult<T> = Result<T, EntitlementError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Tier;
    use crate::store::PersistScope;

    #[test]
    fn test_parse_errors_are_typed() {
        let tier: EntitlementResult<Tier> = "gold".parse();
        assert_eq!(tier.unwrap_err().to_string(), "unknown tier: gold");

        let scope: EntitlementResult<PersistScope> = "all".parse();
        assert!(matches!(scope, Err(EntitlementError::UnknownPersistScope(s)) if s == "all"));
    }

    #[test]
    fn test_store_error_conversions() {
        let io: StoreError = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied").into();
        assert!(matches!(io, StoreError::Io(_)));

        let json: StoreError = serde_json::from_str::<u8>("x").unwrap_err().into();
        assert!(json.to_string().starts_with("malformed state record"));
    }
}
