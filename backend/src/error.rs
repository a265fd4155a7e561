use thiserror::Error;

/// Errors raised by the firewall manager and its collaborators.
#[derive(Debug, Error)]
pub enum Error {
    /// No firewall with the requested id exists
    #[error("Firewall not found")]
    NotFound(String),

    /// Database operation failed
    #[error("Storage error: {0}")]
    Storage(#[from] sea_orm::DbErr),

    /// A provisioning backend (orchestrator, controller, device) failed
    #[error("Provisioning error: {0}")]
    Provisioning(String),

    /// Request rejected at the API boundary
    #[error("{0}")]
    Validation(String),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_keeps_wire_message() {
        let err = Error::NotFound("fw-1".to_string());
        assert_eq!(err.to_string(), "Firewall not found");
    }

    #[test]
    fn storage_wraps_db_error() {
        let err: Error = sea_orm::DbErr::Custom("disk full".to_string()).into();
        assert!(matches!(err, Error::Storage(_)));
        assert!(err.to_string().contains("disk full"));
    }
}
