use tallyboard_client::ApiClientError;
use tallyboard_core::types::DbId;

/// Errors from console operations.
///
/// All of these are surfaced as transient notices; none are fatal to the
/// console.
#[derive(Debug, thiserror::Error)]
pub enum ConsoleError {
    /// A transport or backend error from the REST client.
    #[error(transparent)]
    Api(#[from] ApiClientError),

    /// The referenced row is not in the current reconciled set.
    #[error("No row for subproject {subproject_id}, resource {resource_id}")]
    UnknownRow { subproject_id: DbId, resource_id: DbId },

    /// The row is historical and renders read-only.
    #[error("Row for subproject {subproject_id}, resource {resource_id} is read-only")]
    ReadOnlyRow { subproject_id: DbId, resource_id: DbId },

    /// A precondition on the operation failed.
    #[error("Validation failed: {0}")]
    Validation(String),
}
