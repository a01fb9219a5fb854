use thiserror::Error;

/// Errors surfaced by the reconciliation engine.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The cloud service call behind an operation failed.
    #[error(transparent)]
    Api(#[from] maklink_api::Error),

    /// A session could not be established this cycle.
    #[error("not authenticated with the cloud service")]
    NotAuthenticated,

    /// The protocol was asked to do work after `stop()`.
    #[error("protocol is stopped")]
    Stopped,
}
