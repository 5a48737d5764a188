use thiserror::Error;

/// A Remote Guest Store request that did not complete.
///
/// Whenever an operation reports one of these, the local directory and
/// draft are guaranteed to be exactly as they were before the call.
#[derive(Debug, Error)]
#[error("guest store request failed during {operation}: {source}")]
pub struct StoreError {
    pub operation: &'static str,
    #[source]
    pub source: anyhow::Error,
}

impl StoreError {
    pub(crate) fn new(operation: &'static str, source: anyhow::Error) -> Self {
        Self { operation, source }
    }
}
