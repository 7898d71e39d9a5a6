use qms_model::ModelError;
use qms_store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    /// The deployment form is missing a mandatory field.
    #[error("All deployment fields are mandatory: {0}")]
    Incomplete(#[source] ModelError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type Result<T> = std::result::Result<T, CoreError>;
