use thiserror::Error;

#[derive(Debug, Error)]
pub enum SdkError {
    #[error("no records available to archive")]
    EmptyInput,

    #[error("import error: {0}")]
    Dag(rostercar_dag::DagError),

    #[error("archive error: {0}")]
    Car(#[from] rostercar_car::CarError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<rostercar_dag::DagError> for SdkError {
    fn from(e: rostercar_dag::DagError) -> Self {
        match e {
            rostercar_dag::DagError::EmptyInput => Self::EmptyInput,
            other => Self::Dag(other),
        }
    }
}

pub type SdkResult<T> = Result<T, SdkError>;
