use thiserror::Error;

use crate::{application::job::JobError, config::LoadError, infra::error::InfraError};

/// Top-level failure of the `latex-snippet` binary.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Infra(#[from] InfraError),
    #[error("failed to load configuration: {0}")]
    Config(#[from] LoadError),
    #[error(transparent)]
    Job(#[from] JobError),
}
