use thiserror::Error;

use crate::config::ConfigError;
use crate::fitter::FitError;
use crate::io::InputError;
use crate::sink::SinkError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Cannot read input: {0}")]
    Input(#[from] InputError),

    #[error("Cannot fit text: {0}")]
    Fit(#[from] FitError),

    #[error("Output error: {0}")]
    Sink(#[from] SinkError),
}

pub type AppResult<T> = Result<T, AppError>;
