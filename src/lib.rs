pub mod app;
pub mod config;
pub mod errors;
pub mod fitter;
pub mod io;
pub mod logging;
pub mod sink;

// Re-export commonly used types
pub use app::App;
pub use config::Config;
pub use errors::{AppError, AppResult};
pub use fitter::{Chunking, FitError, FitRequest, QuoteStyle, TextFitter};
