pub mod config;
pub mod emitter;
pub mod error;
pub mod indicator;
pub mod model;
pub mod pattern;
pub mod pipeline;
pub mod predictor;
pub mod session;
pub mod swing;
pub mod trend;
pub mod window;

pub use config::AnalysisConfig;
pub use error::AnalysisError;
pub use pipeline::{AnalysisPipeline, AnalysisReport};
