pub mod completion;
pub mod config;
pub mod detect;
pub mod error;
pub mod knowledge;
pub mod models;
pub mod pipeline;
pub mod prompt;
pub mod speech;
pub mod transport;

pub use crate::error::{AidMateError, Result};
pub use crate::pipeline::{AidMateService, Guidance};
