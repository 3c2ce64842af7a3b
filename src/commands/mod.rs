//! CLI command implementations for apimap operations.
//!
//! Available commands:
//! - **classify**: run the API surface classification over a class index
//! - **init**: initialize a new apimap configuration file

pub mod classify;
pub mod init;

pub use classify::{handle_classify, ClassifyConfig};
pub use init::init_config;
