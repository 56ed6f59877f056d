pub mod args;
pub mod backup;
pub mod commands;
mod config;
mod error;
pub mod metrics;
pub mod model;
pub mod render;
pub mod storage;
pub mod store;
mod utils;


pub use config::Config;
pub use error::Error;
pub use error::Result;
