pub mod config;
pub mod error;
pub mod logging;
pub mod sentinel;

pub use config::Config;
pub use error::*;
pub use sentinel::Sentinel;
