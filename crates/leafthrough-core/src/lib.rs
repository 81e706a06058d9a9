pub mod article;
pub mod config;
pub mod error;
pub mod page;
pub mod storage;

pub use config::{AppConfig, Easing, ScrollConfig};
pub use error::{Error, Result};
