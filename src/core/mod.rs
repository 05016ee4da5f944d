//! Core types shared by every relsite module.

pub mod config;
pub mod error;
pub mod templates;

pub use config::SiteConfig;
pub use error::{Error, Result};
