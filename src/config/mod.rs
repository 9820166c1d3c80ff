//! Configuration module for money-tracker
//!
//! This module provides configuration management including:
//! - Platform path resolution (with an environment override)
//! - User settings persistence
//! - Deletion policy and backup retention preferences

pub mod paths;
pub mod settings;

pub use paths::TrackerPaths;
pub use settings::Settings;
