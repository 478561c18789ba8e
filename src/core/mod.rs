//! Core module - Shared data structures and utilities
//!
//! This module provides:
//! - Report model (Report, ReportSet)
//! - Rendering functions for different output formats
//! - Exercise configuration and error types
//! - The transcript line sink exercises write into
//! - Common text helpers

pub mod config;
pub mod error;
pub mod model;
pub mod render;
pub mod transcript;
pub mod util;
