//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the crate:
//! - Geometry value types shared by windows and monitors
//! - Logging utilities

pub mod geometry;
pub mod logging;
