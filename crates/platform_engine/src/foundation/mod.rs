//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the engine:
//! - Math types and operations
//! - Time management
//! - Logging utilities
//! - Slot map handles

pub mod collections;
pub mod logging;
pub mod math;
pub mod time;
