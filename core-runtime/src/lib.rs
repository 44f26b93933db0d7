//! # Core Runtime Module
//!
//! Provides foundational runtime infrastructure for the media library core:
//! - Logging and tracing infrastructure
//! - Configuration management
//! - Event bus system
//!
//! ## Overview
//!
//! This crate contains the runtime utilities the scan and list modules
//! depend on. It establishes the logging conventions, capability wiring,
//! and event broadcasting mechanisms used throughout the engine.

pub mod config;
pub mod error;
pub mod events;
pub mod logging;

pub use error::{Error, Result};
