//! Shared library for `StudyFlow`
//! Contains the grade engine, record handling, and reporting used by the CLI

pub mod core;
pub mod logger;

pub use core::config;
pub use core::get_version;
