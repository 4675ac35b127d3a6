//! Utility functions and helpers.
//!
//! This module contains utility functions used throughout the application,
//! such as byte-size formatting and directory measurement.

pub mod size;

pub use size::{calculate_dir_size, format_with_commas, readable_file_size};
