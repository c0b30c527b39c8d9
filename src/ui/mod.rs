//! ui
//!
//! User interaction utilities.
//!
//! # Modules
//!
//! - [`prompts`] - Masked password input
//! - [`output`] - Output formatting and display
//!
//! All terminal output of the CLI goes through this module so the quiet
//! flag is honored in one place.

pub mod output;
pub mod prompts;
