//! # Chargen Development Tools
//!
//! Command-line tools for catalog authors and players:
//! - Catalog validation
//! - Fresh character files
//! - Character sheet summaries (text or JSON)

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod loader;
pub mod summary;
