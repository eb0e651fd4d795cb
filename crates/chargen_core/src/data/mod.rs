//! Data structures for ruleset catalogs.
//!
//! This module contains pure data structures that describe skills,
//! hindrances, edges, ancestries and global rules. All structs are
//! designed to be deserialized from RON files.
//!
//! **Note:** This module contains no IO - it only defines data types.
//! File loading is handled by `chargen_tools` or the host application.

mod ancestry_data;
mod catalog_data;
mod edge_data;
mod hindrance_data;
mod rules_data;
mod skill_data;

pub use ancestry_data::AncestryData;
pub use catalog_data::CatalogData;
pub use edge_data::EdgeData;
pub use hindrance_data::{HindranceData, Severity};
pub use rules_data::{DerivedRules, GameRules};
pub use skill_data::SkillData;
