//! Character export and import.
//!
//! A [`CharacterSnapshot`] wraps a [`CharacterState`] with a format
//! version. Two encodings are supported: pretty RON for files people
//! edit, and compact bincode for storage. Reading and writing files is
//! left to the caller.

use serde::{Deserialize, Serialize};

use crate::character::CharacterState;
use crate::error::{ChargenError, Result};

/// Current snapshot format version.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Versioned, serializable character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterSnapshot {
    /// Format version; must equal [`SNAPSHOT_VERSION`] to import.
    pub version: u32,
    /// The character.
    pub character: CharacterState,
}

impl CharacterSnapshot {
    /// Snapshot a character at the current format version.
    #[must_use]
    pub fn new(character: &CharacterState) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            character: character.clone(),
        }
    }

    /// Encode as pretty RON.
    ///
    /// # Errors
    ///
    /// Returns [`ChargenError::Snapshot`] if serialization fails.
    pub fn to_ron(&self) -> Result<String> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| ChargenError::Snapshot(format!("Failed to serialize snapshot: {e}")))
    }

    /// Decode from RON and check it.
    ///
    /// # Errors
    ///
    /// Returns [`ChargenError::Snapshot`] for malformed text or a corrupt
    /// character, and [`ChargenError::SnapshotVersion`] for another version.
    pub fn from_ron(text: &str) -> Result<Self> {
        let snapshot: Self = ron::from_str(text)
            .map_err(|e| ChargenError::Snapshot(format!("Failed to parse snapshot: {e}")))?;
        snapshot.checked()
    }

    /// Encode as bincode.
    ///
    /// # Errors
    ///
    /// Returns [`ChargenError::Snapshot`] if serialization fails.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        bincode::serialize(self)
            .map_err(|e| ChargenError::Snapshot(format!("Failed to serialize snapshot: {e}")))
    }

    /// Decode from bincode and check it.
    ///
    /// # Errors
    ///
    /// Same as [`CharacterSnapshot::from_ron`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let snapshot: Self = bincode::deserialize(bytes)
            .map_err(|e| ChargenError::Snapshot(format!("Failed to deserialize snapshot: {e}")))?;
        snapshot.checked()
    }

    /// Unwrap the character.
    #[must_use]
    pub fn into_character(self) -> CharacterState {
        self.character
    }

    fn checked(self) -> Result<Self> {
        if self.version != SNAPSHOT_VERSION {
            return Err(ChargenError::SnapshotVersion {
                expected: SNAPSHOT_VERSION,
                found: self.version,
            });
        }
        let problems = self.character.check_structure();
        if !problems.is_empty() {
            return Err(ChargenError::Snapshot(problems.join("; ")));
        }
        tracing::debug!(name = self.character.name(), "Snapshot loaded");
        Ok(self)
    }
}

/// Export a character as snapshot RON.
///
/// # Errors
///
/// See [`CharacterSnapshot::to_ron`].
pub fn export_ron(character: &CharacterState) -> Result<String> {
    CharacterSnapshot::new(character).to_ron()
}

/// Import a character from snapshot RON.
///
/// # Errors
///
/// See [`CharacterSnapshot::from_ron`].
pub fn import_ron(text: &str) -> Result<CharacterState> {
    CharacterSnapshot::from_ron(text).map(CharacterSnapshot::into_character)
}
