//! Loading catalogs and characters from RON and bincode files.

use std::path::Path;

use chargen_core::catalog::Catalog;
use chargen_core::character::CharacterState;
use chargen_core::data::CatalogData;
use chargen_core::error::ChargenError;
use chargen_core::snapshot::CharacterSnapshot;
use thiserror::Error;

/// Errors that can occur when loading data files.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Failed to read or write a file.
    #[error("Failed to access file '{path}': {source}")]
    IoError {
        /// Path to the file.
        path: String,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse a RON file.
    #[error("Failed to parse RON file '{path}': {source}")]
    ParseError {
        /// Path to the file.
        path: String,
        /// Underlying parse error.
        #[source]
        source: ron::error::SpannedError,
    },

    /// Catalog data validation failed.
    #[error("Validation failed for catalog '{path}': {errors:?}")]
    ValidationError {
        /// Catalog file.
        path: String,
        /// List of validation errors.
        errors: Vec<String>,
    },

    /// The engine rejected the data.
    #[error("Failed to load '{path}': {source}")]
    EngineError {
        /// Offending file.
        path: String,
        /// Underlying engine error.
        #[source]
        source: ChargenError,
    },
}

/// Result type for loading operations.
pub type LoadResult<T> = Result<T, LoadError>;

fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path).map_err(|e| LoadError::IoError {
        path: path.display().to_string(),
        source: e,
    })
}

/// Load catalog data from a RON file without validating it.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_catalog_data(path: &Path) -> LoadResult<CatalogData> {
    let contents = read_file(path)?;
    ron::from_str(&contents).map_err(|e| LoadError::ParseError {
        path: path.display().to_string(),
        source: e,
    })
}

/// Load, validate and compile a catalog.
///
/// Any inconsistency reported by [`CatalogData::validate`] fails the load.
///
/// # Errors
///
/// Returns an error if the file cannot be read, parsed, validated or compiled.
pub fn load_catalog(path: &Path) -> LoadResult<Catalog> {
    let path_str = path.display().to_string();
    let data = load_catalog_data(path)?;

    let errors = data.validate();
    if !errors.is_empty() {
        return Err(LoadError::ValidationError {
            path: path_str,
            errors,
        });
    }

    let (skills, hindrances, edges, ancestries) = (
        data.skills.len(),
        data.hindrances.len(),
        data.edges.len(),
        data.ancestries.len(),
    );
    let catalog = Catalog::compile(data).map_err(|e| LoadError::EngineError {
        path: path_str,
        source: e,
    })?;

    tracing::info!(
        "Loaded catalog '{}' with {} skills, {} hindrances, {} edges, {} ancestries",
        path.display(),
        skills,
        hindrances,
        edges,
        ancestries
    );

    Ok(catalog)
}

/// Load a character from a snapshot file.
///
/// Files with a `.bin` extension are read as bincode, everything else as
/// RON.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a valid snapshot.
pub fn load_character(path: &Path) -> LoadResult<CharacterState> {
    let path_str = path.display().to_string();
    let snapshot = if is_binary(path) {
        let bytes = std::fs::read(path).map_err(|e| LoadError::IoError {
            path: path_str.clone(),
            source: e,
        })?;
        CharacterSnapshot::from_bytes(&bytes)
    } else {
        CharacterSnapshot::from_ron(&read_file(path)?)
    };
    let snapshot = snapshot.map_err(|e| LoadError::EngineError {
        path: path_str,
        source: e,
    })?;
    Ok(snapshot.into_character())
}

/// Write a character as a snapshot file, bincode for `.bin` and RON
/// otherwise.
///
/// # Errors
///
/// Returns an error if serialization or the write fails.
pub fn save_character(path: &Path, character: &CharacterState) -> LoadResult<()> {
    let path_str = path.display().to_string();
    let snapshot = CharacterSnapshot::new(character);
    let encoded = if is_binary(path) {
        snapshot.to_bytes()
    } else {
        snapshot.to_ron().map(String::into_bytes)
    };
    let bytes = encoded.map_err(|e| LoadError::EngineError {
        path: path_str.clone(),
        source: e,
    })?;
    std::fs::write(path, bytes).map_err(|e| LoadError::IoError {
        path: path_str,
        source: e,
    })
}

fn is_binary(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("bin"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_missing_file() {
        let result = load_catalog(Path::new("does/not/exist.ron"));
        assert!(matches!(result, Err(LoadError::IoError { .. })));
    }

    #[test]
    fn test_parse_error() {
        let file = write_temp("CatalogData(skills: [");
        assert!(matches!(
            load_catalog(file.path()),
            Err(LoadError::ParseError { .. })
        ));
    }

    #[test]
    fn test_minimal_catalog() {
        let file = write_temp("(skills: [(name: \"Fighting\", linked_attribute: Agility)])");
        let catalog = load_catalog(file.path()).unwrap();
        assert!(catalog.skill("Fighting").is_some());
        assert!(catalog.ancestry("Human").is_some());
    }

    #[test]
    fn test_validation_error() {
        let file = write_temp(
            "(edges: [(name: \"Luck\", category: \"Background\", requirements: \"Novice\", exclusive_with: [\"Nope\"])])",
        );
        match load_catalog(file.path()) {
            Err(LoadError::ValidationError { errors, .. }) => assert_eq!(errors.len(), 1),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_character_save_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hero.ron");
        let mut character = CharacterState::default();
        character.set_name("Hero");

        save_character(&path, &character).unwrap();
        assert_eq!(load_character(&path).unwrap(), character);
    }

    #[test]
    fn test_character_bincode_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hero.bin");
        let mut character = CharacterState::default();
        character.set_name("Hero");

        save_character(&path, &character).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert!(CharacterSnapshot::from_bytes(&bytes).is_ok());
        assert_eq!(load_character(&path).unwrap(), character);
    }

    #[test]
    fn test_character_bincode_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.bin");
        std::fs::write(&path, [0xFF, 0x00, 0x13]).unwrap();
        assert!(matches!(
            load_character(&path),
            Err(LoadError::EngineError { .. })
        ));
    }
}
