use super::types::{Field, Profile};
use atomic_write_file::AtomicWriteFile;
use serde_json::{Map, Value};
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use thiserror::Error;

/// Failure modes of the profile store, each reported distinctly so the
/// caller can show a specific message and leave its own state untouched.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("profile file '{}' not found", path.display())]
    NotFound { path: PathBuf },

    #[error("'{}' is corrupted or not in JSON format: {source}", path.display())]
    InvalidJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("profile '{}' is missing required fields: {}", path.display(), missing.join(", "))]
    Incomplete {
        path: PathBuf,
        missing: Vec<&'static str>,
    },

    #[error("cannot access '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Resolve a user-supplied profile name to its file path, appending the
/// `.json` suffix when absent so "foo" and "foo.json" hit the same file.
pub fn resolve_path(name: &str) -> PathBuf {
    if name.ends_with(".json") {
        PathBuf::from(name)
    } else {
        PathBuf::from(format!("{name}.json"))
    }
}

/// Save a profile as a UTF-8 JSON object, fully replacing any existing file
/// under the same name.
///
/// The write goes through `atomic-write-file`, so a failure mid-write never
/// leaves a truncated file behind. Returns the resolved path on success.
pub fn save_profile(profile: &Profile, name: &str) -> Result<PathBuf, StoreError> {
    let path = resolve_path(name);

    let mut file = AtomicWriteFile::open(&path).map_err(|source| StoreError::Io {
        path: path.clone(),
        source,
    })?;

    serde_json::to_writer_pretty(&mut file, profile).map_err(|source| StoreError::InvalidJson {
        path: path.clone(),
        source,
    })?;

    file.commit().map_err(|source| StoreError::Io {
        path: path.clone(),
        source,
    })?;

    Ok(path)
}

/// Load a profile back from its JSON file.
///
/// On any failure nothing is returned, so the caller's in-memory record is
/// never partially overwritten. A syntactically valid JSON object missing
/// one of the twelve measurement keys is reported as `Incomplete` rather
/// than surfacing as a lookup fault later.
pub fn load_profile(name: &str) -> Result<Profile, StoreError> {
    let path = resolve_path(name);

    let raw = match fs::read_to_string(&path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == ErrorKind::NotFound => return Err(StoreError::NotFound { path }),
        Err(source) => return Err(StoreError::Io { path, source }),
    };

    // Parse to a plain map first: a non-object or unparsable file fails
    // here, while a well-formed object can still be checked for the
    // required keys before the typed deserialization.
    let map: Map<String, Value> =
        serde_json::from_str(&raw).map_err(|source| StoreError::InvalidJson {
            path: path.clone(),
            source,
        })?;

    let missing: Vec<&'static str> = Field::ALL
        .iter()
        .map(|field| field.key())
        .filter(|key| !map.contains_key(*key))
        .collect();
    if !missing.is_empty() {
        return Err(StoreError::Incomplete { path, missing });
    }

    serde_json::from_value(Value::Object(map)).map_err(|source| StoreError::InvalidJson {
        path: path.clone(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    fn sample_profile() -> Profile {
        Profile {
            mec: 0.5,
            tser: 50.0,
            tsir: 50.0,
            cmj: 30.0,
            mrsi_p: 1.0,
            mrsi_d: 1.0,
            gh_n: 100.0,
            gh_rfd: 200.0,
            h_n: 150.0,
            h_rfd: 250.0,
            mtp: 40.0,
            age: 25,
            extra: Map::new(),
        }
    }

    fn temp_name(stem: &str) -> String {
        env::temp_dir()
            .join(format!("mgrade_test_{stem}"))
            .to_string_lossy()
            .into_owned()
    }

    #[test]
    fn test_resolve_path_appends_json() {
        assert_eq!(resolve_path("foo"), PathBuf::from("foo.json"));
        assert_eq!(resolve_path("foo.json"), PathBuf::from("foo.json"));
        assert_eq!(resolve_path("dir/foo"), PathBuf::from("dir/foo.json"));
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let name = temp_name("roundtrip");
        let _ = fs::remove_file(resolve_path(&name));

        let profile = sample_profile();
        save_profile(&profile, &name).unwrap();
        let loaded = load_profile(&name).unwrap();
        assert_eq!(loaded, profile);

        let _ = fs::remove_file(resolve_path(&name));
    }

    #[test]
    fn test_suffix_and_bare_name_hit_same_file() {
        let name = temp_name("suffix");
        let _ = fs::remove_file(resolve_path(&name));

        save_profile(&sample_profile(), &name).unwrap();
        let loaded = load_profile(&format!("{name}.json")).unwrap();
        assert_eq!(loaded, sample_profile());

        let _ = fs::remove_file(resolve_path(&name));
    }

    #[test]
    fn test_load_missing_file_is_not_found() {
        let name = temp_name("missing");
        let _ = fs::remove_file(resolve_path(&name));

        match load_profile(&name) {
            Err(StoreError::NotFound { .. }) => {}
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_load_malformed_json_is_invalid() {
        let name = temp_name("malformed");
        let path = resolve_path(&name);
        fs::write(&path, "not json at all {").unwrap();

        match load_profile(&name) {
            Err(StoreError::InvalidJson { .. }) => {}
            other => panic!("expected InvalidJson, got {other:?}"),
        }

        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_load_non_object_is_invalid() {
        let name = temp_name("non_object");
        let path = resolve_path(&name);
        fs::write(&path, "[1, 2, 3]").unwrap();

        match load_profile(&name) {
            Err(StoreError::InvalidJson { .. }) => {}
            other => panic!("expected InvalidJson, got {other:?}"),
        }

        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_load_incomplete_profile_names_missing_keys() {
        let name = temp_name("incomplete");
        let path = resolve_path(&name);
        fs::write(&path, r#"{"MEC": 0.5, "Age": 25}"#).unwrap();

        match load_profile(&name) {
            Err(StoreError::Incomplete { missing, .. }) => {
                assert!(missing.contains(&"TSER"));
                assert!(missing.contains(&"hRFD"));
                assert!(!missing.contains(&"MEC"));
                assert!(!missing.contains(&"Age"));
                assert_eq!(missing.len(), 10);
            }
            other => panic!("expected Incomplete, got {other:?}"),
        }

        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_save_over_save_fully_replaces() {
        let name = temp_name("overwrite");
        let path = resolve_path(&name);
        let _ = fs::remove_file(&path);

        let mut first = sample_profile();
        first
            .extra
            .insert("Coach".to_string(), Value::String("Riley".to_string()));
        save_profile(&first, &name).unwrap();

        let mut second = sample_profile();
        second.cmj = 45.0;
        save_profile(&second, &name).unwrap();

        let loaded = load_profile(&name).unwrap();
        assert_eq!(loaded, second);
        assert!(loaded.extra.is_empty(), "old keys must not be merged in");

        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_extra_keys_survive_roundtrip() {
        let name = temp_name("extra");
        let _ = fs::remove_file(resolve_path(&name));

        let mut profile = sample_profile();
        profile
            .extra
            .insert("Season".to_string(), Value::String("2026".to_string()));
        save_profile(&profile, &name).unwrap();
        assert_eq!(load_profile(&name).unwrap(), profile);

        let _ = fs::remove_file(resolve_path(&name));
    }
}
