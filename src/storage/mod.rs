//! Per-user JSON record storage
//!
//! Every completed dialogue flow leaves a record under
//! `data/user<telegram_id>/`: the organization profile in a fixed
//! `ngo_data.json` (overwritten on each profile run) and one timestamped
//! file per generation. Records are stamped with `timestamp` and
//! `user_id` next to the payload fields.

use anyhow::{Context, Result};
use chrono::Local;
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

use crate::types::{GenerationKind, NgoProfile};

/// Filename of the persisted organization profile
const PROFILE_FILE: &str = "ngo_data.json";

/// Record storage rooted at the data directory
#[derive(Debug, Clone)]
pub struct Storage {
    root: PathBuf,
}

impl Storage {
    /// Create storage rooted at `root`. The directory itself is created
    /// at startup; per-user subdirectories on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Ensure the root data directory exists
    pub fn ensure_root(&self) -> Result<()> {
        fs::create_dir_all(&self.root)
            .with_context(|| format!("failed to create data directory {}", self.root.display()))
    }

    /// Storage root
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Persist the organization profile for a user
    pub fn save_profile(&self, user_id: i64, profile: &NgoProfile) -> Result<PathBuf> {
        let dir = self.user_dir(user_id);
        fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create user directory {}", dir.display()))?;

        let path = dir.join(PROFILE_FILE);
        let value = Self::stamp(serde_json::to_value(profile)?, user_id, None);

        fs::write(&path, serde_json::to_string_pretty(&value)?)
            .with_context(|| format!("failed to write profile {}", path.display()))?;

        Ok(path)
    }

    /// Load the persisted profile, if any
    pub fn load_profile(&self, user_id: i64) -> Result<Option<NgoProfile>> {
        let path = self.user_dir(user_id).join(PROFILE_FILE);
        if !path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("failed to read profile {}", path.display()))?;
        let profile: NgoProfile = serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse profile {}", path.display()))?;

        Ok(Some(profile))
    }

    /// Persist a generation record; the filename carries the kind and a
    /// second-resolution timestamp.
    pub fn save_record<T: Serialize>(
        &self,
        user_id: i64,
        kind: GenerationKind,
        record: &T,
    ) -> Result<PathBuf> {
        let dir = self.user_dir(user_id);
        fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create user directory {}", dir.display()))?;

        let stamp = Local::now().format("%Y%m%d_%H%M%S");
        let path = dir.join(format!("{}_{}.json", kind.file_stem(), stamp));

        let value = Self::stamp(serde_json::to_value(record)?, user_id, Some(kind));

        fs::write(&path, serde_json::to_string_pretty(&value)?)
            .with_context(|| format!("failed to write record {}", path.display()))?;

        Ok(path)
    }

    fn user_dir(&self, user_id: i64) -> PathBuf {
        self.root.join(format!("user{}", user_id))
    }

    /// Add the bookkeeping fields next to the payload
    fn stamp(mut value: Value, user_id: i64, kind: Option<GenerationKind>) -> Value {
        if let Some(map) = value.as_object_mut() {
            if let Some(kind) = kind {
                let (field, tag) = kind.json_tag();
                map.insert(field.to_string(), Value::from(tag));
            }
            map.insert("timestamp".to_string(), Value::from(Local::now().to_rfc3339()));
            map.insert("user_id".to_string(), Value::from(user_id));
        }
        value
    }
}
