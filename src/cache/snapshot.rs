// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! JSON snapshot of the metadata cache
//!
//! The file is a single object mapping key strings to `{ data, timestamp, ttl }`
//! (timestamps and TTLs in milliseconds). It is rewritten in full on every
//! mutation through a temp file and a rename, so readers never observe a
//! half-written snapshot.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::{CacheEntry, CacheKey};
use crate::errors::CacheError;

/// Reads a snapshot; a missing file is an empty cache
///
/// Entries under keys that do not parse are skipped. Stored TTLs are ignored;
/// every loaded entry gets the fixed cache TTL.
pub(crate) async fn load(path: &Path) -> Result<HashMap<CacheKey, CacheEntry>, CacheError> {
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "Snapshot file does not exist, using empty cache");
            return Ok(HashMap::new());
        }
        Err(e) => {
            return Err(CacheError::io(
                format!("failed to read snapshot '{}'", path.display()),
                e,
            ))
        }
    };

    let raw: HashMap<String, CacheEntry> =
        serde_json::from_slice(&bytes).map_err(CacheError::serialization)?;

    let mut entries = HashMap::with_capacity(raw.len());
    for (key, entry) in raw {
        match key.parse::<CacheKey>() {
            Ok(key) => {
                entries.insert(key, entry.with_fixed_ttl());
            }
            Err(e) => warn!(path = %path.display(), error = %e, "Skipping snapshot entry"),
        }
    }

    Ok(entries)
}

/// Atomically replaces the snapshot at `path` with `entries`
pub(crate) async fn write(
    path: &Path,
    entries: &HashMap<CacheKey, CacheEntry>,
) -> Result<(), CacheError> {
    let string_map: HashMap<String, &CacheEntry> =
        entries.iter().map(|(k, v)| (k.to_string(), v)).collect();
    let json = serde_json::to_vec_pretty(&string_map).map_err(CacheError::serialization)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.map_err(|e| {
            CacheError::io(
                format!("failed to create snapshot directory '{}'", parent.display()),
                e,
            )
        })?;
    }

    let temp_path = temp_path(path);
    tokio::fs::write(&temp_path, &json).await.map_err(|e| {
        CacheError::io(
            format!("failed to write snapshot to '{}'", temp_path.display()),
            e,
        )
    })?;

    tokio::fs::rename(&temp_path, path).await.map_err(|e| {
        CacheError::io(
            format!(
                "failed to rename snapshot from '{}' to '{}'",
                temp_path.display(),
                path.display()
            ),
            e,
        )
    })?;

    debug!(path = %path.display(), entries = entries.len(), "Wrote cache snapshot");
    Ok(())
}

/// Sibling of `path` with `.tmp` appended to the full file name
fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}
