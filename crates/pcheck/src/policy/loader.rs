//! Preload of serialized policy records from a directory.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::PolicyStore;
use super::error::{PolicyError, PolicyResult};
use super::model::{Policy, PolicyRecord};
use super::store::{MemoryRepository, Repository};
use crate::constants::validate_embedding_dim;

/// Extension of preloadable policy files.
pub const POLICY_FILE_EXTENSION: &str = "json";

/// Reads every `*.json` file in `dir` as a [`PolicyRecord`] keyed by its file stem.
///
/// Any unreadable, unparsable or invalid file fails the whole load.
pub fn load_policy_dir(dir: &Path, embedding_dim: usize) -> PolicyResult<Vec<Policy>> {
    let mut paths = policy_files(dir)?;
    paths.sort();

    let mut policies = Vec::with_capacity(paths.len());
    for path in paths {
        policies.push(load_policy_file(&path, embedding_dim)?);
    }

    Ok(policies)
}

/// Reads a single policy file; the key is the file stem.
pub fn load_policy_file(path: &Path, embedding_dim: usize) -> PolicyResult<Policy> {
    let policy_id = path
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| PolicyError::DataIntegrity {
            path: path.to_path_buf(),
            reason: "file name is not a valid policy id".to_string(),
        })?
        .to_string();

    let raw = fs::read(path).map_err(|source| PolicyError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let record: PolicyRecord =
        serde_json::from_slice(&raw).map_err(|source| PolicyError::MalformedFile {
            path: path.to_path_buf(),
            source,
        })?;

    validate_embedding_dim(record.vector_content_to_look_for.len(), embedding_dim).map_err(
        |e| PolicyError::DataIntegrity {
            path: path.to_path_buf(),
            reason: e.to_string(),
        },
    )?;

    let policy = record
        .into_policy(&policy_id)
        .map_err(|e| PolicyError::DataIntegrity {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    debug!(policy_id = %policy_id, path = %path.display(), "Loaded policy file");
    Ok(policy)
}

/// Writes `policy` to `{dir}/{policy_id}.json` in the preload format.
#[cfg(any(test, feature = "mock"))]
pub fn write_policy_file(dir: &Path, policy: &Policy) -> PolicyResult<PathBuf> {
    let path = dir.join(format!("{}.{}", policy.policy_id(), POLICY_FILE_EXTENSION));
    let record = PolicyRecord::from(policy);

    let json = serde_json::to_vec_pretty(&record).map_err(|source| PolicyError::MalformedFile {
        path: path.clone(),
        source,
    })?;
    fs::write(&path, json).map_err(|source| PolicyError::Io {
        path: path.clone(),
        source,
    })?;

    Ok(path)
}

fn policy_files(dir: &Path) -> PolicyResult<Vec<PathBuf>> {
    let io_err = |source| PolicyError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        let is_policy_file = path.is_file()
            && path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case(POLICY_FILE_EXTENSION));
        if is_policy_file {
            paths.push(path);
        }
    }

    Ok(paths)
}

impl MemoryRepository<Policy> {
    /// Creates a store seeded from every policy file in `dir`.
    pub fn preload(dir: &Path, embedding_dim: usize) -> PolicyResult<PolicyStore> {
        let policies = load_policy_dir(dir, embedding_dim)?;
        let store = PolicyStore::with_records(policies);

        info!(
            dir = %dir.display(),
            count = store.len(),
            "Preloaded policies"
        );

        Ok(store)
    }
}
