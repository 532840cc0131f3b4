//! Search artifacts: the boolean index and the vector records.
//!
//! Both files are plain JSON read by the search client:
//!
//! - `boolean_index.json`: `{"token": [chunk ids...], ...}`
//! - `vector_data.json`: `[{"info": {id, videoTitle, videoId, startTime, text}, "embedding": [...]}, ...]`
//!
//! The pair is written together or not at all.

mod verify;

pub use verify::VerifyReport;

use crate::chunking::Chunk;
use crate::error::{JamieError, Result};
use crate::index::BooleanIndex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

/// A chunk paired with its embedding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorRecord {
    pub info: Chunk,
    pub embedding: Vec<f32>,
}

/// Locations of the two artifact files.
#[derive(Debug, Clone)]
pub struct ArtifactPaths {
    pub boolean_index: PathBuf,
    pub vector_data: PathBuf,
}

impl ArtifactPaths {
    pub fn new(boolean_index: impl Into<PathBuf>, vector_data: impl Into<PathBuf>) -> Self {
        Self {
            boolean_index: boolean_index.into(),
            vector_data: vector_data.into(),
        }
    }

    /// Default file names inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join("boolean_index.json"), dir.join("vector_data.json"))
    }
}

/// The boolean index and vector records of one build.
#[derive(Debug, Clone)]
pub struct ArtifactSet {
    pub index: BooleanIndex,
    pub records: Vec<VectorRecord>,
}

impl ArtifactSet {
    /// Pair chunks with their embeddings.
    ///
    /// Fails unless there is exactly one embedding per chunk and every chunk
    /// id equals its position.
    pub fn new(index: BooleanIndex, chunks: Vec<Chunk>, embeddings: Vec<Vec<f32>>) -> Result<Self> {
        if chunks.len() != embeddings.len() {
            return Err(JamieError::Embedding(format!(
                "{} chunks but {} embeddings",
                chunks.len(),
                embeddings.len()
            )));
        }

        let records: Vec<VectorRecord> = chunks
            .into_iter()
            .zip(embeddings)
            .map(|(info, embedding)| VectorRecord { info, embedding })
            .collect();

        check_alignment(&records)?;

        Ok(Self { index, records })
    }

    /// Serialize both artifacts and move them into place together.
    ///
    /// Both files are first written next to their targets with a `.tmp`
    /// suffix. Existing targets are then moved to `.bak` siblings and only
    /// deleted once both new files are in place; any failure restores them.
    #[instrument(skip(self), fields(records = self.records.len(), tokens = self.index.len()))]
    pub fn write(&self, paths: &ArtifactPaths, pretty: bool) -> Result<()> {
        check_alignment(&self.records)?;

        let index_bytes = to_json(&self.index, pretty)?;
        let records_bytes = to_json(&self.records, pretty)?;

        for path in [&paths.boolean_index, &paths.vector_data] {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).map_err(|source| JamieError::WriteArtifact {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        let index_tmp = temp_path(&paths.boolean_index);
        let records_tmp = temp_path(&paths.vector_data);

        write_file(&index_tmp, &index_bytes)?;
        if let Err(e) = write_file(&records_tmp, &records_bytes) {
            discard(&index_tmp);
            return Err(e);
        }

        let moves = [
            (index_tmp.as_path(), paths.boolean_index.as_path()),
            (records_tmp.as_path(), paths.vector_data.as_path()),
        ];
        if let Err(e) = replace_all(&moves, rename) {
            for tmp in [&index_tmp, &records_tmp] {
                if tmp.exists() {
                    discard(tmp);
                }
            }
            return Err(e);
        }

        info!(
            "Wrote {} ({} bytes) and {} ({} bytes)",
            paths.boolean_index.display(),
            index_bytes.len(),
            paths.vector_data.display(),
            records_bytes.len()
        );
        Ok(())
    }

    /// Load a previously written artifact pair.
    pub fn load(paths: &ArtifactPaths) -> Result<Self> {
        let index: BooleanIndex = read_json(&paths.boolean_index)?;
        let records: Vec<VectorRecord> = read_json(&paths.vector_data)?;
        debug!("Loaded {} tokens and {} records", index.len(), records.len());
        Ok(Self { index, records })
    }

    /// Check the structural invariants of the pair.
    pub fn verify(&self) -> VerifyReport {
        VerifyReport::check(self)
    }
}

/// Fail on the first record whose id differs from its position.
pub fn check_alignment(records: &[VectorRecord]) -> Result<()> {
    for (position, record) in records.iter().enumerate() {
        if record.info.id as usize != position {
            return Err(JamieError::Alignment {
                position,
                id: record.info.id,
            });
        }
    }
    Ok(())
}

fn to_json<T: Serialize + ?Sized>(value: &T, pretty: bool) -> Result<Vec<u8>> {
    let bytes = if pretty {
        serde_json::to_vec_pretty(value)?
    } else {
        serde_json::to_vec(value)?
    };
    Ok(bytes)
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T> {
    let content = std::fs::read(path).map_err(|source| JamieError::ReadArtifact {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_slice(&content).map_err(|source| JamieError::ParseArtifact {
        path: path.to_path_buf(),
        source,
    })
}

/// Move every `(from, to)` pair into place, or leave every target as it was.
///
/// Existing targets are renamed to `.bak` siblings first. If any move fails,
/// targets already replaced are removed and the backups are moved back.
fn replace_all<F>(moves: &[(&Path, &Path)], mv: F) -> Result<()>
where
    F: Fn(&Path, &Path) -> Result<()>,
{
    let mut backups: Vec<(PathBuf, &Path)> = Vec::new();
    for &(_, target) in moves {
        if std::fs::symlink_metadata(target).is_err() {
            continue;
        }
        let backup = backup_path(target);
        if let Err(e) = mv(target, backup.as_path()) {
            rollback(&[], &backups, &mv);
            return Err(e);
        }
        backups.push((backup, target));
    }

    let mut placed: Vec<&Path> = Vec::new();
    for &(from, to) in moves {
        if let Err(e) = mv(from, to) {
            rollback(&placed, &backups, &mv);
            return Err(e);
        }
        placed.push(to);
    }

    for (backup, _) in &backups {
        discard(backup);
    }
    Ok(())
}

fn rollback<F>(placed: &[&Path], backups: &[(PathBuf, &Path)], mv: &F)
where
    F: Fn(&Path, &Path) -> Result<()>,
{
    for target in placed {
        discard(target);
    }
    for (backup, target) in backups.iter().rev() {
        if let Err(e) = mv(backup.as_path(), *target) {
            warn!("Failed to restore {}: {}", target.display(), e);
        }
    }
}

fn temp_path(path: &Path) -> PathBuf {
    with_suffix(path, ".tmp")
}

fn backup_path(path: &Path) -> PathBuf {
    with_suffix(path, ".bak")
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(suffix);
    path.with_file_name(name)
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    std::fs::write(path, bytes).map_err(|source| JamieError::WriteArtifact {
        path: path.to_path_buf(),
        source,
    })
}

fn rename(from: &Path, to: &Path) -> Result<()> {
    std::fs::rename(from, to).map_err(|source| JamieError::WriteArtifact {
        path: to.to_path_buf(),
        source,
    })
}

fn discard(path: &Path) {
    if let Err(e) = std::fs::remove_file(path) {
        warn!("Failed to remove {}: {}", path.display(), e);
    }
}
