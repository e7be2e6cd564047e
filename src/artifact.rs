//! Persisted model artifacts.
//!
//! Each model is stored as a bincode-encoded [`ArtifactEnvelope`] that tags
//! the payload with its kind, a format version and a CRC32 checksum, so a
//! truncated file or a file dropped into the wrong slot is reported as an
//! error rather than decoded into garbage. Files are written to a temporary
//! sibling and renamed into place.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{FakeResumeError, Result};

/// Directory the scorers read from, relative to the caller's working directory.
pub const DEFAULT_SCORER_MODEL_DIR: &str = "python/models";
/// Directory the trainer writes to, relative to its working directory.
pub const DEFAULT_TRAINER_OUTPUT_DIR: &str = "models";

pub const VECTORIZER_FILE: &str = "vectorizer.bin";
pub const CLASSIFIER_FILE: &str = "lr_classifier.bin";
pub const ANOMALY_MODEL_FILE: &str = "isolation_forest.bin";
pub const METADATA_FILE: &str = "metadata.json";

const MAGIC: [u8; 4] = *b"FRDA";
const FORMAT_VERSION: u32 = 1;

/// File locations inside a model directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelPaths {
    dir: PathBuf,
}

impl ModelPaths {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn vectorizer(&self) -> PathBuf {
        self.dir.join(VECTORIZER_FILE)
    }

    pub fn classifier(&self) -> PathBuf {
        self.dir.join(CLASSIFIER_FILE)
    }

    pub fn anomaly_model(&self) -> PathBuf {
        self.dir.join(ANOMALY_MODEL_FILE)
    }

    pub fn metadata(&self) -> PathBuf {
        self.dir.join(METADATA_FILE)
    }
}

/// What an artifact file contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArtifactKind {
    Vectorizer,
    Classifier,
    AnomalyModel,
}

impl std::fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ArtifactKind::Vectorizer => "vectorizer",
            ArtifactKind::Classifier => "classifier",
            ArtifactKind::AnomalyModel => "anomaly model",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct ArtifactEnvelope {
    magic: [u8; 4],
    kind: ArtifactKind,
    format_version: u32,
    checksum: u32,
    payload: Vec<u8>,
}

/// Serialize `value` and write it to `path` as an artifact of `kind`.
pub fn save_artifact<T: Serialize>(path: &Path, kind: ArtifactKind, value: &T) -> Result<()> {
    let payload = bincode::serialize(value)?;
    let envelope = ArtifactEnvelope {
        magic: MAGIC,
        kind,
        format_version: FORMAT_VERSION,
        checksum: crc32fast::hash(&payload),
        payload,
    };
    let bytes = bincode::serialize(&envelope)?;
    write_atomically(path, &bytes)?;
    log::debug!("wrote {kind} artifact ({} bytes) to {}", bytes.len(), path.display());
    Ok(())
}

/// Read the artifact of `kind` stored at `path`.
pub fn load_artifact<T: DeserializeOwned>(path: &Path, kind: ArtifactKind) -> Result<T> {
    let bytes = fs::read(path)?;
    let envelope: ArtifactEnvelope = bincode::deserialize(&bytes)
        .map_err(|e| FakeResumeError::artifact(format!("{}: not an artifact: {e}", path.display())))?;

    if envelope.magic != MAGIC {
        return Err(FakeResumeError::artifact(format!(
            "{}: not an artifact (bad magic)",
            path.display()
        )));
    }
    if envelope.kind != kind {
        return Err(FakeResumeError::artifact(format!(
            "{}: expected {kind} artifact, found {}",
            path.display(),
            envelope.kind
        )));
    }
    if envelope.format_version != FORMAT_VERSION {
        return Err(FakeResumeError::artifact(format!(
            "{}: unsupported format version {}",
            path.display(),
            envelope.format_version
        )));
    }
    if crc32fast::hash(&envelope.payload) != envelope.checksum {
        return Err(FakeResumeError::artifact(format!(
            "{}: checksum mismatch",
            path.display()
        )));
    }

    Ok(bincode::deserialize(&envelope.payload)?)
}

fn write_atomically(path: &Path, bytes: &[u8]) -> Result<()> {
    let file_name = path
        .file_name()
        .ok_or_else(|| FakeResumeError::invalid_argument(format!("{} has no file name", path.display())))?;
    let mut tmp_name = file_name.to_os_string();
    tmp_name.push(".tmp");
    let tmp_path = path.with_file_name(tmp_name);

    fs::write(&tmp_path, bytes)?;
    fs::rename(&tmp_path, path)?;
    Ok(())
}

/// Summary written next to the artifacts after training.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingMetadata {
    /// Vocabulary size of the fitted vectorizer.
    pub vectorizer_features: usize,
    pub real_samples: usize,
    pub fake_samples: usize,
    pub lr_accuracy: f64,
    pub lr_precision: f64,
    pub lr_recall: f64,
    pub lr_f1: f64,
    pub iso_accuracy: f64,
    /// Isolation forest decision threshold.
    pub iso_offset: f64,
    /// Vocabulary cap used when fitting.
    pub max_features: Option<usize>,
    /// Calendar date of the run, `YYYY-MM-DD`.
    pub training_date: String,
    pub crate_version: String,
}

impl TrainingMetadata {
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        write_atomically(path, json.as_bytes())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}
