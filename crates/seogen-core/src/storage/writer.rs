//! Writes generated posts to the output directory.

use super::{temp_path, HEADER_MARKER};
use crate::slug::derive_filename;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// A post that was written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// Bare filename, as listed in the sitemap.
    pub filename: String,
    pub path: PathBuf,
}

#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("topic {topic:?} does not yield a filename")]
    NoFilename { topic: String },
    #[error("{op} {}: {source}", .path.display())]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

fn io_err<'a>(op: &'static str, path: &'a Path) -> impl FnOnce(io::Error) -> ArtifactError + 'a {
    move |source| ArtifactError::Io {
        op,
        path: path.to_path_buf(),
        source,
    }
}

/// Writes one file per topic under `dir`.
#[derive(Debug, Clone)]
pub struct ArtifactWriter {
    dir: PathBuf,
}

impl ArtifactWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Write `content` for `topic`, replacing any earlier file of the same name.
    /// The directory is created on demand.
    pub fn write(&self, topic: &str, content: &str) -> Result<Artifact, ArtifactError> {
        let filename = derive_filename(topic).ok_or_else(|| ArtifactError::NoFilename {
            topic: topic.to_string(),
        })?;
        fs::create_dir_all(&self.dir).map_err(io_err("create dir", &self.dir))?;

        let final_path = self.dir.join(&filename);
        let tmp = temp_path(&final_path);
        let result = write_file(&tmp, content).and_then(|()| {
            fs::rename(&tmp, &final_path).map_err(io_err("rename", &final_path))
        });
        if result.is_err() {
            let _ = fs::remove_file(&tmp);
        }
        result?;

        tracing::debug!(path = %final_path.display(), bytes = content.len(), "artifact written");
        Ok(Artifact {
            filename,
            path: final_path,
        })
    }
}

fn write_file(path: &Path, content: &str) -> Result<(), ArtifactError> {
    let mut f = File::create(path).map_err(io_err("create", path))?;
    f.write_all(HEADER_MARKER.as_bytes())
        .and_then(|()| f.write_all(b"\n"))
        .and_then(|()| f.write_all(content.as_bytes()))
        .and_then(|()| f.sync_all())
        .map_err(io_err("write", path))
}
