use {
    crate::{RecordError, WEBM_MIME},
    std::path::{Path, PathBuf},
};

pub const DOWNLOAD_FILENAME: &str = "surfing-analysis.webm";

/// The finished clip: every stored chunk, concatenated in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub struct Artifact {
    bytes: Vec<u8>,
    mime: &'static str,
}

impl Artifact {
    pub fn from_chunks(chunks: &[Vec<u8>]) -> Self {
        Self {
            bytes: chunks.concat(),
            mime: WEBM_MIME,
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn mime(&self) -> &'static str {
        self.mime
    }

    pub fn file_name(&self) -> &'static str {
        DOWNLOAD_FILENAME
    }

    /// Write the clip into `dir`, replacing an earlier download.
    pub fn save(&self, dir: impl AsRef<Path>) -> Result<PathBuf, RecordError> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;
        let path = dir.join(DOWNLOAD_FILENAME);
        std::fs::write(&path, &self.bytes)?;
        log::info!("saved {} bytes to {}", self.bytes.len(), path.display());
        Ok(path)
    }
}
