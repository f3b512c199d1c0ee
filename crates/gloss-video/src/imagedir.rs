use crate::{FrameSource, VideoError, VideoFrame};
use std::fs;
use std::path::{Path, PathBuf};

/// Frame source backed by a directory of numbered image files.
///
/// Files are ordered by name, so zero-padded frame numbers
/// (`frame_0001.png`, `frame_0002.png`, ...) play back in sequence.
/// Directories carry no frame rate; use [`with_frame_rate`] when the
/// capture rate is known from dataset convention.
///
/// [`with_frame_rate`]: ImageDirSource::with_frame_rate
#[derive(Debug)]
pub struct ImageDirSource {
    files: Vec<PathBuf>,
    cursor: usize,
    frame_rate: Option<f64>,
}

impl ImageDirSource {
    /// Scan `dir` for PNG/JPEG files.
    ///
    /// # Errors
    ///
    /// Returns `VideoError::Open` if the directory cannot be read or holds
    /// no image files.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, VideoError> {
        let dir = dir.as_ref();
        let entries = fs::read_dir(dir)
            .map_err(|e| VideoError::Open(format!("cannot read {}: {e}", dir.display())))?;

        let mut files = Vec::new();
        for entry in entries {
            let path = entry
                .map_err(|e| VideoError::Open(format!("cannot read {}: {e}", dir.display())))?
                .path();
            if is_image_file(&path) {
                files.push(path);
            }
        }
        files.sort();

        if files.is_empty() {
            return Err(VideoError::Open(format!(
                "no image files in {}",
                dir.display()
            )));
        }

        Ok(ImageDirSource {
            files,
            cursor: 0,
            frame_rate: None,
        })
    }

    /// Declare the rate the frames were captured at.
    pub fn with_frame_rate(mut self, fps: f64) -> Self {
        self.frame_rate = Some(fps);
        self
    }

    /// Number of image files found.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl FrameSource for ImageDirSource {
    fn frame_rate(&self) -> Option<f64> {
        self.frame_rate
    }

    fn next_frame(&mut self) -> Result<Option<VideoFrame>, VideoError> {
        let Some(path) = self.files.get(self.cursor) else {
            return Ok(None);
        };
        self.cursor += 1;

        let data = fs::read(path)?;
        Ok(Some(VideoFrame::Encoded(data)))
    }
}

fn is_image_file(path: &Path) -> bool {
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return false;
    };
    matches!(
        ext.to_ascii_lowercase().as_str(),
        "png" | "jpg" | "jpeg"
    )
}
