//! Video file input via the ffmpeg command line tools.
//!
//! `ffprobe` supplies the stream geometry and frame rate, then `ffmpeg`
//! decodes the file to raw rgb24 on its stdout. Keeping the decoder out of
//! process sidesteps codec licensing and keeps this crate pure Rust.

use crate::{FrameSource, VideoError, VideoFrame};
use gloss_base::Tensor;
use log::debug;
use serde::Deserialize;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdout, Command, Stdio};

#[derive(Debug, Deserialize)]
struct ProbeOutput {
    #[serde(default)]
    streams: Vec<ProbeStream>,
}

#[derive(Debug, Deserialize)]
struct ProbeStream {
    #[serde(default)]
    width: usize,
    #[serde(default)]
    height: usize,
    #[serde(default)]
    avg_frame_rate: Option<String>,
}

/// Frame source that decodes a video file through an `ffmpeg` child
/// process.
#[derive(Debug)]
pub struct FfmpegSource {
    child: Child,
    stdout: ChildStdout,
    path: PathBuf,
    width: usize,
    height: usize,
    frame_rate: Option<f64>,
    finished: bool,
}

impl FfmpegSource {
    /// Probe `path` and start decoding it.
    ///
    /// # Errors
    ///
    /// Returns `VideoError::Open` if the file is missing or a tool cannot
    /// be started, and `VideoError::Probe` if the file has no usable video
    /// stream.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, VideoError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(VideoError::Open(format!(
                "no such file: {}",
                path.display()
            )));
        }

        let (width, height, frame_rate) = probe(path)?;

        let mut child = Command::new("ffmpeg")
            .args(["-v", "error", "-nostdin", "-i"])
            .arg(path)
            .args(["-f", "rawvideo", "-pix_fmt", "rgb24", "-"])
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| VideoError::Open(format!("failed to start ffmpeg: {e}")))?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| VideoError::Open("ffmpeg stdout was not captured".to_string()))?;

        debug!(
            "opened {} ({}x{}, avg rate {:?})",
            path.display(),
            width,
            height,
            frame_rate
        );

        Ok(FfmpegSource {
            child,
            stdout,
            path: path.to_path_buf(),
            width,
            height,
            frame_rate,
            finished: false,
        })
    }

    /// Stream geometry as (width, height).
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }
}

impl FrameSource for FfmpegSource {
    fn frame_rate(&self) -> Option<f64> {
        self.frame_rate
    }

    fn next_frame(&mut self) -> Result<Option<VideoFrame>, VideoError> {
        if self.finished {
            return Ok(None);
        }

        let mut buf = vec![0u8; self.width * self.height * 3];
        let got = read_full(&mut self.stdout, &mut buf)?;

        if got == buf.len() {
            let tensor = Tensor::new(vec![self.height, self.width, 3], buf)
                .map_err(|e| VideoError::Stream(e.to_string()))?;
            return Ok(Some(VideoFrame::Rgb(tensor)));
        }

        if got > 0 {
            debug!(
                "dropping truncated tail frame ({} of {} bytes) from {}",
                got,
                buf.len(),
                self.path.display()
            );
        }
        self.finished = true;
        Ok(None)
    }
}

impl Drop for FfmpegSource {
    fn drop(&mut self) {
        // Reap the child even when the consumer stops early
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

fn probe(path: &Path) -> Result<(usize, usize, Option<f64>), VideoError> {
    let output = Command::new("ffprobe")
        .args([
            "-v",
            "error",
            "-select_streams",
            "v:0",
            "-show_entries",
            "stream=width,height,avg_frame_rate",
            "-of",
            "json",
        ])
        .arg(path)
        .output()
        .map_err(|e| VideoError::Open(format!("failed to run ffprobe: {e}")))?;

    if !output.status.success() {
        return Err(VideoError::Probe(format!(
            "ffprobe failed for {}: {}",
            path.display(),
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }

    let parsed: ProbeOutput = serde_json::from_slice(&output.stdout)
        .map_err(|e| VideoError::Probe(format!("unparseable ffprobe output: {e}")))?;

    let stream = parsed.streams.into_iter().next().ok_or_else(|| {
        VideoError::Probe(format!("no video stream in {}", path.display()))
    })?;

    if stream.width == 0 || stream.height == 0 {
        return Err(VideoError::Probe(format!(
            "video stream in {} has no geometry",
            path.display()
        )));
    }

    let frame_rate = stream.avg_frame_rate.as_deref().and_then(parse_rate);
    Ok((stream.width, stream.height, frame_rate))
}

// ffprobe reports rates as fractions like "30000/1001"; "0/0" means unknown
fn parse_rate(s: &str) -> Option<f64> {
    let rate = if let Some((num, den)) = s.split_once('/') {
        let num: f64 = num.trim().parse().ok()?;
        let den: f64 = den.trim().parse().ok()?;
        if den == 0.0 {
            return None;
        }
        num / den
    } else {
        s.trim().parse().ok()?
    };

    (rate.is_finite() && rate > 0.0).then_some(rate)
}

fn read_full(reader: &mut impl Read, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut total = 0;
    while total < buf.len() {
        let n = reader.read(&mut buf[total..])?;
        if n == 0 {
            break;
        }
        total += n;
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rate_fractions() {
        assert_eq!(parse_rate("30/1"), Some(30.0));
        assert_eq!(parse_rate("25/1"), Some(25.0));

        let ntsc = parse_rate("30000/1001").unwrap();
        assert!((ntsc - 29.97).abs() < 0.01);
    }

    #[test]
    fn test_parse_rate_unknown() {
        assert_eq!(parse_rate("0/0"), None);
        assert_eq!(parse_rate("0/1"), None);
        assert_eq!(parse_rate(""), None);
        assert_eq!(parse_rate("garbage"), None);
        assert_eq!(parse_rate("-30/1"), None);
    }

    #[test]
    fn test_parse_rate_plain_number() {
        assert_eq!(parse_rate("24"), Some(24.0));
        assert_eq!(parse_rate("29.97"), Some(29.97));
    }
}
