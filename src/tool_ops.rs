//! Invocation of the external media tools (ffmpeg, fpcalc) and the
//! capability traits that abstract them away from the hashing logic.
//!
//! Everything here is one-shot: spawn the tool, capture its output, reap it.
//! Per-call timeouts and concurrency limits are the caller's responsibility.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::definitions::HASH_SIZE;
use crate::fingerprinting::audio_signature::parse_chromaprint_output;

/// Various causes of failure when invoking an external media tool.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum ToolError {
    /// The command was not found. Make sure the tool is installed and visible
    /// on the command line.
    #[error("media tool not found. Make sure it is installed and visible on the command line")]
    ToolNotFound,

    /// Io error occurred while executing the command.
    #[error("tool IO error: {0}")]
    Io(String),

    /// The tool returned a nonzero exit code. Because ffmpeg sometimes prints
    /// long error strings to stderr, the resulting string contains only the
    /// first few hundred characters of the error message.
    #[error("tool failure: {0}")]
    NonZeroExit(String),
}

/// Captured output of a finished tool invocation.
#[derive(Debug, Clone)]
pub struct ToolOutput {
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl ToolOutput {
    /// Stdout and stderr as one opaque byte blob, for callers that hash the
    /// tool's output rather than parse it.
    #[must_use]
    pub fn combined(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(self.stdout.len() + self.stderr.len());
        buf.extend_from_slice(&self.stdout);
        buf.extend_from_slice(&self.stderr);
        buf
    }
}

/// Run a tool to completion, capturing stdout and stderr.
pub fn run_tool(program: &Path, args: &[&OsStr]) -> Result<ToolOutput, ToolError> {
    let output = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .map_err(|e| match e.kind() {
            //the shell failed to execute the command. Separate out NotFound
            //from all other errors as by far the most likely cause is the
            //tool is not installed.
            std::io::ErrorKind::NotFound => ToolError::ToolNotFound,
            kind => ToolError::Io(format!("{kind:?}")),
        })?;

    if output.status.success() {
        Ok(ToolOutput {
            stdout: output.stdout,
            stderr: output.stderr,
        })
    } else {
        Err(truncate_tool_err_msg(&output.stderr))
    }
}

fn truncate_tool_err_msg(stderr: &[u8]) -> ToolError {
    let error_text = String::from_utf8_lossy(stderr);
    ToolError::NonZeroExit(error_text.chars().take(500).collect())
}

/// Extracts single still frames from a video file.
///
/// The production implementation shells out to ffmpeg; tests substitute a
/// canned implementation so hashing can be exercised without real videos.
pub trait FrameExtractor {
    /// Extract one frame at `seek_secs` (whole seconds from the start of
    /// `src`), downscaled to the hash frame size, writing a still image to
    /// `dest`. A failed extraction leaves no usable file at `dest`.
    fn extract_frame(&self, src: &Path, seek_secs: u32, dest: &Path) -> Result<(), ToolError>;
}

/// Provides the two tiers of audio analysis used for audio signatures.
pub trait AudioAnalyzer {
    /// The raw acoustic fingerprint of `src`, if the fingerprint tool is
    /// available and produced one. `None` means the primary tool is absent or
    /// failed; the caller falls back to [`AudioAnalyzer::stats_output`].
    fn chromaprint(&self, src: &Path) -> Option<String>;

    /// Combined output bytes of a statistics pass over the first `secs`
    /// seconds of audio. The bytes are opaque; callers hash them, they never
    /// parse them.
    fn stats_output(&self, src: &Path, secs: u32) -> Result<Vec<u8>, ToolError>;
}

/// A [`FrameExtractor`] backed by the ffmpeg command line.
#[derive(Debug, Clone)]
pub struct FfmpegFrameExtractor {
    ffmpeg_path: PathBuf,
}

impl FfmpegFrameExtractor {
    pub fn new(ffmpeg_path: impl AsRef<Path>) -> Self {
        Self {
            ffmpeg_path: ffmpeg_path.as_ref().to_path_buf(),
        }
    }
}

impl Default for FfmpegFrameExtractor {
    fn default() -> Self {
        Self::new("ffmpeg")
    }
}

impl FrameExtractor for FfmpegFrameExtractor {
    fn extract_frame(&self, src: &Path, seek_secs: u32, dest: &Path) -> Result<(), ToolError> {
        let seek = seek_secs.to_string();
        let scale = format!("scale={HASH_SIZE}:{HASH_SIZE}");

        #[rustfmt::skip]
        let args = [
            OsStr::new("-ss"),      OsStr::new(&seek),
            OsStr::new("-i"),       src.as_os_str(),
            OsStr::new("-vframes"), OsStr::new("1"),
            OsStr::new("-vf"),      OsStr::new(&scale),
            OsStr::new("-y"),       dest.as_os_str(),
        ];

        run_tool(&self.ffmpeg_path, &args).map(|_output| ())
    }
}

/// An [`AudioAnalyzer`] backed by fpcalc (chromaprint) and ffmpeg.
///
/// `fpcalc` is located on PATH at construction time; when it cannot be found
/// only the statistics tier is available.
#[derive(Debug, Clone)]
pub struct FfmpegAudioAnalyzer {
    ffmpeg_path: PathBuf,
    fpcalc_path: Option<PathBuf>,
}

impl FfmpegAudioAnalyzer {
    pub fn new(ffmpeg_path: impl AsRef<Path>) -> Self {
        let fpcalc_path = which::which("fpcalc").ok();
        if fpcalc_path.is_none() {
            tracing::debug!("fpcalc not found on PATH, audio signatures will use the statistics fallback");
        }

        Self {
            ffmpeg_path: ffmpeg_path.as_ref().to_path_buf(),
            fpcalc_path,
        }
    }

    /// Use an explicit fpcalc binary instead of searching PATH.
    #[must_use]
    pub fn with_fpcalc_path(mut self, fpcalc_path: impl AsRef<Path>) -> Self {
        self.fpcalc_path = Some(fpcalc_path.as_ref().to_path_buf());
        self
    }
}

impl Default for FfmpegAudioAnalyzer {
    fn default() -> Self {
        Self::new("ffmpeg")
    }
}

impl AudioAnalyzer for FfmpegAudioAnalyzer {
    fn chromaprint(&self, src: &Path) -> Option<String> {
        let fpcalc_path = self.fpcalc_path.as_ref()?;

        let args = [OsStr::new("-raw"), src.as_os_str()];
        match run_tool(fpcalc_path, &args) {
            Ok(output) => parse_chromaprint_output(&String::from_utf8_lossy(&output.stdout)),
            Err(e) => {
                tracing::debug!(src = %src.display(), error = %e, "fpcalc failed");
                None
            }
        }
    }

    fn stats_output(&self, src: &Path, secs: u32) -> Result<Vec<u8>, ToolError> {
        let duration = secs.to_string();

        #[rustfmt::skip]
        let args = [
            OsStr::new("-i"),  src.as_os_str(),
            OsStr::new("-t"),  OsStr::new(&duration),
            OsStr::new("-af"), OsStr::new("astats=metadata=1:reset=1"),
            OsStr::new("-f"),  OsStr::new("null"),
            OsStr::new("-"),
        ];

        //the statistics land on stderr, the null muxer writes nothing of
        //interest to stdout. Both are hashed together.
        run_tool(&self.ffmpeg_path, &args).map(|output| output.combined())
    }
}
