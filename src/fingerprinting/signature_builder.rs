use std::path::{Path, PathBuf};

use md5::{Digest, Md5};
use tempfile::TempDir;

use crate::definitions::{AUDIO_SAMPLE_SECS, NUM_SAMPLE_POINTS, SAMPLE_POINTS};
use crate::fingerprinting::audio_signature::AudioSignature;
use crate::fingerprinting::frame_hash::FrameHash;
use crate::fingerprinting::video_signature::VideoSignature;
use crate::tool_ops::{AudioAnalyzer, FfmpegAudioAnalyzer, FfmpegFrameExtractor, FrameExtractor};
use crate::{Error, FingerprintResult};

/// Options for how media files are processed when building signatures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureOptions {
    /// The ffmpeg binary to invoke. Defaults to `ffmpeg`, resolved through
    /// PATH.
    pub ffmpeg_path: PathBuf,

    /// Where per-invocation scratch directories are created. `None` uses the
    /// system temp directory.
    pub temp_root: Option<PathBuf>,
}

impl Default for SignatureOptions {
    fn default() -> Self {
        Self {
            ffmpeg_path: PathBuf::from("ffmpeg"),
            temp_root: None,
        }
    }
}

/// A factory for media fingerprints.
///
/// One builder may be shared by concurrent fingerprint computations: each
/// [`video_signature`](Self::video_signature) call owns an isolated scratch
/// directory and there is no shared mutable state between calls. The builder
/// imposes no internal timeout; bounding runtime and concurrency (e.g. via a
/// worker pool) is the orchestrating caller's responsibility.
pub struct SignatureBuilder {
    extractor: Box<dyn FrameExtractor + Send + Sync>,
    analyzer: Box<dyn AudioAnalyzer + Send + Sync>,
    temp_root: Option<PathBuf>,
}

impl Default for SignatureBuilder {
    fn default() -> Self {
        Self::from_options(SignatureOptions::default())
    }
}

impl SignatureBuilder {
    /// Create a builder with the selected [`SignatureOptions`].
    #[must_use]
    pub fn from_options(options: SignatureOptions) -> Self {
        Self {
            extractor: Box::new(FfmpegFrameExtractor::new(&options.ffmpeg_path)),
            analyzer: Box::new(FfmpegAudioAnalyzer::new(&options.ffmpeg_path)),
            temp_root: options.temp_root,
        }
    }

    /// Substitute the frame extractor. Intended for exercising the hashing
    /// logic with canned frames instead of real ffmpeg invocations.
    #[must_use]
    pub fn with_extractor(mut self, extractor: impl FrameExtractor + Send + Sync + 'static) -> Self {
        self.extractor = Box::new(extractor);
        self
    }

    /// Substitute the audio analyzer.
    #[must_use]
    pub fn with_analyzer(mut self, analyzer: impl AudioAnalyzer + Send + Sync + 'static) -> Self {
        self.analyzer = Box::new(analyzer);
        self
    }

    /// Build the composite perceptual signature of the video at `src_path`.
    ///
    /// `duration_secs` is the video's duration in whole seconds, or 0 when
    /// unknown. With an unknown duration every sample point degrades to the
    /// one-second mark.
    ///
    /// Sample points are processed one at a time; a failed extraction or
    /// decode is logged and leaves that slot absent (zero-filled on encode)
    /// without aborting the rest.
    ///
    /// # Errors
    /// * [`Error::ScratchDir`] if the scratch directory cannot be created.
    /// * [`Error::NoFramesExtracted`] if every sample point failed.
    pub fn video_signature(
        &self,
        src_path: &Path,
        duration_secs: u32,
    ) -> FingerprintResult<VideoSignature> {
        // The scratch dir is removed when this binding drops, on every exit
        // path.
        let scratch = match &self.temp_root {
            Some(root) => TempDir::with_prefix_in("phash-", root),
            None => TempDir::with_prefix("phash-"),
        }
        .map_err(|e| Error::ScratchDir(e.to_string()))?;

        let mut slots: [Option<FrameHash>; NUM_SAMPLE_POINTS] = [None; NUM_SAMPLE_POINTS];

        for (i, &fraction) in SAMPLE_POINTS.iter().enumerate() {
            let seek_secs = seek_offset(duration_secs, fraction);
            let frame_path = scratch.path().join(format!("frame_{i}.jpg"));

            if let Err(e) = self
                .extractor
                .extract_frame(src_path, seek_secs, &frame_path)
            {
                tracing::warn!(
                    src = %src_path.display(),
                    sample = i,
                    seek_secs,
                    error = %e,
                    "frame extraction failed, slot left empty"
                );
                continue;
            }

            match FrameHash::from_path(&frame_path) {
                Ok(hash) => slots[i] = Some(hash),
                Err(e) => tracing::warn!(
                    src = %src_path.display(),
                    sample = i,
                    error = %e,
                    "frame hashing failed, slot left empty"
                ),
            }
        }

        if slots.iter().all(Option::is_none) {
            return Err(Error::NoFramesExtracted);
        }

        Ok(VideoSignature::from_slots(slots))
    }

    /// Build the audio signature of the file at `src_path`.
    ///
    /// The chromaprint tier is tried first; its absence or failure is
    /// absorbed and the statistics fallback is used instead.
    ///
    /// # Errors
    /// [`Error::AudioAnalysis`] if the fallback invocation itself fails.
    pub fn audio_signature(&self, src_path: &Path) -> FingerprintResult<AudioSignature> {
        if let Some(fingerprint) = self.analyzer.chromaprint(src_path) {
            return Ok(AudioSignature::Chromaprint(fingerprint));
        }

        tracing::debug!(
            src = %src_path.display(),
            "chromaprint unavailable, falling back to audio statistics"
        );

        let output = self
            .analyzer
            .stats_output(src_path, AUDIO_SAMPLE_SECS)
            .map_err(|e| Error::AudioAnalysis(e.to_string()))?;

        Ok(AudioSignature::Spectral(hex::encode(Md5::digest(&output))))
    }
}

/// The whole-second seek offset for one sample point.
///
/// A known duration maps `fraction` into `[1, duration - 1]`: never seek to
/// 0 (container start artifacts) and never to or past the end. An unknown
/// duration (0) collapses every sample point to the one-second mark.
fn seek_offset(duration_secs: u32, fraction: f64) -> u32 {
    if duration_secs == 0 {
        return 1;
    }

    let seek = (f64::from(duration_secs) * fraction).round() as u32;
    seek.clamp(1, duration_secs.saturating_sub(1).max(1))
}

#[cfg(test)]
mod test {
    use itertools::Itertools;

    use super::seek_offset;
    use crate::definitions::SAMPLE_POINTS;

    #[test]
    fn seek_offsets_for_known_duration() {
        let offsets = SAMPLE_POINTS
            .iter()
            .map(|&f| seek_offset(100, f))
            .collect::<Vec<_>>();
        assert_eq!(offsets, vec![5, 15, 30, 50, 70, 85, 95]);
    }

    #[test]
    fn seek_never_reaches_the_ends() {
        for duration in [1u32, 2, 3, 10, 59, 3600] {
            for &fraction in &SAMPLE_POINTS {
                let seek = seek_offset(duration, fraction);
                assert!(seek >= 1, "duration {duration} fraction {fraction}");
                assert!(
                    seek <= duration.saturating_sub(1).max(1),
                    "duration {duration} fraction {fraction} seeked to {seek}"
                );
            }
        }
    }

    #[test]
    fn seek_offsets_are_monotonic() {
        for duration in [10u32, 100, 7200] {
            let monotonic = SAMPLE_POINTS
                .iter()
                .map(|&f| seek_offset(duration, f))
                .tuple_windows()
                .all(|(a, b)| a <= b);
            assert!(monotonic, "duration {duration}");
        }
    }

    #[test]
    fn unknown_duration_collapses_to_one_second() {
        for &fraction in &SAMPLE_POINTS {
            assert_eq!(seek_offset(0, fraction), 1);
        }
    }

    #[test]
    fn rounding_is_clamped_inside_short_videos() {
        // round(10 * 0.95) = 10 would seek past the end; it clamps to 9.
        assert_eq!(seek_offset(10, 0.95), 9);
        // round(2 * 0.05) = 0 would seek to the start; it clamps to 1.
        assert_eq!(seek_offset(2, 0.05), 1);
        // A one-second video has no interior, so everything pins to 1.
        assert_eq!(seek_offset(1, 0.50), 1);
    }
}
