pub mod audio_signature;
pub mod comparison;
pub mod frame_hash;
pub mod signature_builder;
pub mod video_signature;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An error that prevented a fingerprint from being created.
///
/// Failures local to one sample point or one audio tier are absorbed and
/// logged rather than surfaced; only whole-operation failures appear here.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum Error {
    /// A still frame could not be decoded into an image.
    #[error("could not decode frame image: {0}")]
    FrameDecode(String),

    /// Every sample point failed, so the file cannot be fingerprinted by
    /// this method.
    #[error("no frames could be extracted")]
    NoFramesExtracted,

    /// The scratch directory for intermediate frames could not be created.
    #[error("could not create scratch directory: {0}")]
    ScratchDir(String),

    /// The audio statistics fallback itself failed. The file cannot be
    /// audio-fingerprinted by either tier.
    #[error("audio analysis failed: {0}")]
    AudioAnalysis(String),
}
