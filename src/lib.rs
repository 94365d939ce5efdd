#![allow(clippy::let_and_return)]
#![allow(clippy::len_without_is_empty)]
#![warn(clippy::cast_lossless)]
#![warn(clippy::print_stdout)]
#![warn(clippy::print_stderr)]
#![warn(clippy::todo)]
#![warn(clippy::dbg_macro)]
#![warn(clippy::unimplemented)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::panic)]
#![allow(clippy::doc_markdown)]

//! # Overview
//! `media_fingerprint_lib` computes compact perceptual fingerprints of media
//! files, and compares fingerprints pairwise to decide whether two files hold
//! the same content regardless of filename, container, or bitrate.
//!
//! Two kinds of fingerprint are produced:
//!
//! * A **video signature**: frames are sampled at seven fixed fractional
//!   offsets across the video's duration, each frame is reduced to a 64-bit
//!   average hash, and the per-frame hashes are assembled into one fixed-width
//!   composite (always 112 lowercase hex characters, even when some frames
//!   could not be extracted).
//! * An **audio signature**: the raw chromaprint of the file when `fpcalc` is
//!   available, otherwise an MD5 digest of an ffmpeg statistics pass over the
//!   first minute of audio.
//!
//! # High Level API
//! Build signatures with a [`SignatureBuilder`], then compare the encoded
//! signatures with the functions in this crate:
//!
//! ```rust,no_run
//! use media_fingerprint_lib::SignatureBuilder;
//!
//! # fn main() -> Result<(), media_fingerprint_lib::Error> {
//! let builder = SignatureBuilder::default();
//!
//! // Durations come from the caller (e.g. from a prior probe of the file).
//! let sig_a = builder.video_signature("vids/cat.1.mp4".as_ref(), 63)?;
//! let sig_b = builder.video_signature("vids/cat.1.mkv".as_ref(), 63)?;
//!
//! if media_fingerprint_lib::is_duplicate(&sig_a.encode(), &sig_b.encode(), 0.90) {
//!     println!("same content");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Comparison itself needs no external tools:
//!
//! ```rust
//! use media_fingerprint_lib::{hamming_distance, similarity};
//!
//! let h = "a5".repeat(56);
//! assert_eq!(hamming_distance(&h, &h), 0);
//! assert_eq!(similarity(&h, &h), 1.0);
//! ```
//!
//! # Prerequisites
//! Video signatures and the audio fallback call Ffmpeg from the command line,
//! so `ffmpeg` must be installed and visible on the command line, for example:
//!
//! * Debian-based systems: ```# apt-get install ffmpeg```
//! * Yum-based systems: ```# yum install ffmpeg```
//! * Windows: install from <https://ffmpeg.org/download.html> and add the
//!   install directory to the PATH environment variable
//!
//! The chromaprint tool `fpcalc` is optional. When it is absent, audio
//! signatures silently use the statistics fallback instead.
//!
//! # How it works
//! For each of seven sample points (5%, 15%, 30%, 50%, 70%, 85%, 95% of the
//! duration) one frame is extracted, downscaled to 8x8 grayscale, and hashed:
//! a bit is set for each pixel strictly brighter than the frame's mean
//! brightness (an [average hash](http://hackerfactor.com/blog/index.php%3F/archives/432-Looks-Like-It.html)).
//! The seven 8-byte hashes occupy fixed positions in a 56-byte buffer, so a
//! frame that cannot be extracted leaves its slot zero-filled rather than
//! shrinking the signature. Two signatures are compared by hamming distance
//! over their hex digits, normalized to a similarity score in `0.0..=1.0`.
//!
//! # Limitations
//! Sampling a handful of frames is deliberately cheap. It will not recognise
//! duplicates that have been rotated, flipped, cropped, or significantly
//! re-edited, and it performs no scene detection. When a file's duration is
//! unknown every sample point falls back to the one-second mark, which
//! degrades the signature to near-identical slots.

mod definitions;
mod fingerprinting;
pub mod tool_ops;

pub use fingerprinting::{
    audio_signature::AudioSignature,
    comparison::{hamming_distance, is_duplicate, similarity, MatchMode},
    frame_hash::FrameHash,
    signature_builder::{SignatureBuilder, SignatureOptions},
    video_signature::VideoSignature,
    Error,
};

pub use definitions::{
    DEFAULT_DUPLICATE_THRESHOLD, NUM_SAMPLE_POINTS, SIGNATURE_HEX_LEN, STRICT_DUPLICATE_THRESHOLD,
};

pub use tool_ops::{
    AudioAnalyzer, FfmpegAudioAnalyzer, FfmpegFrameExtractor, FrameExtractor, ToolError,
    ToolOutput,
};

type FingerprintResult<T> = Result<T, crate::Error>;
