/// Width/height of the downscaled frame used for average hashing.
/// An 8x8 frame gives 64 bits per frame hash.
pub const HASH_SIZE: u32 = 8;

/// Number of bytes each frame hash occupies in the composite signature
/// (64 bits = 8 bytes).
pub const BYTES_PER_FRAME: usize = ((HASH_SIZE * HASH_SIZE) / 8) as usize;

/// Number of frames sampled per video.
pub const NUM_SAMPLE_POINTS: usize = 7;

/// Fractional offsets into the video's duration where frames are extracted.
/// The order is significant: sample point `i` owns byte range
/// `i * BYTES_PER_FRAME ..` of the composite buffer, so signatures stay
/// byte-for-byte comparable no matter which extractions succeed.
///
/// Sampling at several positions increases accuracy by comparing content
/// across the whole runtime rather than just the opening seconds.
pub const SAMPLE_POINTS: [f64; NUM_SAMPLE_POINTS] = [0.05, 0.15, 0.30, 0.50, 0.70, 0.85, 0.95];

/// The fixed size of the composite signature: 7 frames x 8 bytes = 56 bytes.
pub const TOTAL_SIGNATURE_BYTES: usize = NUM_SAMPLE_POINTS * BYTES_PER_FRAME;

/// Length of an encoded composite signature: 56 bytes = 112 hex characters.
/// Every successfully built signature has exactly this length.
pub const SIGNATURE_HEX_LEN: usize = TOTAL_SIGNATURE_BYTES * 2;

/// The default similarity threshold for duplicate detection. Two signatures
/// whose similarity meets or exceeds this value are considered the same
/// content. Substituted whenever a caller passes a non-positive threshold.
pub const DEFAULT_DUPLICATE_THRESHOLD: f64 = 0.90;

/// A stricter threshold for callers that prefer missed duplicates over
/// false positives.
pub const STRICT_DUPLICATE_THRESHOLD: f64 = 0.97;

/// How much audio (from the start of the file) the fallback fingerprint
/// analyses.
///
/// Unit: Seconds
pub const AUDIO_SAMPLE_SECS: u32 = 60;
