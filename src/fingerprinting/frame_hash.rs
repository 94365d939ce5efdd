use std::path::Path;

use bitvec::prelude::*;
use image::DynamicImage;
use serde::{Deserialize, Serialize};

use crate::definitions::{BYTES_PER_FRAME, HASH_SIZE};

/// The 64-bit average hash of a single video frame.
///
/// Each bit covers one pixel of the 8x8 grayscale frame, row-major with the
/// first pixel in the most significant bit of the first byte. A bit is set
/// when its pixel is strictly brighter than the frame's mean brightness.
/// Ties map to 0, so a perfectly uniform frame hashes to all-zero bytes.
#[derive(
    Clone, Copy, Default, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Serialize, Deserialize,
)]
pub struct FrameHash([u8; BYTES_PER_FRAME]);

impl FrameHash {
    /// Hash the still image at `path`.
    ///
    /// # Errors
    /// Returns [`crate::Error::FrameDecode`] if the file cannot be read or
    /// decoded. There are no other failure modes.
    pub fn from_path(path: impl AsRef<Path>) -> crate::FingerprintResult<Self> {
        let img =
            image::open(path.as_ref()).map_err(|e| crate::Error::FrameDecode(e.to_string()))?;

        Ok(Self::from_image(&img))
    }

    /// Hash an already-decoded image.
    ///
    /// Only the top-left 8x8 pixels are read; the frame extractor already
    /// downscales frames to exactly that size. Pixels outside the image
    /// bounds count as black.
    #[must_use]
    pub fn from_image(img: &DynamicImage) -> Self {
        let gray = img.to_luma8();

        let mut luma = [0u8; (HASH_SIZE * HASH_SIZE) as usize];
        for y in 0..HASH_SIZE {
            for x in 0..HASH_SIZE {
                luma[(y * HASH_SIZE + x) as usize] =
                    gray.get_pixel_checked(x, y).map_or(0, |px| px.0[0]);
            }
        }

        let mean = luma.iter().map(|&v| f64::from(v)).sum::<f64>() / luma.len() as f64;

        // Pack the bits MSB-first, row-major. Strictly-greater keeps ties at
        // 0 so hashing is reproducible on flat frames.
        let mut bits: BitArray<[u8; BYTES_PER_FRAME], Msb0> = BitArray::ZERO;
        for (i, &v) in luma.iter().enumerate() {
            bits.set(i, f64::from(v) > mean);
        }

        Self(bits.into_inner())
    }

    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; BYTES_PER_FRAME] {
        &self.0
    }

    /// The hash as lowercase hex (16 characters).
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}
