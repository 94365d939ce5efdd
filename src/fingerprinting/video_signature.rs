use serde::{Deserialize, Serialize};

use crate::definitions::{BYTES_PER_FRAME, NUM_SAMPLE_POINTS, TOTAL_SIGNATURE_BYTES};
use crate::fingerprinting::frame_hash::FrameHash;

/// The composite perceptual signature of one video file.
///
/// Internally each sample point is an explicit present/absent slot, so "this
/// frame could not be extracted" is distinguishable from "this frame hashed
/// to all-zero bits". The distinction is flattened away at the serialization
/// boundary: [`VideoSignature::encode`] zero-fills absent slots, keeping the
/// wire format fixed-length and byte-for-byte comparable.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
pub struct VideoSignature {
    slots: [Option<FrameHash>; NUM_SAMPLE_POINTS],
}

impl VideoSignature {
    pub(crate) fn from_slots(slots: [Option<FrameHash>; NUM_SAMPLE_POINTS]) -> Self {
        Self { slots }
    }

    /// The number of sample points whose frame was successfully extracted
    /// and hashed.
    #[must_use]
    pub fn sampled_slots(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// The frame hash at sample point `index`, if that frame was extracted.
    #[must_use]
    pub fn slot(&self, index: usize) -> Option<&FrameHash> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    /// Encode the signature as exactly
    /// [`SIGNATURE_HEX_LEN`](crate::SIGNATURE_HEX_LEN) lowercase hex
    /// characters. Absent slots appear as zero bytes at their fixed offsets,
    /// never omitted.
    #[must_use]
    pub fn encode(&self) -> String {
        let mut buf = [0u8; TOTAL_SIGNATURE_BYTES];
        for (i, slot) in self.slots.iter().enumerate() {
            if let Some(hash) = slot {
                buf[i * BYTES_PER_FRAME..(i + 1) * BYTES_PER_FRAME]
                    .copy_from_slice(hash.as_bytes());
            }
        }

        hex::encode(buf)
    }
}

impl std::fmt::Display for VideoSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.encode())
    }
}
