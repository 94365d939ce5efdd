use serde::{Deserialize, Serialize};

/// The audio fingerprint of one media file.
///
/// The two variants come from different tools and are **not** mutually
/// comparable; the encoded form tags the fallback variant with an `audio:`
/// prefix so stored signatures of different kinds can never collide.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
pub enum AudioSignature {
    /// The raw acoustic fingerprint text produced by fpcalc, verbatim.
    Chromaprint(String),

    /// Lowercase hex MD5 of an ffmpeg statistics pass over the start of the
    /// audio track, used when fpcalc is unavailable.
    Spectral(String),
}

impl AudioSignature {
    /// The stable wire form of the signature: the raw chromaprint text, or
    /// `audio:<32 hex chars>` for the fallback.
    #[must_use]
    pub fn encode(&self) -> String {
        match self {
            Self::Chromaprint(raw) => raw.clone(),
            Self::Spectral(digest) => format!("audio:{digest}"),
        }
    }
}

impl std::fmt::Display for AudioSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Chromaprint(raw) => f.write_str(raw),
            Self::Spectral(digest) => write!(f, "audio:{digest}"),
        }
    }
}

/// Pull the fingerprint value out of fpcalc's stdout.
///
/// fpcalc prints `KEY=value` lines; the one that matters here is
/// `FINGERPRINT=<value>`. Returns `None` when no such line exists.
pub(crate) fn parse_chromaprint_output(stdout: &str) -> Option<String> {
    stdout
        .lines()
        .find_map(|line| line.strip_prefix("FINGERPRINT="))
        .map(|value| value.trim().to_string())
}

#[cfg(test)]
mod test {
    use super::{parse_chromaprint_output, AudioSignature};

    #[test]
    fn fingerprint_line_is_extracted_verbatim() {
        let stdout = "DURATION=63\nFINGERPRINT=1092derp,-372,555\n";
        assert_eq!(
            parse_chromaprint_output(stdout).as_deref(),
            Some("1092derp,-372,555")
        );
    }

    #[test]
    fn missing_fingerprint_line_is_none() {
        assert_eq!(parse_chromaprint_output("DURATION=63\n"), None);
        assert_eq!(parse_chromaprint_output(""), None);
    }

    #[test]
    fn prefix_must_start_the_line() {
        assert_eq!(parse_chromaprint_output("XFINGERPRINT=123\n"), None);
    }

    #[test]
    fn encoded_forms_are_tagged_by_kind() {
        let chroma = AudioSignature::Chromaprint("123,456".to_string());
        let spectral = AudioSignature::Spectral("d41d8cd98f00b204e9800998ecf8427e".to_string());

        assert_eq!(chroma.encode(), "123,456");
        assert_eq!(
            spectral.encode(),
            "audio:d41d8cd98f00b204e9800998ecf8427e"
        );
        assert_eq!(spectral.to_string(), spectral.encode());
    }
}
