use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::errors::{StitchError, StitchResult};

/// Number of leading bytes sampled when sniffing a file for binary content.
pub const BINARY_SAMPLE_LEN: usize = 2048;

/// Parses a human-readable size string into a byte count.
///
/// Accepts a bare integer byte count (`"4096"`) or a number immediately
/// followed by one case-insensitive `k`/`m`/`g` suffix using binary
/// multiples (`"500k"`, `"1.5m"`, `"2G"`). Empty or whitespace-only input
/// returns `default`. Anything else fails with
/// [`StitchError::InvalidSize`] naming the offending string.
pub fn parse_size(s: &str, default: u64) -> StitchResult<u64> {
    let s = s.trim().to_ascii_lowercase();
    if s.is_empty() {
        return Ok(default);
    }
    let factor = match s.as_bytes()[s.len() - 1] {
        b'k' => Some(1024u64),
        b'm' => Some(1024 * 1024),
        b'g' => Some(1024 * 1024 * 1024),
        _ => None,
    };
    match factor {
        Some(factor) => {
            let value: f64 = s[..s.len() - 1]
                .parse()
                .map_err(|_| StitchError::InvalidSize(s.clone()))?;
            if !value.is_finite() || value < 0.0 {
                return Err(StitchError::InvalidSize(s));
            }
            Ok((value * factor as f64) as u64)
        }
        None => s.parse().map_err(|_| StitchError::InvalidSize(s.clone())),
    }
}

/// Classifies a file as probably-binary by sampling its leading bytes.
///
/// Binary when a NUL byte appears in the sample, or when more than 30% of
/// the sampled bytes fall outside a conservative text set (printable
/// range plus common control codes). Files that cannot be opened or read
/// are classified as binary so their bytes never reach the document.
pub fn is_probably_binary(path: &Path, sample_len: usize) -> bool {
    let mut sample = Vec::with_capacity(sample_len);
    match File::open(path) {
        Ok(file) => {
            if file
                .take(sample_len as u64)
                .read_to_end(&mut sample)
                .is_err()
            {
                return true;
            }
        }
        Err(_) => return true,
    }
    if sample.is_empty() {
        return false;
    }
    if sample.contains(&0) {
        return true;
    }
    let nontext = sample.iter().filter(|&&b| !is_text_byte(b)).count();
    nontext as f64 / sample.len() as f64 > 0.30
}

// BEL, BS, TAB, LF, FF, CR, ESC, then everything from SPACE upward.
fn is_text_byte(b: u8) -> bool {
    matches!(b, 0x07 | 0x08 | 0x09 | 0x0a | 0x0c | 0x0d | 0x1b) || b >= 0x20
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::fs;
    use tempfile::tempdir;

    const DEFAULT: u64 = 1024 * 1024;

    #[test]
    fn parse_size_accepts_suffixed_values() {
        assert_eq!(parse_size("1m", DEFAULT).unwrap(), 1_048_576);
        assert_eq!(parse_size("500k", DEFAULT).unwrap(), 512_000);
        assert_eq!(parse_size("2G", DEFAULT).unwrap(), 2_147_483_648);
        assert_eq!(parse_size("1.5m", DEFAULT).unwrap(), 1_572_864);
    }

    #[test]
    fn parse_size_accepts_bare_byte_counts() {
        assert_eq!(parse_size("4096", DEFAULT).unwrap(), 4096);
        assert_eq!(parse_size("  10 ", DEFAULT).unwrap(), 10);
    }

    #[test]
    fn parse_size_empty_returns_default() {
        assert_eq!(parse_size("", DEFAULT).unwrap(), DEFAULT);
        assert_eq!(parse_size("   ", DEFAULT).unwrap(), DEFAULT);
    }

    #[test]
    fn parse_size_rejects_malformed_input() {
        assert!(matches!(
            parse_size("abc", DEFAULT),
            Err(StitchError::InvalidSize(_))
        ));
        assert!(matches!(
            parse_size("12x", DEFAULT),
            Err(StitchError::InvalidSize(_))
        ));
        assert!(matches!(
            parse_size("1.5", DEFAULT),
            Err(StitchError::InvalidSize(_))
        ));
        assert!(matches!(
            parse_size("k", DEFAULT),
            Err(StitchError::InvalidSize(_))
        ));
    }

    #[test]
    fn nul_byte_means_binary() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("data.bin");
        fs::write(&path, [0x00, 0x01, 0x02])?;
        assert!(is_probably_binary(&path, BINARY_SAMPLE_LEN));
        Ok(())
    }

    #[test]
    fn plain_text_is_not_binary() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("notes.txt");
        fs::write(&path, "just some text\nwith lines\n")?;
        assert!(!is_probably_binary(&path, BINARY_SAMPLE_LEN));
        Ok(())
    }

    #[test]
    fn empty_file_is_not_binary() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("empty");
        fs::write(&path, "")?;
        assert!(!is_probably_binary(&path, BINARY_SAMPLE_LEN));
        Ok(())
    }

    #[test]
    fn control_byte_soup_is_binary() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("soup");
        // No NULs, but well over 30% of the sample is non-text control codes.
        fs::write(&path, [0x01, 0x02, 0x03, 0x04, b'a', b'b'])?;
        assert!(is_probably_binary(&path, BINARY_SAMPLE_LEN));
        Ok(())
    }

    #[test]
    fn unreadable_file_is_binary() {
        assert!(is_probably_binary(
            Path::new("/definitely/not/here"),
            BINARY_SAMPLE_LEN
        ));
    }
}
