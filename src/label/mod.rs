//! Label-line parsing and label-file probing.
//!
//! Aerial capture dumps mix real YOLO label rows with stray text: notes,
//! file listings, half-written rows. Parsing here is therefore permissive.
//! A line that does not look like a label row is skipped with an
//! inspectable reason, never an error, and nothing in this module panics
//! or propagates across the parse boundary.

use std::fs;
use std::path::Path;

/// Number of whitespace-separated tokens in a well-formed label row.
/// Tokens past the fifth are ignored.
const LABEL_TOKENS: usize = 5;

/// A bounding box in pixel space, derived from one label row and the
/// dimensions of its owning image.
///
/// Construction is permissive: boxes may extend past the image bounds when
/// the source coordinates do. Clamping is the renderer's job.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParsedBox {
    pub class_id: u32,
    pub x_min: i32,
    pub y_min: i32,
    pub width: i32,
    pub height: i32,
}

/// Outcome of parsing a single label line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineOutcome {
    /// The line was a well-formed label row.
    Parsed(ParsedBox),
    /// The line was not a label row; it counts toward nothing.
    Skipped(SkipReason),
}

/// Why a line was skipped. Diagnostic only; a skip never changes control
/// flow, callers may count or log it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// The line was empty or whitespace-only.
    Blank,
    /// Fewer than five tokens; not enough fields for a label row.
    TooFewTokens { found: usize },
    /// The first token did not parse as a non-negative integer class id.
    BadClassId,
    /// One of the four coordinate tokens did not parse as a float.
    BadCoordinate,
}

/// Parse one label line (`class x_center y_center width height`, all but the
/// class normalized to [0,1]) into a pixel-space box.
///
/// Width and height are scaled by the image dimensions and truncated toward
/// zero; the top-left corner is `round(center - size / 2)` in pixels.
pub fn parse_label_line(line: &str, image_width: u32, image_height: u32) -> LineOutcome {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return LineOutcome::Skipped(SkipReason::Blank);
    }

    // Take at most 5 tokens so pathological inputs do not allocate unbounded memory.
    let tokens: Vec<&str> = trimmed.split_whitespace().take(LABEL_TOKENS).collect();
    if tokens.len() < LABEL_TOKENS {
        return LineOutcome::Skipped(SkipReason::TooFewTokens {
            found: tokens.len(),
        });
    }

    let Ok(class_id) = tokens[0].parse::<u32>() else {
        return LineOutcome::Skipped(SkipReason::BadClassId);
    };

    let mut coords = [0.0f64; 4];
    for (slot, raw) in coords.iter_mut().zip(&tokens[1..LABEL_TOKENS]) {
        let Ok(value) = raw.parse::<f64>() else {
            return LineOutcome::Skipped(SkipReason::BadCoordinate);
        };
        *slot = value;
    }
    let [x_center, y_center, w_norm, h_norm] = coords;

    let img_w = f64::from(image_width);
    let img_h = f64::from(image_height);

    let width = (w_norm * img_w) as i32;
    let height = (h_norm * img_h) as i32;
    let x_min = (x_center * img_w - w_norm * img_w / 2.0).round() as i32;
    let y_min = (y_center * img_h - h_norm * img_h / 2.0).round() as i32;

    LineOutcome::Parsed(ParsedBox {
        class_id,
        x_min,
        y_min,
        width,
        height,
    })
}

/// Extract the class id of a line using only the cheap structural checks:
/// at least five tokens and an integer first token.
///
/// This is the rule statistics runs count by; coordinate tokens are not
/// inspected, so a row with garbage coordinates still counts toward its
/// class.
pub fn class_id_of_line(line: &str) -> Option<u32> {
    let tokens: Vec<&str> = line.split_whitespace().take(LABEL_TOKENS).collect();
    if tokens.len() < LABEL_TOKENS {
        return None;
    }
    tokens[0].parse::<u32>().ok()
}

/// Cheap structural probe: is this file plausibly a label file?
///
/// Inspects only the first line (token count, integer class id, four float
/// coordinates). Undecodable bytes are replaced rather than fatal, and any
/// I/O fault yields `false`; the probe never propagates an error.
pub fn probe_label_file(path: &Path) -> bool {
    let Ok(bytes) = fs::read(path) else {
        return false;
    };
    let content = String::from_utf8_lossy(&bytes);
    let Some(first) = content.lines().next() else {
        return false;
    };
    first_line_is_label(first)
}

fn first_line_is_label(line: &str) -> bool {
    let tokens: Vec<&str> = line.split_whitespace().take(LABEL_TOKENS).collect();
    tokens.len() == LABEL_TOKENS
        && tokens[0].parse::<u32>().is_ok()
        && tokens[1..].iter().all(|t| t.parse::<f64>().is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_valid_rows() {
        let outcome = parse_label_line("2 0.5 0.25 0.3 0.1", 100, 200);
        assert_eq!(
            outcome,
            LineOutcome::Parsed(ParsedBox {
                class_id: 2,
                x_min: 35,
                y_min: 40,
                width: 30,
                height: 20,
            })
        );
    }

    #[test]
    fn parse_conversion_matches_round_and_trunc() {
        // x_c=0.5, w=0.2 on a 100px-wide image: x_min=40, width=20.
        let outcome = parse_label_line("0 0.5 0.5 0.2 0.3", 100, 100);
        let LineOutcome::Parsed(parsed) = outcome else {
            panic!("expected a parsed row, got {outcome:?}");
        };
        assert_eq!(parsed.x_min, 40);
        assert_eq!(parsed.width, 20);
        assert_eq!(parsed.y_min, 35);
        assert_eq!(parsed.height, 30);
    }

    #[test]
    fn parse_skips_blank_rows() {
        assert_eq!(
            parse_label_line("   ", 100, 100),
            LineOutcome::Skipped(SkipReason::Blank)
        );
    }

    #[test]
    fn parse_skips_short_rows() {
        assert_eq!(
            parse_label_line("0 0.1 0.2", 100, 100),
            LineOutcome::Skipped(SkipReason::TooFewTokens { found: 3 })
        );
    }

    #[test]
    fn parse_skips_non_integer_class_ids() {
        // Typical garbage in a dirty dump: a stray file listing.
        assert_eq!(
            parse_label_line("DJI_0042.jpg 0.1 0.2 0.3 0.4", 100, 100),
            LineOutcome::Skipped(SkipReason::BadClassId)
        );
        assert_eq!(
            parse_label_line("-1 0.1 0.2 0.3 0.4", 100, 100),
            LineOutcome::Skipped(SkipReason::BadClassId)
        );
    }

    #[test]
    fn parse_skips_non_numeric_coordinates() {
        assert_eq!(
            parse_label_line("0 0.1 oops 0.3 0.4", 100, 100),
            LineOutcome::Skipped(SkipReason::BadCoordinate)
        );
    }

    #[test]
    fn parse_ignores_tokens_past_the_fifth() {
        let outcome = parse_label_line("0 0.5 0.5 0.2 0.2 trailing junk", 100, 100);
        assert!(matches!(outcome, LineOutcome::Parsed(_)));
    }

    #[test]
    fn parse_allows_boxes_past_image_bounds() {
        let LineOutcome::Parsed(parsed) = parse_label_line("0 0.95 0.5 0.2 0.2", 100, 100) else {
            panic!("expected a parsed row");
        };
        assert_eq!(parsed.x_min, 85);
        assert_eq!(parsed.width, 20);
        assert!(parsed.x_min + parsed.width > 100);
    }

    #[test]
    fn class_id_ignores_coordinate_garbage() {
        assert_eq!(class_id_of_line("7 a b c d"), Some(7));
        assert_eq!(class_id_of_line("7 0.1 0.2 0.3"), None);
        assert_eq!(class_id_of_line("seven 0.1 0.2 0.3 0.4"), None);
    }

    #[test]
    fn probe_rejects_missing_and_empty_files() {
        let temp = tempfile::tempdir().expect("create temp dir");

        assert!(!probe_label_file(&temp.path().join("absent.txt")));

        let empty = temp.path().join("empty.txt");
        fs::write(&empty, "").expect("write empty file");
        assert!(!probe_label_file(&empty));
    }

    #[test]
    fn probe_rejects_prose_first_lines() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let path = temp.path().join("notes.txt");
        fs::write(&path, "flight notes for sortie 12\n0 0.5 0.5 0.2 0.3\n")
            .expect("write notes file");
        assert!(!probe_label_file(&path));
    }

    #[test]
    fn probe_accepts_a_label_first_line() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let path = temp.path().join("good.txt");
        fs::write(&path, "0 0.5 0.5 0.2 0.3\n").expect("write label file");
        assert!(probe_label_file(&path));
    }

    #[test]
    fn probe_tolerates_undecodable_bytes() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let path = temp.path().join("mangled.txt");
        let mut bytes = b"0 0.5 0.5 0.2 0.3\n".to_vec();
        bytes.extend_from_slice(&[0xff, 0xfe, 0x00]);
        fs::write(&path, bytes).expect("write mangled file");
        assert!(probe_label_file(&path));
    }
}
