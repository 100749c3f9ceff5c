//! Split report type and terminal formatting.

use serde::Serialize;
use std::fmt;

/// The result of materializing a train/val split.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct SplitReport {
    /// Images discovered in the source directory.
    pub images_found: usize,
    /// Images with a structurally plausible label file.
    pub valid_pairs: usize,
    /// Pairs copied into the train partition.
    pub train: usize,
    /// Pairs copied into the val partition.
    pub val: usize,
}

impl SplitReport {
    /// Images discarded for lacking a plausible label file.
    pub fn discarded(&self) -> usize {
        self.images_found - self.valid_pairs
    }
}

impl fmt::Display for SplitReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Images found:     {}", self.images_found)?;
        writeln!(f, "Valid pairs:      {}", self.valid_pairs)?;
        if self.discarded() > 0 {
            writeln!(f, "Discarded:        {}", self.discarded())?;
        }
        writeln!(f, "Copied to train:  {}", self.train)?;
        writeln!(f, "Copied to val:    {}", self.val)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_reports_all_counts() {
        let report = SplitReport {
            images_found: 13,
            valid_pairs: 10,
            train: 8,
            val: 2,
        };

        let output = format!("{}", report);
        assert!(output.contains("Images found:     13"));
        assert!(output.contains("Valid pairs:      10"));
        assert!(output.contains("Discarded:        3"));
        assert!(output.contains("Copied to train:  8"));
        assert!(output.contains("Copied to val:    2"));
    }
}
