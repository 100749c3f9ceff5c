//! Stats report type and terminal formatting.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// The result of a statistics run over a label directory.
///
/// `per_class` is keyed by class id, so iteration is ascending by id.
#[derive(Clone, Debug, Serialize)]
pub struct StatsReport {
    /// Number of label files analyzed.
    pub label_files: usize,
    /// Objects counted across all label files.
    pub total_objects: u64,
    /// Lines that failed the structural checks and counted toward nothing.
    pub skipped_lines: u64,
    /// Object count per class id.
    pub per_class: BTreeMap<u32, u64>,
    /// Display-only option for histogram rendering width.
    #[serde(skip)]
    pub(crate) bar_width: usize,
}

impl fmt::Display for StatsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Analyzed {} label file(s)",
            format_number(self.label_files as u64)
        )?;
        writeln!(f)?;
        writeln!(
            f,
            "  Total objects:  {}",
            format_number(self.total_objects)
        )?;
        if self.skipped_lines > 0 {
            writeln!(
                f,
                "  Skipped lines:  {}",
                format_number(self.skipped_lines)
            )?;
        }
        writeln!(f)?;
        writeln!(f, "  Class distribution:")?;

        if self.per_class.is_empty() {
            writeln!(f, "    No valid objects found.")?;
            return Ok(());
        }

        let max_count = self.per_class.values().copied().max().unwrap_or(1);
        for (class_id, count) in &self.per_class {
            let pct = if self.total_objects > 0 {
                (*count as f64 / self.total_objects as f64) * 100.0
            } else {
                0.0
            };
            writeln!(
                f,
                "    class {:<5} {:>8}  {:>5.1}%  {}",
                class_id,
                format_number(*count),
                pct,
                render_bar(*count, max_count, self.bar_width)
            )?;
        }

        Ok(())
    }
}

/// Format a number with thousands separators.
fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

/// Render a horizontal bar using Unicode block characters.
fn render_bar(count: u64, max_count: u64, width: usize) -> String {
    if max_count == 0 || width == 0 {
        return String::new();
    }

    let filled = ((count as u128 * width as u128) / max_count as u128) as usize;
    let filled = filled.min(width);
    "█".repeat(filled) + &"░".repeat(width - filled)
}
