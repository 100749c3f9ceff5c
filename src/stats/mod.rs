//! Class-distribution statistics for a raw label directory.
//!
//! This is the exploratory half of the pipeline: scan every label file in
//! the source directory and count objects per class, tolerating all the
//! garbage a dirty dump contains.

mod report;

pub use report::StatsReport;

use std::collections::BTreeMap;
use std::path::Path;

use crate::error::AeroprepError;
use crate::label;
use crate::source::{self, LABEL_EXTENSION};

/// Options for a statistics run.
#[derive(Clone, Debug)]
pub struct StatsOptions {
    /// Width of histogram bars (in characters).
    pub bar_width: usize,
}

impl Default for StatsOptions {
    fn default() -> Self {
        Self { bar_width: 20 }
    }
}

/// Scan `source_dir` for label files and count objects per class.
///
/// Lines that fail the structural checks (token count, integer class id)
/// are skipped and surface only as `skipped_lines`; a file that cannot be
/// read at all is skipped the same way undecodable bytes are. Finding no
/// label files is the one hard error, and it produces no partial report.
pub fn analyze_source_dir(
    source_dir: &Path,
    opts: &StatsOptions,
) -> Result<StatsReport, AeroprepError> {
    let label_files = source::list_files_with_extensions(source_dir, &[LABEL_EXTENSION])?;
    if label_files.is_empty() {
        return Err(AeroprepError::NoLabelFiles {
            dir: source_dir.to_path_buf(),
        });
    }

    let mut per_class: BTreeMap<u32, u64> = BTreeMap::new();
    let mut total_objects = 0u64;
    let mut skipped_lines = 0u64;

    for path in &label_files {
        let Ok(content) = source::read_to_string_lossy(path) else {
            continue;
        };
        for line in content.lines() {
            match label::class_id_of_line(line) {
                Some(class_id) => {
                    *per_class.entry(class_id).or_insert(0) += 1;
                    total_objects += 1;
                }
                None => skipped_lines += 1,
            }
        }
    }

    Ok(StatsReport {
        label_files: label_files.len(),
        total_objects,
        skipped_lines,
        per_class,
        bar_width: opts.bar_width,
    })
}
