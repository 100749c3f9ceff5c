//! Train/val splitting of validated image/label pairs.
//!
//! The preparation half of the pipeline: discover images, keep only pairs
//! whose label file passes the structural probe, shuffle, cut at the split
//! ratio, and copy everything into the standard `images/{train,val}` +
//! `labels/{train,val}` layout. Files are always copied, never moved; the
//! source directory stays intact.

mod report;

pub use report::SplitReport;

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::error::AeroprepError;
use crate::label;
use crate::source;

const SPLIT_SUBDIRS: [&str; 4] = ["images/train", "images/val", "labels/train", "labels/val"];

/// Options for dataset splitting.
#[derive(Clone, Debug)]
pub struct SplitOptions {
    /// Fraction of valid pairs assigned to the train partition.
    pub ratio: f64,
    /// Seed for shuffling; `None` uses thread randomness.
    pub seed: Option<u64>,
    /// Image extensions considered during discovery.
    pub image_extensions: Vec<String>,
}

impl Default for SplitOptions {
    fn default() -> Self {
        Self {
            ratio: 0.8,
            seed: None,
            image_extensions: source::default_image_extensions(),
        }
    }
}

/// Split the valid image/label pairs of `source_dir` into `output_dir`.
///
/// Destination directories are created idempotently and existing files are
/// overwritten, so re-running over the same output tree is safe. A copy
/// failure (disk full, permissions) propagates and halts the run.
pub fn split_dataset(
    source_dir: &Path,
    output_dir: &Path,
    opts: &SplitOptions,
) -> Result<SplitReport, AeroprepError> {
    if !(opts.ratio > 0.0 && opts.ratio < 1.0) {
        return Err(AeroprepError::InvalidRatio(opts.ratio));
    }

    for sub in SPLIT_SUBDIRS {
        fs::create_dir_all(output_dir.join(sub))?;
    }

    let mut images = source::list_files_with_extensions(source_dir, &opts.image_extensions)?;
    if images.is_empty() {
        return Err(AeroprepError::NoImages {
            dir: source_dir.to_path_buf(),
        });
    }
    let images_found = images.len();

    shuffle(&mut images, opts.seed);

    // An image joins the split only with a structurally plausible label file.
    let valid_pairs: Vec<(PathBuf, PathBuf)> = images
        .into_iter()
        .filter_map(|image_path| {
            let label_path = source::label_path_for_image(&image_path);
            (label_path.is_file() && label::probe_label_file(&label_path))
                .then_some((image_path, label_path))
        })
        .collect();

    let split_index = (opts.ratio * valid_pairs.len() as f64).floor() as usize;
    let (train_pairs, val_pairs) = valid_pairs.split_at(split_index);

    copy_pairs(train_pairs, output_dir, "train")?;
    copy_pairs(val_pairs, output_dir, "val")?;

    write_data_yaml(output_dir, &observed_class_ids(&valid_pairs))?;

    Ok(SplitReport {
        images_found,
        valid_pairs: valid_pairs.len(),
        train: train_pairs.len(),
        val: val_pairs.len(),
    })
}

fn shuffle(paths: &mut [PathBuf], seed: Option<u64>) {
    if let Some(seed) = seed {
        let mut rng = StdRng::seed_from_u64(seed);
        paths.shuffle(&mut rng);
    } else {
        let mut rng = rand::rng();
        paths.shuffle(&mut rng);
    }
}

fn copy_pairs(
    pairs: &[(PathBuf, PathBuf)],
    output_dir: &Path,
    subset: &str,
) -> Result<(), AeroprepError> {
    let images_dir = output_dir.join("images").join(subset);
    let labels_dir = output_dir.join("labels").join(subset);

    for (image_src, label_src) in pairs {
        let image_name = image_src
            .file_name()
            .expect("discovered paths have file names");
        let label_name = label_src
            .file_name()
            .expect("derived label paths have file names");

        fs::copy(image_src, images_dir.join(image_name))?;
        fs::copy(label_src, labels_dir.join(label_name))?;
    }

    Ok(())
}

/// Class ids observed across the valid label files, for the manifest names.
fn observed_class_ids(pairs: &[(PathBuf, PathBuf)]) -> BTreeSet<u32> {
    let mut ids = BTreeSet::new();
    for (_, label_path) in pairs {
        let Ok(content) = source::read_to_string_lossy(label_path) else {
            continue;
        };
        for line in content.lines() {
            if let Some(class_id) = label::class_id_of_line(line) {
                ids.insert(class_id);
            }
        }
    }
    ids
}

/// Write the `data.yaml` manifest YOLO training tools expect at the split
/// root. Class names are inferred as `class_<id>` over a dense id range.
fn write_data_yaml(output_dir: &Path, class_ids: &BTreeSet<u32>) -> Result<(), AeroprepError> {
    let mut yaml = String::from("train: images/train\nval: images/val\n\nnames:\n");
    if let Some(max_id) = class_ids.iter().next_back().copied() {
        for id in 0..=max_id {
            yaml.push_str(&format!("  {}: class_{}\n", id, id));
        }
    }

    fs::write(output_dir.join("data.yaml"), yaml)?;
    Ok(())
}
