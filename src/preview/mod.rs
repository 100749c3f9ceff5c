//! Random annotated-sample rendering.
//!
//! The visual spot check of the analyze pipeline: pick a random image whose
//! label file yields at least one parsable box, draw the boxes over a copy,
//! and save the copy to the requested output path. The source directory is
//! never touched.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use image::Rgb;
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::error::AeroprepError;
use crate::label::{self, LineOutcome, ParsedBox};
use crate::source;

/// Candidate images inspected before giving up on finding parsable labels.
pub const MAX_SAMPLE_ATTEMPTS: usize = 10;

/// Options for sample rendering.
#[derive(Clone, Debug)]
pub struct PreviewOptions {
    /// Seed for candidate selection; `None` uses thread randomness.
    pub seed: Option<u64>,
    /// Image extensions considered during discovery.
    pub image_extensions: Vec<String>,
}

impl Default for PreviewOptions {
    fn default() -> Self {
        Self {
            seed: None,
            image_extensions: source::default_image_extensions(),
        }
    }
}

/// Summary of a rendered sample, for reporting and tests.
#[derive(Clone, Debug)]
pub struct SamplePreview {
    /// Source image the boxes were drawn over.
    pub source_image: PathBuf,
    /// Where the annotated copy was written.
    pub output_path: PathBuf,
    /// Boxes drawn, keyed by class id.
    pub boxes_per_class: BTreeMap<u32, usize>,
    /// Label lines that did not parse as boxes.
    pub skipped_lines: usize,
}

impl SamplePreview {
    /// Total number of boxes drawn.
    pub fn boxes_drawn(&self) -> usize {
        self.boxes_per_class.values().sum()
    }
}

/// Render a random annotated sample from `source_dir` to `output_path`.
///
/// Candidates are shuffled and inspected without replacement, so a bad pick
/// is never retried: an image is accepted only if its label file exists and
/// at least one line parses. Exhausting [`MAX_SAMPLE_ATTEMPTS`] candidates
/// is a hard error rather than a silent fallback to an unannotated image.
pub fn render_random_sample(
    source_dir: &Path,
    output_path: &Path,
    opts: &PreviewOptions,
) -> Result<SamplePreview, AeroprepError> {
    let mut candidates = source::list_files_with_extensions(source_dir, &opts.image_extensions)?;
    if candidates.is_empty() {
        return Err(AeroprepError::NoImages {
            dir: source_dir.to_path_buf(),
        });
    }

    shuffle(&mut candidates, opts.seed);

    let attempts = candidates.len().min(MAX_SAMPLE_ATTEMPTS);
    for image_path in &candidates[..attempts] {
        let label_path = source::label_path_for_image(image_path);
        if !label_path.is_file() {
            continue;
        }
        if let Some(preview) = try_render(image_path, &label_path, output_path)? {
            return Ok(preview);
        }
    }

    Err(AeroprepError::NoAnnotatedSample {
        dir: source_dir.to_path_buf(),
        attempts,
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

/// Render one candidate. `Ok(None)` means the label file produced no boxes
/// and the caller should move on to the next candidate; an unreadable image
/// or a failed save is fatal to the whole operation.
fn try_render(
    image_path: &Path,
    label_path: &Path,
    output_path: &Path,
) -> Result<Option<SamplePreview>, AeroprepError> {
    let img = image::open(image_path)
        .map_err(|source| AeroprepError::ImageRead {
            path: image_path.to_path_buf(),
            source,
        })?
        .to_rgb8();
    let (width, height) = img.dimensions();

    let content = source::read_to_string_lossy(label_path).map_err(AeroprepError::Io)?;

    let mut boxes = Vec::new();
    let mut skipped_lines = 0usize;
    for line in content.lines() {
        match label::parse_label_line(line, width, height) {
            LineOutcome::Parsed(parsed) => boxes.push(parsed),
            LineOutcome::Skipped(_) => skipped_lines += 1,
        }
    }

    if boxes.is_empty() {
        return Ok(None);
    }

    let mut canvas = img;
    let mut boxes_per_class: BTreeMap<u32, usize> = BTreeMap::new();
    for parsed in &boxes {
        if let Some(rect) = clamped_rect(parsed, width, height) {
            draw_hollow_rect_mut(&mut canvas, rect, class_color(parsed.class_id));
        }
        *boxes_per_class.entry(parsed.class_id).or_insert(0) += 1;
    }

    canvas
        .save(output_path)
        .map_err(|source| AeroprepError::ImageWrite {
            path: output_path.to_path_buf(),
            source,
        })?;

    Ok(Some(SamplePreview {
        source_image: image_path.to_path_buf(),
        output_path: output_path.to_path_buf(),
        boxes_per_class,
        skipped_lines,
    }))
}

/// Clamp a parsed box to the image and convert it to a drawable rect.
///
/// Boxes that fall entirely outside the image, or lose all extent to
/// clamping, are not drawable and yield `None`.
fn clamped_rect(parsed: &ParsedBox, image_width: u32, image_height: u32) -> Option<Rect> {
    let x_min = parsed.x_min.clamp(0, image_width as i32);
    let y_min = parsed.y_min.clamp(0, image_height as i32);
    let x_max = parsed
        .x_min
        .saturating_add(parsed.width)
        .clamp(0, image_width as i32);
    let y_max = parsed
        .y_min
        .saturating_add(parsed.height)
        .clamp(0, image_height as i32);

    let rect_width = x_max - x_min;
    let rect_height = y_max - y_min;
    if rect_width <= 0 || rect_height <= 0 {
        return None;
    }

    Some(Rect::at(x_min, y_min).of_size(rect_width as u32, rect_height as u32))
}

/// Fixed palette keyed by class id; wraps after eight classes.
fn class_color(class_id: u32) -> Rgb<u8> {
    const PALETTE: [(u8, u8, u8); 8] = [
        (230, 25, 75),
        (60, 180, 75),
        (0, 130, 200),
        (255, 225, 25),
        (245, 130, 48),
        (145, 30, 180),
        (70, 240, 240),
        (240, 50, 230),
    ];
    let (r, g, b) = PALETTE[class_id as usize % PALETTE.len()];
    Rgb([r, g, b])
}
