#![allow(dead_code)]

use std::fs;
use std::path::Path;

use image::{Rgb, RgbImage};

/// Fill color used for fixture images, distinct from every palette color
/// the preview draws with.
pub const FIXTURE_FILL: Rgb<u8> = Rgb([40, 60, 80]);

/// Write a real, decodable image so the preview pipeline can open it.
/// The format is inferred from the extension (`.jpg` or `.png`).
pub fn write_image(path: &Path, width: u32, height: u32) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dir");
    }
    let img = RgbImage::from_pixel(width, height, FIXTURE_FILL);
    img.save(path).expect("write fixture image");
}

/// Write a label file with the given content.
pub fn write_labels(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dir");
    }
    fs::write(path, content).expect("write label file");
}

/// Write a valid image/label pair: `<stem>.<ext>` plus `<stem>.txt` holding
/// one well-formed row per class id given.
pub fn write_pair(dir: &Path, stem: &str, ext: &str, class_ids: &[u32]) {
    write_image(&dir.join(format!("{stem}.{ext}")), 64, 48);
    let content: String = class_ids
        .iter()
        .map(|id| format!("{id} 0.5 0.5 0.25 0.25\n"))
        .collect();
    write_labels(&dir.join(format!("{stem}.txt")), &content);
}
