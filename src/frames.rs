use std::path::{Path, PathBuf};

use image::imageops::FilterType;
use image::DynamicImage;
use log::debug;
use ndarray::Array3;

use crate::config::ImageShape;
use crate::data::model::SampleRecord;
use crate::error::{DatasetError, Result};

// ---------------------------------------------------------------------------
// Frame discovery
// ---------------------------------------------------------------------------

/// Directory holding a sample's frames: `<root>/<partition>/<class_label>/`.
pub fn frame_dir(root: &Path, sample: &SampleRecord) -> PathBuf {
    root.join(&sample.partition).join(&sample.class_label)
}

/// List the frame files of `sample`, sorted by full path.
///
/// Matches file names of the form `<sample_id>*<extension>`: the id as prefix,
/// the extension as suffix (no dot required) and anything in between. A
/// missing directory is simply an empty result.
pub fn resolve_frames(root: &Path, sample: &SampleRecord, extension: &str) -> Result<Vec<PathBuf>> {
    let dir = frame_dir(root, sample);
    if !dir.is_dir() {
        debug!("No frame directory for {sample} at {}", dir.display());
        return Ok(Vec::new());
    }

    let entries = std::fs::read_dir(&dir).map_err(|source| DatasetError::FrameDirectory {
        path: dir.clone(),
        source,
    })?;

    let mut frames = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| DatasetError::FrameDirectory {
            path: dir.clone(),
            source,
        })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let matches = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(|name| matches_frame_pattern(name, &sample.sample_id, extension))
            .unwrap_or(false);
        if matches {
            frames.push(path);
        }
    }

    // read_dir order is platform dependent.
    frames.sort();
    debug!("Resolved {} frames for {sample}", frames.len());
    Ok(frames)
}

/// Prefix and suffix may not overlap, as with a `prefix*suffix` glob.
fn matches_frame_pattern(name: &str, sample_id: &str, extension: &str) -> bool {
    name.len() >= sample_id.len() + extension.len()
        && name.starts_with(sample_id)
        && name.ends_with(extension)
}

// ---------------------------------------------------------------------------
// Frame decoding
// ---------------------------------------------------------------------------

/// Turns one frame file into a `(height, width, channels)` tensor in `[0, 1]`.
pub trait FrameDecoder {
    fn decode(&self, path: &Path, shape: &ImageShape) -> Result<Array3<f32>>;
}

/// [`FrameDecoder`] backed by the `image` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageDecoder;

impl FrameDecoder for ImageDecoder {
    fn decode(&self, path: &Path, shape: &ImageShape) -> Result<Array3<f32>> {
        let img = image::open(path).map_err(|source| DatasetError::ImageDecode {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(image_to_tensor(img, shape))
    }
}

/// Resize to `shape` (nearest neighbour, aspect ignored) and scale to `[0, 1]`.
pub fn image_to_tensor(img: DynamicImage, shape: &ImageShape) -> Array3<f32> {
    let img = img.resize_exact(shape.width, shape.height, FilterType::Nearest);
    let raw: Vec<u8> = match shape.channels {
        1 => img.to_luma8().into_raw(),
        4 => img.to_rgba8().into_raw(),
        _ => img.to_rgb8().into_raw(),
    };
    let [h, w, c] = shape.dims();
    Array3::from_shape_fn((h, w, c), |(y, x, ch)| raw[(y * w + x) * c + ch] as f32 / 255.0)
}

/// Decode every frame in order.
pub fn build_image_sequence(
    decoder: &dyn FrameDecoder,
    frames: &[PathBuf],
    shape: &ImageShape,
) -> Result<Vec<Array3<f32>>> {
    frames.iter().map(|path| decoder.decode(path, shape)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use std::fs;
    use tempfile::tempdir;

    fn sample(id: &str) -> SampleRecord {
        SampleRecord {
            partition: "Train".to_string(),
            class_label: "Run".to_string(),
            sample_id: id.to_string(),
            frame_count: 3,
            extra: Vec::new(),
        }
    }

    #[test]
    fn resolves_matching_frames_sorted() {
        let root = tempdir().unwrap();
        let dir = root.path().join("Train").join("Run");
        fs::create_dir_all(&dir).unwrap();
        for name in ["clip-0003.jpg", "clip-0001.jpg", "clip-0002.jpg", "clip-0001.png", "other-0001.jpg"] {
            fs::write(dir.join(name), b"").unwrap();
        }

        let frames = resolve_frames(root.path(), &sample("clip"), "jpg").unwrap();
        let names: Vec<String> = frames
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["clip-0001.jpg", "clip-0002.jpg", "clip-0003.jpg"]);
    }

    #[test]
    fn extension_matches_without_a_dot() {
        let root = tempdir().unwrap();
        let dir = root.path().join("Train").join("Run");
        fs::create_dir_all(&dir).unwrap();
        for name in ["clip_0002.jpg", "clip_0001jpg", "clip.jpeg", "clipjpg"] {
            fs::write(dir.join(name), b"").unwrap();
        }

        let frames = resolve_frames(root.path(), &sample("clip"), "jpg").unwrap();
        let names: Vec<String> = frames
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["clip_0001jpg", "clip_0002.jpg", "clipjpg"]);
    }

    #[test]
    fn prefix_and_extension_do_not_overlap() {
        assert!(!matches_frame_pattern("clipg", "clip", "jpg"));
        assert!(matches_frame_pattern("clip-7.jpg", "clip", "jpg"));
        assert!(!matches_frame_pattern("other-7.jpg", "clip", "jpg"));
    }

    #[test]
    fn missing_directory_resolves_to_nothing() {
        let root = tempdir().unwrap();
        assert!(resolve_frames(root.path(), &sample("clip"), "jpg").unwrap().is_empty());
    }

    #[test]
    fn tensor_is_resized_and_normalised() {
        let img = RgbImage::from_pixel(4, 2, Rgb([255, 0, 51]));
        let tensor = image_to_tensor(DynamicImage::ImageRgb8(img), &ImageShape::new(3, 5, 3));
        assert_eq!(tensor.shape(), &[3, 5, 3]);
        assert_eq!(tensor[[0, 0, 0]], 1.0);
        assert_eq!(tensor[[2, 4, 1]], 0.0);
        assert!((tensor[[1, 2, 2]] - 0.2).abs() < 1e-6);
    }

    #[test]
    fn decodes_png_from_disk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("frame.png");
        RgbImage::from_pixel(2, 2, Rgb([0, 255, 0])).save(&path).unwrap();

        let tensor = ImageDecoder.decode(&path, &ImageShape::new(2, 2, 1)).unwrap();
        assert_eq!(tensor.shape(), &[2, 2, 1]);
        assert!(tensor.iter().all(|&v| v > 0.0 && v <= 1.0));
    }

    #[test]
    fn undecodable_frame_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.jpg");
        fs::write(&path, b"not an image").unwrap();
        let err = ImageDecoder.decode(&path, &ImageShape::default()).unwrap_err();
        assert!(matches!(err, DatasetError::ImageDecode { .. }));
    }
}
