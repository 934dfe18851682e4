use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use image::{Rgb, RgbImage};

use rusty_frames::features::feature_path;
use rusty_frames::{DataType, DatasetConfig, ImageShape};

/// SplitMix64, seeded directly with its state word.
struct SampleRng(u64);

impl SampleRng {
    fn next(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform in `[0, 1)`.
    fn unit(&mut self) -> f64 {
        (self.next() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform in `lo..hi`.
    fn between(&mut self, lo: usize, hi: usize) -> usize {
        lo + (self.next() % (hi - lo) as u64) as usize
    }
}

const SEQ_LENGTH: usize = 8;
const FEATURE_DIM: usize = 16;
const FRAME_SIZE: u32 = 32;

/// Write a frame whose base colour depends on the class and drifts over time.
fn write_frame(path: &Path, class_idx: usize, t: usize, rng: &mut SampleRng) -> Result<()> {
    let base = [(class_idx * 80) % 256, 128, 255 - (class_idx * 60) % 256];
    let img = RgbImage::from_fn(FRAME_SIZE, FRAME_SIZE, |x, y| {
        let drift = (t * 4 + x as usize + y as usize) % 64;
        let noise = (rng.unit() * 16.0) as usize;
        Rgb([
            ((base[0] + drift + noise) % 256) as u8,
            ((base[1] + drift) % 256) as u8,
            ((base[2] + noise) % 256) as u8,
        ])
    });
    img.save(path)
        .with_context(|| format!("writing frame {}", path.display()))
}

fn write_features(path: &Path, rows: usize, class_idx: usize, rng: &mut SampleRng) -> Result<()> {
    let mut text = String::new();
    for r in 0..rows {
        let row: Vec<String> = (0..FEATURE_DIM)
            .map(|d| {
                let signal = ((r + d) as f64 * 0.1 + class_idx as f64).sin();
                format!("{:.5}", signal + rng.unit() * 0.01)
            })
            .collect();
        writeln!(text, "{}", row.join(" "))?;
    }
    std::fs::write(path, text).with_context(|| format!("writing features {}", path.display()))
}

fn main() -> Result<()> {
    env_logger::init();

    let out = PathBuf::from(
        std::env::args()
            .nth(1)
            .unwrap_or_else(|| "sample_workspace".to_string()),
    );
    let mut rng = SampleRng(42);

    let classes = ["Jump", "Run", "Walk"];
    let partitions = [("Train", 4), ("Test", 2)];

    let config = DatasetConfig {
        manifest_path: out.join("FilesData.csv"),
        frames_root: out.clone(),
        sequence_dir: out.join("sequences"),
        seq_length: SEQ_LENGTH,
        data_type: DataType::Images,
        image_shape: ImageShape::new(FRAME_SIZE, FRAME_SIZE, 3),
        ..DatasetConfig::default()
    };
    std::fs::create_dir_all(&config.sequence_dir).context("creating sequence dir")?;

    let mut manifest = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(&config.manifest_path)
        .context("creating manifest")?;

    let mut samples = 0usize;
    for (partition, per_class) in partitions {
        for (class_idx, class) in classes.iter().enumerate() {
            let dir = out.join(partition).join(class);
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("creating {}", dir.display()))?;

            for n in 0..per_class {
                let sample_id = format!("v_{class}_g{n:02}");
                // Some samples fall short of one window and get filtered out.
                let frames = rng.between(SEQ_LENGTH - 2, SEQ_LENGTH * 3);

                for t in 0..frames {
                    let path = dir.join(format!("{sample_id}-{:04}.jpg", t + 1));
                    write_frame(&path, class_idx, t, &mut rng)?;
                }
                let path = feature_path(
                    &config.sequence_dir,
                    &sample_id,
                    SEQ_LENGTH,
                    DataType::Features,
                );
                write_features(&path, frames, class_idx, &mut rng)?;

                manifest.write_record([
                    partition,
                    *class,
                    sample_id.as_str(),
                    frames.to_string().as_str(),
                ])?;
                samples += 1;
            }
        }
    }
    manifest.flush().context("flushing manifest")?;

    let config_path = out.join("config.json");
    std::fs::write(&config_path, serde_json::to_string_pretty(&config)?)
        .context("writing config")?;

    println!(
        "Wrote {samples} samples ({} classes) to {}; config at {}",
        classes.len(),
        out.display(),
        config_path.display()
    );
    Ok(())
}
