use std::path::PathBuf;

use anyhow::{Context, Result};
use log::info;

use rusty_frames::{DatasetConfig, SequenceDataset, Split};

fn main() -> Result<()> {
    env_logger::init();

    // Usage: rusty-frames [config.json] [train|test]
    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => {
            let path = PathBuf::from(path);
            DatasetConfig::from_json_file(&path)
                .with_context(|| format!("loading config {}", path.display()))?
        }
        None => DatasetConfig::default(),
    };
    let splits = match args.next() {
        Some(s) => vec![s.parse::<Split>().map_err(anyhow::Error::msg)?],
        None => vec![Split::Train, Split::Test],
    };

    let dataset = SequenceDataset::new(config).context("reading manifest")?;
    info!("Classes: {}", dataset.classes().join(", "));

    for split in splits {
        let loaded = dataset
            .load_partition(split)
            .with_context(|| format!("loading {split} partition"))?;
        println!(
            "{split}: {} examples, inputs {:?}, labels {:?}",
            loaded.len(),
            loaded.inputs.shape(),
            loaded.labels.shape()
        );
    }

    Ok(())
}
