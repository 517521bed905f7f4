//! The `quizdrill reset` command.

use std::path::PathBuf;

use anyhow::Result;

use quizdrill_core::session::PROGRESS_KEY;
use quizdrill_core::traits::SnapshotStore;
use quizdrill_sources::load_config_from;
use quizdrill_store::ProgressStore;

pub fn execute(config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let mut store = ProgressStore::open(&config.data_dir);

    let had_progress = store.get(PROGRESS_KEY).is_some();
    if !store.remove(PROGRESS_KEY) {
        anyhow::bail!("could not delete the progress snapshot");
    }

    if had_progress {
        println!("Saved progress cleared.");
    } else {
        println!("No saved progress to clear.");
    }
    Ok(())
}
