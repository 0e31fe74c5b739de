//! Regenerate the `.idx` sidecar files for the bundled IEEE registries.
//!
//! Run this whenever `oui.txt` or `iab.txt` are refreshed; lookups then
//! seek straight to record byte ranges instead of rescanning the files.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use addrkit::registry::{build_iab_index, build_oui_index};

#[derive(Parser, Debug)]
#[command(name = "mkindex", version, about = "Regenerate IEEE registry index sidecars")]
struct Args {
    /// Directory containing oui.txt and iab.txt
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,

    /// Only rebuild the OUI index
    #[arg(long, conflicts_with = "iab_only")]
    oui_only: bool,

    /// Only rebuild the IAB index
    #[arg(long)]
    iab_only: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if !args.iab_only {
        let data = args.data_dir.join("oui.txt");
        let index = args.data_dir.join("oui.idx");
        let count = build_oui_index(&data, &index)
            .with_context(|| format!("indexing {}", data.display()))?;
        println!("{}: {count} records", index.display());
    }

    if !args.oui_only {
        let data = args.data_dir.join("iab.txt");
        let index = args.data_dir.join("iab.idx");
        let count = build_iab_index(&data, &index)
            .with_context(|| format!("indexing {}", data.display()))?;
        println!("{}: {count} records", index.display());
    }

    Ok(())
}
