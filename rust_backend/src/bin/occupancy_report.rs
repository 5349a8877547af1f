use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use occupancy_rust::io::loaders::{load_config, ReservationLoader};
use occupancy_rust::io::write_exports;
use occupancy_rust::preprocessing::{describe_summary, AnalysisPipeline};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Input paths - read from args
    let args: Vec<String> = std::env::args().collect();
    let Some(input_path) = args.get(1) else {
        eprintln!("Usage: occupancy-report <reservations.csv> [config.toml] [out_dir]");
        std::process::exit(2);
    };
    let config_path = args.get(2).map(Path::new);
    let out_dir = args
        .get(3)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("occupancy_output"));

    println!("=== Occupancy Report ===");
    println!("Reservations file: {}", input_path);
    if let Some(path) = config_path {
        println!("Config file: {}", path.display());
    }
    println!("Output directory: {}", out_dir.display());
    println!();

    let config = load_config(config_path)?;
    let loaded = ReservationLoader::load_from_file(Path::new(input_path))?;

    let report = AnalysisPipeline::new(config)
        .with_records(loaded.records)?
        .run()
        .context("Analysis failed")?;

    println!("{}", describe_summary(&report));
    for category in report.categories_by_size() {
        println!(
            "  {:<20} {:>4} reservations, peak {:>3}, {:>3} occupied slots",
            category.category,
            category.summary.total,
            category.summary.max_overlap,
            category.summary.occupied_slot_count
        );
    }

    let written = write_exports(&report, &out_dir)?;
    println!();
    for path in written {
        println!("✓ Wrote {}", path.display());
    }

    Ok(())
}
