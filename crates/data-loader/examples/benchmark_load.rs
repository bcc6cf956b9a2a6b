use anyhow::Context;
use data_loader::Catalog;
use std::path::Path;
use std::time::Instant;

fn main() -> anyhow::Result<()> {
    let data_dir = Path::new("data");

    println!("Loading catalog artifacts...\n");

    let start = Instant::now();
    let catalog = Catalog::load_from_files(data_dir)
        .with_context(|| format!("Failed to load catalog from {}", data_dir.display()))?;
    let elapsed = start.elapsed();

    let cells = catalog.len() * catalog.len();

    println!("\n=== Load Complete ===");
    println!("Time taken: {:?}", elapsed);
    println!("Movies: {}", catalog.len());
    println!("Similarity scores: {}", cells);
    println!("\nPerformance: {:.0} scores/second",
             cells as f64 / elapsed.as_secs_f64());

    Ok(())
}
