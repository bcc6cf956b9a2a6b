//! Example: Find movies similar to a title
//!
//! Run with: cargo run --package recommender --example find_similar -- "Avatar"
//!
//! Loads the catalog, ranks the query title's row and prints the top ten
//! with their scores.

use data_loader::Catalog;
use recommender::Recommender;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter("info")
        .init();

    let query = std::env::args().nth(1).unwrap_or_else(|| "Avatar".to_string());

    println!("=== Similar Movies Example ===\n");

    println!("Loading catalog...");
    let start = Instant::now();
    let catalog = Arc::new(Catalog::load_from_files(Path::new("data"))?);
    println!("Loaded {} movies in {:?}\n", catalog.len(), start.elapsed());

    let recommender = Recommender::new(catalog.clone());

    let start = Instant::now();
    let recommendations = recommender.recommend_scored(&query, 10)?;
    let elapsed = start.elapsed();

    println!("Top {} movies similar to '{}':", recommendations.len(), query);
    for rec in &recommendations {
        println!(
            "  {}. {} (id {}, score {:.3})",
            rec.rank, rec.title, rec.movie_id, rec.score
        );
    }

    println!("\nRanked in {:?}", elapsed);
    Ok(())
}
