use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use data_loader::{Catalog, MovieId};
use metadata_client::{Field, MetadataConfig, MovieDetails, TmdbClient};
use orchestrator::{Details, EnrichedRecommendation, RecommendationOrchestrator};
use rand::Rng;
use recommender::{Recommendation, Recommender};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

/// movie-recs - Similar movie recommender
#[derive(Parser)]
#[command(name = "movie-recs")]
#[command(about = "Recommend movies similar to a title, with TMDB details", long_about = None)]
struct Cli {
    /// Directory holding movies.dat and similarity.dat
    #[arg(short, long, default_value = "data")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recommend movies similar to a title
    Recommend {
        /// Exact catalog title
        #[arg(long)]
        title: String,

        /// Number of recommendations to return
        #[arg(long, default_value = "5")]
        limit: usize,

        /// Skip the TMDB lookups and print titles only
        #[arg(long)]
        no_details: bool,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,

        /// Maximum concurrent TMDB lookups
        #[arg(long, default_value_t = orchestrator::DEFAULT_MAX_CONCURRENT_FETCHES)]
        concurrency: usize,
    },

    /// Search the catalog by title
    Search {
        /// Text to search for (case-insensitive substring match)
        #[arg(long)]
        title: String,

        /// Maximum number of results
        #[arg(long, default_value = "20")]
        limit: usize,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Show TMDB details for a movie id
    Details {
        /// TMDB movie id
        #[arg(long)]
        movie_id: MovieId,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Measure ranking latency over random catalog titles
    Benchmark {
        /// Number of requests to make
        #[arg(long, default_value = "100")]
        requests: usize,

        /// Results per request
        #[arg(long, default_value = "5")]
        top_n: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Recommend {
            title,
            limit,
            no_details,
            json,
            concurrency,
        } => {
            let catalog = load_catalog(&cli.data_dir)?;
            if no_details {
                handle_recommend_titles(catalog, &title, limit, json)?
            } else {
                handle_recommend(catalog, &title, limit, json, concurrency).await?
            }
        }
        Commands::Search { title, limit, json } => {
            handle_search(load_catalog(&cli.data_dir)?, &title, limit, json)?
        }
        Commands::Details { movie_id, json } => handle_details(movie_id, json).await?,
        Commands::Benchmark { requests, top_n } => {
            handle_benchmark(load_catalog(&cli.data_dir)?, requests, top_n).await?
        }
    }

    Ok(())
}

/// Load the catalog (this may take a moment for a full matrix)
fn load_catalog(data_dir: &Path) -> Result<Arc<Catalog>> {
    eprintln!("Loading catalog from {}...", data_dir.display());
    let start = Instant::now();
    let catalog = Arc::new(
        Catalog::load_from_files(data_dir).context("Failed to load movie catalog")?,
    );
    eprintln!(
        "{} Loaded {} movies in {:?}",
        "✓".green(),
        catalog.len(),
        start.elapsed()
    );
    Ok(catalog)
}

fn tmdb_client() -> Result<TmdbClient> {
    let config = MetadataConfig::from_env()
        .context("TMDB_API_KEY must be set (environment or .env) to fetch movie details")?;
    debug!("Using metadata service at {}", config.tmdb_api_url);
    Ok(TmdbClient::from_config(&config))
}

/// Handle the 'recommend' command
async fn handle_recommend(
    catalog: Arc<Catalog>,
    title: &str,
    limit: usize,
    json: bool,
    concurrency: usize,
) -> Result<()> {
    let client = tmdb_client()?;
    let orchestrator = RecommendationOrchestrator::new(catalog, Arc::new(client))
        .with_max_concurrent_fetches(concurrency);

    let recommendations = orchestrator.get_recommendations(title, limit).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&recommendations)?);
    } else {
        print_recommendations(title, &recommendations);
    }
    Ok(())
}

/// Handle 'recommend --no-details'
fn handle_recommend_titles(
    catalog: Arc<Catalog>,
    title: &str,
    limit: usize,
    json: bool,
) -> Result<()> {
    let recommender = Recommender::new(catalog);
    let recommendations = recommender
        .recommend_scored(title, limit)
        .with_context(|| format!("Failed to recommend movies similar to '{}'", title))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&recommendations)?);
    } else {
        print_titles(title, &recommendations);
    }
    Ok(())
}

/// Handle the 'search' command
fn handle_search(catalog: Arc<Catalog>, query: &str, limit: usize, json: bool) -> Result<()> {
    let matches = catalog.search_titles(query, limit);

    if json {
        println!("{}", serde_json::to_string_pretty(&matches)?);
        return Ok(());
    }

    println!("{}", format!("Search results for '{}':", query).bold().blue());
    if matches.is_empty() {
        println!("  No movies match '{}'", query);
    }
    for movie in matches {
        println!("  {}: {}", movie.id.to_string().cyan(), movie.title);
    }
    Ok(())
}

/// Handle the 'details' command
async fn handle_details(movie_id: MovieId, json: bool) -> Result<()> {
    let client = tmdb_client()?;
    let details = client
        .fetch_details(movie_id)
        .await
        .with_context(|| format!("Could not load details for movie {}", movie_id))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&details)?);
    } else {
        println!("{}", format!("Movie {}", movie_id).bold().blue());
        print_details(&details);
    }
    Ok(())
}

/// Handle the 'benchmark' command
async fn handle_benchmark(catalog: Arc<Catalog>, requests: usize, top_n: usize) -> Result<()> {
    if catalog.len() < 2 {
        bail!("Benchmark needs a catalog with at least two movies");
    }
    if requests == 0 {
        bail!("Benchmark needs at least one request");
    }

    let recommender = Recommender::new(catalog.clone());

    // Pick random query titles from the catalog
    let titles: Vec<String> = {
        let mut rng = rand::rng();
        (0..requests)
            .filter_map(|_| catalog.get(rng.random_range(0..catalog.len())))
            .map(|movie| movie.title.clone())
            .collect()
    };

    // Run every request on the blocking pool and collect timings
    let wall_clock = Instant::now();
    let mut handles = vec![];
    for title in titles {
        let recommender = recommender.clone();
        handles.push(tokio::task::spawn_blocking(move || {
            let start = Instant::now();
            recommender.recommend(&title, top_n)?;
            Ok::<_, anyhow::Error>(start.elapsed())
        }));
    }

    let mut timings = vec![];
    for handle in handles {
        timings.push(handle.await??);
    }
    let wall_time = wall_clock.elapsed();

    timings.sort();
    let total: Duration = timings.iter().sum();
    let avg_latency = total / timings.len() as u32;
    let percentile = |p: f32| timings[((timings.len() - 1) as f32 * p) as usize];
    let throughput = timings.len() as f32 / wall_time.as_secs_f32();

    println!("{}", "Benchmark results:".bold().blue());
    println!("Requests: {} (top {})", timings.len(), top_n);
    println!("Wall time: {:?}", wall_time);
    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", percentile(0.50));
    println!("P95 latency: {:?}", percentile(0.95));
    println!("P99 latency: {:?}", percentile(0.99));
    println!("Throughput: {:.2} requests/second", throughput);

    Ok(())
}

/// Print enriched recommendations, one block per movie
fn print_recommendations(query: &str, recommendations: &[EnrichedRecommendation]) {
    println!(
        "{}",
        format!("Movies similar to '{}':", query).bold().blue()
    );
    for rec in recommendations {
        println!(
            "\n{}. {} - Score: {:.3}",
            rec.rank.to_string().green(),
            rec.title.bold(),
            rec.score
        );
        match &rec.details {
            Details::Available(details) => print_details(details),
            Details::Unavailable(e) => {
                println!(
                    "   {} Could not load details for {} ({})",
                    "⚠".yellow(),
                    rec.title,
                    e
                );
            }
        }
    }
}

/// Print ranked titles without details
fn print_titles(query: &str, recommendations: &[Recommendation]) {
    println!(
        "{}",
        format!("Movies similar to '{}':", query).bold().blue()
    );
    for rec in recommendations {
        println!(
            "{}. {} - Score: {:.3}",
            rec.rank.to_string().green(),
            rec.title,
            rec.score
        );
    }
}

fn print_details(details: &MovieDetails) {
    let runtime = match details.runtime_minutes {
        Field::Known(minutes) => format!("{} min", minutes),
        Field::Unknown => "N/A".to_string(),
    };
    let released = details
        .release_year()
        .map(|year| year.to_string())
        .unwrap_or_else(|| details.release_date.to_string());
    println!(
        "   {}Released: {} | Rating: {} | Runtime: {}",
        "• ".cyan(),
        released,
        details.rating,
        runtime
    );
    println!("   {}Genres: {}", "• ".cyan(), details.genres_display());
    println!("   {}Poster: {}", "• ".cyan(), details.poster_url);
    println!("   {}", details.overview);
}
