use airport_maps::{
    catalog, AirportCatalog, AirportRecord, AirportSession, HeadlessMap, MapsConfig, VenueLoader,
};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rayon::ThreadPoolBuilder;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, Level};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Resource root containing the Maps/ folder
    #[arg(short, long, env = "AIRPORT_MAPS_ROOT", default_value = ".", global = true)]
    root: PathBuf,

    /// Catalog file, overriding Maps/AirportMapsConfiguration.json under the root
    #[arg(long, value_name = "FILE", global = true)]
    catalog: Option<PathBuf>,

    /// Seconds to wait for a venue to load
    #[arg(long, default_value_t = 10, global = true)]
    timeout_secs: u64,

    /// Parallel threads for venue checks (default: CPU cores)
    #[arg(short, long, global = true)]
    threads: Option<usize>,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List airports in catalog order
    List,
    /// Show one airport's region and floors, and load its venue
    Show {
        /// Airport code or list index
        airport: String,

        /// Floor ordinal to open on instead of the airport's default
        #[arg(long)]
        floor: Option<usize>,
    },
    /// Validate every catalog entry and look for each venue folder
    Check,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Logging
    let level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    if let Some(threads) = args.threads {
        ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("Failed to build thread pool")?;
    }

    let mut config = MapsConfig::from_root(&args.root)
        .with_venue_timeout(Duration::from_secs(args.timeout_secs));
    if let Some(catalog) = &args.catalog {
        config = config.with_catalog_file(catalog);
    }

    match &args.command {
        Command::List => list(&config),
        Command::Show { airport, floor } => show(&config, airport, *floor),
        Command::Check => check(&config),
    }
}

fn load_catalog(config: &MapsConfig) -> Result<AirportCatalog> {
    let path = config.catalog_path();
    AirportCatalog::load(&path)
        .with_context(|| format!("Failed to load airport catalog {:?}", path))
}

fn list(config: &MapsConfig) -> Result<()> {
    let catalog = load_catalog(config)?;

    for (index, record) in catalog.iter().enumerate() {
        println!(
            "{:>3}  {:<4} {} ({}, {})",
            index,
            record.code(),
            record.name(),
            record.city(),
            record.country()
        );
    }

    Ok(())
}

fn resolve<'a>(catalog: &'a AirportCatalog, airport: &str) -> Result<&'a AirportRecord> {
    if let Ok(index) = airport.parse::<usize>() {
        return Ok(catalog.record_at(index)?);
    }

    catalog
        .find_by_code(airport)
        .map(|(_, record)| record)
        .with_context(|| format!("No airport with code {}", airport))
}

fn show(config: &MapsConfig, airport: &str, floor: Option<usize>) -> Result<()> {
    let catalog = load_catalog(config)?;
    let record = resolve(&catalog, airport)?;

    let region = record.display_region();
    println!("{} - {}", record.code(), record.name());
    println!("  {}, {}", record.city(), record.country());
    println!(
        "  centre {:.4}, {:.4}  span {} x {} degrees",
        region.center_latitude,
        region.center_longitude,
        region.latitude_delta,
        region.longitude_delta
    );

    let map = Arc::new(HeadlessMap::new(
        config.resource_root.join(&config.venue_dir),
    ));
    // Applied by show once the venue is loaded
    let session = match floor {
        Some(floor) => AirportSession::open_on_floor(record.clone(), floor, map.clone())?,
        None => AirportSession::open(record.clone(), map.clone()),
    };

    for (ordinal, name) in session.floors() {
        let marker = if ordinal == session.current_floor() {
            "*"
        } else {
            " "
        };
        println!("  {} {:>2}  {}", marker, ordinal, name);
    }

    // Venue load is the only async step
    let runtime = tokio::runtime::Runtime::new().context("Failed to start runtime")?;
    let loader = VenueLoader::new(map.clone(), config.venue_timeout);
    runtime
        .block_on(session.show(&loader))
        .with_context(|| format!("Failed to show venue {}", record.code()))?;

    let viewport = map.viewport();
    info!(
        "Showing {} on floor {}",
        viewport.venue.as_deref().unwrap_or("-"),
        session.current_floor_name()?
    );

    Ok(())
}

fn check(config: &MapsConfig) -> Result<()> {
    use rayon::prelude::*;

    let path = config.catalog_path();
    let entries = catalog::read_entries(&path)
        .with_context(|| format!("Failed to read airport catalog {:?}", path))?;

    // Every invalid entry, not just the first
    let problems = catalog::diagnose(&entries);
    if !problems.is_empty() {
        error!("{} invalid catalog entries:", problems.len());
        for problem in &problems {
            error!("  {}: {}", problem, source_of(problem));
        }
        anyhow::bail!("{} catalog entries are invalid", problems.len());
    }

    let catalog = AirportCatalog::from_entries(entries)
        .with_context(|| format!("Failed to load airport catalog {:?}", path))?;
    info!("Checking venue folders for {} airports", catalog.len());

    // Venue folders in parallel
    let missing: Vec<PathBuf> = catalog
        .records()
        .par_iter()
        .map(|record| config.venue_path(record.code()))
        .filter(|venue| !venue.is_dir())
        .collect();

    if !missing.is_empty() {
        error!("Missing {} venue folders:", missing.len());
        for venue in &missing {
            error!("  {}", venue.display());
        }
        anyhow::bail!("{} venue folders are missing", missing.len());
    }

    info!("Catalog {:?} OK", path);
    Ok(())
}

fn source_of(err: &dyn std::error::Error) -> String {
    err.source()
        .map(|source| source.to_string())
        .unwrap_or_default()
}
