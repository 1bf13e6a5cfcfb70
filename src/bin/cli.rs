//! supplymatch CLI - Debug tool for proximity queries
//!
//! Usage:
//!   supplymatch-cli closest --lat <deg> --lon <deg> [--fleet <file> | --synthetic <n>]
//!   supplymatch-cli radius --lat <deg> --lon <deg> [--min-distance <d>] [--max-distance <d>]
//!   supplymatch-cli locate --id <id> [--fleet <file>]
//!
//! Fleets are JSON arrays of entities in degrees, e.g.
//! `[{"id": "d1", "location": {"latitude": 51.5, "longitude": -0.12}}]`.
//! Without `--fleet`, a seeded synthetic fleet around the query point is used.

use clap::{Args, Parser, Subcommand};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;
use supplymatch::{
    GeoPoint, OptionExt, SearchConfig, SearchResult, SupplyEntity, SupplyLocationEngine,
    SupplyMatchError, synthetic::FleetScenario,
};
use thiserror::Error;

/// Failures surfaced by the CLI, on top of the library's own errors.
#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Search(#[from] SupplyMatchError),

    #[error("cannot read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("malformed fleet file {path}: {source}")]
    Fleet {
        path: PathBuf,
        source: serde_json::Error,
    },
}

type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "supplymatch-cli")]
#[command(about = "Debug tool for nearest-supply and radius queries", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON search config (sphereRadius, minSearchDistance, maxSearchDistance)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose debug output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Args)]
struct FleetArgs {
    /// JSON file holding the fleet
    #[arg(short, long)]
    fleet: Option<PathBuf>,

    /// Size of the synthetic fleet used when no file is given
    #[arg(long, default_value = "1000")]
    synthetic: usize,

    /// Spread of the synthetic fleet around its origin
    #[arg(long, default_value = "30")]
    spread: f64,

    /// Fraction of synthetic entities that are unavailable
    #[arg(long, default_value = "0.2")]
    unavailable: f64,

    /// RNG seed for the synthetic fleet
    #[arg(long, default_value = "42")]
    seed: u64,
}

#[derive(Subcommand)]
enum Commands {
    /// Find the nearest available entity
    Closest {
        /// Latitude in degrees
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        /// Longitude in degrees
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,

        #[command(flatten)]
        fleet: FleetArgs,
    },

    /// Expanding radius search around a point
    Radius {
        /// Latitude in degrees
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        /// Longitude in degrees
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,

        /// Override the first radius tried
        #[arg(long)]
        min_distance: Option<f64>,

        /// Override the largest radius tried
        #[arg(long)]
        max_distance: Option<f64>,

        #[command(flatten)]
        fleet: FleetArgs,
    },

    /// Print the stored location of an entity
    Locate {
        /// Entity id
        #[arg(long)]
        id: String,

        #[command(flatten)]
        fleet: FleetArgs,
    },
}

fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| writeln!(buf, "[{:5}] {}", record.level(), record.args()))
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> CliResult<()> {
    let mut config = match &cli.config {
        Some(path) => SearchConfig::from_json_str(&read_file(path)?)?,
        None => SearchConfig::default(),
    };

    match cli.command {
        Commands::Closest { lat, lon, fleet } => {
            let center = GeoPoint::from_degrees(lat, lon);
            let engine = load_engine(&fleet, &center, config)?;

            print_header(&format!("Closest supply to ({}, {})", lat, lon));
            match engine.find_closest(center)? {
                Some(result) => print_result(&result, true),
                None => println!("  No available supply"),
            }
        }
        Commands::Radius {
            lat,
            lon,
            min_distance,
            max_distance,
            fleet,
        } => {
            if let Some(min) = min_distance {
                config.min_search_distance = min;
            }
            if let Some(max) = max_distance {
                config.max_search_distance = max;
            }
            let center = GeoPoint::from_degrees(lat, lon);
            let engine = load_engine(&fleet, &center, config)?;

            print_header(&format!("Supply around ({}, {})", lat, lon));
            let outcome = engine.find_within_radius_detailed(center)?;
            match outcome.search_distance {
                Some(radius) => println!(
                    "  {} matches within {} after {} scans",
                    outcome.results.len(),
                    radius,
                    outcome.steps
                ),
                None => println!(
                    "  Nothing within {} after {} scans",
                    engine.config().max_search_distance,
                    outcome.steps
                ),
            }
            for result in &outcome.results {
                print_result(result, cli.verbose);
            }
        }
        Commands::Locate { id, fleet } => {
            let center = fleet_origin_default();
            let engine = load_engine(&fleet, &center, config)?;

            let location = engine.get_entity_location(&id).ok_or_not_found(&id)?;
            println!(
                "{}: ({:.6}, {:.6})",
                id,
                location.lat_degrees(),
                location.lon_degrees()
            );
        }
    }

    Ok(())
}

fn fleet_origin_default() -> GeoPoint {
    FleetScenario::default().origin
}

/// Build an engine from a fleet file, or a synthetic fleet around `origin`.
fn load_engine(
    args: &FleetArgs,
    origin: &GeoPoint,
    config: SearchConfig,
) -> CliResult<SupplyLocationEngine> {
    let entities: Vec<SupplyEntity> = match &args.fleet {
        Some(path) => {
            serde_json::from_str(&read_file(path)?).map_err(|source| CliError::Fleet {
                path: path.clone(),
                source,
            })?
        }
        None => FleetScenario {
            origin: *origin,
            entity_count: args.synthetic,
            spread: args.spread,
            unavailable_fraction: args.unavailable,
            sphere_radius: config.sphere_radius,
            seed: args.seed,
        }
        .generate(),
    };

    let engine = SupplyLocationEngine::new(config)?;
    let mut skipped = 0;
    for entity in entities {
        if engine.upsert_entity(entity).is_err() {
            skipped += 1;
        }
    }
    log::info!(
        "Loaded {} entities ({} skipped as invalid)",
        engine.entity_count(),
        skipped
    );

    Ok(engine)
}

fn read_file(path: &Path) -> CliResult<String> {
    fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn print_header(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{}", title);
    println!("{}", "=".repeat(60));
}

fn print_result(result: &SearchResult, verbose: bool) {
    let entity = &result.entity;
    if verbose {
        println!(
            "  {:<16} ({:>10.5}, {:>11.5})  {:>10.3}  {:?}",
            entity.id,
            entity.location.lat_degrees(),
            entity.location.lon_degrees(),
            result.distance,
            entity.availability
        );
    } else {
        println!("  {:<16} {:>10.3}", entity.id, result.distance);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fleet_args(fleet: Option<PathBuf>) -> FleetArgs {
        FleetArgs {
            fleet,
            synthetic: 10,
            spread: 5.0,
            unavailable: 0.0,
            seed: 7,
        }
    }

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("supplymatch-cli-{}-{}", process::id(), name))
    }

    #[test]
    fn test_missing_fleet_file_is_read_error() {
        let path = temp_path("missing.json");
        let origin = GeoPoint::from_degrees(0.0, 0.0);

        let err = load_engine(&fleet_args(Some(path.clone())), &origin, SearchConfig::default())
            .unwrap_err();
        assert!(matches!(err, CliError::Read { .. }), "{:?}", err);
        assert!(err.to_string().starts_with("cannot read"));
        assert!(err.to_string().contains(&path.display().to_string()));
    }

    #[test]
    fn test_malformed_fleet_file_is_fleet_error() {
        let path = temp_path("malformed.json");
        fs::write(&path, "[{\"id\": \"d1\"").unwrap();
        let origin = GeoPoint::from_degrees(0.0, 0.0);

        let result = load_engine(&fleet_args(Some(path.clone())), &origin, SearchConfig::default());
        fs::remove_file(&path).unwrap();

        let err = result.unwrap_err();
        assert!(matches!(err, CliError::Fleet { .. }), "{:?}", err);
        assert!(err.to_string().starts_with("malformed fleet file"));
    }

    #[test]
    fn test_fleet_file_loads_entities() {
        let path = temp_path("fleet.json");
        fs::write(
            &path,
            r#"[{"id": "d1", "location": {"latitude": 51.5, "longitude": -0.12}}]"#,
        )
        .unwrap();
        let origin = GeoPoint::from_degrees(0.0, 0.0);

        let result = load_engine(&fleet_args(Some(path.clone())), &origin, SearchConfig::default());
        fs::remove_file(&path).unwrap();

        let engine = result.unwrap();
        assert_eq!(engine.entity_count(), 1);
        assert_eq!(engine.get_entity_location("d1").unwrap().lat_degrees(), 51.5);
    }

    #[test]
    fn test_library_errors_pass_through() {
        let err = CliError::from(SupplyMatchError::NotFound { id: "x".into() });
        assert_eq!(err.to_string(), "supply entity x not found");
    }
}
