use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use hazard_zones_core::report::build_report;
use hazard_zones_core::{compute, GeoPoint, HazardRegistries, Scenario, ZoneReport};
use tracing::{debug, error};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Blast overpressure hazard zones from the command line
#[derive(Parser, Debug)]
#[command(name = "hazard-zones")]
#[command(about = "Blast overpressure hazard zone calculator", long_about = None)]
#[command(version)]
struct Args {
    /// Substance table (JSON) replacing the builtin one
    #[arg(long, global = true)]
    substances: Option<PathBuf>,

    /// Threshold table (JSON, most severe first) replacing the builtin one
    #[arg(long, global = true)]
    thresholds: Option<PathBuf>,

    /// Print machine-readable JSON instead of a table
    #[arg(long, global = true)]
    json: bool,

    /// More logging (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the substances and their TNT conversion factors
    ListSubstances,

    /// List the severity thresholds, most severe first
    ListThresholds,

    /// Compute the zones for one release
    Compute {
        /// Substance name (case-insensitive)
        #[arg(short, long)]
        substance: String,

        /// Released mass in kg
        #[arg(short, long)]
        mass: f64,

        /// Detonation efficiency in percent (0, 100]; substance default if omitted
        #[arg(short, long)]
        efficiency: Option<f64>,

        /// Origin latitude in decimal degrees
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        /// Origin longitude in decimal degrees
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
    },
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            error!("{message}");
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), String> {
    let registries =
        HazardRegistries::from_files(args.substances.as_deref(), args.thresholds.as_deref())
            .map_err(|e| e.to_string())?;

    match &args.command {
        Command::ListSubstances => list_substances(&registries, args.json),
        Command::ListThresholds => list_thresholds(&registries, args.json),
        Command::Compute {
            substance,
            mass,
            efficiency,
            lat,
            lon,
        } => {
            let origin = GeoPoint::new(*lat, *lon);
            let scenario = match efficiency {
                Some(percent) => Scenario::from_percent(substance.as_str(), *mass, *percent, origin)
                    .map_err(|e| e.to_string())?,
                None => {
                    let found = registries
                        .substances
                        .lookup(substance)
                        .map_err(|e| e.to_string())?;
                    Scenario::with_default_efficiency(found, *mass, origin)
                }
            };
            debug!(?scenario, "Computing zones");

            let result = compute(&registries, &scenario).map_err(|e| e.to_string())?;
            let report = build_report(&result, &registries.thresholds).map_err(|e| e.to_string())?;

            if args.json {
                print_json(&report)
            } else {
                print_report(&scenario, &report);
                Ok(())
            }
        }
    }
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<(), String> {
    let text = serde_json::to_string_pretty(value).map_err(|e| e.to_string())?;
    println!("{text}");
    Ok(())
}

fn list_substances(registries: &HazardRegistries, json: bool) -> Result<(), String> {
    let substances = registries.substances.list();
    if json {
        return print_json(substances);
    }

    println!(
        "{:<18} {:>8} {:>10}  {}",
        "Substance", "TNT eq.", "Def. eff.", "Category"
    );
    for s in substances {
        println!(
            "{:<18} {:>8.2} {:>9.0}%  {}",
            s.name,
            s.conversion_factor,
            s.default_efficiency_fraction * 100.0,
            s.category
        );
    }
    Ok(())
}

fn list_thresholds(registries: &HazardRegistries, json: bool) -> Result<(), String> {
    let thresholds = registries.thresholds.list();
    if json {
        return print_json(thresholds);
    }

    println!("Hazard: {}\n", registries.thresholds.hazard());
    println!(
        "{:<28} {:>10} {:>8} {:>6}  {}",
        "Threshold", "kPa", "psi", "K", "Colour"
    );
    for t in thresholds {
        println!(
            "{:<28} {:>10.1} {:>8.1} {:>6.2}  {}",
            t.name, *t.trigger_value, *t.trigger_value_secondary, t.scaling_constant, t.color
        );
    }
    Ok(())
}

fn print_report(scenario: &Scenario, report: &ZoneReport) {
    println!("=== Blast Overpressure Zones ===\n");
    println!(
        "{:.2} kg {} at {:.0}% efficiency",
        scenario.total_mass,
        scenario.substance_name,
        scenario.detonation_efficiency_fraction * 100.0
    );
    println!(
        "Origin: {:.5}, {:.5}",
        report.origin.latitude, report.origin.longitude
    );
    println!("TNT equivalent: {:.2} kg\n", report.reference_equivalent_kg);

    println!(
        "{:<28} {:>8} {:>7} {:>10} {:>10}",
        "Zone", "kPa", "psi", "Radius m", "Band ha"
    );
    for row in &report.rows {
        println!(
            "{:<28} {:>8.1} {:>7.1} {:>10.1} {:>10.2}",
            row.threshold, row.overpressure_kpa, row.overpressure_psi, row.radius_m, row.band_area_ha
        );
    }
    println!();
    for row in &report.rows {
        println!("  {}: {}", row.threshold, row.description);
    }
}
