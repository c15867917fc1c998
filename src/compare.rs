use super::chart::plot_comparison;
use super::station::{LOCAL, SOLA};
use super::{Series, VERSION};
use clap::{App, Arg};
use log::{info, warn};
use std::path::PathBuf;

/// Paths and verbosity for one comparison run.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub sola: PathBuf,
    pub local: PathBuf,
    pub svgout: PathBuf,
    pub verbosity: u64,
}

/// What a run ended with; both are normal completions.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Rendered(PathBuf),
    NoData,
}

/// Takes the CLI arguments for the station comparison.
pub fn parse_cli() -> Config {
    let arg_sola = Arg::with_name("sola_csvfile")
        .help("log of the Sola station (day.month.year dates, pressure in hPa)")
        .short("s")
        .long("sola")
        .takes_value(true)
        .default_value("sola.csv");
    let arg_local = Arg::with_name("local_csvfile")
        .help("log of the local station (month.day.year dates, pressure in bar)")
        .short("l")
        .long("local")
        .takes_value(true)
        .default_value("local.csv");
    let arg_svgout = Arg::with_name("output_svgfile")
        .help("name of the output svg file")
        .short("o")
        .long("svgfile")
        .takes_value(true)
        .default_value("station_comparison.svg");
    let arg_verbose = Arg::with_name("verbose")
        .help("print more diagnostics, repeat for more")
        .short("v")
        .long("verbose")
        .multiple(true)
        .takes_value(false);
    let cli_args = App::new("Station_cmp")
        .version(VERSION.unwrap_or("unknown"))
        .author("Luca Peruzzo")
        .about("cli app to compare temperature and pressure of two weather stations")
        .arg(arg_sola)
        .arg(arg_local)
        .arg(arg_svgout)
        .arg(arg_verbose)
        .get_matches();
    Config {
        sola: PathBuf::from(cli_args.value_of("sola_csvfile").unwrap_or_default()),
        local: PathBuf::from(cli_args.value_of("local_csvfile").unwrap_or_default()),
        svgout: PathBuf::from(cli_args.value_of("output_svgfile").unwrap_or_default()),
        verbosity: cli_args.occurrences_of("verbose"),
    }
}

/// `RUST_LOG` takes precedence over the verbosity count.
pub fn init_logging(verbosity: u64) {
    let log_level = match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

/// Reads both station logs and plots them, unless one of them has no readings.
pub fn run(config: &Config) -> Result<Outcome, Box<dyn std::error::Error>> {
    let sola = Series::from_csv(&config.sola, &SOLA);
    let local = Series::from_csv(&config.local, &LOCAL);

    if sola.is_empty() || local.is_empty() {
        warn!(
            "no usable data (Sola: {} readings, Local: {} readings), check the file paths",
            sola.len(),
            local.len()
        );
        return Ok(Outcome::NoData);
    }

    for (name, series) in [("Sola", &sola), ("Local", &local)].iter() {
        info!("{} datetimes: {:?}", name, series.time());
        info!("{} temperatures: {:?}", name, series.temperature());
        info!("{} pressures: {:?}", name, series.pressure());
    }

    plot_comparison(&sola, &local, &config.svgout)?;
    info!("plotted to {}", config.svgout.display());
    Ok(Outcome::Rendered(config.svgout.clone()))
}
