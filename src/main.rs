use anyhow::Context;
use clap::{Parser, Subcommand};
use phast_dispersion::cli;
use phast_dispersion::config::ConfigOverrides;
use phast_dispersion::types::{InterpolationMethod, TemperatureType};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "phast")]
#[command(about = "Downwind distance at a temperature of interest, from PHAST dispersion reports.")]
#[command(long_about = "PHAST Temperature Dispersion Analyser

Scans a folder of PHAST Excel reports for \"Time-varying Observer Dispersion
Data\" tables and finds, for each equipment item / scenario / weather
combination, the downwind distance at which the cloud centre-line reaches
the temperature of interest.

COMMANDS:
  analyze  - Interpolate every record and summarise (optionally to .xlsx)
  extract  - List the dispersion records found, without interpolating

EXAMPLES:
  phast analyze reports/ -t -15 -o summary.xlsx
  phast analyze reports/ -t -40 -m cubic --temperature-type liquid
  phast analyze reports/ --config analysis.yaml --json
  phast extract reports/ -v")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(long_about = "Interpolate the downwind distance for every dispersion record.

Every .xlsx file directly inside INPUT_FOLDER is read; files that cannot be
opened are reported and skipped. Records whose curve never reaches the
temperature of interest (it is hotter than any sample) are skipped. Below the
coldest sample the farthest sampled distance is reported.

INTERPOLATION METHODS:
  linear     - piecewise linear (default)
  quadratic  - quadratic spline, linear below 3 samples
  cubic      - not-a-knot cubic spline, linear below 4 samples
  nearest    - distance of the sample with the closest temperature

CONFIG FILE (YAML, all fields optional, flags override):
  input_folder: reports/
  output_file: summary.xlsx
  temperature_type: Vapour
  temperature_of_interest: -15.0
  interpolation_method: Cubic Spline
  decimal_places: 2")]
    /// Interpolate dispersion records and summarise the results
    Analyze {
        /// Folder containing PHAST report workbooks (.xlsx)
        input_folder: Option<PathBuf>,

        /// Output Excel file for the results table (.xlsx)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Temperature of interest [degC]
        #[arg(short, long, allow_negative_numbers = true)]
        temperature: Option<f64>,

        /// Interpolation method: linear, quadratic, cubic, nearest
        #[arg(short, long)]
        method: Option<InterpolationMethod>,

        /// Centre-line temperature column: vapour or liquid
        #[arg(long)]
        temperature_type: Option<TemperatureType>,

        /// Decimal places of exported distances (0-10)
        #[arg(short, long)]
        decimal_places: Option<u32>,

        /// YAML configuration file
        #[arg(short, long, env = "PHAST_CONFIG")]
        config: Option<PathBuf>,

        /// Print results as JSON
        #[arg(long)]
        json: bool,

        /// Show verbose progress and diagnostics
        #[arg(short, long)]
        verbose: bool,
    },

    /// List the dispersion records found in a folder of reports
    Extract {
        /// Folder containing PHAST report workbooks (.xlsx)
        input_folder: PathBuf,

        /// Centre-line temperature column: vapour or liquid
        #[arg(long, default_value = "vapour")]
        temperature_type: TemperatureType,

        /// Print records as JSON
        #[arg(long)]
        json: bool,

        /// Show verbose diagnostics
        #[arg(short, long)]
        verbose: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            input_folder,
            output,
            temperature,
            method,
            temperature_type,
            decimal_places,
            config,
            json,
            verbose,
        } => {
            let overrides = ConfigOverrides {
                input_folder,
                output_file: output,
                temperature_type,
                temperature_of_interest: temperature,
                interpolation_method: method,
                verbose,
                decimal_places,
            };
            cli::analyze(config, overrides, json).context("Analysis failed")
        }

        Commands::Extract {
            input_folder,
            temperature_type,
            json,
            verbose,
        } => cli::extract(input_folder, temperature_type, json, verbose)
            .context("Extraction failed"),
    }
}
