use crate::config::{AnalysisConfig, ConfigOverrides};
use crate::core::{AnalysisPipeline, PipelineEvent};
use crate::error::{PhastError, PhastResult};
use crate::excel::{FileProcessor, ResultsExporter};
use crate::types::{AnalysisResult, TemperatureType};
use colored::Colorize;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Install the stderr log subscriber. `RUST_LOG` takes precedence over the
/// verbosity flag.
pub fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "phast_dispersion=info"
    } else {
        "phast_dispersion=warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    // A subscriber may already be installed when called more than once
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Execute the analyze command
pub fn analyze(
    config_file: Option<PathBuf>,
    overrides: ConfigOverrides,
    json: bool,
) -> PhastResult<()> {
    let mut config = match &config_file {
        Some(path) => AnalysisConfig::from_file(path)?,
        None => AnalysisConfig::default(),
    };
    config.apply(overrides);
    config.validate()?;
    init_logging(config.verbose);

    let folder = config
        .input_folder
        .clone()
        .ok_or_else(|| PhastError::Config("Please select an input folder".to_string()))?;
    let chatty = config.verbose && !json;

    if !json {
        println!("{}", "🔥 PHAST Temperature Dispersion Analyser".bold().green());
        println!("   Input:       {}", folder.display());
        if let Some(output) = &config.output_file {
            println!("   Output:      {}", output.display());
        }
        println!("   Temperature: {} °C ({})", config.temperature_of_interest, config.temperature_type);
        println!("   Method:      {}\n", config.interpolation_method.to_string().bright_yellow());
    }

    let pipeline = AnalysisPipeline::new(&config);
    let outcome = pipeline.run_with_events(&folder, |event| {
        if !chatty {
            return;
        }
        match event {
            PipelineEvent::Status(message) => println!("{}", message.cyan()),
            PipelineEvent::Progress(percent) => {
                eprint!("\r   Progress: {:>3}%", percent);
                if percent >= 100 {
                    eprintln!();
                }
                let _ = std::io::stderr().flush();
            }
        }
    })?;

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome.results)?);
    } else {
        print_results(&outcome.results, config.decimal_places);

        println!(
            "   Records: {} found, {} interpolated, {} skipped",
            outcome.records_found,
            outcome.results.len(),
            outcome.records_skipped
        );
        for path in &outcome.failed_files {
            println!("   {} Could not read {}", "⚠️".yellow(), path.display());
        }
        println!();
    }

    if let Some(output) = &config.output_file {
        if chatty {
            println!("{}", "📊 Exporting to Excel...".cyan());
        }
        ResultsExporter::new(config.decimal_places).export(&outcome.results, output)?;
        if !json {
            println!("{}", "✅ Analysis Complete!".bold().green());
            println!("   Results exported to: {}", output.display());
            println!("   Total records: {}\n", outcome.results.len());
        }
    } else if !json {
        println!("{}", "✅ Analysis Complete!".bold().green());
    }

    Ok(())
}

fn print_results(results: &[AnalysisResult], decimal_places: u32) {
    let Some(first) = results.first() else {
        println!("{}", "⚠️  No record could be interpolated".yellow());
        return;
    };

    let headers = ResultsExporter::headers(first.temperature_of_interest);
    println!("{}", "📋 Results:".bold().cyan());
    println!(
        "   {} | {} | {} | {} | {}",
        headers[0].bold(),
        headers[1].bold(),
        headers[2].bold(),
        headers[3].bold(),
        headers[4].bold()
    );
    let places = decimal_places as usize;
    for result in results {
        println!(
            "   {} | {} | {} | {} | {}",
            result.subsection.bright_blue(),
            result.scenario,
            result.weather,
            format!("{:.places$}", result.downwind_distance).green(),
            result.interpolation_method
        );
    }
    println!();
}

/// Execute the extract command
pub fn extract(
    folder: PathBuf,
    temperature_type: TemperatureType,
    json: bool,
    verbose: bool,
) -> PhastResult<()> {
    init_logging(verbose);
    ensure_folder(&folder)?;

    if !json {
        println!("{}", "🔍 PHAST Dispersion Data".bold().green());
        println!("   Input:       {}", folder.display());
        println!("   Temperature: {}\n", temperature_type);
    }

    let processor = FileProcessor::new(temperature_type, verbose);
    let scan = processor.scan_folder(&folder);

    if json {
        println!("{}", serde_json::to_string_pretty(&scan.records)?);
        return Ok(());
    }

    if scan.records.is_empty() {
        println!("{}", "⚠️  No dispersion data found".yellow());
    }

    for record in &scan.records {
        println!(
            "   📊 {} / {} / {}",
            record.equipment_item.bright_blue().bold(),
            record.scenario,
            record.weather
        );
        if let (Some((t_min, t_max)), Some((d_min, d_max))) =
            (record.temperature_range(), record.distance_range())
        {
            println!(
                "      {} samples, {} to {} °C, {} to {} m",
                record.len(),
                t_max,
                t_min,
                d_min,
                d_max
            );
        }
    }

    println!();
    println!(
        "   {} workbook(s), {} record(s)",
        scan.files_found,
        scan.records.len()
    );
    for (path, reason) in &scan.failures {
        println!("   {} {}: {}", "⚠️".yellow(), path.display(), reason.red());
    }

    Ok(())
}

fn ensure_folder(folder: &Path) -> PhastResult<()> {
    if folder.is_dir() {
        Ok(())
    } else {
        Err(PhastError::Config(format!(
            "Input folder does not exist: {}",
            folder.display()
        )))
    }
}
