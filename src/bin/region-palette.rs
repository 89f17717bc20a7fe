//! Command-line interface for region_palette
//!
//! Prints the palette of each region as JSON on stdout and a readable
//! summary on stderr.

use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use region_palette::image_loader::load_image;
use region_palette::{HistogramExtractor, PaletteGenerator, PaletteResult, PipelineConfig};

#[derive(Parser, Debug)]
#[command(name = "region-palette", version, about = "Derive accessible brand palettes from an image")]
struct Cli {
    /// Image to analyze
    #[arg(required_unless_present = "write_config")]
    image: Option<PathBuf>,

    /// Pipeline configuration (JSON)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Write the default configuration to FILE and exit
    #[arg(long, value_name = "FILE")]
    write_config: Option<PathBuf>,

    /// Candidate colors requested from the extractor per region
    #[arg(long, value_name = "N")]
    max_colors: Option<usize>,

    /// Skip dominant color extraction and sample each band's top-left pixel
    #[arg(long)]
    no_extractor: bool,

    /// Print plain text instead of JSON on stdout
    #[arg(long)]
    text: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Some(path) = &cli.write_config {
        match PipelineConfig::default().to_json_file(path) {
            Ok(()) => {
                eprintln!("Configuration saved to {}", path.display());
                return;
            }
            Err(error) => fail(&error),
        }
    }

    let mut config = match &cli.config {
        Some(path) => PipelineConfig::from_json_file(path).unwrap_or_else(|e| fail(&e)),
        None => PipelineConfig::default(),
    };
    if let Some(max_colors) = cli.max_colors {
        config.max_colors = max_colors;
    }

    let generator = if cli.no_extractor {
        PaletteGenerator::from_config_without_extractor(&config)
    } else {
        PaletteGenerator::from_config(&config, HistogramExtractor::new())
    };
    let generator = generator.unwrap_or_else(|e| fail(&e));

    let Some(image_path) = cli.image else {
        eprintln!("Error: no image given");
        process::exit(1);
    };

    if !image_path.exists() {
        eprintln!("Error: File '{}' does not exist", image_path.display());
        process::exit(1);
    }

    let image = load_image(&image_path).unwrap_or_else(|e| fail(&e));
    let results = generator.generate(&image).unwrap_or_else(|e| fail(&e));

    if cli.text {
        for result in &results {
            let [original, adjusted, dark] = result.hex_triple();
            println!("{}\t{}\t{}\t{}", result.label, original, adjusted, dark);
        }
    } else {
        print_json(&results);
    }
    print_summary(&results);
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn fail(error: &region_palette::PaletteError) -> ! {
    eprintln!("Palette extraction failed: {}", error);
    eprintln!("Suggestion: {}", error.user_message());
    process::exit(1);
}

fn print_json(results: &[PaletteResult]) {
    match serde_json::to_string_pretty(results) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error serializing result: {}", e);
            process::exit(1);
        }
    }
}

fn print_summary(results: &[PaletteResult]) {
    eprintln!();
    eprintln!("Palette Summary:");
    for result in results {
        eprintln!(
            "  {:<8} original {}  adjusted {}  dark {}",
            result.label, result.original, result.adjusted, result.dark
        );
    }
}
