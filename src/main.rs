use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use property_valuer::config::{self, Config};
use property_valuer::input::{self, AttributeOverrides};
use property_valuer::output::{self, ValuationReport};
use property_valuer::valuation::{
    AlgorithmId, PropertyAttributes, RawPropertyAttributes, ValuationEngine, ValuationError,
    ValuationResult,
};

const EXIT_SUCCESS: i32 = 0;
const EXIT_IO: i32 = 1;
const EXIT_INPUT: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
    Tsv,
}

#[derive(Args, Debug)]
struct PropertyArgs {
    /// Property file (YAML, or JSON when the name ends in .json)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Floor area in m²
    #[arg(long)]
    area: Option<String>,

    #[arg(long)]
    district: Option<String>,

    #[arg(long)]
    sub_district: Option<String>,

    /// Layout such as 3室2厅
    #[arg(long)]
    layout: Option<String>,

    /// 毛坯, 简装, 中等, 精装 or 豪华
    #[arg(long)]
    decoration: Option<String>,

    /// District average price per m²
    #[arg(long)]
    avg_price: Option<String>,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Also write the JSON report to this file
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Estimate a property's price per m²
    Estimate {
        /// comprehensive, simple or investment (defaults to the config's default_algorithm)
        #[arg(short, long)]
        algorithm: Option<String>,

        #[command(flatten)]
        property: PropertyArgs,
    },
    /// Run every algorithm on the same property
    Compare {
        #[command(flatten)]
        property: PropertyArgs,
    },
    /// Write a config file holding the built-in tables and weights
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Parser, Debug)]
#[command(name = "valuer")]
#[command(about = "Property valuation by weighted multi-factor scoring", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/property-valuer/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Commands::Init { force } = cli.command {
        let path = match cli.config.map(Ok).unwrap_or_else(config::get_config_path) {
            Ok(p) => p,
            Err(e) => {
                eprintln!("Config error: {}", e);
                std::process::exit(EXIT_CONFIG);
            }
        };
        if let Err(e) = config::write_default_config(&path, force) {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
        println!("Wrote default config to {}", path.display());
        std::process::exit(EXIT_SUCCESS);
    }

    // Load config
    let config = match config::load_config(cli.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    // Validate valuation config at startup
    let valuation_config = config.valuation.clone().unwrap_or_default();
    let engine = match ValuationEngine::from_config(&valuation_config) {
        Ok(engine) => engine,
        Err(ValuationError::Config(errors)) => {
            eprintln!("Valuation config errors:");
            for error in errors {
                eprintln!("  - {}", error);
            }
            std::process::exit(EXIT_CONFIG);
        }
        Err(e) => {
            eprintln!("Config error: {}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    tracing::debug!(
        districts = engine.tables().districts.len(),
        decorations = engine.tables().decoration_scores.len(),
        "valuation engine ready"
    );

    match cli.command {
        Commands::Estimate {
            algorithm,
            property,
        } => {
            let algorithm = match resolve_algorithm(algorithm.as_deref(), &config) {
                Ok(a) => a,
                Err(e) => {
                    eprintln!("{}", e);
                    std::process::exit(EXIT_INPUT);
                }
            };
            let attributes = read_property(&property);
            match engine.estimate_value(&attributes, algorithm) {
                Ok(result) => emit(&property, attributes, vec![result], false),
                Err(e) => {
                    eprintln!("Valuation failed: {}", e);
                    std::process::exit(EXIT_INPUT);
                }
            }
        }
        Commands::Compare { property } => {
            let attributes = read_property(&property);
            match engine.compare(&attributes) {
                Ok(results) => emit(&property, attributes, results, true),
                Err(e) => {
                    eprintln!("Valuation failed: {}", e);
                    std::process::exit(EXIT_INPUT);
                }
            }
        }
        Commands::Init { .. } => unreachable!("init handled before config loading"),
    }

    std::process::exit(EXIT_SUCCESS);
}

fn resolve_algorithm(
    requested: Option<&str>,
    config: &Config,
) -> Result<AlgorithmId, ValuationError> {
    match requested {
        Some(id) => id.parse(),
        None => Ok(config.algorithm()),
    }
}

/// Build validated attributes from the input file and flags, exiting on bad input.
fn read_property(args: &PropertyArgs) -> PropertyAttributes {
    let raw = match args.input {
        Some(ref path) => match input::load_attributes(path) {
            Ok(raw) => raw,
            Err(e) => {
                eprintln!("Input error: {:#}", e);
                std::process::exit(EXIT_INPUT);
            }
        },
        None => RawPropertyAttributes::default(),
    };

    let overrides = AttributeOverrides {
        area: args.area.clone(),
        district: args.district.clone(),
        sub_district: args.sub_district.clone(),
        layout: args.layout.clone(),
        decoration: args.decoration.clone(),
        average_price: args.avg_price.clone(),
    };

    match PropertyAttributes::try_from(overrides.apply(raw)) {
        Ok(attributes) => attributes,
        Err(e) => {
            eprintln!("Input error: {}", e);
            std::process::exit(EXIT_INPUT);
        }
    }
}

fn emit(
    args: &PropertyArgs,
    attributes: PropertyAttributes,
    results: Vec<ValuationResult>,
    comparison: bool,
) {
    let use_colors = output::should_use_colors();

    match args.format {
        OutputFormat::Text if comparison => {
            println!("{}", output::format_property(&attributes));
            println!("{}", output::format_comparison_table(&results, use_colors));
        }
        OutputFormat::Text => {
            for result in &results {
                println!("{}", output::format_result_detail(&attributes, result, use_colors));
            }
        }
        OutputFormat::Tsv => println!("{}", output::format_tsv(&results)),
        OutputFormat::Json => {}
    }

    let report = ValuationReport::new(attributes, results);

    if let OutputFormat::Json = args.format {
        match report.to_json() {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Output error: {:#}", e);
                std::process::exit(EXIT_IO);
            }
        }
    }

    if let Some(ref path) = args.output {
        if let Err(e) = output::write_report(path, &report) {
            eprintln!("Output error: {:#}", e);
            std::process::exit(EXIT_IO);
        }
        tracing::info!(path = %path.display(), "wrote valuation report");
    }
}
