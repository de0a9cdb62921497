use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use log::info;
use pregnancy_pathways::utils::logging::{log_load, print_receipt_table, print_results_summary};
use pregnancy_pathways::{Catalog, ModelConfig, Parameters, ScenarioRunner};

#[derive(Parser)]
#[command(name = "pregnancy-pathways")]
#[command(about = "Compare family planning, abortion access and post-abortion care scenarios", long_about = None)]
struct Cli {
    /// Parameters JSON file with the baseline and scenarios
    parameters: PathBuf,

    /// Service catalog JSON file (defaults to the built-in catalog)
    #[arg(long, value_name = "FILE")]
    catalog: Option<PathBuf>,

    /// Print the full results as JSON
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Print the service receipt tables of every scenario
    #[arg(long, default_value_t = false)]
    receipts: bool,
}

fn main() -> anyhow::Result<()> {
    // Setup logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Cli::parse();

    log_load("parameters", &args.parameters);
    let params = Parameters::from_json_file(&args.parameters)
        .with_context(|| format!("failed to load {}", args.parameters.display()))?;

    let catalog = match &args.catalog {
        Some(path) => {
            log_load("catalog", path);
            Catalog::from_json_file(path)
                .with_context(|| format!("failed to load catalog {}", path.display()))?
        }
        None => {
            info!("Using the standard service catalog");
            Catalog::standard().context("standard catalog is invalid")?
        }
    };

    let config = ModelConfig::from_env();
    info!("{config}");

    let start = Instant::now();
    let results = ScenarioRunner::new(&catalog)
        .with_config(config)
        .run(&params)
        .context("model run failed")?;

    print_results_summary(&results, start.elapsed());

    if args.receipts {
        for scenario in std::iter::once(&results.baseline).chain(&results.scenarios) {
            println!("\n{} ({}):", scenario.name, scenario.id);
            print_receipt_table(&scenario.facility_receipt);
            print_receipt_table(&scenario.out_of_facility_receipt);
        }
    }

    if args.json {
        println!("{}", results.to_json_pretty()?);
    }

    Ok(())
}
