use anyhow::Result;
use clap::Parser;
use epoi_converter::cli::RootArgs;
use epoi_converter::workflow::{run_conversion, run_dry};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = RootArgs::parse();
    init_tracing(args.verbose);

    let report = if args.dry_run {
        run_dry(&args.input_dir)?
    } else {
        run_conversion(&args.input_dir, &args.output_dir)?
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if args.dry_run {
        for (from, to) in report.mapping.iter() {
            println!("{from} -> {to}");
        }
    } else {
        println!("finished: ok!");
    }
    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
