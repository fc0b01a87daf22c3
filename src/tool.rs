//! Command line driver for the chained hash table benchmarks

use std::path::PathBuf;

use chain_hash::Config;
use chain_hash::StoreKind;
use chain_hash::config::DEFAULT_CSV_PATH;
use chain_hash::config::DEFAULT_OP_COUNT;
use chain_hash::config::DEFAULT_RECORD_COUNT;
use chain_hash::records::generate_csv;
use chain_hash::timing::employee_workload;
use chain_hash::timing::int_workload;
use chain_hash::timing::put_get_workload;
use clap::ArgAction;
use clap::CommandFactory;
use clap::Parser;
use clap::Subcommand;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::registry::Registry;

macro_rules! die {
    ($fmt:literal, $($arg:tt)*) => {{
        eprintln!($fmt, $($arg)*);
        std::process::exit(1);
    }};

    ($msg:literal) => {{
        eprintln!($msg);
        std::process::exit(1);
    }};
}

#[allow(unused_imports)]
use tracing::{debug, error, info, trace, warn};

fn init_tracing(quiet: bool, verbose: u8) -> LevelFilter {
    let level_filter = if quiet {
        LevelFilter::ERROR
    } else {
        match verbose {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    };

    // The library logs through the `log` crate.
    if tracing_log::LogTracer::init().is_err() {
        die!("INTERNAL ERROR: setting log tracer failed");
    }

    let env_filter = EnvFilter::builder()
        .with_default_directive(level_filter.into())
        .with_env_var("CHAIN_LOG")
        .from_env_lossy();

    let subscriber = Registry::default().with(env_filter).with(
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .compact(),
    );

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        die!("INTERNAL ERROR: setting default tracing::subscriber failed");
    }

    level_filter
}

/// Benchmarks a fixed-capacity chained hash table against reference maps
#[derive(Parser, Debug)]
#[command(name = "chain-bench")]
#[command(about = "Benchmarks a fixed-capacity chained hash table against reference maps")]
struct ToolArgs {
    /// Suppress all output except for errors. This overrides the -v flag.
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Turn on verbose output. Supply -v multiple times to increase verbosity.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: ToolCommand,
}

#[derive(Subcommand, Debug, Clone)]
enum ToolCommand {
    /// Write a file of random employee salary records
    Generate {
        /// Number of records
        #[arg(short, long, default_value_t = DEFAULT_RECORD_COUNT)]
        count: usize,

        /// Random seed (defaults to OS entropy)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Destination file
        #[arg(default_value = DEFAULT_CSV_PATH)]
        path: PathBuf,
    },

    /// Time loading the record file and raising low salaries, per store
    Employees {
        /// Store to run (repeatable; defaults to all)
        #[arg(long = "store", value_name = "NAME")]
        stores: Vec<StoreKind>,

        /// Records to generate if the file does not exist
        #[arg(short, long, default_value_t = DEFAULT_RECORD_COUNT)]
        count: usize,

        /// Random seed used when generating a missing file
        #[arg(short, long)]
        seed: Option<u64>,

        /// Record file
        #[arg(default_value = DEFAULT_CSV_PATH)]
        path: PathBuf,
    },

    /// Time a batch of puts followed by a batch of gets, per store
    PutGet {
        /// Operations per batch
        #[arg(short, long, default_value_t = DEFAULT_OP_COUNT)]
        ops: usize,

        /// Random seed (defaults to OS entropy)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Store to run (repeatable; defaults to all)
        #[arg(long = "store", value_name = "NAME")]
        stores: Vec<StoreKind>,
    },
}

fn run(command: ToolCommand) -> chain_hash::Result<()> {
    match command {
        ToolCommand::Generate { count, seed, path } => {
            let config = Config::new().record_count(count).seed(seed).csv_path(path);
            generate_csv(&config.csv_path, config.record_count, &mut config.rng())?;
            println!(
                "CSV file has been generated successfully at: {}",
                config.csv_path.display()
            );
        }
        ToolCommand::Employees {
            stores,
            count,
            seed,
            path,
        } => {
            let config = Config::new()
                .record_count(count)
                .seed(seed)
                .csv_path(path)
                .stores(stores);

            if !config.csv_path.exists() {
                warn!(
                    "{} not found, generating {} records",
                    config.csv_path.display(),
                    config.record_count
                );
                generate_csv(&config.csv_path, config.record_count, &mut config.rng())?;
            }

            for kind in &config.stores {
                let mut store = kind.build::<String, f64>();
                let report = employee_workload(&mut *store, &config.csv_path)?;
                debug!(
                    "{}: {} loaded, {} raised",
                    report.name, report.loaded, report.raised
                );
                println!("{report}");
            }
        }
        ToolCommand::PutGet { ops, seed, stores } => {
            let config = Config::new().op_count(ops).seed(seed).stores(stores);
            let (keys, values) = int_workload(config.op_count, &mut config.rng());

            for kind in &config.stores {
                let mut store = kind.build::<u64, u32>();
                let report = put_get_workload(&mut *store, &keys, &values);
                println!("{report}");
                println!("---------------------------------------------");
            }
        }
    }

    Ok(())
}

fn main() {
    let args = ToolArgs::parse();
    let level_filter = init_tracing(args.quiet, args.verbose);

    let cmd = ToolArgs::command();

    info!(
        "starting {} ({} {}), log level: {level_filter}",
        cmd.get_name(),
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );

    if let Err(e) = run(args.command) {
        die!("Error: {}", e);
    }
}
