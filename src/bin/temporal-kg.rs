//! temporal-kg CLI: build temporal knowledge graphs from event files.
//!
//! Usage:
//!   temporal-kg ingest <path> [--export path] [--format graphml|json] [--top-k N]
//!   temporal-kg fabricate [--count N] [--seed S] [--output path]

use clap::builder::TypedValueParser;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use temporal_kg::{
    export, fabricate, load_events, summarize, write_events, ExportFormat, FabricateConfig,
    ProjectionEngine,
};
use tracing::Level;

#[derive(Parser)]
#[command(
    name = "temporal-kg",
    version,
    about = "Temporal knowledge extraction from event streams"
)]
struct Cli {
    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ingest a JSON file of events, build the graph and print a summary
    Ingest {
        /// Path to a JSON array of event records
        path: PathBuf,
        /// Optional export path for the built graph
        #[arg(long)]
        export: Option<PathBuf>,
        /// Export format (defaults from the export file extension)
        #[arg(long, value_enum)]
        format: Option<FormatArg>,
        /// Number of relationships to show in the summary
        #[arg(
            long,
            default_value_t = temporal_kg::DEFAULT_TOP_K,
            value_parser = clap::value_parser!(u16).range(1..).map(usize::from)
        )]
        top_k: usize,
    },
    /// Generate a synthetic dataset to experiment with
    Fabricate {
        /// Number of synthetic events to generate
        #[arg(
            long,
            default_value_t = 20,
            value_parser = clap::value_parser!(u32).range(1..).map(|n| n as usize)
        )]
        count: usize,
        /// Random seed for reproducibility
        #[arg(long)]
        seed: Option<u64>,
        /// Where to write the events
        #[arg(long, default_value = "synthetic-events.json")]
        output: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Graphml,
    Json,
}

impl From<FormatArg> for ExportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Graphml => ExportFormat::GraphMl,
            FormatArg::Json => ExportFormat::Json,
        }
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn cmd_ingest(
    path: &Path,
    export_path: Option<&Path>,
    format: Option<FormatArg>,
    top_k: usize,
) -> i32 {
    let events = match load_events(path) {
        Ok(events) => events,
        Err(e) => {
            eprintln!("Error: cannot load '{}': {}", path.display(), e);
            return 1;
        }
    };

    let mut engine = ProjectionEngine::new();
    engine.ingest(events);
    let graph = engine.build_graph();

    print!("{}", summarize(&graph, top_k));

    if let Some(destination) = export_path {
        let format = format
            .map(ExportFormat::from)
            .unwrap_or_else(|| ExportFormat::from_path(destination));
        if let Err(e) = export(&graph, destination, format) {
            eprintln!("Error: cannot export to '{}': {}", destination.display(), e);
            return 1;
        }
        println!("Graph exported to {}", destination.display());
    }
    0
}

fn cmd_fabricate(count: usize, seed: Option<u64>, output: &Path) -> i32 {
    let mut config = FabricateConfig::new().with_count(count);
    if let Some(seed) = seed {
        config = config.with_seed(seed);
    }

    let records = fabricate(&config);
    match write_events(&records, output) {
        Ok(()) => {
            println!("Synthetic events written to {}", output.display());
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let code = match cli.command {
        Commands::Ingest {
            path,
            export,
            format,
            top_k,
        } => cmd_ingest(&path, export.as_deref(), format, top_k),
        Commands::Fabricate { count, seed, output } => cmd_fabricate(count, seed, &output),
    };
    std::process::exit(code);
}
