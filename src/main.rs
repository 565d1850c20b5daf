use anyhow::Result;
use clap::{Parser, Subcommand};
use return_boundary::adapters::manifest::{DEFAULT_COUNT, DEFAULT_SEED, DEFAULT_SOT_ID};
use return_boundary::app::engine::AnalysisEngine;
use return_boundary::cli;
use return_boundary::server::{http, mcp::RbMcpServer};
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "rbtool")]
#[command(about = "Trace value provenance and return boundaries in a code-property graph", long_about = None)]
struct Cli {
    /// Path to the graph JSON document
    graph: PathBuf,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print node/edge counts per kind
    Summary,

    /// Print a single node as JSON
    Node { id: String },

    /// List every reader of a value
    Consumers { value: String },

    /// Show a method's return slot and its producers
    Returns { method: String },

    /// Classify a method's return pattern
    Classify { method: String },

    /// Find locals assigned from call results whose callee is tracked
    Cases {
        /// Maximum number of callee groups to print
        #[arg(long)]
        limit: Option<usize>,

        /// Output as JSON instead of formatted text
        #[arg(long)]
        json: bool,
    },

    /// Walk a value back to the origin of its content
    Trace { value: String },

    /// Dump a node with its incoming and outgoing edges
    Inspect { id: String },

    /// List methods without a return value that are still called
    VoidMethods,

    /// Generate a seeded regression-case manifest
    Manifest {
        #[arg(long, default_value_t = DEFAULT_SEED)]
        seed: u64,

        /// Symbols sampled per kind
        #[arg(long, default_value_t = DEFAULT_COUNT)]
        count: usize,

        #[arg(long, default_value = DEFAULT_SOT_ID)]
        sot_id: String,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Serve the query API over HTTP
    Serve {
        #[arg(short, long, default_value_t = 8118)]
        port: u16,
    },

    /// Serve the query API as MCP tools over stdio
    Mcp,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(filter)
        .init();

    let engine = AnalysisEngine::load_from_json(&cli.graph)?;

    match cli.command {
        Commands::Summary => cli::display_summary(&engine),
        Commands::Node { id } => cli::display_node(&engine, &id),
        Commands::Consumers { value } => cli::display_consumers(&engine, &value),
        Commands::Returns { method } => cli::display_returns(&engine, &method),
        Commands::Classify { method } => cli::display_classification(&engine, &method),
        Commands::Cases { limit, json } => cli::display_cases(&engine, limit, json),
        Commands::Trace { value } => cli::display_trace(&engine, &value),
        Commands::Inspect { id } => cli::display_inspect(&engine, &id),
        Commands::VoidMethods => cli::display_void_methods(&engine),
        Commands::Manifest {
            seed,
            count,
            sot_id,
            output,
        } => cli::write_manifest(&engine, seed, count, &sot_id, output.as_deref()),
        Commands::Serve { port } => {
            let addr = SocketAddr::from(([127, 0, 0, 1], port));
            tracing::info!("Listening on http://{addr}");
            http::serve(engine, addr).await
        }
        Commands::Mcp => RbMcpServer::new(engine).serve_stdio().await,
    }
}
