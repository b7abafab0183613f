use std::path::PathBuf;

use clap::{Parser, Subcommand};
use env_logger::Env;

use svgr_tools::{commands, OutputFormat};

#[derive(Parser)]
#[command(name = "svgr")]
#[command(about = "SVG-subset rasterizer and inspection tool", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rasterize documents to PNG
    Convert {
        /// SVG files to rasterize (.svgz and .svg.gz are decompressed)
        #[arg(required = true, value_hint = clap::ValueHint::FilePath)]
        inputs: Vec<PathBuf>,

        /// Output path; only valid with a single input
        #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
        output: Option<PathBuf>,
    },

    /// Show canvas size and shape tree
    Info {
        /// SVG file to inspect
        #[arg(value_hint = clap::ValueHint::FilePath)]
        file: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if std::env::var_os("NO_COLOR").is_some() {
        colored::control::set_override(false);
    }

    // RUST_LOG overrides the default level
    let env = Env::default().default_filter_or("warn");
    env_logger::Builder::from_env(env).init();

    match cli.command {
        Commands::Convert { inputs, output } => {
            commands::convert::execute(&inputs, output.as_deref())
        }
        Commands::Info { file, format } => commands::info::execute(&file, format),
    }
}
