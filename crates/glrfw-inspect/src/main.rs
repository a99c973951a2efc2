use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use glrfw::logging::{init_logging, LoggingConfig};
use glrfw::mesh::{parse_stl_with, StlOptions};

/// Loads a binary STL mesh and reports what the render loop would receive.
#[derive(Debug, Parser)]
#[command(name = "glrfw-inspect", version, about)]
struct Args {
    /// Binary STL file to load.
    path: PathBuf,

    /// Recenter the mesh on its mean vertex position.
    #[arg(long)]
    centralize: bool,

    /// Print one of the mesh tables after the summary.
    #[arg(long, value_enum)]
    dump: Option<Dump>,

    /// Log filter in `env_logger` syntax (overrides RUST_LOG).
    #[arg(long)]
    log: Option<String>,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Dump {
    Vertices,
    Triangles,
    Neighbors,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(LoggingConfig {
        env_filter: args.log.clone(),
        ..LoggingConfig::default()
    });

    let options = StlOptions {
        centralize: args.centralize,
    };
    let mesh = parse_stl_with(&args.path, options)
        .with_context(|| format!("failed to load {}", args.path.display()))?;
    log::info!("loaded {}", args.path.display());

    println!("{}", mesh.stats());
    println!(
        "index buffer: {} indices, vertex buffer: {} floats",
        mesh.indices().len(),
        mesh.vertex_data().len()
    );

    match args.dump {
        Some(Dump::Vertices) => print!("{}", mesh.describe_vertices()),
        Some(Dump::Triangles) => print!("{}", mesh.describe_triangles()),
        Some(Dump::Neighbors) => print!("{}", mesh.describe_neighbors()),
        None => {}
    }

    Ok(())
}
