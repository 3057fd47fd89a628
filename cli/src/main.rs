use clap::{Parser, ValueEnum};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use scenegraph_gltf::io::gltf::{encode, Config, ExportFormat, Traversal};
use scenegraph_gltf::io::gltf::encode::JsonOutputMode;
use scenegraph_gltf::io::graph;
use scenegraph_gltf::prelude::ConfigType;

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Gltf,
    Glb,
}

#[derive(Parser)]
#[command(name = "scenegraph-gltf")]
#[command(about = "Converts a JSON scene graph into a glTF 2.0 document")]
struct Cli {
    /// Input scene graph (.json)
    #[arg(short, long)]
    input: PathBuf,

    /// Directory the output file is written to
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// JSON file with the export configuration; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output container
    #[arg(short, long, value_enum)]
    format: Option<Format>,

    /// Attach node metadata to the glTF extras
    #[arg(long)]
    include_metadata: bool,

    /// Follow instance definitions instead of flattening child collections
    #[arg(long)]
    instances: bool,

    /// Bake instance transforms into the vertices (implies --instances)
    #[arg(long)]
    apply_transforms: bool,

    /// Write the JSON part without indentation
    #[arg(long)]
    compact: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let config = build_config(&cli)?;
    let (root, model_name) = graph::load_graph(&cli.input)
        .with_context(|| format!("Failed to load scene graph from {}", cli.input.display()))?;

    if !cli.output_dir.is_dir() {
        anyhow::bail!("Output directory {} does not exist", cli.output_dir.display());
    }

    let path = encode::export(&root, &model_name, &cli.output_dir, &config)
        .context("Failed to export glTF")?;
    log::info!("Exported '{}' to {}", model_name, path.display());

    Ok(())
}

fn build_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => Config::default(),
    };

    if let Some(format) = cli.format {
        config.export_format = match format {
            Format::Gltf => ExportFormat::Gltf,
            Format::Glb => ExportFormat::Glb,
        };
    }
    if cli.include_metadata {
        config.include_metadata = true;
    }
    if cli.instances || cli.apply_transforms {
        config.traversal = Traversal::Instances;
    }
    if cli.apply_transforms {
        config.apply_instance_transforms = true;
    }
    if cli.compact {
        config.json_output_mode = JsonOutputMode::Compact;
    }
    Ok(config)
}

fn load_config(path: &Path) -> Result<Config> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse config file {}", path.display()))
}
