mod error;

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use log::info;
use serde::de::DeserializeOwned;
use vectorier_level::{build, export_to_path, import_from_path, BuildConfig, ExportMode, ImportOptions};
use vectorier_parallax::{ParallaxConfig, ParallaxSimulator};
use vectorier_scenegraph::error::SceneGraphError;
use vectorier_scenegraph::SceneGraph;

use crate::error::VectorierCliError;

/// Vectorier CLI for converting scenes to and from level documents
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Export a scene file to a level or objects document
    Export {
        /// Scene file (JSON)
        #[arg(short, long)]
        scene: PathBuf,

        /// Document layout to write
        #[arg(short, long, default_value = "level")]
        mode: ExportMode,

        /// Output document. An existing file is used as template.
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Import a level or objects document into a scene file
    Import {
        /// Document to read
        #[arg(short, long)]
        input: PathBuf,

        /// Scene file to write (JSON). An existing scene is extended.
        #[arg(short, long)]
        output: PathBuf,

        /// Name of the node the imported elements are placed under
        #[arg(long)]
        root_name: Option<String>,

        /// Remove the kind of nodes nested in imported containers
        #[arg(long)]
        untag_children: bool,
    },

    /// Build a level from a build config and a scene file
    Build {
        /// Build config (TOML)
        #[arg(short, long)]
        config: PathBuf,

        /// Scene file (JSON)
        #[arg(short, long)]
        scene: PathBuf,
    },

    /// Apply the parallax preview to a scene and report the depth groups
    Parallax {
        /// Scene file (JSON)
        #[arg(short, long)]
        scene: PathBuf,

        /// Name of the camera node
        #[arg(long, default_value = "Camera")]
        camera: String,

        /// Zoom level, overrides the config
        #[arg(short, long)]
        zoom: Option<f32>,

        /// Parallax config (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Write the previewed scene to this file (JSON)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn read_toml<T: DeserializeOwned>(path: &Path) -> Result<T, VectorierCliError> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

fn read_scene(path: &Path) -> Result<SceneGraph, VectorierCliError> {
    let content = fs::read_to_string(path)?;
    let graph: SceneGraph = serde_json::from_str(&content)?;
    graph.validate()?;
    Ok(graph)
}

fn write_scene(graph: &SceneGraph, path: &Path) -> Result<(), VectorierCliError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, serde_json::to_string_pretty(graph)?)?;
    info!("Saved scene to {}", path.display());
    Ok(())
}

fn run_import(
    input: &Path,
    output: &Path,
    root_name: Option<String>,
    untag_children: bool,
) -> Result<(), VectorierCliError> {
    let mut graph = if output.exists() {
        read_scene(output)?
    } else {
        SceneGraph::new()
    };

    let root_name = root_name.unwrap_or_else(|| {
        input
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| ImportOptions::default().root_name)
    });
    let options = ImportOptions {
        root_name,
        untag_children,
    };
    import_from_path(&mut graph, input, &options)?;
    write_scene(&graph, output)
}

fn run_parallax(
    scene: &Path,
    camera: &str,
    zoom: Option<f32>,
    config: Option<PathBuf>,
    output: Option<PathBuf>,
) -> Result<(), VectorierCliError> {
    let mut graph = read_scene(scene)?;
    let mut config: ParallaxConfig = match config {
        Some(path) => read_toml(&path)?,
        None => ParallaxConfig::default(),
    };
    if let Some(zoom) = zoom {
        config.zoom = zoom;
    }
    let camera_id = graph
        .find_by_name(camera)
        .ok_or_else(|| SceneGraphError::NodeNotFound(camera.to_string()))?;

    let mut simulator = ParallaxSimulator::new(config);
    simulator.activate(&mut graph, camera_id)?;
    println!(
        "zoom {} (orthographic size {})",
        simulator.config().zoom,
        simulator.config().orthographic_size()
    );
    for group in simulator.groups() {
        let members = simulator
            .targets()
            .iter()
            .filter(|target| target.factor == group.factor)
            .count();
        println!(
            "factor {:>5}: scale {:>4}, offset ({}, {}), {} nodes",
            group.factor, group.frame_scale, group.offset[0], group.offset[1], members
        );
    }

    if let Some(output) = output {
        write_scene(&graph, &output)?;
    }
    simulator.deactivate(&mut graph)?;
    Ok(())
}

fn main() -> Result<(), VectorierCliError> {
    // Setup logger
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Export { scene, mode, output } => {
            let graph = read_scene(&scene)?;
            export_to_path(&graph, mode, &output)?;
            Ok(())
        }
        Commands::Import {
            input,
            output,
            root_name,
            untag_children,
        } => run_import(&input, &output, root_name, untag_children),
        Commands::Build { config, scene } => {
            let config: BuildConfig = read_toml(&config)?;
            let graph = read_scene(&scene)?;
            let path = build(&config, &graph)?;
            println!("{}", path.display());
            Ok(())
        }
        Commands::Parallax {
            scene,
            camera,
            zoom,
            config,
            output,
        } => run_parallax(&scene, &camera, zoom, config, output),
    }
}
