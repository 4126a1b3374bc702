use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use vectorier_document::{Document, DocumentElement};
use vectorier_scenegraph::components::SelectionVariant;
use vectorier_scenegraph::SceneGraph;

use crate::error::VectorierLevelError;
use crate::export::{export_document, ExportMode};

/// Sub-directory of the XML directory that built documents are written to
pub const LEVEL_XML_DIRECTORY: &str = "level_xml";

/// Settings of a level or object set build
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    pub export_type: ExportMode,
    pub xml_directory: PathBuf,
    pub level_name: String,
    pub city_sets: Vec<String>,
    pub ground_sets: Vec<String>,
    pub library_sets: Vec<String>,
    pub music_name: String,
    pub music_volume: f32,
    /// Raw `Model` elements for the common mode
    pub common_mode_models: String,
    /// Raw `Model` elements for the hunter mode
    pub hunter_mode_models: String,
    pub coin_value: i32,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            export_type: ExportMode::Level,
            xml_directory: PathBuf::from("XML"),
            level_name: String::new(),
            city_sets: Vec::new(),
            ground_sets: Vec::new(),
            library_sets: Vec::new(),
            music_name: String::new(),
            music_volume: 0.3,
            common_mode_models: String::new(),
            hunter_mode_models: String::new(),
            coin_value: 0,
        }
    }
}

impl BuildConfig {
    /// Level name, or the placeholder for the export type
    pub fn output_name(&self) -> &str {
        if !self.level_name.is_empty() {
            return &self.level_name;
        }
        let placeholder = match self.export_type {
            ExportMode::Level => "UnnamedLevel",
            ExportMode::Objects => "UnnamedObjectSet",
        };
        warn!("Level name is empty, using `{placeholder}`");
        placeholder
    }

    /// `<xml_directory>/level_xml/<name>.xml`. Names that would leave that
    /// directory are rejected.
    pub fn output_path(&self) -> Result<PathBuf, VectorierLevelError> {
        let name = self.output_name();
        if name.contains(['/', '\\']) || name == "." || name == ".." {
            return Err(VectorierLevelError::InputError(format!(
                "level name `{name}` must be a plain file name"
            )));
        }
        Ok(self
            .xml_directory
            .join(LEVEL_XML_DIRECTORY)
            .join(format!("{name}.xml")))
    }
}

/// `Root` with the `Sets` the config references
pub fn objects_template(config: &BuildConfig) -> Document {
    let mut document = Document::create("Root");
    write_sets(config, document.root_mut());
    document
}

/// Objects template plus music, models and coins
pub fn level_template(config: &BuildConfig) -> Result<Document, VectorierLevelError> {
    let mut document = objects_template(config);
    let root = document.root_mut();

    if !config.music_name.is_empty() {
        root.add_child("Music")
            .set_attribute("Name", &config.music_name)
            .set_attribute("Volume", config.music_volume);
    }

    for (variant, models) in [
        (SelectionVariant::CommonMode, &config.common_mode_models),
        (SelectionVariant::HunterMode, &config.hunter_mode_models),
    ] {
        if models.trim().is_empty() {
            continue;
        }
        let element = root.add_child("Models");
        element
            .set_attribute("Choice", "AITriggers")
            .set_attribute("Variant", variant.to_string());
        for model in DocumentElement::parse_fragment(models)? {
            element.push_child(model);
        }
    }

    if config.coin_value > 0 {
        root.add_child("Coins").set_attribute("Value", config.coin_value);
        root.add_child("Objects").set_attribute("Name", "Money");
    }
    Ok(document)
}

fn write_sets(config: &BuildConfig, root: &mut DocumentElement) {
    let sets = root.add_child("Sets");
    for (tag, files) in [
        ("City", &config.city_sets),
        ("Ground", &config.ground_sets),
        ("Library", &config.library_sets),
    ] {
        for file in files.iter().filter(|file| !file.is_empty()) {
            sets.add_child(tag).set_attribute("FileName", file);
        }
    }
}

/// Builds the template for `config`, exports `graph` into it and saves the
/// result under `<xml_directory>/level_xml`. Returns the written path.
#[tracing::instrument(skip_all)]
pub fn build(config: &BuildConfig, graph: &SceneGraph) -> Result<PathBuf, VectorierLevelError> {
    let path = config.output_path()?;
    let template = match config.export_type {
        ExportMode::Level => level_template(config)?,
        ExportMode::Objects => objects_template(config),
    };

    let mut document = export_document(graph, config.export_type, Some(template))?;
    document.remove_empty_elements();

    ensure_directory(path.parent())?;
    document.save(&path)?;

    info!("Build completed: {}", path.display());
    Ok(path)
}

fn ensure_directory(directory: Option<&Path>) -> Result<(), VectorierLevelError> {
    if let Some(directory) = directory.filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(directory)?;
    }
    Ok(())
}
