use thiserror::Error;
use vectorier_level::VectorierLevelError;
use vectorier_parallax::ParallaxError;
use vectorier_scenegraph::error::SceneGraphError;

#[derive(Error, Debug)]
pub enum VectorierCliError {
    #[error("Level error: {0}")]
    LevelError(#[from] VectorierLevelError),

    #[error("Parallax error: {0}")]
    ParallaxError(#[from] ParallaxError),

    #[error("Scene error: {0}")]
    SceneGraphError(#[from] SceneGraphError),

    #[error("Scene file error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Config file error: {0}")]
    ConfigError(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
