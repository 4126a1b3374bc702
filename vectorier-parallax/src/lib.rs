pub mod config;
pub mod error;
pub mod simulator;

pub use config::{ParallaxConfig, ZoomPreset};
pub use error::ParallaxError;
pub use simulator::{ParallaxGroup, ParallaxSimulator, ParallaxTarget};
