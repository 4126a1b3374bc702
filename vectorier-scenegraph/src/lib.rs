pub mod components;
pub mod dynamic;
pub mod error;
pub mod layers;
pub mod node;
pub mod scene_graph;

pub use node::{NodeId, NodeKind, SceneNode};
pub use scene_graph::{Placement, SceneGraph};
