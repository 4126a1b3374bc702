pub mod affine;
pub mod bounds;
pub mod units;

pub use affine::{affine_for_sprite, compute_affine, decompose_affine, AffineInput, AffineMatrixData};
pub use bounds::{combined_child_bounds, sprite_world_bounds};
