//! Scene module
//!
//! Per-frame visibility: tile culling strategies and their results.

mod culler;
mod visible_tiles;

pub use culler::{TileCuller, BruteForceCuller, FrustumCuller};
pub use visible_tiles::VisibleTiles;
