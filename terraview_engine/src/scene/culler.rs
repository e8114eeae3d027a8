/// Tile culling strategies.
///
/// A TileCuller determines which tiles are visible from a camera, given
/// one world-space bounding box per tile. Implementations range from
/// brute-force (keep all) to per-box frustum classification.

use crate::camera::{BoundingBox, Camera, Cullable};
use crate::engine_trace;
use super::visible_tiles::VisibleTiles;

/// Strategy for determining visible tiles from a camera.
///
/// Called once per frame before uploading tile blocks. The camera is taken
/// mutably because its frustum is rebuilt lazily on first query.
///
/// `&mut self` allows stateful implementations (e.g. caching)
/// to maintain state across frames.
pub trait TileCuller: Send + Sync {
    /// Cull the tile bounds against the camera and return the visible ones.
    fn cull(&mut self, camera: &mut Camera, bounds: &[BoundingBox]) -> VisibleTiles;
}

/// Brute-force culler: keeps ALL tiles, without testing them.
///
/// Every tile is reported as partially visible since nothing is known
/// about its position relative to the frustum.
#[derive(Debug, Default)]
pub struct BruteForceCuller;

impl BruteForceCuller {
    pub fn new() -> Self {
        Self
    }
}

impl TileCuller for BruteForceCuller {
    fn cull(&mut self, camera: &mut Camera, bounds: &[BoundingBox]) -> VisibleTiles {
        VisibleTiles::new(camera.clone(), Vec::new(), (0..bounds.len()).collect())
    }
}

/// Frustum culler: classifies each tile box against the camera frustum.
///
/// O(n) in the number of tiles. Totally cullable tiles are dropped.
#[derive(Debug, Default)]
pub struct FrustumCuller;

impl FrustumCuller {
    pub fn new() -> Self {
        Self
    }
}

impl TileCuller for FrustumCuller {
    fn cull(&mut self, camera: &mut Camera, bounds: &[BoundingBox]) -> VisibleTiles {
        let mut fully_visible = Vec::new();
        let mut partially_visible = Vec::new();

        for (index, bbox) in bounds.iter().enumerate() {
            match camera.is_cullable(bbox) {
                Cullable::NotCullable => fully_visible.push(index),
                Cullable::PartiallyCullable => partially_visible.push(index),
                Cullable::TotallyCullable => {}
            }
        }

        engine_trace!("terraview::TileCuller",
            "Camera '{}': {} tiles, {} fully visible, {} partially visible",
            camera.name(), bounds.len(), fully_visible.len(), partially_visible.len());

        VisibleTiles::new(camera.clone(), fully_visible, partially_visible)
    }
}

#[cfg(test)]
#[path = "culler_tests.rs"]
mod tests;
