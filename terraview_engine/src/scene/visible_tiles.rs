/// VisibleTiles - result of tile culling.
///
/// Holds a snapshot of the camera at culling time and the indices (into the
/// bounds slice given to the culler) of the tiles that survived, split by
/// whether they cross the frustum boundary.
///
/// Ephemeral: lives for one frame.

use crate::camera::Camera;

#[derive(Debug, Clone)]
pub struct VisibleTiles {
    camera: Camera,
    fully_visible: Vec<usize>,
    partially_visible: Vec<usize>,
}

impl VisibleTiles {
    pub(crate) fn new(camera: Camera, fully_visible: Vec<usize>, partially_visible: Vec<usize>) -> Self {
        Self {
            camera,
            fully_visible,
            partially_visible,
        }
    }

    /// Camera snapshot at the time of culling.
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Tiles entirely inside the frustum.
    pub fn fully_visible(&self) -> &[usize] {
        &self.fully_visible
    }

    /// Tiles crossing at least one frustum plane.
    pub fn partially_visible(&self) -> &[usize] {
        &self.partially_visible
    }

    pub fn visible_count(&self) -> usize {
        self.fully_visible.len() + self.partially_visible.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visible_count() == 0
    }

    /// All visible tile indices, fully visible ones first.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.fully_visible.iter().chain(&self.partially_visible).copied()
    }
}

#[cfg(test)]
#[path = "visible_tiles_tests.rs"]
mod tests;
