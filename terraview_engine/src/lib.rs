/*!
# Terraview Engine

Core camera and tile types for the Terraview terrain renderer.

This crate provides the renderer-agnostic pieces of a terrain engine: a
camera with lazily rebuilt frustum planes and planar reflection, and
lazily generated tiles of elements handed to the GPU as strided blocks.
Graphics backends only see the `UniformSink` trait and `IoBlock` views.

## Architecture

- **Camera**: Pose, projection, frustum classification, reflection
- **Tile**: Generic element buffer over a `TileInfo` policy
- **TileCuller**: Per-frame tile visibility from a camera
- **UniformSink**: Destination for the camera matrices

All math is `f64` (glam `DVec3`/`DMat4`); matrices are narrowed to `f32`
only when uploaded.
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod camera;
pub mod renderer;
pub mod scene;
pub mod tile;

// Main terraview namespace module
pub mod terraview {
    // Error types
    pub use crate::error::{Error, Result};

    // Logging entry point
    pub use crate::engine::Engine;

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    // Camera sub-module
    pub mod camera {
        pub use crate::camera::*;
    }

    // Render sub-module
    pub mod render {
        pub use crate::renderer::*;
    }

    // Scene sub-module
    pub mod scene {
        pub use crate::scene::*;
    }

    // Tile sub-module
    pub mod tile {
        pub use crate::tile::*;
    }
}

// Re-export math library at crate root
pub use glam;
