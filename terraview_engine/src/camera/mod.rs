//! Camera module - pose, projection, frustum and bounding boxes.
//!
//! The engine does NOT store or manage cameras. They are values owned
//! and driven by the caller (typically one main camera plus one mirrored
//! camera per reflective plane).

mod bounding_box;
mod camera;
mod frustum;

pub use bounding_box::BoundingBox;
pub use camera::{
    Camera, CameraConfig,
    UNIFORM_MODEL_VIEW, UNIFORM_PROJECTION, UNIFORM_NORMAL,
};
pub use frustum::{
    Cullable, Frustum, FrustumPlane,
    PLANE_NEAR, PLANE_FAR, PLANE_LEFT, PLANE_RIGHT, PLANE_TOP, PLANE_BOTTOM,
};
