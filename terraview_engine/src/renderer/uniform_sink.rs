/// UniformSink trait - shader program uniform binding

use glam::Mat4;

/// Shader program side of the camera matrix export
///
/// Implemented by the rendering backend's program/pipeline type. The camera
/// calls it once per matrix with the uniform name as key; an unknown name is
/// the implementation's concern and is not reported back.
pub trait UniformSink {
    /// Bind a 4x4 matrix uniform by name
    fn set_uniform_mat4(&mut self, name: &str, value: Mat4);
}
