/// Camera - pose, projection and cached view frustum.
///
/// All state changes go through the camera's own operations. The view and
/// projection matrices are rebuilt eagerly by each setter; the frustum planes
/// are rebuilt lazily on the next visibility query (`dirty` flag), so a burst
/// of setters in one frame costs a single plane rebuild.

use glam::{DMat4, DQuat, DVec3, DVec4};
use crate::error::Result;
use crate::engine_bail;
use crate::renderer::UniformSink;
use super::bounding_box::BoundingBox;
use super::frustum::{Cullable, Frustum};

/// Uniform names bound by `Camera::upload_uniforms`
pub const UNIFORM_MODEL_VIEW: &str = "uMVMatrix";
pub const UNIFORM_PROJECTION: &str = "uPMatrix";
pub const UNIFORM_NORMAL: &str = "uNMatrix";

/// Initial pose and perspective for `Camera::with_config`.
#[derive(Debug, Clone)]
pub struct CameraConfig {
    pub eye: DVec3,
    pub center: DVec3,
    pub up: DVec3,
    /// Vertical field of view in degrees
    pub fovy: f64,
    /// Width / height
    pub aspect: f64,
    pub near: f64,
    pub far: f64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            eye: DVec3::ZERO,
            center: DVec3::NEG_Z,
            up: DVec3::Y,
            fovy: 60.0,
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

/// Off-axis perspective camera with a lazily rebuilt frustum.
#[derive(Debug, Clone)]
pub struct Camera {
    name: String,

    eye: DVec3,
    center: DVec3,
    up: DVec3,
    /// Always `center - eye`
    look: DVec3,

    left: f64,
    right: f64,
    bottom: f64,
    top: f64,
    near: f64,
    far: f64,

    view_matrix: DMat4,
    projection_matrix: DMat4,
    normal_matrix: DMat4,

    frustum: Frustum,
    dirty: bool,
}

impl Camera {
    /// Create a camera with identity matrices.
    ///
    /// The pose (eye at the origin looking down -Z, up +Y) is the one an
    /// identity view matrix describes. Frustum bounds default to a 90° unit
    /// frustum, but the projection stays identity until a projection setter
    /// is called.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            eye: DVec3::ZERO,
            center: DVec3::NEG_Z,
            up: DVec3::Y,
            look: DVec3::NEG_Z,
            left: -1.0,
            right: 1.0,
            bottom: -1.0,
            top: 1.0,
            near: 1.0,
            far: 100.0,
            view_matrix: DMat4::IDENTITY,
            projection_matrix: DMat4::IDENTITY,
            normal_matrix: DMat4::IDENTITY,
            frustum: Frustum::default(),
            dirty: true,
        }
    }

    /// Create a camera from a validated configuration.
    ///
    /// # Errors
    ///
    /// `Error::InvalidConfig` if the perspective or pose is degenerate.
    pub fn with_config(name: impl Into<String>, config: &CameraConfig) -> Result<Self> {
        const SOURCE: &str = "terraview::Camera";
        if !(config.near > 0.0) {
            engine_bail!(SOURCE, InvalidConfig => "near must be positive, got {}", config.near);
        }
        if !(config.far > config.near) {
            engine_bail!(SOURCE, InvalidConfig =>
                "far ({}) must be greater than near ({})", config.far, config.near);
        }
        if !(config.fovy > 0.0 && config.fovy < 180.0) {
            engine_bail!(SOURCE, InvalidConfig => "fovy must be in (0, 180) degrees, got {}", config.fovy);
        }
        if !(config.aspect > 0.0) {
            engine_bail!(SOURCE, InvalidConfig => "aspect must be positive, got {}", config.aspect);
        }
        let look = config.center - config.eye;
        if look.length_squared() == 0.0 || look.cross(config.up).length_squared() == 0.0 {
            engine_bail!(SOURCE, InvalidConfig =>
                "eye {:?}, center {:?} and up {:?} do not define a view direction",
                config.eye, config.center, config.up);
        }

        let mut camera = Self::new(name);
        camera.look_at(config.eye, config.center, config.up);
        camera.set_perspective(config.fovy, config.aspect, config.near, config.far);
        Ok(camera)
    }

    // ===== GETTERS =====

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Eye position.
    pub fn position(&self) -> DVec3 {
        self.eye
    }

    pub fn eye(&self) -> DVec3 {
        self.eye
    }

    pub fn center(&self) -> DVec3 {
        self.center
    }

    /// Unit up vector.
    pub fn up(&self) -> DVec3 {
        self.up
    }

    /// Un-normalized view direction, `center - eye`.
    pub fn look(&self) -> DVec3 {
        self.look
    }

    pub fn left(&self) -> f64 {
        self.left
    }

    pub fn right(&self) -> f64 {
        self.right
    }

    pub fn bottom(&self) -> f64 {
        self.bottom
    }

    pub fn top(&self) -> f64 {
        self.top
    }

    pub fn near(&self) -> f64 {
        self.near
    }

    pub fn far(&self) -> f64 {
        self.far
    }

    /// Vertical field of view in degrees, derived from the current bounds.
    pub fn fovy(&self) -> f64 {
        (2.0 * (0.5 * (self.top - self.bottom) / self.near).atan()).to_degrees()
    }

    pub fn aspect(&self) -> f64 {
        (self.right - self.left) / (self.top - self.bottom)
    }

    pub fn view_matrix(&self) -> &DMat4 {
        &self.view_matrix
    }

    pub fn projection_matrix(&self) -> &DMat4 {
        &self.projection_matrix
    }

    /// Object normal matrix. The camera carries no model transform, so this
    /// stays identity.
    pub fn normal_matrix(&self) -> &DMat4 {
        &self.normal_matrix
    }

    /// Combined view-projection matrix (projection * view).
    pub fn view_projection_matrix(&self) -> DMat4 {
        self.projection_matrix * self.view_matrix
    }

    /// Whether the cached frustum planes are stale.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Frustum planes, rebuilt first if stale.
    pub fn frustum(&mut self) -> &Frustum {
        if self.dirty {
            self.update_frustum();
        }
        &self.frustum
    }

    // ===== POSE =====

    /// Set the whole pose. Every other pose operation ends up here or
    /// mirrors its bookkeeping.
    pub fn look_at(&mut self, eye: DVec3, center: DVec3, up: DVec3) {
        self.eye = eye;
        self.center = center;
        self.up = up.normalize();
        self.look = center - eye;
        self.rebuild_view();
    }

    pub fn set_eye(&mut self, eye: DVec3) {
        self.look_at(eye, self.center, self.up);
    }

    pub fn set_center(&mut self, center: DVec3) {
        self.look_at(self.eye, center, self.up);
    }

    pub fn set_up(&mut self, up: DVec3) {
        self.look_at(self.eye, self.center, up);
    }

    /// Translate eye and center together along the view direction.
    pub fn move_forward(&mut self, distance: f64) {
        let diff = self.look.normalize() * distance;
        self.eye += diff;
        self.center += diff;
        self.rebuild_view();
    }

    pub fn move_backward(&mut self, distance: f64) {
        self.move_forward(-distance);
    }

    /// Move the eye in the camera's local frame: x along right, y along up,
    /// z along back (away from the target).
    ///
    /// The center stays where it is, so the eye orbits/strafes around the
    /// target and the eye-to-center distance changes. Use `move_forward` to
    /// translate the whole rig.
    pub fn move_by(&mut self, daxes: DVec3) {
        let right = self.look.cross(self.up).normalize();
        let up = self.up.normalize();
        let back = -self.look.normalize();

        let deye = daxes.x * right + daxes.y * up + daxes.z * back;
        self.set_eye(self.position() + deye);
    }

    /// Rotate look and up by `angle` degrees around `axis`, eye fixed.
    pub fn turn_left(&mut self, angle: f64, axis: DVec3) {
        self.rotate_view(angle, axis);
    }

    pub fn turn_right(&mut self, angle: f64, axis: DVec3) {
        self.turn_left(-angle, axis);
    }

    /// Pitch by `angle` degrees around the camera's right axis, eye fixed.
    pub fn look_up(&mut self, angle: f64) {
        let axis = self.look.cross(self.up);
        self.rotate_view(angle, axis);
    }

    pub fn look_down(&mut self, angle: f64) {
        self.look_up(-angle);
    }

    fn rotate_view(&mut self, angle: f64, axis: DVec3) {
        let q = DQuat::from_axis_angle(axis.normalize(), angle.to_radians());
        self.look = q * self.look;
        self.up = (q * self.up).normalize();
        self.center = self.eye + self.look;
        self.rebuild_view();
    }

    fn rebuild_view(&mut self) {
        self.view_matrix = DMat4::look_at_rh(self.eye, self.center, self.up);
        self.dirty = true;
    }

    // ===== PROJECTION =====

    pub fn set_left(&mut self, left: f64) {
        self.left = left;
        self.rebuild_projection();
    }

    pub fn set_right(&mut self, right: f64) {
        self.right = right;
        self.rebuild_projection();
    }

    pub fn set_bottom(&mut self, bottom: f64) {
        self.bottom = bottom;
        self.rebuild_projection();
    }

    pub fn set_top(&mut self, top: f64) {
        self.top = top;
        self.rebuild_projection();
    }

    pub fn set_near(&mut self, near: f64) {
        self.near = near;
        self.rebuild_projection();
    }

    pub fn set_far(&mut self, far: f64) {
        self.far = far;
        self.rebuild_projection();
    }

    /// Set all six bounds with a single projection rebuild.
    pub fn set_frustum(&mut self, left: f64, right: f64, bottom: f64, top: f64, near: f64, far: f64) {
        self.left = left;
        self.right = right;
        self.bottom = bottom;
        self.top = top;
        self.near = near;
        self.far = far;
        self.rebuild_projection();
    }

    /// Symmetric frustum from a vertical field of view in degrees.
    pub fn set_perspective(&mut self, fovy: f64, aspect: f64, z_near: f64, z_far: f64) {
        let half_height = z_near * (fovy * 0.5).to_radians().tan();
        let half_width = half_height * aspect;
        self.set_frustum(-half_width, half_width, -half_height, half_height, z_near, z_far);
    }

    /// Change the vertical field of view, keeping aspect, near and far.
    pub fn set_fov(&mut self, fov: f64) {
        self.set_perspective(fov, self.aspect(), self.near, self.far);
    }

    /// Change the aspect ratio, keeping vertical field of view, near and far.
    pub fn set_aspect(&mut self, aspect: f64) {
        self.set_perspective(self.fovy(), aspect, self.near, self.far);
    }

    fn rebuild_projection(&mut self) {
        self.projection_matrix = frustum_matrix(
            self.left, self.right, self.bottom, self.top, self.near, self.far,
        );
        self.dirty = true;
    }

    // ===== VISIBILITY =====

    /// Classify a world-space box against the view frustum.
    pub fn is_cullable(&mut self, bbox: &BoundingBox) -> Cullable {
        self.frustum().classify(bbox)
    }

    /// Rebuild the six planes from the current pose and bounds.
    pub fn update_frustum(&mut self) {
        let dir = self.look.normalize();
        let base_x = dir.cross(self.up).normalize();
        let base_y = base_x.cross(dir);

        let near_center = self.eye + dir * self.near;
        let near_corner = |x: f64, y: f64| near_center + x * base_x + y * base_y;
        let scale = self.far / self.near;
        let far_center = self.eye + dir * self.far;
        let far_corner = |x: f64, y: f64| far_center + scale * (x * base_x + y * base_y);

        let (l, r, b, t) = (self.left, self.right, self.bottom, self.top);
        let corners = [
            near_corner(r, t), near_corner(l, t), near_corner(l, b), near_corner(r, b),
            far_corner(r, t), far_corner(l, t), far_corner(l, b), far_corner(r, b),
        ];

        self.frustum = Frustum::from_corners(&corners, dir);
        self.dirty = false;

        crate::engine_trace!("terraview::Camera", "'{}' frustum rebuilt", self.name);
    }

    // ===== REFLECTION =====

    /// Mirror this camera across the plane `ax + by + cz + d = 0` into `out`.
    ///
    /// Eye and center are reflected; the new up is rebuilt from this
    /// camera's right axis so the mirrored view keeps a consistent roll.
    ///
    /// # Errors
    ///
    /// `Error::InvalidPlane` if `a`, `b` and `c` are all zero. `out` is left
    /// untouched in that case.
    pub fn reflect_camera(&self, plane: DVec4, out: &mut Camera) -> Result<()> {
        let (a, b, c, d) = (plane.x, plane.y, plane.z, plane.w);
        let point = if a != 0.0 {
            DVec3::new(-d / a, 0.0, 0.0)
        } else if b != 0.0 {
            DVec3::new(0.0, -d / b, 0.0)
        } else if c != 0.0 {
            DVec3::new(0.0, 0.0, -d / c)
        } else {
            engine_bail!("terraview::Camera", InvalidPlane =>
                "cannot reflect '{}' across {:?}: plane normal is zero", self.name, plane);
        };

        let plane_normal = DVec3::new(a, b, c).normalize();
        let reflect = |p: DVec3| {
            let dist = (p - point).dot(plane_normal);
            let normal = if dist >= 0.0 { -plane_normal } else { plane_normal };
            p + normal * 2.0 * dist.abs()
        };

        let base_x = self.look.normalize().cross(self.up).normalize();
        let new_eye = reflect(self.eye);
        let new_center = reflect(self.center);
        let new_up = base_x.cross(new_center - new_eye).normalize();

        out.look_at(new_eye, new_center, new_up);
        Ok(())
    }

    // ===== EXPORT =====

    /// Bind view, projection and normal matrices under their uniform names.
    pub fn upload_uniforms(&self, sink: &mut dyn UniformSink) {
        sink.set_uniform_mat4(UNIFORM_MODEL_VIEW, self.view_matrix.as_mat4());
        sink.set_uniform_mat4(UNIFORM_PROJECTION, self.projection_matrix.as_mat4());
        sink.set_uniform_mat4(UNIFORM_NORMAL, self.normal_matrix.as_mat4());
    }
}

/// OpenGL `glFrustum` off-axis perspective matrix.
fn frustum_matrix(left: f64, right: f64, bottom: f64, top: f64, near: f64, far: f64) -> DMat4 {
    let width = right - left;
    let height = top - bottom;
    let depth = far - near;
    DMat4::from_cols(
        DVec4::new(2.0 * near / width, 0.0, 0.0, 0.0),
        DVec4::new(0.0, 2.0 * near / height, 0.0, 0.0),
        DVec4::new((right + left) / width, (top + bottom) / height, -(far + near) / depth, -1.0),
        DVec4::new(0.0, 0.0, -2.0 * far * near / depth, 0.0),
    )
}

#[cfg(test)]
#[path = "camera_tests.rs"]
mod tests;
