/// Camera and projection utilities
use nalgebra::{Matrix4, Point3, Vector3, Vector4};

use crate::config::{CAMERA_FAR, CAMERA_FOV, CAMERA_NEAR, CAMERA_TARGET};

/// Perspective camera for 3D rendering
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    pub fn new(width: u32, height: u32) -> Self {
        let mut camera = Self {
            position: Point3::new(0.0, 15.0, 35.0),
            target: Point3::from(CAMERA_TARGET),
            up: Vector3::new(0.0, 1.0, 0.0),
            fov: CAMERA_FOV,
            aspect: 1.0,
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
        };
        camera.set_viewport(width, height);
        camera
    }

    /// Recompute the aspect ratio for a new viewport. Nothing else changes.
    /// A zero-sized viewport keeps the previous aspect.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    pub fn look_at(&mut self, position: Point3<f32>, target: Point3<f32>) {
        self.position = position;
        self.target = target;
    }

    /// Create the view matrix (camera transformation)
    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(&self.position, &self.target, &self.up)
    }

    /// Create the projection matrix
    pub fn projection_matrix(&self) -> Matrix4<f32> {
        Matrix4::new_perspective(self.aspect, self.fov, self.near, self.far)
    }

    pub fn view_projection(&self) -> Matrix4<f32> {
        self.projection_matrix() * self.view_matrix()
    }

    /// Project a world-space point to screen space.
    ///
    /// `view_projection` is [`Camera::view_projection`], passed in so callers can
    /// compute it once per frame. Returns `(x, y, depth)` with depth in [-1, 1],
    /// or `None` when the point is behind the camera or off screen.
    pub fn project_to_screen(
        view_projection: &Matrix4<f32>,
        point: &Point3<f32>,
        width: u32,
        height: u32,
    ) -> Option<(f32, f32, f32)> {
        let clip = view_projection * point.to_homogeneous();
        let (x, y, depth) = Self::clip_to_screen(&clip, width, height)?;

        // Clip test
        let on_screen = (0.0..=width as f32).contains(&x)
            && (0.0..=height as f32).contains(&y)
            && (-1.0..=1.0).contains(&depth);
        on_screen.then_some((x, y, depth))
    }

    /// Perspective-divide a clip-space position and map it to screen space
    /// without any bounds test. Rasterizers clamp to the screen themselves.
    pub fn clip_to_screen(clip: &Vector4<f32>, width: u32, height: u32) -> Option<(f32, f32, f32)> {
        // Prevent division by near-zero depth values
        if clip.w < 1e-6 {
            return None;
        }

        let ndc_x = clip.x / clip.w;
        let ndc_y = clip.y / clip.w;
        let depth = clip.z / clip.w;

        // Convert to screen space
        let screen_x = (ndc_x + 1.0) * 0.5 * width as f32;
        let screen_y = (1.0 - ndc_y) * 0.5 * height as f32;

        Some((screen_x, screen_y, depth))
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_creation() {
        let camera = Camera::new(800, 600);
        assert!((camera.aspect - 800.0 / 600.0).abs() < 1e-6);
        assert_eq!(camera.target, Point3::new(0.0, 15.0, 0.0));
    }

    #[test]
    fn test_view_matrix() {
        let camera = Camera::new(800, 600);
        let view = camera.view_matrix();
        // View matrix should be non-zero
        assert!(view.norm() > 0.0);
    }

    #[test]
    fn test_resize_only_touches_aspect() {
        let mut camera = Camera::new(800, 600);
        let before = camera.clone();
        camera.set_viewport(1920, 1080);
        assert!((camera.aspect - 1920.0 / 1080.0).abs() < 1e-6);
        assert_eq!(camera.position, before.position);
        assert_eq!(camera.fov, before.fov);

        camera.set_viewport(0, 0);
        assert!((camera.aspect - 1920.0 / 1080.0).abs() < 1e-6);
    }

    #[test]
    fn test_target_projects_to_centre() {
        let camera = Camera::new(100, 50);
        let vp = camera.view_projection();
        let (x, y, depth) = Camera::project_to_screen(&vp, &camera.target, 100, 50).unwrap();
        assert!((x - 50.0).abs() < 1e-3);
        assert!((y - 25.0).abs() < 1e-3);
        assert!(depth > -1.0 && depth < 1.0);
    }

    #[test]
    fn test_clip_to_screen_skips_bounds_test() {
        let far_left = Vector4::new(-3.0, 0.0, 0.5, 1.0);
        let (x, y, _) = Camera::clip_to_screen(&far_left, 100, 100).unwrap();
        assert!(x < 0.0);
        assert!((y - 50.0).abs() < 1e-6);
        assert!(Camera::clip_to_screen(&Vector4::new(0.0, 0.0, 0.0, 0.0), 100, 100).is_none());
    }

    #[test]
    fn test_point_behind_camera_is_clipped() {
        let camera = Camera::new(100, 100);
        let vp = camera.view_projection();
        let behind = Point3::new(0.0, 15.0, 60.0);
        assert!(Camera::project_to_screen(&vp, &behind, 100, 100).is_none());
    }
}
