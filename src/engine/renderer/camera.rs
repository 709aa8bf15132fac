// Camera and viewport for 2D rendering

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2};

/// Fixed 2D camera
///
/// The view is centered on the middle of the window so that world (0, 0)
/// lands on the bottom-left corner and one world unit is one pixel.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Camera position in world space
    position: Vec2,
    /// Viewport width
    viewport_width: f32,
    /// Viewport height
    viewport_height: f32,
    /// View-projection matrix
    view_proj: Mat4,
}

impl Camera {
    /// Create a camera for a viewport of the given size
    pub fn new(viewport_width: f32, viewport_height: f32) -> Self {
        let mut camera = Self {
            position: Vec2::ZERO,
            viewport_width,
            viewport_height,
            view_proj: Mat4::IDENTITY,
        };
        camera.recenter();
        camera
    }

    fn recenter(&mut self) {
        self.position = Vec2::new(self.viewport_width / 2.0, self.viewport_height / 2.0);
        self.update_view_proj();
    }

    /// Update the view-projection matrix
    fn update_view_proj(&mut self) {
        let half_width = self.viewport_width / 2.0;
        let half_height = self.viewport_height / 2.0;

        self.view_proj = Mat4::orthographic_rh(
            self.position.x - half_width,
            self.position.x + half_width,
            self.position.y - half_height,
            self.position.y + half_height,
            -100.0, // Near plane
            100.0,  // Far plane
        );
    }

    /// Resize the viewport, keeping the origin at the bottom-left corner
    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport_width = width;
        self.viewport_height = height;
        self.recenter();
    }

    /// Get the view-projection matrix
    pub fn view_proj_matrix(&self) -> Mat4 {
        self.view_proj
    }

    /// Convert screen coordinates (pixels, y down) to world coordinates
    #[allow(dead_code)]
    pub fn screen_to_world(&self, screen_pos: Vec2) -> Vec2 {
        let normalized_x = (screen_pos.x / self.viewport_width) * 2.0 - 1.0;
        let normalized_y = 1.0 - (screen_pos.y / self.viewport_height) * 2.0;

        Vec2::new(
            self.position.x + normalized_x * self.viewport_width / 2.0,
            self.position.y + normalized_y * self.viewport_height / 2.0,
        )
    }

    /// Convert world coordinates to screen coordinates (pixels, y down)
    #[allow(dead_code)]
    pub fn world_to_screen(&self, world_pos: Vec2) -> Vec2 {
        let normalized_x = (world_pos.x - self.position.x) / (self.viewport_width / 2.0);
        let normalized_y = (world_pos.y - self.position.y) / (self.viewport_height / 2.0);

        Vec2::new(
            (normalized_x + 1.0) * self.viewport_width / 2.0,
            (1.0 - normalized_y) * self.viewport_height / 2.0,
        )
    }

    /// Get the viewport bounds in world coordinates
    pub fn viewport_bounds(&self) -> Viewport {
        let half = Vec2::new(self.viewport_width / 2.0, self.viewport_height / 2.0);

        Viewport {
            min: self.position - half,
            max: self.position + half,
        }
    }
}

/// Viewport bounds in world coordinates
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    pub min: Vec2,
    pub max: Vec2,
}

impl Viewport {
    /// Check if a rectangle intersects the viewport
    pub fn intersects_rect(&self, center: Vec2, half_size: Vec2) -> bool {
        let rect_min = center - half_size;
        let rect_max = center + half_size;

        rect_max.x >= self.min.x
            && rect_min.x <= self.max.x
            && rect_max.y >= self.min.y
            && rect_min.y <= self.max.y
    }
}

/// Camera uniform for GPU
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
}

impl CameraUniform {
    /// Create a new camera uniform from a camera
    pub fn new(camera: &Camera) -> Self {
        Self {
            view_proj: camera.view_proj_matrix().to_cols_array_2d(),
        }
    }
}
