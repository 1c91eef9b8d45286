/// ASCII rasterizer for terminal rendering
use crossterm::{
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    QueueableCommand,
};
use hcx_core::{
    primitive::rgb, Camera, Light, Mesh, PlacedPrimitive, SceneLayout, Transform, Triangle,
};
use nalgebra::{Point3, Vector3, Vector4};
use std::io::Write;

/// Character luminosity ramp for depth/shading (darkest to lightest)
const LUMINOSITY_RAMP: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Round shapes are coarsened to this many segments; cells are too large for more.
pub const MAX_SEGMENTS: u32 = 8;

const GLOW_CHAR: char = '*';
/// Lights sit inside their pole; let them show through the first ~0.5 units.
const GLOW_DEPTH_BIAS: f32 = 1e-4;

/// Renderer-owned, world-space copy of one placed primitive
#[derive(Debug, Clone)]
pub struct Drawable {
    pub mesh: Mesh,
    pub color: [f32; 3],
    pub emissive: Option<[f32; 3]>,
    pub opacity: f32,
}

impl Drawable {
    pub fn from_primitive(primitive: &PlacedPrimitive) -> Self {
        let model = Transform::model_matrix(&primitive.position, &primitive.rotation);
        Self {
            mesh: Mesh::from_shape(&primitive.shape, MAX_SEGMENTS).transformed(&model),
            color: primitive.material.rgb(),
            emissive: primitive.material.emissive.map(rgb),
            opacity: primitive.material.opacity,
        }
    }

    pub fn is_transparent(&self) -> bool {
        self.opacity < 1.0
    }
}

/// Tessellate every primitive once, opaque before transparent.
pub fn build_drawables(layout: &SceneLayout) -> Vec<Drawable> {
    let mut drawables: Vec<Drawable> = layout.iter().map(Drawable::from_primitive).collect();
    drawables.sort_by_key(Drawable::is_transparent);
    drawables
}

/// Ambient term plus one directional light
#[derive(Debug, Clone, Copy)]
pub struct Shading {
    pub light_dir: Vector3<f32>,
    pub ambient: f32,
    pub diffuse: f32,
}

impl Shading {
    /// Take the first ambient and directional lights from the layout.
    pub fn from_layout(layout: &SceneLayout) -> Self {
        let mut shading = Self::default();
        for light in &layout.lights {
            match *light {
                Light::Ambient { intensity, color } => {
                    shading.ambient = intensity * luminance(rgb(color));
                }
                Light::Directional {
                    position,
                    intensity,
                    ..
                } => {
                    if let Some(dir) = position.coords.try_normalize(f32::EPSILON) {
                        shading.light_dir = dir;
                        shading.diffuse = intensity;
                    }
                }
                Light::Point { .. } => {}
            }
        }
        shading
    }

    fn brightness(&self, normal: &Vector3<f32>) -> f32 {
        (self.ambient + self.diffuse * normal.dot(&self.light_dir).max(0.0)).min(1.0)
    }
}

impl Default for Shading {
    fn default() -> Self {
        Self {
            light_dir: Vector3::new(1.0, 1.0, 1.0).normalize(),
            ambient: 0.2,
            diffuse: 0.8,
        }
    }
}

fn luminance(c: [f32; 3]) -> f32 {
    0.2126 * c[0] + 0.7152 * c[1] + 0.0722 * c[2]
}

fn to_rgb8(c: [f32; 3]) -> [u8; 3] {
    c.map(|v| (v.clamp(0.0, 1.0) * 255.0).round() as u8)
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct ScreenVertex {
    x: f32,
    y: f32,
    depth: f32,
}

/// ASCII renderer that converts world-space drawables to terminal characters
pub struct AsciiRenderer {
    width: usize,
    height: usize,
    background: [u8; 3],
    depth_buffer: Vec<f32>,
    char_buffer: Vec<char>,
    color_buffer: Vec<[u8; 3]>,
}

impl AsciiRenderer {
    pub fn new(width: usize, height: usize, background: u32) -> Self {
        let background = to_rgb8(rgb(background));
        let size = width * height;
        Self {
            width,
            height,
            background,
            depth_buffer: vec![f32::INFINITY; size],
            char_buffer: vec![' '; size],
            color_buffer: vec![background; size],
        }
    }

    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Reallocate the frame buffers for a new terminal size.
    pub fn resize(&mut self, width: usize, height: usize) {
        let size = width * height;
        self.width = width;
        self.height = height;
        self.depth_buffer = vec![f32::INFINITY; size];
        self.char_buffer = vec![' '; size];
        self.color_buffer = vec![self.background; size];
    }

    pub fn clear(&mut self) {
        self.depth_buffer.fill(f32::INFINITY);
        self.char_buffer.fill(' ');
        self.color_buffer.fill(self.background);
    }

    /// Character and colour at a cell, for inspection.
    pub fn cell(&self, x: usize, y: usize) -> Option<(char, [u8; 3])> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = y * self.width + x;
        Some((self.char_buffer[idx], self.color_buffer[idx]))
    }

    /// Number of cells something was drawn into.
    pub fn covered_cells(&self) -> usize {
        self.depth_buffer.iter().filter(|d| d.is_finite()).count()
    }

    pub fn render(&mut self, drawables: &[Drawable], camera: &Camera, shading: &Shading) {
        let view_projection = camera.view_projection();
        for drawable in drawables {
            for triangle in &drawable.mesh.triangles {
                self.render_triangle(triangle, drawable, camera, &view_projection, shading);
            }
        }
    }

    /// Mark visible point lights with a glow character.
    pub fn render_glows(&mut self, lights: &[Point3<f32>], camera: &Camera) {
        let view_projection = camera.view_projection();
        for light in lights {
            let Some((x, y, depth)) = Camera::project_to_screen(
                &view_projection,
                light,
                self.width as u32,
                self.height as u32,
            ) else {
                continue;
            };
            let (x, y) = (x as usize, y as usize);
            if x >= self.width || y >= self.height {
                continue;
            }
            let idx = y * self.width + x;
            if depth - GLOW_DEPTH_BIAS <= self.depth_buffer[idx] {
                self.depth_buffer[idx] = depth;
                self.char_buffer[idx] = GLOW_CHAR;
                self.color_buffer[idx] = [255, 250, 205];
            }
        }
    }

    fn render_triangle(
        &mut self,
        triangle: &Triangle,
        drawable: &Drawable,
        camera: &Camera,
        view_projection: &nalgebra::Matrix4<f32>,
        shading: &Shading,
    ) {
        let normal = triangle.calculate_normal();

        // Back-face culling
        let to_camera = camera.position - triangle.vertices[0].position;
        if normal.dot(&to_camera) <= 0.0 {
            return;
        }

        // Calculate face brightness and colour
        let brightness = shading.brightness(&normal);
        let mut color = drawable.color.map(|c| c * brightness);
        if let Some(glow) = drawable.emissive {
            for (c, g) in color.iter_mut().zip(glow) {
                *c += g;
            }
        }

        // Map brightness to character; lit surfaces never use the blank slot
        let steps = (LUMINOSITY_RAMP.len() - 2) as f32;
        let char_index = 1 + (brightness * steps).round() as usize;
        let character = LUMINOSITY_RAMP[char_index.min(LUMINOSITY_RAMP.len() - 1)];

        let clip: Vec<Vector4<f32>> = triangle
            .vertices
            .iter()
            .map(|v| view_projection * v.position.to_homogeneous())
            .collect();
        let polygon = clip_near(&clip);
        if polygon.len() < 3 {
            return;
        }

        let screen: Vec<ScreenVertex> = polygon
            .iter()
            .filter_map(|c| {
                Camera::clip_to_screen(c, self.width as u32, self.height as u32)
                    .map(|(x, y, depth)| ScreenVertex { x, y, depth })
            })
            .collect();
        if screen.len() != polygon.len() {
            return;
        }

        // Fan-triangulate the clipped polygon
        for i in 1..screen.len() - 1 {
            self.rasterize_triangle(
                [screen[0], screen[i], screen[i + 1]],
                character,
                to_rgb8(color),
                drawable.opacity,
            );
        }
    }

    fn rasterize_triangle(
        &mut self,
        coords: [ScreenVertex; 3],
        character: char,
        color: [u8; 3],
        opacity: f32,
    ) {
        let [v0, v1, v2] = coords;

        // Bounding box
        let min_x = v0.x.min(v1.x).min(v2.x).floor() as i32;
        let max_x = v0.x.max(v1.x).max(v2.x).ceil() as i32;
        let min_y = v0.y.min(v1.y).min(v2.y).floor() as i32;
        let max_y = v0.y.max(v1.y).max(v2.y).ceil() as i32;

        // Clip to screen bounds
        let min_x = min_x.max(0);
        let max_x = max_x.min(self.width as i32 - 1);
        let min_y = min_y.max(0);
        let max_y = max_y.min(self.height as i32 - 1);

        // Scanline rasterization
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let px = x as f32 + 0.5;
                let py = y as f32 + 0.5;

                // Barycentric coordinates
                let Some((w0, w1, w2)) =
                    barycentric((v0.x, v0.y), (v1.x, v1.y), (v2.x, v2.y), (px, py))
                else {
                    continue;
                };
                if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
                    continue;
                }

                // Interpolate depth
                let depth = w0 * v0.depth + w1 * v1.depth + w2 * v2.depth;
                let idx = y as usize * self.width + x as usize;
                if depth >= self.depth_buffer[idx] {
                    continue;
                }

                if opacity < 1.0 {
                    // Blend over what is behind; depth stays with the opaque surface
                    let behind = self.color_buffer[idx];
                    self.color_buffer[idx] = blend(color, behind, opacity);
                    self.char_buffer[idx] = character;
                } else {
                    self.depth_buffer[idx] = depth;
                    self.char_buffer[idx] = character;
                    self.color_buffer[idx] = color;
                }
            }
        }
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        let [br, bg, bb] = self.background;
        writer.queue(SetBackgroundColor(Color::Rgb { r: br, g: bg, b: bb }))?;

        let mut current = None;
        for y in 0..self.height {
            for x in 0..self.width {
                let idx = y * self.width + x;
                let color = self.color_buffer[idx];

                // Only emit colour changes
                if current != Some(color) {
                    let [r, g, b] = color;
                    writer.queue(SetForegroundColor(Color::Rgb { r, g, b }))?;
                    current = Some(color);
                }
                writer.queue(Print(self.char_buffer[idx]))?;
            }
            if y + 1 < self.height {
                writer.queue(Print("\r\n"))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

fn blend(src: [u8; 3], dst: [u8; 3], alpha: f32) -> [u8; 3] {
    let mut out = [0u8; 3];
    for i in 0..3 {
        out[i] = (src[i] as f32 * alpha + dst[i] as f32 * (1.0 - alpha)).round() as u8;
    }
    out
}

/// Clip a polygon in clip space against the near plane (z >= -w).
fn clip_near(polygon: &[Vector4<f32>]) -> Vec<Vector4<f32>> {
    let distance = |v: &Vector4<f32>| v.z + v.w;
    let mut out = Vec::with_capacity(polygon.len() + 1);

    for (i, current) in polygon.iter().enumerate() {
        let next = &polygon[(i + 1) % polygon.len()];
        let (dc, dn) = (distance(current), distance(next));

        if dc >= 0.0 {
            out.push(*current);
        }
        if (dc >= 0.0) != (dn >= 0.0) {
            let t = dc / (dc - dn);
            out.push(current + (next - current) * t);
        }
    }
    out
}

/// Calculate barycentric coordinates for a point in a triangle
fn barycentric(
    v0: (f32, f32),
    v1: (f32, f32),
    v2: (f32, f32),
    p: (f32, f32),
) -> Option<(f32, f32, f32)> {
    let denom = (v1.1 - v2.1) * (v0.0 - v2.0) + (v2.0 - v1.0) * (v0.1 - v2.1);

    if denom.abs() < 1e-6 {
        return None;
    }

    let w0 = ((v1.1 - v2.1) * (p.0 - v2.0) + (v2.0 - v1.0) * (p.1 - v2.1)) / denom;
    let w1 = ((v2.1 - v0.1) * (p.0 - v2.0) + (v0.0 - v2.0) * (p.1 - v2.1)) / denom;
    let w2 = 1.0 - w0 - w1;

    Some((w0, w1, w2))
}
