/// Triangle meshes and tessellation of layout shapes
use nalgebra::{Matrix4, Point3, Vector3};
use std::f32::consts::{PI, TAU};

use crate::primitive::Shape;

/// A 3D vertex with position and normal
#[derive(Debug, Clone, Copy)]
pub struct Vertex {
    pub position: Point3<f32>,
    pub normal: Vector3<f32>,
}

impl Vertex {
    pub fn new(x: f32, y: f32, z: f32, nx: f32, ny: f32, nz: f32) -> Self {
        Self {
            position: Point3::new(x, y, z),
            normal: Vector3::new(nx, ny, nz),
        }
    }

    fn at(position: Point3<f32>, normal: Vector3<f32>) -> Self {
        Self { position, normal }
    }
}

/// A triangle face defined by three vertices
#[derive(Debug, Clone)]
pub struct Triangle {
    pub vertices: [Vertex; 3],
}

impl Triangle {
    pub fn new(v0: Vertex, v1: Vertex, v2: Vertex) -> Self {
        Self {
            vertices: [v0, v1, v2],
        }
    }

    fn edge_cross(&self) -> Vector3<f32> {
        let v0 = self.vertices[0].position;
        let v1 = self.vertices[1].position;
        let v2 = self.vertices[2].position;

        let edge1 = v1 - v0;
        let edge2 = v2 - v0;

        edge1.cross(&edge2)
    }

    /// Calculate the face normal from the triangle's vertices (CCW is front)
    pub fn calculate_normal(&self) -> Vector3<f32> {
        self.edge_cross()
            .try_normalize(f32::EPSILON)
            .unwrap_or_else(Vector3::zeros)
    }

    pub fn is_degenerate(&self) -> bool {
        self.edge_cross().norm_squared() < 1e-12
    }
}

/// A 3D mesh composed of triangles
#[derive(Debug, Clone)]
pub struct Mesh {
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    pub fn new() -> Self {
        Self {
            triangles: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            triangles: Vec::with_capacity(capacity),
        }
    }

    /// Add a triangle; zero-area triangles are dropped.
    pub fn add_triangle(&mut self, triangle: Triangle) {
        if !triangle.is_degenerate() {
            self.triangles.push(triangle);
        }
    }

    /// Two triangles `a b c` and `a c d`, counter-clockwise seen from the front.
    fn add_quad(&mut self, a: Vertex, b: Vertex, c: Vertex, d: Vertex) {
        self.add_triangle(Triangle::new(a, b, c));
        self.add_triangle(Triangle::new(a, c, d));
    }

    fn add_flat_quad(&mut self, corners: [[f32; 3]; 4], normal: [f32; 3]) {
        let n = Vector3::from(normal);
        let [a, b, c, d] = corners.map(|p| Vertex::at(Point3::from(p), n));
        self.add_quad(a, b, c, d);
    }

    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Axis-aligned box centred on the origin
    pub fn cuboid(width: f32, height: f32, depth: f32) -> Self {
        let (x, y, z) = (width / 2.0, height / 2.0, depth / 2.0);
        let mut mesh = Self::with_capacity(12);

        mesh.add_flat_quad([[-x, -y, z], [x, -y, z], [x, y, z], [-x, y, z]], [0.0, 0.0, 1.0]);
        mesh.add_flat_quad([[x, -y, -z], [-x, -y, -z], [-x, y, -z], [x, y, -z]], [0.0, 0.0, -1.0]);
        mesh.add_flat_quad([[-x, y, z], [x, y, z], [x, y, -z], [-x, y, -z]], [0.0, 1.0, 0.0]);
        mesh.add_flat_quad([[-x, -y, -z], [x, -y, -z], [x, -y, z], [-x, -y, z]], [0.0, -1.0, 0.0]);
        mesh.add_flat_quad([[x, -y, z], [x, -y, -z], [x, y, -z], [x, y, z]], [1.0, 0.0, 0.0]);
        mesh.add_flat_quad([[-x, -y, -z], [-x, -y, z], [-x, y, z], [-x, y, -z]], [-1.0, 0.0, 0.0]);

        mesh
    }

    /// Single-sided rectangle in the XY plane facing +Z
    pub fn plane(width: f32, height: f32) -> Self {
        let (x, y) = (width / 2.0, height / 2.0);
        let mut mesh = Self::with_capacity(2);
        mesh.add_flat_quad([[-x, -y, 0.0], [x, -y, 0.0], [x, y, 0.0], [-x, y, 0.0]], [0.0, 0.0, 1.0]);
        mesh
    }

    /// Capped frustum along Y. A zero radius collapses that end to a point.
    pub fn cylinder(radius_top: f32, radius_bottom: f32, height: f32, segments: u32) -> Self {
        let segments = segments.max(3);
        let half = height / 2.0;
        let ring = |radius: f32, y: f32, i: u32| {
            let theta = TAU * i as f32 / segments as f32;
            Point3::new(radius * theta.cos(), y, radius * theta.sin())
        };
        let side_normal = |i: u32| {
            let theta = TAU * i as f32 / segments as f32;
            Vector3::new(theta.cos() * height, radius_bottom - radius_top, theta.sin() * height)
                .try_normalize(f32::EPSILON)
                .unwrap_or_else(Vector3::y)
        };

        let mut mesh = Self::with_capacity(segments as usize * 4);
        let up = Vector3::y();
        let down = -Vector3::y();
        let top_centre = Vertex::at(Point3::new(0.0, half, 0.0), up);
        let bottom_centre = Vertex::at(Point3::new(0.0, -half, 0.0), down);

        for i in 0..segments {
            let (n0, n1) = (side_normal(i), side_normal(i + 1));
            let b0 = ring(radius_bottom, -half, i);
            let b1 = ring(radius_bottom, -half, i + 1);
            let t0 = ring(radius_top, half, i);
            let t1 = ring(radius_top, half, i + 1);

            mesh.add_quad(
                Vertex::at(b0, n0),
                Vertex::at(t0, n0),
                Vertex::at(t1, n1),
                Vertex::at(b1, n1),
            );
            mesh.add_triangle(Triangle::new(top_centre, Vertex::at(t1, up), Vertex::at(t0, up)));
            mesh.add_triangle(Triangle::new(
                bottom_centre,
                Vertex::at(b0, down),
                Vertex::at(b1, down),
            ));
        }

        mesh
    }

    /// Pointed cone along Y with its apex up
    pub fn cone(radius: f32, height: f32, segments: u32) -> Self {
        Self::cylinder(0.0, radius, height, segments)
    }

    /// UV sphere centred on the origin
    pub fn sphere(radius: f32, width_segments: u32, height_segments: u32) -> Self {
        let segments = width_segments.max(3);
        let rings = height_segments.max(2);
        let point = |j: u32, i: u32| {
            let phi = PI * j as f32 / rings as f32;
            let theta = TAU * i as f32 / segments as f32;
            let normal = Vector3::new(phi.sin() * theta.cos(), phi.cos(), phi.sin() * theta.sin());
            Vertex::at(Point3::from(normal * radius), normal)
        };

        let mut mesh = Self::with_capacity((segments * rings * 2) as usize);
        for j in 0..rings {
            for i in 0..segments {
                mesh.add_quad(point(j, i), point(j, i + 1), point(j + 1, i + 1), point(j + 1, i));
            }
        }
        mesh
    }

    /// Tessellate a layout shape, capping round shapes at `max_segments`
    pub fn from_shape(shape: &Shape, max_segments: u32) -> Self {
        let cap = |n: u32| n.min(max_segments);
        match *shape {
            Shape::Box {
                width,
                height,
                depth,
            } => Self::cuboid(width, height, depth),
            Shape::Plane { width, height } => Self::plane(width, height),
            Shape::Cylinder {
                radius_top,
                radius_bottom,
                height,
                radial_segments,
            } => Self::cylinder(radius_top, radius_bottom, height, cap(radial_segments)),
            Shape::Cone {
                radius,
                height,
                radial_segments,
            } => Self::cone(radius, height, cap(radial_segments)),
            Shape::Sphere {
                radius,
                width_segments,
                height_segments,
            } => Self::sphere(radius, cap(width_segments), cap(height_segments)),
        }
    }

    /// Copy of this mesh with every vertex moved by `matrix` (rigid transforms)
    pub fn transformed(&self, matrix: &Matrix4<f32>) -> Self {
        let apply = |v: &Vertex| Vertex {
            position: matrix.transform_point(&v.position),
            normal: matrix
                .transform_vector(&v.normal)
                .try_normalize(f32::EPSILON)
                .unwrap_or(v.normal),
        };
        Self {
            triangles: self
                .triangles
                .iter()
                .map(|t| Triangle {
                    vertices: [apply(&t.vertices[0]), apply(&t.vertices[1]), apply(&t.vertices[2])],
                })
                .collect(),
        }
    }
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new()
    }
}
