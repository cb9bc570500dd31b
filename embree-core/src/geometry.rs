use serde::{Deserialize, Serialize};

use crate::material::Material;

pub type Vec2 = [f64; 2];
pub type Vec3 = [f64; 3];
pub type Vec4 = [f64; 4];

/// A disk, triangulated as a fan (a cone when `height` is non-zero).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Disk {
    /// Center of the disk.
    pub position: Vec3,
    /// Height of the cone apex above the disk.
    pub height: f64,
    pub radius: f64,
    /// Triangulation amount.
    pub num_triangles: i32,
    pub material: Material,
}

impl Default for Disk {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, 0.0],
            height: 0.0,
            radius: 50.0,
            num_triangles: 50,
            material: Material::default(),
        }
    }
}

impl Disk {
    pub fn new(position: Vec3, height: f64, radius: f64) -> Self {
        Self {
            position,
            height,
            radius,
            ..Default::default()
        }
    }

    pub fn with_triangles(mut self, num_triangles: i32) -> Self {
        self.num_triangles = num_triangles;
        self
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }
}

/// A tessellated sphere, optionally moving over the shutter interval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Sphere {
    pub position: Vec3,
    /// Displacement over the shutter interval; all zeros means static.
    pub motion: Vec3,
    pub radius: f64,
    /// Subdivisions from pole to pole.
    pub num_theta: i32,
    /// Subdivisions around the axis.
    pub num_phi: i32,
    pub material: Material,
}

impl Default for Sphere {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, 0.0],
            motion: [0.0, 0.0, 0.0],
            radius: 100.0,
            num_theta: 50,
            num_phi: 50,
            material: Material::default(),
        }
    }
}

impl Sphere {
    pub fn new(position: Vec3, radius: f64) -> Self {
        Self {
            position,
            radius,
            ..Default::default()
        }
    }

    pub fn with_motion(mut self, motion: Vec3) -> Self {
        self.motion = motion;
        self
    }

    pub fn with_tessellation(mut self, num_theta: i32, num_phi: i32) -> Self {
        self.num_theta = num_theta;
        self.num_phi = num_phi;
        self
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }

    pub fn is_moving(&self) -> bool {
        self.motion.iter().any(|c| *c != 0.0)
    }
}

/// An indexed triangle mesh with optional per-vertex attributes.
///
/// `motions`, `normals` and `texcoords` are parallel to `positions` when present.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TriangleMesh {
    pub positions: Vec<Vec3>,
    pub motions: Option<Vec<Vec3>>,
    pub normals: Option<Vec<Vec3>>,
    pub texcoords: Option<Vec<Vec2>>,
    /// Vertex indices, one triple per triangle.
    pub indices: Vec<[u32; 3]>,
    pub material: Material,
}

impl TriangleMesh {
    pub fn new(positions: Vec<Vec3>, indices: Vec<[u32; 3]>) -> Self {
        Self {
            positions,
            indices,
            ..Default::default()
        }
    }

    pub fn with_motions(mut self, motions: Vec<Vec3>) -> Self {
        self.motions = Some(motions);
        self
    }

    pub fn with_normals(mut self, normals: Vec<Vec3>) -> Self {
        self.normals = Some(normals);
        self
    }

    pub fn with_texcoords(mut self, texcoords: Vec<Vec2>) -> Self {
        self.texcoords = Some(texcoords);
        self
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len()
    }
}

/// Rotation by `angle` degrees about `axis`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisRotation {
    pub angle: f64,
    pub axis: Vec3,
}

/// Coordinate transform opened by a `TransformBegin` marker.
///
/// Unset components are left out of the markup.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformScope {
    pub translate: Option<Vec3>,
    pub scale: Option<Vec3>,
    /// Euler angles in degrees.
    pub rotate: Option<Vec3>,
    pub rotate_axis: Option<AxisRotation>,
}

/// An entry of the scene's object sequence.
///
/// Transform markers carry no material; nesting is given by matched
/// `TransformBegin`/`TransformEnd` pairs in sequence order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Disk(Disk),
    Sphere(Sphere),
    TriangleMesh(TriangleMesh),
    TransformBegin(TransformScope),
    TransformEnd,
}

impl Shape {
    /// Element name used for this shape in the markup.
    pub fn name(&self) -> &'static str {
        match self {
            Shape::Disk(_) => "Disk",
            Shape::Sphere(_) => "Sphere",
            Shape::TriangleMesh(_) => "TriangleMesh",
            Shape::TransformBegin(_) => "TransformBegin",
            Shape::TransformEnd => "TransformEnd",
        }
    }

    pub fn material(&self) -> Option<&Material> {
        match self {
            Shape::Disk(d) => Some(&d.material),
            Shape::Sphere(s) => Some(&s.material),
            Shape::TriangleMesh(m) => Some(&m.material),
            Shape::TransformBegin(_) | Shape::TransformEnd => None,
        }
    }

    pub fn is_marker(&self) -> bool {
        matches!(self, Shape::TransformBegin(_) | Shape::TransformEnd)
    }
}

impl From<Disk> for Shape {
    fn from(disk: Disk) -> Self {
        Shape::Disk(disk)
    }
}

impl From<Sphere> for Shape {
    fn from(sphere: Sphere) -> Self {
        Shape::Sphere(sphere)
    }
}

impl From<TriangleMesh> for Shape {
    fn from(mesh: TriangleMesh) -> Self {
        Shape::TriangleMesh(mesh)
    }
}
