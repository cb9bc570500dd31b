use serde::{Deserialize, Serialize};

use crate::geometry::Vec3;

/// Uniform light from every direction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmbientLight {
    pub intensity: Vec3,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointLight {
    pub position: Vec3,
    pub intensity: Vec3,
}

/// Light arriving from a cone of directions, such as the sun.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistantLight {
    pub direction: Vec3,
    pub intensity: Vec3,
    /// Half opening angle of the cone in degrees.
    pub half_angle: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriangleLight {
    pub v0: Vec3,
    pub v1: Vec3,
    pub v2: Vec3,
    pub intensity: Vec3,
}

/// Parallelogram area light spanned by two edges from a corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuadLight {
    pub position: Vec3,
    pub edge0: Vec3,
    pub edge1: Vec3,
    pub intensity: Vec3,
}

/// Environment light read from a high dynamic range image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HdriLight {
    pub intensity: Vec3,
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Light {
    Ambient(AmbientLight),
    Point(PointLight),
    Distant(DistantLight),
    Triangle(TriangleLight),
    Quad(QuadLight),
    Hdri(HdriLight),
}

impl Light {
    pub fn ambient(intensity: Vec3) -> Self {
        Light::Ambient(AmbientLight { intensity })
    }

    pub fn point(position: Vec3, intensity: Vec3) -> Self {
        Light::Point(PointLight { position, intensity })
    }

    pub fn distant(direction: Vec3, intensity: Vec3, half_angle: f64) -> Self {
        Light::Distant(DistantLight {
            direction,
            intensity,
            half_angle,
        })
    }

    pub fn quad(position: Vec3, edge0: Vec3, edge1: Vec3, intensity: Vec3) -> Self {
        Light::Quad(QuadLight {
            position,
            edge0,
            edge1,
            intensity,
        })
    }

    /// Variant tag; its lowercase form is the script directive.
    pub fn tag(&self) -> &'static str {
        match self {
            Light::Ambient(_) => "AmbientLight",
            Light::Point(_) => "PointLight",
            Light::Distant(_) => "DistantLight",
            Light::Triangle(_) => "TriangleLight",
            Light::Quad(_) => "QuadLight",
            Light::Hdri(_) => "HDRILight",
        }
    }

    pub fn intensity(&self) -> Vec3 {
        match self {
            Light::Ambient(l) => l.intensity,
            Light::Point(l) => l.intensity,
            Light::Distant(l) => l.intensity,
            Light::Triangle(l) => l.intensity,
            Light::Quad(l) => l.intensity,
            Light::Hdri(l) => l.intensity,
        }
    }

    /// Ambient and point directives must follow every other light directive.
    pub fn is_trailing(&self) -> bool {
        matches!(self, Light::Ambient(_) | Light::Point(_))
    }
}
