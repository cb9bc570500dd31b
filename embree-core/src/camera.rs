use serde::{Deserialize, Serialize};

use crate::geometry::Vec3;

/// Pinhole camera model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pinhole {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    /// Field of view in degrees.
    pub fov: f64,
}

impl Default for Pinhole {
    fn default() -> Self {
        Self {
            position: [300.0, 300.0, 300.0],
            target: [0.0, 0.0, 0.0],
            up: [0.0, 1.0, 0.0],
            fov: 64.0,
        }
    }
}

/// Depth of field camera: a pinhole with a finite lens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Dof {
    #[serde(flatten)]
    pub view: Pinhole,
    /// Lens radius; zero renders like a pinhole.
    pub radius: f64,
    /// Distance of the focal plane.
    pub focal_distance: f64,
}

impl Default for Dof {
    fn default() -> Self {
        Self {
            view: Pinhole::default(),
            radius: 0.0,
            focal_distance: 100.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Camera {
    Pinhole(Pinhole),
    Dof(Dof),
}

impl Default for Camera {
    fn default() -> Self {
        Camera::Pinhole(Pinhole::default())
    }
}

impl Camera {
    pub fn view(&self) -> &Pinhole {
        match self {
            Camera::Pinhole(p) => p,
            Camera::Dof(d) => &d.view,
        }
    }

    pub fn view_mut(&mut self) -> &mut Pinhole {
        match self {
            Camera::Pinhole(p) => p,
            Camera::Dof(d) => &mut d.view,
        }
    }

    /// Lens radius, only when it has an effect.
    pub fn lens_radius(&self) -> Option<f64> {
        match self {
            Camera::Dof(d) if d.radius != 0.0 => Some(d.radius),
            _ => None,
        }
    }
}
