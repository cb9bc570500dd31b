//! # embree-core
//!
//! In-memory scene graph for the embree renderer: materials, shapes,
//! lights, cameras and the scene container with its transform stack.
//!
//! The writers in `embree-io` walk a [`Scene`] read-only and turn it into
//! the renderer's markup and command script.

pub mod error;
pub mod geometry;
pub mod material;
pub mod light;
pub mod camera;
pub mod scene;

pub use error::{LoadError, SceneError};
pub use geometry::{Disk, Shape, Sphere, TransformScope, TriangleMesh, Vec2, Vec3, Vec4};
pub use material::{Material, MaterialKind};
pub use light::Light;
pub use camera::Camera;
pub use scene::{ObjectId, Scene, SceneObject};
