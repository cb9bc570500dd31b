//! # embree-io
//!
//! Writers that turn an `embree-core` scene into the renderer's two input
//! files: the hierarchical markup with geometry and materials, and the
//! line-oriented command script with camera, lights and invocation
//! parameters.

pub mod markup;
pub mod pack;
pub mod shapes;
pub mod script;
pub mod process;
pub mod options;
pub mod output;

pub use markup::{MarkupWriter, Node, Record, Value, WireKind};
pub use pack::{pack_material, PackedMaterial, Param};
pub use process::{process, write_markup, SceneOutput};
pub use script::{write_script, ScriptBuilder};
pub use options::{OptionsError, RenderOptions, RendererKind};
pub use output::{compose_invocation, write_scene_files, OutputError, ScenePaths};
