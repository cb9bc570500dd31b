use embree_core::geometry::Shape;
use embree_core::{Scene, SceneError};

use crate::markup::{MarkupWriter, Node};
use crate::script::write_script;
use crate::shapes::{shape_record, transform_record};

const ROOT_TAG: &str = "scene";
const GROUP_TAG: &str = "Group";
const TRANSFORM_TAG: &str = "Transform";

/// The two renderer inputs produced from one scene.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneOutput {
    /// Geometry and materials.
    pub markup: String,
    /// Camera and light directives.
    pub script: String,
}

/// Encode a scene into markup and script.
///
/// The scene is only read. Any validation failure aborts the whole call.
pub fn process(scene: &Scene) -> Result<SceneOutput, SceneError> {
    let markup = write_markup(scene)?;
    let script = write_script(scene);
    log::info!(
        "Processed scene: {} objects, {} lights",
        scene.object_count(),
        scene.lights.len()
    );
    Ok(SceneOutput { markup, script })
}

/// Markup for every object in sequence order.
///
/// `TransformBegin`/`TransformEnd` pairs become `<Transform>` elements around
/// the objects between them. A stray end marker is ignored and scopes still
/// open at the end of the sequence are closed.
pub fn write_markup(scene: &Scene) -> Result<String, SceneError> {
    if scene.is_empty() {
        return Err(SceneError::SceneEmpty);
    }

    let mut writer = MarkupWriter::new();
    writer.declaration();
    writer.open(ROOT_TAG);
    writer.open(GROUP_TAG);

    let mut open_scopes = 0usize;
    for object in scene.objects() {
        match &object.shape {
            Shape::TransformBegin(scope) => {
                writer.open(TRANSFORM_TAG);
                for (key, node) in transform_record(scope).entries() {
                    writer.element(key, node);
                }
                open_scopes += 1;
            }
            Shape::TransformEnd => {
                if open_scopes == 0 {
                    log::warn!("Unmatched TransformEnd {} ignored", object.id);
                    continue;
                }
                writer.close(TRANSFORM_TAG);
                open_scopes -= 1;
            }
            shape => {
                if let Some(record) = shape_record(shape)? {
                    log::debug!("Writing {} {}", shape.name(), object.id);
                    writer.element(shape.name(), &Node::Record(record));
                }
            }
        }
    }

    if open_scopes > 0 {
        log::warn!("Closing {} unterminated transform scope(s)", open_scopes);
        for _ in 0..open_scopes {
            writer.close(TRANSFORM_TAG);
        }
    }

    writer.close(GROUP_TAG);
    writer.close(ROOT_TAG);
    Ok(writer.finish())
}
