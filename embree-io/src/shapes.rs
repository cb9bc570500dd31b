//! Per-shape validation and markup records.
//!
//! Every check runs before the record for its shape is built, so a failing
//! shape never contributes partial markup.

use embree_core::geometry::{Disk, Shape, Sphere, TransformScope, TriangleMesh, Vec3};
use embree_core::SceneError;

use crate::markup::{format_number, MarkupWriter, Node, Record, Value};
use crate::pack::pack_material;

/// Markup element for a geometric shape, or `None` when the shape is culled.
///
/// Transform markers have no standalone element and also yield `None`.
pub fn shape_record(shape: &Shape) -> Result<Option<Record>, SceneError> {
    match shape {
        Shape::Disk(disk) => disk_record(disk).map(Some),
        Shape::Sphere(sphere) => sphere_record(sphere),
        Shape::TriangleMesh(mesh) => triangle_mesh_record(mesh).map(Some),
        Shape::TransformBegin(_) | Shape::TransformEnd => Ok(None),
    }
}

/// Standalone markup for one shape; empty when it contributes nothing.
pub fn write_shape(shape: &Shape) -> Result<String, SceneError> {
    let mut writer = MarkupWriter::new();
    if let Some(record) = shape_record(shape)? {
        writer.element(shape.name(), &Node::Record(record));
    }
    Ok(writer.finish())
}

pub fn disk_record(disk: &Disk) -> Result<Record, SceneError> {
    const SHAPE_ID: &str = "Disk";
    if disk.radius <= 0.0 {
        return Err(invalid(SHAPE_ID, "radius", format_number(disk.radius)));
    }
    if disk.num_triangles <= 0 {
        return Err(invalid(SHAPE_ID, "numTriangles", disk.num_triangles.to_string()));
    }

    Ok(Record::new()
        .with_value("position", disk.position)
        .with_value("height", disk.height)
        .with_value("radius", disk.radius)
        .with_value("numTriangles", disk.num_triangles)
        .with("material", pack_material(&disk.material).to_node()))
}

/// A sphere with non-positive radius renders nothing and is not an error.
pub fn sphere_record(sphere: &Sphere) -> Result<Option<Record>, SceneError> {
    const SHAPE_ID: &str = "Sphere";
    if sphere.radius <= 0.0 {
        log::warn!(
            "Sphere with radius {} skipped",
            format_number(sphere.radius)
        );
        return Ok(None);
    }
    if sphere.num_phi == 0 {
        return Err(invalid(SHAPE_ID, "numPhi", sphere.num_phi.to_string()));
    }
    if sphere.num_theta <= 0 {
        return Err(invalid(SHAPE_ID, "numTheta", sphere.num_theta.to_string()));
    }

    let mut record = Record::new().with_value("position", sphere.position);
    if sphere.is_moving() {
        record.push("motion", Node::Value(Value::from(sphere.motion)));
    }
    Ok(Some(
        record
            .with_value("radius", sphere.radius)
            .with_value("numTheta", sphere.num_theta)
            .with_value("numPhi", sphere.num_phi)
            .with("material", pack_material(&sphere.material).to_node()),
    ))
}

pub fn triangle_mesh_record(mesh: &TriangleMesh) -> Result<Record, SceneError> {
    const SHAPE_ID: &str = "TriangleMesh";
    if mesh.positions.is_empty() {
        return Err(invalid(SHAPE_ID, "positions", "empty".to_string()));
    }
    if mesh.indices.is_empty() {
        return Err(invalid(SHAPE_ID, "indices", "empty".to_string()));
    }

    let expected = mesh.vertex_count();
    let check_len = |property: &'static str, actual: usize| {
        if actual == expected {
            Ok(())
        } else {
            Err(SceneError::PropertyLengthMismatch {
                shape: SHAPE_ID,
                property,
                actual,
                expected,
            })
        }
    };
    if let Some(motions) = &mesh.motions {
        check_len("motions", motions.len())?;
    }
    if let Some(normals) = &mesh.normals {
        check_len("normals", normals.len())?;
    }
    if let Some(texcoords) = &mesh.texcoords {
        check_len("texcoords", texcoords.len())?;
    }

    let mut record = Record::new().with_value("positions", flatten(&mesh.positions));
    if let Some(motions) = &mesh.motions {
        record.push("motions", Node::Value(flatten(motions)));
    }
    if let Some(normals) = &mesh.normals {
        record.push("normals", Node::Value(flatten(normals)));
    }
    if let Some(texcoords) = &mesh.texcoords {
        record.push("texcoords", Node::Value(flatten(texcoords)));
    }
    let indices = mesh
        .indices
        .iter()
        .flat_map(|tri| tri.iter().map(|i| i64::from(*i)))
        .collect();
    Ok(record
        .with("indices", Node::Value(Value::Integers(indices)))
        .with("material", pack_material(&mesh.material).to_node()))
}

/// Entries written at the top of a `<Transform>` element; unset components are omitted.
pub fn transform_record(scope: &TransformScope) -> Record {
    let mut record = Record::new();
    let vectors: [(&str, Option<Vec3>); 3] = [
        ("translate", scope.translate),
        ("scale", scope.scale),
        ("rotate", scope.rotate),
    ];
    for (key, vector) in vectors {
        if let Some(v) = vector {
            record.push(key, Node::Value(Value::from(v)));
        }
    }
    if let Some(rotation) = scope.rotate_axis {
        let mut values = vec![rotation.angle];
        values.extend_from_slice(&rotation.axis);
        record.push("rotateAxis", Node::Value(Value::Numbers(values)));
    }
    record
}

fn flatten<const N: usize>(vectors: &[[f64; N]]) -> Value {
    Value::Numbers(vectors.iter().flatten().copied().collect())
}

fn invalid(shape: &'static str, property: &'static str, value: String) -> SceneError {
    SceneError::PropertyInvalid {
        shape,
        property,
        value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embree_core::geometry::AxisRotation;
    use embree_core::Material;

    fn triangle() -> TriangleMesh {
        TriangleMesh::new(
            vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            vec![[0, 1, 2]],
        )
    }

    #[test]
    fn test_disk_negative_radius() {
        let err = disk_record(&Disk::new([0.0, 0.0, 0.0], 0.0, -1.0)).unwrap_err();
        assert_eq!(
            err,
            SceneError::PropertyInvalid {
                shape: "Disk",
                property: "radius",
                value: "-1".into(),
            }
        );
    }

    #[test]
    fn test_disk_zero_triangles() {
        let err = disk_record(&Disk::default().with_triangles(0)).unwrap_err();
        assert_eq!(err.property(), Some("numTriangles"));
    }

    #[test]
    fn test_disk_record_fields() {
        let record = disk_record(&Disk::new([0.0, -100.0, 0.0], 1.0, 300.0)).unwrap();
        let keys: Vec<&str> = record.entries().iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["position", "height", "radius", "numTriangles", "material"]);
        assert_eq!(
            record.get("position"),
            Some(&Node::Value(Value::Numbers(vec![0.0, -100.0, 0.0])))
        );
    }

    #[test]
    fn test_sphere_non_positive_radius_is_culled() {
        assert_eq!(sphere_record(&Sphere::new([0.0, 0.0, 0.0], 0.0)).unwrap(), None);
        let shape = Shape::Sphere(Sphere::new([0.0, 0.0, 0.0], -5.0));
        assert_eq!(write_shape(&shape).unwrap(), "");
    }

    #[test]
    fn test_sphere_culling_wins_over_tessellation_errors() {
        let sphere = Sphere::new([0.0, 0.0, 0.0], -1.0).with_tessellation(0, 0);
        assert!(sphere_record(&sphere).unwrap().is_none());
    }

    #[test]
    fn test_sphere_tessellation_checks() {
        let err = sphere_record(&Sphere::default().with_tessellation(10, 0)).unwrap_err();
        assert_eq!(err.property(), Some("numPhi"));
        let err = sphere_record(&Sphere::default().with_tessellation(-3, 10)).unwrap_err();
        assert_eq!(err.property(), Some("numTheta"));
        // only an exactly-zero numPhi is rejected
        assert!(sphere_record(&Sphere::default().with_tessellation(10, -4)).is_ok());
    }

    #[test]
    fn test_sphere_motion_only_when_moving() {
        let still = sphere_record(&Sphere::default()).unwrap().unwrap();
        assert!(still.get("motion").is_none());

        let moving = sphere_record(&Sphere::default().with_motion([0.0, 4.0, 0.0]))
            .unwrap()
            .unwrap();
        assert_eq!(
            moving.get("motion"),
            Some(&Node::Value(Value::Numbers(vec![0.0, 4.0, 0.0])))
        );
    }

    #[test]
    fn test_write_sphere_markup() {
        let shape = Shape::Sphere(
            Sphere::new([0.0, 0.0, 0.0], 100.0).with_material(Material::matte([1.0, 1.0, 1.0])),
        );
        let markup = write_shape(&shape).unwrap();
        let lines: Vec<&str> = markup.lines().collect();
        assert_eq!(
            lines,
            [
                "<Sphere>",
                "  <position>0 0 0</position>",
                "  <radius>100</radius>",
                "  <numTheta>50</numTheta>",
                "  <numPhi>50</numPhi>",
                "  <material>",
                "    <code>\"Matte\"</code>",
                "    <parameters>",
                "      <float3 name=\"reflectance\">1 1 1</float3>",
                "    </parameters>",
                "  </material>",
                "</Sphere>",
            ]
        );
    }

    #[test]
    fn test_mesh_requires_positions_and_indices() {
        let err = triangle_mesh_record(&TriangleMesh::new(vec![], vec![[0, 1, 2]])).unwrap_err();
        assert_eq!(err.property(), Some("positions"));
        let err =
            triangle_mesh_record(&TriangleMesh::new(vec![[0.0, 0.0, 0.0]], vec![])).unwrap_err();
        assert_eq!(err.property(), Some("indices"));
    }

    #[test]
    fn test_mesh_attribute_length_mismatch() {
        let mesh = triangle().with_normals(vec![[0.0, 0.0, 1.0]; 2]);
        assert_eq!(
            triangle_mesh_record(&mesh).unwrap_err(),
            SceneError::PropertyLengthMismatch {
                shape: "TriangleMesh",
                property: "normals",
                actual: 2,
                expected: 3,
            }
        );

        let mesh = triangle().with_motions(vec![[0.0, 0.0, 0.0]; 4]);
        assert_eq!(triangle_mesh_record(&mesh).unwrap_err().property(), Some("motions"));

        let mesh = triangle().with_texcoords(vec![[0.0, 0.0]]);
        assert_eq!(triangle_mesh_record(&mesh).unwrap_err().property(), Some("texcoords"));
    }

    #[test]
    fn test_mesh_record_flattens_attributes() {
        let mesh = triangle().with_texcoords(vec![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]]);
        let record = triangle_mesh_record(&mesh).unwrap();
        let keys: Vec<&str> = record.entries().iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["positions", "texcoords", "indices", "material"]);
        assert_eq!(
            record.get("indices"),
            Some(&Node::Value(Value::Integers(vec![0, 1, 2])))
        );
        assert_eq!(
            record.get("texcoords"),
            Some(&Node::Value(Value::Numbers(vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0])))
        );
    }

    #[test]
    fn test_transform_record_skips_unset_fields() {
        assert!(transform_record(&TransformScope::default()).is_empty());

        let scope = TransformScope {
            translate: Some([1.0, 2.0, 3.0]),
            rotate_axis: Some(AxisRotation {
                angle: 90.0,
                axis: [0.0, 1.0, 0.0],
            }),
            ..Default::default()
        };
        let record = transform_record(&scope);
        let keys: Vec<&str> = record.entries().iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["translate", "rotateAxis"]);
        assert_eq!(
            record.get("rotateAxis"),
            Some(&Node::Value(Value::Numbers(vec![90.0, 0.0, 1.0, 0.0])))
        );
    }

    #[test]
    fn test_markers_have_no_standalone_markup() {
        assert_eq!(write_shape(&Shape::TransformEnd).unwrap(), "");
    }
}
