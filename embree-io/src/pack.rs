use embree_core::material::{FieldValue, Material};

use crate::markup::{Node, Record, Value, WireKind};

/// One typed material parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub kind: WireKind,
    pub name: &'static str,
    pub value: Value,
}

/// A material reduced to its code and typed parameter list.
#[derive(Debug, Clone, PartialEq)]
pub struct PackedMaterial {
    pub code: &'static str,
    pub parameters: Vec<Param>,
}

impl PackedMaterial {
    pub fn param(&self, name: &str) -> Option<&Param> {
        self.parameters.iter().find(|p| p.name == name)
    }

    /// `<material>` content: the quoted code followed by the parameter list.
    pub fn to_node(&self) -> Node {
        let parameters = self
            .parameters
            .iter()
            .map(|p| Record::new().with_param(p.kind, p.name, p.value.clone()))
            .collect();
        Node::Record(
            Record::new()
                .with("code", Node::Value(Value::Text(self.code.to_string())))
                .with("parameters", Node::Records(parameters)),
        )
    }
}

/// Pack a material's declared fields into typed parameters.
///
/// A texture field with an empty path is left out.
pub fn pack_material(material: &Material) -> PackedMaterial {
    let parameters = material
        .fields()
        .into_iter()
        .filter_map(|(name, field)| {
            let (kind, value) = match field {
                FieldValue::Float(v) => (WireKind::Float, Value::Number(v)),
                FieldValue::Float2(v) => (WireKind::Float2, Value::from(v)),
                FieldValue::Float3(v) => (WireKind::Float3, Value::from(v)),
                FieldValue::Float4(v) => (WireKind::Float4, Value::from(v)),
                FieldValue::Texture(path) if path.is_empty() => {
                    log::debug!("Skipping unbound texture \"{}\" of {}", name, material.code());
                    return None;
                }
                FieldValue::Texture(path) => (WireKind::Texture, Value::Text(path)),
            };
            Some(Param { kind, name, value })
        })
        .collect();

    PackedMaterial {
        code: material.code(),
        parameters,
    }
}
