use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SceneError;
use crate::geometry::{Vec2, Vec3, Vec4};

/// Texture bound to [`MatteTextured`] when none is given.
pub const DEFAULT_TEXTURE: &str = "assets/ash_uvgrid01.jpg";

/// The material codes understood by the renderer's scene loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MaterialKind {
    Matte,
    Plastic,
    Dielectric,
    ThinDielectric,
    Mirror,
    Metal,
    BrushedMetal,
    MetallicPaint,
    MatteTextured,
    Velvet,
}

impl MaterialKind {
    pub const ALL: [MaterialKind; 10] = [
        MaterialKind::Matte,
        MaterialKind::Plastic,
        MaterialKind::Dielectric,
        MaterialKind::ThinDielectric,
        MaterialKind::Mirror,
        MaterialKind::Metal,
        MaterialKind::BrushedMetal,
        MaterialKind::MetallicPaint,
        MaterialKind::MatteTextured,
        MaterialKind::Velvet,
    ];

    /// Code written into the `<code>` element of a packed material.
    pub fn code(self) -> &'static str {
        match self {
            MaterialKind::Matte => "Matte",
            MaterialKind::Plastic => "Plastic",
            MaterialKind::Dielectric => "Dielectric",
            MaterialKind::ThinDielectric => "ThinDielectric",
            MaterialKind::Mirror => "Mirror",
            MaterialKind::Metal => "Metal",
            MaterialKind::BrushedMetal => "BrushedMetal",
            MaterialKind::MetallicPaint => "MetallicPaint",
            MaterialKind::MatteTextured => "MatteTextured",
            MaterialKind::Velvet => "Velvet",
        }
    }
}

impl fmt::Display for MaterialKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for MaterialKind {
    type Err = SceneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MaterialKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.code() == s)
            .ok_or_else(|| SceneError::MaterialInvalid { code: s.to_string() })
    }
}

/// A single material parameter as declared by its variant.
///
/// The variant fixes the wire kind the packer emits for it.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Float(f64),
    Float2(Vec2),
    Float3(Vec3),
    Float4(Vec4),
    Texture(String),
}

/// Diffuse material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Matte {
    /// Diffuse reflectance, 0 (black) to 1 (white).
    pub reflectance: Vec3,
}

impl Default for Matte {
    fn default() -> Self {
        Self {
            reflectance: [1.0, 1.0, 1.0],
        }
    }
}

/// Dielectric coat over a diffuse pigment layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Plastic {
    pub pigment_color: Vec3,
    /// Refraction index of the coat.
    pub eta: f64,
    /// 0 (specular) to 1 (diffuse).
    pub roughness: f64,
}

impl Default for Plastic {
    fn default() -> Self {
        Self {
            pigment_color: [1.0, 1.0, 1.0],
            eta: 1.4,
            roughness: 0.01,
        }
    }
}

/// Glass-like dielectric with separate inside/outside media.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Dielectric {
    pub eta_outside: f64,
    pub eta_inside: f64,
    pub transmission_outside: Vec4,
    pub transmission: Vec4,
}

impl Default for Dielectric {
    fn default() -> Self {
        Self {
            eta_outside: 1.0,
            eta_inside: 1.4,
            transmission_outside: [1.0, 1.0, 1.0, 1.0],
            transmission: [1.0, 1.0, 1.0, 1.0],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThinDielectric {
    pub transmission: Vec3,
    pub eta: f64,
    /// Thickness of the material layer.
    pub thickness: f64,
}

impl Default for ThinDielectric {
    fn default() -> Self {
        Self {
            transmission: [1.0, 1.0, 1.0],
            eta: 1.4,
            thickness: 0.1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Mirror {
    pub reflectance: Vec3,
}

impl Default for Mirror {
    fn default() -> Self {
        Self {
            reflectance: [1.0, 1.0, 1.0],
        }
    }
}

/// Rough metal: microfacet BRDF with a conductor fresnel term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Metal {
    pub shade_color: Vec3,
    /// Real part of the refraction index.
    pub eta: Vec3,
    /// Imaginary part of the refraction index.
    pub k: Vec3,
    pub roughness: f64,
}

impl Default for Metal {
    fn default() -> Self {
        Self {
            shade_color: [1.0, 1.0, 1.0],
            eta: [1.4, 1.4, 1.4],
            k: [0.0, 0.0, 0.0],
            roughness: 0.01,
        }
    }
}

/// Anisotropic metal with separate roughness along X and Y.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrushedMetal {
    pub reflectance: Vec3,
    pub eta: Vec3,
    pub k: Vec3,
    pub roughness_x: f64,
    pub roughness_y: f64,
}

impl Default for BrushedMetal {
    fn default() -> Self {
        Self {
            reflectance: [1.0, 1.0, 1.0],
            eta: [1.4, 1.4, 1.4],
            k: [0.0, 0.0, 0.0],
            roughness_x: 0.01,
            roughness_y: 0.01,
        }
    }
}

/// Car paint: dielectric coat over a diffuse base with metallic glitter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetallicPaint {
    pub shade_color: Vec3,
    pub glitter_color: Vec3,
    pub glitter_spread: f64,
    pub eta: f64,
}

impl Default for MetallicPaint {
    fn default() -> Self {
        Self {
            shade_color: [1.0, 1.0, 1.0],
            glitter_color: [0.0, 0.0, 0.0],
            glitter_spread: 1.0,
            eta: 1.4,
        }
    }
}

/// Diffuse material whose reflectance comes from an image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatteTextured {
    /// Offset applied to texture coordinates.
    pub offset: Vec2,
    /// Scale applied to texture coordinates.
    pub scale: Vec2,
    /// Path of the texture image.
    pub texture: String,
}

impl Default for MatteTextured {
    fn default() -> Self {
        Self {
            offset: [0.0, 0.0],
            scale: [1.0, 1.0],
            texture: DEFAULT_TEXTURE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Velvet {
    pub reflectance: Vec3,
    /// 0 (none) upwards.
    pub back_scattering: f64,
    pub horizon_scattering_color: Vec3,
    pub horizon_scattering_fall_off: f64,
}

impl Default for Velvet {
    fn default() -> Self {
        Self {
            reflectance: [1.0, 1.0, 1.0],
            back_scattering: 0.0,
            horizon_scattering_color: [1.0, 1.0, 1.0],
            horizon_scattering_fall_off: 0.0,
        }
    }
}

/// A surface material owned by exactly one shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Material {
    Matte(Matte),
    Plastic(Plastic),
    Dielectric(Dielectric),
    ThinDielectric(ThinDielectric),
    Mirror(Mirror),
    Metal(Metal),
    BrushedMetal(BrushedMetal),
    MetallicPaint(MetallicPaint),
    MatteTextured(MatteTextured),
    Velvet(Velvet),
}

impl Default for Material {
    fn default() -> Self {
        Material::BrushedMetal(BrushedMetal::default())
    }
}

impl Material {
    /// A material of the given kind with its stock parameters.
    pub fn stock(kind: MaterialKind) -> Self {
        match kind {
            MaterialKind::Matte => Material::Matte(Matte::default()),
            MaterialKind::Plastic => Material::Plastic(Plastic::default()),
            MaterialKind::Dielectric => Material::Dielectric(Dielectric::default()),
            MaterialKind::ThinDielectric => Material::ThinDielectric(ThinDielectric::default()),
            MaterialKind::Mirror => Material::Mirror(Mirror::default()),
            MaterialKind::Metal => Material::Metal(Metal::default()),
            MaterialKind::BrushedMetal => Material::BrushedMetal(BrushedMetal::default()),
            MaterialKind::MetallicPaint => Material::MetallicPaint(MetallicPaint::default()),
            MaterialKind::MatteTextured => Material::MatteTextured(MatteTextured::default()),
            MaterialKind::Velvet => Material::Velvet(Velvet::default()),
        }
    }

    /// Parse a material code and build the stock material for it.
    pub fn from_code(code: &str) -> Result<Self, SceneError> {
        code.parse().map(Material::stock)
    }

    pub fn matte(reflectance: Vec3) -> Self {
        Material::Matte(Matte { reflectance })
    }

    pub fn plastic(pigment_color: Vec3) -> Self {
        Material::Plastic(Plastic {
            pigment_color,
            ..Default::default()
        })
    }

    pub fn kind(&self) -> MaterialKind {
        match self {
            Material::Matte(_) => MaterialKind::Matte,
            Material::Plastic(_) => MaterialKind::Plastic,
            Material::Dielectric(_) => MaterialKind::Dielectric,
            Material::ThinDielectric(_) => MaterialKind::ThinDielectric,
            Material::Mirror(_) => MaterialKind::Mirror,
            Material::Metal(_) => MaterialKind::Metal,
            Material::BrushedMetal(_) => MaterialKind::BrushedMetal,
            Material::MetallicPaint(_) => MaterialKind::MetallicPaint,
            Material::MatteTextured(_) => MaterialKind::MatteTextured,
            Material::Velvet(_) => MaterialKind::Velvet,
        }
    }

    pub fn code(&self) -> &'static str {
        self.kind().code()
    }

    /// The named parameters of this material, in declaration order.
    ///
    /// Names are the ones the renderer's scene loader looks up.
    pub fn fields(&self) -> Vec<(&'static str, FieldValue)> {
        use FieldValue::*;
        match self {
            Material::Matte(m) => vec![("reflectance", Float3(m.reflectance))],
            Material::Plastic(m) => vec![
                ("pigmentColor", Float3(m.pigment_color)),
                ("eta", Float(m.eta)),
                ("roughness", Float(m.roughness)),
            ],
            Material::Dielectric(m) => vec![
                ("etaOutside", Float(m.eta_outside)),
                ("etaInside", Float(m.eta_inside)),
                ("transmissionOutside", Float4(m.transmission_outside)),
                ("transmission", Float4(m.transmission)),
            ],
            Material::ThinDielectric(m) => vec![
                ("transmission", Float3(m.transmission)),
                ("eta", Float(m.eta)),
                ("thickness", Float(m.thickness)),
            ],
            Material::Mirror(m) => vec![("reflectance", Float3(m.reflectance))],
            Material::Metal(m) => vec![
                ("shadeColor", Float3(m.shade_color)),
                ("eta", Float3(m.eta)),
                ("k", Float3(m.k)),
                ("roughness", Float(m.roughness)),
            ],
            Material::BrushedMetal(m) => vec![
                ("reflectance", Float3(m.reflectance)),
                ("eta", Float3(m.eta)),
                ("k", Float3(m.k)),
                ("roughnessX", Float(m.roughness_x)),
                ("roughnessY", Float(m.roughness_y)),
            ],
            Material::MetallicPaint(m) => vec![
                ("shadeColor", Float3(m.shade_color)),
                ("glitterColor", Float3(m.glitter_color)),
                ("glitterSpread", Float(m.glitter_spread)),
                ("eta", Float(m.eta)),
            ],
            Material::MatteTextured(m) => vec![
                ("s0", Float2(m.offset)),
                ("ds", Float2(m.scale)),
                ("Kd", Texture(m.texture.clone())),
            ],
            Material::Velvet(m) => vec![
                ("reflectance", Float3(m.reflectance)),
                ("backScattering", Float(m.back_scattering)),
                ("horizonScatteringColor", Float3(m.horizon_scattering_color)),
                ("horizonScatteringFallOff", Float(m.horizon_scattering_fall_off)),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_brushed_metal() {
        let material = Material::default();
        assert_eq!(material.kind(), MaterialKind::BrushedMetal);
        assert_eq!(material.fields().len(), 5);
    }

    #[test]
    fn test_code_roundtrip_for_every_kind() {
        for kind in MaterialKind::ALL {
            assert_eq!(kind.code().parse::<MaterialKind>().unwrap(), kind);
            assert_eq!(Material::stock(kind).kind(), kind);
        }
    }

    #[test]
    fn test_unknown_code_is_material_invalid() {
        let err = Material::from_code("Chrome").unwrap_err();
        assert_eq!(
            err,
            SceneError::MaterialInvalid {
                code: "Chrome".into()
            }
        );
    }

    #[test]
    fn test_plastic_stock_parameters() {
        let plastic = Material::plastic([0.0, 0.0, 1.0]);
        let fields = plastic.fields();
        assert_eq!(fields[0], ("pigmentColor", FieldValue::Float3([0.0, 0.0, 1.0])));
        assert_eq!(fields[1], ("eta", FieldValue::Float(1.4)));
        assert_eq!(fields[2], ("roughness", FieldValue::Float(0.01)));
    }

    #[test]
    fn test_matte_textured_uses_default_texture() {
        let fields = Material::stock(MaterialKind::MatteTextured).fields();
        assert_eq!(fields[2], ("Kd", FieldValue::Texture(DEFAULT_TEXTURE.into())));
    }
}
