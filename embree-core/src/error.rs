use thiserror::Error;

/// Structural defects in caller-supplied scene data.
///
/// Every variant is deterministic: re-running the same scene reproduces it,
/// so callers should treat all of them as fatal.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    #[error("Can't render shape of type \"{shape}\", {property} not valid: {value}.")]
    PropertyInvalid {
        shape: &'static str,
        property: &'static str,
        value: String,
    },

    #[error("Can't render shape of type \"{shape}\", {property} length not valid: {actual}. Should be: {expected}.")]
    PropertyLengthMismatch {
        shape: &'static str,
        property: &'static str,
        actual: usize,
        expected: usize,
    },

    #[error("Can't render material of type \"{code}\".")]
    MaterialInvalid { code: String },

    #[error("The scene to be raytraced does not contain any objects.")]
    SceneEmpty,
}

/// Failure to load a scene from its JSON form.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Invalid scene JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Scene(#[from] SceneError),
}

impl SceneError {
    /// Name of the offending shape property, if the error concerns one.
    pub fn property(&self) -> Option<&'static str> {
        match self {
            SceneError::PropertyInvalid { property, .. }
            | SceneError::PropertyLengthMismatch { property, .. } => Some(property),
            SceneError::MaterialInvalid { .. } | SceneError::SceneEmpty => None,
        }
    }
}
