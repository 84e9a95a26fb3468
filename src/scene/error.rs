use thiserror::Error;

use super::CubeId;

/// Errors from scene mutations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SceneError {
    #[error("cube id {0} is already taken")]
    DuplicateId(CubeId),
    #[error("no cube with id {0}")]
    UnknownCube(CubeId),
}
