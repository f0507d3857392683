use serde::{Serialize, Deserialize};

use crate::math::matrix::Matrix;

/// Numeric precision a network's parameters and outputs are held at.
///
/// Storage is always `f64`; `F32` rounds every stored value through `f32`,
/// so an `F32` model behaves like one computed in single precision at
/// each layer boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Precision {
    #[default]
    F32,
    F64,
}

impl Precision {
    pub fn cast(&self, x: f64) -> f64 {
        match self {
            Precision::F32 => x as f32 as f64,
            Precision::F64 => x,
        }
    }

    pub fn cast_matrix(&self, m: &Matrix) -> Matrix {
        match self {
            Precision::F32 => m.map(|x| x as f32 as f64),
            Precision::F64 => m.clone(),
        }
    }
}
