use crate::dtype::DType;
use crate::error::{Result, TensorError};

/// CPU-side tensor storage, one variant per element type.
#[derive(Debug, Clone, PartialEq)]
pub enum CpuStorage {
    /// 32-bit floating point storage.
    F32(Vec<f32>),
    /// 64-bit floating point storage.
    F64(Vec<f64>),
    /// Boolean storage.
    Bool(Vec<bool>),
}

impl CpuStorage {
    /// Number of elements in this storage.
    pub fn len(&self) -> usize {
        match self {
            CpuStorage::F32(v) => v.len(),
            CpuStorage::F64(v) => v.len(),
            CpuStorage::Bool(v) => v.len(),
        }
    }

    /// Returns true if the storage contains no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the dtype of this storage.
    pub fn dtype(&self) -> DType {
        match self {
            CpuStorage::F32(_) => DType::F32,
            CpuStorage::F64(_) => DType::F64,
            CpuStorage::Bool(_) => DType::Bool,
        }
    }

    /// Create storage of `n` copies of `value`.
    ///
    /// For `Bool`, any non-zero value is `true`.
    pub fn full(dtype: DType, n: usize, value: f64) -> Self {
        match dtype {
            DType::F32 => CpuStorage::F32(vec![value as f32; n]),
            DType::F64 => CpuStorage::F64(vec![value; n]),
            DType::Bool => CpuStorage::Bool(vec![value != 0.0; n]),
        }
    }

    /// Create zero-filled storage for the given dtype and element count.
    pub fn zeros(dtype: DType, n: usize) -> Self {
        Self::full(dtype, n, 0.0)
    }

    /// Returns the data as an f32 slice.
    ///
    /// # Errors
    /// Returns an error if the storage is not F32.
    pub fn as_f32_slice(&self) -> Result<&[f32]> {
        match self {
            CpuStorage::F32(v) => Ok(v.as_slice()),
            other => Err(mismatch(DType::F32, other.dtype())),
        }
    }

    /// Returns the data as an f64 slice.
    ///
    /// # Errors
    /// Returns an error if the storage is not F64.
    pub fn as_f64_slice(&self) -> Result<&[f64]> {
        match self {
            CpuStorage::F64(v) => Ok(v.as_slice()),
            other => Err(mismatch(DType::F64, other.dtype())),
        }
    }

    /// Returns the data as a bool slice.
    ///
    /// # Errors
    /// Returns an error if the storage is not Bool.
    pub fn as_bool_slice(&self) -> Result<&[bool]> {
        match self {
            CpuStorage::Bool(v) => Ok(v.as_slice()),
            other => Err(mismatch(DType::Bool, other.dtype())),
        }
    }

    /// Copy the elements out widened to f64. Booleans become 0.0 / 1.0.
    pub fn to_f64_vec(&self) -> Vec<f64> {
        match self {
            CpuStorage::F32(v) => v.iter().map(|&x| x as f64).collect(),
            CpuStorage::F64(v) => v.clone(),
            CpuStorage::Bool(v) => v.iter().map(|&b| if b { 1.0 } else { 0.0 }).collect(),
        }
    }

    /// Convert to another element type, always producing fresh storage.
    pub fn cast(&self, dtype: DType) -> CpuStorage {
        match (self, dtype) {
            (CpuStorage::F32(v), DType::F32) => CpuStorage::F32(v.clone()),
            (CpuStorage::F64(v), DType::F64) => CpuStorage::F64(v.clone()),
            (CpuStorage::Bool(v), DType::Bool) => CpuStorage::Bool(v.clone()),
            (CpuStorage::F64(v), DType::F32) => {
                CpuStorage::F32(v.iter().map(|&x| x as f32).collect())
            }
            (CpuStorage::F32(v), DType::Bool) => {
                CpuStorage::Bool(v.iter().map(|&x| x != 0.0).collect())
            }
            (CpuStorage::F64(v), DType::Bool) => {
                CpuStorage::Bool(v.iter().map(|&x| x != 0.0).collect())
            }
            (CpuStorage::Bool(v), DType::F32) => {
                CpuStorage::F32(v.iter().map(|&b| if b { 1.0 } else { 0.0 }).collect())
            }
            (other, DType::F64) => CpuStorage::F64(other.to_f64_vec()),
        }
    }
}

fn mismatch(expected: DType, got: DType) -> TensorError {
    TensorError::DTypeMismatch {
        expected: expected.to_string(),
        got: got.to_string(),
    }
}
