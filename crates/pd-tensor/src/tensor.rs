use crate::cpu::binary::broadcast_offsets;
use crate::dtype::DType;
use crate::error::{Result, TensorError};
use crate::shape::Shape;
use crate::storage::CpuStorage;

/// A host tensor: contiguous, row-major storage with an associated shape.
///
/// The element type lives in the storage variant. Tensors are immutable
/// values; every operation returns a new tensor.
#[derive(Debug, Clone, PartialEq)]
pub struct Tensor {
    storage: CpuStorage,
    shape: Shape,
}

impl Tensor {
    /// Create a tensor from storage and a shape.
    ///
    /// # Errors
    /// Returns `ReshapeMismatch` if the storage length differs from `shape.numel()`.
    pub fn new(storage: CpuStorage, shape: Shape) -> Result<Self> {
        if storage.len() != shape.numel() {
            return Err(TensorError::ReshapeMismatch {
                numel: storage.len(),
                target: shape.to_string(),
            });
        }
        Ok(Tensor { storage, shape })
    }

    pub fn from_f32(data: Vec<f32>, shape: Shape) -> Result<Self> {
        Self::new(CpuStorage::F32(data), shape)
    }

    pub fn from_f64(data: Vec<f64>, shape: Shape) -> Result<Self> {
        Self::new(CpuStorage::F64(data), shape)
    }

    pub fn from_bool(data: Vec<bool>, shape: Shape) -> Result<Self> {
        Self::new(CpuStorage::Bool(data), shape)
    }

    /// A 0-d tensor holding `value`.
    pub fn scalar(value: f64, dtype: DType) -> Self {
        Self::full(Shape::scalar(), value, dtype)
    }

    /// Create a tensor of the given shape with every element set to `value`.
    pub fn full(shape: Shape, value: f64, dtype: DType) -> Self {
        let storage = CpuStorage::full(dtype, shape.numel(), value);
        Tensor { storage, shape }
    }

    /// Create a zero-filled tensor with the given shape.
    pub fn zeros(shape: Shape, dtype: DType) -> Self {
        Self::full(shape, 0.0, dtype)
    }

    /// Returns a reference to the tensor's shape.
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Returns the tensor's data type.
    pub fn dtype(&self) -> DType {
        self.storage.dtype()
    }

    pub fn numel(&self) -> usize {
        self.shape.numel()
    }

    /// Returns the underlying storage reference.
    pub fn storage(&self) -> &CpuStorage {
        &self.storage
    }

    pub fn data_f32(&self) -> Result<&[f32]> {
        self.storage.as_f32_slice()
    }

    pub fn data_f64(&self) -> Result<&[f64]> {
        self.storage.as_f64_slice()
    }

    pub fn data_bool(&self) -> Result<&[bool]> {
        self.storage.as_bool_slice()
    }

    /// Copy the elements out as f64, whatever the dtype.
    pub fn to_f64_vec(&self) -> Vec<f64> {
        self.storage.to_f64_vec()
    }

    /// Reshape the tensor, returning a new tensor with the same data but
    /// a different shape.
    ///
    /// The total number of elements must remain the same.
    pub fn reshape(&self, new_shape: Shape) -> Result<Tensor> {
        if self.shape.numel() != new_shape.numel() {
            return Err(TensorError::ReshapeMismatch {
                numel: self.shape.numel(),
                target: new_shape.to_string(),
            });
        }
        Ok(Tensor {
            storage: self.storage.clone(),
            shape: new_shape,
        })
    }

    /// Convert to another dtype. Always allocates.
    pub fn cast(&self, dtype: DType) -> Tensor {
        Tensor {
            storage: self.storage.cast(dtype),
            shape: self.shape.clone(),
        }
    }

    /// Materialise this tensor broadcast to `target`.
    ///
    /// # Errors
    /// Returns `ShapeMismatch` if `target` is not a broadcast of this shape.
    pub fn broadcast_to(&self, target: &Shape) -> Result<Tensor> {
        let merged = Shape::broadcast_shape(&self.shape, target)?;
        if &merged != target {
            return Err(TensorError::ShapeMismatch {
                lhs: self.shape.to_string(),
                rhs: target.to_string(),
            });
        }
        let offsets = broadcast_offsets(&self.shape, target);
        let storage = match &self.storage {
            CpuStorage::F32(v) => CpuStorage::F32(offsets.iter().map(|&i| v[i]).collect()),
            CpuStorage::F64(v) => CpuStorage::F64(offsets.iter().map(|&i| v[i]).collect()),
            CpuStorage::Bool(v) => CpuStorage::Bool(offsets.iter().map(|&i| v[i]).collect()),
        };
        Tensor::new(storage, target.clone())
    }
}
