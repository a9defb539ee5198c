//! Accepted representations of distribution parameters.

use log::warn;

use pd_tensor::{DType, Shape, Tensor, TensorError};

/// Element data of a host array.
#[derive(Debug, Clone, PartialEq)]
pub enum HostData {
    F32(Vec<f32>),
    F64(Vec<f64>),
    /// Integer data; converted to `float32` when used as a parameter.
    I64(Vec<i64>),
}

impl HostData {
    pub fn len(&self) -> usize {
        match self {
            HostData::F32(v) => v.len(),
            HostData::F64(v) => v.len(),
            HostData::I64(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The floating dtype the data carries, if any.
    pub fn float_dtype(&self) -> Option<DType> {
        match self {
            HostData::F32(_) => Some(DType::F32),
            HostData::F64(_) => Some(DType::F64),
            HostData::I64(_) => None,
        }
    }
}

/// Row-major host data with a shape. Not validated until it is used as a
/// parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct HostArray {
    data: HostData,
    shape: Shape,
}

impl HostArray {
    pub fn new(data: HostData, shape: Shape) -> Self {
        Self { data, shape }
    }

    pub fn from_f32(data: Vec<f32>, shape: Shape) -> Self {
        Self::new(HostData::F32(data), shape)
    }

    pub fn from_f64(data: Vec<f64>, shape: Shape) -> Self {
        Self::new(HostData::F64(data), shape)
    }

    pub fn from_i64(data: Vec<i64>, shape: Shape) -> Self {
        Self::new(HostData::I64(data), shape)
    }

    /// A 1-d array.
    pub fn vector(data: Vec<f64>) -> Self {
        let n = data.len();
        Self::from_f64(data, Shape::new(vec![n]))
    }

    /// A 2-d array from rows. The shape follows the first row, so ragged
    /// input produces an array whose length disagrees with its shape.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Self {
        let cols = rows.first().map_or(0, Vec::len);
        let shape = Shape::new(vec![rows.len(), cols]);
        Self::from_f64(rows.into_iter().flatten().collect(), shape)
    }

    pub fn data(&self) -> &HostData {
        &self.data
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Whether the data length matches the shape.
    pub fn is_well_formed(&self) -> bool {
        self.data.len() == self.shape.numel()
    }

    /// Materialise as a host tensor of the array's natural float dtype.
    fn to_tensor(&self) -> pd_tensor::Result<Tensor> {
        match &self.data {
            HostData::F32(v) => Tensor::from_f32(v.clone(), self.shape.clone()),
            HostData::F64(v) => Tensor::from_f64(v.clone(), self.shape.clone()),
            HostData::I64(v) => {
                warn!("integer parameter data is not floating point, converting to float32");
                let wide = v.iter().map(|&x| x as f64).collect();
                Ok(Tensor::from_f64(wide, self.shape.clone())?.cast(DType::F32))
            }
        }
    }
}

/// A distribution parameter.
///
/// Raw values are converted to backend values when the distribution is
/// built; `Tensor` values are taken as-is.
#[derive(Debug, Clone)]
pub enum Param<V> {
    /// A bare number. Integers convert into this variant as floats.
    Scalar(f64),
    /// A plain (possibly nested) numeric list.
    Sequence(HostArray),
    /// A typed buffer. A `float32`/`float64` buffer decides the dtype of
    /// the distribution.
    Buffer(HostArray),
    /// A value already living in the backend.
    Tensor(V),
}

impl<V> Param<V> {
    pub fn kind(&self) -> &'static str {
        match self {
            Param::Scalar(_) => "scalar",
            Param::Sequence(_) => "sequence",
            Param::Buffer(_) => "buffer",
            Param::Tensor(_) => "tensor",
        }
    }

    pub fn is_scalar(&self) -> bool {
        matches!(self, Param::Scalar(_))
    }

    pub fn is_tensor(&self) -> bool {
        matches!(self, Param::Tensor(_))
    }

    /// The dtype a typed float buffer asks for.
    pub(crate) fn buffer_dtype(&self) -> Option<DType> {
        match self {
            Param::Buffer(a) => a.data().float_dtype(),
            _ => None,
        }
    }

    /// Convert a raw parameter to a host tensor. Scalars become 0-d.
    pub(crate) fn to_host(&self, arg: &'static str) -> pd_tensor::Result<Tensor> {
        match self {
            Param::Scalar(v) => Ok(Tensor::scalar(*v, DType::F64)),
            Param::Sequence(a) | Param::Buffer(a) => a.to_tensor(),
            Param::Tensor(_) => Err(TensorError::InvalidArgument(format!(
                "`{}` is a backend value and cannot be mixed with raw values",
                arg
            ))),
        }
    }
}

impl<V> From<f64> for Param<V> {
    fn from(v: f64) -> Self {
        Param::Scalar(v)
    }
}

impl<V> From<f32> for Param<V> {
    fn from(v: f32) -> Self {
        Param::Scalar(v as f64)
    }
}

impl<V> From<i32> for Param<V> {
    fn from(v: i32) -> Self {
        Param::Scalar(v as f64)
    }
}

impl<V> From<i64> for Param<V> {
    fn from(v: i64) -> Self {
        Param::Scalar(v as f64)
    }
}

impl<V> From<Vec<f64>> for Param<V> {
    fn from(v: Vec<f64>) -> Self {
        Param::Sequence(HostArray::vector(v))
    }
}

impl<V> From<&[f64]> for Param<V> {
    fn from(v: &[f64]) -> Self {
        Param::Sequence(HostArray::vector(v.to_vec()))
    }
}

impl<V, const N: usize> From<[f64; N]> for Param<V> {
    fn from(v: [f64; N]) -> Self {
        Param::Sequence(HostArray::vector(v.to_vec()))
    }
}

impl<V> From<Vec<Vec<f64>>> for Param<V> {
    fn from(rows: Vec<Vec<f64>>) -> Self {
        Param::Sequence(HostArray::from_rows(rows))
    }
}

impl<V> From<HostArray> for Param<V> {
    fn from(a: HostArray) -> Self {
        Param::Buffer(a)
    }
}
