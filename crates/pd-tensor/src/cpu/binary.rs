//! Broadcasting element-wise kernels.

use std::fmt;
use std::ops::{Add, Div, Mul, Sub};

use crate::error::{Result, TensorError};
use crate::shape::Shape;
use crate::storage::CpuStorage;
use crate::tensor::Tensor;

/// Element-wise arithmetic operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinaryOp {
    pub fn name(&self) -> &'static str {
        match self {
            BinaryOp::Add => "add",
            BinaryOp::Sub => "subtract",
            BinaryOp::Mul => "multiply",
            BinaryOp::Div => "divide",
        }
    }

    fn apply<T>(self, a: T, b: T) -> T
    where
        T: Add<Output = T> + Sub<Output = T> + Mul<Output = T> + Div<Output = T>,
    {
        match self {
            BinaryOp::Add => a + b,
            BinaryOp::Sub => a - b,
            BinaryOp::Mul => a * b,
            BinaryOp::Div => a / b,
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// For every element of `out` (row-major), the offset of the element of a
/// `src`-shaped buffer that broadcasts onto it.
pub(crate) fn broadcast_offsets(src: &Shape, out: &Shape) -> Vec<usize> {
    let numel = out.numel();
    if numel == 0 {
        return Vec::new();
    }
    let src_strides = src.broadcast_strides(out);
    let out_strides = out.strides();

    let mut offsets = Vec::with_capacity(numel);
    for idx in 0..numel {
        let mut rem = idx;
        let mut offset = 0;
        for (axis, &stride) in out_strides.iter().enumerate() {
            let coord = rem / stride;
            rem %= stride;
            offset += coord * src_strides[axis];
        }
        offsets.push(offset);
    }
    offsets
}

fn zip_with<T: Copy, U>(
    a: &[T],
    a_shape: &Shape,
    b: &[T],
    b_shape: &Shape,
    out: &Shape,
    f: impl Fn(T, T) -> U,
) -> Vec<U> {
    let ia = broadcast_offsets(a_shape, out);
    let ib = broadcast_offsets(b_shape, out);
    ia.iter().zip(ib.iter()).map(|(&i, &j)| f(a[i], b[j])).collect()
}

fn dtype_mismatch(a: &Tensor, b: &Tensor) -> TensorError {
    TensorError::DTypeMismatch {
        expected: a.dtype().to_string(),
        got: b.dtype().to_string(),
    }
}

/// `a <op> b` with numpy broadcasting. Both operands must share a float dtype.
pub fn binary(op: BinaryOp, a: &Tensor, b: &Tensor) -> Result<Tensor> {
    let out = Shape::broadcast_shape(a.shape(), b.shape())?;
    let storage = match (a.storage(), b.storage()) {
        (CpuStorage::F32(x), CpuStorage::F32(y)) => CpuStorage::F32(zip_with(
            x,
            a.shape(),
            y,
            b.shape(),
            &out,
            |p, q| op.apply(p, q),
        )),
        (CpuStorage::F64(x), CpuStorage::F64(y)) => CpuStorage::F64(zip_with(
            x,
            a.shape(),
            y,
            b.shape(),
            &out,
            |p, q| op.apply(p, q),
        )),
        (CpuStorage::Bool(_), CpuStorage::Bool(_)) => {
            return Err(TensorError::UnsupportedDType {
                dtype: a.dtype().to_string(),
                op: op.name(),
            })
        }
        _ => return Err(dtype_mismatch(a, b)),
    };
    Tensor::new(storage, out)
}

/// Element-wise `a < b`, producing a `Bool` tensor.
pub fn less(a: &Tensor, b: &Tensor) -> Result<Tensor> {
    let out = Shape::broadcast_shape(a.shape(), b.shape())?;
    let data = match (a.storage(), b.storage()) {
        (CpuStorage::F32(x), CpuStorage::F32(y)) => {
            zip_with(x, a.shape(), y, b.shape(), &out, |p, q| p < q)
        }
        (CpuStorage::F64(x), CpuStorage::F64(y)) => {
            zip_with(x, a.shape(), y, b.shape(), &out, |p, q| p < q)
        }
        (CpuStorage::Bool(_), CpuStorage::Bool(_)) => {
            return Err(TensorError::UnsupportedDType {
                dtype: a.dtype().to_string(),
                op: "less_than",
            })
        }
        _ => return Err(dtype_mismatch(a, b)),
    };
    Tensor::from_bool(data, out)
}
