pub mod binary;
pub mod unary;

use crate::backend::{EvalMode, TensorOps};
use crate::dtype::DType;
use crate::error::{Result, TensorError};
use crate::random::RandomSource;
use crate::shape::{Dim, Shape, SymbolicShape};
use crate::tensor::Tensor;

use self::binary::BinaryOp;

/// Pure-Rust eager backend.
///
/// Every operation computes its result immediately with straightforward
/// loops. Also serves as the kernel set the graph backend executes with.
#[derive(Debug, Clone)]
pub struct CpuBackend;

impl CpuBackend {
    pub fn new() -> Self {
        CpuBackend
    }
}

impl Default for CpuBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Output shape of a batch-size-like fill: `dims` with `out_axis` replaced by
/// dimension `like_axis` of `like`.
pub(crate) fn resolve_batch_size_like(
    like: &Shape,
    dims: &[Dim],
    like_axis: usize,
    out_axis: usize,
) -> Result<Shape> {
    if like_axis >= like.ndim() {
        return Err(TensorError::InvalidAxis {
            axis: like_axis,
            ndim: like.ndim(),
        });
    }
    if out_axis >= dims.len() {
        return Err(TensorError::InvalidAxis {
            axis: out_axis,
            ndim: dims.len(),
        });
    }

    let mut out = Vec::with_capacity(dims.len());
    for (axis, d) in dims.iter().enumerate() {
        if axis == out_axis {
            out.push(like.dim(like_axis));
            continue;
        }
        match d.known() {
            Some(n) => out.push(n),
            None => {
                return Err(TensorError::UnresolvedDim {
                    axis,
                    shape: SymbolicShape::from_dims(dims.to_vec()).to_string(),
                })
            }
        }
    }
    Ok(Shape::new(out))
}

impl TensorOps for CpuBackend {
    type Value = Tensor;

    fn name(&self) -> &str {
        "cpu"
    }

    fn mode(&self) -> EvalMode {
        EvalMode::Eager
    }

    fn is_live(&self, _value: &Tensor) -> bool {
        true
    }

    fn constant(&self, tensor: Tensor) -> Result<Tensor> {
        Ok(tensor)
    }

    fn shape_of(&self, value: &Tensor) -> SymbolicShape {
        SymbolicShape::Static(value.shape().clone())
    }

    fn dtype_of(&self, value: &Tensor) -> DType {
        value.dtype()
    }

    fn add(&self, a: &Tensor, b: &Tensor) -> Result<Tensor> {
        binary::binary(BinaryOp::Add, a, b)
    }

    fn sub(&self, a: &Tensor, b: &Tensor) -> Result<Tensor> {
        binary::binary(BinaryOp::Sub, a, b)
    }

    fn mul(&self, a: &Tensor, b: &Tensor) -> Result<Tensor> {
        binary::binary(BinaryOp::Mul, a, b)
    }

    fn div(&self, a: &Tensor, b: &Tensor) -> Result<Tensor> {
        binary::binary(BinaryOp::Div, a, b)
    }

    fn less(&self, a: &Tensor, b: &Tensor) -> Result<Tensor> {
        binary::less(a, b)
    }

    fn log(&self, a: &Tensor) -> Result<Tensor> {
        unary::log(a)
    }

    fn cast(&self, a: &Tensor, dtype: DType) -> Result<Tensor> {
        Ok(a.cast(dtype))
    }

    fn reshape(&self, a: &Tensor, dims: &[Dim]) -> Result<Tensor> {
        let shape = Shape::infer_reshape(a.numel(), dims)?;
        a.reshape(shape)
    }

    fn full(&self, shape: &Shape, value: f64, dtype: DType) -> Result<Tensor> {
        Ok(Tensor::full(shape.clone(), value, dtype))
    }

    fn full_batch_size_like(
        &self,
        like: &Tensor,
        dims: &[Dim],
        value: f64,
        dtype: DType,
        like_axis: usize,
        out_axis: usize,
    ) -> Result<Tensor> {
        let shape = resolve_batch_size_like(like.shape(), dims, like_axis, out_axis)?;
        Ok(Tensor::full(shape, value, dtype))
    }

    fn uniform(
        &self,
        rng: &mut dyn RandomSource,
        shape: &Shape,
        dtype: DType,
        min: f64,
        max: f64,
        seed: u64,
    ) -> Result<Tensor> {
        rng.uniform(shape, dtype, min, max, seed)
    }

    fn uniform_batch_size_like(
        &self,
        rng: &mut dyn RandomSource,
        like: &Tensor,
        dtype: DType,
        min: f64,
        max: f64,
        seed: u64,
    ) -> Result<Tensor> {
        rng.uniform_like(like, dtype, min, max, seed)
    }

    fn with_name(&self, value: Tensor, _name: &str) -> Tensor {
        value
    }
}
