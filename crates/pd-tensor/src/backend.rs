use std::fmt::Debug;

use crate::dtype::DType;
use crate::error::Result;
use crate::random::RandomSource;
use crate::shape::{Dim, Shape, SymbolicShape};
use crate::tensor::Tensor;

/// How a backend schedules work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvalMode {
    /// Every operation computes its result immediately.
    Eager,
    /// Operations record graph nodes that are executed later.
    Deferred,
}

impl EvalMode {
    /// Deferred mode validates arguments up front, since failures would
    /// otherwise only show up when the graph runs.
    pub fn is_checked(&self) -> bool {
        matches!(self, EvalMode::Deferred)
    }
}

/// Trait for pluggable evaluation strategies (eager CPU, deferred graph).
///
/// Code written against `TensorOps` is oblivious to whether values are
/// computed now or later. The only thing it can observe is shape
/// information: a deferred value may report dimensions as
/// [`Dim::Unknown`] until it runs.
///
/// Binary operations broadcast numpy-style and require both operands to
/// have the same dtype.
pub trait TensorOps: Debug {
    /// Handle to a tensor living in this backend.
    type Value: Clone + Debug;

    /// Returns the name of this backend (e.g., "cpu", "graph").
    fn name(&self) -> &str;

    fn mode(&self) -> EvalMode;

    /// Whether `value` is a live value of this backend instance.
    fn is_live(&self, value: &Self::Value) -> bool;

    /// Lift a host tensor into the backend.
    fn constant(&self, tensor: Tensor) -> Result<Self::Value>;

    fn shape_of(&self, value: &Self::Value) -> SymbolicShape;

    fn dtype_of(&self, value: &Self::Value) -> DType;

    fn add(&self, a: &Self::Value, b: &Self::Value) -> Result<Self::Value>;

    fn sub(&self, a: &Self::Value, b: &Self::Value) -> Result<Self::Value>;

    fn mul(&self, a: &Self::Value, b: &Self::Value) -> Result<Self::Value>;

    fn div(&self, a: &Self::Value, b: &Self::Value) -> Result<Self::Value>;

    /// Element-wise `a < b` as a `Bool` value.
    fn less(&self, a: &Self::Value, b: &Self::Value) -> Result<Self::Value>;

    /// Element-wise natural logarithm.
    fn log(&self, a: &Self::Value) -> Result<Self::Value>;

    /// Convert to `dtype`, always producing a new value.
    fn cast(&self, a: &Self::Value, dtype: DType) -> Result<Self::Value>;

    /// Reshape to `dims`; at most one entry may be [`Dim::Unknown`] and is
    /// inferred from the element count.
    fn reshape(&self, a: &Self::Value, dims: &[Dim]) -> Result<Self::Value>;

    /// A value of the given shape filled with `value`.
    fn full(&self, shape: &Shape, value: f64, dtype: DType) -> Result<Self::Value>;

    /// A value filled with `value` whose dimension `out_axis` is copied from
    /// dimension `like_axis` of `like` when the computation runs.
    ///
    /// Every other entry of `dims` must be known.
    fn full_batch_size_like(
        &self,
        like: &Self::Value,
        dims: &[Dim],
        value: f64,
        dtype: DType,
        like_axis: usize,
        out_axis: usize,
    ) -> Result<Self::Value>;

    /// Draws from U[min, max) of the given shape.
    ///
    /// `seed == 0` draws from the state of `rng`; any other seed gives a
    /// reproducible stream. Deferred backends record the draw and take it
    /// from the source handed to execution instead.
    fn uniform(
        &self,
        rng: &mut dyn RandomSource,
        shape: &Shape,
        dtype: DType,
        min: f64,
        max: f64,
        seed: u64,
    ) -> Result<Self::Value>;

    /// Draws from U[min, max) shaped like `like` at run time.
    fn uniform_batch_size_like(
        &self,
        rng: &mut dyn RandomSource,
        like: &Self::Value,
        dtype: DType,
        min: f64,
        max: f64,
        seed: u64,
    ) -> Result<Self::Value>;

    /// Attach a diagnostic name. Only deferred backends keep it.
    fn with_name(&self, value: Self::Value, name: &str) -> Self::Value;
}
