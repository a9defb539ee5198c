use std::fmt::Debug;

use crate::dtype::DType;
use crate::error::Result;
use crate::shape::Shape;
use crate::tensor::Tensor;

/// A source of i.i.d. uniform draws.
///
/// Implementations own their generator state; callers pass the source
/// explicitly to every operation that needs randomness. A `seed` of 0 asks
/// for the source's own state, any other value for a fresh stream seeded
/// with it.
pub trait RandomSource: Debug {
    /// Returns the name of this source.
    fn name(&self) -> &str;

    /// Draw a tensor of `shape` from U[min, max).
    fn uniform(
        &mut self,
        shape: &Shape,
        dtype: DType,
        min: f64,
        max: f64,
        seed: u64,
    ) -> Result<Tensor>;

    /// Draw a tensor shaped like `template` from U[min, max).
    fn uniform_like(
        &mut self,
        template: &Tensor,
        dtype: DType,
        min: f64,
        max: f64,
        seed: u64,
    ) -> Result<Tensor> {
        self.uniform(template.shape(), dtype, min, max, seed)
    }
}
