use pd_tensor::{Dim, RandomSource, Shape, SymbolicShape, TensorOps};

use crate::error::Result;

/// A batch of probability distributions over values of a `TensorOps` backend.
///
/// `batch_shape` counts independent distributions; `event_shape` is the
/// shape of a single draw from one of them.
pub trait Distribution<B: TensorOps> {
    fn batch_shape(&self) -> &SymbolicShape;

    /// Shape of one event. Empty for univariate families.
    fn event_shape(&self) -> Shape {
        Shape::scalar()
    }

    /// `sample_shape ++ batch_shape ++ event_shape`.
    fn extend_shape(&self, sample_shape: &[usize]) -> SymbolicShape {
        let dims = sample_shape
            .iter()
            .map(|&d| Dim::Known(d))
            .chain(self.batch_shape().dims())
            .chain(self.event_shape().dims().iter().map(|&d| Dim::Known(d)))
            .collect();
        SymbolicShape::from_dims(dims)
    }

    /// Draw samples with `shape` prepended to the batch shape.
    ///
    /// `seed == 0` uses the state of `rng`; other seeds are reproducible.
    fn sample(&self, shape: &[usize], seed: u64, rng: &mut dyn RandomSource) -> Result<B::Value>;

    /// Log of the density at `value`.
    fn log_prob(&self, value: &B::Value) -> Result<B::Value>;

    /// Density at `value`.
    fn probs(&self, value: &B::Value) -> Result<B::Value>;

    /// Shannon entropy in nats.
    fn entropy(&self) -> Result<B::Value>;

    fn mean(&self) -> Result<B::Value>;

    fn variance(&self) -> Result<B::Value>;
}
