//! Continuous uniform distribution with batched `low` / `high` parameters.
//!
//! The density is `1 / (high - low)` on `low < x < high` and zero elsewhere
//! (both boundaries are treated as outside the support). `low < high` is the
//! caller's responsibility and is never checked: violating it yields
//! negative or non-finite densities and entropies rather than an error.

use log::{debug, trace, warn};

use pd_tensor::{DType, Dim, RandomSource, Shape, SymbolicShape, TensorOps};

use crate::distribution::Distribution;
use crate::error::{DistributionError, Result};
use crate::param::Param;

/// A batch of uniform distributions on `[low, high)`.
///
/// Parameters broadcast against each other; `batch_shape` is their
/// broadcast shape. Built against any [`TensorOps`] backend: with an eager
/// backend every operation returns computed values, with a deferred one it
/// returns graph nodes named after the distribution.
#[derive(Debug)]
pub struct UniformDistribution<'a, B: TensorOps> {
    ops: &'a B,
    low: B::Value,
    high: B::Value,
    dtype: DType,
    batch_shape: SymbolicShape,
    all_scalar_inputs: bool,
    name: String,
}

fn invalid(arg: &'static str, reason: impl Into<String>) -> DistributionError {
    DistributionError::InvalidArgumentType {
        arg,
        reason: reason.into(),
    }
}

/// Up-front argument checks made in checked (deferred) mode.
fn validate<B: TensorOps>(ops: &B, arg: &'static str, param: &Param<B::Value>) -> Result<()> {
    match param {
        Param::Scalar(_) => Ok(()),
        Param::Sequence(a) | Param::Buffer(a) if !a.is_well_formed() => Err(invalid(
            arg,
            format!(
                "{} holds {} elements but has shape {}",
                param.kind(),
                a.data().len(),
                a.shape()
            ),
        )),
        Param::Sequence(_) | Param::Buffer(_) => Ok(()),
        Param::Tensor(v) if !ops.is_live(v) => Err(invalid(
            arg,
            format!("tensor is not a live value of the {} backend", ops.name()),
        )),
        Param::Tensor(v) if !ops.dtype_of(v).is_float() => Err(invalid(
            arg,
            format!("expected float32 or float64, got {}", ops.dtype_of(v)),
        )),
        Param::Tensor(_) => Ok(()),
    }
}

/// Convert two raw parameters into backend constants of their mixed dtype,
/// broadcast to a common shape.
fn raw_to_values<B: TensorOps>(
    ops: &B,
    low: &Param<B::Value>,
    high: &Param<B::Value>,
) -> Result<(B::Value, B::Value)> {
    let low = low.to_host("low")?;
    let high = high.to_host("high")?;
    let mixed = DType::promote(low.dtype(), high.dtype());
    let shape = Shape::broadcast_shape(low.shape(), high.shape())?;
    let low = low.broadcast_to(&shape)?.cast(mixed);
    let high = high.broadcast_to(&shape)?.cast(mixed);
    Ok((ops.constant(low)?, ops.constant(high)?))
}

impl<'a, B: TensorOps> UniformDistribution<'a, B> {
    /// Build a batch of uniform distributions.
    ///
    /// Two `Tensor` parameters are used as-is and the dtype is taken from
    /// `low`. Otherwise both are converted: the dtype defaults to
    /// `float32`, unless `low` (checked first) or `high` is a typed
    /// `float32`/`float64` buffer, whose element type is adopted.
    ///
    /// # Errors
    /// In checked mode, malformed parameters are `InvalidArgumentType`. In
    /// unchecked mode the same inputs fail while converting, with the tensor
    /// engine's error.
    pub fn new(
        ops: &'a B,
        low: impl Into<Param<B::Value>>,
        high: impl Into<Param<B::Value>>,
        name: Option<&str>,
    ) -> Result<Self> {
        let low = low.into();
        let high = high.into();
        let name = name.unwrap_or("Uniform").to_string();

        if ops.mode().is_checked() {
            validate(ops, "low", &low)?;
            validate(ops, "high", &high)?;
            if low.is_tensor() != high.is_tensor() {
                let (arg, other) = if low.is_tensor() {
                    ("high", &high)
                } else {
                    ("low", &low)
                };
                return Err(invalid(
                    arg,
                    format!("got a {} while the other parameter is a tensor", other.kind()),
                ));
            }
        }

        let all_scalar_inputs = low.is_scalar() && high.is_scalar();

        let (low, high, dtype) = match (low, high) {
            (Param::Tensor(low), Param::Tensor(high)) => {
                let dtype = ops.dtype_of(&low);
                (low, high, dtype)
            }
            (low, high) => {
                let dtype = low
                    .buffer_dtype()
                    .or_else(|| high.buffer_dtype())
                    .unwrap_or(DType::F32);
                let (low, high) = raw_to_values(ops, &low, &high)?;
                if ops.dtype_of(&low) != dtype {
                    (ops.cast(&low, dtype)?, ops.cast(&high, dtype)?, dtype)
                } else {
                    (low, high, dtype)
                }
            }
        };

        let batch_shape = SymbolicShape::broadcast(&ops.shape_of(&low), &ops.shape_of(&high))?;
        debug!(
            "{}: dtype={} batch_shape={} backend={} ({:?})",
            name,
            dtype,
            batch_shape,
            ops.name(),
            ops.mode()
        );

        Ok(Self {
            ops,
            low,
            high,
            dtype,
            batch_shape,
            all_scalar_inputs,
            name,
        })
    }

    pub fn low(&self) -> &B::Value {
        &self.low
    }

    pub fn high(&self) -> &B::Value {
        &self.high
    }

    pub fn dtype(&self) -> DType {
        self.dtype
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Both parameters were bare scalars.
    pub fn is_scalar(&self) -> bool {
        self.all_scalar_inputs
    }

    /// Bring `value` to the parameter dtype.
    fn check_value(&self, value: &B::Value) -> Result<B::Value> {
        let ops = self.ops;
        let dtype = ops.dtype_of(value);
        if ops.mode().is_checked() {
            if !ops.is_live(value) {
                return Err(invalid("value", "tensor is not a live value of this backend"));
            }
            if !dtype.is_float() {
                return Err(invalid(
                    "value",
                    format!("expected float32 or float64, got {}", dtype),
                ));
            }
        }
        if dtype != self.dtype && dtype.is_float() {
            warn!(
                "{}: dtype of value ({}) differs from the parameters ({}), converting",
                self.name, dtype, self.dtype
            );
            return Ok(ops.cast(value, self.dtype)?);
        }
        Ok(value.clone())
    }

    /// 1 where `low < value < high`, 0 elsewhere.
    fn support_indicator(&self, value: &B::Value) -> Result<B::Value> {
        let ops = self.ops;
        let lb = ops.cast(&ops.less(&self.low, value)?, self.dtype)?;
        let ub = ops.cast(&ops.less(value, &self.high)?, self.dtype)?;
        Ok(ops.mul(&lb, &ub)?)
    }

    fn span(&self) -> Result<B::Value> {
        Ok(self.ops.sub(&self.high, &self.low)?)
    }

    fn named(&self, value: B::Value, suffix: &str) -> B::Value {
        self.ops.with_name(value, &format!("{}_{}", self.name, suffix))
    }

    fn sample_static(
        &self,
        shape: &[usize],
        batch: &Shape,
        seed: u64,
        rng: &mut dyn RandomSource,
    ) -> Result<B::Value> {
        let ops = self.ops;
        let out_shape = Shape::new(shape.iter().chain(batch.dims()).copied().collect());
        trace!("{}: sampling {} with static batch shape", self.name, out_shape);

        let unit = ops.uniform(rng, &out_shape, self.dtype, 0.0, 1.0, seed)?;
        let out = ops.add(&self.low, &ops.mul(&unit, &self.span()?)?)?;
        if self.all_scalar_inputs {
            let dims: Vec<Dim> = shape.iter().map(|&d| Dim::Known(d)).collect();
            return Ok(ops.reshape(&out, &dims)?);
        }
        Ok(out)
    }

    /// Sampling when the leading batch dimension is only known at run time.
    ///
    /// The draw is laid out as `shape ++ batch` directly, with the unknown
    /// batch size copied from the leading dimension of `low + high`. A zero
    /// tensor of the same layout is added to `high - low` so the product
    /// carries the run-time dimension.
    fn sample_dynamic(
        &self,
        shape: &[usize],
        batch: &[Dim],
        seed: u64,
        rng: &mut dyn RandomSource,
    ) -> Result<B::Value> {
        let ops = self.ops;
        let out_dims: Vec<Dim> = shape
            .iter()
            .map(|&d| Dim::Known(d))
            .chain(batch.iter().copied())
            .collect();
        trace!(
            "{}: sampling {} with dynamic batch shape",
            self.name,
            SymbolicShape::from_dims(out_dims.clone())
        );

        let carrier = ops.add(&self.low, &self.high)?;
        let zero =
            ops.full_batch_size_like(&carrier, &out_dims, 0.0, self.dtype, 0, shape.len())?;
        let unit = ops.uniform_batch_size_like(rng, &zero, self.dtype, 0.0, 1.0, seed)?;

        let span = ops.sub(&ops.add(&zero, &self.high)?, &self.low)?;
        Ok(ops.add(&self.low, &ops.mul(&unit, &span)?)?)
    }
}

impl<'a, B: TensorOps> Distribution<B> for UniformDistribution<'a, B> {
    fn batch_shape(&self) -> &SymbolicShape {
        &self.batch_shape
    }

    fn sample(&self, shape: &[usize], seed: u64, rng: &mut dyn RandomSource) -> Result<B::Value> {
        let out = match &self.batch_shape {
            SymbolicShape::Static(batch) => self.sample_static(shape, batch, seed, rng)?,
            SymbolicShape::Dynamic(batch) => self.sample_dynamic(shape, batch, seed, rng)?,
        };
        Ok(self.named(out, "sample"))
    }

    fn log_prob(&self, value: &B::Value) -> Result<B::Value> {
        let ops = self.ops;
        let value = self.check_value(value)?;
        let inside = self.support_indicator(&value)?;
        let out = ops.sub(&ops.log(&inside)?, &ops.log(&self.span()?)?)?;
        Ok(self.named(out, "log_prob"))
    }

    fn probs(&self, value: &B::Value) -> Result<B::Value> {
        let ops = self.ops;
        let value = self.check_value(value)?;
        let inside = self.support_indicator(&value)?;
        let out = ops.div(&inside, &self.span()?)?;
        Ok(self.named(out, "probs"))
    }

    fn entropy(&self) -> Result<B::Value> {
        let out = self.ops.log(&self.span()?)?;
        Ok(self.named(out, "entropy"))
    }

    fn mean(&self) -> Result<B::Value> {
        let ops = self.ops;
        let two = ops.full(&Shape::scalar(), 2.0, self.dtype)?;
        let out = ops.div(&ops.add(&self.low, &self.high)?, &two)?;
        Ok(self.named(out, "mean"))
    }

    fn variance(&self) -> Result<B::Value> {
        let ops = self.ops;
        let span = self.span()?;
        let twelve = ops.full(&Shape::scalar(), 12.0, self.dtype)?;
        let out = ops.div(&ops.mul(&span, &span)?, &twelve)?;
        Ok(self.named(out, "variance"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::param::HostArray;
    use approx::assert_abs_diff_eq;
    use pd_random::{ScriptedSource, StdRandomSource};
    use pd_tensor::{CpuBackend, GraphBackend, Tensor, TensorError};

    fn cpu() -> CpuBackend {
        CpuBackend::new()
    }

    fn f32s(data: &[f32]) -> Tensor {
        Tensor::from_f32(data.to_vec(), Shape::new(vec![data.len()])).unwrap()
    }

    fn static_dims(d: &impl Distribution<CpuBackend>) -> Vec<usize> {
        d.batch_shape().as_static().unwrap().dims().to_vec()
    }

    #[test]
    fn test_defaults_to_float32() {
        let ops = cpu();
        let u = UniformDistribution::new(&ops, vec![0.0], vec![2.0], None).unwrap();
        assert_eq!(u.dtype(), DType::F32);
        assert_eq!(u.low().dtype(), DType::F32);
        assert_eq!(u.high().dtype(), DType::F32);
        assert_eq!(u.name(), "Uniform");
        assert_eq!(static_dims(&u), vec![1]);
        assert!(!u.is_scalar());
    }

    #[test]
    fn test_reference_values() {
        let ops = cpu();
        let u = UniformDistribution::new(&ops, vec![0.0], vec![2.0], None).unwrap();
        let value = f32s(&[0.8]);

        let entropy = u.entropy().unwrap();
        assert_eq!(entropy.shape().dims(), &[1]);
        assert_abs_diff_eq!(entropy.data_f32().unwrap()[0], 0.693_147_2, epsilon = 1e-6);

        let lp = u.log_prob(&value).unwrap();
        assert_abs_diff_eq!(lp.data_f32().unwrap()[0], -0.693_147_2, epsilon = 1e-6);

        let p = u.probs(&value).unwrap();
        assert_abs_diff_eq!(p.data_f32().unwrap()[0], 0.5, epsilon = 1e-6);
    }

    #[test]
    fn test_buffer_dtype_precedence() {
        let ops = cpu();
        let f64_buf = || HostArray::from_f64(vec![0.0, 1.0], Shape::new(vec![2]));
        let f32_buf = || HostArray::from_f32(vec![2.0, 3.0], Shape::new(vec![2]));

        let u = UniformDistribution::new(&ops, f64_buf(), 5.0, None).unwrap();
        assert_eq!(u.dtype(), DType::F64);

        let high = HostArray::from_f64(vec![4.0], Shape::new(vec![1]));
        let u = UniformDistribution::new(&ops, -1.0, high, None).unwrap();
        assert_eq!(u.dtype(), DType::F64);

        // `low` is consulted first.
        let u = UniformDistribution::new(&ops, f32_buf(), f64_buf(), None).unwrap();
        assert_eq!(u.dtype(), DType::F32);
        assert_eq!(u.high().dtype(), DType::F32);

        // Integer buffers never decide the dtype.
        let ints = HostArray::from_i64(vec![0, 1], Shape::new(vec![2]));
        let u = UniformDistribution::new(&ops, ints, vec![5.0, 6.0], None).unwrap();
        assert_eq!(u.dtype(), DType::F32);
    }

    #[test]
    fn test_tensor_parameters_taken_as_is() {
        let ops = cpu();
        let low = Tensor::from_f64(vec![0.0, 1.0], Shape::new(vec![2])).unwrap();
        let high = Tensor::from_f64(vec![1.0, 3.0], Shape::new(vec![2])).unwrap();
        let (lo, hi) = (Param::Tensor(low.clone()), Param::Tensor(high));
        let u = UniformDistribution::new(&ops, lo, hi, None).unwrap();
        assert_eq!(u.dtype(), DType::F64);
        assert_eq!(u.low(), &low);
        assert_eq!(static_dims(&u), vec![2]);
    }

    #[test]
    fn test_tensor_parameters_broadcast_batch_shape() {
        let ops = cpu();
        let low = Tensor::scalar(0.0, DType::F32);
        let high = f32s(&[1.0, 2.0, 4.0]);
        let (lo, hi) = (Param::Tensor(low), Param::Tensor(high));
        let u = UniformDistribution::new(&ops, lo, hi, None).unwrap();
        assert_eq!(static_dims(&u), vec![3]);
        let s = u.sample(&[2], 0, &mut StdRandomSource::seeded(1)).unwrap();
        assert_eq!(s.shape().dims(), &[2, 3]);
    }

    #[test]
    fn test_broadcast_parameters() {
        let ops = cpu();
        let u = UniformDistribution::new(&ops, 3.0, vec![5.0, 6.0, 7.0], None).unwrap();
        assert_eq!(static_dims(&u), vec![3]);
        assert_eq!(u.low().data_f32().unwrap(), &[3.0, 3.0, 3.0]);

        let value = f32s(&[4.0, 4.0, 4.0]);
        assert_eq!(u.log_prob(&value).unwrap().shape().dims(), &[3]);
        assert_eq!(u.probs(&value).unwrap().shape().dims(), &[3]);

        let entropy = u.entropy().unwrap();
        assert_eq!(entropy.shape().dims(), &[3]);
        let expected = [2.0f32.ln(), 3.0f32.ln(), 4.0f32.ln()];
        for (got, want) in entropy.data_f32().unwrap().iter().zip(expected) {
            assert_abs_diff_eq!(*got, want, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_nested_parameters() {
        let ops = cpu();
        let u = UniformDistribution::new(
            &ops,
            vec![vec![1.0, 2.0], vec![3.0, 4.0]],
            vec![vec![1.5, 2.5], vec![3.5, 4.5]],
            None,
        )
        .unwrap();
        assert_eq!(static_dims(&u), vec![2, 2]);
        let p = u.probs(&f32s(&[1.2, 2.2])).unwrap();
        assert_eq!(p.shape().dims(), &[2, 2]);
        assert_eq!(p.data_f32().unwrap(), &[2.0, 2.0, 0.0, 0.0]);
    }

    #[test]
    fn test_scalar_sample_is_squeezed() {
        let ops = cpu();
        let u = UniformDistribution::new(&ops, 3.0, 4.0, None).unwrap();
        assert!(u.is_scalar());
        let s = u.sample(&[2], 0, &mut StdRandomSource::seeded(5)).unwrap();
        assert_eq!(s.shape().dims(), &[2]);
        for v in s.data_f32().unwrap() {
            assert!(*v >= 3.0 && *v <= 4.0);
        }
    }

    #[test]
    fn test_integer_scalars_are_coerced() {
        let ops = cpu();
        let u = UniformDistribution::new(&ops, 1, 3, None).unwrap();
        assert!(u.is_scalar());
        assert_eq!(u.dtype(), DType::F32);
        let entropy = u.entropy().unwrap();
        assert_abs_diff_eq!(entropy.data_f32().unwrap()[0], 2.0f32.ln(), epsilon = 1e-6);
    }

    #[test]
    fn test_batched_sample_keeps_batch_dim() {
        let ops = cpu();
        let u = UniformDistribution::new(&ops, vec![0.0], vec![2.0], None).unwrap();
        let s = u.sample(&[2], 0, &mut StdRandomSource::seeded(5)).unwrap();
        assert_eq!(s.shape().dims(), &[2, 1]);
    }

    #[test]
    fn test_sample_rescales_unit_draws() {
        let ops = cpu();
        let u = UniformDistribution::new(&ops, vec![0.0, 10.0], vec![4.0, 20.0], None).unwrap();
        let mut rng = ScriptedSource::new(vec![0.5, 0.25]).unwrap();
        let s = u.sample(&[2], 0, &mut rng).unwrap();
        assert_eq!(s.shape().dims(), &[2, 2]);
        assert_eq!(s.data_f32().unwrap(), &[2.0, 12.5, 2.0, 12.5]);
    }

    #[test]
    fn test_sample_seed_is_reproducible() {
        let ops = cpu();
        let u = UniformDistribution::new(&ops, vec![-1.0, 0.0], vec![1.0, 5.0], None).unwrap();
        let a = u.sample(&[3], 11, &mut StdRandomSource::default()).unwrap();
        let b = u.sample(&[3], 11, &mut StdRandomSource::default()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_sample_shape() {
        let ops = cpu();
        let u = UniformDistribution::new(&ops, vec![0.0, 1.0], vec![1.0, 2.0], None).unwrap();
        let s = u.sample(&[], 0, &mut StdRandomSource::seeded(2)).unwrap();
        assert_eq!(s.shape().dims(), &[2]);
        let s = u.sample(&[0], 0, &mut StdRandomSource::seeded(2)).unwrap();
        assert_eq!(s.shape().dims(), &[0, 2]);
    }

    #[test]
    fn test_boundaries_are_outside_support() {
        let ops = cpu();
        let u = UniformDistribution::new(&ops, 1.0, 3.0, None).unwrap();
        let value = f32s(&[1.0, 2.0, 3.0, -4.0]);

        let p = u.probs(&value).unwrap();
        assert_eq!(p.data_f32().unwrap(), &[0.0, 0.5, 0.0, 0.0]);

        let lp = u.log_prob(&value).unwrap();
        let lp = lp.data_f32().unwrap();
        assert_eq!(lp[0], f32::NEG_INFINITY);
        assert_abs_diff_eq!(lp[1], -(2.0f32.ln()), epsilon = 1e-6);
        assert_eq!(lp[2], f32::NEG_INFINITY);
        assert_eq!(lp[3], f32::NEG_INFINITY);
    }

    #[test]
    fn test_value_dtype_is_converted() {
        let ops = cpu();
        let u = UniformDistribution::new(&ops, 0.0, 4.0, None).unwrap();
        let value = Tensor::from_f64(vec![1.0], Shape::new(vec![1])).unwrap();
        let p = u.probs(&value).unwrap();
        assert_eq!(p.dtype(), DType::F32);
        assert_eq!(p.data_f32().unwrap(), &[0.25]);
    }

    #[test]
    fn test_inverted_bounds_are_not_rejected() {
        let ops = cpu();
        let u = UniformDistribution::new(&ops, 2.0, 1.0, None).unwrap();
        assert!(u.entropy().unwrap().data_f32().unwrap()[0].is_nan());
        let p = u.probs(&f32s(&[1.5])).unwrap();
        assert_eq!(p.data_f32().unwrap()[0], 0.0);
    }

    #[test]
    fn test_mean_and_variance() {
        let ops = cpu();
        let u = UniformDistribution::new(&ops, vec![0.0, 2.0], vec![6.0, 3.0], None).unwrap();
        assert_eq!(u.mean().unwrap().data_f32().unwrap(), &[3.0, 2.5]);
        let var = u.variance().unwrap();
        let var = var.data_f32().unwrap();
        assert_abs_diff_eq!(var[0], 3.0, epsilon = 1e-6);
        assert_abs_diff_eq!(var[1], 1.0 / 12.0, epsilon = 1e-6);
    }

    #[test]
    fn test_extend_shape() {
        let ops = cpu();
        let u = UniformDistribution::new(&ops, vec![0.0, 0.0, 0.0], 1.0, None).unwrap();
        assert_eq!(u.event_shape(), Shape::scalar());
        assert_eq!(
            u.extend_shape(&[4, 5]),
            SymbolicShape::Static(Shape::new(vec![4, 5, 3]))
        );
    }

    #[test]
    fn test_value_shape_mismatch_propagates() {
        let ops = cpu();
        let u = UniformDistribution::new(&ops, vec![0.0, 0.0], vec![1.0, 1.0], None).unwrap();
        let err = u.log_prob(&f32s(&[0.5, 0.5, 0.5])).unwrap_err();
        assert!(matches!(
            err,
            DistributionError::Tensor(TensorError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_parameter_shape_mismatch() {
        let ops = cpu();
        let err =
            UniformDistribution::new(&ops, vec![0.0, 0.0], vec![1.0, 1.0, 1.0], None).unwrap_err();
        assert!(matches!(
            err,
            DistributionError::Tensor(TensorError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_unchecked_mode_defers_to_conversion() {
        let ops = cpu();
        let ragged = vec![vec![1.0, 2.0], vec![3.0]];
        let err = UniformDistribution::new(&ops, ragged, 5.0, None).unwrap_err();
        assert!(matches!(
            err,
            DistributionError::Tensor(TensorError::ReshapeMismatch { .. })
        ));

        let low = Param::Tensor(f32s(&[0.0]));
        let err = UniformDistribution::new(&ops, low, 1.0, None).unwrap_err();
        assert!(matches!(
            err,
            DistributionError::Tensor(TensorError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_checked_mode_rejects_malformed_parameters() {
        let g = GraphBackend::new();
        let ragged = vec![vec![1.0, 2.0], vec![3.0]];
        let err = UniformDistribution::new(&g, ragged, 5.0, None).unwrap_err();
        assert!(matches!(
            err,
            DistributionError::InvalidArgumentType { arg: "low", .. }
        ));

        let low = g.placeholder("low", vec![Dim::Known(1)], DType::F32);
        let err = UniformDistribution::new(&g, Param::Tensor(low), 1.0, None).unwrap_err();
        assert!(matches!(
            err,
            DistributionError::InvalidArgumentType { arg: "high", .. }
        ));

        let other = GraphBackend::new();
        let foreign = other.placeholder("x", vec![Dim::Known(1)], DType::F32);
        let mine = g.placeholder("y", vec![Dim::Known(1)], DType::F32);
        let err = UniformDistribution::new(&g, Param::Tensor(foreign), Param::Tensor(mine), None)
            .unwrap_err();
        assert!(matches!(
            err,
            DistributionError::InvalidArgumentType { arg: "low", .. }
        ));

        let flags = g.placeholder("flags", vec![Dim::Known(1)], DType::Bool);
        let hi = g.placeholder("hi", vec![Dim::Known(1)], DType::F32);
        let err = UniformDistribution::new(&g, Param::Tensor(flags), Param::Tensor(hi), None)
            .unwrap_err();
        assert!(matches!(
            err,
            DistributionError::InvalidArgumentType { arg: "low", .. }
        ));
    }

    #[test]
    fn test_checked_mode_rejects_non_float_value() {
        let g = GraphBackend::new();
        let u = UniformDistribution::new(&g, 0.0, 1.0, None).unwrap();
        let flags = g.placeholder("flags", vec![Dim::Known(2)], DType::Bool);
        assert!(matches!(
            u.log_prob(&flags),
            Err(DistributionError::InvalidArgumentType { arg: "value", .. })
        ));
    }

    #[test]
    fn test_unchecked_mode_bool_value_fails_in_engine() {
        let ops = cpu();
        let u = UniformDistribution::new(&ops, 0.0, 1.0, None).unwrap();
        let flags = Tensor::from_bool(vec![true], Shape::new(vec![1])).unwrap();
        assert!(matches!(
            u.probs(&flags),
            Err(DistributionError::Tensor(TensorError::DTypeMismatch { .. }))
        ));
    }
}
