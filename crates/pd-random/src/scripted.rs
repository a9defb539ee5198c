use pd_tensor::{DType, RandomSource, Result, Shape, Tensor, TensorError};

/// Replays a fixed list of unit draws, cycling when exhausted.
///
/// Each stored value `u` in [0, 1) is mapped to `min + u * (max - min)`.
/// Seed 0 continues from the shared cursor; any other seed replays from the
/// start of the list, mirroring how a seeded generator restarts its stream.
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    values: Vec<f64>,
    cursor: usize,
}

impl ScriptedSource {
    /// # Errors
    /// Returns `InvalidArgument` if `values` is empty or holds a value
    /// outside [0, 1).
    pub fn new(values: Vec<f64>) -> Result<Self> {
        if values.is_empty() {
            return Err(TensorError::InvalidArgument(
                "scripted source needs at least one value".to_string(),
            ));
        }
        if let Some(bad) = values.iter().find(|v| !(0.0..1.0).contains(*v)) {
            return Err(TensorError::InvalidArgument(format!(
                "scripted value {} is outside [0, 1)",
                bad
            )));
        }
        Ok(Self { values, cursor: 0 })
    }

    /// A source that always draws `value`.
    pub fn constant(value: f64) -> Result<Self> {
        Self::new(vec![value])
    }

    fn take(&self, start: usize, n: usize) -> Vec<f64> {
        (0..n)
            .map(|i| self.values[(start + i) % self.values.len()])
            .collect()
    }
}

impl RandomSource for ScriptedSource {
    fn name(&self) -> &str {
        "scripted"
    }

    fn uniform(
        &mut self,
        shape: &Shape,
        dtype: DType,
        min: f64,
        max: f64,
        seed: u64,
    ) -> Result<Tensor> {
        if !dtype.is_float() {
            return Err(TensorError::UnsupportedDType {
                dtype: dtype.to_string(),
                op: "uniform_random",
            });
        }
        let n = shape.numel();
        let units = if seed == 0 {
            let units = self.take(self.cursor, n);
            self.cursor = (self.cursor + n) % self.values.len();
            units
        } else {
            self.take(0, n)
        };
        let data = units.iter().map(|u| min + u * (max - min)).collect();
        Ok(Tensor::from_f64(data, shape.clone())?.cast(dtype))
    }
}
