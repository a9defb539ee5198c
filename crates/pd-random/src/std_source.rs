use log::debug;
use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::SeedableRng;

use pd_tensor::{CpuStorage, DType, RandomSource, Result, Shape, Tensor, TensorError};

use crate::config::SourceConfig;

/// Random source backed by `StdRng`.
///
/// Seed 0 draws from the source's own generator, so successive calls give
/// fresh values. Any other seed draws from a generator created for that
/// call with `StdRng::seed_from_u64`, so the same seed always reproduces
/// the same tensor.
#[derive(Debug)]
pub struct StdRandomSource {
    rng: StdRng,
}

impl StdRandomSource {
    /// Create a source from its configuration.
    pub fn new(config: &SourceConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => {
                debug!("StdRandomSource: seeded with {}", seed);
                StdRng::seed_from_u64(seed)
            }
            None => {
                debug!("StdRandomSource: seeded from entropy");
                StdRng::from_entropy()
            }
        };
        Self { rng }
    }

    /// Create a source whose own state starts from `seed`.
    pub fn seeded(seed: u64) -> Self {
        Self::new(&SourceConfig::with_seed(seed))
    }
}

impl Default for StdRandomSource {
    fn default() -> Self {
        Self::new(&SourceConfig::default())
    }
}

fn check_range(min: f64, max: f64) -> Result<()> {
    if !(min < max) || !(max - min).is_finite() {
        return Err(TensorError::InvalidArgument(format!(
            "uniform range requires finite min < max, got [{}, {})",
            min, max
        )));
    }
    Ok(())
}

fn draw(rng: &mut StdRng, n: usize, dtype: DType, min: f64, max: f64) -> Result<CpuStorage> {
    match dtype {
        DType::F32 => {
            let (lo, hi) = (min as f32, max as f32);
            check_range(lo as f64, hi as f64)?;
            let dist = Uniform::new(lo, hi);
            Ok(CpuStorage::F32((0..n).map(|_| dist.sample(rng)).collect()))
        }
        DType::F64 => {
            let dist = Uniform::new(min, max);
            Ok(CpuStorage::F64((0..n).map(|_| dist.sample(rng)).collect()))
        }
        DType::Bool => Err(TensorError::UnsupportedDType {
            dtype: dtype.to_string(),
            op: "uniform_random",
        }),
    }
}

impl RandomSource for StdRandomSource {
    fn name(&self) -> &str {
        "std"
    }

    fn uniform(
        &mut self,
        shape: &Shape,
        dtype: DType,
        min: f64,
        max: f64,
        seed: u64,
    ) -> Result<Tensor> {
        check_range(min, max)?;
        let storage = if seed == 0 {
            draw(&mut self.rng, shape.numel(), dtype, min, max)?
        } else {
            let mut rng = StdRng::seed_from_u64(seed);
            draw(&mut rng, shape.numel(), dtype, min, max)?
        };
        Tensor::new(storage, shape.clone())
    }
}
