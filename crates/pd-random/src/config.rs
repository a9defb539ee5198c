use pd_tensor::{Result, TensorError};

/// Environment variable that pins the seed of the default source.
pub const SEED_ENV: &str = "PD_RANDOM_SEED";

/// Configuration for a [`StdRandomSource`](crate::StdRandomSource).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceConfig {
    /// Seed for the source's own state. `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl SourceConfig {
    /// A configuration with a fixed seed.
    pub fn with_seed(seed: u64) -> Self {
        Self { seed: Some(seed) }
    }

    /// Read the configuration from the environment.
    ///
    /// Reads `PD_RANDOM_SEED`; an unset or empty variable means entropy
    /// seeding.
    ///
    /// # Errors
    /// Returns `InvalidArgument` if the variable is set but is not a `u64`.
    pub fn from_env() -> Result<Self> {
        Self::parse(std::env::var(SEED_ENV).ok().as_deref())
    }

    fn parse(value: Option<&str>) -> Result<Self> {
        match value.map(str::trim) {
            None | Some("") => Ok(Self::default()),
            Some(raw) => raw.parse::<u64>().map(Self::with_seed).map_err(|e| {
                TensorError::InvalidArgument(format!("{}={:?}: {}", SEED_ENV, raw, e))
            }),
        }
    }
}
