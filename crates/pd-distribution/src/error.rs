use pd_tensor::TensorError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DistributionError {
    #[error("invalid argument type for `{arg}`: {reason}")]
    InvalidArgumentType { arg: &'static str, reason: String },
    #[error(transparent)]
    Tensor(#[from] TensorError),
}

pub type Result<T> = std::result::Result<T, DistributionError>;
