use thiserror::Error;

#[derive(Error, Debug)]
pub enum TensorError {
    #[error("shape mismatch: cannot broadcast {lhs} with {rhs}")]
    ShapeMismatch { lhs: String, rhs: String },
    #[error("cannot reshape {numel} elements into {target}")]
    ReshapeMismatch { numel: usize, target: String },
    #[error("dtype mismatch: expected {expected}, got {got}")]
    DTypeMismatch { expected: String, got: String },
    #[error("invalid axis {axis} for tensor with {ndim} dimensions")]
    InvalidAxis { axis: usize, ndim: usize },
    #[error("unsupported dtype {dtype} for {op}")]
    UnsupportedDType { dtype: String, op: &'static str },
    #[error("dimension {axis} of {shape} is not resolved")]
    UnresolvedDim { axis: usize, shape: String },
    #[error("no feed provided for placeholder '{0}'")]
    MissingFeed(String),
    #[error("value does not belong to this backend: {0}")]
    ForeignValue(String),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, TensorError>;
