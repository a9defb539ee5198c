//! Probability distributions built on the `pd-tensor` engine.
//!
//! A distribution is constructed against a [`TensorOps`](pd_tensor::TensorOps)
//! backend. With [`CpuBackend`](pd_tensor::CpuBackend) every method returns a
//! computed tensor; with [`GraphBackend`](pd_tensor::GraphBackend) it returns
//! symbolic nodes evaluated later by `GraphBackend::run`.

pub mod distribution;
pub mod error;
pub mod param;
pub mod uniform;

pub use distribution::Distribution;
pub use error::{DistributionError, Result};
pub use param::{HostArray, HostData, Param};
pub use uniform::UniformDistribution;
