//! `pd-tensor` - Tensor engine and evaluation strategies for the probability distributions.
//!
//! This crate provides:
//! - A host `Tensor` type backed by CPU storage (f32, f64, bool)
//! - Concrete and symbolic shapes, with numpy-style broadcasting
//! - The `TensorOps` trait that distribution code is written against
//! - An eager `CpuBackend` and a deferred `GraphBackend`
//! - The `RandomSource` trait for seeded uniform draws

pub mod backend;
pub mod cpu;
pub mod dtype;
pub mod error;
pub mod graph;
pub mod random;
pub mod shape;
pub mod storage;
pub mod tensor;

// Re-export primary types at the crate root for convenience.
pub use backend::{EvalMode, TensorOps};
pub use cpu::CpuBackend;
pub use dtype::DType;
pub use error::{Result, TensorError};
pub use graph::{Feeds, GraphBackend, Symbol};
pub use random::RandomSource;
pub use shape::{Dim, Shape, SymbolicShape};
pub use storage::CpuStorage;
pub use tensor::Tensor;
