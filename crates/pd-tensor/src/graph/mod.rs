//! Deferred evaluation.
//!
//! `GraphBackend` implements [`TensorOps`] by recording nodes instead of
//! computing. Shapes and dtypes are inferred while the graph is built, so
//! statically incompatible operands are rejected immediately; dimensions
//! declared [`Dim::Unknown`] on placeholders stay unknown until
//! [`GraphBackend::run`] binds concrete tensors to them.

mod exec;
mod node;

use std::cell::RefCell;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::backend::{EvalMode, TensorOps};
use crate::cpu::binary::BinaryOp;
use crate::cpu::resolve_batch_size_like;
use crate::dtype::DType;
use crate::error::{Result, TensorError};
use crate::random::RandomSource;
use crate::shape::{Dim, Shape, SymbolicShape};
use crate::tensor::Tensor;

pub use exec::Feeds;
use node::{Node, Op};

static NEXT_GRAPH_ID: AtomicU64 = AtomicU64::new(1);

/// Handle to a node of a [`GraphBackend`].
#[derive(Debug, Clone, PartialEq)]
pub struct Symbol {
    graph: u64,
    id: usize,
    shape: SymbolicShape,
    dtype: DType,
}

impl Symbol {
    pub fn shape(&self) -> &SymbolicShape {
        &self.shape
    }

    pub fn dtype(&self) -> DType {
        self.dtype
    }
}

/// Backend that records a computation graph for later execution.
#[derive(Debug)]
pub struct GraphBackend {
    id: u64,
    nodes: RefCell<Vec<Node>>,
}

impl GraphBackend {
    pub fn new() -> Self {
        GraphBackend {
            id: NEXT_GRAPH_ID.fetch_add(1, Ordering::Relaxed),
            nodes: RefCell::new(Vec::new()),
        }
    }

    /// Declare an input bound at run time. `dims` may contain unknowns.
    pub fn placeholder(&self, name: &str, dims: Vec<Dim>, dtype: DType) -> Symbol {
        self.push(
            Op::Placeholder(name.to_string()),
            SymbolicShape::from_dims(dims),
            dtype,
        )
    }

    /// Number of recorded nodes.
    pub fn len(&self) -> usize {
        self.nodes.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Diagnostic name attached to `symbol`, if any.
    pub fn node_name(&self, symbol: &Symbol) -> Option<String> {
        if !self.is_live(symbol) {
            return None;
        }
        self.nodes.borrow()[symbol.id].name.clone()
    }

    /// Execute the sub-graph producing `fetch`.
    ///
    /// Placeholders are bound from `feeds` and must match their declared
    /// dtype and known dimensions. Random nodes draw from `rng`.
    pub fn run(
        &self,
        fetch: &Symbol,
        feeds: &Feeds,
        rng: &mut dyn RandomSource,
    ) -> Result<Tensor> {
        self.check(fetch)?;
        let nodes = self.nodes.borrow();
        exec::execute(&nodes, fetch.id, feeds, rng)
    }

    fn push(&self, op: Op, shape: SymbolicShape, dtype: DType) -> Symbol {
        let mut nodes = self.nodes.borrow_mut();
        let id = nodes.len();
        nodes.push(Node {
            op,
            shape: shape.clone(),
            dtype,
            name: None,
        });
        Symbol {
            graph: self.id,
            id,
            shape,
            dtype,
        }
    }

    fn check(&self, symbol: &Symbol) -> Result<()> {
        if self.is_live(symbol) {
            Ok(())
        } else {
            Err(TensorError::ForeignValue(format!(
                "node {} of graph {} used in graph {}",
                symbol.id, symbol.graph, self.id
            )))
        }
    }

    fn check_pair(&self, a: &Symbol, b: &Symbol, op: &'static str) -> Result<SymbolicShape> {
        self.check(a)?;
        self.check(b)?;
        if a.dtype != b.dtype {
            return Err(TensorError::DTypeMismatch {
                expected: a.dtype.to_string(),
                got: b.dtype.to_string(),
            });
        }
        if !a.dtype.is_float() {
            return Err(TensorError::UnsupportedDType {
                dtype: a.dtype.to_string(),
                op,
            });
        }
        SymbolicShape::broadcast(&a.shape, &b.shape)
    }

    fn binary(&self, op: BinaryOp, a: &Symbol, b: &Symbol) -> Result<Symbol> {
        let shape = self.check_pair(a, b, op.name())?;
        Ok(self.push(
            Op::Binary {
                op,
                lhs: a.id,
                rhs: b.id,
            },
            shape,
            a.dtype,
        ))
    }
}

impl Default for GraphBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl TensorOps for GraphBackend {
    type Value = Symbol;

    fn name(&self) -> &str {
        "graph"
    }

    fn mode(&self) -> EvalMode {
        EvalMode::Deferred
    }

    fn is_live(&self, value: &Symbol) -> bool {
        value.graph == self.id && value.id < self.nodes.borrow().len()
    }

    fn constant(&self, tensor: Tensor) -> Result<Symbol> {
        let shape = SymbolicShape::Static(tensor.shape().clone());
        let dtype = tensor.dtype();
        Ok(self.push(Op::Constant(tensor), shape, dtype))
    }

    fn shape_of(&self, value: &Symbol) -> SymbolicShape {
        value.shape.clone()
    }

    fn dtype_of(&self, value: &Symbol) -> DType {
        value.dtype
    }

    fn add(&self, a: &Symbol, b: &Symbol) -> Result<Symbol> {
        self.binary(BinaryOp::Add, a, b)
    }

    fn sub(&self, a: &Symbol, b: &Symbol) -> Result<Symbol> {
        self.binary(BinaryOp::Sub, a, b)
    }

    fn mul(&self, a: &Symbol, b: &Symbol) -> Result<Symbol> {
        self.binary(BinaryOp::Mul, a, b)
    }

    fn div(&self, a: &Symbol, b: &Symbol) -> Result<Symbol> {
        self.binary(BinaryOp::Div, a, b)
    }

    fn less(&self, a: &Symbol, b: &Symbol) -> Result<Symbol> {
        let shape = self.check_pair(a, b, "less_than")?;
        Ok(self.push(Op::Less { lhs: a.id, rhs: b.id }, shape, DType::Bool))
    }

    fn log(&self, a: &Symbol) -> Result<Symbol> {
        self.check(a)?;
        if !a.dtype.is_float() {
            return Err(TensorError::UnsupportedDType {
                dtype: a.dtype.to_string(),
                op: "log",
            });
        }
        Ok(self.push(Op::Log(a.id), a.shape.clone(), a.dtype))
    }

    fn cast(&self, a: &Symbol, dtype: DType) -> Result<Symbol> {
        self.check(a)?;
        Ok(self.push(Op::Cast(a.id), a.shape.clone(), dtype))
    }

    fn reshape(&self, a: &Symbol, dims: &[Dim]) -> Result<Symbol> {
        self.check(a)?;
        let shape = match a.shape.as_static() {
            Some(s) => SymbolicShape::Static(Shape::infer_reshape(s.numel(), dims)?),
            None => {
                let unknown = dims.iter().filter(|d| d.is_unknown()).count();
                if unknown > 1 {
                    let axis = dims
                        .iter()
                        .enumerate()
                        .filter(|(_, d)| d.is_unknown())
                        .nth(1)
                        .map(|(i, _)| i)
                        .unwrap_or(0);
                    return Err(TensorError::UnresolvedDim {
                        axis,
                        shape: SymbolicShape::from_dims(dims.to_vec()).to_string(),
                    });
                }
                SymbolicShape::from_dims(dims.to_vec())
            }
        };
        Ok(self.push(
            Op::Reshape {
                input: a.id,
                dims: dims.to_vec(),
            },
            shape,
            a.dtype,
        ))
    }

    fn full(&self, shape: &Shape, value: f64, dtype: DType) -> Result<Symbol> {
        Ok(self.push(
            Op::Full {
                shape: shape.clone(),
                value,
            },
            SymbolicShape::Static(shape.clone()),
            dtype,
        ))
    }

    fn full_batch_size_like(
        &self,
        like: &Symbol,
        dims: &[Dim],
        value: f64,
        dtype: DType,
        like_axis: usize,
        out_axis: usize,
    ) -> Result<Symbol> {
        self.check(like)?;
        let shape = match like.shape.as_static() {
            Some(s) => {
                SymbolicShape::Static(resolve_batch_size_like(s, dims, like_axis, out_axis)?)
            }
            None => {
                let copied = like.shape.dim(like_axis)?;
                if out_axis >= dims.len() {
                    return Err(TensorError::InvalidAxis {
                        axis: out_axis,
                        ndim: dims.len(),
                    });
                }
                let mut out = dims.to_vec();
                out[out_axis] = copied;
                if let Some(axis) = (0..out.len()).find(|&i| i != out_axis && out[i].is_unknown()) {
                    return Err(TensorError::UnresolvedDim {
                        axis,
                        shape: SymbolicShape::from_dims(dims.to_vec()).to_string(),
                    });
                }
                SymbolicShape::from_dims(out)
            }
        };
        Ok(self.push(
            Op::FullBatchSizeLike {
                like: like.id,
                dims: dims.to_vec(),
                value,
                like_axis,
                out_axis,
            },
            shape,
            dtype,
        ))
    }

    fn uniform(
        &self,
        _rng: &mut dyn RandomSource,
        shape: &Shape,
        dtype: DType,
        min: f64,
        max: f64,
        seed: u64,
    ) -> Result<Symbol> {
        if !dtype.is_float() {
            return Err(TensorError::UnsupportedDType {
                dtype: dtype.to_string(),
                op: "uniform_random",
            });
        }
        Ok(self.push(
            Op::Uniform {
                shape: shape.clone(),
                min,
                max,
                seed,
            },
            SymbolicShape::Static(shape.clone()),
            dtype,
        ))
    }

    fn uniform_batch_size_like(
        &self,
        _rng: &mut dyn RandomSource,
        like: &Symbol,
        dtype: DType,
        min: f64,
        max: f64,
        seed: u64,
    ) -> Result<Symbol> {
        self.check(like)?;
        if !dtype.is_float() {
            return Err(TensorError::UnsupportedDType {
                dtype: dtype.to_string(),
                op: "uniform_random_batch_size_like",
            });
        }
        Ok(self.push(
            Op::UniformBatchSizeLike {
                like: like.id,
                min,
                max,
                seed,
            },
            like.shape.clone(),
            dtype,
        ))
    }

    fn with_name(&self, value: Symbol, name: &str) -> Symbol {
        if self.is_live(&value) {
            self.nodes.borrow_mut()[value.id].name = Some(name.to_string());
        }
        value
    }
}
