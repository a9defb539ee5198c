use crate::cpu::binary::BinaryOp;
use crate::dtype::DType;
use crate::shape::{Dim, Shape, SymbolicShape};
use crate::tensor::Tensor;

/// One recorded operation. Inputs refer to earlier nodes by index, so the
/// node list is always in topological order.
#[derive(Debug, Clone)]
pub(crate) enum Op {
    Constant(Tensor),
    Placeholder(String),
    Binary {
        op: BinaryOp,
        lhs: usize,
        rhs: usize,
    },
    Less {
        lhs: usize,
        rhs: usize,
    },
    Log(usize),
    Cast(usize),
    Reshape {
        input: usize,
        dims: Vec<Dim>,
    },
    Full {
        shape: Shape,
        value: f64,
    },
    FullBatchSizeLike {
        like: usize,
        dims: Vec<Dim>,
        value: f64,
        like_axis: usize,
        out_axis: usize,
    },
    Uniform {
        shape: Shape,
        min: f64,
        max: f64,
        seed: u64,
    },
    UniformBatchSizeLike {
        like: usize,
        min: f64,
        max: f64,
        seed: u64,
    },
}

impl Op {
    pub(crate) fn inputs(&self) -> Vec<usize> {
        match self {
            Op::Constant(_) | Op::Placeholder(_) | Op::Full { .. } | Op::Uniform { .. } => {
                vec![]
            }
            Op::Binary { lhs, rhs, .. } | Op::Less { lhs, rhs } => vec![*lhs, *rhs],
            Op::Log(input) | Op::Cast(input) | Op::Reshape { input, .. } => vec![*input],
            Op::FullBatchSizeLike { like, .. } | Op::UniformBatchSizeLike { like, .. } => {
                vec![*like]
            }
        }
    }

    pub(crate) fn kind(&self) -> &'static str {
        match self {
            Op::Constant(_) => "constant",
            Op::Placeholder(_) => "placeholder",
            Op::Binary { op, .. } => op.name(),
            Op::Less { .. } => "less_than",
            Op::Log(_) => "log",
            Op::Cast(_) => "cast",
            Op::Reshape { .. } => "reshape",
            Op::Full { .. } => "fill_constant",
            Op::FullBatchSizeLike { .. } => "fill_constant_batch_size_like",
            Op::Uniform { .. } => "uniform_random",
            Op::UniformBatchSizeLike { .. } => "uniform_random_batch_size_like",
        }
    }
}

/// A recorded operation together with its inferred output metadata.
#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub(crate) op: Op,
    pub(crate) shape: SymbolicShape,
    pub(crate) dtype: DType,
    pub(crate) name: Option<String>,
}
