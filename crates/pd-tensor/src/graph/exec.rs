use std::collections::HashMap;

use log::trace;

use crate::backend::TensorOps;
use crate::cpu::{binary, CpuBackend};
use crate::error::{Result, TensorError};
use crate::random::RandomSource;
use crate::tensor::Tensor;

use super::node::{Node, Op};

/// Host tensors bound to placeholders by name.
pub type Feeds = HashMap<String, Tensor>;

fn input(values: &[Option<Tensor>], id: usize) -> Result<&Tensor> {
    values[id]
        .as_ref()
        .ok_or_else(|| TensorError::Other(format!("node {} was not evaluated", id)))
}

/// Evaluate `fetch` and every node it depends on, in index order.
pub(crate) fn execute(
    nodes: &[Node],
    fetch: usize,
    feeds: &Feeds,
    rng: &mut dyn RandomSource,
) -> Result<Tensor> {
    let mut needed = vec![false; fetch + 1];
    needed[fetch] = true;
    for id in (0..=fetch).rev() {
        if needed[id] {
            for i in nodes[id].op.inputs() {
                needed[i] = true;
            }
        }
    }

    let cpu = CpuBackend::new();
    let mut values: Vec<Option<Tensor>> = vec![None; fetch + 1];

    for id in 0..=fetch {
        if !needed[id] {
            continue;
        }
        let node = &nodes[id];
        let out = match &node.op {
            Op::Constant(t) => t.clone(),
            Op::Placeholder(name) => {
                let fed = feeds
                    .get(name)
                    .ok_or_else(|| TensorError::MissingFeed(name.clone()))?;
                if fed.dtype() != node.dtype {
                    return Err(TensorError::DTypeMismatch {
                        expected: node.dtype.to_string(),
                        got: fed.dtype().to_string(),
                    });
                }
                fed.clone()
            }
            Op::Binary { op, lhs, rhs } => {
                binary::binary(*op, input(&values, *lhs)?, input(&values, *rhs)?)?
            }
            Op::Less { lhs, rhs } => cpu.less(input(&values, *lhs)?, input(&values, *rhs)?)?,
            Op::Log(a) => cpu.log(input(&values, *a)?)?,
            Op::Cast(a) => cpu.cast(input(&values, *a)?, node.dtype)?,
            Op::Reshape { input: a, dims } => cpu.reshape(input(&values, *a)?, dims)?,
            Op::Full { shape, value } => cpu.full(shape, *value, node.dtype)?,
            Op::FullBatchSizeLike {
                like,
                dims,
                value,
                like_axis,
                out_axis,
            } => cpu.full_batch_size_like(
                input(&values, *like)?,
                dims,
                *value,
                node.dtype,
                *like_axis,
                *out_axis,
            )?,
            Op::Uniform {
                shape,
                min,
                max,
                seed,
            } => rng.uniform(shape, node.dtype, *min, *max, *seed)?,
            Op::UniformBatchSizeLike {
                like,
                min,
                max,
                seed,
            } => rng.uniform_like(input(&values, *like)?, node.dtype, *min, *max, *seed)?,
        };

        if !node.shape.admits(out.shape()) {
            return Err(TensorError::ShapeMismatch {
                lhs: node.shape.to_string(),
                rhs: out.shape().to_string(),
            });
        }
        trace!(
            "graph: node {} ({}{}) -> {}",
            id,
            node.op.kind(),
            node.name.as_deref().map(|n| format!(" '{}'", n)).unwrap_or_default(),
            out.shape()
        );
        values[id] = Some(out);
    }

    values[fetch]
        .take()
        .ok_or_else(|| TensorError::Other(format!("node {} was not evaluated", fetch)))
}
