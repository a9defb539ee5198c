use crate::error::{Result, TensorError};
use std::fmt;

/// A concrete tensor shape, wrapping a vector of dimension sizes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Shape {
    dims: Vec<usize>,
}

impl Shape {
    /// Create a new shape from a vector of dimensions.
    pub fn new(dims: Vec<usize>) -> Self {
        Shape { dims }
    }

    /// Create a shape from a slice of dimensions.
    pub fn from_slice(dims: &[usize]) -> Self {
        Shape {
            dims: dims.to_vec(),
        }
    }

    /// The 0-d shape of a scalar.
    pub fn scalar() -> Self {
        Shape { dims: Vec::new() }
    }

    /// Number of dimensions (rank).
    pub fn ndim(&self) -> usize {
        self.dims.len()
    }

    /// Total number of elements (product of all dimension sizes).
    pub fn numel(&self) -> usize {
        self.dims.iter().product()
    }

    /// Returns the size of dimension `i`.
    ///
    /// # Panics
    /// Panics if `i >= ndim()`.
    pub fn dim(&self, i: usize) -> usize {
        self.dims[i]
    }

    /// Returns a reference to the underlying dimension sizes.
    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    /// Computes row-major contiguous strides for this shape.
    ///
    /// For a shape [d0, d1, d2], the strides are [d1*d2, d2, 1].
    pub fn strides(&self) -> Vec<usize> {
        if self.dims.is_empty() {
            return vec![];
        }
        let mut strides = vec![0usize; self.dims.len()];
        strides[self.dims.len() - 1] = 1;
        for i in (0..self.dims.len() - 1).rev() {
            strides[i] = strides[i + 1] * self.dims[i + 1];
        }
        strides
    }

    /// Strides for reading a tensor of this shape as if it had shape `out`.
    ///
    /// Missing leading dimensions and size-1 dimensions get stride 0 so the
    /// same element is revisited along them. `out` must be a broadcast of
    /// `self`.
    pub fn broadcast_strides(&self, out: &Shape) -> Vec<usize> {
        let offset = out.ndim() - self.ndim();
        let strides = self.strides();
        (0..out.ndim())
            .map(|i| {
                if i < offset || self.dims[i - offset] == 1 {
                    0
                } else {
                    strides[i - offset]
                }
            })
            .collect()
    }

    /// Compute the broadcast shape of `a` and `b` using numpy-style broadcasting rules.
    ///
    /// Rules:
    /// 1. If the shapes have different numbers of dimensions, the shorter shape is
    ///    padded with ones on the left.
    /// 2. For each dimension, sizes must either be equal, or one of them must be 1.
    ///    The output dimension is the maximum of the two.
    pub fn broadcast_shape(a: &Shape, b: &Shape) -> Result<Shape> {
        let max_ndim = a.ndim().max(b.ndim());
        let mut result = Vec::with_capacity(max_ndim);

        for i in 0..max_ndim {
            // Index from the right: dim at position (ndim - 1 - i) from the right
            let da = if i < a.ndim() {
                a.dims[a.ndim() - 1 - i]
            } else {
                1
            };
            let db = if i < b.ndim() {
                b.dims[b.ndim() - 1 - i]
            } else {
                1
            };

            if da == db {
                result.push(da);
            } else if da == 1 {
                result.push(db);
            } else if db == 1 {
                result.push(da);
            } else {
                return Err(TensorError::ShapeMismatch {
                    lhs: a.to_string(),
                    rhs: b.to_string(),
                });
            }
        }

        result.reverse();
        Ok(Shape::new(result))
    }

    /// Resolve a reshape target for `numel` elements.
    ///
    /// At most one entry of `target` may be [`Dim::Unknown`]; it is inferred
    /// from the element count.
    pub fn infer_reshape(numel: usize, target: &[Dim]) -> Result<Shape> {
        let unknown: Vec<usize> = target
            .iter()
            .enumerate()
            .filter(|(_, d)| d.is_unknown())
            .map(|(i, _)| i)
            .collect();
        if unknown.len() > 1 {
            return Err(TensorError::UnresolvedDim {
                axis: unknown[1],
                shape: dims_to_string(target),
            });
        }

        let known: usize = target.iter().filter_map(|d| d.known()).product();
        let mismatch = || TensorError::ReshapeMismatch {
            numel,
            target: dims_to_string(target),
        };

        let mut dims: Vec<usize> = target.iter().map(|d| d.known().unwrap_or(0)).collect();
        match unknown.first() {
            Some(&axis) => {
                if known == 0 || numel % known != 0 {
                    return Err(mismatch());
                }
                dims[axis] = numel / known;
            }
            None if known != numel => return Err(mismatch()),
            None => {}
        }
        Ok(Shape::new(dims))
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, d) in self.dims.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", d)?;
        }
        write!(f, "]")
    }
}

impl From<Vec<usize>> for Shape {
    fn from(dims: Vec<usize>) -> Self {
        Shape::new(dims)
    }
}

impl From<&[usize]> for Shape {
    fn from(dims: &[usize]) -> Self {
        Shape::from_slice(dims)
    }
}

/// A single dimension that may not be known until the computation runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dim {
    Known(usize),
    Unknown,
}

impl Dim {
    pub fn known(&self) -> Option<usize> {
        match self {
            Dim::Known(n) => Some(*n),
            Dim::Unknown => None,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Dim::Unknown)
    }
}

impl fmt::Display for Dim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dim::Known(n) => write!(f, "{}", n),
            Dim::Unknown => write!(f, "?"),
        }
    }
}

fn dims_to_string(dims: &[Dim]) -> String {
    let parts: Vec<String> = dims.iter().map(|d| d.to_string()).collect();
    format!("[{}]", parts.join(", "))
}

/// Shape information as seen while a computation is being built.
///
/// Eager values are always `Static`. Deferred values may carry dimensions
/// that are only resolved at execution time; a `Dynamic` shape always holds
/// at least one [`Dim::Unknown`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SymbolicShape {
    Static(Shape),
    Dynamic(Vec<Dim>),
}

impl SymbolicShape {
    /// Build from a list of dims, collapsing to `Static` when every dim is known.
    pub fn from_dims(dims: Vec<Dim>) -> Self {
        if dims.iter().any(Dim::is_unknown) {
            SymbolicShape::Dynamic(dims)
        } else {
            SymbolicShape::Static(Shape::new(
                dims.iter().filter_map(|d| d.known()).collect(),
            ))
        }
    }

    pub fn dims(&self) -> Vec<Dim> {
        match self {
            SymbolicShape::Static(s) => s.dims().iter().map(|&d| Dim::Known(d)).collect(),
            SymbolicShape::Dynamic(dims) => dims.clone(),
        }
    }

    pub fn ndim(&self) -> usize {
        match self {
            SymbolicShape::Static(s) => s.ndim(),
            SymbolicShape::Dynamic(dims) => dims.len(),
        }
    }

    pub fn dim(&self, axis: usize) -> Result<Dim> {
        let ndim = self.ndim();
        self.dims()
            .get(axis)
            .copied()
            .ok_or(TensorError::InvalidAxis { axis, ndim })
    }

    pub fn is_dynamic(&self) -> bool {
        matches!(self, SymbolicShape::Dynamic(_))
    }

    pub fn as_static(&self) -> Option<&Shape> {
        match self {
            SymbolicShape::Static(s) => Some(s),
            SymbolicShape::Dynamic(_) => None,
        }
    }

    /// Whether a concrete shape is a valid instance of this shape.
    pub fn admits(&self, shape: &Shape) -> bool {
        let dims = self.dims();
        dims.len() == shape.ndim()
            && dims
                .iter()
                .zip(shape.dims())
                .all(|(d, &n)| d.known().map_or(true, |k| k == n))
    }

    /// Broadcast two possibly-dynamic shapes.
    ///
    /// An unknown dim against 1 or another unknown stays unknown; against a
    /// known size greater than 1 it takes that size.
    pub fn broadcast(a: &SymbolicShape, b: &SymbolicShape) -> Result<SymbolicShape> {
        if let (Some(sa), Some(sb)) = (a.as_static(), b.as_static()) {
            return Shape::broadcast_shape(sa, sb).map(SymbolicShape::Static);
        }

        let (da, db) = (a.dims(), b.dims());
        let max_ndim = da.len().max(db.len());
        let mut result = Vec::with_capacity(max_ndim);
        for i in 0..max_ndim {
            let x = if i < da.len() { da[da.len() - 1 - i] } else { Dim::Known(1) };
            let y = if i < db.len() { db[db.len() - 1 - i] } else { Dim::Known(1) };
            let out = match (x, y) {
                (Dim::Known(p), Dim::Known(q)) if p == q => Dim::Known(p),
                (Dim::Known(1), other) | (other, Dim::Known(1)) => other,
                (Dim::Unknown, known) | (known, Dim::Unknown) => known,
                _ => {
                    return Err(TensorError::ShapeMismatch {
                        lhs: a.to_string(),
                        rhs: b.to_string(),
                    })
                }
            };
            result.push(out);
        }
        result.reverse();
        Ok(SymbolicShape::from_dims(result))
    }
}

impl fmt::Display for SymbolicShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SymbolicShape::Static(s) => write!(f, "{}", s),
            SymbolicShape::Dynamic(dims) => write!(f, "{}", dims_to_string(dims)),
        }
    }
}

impl From<Shape> for SymbolicShape {
    fn from(shape: Shape) -> Self {
        SymbolicShape::Static(shape)
    }
}
