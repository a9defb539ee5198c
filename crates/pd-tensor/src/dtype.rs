use std::fmt;

/// Element types a tensor can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DType {
    /// 32-bit floating point.
    F32,
    /// 64-bit floating point.
    F64,
    /// Boolean, produced by comparisons.
    Bool,
}

impl DType {
    /// Returns the size in bytes of a single element.
    pub fn size_in_bytes(&self) -> usize {
        match self {
            DType::F32 => 4,
            DType::F64 => 8,
            DType::Bool => 1,
        }
    }

    /// Returns true for the floating point types.
    pub fn is_float(&self) -> bool {
        matches!(self, DType::F32 | DType::F64)
    }

    /// The wider of two floating point types.
    ///
    /// Used when mixing host buffers: anything involving `F64` stays `F64`.
    pub fn promote(a: DType, b: DType) -> DType {
        if a == DType::F64 || b == DType::F64 {
            DType::F64
        } else {
            DType::F32
        }
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DType::F32 => write!(f, "float32"),
            DType::F64 => write!(f, "float64"),
            DType::Bool => write!(f, "bool"),
        }
    }
}
