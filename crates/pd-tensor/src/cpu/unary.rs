use crate::error::{Result, TensorError};
use crate::storage::CpuStorage;
use crate::tensor::Tensor;

/// Natural logarithm. `log(0) = -inf`, negative inputs give NaN.
pub fn log(t: &Tensor) -> Result<Tensor> {
    let storage = match t.storage() {
        CpuStorage::F32(v) => CpuStorage::F32(v.iter().map(|x| x.ln()).collect()),
        CpuStorage::F64(v) => CpuStorage::F64(v.iter().map(|x| x.ln()).collect()),
        CpuStorage::Bool(_) => {
            return Err(TensorError::UnsupportedDType {
                dtype: t.dtype().to_string(),
                op: "log",
            })
        }
    };
    Tensor::new(storage, t.shape().clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::Shape;
    use approx::assert_relative_eq;

    #[test]
    fn test_log() {
        let t = Tensor::from_f64(vec![1.0, std::f64::consts::E, 0.0], Shape::new(vec![3])).unwrap();
        let r = log(&t).unwrap().to_f64_vec();
        assert_eq!(r[0], 0.0);
        assert_relative_eq!(r[1], 1.0, epsilon = 1e-12);
        assert_eq!(r[2], f64::NEG_INFINITY);
    }

    #[test]
    fn test_log_negative_is_nan() {
        let t = Tensor::from_f32(vec![-1.0], Shape::new(vec![1])).unwrap();
        assert!(log(&t).unwrap().data_f32().unwrap()[0].is_nan());
    }

    #[test]
    fn test_log_bool_rejected() {
        let t = Tensor::from_bool(vec![true], Shape::new(vec![1])).unwrap();
        assert!(log(&t).is_err());
    }
}
