use pd_distribution::{Distribution, HostArray, UniformDistribution};
use pd_random::StdRandomSource;
use pd_tensor::{CpuBackend, Shape, Tensor};
use proptest::prelude::*;

fn buffer(v: f64) -> HostArray {
    HostArray::from_f64(vec![v], Shape::new(vec![1]))
}

fn point(v: f64) -> Tensor {
    Tensor::from_f64(vec![v], Shape::new(vec![1])).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn entropy_is_log_width(low in -100.0_f64..100.0, width in 0.01_f64..100.0) {
        let ops = CpuBackend::new();
        let high = low + width;
        let u = UniformDistribution::new(&ops, buffer(low), buffer(high), None).unwrap();
        let e = u.entropy().unwrap().data_f64().unwrap()[0];
        prop_assert!((e - (high - low).ln()).abs() < 1e-12);
    }

    #[test]
    fn density_is_flat_inside(
        low in -100.0_f64..100.0,
        width in 0.01_f64..100.0,
        t in 0.01_f64..0.99,
    ) {
        let ops = CpuBackend::new();
        let high = low + width;
        let u = UniformDistribution::new(&ops, buffer(low), buffer(high), None).unwrap();
        let x = point(low + t * (high - low));

        let p = u.probs(&x).unwrap().data_f64().unwrap()[0];
        let lp = u.log_prob(&x).unwrap().data_f64().unwrap()[0];
        prop_assert!((p - 1.0 / (high - low)).abs() < 1e-9);
        prop_assert!((lp + (high - low).ln()).abs() < 1e-9);
        prop_assert!((lp - p.ln()).abs() < 1e-9);
    }

    #[test]
    fn density_vanishes_outside(
        low in -100.0_f64..100.0,
        width in 0.01_f64..100.0,
        gap in 0.01_f64..50.0,
        above in any::<bool>(),
    ) {
        let ops = CpuBackend::new();
        let high = low + width;
        let u = UniformDistribution::new(&ops, buffer(low), buffer(high), None).unwrap();
        let x = point(if above { high + gap } else { low - gap });

        let p = u.probs(&x).unwrap();
        prop_assert_eq!(p.data_f64().unwrap()[0], 0.0);
        let lp = u.log_prob(&x).unwrap();
        prop_assert_eq!(lp.data_f64().unwrap()[0], f64::NEG_INFINITY);
    }

    #[test]
    fn samples_have_extended_shape_and_stay_in_support(
        lows in prop::collection::vec(-50.0_f64..50.0, 1..4),
        width in 0.01_f64..20.0,
        sample_shape in prop::collection::vec(0usize..4, 0..3),
        seed in 1u64..u64::MAX,
    ) {
        let ops = CpuBackend::new();
        let highs: Vec<f64> = lows.iter().map(|l| l + width).collect();
        let u = UniformDistribution::new(&ops, lows.clone(), highs.clone(), None).unwrap();
        let s = u.sample(&sample_shape, seed, &mut StdRandomSource::seeded(0)).unwrap();

        let mut expected = sample_shape.clone();
        expected.push(lows.len());
        prop_assert_eq!(s.shape().dims(), expected.as_slice());

        let data = s.to_f64_vec();
        for (i, v) in data.iter().enumerate() {
            let j = i % lows.len();
            // Bounds are stored as float32.
            let (lo, hi) = (lows[j] as f32 as f64, highs[j] as f32 as f64);
            let tol = 1e-5 * (1.0 + hi.abs());
            prop_assert!(*v >= lo && *v <= hi + tol, "{} outside [{}, {}]", v, lo, hi);
        }
    }

    #[test]
    fn scalar_low_broadcasts_over_high(
        low in -10.0_f64..0.0,
        highs in prop::collection::vec(1.0_f64..10.0, 1..6),
    ) {
        let ops = CpuBackend::new();
        let n = highs.len();
        let u = UniformDistribution::new(&ops, low, highs, None).unwrap();
        prop_assert_eq!(u.batch_shape().as_static().unwrap().dims(), &[n]);

        let value = Tensor::from_f32(vec![0.5; n], Shape::new(vec![n])).unwrap();
        let lp = u.log_prob(&value).unwrap();
        prop_assert_eq!(lp.shape().dims(), &[n]);
        let p = u.probs(&value).unwrap();
        prop_assert_eq!(p.shape().dims(), &[n]);
        let entropy = u.entropy().unwrap();
        prop_assert_eq!(entropy.shape().dims(), &[n]);
    }
}
