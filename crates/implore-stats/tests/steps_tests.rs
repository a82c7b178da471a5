//! ECDF step-vertex integration tests
//!
//! Tabular cases with rstest, universal properties with proptest.

use std::num::NonZeroUsize;

use implore_stats::{ecdf_steps, linspace, unique_sorted, Ecdf};
use proptest::prelude::*;
use rstest::rstest;

// === Evaluation Points ===

#[rstest]
#[case(vec![3.0, 1.0, 2.0, 1.0], vec![1.0, 2.0, 3.0])]
#[case(vec![-1.0, -1.0], vec![-1.0])]
#[case(vec![0.5, 0.25, 1.0], vec![0.25, 0.5, 1.0])]
fn test_distinct_evaluation_points(#[case] input: Vec<f64>, #[case] expected: Vec<f64>) {
    let steps = ecdf_steps(&input, None).unwrap();
    assert_eq!(steps.evaluation_points(), expected.as_slice());
}

#[rstest]
#[case(vec![0.0, 10.0], 3, vec![0.0, 5.0, 10.0])]
#[case(vec![10.0, 0.0, 4.0], 2, vec![0.0, 10.0])]
#[case(vec![2.0, 6.0], 5, vec![2.0, 3.0, 4.0, 5.0, 6.0])]
fn test_interpolated_evaluation_points(
    #[case] input: Vec<f64>,
    #[case] n: usize,
    #[case] expected: Vec<f64>,
) {
    let steps = ecdf_steps(&input, NonZeroUsize::new(n)).unwrap();
    assert_eq!(steps.evaluation_points(), expected.as_slice());
}

// === Worked Examples ===

#[test]
fn test_ties_accumulate_jump_mass() {
    let steps = ecdf_steps(&[1.0, 2.0, 2.0, 3.0], None).unwrap();

    assert_eq!(steps.len(), 5);
    assert_eq!(steps.y(), &[0.0, 0.25, 0.75, 1.0, 1.0]);
    assert_eq!(steps.x()[0], 0.0);
    assert_eq!(steps.x()[4], 4.0);
}

#[test]
fn test_single_distinct_value_uses_single_point_padding() {
    let steps = ecdf_steps(&[5.0, 5.0, 5.0], None).unwrap();

    assert_eq!(steps.len(), 3);
    assert_eq!(steps.padding(), 5.0 / 16.0);
}

#[test]
fn test_negative_single_value_pads_by_magnitude() {
    let steps = ecdf_steps(&[-32.0], None).unwrap();
    assert_eq!(steps.x(), &[-34.0, -32.0, -30.0]);
}

// === Properties ===

fn sample() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-1.0e6..1.0e6f64, 1..200)
}

proptest! {
    #[test]
    fn test_y_bounded_and_monotone(data in sample(), n in prop::option::of(1usize..64)) {
        let steps = ecdf_steps(&data, n.and_then(NonZeroUsize::new)).unwrap();

        for w in steps.y().windows(2) {
            prop_assert!(w[0] <= w[1], "y must be non-decreasing: {:?}", steps.y());
        }
        for &y in steps.y() {
            prop_assert!((0.0..=1.0).contains(&y));
        }
    }

    #[test]
    fn test_x_monotone(data in sample(), n in prop::option::of(1usize..64)) {
        let steps = ecdf_steps(&data, n.and_then(NonZeroUsize::new)).unwrap();

        for w in steps.x().windows(2) {
            prop_assert!(w[0] <= w[1], "x must be non-decreasing: {:?}", steps.x());
        }
    }

    #[test]
    fn test_boundary_vertices(data in sample(), n in prop::option::of(1usize..64)) {
        let steps = ecdf_steps(&data, n.and_then(NonZeroUsize::new)).unwrap();

        prop_assert_eq!(steps.y()[0], 0.0);
        prop_assert_eq!(steps.y()[steps.len() - 1], 1.0);
    }

    #[test]
    fn test_length_is_points_plus_two(data in sample(), n in prop::option::of(1usize..64)) {
        let n = n.and_then(NonZeroUsize::new);
        let steps = ecdf_steps(&data, n).unwrap();

        let expected_points = match n {
            Some(n) => n.get(),
            None => unique_sorted(&data).len(),
        };
        prop_assert_eq!(steps.len(), expected_points + 2);
    }

    #[test]
    fn test_matches_counting_definition(data in sample()) {
        let steps = ecdf_steps(&data, None).unwrap();
        let total = data.len() as f64;

        for (v, y) in steps.points().skip(1).take(steps.len() - 2) {
            let count = data.iter().filter(|&&x| x <= v).count() as f64;
            prop_assert_eq!(y, count / total);
        }
    }

    #[test]
    fn test_idempotent(data in sample(), n in prop::option::of(1usize..64)) {
        let n = n.and_then(NonZeroUsize::new);
        prop_assert_eq!(ecdf_steps(&data, n).unwrap(), ecdf_steps(&data, n).unwrap());
    }

    #[test]
    fn test_linspace_spans_range(lo in -1.0e3..0.0f64, hi in 0.0..1.0e3f64, n in 2usize..100) {
        let values = linspace(lo, hi, NonZeroUsize::new(n).unwrap());
        prop_assert_eq!(values.len(), n);
        prop_assert_eq!(values[0], lo);
        prop_assert_eq!(values[n - 1], hi);
    }

    #[test]
    fn test_ecdf_reaches_one_at_max(data in sample()) {
        let ecdf = Ecdf::new(&data).unwrap();
        prop_assert_eq!(ecdf.evaluate(ecdf.max()), 1.0);
    }
}
