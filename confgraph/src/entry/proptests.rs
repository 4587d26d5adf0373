//! Property-based tests for entry validation.

use super::tests::{ratio_origin, sample_origins, Sample};
use super::*;
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 1000,
        .. ProptestConfig::default()
    })]

    // A bounded entry accepts exactly the values within its bounds
    #[test]
    fn bounded_accepts_iff_in_range(start in 0u8..=100, candidate in -500i64..500) {
        let (_handle, origins) = sample_origins(Sample { volume: start, ..Sample::default() });
        let entry = Entry::bounded(origins[0].clone(), 0.0, 100.0);

        let result = entry.set_value(Value::Integer(candidate));
        prop_assert_eq!(result.is_ok(), (0..=100).contains(&candidate));
    }

    // A rejected value never reaches the field
    #[test]
    fn rejected_value_leaves_field_untouched(start in 0u8..=100, candidate in 101i64..10_000) {
        let (handle, origins) = sample_origins(Sample { volume: start, ..Sample::default() });
        let entry = Entry::bounded(origins[0].clone(), 0.0, 100.0);

        prop_assert!(entry.set_value(Value::Integer(candidate)).is_err());
        prop_assert_eq!(handle.borrow().volume, start);
    }

    // Colors without alpha accept exactly the 24-bit range
    #[test]
    fn rgb_color_accepts_24_bits(candidate in any::<i32>()) {
        let (_handle, origins) = sample_origins(Sample::default());
        let entry = Entry::color(origins[1].clone(), false);

        let result = entry.set_value(Value::Integer(i64::from(candidate)));
        prop_assert_eq!(result.is_ok(), (0..=MAX_RGB).contains(&i64::from(candidate)));
    }

    // Float bounds reject NaN, infinities and anything outside the range
    #[test]
    fn float_bounds_accept_iff_finite_and_in_range(
        candidate in prop_oneof![
            Just(f64::NAN),
            Just(f64::INFINITY),
            Just(f64::NEG_INFINITY),
            -2.0f64..3.0,
        ]
    ) {
        let (handle, origin) = ratio_origin(0.5);
        let entry = Entry::slider(origin, 0.0, 1.0, 0.25);

        let result = entry.set_value(Value::Float(candidate));
        prop_assert_eq!(result.is_ok(), (0.0..=1.0).contains(&candidate));
        if result.is_err() {
            prop_assert!((handle.borrow().ratio - 0.5).abs() < f64::EPSILON);
        }
    }
}
