//! Property-based tests for normalization, classification and statistics.
//!
//! # Running Property Tests
//!
//! ```bash
//! cargo test -p varstat --test property_tests
//!
//! # More cases (slower but more thorough)
//! PROPTEST_CASES=10000 cargo test -p varstat --test property_tests
//! ```

use proptest::prelude::*;

use varstat::stats::dispersion::coefficient_of_variation;
use varstat::stats::{central, dispersion::std_dev};
use varstat::{
    Dataset, FrequencyTable, Normalized, NumericNormalizer, RawColumn, RawValue, SeparatrixSet,
    VarianceKind, VariableType, Varstat,
};

// =============================================================================
// Test Strategies
// =============================================================================

/// Integer part and one or two fractional digits of a decimal-comma number.
fn decimal_comma_parts() -> impl Strategy<Value = (bool, u32, String)> {
    (any::<bool>(), 0u32..1_000_000, "[0-9]{1,2}")
}

/// Arbitrary labels used for categorical columns.
fn label() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{0,12}"
}

/// Numeric values with bounded magnitude.
fn finite_values(min_len: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-1.0e6f64..1.0e6, min_len..200)
}

fn classify(cells: Vec<String>) -> VariableType {
    let column = RawColumn::new("col", cells.into_iter().map(RawValue::Text).collect());
    let summary = Varstat::new()
        .analyze_dataset(&Dataset::new("prop", vec![column]))
        .unwrap();
    summary.variables[0].variable_type.unwrap()
}

// =============================================================================
// Normalization
// =============================================================================

proptest! {
    #[test]
    fn decimal_comma_equals_dot_replacement((negative, int, frac) in decimal_comma_parts()) {
        let sign = if negative { "-" } else { "" };
        let raw = format!("{}{},{}", sign, int, frac);
        let expected: f64 = raw.replace(',', ".").parse().unwrap();

        prop_assert_eq!(NumericNormalizer::new().normalize(&raw).as_number(), Some(expected));
    }

    #[test]
    fn grouped_form_drops_separators(groups in prop::collection::vec(0u32..1000, 1..4), lead in 1u32..1000, frac in "[0-9]{1,2}") {
        let mut raw = lead.to_string();
        let mut plain = lead.to_string();
        for group in &groups {
            raw.push_str(&format!(".{:03}", group));
            plain.push_str(&format!("{:03}", group));
        }
        raw.push_str(&format!(",{}", frac));
        plain.push_str(&format!(".{}", frac));
        let expected: f64 = plain.parse().unwrap();

        prop_assert_eq!(NumericNormalizer::new().normalize(&raw).as_number(), Some(expected));
    }

    #[test]
    fn normalizer_never_yields_non_finite(raw in "\\PC{0,30}") {
        if let Normalized::Number { value, .. } = NumericNormalizer::new().normalize(&raw) {
            prop_assert!(value.is_finite());
        }
    }
}

#[test]
fn grouped_example() {
    assert_eq!(
        NumericNormalizer::new().normalize("1.000,50").as_number(),
        Some(1000.5)
    );
}

// =============================================================================
// Classification
// =============================================================================

proptest! {
    #[test]
    fn two_distinct_values_are_binary(a in label(), b in label(), pattern in prop::collection::vec(any::<bool>(), 2..50)) {
        prop_assume!(!a.trim().is_empty() && !b.trim().is_empty());
        // Distinct after normalization: "1" and "1.0" would collapse.
        let normalizer = NumericNormalizer::new();
        let (na, nb) = (normalizer.normalize(&a), normalizer.normalize(&b));
        prop_assume!(na != nb);
        prop_assume!(na.as_number().is_none() || na.as_number() != nb.as_number());

        let mut cells: Vec<String> = pattern
            .iter()
            .map(|&first| if first { a.clone() } else { b.clone() })
            .collect();
        cells[0] = a.clone();
        cells[1] = b.clone();

        prop_assert_eq!(classify(cells), VariableType::Binary);
    }

    #[test]
    fn integral_cardinality_flip(start in -1000i64..1000, repeats in 1usize..4) {
        let column = |distinct: i64| -> Vec<String> {
            (0..distinct)
                .flat_map(|i| std::iter::repeat_n((start + i).to_string(), repeats))
                .collect()
        };

        prop_assert_eq!(classify(column(29)), VariableType::Discrete);
        prop_assert_eq!(classify(column(30)), VariableType::Continuous);
    }
}

// =============================================================================
// Statistics
// =============================================================================

proptest! {
    #[test]
    fn frequencies_sum_to_one(labels in prop::collection::vec("[a-e]", 1..100)) {
        let table = FrequencyTable::categorical(&labels);
        prop_assert!((table.relative_sum() - 1.0).abs() < 1e-9);
        prop_assert_eq!(table.entries.last().unwrap().cumulative, 1.0);
    }

    #[test]
    fn grouped_frequencies_sum_to_one(values in finite_values(1), classes in 1usize..12) {
        let table = FrequencyTable::grouped(&values, classes);
        prop_assert_eq!(table.iter().map(|e| e.absolute).sum::<usize>(), values.len());
        prop_assert!((table.relative_sum() - 1.0).abs() < 1e-9);
        prop_assert_eq!(table.entries.last().unwrap().cumulative, 1.0);
    }

    #[test]
    fn quartiles_are_monotonic(values in finite_values(4)) {
        let set = SeparatrixSet::compute(&values).unwrap();
        let (q1, q2, q3) = (set.quartile(1).unwrap(), set.quartile(2).unwrap(), set.quartile(3).unwrap());
        prop_assert!(q1 <= q2 && q2 <= q3);
        prop_assert_eq!(Some(q2), central::median(&values));

        // Idempotent.
        prop_assert_eq!(SeparatrixSet::compute(&values), Some(set));
    }

    #[test]
    fn cv_absent_exactly_when_mean_is_zero(values in prop::collection::vec(-50i32..50, 2..60)) {
        let values: Vec<f64> = values.into_iter().map(f64::from).collect();
        let mean = central::mean(&values).unwrap();
        let std = std_dev(&values, VarianceKind::Population).unwrap();
        let cv = coefficient_of_variation(std, mean);

        let integer_sum: f64 = values.iter().sum();
        prop_assert_eq!(cv.is_none(), integer_sum == 0.0);
    }
}
