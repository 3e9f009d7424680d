//! Threshold classifier integration tests
//!
//! Tests for farm state classification including:
//! - Exact band boundaries for every quantity
//! - Unknown for absent or non-finite inputs
//! - Pest risk triggers

use proptest::prelude::*;
use shared::{
    classify, classify_moisture, classify_nutrient, classify_pest_risk, classify_ph, CropHealth,
    FarmSnapshot, FieldValue, GpsCoordinates, MoistureStatus, NutrientStatus, PestRisk, PhStatus,
    SnapshotValues, Thresholds,
};

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_nitrogen_boundaries_are_exact() {
        let t = Thresholds::default();
        assert_eq!(classify_nutrient(Some(40.0), &t.nitrogen), NutrientStatus::Good);
        assert_eq!(classify_nutrient(Some(39.999), &t.nitrogen), NutrientStatus::Low);
        assert_eq!(classify_nutrient(Some(60.0), &t.nitrogen), NutrientStatus::Good);
        assert_eq!(classify_nutrient(Some(60.001), &t.nitrogen), NutrientStatus::High);
    }

    #[test]
    fn test_phosphorus_and_potassium_boundaries() {
        let t = Thresholds::default();
        assert_eq!(classify_nutrient(Some(19.999), &t.phosphorus), NutrientStatus::Low);
        assert_eq!(classify_nutrient(Some(20.0), &t.phosphorus), NutrientStatus::Good);
        assert_eq!(classify_nutrient(Some(40.0), &t.phosphorus), NutrientStatus::Good);
        assert_eq!(classify_nutrient(Some(40.001), &t.phosphorus), NutrientStatus::High);

        assert_eq!(classify_nutrient(Some(149.999), &t.potassium), NutrientStatus::Low);
        assert_eq!(classify_nutrient(Some(150.0), &t.potassium), NutrientStatus::Good);
        assert_eq!(classify_nutrient(Some(250.0), &t.potassium), NutrientStatus::Good);
        assert_eq!(classify_nutrient(Some(250.001), &t.potassium), NutrientStatus::High);
    }

    #[test]
    fn test_ph_boundaries() {
        let t = Thresholds::default();
        assert_eq!(classify_ph(Some(5.999), &t), PhStatus::Acidic);
        assert_eq!(classify_ph(Some(6.0), &t), PhStatus::Neutral);
        assert_eq!(classify_ph(Some(7.5), &t), PhStatus::Neutral);
        assert_eq!(classify_ph(Some(7.501), &t), PhStatus::Alkaline);
    }

    #[test]
    fn test_moisture_boundaries() {
        let t = Thresholds::default();
        assert_eq!(classify_moisture(Some(34.999), &t), MoistureStatus::Dry);
        assert_eq!(classify_moisture(Some(35.0), &t), MoistureStatus::Normal);
        assert_eq!(classify_moisture(Some(65.0), &t), MoistureStatus::Normal);
        assert_eq!(classify_moisture(Some(65.001), &t), MoistureStatus::Wet);
    }

    #[test]
    fn test_zero_is_a_real_measurement() {
        let t = Thresholds::default();
        assert_eq!(classify_nutrient(Some(0.0), &t.nitrogen), NutrientStatus::Low);
        assert_eq!(classify_moisture(Some(0.0), &t), MoistureStatus::Dry);
    }

    #[test]
    fn test_pest_risk_requires_strict_excess() {
        let t = Thresholds::default();
        assert_eq!(classify_pest_risk(Some(31.0), Some(61.0), &t), PestRisk::High);
        assert_eq!(classify_pest_risk(Some(30.0), Some(61.0), &t), PestRisk::Medium);
        assert_eq!(classify_pest_risk(Some(26.0), Some(51.0), &t), PestRisk::Medium);
        assert_eq!(classify_pest_risk(Some(25.0), Some(51.0), &t), PestRisk::Low);
        assert_eq!(classify_pest_risk(Some(32.0), Some(20.0), &t), PestRisk::Low);
    }

    #[test]
    fn test_pest_risk_unknown_without_both_inputs() {
        let t = Thresholds::default();
        assert_eq!(classify_pest_risk(None, Some(70.0), &t), PestRisk::Unknown);
        assert_eq!(classify_pest_risk(Some(35.0), None, &t), PestRisk::Unknown);
        assert_eq!(classify_pest_risk(Some(f64::NAN), Some(70.0), &t), PestRisk::Unknown);
    }

    #[test]
    fn test_empty_snapshot_is_all_unknown() {
        let snapshot =
            FarmSnapshot::unknown_at(FieldValue::defaulted(GpsCoordinates::new(17.4065, 78.4772)));
        let status = classify(&snapshot, &Thresholds::default());

        assert_eq!(status.nitrogen, NutrientStatus::Unknown);
        assert_eq!(status.phosphorus, NutrientStatus::Unknown);
        assert_eq!(status.potassium, NutrientStatus::Unknown);
        assert_eq!(status.ph, PhStatus::Unknown);
        assert_eq!(status.moisture, MoistureStatus::Unknown);
        assert_eq!(status.pest_risk, PestRisk::Unknown);
        assert_eq!(status.crop_health, CropHealth::Unknown);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    /// Strategy for an optional measurement that is sometimes missing
    fn maybe_value() -> impl Strategy<Value = Option<f64>> {
        prop_oneof![Just(None), (-50.0f64..400.0).prop_map(Some)]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Absent inputs classify as unknown for every quantity
        #[test]
        fn prop_absent_is_unknown(
            n in maybe_value(),
            ph in maybe_value(),
            moisture in maybe_value(),
            ndvi in maybe_value(),
        ) {
            let values = SnapshotValues {
                nitrogen: n,
                ph,
                moisture,
                ndvi,
                ..Default::default()
            };
            let status = shared::classify_values(&values, &Thresholds::default());

            prop_assert_eq!(n.is_none(), status.nitrogen == NutrientStatus::Unknown);
            prop_assert_eq!(ph.is_none(), status.ph == PhStatus::Unknown);
            prop_assert_eq!(moisture.is_none(), status.moisture == MoistureStatus::Unknown);
            prop_assert_eq!(ndvi.is_none(), status.crop_health == CropHealth::Unknown);
            // Temperature is never set here
            prop_assert_eq!(status.pest_risk, PestRisk::Unknown);
            prop_assert_eq!(status.phosphorus, NutrientStatus::Unknown);
        }

        /// Nutrient classification is monotone in the measured value
        #[test]
        fn prop_nutrient_classification_monotone(a in 0.0f64..200.0, b in 0.0f64..200.0) {
            let band = Thresholds::default().nitrogen;
            let rank = |s: NutrientStatus| match s {
                NutrientStatus::Low => 0,
                NutrientStatus::Good => 1,
                NutrientStatus::High => 2,
                NutrientStatus::Unknown => 3,
            };
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(
                rank(classify_nutrient(Some(lo), &band)) <= rank(classify_nutrient(Some(hi), &band))
            );
        }
    }
}
