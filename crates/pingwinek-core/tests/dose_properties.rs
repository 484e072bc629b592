//! Property tests for dose computation, unit conversion and scheduling.

use chrono::{Duration, TimeZone, Utc};
use pingwinek_core::engine::{to_kg, DoseEngine, EffectiveWeight, WeightUnit, KG_PER_LB};
use pingwinek_core::models::Medication;
use pingwinek_core::store::MedicationCatalog;
use proptest::prelude::*;

fn dose_value(calculated_dose: &str) -> f64 {
    calculated_dose
        .strip_suffix(" ml")
        .expect("dose ends with ml")
        .parse()
        .expect("dose is numeric")
}

proptest! {
    #[test]
    fn dose_is_weight_times_rate(weight in 0.5f64..150.0, rate in 0.01f64..20.0) {
        let medication = Medication::new("Test".into(), rate, 3, 8).unwrap();
        let weight_input = EffectiveWeight::from_input(&weight.to_string(), WeightUnit::Kg).unwrap();

        let result = DoseEngine::new().calculate(&medication, &weight_input, None, None).unwrap();

        let expected = weight * rate;
        let shown = dose_value(&result.calculation.calculated_dose);
        prop_assert!((shown - expected).abs() <= 0.005 + 1e-9,
            "{} vs {}", shown, expected);
        prop_assert!(result.display.ends_with(&result.calculation.calculated_dose));
    }

    #[test]
    fn pounds_convert_exactly(weight in 0.1f64..400.0) {
        let kg = to_kg(weight, WeightUnit::Lb).unwrap();
        prop_assert!((kg - weight * KG_PER_LB).abs() < 1e-9);
    }

    #[test]
    fn non_positive_weight_rejected(weight in -500.0f64..=0.0) {
        prop_assert!(to_kg(weight, WeightUnit::Kg).is_err());
        prop_assert!(EffectiveWeight::from_input(&weight.to_string(), WeightUnit::Lb).is_err());
    }

    #[test]
    fn schedule_has_one_entry_per_dose(times in 1u32..=12, hours in 1u32..=24, offset_min in 0i64..1440) {
        let medication = Medication::new("Test".into(), 1.0, times, hours).unwrap();
        let weight = EffectiveWeight::from_input("10", WeightUnit::Kg).unwrap();
        let timestamp = Utc.with_ymd_and_hms(2024, 3, 30, 0, 0, 0).unwrap() + Duration::minutes(offset_min);

        let calc = DoseEngine::new()
            .calculate_at(&medication, &weight, None, None, timestamp)
            .unwrap()
            .calculation;
        let schedule = calc.daily_schedule();

        prop_assert_eq!(schedule.len(), times as usize);
        prop_assert_eq!(schedule[0], timestamp);
        for (i, time) in schedule.iter().enumerate() {
            prop_assert_eq!(*time, timestamp + Duration::hours(i as i64 * hours as i64));
        }
        prop_assert_eq!(calc.next_dose_time(), timestamp + Duration::hours(hours as i64));
    }

    #[test]
    fn catalog_sort_keeps_selection(
        names in prop::collection::vec("[A-Za-z]{1,8}", 1..10),
        pick in any::<prop::sample::Index>(),
        extra in "[A-Za-z]{1,8}",
    ) {
        let medications: Vec<_> = names
            .iter()
            .map(|n| Medication::new(n.clone(), 1.0, 3, 8).unwrap())
            .collect();
        let mut catalog = MedicationCatalog::new(medications);

        let index = pick.index(catalog.len());
        let selected_id = catalog.select(Some(index)).unwrap().id.clone();

        catalog.add(Medication::new(extra, 1.0, 3, 8).unwrap()).unwrap();

        prop_assert_eq!(&catalog.selected().unwrap().id, &selected_id);
        let lowered: Vec<_> = catalog.medications().iter().map(|m| m.name.to_lowercase()).collect();
        prop_assert!(lowered.windows(2).all(|w| w[0] <= w[1]));
    }
}
