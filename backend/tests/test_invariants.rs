//! Life Invariant Property Tests
//!
//! For arbitrary seeds, every finished life must satisfy the record
//! invariants, year by year.

use life_simulator_core_rs::models::{Career, EducationLevel, LifeEvent, MAX_AGE, START_AGE};
use life_simulator_core_rs::report::{format_summary, parse_summary};
use life_simulator_core_rs::simulator::{LifeSimulator, EDUCATION_AGE, HEALTH_DECLINE_AGE};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_final_record_in_bounds(seed in any::<u64>()) {
        let person = LifeSimulator::new(seed).simulate_life().unwrap();

        prop_assert!((START_AGE..=MAX_AGE).contains(&person.age()));
        prop_assert!((0..=100).contains(&person.health()));
        prop_assert!(person.income() >= 0);
        prop_assert!(person.life_events().len() >= 2);
        prop_assert!(person.life_events().is_chronological());
        prop_assert_eq!(
            person.life_events().last(),
            Some(&LifeEvent::Died { age: person.age() })
        );
    }

    #[test]
    fn prop_yearly_history_invariants(seed in any::<u64>()) {
        let (person, history) = LifeSimulator::new(seed).simulate_life_with_history().unwrap();

        prop_assert_eq!(history[0].age, START_AGE);
        for year in &history {
            let schooled = year.age >= EDUCATION_AGE;
            prop_assert_eq!(year.education_level.is_resolved(), schooled);
            prop_assert_eq!(year.career != Career::Student, schooled);
            if !schooled {
                prop_assert_eq!(year.education_level, EducationLevel::None);
                prop_assert_eq!(year.income, 0);
            }
        }
        for pair in history.windows(2) {
            prop_assert_eq!(pair[1].age, pair[0].age + 1);
            prop_assert!(pair[1].health <= pair[0].health);
            if pair[1].age <= HEALTH_DECLINE_AGE {
                prop_assert_eq!(pair[1].health, pair[0].health);
            }
            // Education and career never change once set
            if pair[0].education_level.is_resolved() {
                prop_assert_eq!(pair[1].education_level, pair[0].education_level);
                prop_assert_eq!(pair[1].career, pair[0].career);
            }
        }
        prop_assert_eq!(history.last().unwrap().age, person.age());
    }

    #[test]
    fn prop_summary_round_trip(seed in any::<u64>()) {
        let person = LifeSimulator::new(seed).simulate_life().unwrap();
        let parsed = parse_summary(&format_summary(&person)).unwrap();
        prop_assert!(parsed.matches(&person));
    }
}
