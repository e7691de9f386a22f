//! Boundary Tests
//!
//! Drives every decision point with scripted draws to pin the exact
//! threshold behavior: cumulative education bounds, the incident and death
//! rolls, the health decline window and both terminal conditions.
//!
//! Scripted draws run out to safe defaults: floats return 0.999 (nothing
//! fires, education resolves to high school) and integers return the range
//! minimum.

use life_simulator_core_rs::models::{
    Career, EducationLevel, LifeEvent, LifeIncident, Location, Person,
};
use life_simulator_core_rs::rng::ScriptedRng;
use life_simulator_core_rs::simulator::{LifeSimulator, LifeState, SimulationError};
use life_simulator_core_rs::tables::ParameterTables;
use std::sync::Arc;

// ============================================================================
// Test Helpers
// ============================================================================

fn scripted(rng: ScriptedRng) -> LifeSimulator<ScriptedRng> {
    LifeSimulator::with_rng(Arc::new(ParameterTables::builtin()), rng)
}

/// Working high-school retail employee resumed at `age` with `health`
fn worker_at(age: u32, health: i32) -> Person {
    let mut snapshot = Person::new("Test Worker".to_string(), Location::Rural, 80).snapshot();
    snapshot.age = age;
    snapshot.health = health;
    snapshot.education_level = EducationLevel::HighSchool;
    snapshot.career = Career::Retail;
    snapshot.income = 30_000;
    Person::from_snapshot(snapshot).unwrap()
}

fn education_for(location: Location, draw: f64) -> EducationLevel {
    scripted(ScriptedRng::new().floats([draw])).choose_education(location)
}

// ============================================================================
// Education thresholds
// ============================================================================

#[test]
fn test_rural_education_boundaries() {
    assert_eq!(education_for(Location::Rural, 0.0), EducationLevel::Graduate);
    assert_eq!(education_for(Location::Rural, 0.025), EducationLevel::Graduate);
    assert_eq!(education_for(Location::Rural, 0.0499), EducationLevel::Graduate);
    assert_eq!(education_for(Location::Rural, 0.05), EducationLevel::College);
    assert_eq!(education_for(Location::Rural, 0.2499), EducationLevel::College);
    assert_eq!(education_for(Location::Rural, 0.25), EducationLevel::HighSchool);
    assert_eq!(education_for(Location::Rural, 0.9999), EducationLevel::HighSchool);
}

#[test]
fn test_urban_education_boundaries() {
    assert_eq!(education_for(Location::Urban, 0.0999), EducationLevel::Graduate);
    assert_eq!(education_for(Location::Urban, 0.1), EducationLevel::College);
    assert_eq!(education_for(Location::Urban, 0.4999), EducationLevel::College);
    assert_eq!(education_for(Location::Urban, 0.5), EducationLevel::HighSchool);
}

#[test]
fn test_suburban_education_boundaries() {
    assert_eq!(education_for(Location::Suburban, 0.0499), EducationLevel::Graduate);
    assert_eq!(education_for(Location::Suburban, 0.05), EducationLevel::College);
    assert_eq!(education_for(Location::Suburban, 0.3999), EducationLevel::College);
    // 0.05 + 0.35 sums to just under 0.4, so the bound itself is the boundary
    let bound = 0.05 + 0.35;
    assert_eq!(
        education_for(Location::Suburban, bound - f64::EPSILON),
        EducationLevel::College
    );
    assert_eq!(education_for(Location::Suburban, bound), EducationLevel::HighSchool);
    assert_eq!(education_for(Location::Suburban, 0.4), EducationLevel::HighSchool);
    assert_eq!(education_for(Location::Suburban, 0.4001), EducationLevel::HighSchool);
}

#[test]
fn test_education_resolves_exactly_at_22() {
    let mut sim = scripted(
        ScriptedRng::new()
            // incident rolls at 19, 20, 21, then the education draw at 22
            .floats([0.999, 0.999, 0.999, 0.0])
            // graduate pool index 1, then the minimum income
            .ints([1, 0]),
    );
    let mut person = Person::new("Grad Student".to_string(), Location::Rural, 80);

    for _ in 0..3 {
        sim.advance_one_year(&mut person).unwrap();
        assert_eq!(person.education_level(), EducationLevel::None);
        assert_eq!(person.career(), Career::Student);
        assert_eq!(person.income(), 0);
    }

    sim.advance_one_year(&mut person).unwrap();
    assert_eq!(person.age(), 22);
    assert_eq!(person.education_level(), EducationLevel::Graduate);
    assert_eq!(person.career(), Career::Lawyer);
    assert_eq!(person.income(), 60_000);
    assert_eq!(
        person.life_events().lines(),
        vec![
            "Born in rural area with health 80",
            "Age 22: Completed graduate",
            "Age 22: Started career as lawyer",
        ]
    );
}

#[test]
fn test_income_scales_with_experience() {
    // Retail at 47+: multiplier capped at 1.5
    let mut sim = scripted(ScriptedRng::new().ints([0, 0, i64::MAX]));
    let mut person = worker_at(46, 80);

    sim.advance_one_year(&mut person).unwrap();
    assert_eq!(person.age(), 47);
    assert_eq!(person.income(), 37_500);

    let top = sim.calculate_income(Career::Retail, 60).unwrap();
    assert_eq!(top, 52_500);
}

// ============================================================================
// Yearly incident roll
// ============================================================================

#[test]
fn test_incident_fires_just_below_threshold() {
    let mut sim = scripted(ScriptedRng::new().floats([0.0999]).ints([4]));
    let mut person = Person::new("Lucky Person".to_string(), Location::Urban, 70);

    sim.advance_one_year(&mut person).unwrap();
    assert_eq!(
        person.life_events().last(),
        Some(&LifeEvent::Incident {
            age: 19,
            incident: LifeIncident::BoughtHouse
        })
    );
    assert_eq!(
        person.life_events().lines().last().unwrap(),
        "Age 19: Bought a house"
    );
}

#[test]
fn test_incident_does_not_fire_at_threshold() {
    let mut sim = scripted(ScriptedRng::new().floats([0.1]));
    let mut person = Person::new("Quiet Person".to_string(), Location::Urban, 70);

    sim.advance_one_year(&mut person).unwrap();
    assert_eq!(person.life_events().len(), 1);
    // No catalog index was drawn
    assert_eq!(sim.rng().draws(), (1, 0));
}

// ============================================================================
// Death roll
// ============================================================================

#[test]
fn test_death_probability_floor_is_strict() {
    // At 19 with full health the probability is the 0.001 floor
    let mut sim = scripted(ScriptedRng::new().floats([0.999, 0.0009]));
    let mut person = Person::new("Unlucky".to_string(), Location::Suburban, 100);
    assert_eq!(sim.step(&mut person).unwrap(), LifeState::Dead);

    let mut sim = scripted(ScriptedRng::new().floats([0.999, 0.001]));
    let mut person = Person::new("Survivor".to_string(), Location::Suburban, 100);
    assert_eq!(sim.step(&mut person).unwrap(), LifeState::Alive);
}

#[test]
fn test_stochastic_death_finalizes_at_current_age() {
    let mut sim = scripted(ScriptedRng::new().floats([0.999, 0.0]));
    let person = Person::new("Brief Life".to_string(), Location::Rural, 90);

    let person = sim.live_out(person).unwrap();
    assert_eq!(person.age(), 19);
    assert!(person.is_finalized());
    assert_eq!(
        person.life_events().lines().last().unwrap(),
        "Died at age 19"
    );
}

// ============================================================================
// Health decline window
// ============================================================================

#[test]
fn test_no_decline_at_40() {
    let mut sim = scripted(ScriptedRng::new().ints([0, 2]));
    let mut person = worker_at(39, 80);

    sim.advance_one_year(&mut person).unwrap();
    assert_eq!(person.age(), 40);
    assert_eq!(person.health(), 80);
    // Only the income draw was made
    assert_eq!(sim.rng().draws().1, 1);
}

#[test]
fn test_decline_starts_at_41() {
    let mut sim = scripted(ScriptedRng::new().ints([0, 2]));
    let mut person = worker_at(40, 80);

    sim.advance_one_year(&mut person).unwrap();
    assert_eq!(person.age(), 41);
    assert_eq!(person.health(), 78);
}

// ============================================================================
// Terminal conditions
// ============================================================================

#[test]
fn test_health_reaching_zero_ends_life() {
    // Income draw, then a decline of 2 from health 1
    let mut sim = scripted(ScriptedRng::new().ints([0, 2]));
    let person = worker_at(50, 1);

    let person = sim.live_out(person).unwrap();
    assert_eq!(person.age(), 51);
    assert_eq!(person.health(), 0);
    assert_eq!(
        person.life_events().lines().last().unwrap(),
        "Died at age 51"
    );
    // The death roll still happens in the year health hits zero
    assert_eq!(sim.rng().draws().0, 2);
}

#[test]
fn test_age_cap_ends_life_at_95() {
    let mut sim = scripted(ScriptedRng::new());
    let person = worker_at(94, 100);

    let person = sim.live_out(person).unwrap();
    assert_eq!(person.age(), 95);
    assert_eq!(person.health(), 100);
    assert_eq!(person.life_events().last(), Some(&LifeEvent::Died { age: 95 }));
}

#[test]
fn test_person_at_cap_is_finalized_without_stepping() {
    let mut sim = scripted(ScriptedRng::new());
    let person = sim.live_out(worker_at(95, 60)).unwrap();

    assert_eq!(person.age(), 95);
    assert_eq!(person.life_events().lines().last().unwrap(), "Died at age 95");
    assert_eq!(sim.rng().draws(), (0, 0));
}

#[test]
fn test_cannot_step_past_cap() {
    let mut sim = scripted(ScriptedRng::new());
    let mut person = worker_at(95, 60);

    assert_eq!(
        sim.advance_one_year(&mut person),
        Err(SimulationError::AgeCapReached)
    );
    assert_eq!(person.age(), 95);
}

#[test]
fn test_cannot_step_finalized_person() {
    let mut sim = scripted(ScriptedRng::new().floats([0.999, 0.0]));
    let mut person = sim
        .live_out(Person::new("Done".to_string(), Location::Urban, 70))
        .unwrap();
    let events_before = person.life_events().len();

    let err = sim.advance_one_year(&mut person).unwrap_err();
    assert!(matches!(err, SimulationError::AlreadyFinalized { age: 19, .. }));
    assert_eq!(person.life_events().len(), events_before);

    assert!(matches!(
        sim.live_out(person),
        Err(SimulationError::AlreadyFinalized { .. })
    ));
}

// ============================================================================
// Whole life with an exhausted script
// ============================================================================

#[test]
fn test_uneventful_life_runs_to_cap() {
    let mut sim = scripted(ScriptedRng::new());
    let person = sim.simulate_life().unwrap();

    // Index 0 everywhere, offset -15 from the rural baseline of 75
    assert_eq!(person.name(), "James Smith");
    assert_eq!(person.location(), Location::Rural);
    assert_eq!(person.age(), 95);
    assert_eq!(person.health(), 60);
    assert_eq!(person.education_level(), EducationLevel::HighSchool);
    assert_eq!(person.career(), Career::Retail);
    assert_eq!(person.income(), 37_500);
    assert_eq!(
        person.life_events().lines(),
        vec![
            "Born in rural area with health 60",
            "Age 22: Completed high_school",
            "Age 22: Started career as retail",
            "Died at age 95",
        ]
    );
}

#[test]
fn test_draw_order_per_year() {
    let mut sim = scripted(ScriptedRng::new());
    sim.simulate_life().unwrap();

    // 77 years (19..=95): an incident roll and a death roll each, plus the
    // education draw. Ints: 4 at birth, 1 career, 74 incomes (22..=95),
    // 55 health declines (41..=95).
    assert_eq!(sim.rng().draws(), (77 * 2 + 1, 4 + 1 + 74 + 55));
}

#[test]
fn test_create_person_draw_order() {
    // location, health offset, first name, last name
    let mut sim = scripted(ScriptedRng::new().ints([0, 15, 31, 22]));
    let person = sim.create_person();

    assert_eq!(person.location(), Location::Rural);
    assert_eq!(person.health(), 90);
    assert_eq!(person.name(), "Donna Thompson");
}
