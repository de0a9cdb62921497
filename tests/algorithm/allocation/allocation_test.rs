//! Tests for service receipt allocation over the standard catalog

use pregnancy_pathways::algorithm::allocation::{
    allocate_services, ideal_allocation, mixture, naive_allocation,
};
use pregnancy_pathways::models::{Catalog, ReadinessMap, Sector};
use pregnancy_pathways::ModelError;

use crate::utils::{assert_close, facility_readiness, out_of_facility_readiness};

const EPSILON: f64 = 1e-9;

fn with_hw(readiness: ReadinessMap, hw: f64) -> ReadinessMap {
    readiness.with("hw", hw)
}

#[test]
fn test_full_health_worker_availability_is_ideal() {
    let catalog = Catalog::standard().unwrap();
    let readiness = with_hw(facility_readiness(0.6), 1.0);
    let table = allocate_services(
        catalog.services(Sector::Facility),
        &readiness,
        Sector::Facility,
        100.0,
        EPSILON,
    )
    .unwrap();

    assert_eq!(table.mixture, 0.0);
    // Vacuum aspiration takes the whole 0.6 of the pool; nothing is left after it.
    assert_eq!(table.services[0].service_id, "facility-vacuum-aspiration");
    assert_close(table.services[0].p, 0.6, 1e-12);
    assert_close(table.services[0].n, 60.0, 1e-9);
    for receipt in &table.services[1..] {
        assert_eq!(receipt.p, 0.0);
    }
    assert_close(table.no_abortion.p, 0.4, 1e-12);
    assert_close(table.no_abortion.n, 40.0, 1e-9);
}

#[test]
fn test_no_health_worker_is_naive() {
    let catalog = Catalog::standard().unwrap();
    let readiness = with_hw(out_of_facility_readiness(0.4), 0.0);
    let table = allocate_services(
        catalog.services(Sector::OutOfFacility),
        &readiness,
        Sector::OutOfFacility,
        200.0,
        EPSILON,
    )
    .unwrap();

    assert_eq!(table.mixture, 1.0);
    // Informed medical abortion needs a health worker; the other two score 0.4
    // each and share the ideal capacity of 0.4.
    assert_eq!(table.services[0].p, 0.0);
    assert_close(table.services[1].p, 0.2, 1e-12);
    assert_close(table.services[2].p, 0.2, 1e-12);
    assert_close(table.no_abortion.p, 0.6, 1e-12);
    assert_close(table.total_received(), 80.0, 1e-9);
}

#[test]
fn test_partial_health_worker_blends_linearly() {
    let catalog = Catalog::standard().unwrap();
    let services = catalog.services(Sector::Facility);
    let readiness = facility_readiness(0.7).with("hw", 0.5).with("mva", 0.3);

    let ideal = ideal_allocation(services, &readiness, "facilityReadiness", EPSILON).unwrap();
    let naive = naive_allocation(services, &readiness, "facilityReadiness", EPSILON).unwrap();
    let table =
        allocate_services(services, &readiness, Sector::Facility, 1.0, EPSILON).unwrap();

    assert_close(table.mixture, 0.5, 1e-12);
    for (i, receipt) in table.services.iter().enumerate() {
        assert_close(receipt.p, 0.5 * ideal.shares[i].p + 0.5 * naive.shares[i].p, 1e-12);
    }
    assert_close(
        table.no_abortion.p,
        0.5 * ideal.no_abortion + 0.5 * naive.no_abortion,
        1e-12,
    );
}

#[test]
fn test_allocations_sum_to_one_across_health_worker_levels() {
    let catalog = Catalog::standard().unwrap();
    for hw in [0.0, 0.1, 0.35, 0.5, 0.65, 0.9, 1.0] {
        for level in [0.0, 0.2, 0.55, 1.0] {
            for (sector, readiness) in [
                (Sector::Facility, facility_readiness(level)),
                (Sector::OutOfFacility, out_of_facility_readiness(level)),
            ] {
                let readiness = with_hw(readiness, hw);
                let table = allocate_services(
                    catalog.services(sector),
                    &readiness,
                    sector,
                    500.0,
                    EPSILON,
                )
                .unwrap();
                assert_close(table.total_probability(), 1.0, EPSILON);
                assert!(table.services.iter().all(|s| s.p >= 0.0));
                assert!(table.no_abortion.p >= 0.0);
                assert_close(table.total_received() + table.no_abortion.n, 500.0, 1e-6);
            }
        }
    }
}

#[test]
fn test_missing_health_worker_counts_as_unavailable() {
    let readiness = ReadinessMap::new().with("miso", 0.4);
    assert_eq!(mixture(&readiness), 1.0);
}

#[test]
fn test_missing_combo_item_is_reported() {
    let catalog = Catalog::standard().unwrap();
    let readiness = out_of_facility_readiness(0.5);
    let mut incomplete = ReadinessMap::new();
    for (item, value) in readiness.iter().filter(|(item, _)| *item != "traditional") {
        incomplete.insert(item, value);
    }

    let err = allocate_services(
        catalog.services(Sector::OutOfFacility),
        &incomplete,
        Sector::OutOfFacility,
        10.0,
        EPSILON,
    )
    .unwrap_err();
    match err {
        ModelError::MissingConfigData(message) => {
            assert!(message.contains("traditional"));
            assert!(message.contains("outOfFacilityReadiness"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_out_of_range_readiness_is_rejected() {
    let catalog = Catalog::standard().unwrap();
    let readiness = facility_readiness(0.5).with("blood", 1.2);
    let err = allocate_services(
        catalog.services(Sector::Facility),
        &readiness,
        Sector::Facility,
        10.0,
        EPSILON,
    )
    .unwrap_err();
    match err {
        ModelError::InvalidProportion { parameter, value } => {
            assert_eq!(parameter, "facilityReadiness.blood");
            assert_eq!(value, 1.2);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_caller_readiness_is_not_depleted() {
    let catalog = Catalog::standard().unwrap();
    let readiness = facility_readiness(0.8);
    let before = readiness.clone();
    allocate_services(
        catalog.services(Sector::Facility),
        &readiness,
        Sector::Facility,
        10.0,
        EPSILON,
    )
    .unwrap();
    assert_eq!(readiness, before);
}
