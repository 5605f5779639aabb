use courier_estimate::domain::model::Dispatch;
use courier_estimate::{DeliveryScheduler, FleetSpec, Package};
use std::collections::{HashMap, HashSet};

const MAX_LOAD: f64 = 200.0;
const SPEED: f64 = 70.0;

/// 用固定公式產生可重現的批次，混入幾個超重包裹
fn batch(size: usize, seed: usize) -> Vec<Package> {
    (0..size)
        .map(|i| {
            let weight = ((i * 37 + seed * 11) % 230 + 5) as f64;
            let distance = ((i * 53 + seed * 7) % 240 + 1) as f64;
            Package::new(format!("PKG{}", i + 1), weight, distance)
        })
        .collect()
}

fn scenarios() -> Vec<(usize, Vec<Package>)> {
    let mut cases = Vec::new();
    for vehicles in 1..=4 {
        for size in [1, 2, 5, 9, 17, 30] {
            for seed in 0..3 {
                cases.push((vehicles, batch(size, seed)));
            }
        }
    }
    cases
}

fn scheduler(vehicle_count: usize) -> DeliveryScheduler {
    DeliveryScheduler::new(FleetSpec {
        vehicle_count,
        max_speed: SPEED,
        max_carriable_weight: MAX_LOAD,
    })
    .unwrap()
}

fn by_vehicle(dispatches: &[Dispatch]) -> HashMap<usize, Vec<&Dispatch>> {
    let mut trips: HashMap<usize, Vec<&Dispatch>> = HashMap::new();
    for dispatch in dispatches {
        trips.entry(dispatch.vehicle).or_default().push(dispatch);
    }
    trips
}

#[test]
fn test_every_dispatch_respects_capacity() {
    for (vehicles, packages) in scenarios() {
        let weights: HashMap<&str, f64> = packages
            .iter()
            .map(|p| (p.id.as_str(), p.weight))
            .collect();
        let schedule = scheduler(vehicles).schedule(&packages).unwrap();

        for dispatch in schedule.dispatches() {
            let load: f64 = dispatch.package_ids.iter().map(|id| weights[id.as_str()]).sum();
            assert!(!dispatch.package_ids.is_empty());
            assert!(load <= MAX_LOAD, "dispatch over capacity: {dispatch:?}");
            assert_eq!(load, dispatch.total_weight);
        }
    }
}

#[test]
fn test_vehicle_availability_never_decreases() {
    for (vehicles, packages) in scenarios() {
        let schedule = scheduler(vehicles).schedule(&packages).unwrap();

        for (vehicle, trips) in by_vehicle(schedule.dispatches()) {
            assert!(vehicle < vehicles);
            let mut free_at = 0.0;
            for trip in trips {
                assert!(trip.departs_at >= free_at, "vehicle {vehicle} left before returning");
                assert!(trip.returns_at >= trip.departs_at);
                free_at = trip.returns_at;
            }
        }
    }
}

#[test]
fn test_each_package_scheduled_at_most_once() {
    for (vehicles, packages) in scenarios() {
        let schedule = scheduler(vehicles).schedule(&packages).unwrap();

        let mut seen = HashSet::new();
        for dispatch in schedule.dispatches() {
            for id in &dispatch.package_ids {
                assert!(seen.insert(id.clone()), "{id} shipped twice");
            }
        }

        assert_eq!(seen.len(), schedule.delivery_times().len());
        assert_eq!(seen.len() + schedule.unscheduled().len(), packages.len());
    }
}

#[test]
fn test_only_overweight_packages_are_left_behind() {
    for (vehicles, packages) in scenarios() {
        let schedule = scheduler(vehicles).schedule(&packages).unwrap();

        let expected: Vec<&str> = packages
            .iter()
            .filter(|p| p.weight > MAX_LOAD)
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(schedule.unscheduled(), expected.as_slice());
    }
}

#[test]
fn test_delivery_time_within_trip_window() {
    for (vehicles, packages) in scenarios() {
        let distances: HashMap<&str, f64> = packages
            .iter()
            .map(|p| (p.id.as_str(), p.distance))
            .collect();
        let schedule = scheduler(vehicles).schedule(&packages).unwrap();

        for dispatch in schedule.dispatches() {
            for id in &dispatch.package_ids {
                let delivered = schedule.delivery_time(id).unwrap();
                assert!(delivered >= dispatch.departs_at);
                assert!(delivered <= dispatch.returns_at);
                assert_eq!(delivered, dispatch.departs_at + distances[id.as_str()] / SPEED);
            }
        }
    }
}
