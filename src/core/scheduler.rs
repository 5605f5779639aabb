use crate::domain::model::{Dispatch, FleetSpec, Package};
use crate::utils::error::{CourierError, Result};
use crate::utils::validation::{self, Validate};
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

impl Validate for FleetSpec {
    fn validate(&self) -> Result<()> {
        if self.vehicle_count == 0 {
            return Err(CourierError::ValidationError {
                message: "number of vehicles must be at least 1".to_string(),
            });
        }
        validation::validate_positive("max speed", self.max_speed)?;
        validation::validate_positive("max carriable weight", self.max_carriable_weight)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
struct VehicleSlot {
    available_at: f64,
    index: usize,
}

impl PartialEq for VehicleSlot {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for VehicleSlot {}

impl PartialOrd for VehicleSlot {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for VehicleSlot {
    fn cmp(&self, other: &Self) -> Ordering {
        // Flip both keys to make this a min-heap: earliest first, then lowest index
        other
            .available_at
            .total_cmp(&self.available_at)
            .then_with(|| other.index.cmp(&self.index))
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schedule {
    delivery_times: HashMap<String, f64>,
    dispatches: Vec<Dispatch>,
    unscheduled: Vec<String>,
}

impl Schedule {
    pub fn delivery_time(&self, package_id: &str) -> Option<f64> {
        self.delivery_times.get(package_id).copied()
    }

    pub fn delivery_times(&self) -> &HashMap<String, f64> {
        &self.delivery_times
    }

    pub fn dispatches(&self) -> &[Dispatch] {
        &self.dispatches
    }

    /// 超過單車載重上限、永遠無法出車的包裹 (依輸入順序)
    pub fn unscheduled(&self) -> &[String] {
        &self.unscheduled
    }

    pub fn is_complete(&self) -> bool {
        self.unscheduled.is_empty()
    }

    pub fn into_parts(self) -> (HashMap<String, f64>, Vec<Dispatch>, Vec<String>) {
        (self.delivery_times, self.dispatches, self.unscheduled)
    }
}

/// Greedy first-fit-by-weight dispatcher.
///
/// Each round takes the vehicle that frees up first, scans pending packages
/// heaviest first (farthest first on equal weight) and loads every package
/// that still fits. Packages are delivered at `departure + distance / speed`;
/// the vehicle is back at `departure + 2 * farthest / speed`.
///
/// This is a heuristic, not an optimal packer.
#[derive(Debug, Clone)]
pub struct DeliveryScheduler {
    fleet: FleetSpec,
}

impl DeliveryScheduler {
    pub fn new(fleet: FleetSpec) -> Result<Self> {
        fleet.validate()?;
        Ok(Self { fleet })
    }

    pub fn schedule(&self, packages: &[Package]) -> Result<Schedule> {
        validate_packages(packages)?;

        let max_weight = self.fleet.max_carriable_weight;
        let max_speed = self.fleet.max_speed;

        // 排序鍵不隨回合改變，排一次後以 retain 保持相對順序即可
        let mut pending: Vec<&Package> = packages.iter().collect();
        pending.sort_by(|a, b| {
            b.weight
                .total_cmp(&a.weight)
                .then_with(|| b.distance.total_cmp(&a.distance))
        });

        let mut vehicles: BinaryHeap<VehicleSlot> = (0..self.fleet.vehicle_count)
            .map(|index| VehicleSlot {
                available_at: 0.0,
                index,
            })
            .collect();

        let mut schedule = Schedule::default();

        while !pending.is_empty() {
            let Some(mut vehicle) = vehicles.pop() else {
                break;
            };
            let current_time = vehicle.available_at;

            let mut selected = vec![false; pending.len()];
            let mut load = 0.0;
            for (slot, package) in pending.iter().enumerate() {
                if load + package.weight <= max_weight {
                    selected[slot] = true;
                    load += package.weight;
                }
            }

            if !selected.contains(&true) {
                tracing::warn!(
                    "No pending package fits within {} weight units, stopping with {} left",
                    max_weight,
                    pending.len()
                );
                break;
            }

            let mut trip_distance: f64 = 0.0;
            let mut package_ids = Vec::new();
            for (package, _) in pending.iter().zip(&selected).filter(|(_, chosen)| **chosen) {
                trip_distance = trip_distance.max(package.distance);
                schedule
                    .delivery_times
                    .insert(package.id.clone(), current_time + package.distance / max_speed);
                package_ids.push(package.id.clone());
            }

            vehicle.available_at = current_time + 2.0 * trip_distance / max_speed;

            tracing::debug!(
                "Vehicle {} departs at {:.2} with {:?} ({} weight units), back at {:.2}",
                vehicle.index,
                current_time,
                package_ids,
                load,
                vehicle.available_at
            );

            schedule.dispatches.push(Dispatch {
                vehicle: vehicle.index,
                departs_at: current_time,
                returns_at: vehicle.available_at,
                total_weight: load,
                package_ids,
            });
            vehicles.push(vehicle);

            let mut shipped = selected.into_iter();
            pending.retain(|_| !shipped.next().unwrap_or(false));
        }

        schedule.unscheduled = packages
            .iter()
            .filter(|package| !schedule.delivery_times.contains_key(&package.id))
            .map(|package| package.id.clone())
            .collect();

        Ok(schedule)
    }
}

pub(crate) fn validate_packages(packages: &[Package]) -> Result<()> {
    let mut seen = HashSet::with_capacity(packages.len());
    for package in packages {
        validation::validate_positive(&format!("weight of {}", package.id), package.weight)?;
        validation::validate_positive(&format!("distance of {}", package.id), package.distance)?;
        if !seen.insert(package.id.as_str()) {
            return Err(CourierError::ValidationError {
                message: format!("duplicate package id {}", package.id),
            });
        }
    }
    Ok(())
}
