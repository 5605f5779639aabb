use crate::adapters::{parse_batch, render};
use crate::core::cost::CostCalculator;
use crate::core::offer::{OfferResolver, OfferTable};
use crate::core::scheduler::{self, DeliveryScheduler};
use crate::core::{ConfigProvider, Pipeline, Storage};
use crate::domain::model::{BatchSummary, DeliveryBatch, DeliveryReport, PackageEstimate};
use crate::utils::error::{CourierError, Result};
use crate::utils::validation::{self, Validate};

impl Validate for DeliveryBatch {
    fn validate(&self) -> Result<()> {
        validation::validate_non_negative("base cost", self.base_cost)?;
        self.fleet.validate()?;
        scheduler::validate_packages(&self.packages)
    }
}

pub struct CourierPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    calculator: CostCalculator,
    offers: OfferTable,
}

impl<S: Storage, C: ConfigProvider> CourierPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self::with_tariff(storage, config, CostCalculator::default(), OfferTable::standard())
    }

    pub fn with_tariff(
        storage: S,
        config: C,
        calculator: CostCalculator,
        offers: OfferTable,
    ) -> Self {
        Self {
            storage,
            config,
            calculator,
            offers,
        }
    }

    /// 讀取並驗證批次，不做計價與排程
    pub async fn dry_run(&self) -> Result<BatchSummary> {
        let batch = self.extract().await?;
        batch.validate()?;

        let mut offer_codes: Vec<String> = self.offers.codes().map(str::to_string).collect();
        offer_codes.sort_unstable();

        let overweight = batch
            .packages
            .iter()
            .filter(|p| p.weight > batch.fleet.max_carriable_weight)
            .map(|p| p.id.clone())
            .collect();

        Ok(BatchSummary {
            base_cost: batch.base_cost,
            package_count: batch.packages.len(),
            fleet: batch.fleet,
            weight_rate: self.calculator.weight_rate,
            distance_rate: self.calculator.distance_rate,
            offer_codes,
            overweight,
        })
    }

    /// 每個包裹的折扣與總價，與排程無關
    fn price(&self, batch: &DeliveryBatch) -> Vec<PackageEstimate> {
        let resolver = OfferResolver::new(&self.offers);

        batch
            .packages
            .iter()
            .map(|package| {
                let cost = self
                    .calculator
                    .cost(batch.base_cost, package.weight, package.distance);
                let outcome = resolver.resolve(
                    package.offer_code.as_deref(),
                    package.weight,
                    package.distance,
                    cost,
                );
                PackageEstimate {
                    package_id: package.id.clone(),
                    discount: outcome.discount,
                    total_cost: outcome.total_cost,
                    delivery_time: None,
                }
            })
            .collect()
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for CourierPipeline<S, C> {
    async fn extract(&self) -> Result<DeliveryBatch> {
        let source = self.config.input_path();
        tracing::debug!("Reading delivery batch from: {}", source);

        let raw = self.storage.read_file(source).await?;
        let text = String::from_utf8(raw).map_err(|e| CourierError::InputError {
            line: 0,
            message: format!("input is not valid UTF-8: {}", e),
        })?;

        parse_batch(&text)
    }

    async fn transform(&self, batch: DeliveryBatch) -> Result<DeliveryReport> {
        // 先驗證車隊與包裹，再計價
        batch.validate()?;
        let scheduler = DeliveryScheduler::new(batch.fleet)?;
        let schedule = scheduler.schedule(&batch.packages)?;

        let mut estimates = self.price(&batch);
        for estimate in &mut estimates {
            estimate.delivery_time = schedule.delivery_time(&estimate.package_id);
        }

        let (_, dispatches, unscheduled) = schedule.into_parts();
        tracing::info!(
            "Scheduled {} of {} packages in {} dispatches",
            batch.packages.len() - unscheduled.len(),
            batch.packages.len(),
            dispatches.len()
        );

        if !unscheduled.is_empty() {
            if !self.config.allow_partial() {
                return Err(CourierError::UnschedulableError {
                    package_ids: unscheduled,
                    max_carriable_weight: batch.fleet.max_carriable_weight,
                });
            }
            tracing::warn!(
                "Emitting partial results, never scheduled: {}",
                unscheduled.join(", ")
            );
        }

        Ok(DeliveryReport {
            estimates,
            dispatches,
            unscheduled,
        })
    }

    async fn load(&self, report: DeliveryReport) -> Result<String> {
        let destination = self.config.output_path();
        let output = render(&report, self.config.output_format())?;

        tracing::debug!(
            "Writing {} bytes as {:?} to {}",
            output.len(),
            self.config.output_format(),
            destination
        );
        self.storage
            .write_file(destination, output.as_bytes())
            .await?;

        Ok(destination.to_string())
    }
}
