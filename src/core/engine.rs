use crate::core::Pipeline;
use crate::utils::error::Result;

pub struct EstimationEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EstimationEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("Starting delivery estimation...");

        let batch = self.pipeline.extract().await?;
        tracing::info!(
            "Read {} packages for {} vehicle(s)",
            batch.packages.len(),
            batch.fleet.vehicle_count
        );

        let report = self.pipeline.transform(batch).await?;
        tracing::info!("Estimated {} packages", report.estimates.len());

        let destination = self.pipeline.load(report).await?;
        tracing::info!("Results written to: {}", destination);

        Ok(destination)
    }
}
