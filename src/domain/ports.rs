use crate::domain::model::{DeliveryBatch, DeliveryReport, OutputFormat};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn input_path(&self) -> &str;
    fn output_path(&self) -> &str;
    fn output_format(&self) -> OutputFormat;
    /// 是否允許輸出未能排程的包裹
    fn allow_partial(&self) -> bool;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<DeliveryBatch>;
    async fn transform(&self, batch: DeliveryBatch) -> Result<DeliveryReport>;
    async fn load(&self, report: DeliveryReport) -> Result<String>;
}
