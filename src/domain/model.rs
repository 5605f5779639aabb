use serde::{Deserialize, Serialize};

/// 折扣規則：重量與距離皆落在閉區間內才適用
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Offer {
    /// 折扣比例 (0–1)
    pub discount: f64,
    pub min_distance: f64,
    pub max_distance: f64,
    pub min_weight: f64,
    pub max_weight: f64,
}

impl Offer {
    pub fn is_eligible(&self, weight: f64, distance: f64) -> bool {
        weight >= self.min_weight
            && weight <= self.max_weight
            && distance >= self.min_distance
            && distance <= self.max_distance
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Package {
    pub id: String,
    pub weight: f64,
    pub distance: f64,
    pub offer_code: Option<String>,
}

impl Package {
    pub fn new(id: impl Into<String>, weight: f64, distance: f64) -> Self {
        Self {
            id: id.into(),
            weight,
            distance,
            offer_code: None,
        }
    }

    pub fn with_offer(mut self, code: impl Into<String>) -> Self {
        self.offer_code = Some(code.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FleetSpec {
    pub vehicle_count: usize,
    pub max_speed: f64,
    pub max_carriable_weight: f64,
}

/// 一次批次的完整輸入
#[derive(Debug, Clone, PartialEq)]
pub struct DeliveryBatch {
    pub base_cost: f64,
    pub packages: Vec<Package>,
    pub fleet: FleetSpec,
}

/// 單一包裹的估算結果，數值未經四捨五入
#[derive(Debug, Clone, PartialEq)]
pub struct PackageEstimate {
    pub package_id: String,
    pub discount: f64,
    pub total_cost: f64,
    pub delivery_time: Option<f64>,
}

/// 一趟出車紀錄
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dispatch {
    pub vehicle: usize,
    pub departs_at: f64,
    pub returns_at: f64,
    pub total_weight: f64,
    pub package_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeliveryReport {
    /// 依輸入順序排列
    pub estimates: Vec<PackageEstimate>,
    pub dispatches: Vec<Dispatch>,
    pub unscheduled: Vec<String>,
}

/// `--dry-run` 的批次摘要
#[derive(Debug, Clone, PartialEq)]
pub struct BatchSummary {
    pub base_cost: f64,
    pub package_count: usize,
    pub fleet: FleetSpec,
    pub weight_rate: f64,
    pub distance_rate: f64,
    /// 已排序
    pub offer_codes: Vec<String>,
    /// 超過單車載重、永遠無法排程的包裹
    pub overweight: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `id discount total_cost delivery_time` 每行一筆
    #[default]
    Text,
    Csv,
    Json,
}
