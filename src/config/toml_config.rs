use crate::core::cost::{CostCalculator, DEFAULT_DISTANCE_RATE, DEFAULT_WEIGHT_RATE};
use crate::core::offer::OfferTable;
use crate::domain::model::Offer;
use crate::utils::error::{CourierError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// 費率表：計價參數與折扣代碼
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TariffConfig {
    pub pricing: Option<PricingConfig>,
    pub offers: Option<HashMap<String, Offer>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingConfig {
    pub weight_rate: Option<f64>,
    pub distance_rate: Option<f64>,
}

impl TariffConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(CourierError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| CourierError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${OFR001_RATE})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| CourierError::ConfigError {
            message: format!("invalid placeholder pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn weight_rate(&self) -> f64 {
        self.pricing
            .as_ref()
            .and_then(|p| p.weight_rate)
            .unwrap_or(DEFAULT_WEIGHT_RATE)
    }

    pub fn distance_rate(&self) -> f64 {
        self.pricing
            .as_ref()
            .and_then(|p| p.distance_rate)
            .unwrap_or(DEFAULT_DISTANCE_RATE)
    }

    pub fn cost_calculator(&self) -> CostCalculator {
        CostCalculator::new(self.weight_rate(), self.distance_rate())
    }

    /// 未設定 [offers] 時使用標準代碼表
    pub fn offer_table(&self) -> OfferTable {
        match &self.offers {
            Some(offers) => OfferTable::new(offers.clone()),
            None => OfferTable::standard(),
        }
    }
}

impl Validate for TariffConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_non_negative("pricing.weight_rate", self.weight_rate())?;
        validation::validate_non_negative("pricing.distance_rate", self.distance_rate())?;
        self.offer_table().validate()
    }
}
