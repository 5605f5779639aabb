use crate::domain::model::Offer;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use std::collections::HashMap;

/// 不可變的折扣代碼表，啟動時建立後只讀
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OfferTable {
    offers: HashMap<String, Offer>,
}

impl OfferTable {
    pub fn new(offers: HashMap<String, Offer>) -> Self {
        Self { offers }
    }

    /// OFR001 / OFR002 / OFR003
    pub fn standard() -> Self {
        let offers = [
            ("OFR001", 0.10, (0.0, 200.0), (70.0, 200.0)),
            ("OFR002", 0.07, (50.0, 150.0), (100.0, 250.0)),
            ("OFR003", 0.05, (50.0, 250.0), (10.0, 150.0)),
        ]
        .into_iter()
        .map(|(code, discount, (min_distance, max_distance), (min_weight, max_weight))| {
            (
                code.to_string(),
                Offer {
                    discount,
                    min_distance,
                    max_distance,
                    min_weight,
                    max_weight,
                },
            )
        })
        .collect();

        Self { offers }
    }

    pub fn get(&self, code: &str) -> Option<&Offer> {
        self.offers.get(code)
    }

    pub fn len(&self) -> usize {
        self.offers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offers.is_empty()
    }

    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.offers.keys().map(String::as_str)
    }
}

impl Validate for OfferTable {
    fn validate(&self) -> Result<()> {
        for (code, offer) in &self.offers {
            validation::validate_non_empty_string("offers", code)?;
            validation::validate_range(
                &format!("offers.{}.discount", code),
                offer.discount,
                0.0,
                1.0,
            )?;
            validation::validate_bounds(
                &format!("offers.{}.distance", code),
                offer.min_distance,
                offer.max_distance,
            )?;
            validation::validate_bounds(
                &format!("offers.{}.weight", code),
                offer.min_weight,
                offer.max_weight,
            )?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OfferOutcome {
    pub discount: f64,
    pub total_cost: f64,
}

impl OfferOutcome {
    fn undiscounted(cost: f64) -> Self {
        Self {
            discount: 0.0,
            total_cost: cost,
        }
    }
}

pub struct OfferResolver<'a> {
    table: &'a OfferTable,
}

impl<'a> OfferResolver<'a> {
    pub fn new(table: &'a OfferTable) -> Self {
        Self { table }
    }

    /// 未知或缺少的代碼不是錯誤，只是沒有折扣
    pub fn resolve(
        &self,
        offer_code: Option<&str>,
        weight: f64,
        distance: f64,
        cost: f64,
    ) -> OfferOutcome {
        let Some(offer) = offer_code.and_then(|code| self.table.get(code)) else {
            return OfferOutcome::undiscounted(cost);
        };

        if !offer.is_eligible(weight, distance) {
            tracing::debug!(
                "Offer not applicable (weight {}, distance {}), charging full cost",
                weight,
                distance
            );
            return OfferOutcome::undiscounted(cost);
        }

        let discount = cost * offer.discount;
        OfferOutcome {
            discount,
            total_cost: cost - discount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::cost::CostCalculator;

    #[test]
    fn test_weight_outside_range_gets_no_discount() {
        let table = OfferTable::standard();
        let resolver = OfferResolver::new(&table);
        let cost = CostCalculator::default().cost(100.0, 5.0, 5.0);

        let outcome = resolver.resolve(Some("OFR001"), 5.0, 5.0, cost);
        assert_eq!(outcome.discount, 0.0);
        assert_eq!(outcome.total_cost, 175.0);
    }

    #[test]
    fn test_eligible_package_is_discounted() {
        let table = OfferTable::standard();
        let resolver = OfferResolver::new(&table);
        let cost = CostCalculator::default().cost(100.0, 10.0, 100.0);

        let outcome = resolver.resolve(Some("OFR003"), 10.0, 100.0, cost);
        assert_eq!(outcome.discount.round(), 35.0);
        assert_eq!(outcome.total_cost.round(), 665.0);
    }

    #[test]
    fn test_unknown_or_missing_code() {
        let table = OfferTable::standard();
        let resolver = OfferResolver::new(&table);

        for code in [None, Some(""), Some("OFR999"), Some("ofr001")] {
            let outcome = resolver.resolve(code, 100.0, 100.0, 1600.0);
            assert_eq!(outcome.discount, 0.0);
            assert_eq!(outcome.total_cost, 1600.0);
        }
    }

    #[test]
    fn test_distance_outside_range() {
        let table = OfferTable::standard();
        let resolver = OfferResolver::new(&table);

        // OFR002: distance 50–150
        let outcome = resolver.resolve(Some("OFR002"), 110.0, 151.0, 2000.0);
        assert_eq!(outcome.discount, 0.0);

        let outcome = resolver.resolve(Some("OFR002"), 110.0, 150.0, 2000.0);
        assert_eq!(outcome.discount.round(), 140.0);
        assert_eq!(outcome.total_cost.round(), 1860.0);
    }

    #[test]
    fn test_standard_table_is_valid() {
        let table = OfferTable::standard();
        assert_eq!(table.len(), 3);
        assert!(table.validate().is_ok());
    }

    #[test]
    fn test_invalid_rate_rejected() {
        let mut offers = HashMap::new();
        offers.insert(
            "BAD".to_string(),
            Offer {
                discount: 1.5,
                min_distance: 0.0,
                max_distance: 10.0,
                min_weight: 0.0,
                max_weight: 10.0,
            },
        );
        assert!(OfferTable::new(offers).validate().is_err());
    }
}
