//! The analytics snapshot consumed by the dashboard and its invariant checks.
//!
//! A [`Snapshot`] is built once per dashboard activation by a
//! [`SnapshotProvider`](super::provider::SnapshotProvider), validated at that
//! boundary, and then only ever read. Chart builders assume every invariant
//! checked by [`Snapshot::validate`] holds.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of hourly buckets in [`Snapshot::peak_hours`].
pub const HOURS_PER_DAY: usize = 24;

/// Upper bound of the customer satisfaction rating scale.
pub const RATING_MAX: f64 = 5.0;

/// Upper bound of the satisfaction score scale.
pub const SCORE_MAX: f64 = 100.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub total_sales: f64,
    pub customer_count: u64,
    pub avg_order_value: f64,
    pub total_items: u64,
    /// Signed percentage, e.g. `15.4` for +15.4 %.
    pub sales_growth: f64,
    pub customer_satisfaction: f64,
    pub product_metrics: Vec<ProductMetric>,
    pub customer_segments: Vec<CustomerSegment>,
    pub peak_hours: Vec<HourlyActivity>,
    pub product_performance: Vec<ProductCategoryEntry>,
    pub satisfaction_metrics: Vec<SatisfactionScore>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductMetric {
    pub name: String,
    pub value: f64,
    pub satisfaction: f64,
    pub profit: f64,
    pub growth: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerSegment {
    pub name: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyActivity {
    pub hour: u8,
    pub traffic: u32,
    pub revenue: f64,
    pub orders: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductCategoryEntry {
    pub name: String,
    pub size: f64,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SatisfactionScore {
    pub aspect: String,
    pub score: f64,
}

/// First invariant violation found in a snapshot.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SnapshotError {
    #[error("`{field}` must not be empty")]
    Empty { field: &'static str },
    #[error("`{field}` is not a finite number")]
    NotFinite { field: String },
    #[error("`{field}` must not be negative (got {value})")]
    Negative { field: String, value: f64 },
    #[error("`{field}` = {value} is outside [{min}, {max}]")]
    OutOfRange {
        field: String,
        value: f64,
        min: f64,
        max: f64,
    },
    #[error("`{field}` contains `{name}` more than once")]
    DuplicateName { field: &'static str, name: String },
    #[error("`peakHours` must hold exactly 24 entries (got {count})")]
    HourCount { count: usize },
    #[error("`peakHours[{index}]` holds hour {hour}; expected {index}")]
    HourOrder { index: usize, hour: u8 },
}

impl Snapshot {
    /// Check every field invariant, returning the first violation.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        non_negative("totalSales", self.total_sales)?;
        non_negative("avgOrderValue", self.avg_order_value)?;
        finite("salesGrowth", self.sales_growth)?;
        within("customerSatisfaction", self.customer_satisfaction, 0.0, RATING_MAX)?;

        non_empty("productMetrics", &self.product_metrics)?;
        unique("productMetrics", self.product_metrics.iter().map(|p| p.name.as_str()))?;
        for product in &self.product_metrics {
            let prefix = format!("productMetrics[{}]", product.name);
            non_negative(&format!("{prefix}.value"), product.value)?;
            within(
                &format!("{prefix}.satisfaction"),
                product.satisfaction,
                0.0,
                RATING_MAX,
            )?;
            finite(&format!("{prefix}.profit"), product.profit)?;
            finite(&format!("{prefix}.growth"), product.growth)?;
        }

        unique("customerSegments", self.customer_segments.iter().map(|s| s.name.as_str()))?;
        for segment in &self.customer_segments {
            non_negative(&format!("customerSegments[{}].value", segment.name), segment.value)?;
        }

        if self.peak_hours.len() != HOURS_PER_DAY {
            return Err(SnapshotError::HourCount {
                count: self.peak_hours.len(),
            });
        }
        for (index, entry) in self.peak_hours.iter().enumerate() {
            if usize::from(entry.hour) != index {
                return Err(SnapshotError::HourOrder {
                    index,
                    hour: entry.hour,
                });
            }
            non_negative(&format!("peakHours[{index}].revenue"), entry.revenue)?;
        }

        non_empty("productPerformance", &self.product_performance)?;
        unique(
            "productPerformance",
            self.product_performance.iter().map(|p| p.name.as_str()),
        )?;
        for entry in &self.product_performance {
            non_negative(&format!("productPerformance[{}].size", entry.name), entry.size)?;
        }

        non_empty("satisfactionMetrics", &self.satisfaction_metrics)?;
        unique(
            "satisfactionMetrics",
            self.satisfaction_metrics.iter().map(|s| s.aspect.as_str()),
        )?;
        for metric in &self.satisfaction_metrics {
            within(
                &format!("satisfactionMetrics[{}].score", metric.aspect),
                metric.score,
                0.0,
                SCORE_MAX,
            )?;
        }

        Ok(())
    }

    /// Consume the snapshot, handing it back only if it is valid.
    pub fn validated(self) -> Result<Self, SnapshotError> {
        self.validate()?;
        Ok(self)
    }
}

fn finite(field: &str, value: f64) -> Result<(), SnapshotError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(SnapshotError::NotFinite {
            field: field.to_string(),
        })
    }
}

fn non_negative(field: &str, value: f64) -> Result<(), SnapshotError> {
    finite(field, value)?;
    if value < 0.0 {
        return Err(SnapshotError::Negative {
            field: field.to_string(),
            value,
        });
    }
    Ok(())
}

fn within(field: &str, value: f64, min: f64, max: f64) -> Result<(), SnapshotError> {
    finite(field, value)?;
    if value < min || value > max {
        return Err(SnapshotError::OutOfRange {
            field: field.to_string(),
            value,
            min,
            max,
        });
    }
    Ok(())
}

fn non_empty<T>(field: &'static str, items: &[T]) -> Result<(), SnapshotError> {
    if items.is_empty() {
        Err(SnapshotError::Empty { field })
    } else {
        Ok(())
    }
}

fn unique<'a>(
    field: &'static str,
    names: impl Iterator<Item = &'a str>,
) -> Result<(), SnapshotError> {
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name) {
            return Err(SnapshotError::DuplicateName {
                field,
                name: name.to_string(),
            });
        }
    }
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn fixture_is_valid() {
        assert_eq!(snapshot().validate(), Ok(()));
    }

    #[test]
    fn missing_hour_is_rejected() {
        let mut snap = snapshot();
        snap.peak_hours.remove(7);
        assert_eq!(
            snap.validate(),
            Err(SnapshotError::HourCount { count: 23 })
        );
    }

    #[test]
    fn shuffled_hours_are_rejected() {
        let mut snap = snapshot();
        snap.peak_hours.swap(3, 4);
        assert_eq!(
            snap.validate(),
            Err(SnapshotError::HourOrder { index: 3, hour: 4 })
        );
    }

    #[test]
    fn negative_segment_is_rejected() {
        let mut snap = snapshot();
        snap.customer_segments[1].value = -5.0;
        assert!(matches!(
            snap.validate(),
            Err(SnapshotError::Negative { ref field, .. }) if field == "customerSegments[Occasional].value"
        ));
    }

    #[test]
    fn duplicate_product_name_is_rejected() {
        let mut snap = snapshot();
        snap.product_metrics.push(product("Latte", 1.0, 1.0, 1.0));
        assert_eq!(
            snap.validate(),
            Err(SnapshotError::DuplicateName {
                field: "productMetrics",
                name: "Latte".into()
            })
        );
    }

    #[test]
    fn rating_above_scale_is_rejected() {
        let mut snap = snapshot();
        snap.customer_satisfaction = 5.2;
        assert!(matches!(
            snap.validate(),
            Err(SnapshotError::OutOfRange { .. })
        ));
    }

    #[test]
    fn score_above_hundred_is_rejected() {
        let mut snap = snapshot();
        snap.satisfaction_metrics[0].score = 101.0;
        assert!(snap.validated().is_err());
    }

    #[test]
    fn empty_satisfaction_metrics_are_rejected() {
        let mut snap = snapshot();
        snap.satisfaction_metrics.clear();
        assert_eq!(
            snap.validate(),
            Err(SnapshotError::Empty {
                field: "satisfactionMetrics"
            })
        );
    }

    #[test]
    fn empty_segments_are_allowed() {
        let mut snap = snapshot();
        snap.customer_segments.clear();
        assert_eq!(snap.validate(), Ok(()));
    }

    #[test]
    fn nan_sales_are_rejected() {
        let mut snap = snapshot();
        snap.total_sales = f64::NAN;
        assert!(matches!(
            snap.validate(),
            Err(SnapshotError::NotFinite { .. })
        ));
    }

    #[test]
    fn json_uses_camel_case_keys() {
        let value = serde_json::to_value(snapshot()).unwrap();
        assert!(value.get("totalSales").is_some());
        assert!(value.get("peakHours").is_some());
        assert!(value.get("satisfactionMetrics").is_some());
    }
}
