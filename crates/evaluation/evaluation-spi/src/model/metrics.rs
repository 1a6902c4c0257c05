//! Named metric containers.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Metric names shared by evaluators and tuning objectives.
pub mod metric_names {
    pub const MSE: &str = "MSE";
    pub const ABS_ERROR: &str = "abs_error";
    pub const ABS_TARGET_SUM: &str = "abs_target_sum";
    pub const ABS_TARGET_MEAN: &str = "abs_target_mean";
    pub const MAPE: &str = "MAPE";
    pub const SMAPE: &str = "sMAPE";
    pub const MAE: &str = "MAE";
    pub const RMSE: &str = "RMSE";
    pub const NRMSE: &str = "NRMSE";
    pub const ND: &str = "ND";
    pub const QUANTILE_LOSS: &str = "QuantileLoss";
    pub const COVERAGE: &str = "Coverage";
    pub const WEIGHTED_QUANTILE_LOSS: &str = "wQuantileLoss";
    pub const MEAN_WEIGHTED_QUANTILE_LOSS: &str = "mean_wQuantileLoss";
    pub const MEAN_ABSOLUTE_QUANTILE_LOSS: &str = "mean_absolute_QuantileLoss";
    pub const MAE_COVERAGE: &str = "MAE_Coverage";
}

/// Name of a per-quantile metric, e.g. `QuantileLoss[0.5]`.
pub fn quantile_metric(base: &str, q: f64) -> String {
    format!("{base}[{q}]")
}

/// Metrics of a single forecast/label pair.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemMetrics {
    /// Series identifier
    pub item_id: Option<String>,
    /// Metric values by name
    pub metrics: BTreeMap<String, f64>,
}

impl ItemMetrics {
    /// Empty metrics for a series.
    pub fn new(item_id: Option<String>) -> Self {
        Self {
            item_id,
            metrics: BTreeMap::new(),
        }
    }

    /// Value of a metric.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.metrics.get(name).copied()
    }

    /// Record a metric value.
    pub fn insert(&mut self, name: impl Into<String>, value: f64) {
        self.metrics.insert(name.into(), value);
    }
}

/// Metrics aggregated over every series of a validation set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregateMetrics {
    /// Metric values by name
    pub metrics: BTreeMap<String, f64>,
}

impl AggregateMetrics {
    /// Value of a metric.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.metrics.get(name).copied()
    }

    /// Record a metric value.
    pub fn insert(&mut self, name: impl Into<String>, value: f64) {
        self.metrics.insert(name.into(), value);
    }

    /// Metric names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.metrics.keys().map(String::as_str)
    }

    /// Number of metrics.
    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    /// Whether no metric has been recorded.
    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantile_metric_name() {
        assert_eq!(quantile_metric(metric_names::QUANTILE_LOSS, 0.5), "QuantileLoss[0.5]");
        assert_eq!(quantile_metric(metric_names::COVERAGE, 0.1), "Coverage[0.1]");
        assert_eq!(
            quantile_metric(metric_names::WEIGHTED_QUANTILE_LOSS, 0.9),
            "wQuantileLoss[0.9]"
        );
    }

    #[test]
    fn test_aggregate_lookup() {
        let mut agg = AggregateMetrics::default();
        agg.insert(metric_names::RMSE, 1.5);
        assert_eq!(agg.get("RMSE"), Some(1.5));
        assert_eq!(agg.get("ND"), None);
        assert_eq!(agg.names().collect::<Vec<_>>(), vec!["RMSE"]);
    }

    #[test]
    fn test_item_metrics_serialize() {
        let mut item = ItemMetrics::new(Some("A".to_string()));
        item.insert(metric_names::MSE, 0.25);
        let json = serde_json::to_string(&item).unwrap();
        assert_eq!(json, r#"{"item_id":"A","metrics":{"MSE":0.25}}"#);
    }
}
