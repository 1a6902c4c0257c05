//! Quantile-based forecast evaluator.

use dataset_spi::IndexedSeries;
use evaluation_api::{
    metric_names as names, quantile_metric, AggregateMetrics, EvaluationError, Evaluator,
    EvaluatorConfig, Forecast, ItemMetrics, Result, DEFAULT_QUANTILES,
};
use tracing::debug;

use crate::metrics;

/// Scores probabilistic forecasts with point and quantile metrics.
///
/// Each forecast is aligned with its label by timestamp. Missing (`NaN`)
/// label observations are left out of every item metric.
///
/// # Example
///
/// ```rust
/// use dataset_spi::{parse_timestamp, Frequency, IndexedSeries};
/// use evaluation_core::{Evaluator, Forecast, QuantileEvaluator, SampleForecast};
///
/// let start = parse_timestamp("2021-01-01").unwrap();
/// let freq = Frequency::parse("1D").unwrap();
/// let label = IndexedSeries {
///     item_id: None,
///     freq,
///     index: vec![start, freq.advance(start, 1).unwrap()],
///     values: vec![1.0, 2.0],
/// };
/// let forecast: Box<dyn Forecast> =
///     Box::new(SampleForecast::new(vec![vec![1.0, 2.0]], start, freq).unwrap());
///
/// let evaluator = QuantileEvaluator::default();
/// let (agg, _) = evaluator.evaluate(&[label], &[forecast], Some(1)).unwrap();
/// assert_eq!(agg.get("mean_wQuantileLoss"), Some(0.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct QuantileEvaluator {
    quantiles: Vec<f64>,
}

impl Default for QuantileEvaluator {
    fn default() -> Self {
        Self {
            quantiles: DEFAULT_QUANTILES.to_vec(),
        }
    }
}

impl QuantileEvaluator {
    /// Create an evaluator scoring the given quantile levels.
    pub fn new(quantiles: &[f64]) -> Result<Self> {
        Self::from_config(&EvaluatorConfig::default().quantiles(quantiles))
    }

    /// Create an evaluator from configuration.
    pub fn from_config(config: &EvaluatorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            quantiles: config.quantiles.clone(),
        })
    }

    fn item_metrics(&self, label: &IndexedSeries, forecast: &dyn Forecast) -> Result<ItemMetrics> {
        let target = aligned_target(label, forecast)?;

        let observed: Vec<usize> = (0..target.len()).filter(|&i| !target[i].is_nan()).collect();
        let pick = |values: &[f64]| observed.iter().map(|&i| values[i]).collect::<Vec<f64>>();

        let y = pick(target);
        let mean = pick(&forecast.mean());
        let median = pick(&forecast.median()?);

        let abs_target_sum: f64 = y.iter().map(|v| v.abs()).sum();
        let abs_target_mean = if y.is_empty() {
            f64::NAN
        } else {
            abs_target_sum / y.len() as f64
        };

        let mut item = ItemMetrics::new(label.item_id.clone());
        item.insert(names::MSE, metrics::mse(&y, &mean));
        item.insert(names::ABS_ERROR, metrics::abs_error(&y, &median));
        item.insert(names::ABS_TARGET_SUM, abs_target_sum);
        item.insert(names::ABS_TARGET_MEAN, abs_target_mean);
        item.insert(names::MAPE, metrics::mape(&y, &median));
        item.insert(names::SMAPE, metrics::smape(&y, &median));
        item.insert(names::MAE, metrics::mae(&y, &median));

        for &q in &self.quantiles {
            let forecast_q = pick(&forecast.quantile(q)?);
            item.insert(
                quantile_metric(names::QUANTILE_LOSS, q),
                metrics::quantile_loss(&y, &forecast_q, q),
            );
            item.insert(
                quantile_metric(names::COVERAGE, q),
                metrics::coverage(&y, &forecast_q),
            );
        }

        Ok(item)
    }

    fn aggregate(&self, items: &[ItemMetrics]) -> AggregateMetrics {
        let mut agg = AggregateMetrics::default();

        for name in [names::MSE, names::ABS_TARGET_MEAN, names::MAPE, names::SMAPE, names::MAE] {
            agg.insert(name, mean_of(items, name));
        }
        for name in [names::ABS_ERROR, names::ABS_TARGET_SUM] {
            agg.insert(name, sum_of(items, name));
        }

        let abs_target_sum = sum_of(items, names::ABS_TARGET_SUM);
        let rmse = mean_of(items, names::MSE).sqrt();
        agg.insert(names::RMSE, rmse);
        agg.insert(names::NRMSE, rmse / mean_of(items, names::ABS_TARGET_MEAN));
        agg.insert(names::ND, sum_of(items, names::ABS_ERROR) / abs_target_sum);

        let mut weighted_losses = Vec::with_capacity(self.quantiles.len());
        let mut losses = Vec::with_capacity(self.quantiles.len());
        let mut coverage_errors = Vec::with_capacity(self.quantiles.len());

        for &q in &self.quantiles {
            let loss_name = quantile_metric(names::QUANTILE_LOSS, q);
            let coverage_name = quantile_metric(names::COVERAGE, q);

            let loss = sum_of(items, &loss_name);
            let weighted = loss / abs_target_sum;
            let coverage = mean_of(items, &coverage_name);

            agg.insert(quantile_metric(names::WEIGHTED_QUANTILE_LOSS, q), weighted);
            agg.insert(loss_name, loss);
            agg.insert(coverage_name, coverage);

            weighted_losses.push(weighted);
            losses.push(loss);
            coverage_errors.push((coverage - q).abs());
        }

        agg.insert(names::MEAN_WEIGHTED_QUANTILE_LOSS, mean(&weighted_losses));
        agg.insert(names::MEAN_ABSOLUTE_QUANTILE_LOSS, mean(&losses));
        agg.insert(names::MAE_COVERAGE, mean(&coverage_errors));

        agg
    }
}

impl Evaluator for QuantileEvaluator {
    fn quantiles(&self) -> &[f64] {
        &self.quantiles
    }

    fn evaluate(
        &self,
        labels: &[IndexedSeries],
        forecasts: &[Box<dyn Forecast>],
        num_series: Option<usize>,
    ) -> Result<(AggregateMetrics, Vec<ItemMetrics>)> {
        if forecasts.len() != labels.len() {
            return Err(EvaluationError::SeriesCountMismatch {
                expected: labels.len(),
                actual: forecasts.len(),
            });
        }
        if let Some(expected) = num_series {
            if expected != labels.len() {
                return Err(EvaluationError::SeriesCountMismatch {
                    expected,
                    actual: labels.len(),
                });
            }
        }
        if labels.is_empty() {
            return Err(EvaluationError::EmptyInput);
        }

        let items = labels
            .iter()
            .zip(forecasts)
            .map(|(label, forecast)| self.item_metrics(label, forecast.as_ref()))
            .collect::<Result<Vec<_>>>()?;

        let agg = self.aggregate(&items);
        debug!(series = items.len(), quantiles = self.quantiles.len(), "evaluated forecasts");

        Ok((agg, items))
    }
}

/// Label values covering the forecast horizon.
fn aligned_target<'a>(label: &'a IndexedSeries, forecast: &dyn Forecast) -> Result<&'a [f64]> {
    let misaligned = |reason: String| EvaluationError::Misaligned {
        item_id: label.item_id.clone().unwrap_or_else(|| "<unnamed>".to_string()),
        reason,
    };

    if forecast.freq() != label.freq {
        return Err(misaligned(format!(
            "forecast frequency {} differs from label frequency {}",
            forecast.freq(),
            label.freq
        )));
    }

    if let (Some(forecast_id), Some(label_id)) = (forecast.item_id(), label.item_id.as_deref()) {
        if forecast_id != label_id {
            return Err(misaligned(format!("forecast is for item '{forecast_id}'")));
        }
    }

    label
        .window(forecast.start(), forecast.prediction_length())
        .ok_or_else(|| {
            misaligned(format!(
                "label does not cover {} steps from {}",
                forecast.prediction_length(),
                forecast.start()
            ))
        })
}

fn values_of<'a>(items: &'a [ItemMetrics], name: &'a str) -> impl Iterator<Item = f64> + 'a {
    items.iter().map(move |item| item.get(name).unwrap_or(f64::NAN))
}

fn sum_of(items: &[ItemMetrics], name: &str) -> f64 {
    values_of(items, name).sum()
}

/// Mean over the items where `name` is defined; series with every label
/// value missing are left out.
fn mean_of(items: &[ItemMetrics], name: &str) -> f64 {
    let defined: Vec<f64> = values_of(items, name).filter(|v| !v.is_nan()).collect();
    mean(&defined)
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}
