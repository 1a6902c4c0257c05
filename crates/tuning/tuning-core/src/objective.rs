//! Forecast tuning objective.

use dataset_core::{
    materialize_labels, DatasetEntry, IndexedSeries, InstanceGenerator, OffsetSplitter, Splitter,
};
use evaluation_core::{Evaluator, QuantileEvaluator};
use predictor_spi::TrainingContext;
use tracing::{debug, info};
use tuning_api::TuningConfig;
use tuning_spi::{ModelFactory, Objective, Result, SearchSpace, TuningError};

/// Trains and scores one model configuration per call.
///
/// The dataset is split once at construction: the training view drops the
/// last `prediction_length` observations of every series and the held-out
/// windows become labels. Each [`evaluate`](Objective::evaluate) call only
/// reads this state, so calls are independent and may run concurrently.
pub struct ForecastObjective<F: ModelFactory> {
    factory: F,
    evaluator: Box<dyn Evaluator>,
    train: Vec<DatasetEntry>,
    inputs: Vec<DatasetEntry>,
    labels: Vec<IndexedSeries>,
    metric: String,
    num_series: usize,
    context: TrainingContext,
}

impl<F: ModelFactory> ForecastObjective<F> {
    /// Build an objective scored by a [`QuantileEvaluator`] at the
    /// configured quantile levels.
    pub fn new(dataset: &[DatasetEntry], factory: F, config: &TuningConfig) -> Result<Self> {
        config.validate()?;
        let evaluator = QuantileEvaluator::from_config(&config.evaluator_config())?;
        Self::with_evaluator(dataset, factory, Box::new(evaluator), config)
    }

    /// Build an objective scored by `evaluator`.
    pub fn with_evaluator(
        dataset: &[DatasetEntry],
        factory: F,
        evaluator: Box<dyn Evaluator>,
        config: &TuningConfig,
    ) -> Result<Self> {
        config.validate()?;

        let splitter = OffsetSplitter::from_config(&config.split_config())?;
        let (train, generator) = splitter.split(dataset)?;
        let instances = generator.generate_instances(config.prediction_length, 1)?;
        let labels = materialize_labels(&instances)?;
        let inputs = instances.into_iter().map(|instance| instance.input).collect();

        let num_series = config.num_series.unwrap_or(dataset.len());
        if num_series != labels.len() {
            return Err(TuningError::Configuration(format!(
                "num_series is {num_series} but the dataset has {} series",
                labels.len()
            )));
        }

        info!(
            series = num_series,
            prediction_length = config.prediction_length,
            freq = %config.freq,
            metric = %config.metric,
            "prepared tuning objective"
        );

        Ok(Self {
            factory,
            evaluator,
            train,
            inputs,
            labels,
            metric: config.metric.clone(),
            num_series,
            context: config.training_context(),
        })
    }

    /// Training view every configuration is trained on.
    pub fn training_data(&self) -> &[DatasetEntry] {
        &self.train
    }

    /// Held-out labels forecasts are scored against.
    pub fn labels(&self) -> &[IndexedSeries] {
        &self.labels
    }

    pub fn num_series(&self) -> usize {
        self.num_series
    }
}

impl<F: ModelFactory> Objective for ForecastObjective<F> {
    type Params = F::Params;

    fn metric(&self) -> &str {
        &self.metric
    }

    fn evaluate(&self, params: &F::Params) -> Result<f64> {
        params.validate()?;

        let estimator = self
            .factory
            .build(params, &self.context)
            .map_err(|e| TuningError::Configuration(e.to_string()))?;
        let predictor = estimator
            .train(&self.train)
            .map_err(|e| TuningError::Training(e.to_string()))?;
        let forecasts = predictor
            .predict(&self.inputs)
            .map_err(|e| TuningError::Prediction(e.to_string()))?;

        if forecasts.len() != self.inputs.len() {
            return Err(TuningError::Prediction(format!(
                "expected {} forecasts, got {}",
                self.inputs.len(),
                forecasts.len()
            )));
        }

        let (agg, _) = self
            .evaluator
            .evaluate(&self.labels, &forecasts, Some(self.num_series))?;
        let value = agg
            .get(&self.metric)
            .ok_or_else(|| TuningError::MetricNotFound(self.metric.clone()))?;

        if !value.is_finite() {
            return Err(TuningError::NonFiniteScore {
                metric: self.metric.clone(),
                value,
            });
        }

        debug!(metric = %self.metric, value, "scored configuration");
        Ok(value)
    }
}
