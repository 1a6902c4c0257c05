//! Model factories for the built-in search spaces.

use predictor_api::{Estimator, SeasonalMovingAverage, TrainingContext};
use tuning_spi::ModelFactory;

use crate::MovingAverageParams;

/// Builds [`SeasonalMovingAverage`] estimators.
#[derive(Debug, Clone, Copy, Default)]
pub struct MovingAverageFactory;

impl ModelFactory for MovingAverageFactory {
    type Params = MovingAverageParams;

    fn build(
        &self,
        params: &MovingAverageParams,
        context: &TrainingContext,
    ) -> predictor_api::SpiResult<Box<dyn Estimator>> {
        let estimator =
            SeasonalMovingAverage::new(params.window, params.season_length, context.clone())?;
        Ok(Box::new(estimator))
    }
}
