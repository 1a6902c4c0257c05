//! Typed hyperparameter configurations.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tuning_spi::{IntRange, Result, SearchSpace};

/// Network architecture hyperparameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkParams {
    pub num_layers: usize,
    pub hidden_size: usize,
}

impl NetworkParams {
    pub const NUM_LAYERS: IntRange = IntRange::new("num_layers", 1, 5);
    pub const HIDDEN_SIZE: IntRange = IntRange::new("hidden_size", 10, 50);

    /// Create a configuration, rejecting out-of-range values.
    pub fn new(num_layers: usize, hidden_size: usize) -> Result<Self> {
        let params = Self {
            num_layers,
            hidden_size,
        };
        params.validate()?;
        Ok(params)
    }
}

impl SearchSpace for NetworkParams {
    fn ranges() -> Vec<IntRange> {
        vec![Self::NUM_LAYERS, Self::HIDDEN_SIZE]
    }

    fn sample<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            num_layers: Self::NUM_LAYERS.sample(rng) as usize,
            hidden_size: Self::HIDDEN_SIZE.sample(rng) as usize,
        }
    }

    fn validate(&self) -> Result<()> {
        Self::NUM_LAYERS.check(to_i64(self.num_layers))?;
        Self::HIDDEN_SIZE.check(to_i64(self.hidden_size))?;
        Ok(())
    }

    fn params(&self) -> Vec<(String, f64)> {
        vec![
            ("num_layers".to_string(), self.num_layers as f64),
            ("hidden_size".to_string(), self.hidden_size as f64),
        ]
    }
}

/// Seasonal moving average hyperparameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovingAverageParams {
    pub window: usize,
    pub season_length: usize,
}

impl MovingAverageParams {
    pub const WINDOW: IntRange = IntRange::new("window", 1, 20);
    pub const SEASON_LENGTH: IntRange = IntRange::new("season_length", 1, 12);

    /// Create a configuration, rejecting out-of-range values.
    pub fn new(window: usize, season_length: usize) -> Result<Self> {
        let params = Self {
            window,
            season_length,
        };
        params.validate()?;
        Ok(params)
    }
}

impl SearchSpace for MovingAverageParams {
    fn ranges() -> Vec<IntRange> {
        vec![Self::WINDOW, Self::SEASON_LENGTH]
    }

    fn sample<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            window: Self::WINDOW.sample(rng) as usize,
            season_length: Self::SEASON_LENGTH.sample(rng) as usize,
        }
    }

    fn validate(&self) -> Result<()> {
        Self::WINDOW.check(to_i64(self.window))?;
        Self::SEASON_LENGTH.check(to_i64(self.season_length))?;
        Ok(())
    }

    fn params(&self) -> Vec<(String, f64)> {
        vec![
            ("window".to_string(), self.window as f64),
            ("season_length".to_string(), self.season_length as f64),
        ]
    }
}

// Values too large for i64 are out of every declared range.
fn to_i64(value: usize) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}
