//! # Configuration
//!
//! The bakery has one fixed topology (a shop, a sofa, one cash register and a pool of
//! chefs) but its sizes and its pacing are values, not literals. [`BakeryConfig`]
//! carries them with defaults matching the classic setup: 25 customers inside,
//! 4 sofa seats, 4 chefs and one second per simulated time unit.
//!
//! ## Environment Overrides
//!
//! | Variable | Field |
//! |---|---|
//! | `BAKERY_SHOP_CAPACITY` | [`BakeryConfig::shop_capacity`] |
//! | `BAKERY_SEATS` | [`BakeryConfig::seat_capacity`] |
//! | `BAKERY_CHEFS` | [`BakeryConfig::chef_count`] |
//! | `BAKERY_TIME_UNIT_MS` | [`BakeryConfig::time_unit`] |

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

pub const SHOP_CAPACITY: usize = 25;
pub const SEAT_CAPACITY: usize = 4;
pub const CHEF_COUNT: usize = 4;
pub const TIME_UNIT: Duration = Duration::from_secs(1);

/// Errors produced while building or validating a [`BakeryConfig`].
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    /// A capacity or count that must be positive was zero.
    #[error("{0} must be at least 1")]
    Zero(&'static str),

    /// An environment override could not be parsed.
    #[error("Invalid value for {var}: {value:?}")]
    InvalidOverride { var: &'static str, value: String },
}

/// How long each stage of a visit takes, in simulated time units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StagePauses {
    /// Between entering the shop and trying to sit.
    pub enter: u64,
    /// Between sitting down and being ready to order.
    pub settle: u64,
    /// Between stating the order and handing it to the chef.
    pub order: u64,
    /// Baking one cake.
    pub bake: u64,
    /// Between receiving the cake and queueing at the register.
    pub to_register: u64,
    /// Processing one payment at the register.
    pub payment: u64,
    /// Between leaving the sofa and leaving the shop.
    pub exit: u64,
}

impl Default for StagePauses {
    fn default() -> Self {
        Self {
            enter: 1,
            settle: 1,
            order: 1,
            bake: 2,
            to_register: 1,
            payment: 2,
            exit: 1,
        }
    }
}

/// Sizes and pacing of the bakery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BakeryConfig {
    pub shop_capacity: usize,
    pub seat_capacity: usize,
    pub chef_count: usize,
    /// Wall-clock length of one simulated time unit.
    pub time_unit: Duration,
    pub pauses: StagePauses,
}

impl Default for BakeryConfig {
    fn default() -> Self {
        Self {
            shop_capacity: SHOP_CAPACITY,
            seat_capacity: SEAT_CAPACITY,
            chef_count: CHEF_COUNT,
            time_unit: TIME_UNIT,
            pauses: StagePauses::default(),
        }
    }
}

impl BakeryConfig {
    /// Default configuration with environment overrides applied, validated.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Same as [`from_env`](Self::from_env) but reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        fn parse<T: std::str::FromStr>(
            lookup: &impl Fn(&str) -> Option<String>,
            var: &'static str,
        ) -> Result<Option<T>, ConfigError> {
            match lookup(var) {
                None => Ok(None),
                Some(value) => value
                    .trim()
                    .parse()
                    .map(Some)
                    .map_err(|_| ConfigError::InvalidOverride { var, value }),
            }
        }

        let mut config = Self::default();
        if let Some(v) = parse(&lookup, "BAKERY_SHOP_CAPACITY")? {
            config.shop_capacity = v;
        }
        if let Some(v) = parse(&lookup, "BAKERY_SEATS")? {
            config.seat_capacity = v;
        }
        if let Some(v) = parse(&lookup, "BAKERY_CHEFS")? {
            config.chef_count = v;
        }
        if let Some(ms) = parse::<u64>(&lookup, "BAKERY_TIME_UNIT_MS")? {
            config.time_unit = Duration::from_millis(ms);
        }
        config.validate()?;
        Ok(config)
    }

    pub fn with_shop_capacity(mut self, capacity: usize) -> Self {
        self.shop_capacity = capacity;
        self
    }

    pub fn with_seat_capacity(mut self, capacity: usize) -> Self {
        self.seat_capacity = capacity;
        self
    }

    pub fn with_chef_count(mut self, count: usize) -> Self {
        self.chef_count = count;
        self
    }

    pub fn with_time_unit(mut self, unit: Duration) -> Self {
        self.time_unit = unit;
        self
    }

    pub fn with_pauses(mut self, pauses: StagePauses) -> Self {
        self.pauses = pauses;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.shop_capacity == 0 {
            return Err(ConfigError::Zero("shop_capacity"));
        }
        if self.seat_capacity == 0 {
            return Err(ConfigError::Zero("seat_capacity"));
        }
        if self.chef_count == 0 {
            return Err(ConfigError::Zero("chef_count"));
        }
        if self.time_unit.is_zero() {
            return Err(ConfigError::Zero("time_unit"));
        }
        Ok(())
    }
}
