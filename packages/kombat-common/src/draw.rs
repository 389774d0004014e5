use cosmwasm_schema::cw_serde;
use thiserror::Error;

use crate::types::Tier;

/// Chances are expressed per mille.
pub const DENOMINATOR: u64 = 1000;

/// Number of same-tier items consumed by one mix.
pub const MIX_INPUT_COUNT: usize = 3;

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("output tiers ({tiers}) and chances ({chances}) differ in length")]
    LengthMismatch { tiers: usize, chances: usize },

    #[error("chances sum to {sum}, expected {expected}")]
    WeightSumInvalid { sum: u64, expected: u64 },

    #[error("no item pool configured for tier {tier}")]
    EmptyPool { tier: Tier },

    #[error("no probability table configured for tier {tier}")]
    NotConfigured { tier: Tier },
}

/// Candidate output tiers for one input tier, with per-mille weights.
///
/// Order is significant: the draw partitions `[0, DENOMINATOR)` into
/// contiguous half-open buckets in table order.
#[cw_serde]
pub struct ProbabilityTable {
    pub output_tiers: Vec<Tier>,
    pub chances: Vec<u16>,
}

impl ProbabilityTable {
    /// Build a table, rejecting mismatched lengths and weights that do not
    /// sum to `DENOMINATOR`.
    pub fn new(output_tiers: Vec<Tier>, chances: Vec<u16>) -> Result<Self, ConfigError> {
        let table = Self {
            output_tiers,
            chances,
        };
        table.validate()?;
        Ok(table)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.output_tiers.len() != self.chances.len() {
            return Err(ConfigError::LengthMismatch {
                tiers: self.output_tiers.len(),
                chances: self.chances.len(),
            });
        }
        let sum: u64 = self.chances.iter().map(|c| u64::from(*c)).sum();
        if sum != DENOMINATOR {
            return Err(ConfigError::WeightSumInvalid {
                sum,
                expected: DENOMINATOR,
            });
        }
        Ok(())
    }

    /// Cumulative-threshold walk: returns the tier of the first bucket whose
    /// running total exceeds `roll`. `None` only when `roll` lies past the
    /// last bucket, which cannot happen for a validated table and
    /// `roll < DENOMINATOR`.
    pub fn draw(&self, roll: u64) -> Option<Tier> {
        let mut threshold = 0u64;
        for (tier, chance) in self.output_tiers.iter().zip(self.chances.iter()) {
            threshold += u64::from(*chance);
            if roll < threshold {
                return Some(*tier);
            }
        }
        None
    }
}

/// Pick a concrete item from a tier's pool: `pool[index mod len]`.
pub fn resolve_edition(tier: Tier, pool: &[u64], index: u64) -> Result<u64, ConfigError> {
    if pool.is_empty() {
        return Err(ConfigError::EmptyPool { tier });
    }
    let slot = (index % pool.len() as u64) as usize;
    Ok(pool[slot])
}
