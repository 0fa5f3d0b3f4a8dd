//! Splitting a total blade count across the selected styles.
//!
//! [`plan`] trusts the percentages as given: each selected style receives
//! `round(total * pct / 100)` blades (ties to even) and nothing is rebalanced, so
//! weights summing to 80 under-generate and the plan total may drift from the
//! requested total by rounding. Keeping active percentages at 100 is the job of the
//! caller; [`balance_percentages`] implements the usual slider rule for that.
use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::style::StyleName;

/// Percentage per selected style. Styles absent from the map are not selected.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleWeights {
    weights: BTreeMap<StyleName, u32>,
}

impl StyleWeights {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select `style` with the given percentage, replacing any earlier weight.
    pub fn with(mut self, style: StyleName, percentage: u32) -> Self {
        self.set(style, percentage);
        self
    }

    pub fn set(&mut self, style: StyleName, percentage: u32) {
        self.weights.insert(style, percentage);
    }

    pub fn deselect(&mut self, style: StyleName) {
        self.weights.remove(&style);
    }

    pub fn get(&self, style: StyleName) -> Option<u32> {
        self.weights.get(&style).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (StyleName, u32)> + '_ {
        self.weights.iter().map(|(s, p)| (*s, *p))
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn percentage_sum(&self) -> u64 {
        self.weights.values().map(|p| *p as u64).sum()
    }

    /// Copy of these weights with percentages passed through [`balance_percentages`].
    pub fn balanced(&self) -> Self {
        let values: Vec<u32> = self.weights.values().copied().collect();
        let weights = self
            .weights
            .keys()
            .copied()
            .zip(balance_percentages(&values))
            .collect();
        Self { weights }
    }
}

impl FromIterator<(StyleName, u32)> for StyleWeights {
    fn from_iter<I: IntoIterator<Item = (StyleName, u32)>>(iter: I) -> Self {
        Self {
            weights: iter.into_iter().collect(),
        }
    }
}

/// Number of blades to generate per selected style.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MixPlan {
    counts: BTreeMap<StyleName, usize>,
}

impl MixPlan {
    pub fn get(&self, style: StyleName) -> Option<usize> {
        self.counts.get(&style).copied()
    }

    /// Entries in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = (StyleName, usize)> + '_ {
        self.counts.iter().map(|(s, c)| (*s, *c))
    }

    /// Sum over all styles; may differ from the resolved total by rounding.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }
}

impl FromIterator<(StyleName, usize)> for MixPlan {
    fn from_iter<I: IntoIterator<Item = (StyleName, usize)>>(iter: I) -> Self {
        Self {
            counts: iter.into_iter().collect(),
        }
    }
}

/// Distribute `total` across the selected styles.
pub fn plan(total: usize, weights: &StyleWeights) -> MixPlan {
    let sum = weights.percentage_sum();
    if !weights.is_empty() && sum != 100 {
        warn!(
            "Selected style percentages sum to {}, not 100; counts are not rebalanced.",
            sum
        );
    }
    weights
        .iter()
        .map(|(style, pct)| (style, share_of(total, pct)))
        .collect()
}

/// `round(total * pct / 100)` with ties going to the even neighbour.
fn share_of(total: usize, pct: u32) -> usize {
    let n = total as u128 * pct as u128;
    let q = n / 100;
    let r = n % 100;
    let rounded = if r > 50 || (r == 50 && q % 2 == 1) {
        q + 1
    } else {
        q
    };
    rounded as usize
}

/// Rescale active slider values so they add up to (at most) 100.
///
/// All zeros stay zeros. Otherwise each value becomes `floor(value / sum * 100)`,
/// clamped to [0, 100].
pub fn balance_percentages(values: &[u32]) -> Vec<u32> {
    let sum: u64 = values.iter().map(|v| *v as u64).sum();
    if sum == 0 {
        return vec![0; values.len()];
    }
    values
        .iter()
        .map(|v| ((*v as u64 * 100) / sum).min(100) as u32)
        .collect()
}
