// Summary statistics over feature columns.
//
// Standard deviations are population deviations (divide by n). Every
// function here returns NaN for an empty input; callers that need a
// different empty value decide that themselves.

use std::collections::{BTreeMap, BTreeSet};

/// Mean, population standard deviation, min, max and sum of a column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub max: f64,
    pub sum: f64,
}

impl Summary {
    pub fn of(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self {
                mean: f64::NAN,
                std: f64::NAN,
                min: f64::NAN,
                max: f64::NAN,
                sum: f64::NAN,
            };
        }

        let n = values.len() as f64;
        let sum: f64 = values.iter().sum();
        let mean = sum / n;
        let variance = values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n;

        Self {
            mean,
            std: variance.sqrt(),
            min: values.iter().copied().fold(f64::INFINITY, f64::min),
            max: values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            sum,
        }
    }
}

/// Most frequent value of a column of integer codes.
///
/// Ties go to the smallest code, which is what picking the first maximum
/// of a per-value count table yields.
pub fn mode(values: &[f64]) -> f64 {
    let mut counts: BTreeMap<i64, usize> = BTreeMap::new();
    for v in values {
        *counts.entry(*v as i64).or_default() += 1;
    }

    let mut best: Option<(i64, usize)> = None;
    for (value, count) in counts {
        // Ascending key order: only a strictly larger count replaces the best.
        if best.map_or(true, |(_, c)| count > c) {
            best = Some((value, count));
        }
    }
    best.map(|(v, _)| v as f64).unwrap_or(f64::NAN)
}

/// Number of distinct integer codes, skipping any listed in `excluded`.
pub fn distinct_count(values: &[f64], excluded: &[i64]) -> usize {
    values
        .iter()
        .map(|v| *v as i64)
        .filter(|v| !excluded.contains(v))
        .collect::<BTreeSet<_>>()
        .len()
}

/// `numerator / denominator`, or 0 when the denominator is 0.
pub fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}
