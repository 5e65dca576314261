//! Cross-sectional statistical operations.

use std::cmp::Ordering;

use ndarray::{Array1, ArrayView1};

/// Degrees-of-freedom convention for a standard deviation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Ddof {
    /// Divide by `n`.
    #[default]
    Population,
    /// Divide by `n - 1`.
    Sample,
}

impl Ddof {
    const fn as_f64(self) -> f64 {
        match self {
            Self::Population => 0.0,
            Self::Sample => 1.0,
        }
    }
}

/// Median of a slice, NaN if empty.
///
/// Even-length inputs average the two middle values.
#[must_use]
pub fn median(data: &[f64]) -> f64 {
    if data.is_empty() {
        return f64::NAN;
    }

    let mut sorted = data.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 { (sorted[mid - 1] + sorted[mid]) / 2.0 } else { sorted[mid] }
}

/// Standard deviation with the given convention, NaN when undefined.
#[must_use]
pub fn std_dev(data: ArrayView1<'_, f64>, ddof: Ddof) -> f64 {
    let n = data.len() as f64;
    if n - ddof.as_f64() <= 0.0 {
        return f64::NAN;
    }
    let mean = data.mean().unwrap_or(f64::NAN);
    let ss: f64 = data.iter().map(|x| (x - mean).powi(2)).sum();
    (ss / (n - ddof.as_f64())).sqrt()
}

/// Cross-sectional z-score transform.
///
/// A zero or undefined dispersion yields NaN for every element instead of
/// silently returning the centered values. Dispersion at the rounding floor
/// of the mean counts as zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZScore {
    /// Standard deviation convention.
    pub ddof: Ddof,
}

impl ZScore {
    /// Create a new z-score transform.
    #[must_use]
    pub const fn new(ddof: Ddof) -> Self {
        Self { ddof }
    }

    /// Apply the transform to an array.
    #[must_use]
    pub fn apply(&self, data: &Array1<f64>) -> Array1<f64> {
        if data.is_empty() {
            return data.clone();
        }

        let mean = data.mean().unwrap_or(f64::NAN);
        let std = std_dev(data.view(), self.ddof);

        if is_degenerate(data, mean, std) {
            Array1::from_elem(data.len(), f64::NAN)
        } else {
            data.mapv(|x| (x - mean) / std)
        }
    }
}

fn is_degenerate(data: &Array1<f64>, mean: f64, std: f64) -> bool {
    if !std.is_finite() || std <= 0.0 {
        return true;
    }
    let first = data[0];
    if data.iter().all(|&x| x == first) {
        return true;
    }
    std <= f64::EPSILON * mean.abs().max(1.0) * data.len() as f64
}

/// Ascending 1-based ranks with ties assigned their average rank.
#[must_use]
pub fn average_rank(data: &Array1<f64>) -> Array1<f64> {
    let n = data.len();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| data[a].partial_cmp(&data[b]).unwrap_or(Ordering::Equal));

    let mut ranks = Array1::zeros(n);
    let mut i = 0;
    while i < n {
        let mut j = i + 1;
        while j < n && data[order[j]] == data[order[i]] {
            j += 1;
        }
        // positions i..j share the mean of ranks i+1..=j
        let rank = (i + j + 1) as f64 / 2.0;
        for &idx in &order[i..j] {
            ranks[idx] = rank;
        }
        i = j;
    }

    ranks
}
