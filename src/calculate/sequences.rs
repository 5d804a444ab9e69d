//! Order-dependent sequence statistics: run lengths, repetition counts and
//! dispersion.

use std::collections::HashMap;
use std::hash::Hash;

/// Lengths of each maximal run of `target`, in the order the runs occur.
///
/// Other values only separate runs. A run reaching the end of the input is
/// included.
pub fn run_lengths<T: PartialEq>(values: &[T], target: T) -> Vec<usize> {
    let mut lengths = Vec::new();
    let mut length = 0;

    for value in values {
        if *value == target {
            length += 1;
        } else {
            if length > 0 {
                lengths.push(length);
            }
            length = 0;
        }
    }

    if length > 0 {
        lengths.push(length);
    }

    lengths
}

/// Count extra back-to-back repetitions per category.
///
/// Each adjacent equal pair bumps a pending counter which is added to the
/// category's total when the sequence moves on to a different value. The run
/// still open at the end is never flushed, so a trailing run contributes
/// nothing: `[A, A, A, B]` gives `{A: 2}` and `[A, A, A]` gives `{}`.
pub fn count_consecutive_repetitions<K>(symbols: &[K]) -> HashMap<K, usize>
where
    K: Eq + Hash + Clone,
{
    let mut counter = HashMap::new();
    let mut pending = 0;

    for pair in symbols.windows(2) {
        if pair[1] == pair[0] {
            pending += 1;
        } else {
            *counter.entry(pair[0].clone()).or_insert(0) += pending;
            pending = 0;
        }
    }

    counter
}

/// Occurrence count per distinct value.
pub fn histogram<K, I>(values: I) -> HashMap<K, usize>
where
    K: Eq + Hash,
    I: IntoIterator<Item = K>,
{
    let mut hist = HashMap::new();
    for value in values {
        *hist.entry(value).or_insert(0) += 1;
    }
    hist
}

/// Arithmetic mean, 0.0 for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation (divisor N), 0.0 for an empty slice.
pub fn population_stdev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mean = mean(values);
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Population standard deviation of occurrence counts.
///
/// Counts are sorted before summing, so hash-map iteration order never
/// changes the result.
pub fn counts_stdev<I>(counts: I) -> f64
where
    I: IntoIterator<Item = usize>,
{
    let mut counts: Vec<usize> = counts.into_iter().collect();
    counts.sort_unstable();
    let values: Vec<f64> = counts.into_iter().map(|c| c as f64).collect();
    population_stdev(&values)
}
