//! Convergence diagnostics computed imperatively before rendering.
//!
//! The dashboard's charting layer is declarative and recomputes histograms
//! at view time, but the cross-chain diagnostics below cannot be expressed
//! there, so they are computed once and embedded into the summary table.

/// Arithmetic mean.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Unbiased sample variance (n - 1 denominator).
pub fn sample_variance(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return f64::NAN;
    }
    let m = mean(values);
    values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64
}

/// Potential scale reduction factor (Gelman-Rubin) across chains.
///
/// Compares between-chain and within-chain variance of one parameter
/// sampled by multiple chains of the same model. Values near 1 indicate
/// convergence. Returns [`None`] when fewer than two chains or samples are
/// available, or when the within-chain variance vanishes.
///
/// Chains of unequal length are truncated to the shortest.
pub fn potential_scale_reduction(chains: &[Vec<f64>]) -> Option<f64> {
    let m = chains.len();
    if m < 2 {
        return None;
    }
    let n = chains.iter().map(Vec::len).min()?;
    if n < 2 {
        return None;
    }

    let chains: Vec<&[f64]> = chains.iter().map(|c| &c[..n]).collect();
    let chain_means: Vec<f64> = chains.iter().map(|c| mean(c)).collect();

    // W: mean within-chain variance; B/n: variance of the chain means
    let within = mean(&chains.iter().map(|c| sample_variance(c)).collect::<Vec<f64>>());
    let between_over_n = sample_variance(&chain_means);

    if !within.is_finite() || within <= 0.0 {
        return None;
    }

    let n = n as f64;
    let var_estimate = (n - 1.0) / n * within + between_over_n;
    Some((var_estimate / within).sqrt())
}
