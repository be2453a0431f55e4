/// How the cumulative bin counts are normalized
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Normalization {
    /// Divide by the number of all samples
    All,
    /// Divide by the number of samples falling inside the binned range
    InRange,
}

/// BinnedCdf
///
/// Cumulative histogram over equal width bins spanning [0, max_x]
///
/// edges - bins + 1 bin edges
/// levels - cumulative fraction for each bin, with the last level repeated
///          so that the final step is drawn
///
#[derive(Debug, Clone, PartialEq)]
pub struct BinnedCdf {
    edges: Vec<f64>,
    levels: Vec<f64>,
}

impl BinnedCdf {
    pub fn new(
        data: &[f64],
        max_x: f64,
        bins: usize,
        norm: Normalization,
    ) -> anyhow::Result<Self> {
        if data.is_empty() {
            return Err(anyhow!("Cannot build a histogram from an empty sample set"));
        }
        if bins == 0 {
            return Err(anyhow!("Number of bins must be at least 1"));
        }
        if !(max_x.is_finite() && max_x > 0.0) {
            return Err(anyhow!("Invalid histogram range [0, {}]", max_x));
        }

        let edges: Vec<f64> = (0..=bins)
            .map(|i| max_x * (i as f64) / (bins as f64))
            .collect();

        let mut counts = vec![0usize; bins];
        for &v in data.iter().filter(|v| **v >= 0.0 && **v <= max_x) {
            counts[bin_index(&edges, v)] += 1;
        }
        let in_range: usize = counts.iter().sum();
        trace!(
            "{} of {} samples within [0, {}]",
            in_range,
            data.len(),
            max_x
        );

        let denom = match norm {
            Normalization::All => data.len(),
            Normalization::InRange => in_range,
        } as f64;

        let mut levels = Vec::with_capacity(bins + 1);
        let mut cum = 0;
        for c in counts {
            cum += c;
            // No sample in range at all leaves a flat line at 0
            levels.push(if denom > 0.0 { cum as f64 / denom } else { 0.0 });
        }
        levels.push(levels[bins - 1]);

        Ok(Self { edges, levels })
    }

    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    pub fn levels(&self) -> &[f64] {
        &self.levels
    }

    /// Polyline tracing the histogram as a step function, each level held
    /// from its own edge up to the next one
    pub fn step_points(&self) -> Vec<(f64, f64)> {
        let mut v = Vec::with_capacity(2 * self.edges.len());
        for (i, (x, y)) in self.edges.iter().zip(self.levels.iter()).enumerate() {
            v.push((*x, *y));
            if let Some(x1) = self.edges.get(i + 1) {
                v.push((*x1, *y))
            }
        }
        v
    }
}

// Edges are closed on the left, except for the last bin which also takes max_x
fn bin_index(edges: &[f64], v: f64) -> usize {
    let bins = edges.len() - 1;
    let width = edges[bins] / (bins as f64);
    let mut i = ((v / width) as usize).min(bins - 1);
    while i > 0 && v < edges[i] {
        i -= 1
    }
    while i + 1 < bins && v >= edges[i + 1] {
        i += 1
    }
    i
}
