/// ExactCdf
///
/// Exact empirical cumulative distribution of a sample set, built from the
/// sorted samples rather than from a binned approximation.
///
/// x - the samples sorted in ascending order
/// y - for each x, the fraction of samples that lie strictly before it
///
/// A run of leading zero samples is flattened to the height at the last zero,
/// so the curve shows a single step at x = 0 instead of a staircase through
/// identical x values.
///
#[derive(Debug, Clone, PartialEq)]
pub struct ExactCdf {
    x: Vec<f64>,
    y: Vec<f64>,
}

impl ExactCdf {
    /// Build from a sample set.  Samples must be finite and non-negative, and
    /// there must be at least one of them.  The input is not modified.
    pub fn from_samples(data: &[f64]) -> anyhow::Result<Self> {
        if data.is_empty() {
            return Err(anyhow!("Cannot build a CDF from an empty sample set"));
        }
        if let Some((i, v)) = data
            .iter()
            .enumerate()
            .find(|(_, v)| !(v.is_finite() && **v >= 0.0))
        {
            return Err(anyhow!(
                "Invalid sample {} at position {}: samples must be finite and non-negative",
                v,
                i
            ));
        }

        let mut x = data.to_vec();
        x.sort_unstable_by(|a, b| a.total_cmp(b));

        let n = x.len() as f64;
        let naive: Vec<f64> = (0..x.len()).map(|i| (i as f64) / n).collect();

        // Number of leading zeros; everything before the last zero takes its height
        let z = x.iter().take_while(|v| **v == 0.0).count();
        let y = naive
            .iter()
            .enumerate()
            .map(|(i, f)| if i < z { naive[z - 1] } else { *f })
            .collect();

        Ok(Self { x, y })
    }

    pub fn x(&self) -> &[f64] {
        &self.x
    }

    pub fn y(&self) -> &[f64] {
        &self.y
    }

    /// Number of samples equal to zero
    pub fn zero_run(&self) -> usize {
        self.x.iter().take_while(|v| **v == 0.0).count()
    }

    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }
}
