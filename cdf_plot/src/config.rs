use std::path::{Path, PathBuf};

use crate::measure::{Layout, Measure, Method};

/// Config
///
/// Configuration info for the program
/// This is generated from the command line arguments
/// Once set it is read only
///
/// datasets - dataset directories; one curve per dataset in each figure
/// measures - measures to plot; one figure per measure and method
/// methods - how curves are derived from the samples
/// layout - how samples are stored within a dataset directory
/// bins - number of bins for the histogram methods
/// output_dir - directory under which figures_png/ and figures_svg/ are created
/// size - image width and height in pixels
///
pub struct Config {
    datasets: Vec<PathBuf>,
    measures: Vec<Measure>,
    methods: Vec<Method>,
    layout: Layout,
    bins: usize,
    output_dir: Option<PathBuf>,
    size: (u32, u32),
}

impl Config {
    pub fn new(
        datasets: Vec<PathBuf>,
        measures: Vec<Measure>,
        methods: Vec<Method>,
        layout: Layout,
    ) -> Self {
        Self {
            datasets,
            measures,
            methods,
            layout,
            bins: 10,
            output_dir: None,
            size: (800, 600),
        }
    }

    pub fn set_output_dir(&mut self, d: PathBuf) {
        self.output_dir = Some(d)
    }

    pub fn set_bins(&mut self, bins: usize) {
        self.bins = bins
    }

    pub fn set_size(&mut self, width: u32, height: u32) {
        self.size = (width, height)
    }

    pub fn datasets(&self) -> &[PathBuf] {
        &self.datasets
    }

    pub fn measures(&self) -> &[Measure] {
        &self.measures
    }

    pub fn methods(&self) -> &[Method] {
        &self.methods
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn bins(&self) -> usize {
        self.bins
    }

    pub fn output_dir(&self) -> Option<&Path> {
        self.output_dir.as_deref()
    }

    pub fn size(&self) -> (u32, u32) {
        self.size
    }
}

/// Legend label for a dataset: the last component of its path
pub fn dataset_label(p: &Path) -> String {
    p.file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| p.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_use_last_component() {
        assert_eq!(dataset_label(Path::new("runs/long")), "long");
        assert_eq!(dataset_label(Path::new("V4")), "V4");
        assert_eq!(dataset_label(Path::new("..")), "..");
    }
}
