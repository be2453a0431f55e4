use anyhow::Context;
use std::{fs, path::PathBuf};

use crate::config::Config;

const PNG_DIR: &str = "figures_png";
const SVG_DIR: &str = "figures_svg";

fn output_root(cfg: &Config) -> PathBuf {
    cfg.output_dir()
        .map(|d| d.to_owned())
        .unwrap_or_else(PathBuf::new)
}

pub fn setup_output(cfg: &Config) -> anyhow::Result<()> {
    // Create output directories
    let p = output_root(cfg);
    for d in [PNG_DIR, SVG_DIR] {
        let p1 = p.join(d);
        if !p1.exists() {
            fs::create_dir_all(&p1)
                .with_context(|| format!("Error creating output directory {}", p1.display()))?;
        }
    }
    Ok(())
}

/// Paths of the PNG and SVG files for a figure
pub fn figure_paths(cfg: &Config, stem: &str) -> (PathBuf, PathBuf) {
    let p = output_root(cfg);
    (
        p.join(PNG_DIR).join(format!("{}.png", stem)),
        p.join(SVG_DIR).join(format!("{}.svg", stem)),
    )
}
