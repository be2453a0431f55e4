use anyhow::Context;

use crate::{
    cdf::ExactCdf,
    config::{dataset_label, Config},
    histogram::{BinnedCdf, Normalization},
    io,
    measure::{Measure, Method},
    output,
    plot::{render_figure, Curve, Figure},
};

fn make_points(
    data: &[f64],
    measure: Measure,
    method: Method,
    bins: usize,
) -> anyhow::Result<Vec<(f64, f64)>> {
    Ok(match method {
        Method::Exact => {
            let cdf = ExactCdf::from_samples(data)?;
            trace!(
                "Exact CDF over {} samples, {} leading zeros flattened",
                data.len(),
                cdf.zero_run()
            );
            cdf.points().collect()
        }
        Method::Histogram => {
            BinnedCdf::new(data, measure.max_x(), bins, Normalization::All)?.step_points()
        }
        Method::Simple => {
            BinnedCdf::new(data, measure.max_x(), bins, Normalization::InRange)?.step_points()
        }
    })
}

/// Strategy
///
/// For each measure, read in the samples of every dataset once
/// Then for each method build one curve per dataset and render
/// the figure as PNG and SVG
pub fn process_figures(cfg: &Config) -> anyhow::Result<()> {
    debug!("Starting processing");
    output::setup_output(cfg)?;

    let layout = cfg.layout();
    let mut fig_num = 1;
    for &measure in cfg.measures() {
        let column = layout.column(measure)?;
        let mut samples = Vec::with_capacity(cfg.datasets().len());
        for d in cfg.datasets() {
            let p = layout.sample_path(d, measure);
            let v = io::read_samples(&p, column)
                .with_context(|| format!("Error reading {} samples for {}", measure, d.display()))?;
            samples.push((dataset_label(d), v));
        }

        for &method in cfg.methods() {
            info!("Figure {}: {} {}", fig_num, measure, method);
            let curves = samples
                .iter()
                .map(|(label, v)| {
                    make_points(v, measure, method, cfg.bins())
                        .map(|pts| Curve::new(label.clone(), pts))
                        .with_context(|| format!("Error building {} curve for {}", method, label))
                })
                .collect::<anyhow::Result<Vec<_>>>()?;

            let stem = layout.figure_stem(measure, method);
            let (png, svg) = output::figure_paths(cfg, &stem);
            render_figure(
                &Figure::new(measure.name(), measure.max_x(), &curves),
                &png,
                &svg,
                cfg.size(),
            )?;
            fig_num += 1;
        }
    }
    debug!("Finished; {} figures written", fig_num - 1);
    Ok(())
}
