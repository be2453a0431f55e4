use std::{fmt::Display, path::Path};

use anyhow::Context;
use plotters::{
    coord::Shift,
    prelude::*,
    style::{register_font, FontStyle},
};

// DejaVu Sans, see assets/DejaVuSans-LICENSE.txt
static SANS_FONT: &[u8] = include_bytes!("../assets/DejaVuSans.ttf");

/// Make the bundled font available to plotters as the sans-serif family
fn register_fonts() -> anyhow::Result<()> {
    register_font("sans-serif", FontStyle::Normal, SANS_FONT)
        .map_err(|_| anyhow!("Could not load bundled font"))
}

/// Labelled polyline, one per dataset in a figure
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    label: String,
    points: Vec<(f64, f64)>,
}

impl Curve {
    pub fn new(label: String, points: Vec<(f64, f64)>) -> Self {
        Self { label, points }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }
}

/// Cumulative frequency figure
///
/// x_desc - x axis description (the measure name)
/// max_x - upper limit of the x axis
/// curves - one curve per dataset
pub struct Figure<'a> {
    x_desc: &'a str,
    max_x: f64,
    curves: &'a [Curve],
}

impl<'a> Figure<'a> {
    pub fn new(x_desc: &'a str, max_x: f64, curves: &'a [Curve]) -> Self {
        Self {
            x_desc,
            max_x,
            curves,
        }
    }
}

fn draw_err<E: Display>(e: E) -> anyhow::Error {
    anyhow!("Drawing error: {}", e)
}

fn draw_figure<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    fig: &Figure,
) -> anyhow::Result<()> {
    register_fonts()?;
    root.fill(&WHITE).map_err(draw_err)?;

    let mut chart = ChartBuilder::on(root)
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..fig.max_x, 0.0..1.0)
        .map_err(draw_err)?;

    // Percent labels every 20%, grid lines every 10%
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(10)
        .y_labels(6)
        .y_max_light_lines(1)
        .y_label_formatter(&|y| format!("{:3.0}%", y * 100.0))
        .x_desc(fig.x_desc)
        .y_desc("Cumulative Frequency")
        .draw()
        .map_err(draw_err)?;

    for (i, c) in fig.curves.iter().enumerate() {
        let color = Palette99::pick(i).to_rgba();
        chart
            .draw_series(LineSeries::new(
                c.points().iter().copied(),
                color.stroke_width(2),
            ))
            .map_err(draw_err)?
            .label(c.label())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::LowerRight)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(draw_err)?;

    root.present().map_err(draw_err)
}

/// Render a figure to a PNG and an SVG file of the given size
pub fn render_figure(
    fig: &Figure,
    png: &Path,
    svg: &Path,
    size: (u32, u32),
) -> anyhow::Result<()> {
    debug!("Writing {}", png.display());
    {
        let root = BitMapBackend::new(png, size).into_drawing_area();
        draw_figure(&root, fig).with_context(|| format!("Error writing {}", png.display()))?;
    }
    debug!("Writing {}", svg.display());
    let root = SVGBackend::new(svg, size).into_drawing_area();
    draw_figure(&root, fig).with_context(|| format!("Error writing {}", svg.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const W: u32 = 400;
    const H: u32 = 300;

    fn curves(labels: [&str; 2]) -> Vec<Curve> {
        vec![
            Curve::new(labels[0].to_string(), vec![(0.0, 0.2), (0.05, 0.6), (0.1, 0.9)]),
            Curve::new(labels[1].to_string(), vec![(0.0, 0.1), (0.08, 0.8)]),
        ]
    }

    fn rgb_buffer(fig: &Figure) -> Vec<u8> {
        let mut buf = vec![0u8; (W * H * 3) as usize];
        {
            let root = BitMapBackend::with_buffer(&mut buf, (W, H)).into_drawing_area();
            draw_figure(&root, fig).unwrap();
        }
        buf
    }

    fn dark_pixels(buf: &[u8]) -> usize {
        buf.chunks(3).filter(|p| p.iter().all(|c| *c < 96)).count()
    }

    #[test]
    fn writes_png_and_svg() {
        let dir = tempfile::tempdir().unwrap();
        let png = dir.path().join("edpl.png");
        let svg = dir.path().join("edpl.svg");
        let curves = curves(["long", "V4"]);
        render_figure(&Figure::new("edpl", 0.1, &curves), &png, &svg, (W, H)).unwrap();

        assert!(fs::metadata(&png).unwrap().len() > 0);
        let s = fs::read_to_string(&svg).unwrap();
        assert!(s.contains("<svg"));
        assert!(s.contains("polyline") || s.contains("path"));
        assert!(s.contains("Cumulative Frequency"));
        assert!(s.contains("long"));
        assert!(s.contains("100%"));
    }

    #[test]
    fn bundled_font_draws_text_into_bitmaps() {
        register_fonts().unwrap();
        let mut buf = vec![255u8; (W * H * 3) as usize];
        {
            let root = BitMapBackend::with_buffer(&mut buf, (W, H)).into_drawing_area();
            let style = ("sans-serif", 24).into_font().color(&BLACK);
            root.draw_text("Cumulative Frequency", &style, (10, 10)).unwrap();
            root.present().unwrap();
        }
        assert!(dark_pixels(&buf) > 50);
    }

    #[test]
    fn legend_labels_are_rasterised() {
        let labelled = curves(["long reads", "short V4 reads"]);
        let blank = curves(["", ""]);
        let with_text = rgb_buffer(&Figure::new("edpl", 0.1, &labelled));
        let without_text = rgb_buffer(&Figure::new("edpl", 0.1, &blank));
        assert!(dark_pixels(&with_text) > dark_pixels(&without_text));
    }
}
