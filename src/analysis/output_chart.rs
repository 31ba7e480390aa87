// Horizontal bar chart of the composite scores, best treatment on top.

use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use std::error::Error;
use std::ops::Range;
use std::path::Path;

const TITLE: &str = "Composite Scores by Treatment (Sorted Descending)";

/// Draws the bars in the given order, the first one at the top.
pub fn render_chart(
    path: &Path,
    bars: &[(String, f64)],
    size: (u32, u32),
) -> Result<(), Box<dyn Error>> {
    if bars.is_empty() {
        return Err("no score to draw".into());
    }
    let n = bars.len();
    let longest = bars.iter().map(|(l, _)| l.chars().count()).max().unwrap_or(0);
    let label_area = (longest as u32 * 9 + 30).min(size.0 / 3).max(60);

    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(TITLE, ("sans-serif", 32))
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(label_area)
        .build_cartesian_2d(0f64..1.05f64, band_axis(n).into_segmented())?;

    // Band i holds bar n - 1 - i.
    let label_of = |v: &SegmentValue<usize>| match v {
        SegmentValue::CenterOf(i) if *i < n => bars[band_of(*i, n)].0.clone(),
        _ => String::new(),
    };
    chart
        .configure_mesh()
        .disable_y_mesh()
        .x_max_light_lines(0)
        .y_labels(n)
        .y_label_formatter(&label_of)
        .x_desc("Composite Score")
        .y_desc("Treatment")
        .label_style(("sans-serif", 18))
        .axis_desc_style(("sans-serif", 20))
        .draw()?;

    chart.draw_series(bars.iter().enumerate().map(|(k, (_, score))| {
        let (bottom, top) = band_bounds(band_of(k, n), n);
        Rectangle::new([(0.0, bottom), (*score, top)], bar_color(k, n).filled())
    }))?;

    let annotation = TextStyle::from(("sans-serif", 15).into_font())
        .pos(Pos::new(HPos::Left, VPos::Center));
    chart.draw_series(bars.iter().enumerate().map(|(k, (_, score))| {
        Text::new(
            format!("{:.3}", score),
            (*score + 0.005, SegmentValue::CenterOf(band_of(k, n))),
            annotation.clone(),
        )
    }))?;

    root.present()?;
    Ok(())
}

// Integer ranges are inclusive in plotters: n bands need 0..n - 1.
fn band_axis(n: usize) -> Range<usize> {
    0..n - 1
}

/// The band of bar k, counted from the bottom. The first bar is at the top.
fn band_of(k: usize, n: usize) -> usize {
    n - 1 - k
}

fn band_bounds(band: usize, n: usize) -> (SegmentValue<usize>, SegmentValue<usize>) {
    let top = if band + 1 >= n {
        SegmentValue::Last
    } else {
        SegmentValue::Exact(band + 1)
    };
    (SegmentValue::Exact(band), top)
}

/// From dark blue for the best treatment to light blue for the worst.
fn bar_color(k: usize, n: usize) -> RGBColor {
    let t = if n > 1 {
        k as f64 / (n - 1) as f64
    } else {
        0.0
    };
    let lerp = |a: f64, b: f64| (a + (b - a) * t).round() as u8;
    RGBColor(lerp(8.0, 158.0), lerp(48.0, 202.0), lerp(107.0, 225.0))
}
