use chrono::prelude::*;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;

use crate::{min_and_max, suitable_xfmt, Series};

const BROWN: RGBColor = RGBColor(165, 42, 42);

#[derive(Debug, Clone, Copy)]
enum Marker {
    Circle,
    Square,
}

struct Trace<'a> {
    label: String,
    series: &'a Series,
    color: RGBColor,
    marker: Marker,
}

struct Panel {
    quantity: &'static str,
    title: &'static str,
    y_desc: &'static str,
    values: fn(&Series) -> &[f64],
    colors: [RGBColor; 2],
}

const PANELS: [Panel; 2] = [
    Panel {
        quantity: "Temperature",
        title: "Temperature - Sola vs Local",
        y_desc: "temperature [°C]",
        values: Series::temperature,
        colors: [BLUE, GREEN],
    },
    Panel {
        quantity: "Pressure",
        title: "Pressure - Sola vs Local",
        y_desc: "pressure [hPa]",
        values: Series::pressure,
        colors: [RED, BROWN],
    },
];

/// Datetime span covering both series, with a 5% margin on each side.
/// A single instant is widened by one hour each way.
pub fn time_range(sola: &Series, local: &Series) -> Option<(NaiveDateTime, NaiveDateTime)> {
    let (amin, amax) = min_and_max(sola.time()).or_else(|| min_and_max(local.time()))?;
    let (bmin, bmax) = min_and_max(local.time()).unwrap_or((amin, amax));
    let xmin = amin.min(bmin);
    let xmax = amax.max(bmax);
    let xspan = xmax - xmin;
    let xmargin = if xspan > chrono::Duration::zero() {
        xspan / 20
    } else {
        chrono::Duration::hours(1)
    };
    Some((xmin - xmargin, xmax + xmargin))
}

/// Value span covering both slices, with a 10% margin; a flat line gets +-1.
pub fn value_range(a: &[f64], b: &[f64]) -> Option<(f64, f64)> {
    let all: Vec<f64> = a.iter().chain(b.iter()).copied().collect();
    let (ymin, ymax) = min_and_max(&all[..])?;
    let yspan = (ymax - ymin) / 10f64;
    let ymargin = if yspan > 0. { yspan } else { 1. };
    Some((ymin - ymargin, ymax + ymargin))
}

/// plots temperature and pressure of both stations as two stacked panels to svg
pub fn plot_comparison<P: AsRef<Path>>(
    sola: &Series,
    local: &Series,
    fout: P,
) -> Result<(), Box<dyn std::error::Error>> {
    let (xmindt, xmaxdt) = time_range(sola, local).ok_or("no readings to plot")?;
    let root = SVGBackend::new(fout.as_ref(), (1200, 1000)).into_drawing_area();
    root.fill(&WHITE)?;
    let areas = root.split_evenly((2, 1));
    for (area, panel) in areas.iter().zip(PANELS.iter()) {
        let traces = [
            Trace {
                label: format!("{} Sola", panel.quantity),
                series: sola,
                color: panel.colors[0],
                marker: Marker::Circle,
            },
            Trace {
                label: format!("{} Local", panel.quantity),
                series: local,
                color: panel.colors[1],
                marker: Marker::Square,
            },
        ];
        draw_panel(area, panel, &traces, (xmindt, xmaxdt))?;
    }
    root.present()?;
    Ok(())
}

fn draw_panel(
    area: &DrawingArea<SVGBackend<'_>, Shift>,
    panel: &Panel,
    traces: &[Trace<'_>],
    (xmindt, xmaxdt): (NaiveDateTime, NaiveDateTime),
) -> Result<(), Box<dyn std::error::Error>> {
    let xfmt = suitable_xfmt(xmaxdt - xmindt);
    let xminlocal = TimeZone::from_utc_datetime(&Utc, &xmindt);
    let xmaxlocal = TimeZone::from_utc_datetime(&Utc, &xmaxdt);
    let (ymin, ymax) = value_range(
        (panel.values)(traces[0].series),
        (panel.values)(traces[1].series),
    )
    .ok_or("no readings to plot")?;

    let mut chart = ChartBuilder::on(area)
        .caption(panel.title, ("sans-serif", 28))
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(100)
        .build_cartesian_2d(xminlocal..xmaxlocal, ymin..ymax)?;
    chart
        .configure_mesh()
        .light_line_style(RGBColor(230, 230, 230).stroke_width(1))
        .bold_line_style(RGBColor(150, 150, 150).stroke_width(1))
        .set_all_tick_mark_size(2)
        .label_style(("sans-serif", 18))
        .y_desc(panel.y_desc)
        .x_labels(12) // max number of labels
        .x_label_formatter(&|x: &DateTime<Utc>| x.format(xfmt).to_string())
        .y_label_formatter(&|y: &f64| format!("{:.1}", y))
        .x_desc(format!("datetime [{}]", xfmt.replace("%", "")))
        .draw()?;

    for trace in traces {
        let color = trace.color;
        let points: Vec<(DateTime<Utc>, f64)> = trace
            .series
            .time()
            .iter()
            .zip((panel.values)(trace.series).iter())
            .map(|(x, y)| (TimeZone::from_utc_datetime(&Utc, x), *y))
            .collect();
        chart
            .draw_series(LineSeries::new(points.iter().copied(), color.stroke_width(2)))?
            .label(trace.label.as_str())
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
            });
        match trace.marker {
            Marker::Circle => {
                chart.draw_series(
                    points
                        .iter()
                        .map(|p| EmptyElement::at(*p) + Circle::new((0, 0), 4, color.filled())),
                )?;
            }
            Marker::Square => {
                chart.draw_series(points.iter().map(|p| {
                    EmptyElement::at(*p) + Rectangle::new([(-4, -4), (4, 4)], color.filled())
                }))?;
            }
        }
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .label_font(("sans-serif", 18))
        .draw()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Reading;

    fn series(points: &[(u32, f64)]) -> Series {
        let mut s = Series::default();
        for &(h, v) in points {
            s.push(Reading {
                time: NaiveDate::from_ymd_opt(2021, 10, 5)
                    .unwrap()
                    .and_hms_opt(h, 0, 0)
                    .unwrap(),
                temperature: v,
                pressure: v * 100.,
            });
        }
        s
    }

    #[test]
    fn time_range_spans_both_stations() {
        let a = series(&[(2, 1.), (12, 2.)]);
        let b = series(&[(0, 1.), (20, 2.)]);
        let (xmin, xmax) = time_range(&a, &b).unwrap();
        let day = NaiveDate::from_ymd_opt(2021, 10, 5).unwrap();
        assert_eq!(xmin, day.and_hms_opt(0, 0, 0).unwrap() - chrono::Duration::hours(1));
        assert_eq!(xmax, day.and_hms_opt(21, 0, 0).unwrap());
    }

    #[test]
    fn time_range_of_single_instant_is_widened() {
        let a = series(&[(5, 1.)]);
        let (xmin, xmax) = time_range(&a, &Series::default()).unwrap();
        assert_eq!(xmax - xmin, chrono::Duration::hours(2));
        assert!(time_range(&Series::default(), &Series::default()).is_none());
    }

    #[test]
    fn value_range_pads_both_sides() {
        assert_eq!(value_range(&[0., 5.], &[10.]), Some((-1., 11.)));
        assert_eq!(value_range(&[3.], &[3.]), Some((2., 4.)));
        assert_eq!(value_range(&[], &[]), None);
    }
}
