//! Renders a normalized price-history window as a dual buy/sell step-line
//! chart onto any plotters backend. The embedding UI decides the backend
//! (canvas in the browser, SVG in tests) and uses the returned layout to map
//! cursor positions back to samples.

use std::cell::RefCell;
use std::error::Error;
use std::ops::Range;
use std::rc::Rc;

use anyhow::anyhow;
use chrono::{DateTime, Duration, Utc};
use itertools::Itertools;
use plotters::coord::Shift;
use plotters::prelude::*;
use pricestf_api_types::currency::{truncate, NormalizedPoint, HALF_SCRAP_PER_REFINED};

/// Buy line, `#0094d9`.
pub const BUY_COLOR: RGBColor = RGBColor(0, 148, 217);
/// Sell line, `#ec1c24`.
pub const SELL_COLOR: RGBColor = RGBColor(236, 28, 36);

/// Unit the value axis is labelled in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PriceUnit {
    Keys,
    Refined,
}

#[derive(Clone, Debug)]
pub struct ChartOptions {
    pub caption: String,
    pub unit: PriceUnit,
    /// Key sell rate in half-scrap, used to label the axis in keys.
    pub key_rate: i64,
}

/// Where the plot landed on the backend, in backend pixels, together with
/// the plotted time range. Enough to translate a cursor position into a
/// point in time.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartLayout {
    pub x_pixel_range: Range<i32>,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl ChartLayout {
    pub fn time_at_pixel(&self, x: i32) -> Option<DateTime<Utc>> {
        if self.x_pixel_range.is_empty() || self.end <= self.start {
            return None;
        }
        let span = (self.x_pixel_range.end - self.x_pixel_range.start) as f64;
        let fraction = ((x - self.x_pixel_range.start) as f64 / span).clamp(0.0, 1.0);
        let total_ms = (self.end - self.start).num_milliseconds() as f64;
        Some(self.start + Duration::milliseconds((total_ms * fraction) as i64))
    }
}

#[derive(Clone, Copy)]
enum TimeLabelMode {
    Day,
    Hourly,
    Minute,
}

fn time_label_mode(range: Duration) -> TimeLabelMode {
    if range.num_days() > 2 {
        TimeLabelMode::Day
    } else if range.num_hours() > 5 {
        TimeLabelMode::Hourly
    } else {
        TimeLabelMode::Minute
    }
}

fn format_time_label(time: &DateTime<Utc>, mode: TimeLabelMode) -> String {
    match mode {
        TimeLabelMode::Day => time.format("%b %e, %Y").to_string(),
        TimeLabelMode::Hourly => time.format("%b %e, %H:%M").to_string(),
        TimeLabelMode::Minute => time.format("%H:%M").to_string(),
    }
}

/// Value-axis label through the unit heuristic: half-scrap shown as keys or
/// as refined metal.
pub fn format_axis_value(value: i64, unit: PriceUnit, key_rate: i64) -> String {
    match unit {
        PriceUnit::Keys if key_rate > 0 => {
            format!("{} keys", truncate(value as f64 / key_rate as f64))
        }
        _ => format!(
            "{} ref",
            truncate(value as f64 / HALF_SCRAP_PER_REFINED as f64)
        ),
    }
}

/// Expands samples into step-before geometry: the value jumps at the earlier
/// sample's timestamp and holds until the next one.
pub fn step_before_points(points: &[(DateTime<Utc>, i64)]) -> Vec<(DateTime<Utc>, i64)> {
    let mut line = Vec::with_capacity(points.len() * 2);
    for window in points.windows(2) {
        let (time, value) = window[0];
        let (_, next_value) = window[1];
        line.push((time, value));
        if next_value != value {
            line.push((time, next_value));
        }
    }
    if let Some(last) = points.last() {
        line.push(*last);
    }
    line
}

pub fn draw_price_history_chart<'a, T>(
    backend: Rc<RefCell<T>>,
    points: &[NormalizedPoint],
    options: &ChartOptions,
) -> Result<ChartLayout, Box<dyn Error + Send + Sync + 'a>>
where
    T: DrawingBackend + 'a,
{
    let root: DrawingArea<T, Shift> = (&backend).into();
    root.fill(&WHITE)?;

    let (start, end) = points
        .iter()
        .map(|point| point.created_at)
        .minmax()
        .into_option()
        .ok_or_else(|| anyhow!("empty history window"))?;
    if start == end {
        Err(anyhow!("need at least two samples"))?;
    }
    let max_value = points
        .iter()
        .map(|point| point.buy_value.max(point.sell_value))
        .max()
        .unwrap_or_default()
        .max(1);

    let label_mode = time_label_mode(end - start);
    let unit = options.unit;
    let key_rate = options.key_rate;

    let mut chart = ChartBuilder::on(&root)
        .x_label_area_size(40)
        .y_label_area_size(80)
        .margin(10)
        .caption(&options.caption, ("sans-serif", 20.0).into_font())
        .build_cartesian_2d(start..end, 0..max_value)?;

    chart
        .configure_mesh()
        .bold_line_style(RGBColor(120, 120, 120).mix(0.2))
        .light_line_style(RGBColor(120, 120, 120).mix(0.05))
        .x_desc("Time")
        .x_labels(5)
        .x_label_formatter(&move |x| format_time_label(x, label_mode))
        .y_label_formatter(&move |y| format_axis_value(*y, unit, key_rate))
        .draw()?;

    let sell_line: Vec<_> = points
        .iter()
        .map(|point| (point.created_at, point.sell_value))
        .collect();
    chart
        .draw_series(LineSeries::new(
            step_before_points(&sell_line),
            SELL_COLOR.stroke_width(2),
        ))?
        .label("Sell")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], SELL_COLOR.stroke_width(2)));

    let buy_line: Vec<_> = points
        .iter()
        .map(|point| (point.created_at, point.buy_value))
        .collect();
    chart
        .draw_series(LineSeries::new(
            step_before_points(&buy_line),
            BUY_COLOR.stroke_width(2),
        ))?
        .label("Buy")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BUY_COLOR.stroke_width(2)));

    chart
        .configure_series_labels()
        .border_style(BLACK.mix(0.4))
        .background_style(WHITE.mix(0.8))
        .label_font(("sans-serif", 14.0))
        .draw()?;

    let (x_pixel_range, _) = chart.plotting_area().get_pixel_range();

    // To avoid the IO failure being ignored silently, we manually call the present function
    root.present()?;

    Ok(ChartLayout {
        x_pixel_range,
        start,
        end,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use plotters_svg::SVGBackend;

    fn at(minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2022, 2, 10, 12, minute, 0).unwrap()
    }

    fn point(minute: u32, buy: i64, sell: i64) -> NormalizedPoint {
        NormalizedPoint {
            buy_value: buy,
            sell_value: sell,
            buy_display: format!("{buy} ref"),
            sell_display: format!("{sell} ref"),
            created_at: at(minute),
        }
    }

    #[test]
    fn step_expansion_steps_at_earlier_timestamp() {
        let samples = vec![(at(0), 1), (at(5), 3), (at(10), 3)];
        assert_eq!(
            step_before_points(&samples),
            vec![(at(0), 1), (at(0), 3), (at(5), 3), (at(10), 3)]
        );
        assert_eq!(step_before_points(&[(at(0), 5)]), vec![(at(0), 5)]);
        assert!(step_before_points(&[]).is_empty());
    }

    #[test]
    fn label_mode_tracks_window_size() {
        assert!(matches!(
            time_label_mode(Duration::days(7)),
            TimeLabelMode::Day
        ));
        assert!(matches!(
            time_label_mode(Duration::hours(12)),
            TimeLabelMode::Hourly
        ));
        assert!(matches!(
            time_label_mode(Duration::minutes(30)),
            TimeLabelMode::Minute
        ));
    }

    #[test]
    fn axis_labels_follow_unit() {
        assert_eq!(format_axis_value(118, PriceUnit::Keys, 50), "2.36 keys");
        assert_eq!(format_axis_value(9, PriceUnit::Refined, 50), "0.5 ref");
        // a degenerate key rate falls back to metal
        assert_eq!(format_axis_value(9, PriceUnit::Keys, 0), "0.5 ref");
    }

    #[test]
    fn layout_maps_pixels_to_time() {
        let layout = ChartLayout {
            x_pixel_range: 100..300,
            start: at(0),
            end: at(10),
        };
        assert_eq!(layout.time_at_pixel(100), Some(at(0)));
        assert_eq!(layout.time_at_pixel(200), Some(at(5)));
        assert_eq!(layout.time_at_pixel(300), Some(at(10)));
        // positions outside the plot clamp to its edges
        assert_eq!(layout.time_at_pixel(0), Some(at(0)));
        assert_eq!(layout.time_at_pixel(999), Some(at(10)));
    }

    #[test]
    fn renders_svg_with_both_series() {
        let points = vec![point(0, 10, 12), point(5, 11, 13), point(10, 9, 12)];
        let options = ChartOptions {
            caption: "263;6".to_string(),
            unit: PriceUnit::Refined,
            key_rate: 50,
        };
        let mut buffer = String::new();
        {
            let backend = SVGBackend::with_string(&mut buffer, (800, 480));
            let layout =
                draw_price_history_chart(Rc::new(RefCell::new(backend)), &points, &options)
                    .unwrap();
            assert_eq!(layout.start, at(0));
            assert_eq!(layout.end, at(10));
            assert!(!layout.x_pixel_range.is_empty());
        }
        assert!(buffer.contains("<svg"));
        assert!(buffer.contains("polyline"));
        assert!(buffer.contains("Buy"));
        assert!(buffer.contains("Sell"));
        assert!(buffer.contains("ref"));
    }

    #[test]
    fn rejects_degenerate_windows() {
        let options = ChartOptions {
            caption: "263;6".to_string(),
            unit: PriceUnit::Refined,
            key_rate: 50,
        };
        let mut buffer = String::new();
        let backend = SVGBackend::with_string(&mut buffer, (800, 480));
        let result =
            draw_price_history_chart(Rc::new(RefCell::new(backend)), &[point(0, 1, 2)], &options);
        assert!(result.is_err());
    }
}
