//! Hourglass donut chart rendered as SVG

use std::f64::consts::PI;

use super::progress;

const SIZE: f64 = 250.0;
const OUTER_RADIUS: f64 = 120.0;
const HOLE: f64 = 0.3;
const ELAPSED_COLOR: &str = "#FFA07A";
const REMAINING_COLOR: &str = "#E0E0E0";

/// Donut chart of elapsed against remaining time. The elapsed slice grows
/// clockwise from 12 o'clock.
pub fn hourglass_svg(total_seconds: u64, remaining_seconds: f64) -> String {
    let center = SIZE / 2.0;
    let inner = OUTER_RADIUS * HOLE;
    // Both slices are drawn as a thick stroke along the ring's midline
    let radius = (OUTER_RADIUS + inner) / 2.0;
    let width = OUTER_RADIUS - inner;
    let circumference = 2.0 * PI * radius;
    let elapsed = progress(total_seconds, remaining_seconds) * circumference;

    format!(
        concat!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{size}" height="{size}" viewBox="0 0 {size} {size}">"#,
            r#"<circle cx="{c}" cy="{c}" r="{r:.3}" fill="none" stroke="{remaining_color}" stroke-width="{w:.3}"/>"#,
            r#"<circle cx="{c}" cy="{c}" r="{r:.3}" fill="none" stroke="{elapsed_color}" stroke-width="{w:.3}" "#,
            r#"stroke-dasharray="{elapsed:.3} {circ:.3}" transform="rotate(-90 {c} {c})"/>"#,
            "</svg>"
        ),
        size = SIZE,
        c = center,
        r = radius,
        w = width,
        remaining_color = REMAINING_COLOR,
        elapsed_color = ELAPSED_COLOR,
        elapsed = elapsed,
        circ = circumference,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dash_length(svg: &str) -> f64 {
        let start = svg.find("stroke-dasharray=\"").unwrap() + "stroke-dasharray=\"".len();
        let rest = &svg[start..];
        rest[..rest.find(' ').unwrap()].parse().unwrap()
    }

    #[test]
    fn empty_chart_has_no_elapsed_slice() {
        let svg = hourglass_svg(60, 60.0);
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(REMAINING_COLOR));
        assert_eq!(dash_length(&svg), 0.0);
    }

    #[test]
    fn elapsed_slice_tracks_progress() {
        let radius = (OUTER_RADIUS + OUTER_RADIUS * HOLE) / 2.0;
        let circumference = 2.0 * PI * radius;

        let half = dash_length(&hourglass_svg(60, 30.0));
        assert!((half - circumference / 2.0).abs() < 0.01);

        let full = dash_length(&hourglass_svg(60, 0.0));
        assert!((full - circumference).abs() < 0.01);
    }
}
