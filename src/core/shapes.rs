//! SVG path builders for line and radial area marks.

/// One sample of a radial band: angle in radians (0 at twelve o'clock,
/// clockwise) with inner and outer radius in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadialSample {
    pub angle: f64,
    pub inner_radius: f64,
    pub outer_radius: f64,
}

/// Formats a coordinate with at most three decimals and no trailing zeros.
#[must_use]
pub fn format_coord(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    // Avoid "-0".
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    let mut text = format!("{rounded:.3}");
    while text.ends_with('0') {
        text.pop();
    }
    if text.ends_with('.') {
        text.pop();
    }
    text
}

fn push_point(path: &mut String, command: char, x: f64, y: f64) {
    path.push(command);
    path.push_str(&format_coord(x));
    path.push(',');
    path.push_str(&format_coord(y));
}

/// Polyline through `points` in order: `M x,y L x,y ...`.
///
/// Returns an empty string for no points.
#[must_use]
pub fn line_path(points: &[(f64, f64)]) -> String {
    let mut path = String::new();
    for (index, &(x, y)) in points.iter().enumerate() {
        push_point(&mut path, if index == 0 { 'M' } else { 'L' }, x, y);
    }
    path
}

fn polar(center: (f64, f64), angle: f64, radius: f64) -> (f64, f64) {
    (center.0 + radius * angle.sin(), center.1 - radius * angle.cos())
}

/// Closed area between the inner and outer radii of `samples`.
///
/// The outer edge is traced forward, the inner edge backward, then the path
/// is closed. `center` offsets every point.
#[must_use]
pub fn radial_area_path(samples: &[RadialSample], center: (f64, f64)) -> String {
    let mut path = String::new();
    if samples.is_empty() {
        return path;
    }

    for (index, sample) in samples.iter().enumerate() {
        let (x, y) = polar(center, sample.angle, sample.outer_radius);
        push_point(&mut path, if index == 0 { 'M' } else { 'L' }, x, y);
    }
    for sample in samples.iter().rev() {
        let (x, y) = polar(center, sample.angle, sample.inner_radius);
        push_point(&mut path, 'L', x, y);
    }
    path.push('Z');
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinates_are_trimmed() {
        assert_eq!(format_coord(12.0), "12");
        assert_eq!(format_coord(12.5), "12.5");
        assert_eq!(format_coord(1.0 / 3.0), "0.333");
        assert_eq!(format_coord(-0.0001), "0");
    }

    #[test]
    fn line_path_moves_then_draws() {
        assert_eq!(line_path(&[]), "");
        assert_eq!(line_path(&[(0.0, 1.0), (2.5, 3.0)]), "M0,1L2.5,3");
    }

    #[test]
    fn radial_area_goes_out_forward_and_in_backward() {
        let samples = [
            RadialSample {
                angle: 0.0,
                inner_radius: 1.0,
                outer_radius: 2.0,
            },
            RadialSample {
                angle: std::f64::consts::FRAC_PI_2,
                inner_radius: 1.0,
                outer_radius: 2.0,
            },
        ];
        assert_eq!(
            radial_area_path(&samples, (10.0, 10.0)),
            "M10,8L12,10L11,10L10,9Z"
        );
    }
}
