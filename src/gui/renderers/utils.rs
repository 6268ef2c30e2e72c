use kiss3d::renderer::LineRenderer;

use nalgebra::Point3;

/// Samples `f` over one full turn, `num_segments + 1` points with the first
/// point repeated at the end so the curve closes.
pub fn closed_curve_points<F, S>(f: F, num_segments: usize) -> impl Iterator<Item = Point3<f32>>
where
    F: Fn(S) -> Point3<f32>,
    S: nalgebra::RealField + simba::scalar::SupersetOf<usize> + Copy,
{
    let num_segments = num_segments.max(3);
    let convert = nalgebra::convert::<usize, S>;
    (0..=num_segments)
        .map(move |i| S::two_pi() * convert(i % num_segments) / convert(num_segments))
        .map(f)
}

pub fn draw_polyline<I: Iterator<Item = Point3<f32>>>(
    line_renderer: &mut LineRenderer,
    points: I,
    color: &Point3<f32>,
) {
    let mut prev_pt = None;
    for pt in points {
        if let Some(prev_pt) = prev_pt {
            line_renderer.draw_line(prev_pt, pt, *color);
        }
        prev_pt = Some(pt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_curve_closes() {
        let points: Vec<_> =
            closed_curve_points(|t: f32| Point3::new(t.cos(), 0.0, t.sin()), 16).collect();
        assert_eq!(points.len(), 17);
        assert_eq!(points.first(), points.last());
    }
}
