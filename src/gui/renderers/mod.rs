use kiss3d::camera::Camera;
use kiss3d::renderer::{LineRenderer, Renderer};
use nalgebra::{Point3, Vector3};

use self::utils::{closed_curve_points, draw_polyline};

mod utils;

const CIRCLE_SEGMENTS: usize = 128;

/// Draws the decorative line work: orbit rings and Saturn's ring. Everything
/// is immediate-mode, so it has to be re-submitted every frame.
pub struct CompoundRenderer {
    line_renderer: LineRenderer,
}

impl CompoundRenderer {
    pub fn new() -> Self {
        CompoundRenderer {
            line_renderer: LineRenderer::new(),
        }
    }

    /// Circle of the given radius around `center`, in the plane parallel to
    /// the orbital plane.
    pub fn draw_ring(&mut self, center: Point3<f32>, radius: f32, color: Point3<f32>) {
        let f = |theta: f32| center + radius * Vector3::new(theta.cos(), 0.0, theta.sin());
        draw_polyline(
            &mut self.line_renderer,
            closed_curve_points(f, CIRCLE_SEGMENTS),
            &color,
        );
    }

    /// A flat band between two radii, drawn as a handful of concentric rings.
    pub fn draw_band(
        &mut self,
        center: Point3<f32>,
        inner: f32,
        outer: f32,
        num_rings: usize,
        color: Point3<f32>,
    ) {
        let steps = num_rings.max(2) - 1;
        for i in 0..=steps {
            let radius = inner + (outer - inner) * (i as f32 / steps as f32);
            self.draw_ring(center, radius, color);
        }
    }
}

impl Renderer for CompoundRenderer {
    fn render(&mut self, pass: usize, camera: &mut dyn Camera) {
        self.line_renderer.render(pass, camera);
    }
}
