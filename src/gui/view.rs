use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use kiss3d::scene::SceneNode;
use kiss3d::text::Font;
use kiss3d::window::Window;
use log::{debug, warn};
use nalgebra::{Point2, Point3, Rotation3, Translation3, UnitQuaternion};
use thiserror::Error;

use super::renderers::CompoundRenderer;
use crate::model::belt::AsteroidBelt;
use crate::model::{BodyID, Frame, Orrery, PlayState};

const MOON_COLOR: [f32; 3] = [0.8, 0.8, 0.8];
const ROCK_COLOR: [f32; 3] = [0.55, 0.5, 0.45];
const SATURN_RING_COLOR: [f32; 3] = [0.85, 0.75, 0.55];
const SATURN_RING_RADII: (f32, f32) = (9.0, 16.0);
const SATURN_RING_COUNT: usize = 8;
const ORBIT_RING_DIMMING: f32 = 0.5;

const TEXT_SIZE: f32 = 60.0;
const POPUP_WIDTH: f32 = 700.0;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("no texture at {}", .0.display())]
    Missing(PathBuf),
}

fn texture_path(assets: &Path, id: BodyID) -> Result<PathBuf, AssetError> {
    let path = assets.join("planets").join(id.info().texture);
    if path.is_file() {
        Ok(path)
    } else {
        Err(AssetError::Missing(path))
    }
}

fn to_quaternion(rotation: &Rotation3<f64>) -> UnitQuaternion<f32> {
    nalgebra::convert(UnitQuaternion::from_rotation_matrix(rotation))
}

fn to_translation(position: Point3<f64>) -> Translation3<f32> {
    let position: Point3<f32> = nalgebra::convert(position);
    Translation3::from(position)
}

fn to_color(rgb: &[f32; 3]) -> Point3<f32> {
    Point3::new(rgb[0], rgb[1], rgb[2])
}

/// The kiss3d side of the orrery: one node per body, moons hanging off
/// pivots under their parents, and the belt as a single spinning group.
pub struct View {
    // Each body gets a group, so that its children don't inherit the sphere's scale
    body_nodes: HashMap<BodyID, SceneNode>,
    moon_pivots: Vec<SceneNode>,
    belt: SceneNode,
    // Line work
    saturn_center: Point3<f32>,
    renderer: CompoundRenderer,
    font: Rc<Font>,
}

impl View {
    pub fn new(window: &mut Window, orrery: &Orrery, assets: Option<&Path>) -> Self {
        let mut body_nodes = HashMap::new();
        for id in orrery.bodies() {
            let node = Self::create_body_object(window, id, assets);
            body_nodes.insert(id, node);
        }

        let mut moon_pivots = Vec::with_capacity(orrery.moons().len());
        for moon in orrery.moons() {
            // Every moon's parent is in the table, so this always finds a node
            if let Some(parent) = body_nodes.get_mut(&moon.info.parent) {
                let mut pivot = parent.add_group();
                let mut sphere = pivot.add_sphere(moon.info.radius);
                sphere.set_local_translation(Translation3::new(moon.info.distance as f32, 0.0, 0.0));
                sphere.set_color(MOON_COLOR[0], MOON_COLOR[1], MOON_COLOR[2]);
                moon_pivots.push(pivot);
            }
        }

        let belt = Self::create_belt_object(window, orrery.belt());

        let mut view = View {
            body_nodes,
            moon_pivots,
            belt,
            saturn_center: Point3::origin(),
            renderer: CompoundRenderer::new(),
            font: Font::default(),
        };
        view.apply_transforms(orrery);
        view
    }

    fn create_body_object(window: &mut Window, id: BodyID, assets: Option<&Path>) -> SceneNode {
        let info = id.info();
        let mut group = window.add_group();

        // Make the sphere that represents the body
        let mut sphere = group.add_sphere(info.radius);
        sphere.set_color(info.color[0], info.color[1], info.color[2]);

        if let Some(assets) = assets {
            match texture_path(assets, id) {
                Ok(path) => {
                    debug!("Loading texture for {} from {}", id, path.display());
                    sphere.set_texture_from_file(&path, id.key());
                }
                Err(e) => warn!("{}; {} keeps its flat color", e, id),
            }
        }
        group
    }

    fn create_belt_object(window: &mut Window, belt: &AsteroidBelt) -> SceneNode {
        let mut group = window.add_group();
        for rock in belt.rocks() {
            let mut sphere = group.add_sphere(rock.radius);
            sphere.set_local_translation(to_translation(rock.position));
            sphere.set_color(ROCK_COLOR[0], ROCK_COLOR[1], ROCK_COLOR[2]);
        }
        group
    }

    /// Copies positions and rotations out of the orrery into the scene nodes.
    pub fn apply_transforms(&mut self, orrery: &Orrery) {
        for (id, node) in self.body_nodes.iter_mut() {
            node.set_local_translation(to_translation(orrery.position(*id)));
            node.set_local_rotation(to_quaternion(&orrery.rotation(*id)));
        }

        for (pivot, moon) in self.moon_pivots.iter_mut().zip(orrery.moons()) {
            pivot.set_local_rotation(to_quaternion(&moon.pivot_rotation()));
        }

        let belt_rotation = crate::math::geometry::yaw(orrery.belt().spin());
        self.belt.set_local_rotation(to_quaternion(&belt_rotation));

        self.saturn_center = nalgebra::convert(orrery.position(BodyID::Saturn));
    }

    /// Queues the line work and the overlay text for this frame.
    pub fn draw(&mut self, window: &mut Window, frame: &Frame, fps: f64) {
        if frame.orbits_visible {
            for id in BodyID::ALL.iter().copied() {
                let info = id.info();
                if info.orbit_radius <= 0.0 {
                    continue;
                }
                let color = to_color(&info.color) * ORBIT_RING_DIMMING;
                self.renderer
                    .draw_ring(Point3::origin(), info.orbit_radius as f32, color);
            }
        }

        // Saturn's ring isn't an orbit, so it stays when orbits are hidden
        let (inner, outer) = SATURN_RING_RADII;
        self.renderer.draw_band(
            self.saturn_center,
            inner,
            outer,
            SATURN_RING_COUNT,
            to_color(&SATURN_RING_COLOR),
        );

        let text_color = Point3::new(1.0, 1.0, 1.0);
        window.draw_text(
            &status_text(frame, fps),
            &Point2::origin(),
            TEXT_SIZE,
            &self.font,
            &text_color,
        );
        if let Some(facts) = frame.popup {
            window.draw_text(
                &format!("{}\n[X] close", facts.lines().join("\n")),
                // text coordinates are in physical pixels, twice the window size
                &Point2::new(window.width() as f32 * 2.0 - POPUP_WIDTH, 0.0),
                TEXT_SIZE,
                &self.font,
                &text_color,
            );
        }
    }

    pub fn renderer_mut(&mut self) -> &mut CompoundRenderer {
        &mut self.renderer
    }
}

fn status_text(frame: &Frame, fps: f64) -> String {
    let play_state = match frame.play_state {
        PlayState::Playing => "Playing",
        PlayState::Paused => "Paused",
    };
    let focus = match frame.followed {
        Some(id) => id.to_string(),
        None => "-".to_owned(),
    };
    format!(
        "Speed: {:.2}x ({})\nFollowing: {}\nFPS: {:.0}",
        frame.speed, play_state, focus, fps
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::model::CameraPose;

    #[test]
    fn test_missing_texture() {
        let assets = Path::new("/definitely/not/a/real/dir");
        match texture_path(assets, BodyID::Earth) {
            Err(AssetError::Missing(path)) => {
                assert!(path.ends_with("planets/earth_daymap.jpg"));
            }
            Ok(path) => panic!("unexpectedly found {:?}", path),
        }
    }

    #[test]
    fn test_texture_found() {
        let assets = std::env::temp_dir().join(format!("orrery-assets-{}", std::process::id()));
        let planets = assets.join("planets");
        std::fs::create_dir_all(&planets).unwrap();
        std::fs::write(planets.join("venus_surface.jpg"), b"").unwrap();

        let found = texture_path(&assets, BodyID::Venus);
        let missing = texture_path(&assets, BodyID::Mars);
        std::fs::remove_dir_all(&assets).unwrap();

        assert_eq!(found.unwrap(), planets.join("venus_surface.jpg"));
        assert!(missing.is_err());
    }

    #[test]
    fn test_status_text() {
        let frame = Frame {
            pose: CameraPose::default(),
            popup: None,
            followed: Some(BodyID::Jupiter),
            speed: 2.5,
            play_state: PlayState::Paused,
            orbits_visible: true,
        };
        let text = status_text(&frame, 59.6);
        assert!(text.contains("2.50x"));
        assert!(text.contains("Paused"));
        assert!(text.contains("Jupiter"));
        assert!(text.contains("FPS: 60"));
    }
}
