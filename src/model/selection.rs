use std::cmp::Ordering;

use nalgebra::{Point3, Unit, Vector3};

use super::body::BodyID;
use super::camera::CameraController;
use super::facts::FactSheet;
use super::orrery::Orrery;
use crate::math::geometry::ray_sphere_intersection;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Point3<f64>,
    pub direction: Unit<Vector3<f64>>,
}

impl Ray {
    /// None if `direction` is too short to have a direction.
    pub fn new(origin: Point3<f64>, direction: Vector3<f64>) -> Option<Self> {
        Unit::try_new(direction, 1e-12).map(|direction| Ray { origin, direction })
    }
}

/// Returns the nearest body hit by the ray, if any.
pub fn pick(ray: &Ray, orrery: &Orrery) -> Option<BodyID> {
    orrery
        .bodies()
        .filter_map(|id| {
            let radius = id.info().radius as f64;
            ray_sphere_intersection(&ray.origin, &ray.direction, &orrery.position(id), radius)
                .map(|t| (id, t))
        })
        .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal))
        .map(|(id, _)| id)
}

/// The outcome of one click: which body, if any, was under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionEvent {
    pub picked: Option<BodyID>,
}

pub trait SelectionListener {
    fn on_selection(&mut self, event: &SelectionEvent);
}

/// Runs the hit test once per click and fans the result out to every
/// listener, so nobody re-casts the same ray.
pub fn resolve_selection(
    ray: &Ray,
    orrery: &Orrery,
    listeners: &mut [&mut dyn SelectionListener],
) -> SelectionEvent {
    let event = SelectionEvent {
        picked: pick(ray, orrery),
    };
    log::debug!("Click resolved to {:?}", event.picked);
    for listener in listeners.iter_mut() {
        listener.on_selection(&event);
    }
    event
}

impl SelectionListener for CameraController {
    // A miss, or a body we can't follow, leaves the camera as it is.
    fn on_selection(&mut self, event: &SelectionEvent) {
        if let Some(body) = event.picked {
            self.request_follow(body);
        }
    }
}

/// State of the info popup: the record currently on display, if any.
#[derive(Debug, Clone, Default)]
pub struct InfoPopup {
    shown: Option<&'static FactSheet>,
}

impl InfoPopup {
    pub fn new() -> Self {
        InfoPopup { shown: None }
    }

    pub fn shown(&self) -> Option<&'static FactSheet> {
        self.shown
    }

    pub fn dismiss(&mut self) {
        self.shown = None;
    }
}

impl SelectionListener for InfoPopup {
    // Any body gets its record, the Sun included. Clicking empty space closes
    // the popup.
    fn on_selection(&mut self, event: &SelectionEvent) {
        self.shown = event.picked.map(FactSheet::of);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::model::belt::AsteroidBelt;
    use crate::model::camera::FollowState;
    use crate::model::clock::Pacing;

    fn make_orrery() -> Orrery {
        let mut orrery = Orrery::new(AsteroidBelt::generate(0, 0), Pacing::PerFrame);
        orrery.advance(0.8, 1.0);
        orrery
    }

    fn ray_towards(orrery: &Orrery, id: BodyID) -> Ray {
        let target = orrery.position(id);
        let origin = target + Vector3::new(0.0, 300.0, 0.0);
        Ray::new(origin, target - origin).unwrap()
    }

    #[test]
    fn test_pick_each_body() {
        let orrery = make_orrery();
        for id in BodyID::ALL.iter().copied() {
            assert_eq!(pick(&ray_towards(&orrery, id), &orrery), Some(id));
        }
    }

    #[test]
    fn test_pick_nearest() {
        let orrery = make_orrery();
        let earth = orrery.position(BodyID::Earth);

        // Along the line through Earth and the Sun, whichever is closer wins
        let from_outside = Ray::new(earth * 3.0, -earth.coords).unwrap();
        assert_eq!(pick(&from_outside, &orrery), Some(BodyID::Earth));
        let from_behind_sun = Ray::new(earth * -3.0, earth.coords).unwrap();
        assert_eq!(pick(&from_behind_sun, &orrery), Some(BodyID::Sun));
    }

    #[test]
    fn test_pick_miss() {
        let orrery = make_orrery();
        let ray = Ray::new(Point3::new(0.0, 500.0, 0.0), Vector3::y()).unwrap();
        assert_eq!(pick(&ray, &orrery), None);
        assert_eq!(Ray::new(Point3::origin(), Vector3::zeros()), None);
    }

    #[test]
    fn test_listeners_share_one_pick() {
        let orrery = make_orrery();
        let mut camera = CameraController::new(Pacing::PerFrame);
        let mut popup = InfoPopup::new();

        let event = resolve_selection(
            &ray_towards(&orrery, BodyID::Saturn),
            &orrery,
            &mut [&mut camera, &mut popup],
        );
        assert_eq!(event.picked, Some(BodyID::Saturn));
        assert_eq!(camera.state(), FollowState::Selecting(BodyID::Saturn));
        assert_eq!(popup.shown().map(|f| f.name), Some("Saturn"));
    }

    #[test]
    fn test_sun_shows_popup_without_follow() {
        let orrery = make_orrery();
        let mut camera = CameraController::new(Pacing::PerFrame);
        let mut popup = InfoPopup::new();

        resolve_selection(
            &ray_towards(&orrery, BodyID::Sun),
            &orrery,
            &mut [&mut camera, &mut popup],
        );
        assert_eq!(camera.state(), FollowState::Idle);
        assert_eq!(popup.shown().map(|f| f.name), Some("Sun"));
    }

    #[test]
    fn test_miss_closes_popup_but_keeps_following() {
        let orrery = make_orrery();
        let mut camera = CameraController::new(Pacing::PerFrame);
        let mut popup = InfoPopup::new();

        resolve_selection(
            &ray_towards(&orrery, BodyID::Mars),
            &orrery,
            &mut [&mut camera, &mut popup],
        );
        let miss = Ray::new(Point3::new(0.0, 500.0, 0.0), Vector3::y()).unwrap();
        resolve_selection(&miss, &orrery, &mut [&mut camera, &mut popup]);

        assert_eq!(popup.shown(), None);
        assert_eq!(camera.followed(), Some(BodyID::Mars));
    }
}
