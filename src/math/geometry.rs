use nalgebra::{Point3, Rotation3, Unit, Vector3};

/// Normalizes `v`, or returns `fallback` if `v` is shorter than `tolerance`.
/// Following a body sitting at the origin would otherwise normalize a zero
/// vector and poison the camera with NaNs.
pub fn safe_normalize(
    v: &Vector3<f64>,
    tolerance: f64,
    fallback: Unit<Vector3<f64>>,
) -> Unit<Vector3<f64>> {
    Unit::try_new(*v, tolerance).unwrap_or(fallback)
}

/// Moves `from` the given fraction of the way towards `to`.
pub fn approach(from: &Point3<f64>, to: &Point3<f64>, fraction: f64) -> Point3<f64> {
    from + (to - from) * fraction
}

/// Rotation by `angle` radians about the y-axis, the axis every body spins
/// around.
pub fn yaw(angle: f64) -> Rotation3<f64> {
    Rotation3::from_axis_angle(&Vector3::y_axis(), angle)
}

/// Returns the smallest non-negative `t` with `origin + t * direction` on the
/// sphere, or None if the ray misses. `direction` must be normalized.
pub fn ray_sphere_intersection(
    origin: &Point3<f64>,
    direction: &Unit<Vector3<f64>>,
    center: &Point3<f64>,
    radius: f64,
) -> Option<f64> {
    // Solve |o + t*d - c|^2 = r^2, with |d| = 1:
    //   t^2 + 2 t (d . oc) + |oc|^2 - r^2 = 0
    let oc = origin - center;
    let half_b = direction.dot(&oc);
    let c = oc.norm_squared() - radius * radius;
    let discriminant = half_b * half_b - c;
    if discriminant < 0.0 {
        return None;
    }

    let sqrt_disc = discriminant.sqrt();
    let near = -half_b - sqrt_disc;
    let far = -half_b + sqrt_disc;
    if near >= 0.0 {
        Some(near)
    } else if far >= 0.0 {
        // We're inside the sphere
        Some(0.0)
    } else {
        None
    }
}
