use std::f32::consts::PI;

use kiss3d::camera::Camera;
use kiss3d::event::{Action, Key, MouseButton, WindowEvent};
use kiss3d::resource::ShaderUniform;
use kiss3d::window::Canvas;
use nalgebra::{Isometry3, Matrix4, Perspective3, Point2, Point3, Point4, Vector2, Vector3};

use crate::model::{CameraPose, Ray};

const KEY_CAMERA_MOVE_UP: Key = Key::W;
const KEY_CAMERA_MOVE_DOWN: Key = Key::S;
const KEY_CAMERA_MOVE_LEFT: Key = Key::A;
const KEY_CAMERA_MOVE_RIGHT: Key = Key::D;
const KEY_CAMERA_ZOOM_IN: Key = Key::Equals;
const KEY_CAMERA_ZOOM_OUT: Key = Key::Minus;

const KEY_ANGLE_STEP: f32 = 0.1;
const KEY_ZOOM_STEP: f32 = 1.2;

// This camera is a close cousin of ArcBall: click-and-drag to orbit, scroll to
// zoom. Unlike ArcBall, its eye and target can be set from outside at any
// time, since follow mode moves both every frame. Whatever the user does with
// the mouse is reported back through `take_user_pose`.
//
// The y-axis is up, and the orbital plane is y = 0.
pub struct OrbitCamera {
    // -- position --
    eye: Point3<f32>,
    target: Point3<f32>,
    // -- perspective --
    width: u32,
    height: u32,
    fovy: f32,
    znear: f32,
    zfar: f32,
    // -- other --
    last_cursor_pos: Vector2<f32>,
    moved_by_user: bool,
    // -- knobs to fiddle with --
    theta_step: f32,
    phi_step: f32,
    scroll_ratio: f32,
    phi_limit: f32,
    distance_limits: (f32, f32),
}

impl OrbitCamera {
    pub fn new(pose: &CameraPose) -> Self {
        OrbitCamera {
            eye: nalgebra::convert(pose.eye),
            target: nalgebra::convert(pose.target),
            width: 800,
            height: 600,
            fovy: 75.0_f32.to_radians(),
            znear: 0.1,
            zfar: 3000.0,
            last_cursor_pos: Vector2::zeros(),
            moved_by_user: false,
            theta_step: 0.005,
            phi_step: 0.005,
            scroll_ratio: 1.1,
            phi_limit: 0.01,
            distance_limits: (50.0, 2000.0),
        }
    }

    fn projection(&self) -> Perspective3<f32> {
        Perspective3::new(
            self.width as f32 / self.height as f32,
            self.fovy,
            self.znear,
            self.zfar,
        )
    }

    fn projection_matrix(&self) -> Matrix4<f32> {
        self.projection().into_inner()
    }

    fn view_matrix(&self) -> Matrix4<f32> {
        self.view_transform().to_homogeneous()
    }

    /// Framebuffer size in pixels. A zero dimension (minimized window) is
    /// ignored.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.width = width;
            self.height = height;
        }
    }

    pub fn set_pose(&mut self, pose: &CameraPose) {
        self.eye = nalgebra::convert(pose.eye);
        self.target = nalgebra::convert(pose.target);
    }

    pub fn pose(&self) -> CameraPose {
        CameraPose {
            eye: nalgebra::convert(self.eye),
            target: nalgebra::convert(self.target),
        }
    }

    /// The current pose, if the user has dragged or zoomed since the last call.
    pub fn take_user_pose(&mut self) -> Option<CameraPose> {
        if std::mem::replace(&mut self.moved_by_user, false) {
            Some(self.pose())
        } else {
            None
        }
    }

    pub fn distance(&self) -> f32 {
        (self.eye - self.target).norm()
    }

    pub fn rotate(&mut self, dtheta: f32, dphi: f32) {
        let offset = self.eye - self.target;
        let radius = offset.norm();
        if radius <= 0.0 {
            return;
        }

        // theta is measured around y from +z, phi down from +y
        let theta = offset.x.atan2(offset.z) + dtheta;
        let phi = (offset.y / radius).acos() + dphi;
        let phi = nalgebra::clamp(phi, self.phi_limit, PI - self.phi_limit);

        self.eye = self.target
            + radius * Vector3::new(phi.sin() * theta.sin(), phi.cos(), phi.sin() * theta.cos());
        self.moved_by_user = true;
    }

    pub fn zoom(&mut self, factor: f32) {
        let offset = self.eye - self.target;
        let radius = offset.norm();
        if radius <= 0.0 {
            return;
        }

        // Follow mode parks the camera inside the limits, so only clamp in
        // the direction we're zooming.
        let (min, max) = self.distance_limits;
        let new_radius = nalgebra::clamp(radius * factor, min.min(radius), max.max(radius));
        self.eye = self.target + offset * (new_radius / radius);
        self.moved_by_user = true;
    }

    /// The ray from the eye through the given cursor position, in window
    /// pixels with the origin at the top left.
    pub fn ray_through(&self, cursor: &Point2<f32>) -> Option<Ray> {
        let ndc_x = 2.0 * cursor.x / self.width as f32 - 1.0;
        let ndc_y = 1.0 - 2.0 * cursor.y / self.height as f32;

        let inverse = self.inverse_transformation();
        let unproject = |z: f32| -> Option<Point3<f32>> {
            let p = inverse * Point4::new(ndc_x, ndc_y, z, 1.0);
            if p.w.abs() < f32::EPSILON {
                None
            } else {
                Some(Point3::new(p.x / p.w, p.y / p.w, p.z / p.w))
            }
        };

        let near = unproject(-1.0)?;
        let far = unproject(1.0)?;
        Ray::new(nalgebra::convert(near), nalgebra::convert(far - near))
    }
}

impl Camera for OrbitCamera {
    fn handle_event(&mut self, canvas: &Canvas, event: &WindowEvent) {
        match *event {
            WindowEvent::CursorPos(x, y, _) => {
                let curr_pos = Vector2::new(x as f32, y as f32);

                if canvas.get_mouse_button(MouseButton::Button1) == Action::Press {
                    // Rotate the opposite direction as the mouse moves (drag right == camera glides
                    // left)
                    let dpos = curr_pos - self.last_cursor_pos;
                    self.rotate(-dpos.x * self.theta_step, -dpos.y * self.phi_step);
                }

                self.last_cursor_pos = curr_pos;
            }
            WindowEvent::Scroll(_, off, _) => {
                // scroll up == zoom in
                if off < 0.0 {
                    self.zoom(self.scroll_ratio);
                } else if off > 0.0 {
                    self.zoom(self.scroll_ratio.recip())
                }
            }
            WindowEvent::FramebufferSize(w, h) => self.set_viewport(w, h),
            WindowEvent::Key(KEY_CAMERA_MOVE_UP, Action::Press, _) => {
                self.rotate(0.0, -KEY_ANGLE_STEP)
            }
            WindowEvent::Key(KEY_CAMERA_MOVE_DOWN, Action::Press, _) => {
                self.rotate(0.0, KEY_ANGLE_STEP)
            }
            WindowEvent::Key(KEY_CAMERA_MOVE_LEFT, Action::Press, _) => {
                self.rotate(-KEY_ANGLE_STEP, 0.0)
            }
            WindowEvent::Key(KEY_CAMERA_MOVE_RIGHT, Action::Press, _) => {
                self.rotate(KEY_ANGLE_STEP, 0.0)
            }
            WindowEvent::Key(KEY_CAMERA_ZOOM_IN, Action::Press, _) => {
                self.zoom(KEY_ZOOM_STEP.recip())
            }
            WindowEvent::Key(KEY_CAMERA_ZOOM_OUT, Action::Press, _) => self.zoom(KEY_ZOOM_STEP),
            _ => {}
        }
    }

    fn eye(&self) -> Point3<f32> {
        self.eye
    }

    fn view_transform(&self) -> Isometry3<f32> {
        Isometry3::look_at_rh(&self.eye, &self.target, &Vector3::y())
    }

    fn transformation(&self) -> Matrix4<f32> {
        self.projection_matrix() * self.view_matrix()
    }

    fn inverse_transformation(&self) -> Matrix4<f32> {
        self.transformation()
            .try_inverse()
            .unwrap_or_else(Matrix4::identity)
    }

    fn clip_planes(&self) -> (f32, f32) {
        (self.znear, self.zfar)
    }

    fn update(&mut self, canvas: &Canvas) {
        let (width, height) = canvas.size();
        self.set_viewport(width, height);
    }

    fn upload(
        &self,
        _: usize,
        proj: &mut ShaderUniform<Matrix4<f32>>,
        view: &mut ShaderUniform<Matrix4<f32>>,
    ) {
        proj.upload(&self.projection_matrix());
        view.upload(&self.view_matrix());
    }
}
