use std::f32::consts::PI;

use kiss3d::camera::Camera;
use kiss3d::event::WindowEvent;
use kiss3d::resource::ShaderUniform;
use kiss3d::window::Canvas;
use nalgebra::{Isometry3, Matrix4, Perspective3, Point3, Vector3};

// A fixed vantage point looking at the origin, with +y up. There is no user
// control at all; the only event that matters is the framebuffer changing
// size, which alters the projection's aspect ratio. Object positions are
// untouched by a resize.
pub struct ViewportCamera {
    eye: Point3<f32>,
    width: u32,
    height: u32,
    fovy: f32,
    znear: f32,
    zfar: f32,
}

impl ViewportCamera {
    pub fn new(eye: Point3<f32>, width: u32, height: u32) -> Self {
        ViewportCamera {
            eye,
            width,
            height,
            fovy: 55.0 * PI / 180.0,
            znear: 0.1,
            zfar: 1000.0,
        }
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    pub fn set_dimensions(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    fn projection(&self) -> Perspective3<f32> {
        Perspective3::new(self.aspect(), self.fovy, self.znear, self.zfar)
    }

    fn projection_matrix(&self) -> Matrix4<f32> {
        self.projection().into_inner()
    }

    fn view_matrix(&self) -> Matrix4<f32> {
        self.view_transform().to_homogeneous()
    }
}

impl Camera for ViewportCamera {
    fn handle_event(&mut self, _: &Canvas, event: &WindowEvent) {
        if let WindowEvent::FramebufferSize(w, h) = *event {
            self.set_dimensions(w, h);
        }
    }

    fn eye(&self) -> Point3<f32> {
        self.eye
    }

    fn view_transform(&self) -> Isometry3<f32> {
        Isometry3::look_at_rh(&self.eye, &Point3::origin(), &Vector3::y())
    }

    fn transformation(&self) -> Matrix4<f32> {
        self.projection_matrix() * self.view_matrix()
    }

    fn inverse_transformation(&self) -> Matrix4<f32> {
        self.transformation().try_inverse().unwrap()
    }

    fn clip_planes(&self) -> (f32, f32) {
        (self.projection().znear(), self.projection().zfar())
    }

    fn update(&mut self, _canvas: &Canvas) {}

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
