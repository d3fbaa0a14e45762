//! Canvas 2D backend.
//!
//! Projects every draw record through the camera and paints back to front.
//! Spheres become shaded discs, rings become filled annuli traced from
//! their projected edge points. Single-sided rings seen from below are
//! skipped.

use glam::Vec3;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};
use orrery_engine::{
    back_to_front, FrameData, InitError, LightState, MeshInstance,
    PerspectiveCamera, Renderer, SurfaceSize,
};

/// NDC → surface pixels (origin top-left, y down).
pub fn ndc_to_pixels(ndc: Vec3, surface: SurfaceSize) -> (f64, f64) {
    let x = (ndc.x as f64 + 1.0) * 0.5 * surface.width as f64;
    let y = (1.0 - ndc.y as f64) * 0.5 * surface.height as f64;
    (x, y)
}

/// Whether a projected point lies between the near and far planes.
pub fn in_depth_range(ndc: Vec3) -> bool {
    ndc.z.is_finite() && (-1.0..=1.0).contains(&ndc.z)
}

/// On-screen radius in pixels of a sphere seen by `camera`.
pub fn projected_radius(
    camera: &PerspectiveCamera,
    center: Vec3,
    radius: f32,
    surface: SurfaceSize,
) -> f64 {
    let (_, up) = camera.basis();
    let (cx, cy) = ndc_to_pixels(camera.project(center), surface);
    let (ex, ey) = ndc_to_pixels(camera.project(center + up * radius), surface);
    ((ex - cx).powi(2) + (ey - cy).powi(2)).sqrt()
}

/// Points on a circle of `radius` around `center` in the world XZ plane.
pub fn ring_points(center: Vec3, radius: f32, yaw: f32, segments: u32) -> Vec<Vec3> {
    let segments = segments.max(3);
    (0..segments)
        .map(|i| {
            let theta = yaw + i as f32 / segments as f32 * std::f32::consts::TAU;
            center + Vec3::new(radius * theta.cos(), 0.0, radius * theta.sin())
        })
        .collect()
}

pub struct Canvas2dRenderer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl Canvas2dRenderer {
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, InitError> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|_| InitError::ContextUnavailable)?
            .ok_or(InitError::ContextUnavailable)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| InitError::ContextUnavailable)?;
        Ok(Self {
            canvas: canvas.clone(),
            ctx,
        })
    }

    fn paint(&self, frame: &FrameData) -> Result<(), JsValue> {
        let surface = frame.surface;
        self.ctx.set_global_alpha(1.0);
        self.ctx.set_fill_style_str(&frame.background.to_css_hex());
        self.ctx
            .fill_rect(0.0, 0.0, surface.width as f64, surface.height as f64);

        for index in back_to_front(frame.instances, frame.camera) {
            let inst = &frame.instances[index];
            if !inst.faces(frame.camera.position) {
                continue;
            }
            self.ctx.set_global_alpha(inst.opacity as f64);
            if inst.ring {
                self.paint_ring(inst, frame.camera, surface)?;
            } else {
                self.paint_sphere(inst, frame.camera, frame.lights, surface)?;
            }
        }
        self.ctx.set_global_alpha(1.0);
        Ok(())
    }

    fn trace_loop(
        &self,
        points: impl Iterator<Item = Vec3>,
        camera: &PerspectiveCamera,
        surface: SurfaceSize,
    ) {
        for (i, point) in points.enumerate() {
            let (x, y) = ndc_to_pixels(camera.project(point), surface);
            if i == 0 {
                self.ctx.move_to(x, y);
            } else {
                self.ctx.line_to(x, y);
            }
        }
        self.ctx.close_path();
    }

    fn paint_ring(
        &self,
        inst: &MeshInstance,
        camera: &PerspectiveCamera,
        surface: SurfaceSize,
    ) -> Result<(), JsValue> {
        let center = inst.position;
        if !in_depth_range(camera.project(center)) {
            return Ok(());
        }
        let outer = ring_points(center, inst.radius, inst.yaw, inst.segments);
        let inner = ring_points(center, inst.inner_radius, inst.yaw, inst.segments);

        self.ctx.begin_path();
        self.trace_loop(outer.into_iter(), camera, surface);
        // Opposite winding cuts the hole under the non-zero rule
        self.trace_loop(inner.into_iter().rev(), camera, surface);
        self.ctx.set_fill_style_str(&inst.color.to_css_hex());
        self.ctx.fill();
        Ok(())
    }

    fn paint_sphere(
        &self,
        inst: &MeshInstance,
        camera: &PerspectiveCamera,
        lights: &LightState,
        surface: SurfaceSize,
    ) -> Result<(), JsValue> {
        let center = inst.position;
        let ndc = camera.project(center);
        if !in_depth_range(ndc) {
            return Ok(());
        }
        let (cx, cy) = ndc_to_pixels(ndc, surface);
        let r_px = projected_radius(camera, center, inst.radius, surface);
        if r_px < 0.5 {
            return Ok(());
        }
        let base = inst.color;

        self.ctx.begin_path();
        self.ctx.arc(cx, cy, r_px, 0.0, std::f64::consts::TAU)?;

        if inst.unlit {
            self.ctx.set_fill_style_str(&base.to_css_hex());
            self.ctx.fill();
            return Ok(());
        }

        // Brightest point sits between the viewer and the first light
        let to_eye = (camera.position - center).normalize_or_zero();
        let to_light = lights
            .iter()
            .next()
            .map(|light| (light.position - center).normalize_or_zero())
            .unwrap_or(to_eye);
        let mut facing = (to_eye + to_light).normalize_or_zero();
        if facing == Vec3::ZERO {
            facing = to_eye;
        }
        let lit = lights.shade(center + facing * inst.radius, facing, base);
        let dark = lights.shade(center - to_light * inst.radius, -to_light, base);

        let (hx, hy) = ndc_to_pixels(camera.project(center + facing * inst.radius * 0.6), surface);
        let gradient = self.ctx.create_radial_gradient(hx, hy, 0.0, cx, cy, r_px)?;
        gradient.add_color_stop(0.0, &lit.to_css_hex())?;
        gradient.add_color_stop(1.0, &dark.to_css_hex())?;
        self.ctx.set_fill_style_canvas_gradient(&gradient);
        self.ctx.fill();
        Ok(())
    }
}

impl Renderer for Canvas2dRenderer {
    fn backend(&self) -> &'static str {
        "canvas2d"
    }

    fn resize(&mut self, size: SurfaceSize) {
        self.canvas.set_width(size.width);
        self.canvas.set_height(size.height);
    }

    fn draw(&mut self, frame: &FrameData) {
        if let Err(err) = self.paint(frame) {
            log::debug!("canvas draw failed: {err:?}");
        }
    }
}
