//! Canvas 2D renderer: the globe as a shaded disc, arcs as polylines and
//! everything else as circles drawn far to near.

use crate::projection::{back_to_front, css_rgba, projected_radius_px, world_to_screen};
use globe_core::{shade, Billboard, Camera, FrameGeometry, Lights, Renderer, SceneStore};
use glam::Vec3;
use std::f64::consts::TAU;
use web_sys as web;

const BACKGROUND: &str = "#000000";
// Shapes smaller than this are skipped.
const MIN_RADIUS_PX: f32 = 0.5;

pub struct CanvasRenderer {
    canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
    globe_radius: f32,
    pixel_ratio: f32,
    geometry: FrameGeometry,
    distances: Vec<f32>,
    order: Vec<usize>,
}

impl CanvasRenderer {
    pub fn new(
        canvas: web::HtmlCanvasElement,
        ctx: web::CanvasRenderingContext2d,
        globe_radius: f32,
        pixel_ratio: f32,
    ) -> Self {
        Self {
            canvas,
            ctx,
            globe_radius,
            pixel_ratio,
            geometry: FrameGeometry::default(),
            distances: Vec::new(),
            order: Vec::new(),
        }
    }

    pub fn set_pixel_ratio(&mut self, pixel_ratio: f32) {
        self.pixel_ratio = pixel_ratio;
    }

    fn fill_circle(&self, x: f32, y: f32, r: f32, color: &str) -> anyhow::Result<()> {
        self.ctx.begin_path();
        self.ctx
            .arc(x as f64, y as f64, r as f64, 0.0, TAU)
            .map_err(|e| anyhow::anyhow!("arc: {:?}", e))?;
        self.ctx.set_fill_style_str(color);
        self.ctx.fill();
        Ok(())
    }

    fn draw_sphere(&self, sphere: &Billboard, camera: &Camera, lights: &Lights) -> anyhow::Result<()> {
        let (w, h) = (self.canvas.width() as f32, self.canvas.height() as f32);
        let center = Vec3::from(sphere.pos);
        let Some(p) = world_to_screen(camera.view_proj(), camera.eye, center, w, h) else {
            return Ok(());
        };
        let r = projected_radius_px(sphere.size, p.distance, camera.fovy_radians, h);
        let toward_eye = camera.eye - center;
        let color = shade(sphere.color, toward_eye, lights);
        self.fill_circle(p.x, p.y, r, &css_rgba(color))
    }

    fn draw_lines(&self, camera: &Camera) {
        let (w, h) = (self.canvas.width() as f32, self.canvas.height() as f32);
        let view_proj = camera.view_proj();
        for line in &self.geometry.lines {
            self.ctx.set_stroke_style_str(&css_rgba(line.color));
            self.ctx.set_line_width((line.width_px * self.pixel_ratio) as f64);
            self.ctx.begin_path();
            let mut pen_down = false;
            for (point, &visible) in line.points.iter().zip(&line.visible) {
                let projected = visible
                    .then(|| world_to_screen(view_proj, camera.eye, *point, w, h))
                    .flatten();
                match projected {
                    Some(p) if pen_down => self.ctx.line_to(p.x as f64, p.y as f64),
                    Some(p) => {
                        self.ctx.move_to(p.x as f64, p.y as f64);
                        pen_down = true;
                    }
                    None => pen_down = false,
                }
            }
            self.ctx.stroke();
        }
    }

    fn draw_billboards(&mut self, camera: &Camera) -> anyhow::Result<()> {
        let (w, h) = (self.canvas.width() as f32, self.canvas.height() as f32);
        let view_proj = camera.view_proj();
        self.distances.clear();
        self.distances.extend(
            self.geometry
                .billboards
                .iter()
                .map(|b| (Vec3::from(b.pos) - camera.eye).length()),
        );
        back_to_front(&self.distances, &mut self.order);
        for &i in &self.order {
            let b = &self.geometry.billboards[i];
            let Some(p) = world_to_screen(view_proj, camera.eye, Vec3::from(b.pos), w, h) else {
                continue;
            };
            let r = projected_radius_px(b.size, p.distance, camera.fovy_radians, h);
            if r < MIN_RADIUS_PX {
                continue;
            }
            self.fill_circle(p.x, p.y, r, &css_rgba(b.color))?;
        }
        Ok(())
    }
}

impl Renderer<SceneStore> for CanvasRenderer {
    fn render(&mut self, scene: &SceneStore, camera: &Camera, lights: &Lights) -> anyhow::Result<()> {
        let (w, h) = (self.canvas.width() as f64, self.canvas.height() as f64);
        self.ctx.set_fill_style_str(BACKGROUND);
        self.ctx.fill_rect(0.0, 0.0, w, h);

        self.geometry.collect(scene, camera, self.globe_radius);
        if let Some(sphere) = self.geometry.sphere {
            self.draw_sphere(&sphere, camera, lights)?;
        }
        self.draw_lines(camera);
        self.draw_billboards(camera)
    }
}
