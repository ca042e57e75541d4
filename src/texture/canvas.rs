use std::io::Cursor;
use std::ops::Range;

use image::{ImageOutputFormat, Rgba, RgbaImage};
use nalgebra::Point3;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TextureError {
    #[error("png encoding failed: {0}")]
    Encode(#[from] image::ImageError),
}

/// How a freshly drawn fragment combines with what's already on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compositing {
    /// Ordinary alpha blending.
    SourceOver,
    /// Saturating add; only ever brightens.
    Additive,
    /// Multiplies darks and screens lights, pushing contrast outward.
    Overlay,
    /// Inverse multiply; never darkens.
    Screen,
}

#[derive(Debug, Clone, Copy)]
pub struct GradientStop {
    pub t: f32,
    pub color: Point3<f32>,
    pub alpha: f32,
}

pub fn stop(t: f32, color: Point3<f32>, alpha: f32) -> GradientStop {
    GradientStop { t, color, alpha }
}

pub fn rgb(r: u8, g: u8, b: u8) -> Point3<f32> {
    Point3::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
}

/// An offscreen RGBA pixel buffer with just enough 2D drawing primitives to
/// synthesize the scene's textures. Coordinates are in pixels; colors are
/// normalized RGB with a separate alpha.
pub struct Canvas {
    pixels: RgbaImage,
}

impl Canvas {
    /// A fully transparent canvas.
    pub fn new(width: u32, height: u32) -> Self {
        Canvas {
            pixels: RgbaImage::new(width, height),
        }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Flood the whole canvas with an opaque color.
    pub fn fill(&mut self, color: Point3<f32>) {
        let px = pack(color.x, color.y, color.z, 1.0);
        for p in self.pixels.pixels_mut() {
            *p = px;
        }
    }

    pub fn fill_rect(
        &mut self,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        color: Point3<f32>,
        alpha: f32,
        mode: Compositing,
    ) {
        for py in self.rows(y, y + h) {
            for px in self.cols(x, x + w) {
                self.blend_at(px, py, color, alpha, mode);
            }
        }
    }

    pub fn fill_circle(
        &mut self,
        cx: f32,
        cy: f32,
        radius: f32,
        color: Point3<f32>,
        alpha: f32,
        mode: Compositing,
    ) {
        let r = radius.max(0.0);
        for py in self.rows(cy - r, cy + r) {
            for px in self.cols(cx - r, cx + r) {
                let dx = px as f32 + 0.5 - cx;
                let dy = py as f32 + 0.5 - cy;
                if dx * dx + dy * dy <= r * r {
                    self.blend_at(px, py, color, alpha, mode);
                }
            }
        }
    }

    /// A straight stroke with hard edges.
    pub fn stroke_line(
        &mut self,
        x0: f32,
        y0: f32,
        x1: f32,
        y1: f32,
        width: f32,
        color: Point3<f32>,
        alpha: f32,
        mode: Compositing,
    ) {
        let half = width.max(0.0) / 2.0;
        let pad = half + 1.0;
        for py in self.rows(y0.min(y1) - pad, y0.max(y1) + pad) {
            for px in self.cols(x0.min(x1) - pad, x0.max(x1) + pad) {
                let d = segment_distance(px as f32 + 0.5, py as f32 + 0.5, x0, y0, x1, y1);
                if d <= half {
                    self.blend_at(px, py, color, alpha, mode);
                }
            }
        }
    }

    /// Paint the whole canvas with a radial gradient centered at (cx, cy).
    /// Pixels beyond `radius` get the last stop, so a gradient whose last stop
    /// is transparent doubles as a soft circular blob.
    pub fn radial_gradient(
        &mut self,
        cx: f32,
        cy: f32,
        radius: f32,
        stops: &[GradientStop],
        mode: Compositing,
    ) {
        for py in 0..self.height() {
            for px in 0..self.width() {
                let dx = px as f32 + 0.5 - cx;
                let dy = py as f32 + 0.5 - cy;
                let t = ((dx * dx + dy * dy).sqrt() / radius).clamp(0.0, 1.0);
                let (color, alpha) = sample_stops(stops, t);
                self.blend_at(px, py, color, alpha, mode);
            }
        }
    }

    /// Paint the whole canvas with a linear gradient along the given axis.
    pub fn linear_gradient(
        &mut self,
        x0: f32,
        y0: f32,
        x1: f32,
        y1: f32,
        stops: &[GradientStop],
        mode: Compositing,
    ) {
        let ax = x1 - x0;
        let ay = y1 - y0;
        let len_sq = ax * ax + ay * ay;
        for py in 0..self.height() {
            for px in 0..self.width() {
                let t = if len_sq > 0.0 {
                    let proj = ((px as f32 + 0.5 - x0) * ax + (py as f32 + 0.5 - y0) * ay) / len_sq;
                    proj.clamp(0.0, 1.0)
                } else {
                    0.0
                };
                let (color, alpha) = sample_stops(stops, t);
                self.blend_at(px, py, color, alpha, mode);
            }
        }
    }

    /// PNG-encode the pixel buffer.
    pub fn encode_png(&self) -> Result<Vec<u8>, TextureError> {
        let mut bytes = Vec::new();
        self.pixels
            .write_to(&mut Cursor::new(&mut bytes), ImageOutputFormat::Png)?;
        Ok(bytes)
    }

    fn blend_at(&mut self, x: u32, y: u32, color: Point3<f32>, alpha: f32, mode: Compositing) {
        let dst = *self.pixels.get_pixel(x, y);
        self.pixels.put_pixel(x, y, blend(dst, color, alpha, mode));
    }

    fn rows(&self, min: f32, max: f32) -> Range<u32> {
        clip(min, max, self.height())
    }

    fn cols(&self, min: f32, max: f32) -> Range<u32> {
        clip(min, max, self.width())
    }
}

fn clip(min: f32, max: f32, limit: u32) -> Range<u32> {
    let lo = (min.floor().max(0.0) as u32).min(limit);
    let hi = (max.ceil().max(0.0) as u32).min(limit);
    lo..hi.max(lo)
}

fn segment_distance(px: f32, py: f32, x0: f32, y0: f32, x1: f32, y1: f32) -> f32 {
    let vx = x1 - x0;
    let vy = y1 - y0;
    let len_sq = vx * vx + vy * vy;
    let t = if len_sq > 0.0 {
        (((px - x0) * vx + (py - y0) * vy) / len_sq).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let nx = x0 + t * vx - px;
    let ny = y0 + t * vy - py;
    (nx * nx + ny * ny).sqrt()
}

fn sample_stops(stops: &[GradientStop], t: f32) -> (Point3<f32>, f32) {
    let mut prev: Option<&GradientStop> = None;
    for s in stops {
        if t <= s.t {
            return match prev {
                None => (s.color, s.alpha),
                Some(p) => {
                    let span = s.t - p.t;
                    if span <= f32::EPSILON {
                        (s.color, s.alpha)
                    } else {
                        let k = (t - p.t) / span;
                        (
                            p.color + (s.color - p.color) * k,
                            p.alpha + (s.alpha - p.alpha) * k,
                        )
                    }
                }
            };
        }
        prev = Some(s);
    }
    // Past the last stop (or no stops at all)
    match prev {
        Some(p) => (p.color, p.alpha),
        None => (Point3::origin(), 0.0),
    }
}

fn blend(dst: Rgba<u8>, color: Point3<f32>, alpha: f32, mode: Compositing) -> Rgba<u8> {
    let sa = alpha.clamp(0.0, 1.0);
    if sa == 0.0 {
        return dst;
    }

    let sc = [color.x, color.y, color.z];
    let dc = [
        dst[0] as f32 / 255.0,
        dst[1] as f32 / 255.0,
        dst[2] as f32 / 255.0,
    ];
    let da = dst[3] as f32 / 255.0;

    if mode == Compositing::Additive {
        // Saturating add of premultiplied components.
        let oa = (da + sa).min(1.0);
        let out = |i: usize| {
            let premul = (dc[i] * da + sc[i] * sa).min(1.0);
            (premul / oa).min(1.0)
        };
        return pack(out(0), out(1), out(2), oa);
    }

    let oa = sa + da - sa * da;
    if oa == 0.0 {
        return Rgba([0, 0, 0, 0]);
    }
    let out = |i: usize| {
        let b = match mode {
            Compositing::SourceOver => sc[i],
            Compositing::Overlay => {
                if dc[i] <= 0.5 {
                    2.0 * dc[i] * sc[i]
                } else {
                    1.0 - 2.0 * (1.0 - dc[i]) * (1.0 - sc[i])
                }
            }
            Compositing::Screen => 1.0 - (1.0 - dc[i]) * (1.0 - sc[i]),
            Compositing::Additive => unreachable!(),
        };
        let premul = sa * da * b + sa * (1.0 - da) * sc[i] + da * (1.0 - sa) * dc[i];
        premul / oa
    };
    pack(out(0), out(1), out(2), oa)
}

fn pack(r: f32, g: f32, b: f32, a: f32) -> Rgba<u8> {
    let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    Rgba([channel(r), channel(g), channel(b), channel(a)])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn white() -> Point3<f32> {
        rgb(255, 255, 255)
    }

    #[test]
    fn test_source_over_on_transparent() {
        let mut canvas = Canvas::new(4, 4);
        canvas.fill_rect(0.0, 0.0, 4.0, 4.0, rgb(255, 0, 0), 0.5, Compositing::SourceOver);
        let p = canvas.image().get_pixel(1, 1);
        assert_eq!(p[0], 255);
        assert_eq!(p[3], 128);
    }

    #[test]
    fn test_additive_saturates() {
        let mut canvas = Canvas::new(2, 2);
        canvas.fill(rgb(200, 200, 200));
        canvas.fill_rect(0.0, 0.0, 2.0, 2.0, white(), 1.0, Compositing::Additive);
        let p = canvas.image().get_pixel(0, 0);
        assert_eq!((p[0], p[1], p[2], p[3]), (255, 255, 255, 255));
    }

    #[test]
    fn test_additive_brightens() {
        let mut canvas = Canvas::new(2, 2);
        canvas.fill(rgb(10, 20, 30));
        canvas.fill_rect(0.0, 0.0, 2.0, 2.0, rgb(100, 0, 0), 0.5, Compositing::Additive);
        let p = canvas.image().get_pixel(0, 0);
        assert!(p[0] > 10);
        assert_eq!(p[1], 20);
        assert_eq!(p[2], 30);
    }

    #[test]
    fn test_overlay_doubles_dark_values() {
        let mut canvas = Canvas::new(2, 2);
        canvas.fill(rgb(64, 64, 64));
        canvas.fill_rect(0.0, 0.0, 2.0, 2.0, white(), 1.0, Compositing::Overlay);
        // overlay of white onto 0.25 gray gives 2 * 0.25 * 1.0 = 0.5
        let p = canvas.image().get_pixel(0, 0);
        assert!((p[0] as i32 - 128).abs() <= 2, "got {}", p[0]);
        assert_eq!(p[3], 255);
    }

    #[test]
    fn test_screen_never_darkens() {
        let mut canvas = Canvas::new(2, 2);
        canvas.fill(rgb(13, 130, 245));
        canvas.fill_rect(0.0, 0.0, 2.0, 2.0, rgb(90, 90, 90), 0.7, Compositing::Screen);
        let p = canvas.image().get_pixel(0, 0);
        assert!(p[0] >= 13 && p[1] >= 130 && p[2] >= 245);
    }

    #[test]
    fn test_radial_gradient_endpoints() {
        let mut canvas = Canvas::new(64, 64);
        let stops = [
            stop(0.0, rgb(255, 0, 0), 1.0),
            stop(1.0, rgb(0, 0, 255), 1.0),
        ];
        canvas.radial_gradient(32.0, 32.0, 32.0, &stops, Compositing::SourceOver);
        let center = canvas.image().get_pixel(32, 32);
        assert!(center[0] > 240 && center[2] < 15);
        let corner = canvas.image().get_pixel(0, 0);
        assert!(corner[2] > 240 && corner[0] < 15);
    }

    #[test]
    fn test_linear_gradient_interpolates() {
        let mut canvas = Canvas::new(100, 1);
        let stops = [
            stop(0.0, rgb(0, 0, 0), 1.0),
            stop(1.0, rgb(255, 255, 255), 1.0),
        ];
        canvas.linear_gradient(0.0, 0.0, 100.0, 0.0, &stops, Compositing::SourceOver);
        let left = canvas.image().get_pixel(0, 0)[0];
        let mid = canvas.image().get_pixel(50, 0)[0];
        let right = canvas.image().get_pixel(99, 0)[0];
        assert!(left < 10);
        assert!((mid as i32 - 128).abs() <= 4);
        assert!(right > 245);
    }

    #[test]
    fn test_drawing_clips_to_bounds() {
        let mut canvas = Canvas::new(8, 8);
        // None of these should panic
        canvas.fill_rect(-5.0, -5.0, 100.0, 100.0, white(), 1.0, Compositing::SourceOver);
        canvas.fill_circle(-3.0, 4.0, 10.0, white(), 0.5, Compositing::SourceOver);
        canvas.stroke_line(-20.0, -20.0, 40.0, 40.0, 3.0, white(), 1.0, Compositing::Additive);
        assert_eq!(canvas.image().get_pixel(7, 7)[3], 255);
    }

    #[test]
    fn test_stroke_line_covers_segment() {
        let mut canvas = Canvas::new(16, 16);
        canvas.stroke_line(0.0, 8.0, 16.0, 8.0, 2.0, white(), 1.0, Compositing::SourceOver);
        assert!(canvas.image().get_pixel(8, 8)[3] > 0);
        assert_eq!(canvas.image().get_pixel(8, 1)[3], 0);
    }
}
