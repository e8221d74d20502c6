use kurbo::{Arc, Ellipse, PathEl, Shape as _};

use crate::{
    foundation::core::{BezPath, LogicalImage, Point, Rect, Rgba8},
    foundation::error::{BeastError, BeastResult},
    foundation::math::unpremultiply_rgba8_in_place,
};

/// Flattening tolerance for curves, in logical pixels.
const CURVE_TOLERANCE: f64 = 0.05;

/// Integer pixel coordinate on the logical canvas.
pub type Px = (i32, i32);

/// Square logical drawing surface with a transparent background.
///
/// Coordinates address pixels; boxes are inclusive on both corners, so
/// `fill_rect(2, 2, 3, 3, ..)` covers exactly four pixels. Paint order is draw order.
/// The canvas is consumed once by [`RasterCanvas::finish`].
pub struct RasterCanvas {
    side: u16,
    ctx: vello_cpu::RenderContext,
}

impl std::fmt::Debug for RasterCanvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RasterCanvas")
            .field("side", &self.side)
            .finish_non_exhaustive()
    }
}

impl RasterCanvas {
    pub fn new(side: u32) -> BeastResult<Self> {
        let side: u16 = side
            .try_into()
            .ok()
            .filter(|s| *s > 0)
            .ok_or_else(|| BeastError::validation("canvas side must be in 1..=65535"))?;
        Ok(Self {
            side,
            ctx: vello_cpu::RenderContext::new(side, side),
        })
    }

    pub fn side(&self) -> u32 {
        u32::from(self.side)
    }

    pub fn fill_rect(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgba8) {
        let r = pixel_box(x0, y0, x1, y1);
        self.set_color(color);
        self.ctx
            .fill_rect(&vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1));
    }

    pub fn fill_ellipse(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgba8) {
        let path = Ellipse::from_rect(pixel_box(x0, y0, x1, y1)).to_path(CURVE_TOLERANCE);
        self.set_color(color);
        self.ctx.fill_path(&bezpath_to_cpu(&path));
    }

    /// Closed polygon through pixel centers, optionally outlined one pixel wide.
    pub fn polygon(&mut self, points: &[Px], fill: Rgba8, outline: Option<Rgba8>) {
        if points.len() < 2 {
            return;
        }
        let mut path = centered_path(points);
        path.close_path();
        let cpu_path = bezpath_to_cpu(&path);

        self.set_color(fill);
        self.ctx.fill_path(&cpu_path);
        if let Some(outline) = outline {
            self.set_color(outline);
            self.ctx.set_stroke(vello_cpu::kurbo::Stroke::new(1.0));
            self.ctx.stroke_path(&cpu_path);
        }
    }

    /// Open polyline through pixel centers.
    pub fn polyline(&mut self, points: &[Px], color: Rgba8, width: f64) {
        if points.len() < 2 {
            return;
        }
        let path = centered_path(points);
        self.set_color(color);
        self.ctx.set_stroke(vello_cpu::kurbo::Stroke::new(width));
        self.ctx.stroke_path(&bezpath_to_cpu(&path));
    }

    /// Elliptical arc inscribed in the inclusive box, angles in degrees clockwise from
    /// 3 o'clock (screen space, y down).
    pub fn arc(
        &mut self,
        bbox: (i32, i32, i32, i32),
        start_deg: f64,
        end_deg: f64,
        color: Rgba8,
        width: f64,
    ) {
        let (x0, y0, x1, y1) = bbox;
        let r = pixel_box(x0, y0, x1, y1);
        let inset = width / 2.0;
        let arc = Arc {
            center: r.center(),
            radii: kurbo::Vec2::new(
                (r.width() / 2.0 - inset).max(0.0),
                (r.height() / 2.0 - inset).max(0.0),
            ),
            start_angle: start_deg.to_radians(),
            sweep_angle: (end_deg - start_deg).to_radians(),
            x_rotation: 0.0,
        };
        let path = arc.to_path(CURVE_TOLERANCE);
        self.set_color(color);
        self.ctx.set_stroke(vello_cpu::kurbo::Stroke::new(width));
        self.ctx.stroke_path(&bezpath_to_cpu(&path));
    }

    /// Rasterize all queued layers into straight-alpha RGBA8.
    pub fn finish(mut self) -> BeastResult<LogicalImage> {
        let mut pixmap = vello_cpu::Pixmap::new(self.side, self.side);
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut pixmap);

        let mut data = pixmap.data_as_u8_slice().to_vec();
        let side = self.side();
        let expected = (side as usize) * (side as usize) * 4;
        if data.len() != expected {
            return Err(BeastError::generation(format!(
                "canvas pixmap has {} bytes, expected {expected}",
                data.len()
            )));
        }
        unpremultiply_rgba8_in_place(&mut data);
        Ok(LogicalImage {
            width: side,
            height: side,
            data,
        })
    }

    fn set_color(&mut self, c: Rgba8) {
        self.ctx
            .set_paint(vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a));
    }
}

fn pixel_box(x0: i32, y0: i32, x1: i32, y1: i32) -> Rect {
    let (lx, hx) = (x0.min(x1), x0.max(x1));
    let (ly, hy) = (y0.min(y1), y0.max(y1));
    Rect::new(
        f64::from(lx),
        f64::from(ly),
        f64::from(hx) + 1.0,
        f64::from(hy) + 1.0,
    )
}

fn centered_path(points: &[Px]) -> BezPath {
    let center = |(x, y): Px| Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5);
    let mut path = BezPath::new();
    let mut it = points.iter().copied();
    if let Some(first) = it.next() {
        path.move_to(center(first));
    }
    for p in it {
        path.line_to(center(p));
    }
    path
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::LineTo(p) => out.line_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::QuadTo(p1, p2) => out.quad_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
            ),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
                vello_cpu::kurbo::Point::new(p3.x, p3.y),
            ),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/canvas.rs"]
mod tests;
