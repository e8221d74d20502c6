use crate::{
    foundation::core::{LogicalImage, Rgb8, Rgba8},
    foundation::error::BeastResult,
    foundation::rng::{Rng64, Stream},
    render::canvas::RasterCanvas,
    shape::plan::{Appendage, ShapePlan, plan_shape},
    style::palette::{Palette, generate_palette},
    text::{
        features::{FeatureSet, extract_features},
        rules::{BodyArchetype, FaceStyle, RuleTable},
        seed::derive_seed,
    },
};

/// One drawing step. Steps run in a fixed order over a single canvas.
pub type Layer = fn(RasterCanvas, &ShapePlan, &Palette, &mut Rng64) -> RasterCanvas;

const METAL_TRIM: Rgba8 = Rgba8::new(100, 100, 100, 255);
const FLAME_OUTER: Rgba8 = Rgba8::new(255, 150, 0, 255);
const FLAME_INNER: Rgba8 = Rgba8::new(255, 255, 0, 255);
const CRYSTAL_EDGE: Rgba8 = Rgba8::new(200, 200, 255, 255);
const SCARY_EYE: Rgba8 = Rgba8::new(255, 0, 0, 255);
const SCARY_GLOW: Rgba8 = Rgba8::new(255, 100, 100, 100);
const WHITE: Rgba8 = Rgb8::WHITE.opaque();
const BLACK: Rgba8 = Rgb8::BLACK.opaque();

/// Everything produced while drawing one creature.
#[derive(Clone, Debug)]
pub struct ComposedCreature {
    pub features: FeatureSet,
    pub palette: Palette,
    pub plan: ShapePlan,
    pub image: LogicalImage,
}

/// Draw the creature for `description` on a `side`×`side` logical canvas.
#[tracing::instrument(skip(rules))]
pub fn compose_creature(
    description: &str,
    rules: &RuleTable,
    side: u32,
) -> BeastResult<ComposedCreature> {
    let seed = derive_seed(description);
    let features = extract_features(description, rules);
    let palette = generate_palette(seed, &features);
    let plan = plan_shape(&features, rules, side);
    tracing::debug!(
        archetype = ?plan.archetype,
        face = ?plan.face,
        appendages = ?plan.appendages,
        hue = palette.hue,
        "resolved creature plan"
    );

    let mut rng = Rng64::for_stream(seed, Stream::Shape);
    let canvas = layers(&plan)
        .into_iter()
        .fold(RasterCanvas::new(side)?, |canvas, layer| {
            layer(canvas, &plan, &palette, &mut rng)
        });
    let image = canvas.finish()?;

    Ok(ComposedCreature {
        features,
        palette,
        plan,
        image,
    })
}

/// Ordered layer list for a plan: body, appendages, eyes, mouth, decorations.
pub fn layers(plan: &ShapePlan) -> Vec<Layer> {
    let body: Layer = match plan.archetype {
        BodyArchetype::Round => round_body,
        BodyArchetype::Robot => robot_body,
        BodyArchetype::Ghost => ghost_body,
        BodyArchetype::Boxy => boxy_body,
    };
    let mut out = vec![body];
    out.extend(plan.appendages.iter().map(|a| -> Layer {
        match a {
            Appendage::Horns => horns,
            Appendage::Ears => ears,
            Appendage::Wings => wings,
            Appendage::Tail => tail,
            Appendage::FireAura => fire_aura,
            Appendage::Crystals => crystals,
        }
    }));
    out.extend([eyes as Layer, mouth, decorations]);
    out
}

fn round_body(mut c: RasterCanvas, p: &ShapePlan, pal: &Palette, _: &mut Rng64) -> RasterCanvas {
    let (l, r, y, b) = (p.left(), p.right(), p.body_y, p.bottom());
    let d = p.unit(2);
    c.fill_ellipse(l + d, y + d, r + d, b + d, pal.shadow.opaque());
    c.fill_ellipse(l, y, r, b, pal.main.opaque());

    let hs = p.bw / 3;
    let (hx, hy) = (p.cx - p.bw / 2, y + p.bh / 4);
    c.fill_ellipse(hx, hy, hx + hs, hy + hs, pal.highlight.opaque());
    let (gx, gy) = (p.cx - p.bw / 3, y + p.bh / 5);
    c.fill_ellipse(gx, gy, gx + d, gy + d, WHITE);
    c
}

fn robot_body(mut c: RasterCanvas, p: &ShapePlan, pal: &Palette, _: &mut Rng64) -> RasterCanvas {
    let (l, r, y, b) = (p.left(), p.right(), p.body_y, p.bottom());
    let d = p.unit(2);
    c.fill_rect(l + d, y + d, r + d, b + d, pal.shadow.opaque());
    c.fill_rect(l, y, r, b, METAL_TRIM);
    c.fill_rect(l + 1, y + 1, r - 1, b - 1, pal.main.opaque());

    for i in 1..=3 {
        let yl = y + (p.bh / 4) * i;
        c.polyline(&[(l + d, yl), (r - d, yl)], pal.highlight.opaque(), 1.0);
    }
    c.fill_rect(l + d, y + d, p.cx - p.bw / 3, y + p.bh / 4, pal.highlight.opaque());
    c
}

fn ghost_body(mut c: RasterCanvas, p: &ShapePlan, pal: &Palette, _: &mut Rng64) -> RasterCanvas {
    let (l, r, y, b) = (p.left(), p.right(), p.body_y, p.bottom());
    for offset in 0..3u8 {
        let o = i32::from(offset);
        let alpha = 150 - offset * 30;
        c.fill_ellipse(l + o, y + o, r + o, b + o, pal.main.with_alpha(alpha));
    }
    let dip = p.unit(5);
    let wave = [
        (l, b),
        (p.cx - p.bw / 2, b + dip),
        (p.cx, b),
        (p.cx + p.bw / 2, b + dip),
        (r, b),
    ];
    c.polyline(&wave, pal.highlight.opaque(), f64::from(p.unit(2)));
    c
}

fn boxy_body(mut c: RasterCanvas, p: &ShapePlan, pal: &Palette, _: &mut Rng64) -> RasterCanvas {
    let (l, r, y, b) = (p.left(), p.right(), p.body_y, p.bottom());
    let d = p.unit(2);
    c.fill_rect(l + d, y + d, r + d, b + d, pal.shadow.opaque());
    c.fill_rect(l, y, r, b, pal.main.opaque());
    let inset = p.unit(3);
    c.fill_rect(
        l + inset,
        y + inset,
        p.cx - p.bw / 2,
        y + p.bh / 3,
        pal.highlight.opaque(),
    );
    c.polyline(&[(l, y), (l, y + p.bh / 2)], pal.highlight.opaque(), 1.0);
    c
}

fn horns(mut c: RasterCanvas, p: &ShapePlan, pal: &Palette, rng: &mut Rng64) -> RasterCanvas {
    let lean = rng.range_i32(-1, 1);
    let (l, r, y) = (p.left(), p.right(), p.body_y);
    let (near, far, rise) = (p.unit(3), p.unit(5), p.unit(8));
    let outline = Some(pal.shadow.opaque());
    c.polygon(
        &[(l + near, y), (l + lean, y - rise), (l + far, y)],
        pal.contrast.opaque(),
        outline,
    );
    c.polygon(
        &[(r - near, y), (r - lean, y - rise), (r - far, y)],
        pal.contrast.opaque(),
        outline,
    );
    c
}

fn ears(mut c: RasterCanvas, p: &ShapePlan, pal: &Palette, _: &mut Rng64) -> RasterCanvas {
    let (l, r, y) = (p.left(), p.right(), p.body_y);
    let (u2, u3, u5) = (p.unit(2), p.unit(3), p.unit(5));
    let outline = Some(pal.contrast.opaque());
    c.polygon(
        &[(l + u2, y + u5), (l - u3, y - u5), (l + u5, y + u3)],
        pal.decoration.opaque(),
        outline,
    );
    c.polygon(
        &[(r - u2, y + u5), (r + u3, y - u5), (r - u5, y + u3)],
        pal.decoration.opaque(),
        outline,
    );
    c.fill_ellipse(l, y - u2, l + u2, y, pal.highlight.opaque());
    c.fill_ellipse(r - u2, y - u2, r, y, pal.highlight.opaque());
    c
}

fn wings(mut c: RasterCanvas, p: &ShapePlan, pal: &Palette, rng: &mut Rng64) -> RasterCanvas {
    let flap = rng.range_i32(-1, 1);
    let (l, r, y) = (p.left(), p.right(), p.body_y);
    let u = |v| p.unit(v);
    let outline = Some(pal.contrast.opaque());
    c.polygon(
        &[
            (l, y + u(8)),
            (l - u(12), y + u(5) + flap),
            (l - u(10), y + u(15)),
            (l, y + u(18)),
        ],
        pal.decoration.opaque(),
        outline,
    );
    c.polygon(
        &[
            (r, y + u(8)),
            (r + u(12), y + u(5) + flap),
            (r + u(10), y + u(15)),
            (r, y + u(18)),
        ],
        pal.decoration.opaque(),
        outline,
    );
    let vein = pal.highlight.opaque();
    c.polyline(&[(l - u(2), y + u(10)), (l - u(8), y + u(8))], vein, 1.0);
    c.polyline(&[(r + u(2), y + u(10)), (r + u(8), y + u(8))], vein, 1.0);
    c
}

fn tail(mut c: RasterCanvas, p: &ShapePlan, pal: &Palette, rng: &mut Rng64) -> RasterCanvas {
    let sway = rng.range_i32(-1, 1);
    let (cx, b) = (p.cx, p.bottom());
    let u = |v| p.unit(v);
    c.polygon(
        &[
            (cx, b),
            (cx + u(3), b + u(8)),
            (cx + u(5) + sway, b + u(15)),
            (cx + u(2), b + u(8)),
        ],
        pal.decoration.opaque(),
        Some(pal.contrast.opaque()),
    );
    c
}

fn fire_aura(mut c: RasterCanvas, p: &ShapePlan, _: &Palette, _: &mut Rng64) -> RasterCanvas {
    let u = |v| p.unit(v);
    let mid = p.body_y + p.bh / 2;
    let anchors = [
        (p.cx, p.body_y - u(5)),
        (p.right() + u(3), mid),
        (p.cx, p.bottom() + u(3)),
        (p.left() - u(3), mid),
    ];
    for (fx, fy) in anchors {
        c.polygon(
            &[(fx, fy), (fx - u(2), fy + u(4)), (fx, fy + u(6)), (fx + u(2), fy + u(4))],
            FLAME_OUTER,
            None,
        );
        c.polygon(
            &[(fx, fy + u(1)), (fx - u(1), fy + u(3)), (fx, fy + u(4)), (fx + u(1), fy + u(3))],
            FLAME_INNER,
            None,
        );
    }
    c
}

fn crystals(mut c: RasterCanvas, p: &ShapePlan, pal: &Palette, _: &mut Rng64) -> RasterCanvas {
    let u = |v| p.unit(v);
    for i in 0..3 {
        let x = p.left() + p.bw * 2 * i / 3;
        let y = p.body_y + p.bh / 4 + u(5) * i;
        c.polygon(
            &[(x, y), (x - u(2), y + u(3)), (x, y + u(5)), (x + u(2), y + u(3))],
            pal.highlight.opaque(),
            Some(CRYSTAL_EDGE),
        );
        c.fill_rect(x - 1, y + 1, x, y + 2, WHITE);
    }
    c
}

fn eye_y(p: &ShapePlan) -> i32 {
    p.body_y + p.bh / 4
}

fn eyes(mut c: RasterCanvas, p: &ShapePlan, _: &Palette, _: &mut Rng64) -> RasterCanvas {
    let u = |v| p.unit(v);
    let (cx, ey) = (p.cx, eye_y(p));
    match p.face {
        FaceStyle::Cute => {
            let (size, gap, pupil) = (u(5), u(10), u(2));
            c.fill_ellipse(cx - gap - size, ey, cx - gap, ey + size, WHITE);
            c.fill_ellipse(cx + gap, ey, cx + gap + size, ey + size, WHITE);
            c.fill_ellipse(cx - gap - pupil, ey + u(1), cx - gap, ey + u(1) + pupil, BLACK);
            c.fill_ellipse(
                cx + gap + u(1),
                ey + u(1),
                cx + gap + u(1) + pupil,
                ey + u(1) + pupil,
                BLACK,
            );
            c.fill_rect(cx - gap - u(1), ey + u(1), cx - gap, ey + u(2), WHITE);
            c.fill_rect(cx + gap + u(2), ey + u(1), cx + gap + u(3), ey + u(2), WHITE);
        }
        FaceStyle::Scary => {
            let size = u(4);
            c.fill_ellipse(cx - u(10), ey, cx - u(10) + size, ey + size, SCARY_EYE);
            c.fill_ellipse(cx + u(6), ey, cx + u(6) + size, ey + size, SCARY_EYE);
            c.fill_ellipse(
                cx - u(11),
                ey - u(1),
                cx - u(9) + size,
                ey + u(1) + size,
                SCARY_GLOW,
            );
            c.fill_ellipse(
                cx + u(5),
                ey - u(1),
                cx + u(7) + size,
                ey + u(1) + size,
                SCARY_GLOW,
            );
        }
        FaceStyle::Neutral => {
            let size = u(4);
            c.fill_ellipse(cx - u(9), ey, cx - u(9) + size, ey + size, WHITE);
            c.fill_ellipse(cx + u(5), ey, cx + u(5) + size, ey + size, WHITE);
            c.fill_ellipse(cx - u(8), ey + u(1), cx - u(8) + u(2), ey + u(3), BLACK);
            c.fill_ellipse(cx + u(6), ey + u(1), cx + u(6) + u(2), ey + u(3), BLACK);
        }
    }
    c
}

fn mouth(mut c: RasterCanvas, p: &ShapePlan, pal: &Palette, _: &mut Rng64) -> RasterCanvas {
    let u = |v| p.unit(v);
    let (cx, my) = (p.cx, eye_y(p) + u(10));
    let ink = pal.contrast.opaque();
    let width = f64::from(u(2));
    match p.face {
        FaceStyle::Cute => c.arc((cx - u(6), my, cx + u(6), my + u(6)), 0.0, 180.0, ink, width),
        FaceStyle::Scary => {
            let teeth: Vec<_> = (0..9)
                .map(|k| {
                    let drop = if k % 2 == 1 { u(4) } else { 0 };
                    (cx + u(2 * k - 8), my + drop)
                })
                .collect();
            c.polyline(&teeth, ink, width);
        }
        FaceStyle::Neutral => c.polyline(&[(cx - u(6), my), (cx + u(6), my)], ink, width),
    }
    c
}

/// Kind of a small body decoration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarkKind {
    Dot,
    Square,
    Star,
}

/// A decoration mark anchored at its top-left pixel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Mark {
    pub x: i32,
    pub y: i32,
    pub kind: MarkKind,
}

/// Draw 5..=12 marks inside the body inset by 3 pixels: count first, then x, y and kind
/// per mark.
pub fn plan_marks(p: &ShapePlan, rng: &mut Rng64) -> Vec<Mark> {
    let count = rng.range_i32(5, 12);
    (0..count)
        .map(|_| {
            let x = rng.range_i32(p.left() + 3, p.right() - 3);
            let y = rng.range_i32(p.body_y + 3, p.bottom() - 3);
            let kind = match rng.range_i32(0, 2) {
                0 => MarkKind::Dot,
                1 => MarkKind::Square,
                _ => MarkKind::Star,
            };
            Mark { x, y, kind }
        })
        .collect()
}

fn decorations(
    mut c: RasterCanvas,
    p: &ShapePlan,
    pal: &Palette,
    rng: &mut Rng64,
) -> RasterCanvas {
    let dot = pal.decoration.opaque();
    let spark = pal.highlight.opaque();
    for Mark { x, y, kind } in plan_marks(p, rng) {
        match kind {
            MarkKind::Dot => c.fill_ellipse(x, y, x + 2, y + 2, dot),
            MarkKind::Square => c.fill_rect(x, y, x + 2, y + 2, spark),
            MarkKind::Star => {
                c.fill_rect(x, y, x + 1, y + 1, spark);
                c.fill_rect(x - 1, y, x, y + 1, dot);
                c.fill_rect(x + 1, y, x + 2, y + 1, dot);
            }
        }
    }
    c
}

#[cfg(test)]
#[path = "../../tests/unit/shape/compositor.rs"]
mod tests;
