//! Offscreen rendering.
//!
//! A [`Panel`] is the reusable offscreen container widgets are centered in.
//! One panel serves a whole run: the render context and the pixmap surfaces
//! are recycled across images (bucketed by size) and fully cleared before
//! each reuse, so no content from a previous render can leak into the next.
//! Rendering is synchronous and deterministic; concurrent renders would each
//! need their own panel.

use std::collections::HashMap;

use crate::{
    error::{UishotError, UishotResult},
    manifest::ImageSpec,
    registry::Widget,
};

/// A finished render: premultiplied RGBA8, row-major.
#[derive(Clone, Debug)]
pub struct PixelBuffer {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

/// Panel background. `None` paints widgets over a fully transparent canvas;
/// a color makes the container explicitly opaque.
#[derive(Clone, Copy, Debug, Default)]
pub struct PanelSettings {
    pub clear_rgba: Option<[u8; 4]>,
}

/// Top-left origin that centers a `widget`-sized box in a `panel`-sized
/// canvas. Signed: a widget larger than its panel gets a negative origin.
pub fn centered_origin(panel: (u32, u32), widget: (u32, u32)) -> (i32, i32) {
    let (pw, ph) = (panel.0 as i64, panel.1 as i64);
    let (w, h) = (widget.0 as i64, widget.1 as i64);
    (((pw - w) / 2) as i32, ((ph - h) / 2) as i32)
}

/// Bounded recycler for pixmap surfaces, bucketed by dimensions. Within one
/// run most images share a panel size, so the steady state is zero
/// allocations per render.
struct SurfacePool {
    buckets: HashMap<(u16, u16), Vec<vello_cpu::Pixmap>>,
    max_per_bucket: usize,
}

impl SurfacePool {
    fn new() -> Self {
        Self {
            buckets: HashMap::new(),
            max_per_bucket: 2,
        }
    }

    fn borrow(&mut self, w: u16, h: u16) -> vello_cpu::Pixmap {
        if let Some(pm) = self.buckets.get_mut(&(w, h)).and_then(Vec::pop) {
            return pm;
        }
        vello_cpu::Pixmap::new(w, h)
    }

    fn release(&mut self, pm: vello_cpu::Pixmap) {
        let key = (pm.width(), pm.height());
        let bucket = self.buckets.entry(key).or_default();
        if bucket.len() < self.max_per_bucket {
            bucket.push(pm);
        }
    }
}

/// The shared offscreen container.
pub struct Panel {
    settings: PanelSettings,
    ctx: Option<vello_cpu::RenderContext>,
    pool: SurfacePool,
}

impl Panel {
    pub fn new(settings: PanelSettings) -> Self {
        Self {
            settings,
            ctx: None,
            pool: SurfacePool::new(),
        }
    }

    /// Center `widget` in a canvas of the spec's panel dimensions, size it to
    /// exactly `(width, height)`, paint, and read the canvas back.
    pub fn render(&mut self, widget: &dyn Widget, spec: &ImageSpec) -> UishotResult<PixelBuffer> {
        let pw = surface_dim(spec.panel_width)?;
        let ph = surface_dim(spec.panel_height)?;

        let (dx, dy) = centered_origin(
            (spec.panel_width, spec.panel_height),
            (spec.width, spec.height),
        );

        let mut pixmap = self.pool.borrow(pw, ph);
        clear_pixmap(&mut pixmap, self.settings.clear_rgba.map(premul_rgba8));

        let clear = self.settings.clear_rgba;
        let out = self.with_ctx_mut(pw, ph, |ctx| {
            if let Some(c) = clear {
                ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(c[0], c[1], c[2], c[3]));
                ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                    0.0,
                    0.0,
                    f64::from(pw),
                    f64::from(ph),
                ));
            }

            ctx.set_transform(vello_cpu::kurbo::Affine::translate((
                f64::from(dx),
                f64::from(dy),
            )));
            widget.paint(ctx, spec.width, spec.height)?;

            ctx.flush();
            ctx.render_to_pixmap(&mut pixmap);
            Ok(PixelBuffer {
                width: u32::from(pw),
                height: u32::from(ph),
                data: pixmap.data_as_u8_slice().to_vec(),
            })
        });

        self.pool.release(pixmap);
        out
    }

    fn with_ctx_mut<R>(
        &mut self,
        width: u16,
        height: u16,
        f: impl FnOnce(&mut vello_cpu::RenderContext) -> UishotResult<R>,
    ) -> UishotResult<R> {
        let mut ctx = match self.ctx.take() {
            None => vello_cpu::RenderContext::new(width, height),
            Some(ctx) if ctx.width() == width && ctx.height() == height => ctx,
            Some(_) => vello_cpu::RenderContext::new(width, height),
        };
        ctx.reset();
        let out = f(&mut ctx);
        self.ctx = Some(ctx);
        out
    }
}

fn surface_dim(dim: u32) -> UishotResult<u16> {
    u16::try_from(dim).map_err(|_| {
        UishotError::config(format!("dimension {dim} exceeds the maximum surface size"))
    })
}

fn premul_rgba8(c: [u8; 4]) -> [u8; 4] {
    let a = u16::from(c[3]);
    let mul = |v: u8| ((u16::from(v) * a + 127) / 255) as u8;
    [mul(c[0]), mul(c[1]), mul(c[2]), c[3]]
}

fn clear_pixmap(pixmap: &mut vello_cpu::Pixmap, rgba: Option<[u8; 4]>) {
    let rgba = rgba.unwrap_or([0, 0, 0, 0]);
    for px in pixmap.data_as_u8_slice_mut().chunks_exact_mut(4) {
        px.copy_from_slice(&rgba);
    }
}
