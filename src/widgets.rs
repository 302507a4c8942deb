//! Built-in widget bindings.
//!
//! These are the reference bindings shipped with the crate: simple vector
//! controls painted with `vello_cpu`. A project linking in a richer toolkit
//! registers its own builders on the same [`WidgetRegistry`] seam.
//!
//! Text labels are rendered as measured slugs (one rounded bar per label),
//! which keeps output deterministic across platforms and font stacks.

use std::collections::BTreeMap;

use kurbo::Shape;

use crate::{
    error::{UishotError, UishotResult},
    registry::{Widget, WidgetRegistry},
    value::{TypedValue, ValueKind},
};

/// Palette handed to every built-in binding. Selected once per run from the
/// `lookAndFeel` option.
#[derive(Clone, Copy, Debug)]
pub struct Theme {
    pub surface: [u8; 4],
    pub face: [u8; 4],
    pub border: [u8; 4],
    pub accent: [u8; 4],
    pub text: [u8; 4],
    pub text_on_accent: [u8; 4],
}

impl Theme {
    pub fn light() -> Self {
        Self {
            surface: [0xee, 0xef, 0xf2, 0xff],
            face: [0xfa, 0xfa, 0xfc, 0xff],
            border: [0x9a, 0x9e, 0xa8, 0xff],
            accent: [0x44, 0x66, 0xdd, 0xff],
            text: [0x2a, 0x2c, 0x33, 0xff],
            text_on_accent: [0xf4, 0xf6, 0xff, 0xff],
        }
    }

    pub fn dark() -> Self {
        Self {
            surface: [0x24, 0x26, 0x2c, 0xff],
            face: [0x31, 0x34, 0x3c, 0xff],
            border: [0x55, 0x59, 0x63, 0xff],
            accent: [0x6c, 0x8c, 0xff, 0xff],
            text: [0xd8, 0xda, 0xe0, 0xff],
            text_on_accent: [0x10, 0x14, 0x22, 0xff],
        }
    }

    pub fn from_name(name: &str) -> UishotResult<Self> {
        match name {
            "light" => Ok(Self::light()),
            "dark" => Ok(Self::dark()),
            other => Err(UishotError::config(format!(
                "unknown look and feel '{other}' (expected 'light' or 'dark')"
            ))),
        }
    }
}

/// Client-property bag shared by the built-ins. Every name is accepted;
/// bindings read the ones they understand at paint time.
#[derive(Default)]
struct PropertyBag {
    entries: BTreeMap<String, TypedValue>,
}

impl PropertyBag {
    fn put(&mut self, name: &str, value: TypedValue) {
        self.entries.insert(name.to_string(), value);
    }

    fn number(&self, name: &str) -> Option<f64> {
        self.entries.get(name).and_then(TypedValue::as_f64_lossy)
    }

    fn flag(&self, name: &str) -> bool {
        self.number(name).is_some_and(|v| v != 0.0)
    }

    fn color(&self, name: &str) -> Option<[u8; 4]> {
        self.entries
            .get(name)
            .and_then(TypedValue::as_str)
            .and_then(parse_hex_rgba)
    }
}

fn parse_hex_rgba(s: &str) -> Option<[u8; 4]> {
    let hex = s.strip_prefix('#')?;
    let byte = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    match hex.len() {
        6 => Some([byte(0)?, byte(2)?, byte(4)?, 0xff]),
        8 => Some([byte(0)?, byte(2)?, byte(4)?, byte(6)?]),
        _ => None,
    }
}

fn solid(c: [u8; 4]) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c[0], c[1], c[2], c[3])
}

fn fill_rect(ctx: &mut vello_cpu::RenderContext, x0: f64, y0: f64, x1: f64, y1: f64, c: [u8; 4]) {
    ctx.set_paint(solid(c));
    ctx.fill_rect(&vello_cpu::kurbo::Rect::new(x0, y0, x1, y1));
}

fn fill_rounded(
    ctx: &mut vello_cpu::RenderContext,
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
    radius: f64,
    c: [u8; 4],
) {
    let rr = kurbo::RoundedRect::new(x0, y0, x1, y1, radius);
    let mut path = vello_cpu::kurbo::BezPath::new();
    for el in rr.path_elements(0.1) {
        path.push(el);
    }
    ctx.set_paint(solid(c));
    ctx.fill_path(&path);
}

/// Centered label slug: a rounded bar whose width tracks the label length.
fn fill_label_slug(
    ctx: &mut vello_cpu::RenderContext,
    w: f64,
    h: f64,
    label: &str,
    c: [u8; 4],
) {
    if label.is_empty() {
        return;
    }
    let slug_w = (label.chars().count() as f64 * 6.0).min((w - 10.0).max(4.0));
    let slug_h = 5.0_f64.min(h / 3.0).max(2.0);
    let x0 = (w - slug_w) / 2.0;
    let y0 = (h - slug_h) / 2.0;
    fill_rounded(ctx, x0, y0, x0 + slug_w, y0 + slug_h, slug_h / 2.0, c);
}

struct Panel {
    theme: Theme,
    props: PropertyBag,
}

impl Widget for Panel {
    fn put_client_property(&mut self, name: &str, value: TypedValue) {
        self.props.put(name, value);
    }

    fn paint(
        &self,
        ctx: &mut vello_cpu::RenderContext,
        width: u32,
        height: u32,
    ) -> UishotResult<()> {
        let (w, h) = (f64::from(width), f64::from(height));
        let radius = self.props.number("uishot.cornerRadius").unwrap_or(0.0);
        let fill = self.props.color("uishot.background").unwrap_or(self.theme.surface);
        if radius > 0.0 {
            fill_rounded(ctx, 0.0, 0.0, w, h, radius, fill);
        } else {
            fill_rect(ctx, 0.0, 0.0, w, h, fill);
        }
        Ok(())
    }
}

struct Button {
    theme: Theme,
    label: String,
    props: PropertyBag,
}

impl Widget for Button {
    fn put_client_property(&mut self, name: &str, value: TypedValue) {
        self.props.put(name, value);
    }

    fn paint(
        &self,
        ctx: &mut vello_cpu::RenderContext,
        width: u32,
        height: u32,
    ) -> UishotResult<()> {
        let (w, h) = (f64::from(width), f64::from(height));
        let radius = self.props.number("uishot.cornerRadius").unwrap_or(6.0);
        let accented = self.props.flag("uishot.default");
        let face = if accented {
            self.props.color("uishot.accent").unwrap_or(self.theme.accent)
        } else {
            self.theme.face
        };
        let label_color = if accented {
            self.theme.text_on_accent
        } else {
            self.theme.text
        };

        fill_rounded(ctx, 0.0, 0.0, w, h, radius, self.theme.border);
        fill_rounded(ctx, 1.0, 1.0, w - 1.0, h - 1.0, (radius - 1.0).max(0.0), face);
        fill_label_slug(ctx, w, h, &self.label, label_color);
        Ok(())
    }
}

struct Label {
    theme: Theme,
    text: String,
    props: PropertyBag,
}

impl Widget for Label {
    fn put_client_property(&mut self, name: &str, value: TypedValue) {
        self.props.put(name, value);
    }

    fn paint(
        &self,
        ctx: &mut vello_cpu::RenderContext,
        width: u32,
        height: u32,
    ) -> UishotResult<()> {
        let (w, h) = (f64::from(width), f64::from(height));
        let color = self.props.color("uishot.foreground").unwrap_or(self.theme.text);
        fill_label_slug(ctx, w, h, &self.text, color);
        Ok(())
    }
}

struct CheckBox {
    theme: Theme,
    props: PropertyBag,
}

impl Widget for CheckBox {
    fn put_client_property(&mut self, name: &str, value: TypedValue) {
        self.props.put(name, value);
    }

    fn paint(
        &self,
        ctx: &mut vello_cpu::RenderContext,
        width: u32,
        height: u32,
    ) -> UishotResult<()> {
        let (w, h) = (f64::from(width), f64::from(height));
        let side = w.min(h).min(16.0);
        let x0 = (w - side) / 2.0;
        let y0 = (h - side) / 2.0;

        fill_rounded(ctx, x0, y0, x0 + side, y0 + side, 3.0, self.theme.border);
        fill_rounded(
            ctx,
            x0 + 1.0,
            y0 + 1.0,
            x0 + side - 1.0,
            y0 + side - 1.0,
            2.0,
            self.theme.face,
        );
        if self.props.flag("uishot.selected") {
            let inset = side / 4.0;
            let accent = self.props.color("uishot.accent").unwrap_or(self.theme.accent);
            fill_rounded(
                ctx,
                x0 + inset,
                y0 + inset,
                x0 + side - inset,
                y0 + side - inset,
                2.0,
                accent,
            );
        }
        Ok(())
    }
}

struct ProgressBar {
    theme: Theme,
    fraction: f64,
    props: PropertyBag,
}

impl Widget for ProgressBar {
    fn put_client_property(&mut self, name: &str, value: TypedValue) {
        self.props.put(name, value);
    }

    fn paint(
        &self,
        ctx: &mut vello_cpu::RenderContext,
        width: u32,
        height: u32,
    ) -> UishotResult<()> {
        let (w, h) = (f64::from(width), f64::from(height));
        let radius = h / 2.0;
        let inner = (radius - 1.0).max(0.0);
        fill_rounded(ctx, 0.0, 0.0, w, h, radius, self.theme.border);
        fill_rounded(ctx, 1.0, 1.0, w - 1.0, h - 1.0, inner, self.theme.face);

        let fraction = self.fraction.clamp(0.0, 1.0);
        let fill_w = (w - 2.0) * fraction;
        if fill_w >= 1.0 {
            let accent = self.props.color("uishot.accent").unwrap_or(self.theme.accent);
            fill_rounded(ctx, 1.0, 1.0, 1.0 + fill_w, h - 1.0, inner, accent);
        }
        Ok(())
    }
}

struct Swatch {
    theme: Theme,
    rgb: [u8; 3],
    props: PropertyBag,
}

impl Widget for Swatch {
    fn put_client_property(&mut self, name: &str, value: TypedValue) {
        self.props.put(name, value);
    }

    fn paint(
        &self,
        ctx: &mut vello_cpu::RenderContext,
        width: u32,
        height: u32,
    ) -> UishotResult<()> {
        let (w, h) = (f64::from(width), f64::from(height));
        fill_rect(ctx, 0.0, 0.0, w, h, self.theme.border);
        fill_rect(
            ctx,
            1.0,
            1.0,
            w - 1.0,
            h - 1.0,
            [self.rgb[0], self.rgb[1], self.rgb[2], 0xff],
        );
        Ok(())
    }
}

fn channel(value: &TypedValue) -> UishotResult<u8> {
    let v = value
        .as_i32()
        .ok_or_else(|| UishotError::config("swatch channel must be an Integer"))?;
    u8::try_from(v)
        .map_err(|_| UishotError::config(format!("swatch channel {v} out of range 0..=255")))
}

/// Registry pre-populated with the built-in bindings for one theme.
pub fn builtin_registry(theme: Theme) -> WidgetRegistry {
    let mut reg = WidgetRegistry::new();

    reg.register("Panel", vec![], move |_| {
        Ok(Box::new(Panel {
            theme,
            props: PropertyBag::default(),
        }))
    });

    reg.register("Button", vec![], move |_| {
        Ok(Box::new(Button {
            theme,
            label: String::new(),
            props: PropertyBag::default(),
        }))
    });
    reg.register("Button", vec![ValueKind::String], move |args| {
        Ok(Box::new(Button {
            theme,
            label: args[0].as_str().unwrap_or_default().to_string(),
            props: PropertyBag::default(),
        }))
    });

    reg.register("Label", vec![ValueKind::String], move |args| {
        Ok(Box::new(Label {
            theme,
            text: args[0].as_str().unwrap_or_default().to_string(),
            props: PropertyBag::default(),
        }))
    });

    reg.register("CheckBox", vec![], move |_| {
        Ok(Box::new(CheckBox {
            theme,
            props: PropertyBag::default(),
        }))
    });

    for kind in [ValueKind::Float, ValueKind::Double] {
        reg.register("ProgressBar", vec![kind], move |args| {
            let fraction = args[0]
                .as_f64_lossy()
                .ok_or_else(|| UishotError::config("progress fraction must be numeric"))?;
            Ok(Box::new(ProgressBar {
                theme,
                fraction,
                props: PropertyBag::default(),
            }))
        });
    }

    reg.register(
        "Swatch",
        vec![ValueKind::Integer, ValueKind::Integer, ValueKind::Integer],
        move |args| {
            let rgb = [channel(&args[0])?, channel(&args[1])?, channel(&args[2])?];
            Ok(Box::new(Swatch {
                theme,
                rgb,
                props: PropertyBag::default(),
            }))
        },
    );

    reg
}
