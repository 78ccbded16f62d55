use cairo::{Context, Format, ImageSurface};
use pango::FontDescription;
use std::f64::consts::TAU;
use std::fs::File;
use std::path::Path;

use crate::error::{BulletGraphError, BulletGraphResult};
use crate::render::{
    CirclePrimitive, Color, DrawingSurface, LinePrimitive, RectPrimitive, Style, StyleStack,
    TextPrimitive,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub rects_drawn: usize,
    pub lines_drawn: usize,
    pub circles_drawn: usize,
    pub texts_drawn: usize,
}

/// Cairo + Pango + PangoCairo raster surface.
///
/// Style groups are resolved on the Rust side through a [`StyleStack`], so
/// each shape is painted with its effective `fill`, `stroke` and font
/// properties the way an SVG user agent would inherit them.
#[derive(Debug)]
pub struct CairoSurface {
    surface: ImageSurface,
    context: Context,
    styles: StyleStack,
    base_font_px: f64,
    title: String,
    stats: CairoRenderStats,
}

impl CairoSurface {
    pub fn new(width: i32, height: i32) -> BulletGraphResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(BulletGraphError::InvalidLayout(
                "cairo surface size must be > 0".to_owned(),
            ));
        }

        let surface = ImageSurface::create(Format::ARgb32, width, height)
            .map_err(|err| map_backend_error("failed to create cairo surface", err))?;
        let context = Context::new(&surface)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        Ok(Self {
            surface,
            context,
            styles: StyleStack::new(),
            base_font_px: 16.0,
            title: String::new(),
            stats: CairoRenderStats::default(),
        })
    }

    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        "cairo+pango+pangocairo"
    }

    #[must_use]
    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn stats(&self) -> CairoRenderStats {
        self.stats
    }

    pub fn write_png(&self, path: impl AsRef<Path>) -> BulletGraphResult<()> {
        if self.styles.depth() != 0 {
            return Err(BulletGraphError::UnbalancedGroups {
                open: self.styles.depth(),
            });
        }
        let path = path.as_ref();
        let mut file = File::create(path).map_err(|err| {
            BulletGraphError::Surface(format!("failed to create `{}`: {err}", path.display()))
        })?;
        self.surface.write_to_png(&mut file).map_err(|err| {
            BulletGraphError::Surface(format!("failed to write png `{}`: {err}", path.display()))
        })
    }

    fn paint_color(
        &self,
        effective: &Style,
        color_key: &str,
        opacity_key: &str,
    ) -> BulletGraphResult<Option<Color>> {
        let Some(raw) = effective.get(color_key) else {
            return Ok(None);
        };
        if raw.trim() == "none" {
            return Ok(None);
        }
        let mut color = Color::parse_css(raw)?;
        let opacity = effective
            .get(opacity_key)
            .and_then(|value| value.trim().parse::<f64>().ok())
            .unwrap_or(1.0)
            .clamp(0.0, 1.0);
        color = color.with_alpha(color.alpha * opacity);
        Ok(Some(color))
    }

    fn fill_current_path(&self, effective: &Style, what: &str) -> BulletGraphResult<()> {
        // SVG fills shapes black unless told otherwise.
        let color = match effective.get("fill") {
            None => Some(Color::rgb(0.0, 0.0, 0.0)),
            Some(_) => self.paint_color(effective, "fill", "fill-opacity")?,
        };
        match color {
            Some(color) => {
                apply_color(&self.context, color);
                self.context
                    .fill()
                    .map_err(|err| map_backend_error(&format!("failed to fill {what}"), err))
            }
            None => {
                self.context.new_path();
                Ok(())
            }
        }
    }
}

impl DrawingSurface for CairoSurface {
    fn set_document_title(&mut self, title: &str) -> BulletGraphResult<()> {
        title.clone_into(&mut self.title);
        Ok(())
    }

    fn rect(&mut self, rect: RectPrimitive, style: Option<&Style>) -> BulletGraphResult<()> {
        rect.validate()?;
        let effective = self.styles.resolve(style);
        self.context.rectangle(rect.x, rect.y, rect.width, rect.height);
        self.fill_current_path(&effective, "rectangle")?;
        self.stats.rects_drawn += 1;
        Ok(())
    }

    fn line(&mut self, line: LinePrimitive, style: Option<&Style>) -> BulletGraphResult<()> {
        line.validate()?;
        let effective = self.styles.resolve(style);
        if let Some(color) = self.paint_color(&effective, "stroke", "stroke-opacity")? {
            let width = effective
                .get("stroke-width")
                .and_then(|value| value.trim().parse::<f64>().ok())
                .unwrap_or(1.0);
            apply_color(&self.context, color);
            self.context.set_line_width(width);
            self.context.move_to(line.x1, line.y1);
            self.context.line_to(line.x2, line.y2);
            self.context
                .stroke()
                .map_err(|err| map_backend_error("failed to stroke line", err))?;
        }
        self.stats.lines_drawn += 1;
        Ok(())
    }

    fn circle(&mut self, circle: CirclePrimitive, style: Option<&Style>) -> BulletGraphResult<()> {
        circle.validate()?;
        let effective = self.styles.resolve(style);
        self.context.new_sub_path();
        self.context.arc(circle.cx, circle.cy, circle.radius, 0.0, TAU);
        self.context.close_path();
        self.fill_current_path(&effective, "circle")?;
        self.stats.circles_drawn += 1;
        Ok(())
    }

    fn text(&mut self, text: &TextPrimitive, style: Option<&Style>) -> BulletGraphResult<()> {
        text.validate()?;
        let effective = self.styles.resolve(style);
        let font_px = self.styles.font_size_px(style, self.base_font_px);
        let family = effective.get("font-family").unwrap_or("Sans");

        let layout = pangocairo::functions::create_layout(&self.context);
        let mut font_description = FontDescription::from_string(&format!("{family} {font_px}px"));
        if effective.get("font-weight") == Some("bold") {
            font_description.set_weight(pango::Weight::Bold);
        }
        layout.set_font_description(Some(&font_description));
        layout.set_text(&text.text);

        let (text_width, _text_height) = layout.pixel_size();
        let x = match effective.get("text-anchor") {
            Some("middle") => text.x - f64::from(text_width) / 2.0,
            Some("end") => text.x - f64::from(text_width),
            _ => text.x,
        };
        // SVG places text on its baseline, pango lays out from the top.
        let baseline = f64::from(layout.baseline()) / f64::from(pango::SCALE);

        let color = match effective.get("fill") {
            None => Some(Color::rgb(0.0, 0.0, 0.0)),
            Some(_) => self.paint_color(&effective, "fill", "fill-opacity")?,
        };
        if let Some(color) = color {
            apply_color(&self.context, color);
            self.context.move_to(x, text.y - baseline);
            pangocairo::functions::show_layout(&self.context, &layout);
        }
        self.stats.texts_drawn += 1;
        Ok(())
    }

    fn group_style_begin(&mut self, style: &Style) -> BulletGraphResult<()> {
        self.styles.push(style.clone());
        Ok(())
    }

    fn group_style_end(&mut self) -> BulletGraphResult<()> {
        self.styles
            .pop()
            .map(|_| ())
            .ok_or(BulletGraphError::UnbalancedGroups { open: 0 })
    }
}

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> BulletGraphError {
    BulletGraphError::Surface(format!("{prefix}: {err}"))
}
