mod primitives;
mod recording_surface;
mod style;
mod svg_surface;

pub use primitives::{CirclePrimitive, Color, LinePrimitive, RectPrimitive, TextPrimitive};
pub use recording_surface::{DrawCommand, RecordingSurface};
pub use style::{Style, StyleStack, resolve_font_size};
pub use svg_surface::SvgSurface;

use crate::error::BulletGraphResult;

/// Contract implemented by any drawing backend.
///
/// Calls arrive in paint order: a shape overlays everything emitted before
/// it. Every `group_style_begin` is matched by exactly one
/// `group_style_end`, and groups nest.
pub trait DrawingSurface {
    fn set_document_title(&mut self, title: &str) -> BulletGraphResult<()>;

    fn rect(&mut self, rect: RectPrimitive, style: Option<&Style>) -> BulletGraphResult<()>;

    fn line(&mut self, line: LinePrimitive, style: Option<&Style>) -> BulletGraphResult<()>;

    fn circle(&mut self, circle: CirclePrimitive, style: Option<&Style>) -> BulletGraphResult<()>;

    fn text(&mut self, text: &TextPrimitive, style: Option<&Style>) -> BulletGraphResult<()>;

    fn group_style_begin(&mut self, style: &Style) -> BulletGraphResult<()>;

    fn group_style_end(&mut self) -> BulletGraphResult<()>;
}

impl<S: DrawingSurface + ?Sized> DrawingSurface for &mut S {
    fn set_document_title(&mut self, title: &str) -> BulletGraphResult<()> {
        (**self).set_document_title(title)
    }

    fn rect(&mut self, rect: RectPrimitive, style: Option<&Style>) -> BulletGraphResult<()> {
        (**self).rect(rect, style)
    }

    fn line(&mut self, line: LinePrimitive, style: Option<&Style>) -> BulletGraphResult<()> {
        (**self).line(line, style)
    }

    fn circle(&mut self, circle: CirclePrimitive, style: Option<&Style>) -> BulletGraphResult<()> {
        (**self).circle(circle, style)
    }

    fn text(&mut self, text: &TextPrimitive, style: Option<&Style>) -> BulletGraphResult<()> {
        (**self).text(text, style)
    }

    fn group_style_begin(&mut self, style: &Style) -> BulletGraphResult<()> {
        (**self).group_style_begin(style)
    }

    fn group_style_end(&mut self) -> BulletGraphResult<()> {
        (**self).group_style_end()
    }
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoRenderStats, CairoSurface};
