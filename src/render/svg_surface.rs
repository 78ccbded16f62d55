use std::fmt::Write as _;

use crate::core::Viewport;
use crate::error::{BulletGraphError, BulletGraphResult};
use crate::render::{
    CirclePrimitive, DrawingSurface, LinePrimitive, RectPrimitive, Style, TextPrimitive,
};

/// Serializes drawing calls into an SVG document, one element per line.
#[derive(Debug)]
pub struct SvgSurface {
    out: String,
    open_groups: usize,
}

impl SvgSurface {
    /// Starts a document of the given canvas size.
    pub fn new(viewport: Viewport) -> BulletGraphResult<Self> {
        if !viewport.is_valid() {
            return Err(BulletGraphError::InvalidLayout(format!(
                "svg canvas must be non-empty, got {}x{}",
                viewport.width, viewport.height
            )));
        }

        let mut out = String::with_capacity(4096);
        out.push_str("<?xml version=\"1.0\"?>\n");
        // Writing into a String cannot fail.
        let _ = writeln!(
            out,
            "<svg width=\"{}\" height=\"{}\" xmlns=\"http://www.w3.org/2000/svg\">",
            viewport.width, viewport.height
        );
        Ok(Self {
            out,
            open_groups: 0,
        })
    }

    /// The markup written so far, without the closing tag.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.out
    }

    /// Closes the document. Fails if a style group is still open.
    pub fn finish(mut self) -> BulletGraphResult<String> {
        if self.open_groups != 0 {
            return Err(BulletGraphError::UnbalancedGroups {
                open: self.open_groups,
            });
        }
        self.out.push_str("</svg>\n");
        Ok(self.out)
    }

    fn push_style_attr(&mut self, style: Option<&Style>) {
        if let Some(style) = style.filter(|style| !style.is_empty()) {
            let _ = write!(
                self.out,
                " style=\"{}\"",
                escape_xml(&style.to_string())
            );
        }
    }
}

impl DrawingSurface for SvgSurface {
    fn set_document_title(&mut self, title: &str) -> BulletGraphResult<()> {
        if !title.is_empty() {
            let _ = writeln!(self.out, "<title>{}</title>", escape_xml(title));
        }
        Ok(())
    }

    fn rect(&mut self, rect: RectPrimitive, style: Option<&Style>) -> BulletGraphResult<()> {
        rect.validate()?;
        let _ = write!(
            self.out,
            "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\"",
            fmt_coord(rect.x),
            fmt_coord(rect.y),
            fmt_coord(rect.width),
            fmt_coord(rect.height)
        );
        self.push_style_attr(style);
        self.out.push_str(" />\n");
        Ok(())
    }

    fn line(&mut self, line: LinePrimitive, style: Option<&Style>) -> BulletGraphResult<()> {
        line.validate()?;
        let _ = write!(
            self.out,
            "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\"",
            fmt_coord(line.x1),
            fmt_coord(line.y1),
            fmt_coord(line.x2),
            fmt_coord(line.y2)
        );
        self.push_style_attr(style);
        self.out.push_str(" />\n");
        Ok(())
    }

    fn circle(&mut self, circle: CirclePrimitive, style: Option<&Style>) -> BulletGraphResult<()> {
        circle.validate()?;
        let _ = write!(
            self.out,
            "<circle cx=\"{}\" cy=\"{}\" r=\"{}\"",
            fmt_coord(circle.cx),
            fmt_coord(circle.cy),
            fmt_coord(circle.radius)
        );
        self.push_style_attr(style);
        self.out.push_str(" />\n");
        Ok(())
    }

    fn text(&mut self, text: &TextPrimitive, style: Option<&Style>) -> BulletGraphResult<()> {
        text.validate()?;
        let _ = write!(
            self.out,
            "<text x=\"{}\" y=\"{}\"",
            fmt_coord(text.x),
            fmt_coord(text.y)
        );
        self.push_style_attr(style);
        let _ = writeln!(self.out, ">{}</text>", escape_xml(&text.text));
        Ok(())
    }

    fn group_style_begin(&mut self, style: &Style) -> BulletGraphResult<()> {
        self.out.push_str("<g");
        self.push_style_attr(Some(style));
        self.out.push_str(">\n");
        self.open_groups += 1;
        Ok(())
    }

    fn group_style_end(&mut self) -> BulletGraphResult<()> {
        if self.open_groups == 0 {
            return Err(BulletGraphError::UnbalancedGroups { open: 0 });
        }
        self.open_groups -= 1;
        self.out.push_str("</g>\n");
        Ok(())
    }
}

/// Prints a coordinate with at most two decimals and no trailing zeros.
///
/// Formats the decimal expansion directly, so any finite value stays finite
/// in the output.
fn fmt_coord(value: f64) -> String {
    let mut out = format!("{value:.2}");
    if out.contains('.') {
        let trimmed = out.trim_end_matches('0').trim_end_matches('.').len();
        out.truncate(trimmed);
    }
    if out == "-0" {
        return "0".to_owned();
    }
    out
}

fn escape_xml(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
