use serde::{Deserialize, Serialize};

use crate::core::Viewport;
use crate::error::{BulletGraphError, BulletGraphResult};

pub const DEFAULT_TOP: u32 = 50;
pub const DEFAULT_LEFT: u32 = 250;
pub const DEFAULT_RIGHT: u32 = 50;
pub const DEFAULT_BAR_HEIGHT: u32 = 48;
pub const DEFAULT_GUTTER: u32 = 30;
pub const DEFAULT_FONT_SIZE: u32 = 18;
pub const DEFAULT_BACKGROUND_COLOR: &str = "white";
pub const DEFAULT_BAR_COLOR: &str = "rgb(200,200,200)";
pub const DEFAULT_DATA_COLOR: &str = "darkgray";
pub const DEFAULT_COMPARATIVE_COLOR: &str = "black";

/// How an explicit zero margin is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarginPolicy {
    /// `Some(0)` is a zero margin; only `None` falls back to the default.
    #[default]
    Explicit,
    /// `Some(0)` is treated like `None`, matching the markup document format
    /// where an absent attribute reads as zero. A zero gutter falls back to
    /// its default as well.
    ZeroMeansDefault,
}

/// Plot margins in pixels. `None` means "use the default".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Margins {
    #[serde(default)]
    pub top: Option<u32>,
    #[serde(default)]
    pub left: Option<u32>,
    #[serde(default)]
    pub right: Option<u32>,
}

impl Margins {
    /// Applies the defaults at render time according to `policy`.
    #[must_use]
    pub fn resolve(self, policy: MarginPolicy) -> ResolvedMargins {
        let pick = |value: Option<u32>, default: u32| match (value, policy) {
            (None, _) | (Some(0), MarginPolicy::ZeroMeansDefault) => default,
            (Some(value), _) => value,
        };
        ResolvedMargins {
            top: pick(self.top, DEFAULT_TOP),
            left: pick(self.left, DEFAULT_LEFT),
            right: pick(self.right, DEFAULT_RIGHT),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedMargins {
    pub top: u32,
    pub left: u32,
    pub right: u32,
}

/// Row geometry after zero-value fallbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedGeometry {
    pub bar_height: u32,
    pub gutter: u32,
    pub font_size: u32,
}

/// Fill and stroke colors after blank-value fallbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette<'a> {
    pub background: &'a str,
    pub bar: &'a str,
    pub data: &'a str,
    pub comparative: &'a str,
}

/// Shared presentation settings for one render session.
///
/// This type is serializable so documents can carry their own look; every
/// field has a serde default, so partial JSON loads.
///
/// Defaults are applied at render time. A zero `bar_height` or `font_size`
/// and a blank color always resolve to their defaults. Margins differ from
/// the markup format: under the default [`MarginPolicy::Explicit`] a margin
/// of `Some(0)` is a real zero, so `with_left(0)` draws flush left. Use
/// [`MarginPolicy::ZeroMeansDefault`] to get the markup behaviour, where a
/// zero left margin renders at 250.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    pub viewport: Viewport,
    pub margins: Margins,
    pub margin_policy: MarginPolicy,
    pub bar_height: u32,
    pub gutter: u32,
    pub font_size: u32,
    pub font_family: String,
    pub background_color: String,
    pub bar_color: String,
    pub data_color: String,
    pub comparative_color: String,
    pub title: String,
    pub show_title_below: bool,
    pub use_circle_marker: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            viewport: Viewport::default(),
            margins: Margins::default(),
            margin_policy: MarginPolicy::default(),
            bar_height: DEFAULT_BAR_HEIGHT,
            gutter: DEFAULT_GUTTER,
            font_size: DEFAULT_FONT_SIZE,
            font_family: "Calibri".to_owned(),
            background_color: DEFAULT_BACKGROUND_COLOR.to_owned(),
            bar_color: DEFAULT_BAR_COLOR.to_owned(),
            data_color: DEFAULT_DATA_COLOR.to_owned(),
            comparative_color: DEFAULT_COMPARATIVE_COLOR.to_owned(),
            title: String::new(),
            show_title_below: false,
            use_circle_marker: false,
        }
    }
}

impl RenderOptions {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    #[must_use]
    pub fn with_margin_policy(mut self, policy: MarginPolicy) -> Self {
        self.margin_policy = policy;
        self
    }

    #[must_use]
    pub fn with_left(mut self, left: u32) -> Self {
        self.margins.left = Some(left);
        self
    }

    #[must_use]
    pub fn with_right(mut self, right: u32) -> Self {
        self.margins.right = Some(right);
        self
    }

    #[must_use]
    pub fn with_top(mut self, top: u32) -> Self {
        self.margins.top = Some(top);
        self
    }

    #[must_use]
    pub fn with_bar_geometry(mut self, bar_height: u32, gutter: u32) -> Self {
        self.bar_height = bar_height;
        self.gutter = gutter;
        self
    }

    #[must_use]
    pub fn with_font_size(mut self, font_size: u32) -> Self {
        self.font_size = font_size;
        self
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>, show_below: bool) -> Self {
        self.title = title.into();
        self.show_title_below = show_below;
        self
    }

    #[must_use]
    pub fn with_circle_marker(mut self, enabled: bool) -> Self {
        self.use_circle_marker = enabled;
        self
    }

    #[must_use]
    pub fn with_colors(
        mut self,
        bar_color: impl Into<String>,
        data_color: impl Into<String>,
        comparative_color: impl Into<String>,
    ) -> Self {
        self.bar_color = bar_color.into();
        self.data_color = data_color.into();
        self.comparative_color = comparative_color.into();
        self
    }

    #[must_use]
    pub fn resolved_margins(&self) -> ResolvedMargins {
        self.margins.resolve(self.margin_policy)
    }

    /// Bar height, gutter and font size with zero values replaced by their
    /// defaults. The gutter keeps an explicit zero under
    /// [`MarginPolicy::Explicit`].
    #[must_use]
    pub fn resolved_geometry(&self) -> ResolvedGeometry {
        let or_default = |value: u32, default: u32| if value == 0 { default } else { value };
        let gutter = match self.margin_policy {
            MarginPolicy::Explicit => self.gutter,
            MarginPolicy::ZeroMeansDefault => or_default(self.gutter, DEFAULT_GUTTER),
        };
        ResolvedGeometry {
            bar_height: or_default(self.bar_height, DEFAULT_BAR_HEIGHT),
            gutter,
            font_size: or_default(self.font_size, DEFAULT_FONT_SIZE),
        }
    }

    /// The four colors with blank values replaced by their defaults.
    #[must_use]
    pub fn palette(&self) -> Palette<'_> {
        fn pick<'a>(value: &'a str, default: &'static str) -> &'a str {
            let value = value.trim();
            if value.is_empty() { default } else { value }
        }
        Palette {
            background: pick(&self.background_color, DEFAULT_BACKGROUND_COLOR),
            bar: pick(&self.bar_color, DEFAULT_BAR_COLOR),
            data: pick(&self.data_color, DEFAULT_DATA_COLOR),
            comparative: pick(&self.comparative_color, DEFAULT_COMPARATIVE_COLOR),
        }
    }

    pub fn validate(&self) -> BulletGraphResult<()> {
        if !self.viewport.is_valid() {
            return Err(BulletGraphError::InvalidLayout(format!(
                "canvas must be non-empty, got {}x{}",
                self.viewport.width, self.viewport.height
            )));
        }
        let margins = self.resolved_margins();
        let horizontal = u64::from(margins.left) + u64::from(margins.right);
        if horizontal >= u64::from(self.viewport.width) {
            return Err(BulletGraphError::InvalidLayout(format!(
                "left + right margins ({horizontal}) leave no plot area in a {}px wide canvas",
                self.viewport.width
            )));
        }
        let palette = self.palette();
        for (name, color) in [
            ("background_color", palette.background),
            ("bar_color", palette.bar),
            ("data_color", palette.data),
            ("comparative_color", palette.comparative),
        ] {
            if color.contains([';', '"', '<', '>']) {
                return Err(BulletGraphError::InvalidData(format!(
                    "{name} `{color}` is not a plain color value"
                )));
            }
        }
        Ok(())
    }
}
