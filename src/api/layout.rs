use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{LinearScale, ParsedChart, SkipReason, tick_formatter};
use crate::error::BulletGraphResult;
use crate::render::{CirclePrimitive, LinePrimitive, RectPrimitive};

use super::options::{RenderOptions, ResolvedMargins};

/// Gap between the bottom of the bar and the tick labels.
pub const SCALE_LABEL_GAP_PX: f64 = 4.0;
/// Extra spacing between consecutive note lines.
pub const NOTE_LEADING_PX: f64 = 3.0;

/// Options resolved into the pixel quantities the layout works with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotLayout {
    pub margins: ResolvedMargins,
    pub plot_left: f64,
    pub plot_width: f64,
    pub bar_height: f64,
    pub gutter: f64,
    pub font_size: f64,
    pub circle_marker: bool,
}

impl PlotLayout {
    pub fn from_options(options: &RenderOptions) -> BulletGraphResult<Self> {
        options.validate()?;
        let margins = options.resolved_margins();
        let plot_width =
            f64::from(options.viewport.width) - f64::from(margins.left) - f64::from(margins.right);
        let geometry = options.resolved_geometry();
        Ok(Self {
            margins,
            plot_left: f64::from(margins.left),
            plot_width,
            bar_height: f64::from(geometry.bar_height),
            gutter: f64::from(geometry.gutter),
            font_size: f64::from(geometry.font_size),
            circle_marker: options.use_circle_marker,
        })
    }

    #[must_use]
    pub fn first_row_top(&self) -> f64 {
        f64::from(self.margins.top)
    }

    /// Vertical distance between the tops of two consecutive rows.
    #[must_use]
    pub fn row_pitch(&self) -> f64 {
        self.bar_height + self.gutter
    }

    /// Computes the geometry of one row whose bar starts at `top`.
    ///
    /// Values far outside a very narrow scale can map beyond `f64` range;
    /// such rows are rejected rather than handed to a surface.
    pub fn row(&self, chart: &ParsedChart, top: f64) -> Result<RowGeometry, SkipReason> {
        let scale = LinearScale::new(chart.scale.min, chart.scale.max, 0.0, self.plot_width)
            .map_err(|_| SkipReason::DegenerateScale {
                value: chart.scale.min,
            })?;
        let x = self.plot_left;
        let third = self.bar_height / 3.0;

        let format_tick = tick_formatter(chart.scale.increment);
        let tick_y = top + SCALE_LABEL_GAP_PX + self.bar_height + self.font_size / 2.0;
        let ticks = chart
            .scale
            .ticks()
            .map(|value| TickLabel {
                value,
                x: x + scale.domain_to_pixel(value),
                y: tick_y,
                label: format_tick(value),
            })
            .collect();

        let bands = chart
            .bands
            .iter()
            .map(|&threshold| {
                RectPrimitive::new(
                    x,
                    top,
                    scale.domain_to_pixel(threshold).max(0.0),
                    self.bar_height,
                )
            })
            .collect();

        let measure_bar = RectPrimitive::new(
            x,
            top + third,
            scale.domain_to_pixel(chart.measure).max(0.0),
            third,
        );

        let marker_x = x + scale.domain_to_pixel(chart.comparative_measure);
        let marker = if self.circle_marker {
            Marker::Circle(CirclePrimitive::new(
                marker_x,
                top + self.bar_height / 2.0,
                self.bar_height / 6.0,
            ))
        } else {
            let inset = self.bar_height / 4.0;
            Marker::Tick(LinePrimitive::new(
                marker_x,
                top + inset,
                marker_x,
                top + self.bar_height - inset,
            ))
        };

        let row = RowGeometry {
            top,
            label_x: x - self.font_size,
            title_y: top + third,
            subtitle_y: top + third + self.font_size,
            ticks,
            background: RectPrimitive::new(x, top, self.plot_width, self.bar_height),
            bands,
            measure_bar,
            marker,
        };
        if !row.is_finite() {
            return Err(SkipReason::NonFiniteGeometry);
        }
        Ok(row)
    }
}

/// One scale label below the bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickLabel {
    pub value: f64,
    pub x: f64,
    pub y: f64,
    pub label: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Marker {
    Circle(CirclePrimitive),
    Tick(LinePrimitive),
}

impl Marker {
    /// Horizontal pixel position of the comparative measure.
    #[must_use]
    pub fn x(self) -> f64 {
        match self {
            Self::Circle(circle) => circle.cx,
            Self::Tick(line) => line.x1,
        }
    }
}

/// Pixel geometry of one bullet graph row.
#[derive(Debug, Clone, PartialEq)]
pub struct RowGeometry {
    pub top: f64,
    pub label_x: f64,
    pub title_y: f64,
    pub subtitle_y: f64,
    pub ticks: Vec<TickLabel>,
    pub background: RectPrimitive,
    pub bands: SmallVec<[RectPrimitive; 4]>,
    pub measure_bar: RectPrimitive,
    pub marker: Marker,
}

impl RowGeometry {
    fn is_finite(&self) -> bool {
        let rect_finite = |rect: &RectPrimitive| rect.x.is_finite() && rect.width.is_finite();
        let marker_finite = match self.marker {
            Marker::Circle(circle) => circle.cx.is_finite(),
            Marker::Tick(line) => line.x1.is_finite(),
        };
        marker_finite
            && rect_finite(&self.measure_bar)
            && self.bands.iter().all(rect_finite)
            && self.ticks.iter().all(|tick| tick.x.is_finite())
    }
}
