use tracing::{debug, trace, warn};

use crate::core::{ChartDefinition, format_general};
use crate::error::BulletGraphResult;
use crate::render::{DrawingSurface, RectPrimitive, Style, SvgSurface, TextPrimitive};

use super::layout::{Marker, NOTE_LEADING_PX, PlotLayout, RowGeometry};
use super::options::RenderOptions;
use super::report::{RecordOutcome, RecordStatus, RenderReport};

/// A stack of bullet graphs sharing one set of options, plus trailing notes.
///
/// Rendering only reads `self`, so one value can be drawn onto any number of
/// surfaces, including concurrently.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BulletGraph {
    pub options: RenderOptions,
    pub charts: Vec<ChartDefinition>,
    pub notes: Vec<String>,
}

impl BulletGraph {
    #[must_use]
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            charts: Vec::new(),
            notes: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_chart(mut self, chart: ChartDefinition) -> Self {
        self.charts.push(chart);
        self
    }

    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn push_chart(&mut self, chart: ChartDefinition) {
        self.charts.push(chart);
    }

    pub fn push_note(&mut self, note: impl Into<String>) {
        self.notes.push(note.into());
    }

    /// Emits every chart row, the optional trailing title and the notes onto
    /// `surface`, in paint order.
    ///
    /// Malformed rows are skipped and reported; they never fail the call.
    /// Errors come only from invalid options or from the surface itself.
    pub fn render<S: DrawingSurface + ?Sized>(
        &self,
        surface: &mut S,
    ) -> BulletGraphResult<RenderReport> {
        let layout = PlotLayout::from_options(&self.options)?;
        debug!(
            charts = self.charts.len(),
            notes = self.notes.len(),
            plot_width = layout.plot_width,
            "render bullet graphs"
        );

        surface.set_document_title(&self.options.title)?;

        let mut y = layout.first_row_top();
        let mut outcomes = Vec::with_capacity(self.charts.len());
        for (index, chart) in self.charts.iter().enumerate() {
            let status = match chart.parse().and_then(|parsed| layout.row(&parsed, y)) {
                Ok(row) => {
                    trace!(index, row_top = y, ticks = row.ticks.len(), "draw row");
                    self.draw_row(surface, chart, &row)?;
                    let row_top = y;
                    y += layout.row_pitch();
                    RecordStatus::Rendered { row_top }
                }
                Err(reason) => {
                    warn!(index, title = %chart.title, %reason, "skipping chart row");
                    RecordStatus::Skipped { reason }
                }
            };
            outcomes.push(RecordOutcome {
                index,
                title: chart.title.clone(),
                status,
            });
        }

        if self.options.show_title_below && !self.options.title.is_empty() {
            y += layout.font_size * 2.0;
            surface.text(
                &TextPrimitive::new(layout.plot_left, y, self.options.title.as_str()),
                Some(&Style::new().with("text-anchor", "start").with("font-size", "200%")),
            )?;
        }

        if !self.notes.is_empty() {
            surface.group_style_begin(
                &Style::new()
                    .with("font-size", "100%")
                    .with("text-anchor", "start"),
            )?;
            y += layout.font_size * 2.0;
            for note in &self.notes {
                surface.text(&TextPrimitive::new(layout.plot_left, y, note.as_str()), None)?;
                y += layout.font_size + NOTE_LEADING_PX;
            }
            surface.group_style_end()?;
        }

        Ok(RenderReport {
            outcomes,
            final_y: y,
        })
    }

    /// Renders a standalone SVG document: canvas background, a font group
    /// carrying the family and base size, then [`BulletGraph::render`].
    pub fn render_svg_document(&self) -> BulletGraphResult<(String, RenderReport)> {
        let mut svg = SvgSurface::new(self.options.viewport)?;
        let report = self.render_document(&mut svg)?;
        Ok((svg.finish()?, report))
    }

    /// Paints the background and font group around [`BulletGraph::render`]
    /// on any surface.
    pub fn render_document<S: DrawingSurface + ?Sized>(
        &self,
        surface: &mut S,
    ) -> BulletGraphResult<RenderReport> {
        self.options.validate()?;
        let viewport = self.options.viewport;
        let palette = self.options.palette();
        surface.rect(
            RectPrimitive::new(
                0.0,
                0.0,
                f64::from(viewport.width),
                f64::from(viewport.height),
            ),
            Some(&Style::new().with("fill", palette.background)),
        )?;
        surface.group_style_begin(
            &Style::new()
                .with("font-family", self.options.font_family.as_str())
                .with(
                    "font-size",
                    format!("{}px", self.options.resolved_geometry().font_size),
                ),
        )?;
        let report = self.render(surface)?;
        surface.group_style_end()?;
        Ok(report)
    }

    fn draw_row<S: DrawingSurface + ?Sized>(
        &self,
        surface: &mut S,
        chart: &ChartDefinition,
        row: &RowGeometry,
    ) -> BulletGraphResult<()> {
        let palette = self.options.palette();

        surface.text(
            &TextPrimitive::new(
                row.label_x,
                row.title_y,
                format!("{} ({})", chart.title, format_general(chart.measure)),
            ),
            Some(
                &Style::new()
                    .with("text-anchor", "end")
                    .with("font-weight", "bold"),
            ),
        )?;
        surface.text(
            &TextPrimitive::new(row.label_x, row.subtitle_y, chart.subtitle.as_str()),
            Some(
                &Style::new()
                    .with("text-anchor", "end")
                    .with("font-size", "75%"),
            ),
        )?;

        surface.group_style_begin(
            &Style::new()
                .with("text-anchor", "middle")
                .with("font-size", "75%"),
        )?;
        for tick in &row.ticks {
            surface.text(&TextPrimitive::new(tick.x, tick.y, tick.label.as_str()), None)?;
        }
        surface.group_style_end()?;

        surface.group_style_begin(
            &Style::new()
                .with("fill-opacity", "0.5")
                .with("fill", palette.bar),
        )?;
        surface.rect(row.background, None)?;
        for band in &row.bands {
            surface.rect(*band, None)?;
        }
        surface.group_style_end()?;

        surface.rect(
            row.measure_bar,
            Some(&Style::new().with("fill", palette.data)),
        )?;

        match row.marker {
            Marker::Circle(circle) => surface.circle(
                circle,
                Some(
                    &Style::new()
                        .with("fill-opacity", "0.3")
                        .with("fill", palette.comparative),
                ),
            ),
            Marker::Tick(line) => surface.line(
                line,
                Some(
                    &Style::new()
                        .with("stroke-width", "3")
                        .with("stroke", palette.comparative),
                ),
            ),
        }
    }
}
