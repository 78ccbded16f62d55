mod document;
mod engine;
pub mod layout;
mod options;
mod report;

pub use document::{BulletGraphDocument, NoteEntry};
pub use engine::BulletGraph;
pub use layout::{Marker, PlotLayout, RowGeometry, TickLabel};
pub use options::{
    DEFAULT_BACKGROUND_COLOR, DEFAULT_BAR_COLOR, DEFAULT_BAR_HEIGHT, DEFAULT_COMPARATIVE_COLOR,
    DEFAULT_DATA_COLOR, DEFAULT_FONT_SIZE, DEFAULT_GUTTER, DEFAULT_LEFT, DEFAULT_RIGHT,
    DEFAULT_TOP, MarginPolicy, Margins, Palette, RenderOptions, ResolvedGeometry,
    ResolvedMargins,
};
pub use report::{
    RENDER_REPORT_JSON_SCHEMA_V1, RecordOutcome, RecordStatus, RenderReport,
    RenderReportJsonContractV1,
};
