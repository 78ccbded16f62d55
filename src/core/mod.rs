pub mod chart;
pub mod format;
pub mod scale;
pub mod types;

pub use chart::{ChartDefinition, MAX_SCALE_TICKS, ParsedChart, ScaleSpec, SkipReason};
pub use format::{format_general, format_one_decimal, tick_formatter};
pub use scale::{LinearScale, map_value};
pub use types::Viewport;
