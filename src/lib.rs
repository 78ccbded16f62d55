//! bullet-graph: bullet graph rendering as vector drawing commands.
//!
//! Bullet graphs follow the Perceptual Edge design specification: a
//! performance measure drawn as a bar over qualitative bands, with a
//! comparative marker and a labelled quantitative scale. The engine turns a
//! list of [`core::ChartDefinition`]s into ordered calls on a
//! [`render::DrawingSurface`]; SVG output and a headless recording surface
//! ship with the crate, a cairo raster surface sits behind `cairo-backend`.

pub mod api;
pub mod core;
pub mod error;
pub mod render;
pub mod telemetry;

pub use api::{BulletGraph, BulletGraphDocument, RenderOptions, RenderReport};
pub use error::{BulletGraphError, BulletGraphResult};
