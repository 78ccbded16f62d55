//! Console logging for the bullet graph tools.
//!
//! The library itself only emits `tracing` events: one `debug!` per render,
//! a `trace!` per drawn row and a `warn!` for every skipped row. Hosts that
//! already install a subscriber see those events with no extra setup.

/// Installs a compact stderr subscriber filtered by `RUST_LOG` (default
/// `info`). Needs the `telemetry` feature; without it this does nothing.
///
/// Returns `false` when nothing was installed, either because the feature is
/// off or because a global subscriber already exists.
///
/// ```no_run
/// use bullet_graph::api::BulletGraph;
/// use bullet_graph::core::ChartDefinition;
///
/// // RUST_LOG=bullet_graph=warn surfaces skipped rows only.
/// let _ = bullet_graph::telemetry::init_default_tracing();
/// let graph = BulletGraph::default()
///     .with_chart(ChartDefinition::new("Broken", "0,10").with_bands("5"));
/// let (_svg, report) = graph.render_svg_document()?;
/// assert!(report.has_skips());
/// # Ok::<(), bullet_graph::BulletGraphError>(())
/// ```
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        use tracing_subscriber::EnvFilter;

        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}
