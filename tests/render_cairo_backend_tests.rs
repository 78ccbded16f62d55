#![cfg(feature = "cairo-backend")]

use bullet_graph::BulletGraphError;
use bullet_graph::api::{BulletGraph, RenderOptions};
use bullet_graph::core::{ChartDefinition, Viewport};
use bullet_graph::render::{CairoSurface, DrawingSurface};

fn sample_graph(circle_marker: bool) -> BulletGraph {
    BulletGraph::new(
        RenderOptions::new(Viewport::new(900, 400))
            .with_circle_marker(circle_marker)
            .with_title("Cairo", true),
    )
    .with_chart(
        ChartDefinition::new("Revenue", "0,300,50")
            .with_subtitle("USD(1000)")
            .with_bands("150,225")
            .with_comparative(250.0)
            .with_measure(275.0),
    )
    .with_note("rendered with pango")
}

#[test]
fn cairo_surface_rejects_invalid_size() {
    let err = CairoSurface::new(0, 480).expect_err("invalid width must fail");
    assert!(matches!(err, BulletGraphError::InvalidLayout(_)));
}

#[test]
fn cairo_surface_paints_every_primitive() {
    let graph = sample_graph(false);
    let mut surface = CairoSurface::new(900, 400).expect("surface");
    graph.render_document(&mut surface).expect("render");

    let stats = surface.stats();
    assert_eq!(stats.rects_drawn, 5, "canvas, background, two bands, measure");
    assert_eq!(stats.lines_drawn, 1);
    assert_eq!(stats.circles_drawn, 0);
    assert_eq!(stats.texts_drawn, 2 + 7 + 1 + 1);
    assert_eq!(surface.title(), "Cairo");
}

#[test]
fn cairo_surface_draws_circle_marker() {
    let mut surface = CairoSurface::new(900, 400).expect("surface");
    sample_graph(true)
        .render_document(&mut surface)
        .expect("render");
    assert_eq!(surface.stats().circles_drawn, 1);
    assert_eq!(surface.stats().lines_drawn, 0);
}

#[test]
fn unmatched_group_end_is_reported() {
    let mut surface = CairoSurface::new(10, 10).expect("surface");
    assert!(matches!(
        surface.group_style_end(),
        Err(BulletGraphError::UnbalancedGroups { open: 0 })
    ));
}

#[test]
fn png_export_writes_a_file() {
    let mut surface = CairoSurface::new(900, 400).expect("surface");
    sample_graph(false)
        .render_document(&mut surface)
        .expect("render");
    let path = std::env::temp_dir().join(format!("bullet_graph_{}.png", std::process::id()));
    surface.write_png(&path).expect("png");
    let written = std::fs::metadata(&path).expect("metadata").len();
    let _ = std::fs::remove_file(&path);
    assert!(written > 0);
}

#[test]
fn cairo_surface_accepts_extended_color_keywords() {
    let graph = BulletGraph::new(
        RenderOptions::new(Viewport::new(900, 400)).with_colors(
            "lightsteelblue",
            "teal",
            "darkslategray",
        ),
    )
    .with_chart(
        ChartDefinition::new("Revenue", "0,300,50")
            .with_bands("150,225")
            .with_measure(275.0),
    );
    let mut surface = CairoSurface::new(900, 400).expect("surface");
    graph.render_document(&mut surface).expect("render");
    assert_eq!(surface.stats().rects_drawn, 5);
}
