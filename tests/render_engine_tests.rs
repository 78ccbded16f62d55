use approx::assert_relative_eq;
use bullet_graph::api::{BulletGraph, BulletGraphDocument, MarginPolicy, RecordStatus, RenderOptions};
use bullet_graph::core::{ChartDefinition, SkipReason, Viewport, map_value};
use bullet_graph::render::{DrawCommand, RecordingSurface};

fn revenue() -> ChartDefinition {
    ChartDefinition::new("Revenue", "0,300,50")
        .with_subtitle("USD(1000)")
        .with_bands("150,225")
        .with_comparative(250.0)
        .with_measure(275.0)
}

fn render(graph: &BulletGraph) -> RecordingSurface {
    let mut surface = RecordingSurface::new();
    graph.render(&mut surface).expect("render should succeed");
    surface.finish().expect("groups balanced");
    surface
}

fn first_label_y(surface: &RecordingSurface, prefix: &str) -> f64 {
    surface
        .texts()
        .find(|(text, _)| text.text.starts_with(prefix))
        .map(|(text, _)| text.y)
        .expect("label present")
}

#[test]
fn revenue_row_matches_reference_geometry() {
    let graph = BulletGraph::new(RenderOptions::new(Viewport::new(1024, 800))).with_chart(revenue());
    let surface = render(&graph);
    let plot_width = f64::from(1024 - 250 - 50);

    let rects: Vec<_> = surface.rects().collect();
    assert_eq!(rects.len(), 4, "background, two bands, measure");

    let (measure_bar, measure_style) = rects[3];
    assert_relative_eq!(
        measure_bar.width,
        map_value(275.0, 0.0, 300.0, 0.0, plot_width)
    );
    assert_eq!(measure_bar.x, 250.0);
    assert_eq!(measure_style, Some("fill:darkgray"));

    assert_relative_eq!(rects[1].0.right(), 250.0 + map_value(150.0, 0.0, 300.0, 0.0, plot_width));
    assert_relative_eq!(rects[2].0.right(), 250.0 + map_value(225.0, 0.0, 300.0, 0.0, plot_width));
    assert_eq!(rects[0].0.width, plot_width);

    let tick_labels: Vec<&str> = surface
        .texts()
        .filter(|(_, style)| style.is_none())
        .map(|(text, _)| text.text.as_str())
        .collect();
    assert_eq!(tick_labels, vec!["0", "50", "100", "150", "200", "250", "300"]);

    let line = surface.lines().next().expect("tick marker");
    assert_relative_eq!(line.x1, 250.0 + map_value(250.0, 0.0, 300.0, 0.0, plot_width));
}

#[test]
fn emits_primitives_in_paint_order() {
    let graph = BulletGraph::default()
        .with_chart(ChartDefinition::new("Test", "0,60,20").with_bands("27,29"));
    let surface = render(&graph);
    let ops: Vec<&'static str> = surface
        .commands()
        .iter()
        .map(|command| match command {
            DrawCommand::DocumentTitle { .. } => "title",
            DrawCommand::Rect { .. } => "rect",
            DrawCommand::Line { .. } => "line",
            DrawCommand::Circle { .. } => "circle",
            DrawCommand::Text { .. } => "text",
            DrawCommand::GroupBegin { .. } => "begin",
            DrawCommand::GroupEnd => "end",
        })
        .collect();
    assert_eq!(
        ops,
        vec![
            "title", "text", "text", "begin", "text", "text", "text", "text", "end", "begin",
            "rect", "rect", "rect", "end", "rect", "line",
        ]
    );
}

#[test]
fn labels_carry_title_measure_and_subtitle() {
    let graph = BulletGraph::default().with_chart(revenue());
    let surface = render(&graph);
    let texts: Vec<_> = surface.texts().take(2).collect();

    assert_eq!(texts[0].0.text, "Revenue (275)");
    assert_eq!(texts[0].1, Some("text-anchor:end;font-weight:bold"));
    assert_eq!(texts[0].0.x, 250.0 - 18.0);
    assert_eq!(texts[0].0.y, 50.0 + 16.0);
    assert_eq!(texts[1].0.text, "USD(1000)");
    assert_eq!(texts[1].1, Some("text-anchor:end;font-size:75%"));
    assert_eq!(texts[1].0.y, 50.0 + 16.0 + 18.0);
}

#[test]
fn band_rectangles_follow_input_order() {
    let graph =
        BulletGraph::default().with_chart(ChartDefinition::new("Test", "0,60,2").with_bands("27,29"));
    let surface = render(&graph);
    let widths: Vec<f64> = surface.rects().map(|(rect, _)| rect.width).collect();
    assert_eq!(widths[1], map_value(27.0, 0.0, 60.0, 0.0, 724.0));
    assert_eq!(widths[2], map_value(29.0, 0.0, 60.0, 0.0, 724.0));

    let reversed = BulletGraph::default()
        .with_chart(ChartDefinition::new("Test", "0,60,2").with_bands("29,27"));
    let surface = render(&reversed);
    let widths: Vec<f64> = surface.rects().map(|(rect, _)| rect.width).collect();
    assert!(widths[1] > widths[2], "later bands paint over earlier ones");

    let band_group = surface
        .commands()
        .iter()
        .find_map(|command| match command {
            DrawCommand::GroupBegin { style } if style.starts_with("fill-opacity") => {
                Some(style.as_str())
            }
            _ => None,
        })
        .expect("band group");
    assert_eq!(band_group, "fill-opacity:0.5;fill:rgb(200,200,200)");
}

#[test]
fn marker_mode_switches_between_line_and_circle() {
    let chart = ChartDefinition::new("Test", "0,60,2")
        .with_bands("27,29")
        .with_comparative(27.5)
        .with_measure(28.5);

    let lines = render(&BulletGraph::default().with_chart(chart.clone()));
    assert_eq!(lines.lines().count(), 1);
    assert_eq!(lines.circles().count(), 0);

    let circles = render(
        &BulletGraph::new(RenderOptions::default().with_circle_marker(true)).with_chart(chart),
    );
    assert_eq!(circles.lines().count(), 0);
    let circle = circles.circles().next().expect("circle marker");
    assert_eq!(circle.cx, lines.lines().next().expect("line").x1);
    assert_eq!(circle.radius, 8.0);
    assert!(circles.commands().iter().any(|command| matches!(
        command,
        DrawCommand::Circle { style: Some(style), .. } if style == "fill-opacity:0.3;fill:black"
    )));
}

#[test]
fn malformed_rows_are_skipped_without_advancing() {
    let graph = BulletGraph::default()
        .with_chart(ChartDefinition::new("A", "0,10,1").with_bands("5"))
        .with_chart(ChartDefinition::new("Two", "0,10").with_bands("5"))
        .with_chart(ChartDefinition::new("Four", "0,10,1,2").with_bands("5"))
        .with_chart(ChartDefinition::new("B", "0,10,1").with_bands("5"));
    let mut surface = RecordingSurface::new();
    let report = graph.render(&mut surface).expect("render");

    assert_eq!(report.rendered_count(), 2);
    assert_eq!(
        report.outcomes[1].status,
        RecordStatus::Skipped {
            reason: SkipReason::ScaleArity { found: 2 }
        }
    );
    assert_eq!(
        report.outcomes[2].skip_reason(),
        Some(&SkipReason::ScaleArity { found: 4 })
    );
    assert!(surface.texts().all(|(text, _)| !text.text.starts_with("Two")));
    assert!(surface.texts().all(|(text, _)| !text.text.starts_with("Four")));
    assert_eq!(first_label_y(&surface, "B (") - first_label_y(&surface, "A ("), 78.0);
}

#[test]
fn only_skipped_rows_produce_nothing_but_the_title() {
    let graph = BulletGraph::default()
        .with_chart(ChartDefinition::new("Bad", "1,2").with_bands("1"))
        .with_chart(ChartDefinition::new("Flat", "5,5,1").with_bands("1"));
    let mut surface = RecordingSurface::new();
    let report = graph.render(&mut surface).expect("render");

    assert_eq!(surface.commands().len(), 1);
    assert_eq!(report.final_y, 50.0);
    assert_eq!(
        report.outcomes[1].skip_reason(),
        Some(&SkipReason::DegenerateScale { value: 5.0 })
    );
}

#[test]
fn rows_stack_by_bar_height_plus_gutter() {
    let options = RenderOptions::default().with_bar_geometry(30, 12);
    let mut graph = BulletGraph::new(options);
    for title in ["R0", "R1", "R2"] {
        graph.push_chart(ChartDefinition::new(title, "0,100,25").with_bands("60"));
    }
    let surface = render(&graph);
    let y0 = first_label_y(&surface, "R0");
    let y1 = first_label_y(&surface, "R1");
    let y2 = first_label_y(&surface, "R2");
    assert_eq!(y1 - y0, 42.0);
    assert_eq!(y2 - y1, 42.0);
}

#[test]
fn zero_left_margin_defaults_only_under_compat_policy() {
    let chart = ChartDefinition::new("M", "0,10,5").with_bands("5");

    let compat = RenderOptions::default()
        .with_left(0)
        .with_margin_policy(MarginPolicy::ZeroMeansDefault);
    let surface = render(&BulletGraph::new(compat).with_chart(chart.clone()));
    assert_eq!(surface.rects().next().expect("background").0.x, 250.0);

    let explicit = RenderOptions::default().with_left(10);
    let surface = render(&BulletGraph::new(explicit).with_chart(chart.clone()));
    assert_eq!(surface.rects().next().expect("background").0.x, 10.0);

    let unset = RenderOptions::default();
    let surface = render(&BulletGraph::new(unset).with_chart(chart));
    assert_eq!(surface.rects().next().expect("background").0.x, 250.0);
}

#[test]
fn trailing_title_and_notes_follow_last_row() {
    let options = RenderOptions::default().with_title("Quarterly", true);
    let graph = BulletGraph::new(options)
        .with_chart(revenue())
        .with_note("first note")
        .with_note("second note");
    let mut surface = RecordingSurface::new();
    let report = graph.render(&mut surface).expect("render");
    surface.finish().expect("balanced");

    let after_row = 50.0 + 78.0;
    let (title, title_style) = surface
        .texts()
        .find(|(text, _)| text.text == "Quarterly")
        .expect("trailing title");
    assert_eq!(title.x, 250.0);
    assert_eq!(title.y, after_row + 36.0);
    assert_eq!(title_style, Some("text-anchor:start;font-size:200%"));

    let first = first_label_y(&surface, "first note");
    let second = first_label_y(&surface, "second note");
    assert_eq!(first, after_row + 36.0 + 36.0);
    assert_eq!(second - first, 21.0);
    assert_eq!(report.final_y, second + 21.0);

    let last_commands = &surface.commands()[surface.commands().len() - 4..];
    assert_eq!(
        last_commands[0],
        DrawCommand::GroupBegin {
            style: "font-size:100%;text-anchor:start".to_owned()
        }
    );
    assert_eq!(last_commands[3], DrawCommand::GroupEnd);
}

#[test]
fn title_is_not_repeated_below_unless_requested() {
    let options = RenderOptions::default().with_title("Quarterly", false);
    let surface = render(&BulletGraph::new(options).with_chart(revenue()));
    assert_eq!(
        surface.commands()[0],
        DrawCommand::DocumentTitle {
            title: "Quarterly".to_owned()
        }
    );
    assert!(surface.texts().all(|(text, _)| text.text != "Quarterly"));
}

#[test]
fn fractional_increment_formats_one_decimal() {
    let graph = BulletGraph::default()
        .with_chart(ChartDefinition::new("F", "0,1,0.5").with_bands("0.5").with_measure(0.75));
    let surface = render(&graph);
    let labels: Vec<&str> = surface
        .texts()
        .map(|(text, _)| text.text.as_str())
        .collect();
    assert_eq!(labels, vec!["F (0.75)", "", "0.0", "0.5", "1.0"]);
}

#[test]
fn zero_geometry_and_blank_colors_render_with_defaults() {
    let mut options = RenderOptions::default()
        .with_bar_geometry(0, 0)
        .with_font_size(0)
        .with_colors("", "", "")
        .with_margin_policy(MarginPolicy::ZeroMeansDefault);
    options.background_color.clear();
    let graph = BulletGraph::new(options)
        .with_chart(revenue())
        .with_chart(revenue().with_subtitle("again"));
    let surface = render(&graph);

    let measure_bars: Vec<_> = surface
        .rects()
        .filter(|(_, style)| style.is_some())
        .collect();
    assert_eq!(measure_bars.len(), 2);
    assert_eq!(measure_bars[0].0.height, 16.0);
    assert_eq!(measure_bars[0].1, Some("fill:darkgray"));
    assert_eq!(measure_bars[1].0.y - measure_bars[0].0.y, 78.0);
    assert!(surface.commands().iter().any(|command| matches!(
        command,
        DrawCommand::Line { style: Some(style), .. } if style == "stroke-width:3;stroke:black"
    )));
}

#[test]
fn markup_document_with_zero_attributes_renders() {
    let json = r#"{
        "left": 0,
        "options": {"bar_height": 0, "font_size": 0, "gutter": 0},
        "bdata": [{"title": "Revenue", "scale": "0,300,50", "qmeasure": "150,225",
                   "cmeasure": 250, "measure": 275}]
    }"#;
    let graph = BulletGraphDocument::from_json_str(json)
        .expect("document")
        .into_bullet_graph();
    let (svg, report) = graph.render_svg_document().expect("zero values fall back");
    assert_eq!(report.rendered_count(), 1);
    assert_eq!(report.final_y, 50.0 + 78.0);
    assert!(svg.contains("font-size:18px"));
    assert!(svg.contains("<rect x=\"250\" y=\"50\" width=\"724\" height=\"48\" />"));
}

#[test]
fn margins_without_plot_area_fail_the_whole_call() {
    let graph = BulletGraph::new(RenderOptions::new(Viewport::new(300, 200))).with_chart(revenue());
    let mut surface = RecordingSurface::new();
    assert!(graph.render(&mut surface).is_err());
    assert!(surface.commands().is_empty());
}
