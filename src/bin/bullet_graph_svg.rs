use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use bullet_graph::api::BulletGraphDocument;
use bullet_graph::telemetry::init_default_tracing;
use tracing::{info, warn};

const USAGE: &str = "usage: bullet_graph_svg [--input <path|->] [--output <path|->] [--report <path>] [--circle-marker] [--show-title]";

#[derive(Debug)]
struct CliArgs {
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    report: Option<PathBuf>,
    circle_marker: bool,
    show_title: bool,
}

fn main() {
    let _ = init_default_tracing();
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args = parse_args()?;

    let raw = match &args.input {
        Some(path) if path.as_os_str() != "-" => fs::read_to_string(path)
            .map_err(|err| format!("failed to read `{}`: {err}", path.display()))?,
        _ => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|err| format!("failed to read stdin: {err}"))?;
            buffer
        }
    };

    let mut graph = BulletGraphDocument::from_json_str(&raw)
        .map_err(|err| err.to_string())?
        .into_bullet_graph();
    if args.circle_marker {
        graph.options.use_circle_marker = true;
    }
    if args.show_title {
        graph.options.show_title_below = true;
    }

    let (svg, report) = graph.render_svg_document().map_err(|err| err.to_string())?;
    for outcome in report.skipped() {
        if let Some(reason) = outcome.skip_reason() {
            warn!(index = outcome.index, title = %outcome.title, %reason, "row skipped");
        }
    }
    info!(
        rendered = report.rendered_count(),
        total = report.outcomes.len(),
        "bullet graphs rendered"
    );

    match &args.output {
        Some(path) if path.as_os_str() != "-" => fs::write(path, svg.as_bytes())
            .map_err(|err| format!("failed to write `{}`: {err}", path.display()))?,
        _ => io::stdout()
            .write_all(svg.as_bytes())
            .map_err(|err| format!("failed to write stdout: {err}"))?,
    }

    if let Some(path) = &args.report {
        let json = report
            .to_json_contract_v1_pretty()
            .map_err(|err| err.to_string())?;
        fs::write(path, json)
            .map_err(|err| format!("failed to write `{}`: {err}", path.display()))?;
    }
    Ok(())
}

fn parse_args() -> Result<CliArgs, String> {
    let mut args = std::env::args().skip(1);
    let mut parsed = CliArgs {
        input: None,
        output: None,
        report: None,
        circle_marker: false,
        show_title: false,
    };

    while let Some(flag) = args.next() {
        match flag.as_str() {
            "--input" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --input".to_owned())?;
                parsed.input = Some(PathBuf::from(value));
            }
            "--output" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --output".to_owned())?;
                parsed.output = Some(PathBuf::from(value));
            }
            "--report" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --report".to_owned())?;
                parsed.report = Some(PathBuf::from(value));
            }
            "--circle-marker" => parsed.circle_marker = true,
            "--show-title" => parsed.show_title = true,
            "--help" | "-h" => return Err(USAGE.to_owned()),
            other => return Err(format!("unknown argument `{other}`\n{USAGE}")),
        }
    }

    Ok(parsed)
}
