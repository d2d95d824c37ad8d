use scrolly_charts::charts::{BarChartConfig, LineChartConfig, RadialChartConfig};
use scrolly_charts::core::Viewport;
use scrolly_charts::render::SvgRenderer;
use scrolly_charts::{BarChart, LineChart, RadialChart, ScrollyChart, Step};
use std::fs;
use std::path::PathBuf;

const USAGE: &str = "usage: scrolly_render <bar|line|radial> --input <csv> --output <svg> [--step <anchor>]... [--width <px> --height <px>]";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChartKind {
    Bar,
    Line,
    Radial,
}

#[derive(Debug)]
struct CliArgs {
    chart: ChartKind,
    input: PathBuf,
    output: PathBuf,
    steps: Vec<Step>,
    width: Option<u32>,
    height: Option<u32>,
}

fn main() {
    let _ = scrolly_charts::telemetry::init_default_tracing();
    if let Err(err) = run() {
        tracing::error!(%err, "scrolly_render failed");
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args = parse_args()?;
    let mut chart = build_chart(&args).map_err(|e| e.to_string())?;

    for &step in &args.steps {
        let fired = chart.fire(step).map_err(|e| e.to_string())?;
        if !fired {
            eprintln!("warning: step `{step}` does not drive this chart");
        }
    }

    let mut renderer = SvgRenderer::new();
    chart.render(&mut renderer).map_err(|e| e.to_string())?;
    fs::write(&args.output, renderer.into_document())
        .map_err(|e| format!("failed to write `{}`: {e}", args.output.display()))?;
    println!(
        "wrote {} marks to {}",
        chart.scene().len(),
        args.output.display()
    );
    Ok(())
}

fn viewport_override(args: &CliArgs, default: Viewport) -> Viewport {
    Viewport::new(
        args.width.unwrap_or(default.width),
        args.height.unwrap_or(default.height),
    )
}

fn build_chart(args: &CliArgs) -> scrolly_charts::ChartResult<Box<dyn ScrollyChart>> {
    Ok(match args.chart {
        ChartKind::Bar => {
            let mut config = BarChartConfig::default();
            config.viewport = viewport_override(args, config.viewport);
            Box::new(BarChart::from_csv(&args.input, config)?)
        }
        ChartKind::Line => {
            let mut config = LineChartConfig::default();
            config.viewport = viewport_override(args, config.viewport);
            Box::new(LineChart::from_csv(&args.input, config)?)
        }
        ChartKind::Radial => {
            let mut config = RadialChartConfig::default();
            config.viewport = viewport_override(args, config.viewport);
            Box::new(RadialChart::from_csv(&args.input, config)?)
        }
    })
}

fn parse_dimension(flag: &str, value: Option<String>) -> Result<u32, String> {
    let value = value.ok_or_else(|| format!("missing value for {flag}"))?;
    value
        .parse::<u32>()
        .map_err(|_| format!("invalid value `{value}` for {flag}"))
}

fn parse_args() -> Result<CliArgs, String> {
    let mut args = std::env::args().skip(1);
    let chart = match args.next().as_deref() {
        Some("bar") => ChartKind::Bar,
        Some("line") => ChartKind::Line,
        Some("radial") => ChartKind::Radial,
        _ => return Err(USAGE.to_owned()),
    };

    let mut input = None::<PathBuf>;
    let mut output = None::<PathBuf>;
    let mut steps = Vec::new();
    let mut width = None;
    let mut height = None;

    while let Some(flag) = args.next() {
        match flag.as_str() {
            "--input" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --input".to_owned())?;
                input = Some(PathBuf::from(value));
            }
            "--output" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --output".to_owned())?;
                output = Some(PathBuf::from(value));
            }
            "--step" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --step".to_owned())?;
                let step =
                    Step::from_anchor(&value).ok_or_else(|| format!("unknown step `{value}`"))?;
                steps.push(step);
            }
            "--width" => width = Some(parse_dimension("--width", args.next())?),
            "--height" => height = Some(parse_dimension("--height", args.next())?),
            "--help" | "-h" => return Err(USAGE.to_owned()),
            _ => return Err(format!("unknown argument `{flag}`")),
        }
    }

    let input = input.ok_or_else(|| "missing --input".to_owned())?;
    let output = output.ok_or_else(|| "missing --output".to_owned())?;
    Ok(CliArgs {
        chart,
        input,
        output,
        steps,
        width,
        height,
    })
}
