use futures::executor::block_on;
use std::path::{Path, PathBuf};
use tramline_core::{DatasetPaths, NormalizedModel, load_dataset, normalize};
use tramline_render::{layout_route_chart, render_svg};

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Data(tramline_core::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Data(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<tramline_core::Error> for CliError {
    fn from(value: tramline_core::Error) -> Self {
        Self::Data(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    Normalize,
    #[default]
    Render,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    data: Option<PathBuf>,
    pretty: bool,
    height: f64,
    width: Option<f64>,
    viewport_width: Option<f64>,
    out: Option<String>,
}

fn usage() -> &'static str {
    "tramline-cli\n\
\n\
USAGE:\n\
  tramline-cli normalize --data <dir> [--pretty]\n\
  tramline-cli [render] --data <dir> [--height <px>] [--width <px>] [--viewport-width <px>] [--out <path>]\n\
\n\
NOTES:\n\
  - <dir> must contain roads.json, stops.json, years.json, annotations.json.\n\
  - normalize prints the normalized model as JSON.\n\
  - render prints SVG to stdout by default; use --out to write a file.\n\
  - --width defaults to 1.3 x --height (the chart's aspect rule).\n\
  - with --viewport-width, a notice is printed to stderr when the drawing\n\
    is wider than the viewport.\n\
"
}

fn parse_f64(value: Option<&String>) -> Result<f64, CliError> {
    let Some(raw) = value else {
        return Err(CliError::Usage(usage()));
    };
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => Ok(v),
        _ => Err(CliError::Usage(usage())),
    }
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args {
        height: 800.0,
        ..Default::default()
    };

    let mut it = argv.iter().skip(1).peekable();
    if let Some(first) = it.peek() {
        match first.as_str() {
            "normalize" => {
                args.command = Command::Normalize;
                it.next();
            }
            "render" => {
                args.command = Command::Render;
                it.next();
            }
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            _ => {}
        }
    }

    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--data" => args.data = Some(PathBuf::from(it.next().ok_or(CliError::Usage(usage()))?)),
            "--pretty" => args.pretty = true,
            "--height" => args.height = parse_f64(it.next())?,
            "--width" => args.width = Some(parse_f64(it.next())?),
            "--viewport-width" => args.viewport_width = Some(parse_f64(it.next())?),
            "--out" => args.out = Some(it.next().ok_or(CliError::Usage(usage()))?.clone()),
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            _ => return Err(CliError::Usage(usage())),
        }
    }

    if args.data.is_none() {
        return Err(CliError::Usage(usage()));
    }
    Ok(args)
}

fn load_model(data_dir: &Path) -> Result<NormalizedModel, CliError> {
    let paths = DatasetPaths::from_dir(data_dir);
    let raw = block_on(load_dataset(&paths))?;
    Ok(normalize(&raw)?)
}

fn write_out(out: Option<&str>, content: &str) -> Result<(), CliError> {
    match out {
        None | Some("-") => {
            use std::io::Write;
            std::io::stdout().lock().write_all(content.as_bytes())?;
            Ok(())
        }
        Some(path) => Ok(std::fs::write(path, content)?),
    }
}

fn run(args: Args) -> Result<(), CliError> {
    let Some(data_dir) = args.data.as_ref() else {
        return Err(CliError::Usage(usage()));
    };
    let model = load_model(data_dir)?;

    match args.command {
        Command::Normalize => {
            let json = if args.pretty {
                serde_json::to_string_pretty(&model)?
            } else {
                serde_json::to_string(&model)?
            };
            write_out(args.out.as_deref(), &format!("{json}\n"))
        }
        Command::Render => {
            let height = args.height;
            let width = args.width.unwrap_or(1.3 * height);
            let layout = layout_route_chart(&model, width, height);
            if let Some(viewport_width) = args.viewport_width {
                if layout.exceeds_viewport(viewport_width) {
                    eprintln!(
                        "notice: drawing is {width}px wide, wider than the {viewport_width}px viewport"
                    );
                }
            }
            write_out(args.out.as_deref(), &render_svg(&layout))
        }
    }
}

fn main() {
    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    match run(args) {
        Ok(()) => {}
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}
