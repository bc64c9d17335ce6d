use geosvg::raster::{RasterError, RasterOptions};
use geosvg::{DrawOptions, GeoJson, Identity, Mercator, Padding, Projection, Svg};
use std::io::Read;
use std::str::FromStr;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    GeoJson(geosvg::Error),
    Config(serde_json::Error),
    Raster(RasterError),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::GeoJson(err) => write!(f, "{err}"),
            CliError::Config(err) => write!(f, "config error: {err}"),
            CliError::Raster(err) => write!(f, "{err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<geosvg::Error> for CliError {
    fn from(value: geosvg::Error) -> Self {
        Self::GeoJson(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Config(value)
    }
}

impl From<RasterError> for CliError {
    fn from(value: RasterError) -> Self {
        Self::Raster(value)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
enum OutputFormat {
    #[default]
    Svg,
    Png,
}

impl FromStr for OutputFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "svg" => Ok(Self::Svg),
            "png" => Ok(Self::Png),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
enum HeightMode {
    #[default]
    Default,
    Fixed(f64),
    Auto,
}

#[derive(Debug, Default)]
struct Args {
    input: Option<String>,
    width: f64,
    height: HeightMode,
    padding: Option<Padding>,
    mercator: bool,
    use_properties: Option<Vec<String>>,
    attributes: Vec<(String, String)>,
    format: OutputFormat,
    scale: f32,
    background: Option<String>,
    config: Option<String>,
    out: Option<String>,
    verbose: bool,
}

const DEFAULT_SIZE: f64 = 400.0;

fn usage() -> &'static str {
    "geosvg-cli\n\
\n\
USAGE:\n\
  geosvg-cli [--width <w>] [--height <h>|--auto-height] [--padding <t,r,b,l>] [--mercator] [--use-properties <a,b,...>] [--attr <key=value>]... [--format svg|png] [--scale <n>] [--background <color>] [--config <file.json>] [--out <path>] [--verbose] [<path>|-]\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', input is read from stdin.\n\
  - Input may be any GeoJSON geometry, Feature or FeatureCollection.\n\
  - Width and height default to 400. --auto-height keeps the drawing's aspect ratio.\n\
  - --padding takes one value for all sides or four values (top,right,bottom,left).\n\
  - --config loads padding, root attributes and properties from JSON; flags override it.\n\
  - SVG is printed to stdout by default; use --out to write a file.\n\
  - PNG output defaults to writing next to the input file (or ./out.png for stdin).\n\
  - Logging goes to stderr and follows RUST_LOG (default: warn, --verbose: debug).\n\
"
}

fn parse_positive(text: &str) -> Result<f64, CliError> {
    let v = text.parse::<f64>().map_err(|_| CliError::Usage(usage()))?;
    if !(v.is_finite() && v > 0.0) {
        return Err(CliError::Usage(usage()));
    }
    Ok(v)
}

fn parse_padding(text: &str) -> Result<Padding, CliError> {
    let values = text
        .split(',')
        .map(|s| s.trim().parse::<f64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| CliError::Usage(usage()))?;
    match values.as_slice() {
        [all] => Ok(Padding::uniform(*all)),
        [top, right, bottom, left] => Ok(Padding::new(*top, *right, *bottom, *left)),
        _ => Err(CliError::Usage(usage())),
    }
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args {
        width: DEFAULT_SIZE,
        scale: 1.0,
        ..Default::default()
    };

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "--verbose" | "-v" => args.verbose = true,
            "--mercator" => args.mercator = true,
            "--auto-height" => args.height = HeightMode::Auto,
            "--width" => {
                let Some(w) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.width = parse_positive(w)?;
            }
            "--height" => {
                let Some(h) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.height = HeightMode::Fixed(parse_positive(h)?);
            }
            "--padding" => {
                let Some(p) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.padding = Some(parse_padding(p)?);
            }
            "--use-properties" => {
                let Some(keys) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.use_properties = Some(
                    keys.split(',')
                        .map(str::trim)
                        .filter(|k| !k.is_empty())
                        .map(str::to_string)
                        .collect(),
                );
            }
            "--attr" => {
                let Some(pair) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                let Some((k, v)) = pair.split_once('=') else {
                    return Err(CliError::Usage(usage()));
                };
                if k.trim().is_empty() {
                    return Err(CliError::Usage(usage()));
                }
                args.attributes.push((k.trim().to_string(), v.to_string()));
            }
            "--format" => {
                let Some(fmt) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.format = fmt
                    .parse::<OutputFormat>()
                    .map_err(|_| CliError::Usage(usage()))?;
            }
            "--scale" => {
                let Some(scale) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.scale = scale.parse::<f32>().map_err(|_| CliError::Usage(usage()))?;
                if !(args.scale.is_finite() && args.scale > 0.0) {
                    return Err(CliError::Usage(usage()));
                }
            }
            "--background" => {
                let Some(bg) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                if !bg.trim().is_empty() {
                    args.background = Some(bg.trim().to_string());
                }
            }
            "--config" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.config = Some(path.clone());
            }
            "--out" => {
                let Some(out) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.out = Some(out.clone());
            }
            "--" => {
                if let Some(rest) = it.next() {
                    if args.input.is_some() {
                        return Err(CliError::Usage(usage()));
                    }
                    args.input = Some(rest.clone());
                }
                if it.next().is_some() {
                    return Err(CliError::Usage(usage()));
                }
            }
            "-" => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some("-".to_string());
            }
            other if other.starts_with('-') => return Err(CliError::Usage(usage())),
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    Ok(args)
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let fmt = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt)
        .try_init();
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn write_text(text: &str, out: Option<&str>) -> Result<(), CliError> {
    match out {
        None => {
            print!("{text}");
            Ok(())
        }
        Some(path) => {
            std::fs::write(path, text)?;
            Ok(())
        }
    }
}

fn default_raster_out_path(input: Option<&str>, ext: &str) -> std::path::PathBuf {
    match input {
        Some(path) if path != "-" => std::path::PathBuf::from(path).with_extension(ext),
        _ => std::path::PathBuf::from(format!("out.{ext}")),
    }
}

fn build_svg(args: &Args, text: &str) -> Result<Svg, CliError> {
    let mut svg = Svg::new();

    if let Some(path) = &args.config {
        let options = DrawOptions::from_json_str(&std::fs::read_to_string(path)?)?;
        tracing::debug!(path = %path, ?options, "loaded draw options");
        svg.apply_options(&options);
    }
    if let Some(padding) = args.padding {
        svg = svg.with_padding(padding);
    }
    if let Some(keys) = &args.use_properties {
        svg = svg.use_properties(keys.iter().cloned());
    }
    svg = svg.with_attributes(args.attributes.iter().cloned());

    match geosvg::parse_any(text)? {
        GeoJson::Geometry(g) => svg.append_geometry(g),
        GeoJson::Feature(f) => svg.append_feature(f),
        GeoJson::FeatureCollection(fc) => svg.append_feature_collection(fc),
    }
    Ok(svg)
}

fn run(args: Args) -> Result<(), CliError> {
    let text = read_input(args.input.as_deref())?;
    let svg = build_svg(&args, &text)?;

    let projection: &dyn Projection = if args.mercator { &Mercator } else { &Identity };
    let width = args.width;
    let height = match args.height {
        HeightMode::Default => DEFAULT_SIZE,
        HeightMode::Fixed(h) => h,
        HeightMode::Auto => svg.height_for_width(width, projection).unwrap_or_else(|| {
            tracing::warn!("aspect ratio undefined for this drawing; using the width as height");
            width
        }),
    };
    tracing::debug!(width, height, format = ?args.format, "drawing");

    let document = svg.draw_with_projection(width, height, projection);
    match args.format {
        OutputFormat::Svg => write_text(&document, args.out.as_deref()),
        OutputFormat::Png => {
            let options = RasterOptions {
                scale: args.scale,
                background: args.background.clone(),
            };
            let bytes = geosvg::raster::svg_to_png(&document, &options)?;
            let out = match args.out.as_deref() {
                Some(path) => std::path::PathBuf::from(path),
                None => default_raster_out_path(args.input.as_deref(), "png"),
            };
            std::fs::write(&out, bytes)?;
            tracing::debug!(path = %out.display(), "wrote png");
            Ok(())
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
    init_tracing(args.verbose);

    if let Err(err) = run(args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
