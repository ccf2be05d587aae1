use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context as _;
use clap::{Parser, ValueEnum};
use console::style;
use footlights::{
    Engine, OutputFormat, ReferencePolicy, RenderOptions, Renderer, StyleSheet,
};

mod assets;
mod logging;
mod raster;

#[derive(Parser, Debug)]
#[command(
    name = "footlights",
    version,
    about = "Render a stylesheet of named styles to SVG or CSS"
)]
struct Cli {
    /// Stylesheet to render. JSON when the extension is `.json`, YAML otherwise.
    #[arg(long, short = 'c', value_name = "FILE")]
    config: PathBuf,

    /// Output file. Writes to stdout when absent.
    #[arg(long, short = 'o', value_name = "FILE")]
    output: Option<PathBuf>,

    /// Output format. Defaults to the output file's extension, then svg.
    /// `png` rasterizes the svg output.
    #[arg(long, value_enum)]
    format: Option<FormatArg>,

    /// Canvas width in pixels, overriding the stylesheet.
    #[arg(long)]
    width: Option<u32>,

    /// Canvas height in pixels, overriding the stylesheet.
    #[arg(long)]
    height: Option<u32>,

    /// Omit images that cannot be resolved instead of failing.
    #[arg(long)]
    permissive: bool,

    /// Bind an image handle to an output token. Once any binding is given,
    /// unbound handles no longer resolve.
    #[arg(long = "asset", value_name = "HANDLE=TOKEN", value_parser = assets::parse_asset)]
    assets: Vec<(String, String)>,

    /// Read image bytes from stdin and bind them to HANDLE as a PNG data URI.
    #[arg(long, value_name = "HANDLE")]
    stdin_image: Option<String>,

    /// Increase log output (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum FormatArg {
    Svg,
    Css,
    Png,
}

impl FormatArg {
    fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        if ext.eq_ignore_ascii_case("png") {
            return Some(FormatArg::Png);
        }
        match OutputFormat::from_extension(ext)? {
            OutputFormat::Svg => Some(FormatArg::Svg),
            OutputFormat::Css => Some(FormatArg::Css),
        }
    }

    /// The text format the engine renders. PNG is rasterized from SVG.
    fn render_format(self) -> OutputFormat {
        match self {
            FormatArg::Svg | FormatArg::Png => OutputFormat::Svg,
            FormatArg::Css => OutputFormat::Css,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {:#}", style("error:").red().bold(), err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let sheet = read_sheet(&cli.config)?;

    let format = cli
        .format
        .or_else(|| cli.output.as_deref().and_then(FormatArg::from_path))
        .unwrap_or(FormatArg::Svg);
    let policy = if cli.permissive {
        ReferencePolicy::Permissive
    } else {
        ReferencePolicy::Strict
    };
    let options = RenderOptions::new()
        .format(format.render_format())
        .policy(policy);

    let renderer = if cli.assets.is_empty() && cli.stdin_image.is_none() {
        Renderer::new(options)
    } else {
        let assets =
            assets::build_asset_map(&cli.assets, cli.stdin_image.as_deref(), std::io::stdin())?;
        Renderer::new(options).with_resolver(assets)
    };

    let mut engine = Engine::with_renderer(renderer);
    let count = engine
        .load_sheet(sheet)
        .with_context(|| format!("invalid stylesheet '{}'", cli.config.display()))?;
    log::debug!("loaded {} style(s) from '{}'", count, cli.config.display());

    if cli.width.is_some() || cli.height.is_some() {
        let mut options = *engine.renderer().options();
        options.canvas.width = cli.width.unwrap_or(options.canvas.width);
        options.canvas.height = cli.height.unwrap_or(options.canvas.height);
        engine.renderer_mut().set_options(options);
    }

    let rendered = engine.render().context("render failed")?;
    let bytes = match format {
        FormatArg::Png => raster::svg_to_png(&rendered).context("rasterize failed")?,
        FormatArg::Svg | FormatArg::Css => rendered.into_bytes(),
    };

    match &cli.output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            std::fs::write(path, &bytes)
                .with_context(|| format!("write output '{}'", path.display()))?;
            eprintln!("wrote {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&bytes).context("write stdout")?;
            if format != FormatArg::Png {
                stdout.write_all(b"\n").context("write stdout")?;
            }
            stdout.flush().context("write stdout")?;
        }
    }
    Ok(())
}

fn read_sheet(path: &Path) -> anyhow::Result<StyleSheet> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read stylesheet '{}'", path.display()))?;
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let sheet = if is_json {
        StyleSheet::from_json(&text)
    } else {
        StyleSheet::from_yaml(&text)
    };
    sheet.with_context(|| format!("parse stylesheet '{}'", path.display()))
}
