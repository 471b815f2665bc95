use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use std::io::{Read, Write};
use std::path::PathBuf;

use quickpic::{Canvas, Input, OversizePolicy, PngCompression, Session, Tool, ToolConfig};

const STDIN_NAME: &str = "pasted-image.png";

#[derive(Parser)]
#[command(name = "quickpic-cli")]
#[command(
    about = "Center an image on a transparent splash screen sized canvas",
    long_about = None
)]
#[command(version)]
struct Args {
    /// Input image (jpg, png, webp, svg, ...), or `-` to read from stdin
    #[arg(value_name = "INPUT")]
    input: String,

    /// Name to use for the download instead of the input file name
    #[arg(long, value_name = "NAME")]
    name: Option<String>,

    /// Output directory
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    output_dir: PathBuf,

    /// Canvas preset
    #[arg(short, long, value_enum)]
    tool: Option<ToolArg>,

    /// Custom canvas width (requires --tool custom)
    #[arg(long, value_name = "PIXELS")]
    width: Option<u32>,

    /// Custom canvas height (requires --tool custom)
    #[arg(long, value_name = "PIXELS")]
    height: Option<u32>,

    /// What to do with images larger than the canvas
    #[arg(long, value_enum)]
    oversize: Option<OversizeArg>,

    /// PNG compression level
    #[arg(long, value_enum)]
    png_compression: Option<PngCompressionArg>,

    /// Print a data URL to stdout instead of writing a file
    #[arg(long, default_value_t)]
    data_url: bool,

    /// Only print the original and canvas dimensions
    #[arg(long, default_value_t)]
    info: bool,

    /// Remember the canvas, oversize and compression settings
    #[arg(long, default_value_t)]
    save_config: bool,

    /// Verbose output
    #[arg(short, long, default_value_t)]
    verbose: bool,

    /// Quiet mode (minimal output)
    #[arg(short, long, default_value_t)]
    quiet: bool,
}

impl Args {
    fn parse_canvas(&self, tool: ToolArg) -> Result<Canvas> {
        match tool {
            ToolArg::Splash => Ok(Tool::Splash.into()),
            ToolArg::Square => Ok(Tool::Square.into()),
            ToolArg::Custom => {
                let w = self
                    .width
                    .context("--width is required when using --tool custom")?;
                let h = self
                    .height
                    .context("--height is required when using --tool custom")?;
                Canvas::custom(w, h).map_err(Into::into)
            }
        }
    }

    fn input(&self) -> Result<Input> {
        if self.input == "-" {
            let mut data = Vec::new();
            std::io::stdin()
                .read_to_end(&mut data)
                .context("Failed to read image from stdin")?;
            let name = self.name.clone().unwrap_or_else(|| STDIN_NAME.to_string());
            return Ok(Input::Bytes { name, data });
        }

        let path = PathBuf::from(&self.input);
        if !path.exists() {
            anyhow::bail!("Input file does not exist: {}", path.display());
        }

        match &self.name {
            Some(name) => {
                let data = std::fs::read(&path)
                    .with_context(|| format!("Failed to read {}", path.display()))?;
                Ok(Input::Bytes {
                    name: name.clone(),
                    data,
                })
            }
            None => Ok(Input::Path(path)),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
enum ToolArg {
    Splash,
    Square,
    Custom,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
enum OversizeArg {
    Crop,
    Reject,
    Fit,
}

impl From<OversizeArg> for OversizePolicy {
    fn from(arg: OversizeArg) -> Self {
        match arg {
            OversizeArg::Crop => OversizePolicy::Crop,
            OversizeArg::Reject => OversizePolicy::Reject,
            OversizeArg::Fit => OversizePolicy::Fit,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
enum PngCompressionArg {
    Fast,
    Default,
    Best,
}

impl From<PngCompressionArg> for PngCompression {
    fn from(arg: PngCompressionArg) -> Self {
        match arg {
            PngCompressionArg::Fast => PngCompression::Fast,
            PngCompressionArg::Default => PngCompression::Default,
            PngCompressionArg::Best => PngCompression::Best,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    setup_logging(args.verbose, args.quiet);

    let config = build_config(&args, ToolConfig::load())?;
    if args.save_config {
        match config.save() {
            Ok(path) => log::info!("Saved settings to {}", path.display()),
            Err(e) => log::warn!("Could not save settings: {e}"),
        }
    }

    let source = args
        .input()?
        .load()
        .with_context(|| format!("Failed to load `{}`", args.input))?;

    if args.info {
        let (cw, ch) = config.canvas_dimensions();
        println!("{}", source.original_name());
        println!("Original: {} × {}", source.width(), source.height());
        println!("{}: {cw} × {ch}", config.canvas.name());
        return Ok(());
    }

    let mut session = Session::new(config);
    session.load(source);

    if args.data_url {
        let artifact = session.render().context("Failed to compose image")?;
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{}", artifact.data_url()).context("Failed to write data URL")?;
        return Ok(());
    }

    let output_path = session
        .save(&args.output_dir)
        .context("Failed to save image")?;

    if !args.quiet {
        log::info!("Done: {}", output_path.display());
    }

    Ok(())
}

fn setup_logging(verbose: bool, quiet: bool) {
    if quiet {
        return;
    }

    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::from_default_env()
        .filter_level(level)
        .format_timestamp(None)
        .format_target(false)
        .init();
}

/// Saved settings, overridden by whatever flags were given
fn build_config(args: &Args, saved: Option<ToolConfig>) -> Result<ToolConfig> {
    let mut config = saved.unwrap_or_default();

    if let Some(tool) = args.tool {
        config.canvas = args.parse_canvas(tool)?;
    } else if args.width.is_some() || args.height.is_some() {
        log::warn!("--width/--height are ignored without --tool custom");
    }

    if let Some(oversize) = args.oversize {
        config.oversize = oversize.into();
    }

    if let Some(compression) = args.png_compression {
        config.png_compression = compression.into();
    }

    Ok(config)
}
