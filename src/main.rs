use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use glyph_dither::{
    parse_hex_list, CharacterSet, DitherAlgorithm, DitherResult, DitherSettings, PaletteMode,
    PresetName, Rgb, PRESETS,
};
use inkglyph::assets::AssetLoader;
use inkglyph::models::AppConfig;
use inkglyph::rendering::{to_json, to_text, CanvasRenderer, CanvasStyle};
use inkglyph::services::{load_png, DitherRequest, DitherWorker, FileWatcher, LatestRequest, RenderService};

#[derive(Parser)]
#[command(name = "inkglyph")]
#[command(about = "Dither images into colored glyph art")]
struct Cli {
    /// Config file (falls back to CONFIG_FILE, then the embedded default)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory with extra .ttf/.otf fonts (falls back to FONTS_DIR)
    #[arg(long, global = true)]
    fonts_dir: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Dither a PNG image to text, PNG or JSON
    Render {
        /// Input PNG image
        input: PathBuf,

        /// Output file (stdout for text when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format (default: from the output extension, else text)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        #[command(flatten)]
        settings: SettingsArgs,
    },
    /// Re-render whenever the input image or config file changes
    Watch {
        /// Input PNG image
        input: PathBuf,

        /// Output file
        #[arg(short, long)]
        output: PathBuf,

        /// Output format (default: from the output extension, else text)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        #[command(flatten)]
        settings: SettingsArgs,
    },
    /// List presets, algorithms, character sets and palette modes
    List {
        /// Also list available font families
        #[arg(long)]
        fonts: bool,
    },
    /// Extract the embedded config.yaml for customization
    Init {
        /// Overwrite an existing file
        #[arg(long, short)]
        force: bool,

        /// List embedded assets without extracting
        #[arg(long)]
        list: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Png,
    Json,
}

impl OutputFormat {
    fn resolve(explicit: Option<Self>, output: Option<&Path>) -> Self {
        if let Some(format) = explicit {
            return format;
        }
        match output
            .and_then(|p| p.extension())
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("png") => OutputFormat::Png,
            Some("json") => OutputFormat::Json,
            _ => OutputFormat::Text,
        }
    }
}

/// Per-run overrides on top of config.yaml
#[derive(Args, Debug, Clone, Default)]
struct SettingsArgs {
    /// Preset: terminal-green, amber-crt, teletext, 1-bit-mac, zx-spectrum (or "none")
    #[arg(short, long)]
    preset: Option<String>,

    /// Algorithm: floyd-steinberg, atkinson, sierra, bayer
    #[arg(short, long)]
    algorithm: Option<String>,

    /// Character set: dense-to-sparse, box-drawing, braille
    #[arg(short = 'c', long)]
    charset: Option<String>,

    /// Palette mode: 1-bit, 2-bit, 4-bit, custom
    #[arg(short = 'm', long)]
    palette_mode: Option<String>,

    /// Custom palette as comma-separated hex colors (implies --palette-mode custom)
    #[arg(long)]
    palette: Option<String>,

    /// Glyph columns (1-200)
    #[arg(short, long)]
    density: Option<usize>,

    /// Glyph width / height (0.3-1.0)
    #[arg(long)]
    aspect_ratio: Option<f32>,

    /// Canvas glyph size in pixels (4-16)
    #[arg(long)]
    font_size: Option<f32>,

    /// Canvas font family
    #[arg(long)]
    font_family: Option<String>,

    /// Map bright cells to dense glyphs
    #[arg(short, long)]
    invert: bool,

    /// Canvas background color (hex)
    #[arg(long)]
    background: Option<String>,

    /// Canvas glyph color (hex); default is per-glyph palette colors
    #[arg(long)]
    foreground: Option<String>,

    /// Skip oxipng re-compression of PNG output
    #[arg(long)]
    no_optimize: bool,
}

impl SettingsArgs {
    /// Apply overrides. A preset is selected first so that individual
    /// flags given alongside it take effect (and clear it).
    fn apply(&self, base: DitherSettings) -> anyhow::Result<DitherSettings> {
        let mut s = base;

        if let Some(ref name) = self.preset {
            if name.eq_ignore_ascii_case("none") {
                s = s.with_preset(None);
            } else {
                let preset = PresetName::from_name(name)
                    .with_context(|| format!("Unknown preset '{name}' (see `inkglyph list`)"))?;
                s = s.with_preset(Some(preset));
            }
        }
        if let Some(ref name) = self.algorithm {
            s = s.with_algorithm(DitherAlgorithm::from_name(name));
        }
        if let Some(ref name) = self.charset {
            s = s.with_character_set(CharacterSet::from_name(name));
        }
        if let Some(ref name) = self.palette_mode {
            let Some(mode) = PaletteMode::from_name(name) else {
                bail!("Unknown palette mode '{name}' (expected 1-bit, 2-bit, 4-bit or custom)");
            };
            s = s.with_palette_mode(mode);
        }
        if let Some(ref colors) = self.palette {
            let colors: Vec<&str> = colors
                .split(',')
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .collect();
            s = s
                .with_custom_palette(parse_hex_list(&colors)?)
                .with_palette_mode(PaletteMode::Custom);
        }
        if let Some(density) = self.density {
            s = s.with_density(density);
        }
        if let Some(aspect_ratio) = self.aspect_ratio {
            s = s.with_aspect_ratio(aspect_ratio);
        }
        if let Some(font_size) = self.font_size {
            s = s.with_font_size(font_size);
        }
        if let Some(ref family) = self.font_family {
            s = s.with_font_family(family.clone());
        }
        if self.invert {
            s = s.with_invert(true);
        }
        Ok(s)
    }
}

/// Everything a render needs, resolved from config and flags
struct RunContext {
    settings: DitherSettings,
    style: CanvasStyle,
    optimize_png: bool,
}

impl RunContext {
    fn resolve(config: &AppConfig, args: &SettingsArgs) -> anyhow::Result<Self> {
        let settings = args.apply(config.defaults.to_settings()?)?;

        let background = match args.background {
            Some(ref hex) => Some(parse_color(hex, "--background")?),
            None => config.render.background()?,
        };
        let foreground = match args.foreground {
            Some(ref hex) => Some(parse_color(hex, "--foreground")?),
            None => config.render.foreground()?,
        };

        Ok(Self {
            style: CanvasStyle::for_settings(&settings, background, foreground),
            settings,
            optimize_png: config.render.optimize_png && !args.no_optimize,
        })
    }
}

fn parse_color(hex: &str, flag: &str) -> anyhow::Result<Rgb> {
    hex.parse::<Rgb>()
        .with_context(|| format!("Invalid color for {flag}: '{hex}'"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config_file = cli
        .config
        .clone()
        .or_else(|| std::env::var("CONFIG_FILE").ok().map(PathBuf::from));
    let fonts_dir = cli
        .fonts_dir
        .clone()
        .or_else(|| std::env::var("FONTS_DIR").ok().map(PathBuf::from));
    let loader = AssetLoader::new(fonts_dir, config_file);

    match cli.command {
        Some(Commands::Render {
            input,
            output,
            format,
            settings,
        }) => run_render_command(&loader, &input, output.as_deref(), format, &settings),
        Some(Commands::Watch {
            input,
            output,
            format,
            settings,
        }) => run_watch_command(&loader, input, output, format, settings).await,
        Some(Commands::List { fonts }) => {
            run_list_command(&loader, fonts);
            Ok(())
        }
        Some(Commands::Init { force, list }) => run_init_command(&loader, force, list),
        None => {
            run_status_command(&loader);
            Ok(())
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "inkglyph=debug" } else { "inkglyph=warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();
}

/// Encode `result` in the requested format
fn encode_output(
    result: &DitherResult,
    format: OutputFormat,
    ctx: &RunContext,
    renderer: Option<&RenderService>,
) -> anyhow::Result<Vec<u8>> {
    Ok(match format {
        OutputFormat::Text => {
            let mut text = to_text(result);
            text.push('\n');
            text.into_bytes()
        }
        OutputFormat::Json => to_json(result)?.into_bytes(),
        OutputFormat::Png => {
            let renderer = renderer.context("PNG output needs a renderer")?;
            renderer.render_png(result, &ctx.style)?
        }
    })
}

fn make_renderer(loader: &AssetLoader, format: OutputFormat, optimize: bool) -> Option<RenderService> {
    (format == OutputFormat::Png)
        .then(|| RenderService::new(CanvasRenderer::with_fonts(loader.get_fonts()), optimize))
}

/// Render an image once
fn run_render_command(
    loader: &AssetLoader,
    input: &Path,
    output: Option<&Path>,
    format: Option<OutputFormat>,
    args: &SettingsArgs,
) -> anyhow::Result<()> {
    let config = AppConfig::load_from_assets(loader);
    let ctx = RunContext::resolve(&config, args)?;
    let format = OutputFormat::resolve(format, output);

    if format == OutputFormat::Png && output.is_none() {
        bail!("PNG output needs --output");
    }

    let image = load_png(input).with_context(|| format!("Failed to load {}", input.display()))?;
    let result = glyph_dither::process_image(&image, &ctx.settings)?;
    tracing::info!(
        cols = result.cols(),
        rows = result.rows(),
        elapsed_ms = result.elapsed().as_secs_f64() * 1000.0,
        "Dithered image"
    );

    let renderer = make_renderer(loader, format, ctx.optimize_png);
    let bytes = encode_output(&result, format, &ctx, renderer.as_ref())?;

    match output {
        Some(path) => {
            std::fs::write(path, &bytes)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Wrote {} ({} bytes)", path.display(), bytes.len());
        }
        None => {
            use std::io::Write;
            std::io::stdout().write_all(&bytes)?;
        }
    }

    Ok(())
}

/// Watch the input (and config) and re-render on change
async fn run_watch_command(
    loader: &AssetLoader,
    input: PathBuf,
    output: PathBuf,
    format: Option<OutputFormat>,
    args: SettingsArgs,
) -> anyhow::Result<()> {
    let mut config = AppConfig::load_from_assets(loader);
    let mut ctx = RunContext::resolve(&config, &args)?;
    let format = OutputFormat::resolve(format, Some(output.as_path()));
    let mut renderer = make_renderer(loader, format, ctx.optimize_png);

    let mut files = vec![input.clone()];
    let config_path = loader.config_file().filter(|p| p.exists()).map(Path::to_path_buf);
    if let Some(ref path) = config_path {
        files.push(path.clone());
    }

    let watcher = FileWatcher::new(&files, config.watch.debounce())
        .context("Failed to start file watcher")?;
    let mut events = watcher.subscribe();

    let (worker, mut responses) = DitherWorker::spawn(8);
    let tracker = LatestRequest::new();

    let submit = |ctx: &RunContext| -> anyhow::Result<DitherRequest> {
        let image = load_png(&input).with_context(|| format!("Failed to load {}", input.display()))?;
        Ok(DitherRequest {
            id: tracker.next_id(),
            image: Arc::new(image),
            settings: ctx.settings.clone(),
        })
    };

    worker.submit(submit(&ctx)?).await?;
    println!("Watching {} (Ctrl-C to stop)", input.display());

    // Newest request the queue had no room for; older ones are stale anyway
    let mut pending: Option<DitherRequest> = None;

    loop {
        tokio::select! {
            event = events.recv() => {
                let event = match event {
                    Ok(event) => event,
                    Err(tokio::sync::broadcast::error::RecvError::Lagged(_)) => continue,
                    Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
                };

                let config_changed = config_path
                    .as_ref()
                    .map(|p| event.paths.iter().any(|e| e.file_name() == p.file_name()))
                    .unwrap_or(false);
                if config_changed {
                    config = AppConfig::load_from_assets(loader);
                    match RunContext::resolve(&config, &args) {
                        Ok(new_ctx) => {
                            if new_ctx.optimize_png != ctx.optimize_png {
                                renderer = make_renderer(loader, format, new_ctx.optimize_png);
                            }
                            ctx = new_ctx;
                            tracing::info!("Reloaded configuration");
                        }
                        Err(e) => tracing::warn!(error = %e, "Invalid configuration, keeping previous settings"),
                    }
                }

                match submit(&ctx) {
                    Ok(request) => pending = worker.try_submit(request)?,
                    Err(e) => tracing::warn!(error = %e, "Skipping re-render"),
                }
            }
            Some(response) = responses.recv() => {
                if let Some(request) = pending.take() {
                    pending = worker.try_submit(request)?;
                }
                if !tracker.is_current(response.id) {
                    tracing::debug!(id = response.id, latest = tracker.latest(), "Discarding stale result");
                    continue;
                }
                let result = match response.result {
                    Ok(result) => result,
                    Err(e) => {
                        tracing::warn!(id = response.id, error = %e, "Dithering failed");
                        continue;
                    }
                };
                let bytes = match (format, renderer.as_ref()) {
                    (OutputFormat::Png, Some(service)) => {
                        service
                            .render_png_blocking(Arc::new(result), ctx.style.clone())
                            .await?
                    }
                    _ => encode_output(&result, format, &ctx, None)?,
                };
                tokio::fs::write(&output, &bytes)
                    .await
                    .with_context(|| format!("Failed to write {}", output.display()))?;
                println!("Wrote {} ({} bytes)", output.display(), bytes.len());
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    worker.shutdown().await?;
    Ok(())
}

/// Print the bundled catalogs
fn run_list_command(loader: &AssetLoader, fonts: bool) {
    println!("Presets:");
    for preset in PRESETS.iter() {
        println!(
            "  {:<16} {:<16} {:<16} {:<16} {:>2} colors  bg {} fg {}",
            preset.name,
            preset.label,
            preset.algorithm.name(),
            preset.character_set.name(),
            preset.palette().len(),
            preset.background().to_hex(),
            preset.foreground().to_hex(),
        );
    }

    println!("\nAlgorithms:");
    for algorithm in DitherAlgorithm::ALL {
        println!("  {:<16} {}", algorithm.name(), algorithm.label());
    }

    println!("\nCharacter sets:");
    for set in CharacterSet::ALL {
        let ramp: String = set.glyphs().iter().collect();
        println!("  {:<16} {:<12} {}", set.name(), set.label(), ramp.trim_end());
    }

    println!("\nPalette modes:");
    for mode in PaletteMode::ALL {
        match mode.resolve(&[]) {
            Ok(palette) if mode != PaletteMode::Custom => {
                println!("  {:<16} {} colors", mode.name(), palette.len())
            }
            _ => println!("  {:<16} user supplied (--palette)", mode.name()),
        }
    }

    if fonts {
        let renderer = CanvasRenderer::with_fonts(loader.get_fonts());
        println!("\nFont families:");
        for family in renderer.font_families() {
            println!("  {family}");
        }
    }
}

/// Extract embedded config to the filesystem
fn run_init_command(loader: &AssetLoader, force: bool, list: bool) -> anyhow::Result<()> {
    if list {
        println!("Embedded assets:\n");
        for f in AssetLoader::list_embedded() {
            println!("  {f}");
        }
        return Ok(());
    }

    let report = loader.init(force)?;

    for f in &report.written {
        println!("  + {f}");
    }
    if !report.skipped.is_empty() {
        println!("Skipped existing files (use --force to overwrite):");
        for f in &report.skipped {
            println!("  - {f}");
        }
    }

    Ok(())
}

/// Display status and configuration information
fn run_status_command(loader: &AssetLoader) {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    println!("inkglyph v{VERSION}");
    println!("Dither images into colored glyph art\n");

    let config_source = match loader.config_file() {
        Some(path) if path.exists() => path.display().to_string(),
        Some(_) => "embedded (file not found)".to_string(),
        None => "embedded".to_string(),
    };
    println!("  Config: {config_source}");
    println!("  Fonts:  {} extra font file(s)", loader.get_fonts().len());

    println!("\nRun 'inkglyph --help' for commands.");
}
