use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};

use pinforge::style::descriptor::MAIN_FONTS;
use pinforge::text::font::FontSource;
use pinforge::{
    Config, FontResolver, OutputSink, RenderInput, RenderRequest, StyleId,
};

#[derive(Parser, Debug)]
#[command(name = "pinforge", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a graphic to a PNG in the output directory.
    Render(RenderArgs),
    /// Check that this deployment can actually serve renders.
    Doctor,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Title text drawn on the graphic.
    #[arg(long)]
    title: String,

    /// Optional branding/attribution line.
    #[arg(long, default_value = "")]
    branding: String,

    /// Template id (style1..style5).
    #[arg(long, default_value = "style1")]
    style: String,

    /// Prompt sent to the base-image collaborator.
    #[arg(long, conflicts_with = "base_image")]
    prompt: Option<String>,

    /// Use a local image file instead of calling the collaborator.
    #[arg(long)]
    base_image: Option<PathBuf>,

    /// Override the configured output directory.
    #[arg(long)]
    out_dir: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Doctor => cmd_doctor(),
    }
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let mut config = Config::from_env();
    if let Some(dir) = args.out_dir {
        config.output_dir = dir;
    }

    let style = StyleId::parse(&args.style)
        .with_context(|| format!("unknown style '{}' (expected style1..style5)", args.style))?;

    match (&args.base_image, &args.prompt) {
        (Some(path), _) => {
            // Offline path: local base image, no collaborator involved.
            anyhow::ensure!(!args.title.trim().is_empty(), "--title must not be empty");
            let bytes =
                std::fs::read(path).with_context(|| format!("read '{}'", path.display()))?;
            let request = RenderRequest::new(bytes, args.title, style).with_branding(args.branding);

            let mut resolver = FontResolver::new(&config.font_dir);
            let png = pinforge::render_png(&request, &mut resolver)?;

            let mut sink = OutputSink::new(&config.output_dir, &config.fallback_dir);
            let stored = sink.store(&png)?;
            eprintln!("wrote {}", stored.path.display());
            Ok(())
        }
        (None, Some(prompt)) => render_via_upstream(config, prompt, &args.title, &args.branding, style),
        (None, None) => {
            anyhow::bail!("one of --prompt or --base-image is required")
        }
    }
}

#[cfg(feature = "upstream")]
fn render_via_upstream(
    config: Config,
    prompt: &str,
    title: &str,
    branding: &str,
    style: StyleId,
) -> anyhow::Result<()> {
    let api_key = config
        .api_key
        .clone()
        .context("PINFORGE_API_KEY is not set; the render entry point is disabled")?;
    let client = pinforge::UpstreamImageClient::new(&config.upstream_url, api_key)?;
    let service = pinforge::RenderService::new(config, client);
    let input = RenderInput {
        image_prompt: prompt.to_string(),
        title: title.to_string(),
        branding_text: branding.to_string(),
        style,
    };
    let outcome = service.handle(&input)?;
    eprintln!("wrote {}", outcome.image.path.display());
    eprintln!("serving path: {}", outcome.serving_path(service.config()));
    Ok(())
}

#[cfg(not(feature = "upstream"))]
fn render_via_upstream(
    _config: Config,
    _prompt: &str,
    _title: &str,
    _branding: &str,
    _style: StyleId,
) -> anyhow::Result<()> {
    anyhow::bail!("built without the 'upstream' feature; use --base-image instead")
}

fn cmd_doctor() -> anyhow::Result<()> {
    let config = Config::from_env();
    let mut failures = 0u32;
    let mut check = |name: &str, ok: bool, detail: String| {
        if ok {
            println!("ok   {name}: {detail}");
        } else {
            println!("FAIL {name}: {detail}");
            failures += 1;
        }
    };

    check(
        "credential",
        config.render_enabled(),
        if config.render_enabled() {
            "upstream credential configured".to_string()
        } else {
            "PINFORGE_API_KEY not set, render entry point disabled".to_string()
        },
    );

    check(
        "upstream-url",
        config.upstream_url.starts_with("http"),
        config.upstream_url.clone(),
    );

    let mut resolver = FontResolver::new(&config.font_dir);
    let font = resolver.resolve(MAIN_FONTS, 80);
    let (font_ok, font_detail) = match font.source() {
        FontSource::Bundled(p) => (true, format!("bundled {}", p.display())),
        FontSource::System(p) => (true, format!("system fallback {}", p.display())),
        FontSource::Builtin => (
            true,
            "embedded default (no bundled or system fonts found)".to_string(),
        ),
    };
    check("fonts", font_ok, font_detail);

    for dir in [&config.output_dir, &config.fallback_dir] {
        let probe = dir.join(".pinforge-doctor");
        let writable = std::fs::create_dir_all(dir)
            .and_then(|_| std::fs::write(&probe, b"probe"))
            .and_then(|_| std::fs::remove_file(&probe))
            .is_ok();
        check(
            "storage",
            writable,
            format!("{} {}", dir.display(), if writable { "writable" } else { "not writable" }),
        );
    }

    if failures > 0 {
        anyhow::bail!("{failures} check(s) failed");
    }
    println!("all checks passed");
    Ok(())
}
