//! Overlay CLI
//!
//! Scene JSON → PNG frame sequence with event overlays
//! Scene JSON → validation report

#[cfg(feature = "cli")]
use anyhow::Result;
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "overlay")]
#[command(about = "Render football event overlays onto frames", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Render every frame of a scene to PNG files
    Render {
        /// Scene JSON (size, frame count, events, tracks)
        #[arg(long)]
        scene: PathBuf,

        /// Output directory for frame_NNNNN.png files
        #[arg(long)]
        out: PathBuf,

        /// Background image drawn under every frame
        #[arg(long)]
        background: Option<PathBuf>,

        /// Overlay config JSON (defaults to the broadcast preset)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Give every banner its own row
        #[arg(long, default_value = "false")]
        stacked: bool,

        /// Draw arrows for in-flight passes
        #[arg(long, default_value = "false")]
        pass_arrows: bool,

        /// Skip passes the active set already holds
        #[arg(long, default_value = "false")]
        dedupe: bool,

        /// Validate the scene before rendering
        #[arg(long, default_value = "false")]
        verify: bool,
    },

    /// Report track gaps and malformed events in a scene
    Validate {
        /// Scene JSON
        #[arg(long)]
        scene: PathBuf,
    },
}

#[cfg(feature = "cli")]
fn main() -> Result<()> {
    use of_overlay::{BannerLayout, OverlayConfig, OverlayScene};
    use of_overlay_cli::{render_scene, validate_scene_file, RenderOptions};
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            scene,
            out,
            background,
            config,
            stacked,
            pass_arrows,
            dedupe,
            verify,
        } => {
            println!("Rendering overlay frames...");
            println!("   Scene:  {}", scene.display());
            println!("   Output: {}", out.display());

            let mut overlay_config = match &config {
                Some(path) => OverlayConfig::load(path)?,
                None => OverlayConfig::broadcast(),
            };
            if stacked {
                overlay_config.banner.layout = BannerLayout::Stacked;
            }
            overlay_config.pass_arrows |= pass_arrows;
            overlay_config.dedupe_active |= dedupe;

            let loaded = OverlayScene::load(&scene)?;
            if verify {
                let issues = loaded.validate();
                if !issues.is_empty() {
                    print_issues(&issues);
                    anyhow::bail!("scene has {} issue(s), not rendering", issues.len());
                }
            }

            let options = RenderOptions { config: overlay_config, background };
            let summary = render_scene(&loaded, &out, &options)?;

            println!("\nDone.");
            println!("   Frames written: {}", summary.frames_written);
            println!("   Events emitted: {}", summary.events_emitted);
        }

        Commands::Validate { scene } => {
            println!("Validating scene {}...", scene.display());
            let issues = validate_scene_file(&scene)?;
            if issues.is_empty() {
                println!("Scene is complete: every referenced player is tracked");
            } else {
                print_issues(&issues);
                anyhow::bail!("scene validation failed with {} issue(s)", issues.len());
            }
        }
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn print_issues(issues: &[of_overlay::SceneIssue]) {
    println!("\nFound {} issue(s):", issues.len());
    for issue in issues {
        println!("   - {}", issue);
    }
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("overlay CLI is not available. Enable the 'cli' feature to use it.");
    std::process::exit(1);
}
