use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use rand::SeedableRng;

#[derive(Parser, Debug)]
#[command(name = "circle-arrange", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a dataset of task pairs on disk.
    Generate(GenerateArgs),
    /// Build one scene and print it as JSON.
    Scene(SceneArgs),
}

#[derive(Parser, Debug)]
struct GenerateArgs {
    /// Generation config JSON (defaults are used for missing fields).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output root directory.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Number of task pairs to generate.
    #[arg(long)]
    num_samples: Option<u32>,

    /// Base random seed.
    #[arg(long)]
    seed: Option<u64>,

    /// Skip rendering and encoding the ground-truth animation.
    #[arg(long, default_value_t = false)]
    no_videos: bool,

    /// Generate tasks in parallel.
    #[arg(long, default_value_t = false)]
    parallel: bool,
}

#[derive(Parser, Debug)]
struct SceneArgs {
    /// Generation config JSON (defaults are used for missing fields).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Random seed.
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Generate(args) => cmd_generate(args),
        Command::Scene(args) => cmd_scene(args),
    }
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<circle_arrange::GenerationConfig> {
    match path {
        Some(p) => circle_arrange::GenerationConfig::from_path(p)
            .with_context(|| format!("load config '{}'", p.display())),
        None => Ok(circle_arrange::GenerationConfig::default()),
    }
}

fn cmd_generate(args: GenerateArgs) -> anyhow::Result<()> {
    let mut cfg = load_config(args.config.as_ref())?;
    if let Some(out) = args.out {
        cfg.output_dir = out;
    }
    if let Some(n) = args.num_samples {
        cfg.num_samples = n;
    }
    if args.seed.is_some() {
        cfg.random_seed = args.seed;
    }
    if args.no_videos {
        cfg.generate_videos = false;
    }
    if args.parallel {
        cfg.parallel = true;
    }

    let generator = circle_arrange::TaskGenerator::new(cfg)?;
    let summary = generator.generate_dataset()?;

    for skipped in &summary.skipped {
        eprintln!("skipped {}: {}", skipped.task_id, skipped.reason);
    }
    eprintln!(
        "wrote {} tasks ({} duplicates, {} skipped, seed {}) under {}",
        summary.written.len(),
        summary.duplicates,
        summary.skipped.len(),
        generator.seed(),
        generator.config().output_dir.display()
    );
    Ok(())
}

fn cmd_scene(args: SceneArgs) -> anyhow::Result<()> {
    let cfg = load_config(args.config.as_ref())?;
    let builder = circle_arrange::SceneBuilder::new(cfg.scene_params()?)?;
    let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(args.seed);
    let scene = builder.build(&mut rng)?;

    let json = serde_json::to_string_pretty(&scene).context("serialize scene")?;
    println!("{json}");
    Ok(())
}
