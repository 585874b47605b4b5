use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use spritelog::FrameSink as _;

#[derive(Parser, Debug)]
#[command(name = "spritelog", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the built-in demo sequence, save its journal and replay it to PNGs.
    Demo(DemoArgs),
    /// Run a command script, save its journal and replay it to PNGs.
    Run(RunArgs),
    /// Replay a saved journal to PNGs.
    Replay(ReplayArgs),
}

#[derive(Parser, Debug)]
struct DemoArgs {
    /// Output directory for the journal and frames.
    #[arg(long)]
    out: PathBuf,

    /// Optional sprite manifest JSON (defaults to the built-in sprite).
    #[arg(long)]
    manifest: Option<PathBuf>,

    /// Filename prefix for replayed frames.
    #[arg(long, default_value = "repeat_sprite")]
    prefix: String,
}

#[derive(Parser, Debug)]
struct RunArgs {
    /// Command script: one `<command> [distance]` per line.
    #[arg(long)]
    script: PathBuf,

    /// Output directory for the journal and frames.
    #[arg(long)]
    out: PathBuf,

    /// Optional sprite manifest JSON (defaults to the built-in sprite).
    #[arg(long)]
    manifest: Option<PathBuf>,

    /// Filename prefix for replayed frames.
    #[arg(long, default_value = "repeat_sprite")]
    prefix: String,
}

#[derive(Parser, Debug)]
struct ReplayArgs {
    /// Journal JSON written by `demo` or `run`.
    #[arg(long)]
    journal: PathBuf,

    /// Output directory for frames.
    #[arg(long)]
    out: PathBuf,

    /// Filename prefix for replayed frames.
    #[arg(long, default_value = "repeat_sprite")]
    prefix: String,
}

const JOURNAL_FILE: &str = "journal.json";

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Demo(args) => cmd_demo(args),
        Command::Run(args) => cmd_run(args),
        Command::Replay(args) => cmd_replay(args),
    }
}

fn open_session(manifest: Option<&Path>) -> anyhow::Result<spritelog::SpriteSession> {
    let Some(path) = manifest else {
        return Ok(spritelog::SpriteSession::new(
            spritelog::SpriteManifest::default(),
            ".",
        )?);
    };

    let f = File::open(path).with_context(|| format!("open manifest '{}'", path.display()))?;
    let manifest: spritelog::SpriteManifest = serde_json::from_reader(BufReader::new(f))
        .with_context(|| format!("parse manifest '{}'", path.display()))?;
    let root = path.parent().unwrap_or_else(|| Path::new("."));
    Ok(spritelog::SpriteSession::new(manifest, root)?)
}

fn cmd_demo(args: DemoArgs) -> anyhow::Result<()> {
    use spritelog::{Direction, FrameIndex, Movement, MovementKind};

    let demo = [
        Movement::rotate(),
        Movement::rotate(),
        Movement::rotate(),
        Movement::marker(MovementKind::Undo),
        Movement::shift(Direction::Right, 500),
        Movement::marker(MovementKind::Repeat),
    ];

    let mut session = open_session(args.manifest.as_deref())?;
    let engine = session.engine_mut();

    // Live frames mirror what the replay must reproduce.
    let mut live = spritelog::DirSink::png(&args.out, "sprite");
    live.begin(frame_config(engine, demo.len() as u64 + 1))?;
    live.push_frame(FrameIndex(0), &engine.snapshot().to_frame())?;
    for (i, &m) in demo.iter().enumerate() {
        engine
            .dispatch(m)
            .with_context(|| format!("demo step {i} ({m})"))?;
        live.push_frame(FrameIndex(i as u64 + 1), &engine.snapshot().to_frame())?;
    }
    live.end()?;
    eprintln!("wrote {} live frames to {}", demo.len() + 1, args.out.display());

    save_and_replay(&session, &args.out, &args.prefix)
}

fn cmd_run(args: RunArgs) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(&args.script)
        .with_context(|| format!("read script '{}'", args.script.display()))?;
    let movements = spritelog::parse_script(&text)?;

    let mut session = open_session(args.manifest.as_deref())?;
    spritelog::run_script(session.engine_mut(), &movements)?;

    save_and_replay(&session, &args.out, &args.prefix)
}

fn cmd_replay(args: ReplayArgs) -> anyhow::Result<()> {
    let file = spritelog::JournalFile::from_path(&args.journal)?;
    let root = args.journal.parent().unwrap_or_else(|| Path::new("."));
    let mut sink = spritelog::DirSink::png(&args.out, args.prefix.as_str());
    let report = file.replay_into(root, &mut sink)?;

    eprintln!(
        "wrote {} frames to {}",
        report.frames,
        args.out.display()
    );
    Ok(())
}

fn save_and_replay(
    session: &spritelog::SpriteSession,
    out: &Path,
    prefix: &str,
) -> anyhow::Result<()> {
    let journal_path = out.join(JOURNAL_FILE);
    session.save(&journal_path)?;
    eprintln!("wrote {}", journal_path.display());

    let mut sink = spritelog::DirSink::png(out, prefix);
    let report = session.replay_into(&mut sink)?;

    let live = session.engine().snapshot().fingerprint();
    if report.fingerprints.last() != Some(&live) {
        anyhow::bail!("replayed final frame does not match the live canvas ({live})");
    }

    eprintln!("wrote {} frames to {}", report.frames, out.display());
    Ok(())
}

fn frame_config(engine: &spritelog::Engine, frame_count: u64) -> spritelog::SinkConfig {
    spritelog::SinkConfig {
        width: engine.canvas().width(),
        height: engine.canvas().height(),
        frame_count,
    }
}
