use std::{
    io::{BufWriter, Write},
    path::PathBuf,
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use motion_reel::{
    Engine, EvalOpts, FrameIndex, FrameRange, LegacyEngine, MotionScript, SpinProps, Timeline,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "reel", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the composed timeline as JSON.
    Timeline(InputArgs),
    /// Print the state of one frame as JSON.
    Frame(FrameArgs),
    /// Print the state of a frame range as JSON lines.
    Frames(FramesArgs),
    /// Validate an input and report computed vs declared duration.
    Check(InputArgs),
}

#[derive(Args, Debug)]
struct InputArgs {
    /// Input motion script JSON (or spin props with `--legacy`).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Treat the input as legacy image-sequence props.
    #[arg(long, default_value_t = false)]
    legacy: bool,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Global frame index; out-of-range values are clamped.
    #[arg(long, allow_negative_numbers = true)]
    frame: i64,
}

#[derive(Parser, Debug)]
struct FramesArgs {
    #[command(flatten)]
    input: InputArgs,

    /// First frame (inclusive).
    #[arg(long, default_value_t = 0)]
    from: u64,

    /// End frame (exclusive); defaults to the total duration.
    #[arg(long)]
    to: Option<u64>,

    /// Enable frame-level parallelism.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,

    /// Evaluation chunk size (parallel mode only).
    #[arg(long, default_value_t = 64)]
    chunk_size: usize,
}

enum Loaded {
    Script(Engine),
    Legacy(LegacyEngine),
}

impl Loaded {
    fn open(args: &InputArgs) -> anyhow::Result<Self> {
        let path = &args.in_path;
        if args.legacy {
            let props = SpinProps::from_path(path)?;
            let engine = LegacyEngine::new(props)
                .with_context(|| format!("load spin props '{}'", path.display()))?;
            Ok(Self::Legacy(engine))
        } else {
            let script = MotionScript::from_path(path)?;
            let engine = Engine::new(script)
                .with_context(|| format!("load motion script '{}'", path.display()))?;
            Ok(Self::Script(engine))
        }
    }

    fn timeline(&self) -> &Timeline {
        match self {
            Self::Script(e) => e.timeline(),
            Self::Legacy(e) => e.timeline(),
        }
    }

    fn duration_frames(&self) -> u64 {
        self.timeline().total_duration_frames
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Timeline(args) => cmd_timeline(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Frames(args) => cmd_frames(args),
        Command::Check(args) => cmd_check(args),
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    let mut out = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut out, value).context("write JSON")?;
    writeln!(out)?;
    Ok(())
}

fn cmd_timeline(args: InputArgs) -> anyhow::Result<()> {
    let loaded = Loaded::open(&args)?;
    print_json(loaded.timeline())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    match Loaded::open(&args.input)? {
        Loaded::Script(e) => print_json(&e.eval_frame(args.frame)?),
        Loaded::Legacy(e) => print_json(&e.eval_frame(args.frame)?),
    }
}

fn cmd_frames(args: FramesArgs) -> anyhow::Result<()> {
    let loaded = Loaded::open(&args.input)?;
    let to = args.to.unwrap_or_else(|| loaded.duration_frames());
    let range = FrameRange::new(FrameIndex(args.from), FrameIndex(to))
        .with_context(|| format!("frame range {}..{to}", args.from))?;
    let opts = EvalOpts {
        parallel: args.parallel,
        threads: args.threads,
        chunk_size: args.chunk_size,
    };

    let mut out = BufWriter::new(std::io::stdout().lock());
    match loaded {
        Loaded::Script(e) => write_lines(&mut out, &e.eval_range(range, &opts)?)?,
        Loaded::Legacy(e) => write_lines(&mut out, &e.eval_range(range, &opts)?)?,
    }
    out.flush()?;
    Ok(())
}

fn write_lines<W: Write, T: serde::Serialize>(out: &mut W, states: &[T]) -> anyhow::Result<()> {
    for state in states {
        serde_json::to_writer(&mut *out, state).context("write frame state")?;
        writeln!(out)?;
    }
    Ok(())
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct CheckReport {
    computed_duration_frames: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    declared_duration_frames: Option<u64>,
    fps: u32,
}

fn cmd_check(args: InputArgs) -> anyhow::Result<()> {
    let path = &args.in_path;
    let report = if args.legacy {
        let props = SpinProps::from_path(path)?;
        let report = CheckReport {
            computed_duration_frames: props.computed_duration_frames(),
            declared_duration_frames: None,
            fps: props.fps()?.get(),
        };
        props
            .validate()
            .with_context(|| format!("check spin props '{}'", path.display()))?;
        report
    } else {
        let script = MotionScript::from_path(path)?;
        let report = CheckReport {
            computed_duration_frames: script.computed_duration_frames(),
            declared_duration_frames: Some(script.total_duration_frames),
            fps: script.fps,
        };
        eprintln!(
            "computed {} frames, declared {}",
            report.computed_duration_frames, script.total_duration_frames
        );
        script
            .validate()
            .with_context(|| format!("check motion script '{}'", path.display()))?;
        report
    };
    print_json(&report)
}
