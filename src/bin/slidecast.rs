use std::{
    io::Write as _,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "slidecast", version)]
struct Cli {
    /// Log debug output to stderr (overridden by `RUST_LOG`).
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the frame windows of a project.
    Timeline(TimelineArgs),
    /// Print the evaluated layers of a single frame.
    Frame(FrameArgs),
    /// Print the evaluated layers of a frame range.
    Plan(PlanArgs),
    /// Print the export plan for a video or still-image export.
    Export(ExportArgs),
}

#[derive(Parser, Debug)]
struct TimelineArgs {
    /// Input project JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output JSON path (stdout when omitted).
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input project JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Frame index (0-based).
    #[arg(long)]
    frame: u64,

    /// Output JSON path (stdout when omitted).
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct PlanArgs {
    /// Input project JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// First frame (inclusive).
    #[arg(long, default_value_t = 0)]
    start: u64,

    /// Last frame (exclusive); defaults to the end of the timeline.
    #[arg(long)]
    end: Option<u64>,

    /// Enable frame-level parallelism.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,

    /// Planning chunk size in frames.
    #[arg(long, default_value_t = 64)]
    chunk_size: usize,

    /// Output JSON path (stdout when omitted).
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct ExportArgs {
    /// Input project JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// What to export.
    #[arg(long, value_enum, default_value_t = KindChoice::Video)]
    kind: KindChoice,

    /// Slide position within the selection (single-image export only).
    #[arg(long, default_value_t = 0)]
    slide: usize,

    /// Still-image format.
    #[arg(long, value_enum, default_value_t = FormatChoice::Png)]
    format: FormatChoice,

    /// Comma-separated slide indices to export (all when omitted).
    #[arg(long, value_delimiter = ',')]
    select: Option<Vec<usize>>,

    /// Override every selected slide's duration, in seconds.
    #[arg(long)]
    duration: Option<f64>,

    /// Include every evaluated frame of every target in the output.
    #[arg(long, default_value_t = false)]
    frames: bool,

    /// Output JSON path (stdout when omitted).
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum KindChoice {
    Video,
    Image,
    Images,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatChoice {
    Png,
    Jpg,
}

impl From<FormatChoice> for slidecast::ImageFormat {
    fn from(f: FormatChoice) -> Self {
        match f {
            FormatChoice::Png => Self::Png,
            FormatChoice::Jpg => Self::Jpg,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Timeline(args) => cmd_timeline(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Plan(args) => cmd_plan(args),
        Command::Export(args) => cmd_export(args),
    }
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "slidecast=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn load_project(path: &Path) -> anyhow::Result<slidecast::SlideshowProject> {
    let project = slidecast::SlideshowProject::from_path(path)
        .with_context(|| format!("load project '{}'", path.display()))?;
    project
        .validate()
        .with_context(|| format!("validate project '{}'", path.display()))?;
    Ok(project)
}

fn cmd_timeline(args: TimelineArgs) -> anyhow::Result<()> {
    let project = load_project(&args.in_path)?;
    let timeline = slidecast::build_project_timeline(&project)?;

    let report = serde_json::json!({
        "fps": timeline.fps,
        "total_frames": timeline.total_frames,
        "duration_secs": timeline.duration_secs(),
        "preview_frames": slidecast::preview_duration_frames(&timeline),
        "transition": timeline.transition,
        "windows": timeline.windows,
    });
    write_json(&report, args.out.as_deref())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let project = load_project(&args.in_path)?;
    let timeline = slidecast::build_project_timeline(&project)?;
    let source = slidecast::FrameSource::new(&project.slides, &project.style, &timeline)?;
    let plan = slidecast::plan_frame(&source, slidecast::FrameIndex(args.frame))?;
    write_json(&plan, args.out.as_deref())
}

fn cmd_plan(args: PlanArgs) -> anyhow::Result<()> {
    let project = load_project(&args.in_path)?;
    let timeline = slidecast::build_project_timeline(&project)?;
    let source = slidecast::FrameSource::new(&project.slides, &project.style, &timeline)?;

    let range = slidecast::FrameRange::new(
        slidecast::FrameIndex(args.start),
        slidecast::FrameIndex(args.end.unwrap_or(timeline.total_frames)),
    )?;
    let threading = slidecast::RenderThreading {
        parallel: args.parallel,
        chunk_size: args.chunk_size,
        threads: args.threads,
    };
    let plans = slidecast::plan_frames(&source, range, &threading)?;
    write_json(&plans, args.out.as_deref())
}

fn cmd_export(args: ExportArgs) -> anyhow::Result<()> {
    let project = load_project(&args.in_path)?;
    let kind = match args.kind {
        KindChoice::Video => slidecast::ExportKind::Video,
        KindChoice::Image => slidecast::ExportKind::SingleImage {
            slide_index: args.slide,
            format: args.format.into(),
        },
        KindChoice::Images => slidecast::ExportKind::ImageSet {
            format: args.format.into(),
        },
    };
    let selection = slidecast::ExportSelection {
        selected: args.select,
        duration_override_secs: args.duration,
    };
    let plan = slidecast::plan_export(&project, kind, &selection)?;

    if !args.frames {
        return write_json(&plan, args.out.as_deref());
    }

    let threading = slidecast::RenderThreading::default();
    let mut targets = Vec::with_capacity(plan.targets.len());
    for target in &plan.targets {
        let frames = plan
            .plan_target(target, &threading)
            .with_context(|| format!("plan frames for '{}'", target.file_name))?;
        targets.push(serde_json::json!({
            "file_name": target.file_name,
            "frames": frames,
        }));
    }
    let report = serde_json::json!({
        "plan": plan,
        "targets": targets,
    });
    write_json(&report, args.out.as_deref())
}

fn write_json<T: serde::Serialize>(value: &T, out: Option<&Path>) -> anyhow::Result<()> {
    let Some(path) = out else {
        let stdout = std::io::stdout();
        let mut lock = stdout.lock();
        serde_json::to_writer_pretty(&mut lock, value).context("write json to stdout")?;
        writeln!(lock).context("write json to stdout")?;
        return Ok(());
    };

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    let f = std::fs::File::create(path)
        .with_context(|| format!("create output file '{}'", path.display()))?;
    serde_json::to_writer_pretty(std::io::BufWriter::new(f), value)
        .with_context(|| format!("write json '{}'", path.display()))?;

    eprintln!("wrote {}", path.display());
    Ok(())
}
