use std::{
    error::Error,
    path::{Path, PathBuf},
};

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use colored::Colorize;
use env_logger::Env;
use framepick::{
    DeadzoneSet, FrameRange, GridLayout, SampleOptions, SamplingStrategy, SplitPolicy,
    compute_sample_frames_with_options, deadzone_file_for, evenly_spaced, plan_livezones,
    read_deadzone_file, render_timeline, validate_request,
};
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::json;

const CLI_AFTER_HELP: &str = "Examples:\n  framepick sample movie.mp4 --grid 5x4 --frames 14400 --timeline\n  framepick deadzone add movie.mp4 0 240 --frames 14400\n  framepick zones movie.mp4 --grid 5x4 --frames 14400\n  framepick compare movie.mp4 --frames 14400 --max-images 21\n  framepick completions zsh > _framepick";

type CliResult<T> = Result<T, Box<dyn Error>>;

#[derive(Debug, Parser)]
#[command(
    name = "framepick",
    version,
    about = "Pick montage frames from a video while avoiding deadzones",
    after_help = CLI_AFTER_HELP
)]
struct Cli {
    #[command(flatten)]
    global: GlobalOptions,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Parser, Clone, Default)]
struct GlobalOptions {
    /// Show additional logging output.
    #[arg(long, global = true)]
    verbose: bool,

    /// Show a progress bar where supported.
    #[arg(long, global = true)]
    progress: bool,

    /// Deadzone file to use instead of `<video>_deadzones.txt`.
    #[arg(long, global = true)]
    deadzones: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Compute the frames to sample for a montage.
    #[command(
        about = "Compute montage sample frames",
        after_help = "Examples:\n  framepick sample movie.mp4 --grid 4x3 --frames 9000\n  framepick sample movie.mp4 --grid 4x3 --frames 9000 --strategy rebalance --split balanced-step --json"
    )]
    Sample {
        /// Input video path.
        input: PathBuf,
        /// Grid as COLUMNSxROWS.
        #[arg(long)]
        grid: String,
        /// Total frame count (probed from the video when omitted).
        #[arg(long)]
        frames: Option<u64>,
        /// Sampling strategy: partition | rebalance.
        #[arg(long, default_value = "partition")]
        strategy: String,
        /// Rebalance split policy: density | ideal-step | balanced-step.
        #[arg(long, default_value = "density")]
        split: String,
        /// Do not keep samples away from deadzone edges.
        #[arg(long)]
        no_margin: bool,
        /// Output as machine-readable JSON.
        #[arg(long)]
        json: bool,
        /// Print an ASCII timeline of deadzones and samples.
        #[arg(long)]
        timeline: bool,
        /// Timeline width in columns.
        #[arg(long, default_value_t = 100)]
        width: usize,
        /// Print frames in montage cell order (odd rows reversed).
        #[arg(long)]
        serpentine: bool,
    },

    /// Show livezones and the number of images each receives.
    #[command(about = "Show livezones and their image quotas")]
    Zones {
        input: PathBuf,
        #[arg(long)]
        grid: String,
        #[arg(long)]
        frames: Option<u64>,
        #[arg(long)]
        json: bool,
    },

    /// Edit or show the deadzones of a video.
    #[command(subcommand)]
    Deadzone(DeadzoneCommand),

    /// Evenly spaced frames between two frame numbers, ignoring deadzones.
    #[command(
        about = "Show evenly spaced frames between two points",
        after_help = "Examples:\n  framepick between 1200 1800 --count 12"
    )]
    Between {
        #[arg(allow_negative_numbers = true)]
        start: String,
        #[arg(allow_negative_numbers = true)]
        end: String,
        #[arg(long, default_value_t = 10)]
        count: u64,
    },

    /// Check a deadzone file and, optionally, a grid against a video.
    #[command(about = "Validate deadzones and grid")]
    Validate {
        input: PathBuf,
        #[arg(long)]
        grid: Option<String>,
        #[arg(long)]
        frames: Option<u64>,
    },

    /// Compare spacing of the partition and rebalance strategies.
    #[command(
        about = "Compare sampling strategies",
        after_help = "Examples:\n  framepick compare movie.mp4 --frames 9000 --max-images 21 --split ideal-step"
    )]
    Compare {
        input: PathBuf,
        #[arg(long)]
        frames: Option<u64>,
        /// Largest image count to try; every count down to 2 is compared.
        #[arg(long, default_value_t = 21)]
        max_images: u64,
        /// Rebalance split policy: density | ideal-step | balanced-step.
        #[arg(long, default_value = "density")]
        split: String,
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completion scripts.
    #[command(about = "Generate shell completions")]
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Debug, Subcommand)]
enum DeadzoneCommand {
    /// Add a deadzone; omit END to mark a single frame.
    Add {
        input: PathBuf,
        #[arg(allow_negative_numbers = true)]
        start: String,
        #[arg(allow_negative_numbers = true)]
        end: Option<String>,
        #[arg(long)]
        frames: Option<u64>,
    },
    /// List the stored deadzones.
    List {
        input: PathBuf,
        #[arg(long)]
        json: bool,
    },
    /// Remove a stored deadzone given as START:END.
    Remove {
        input: PathBuf,
        range: String,
        #[arg(long)]
        frames: Option<u64>,
    },
}

fn parse_split_policy(value: &str) -> Option<SplitPolicy> {
    match value.to_ascii_lowercase().as_str() {
        "density" | "density-ratio" => Some(SplitPolicy::DensityRatio),
        "ideal-step" | "ideal" | "1" => Some(SplitPolicy::IdealStep),
        "balanced-step" | "balanced" | "2" => Some(SplitPolicy::BalancedStep),
        _ => None,
    }
}

fn parse_strategy(strategy: &str, split: &str) -> CliResult<SamplingStrategy> {
    match strategy.to_ascii_lowercase().as_str() {
        "partition" => Ok(SamplingStrategy::Partition),
        "rebalance" => {
            let policy =
                parse_split_policy(split).ok_or(format!("unsupported --split policy: {split}"))?;
            Ok(SamplingStrategy::Rebalance(policy))
        }
        _ => Err(format!("unsupported --strategy: {strategy}").into()),
    }
}

fn parse_frame_number(value: &str) -> CliResult<u64> {
    let number: i64 = value
        .trim()
        .parse()
        .map_err(|_| format!("invalid frame number: {value}"))?;
    u64::try_from(number).map_err(|_| format!("frame numbers cannot be negative: {value}").into())
}

#[cfg(feature = "ffmpeg")]
fn probe_frames(input: &Path) -> CliResult<u64> {
    Ok(framepick::probe_total_frames(input)?)
}

#[cfg(not(feature = "ffmpeg"))]
fn probe_frames(input: &Path) -> CliResult<u64> {
    Err(format!(
        "--frames is required for {} (build with the `ffmpeg` feature to probe it)",
        input.display()
    )
    .into())
}

fn resolve_total_frames(input: &Path, frames: Option<u64>) -> CliResult<u64> {
    match frames {
        Some(frames) => Ok(frames),
        None => probe_frames(input),
    }
}

fn deadzone_path(global: &GlobalOptions, input: &Path) -> PathBuf {
    global
        .deadzones
        .clone()
        .unwrap_or_else(|| deadzone_file_for(input))
}

fn read_raw_deadzones(path: &Path) -> CliResult<Vec<FrameRange>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    Ok(read_deadzone_file(path)?)
}

/// Image counts for `compare`, largest first, capped at the live frames.
fn compare_counts(max_images: u64, available: u64) -> Vec<u64> {
    let largest = max_images.min(available);
    if largest < max_images {
        log::warn!(
            "Only {} frames are outside deadzones; comparing up to {} images instead of {}",
            available,
            largest,
            max_images
        );
    }
    (2..=largest).rev().collect()
}

fn init_logging(global: &GlobalOptions) {
    let level = if global.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(level)).init();
}

fn print_deadzones(deadzones: &DeadzoneSet) {
    if deadzones.is_empty() {
        println!("No deadzones defined.");
        return;
    }
    for range in deadzones.list() {
        println!("{range}");
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();
    init_logging(&cli.global);

    match cli.command {
        Commands::Sample {
            input,
            grid,
            frames,
            strategy,
            split,
            no_margin,
            json,
            timeline,
            width,
            serpentine,
        } => {
            let grid: GridLayout = grid.parse()?;
            let total_frames = resolve_total_frames(&input, frames)?;
            let deadzones = DeadzoneSet::load(deadzone_path(&cli.global, &input), total_frames)?;
            let options = SampleOptions::new()
                .with_strategy(parse_strategy(&strategy, &split)?)
                .with_deadzone_margin(!no_margin);

            let samples = compute_sample_frames_with_options(
                total_frames,
                grid.total_images(),
                deadzones.list(),
                &options,
            )?;
            let spacing = samples.spacing();

            if json {
                let payload = json!({
                    "input": input.display().to_string(),
                    "total_frames": total_frames,
                    "grid": grid.to_string(),
                    "strategy": options.strategy().to_string(),
                    "deadzones": deadzones
                        .list()
                        .iter()
                        .map(ToString::to_string)
                        .collect::<Vec<_>>(),
                    "frames": samples.frames(),
                    "rows": grid.serpentine(samples.frames()),
                    "mean_gap": spacing.mean_gap,
                    "gap_variance": spacing.variance,
                });
                println!("{}", serde_json::to_string_pretty(&payload)?);
                return Ok(());
            }

            if serpentine {
                for row in grid.serpentine(samples.frames()) {
                    let cells: Vec<String> = row.iter().map(ToString::to_string).collect();
                    println!("{}", cells.join(" "));
                }
            } else {
                let cells: Vec<String> = samples.iter().map(ToString::to_string).collect();
                println!("{}", cells.join(" "));
            }
            if timeline {
                println!(
                    "{}",
                    render_timeline(total_frames, deadzones.list(), samples.frames(), Some(width))
                );
            }
            if cli.global.verbose {
                eprintln!(
                    "{} mean gap {:.2}, variance {:.4}",
                    "spacing".cyan().bold(),
                    spacing.mean_gap,
                    spacing.variance
                );
            }
        }
        Commands::Zones {
            input,
            grid,
            frames,
            json,
        } => {
            let grid: GridLayout = grid.parse()?;
            let total_frames = resolve_total_frames(&input, frames)?;
            let deadzones = DeadzoneSet::load(deadzone_path(&cli.global, &input), total_frames)?;
            let zones = plan_livezones(total_frames, grid.total_images(), deadzones.list())?;

            if json {
                let payload: Vec<_> = zones
                    .iter()
                    .map(|zone| {
                        json!({
                            "range": zone.range.to_string(),
                            "length": zone.len(),
                            "quota": zone.quota,
                            "preceding_deadzone": zone.preceding_deadzone,
                            "following_deadzone": zone.following_deadzone,
                        })
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&payload)?);
            } else {
                for (index, zone) in zones.iter().enumerate() {
                    println!(
                        "Zone {}: {} ({} frames) dead before {} after {} -> {} images",
                        index + 1,
                        zone.range,
                        zone.len(),
                        zone.preceding_deadzone,
                        zone.following_deadzone,
                        zone.quota
                    );
                }
            }
        }
        Commands::Deadzone(DeadzoneCommand::Add {
            input,
            start,
            end,
            frames,
        }) => {
            let total_frames = resolve_total_frames(&input, frames)?;
            let path = deadzone_path(&cli.global, &input);
            let mut deadzones = DeadzoneSet::load(&path, total_frames)?;

            let start = parse_frame_number(&start)?;
            let end = end.as_deref().map(parse_frame_number).transpose()?;
            deadzones.add(start, end)?;
            deadzones.save(&path)?;

            println!(
                "{} {}",
                "saved".green().bold(),
                format!(
                    "{} ({} deadzones, {} frames available)",
                    path.display(),
                    deadzones.list().len(),
                    deadzones.available_frames()
                )
                .green()
            );
            print_deadzones(&deadzones);
        }
        Commands::Deadzone(DeadzoneCommand::List { input, json }) => {
            let path = deadzone_path(&cli.global, &input);
            let ranges = read_raw_deadzones(&path)?;
            if json {
                let payload: Vec<String> = ranges.iter().map(ToString::to_string).collect();
                println!("{}", serde_json::to_string_pretty(&payload)?);
            } else if ranges.is_empty() {
                println!("No deadzones defined.");
            } else {
                for range in &ranges {
                    println!("{range}");
                }
            }
        }
        Commands::Deadzone(DeadzoneCommand::Remove {
            input,
            range,
            frames,
        }) => {
            let total_frames = resolve_total_frames(&input, frames)?;
            let path = deadzone_path(&cli.global, &input);
            let mut deadzones = DeadzoneSet::load(&path, total_frames)?;
            let range: FrameRange = range.parse()?;

            if !deadzones.remove(range) {
                return Err(format!("no deadzone {range} in {}", path.display()).into());
            }
            deadzones.save(&path)?;
            println!("{} {}", "removed".green().bold(), range);
            print_deadzones(&deadzones);
        }
        Commands::Between { start, end, count } => {
            let range = FrameRange::new(parse_frame_number(&start)?, parse_frame_number(&end)?)?;
            let frames: Vec<String> = evenly_spaced(range, count)
                .iter()
                .map(ToString::to_string)
                .collect();
            println!("{}", frames.join(" "));
        }
        Commands::Validate {
            input,
            grid,
            frames,
        } => {
            let total_frames = resolve_total_frames(&input, frames)?;
            let deadzones = read_raw_deadzones(&deadzone_path(&cli.global, &input))?;
            let total_images = grid
                .as_deref()
                .map(str::parse::<GridLayout>)
                .transpose()?
                .map(|grid| grid.total_images());

            let report = validate_request(total_frames, &deadzones, total_images);
            print!("{report}");
            if !report.is_valid() {
                return Err(format!("{} validation error(s)", report.errors.len()).into());
            }
        }
        Commands::Compare {
            input,
            frames,
            max_images,
            split,
            json,
        } => {
            let total_frames = resolve_total_frames(&input, frames)?;
            let deadzones = DeadzoneSet::load(deadzone_path(&cli.global, &input), total_frames)?;
            let policy =
                parse_split_policy(&split).ok_or(format!("unsupported --split policy: {split}"))?;
            let partition = SampleOptions::new();
            let rebalance =
                SampleOptions::new().with_strategy(SamplingStrategy::Rebalance(policy));

            let counts = compare_counts(max_images, deadzones.available_frames());
            let bar = if cli.global.progress {
                let bar = ProgressBar::new(counts.len() as u64);
                bar.set_style(
                    ProgressStyle::with_template(
                        "{spinner:.green} {bar:40.cyan/blue} {pos}/{len} {msg}",
                    )?
                    .progress_chars("=> "),
                );
                Some(bar)
            } else {
                None
            };

            let mut wins = (0_u32, 0_u32, 0_u32);
            let mut rows = Vec::with_capacity(counts.len());
            for images in counts {
                let by_partition = compute_sample_frames_with_options(
                    total_frames,
                    images,
                    deadzones.list(),
                    &partition,
                )?;
                let by_rebalance = compute_sample_frames_with_options(
                    total_frames,
                    images,
                    deadzones.list(),
                    &rebalance,
                )?;
                let (left, right) = (by_partition.spacing(), by_rebalance.spacing());
                let winner = if left.variance < right.variance {
                    wins.0 += 1;
                    "partition"
                } else if right.variance < left.variance {
                    wins.1 += 1;
                    "rebalance"
                } else {
                    wins.2 += 1;
                    "tie"
                };

                if !json {
                    println!(
                        "images={images} winner={winner} partition={:.4} rebalance={:.4}",
                        left.variance, right.variance
                    );
                    if cli.global.verbose {
                        for samples in [&by_partition, &by_rebalance] {
                            let line =
                                render_timeline(total_frames, deadzones.list(), samples, Some(100));
                            println!("  {line}");
                        }
                    }
                }
                rows.push(json!({
                    "images": images,
                    "winner": winner,
                    "partition": { "frames": by_partition.frames(), "variance": left.variance },
                    "rebalance": { "frames": by_rebalance.frames(), "variance": right.variance },
                }));
                if let Some(bar) = &bar {
                    bar.inc(1);
                }
            }
            if let Some(bar) = bar {
                bar.finish_and_clear();
            }

            if json {
                let payload = json!({
                    "total_frames": total_frames,
                    "split": policy.to_string(),
                    "results": rows,
                    "summary": { "partition": wins.0, "rebalance": wins.1, "ties": wins.2 },
                });
                println!("{}", serde_json::to_string_pretty(&payload)?);
            } else {
                println!(
                    "{} partition={} rebalance={} ties={}",
                    "summary:".green().bold(),
                    wins.0,
                    wins.1,
                    wins.2
                );
            }
        }
        Commands::Completions { shell } => {
            let mut command = Cli::command();
            clap_complete::generate(shell, &mut command, "framepick", &mut std::io::stdout());
        }
    }

    Ok(())
}

fn main() {
    if let Err(error) = run() {
        eprintln!("{} {error}", "error:".red().bold());
        std::process::exit(1);
    }
}
