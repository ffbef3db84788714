//! repcount CLI
//!
//! Usage:
//!   repcount --samples "0.5,0.2,lost,0.4"     # Replay a list of ticks
//!   repcount --file ticks.txt                  # Replay ticks from a file
//!   repcount --interactive                     # One tick per stdin line
//!   repcount --serve                           # HTTP + WebSocket bridge
//!   repcount --samples "..." --json            # JSON output

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use repcount::config::AppConfig;
use repcount::core::{parse_sample_line, parse_sample_list, read_samples, run_server, SessionController};
use repcount::types::{SetSummary, ThresholdPreset, TickOutput, TrackerEvent};
use repcount::{Error, VERSION};

#[derive(Parser, Debug)]
#[command(
    name = "repcount",
    version = VERSION,
    about = "Count push-ups from face-to-camera distance",
    long_about = "repcount counts push-up repetitions from a stream of face-to-camera\n\
                  distances using two-threshold hysteresis.\n\n\
                  A repetition is counted when the distance drops below the near\n\
                  threshold and then rises above the far threshold.\n\n\
                  Tick lines:\n  \
                  0.42 | 42cm | 420mm   - Face tracked at that distance\n  \
                  lost | none | -       - Face not tracked\n  \
                  unavailable[:reason]  - Tracker unavailable"
)]
struct Args {
    /// Comma-separated ticks to replay
    #[arg(short, long)]
    samples: Option<String>,

    /// File with one tick per line
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Interactive mode - read ticks from stdin
    #[arg(short, long)]
    interactive: bool,

    /// Run the HTTP + WebSocket bridge
    #[arg(long)]
    serve: bool,

    /// Configuration file (toml, json or yaml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Calibrated threshold preset
    #[arg(long, value_enum)]
    preset: Option<ThresholdPreset>,

    /// Near threshold in meters
    #[arg(long)]
    near: Option<f64>,

    /// Far threshold in meters
    #[arg(long)]
    far: Option<f64>,

    /// Target repetitions for the set
    #[arg(short, long)]
    target_reps: Option<u32>,

    /// Server address
    #[arg(long)]
    addr: Option<String>,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Disable colors in output
    #[arg(long)]
    no_color: bool,

    /// Print every tick, not only transitions
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    if args.no_color {
        colored::control::set_override(false);
    }

    let config = load_config(&args)?;
    let controller = SessionController::new(config.thresholds()?)
        .with_target_reps(config.session.target_reps)
        .with_event_capacity(config.session.event_capacity);

    if args.serve {
        run_server(&config.server.addr, controller).await?;
    } else if let Some(ref list) = args.samples {
        let events = parse_sample_list(list)?;
        run_replay(controller, events, &args)?;
    } else if let Some(ref path) = args.file {
        let file = std::fs::File::open(path)
            .with_context(|| format!("opening tick file {}", path.display()))?;
        let events = read_samples(io::BufReader::new(file))?;
        run_replay(controller, events, &args)?;
    } else {
        // Default to interactive if no mode specified
        run_interactive(controller, &args)?;
    }
    Ok(())
}

/// Logs go to stderr so stdout stays parseable
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();
}

/// Config file and environment, then CLI flags on top
fn load_config(args: &Args) -> anyhow::Result<AppConfig> {
    let mut config = AppConfig::load(args.config.as_deref())?;

    if let Some(preset) = args.preset {
        let band = preset.thresholds();
        config.thresholds.near = band.near();
        config.thresholds.far = band.far();
    }
    if let Some(near) = args.near {
        config.thresholds.near = near;
    }
    if let Some(far) = args.far {
        config.thresholds.far = far;
    }
    if let Some(ref addr) = args.addr {
        config.server.addr = addr.clone();
    }
    if args.target_reps.is_some() {
        config.session.target_reps = args.target_reps;
    }
    Ok(config)
}

/// Replay a fixed list of ticks as one set
fn run_replay(mut controller: SessionController, events: Vec<TrackerEvent>, args: &Args) -> anyhow::Result<()> {
    controller.start(None)?;

    for event in events {
        match controller.handle(event) {
            Ok(Some(output)) => print_tick(&output, args)?,
            Ok(None) => {}
            Err(Error::TrackingUnavailable { reason }) => {
                print_warning(&format!("Tracking unavailable ({}), set ended", reason), args);
                break;
            }
            Err(e) => return Err(e.into()),
        }
    }

    finish(&mut controller, args)
}

/// Interactive mode: one tick or command per line
fn run_interactive(mut controller: SessionController, args: &Args) -> anyhow::Result<()> {
    print_header(&controller, args.no_color);
    println!("Enter a distance per line (e.g. 0.30, 28cm, lost).");
    println!("Commands: reset, pause, resume, status, quit");
    println!();

    controller.start(None)?;

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("{}", format_prompt(&controller, args.no_color));
        stdout.flush()?;

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(_) => break,
        }

        let line = line.trim();
        match line.to_ascii_lowercase().as_str() {
            "quit" | "exit" => break,
            "reset" => {
                controller.reset()?;
                println!("Counter reset.");
                continue;
            }
            "pause" | "resume" | "status" => {
                let result = match line.to_ascii_lowercase().as_str() {
                    "pause" => controller.pause(),
                    "resume" => controller.resume(),
                    _ => controller.status(),
                };
                match result {
                    Ok(status) => println!("{}", serde_json::to_string_pretty(&status)?),
                    Err(e) => print_warning(&e.to_string(), args),
                }
                continue;
            }
            _ => {}
        }

        let event = match parse_sample_line(line) {
            Ok(Some(event)) => event,
            Ok(None) => continue,
            Err(e) => {
                print_warning(&e.to_string(), args);
                continue;
            }
        };

        match controller.handle(event) {
            Ok(Some(output)) => print_tick(&output, args)?,
            Ok(None) => println!("(paused, tick dropped)"),
            Err(Error::TrackingUnavailable { reason }) => {
                print_warning(&format!("Tracking unavailable ({}), set ended", reason), args);
                break;
            }
            Err(e) => return Err(e.into()),
        }
    }

    finish(&mut controller, args)
}

/// Stop the set if still active and print its summary
fn finish(controller: &mut SessionController, args: &Args) -> anyhow::Result<()> {
    let summary = if controller.state().is_active() {
        Some(controller.stop()?)
    } else {
        controller.log().sets().last().cloned()
    };

    if let Some(summary) = summary {
        print_summary(&summary, args)?;
    }
    Ok(())
}

fn print_tick(output: &TickOutput, args: &Args) -> anyhow::Result<()> {
    if args.json {
        println!("{}", serde_json::to_string(output)?);
    } else if args.verbose || output.reason.is_transition() {
        if args.no_color {
            println!("{}", output.to_parseable_string());
        } else {
            println!("{}", output.to_terminal_string());
        }
    }
    Ok(())
}

fn print_summary(summary: &SetSummary, args: &Args) -> anyhow::Result<()> {
    if args.json {
        println!("{}", serde_json::to_string_pretty(summary)?);
        return Ok(());
    }

    println!();
    if args.no_color {
        println!("{}", summary.to_parseable_string());
        return Ok(());
    }

    println!("{}", format!("Set {} complete", summary.set_number).bold());
    println!("  Reps:     {}", summary.reps.to_string().green().bold());
    if let Some(target) = summary.target_reps {
        let verdict = if summary.is_goal_achieved {
            "goal reached".green()
        } else {
            "goal missed".yellow()
        };
        println!("  Target:   {} ({})", target, verdict);
    }
    println!("  Duration: {}s", summary.duration_seconds);
    println!(
        "  Tracking: {} of {} ticks lost ({:.0}%)",
        summary.lost_ticks,
        summary.ticks,
        summary.lost_ratio() * 100.0
    );
    if summary.is_personal_best {
        println!("  {}", "Personal best!".cyan().bold());
    }
    Ok(())
}

fn print_warning(message: &str, args: &Args) {
    if args.no_color || args.json {
        eprintln!("warning: {}", message);
    } else {
        eprintln!("{} {}", "warning:".yellow().bold(), message);
    }
}

/// Print header
fn print_header(controller: &SessionController, no_color: bool) {
    let t = controller.thresholds();
    let title = format!(
        "repcount v{} - near {:.2}m / far {:.2}m",
        VERSION,
        t.near(),
        t.far()
    );
    if no_color {
        println!("========================================");
        println!("  {}", title);
        println!("========================================");
    } else {
        println!("{}", title.bold());
    }
    println!();
}

/// Prompt shows phase and count
fn format_prompt(controller: &SessionController, no_color: bool) -> String {
    let (count, phase) = match controller.counter() {
        Some(counter) => counter.snapshot(),
        None => return "[IDLE] > ".to_string(),
    };
    let label = format!("[{} {} | {}]", phase.arrow(), phase, count);
    if no_color {
        format!("{} > ", label)
    } else {
        format!("{} > ", label.color(phase.color()))
    }
}
