//! Flappy Wings headless host
//!
//! Drives the simulation at a fixed tick rate without a window. Useful for
//! demos (autopilot), soak runs and piping frame snapshots into another
//! renderer as JSON lines.

use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use anyhow::{Context, Result, bail};

use flappy_wings::sim::{GamePhase, GameState, PointerSnapshot, TickInput, tick};
use flappy_wings::{FrameScheduler, FrameView, SimConfig};

/// Command line options
#[derive(Debug)]
struct HostArgs {
    config: Option<PathBuf>,
    seed: Option<u64>,
    ticks: u64,
    realtime: bool,
    json: bool,
    manual: bool,
}

impl Default for HostArgs {
    fn default() -> Self {
        Self {
            config: None,
            seed: None,
            ticks: 1800,
            realtime: false,
            json: false,
            manual: false,
        }
    }
}

const USAGE: &str = "usage: flappy-wings [--config PATH] [--seed N] [--ticks N] [--realtime] [--json] [--manual]";

impl HostArgs {
    fn parse(mut args: impl Iterator<Item = String>) -> Result<Self> {
        let mut parsed = Self::default();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" => {
                    let path = args.next().context("--config needs a path")?;
                    parsed.config = Some(PathBuf::from(path));
                }
                "--seed" => {
                    let seed = args.next().context("--seed needs a value")?;
                    parsed.seed = Some(seed.parse().with_context(|| format!("bad seed `{seed}`"))?);
                }
                "--ticks" => {
                    let ticks = args.next().context("--ticks needs a value")?;
                    parsed.ticks = ticks
                        .parse()
                        .with_context(|| format!("bad tick count `{ticks}`"))?;
                }
                "--realtime" => parsed.realtime = true,
                "--json" => parsed.json = true,
                "--manual" => parsed.manual = true,
                "-h" | "--help" => {
                    println!("{USAGE}");
                    std::process::exit(0);
                }
                other => bail!("unknown argument `{other}`\n{USAGE}"),
            }
        }
        Ok(parsed)
    }
}

/// Seed from the wall clock when none is given
fn time_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

/// Host-side game loop state
struct Host {
    state: GameState,
    scheduler: FrameScheduler,
    tick_ms: f64,
    autopilot: bool,
    out: Option<BufWriter<std::io::Stdout>>,
    /// Raised by the host (Ctrl-C); checked once per tick
    stop: Arc<AtomicBool>,
    best_score: u32,
    runs: u32,
}

impl Host {
    fn new(config: SimConfig, seed: u64, args: &HostArgs) -> Result<Self> {
        let scheduler = FrameScheduler::from_fps(config.target_fps);
        let tick_ms = config.tick_ms();
        let state = GameState::new(config, seed).context("invalid simulation config")?;
        Ok(Self {
            state,
            scheduler,
            tick_ms,
            autopilot: !args.manual,
            out: args.json.then(|| BufWriter::new(std::io::stdout())),
            stop: Arc::new(AtomicBool::new(false)),
            best_score: 0,
            runs: 0,
        })
    }

    /// Run one simulation tick and report it
    fn step(&mut self) -> Result<()> {
        let now_ms = (self.state.time_ticks as f64 * self.tick_ms) as u64;
        let input = TickInput {
            now_ms,
            pointer: PointerSnapshot::default(),
            autopilot: self.autopilot,
        };
        tick(&mut self.state, &input);

        let view = FrameView::capture(&self.state);
        if view.point_scored() {
            self.best_score = self.best_score.max(view.score);
        }
        if view.game_over() {
            self.runs += 1;
        }
        if let Some(out) = self.out.as_mut() {
            serde_json::to_writer(&mut *out, &view).context("failed to encode frame")?;
            out.write_all(b"\n").context("failed to write frame")?;
        }
        Ok(())
    }

    /// Tick limit reached or a stop was requested
    fn should_stop(&self, ticks: u64) -> bool {
        self.state.time_ticks >= ticks || self.stop.load(Ordering::Relaxed)
    }

    fn run(&mut self, ticks: u64, realtime: bool) -> Result<()> {
        if !realtime {
            while !self.should_stop(ticks) {
                self.step()?;
            }
            return Ok(());
        }

        let mut last = Instant::now();
        while !self.should_stop(ticks) {
            let now = Instant::now();
            let due = self.scheduler.accumulate(now - last);
            last = now;
            for _ in 0..due {
                if self.should_stop(ticks) {
                    break;
                }
                self.step()?;
            }
            std::thread::sleep(self.scheduler.until_next().max(Duration::from_millis(1)));
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        if let Some(out) = self.out.as_mut() {
            out.flush().context("failed to flush frames")?;
        }
        if self.stop.load(Ordering::Relaxed) {
            log::info!("Stop requested");
        }
        log::info!(
            "Finished after {} ticks: phase {:?}, score {}, best {}, runs ended {}",
            self.state.time_ticks,
            self.state.phase,
            self.state.score.score,
            self.best_score,
            self.runs
        );
        if self.state.phase == GamePhase::GameOver {
            log::info!("Last run ended; restart control is showing");
        }
        Ok(())
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = HostArgs::parse(std::env::args().skip(1))?;
    log::info!("Flappy Wings (headless) starting...");

    let config = match &args.config {
        Some(path) => SimConfig::load(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => SimConfig::default(),
    };
    let seed = args.seed.unwrap_or_else(time_seed);
    log::info!("Game initialized with seed: {}", seed);

    let mut host = Host::new(config, seed, &args)?;
    let stop = Arc::clone(&host.stop);
    ctrlc::set_handler(move || stop.store(true, Ordering::Relaxed))
        .context("failed to install Ctrl-C handler")?;
    host.run(args.ticks, args.realtime)?;
    host.finish()
}
