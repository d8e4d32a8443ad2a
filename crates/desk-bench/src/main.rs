use std::io;
use std::time::{Duration, Instant};

use clap::Parser;
use indoc::formatdoc;

use term_desktop::session::{
    NotificationRequest, OpenOptions, Point, SessionCommand, SessionStore, Size, WindowId,
};

#[derive(Parser, Debug)]
#[command(
    name = "desk-bench",
    version = env!("CARGO_PKG_VERSION"),
    about = "Command-churn benchmark for the desktop session store"
)]
struct BenchCli {
    /// Number of command rounds to run.
    #[arg(short = 'r', long = "rounds", value_name = "N", default_value_t = 100_000)]
    rounds: u64,

    /// Window population to churn against.
    #[arg(short = 'w', long = "windows", value_name = "N", default_value_t = 32)]
    windows: usize,
}

struct BenchConfig {
    rounds: u64,
    windows: usize,
}

impl TryFrom<&BenchCli> for BenchConfig {
    type Error = String;

    fn try_from(cli: &BenchCli) -> Result<Self, Self::Error> {
        if cli.rounds == 0 {
            return Err("rounds must be positive".to_string());
        }
        if !(1..=1024).contains(&cli.windows) {
            return Err("windows must be between 1 and 1024".to_string());
        }
        Ok(Self {
            rounds: cli.rounds,
            windows: cli.windows,
        })
    }
}

fn main() -> io::Result<()> {
    let args = BenchCli::parse();
    let config = BenchConfig::try_from(&args)
        .map_err(|msg| io::Error::new(io::ErrorKind::InvalidInput, msg))?;

    let stats = run_benchmark(&config);
    println!("{}", stats.report(&config));
    Ok(())
}

struct BenchStats {
    elapsed: Duration,
    commands: u64,
    expired: u64,
}

impl BenchStats {
    fn report(&self, config: &BenchConfig) -> String {
        let per_second = self.commands as f64 / self.elapsed.as_secs_f64().max(f64::EPSILON);
        formatdoc!(
            "
            desk-bench results
              windows        : {windows}
              rounds         : {rounds}
              commands       : {commands}
              expired toasts : {expired}
              elapsed        : {elapsed:.3?}
              throughput     : {per_second:.0} commands/s
            ",
            windows = config.windows,
            rounds = config.rounds,
            commands = self.commands,
            expired = self.expired,
            elapsed = self.elapsed,
            per_second = per_second,
        )
    }
}

/// Churns the store through a fixed rotation of focus, geometry,
/// minimize/restore, and notification traffic. The rotation is
/// deterministic so runs are comparable.
fn run_benchmark(config: &BenchConfig) -> BenchStats {
    let mut store = SessionStore::new();
    let t0 = Instant::now();

    let ids: Vec<WindowId> = (0..config.windows)
        .map(|idx| {
            match store.open_window(
                &format!("bench-app-{idx}"),
                None,
                None,
                OpenOptions::default(),
                t0,
            ) {
                term_desktop::session::OpenOutcome::Opened(id) => id,
                other => unreachable!("benchmark app ids are unique: {other:?}"),
            }
        })
        .collect();

    let mut commands: u64 = 0;
    let mut expired: u64 = 0;
    let start = Instant::now();
    for round in 0..config.rounds {
        let id = ids[(round % ids.len() as u64) as usize];
        let phase = round % 6;
        let command = match phase {
            0 => SessionCommand::FocusWindow(id),
            1 => SessionCommand::MoveWindow(
                id,
                Point::new((round % 80) as i32, (round % 24) as i32),
            ),
            2 => SessionCommand::ResizeWindow(
                id,
                Size::new(20 + (round % 40) as u16, 6 + (round % 12) as u16),
            ),
            3 => SessionCommand::MinimizeWindow(id),
            4 => SessionCommand::FocusWindow(id),
            _ => SessionCommand::AddNotification(
                NotificationRequest::info("bench", "tick")
                    .with_duration(Duration::from_micros(1)),
            ),
        };
        store.apply(command, t0 + Duration::from_micros(round));
        commands += 1;
        if phase == 5 {
            expired += store
                .expire_notifications(t0 + Duration::from_micros(round + 10))
                .len() as u64;
        }
    }

    BenchStats {
        elapsed: start.elapsed(),
        commands,
        expired,
    }
}
