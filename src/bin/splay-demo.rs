use std::{
    collections::BTreeSet,
    fmt,
    fs,
    io::{self, BufWriter, Read, Write},
    path::PathBuf,
    time::{Duration, Instant},
};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use log::{debug, info, warn};
use rand::{rngs::StdRng, Rng, SeedableRng};

use splay_tree::{
    harness::{parse_line, Command, Session, Target},
    MultiSet, Set,
};

/// Drive the splay tree containers with a line oriented command stream
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand, Debug)]
enum Action {
    /// Run commands against a splay tree set, printing the answers
    Run {
        /// Read commands from a file instead of stdin
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Keep repeated keys
        #[arg(short, long)]
        multi: bool,
    },

    /// Time the same commands against the splay tree set and a btree set
    Bench {
        /// Read commands from a file instead of stdin
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Write a random command stream
    Generate {
        /// Number of commands
        #[arg(short, long, default_value = "1000000")]
        count: usize,

        /// Keys are drawn from 0 to this value, inclusive
        #[arg(short, long, default_value = "1000")]
        max_key: i64,

        /// Seed for a reproducible stream
        #[arg(short, long)]
        seed: Option<u64>,

        /// Include erase commands
        #[arg(short, long)]
        erase: bool,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    debug!("{cli:?}");

    match cli.action {
        Action::Run { input, multi } => {
            let text = read_input(input)?;
            let answers = if multi {
                run(Session::new(MultiSet::<i64>::new()), &text)?
            } else {
                run(Session::new(Set::<i64>::new()), &text)?
            };
            io::stdout().write_all(answers.as_bytes())?;
        }
        Action::Bench { input } => {
            let text = read_input(input)?;
            bench(&text)?;
        }
        Action::Generate {
            count,
            max_key,
            seed,
            erase,
        } => {
            if max_key < 0 {
                bail!("--max-key must not be negative");
            }
            let rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_os_rng(),
            };
            generate(rng, count, max_key, erase)?;
        }
    }

    Ok(())
}

fn read_input(input: Option<PathBuf>) -> Result<String> {
    match input {
        Some(path) => fs::read_to_string(&path)
            .with_context(|| format!("unable to read commands from {}", path.display())),
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("unable to read commands from stdin")?;
            Ok(text)
        }
    }
}

// Run a whole script, collecting the answers
fn run<T: Target>(mut session: Session<T>, text: &str) -> Result<String> {
    let mut answers = String::new();
    for (n, line) in text.lines().enumerate() {
        session
            .execute_line(line, &mut answers)
            .with_context(|| format!("line {}", n + 1))?;
    }
    info!(
        "{}: {} commands, {} keys",
        session.target().name(),
        session.executed(),
        session.target().len()
    );
    Ok(answers)
}

// Answers are counted rather than kept so the timing is not dominated by output
struct Tally {
    lines: usize,
    checksum: u64,
}

impl fmt::Write for Tally {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for b in s.bytes() {
            if b == b'\n' {
                self.lines += 1;
            }
            self.checksum = self.checksum.wrapping_mul(31).wrapping_add(u64::from(b));
        }
        Ok(())
    }
}

fn replay<T: Target>(target: T, commands: &[Command]) -> Result<(Duration, Tally)> {
    let mut session = Session::new(target);
    let mut tally = Tally {
        lines: 0,
        checksum: 0,
    };

    let start = Instant::now();
    for command in commands {
        session.execute(*command, &mut tally)?;
    }
    let elapsed = start.elapsed();

    info!(
        "total time for {}: {:.6}s",
        session.target().name(),
        elapsed.as_secs_f64()
    );
    Ok((elapsed, tally))
}

fn bench(text: &str) -> Result<()> {
    let mut commands = Vec::new();
    for (n, line) in text.lines().enumerate() {
        if let Some(command) = parse_line(line).with_context(|| format!("line {}", n + 1))? {
            commands.push(command);
        }
    }
    info!("replaying {} commands", commands.len());

    let (splay, a) = replay(Set::<i64>::new(), &commands)?;
    let (btree, b) = replay(BTreeSet::<i64>::new(), &commands)?;

    if (a.lines, a.checksum) != (b.lines, b.checksum) {
        warn!("the containers gave different answers");
    }

    println!(
        "{} commands: splay tree {:.6}s, btree {:.6}s",
        commands.len(),
        splay.as_secs_f64(),
        btree.as_secs_f64()
    );
    Ok(())
}

fn generate<R: Rng>(mut rng: R, count: usize, max_key: i64, erase: bool) -> Result<()> {
    let kinds = if erase { 4 } else { 3 };
    let mut out = BufWriter::new(io::stdout().lock());

    for _ in 0..count {
        let key = rng.random_range(0..=max_key);
        let command = match rng.random_range(0..kinds) {
            0 => Command::Check(key),
            1 => Command::Insert(key),
            2 => Command::Count(key),
            _ => Command::Erase(key),
        };
        writeln!(out, "{command}")?;
    }

    out.flush()?;
    Ok(())
}
