use std::path::PathBuf;

use clap::{Parser, Subcommand};

use u_roster::assign::RosterStats;
use u_roster::config::RosterConfig;
use u_roster::exchange::csv_io;
use u_roster::logging;
use u_roster::session::{ImportOutcome, Session};
use u_roster::validation::validate_roster;

#[derive(Parser)]
#[command(name = "u-roster")]
#[command(about = "Assign students to classes with group cohesion and gender balance")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Assign (or restore) a roster from CSV and write the export CSV
    Assign {
        /// Input CSV with a header row
        #[arg(short, long)]
        input: PathBuf,

        /// Output CSV path
        #[arg(short, long)]
        output: PathBuf,

        /// Number of classes (overrides config)
        #[arg(short, long)]
        classes: Option<usize>,

        /// Shuffle seed (overrides config)
        #[arg(short, long)]
        seed: Option<u64>,

        /// JSON config file
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Print balance statistics for an already assigned CSV
    Stats {
        /// CSV carrying an assigned-class column
        #[arg(short, long)]
        input: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    logging::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Assign {
            input,
            output,
            classes,
            seed,
            config,
        } => {
            let mut config = match config {
                Some(path) => RosterConfig::load(path)?,
                None => RosterConfig::default(),
            };
            if let Some(seed) = seed {
                config.seed = Some(seed);
            }

            let mut session = Session::new(config);
            let rows = csv_io::read_rows_from_path(&input)?;
            match session.import(&rows) {
                ImportOutcome::Restored { students, classes } => {
                    tracing::info!("Restored {} students into {} classes", students, classes);
                }
                ImportOutcome::AwaitingAssignment { students, groups } => {
                    if let Some(count) = classes {
                        session.set_class_count(count)?;
                    }
                    tracing::info!(
                        "Assigning {} students ({} groups) into {} classes",
                        students,
                        groups,
                        session.config().class_count
                    );
                    session.auto_assign_configured()?;
                }
            }

            if let Some(roster) = session.roster() {
                if let Err(errors) = validate_roster(roster) {
                    for e in &errors {
                        tracing::warn!("{}", e.message);
                    }
                }
            }

            print_stats(&session.stats()?);
            csv_io::write_rows_to_path(&session.export_rows()?, &output)?;
            tracing::info!("Wrote {}", output.display());
        }
        Commands::Stats { input } => {
            let mut session = Session::default();
            let rows = csv_io::read_rows_from_path(&input)?;
            if let ImportOutcome::AwaitingAssignment { .. } = session.import(&rows) {
                anyhow::bail!("{} has no assigned-class column", input.display());
            }
            print_stats(&session.stats()?);
        }
    }

    Ok(())
}

fn print_stats(stats: &RosterStats) {
    println!("class  total  male  female  unknown  moved");
    for c in &stats.classes {
        let dup = if c.has_duplicate_names() { "  (동명)" } else { "" };
        println!(
            "{:>5}  {:>5}  {:>4}  {:>6}  {:>7}  {:>5}{}",
            c.class_id, c.total, c.male, c.female, c.unknown, c.manually_moved, dup
        );
    }
    println!(
        "total {} (male {}, female {}), spread male {} / female {}",
        stats.total, stats.male, stats.female, stats.male_spread, stats.female_spread
    );
    if !stats.split_groups.is_empty() {
        println!("split groups: {}", stats.split_groups.join(", "));
    }
}
