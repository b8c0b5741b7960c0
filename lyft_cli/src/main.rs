use clap::{Parser, Subcommand};
use lyft_core::input::{parse_date, parse_reps, parse_set, parse_weight, uniform_sets};
use lyft_core::*;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "lyft")]
#[command(about = "Workout log with weekly per-muscle volume", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Use this config file instead of the default one
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Log one exercise of a workout
    Add {
        /// Workout date (YYYY-MM-DD)
        #[arg(long)]
        date: String,

        /// Exercise name as listed by `lyft exercises`
        #[arg(long)]
        exercise: String,

        /// One set as REPSxWEIGHT (repeatable)
        #[arg(long = "set", value_name = "RxW", conflicts_with_all = ["sets", "reps", "weight"])]
        set: Vec<String>,

        /// Number of identical sets
        #[arg(long, requires_all = ["reps", "weight"])]
        sets: Option<u32>,

        /// Reps per set (with --sets)
        #[arg(long, requires = "sets")]
        reps: Option<String>,

        /// Weight per set (with --sets)
        #[arg(long, requires = "sets")]
        weight: Option<String>,
    },

    /// Import workouts from a CSV file (date,exercise,reps,weight)
    Import {
        file: PathBuf,
    },

    /// Change reps and/or weight of a logged set
    Edit {
        #[arg(long)]
        date: String,

        #[arg(long)]
        exercise: String,

        /// Set number (1-based)
        #[arg(long = "set")]
        set_index: u32,

        #[arg(long)]
        reps: Option<String>,

        #[arg(long)]
        weight: Option<String>,
    },

    /// Delete a workout, one exercise of it, or a single set
    Delete {
        #[arg(long)]
        date: String,

        #[arg(long)]
        exercise: Option<String>,

        /// Set number (1-based)
        #[arg(long = "set", requires = "exercise")]
        set_index: Option<u32>,
    },

    /// Show weekly volume per muscle
    Summary {
        /// ISO week (YYYY-Www)
        #[arg(long, conflicts_with = "date")]
        week: Option<String>,

        /// Any date inside the week
        #[arg(long)]
        date: Option<String>,
    },

    /// List the sets logged in a week
    Show {
        /// ISO week (YYYY-Www)
        #[arg(long)]
        week: String,
    },

    /// Rebuild every summary row from the log
    Recompute,

    /// Create empty summary rows for every week of a year
    Provision {
        #[arg(long)]
        year: i32,
    },

    /// List known exercises and the muscles they work
    Exercises,
}

fn main() -> Result<()> {
    let log = lyft_core::logging::init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(data_dir) = cli.data_dir {
        config.data.data_dir = data_dir;
    }
    log.set_level(&config.logging.level)?;

    catalog::ensure_valid()?;

    match cli.command {
        Commands::Add {
            date,
            exercise,
            set,
            sets,
            reps,
            weight,
        } => cmd_add(&config, &date, exercise, &set, sets, reps, weight),
        Commands::Import { file } => cmd_import(&config, &file),
        Commands::Edit {
            date,
            exercise,
            set_index,
            reps,
            weight,
        } => cmd_edit(&config, &date, exercise, set_index, reps, weight),
        Commands::Delete {
            date,
            exercise,
            set_index,
        } => cmd_delete(&config, &date, exercise, set_index),
        Commands::Summary { week, date } => cmd_summary(&config, week, date),
        Commands::Show { week } => cmd_show(&config, &week),
        Commands::Recompute => cmd_recompute(&config),
        Commands::Provision { year } => cmd_provision(&config, year),
        Commands::Exercises => cmd_exercises(),
    }
}

fn open_logbook(config: &Config) -> Logbook<FileStore> {
    let path = config.ledger_path();
    tracing::debug!("Using ledger at {:?}", path);
    Logbook::new(FileStore::new(path))
        .with_provisioning(config.summary.provision_rows)
}

fn cmd_add(
    config: &Config,
    date: &str,
    exercise: String,
    set: &[String],
    sets: Option<u32>,
    reps: Option<String>,
    weight: Option<String>,
) -> Result<()> {
    let date = parse_date(date)?;
    check_exercise(&exercise)?;

    let performed = match (sets, reps, weight) {
        (Some(count), Some(reps), Some(weight)) => {
            uniform_sets(count, parse_reps(&reps)?, parse_weight(&weight)?)?
        }
        _ => set
            .iter()
            .map(|s| parse_set(s))
            .collect::<Result<Vec<_>>>()?,
    };
    if performed.is_empty() {
        return Err(Error::Validation(
            "give at least one --set RxW, or --sets N --reps R --weight W".into(),
        ));
    }

    let entries = LoggedEntries::new(vec![WorkoutEntry {
        date,
        exercises: vec![ExerciseEntry {
            exercise: exercise.clone(),
            sets: performed,
        }],
    }]);

    let mut logbook = open_logbook(config);
    let weeks = logbook.add_workouts(&entries)?;

    println!(
        "✓ Logged {} set(s) of {} on {}",
        entries.set_count(),
        exercise,
        date
    );
    for week in weeks {
        println!("  Updated {}", week);
    }
    Ok(())
}

fn cmd_import(config: &Config, file: &std::path::Path) -> Result<()> {
    let entries = import::read_entries_csv(file)?;
    if let Err(Error::UnknownExercise(name)) = input::validate_entries(&entries) {
        print_suggestions(&name);
        return Err(Error::UnknownExercise(name));
    }

    let mut logbook = open_logbook(config);
    let weeks = logbook.add_workouts(&entries)?;

    println!(
        "✓ Imported {} set(s) from {} workout(s)",
        entries.set_count(),
        entries.workouts.len()
    );
    for week in weeks {
        println!("  Updated {}", week);
    }
    Ok(())
}

fn cmd_edit(
    config: &Config,
    date: &str,
    exercise: String,
    set_index: u32,
    reps: Option<String>,
    weight: Option<String>,
) -> Result<()> {
    let key = SetKey {
        date: parse_date(date)?,
        exercise,
        set_index,
    };
    let update = SetUpdate {
        reps: reps.as_deref().map(parse_reps).transpose()?,
        weight: weight.as_deref().map(parse_weight).transpose()?,
    };

    let mut logbook = open_logbook(config);
    let updated = logbook.edit_set(&key, update)?;

    println!(
        "✓ Set {} of {} on {} is now {}x{}",
        updated.set_index, updated.exercise, updated.date, updated.reps, updated.weight
    );
    println!("  Recomputed {}", week_of(updated.date));
    Ok(())
}

fn cmd_delete(
    config: &Config,
    date: &str,
    exercise: Option<String>,
    set_index: Option<u32>,
) -> Result<()> {
    let date = parse_date(date)?;
    let target = match (exercise, set_index) {
        (Some(exercise), Some(set_index)) => DeleteTarget::Set(SetKey {
            date,
            exercise,
            set_index,
        }),
        (Some(exercise), None) => DeleteTarget::Exercise { date, exercise },
        (None, _) => DeleteTarget::Workout { date },
    };

    let mut logbook = open_logbook(config);
    let removed = logbook.delete(&target)?;

    if removed == 0 {
        println!("Nothing to delete.");
    } else {
        println!("✓ Deleted {} set(s)", removed);
        println!("  Recomputed {}", week_of(date));
    }
    Ok(())
}

fn cmd_summary(config: &Config, week: Option<String>, date: Option<String>) -> Result<()> {
    let logbook = open_logbook(config);

    let week = match (week, date) {
        (Some(week), _) => Some(week.parse::<WeekId>()?),
        (None, Some(date)) => Some(week_of(parse_date(&date)?)),
        (None, None) => None,
    };

    match week {
        Some(week) => {
            let sets = logbook.week_summary(week)?;
            let (start, end) = week.bounds();
            println!("{} ({} .. {})", week, start, end);
            for (muscle, volume) in sets.iter() {
                println!("  {:<16} {:>6.2}", muscle.name(), volume);
            }
            println!("  {:<16} {:>6.2}", "Total", sets.total());
        }
        None => {
            let table = logbook.summary_table()?;
            if table.is_empty() {
                println!("No summary rows yet.");
            }
            for (week, sets) in table {
                if sets.is_zero() {
                    continue;
                }
                println!("{}  total {:.2}", week, sets.total());
                for (muscle, volume) in sets.iter().filter(|(_, v)| *v != 0.0) {
                    println!("  {:<16} {:>6.2}", muscle.name(), volume);
                }
            }
        }
    }
    Ok(())
}

fn cmd_show(config: &Config, week: &str) -> Result<()> {
    let week: WeekId = week.parse()?;
    let logbook = open_logbook(config);
    let sets = logbook.sets_for_week(week)?;

    if sets.is_empty() {
        println!("No sets logged in {}.", week);
        return Ok(());
    }
    for set in sets {
        println!(
            "{}  {:<36} #{:<2} {:>3} x {}",
            set.date, set.exercise, set.set_index, set.reps, set.weight
        );
    }
    Ok(())
}

fn cmd_recompute(config: &Config) -> Result<()> {
    let mut logbook = open_logbook(config);
    let weeks = logbook.recompute_all()?;
    println!("✓ Recomputed {} week(s)", weeks.len());
    Ok(())
}

fn cmd_provision(config: &Config, year: i32) -> Result<()> {
    let mut logbook = open_logbook(config);
    let created = logbook.provision_year(year)?;
    println!("✓ Created {} summary row(s) for {}", created, year);
    Ok(())
}

fn cmd_exercises() -> Result<()> {
    for def in catalog::exercises() {
        let movers: Vec<String> = def
            .movers
            .iter()
            .map(|(muscle, tier)| format!("{} ({})", muscle, tier_label(*tier)))
            .collect();
        println!("{:<36} {}", def.name, movers.join(", "));
    }
    Ok(())
}

fn tier_label(tier: MoverTier) -> &'static str {
    match tier {
        MoverTier::Primary => "primary",
        MoverTier::Secondary => "secondary",
        MoverTier::Tertiary => "tertiary",
    }
}

/// Fail early on an unknown exercise, pointing at close matches
fn check_exercise(name: &str) -> Result<()> {
    match catalog::lookup(name) {
        Ok(_) => Ok(()),
        Err(e) => {
            print_suggestions(name);
            Err(e)
        }
    }
}

fn print_suggestions(name: &str) {
    let hits: Vec<&str> = name
        .split_whitespace()
        .flat_map(catalog::suggest)
        .collect::<std::collections::BTreeSet<_>>()
        .into_iter()
        .collect();
    if !hits.is_empty() {
        eprintln!("Unknown exercise '{}'. Did you mean:", name);
        for hit in hits {
            eprintln!("  - {}", hit);
        }
    }
}
