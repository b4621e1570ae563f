use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use lift_core::history::{format_sets, HistoryQuery, SortOrder};
use lift_core::progress::{weekly_progress, GoalStatus};
use lift_core::report::{self, LoadStatus};
use lift_core::*;
use std::collections::HashSet;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "liftlog")]
#[command(about = "Personal strength-training log", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage saved exercises
    Exercise {
        #[command(subcommand)]
        action: ExerciseAction,
    },

    /// Log sets for one exercise, adding to any already logged that day
    Log {
        /// Exercise id or name
        #[arg(long, short)]
        exercise: String,

        /// Training date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Sets as WEIGHTxREPS, suffix `!` for near failure (e.g. 100x5!)
        #[arg(required = true, value_parser = parse_set)]
        sets: Vec<TrainingSet>,
    },

    /// List recorded training
    History {
        /// Only this movement pattern
        #[arg(long, value_parser = parse_pattern)]
        pattern: Option<MovementPattern>,

        /// Only this date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Oldest first
        #[arg(long)]
        asc: bool,
    },

    /// Delete records by id
    Delete {
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// Near-failure sets against the weekly goal
    Progress {
        /// Day the 7-day window ends on, defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Weekly trends and recent-vs-reference comparison
    Analyze {
        #[arg(long, value_enum, default_value_t = MetricArg::Sets)]
        metric: MetricArg,

        /// Number of weeks to chart
        #[arg(long)]
        weeks: Option<usize>,

        /// Anchor date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Export all sets to CSV
    Export {
        /// Output file
        path: PathBuf,
    },
}

#[derive(Subcommand)]
enum ExerciseAction {
    /// Save a new exercise
    Add {
        name: String,

        #[arg(long, value_parser = parse_pattern)]
        pattern: MovementPattern,
    },

    /// List saved exercises
    List,

    /// Remove a saved exercise (history is kept)
    Remove { id: String },
}

#[derive(Clone, Copy, ValueEnum)]
enum MetricArg {
    /// Near-failure sets
    Sets,
    /// Weight × reps
    Load,
    /// Per-exercise max weight
    Max,
}

fn main() -> Result<()> {
    // Initialize logging
    lift_core::logging::init();

    let cli = Cli::parse();

    let config = Config::load()?;
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data.data_dir.clone());
    tracing::debug!("Using data directory {:?}", data_dir);
    let store = FileStore::new(data_dir);

    match cli.command {
        Commands::Exercise { action } => cmd_exercise(store, action),
        Commands::Log {
            exercise,
            date,
            sets,
        } => cmd_log(store, &exercise, date.unwrap_or_else(today), sets),
        Commands::History { pattern, date, asc } => cmd_history(store, pattern, date, asc),
        Commands::Delete { ids } => cmd_delete(store, ids),
        Commands::Progress { date } => cmd_progress(store, date.unwrap_or_else(today), &config),
        Commands::Analyze {
            metric,
            weeks,
            date,
        } => cmd_analyze(
            store,
            metric,
            weeks.unwrap_or(config.analysis.default_weeks),
            date.unwrap_or_else(today),
            &config,
        ),
        Commands::Export { path } => cmd_export(store, &path),
    }
}

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

fn cmd_exercise(store: FileStore, action: ExerciseAction) -> Result<()> {
    let mut catalog = ExerciseCatalog::load(store);

    match action {
        ExerciseAction::Add { name, pattern } => {
            let exercise = catalog.add(&name, pattern)?;
            println!("✓ Saved {} ({})", exercise.name, exercise.pattern);
            println!("  id: {}", exercise.id);
        }
        ExerciseAction::List => {
            if catalog.exercises().is_empty() {
                println!("No saved exercises.");
            }
            for pattern in MovementPattern::ALL {
                let exercises: Vec<_> = catalog.by_pattern(pattern).collect();
                if exercises.is_empty() {
                    continue;
                }
                println!("{}", pattern);
                for exercise in exercises {
                    println!("  {}  {}", exercise.id, exercise.name);
                }
            }
        }
        ExerciseAction::Remove { id } => {
            if catalog.remove(&id)? {
                println!("✓ Removed exercise {}", id);
            } else {
                println!("No exercise with id {}", id);
            }
        }
    }

    Ok(())
}

fn cmd_log(
    store: FileStore,
    exercise: &str,
    date: NaiveDate,
    sets: Vec<TrainingSet>,
) -> Result<()> {
    let catalog = ExerciseCatalog::load(store.clone());
    let exercise = catalog
        .find(exercise)
        .cloned()
        .ok_or_else(|| Error::Catalog(format!("Unknown exercise: {}", exercise)))?;

    // Reject the whole entry before anything is written
    for set in &sets {
        lift_core::session::validate_set(set)?;
    }

    let mut repository = RecordRepository::load(store);
    let mut session = WorkoutSession::new(date);
    session.resume_exercise(&repository, exercise.clone())?;
    let stored = session.set_number().saturating_sub(1);

    let mut saved = None;
    for set in sets {
        saved = Some(session.confirm_set(&mut repository, set)?);
    }
    session.complete();

    if let Some(record) = saved {
        println!(
            "✓ Logged {} on {}: {}",
            exercise.name,
            date,
            format_sets(&record.sets)
        );
        if stored > 0 {
            println!("  added to {} set(s) already logged", stored);
        }
        println!("  record: {}", record.id);
    }

    Ok(())
}

fn cmd_history(
    store: FileStore,
    pattern: Option<MovementPattern>,
    date: Option<NaiveDate>,
    asc: bool,
) -> Result<()> {
    let repository = RecordRepository::load(store);

    let query = HistoryQuery {
        pattern,
        date,
        order: if asc {
            SortOrder::Ascending
        } else {
            SortOrder::Descending
        },
    };
    let records = query.run(repository.records());

    if records.is_empty() {
        println!("No training records found.");
        return Ok(());
    }

    for record in records {
        println!(
            "{}  {} ({})  {}",
            record.date,
            record.exercise.name,
            record.exercise.pattern,
            format_sets(&record.sets)
        );
        println!("    id: {}", record.id);
    }

    Ok(())
}

fn cmd_delete(store: FileStore, ids: Vec<String>) -> Result<()> {
    let mut repository = RecordRepository::load(store);

    let removed = if ids.len() == 1 {
        usize::from(repository.delete(&ids[0])?)
    } else {
        let ids: HashSet<String> = ids.into_iter().collect();
        repository.delete_many(&ids)?
    };

    println!("✓ Deleted {} record(s)", removed);
    Ok(())
}

fn cmd_progress(store: FileStore, date: NaiveDate, config: &Config) -> Result<()> {
    let repository = RecordRepository::load(store);
    let progress = weekly_progress(repository.records(), date, config.analysis.weekly_goal);

    println!("Near-failure sets, 7 days to {}", date);
    for p in progress {
        let note = match p.status {
            GoalStatus::Complete => format!("done ({} sets)", p.near_failure_sets),
            GoalStatus::Halfway | GoalStatus::Behind => format!("{} to go", p.remaining),
        };
        println!(
            "  {:<22} {:>3}/{:<3} {:>5.0}%  {}",
            p.pattern.label(),
            p.near_failure_sets,
            p.goal,
            p.percentage,
            note
        );
    }

    Ok(())
}

fn cmd_analyze(
    store: FileStore,
    metric: MetricArg,
    weeks: usize,
    anchor: NaiveDate,
    config: &Config,
) -> Result<()> {
    if weeks == 0 {
        return Err(Error::Other("--weeks must be at least 1".into()));
    }

    let repository = RecordRepository::load(store);
    let records = repository.records();

    let metric = match metric {
        MetricArg::Sets => Metric::NearFailureSets,
        MetricArg::Load => Metric::Load,
        MetricArg::Max => return analyze_max_weights(records, anchor, weeks),
    };

    println!("Recent 7 days vs weekly average of days 8-35 (anchor {})", anchor);
    for c in report::compare_windows(records, anchor, metric, &config.analysis.ratio_bands()) {
        let ratio = match (c.ratio, c.status) {
            (Some(ratio), Some(status)) => format!("{:.1} {}", ratio, status_label(status)),
            _ => "-".to_string(),
        };
        println!(
            "  {:<22} {:>8.1}  ref {:>8.1}/wk  ratio {}",
            c.pattern.label(),
            c.recent,
            c.reference,
            ratio
        );
    }

    for series in report::all_pattern_series(records, anchor, weeks, metric) {
        println!();
        println!(
            "{} (long-term {:.1}/wk)",
            series.pattern, series.long_term_average
        );
        for week in &series.weeks {
            println!(
                "  {:<12} {:>8.1}  ratio {:.2}",
                week.label, week.value, week.ratio
            );
        }
    }

    Ok(())
}

fn analyze_max_weights(records: &[TrainingRecord], anchor: NaiveDate, weeks: usize) -> Result<()> {
    let comparisons = report::compare_max_weights(records, anchor);
    if comparisons.is_empty() {
        println!("No sets recorded in the last 7 days.");
        return Ok(());
    }

    for c in comparisons {
        let change = match c.change_percent {
            Some(pct) => format!("{:+.1}%", pct),
            None => "new".to_string(),
        };
        println!("{} ({})  {}kg  {}", c.exercise, c.pattern, c.recent, change);

        let Some(series) = report::max_weight_series(records, anchor, weeks, &c.exercise) else {
            continue;
        };
        for (i, week) in series.weeks.iter().enumerate() {
            let trend = series
                .trend_line
                .as_ref()
                .map(|line| format!("  trend {:.1}", line[i]))
                .unwrap_or_default();
            println!("  {:<12} {:>7.1}kg{}", week.label, week.weight, trend);
        }
    }

    Ok(())
}

fn cmd_export(store: FileStore, path: &std::path::Path) -> Result<()> {
    let repository = RecordRepository::load(store);
    let rows = lift_core::export::export_csv(repository.records(), path)?;
    println!("✓ Exported {} sets to {}", rows, path.display());
    Ok(())
}

fn status_label(status: LoadStatus) -> &'static str {
    match status {
        LoadStatus::High => "high",
        LoadStatus::Steady => "steady",
        LoadStatus::Low => "low",
    }
}

fn parse_pattern(s: &str) -> std::result::Result<MovementPattern, String> {
    s.parse::<MovementPattern>().map_err(|e| e.to_string())
}

/// Parse `WEIGHTxREPS` with an optional trailing `!` for near failure
fn parse_set(s: &str) -> std::result::Result<TrainingSet, String> {
    let s = s.trim();
    let (body, near_failure) = match s.strip_suffix('!') {
        Some(body) => (body, true),
        None => (s, false),
    };

    let (weight, reps) = body
        .split_once(['x', 'X', '×'])
        .ok_or_else(|| format!("expected WEIGHTxREPS, got {:?}", s))?;
    let weight: f64 = weight
        .trim()
        .parse()
        .ok()
        .filter(|w: &f64| w.is_finite())
        .ok_or_else(|| format!("invalid weight in {:?}", s))?;
    let reps: u32 = reps
        .trim()
        .parse()
        .map_err(|_| format!("invalid reps in {:?}", s))?;

    Ok(TrainingSet::new(weight, reps, near_failure))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_set() {
        assert_eq!(parse_set("100x5").unwrap(), TrainingSet::new(100.0, 5, false));
        assert_eq!(parse_set("62.5X8!").unwrap(), TrainingSet::new(62.5, 8, true));
        assert_eq!(parse_set("40×12").unwrap(), TrainingSet::new(40.0, 12, false));
        assert!(parse_set("100").is_err());
        assert!(parse_set("heavyx5").is_err());
        assert!(parse_set("100x-1").is_err());
        assert!(parse_set("infx5").is_err());
        assert!(parse_set("1e400x5").is_err());
        assert!(parse_set("NaNx5").is_err());
    }
}
