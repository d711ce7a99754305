//! `lifeweeks` terminal front end.
//!
//! # Responsibility
//! - Parse commands and drive the core session controller.
//! - Render stats, the week grid and the day picker as plain text.
//!
//! # Commands
//! - `stats`: time lived, biological rhythms and perspective.
//! - `grid`: one line per year of life.
//! - `week`: date range and day picker for one cell.
//! - `memory get|set|list`: per-day memories.

mod render;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use lifeweeks_core::db::open_db;
use lifeweeks_core::model::life::ISO_DATE_FORMAT;
use lifeweeks_core::model::WEEKS_PER_YEAR;
use lifeweeks_core::{
    init_logging, Action, AppConfig, BirthDate, Clock, KeyValueStore, LifeCalendar,
    LifeExpectancy, MemoryStore, SqliteKeyValueStore, SystemClock, WeekPosition,
};
use log::info;
use std::path::PathBuf;
use std::process::ExitCode;

const EXIT_INVALID_INPUT: u8 = 2;

/// Life in weeks: a calendar of every week of an expected lifetime.
#[derive(Parser)]
#[command(name = "lifeweeks")]
#[command(version)]
#[command(about = "Visualize a lifetime in weeks and keep a memory for any day")]
#[command(propagate_version = true)]
struct Cli {
    /// SQLite file holding memories (overrides LIFEWEEKS_DB_PATH)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Absolute log directory (overrides LIFEWEEKS_LOG_DIR)
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Time lived, biological rhythms and perspective
    Stats(LifeArgs),
    /// Print the week grid, one row per year
    Grid(LifeArgs),
    /// Show one week's date range and its seven days
    Week {
        #[command(flatten)]
        life: LifeArgs,
        /// Row index, 0-based
        #[arg(long)]
        year: u32,
        /// Column index, 0-based (0..52)
        #[arg(long)]
        week: u32,
    },
    /// Read and write per-day memories
    Memory {
        #[command(subcommand)]
        action: MemoryCommands,
    },
}

#[derive(Args)]
struct LifeArgs {
    /// Birth date, YYYY-MM-DD
    #[arg(long)]
    born: String,
    /// Expected lifespan in years (1-120)
    #[arg(long)]
    years: Option<String>,
    /// Evaluate as of this date instead of the system clock
    #[arg(long)]
    today: Option<String>,
}

#[derive(Subcommand)]
enum MemoryCommands {
    /// Print the memory stored for one day
    Get {
        #[arg(long)]
        born: String,
        #[arg(long)]
        date: String,
    },
    /// Store a memory; empty text clears it
    Set {
        #[arg(long)]
        born: String,
        #[arg(long)]
        date: String,
        #[arg(long, default_value = "")]
        text: String,
    },
    /// List every memory for a birth date
    List {
        #[arg(long)]
        born: String,
    },
}

/// `--today` override or the wall clock.
enum CliClock {
    System(SystemClock),
    Fixed(NaiveDate),
}

impl Clock for CliClock {
    fn today(&self) -> NaiveDate {
        match self {
            Self::System(clock) => clock.today(),
            Self::Fixed(date) => *date,
        }
    }
}

/// Failure that maps to a process exit code.
enum CliError {
    InvalidInput(String),
    Runtime(String),
}

impl CliError {
    fn exit_code(&self) -> ExitCode {
        match self {
            Self::InvalidInput(_) => ExitCode::from(EXIT_INVALID_INPUT),
            Self::Runtime(_) => ExitCode::FAILURE,
        }
    }

    fn message(&self) -> &str {
        match self {
            Self::InvalidInput(message) | Self::Runtime(message) => message,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let mut config = AppConfig::from_env();
    if let Some(db) = cli.db.clone() {
        config.db_path = db;
    }
    if let Some(dir) = cli.log_dir.clone() {
        config.log_dir = dir;
    }
    match cli.verbose {
        0 => {}
        1 => config.log_level = "debug".to_string(),
        _ => config.log_level = "trace".to_string(),
    }

    if let Err(err) = init_logging(&config.log_level, &config.log_dir.to_string_lossy()) {
        eprintln!("warning: logging disabled: {err}");
    }

    match run(cli.command, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message());
            err.exit_code()
        }
    }
}

fn run(command: Commands, config: &AppConfig) -> Result<(), CliError> {
    let conn = open_db(&config.db_path).map_err(|err| {
        CliError::Runtime(format!(
            "failed to open `{}`: {err}",
            config.db_path.display()
        ))
    })?;
    let backend = SqliteKeyValueStore::try_new(&conn)
        .map_err(|err| CliError::Runtime(format!("storage init failed: {err}")))?;

    match command {
        Commands::Stats(life) => {
            let calendar = start_calendar(&backend, &life, config)?;
            let frame = calendar
                .render()
                .ok_or_else(|| CliError::Runtime("nothing to render".to_string()))?;
            print!("{}", render::stats_report(&frame));
        }
        Commands::Grid(life) => {
            let calendar = start_calendar(&backend, &life, config)?;
            let frame = calendar
                .render()
                .ok_or_else(|| CliError::Runtime("nothing to render".to_string()))?;
            print!("{}", render::grid_report(&frame));
        }
        Commands::Week { life, year, week } => {
            let mut calendar = start_calendar(&backend, &life, config)?;
            let frame = calendar
                .render()
                .ok_or_else(|| CliError::Runtime("nothing to render".to_string()))?;
            let years = frame.stats.expected_years();
            if year >= years || week >= WEEKS_PER_YEAR {
                return Err(CliError::InvalidInput(format!(
                    "cell ({year}, {week}) is outside the {years}x{WEEKS_PER_YEAR} grid"
                )));
            }
            let position = WeekPosition::new(year, week);
            calendar.dispatch(Action::ClickWeek(position));
            let options = calendar.day_picker().unwrap_or_default();
            let memories = calendar
                .state()
                .session
                .as_ref()
                .map(|session| session.memories.clone())
                .unwrap_or_default();
            print!("{}", render::week_report(&frame, position, &options, &memories));
        }
        Commands::Memory { action } => run_memory(&backend, action)?,
    }
    Ok(())
}

fn start_calendar<'a, S: KeyValueStore>(
    backend: &'a S,
    life: &LifeArgs,
    config: &AppConfig,
) -> Result<LifeCalendar<&'a S, CliClock>, CliError> {
    let birth = parse_birth(&life.born)?;
    let years = match &life.years {
        Some(raw) => LifeExpectancy::parse(raw)
            .map_err(|err| CliError::InvalidInput(err.to_string()))?,
        None => config.default_life_expectancy,
    };
    let clock = match &life.today {
        Some(raw) => CliClock::Fixed(parse_date(raw)?),
        None => CliClock::System(SystemClock),
    };
    if birth.date() > clock.today() {
        return Err(CliError::InvalidInput(format!(
            "birth date {birth} is after today {}",
            clock.today()
        )));
    }

    let mut calendar = LifeCalendar::new(MemoryStore::new(backend), clock);
    calendar.dispatch(Action::EditBirthDate(birth.to_string()));
    calendar.dispatch(Action::EditLifeExpectancy(years.to_string()));
    if !calendar.visualize() {
        return Err(CliError::InvalidInput(
            "cannot visualize with the given input".to_string(),
        ));
    }
    Ok(calendar)
}

fn run_memory<S: KeyValueStore>(backend: &S, action: MemoryCommands) -> Result<(), CliError> {
    let store = MemoryStore::new(backend);
    match action {
        MemoryCommands::Get { born, date } => {
            let birth = parse_birth(&born)?;
            let date = parse_date(&date)?;
            match store.memory_on(birth, date) {
                Some(text) => println!("{text}"),
                None => println!("(no memory for {date})"),
            }
        }
        MemoryCommands::Set { born, date, text } => {
            let birth = parse_birth(&born)?;
            let date = parse_date(&date)?;
            let outcome = store
                .save_one(birth, date, &text)
                .map_err(|err| CliError::Runtime(format!("memory not saved: {err}")))?;
            info!(
                "event=cli_memory_set module=cli status=ok change={:?}",
                outcome.change
            );
            println!("{}", render::change_message(outcome.change, date));
        }
        MemoryCommands::List { born } => {
            let birth = parse_birth(&born)?;
            print!("{}", render::memory_list(&store.list(birth)));
        }
    }
    Ok(())
}

fn parse_birth(raw: &str) -> Result<BirthDate, CliError> {
    BirthDate::parse(raw).map_err(|err| CliError::InvalidInput(err.to_string()))
}

fn parse_date(raw: &str) -> Result<NaiveDate, CliError> {
    NaiveDate::parse_from_str(raw.trim(), ISO_DATE_FORMAT)
        .map_err(|_| CliError::InvalidInput(format!("invalid date `{raw}`; expected YYYY-MM-DD")))
}
