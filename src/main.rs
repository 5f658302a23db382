use anyhow::Context;
use clap::{Parser, Subcommand};

mod calendar;
mod error;
mod lesson;
mod render;
mod timeline;

pub type Result<T> = anyhow::Result<T>;

#[derive(Parser)]
#[command(name = "study-plan")]
#[command(about = "Turn a lesson list into a calendar-aligned study schedule", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the schedule (validates inputs while running).
    Plan {
        /// Path to the input plan CSV (lesson name in column 2, duration
        /// expression in column 3, no header).
        #[arg(long)]
        plan: String,

        /// Classroom open date, YYYY-MM-DD with an optional :+HH:MM offset.
        #[arg(long)]
        start: String,

        /// Commitment hours: one value applied to every day, or seven
        /// values, Monday first.
        #[arg(long, num_args = 1..=7)]
        daily: Vec<f64>,

        /// Hours the learner intends to commit per 7-day week.
        #[arg(long)]
        weekly_hours: f64,

        /// Smallest slice of a day worth scheduling, in hours.
        #[arg(long, default_value_t = timeline::DEFAULT_MARGIN_HOURS)]
        margin: f64,

        /// Only emit the first week of the schedule.
        #[arg(long)]
        preview: bool,

        #[arg(short = 'o', long)]
        out: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.cmd {
        Commands::Plan {
            plan,
            start,
            daily,
            weekly_hours,
            margin,
            preview,
            out,
        } => {
            // 1) Parse inputs: lesson rows, commitment calendar, start date.
            let lessons = lesson::read_lessons_csv(&plan)?;
            let commitment = calendar::CommitmentCalendar::from_values(&daily)?;
            let start = calendar::parse_start_date(&start)?;
            if let Some(offset) = start.offset {
                // Recorded for provenance only; day arithmetic stays naive.
                eprintln!("WARN: ignoring timezone offset {} in day arithmetic", offset);
            }

            // 2) Allocate and compact.
            let data = timeline::build_plan_data(
                &lessons,
                weekly_hours,
                &commitment,
                start.date,
                margin,
                preview,
            )?;

            // 3) Stamp weekday names and write the table.
            let rows = render::stamp_weekdays(&data.entries)?;
            let file = std::fs::File::create(&out)
                .with_context(|| format!("create output file {}", out))?;
            render::write_csv(&rows, file)?;

            println!("Wrote {}", out);
            println!("Days to finish: {}", data.days_to_finish);
        }
    }

    Ok(())
}
