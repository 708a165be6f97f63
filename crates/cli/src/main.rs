//! Contour CLI - personal life-sphere progress tracker.

mod render;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use contour_core::TaskId;
use contour_progress::{layout, Command, Outcome, ProgressEngine};
use contour_storage::{export_snapshot, JsonFileStore, SnapshotRepository};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "contour")]
#[command(about = "Personal life-sphere progress tracker", long_about = None)]
struct Cli {
    /// Directory holding the saved state
    #[arg(long, global = true, default_value = ".contour")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log a task against a sphere (+5%)
    Add {
        /// Task description
        text: String,
        /// Sphere id (finance, health, career, rest, family, development, creativity, environment)
        #[arg(long, short)]
        sphere: String,
    },
    /// Complete or reopen a task (+10% on completion)
    Toggle {
        /// Task ID
        id: u64,
    },
    /// Show today's open tasks
    Today,
    /// Show progress of every sphere
    Spheres,
    /// Show the progress tree geometry
    Tree {
        /// Canvas width
        #[arg(long, default_value = "300")]
        width: f64,
        /// Canvas height
        #[arg(long, default_value = "300")]
        height: f64,
    },
    /// Show the balance score
    Balance,
    /// Export the full state as JSON
    Export {
        /// Directory to write the export into
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let today = chrono::Utc::now().date_naive();

    // Open storage and restore
    let store = JsonFileStore::new(&cli.data_dir).await?;
    let mut repo = SnapshotRepository::new(store);
    let mut engine = ProgressEngine::new();
    if let Some(blob) = repo.load_raw().await? {
        engine.restore_from_persistence(&blob).with_context(|| {
            format!("saved state in {} is unreadable", cli.data_dir.display())
        })?;
    }

    match cli.command {
        Commands::Add { text, sphere } => {
            let command = Command::record_task(text, &sphere, today)?;
            let outcome = engine.dispatch(command)?;
            repo.save(&engine.snapshot_for_persistence()).await?;
            report(&outcome);
            print!("{}", render::today_list(engine.today_tasks(today), engine.spheres(), today));
            print!("{}", render::balance(&engine.balance()));
        }
        Commands::Toggle { id } => {
            let outcome = engine.dispatch(Command::toggle_task(TaskId::new(id)))?;
            repo.save(&engine.snapshot_for_persistence()).await?;
            report(&outcome);
            print!("{}", render::balance(&engine.balance()));
        }
        Commands::Today => {
            print!("{}", render::today_list(engine.today_tasks(today), engine.spheres(), today));
        }
        Commands::Spheres => {
            print!("{}", render::progress_bars(engine.spheres()));
        }
        Commands::Tree { width, height } => {
            print!("{}", render::tree(&layout(engine.spheres(), width, height)));
        }
        Commands::Balance => {
            print!("{}", render::balance(&engine.balance()));
        }
        Commands::Export { out } => {
            let path = export_snapshot(&out, &engine.snapshot_for_persistence(), today).await?;
            println!("Exported to {}", path.display());
        }
    }

    Ok(())
}

fn report(outcome: &Outcome) {
    match outcome {
        Outcome::Recorded(task) => {
            info!(task_id = %task.id, sphere = %task.sphere, "Task added");
            println!("Added task #{} - {} [{}]", task.id, task.text, task.sphere);
        }
        Outcome::Toggled(task) => {
            let state = if task.done { "done" } else { "open" };
            info!(task_id = %task.id, done = task.done, "Task toggled");
            println!("Task #{} is now {}", task.id, state);
        }
    }
}
