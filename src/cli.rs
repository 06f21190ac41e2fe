use std::error::Error;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use dayPlanner::config::{PlannerSettings, RunMode};
use dayPlanner::handlers::planner::PlannerEngine;
use dayPlanner::runtime;
use dayPlanner::service::notification_service::{
    ConsoleSink, LogSink, NotificationSink, VOICE_COMMAND_EXAMPLES,
};
use dayPlanner::service::time_parser::normalize_time;
use dayPlanner::storage::{BlobStore, FileBlobStore};
use dayPlanner::tasks::capture_loop::{ListeningFlag, PromptCaptureSource};
use inquire::Confirm;
use tokio::sync::Mutex;

#[derive(Parser)]
#[command(name = "day-planner", about = "Plan today's time slots with spoken-style commands")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Process one command, e.g. `say schedule meeting at 3pm`
    Say {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
        /// Print the outcome as JSON instead of a message
        #[arg(long)]
        json: bool,
    },
    /// Show today's events
    List {
        /// Include empty slots
        #[arg(long)]
        all: bool,
    },
    /// Set or clear the label of one slot directly
    Edit {
        time: String,
        label: Vec<String>,
    },
    /// Remove every event
    Clear {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Read commands from an interactive prompt until Ctrl-C
    Listen,
    /// Show example commands
    Examples,
}

pub async fn cli(settings: &PlannerSettings) -> Result<(), Box<dyn Error>> {
    // Fine to exit here on bad arguments
    let cli = Cli::parse();
    let store: Arc<dyn BlobStore> = Arc::new(FileBlobStore::new(&settings.data_dir));
    let command = cli.command.unwrap_or(match settings.run_mode {
        RunMode::Cli => Commands::List { all: false },
        RunMode::Listen => Commands::Listen,
    });

    match command {
        Commands::Say { text, json } => {
            let sink: Arc<dyn NotificationSink> = if json {
                Arc::new(LogSink)
            } else {
                Arc::new(ConsoleSink)
            };
            let mut engine = PlannerEngine::load(store, sink);
            let outcome = engine.process_command(&text.join(" "));
            if json {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            }
        }
        Commands::List { all } => {
            let engine = PlannerEngine::load(store, Arc::new(ConsoleSink));
            print_day(&engine, all);
        }
        Commands::Edit { time, label } => {
            let slot = normalize_time(&time).map_err(|err| format!("Invalid time \"{time}\": {err}"))?;
            let mut engine = PlannerEngine::load(store, Arc::new(ConsoleSink));
            engine.edit_slot(slot, &label.join(" "));
        }
        Commands::Clear { yes } => {
            if !yes && !confirm_clear()? {
                println!("Nothing cleared.");
                return Ok(());
            }
            let mut engine = PlannerEngine::load(store, Arc::new(ConsoleSink));
            engine.clear_all();
        }
        Commands::Listen => {
            let sink: Arc<dyn NotificationSink> = Arc::new(ConsoleSink);
            let engine = Arc::new(Mutex::new(PlannerEngine::load(store, sink.clone())));
            println!("Type commands as you would say them. Esc restarts the prompt, Ctrl-C stops.");
            runtime::run_listen(
                engine.clone(),
                PromptCaptureSource::new("Command:"),
                ListeningFlag::new(true),
                sink,
            )
            .await;
            print_day(&*engine.lock().await, false);
        }
        Commands::Examples => {
            println!("{}", VOICE_COMMAND_EXAMPLES);
        }
    }
    Ok(())
}

fn print_day(engine: &PlannerEngine, all: bool) {
    let rows = engine.rows();
    if !all && engine.schedule().is_empty() {
        println!("No events scheduled today.");
        return;
    }
    println!("Today's Plan");
    for row in rows {
        match (&row.label, all) {
            (Some(label), _) => println!("{:>8}  {}", row.display, label),
            (None, true) => println!("{:>8}", row.display),
            (None, false) => {}
        }
    }
}

fn confirm_clear() -> Result<bool, Box<dyn Error>> {
    Ok(Confirm::new("Are you sure you want to clear all events?")
        .with_default(false)
        .prompt()?)
}
