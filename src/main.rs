use anyhow::Result;
use clap::{Parser, Subcommand};
use std::io::{self, BufRead};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use tarteeb::domain::{
    column_icon, column_title, empty_message, find_by_prefix, format_scheduled_date, TaskId,
    TaskStatus,
};
use tarteeb::input::{parse, Command, ParseError};
use tarteeb::persistence::{ensure_data_dir, init_local_dir, SnapshotStore};
use tarteeb::session::{Event, Session, Signal, UserAction};
use tarteeb::store::{board_stats, BoardStats, LocalStore, TaskStore};
use tarteeb::{notifications, ticker};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tarteeb")]
#[command(about = "Organize your tasks smartly", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a local .tarteeb directory in the current directory
    Init,
    /// Print board statistics from the saved snapshot
    Stats,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Init) => {
            let data_dir = init_local_dir()?;
            println!("Initialized tarteeb directory: {}", data_dir.display());
            println!();
            println!("Tarteeb will now use this local directory for task storage.");
            println!("Run 'tarteeb' to start organizing tasks.");
            Ok(())
        }
        Some(Commands::Stats) => {
            let tasks = SnapshotStore::open_default()?.load()?;
            print_stats(board_stats(&tasks));
            Ok(())
        }
        None => run_shell(),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .init();
}

fn run_shell() -> Result<()> {
    let data_dir = ensure_data_dir()?;
    eprintln!("Using data directory: {}", data_dir.display());

    let store = LocalStore::open(SnapshotStore::open_default()?)?;
    let mut session = Session::new(store);

    println!("Tarteeb - organize your tasks smartly. Type 'help' for commands.");
    print_board(&session);

    let lines = spawn_stdin_reader();
    loop {
        match lines.recv_timeout(ticker::tick_duration()) {
            Ok(line) => {
                if !handle_line(&mut session, &line) {
                    return Ok(());
                }
            }
            Err(RecvTimeoutError::Timeout) => {
                if let Some(Signal::TimerFinished { task_id }) = session.handle(Event::Tick)? {
                    announce_finished(&session, task_id.as_deref());
                }
            }
            Err(RecvTimeoutError::Disconnected) => return Ok(()),
        }
    }
}

/// Feed stdin lines into the event loop so ticking and typing share one
/// dispatch point
fn spawn_stdin_reader() -> Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

/// Handle one input line. Returns false when the user quits.
fn handle_line(session: &mut Session<LocalStore>, line: &str) -> bool {
    let command = match parse(line) {
        Ok(command) => command,
        Err(ParseError::Empty) => return true,
        Err(err) => {
            println!("error: {}", err);
            return true;
        }
    };

    match command {
        Command::Add(draft) => {
            dispatch(session, UserAction::Add(draft));
            print_board(session);
        }
        Command::Board => print_board(session),
        Command::Stats => print_stats(session.store().stats()),
        Command::Start(prefix) => {
            if let Some(id) = resolve(session, &prefix) {
                dispatch(session, UserAction::Start(id));
                print_board(session);
            }
        }
        Command::Drop { prefix, column } => {
            if let Some(id) = resolve(session, &prefix) {
                dispatch(session, UserAction::Move { id, to: column });
                print_board(session);
            }
        }
        Command::Done => {
            if session.active_task_id().is_none() {
                println!("No active task to complete.");
            } else {
                dispatch(session, UserAction::CompleteActive);
                print_board(session);
            }
        }
        Command::Pause => {
            dispatch(session, UserAction::ToggleTimer);
            print_timer_line(session);
        }
        Command::Focus => {
            dispatch(session, UserAction::EnterFocus);
            if session.focus_mode() {
                print_focus_view(session);
            } else {
                println!("Start a task first.");
            }
        }
        Command::Unfocus => {
            dispatch(session, UserAction::ExitFocus);
            print_board(session);
        }
        Command::Delete(prefix) => {
            if let Some(id) = resolve(session, &prefix) {
                dispatch(session, UserAction::Delete(id));
                print_board(session);
            }
        }
        Command::Help => print_help(),
        Command::Quit => return false,
    }

    true
}

/// Apply an action; operation failures are printed and the session moves on
fn dispatch(session: &mut Session<LocalStore>, action: UserAction) {
    if let Err(err) = session.handle(Event::Action(action)) {
        println!("error: {}", err);
    }
}

/// Resolve an id prefix against the board, complaining when it is not unique
fn resolve(session: &Session<LocalStore>, prefix: &str) -> Option<TaskId> {
    match find_by_prefix(session.store().tasks(), prefix) {
        Some(task) => Some(task.id.clone()),
        None => {
            println!("No unique task matches {:?}.", prefix);
            None
        }
    }
}

fn announce_finished(session: &Session<LocalStore>, task_id: Option<&str>) {
    let name = task_id
        .and_then(|id| session.store().task(id))
        .map(|t| t.name.as_str())
        .unwrap_or("Focus session");
    notifications::notify_timer_finished(name);
    println!();
    println!("⏰ Time's up: {}", name);
}

fn print_board(session: &Session<LocalStore>) {
    let today = chrono::Local::now().date_naive();

    println!();
    for &status in TaskStatus::all() {
        let tasks = session.store().tasks_by_status(status);
        println!("{} {}", column_icon(status), column_title(status));
        if tasks.is_empty() {
            println!("   ({})", empty_message(status));
        }
        for task in tasks {
            let marker = if session.active_task_id() == Some(task.id.as_str()) {
                "▶"
            } else {
                " "
            };
            let mut line = format!(
                " {} [{}] {} ({}m, {})",
                marker,
                &task.id[..8.min(task.id.len())],
                task.name,
                task.estimated_minutes,
                format_scheduled_date(task.scheduled_date, today),
            );
            if task.time_spent > 0 {
                line.push_str(&format!(" - {}m spent", task.time_spent));
            }
            println!("{}", line);
        }
    }
    print_timer_line(session);
}

fn print_timer_line(session: &Session<LocalStore>) {
    if let Some(task) = session.active_task() {
        let state = if session.timer().is_running() {
            "running"
        } else {
            "paused"
        };
        println!();
        println!("⏱ {} {} ({})", session.timer().clock(), task.name, state);
    }
}

fn print_focus_view(session: &Session<LocalStore>) {
    if let Some(task) = session.active_task() {
        println!();
        println!("=== FOCUS: {} ===", task.name);
        println!("{} remaining - 'pause' to pause, 'done' to complete, 'unfocus' to leave", session.timer().clock());
    }
}

fn print_stats(stats: BoardStats) {
    println!();
    println!("Tasks:      {}", stats.total);
    println!("Completed:  {}", stats.completed);
    println!("Time spent: {}m", stats.total_time_spent);
}

fn print_help() {
    println!();
    println!("Commands:");
    println!("  add <name> [estimate-minutes] [date]   create a task (quotes for spaces)");
    println!("  board                                  show the board");
    println!("  start <task-id>                        start working on a task");
    println!("  drop <task-id> <column>                move a task (week, today, progress, done)");
    println!("  pause                                  pause/resume the countdown");
    println!("  done                                   complete the active task");
    println!("  focus / unfocus                        enter or leave focus mode");
    println!("  delete <task-id>                       delete a task");
    println!("  stats                                  board statistics");
    println!("  quit                                   exit");
}
