use crate::domain::TaskStatus;
use crate::store::TaskDraft;
use thiserror::Error;

/// Default estimate when the add command omits one
pub const DEFAULT_ESTIMATE_MINUTES: &str = "25";

/// One line of shell input, parsed
#[derive(Debug, Clone)]
pub enum Command {
    /// add <name> [estimate-minutes] [date]
    Add(TaskDraft),
    Board,
    Stats,
    /// start <id-prefix>
    Start(String),
    /// drop <id-prefix> <week|today|progress|done>
    Drop { prefix: String, column: TaskStatus },
    Done,
    Pause,
    Focus,
    Unfocus,
    /// delete <id-prefix>
    Delete(String),
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("nothing to do")]
    Empty,
    #[error("unknown command {0:?}; try 'help'")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error("unknown column {0:?} (week, today, progress, done)")]
    UnknownColumn(String),
}

/// Parse one input line into a command
pub fn parse(line: &str) -> Result<Command, ParseError> {
    let tokens = tokenize(line);
    let Some((head, rest)) = tokens.split_first() else {
        return Err(ParseError::Empty);
    };

    match head.as_str() {
        "add" | "a" => parse_add(rest),
        "board" | "b" | "ls" => Ok(Command::Board),
        "stats" => Ok(Command::Stats),
        "start" | "s" => match rest {
            [prefix] => Ok(Command::Start(prefix.clone())),
            _ => Err(ParseError::Usage("start <task-id>")),
        },
        "drop" | "move" | "mv" => match rest {
            [prefix, column] => {
                let column = TaskStatus::from_tag(column)
                    .ok_or_else(|| ParseError::UnknownColumn(column.clone()))?;
                Ok(Command::Drop {
                    prefix: prefix.clone(),
                    column,
                })
            }
            _ => Err(ParseError::Usage("drop <task-id> <column>")),
        },
        "done" | "complete" => Ok(Command::Done),
        "pause" | "p" => Ok(Command::Pause),
        "focus" | "f" => Ok(Command::Focus),
        "unfocus" => Ok(Command::Unfocus),
        "delete" | "del" | "rm" => match rest {
            [prefix] => Ok(Command::Delete(prefix.clone())),
            _ => Err(ParseError::Usage("delete <task-id>")),
        },
        "help" | "h" | "?" => Ok(Command::Help),
        "quit" | "q" | "exit" => Ok(Command::Quit),
        other => Err(ParseError::Unknown(other.to_string())),
    }
}

/// add <name> [estimate] [date] — name must be quoted if it has spaces;
/// estimate defaults to 25 minutes, date to today
fn parse_add(rest: &[String]) -> Result<Command, ParseError> {
    let (name, args) = rest
        .split_first()
        .ok_or(ParseError::Usage("add <name> [estimate-minutes] [date]"))?;
    if args.len() > 2 {
        return Err(ParseError::Usage("add <name> [estimate-minutes] [date]"));
    }

    let estimate = args.first().cloned().unwrap_or_else(|| DEFAULT_ESTIMATE_MINUTES.into());
    let date = args.get(1).cloned().unwrap_or_else(|| "today".into());

    Ok(Command::Add(TaskDraft::new(name.clone(), estimate, date)))
}

/// Split a line on whitespace, honoring double quotes
fn tokenize(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for c in line.trim().chars() {
        match c {
            '"' => in_quotes = !in_quotes,
            c if c.is_whitespace() && !in_quotes => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }

    tokens
}
