//! Line-oriented interactive session over a [`GameService`].

use derive_more::Display;
use std::io::{BufRead, Write};
use strictly_oxo::GameService;
use tracing::{debug, instrument};

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    /// Play a move such as `b2`.
    Move(String),
    /// Show the board.
    State,
    /// Change the player count.
    Players(usize),
    /// Resize the board.
    Size(usize, usize),
    /// Change the win threshold.
    Threshold(usize),
    /// Start a new match.
    Reset,
    /// Print cache telemetry.
    Stats,
    /// Print operation timings.
    Perf,
    /// Print usage.
    Help,
    /// Leave the session.
    Quit,
}

/// Input line that could not be understood.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[display("{}: {}", keyword, reason)]
pub struct ReplError {
    /// Keyword the line started with.
    pub keyword: String,
    /// What was wrong.
    pub reason: &'static str,
}

impl std::error::Error for ReplError {}

const HELP: &str = "\
Commands:
  <row><col>     play a move, e.g. b2
  state          show the board
  players N      set the number of players
  size R C       resize the board
  threshold N    set the run length needed to win
  reset          start a new match
  stats          cache statistics
  perf           operation timings
  quit           leave";

const GAME_OVER: &str = "Match over. Type 'reset' to play again.";

fn number(keyword: &str, arg: Option<&str>) -> Result<usize, ReplError> {
    arg.and_then(|a| a.parse().ok()).ok_or_else(|| ReplError {
        keyword: keyword.to_string(),
        reason: "expected a non-negative number",
    })
}

/// Parses one input line.
#[instrument]
pub fn parse_line(line: &str) -> Result<ReplCommand, ReplError> {
    let mut words = line.split_whitespace();
    let Some(keyword) = words.next() else {
        return Ok(ReplCommand::State);
    };
    let command = match keyword.to_ascii_lowercase().as_str() {
        "state" | "show" => ReplCommand::State,
        "players" => ReplCommand::Players(number(keyword, words.next())?),
        "size" => {
            let rows = number(keyword, words.next())?;
            let cols = number(keyword, words.next())?;
            ReplCommand::Size(rows, cols)
        }
        "threshold" => ReplCommand::Threshold(number(keyword, words.next())?),
        "reset" => ReplCommand::Reset,
        "stats" => ReplCommand::Stats,
        "perf" => ReplCommand::Perf,
        "help" | "?" => ReplCommand::Help,
        "quit" | "exit" => ReplCommand::Quit,
        _ => ReplCommand::Move(keyword.to_string()),
    };
    if words.next().is_some() {
        return Err(ReplError {
            keyword: keyword.to_string(),
            reason: "too many arguments",
        });
    }
    Ok(command)
}

/// Reads commands from `input` until end of input or `quit`, writing responses to `output`.
#[instrument(skip_all)]
pub fn run(
    service: &GameService,
    input: impl BufRead,
    mut output: impl Write,
) -> anyhow::Result<()> {
    writeln!(output, "{}", service.get_state())?;
    for line in input.lines() {
        let line = line?;
        let command = match parse_line(&line) {
            Ok(command) => command,
            Err(e) => {
                writeln!(output, "{e}")?;
                continue;
            }
        };
        debug!(?command, "Executing");
        match command {
            ReplCommand::Quit => break,
            ReplCommand::Help => writeln!(output, "{HELP}")?,
            ReplCommand::Move(text) => match service.apply_move(&text) {
                Ok(state) => {
                    writeln!(output, "{state}")?;
                    if state.is_finished() {
                        writeln!(output, "{GAME_OVER}")?;
                    }
                }
                Err(e) => writeln!(output, "Invalid Move: {e}")?,
            },
            ReplCommand::State => writeln!(output, "{}", service.get_state())?,
            ReplCommand::Players(count) => writeln!(output, "{}", service.set_players(count))?,
            ReplCommand::Size(rows, cols) => {
                writeln!(output, "{}", service.set_board_size(rows, cols))?
            }
            ReplCommand::Threshold(n) => writeln!(output, "{}", service.set_win_threshold(n))?,
            ReplCommand::Reset => writeln!(output, "{}", service.reset_game())?,
            ReplCommand::Stats => writeln!(
                output,
                "{}",
                serde_json::to_string_pretty(&service.cache_stats())?
            )?,
            ReplCommand::Perf => writeln!(
                output,
                "{}",
                serde_json::to_string_pretty(&service.performance())?
            )?,
        }
    }
    Ok(())
}
