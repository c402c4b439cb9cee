use std::time::Duration;

use crate::board::Color;

/// Moves left in the game when the GUI does not say
pub const DEFAULT_MOVES_TO_GO: u64 = 30;

/// Arguments of a `go` command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoParams {
    pub depth: Option<u16>,
    pub movetime: Option<u64>,
    pub wtime: Option<u64>,
    pub btime: Option<u64>,
    pub winc: Option<u64>,
    pub binc: Option<u64>,
    pub movestogo: Option<u64>,
    pub infinite: bool,
    pub perft: Option<u16>,
}

impl GoParams {
    fn parse(parts: &[&str]) -> Self {
        let mut params = GoParams::default();
        let mut i = 1;
        while i < parts.len() {
            let value = parts.get(i + 1).copied();
            let number = || value.and_then(|v| v.parse::<u64>().ok());
            let consumed = match parts[i] {
                "depth" => {
                    params.depth = value.and_then(|v| v.parse().ok());
                    2
                }
                "perft" => {
                    params.perft = value.and_then(|v| v.parse().ok());
                    2
                }
                "movetime" => {
                    params.movetime = number();
                    2
                }
                "wtime" => {
                    params.wtime = number();
                    2
                }
                "btime" => {
                    params.btime = number();
                    2
                }
                "winc" => {
                    params.winc = number();
                    2
                }
                "binc" => {
                    params.binc = number();
                    2
                }
                "movestogo" => {
                    params.movestogo = number();
                    2
                }
                "infinite" => {
                    params.infinite = true;
                    1
                }
                _ => 1,
            };
            i += consumed;
        }
        params
    }

    /// Thinking time for `side`, or `None` for an unbounded search.
    ///
    /// A fixed move time wins over clock times; with a clock the budget is
    /// an even share of the remaining time plus the increment.
    #[must_use]
    pub fn time_budget(&self, side: Color) -> Option<Duration> {
        if self.infinite {
            return None;
        }
        if let Some(ms) = self.movetime {
            return Some(Duration::from_millis(ms));
        }
        let (time_left, inc) = match side {
            Color::White => (self.wtime, self.winc),
            Color::Black => (self.btime, self.binc),
        };
        let moves_to_go = self.movestogo.unwrap_or(DEFAULT_MOVES_TO_GO).max(1);
        time_left.map(|left| Duration::from_millis((left / moves_to_go).saturating_add(inc.unwrap_or(0))))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UciCommand {
    Uci,
    IsReady,
    UciNewGame,
    Position(Vec<String>),
    Go(GoParams),
    SetOption(Vec<String>),
    /// Non-standard `d`: print the board
    Display,
    Stop,
    Quit,
    Unknown(String),
}

/// Parse one input line. Blank lines yield `None`.
pub fn parse_uci_command(line: &str) -> Option<UciCommand> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    let first = *parts.first()?;

    let owned_parts = || parts.iter().map(|p| (*p).to_string()).collect::<Vec<String>>();

    let cmd = match first {
        "uci" => UciCommand::Uci,
        "isready" => UciCommand::IsReady,
        "ucinewgame" => UciCommand::UciNewGame,
        "position" => UciCommand::Position(owned_parts()),
        "go" => UciCommand::Go(GoParams::parse(&parts)),
        "perft" => UciCommand::Go(GoParams {
            perft: Some(parts.get(1).and_then(|v| v.parse().ok()).unwrap_or(1)),
            ..GoParams::default()
        }),
        "setoption" => UciCommand::SetOption(owned_parts()),
        "d" => UciCommand::Display,
        "stop" => UciCommand::Stop,
        "quit" => UciCommand::Quit,
        _ => UciCommand::Unknown(line.trim().to_string()),
    };

    Some(cmd)
}
