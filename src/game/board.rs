//! Board model: a static per-cell effect table.
//!
//! Cells are numbered 1..=100; index 0 is unused. A positive cell value is a
//! ladder delta, a negative value a snake delta, zero is neutral. The board
//! is immutable once loaded.

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

/// Number of cells in the board table (index 0 unused).
pub const BOARD_CELLS: usize = 101;

/// The home position, before a player enters the board.
pub const HOME: u8 = 0;

/// The finishing cell.
pub const FINISH: u8 = 100;

/// Kind of effect stored on a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectKind {
    /// Moves the player up the board.
    Ladder,
    /// Moves the player down the board.
    Snake,
}

impl fmt::Display for EffectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EffectKind::Ladder => write!(f, "ladder"),
            EffectKind::Snake => write!(f, "snake"),
        }
    }
}

/// Errors raised while loading a board definition.
#[derive(Debug)]
pub enum BoardError {
    /// The file could not be read.
    Io(io::Error),
    /// A record type other than `L`, `S` or `E` was found.
    UnknownRecord(String),
    /// A record ended before both endpoints were read.
    TruncatedRecord(EffectKind),
    /// An endpoint was not a valid integer.
    InvalidEndpoint(String),
    /// An endpoint fell outside 1..=100.
    EndpointOutOfRange {
        /// The record kind being parsed.
        kind: EffectKind,
        /// The offending endpoint value.
        value: i64,
    },
    /// A ladder pointing down or a snake pointing up.
    WrongDirection {
        /// The record kind being parsed.
        kind: EffectKind,
        /// Start cell.
        from: u8,
        /// End cell.
        to: u8,
    },
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::Io(e) => write!(f, "failed to read board file: {e}"),
            BoardError::UnknownRecord(tok) => write!(f, "unknown record type '{tok}'"),
            BoardError::TruncatedRecord(kind) => {
                write!(f, "truncated {kind} record (expected two endpoints)")
            }
            BoardError::InvalidEndpoint(tok) => write!(f, "invalid endpoint '{tok}'"),
            BoardError::EndpointOutOfRange { kind, value } => {
                write!(f, "{kind} endpoint {value} outside 1..=100")
            }
            BoardError::WrongDirection { kind, from, to } => {
                write!(f, "{kind} from {from} to {to} points the wrong way")
            }
        }
    }
}

impl std::error::Error for BoardError {}

impl From<io::Error> for BoardError {
    fn from(e: io::Error) -> Self {
        BoardError::Io(e)
    }
}

/// The effect table. `cells[i]` holds the signed delta applied when a player
/// lands on cell `i`.
#[derive(Debug, Clone)]
pub struct Board {
    cells: [i16; BOARD_CELLS],
}

impl Board {
    /// Create a board with no ladders or snakes.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            cells: [0; BOARD_CELLS],
        }
    }

    /// Parse a board definition.
    ///
    /// Records are whitespace separated: `L <from> <to>` with `to > from`,
    /// `S <from> <to>` with `to < from`, and a record beginning with `E`
    /// ends the input (end of input is also accepted). A later record for
    /// the same cell replaces the earlier one.
    ///
    /// # Errors
    ///
    /// Returns a [`BoardError`] for unknown record types, missing or
    /// non-integer endpoints, endpoints outside 1..=100, or a pair pointing
    /// the wrong way.
    pub fn from_records(text: &str) -> Result<Self, BoardError> {
        let mut board = Self::empty();
        let mut tokens = text.split_whitespace();

        while let Some(tag) = tokens.next() {
            let kind = match tag {
                t if t.starts_with('E') => break,
                "L" => EffectKind::Ladder,
                "S" => EffectKind::Snake,
                other => return Err(BoardError::UnknownRecord(other.to_string())),
            };

            let from = parse_endpoint(kind, tokens.next())?;
            let to = parse_endpoint(kind, tokens.next())?;

            let ok = match kind {
                EffectKind::Ladder => to > from,
                EffectKind::Snake => to < from,
            };
            if !ok {
                return Err(BoardError::WrongDirection { kind, from, to });
            }

            board.cells[from as usize] = i16::from(to) - i16::from(from);
        }

        Ok(board)
    }

    /// Load a board definition from a file.
    ///
    /// # Errors
    ///
    /// Returns a [`BoardError`] if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, BoardError> {
        let text = fs::read_to_string(path)?;
        Self::from_records(&text)
    }

    /// The signed effect delta on a cell (0 for neutral cells).
    #[must_use]
    pub fn effect(&self, cell: u8) -> i16 {
        self.cells[cell as usize]
    }

    /// The effect on a cell, if any, as its target cell and kind.
    ///
    /// The load-time endpoint checks guarantee the target lies in 1..=100.
    #[must_use]
    pub fn jump(&self, cell: u8) -> Option<(u8, EffectKind)> {
        let delta = self.cells[cell as usize];
        if delta == 0 {
            return None;
        }
        let target = i16::from(cell) + delta;
        let kind = if delta > 0 {
            EffectKind::Ladder
        } else {
            EffectKind::Snake
        };
        u8::try_from(target).ok().map(|t| (t, kind))
    }

    /// All ladders as `(bottom, top)` pairs, in cell order.
    pub fn ladders(&self) -> impl Iterator<Item = (u8, u8)> + '_ {
        self.effects(EffectKind::Ladder)
    }

    /// All snakes as `(mouth, tail)` pairs, in cell order.
    pub fn snakes(&self) -> impl Iterator<Item = (u8, u8)> + '_ {
        self.effects(EffectKind::Snake)
    }

    fn effects(&self, want: EffectKind) -> impl Iterator<Item = (u8, u8)> + '_ {
        (1..=FINISH).filter_map(move |cell| match self.jump(cell) {
            Some((target, kind)) if kind == want => Some((cell, target)),
            _ => None,
        })
    }
}

fn parse_endpoint(kind: EffectKind, token: Option<&str>) -> Result<u8, BoardError> {
    let token = token.ok_or(BoardError::TruncatedRecord(kind))?;
    let value: i64 = token
        .parse()
        .map_err(|_| BoardError::InvalidEndpoint(token.to_string()))?;
    if !(1..=i64::from(FINISH)).contains(&value) {
        return Err(BoardError::EndpointOutOfRange { kind, value });
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let endpoint = value as u8;
    Ok(endpoint)
}
