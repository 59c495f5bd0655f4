//! Dice protocol.
//!
//! A turn rolls one die at a time: a 6 earns another roll (cumulative), and a
//! run of three consecutive 6s cancels the whole move. Any other roll ends
//! the run. This is a fixed game rule, not a configurable option.

use rand::Rng;
use std::fmt;

/// Highest face of the die.
pub const DIE_MAX: u8 = 6;

/// Maximum rolls in a single turn.
const MAX_ROLLS: usize = 3;

/// The rolls made during one turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiceRoll {
    rolls: Vec<u8>,
}

impl DiceRoll {
    /// Roll dice for one turn.
    pub fn roll(rng: &mut impl Rng) -> Self {
        Self::roll_with(|| rng.gen_range(1..=DIE_MAX))
    }

    /// Drive the roll protocol with an arbitrary die source.
    fn roll_with(mut next: impl FnMut() -> u8) -> Self {
        let mut rolls = Vec::with_capacity(MAX_ROLLS);
        while rolls.len() < MAX_ROLLS {
            let die = next();
            rolls.push(die);
            if die != DIE_MAX {
                break;
            }
        }
        Self { rolls }
    }

    /// The individual die results, in order.
    #[must_use]
    pub fn rolls(&self) -> &[u8] {
        &self.rolls
    }

    /// Whether the move was cancelled by three consecutive 6s.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.rolls.len() == MAX_ROLLS && self.rolls.iter().all(|&die| die == DIE_MAX)
    }

    /// The dice total for movement; 0 when the move was cancelled.
    #[must_use]
    pub fn total(&self) -> u8 {
        if self.is_cancelled() {
            0
        } else {
            self.rolls.iter().sum()
        }
    }
}

impl fmt::Display for DiceRoll {
    /// Formats as the throw line, e.g. `6 + 2 = 8` or
    /// `6 + 6 + 6 = 18 (cancelled)`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sum: u8 = self.rolls.iter().sum();
        for (i, die) in self.rolls.iter().enumerate() {
            if i > 0 {
                write!(f, " + ")?;
            }
            write!(f, "{die}")?;
        }
        write!(f, " = {sum}")?;
        if self.is_cancelled() {
            write!(f, " (cancelled)")?;
        }
        Ok(())
    }
}
