use std::fmt;

use serde::{Deserialize, Serialize};

/// Damage formula and injectable randomness
pub mod damage;

/// The two-party turn state machine
pub mod session;

/// HTTP endpoints for running battles
pub mod endpoints;

pub use session::BattleSession;

/// Which party of a battle
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Player,
    Opponent,
}

/// Where a battle session currently is
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(tag = "phase", content = "winner")]
pub enum Phase {
    /// At least one combatant has not been chosen yet
    Selecting,
    /// Waiting for the player to pick a move
    PlayerTurn,
    /// The opponent is "thinking", player moves are locked out
    ResolvingAi,
    /// Someone fainted, nothing changes any more
    Finished(Side),
}

/// Represents an event that occurs during a battle
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(tag = "event_name", content = "event_data")]
pub enum BattleEvent {
    /// A Pokemon used a move on the other one
    Hit {
        /// The name of the attacking Pokemon
        attacker: String,
        /// The name of the move used
        move_name: String,
        /// The amount of damage dealt
        damage: u32,
        /// The amount of HP left on the defending Pokemon
        hp_left: u32,
    },
    /// A Pokemon fainted and the battle is decided
    Fainted {
        /// The name of the Pokemon that fainted
        pokemon: String,
        /// The side that won
        winner: Side,
    },
}

impl fmt::Display for BattleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BattleEvent::Hit {
                attacker,
                move_name,
                damage,
                ..
            } => write!(f, "{} used {}! Dealt {} damage.", attacker, move_name, damage),
            BattleEvent::Fainted {
                pokemon,
                winner: Side::Player,
            } => write!(f, "{} fainted! You won!", pokemon),
            BattleEvent::Fainted {
                pokemon,
                winner: Side::Opponent,
            } => write!(f, "{} fainted! You lost!", pokemon),
        }
    }
}

/// Misuse of a battle session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BattleError {
    /// A move was submitted before both combatants were chosen
    NotStarted,
    /// A player move was submitted while the opponent is acting, or the other way round
    NotYourTurn(Side),
    /// A move was submitted after a Pokemon fainted
    BattleOver(Side),
    /// The acting Pokemon has no move at this index
    InvalidMoveIndex(usize),
    /// Combatants can only be chosen before the first move
    SelectionClosed,
}

impl fmt::Display for BattleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BattleError::NotStarted => write!(f, "Both Pokemon must be selected first"),
            BattleError::NotYourTurn(side) => write!(f, "It is not the {:?}'s turn", side),
            BattleError::BattleOver(winner) => {
                write!(f, "The battle is over, the {:?} won", winner)
            }
            BattleError::InvalidMoveIndex(index) => write!(f, "No move at index {}", index),
            BattleError::SelectionClosed => {
                write!(f, "Pokemon cannot be changed once the battle has started")
            }
        }
    }
}

impl std::error::Error for BattleError {}
