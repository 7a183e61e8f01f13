use std::{borrow::Cow, time::Duration};

use log::{debug, info};
use serde::Serialize;
use tokio::{sync::Mutex, time::sleep};

use super::{
    BattleError, BattleEvent, Phase, Side,
    damage::{BattleRng, calc_damage},
};
use crate::pokemon::{Pokemon, moves::Move};

/// What a resolved move did
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct TurnOutcome {
    pub damage: u32,
    pub player_hp: u32,
    pub opponent_hp: u32,
    pub phase: Phase,
}

/// A single Pokemon vs single Pokemon battle.
///
/// Both sides start with the same HP pool no matter their hp stat. The player
/// moves first, then the opponent answers with a random move of its own, and
/// so on until one side reaches 0 HP. Every transition is a method call on the
/// owned session; callers are responsible for serializing access.
#[derive(Clone, Debug)]
pub struct BattleSession {
    player: Option<Pokemon>,
    opponent: Option<Pokemon>,
    player_hp: u32,
    opponent_hp: u32,
    phase: Phase,
    log: Vec<BattleEvent>,
}

impl BattleSession {
    pub fn new(starting_hp: u32) -> Self {
        Self {
            player: None,
            opponent: None,
            player_hp: starting_hp,
            opponent_hp: starting_hp,
            phase: Phase::Selecting,
            log: vec![],
        }
    }

    /// Shortcut for a session with both sides already chosen
    pub fn with_combatants(player: Pokemon, opponent: Pokemon, starting_hp: u32) -> Self {
        let mut session = Self::new(starting_hp);
        session.player = Some(player);
        session.opponent = Some(opponent);
        session.phase = Phase::PlayerTurn;
        session
    }

    pub fn select_player(&mut self, pokemon: Pokemon) -> Result<(), BattleError> {
        self.ensure_selection_open()?;
        self.player = Some(pokemon);
        self.refresh_selection();
        Ok(())
    }

    pub fn select_opponent(&mut self, pokemon: Pokemon) -> Result<(), BattleError> {
        self.ensure_selection_open()?;
        self.opponent = Some(pokemon);
        self.refresh_selection();
        Ok(())
    }

    fn ensure_selection_open(&self) -> Result<(), BattleError> {
        match self.phase {
            Phase::Selecting => Ok(()),
            Phase::PlayerTurn if self.log.is_empty() => Ok(()),
            _ => Err(BattleError::SelectionClosed),
        }
    }

    fn refresh_selection(&mut self) {
        if self.player.is_some() && self.opponent.is_some() {
            self.phase = Phase::PlayerTurn;
        }
    }

    pub fn player(&self) -> Option<&Pokemon> {
        self.player.as_ref()
    }

    pub fn opponent(&self) -> Option<&Pokemon> {
        self.opponent.as_ref()
    }

    pub fn player_hp(&self) -> u32 {
        self.player_hp
    }

    pub fn opponent_hp(&self) -> u32 {
        self.opponent_hp
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The side expected to act next, `None` before the start and after the end
    pub fn turn_owner(&self) -> Option<Side> {
        match self.phase {
            Phase::PlayerTurn => Some(Side::Player),
            Phase::ResolvingAi => Some(Side::Opponent),
            Phase::Selecting | Phase::Finished(_) => None,
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.phase, Phase::Finished(_))
    }

    pub fn winner(&self) -> Option<Side> {
        match self.phase {
            Phase::Finished(side) => Some(side),
            _ => None,
        }
    }

    pub fn log(&self) -> &[BattleEvent] {
        &self.log
    }

    /// The log rendered as human readable lines
    pub fn narration(&self) -> Vec<String> {
        self.log.iter().map(|e| e.to_string()).collect()
    }

    /// Moves the player may submit right now, empty unless it is the player's turn
    pub fn legal_moves(&self) -> Cow<'_, [Move]> {
        match (self.phase, &self.player) {
            (Phase::PlayerTurn, Some(player)) => moveset(player),
            _ => Cow::Borrowed(&[]),
        }
    }

    fn check_turn(&self, side: Side) -> Result<(), BattleError> {
        match (self.phase, side) {
            (Phase::Selecting, _) => Err(BattleError::NotStarted),
            (Phase::Finished(winner), _) => Err(BattleError::BattleOver(winner)),
            (Phase::PlayerTurn, Side::Player) | (Phase::ResolvingAi, Side::Opponent) => Ok(()),
            (Phase::PlayerTurn, Side::Opponent) => Err(BattleError::NotYourTurn(Side::Opponent)),
            (Phase::ResolvingAi, Side::Player) => Err(BattleError::NotYourTurn(Side::Player)),
        }
    }

    fn combatants(&self) -> Result<(&Pokemon, &Pokemon), BattleError> {
        match (&self.player, &self.opponent) {
            (Some(player), Some(opponent)) => Ok((player, opponent)),
            _ => Err(BattleError::NotStarted),
        }
    }

    /// Resolves the player's move at `move_index`.
    /// Leaves the session in `ResolvingAi` unless the opponent fainted.
    pub fn apply_player_move(
        &mut self,
        move_index: usize,
        rng: &mut impl BattleRng,
    ) -> Result<TurnOutcome, BattleError> {
        self.check_turn(Side::Player)?;
        let (damage, attacker, move_name, defender) = {
            let (player, opponent) = self.combatants()?;
            let moves = moveset(player);
            let used_move = moves
                .get(move_index)
                .ok_or(BattleError::InvalidMoveIndex(move_index))?;
            let damage = calc_damage(used_move, player, opponent, rng);
            (damage, player.name.clone(), used_move.name.clone(), opponent.name.clone())
        };

        self.opponent_hp = self.opponent_hp.saturating_sub(damage);
        self.record_hit(attacker, move_name, damage, self.opponent_hp);

        self.phase = if self.opponent_hp == 0 {
            self.record_faint(defender, Side::Player);
            Phase::Finished(Side::Player)
        } else {
            Phase::ResolvingAi
        };

        Ok(self.outcome(damage))
    }

    /// Resolves the opponent's reply with a randomly chosen move of its own.
    pub fn apply_opponent_move(
        &mut self,
        rng: &mut impl BattleRng,
    ) -> Result<TurnOutcome, BattleError> {
        self.check_turn(Side::Opponent)?;
        let (damage, attacker, move_name, defender) = {
            let (player, opponent) = self.combatants()?;
            let moves = moveset(opponent);
            let used_move = &moves[rng.pick_index(moves.len())];
            let damage = calc_damage(used_move, opponent, player, rng);
            (damage, opponent.name.clone(), used_move.name.clone(), player.name.clone())
        };

        self.player_hp = self.player_hp.saturating_sub(damage);
        self.record_hit(attacker, move_name, damage, self.player_hp);

        self.phase = if self.player_hp == 0 {
            self.record_faint(defender, Side::Opponent);
            Phase::Finished(Side::Opponent)
        } else {
            Phase::PlayerTurn
        };

        Ok(self.outcome(damage))
    }

    fn record_hit(&mut self, attacker: String, move_name: String, damage: u32, hp_left: u32) {
        let event = BattleEvent::Hit {
            attacker,
            move_name,
            damage,
            hp_left,
        };
        debug!("{}", event);
        self.log.push(event);
    }

    fn record_faint(&mut self, pokemon: String, winner: Side) {
        let event = BattleEvent::Fainted { pokemon, winner };
        info!("{}", event);
        self.log.push(event);
    }

    fn outcome(&self, damage: u32) -> TurnOutcome {
        TurnOutcome {
            damage,
            player_hp: self.player_hp,
            opponent_hp: self.opponent_hp,
            phase: self.phase,
        }
    }
}

/// The moves a Pokemon fights with. One without moves gets [`Move::unknown`]
/// so either side can always act.
fn moveset(pokemon: &Pokemon) -> Cow<'_, [Move]> {
    if pokemon.moves.is_empty() {
        Cow::Owned(vec![Move::unknown()])
    } else {
        Cow::Borrowed(pokemon.moves.as_slice())
    }
}

/// Waits out the opponent's thinking time, then lets it move.
/// The lock is only held for the move itself, so the session stays readable
/// (and locked against player moves by its phase) during the delay.
pub async fn resolve_opponent_turn(
    session: &Mutex<BattleSession>,
    delay: Duration,
    rng: &mut impl BattleRng,
) -> Result<TurnOutcome, BattleError> {
    sleep(delay).await;
    session.lock().await.apply_opponent_move(rng)
}
