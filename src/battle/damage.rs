use rand::Rng;

use crate::pokemon::{
    Pokemon,
    moves::{DamageCategory, Move},
};

/// Level used for both sides, no level stat is modelled
pub const BATTLE_LEVEL: f64 = 50.0;

/// Lower bound of the damage roll
pub const MIN_ROLL: f64 = 0.85;

/// Upper bound (exclusive) of the damage roll
pub const MAX_ROLL: f64 = 1.0;

/// Source of randomness for a battle
pub trait BattleRng {
    /// A damage multiplier in `[MIN_ROLL, MAX_ROLL)`
    fn damage_roll(&mut self) -> f64;

    /// An index in `0..len`, `len` is never 0
    fn pick_index(&mut self, len: usize) -> usize;
}

/// [`BattleRng`] backed by any `rand` generator
pub struct RandomRoll<R>(pub R);

impl<R: Rng> BattleRng for RandomRoll<R> {
    fn damage_roll(&mut self) -> f64 {
        self.0.gen_range(MIN_ROLL..MAX_ROLL)
    }

    fn pick_index(&mut self, len: usize) -> usize {
        self.0.gen_range(0..len)
    }
}

/// Simplified level-50 damage formula. Type matchups are ignored and every
/// hit deals at least 1 damage, status moves included.
pub fn calc_damage(
    used_move: &Move,
    attacker: &Pokemon,
    defender: &Pokemon,
    rng: &mut impl BattleRng,
) -> u32 {
    let (attack, defense) = match used_move.category {
        DamageCategory::Physical => (attacker.stats.attack, defender.stats.defense),
        _ => (attacker.stats.special_attack, defender.stats.special_defense),
    };
    // a 0 defense stat would divide by zero
    let defense = defense.max(1) as f64;

    let level_factor = 2.0 * BATTLE_LEVEL / 5.0 + 2.0;
    let base = (level_factor * used_move.power as f64 * attack as f64 / defense) / 50.0 + 2.0;
    let damage = (base * rng.damage_roll()).floor() as u32;

    damage.max(1)
}
