//! Hit detection and damage resolution
//!
//! An attack lands when its hitbox overlaps the defender's body rect during
//! the active window. Blocking mitigates damage in proportion to the
//! defender's remaining stamina.

use super::state::Fighter;
use crate::consts::{BASE_DAMAGE, GAUGE_MAX};

/// Damage an attack deals against a defender in its current stance
///
/// A blocking defender with stamina absorbs `stamina/100` of the base
/// damage: full stamina blocks everything, empty stamina blocks nothing.
pub fn damage_against(defender: &Fighter) -> f32 {
    if defender.blocking && defender.stamina > 0.0 {
        let reduction = defender.stamina / GAUGE_MAX;
        BASE_DAMAGE * (1.0 - reduction)
    } else {
        BASE_DAMAGE
    }
}

/// Resolve one attacker-versus-defender pair for this tick
///
/// Returns the damage applied, if the attack connected. The attacker's
/// active window is closed on contact, so one activation can never land
/// twice - not later this tick and not on a subsequent one.
pub fn resolve_hit(attacker: &mut Fighter, defender: &mut Fighter) -> Option<f32> {
    let attack = attacker.attack.as_ref()?;

    if !attack.hitbox.overlaps(&defender.body_rect()) {
        return None;
    }

    let damage = damage_against(defender);
    defender.health = (defender.health - damage).max(0.0);
    attacker.attack = None;

    log::debug!(
        "{:?} hit lands on {:?} for {:.1} damage ({:.1} health left)",
        attacker.control,
        defender.control,
        damage,
        defender.health
    );
    Some(damage)
}
