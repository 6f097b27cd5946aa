//! Strike resolution.
//!
//! A strike is resolved the moment its charge is released:
//!
//! 1. The attacker lunges toward a distant target (if it has a magnet zone),
//!    steps forward and pays the stamina cost.
//! 2. The victim is the best-scoring living opponent in the strike zone.
//! 3. A shielded victim parries; a victim inside its perfect-parry window
//!    also ripostes everyone on the attacker's side within reach.
//! 4. Anyone else takes damage, is knocked back and staggered.
//!
//! Damage formulas live in [`damage`] as pure functions; [`resolve`] applies
//! them to the roster and reports side effects to the presentation layer.
//! Deaths are reported in the [`StrikeOutcome`] and carried out by the world.

pub mod damage;
mod resolve;
pub mod result;

pub use damage::{calculate_damage, damage_stamina_loss, knockback_distance, parry_stamina_loss};
pub(crate) use resolve::resolve_strike;
pub use result::StrikeOutcome;
