//! Hit resolution.
//!
//! [`resolve`] runs once per direction per tick. It tests the attacker's live
//! hitbox against the defender's hurtbox and applies the outcome to both
//! fighters. Side effects the presentation cares about (blood, shouts, log
//! lines) are derived from the returned [`Exchange`].

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::fighter::{ActionState, AttackKind, Fighter};
use crate::tuning::CombatTuning;

/// Outcome of a connecting attack.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Exchange {
    /// Both fighters shot at once. Stamina only.
    TakedownClash,
    /// The defender was guarding and sprawled on the shot.
    TakedownSprawled,
    /// Clean takedown; the defender is slammed.
    TakedownLanded {
        /// Health removed.
        damage: f32,
    },
    /// Strike absorbed by the guard.
    StrikeBlocked {
        /// Punch or kick.
        kind: AttackKind,
        /// Stamina the guard cost the defender.
        stamina_loss: f32,
    },
    /// Clean strike; the defender is stunned.
    StrikeLanded {
        /// Punch or kick.
        kind: AttackKind,
        /// Health removed.
        damage: f32,
    },
}

impl Exchange {
    /// Blood spray for this exchange, anchored on the defender.
    #[must_use]
    pub fn blood(&self, defender: &Fighter, tuning: &CombatTuning) -> Option<BloodBurst> {
        let (count, height) = match self {
            Self::TakedownLanded { .. } => (tuning.takedown_blood, 0.8),
            Self::StrikeLanded { .. } => (tuning.strike_blood, 0.2),
            Self::StrikeBlocked { .. } => (tuning.blocked_blood, 0.2),
            Self::TakedownClash | Self::TakedownSprawled => return None,
        };
        if count == 0 {
            return None;
        }
        Some(BloodBurst {
            x: defender.center_x(),
            y: defender.y + defender.height * height,
            count,
        })
    }
}

/// Request to spawn blood particles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BloodBurst {
    /// Spawn x.
    pub x: f32,
    /// Spawn y.
    pub y: f32,
    /// Particle count.
    pub count: u32,
}

/// Resolve `attacker`'s hitbox against `defender`.
///
/// Returns `None` when nothing connects: no hitbox, a reeling defender, an
/// attack outside its live window, or no overlap. On contact the attacker's
/// hitbox is consumed and both fighters are re-clamped to the arena.
pub fn resolve(attacker: &mut Fighter, defender: &mut Fighter, tuning: &CombatTuning) -> Option<Exchange> {
    let hitbox = attacker.hitbox?;
    if attacker.is_knocked_out() || defender.state.is_reeling() {
        return None;
    }
    let kind = attacker.state.attack_kind()?;
    if !is_live(kind, attacker.state_timer, tuning) || !hitbox.overlaps(&defender.hurtbox()) {
        return None;
    }

    attacker.hitbox = None;
    let exchange = match kind {
        AttackKind::Takedown => resolve_takedown(attacker, defender, tuning),
        AttackKind::Punch | AttackKind::Kick => resolve_strike(kind, defender, tuning),
    };

    attacker.clamp_to_arena(tuning.arena_width);
    defender.clamp_to_arena(tuning.arena_width);

    debug!(
        attacker = %attacker.side,
        defender = %defender.side,
        ?exchange,
        defender_health = defender.health,
        defender_stamina = defender.stamina,
        "exchange"
    );
    Some(exchange)
}

/// Whether an attack with `remaining` frames left can connect.
#[must_use]
pub fn is_live(kind: AttackKind, remaining: u32, tuning: &CombatTuning) -> bool {
    match kind {
        AttackKind::Takedown => tuning.takedown_window_open(remaining),
        AttackKind::Punch | AttackKind::Kick => remaining > tuning.strike_active_min_frames,
    }
}

fn resolve_takedown(attacker: &mut Fighter, defender: &mut Fighter, tuning: &CombatTuning) -> Exchange {
    match defender.state {
        ActionState::Takedown => {
            attacker.drain_stamina(tuning.clash_stamina_cost);
            defender.drain_stamina(tuning.clash_stamina_cost);
            defender.recover(tuning.recovery_frames);
            defender.knock_back(tuning.knockback);
            Exchange::TakedownClash
        },
        ActionState::Block => {
            defender.drain_stamina(tuning.sprawl_stamina_cost);
            defender.recover(tuning.recovery_frames);
            attacker.drain_stamina(tuning.stuffed_takedown_stamina_cost);
            attacker.knock_back(tuning.knockback);
            Exchange::TakedownSprawled
        },
        _ => {
            let damage = defender.apply_damage(tuning.takedown.damage);
            defender.set_state(ActionState::Slammed, tuning.slammed_frames);
            defender.hitbox = None;
            Exchange::TakedownLanded { damage }
        },
    }
}

fn resolve_strike(kind: AttackKind, defender: &mut Fighter, tuning: &CombatTuning) -> Exchange {
    let base = tuning.profile(kind).damage;
    if defender.state == ActionState::Block {
        let stamina_loss = base * tuning.block_stamina_factor;
        defender.drain_stamina(stamina_loss);
        Exchange::StrikeBlocked { kind, stamina_loss }
    } else {
        let damage = defender.apply_damage(base);
        defender.set_state(ActionState::Hit, tuning.hit_stun_frames);
        defender.hitbox = None;
        Exchange::StrikeLanded { kind, damage }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::InputState;
    use crate::state_machine::advance;
    use rkena_common::FighterSide;

    fn close_pair() -> (CombatTuning, Fighter, Fighter) {
        let t = CombatTuning::default();
        let player = Fighter::spawn(FighterSide::Player, &t);
        let enemy = Fighter::new(FighterSide::Enemy, 220.0, &t);
        (t, player, enemy)
    }

    fn arm(fighter: &mut Fighter, kind: AttackKind, remaining: u32, t: &CombatTuning) {
        fighter.set_state(kind.state(), remaining);
        fighter.hitbox = Some(fighter.attack_hitbox(kind, t));
    }

    #[test]
    fn test_clean_punch() {
        let (t, mut player, mut enemy) = close_pair();
        advance(&mut player, &InputState::NONE.with_punch(), &enemy, &t);
        assert_eq!(player.stamina, 90.0);

        let exchange = resolve(&mut player, &mut enemy, &t);
        assert_eq!(
            exchange,
            Some(Exchange::StrikeLanded {
                kind: AttackKind::Punch,
                damage: 4.0
            })
        );
        assert_eq!(enemy.health, 96.0);
        assert_eq!(enemy.state, ActionState::Hit);
        assert_eq!(enemy.state_timer, t.hit_stun_frames);
        assert!(player.hitbox.is_none());
        assert_eq!(player.state, ActionState::Punch);
    }

    #[test]
    fn test_blocked_kick_costs_double_stamina() {
        let (t, mut player, mut enemy) = close_pair();
        enemy.set_state(ActionState::Block, t.block_frames);
        arm(&mut player, AttackKind::Kick, 30, &t);

        let exchange = resolve(&mut player, &mut enemy, &t);
        assert_eq!(
            exchange,
            Some(Exchange::StrikeBlocked {
                kind: AttackKind::Kick,
                stamina_loss: 12.0
            })
        );
        assert_eq!(enemy.health, 100.0);
        assert_eq!(enemy.stamina, 88.0);
        assert_eq!(enemy.state, ActionState::Block);
    }

    #[test]
    fn test_strike_startup_frames_cannot_connect() {
        let (t, mut player, mut enemy) = close_pair();
        arm(&mut player, AttackKind::Punch, t.strike_active_min_frames, &t);
        assert_eq!(resolve(&mut player, &mut enemy, &t), None);
        assert!(player.hitbox.is_some(), "a miss does not consume the hitbox");
    }

    #[test]
    fn test_reeling_defender_is_untouchable() {
        let (t, mut player, mut enemy) = close_pair();
        arm(&mut player, AttackKind::Punch, 20, &t);
        for state in [ActionState::Hit, ActionState::Slammed] {
            enemy.set_state(state, 10);
            assert_eq!(resolve(&mut player, &mut enemy, &t), None);
        }
        enemy.knock_out();
        assert_eq!(resolve(&mut player, &mut enemy, &t), None);
        assert_eq!(enemy.health, 0.0);
    }

    #[test]
    fn test_out_of_reach_misses() {
        let (t, mut player, _) = close_pair();
        let mut enemy = Fighter::spawn(FighterSide::Enemy, &t);
        arm(&mut player, AttackKind::Kick, 30, &t);
        assert_eq!(resolve(&mut player, &mut enemy, &t), None);
    }

    #[test]
    fn test_takedown_only_connects_in_window() {
        let (t, mut player, mut enemy) = close_pair();
        arm(&mut player, AttackKind::Takedown, 50, &t);
        assert_eq!(resolve(&mut player, &mut enemy, &t), None);

        player.state_timer = 15;
        assert_eq!(resolve(&mut player, &mut enemy, &t), None);

        player.state_timer = 40;
        let exchange = resolve(&mut player, &mut enemy, &t);
        assert_eq!(exchange, Some(Exchange::TakedownLanded { damage: 12.0 }));
        assert_eq!(enemy.health, 88.0);
        assert_eq!(enemy.state, ActionState::Slammed);
        assert_eq!(enemy.state_timer, t.slammed_frames);
        assert_eq!(player.state, ActionState::Takedown);
        assert_eq!(player.state_timer, 40, "landing does not shorten the shot");
        assert!(player.hitbox.is_none());
    }

    #[test]
    fn test_takedown_clash() {
        let (t, mut player, mut enemy) = close_pair();
        arm(&mut player, AttackKind::Takedown, 40, &t);
        arm(&mut enemy, AttackKind::Takedown, 40, &t);

        let exchange = resolve(&mut player, &mut enemy, &t);
        assert_eq!(exchange, Some(Exchange::TakedownClash));
        assert_eq!(player.stamina, 90.0);
        assert_eq!(enemy.stamina, 90.0);
        assert_eq!(player.health, 100.0);
        assert_eq!(enemy.health, 100.0);
        assert_eq!(enemy.state, ActionState::Idle);
        assert_eq!(enemy.state_timer, t.recovery_frames);
        assert!(enemy.hitbox.is_none());
        assert_eq!(enemy.x, 240.0, "knocked back away from the attacker");

        assert_eq!(resolve(&mut enemy, &mut player, &t), None);
    }

    #[test]
    fn test_blocked_takedown_is_sprawled() {
        let (t, mut player, mut enemy) = close_pair();
        enemy.set_state(ActionState::Block, t.block_frames);
        arm(&mut player, AttackKind::Takedown, 40, &t);

        let exchange = resolve(&mut player, &mut enemy, &t);
        assert_eq!(exchange, Some(Exchange::TakedownSprawled));
        assert_eq!(enemy.health, 100.0);
        assert_eq!(enemy.stamina, 95.0);
        assert_eq!(enemy.state, ActionState::Idle);
        assert_eq!(enemy.state_timer, t.recovery_frames);
        assert_eq!(player.stamina, 85.0);
        assert_eq!(player.x, 130.0);
        assert_eq!(player.state, ActionState::Takedown);
    }

    #[test]
    fn test_knockback_respects_wall() {
        let t = CombatTuning::default();
        let mut player = Fighter::new(FighterSide::Player, 5.0, &t);
        let mut enemy = Fighter::new(FighterSide::Enemy, 75.0, &t);
        enemy.set_state(ActionState::Block, t.block_frames);
        arm(&mut player, AttackKind::Takedown, 40, &t);

        assert_eq!(resolve(&mut player, &mut enemy, &t), Some(Exchange::TakedownSprawled));
        assert_eq!(player.x, 0.0);
    }

    #[test]
    fn test_lethal_strike_floors_health() {
        let (t, mut player, mut enemy) = close_pair();
        enemy.health = 3.0;
        arm(&mut player, AttackKind::Punch, 20, &t);
        let exchange = resolve(&mut player, &mut enemy, &t);
        assert_eq!(
            exchange,
            Some(Exchange::StrikeLanded {
                kind: AttackKind::Punch,
                damage: 3.0
            })
        );
        assert_eq!(enemy.health, 0.0);
    }

    #[test]
    fn test_blood_per_exchange() {
        let t = CombatTuning::default();
        let defender = Fighter::spawn(FighterSide::Enemy, &t);

        let burst = Exchange::TakedownLanded { damage: 12.0 }.blood(&defender, &t);
        assert_eq!(
            burst,
            Some(BloodBurst {
                x: 600.0,
                y: 220.0 + 144.0,
                count: 15
            })
        );

        let strike = Exchange::StrikeLanded {
            kind: AttackKind::Kick,
            damage: 6.0,
        };
        assert_eq!(strike.blood(&defender, &t).map(|b| b.count), Some(12));
        assert_eq!(Exchange::TakedownClash.blood(&defender, &t), None);
        assert_eq!(Exchange::TakedownSprawled.blood(&defender, &t), None);
    }
}
