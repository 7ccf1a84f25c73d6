//! Fighter state machine.
//!
//! [`advance`] runs once per fixed tick per fighter. Rules, in order:
//!
//! 1. A knocked-out fighter is frozen.
//! 2. Stamina regenerates while idle or walking.
//! 3. The action timer counts down; at zero the fighter returns to idle and
//!    drops its hitbox.
//! 4. Free fighters walk; a takedown lunges forward during its live window.
//! 5. Free fighters with enough stamina start at most one action, chosen by
//!    priority takedown > punch > kick > block.
//! 6. The body is clamped to the arena.
//! 7. Free fighters turn to face the opponent.

use tracing::trace;

use crate::fighter::{Action, ActionState, Facing, Fighter};
use crate::input::{InputState, MoveDirection};
use crate::tuning::CombatTuning;

/// Advance `fighter` by one tick under `input`.
pub fn advance(fighter: &mut Fighter, input: &InputState, opponent: &Fighter, tuning: &CombatTuning) {
    if fighter.is_knocked_out() {
        return;
    }

    if fighter.state.is_free() {
        fighter.restore_stamina(tuning.stamina_regen);
    }

    tick_timer(fighter);

    fighter.vx = 0.0;
    if fighter.state == ActionState::Takedown {
        lunge(fighter, opponent, tuning);
    } else if fighter.can_act() {
        walk(fighter, input.movement(), tuning);
    }

    let started = if fighter.can_act() && fighter.stamina >= tuning.min_action_stamina {
        choose_action(input, fighter.stamina, tuning).map(|action| start_action(fighter, action, tuning))
    } else {
        None
    };

    fighter.clamp_to_arena(tuning.arena_width);

    if fighter.state == ActionState::Takedown && started.is_none() {
        fighter.track_takedown_hitbox(tuning);
    }

    if fighter.can_act() {
        fighter.facing = Facing::toward(fighter.x, opponent.x);
    }
}

/// First affordable action among the held intents, by priority.
#[must_use]
pub fn choose_action(input: &InputState, stamina: f32, tuning: &CombatTuning) -> Option<Action> {
    Action::PRIORITY.into_iter().find(|action| {
        let held = match action {
            Action::Takedown => input.takedown,
            Action::Punch => input.punch,
            Action::Kick => input.kick,
            Action::Block => input.block,
        };
        let cost = action
            .attack_kind()
            .map_or(0.0, |kind| tuning.profile(kind).stamina_cost);
        held && stamina >= cost
    })
}

fn tick_timer(fighter: &mut Fighter) {
    if fighter.state_timer == 0 {
        return;
    }
    fighter.state_timer -= 1;
    if fighter.state_timer == 0 {
        fighter.finish_action();
    }
}

fn walk(fighter: &mut Fighter, direction: MoveDirection, tuning: &CombatTuning) {
    let speed = if fighter.is_player() {
        tuning.move_speed
    } else {
        tuning.move_speed * tuning.enemy_speed_factor
    };

    fighter.vx = direction.sign() * speed;
    fighter.x += fighter.vx;
    fighter.state = if direction == MoveDirection::Still {
        ActionState::Idle
    } else {
        ActionState::Walk
    };
}

fn lunge(fighter: &mut Fighter, opponent: &Fighter, tuning: &CombatTuning) {
    if !tuning.takedown_window_open(fighter.state_timer) {
        return;
    }
    // Stop short instead of passing through the opponent.
    if fighter.distance_to(opponent) <= fighter.width * tuning.lunge_min_gap {
        return;
    }

    let factor = if fighter.is_player() {
        tuning.player_lunge_factor
    } else {
        tuning.enemy_lunge_factor
    };
    fighter.vx = fighter.facing.sign() * tuning.move_speed * factor;
    fighter.x += fighter.vx;
}

fn start_action(fighter: &mut Fighter, action: Action, tuning: &CombatTuning) -> Action {
    match action.attack_kind() {
        Some(kind) => {
            let profile = tuning.profile(kind);
            fighter.drain_stamina(profile.stamina_cost);
            fighter.set_state(kind.state(), profile.frames);
            fighter.hitbox = Some(fighter.attack_hitbox(kind, tuning));
        },
        None => {
            fighter.set_state(ActionState::Block, tuning.block_frames);
            fighter.hitbox = None;
        },
    }
    trace!(side = %fighter.side, ?action, stamina = fighter.stamina, "action started");
    action
}
