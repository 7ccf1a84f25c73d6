//! Match events for presentation and logging.
//!
//! The simulation queues events as they happen; a host either polls them with
//! [`EventLog::drain`] or hands a [`MatchObserver`] to the match controller.

use std::collections::VecDeque;

use rkena_common::{FighterSide, MatchGeneration};
use serde::{Deserialize, Serialize};

use crate::combat::Exchange;
use crate::fighter::AttackKind;
use crate::match_state::MatchResult;

/// Something a presentation layer may want to react to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MatchEvent {
    /// Fresh fighters are in the cage.
    RoundStarted {
        /// Generation of the new match.
        generation: MatchGeneration,
    },
    /// A punch or kick landed clean.
    StrikeLanded {
        /// Who threw it.
        attacker: FighterSide,
        /// Punch or kick.
        kind: AttackKind,
        /// Health removed.
        damage: f32,
    },
    /// A punch or kick hit the guard.
    StrikeBlocked {
        /// Who threw it.
        attacker: FighterSide,
        /// Punch or kick.
        kind: AttackKind,
        /// Stamina the guard cost.
        stamina_loss: f32,
    },
    /// Takedown completed.
    TakedownLanded {
        /// Who shot.
        attacker: FighterSide,
        /// Health removed.
        damage: f32,
    },
    /// Takedown stuffed by a sprawl.
    TakedownSprawled {
        /// Who shot.
        attacker: FighterSide,
    },
    /// Both fighters shot at once.
    TakedownClash {
        /// Whose hitbox was resolved first.
        attacker: FighterSide,
    },
    /// A fighter dropped to zero health.
    Knockout {
        /// Fighter that went down.
        loser: FighterSide,
    },
    /// Round clock hit zero with both fighters standing.
    TimeExpired,
    /// The deferred game-over signal.
    GameOver {
        /// Final result.
        result: MatchResult,
    },
}

impl MatchEvent {
    /// Event describing `exchange` thrown by `attacker`.
    #[must_use]
    pub fn from_exchange(attacker: FighterSide, exchange: Exchange) -> Self {
        match exchange {
            Exchange::TakedownClash => Self::TakedownClash { attacker },
            Exchange::TakedownSprawled => Self::TakedownSprawled { attacker },
            Exchange::TakedownLanded { damage } => Self::TakedownLanded { attacker, damage },
            Exchange::StrikeBlocked { kind, stamina_loss } => Self::StrikeBlocked {
                attacker,
                kind,
                stamina_loss,
            },
            Exchange::StrikeLanded { kind, damage } => Self::StrikeLanded { attacker, kind, damage },
        }
    }
}

/// Receives match events as they are dispatched.
pub trait MatchObserver {
    /// Called once per event, in order.
    fn on_event(&mut self, event: &MatchEvent);
}

/// Collects events into a vector. Handy in tests.
impl MatchObserver for Vec<MatchEvent> {
    fn on_event(&mut self, event: &MatchEvent) {
        self.push(event.clone());
    }
}

/// FIFO of undelivered events.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    queue: VecDeque<MatchEvent>,
}

impl EventLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an event.
    pub fn push(&mut self, event: MatchEvent) {
        self.queue.push_back(event);
    }

    /// Take every pending event, oldest first.
    pub fn drain(&mut self) -> Vec<MatchEvent> {
        self.queue.drain(..).collect()
    }

    /// Deliver every pending event to `observer`.
    pub fn dispatch(&mut self, observer: &mut dyn MatchObserver) {
        while let Some(event) = self.queue.pop_front() {
            observer.on_event(&event);
        }
    }

    /// Pending event count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Returns true if nothing is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
