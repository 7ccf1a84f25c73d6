//! Cageside commentator shouts.

use serde::{Deserialize, Serialize};

/// Number of commentator seats along the cage.
pub const SEATS: u8 = 3;

/// What the commentator yells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShoutKind {
    /// A clean takedown.
    Takedown,
}

impl ShoutKind {
    /// Text shown in the speech bubble.
    #[must_use]
    pub const fn text(self) -> &'static str {
        match self {
            Self::Takedown => "TAKEDOWN!",
        }
    }
}

/// An active shout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shout {
    /// What is shouted.
    pub kind: ShoutKind,
    /// Which seat the bubble appears over, `0..SEATS`.
    pub seat: u8,
    /// Ticks before the bubble disappears.
    pub frames_remaining: u32,
}

/// At most one shout at a time; a new one replaces the old.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Commentary {
    current: Option<Shout>,
}

impl Commentary {
    /// Start a shout from a random seat.
    pub fn shout(&mut self, kind: ShoutKind, frames: u32, rng: &mut fastrand::Rng) {
        if frames == 0 {
            return;
        }
        self.current = Some(Shout {
            kind,
            seat: rng.u8(0..SEATS),
            frames_remaining: frames,
        });
    }

    /// Age the current shout by one tick.
    pub fn tick(&mut self) {
        if let Some(shout) = self.current.as_mut() {
            shout.frames_remaining = shout.frames_remaining.saturating_sub(1);
            if shout.frames_remaining == 0 {
                self.current = None;
            }
        }
    }

    /// The shout being displayed, if any.
    #[must_use]
    pub const fn current(&self) -> Option<Shout> {
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shout_lasts_its_frames() {
        let mut rng = fastrand::Rng::with_seed(3);
        let mut commentary = Commentary::default();
        commentary.shout(ShoutKind::Takedown, 90, &mut rng);

        let shout = commentary.current().expect("shout");
        assert_eq!(shout.kind.text(), "TAKEDOWN!");
        assert!(shout.seat < SEATS);

        for _ in 0..89 {
            commentary.tick();
        }
        assert_eq!(commentary.current().map(|s| s.frames_remaining), Some(1));
        commentary.tick();
        assert!(commentary.current().is_none());
    }

    #[test]
    fn test_new_shout_replaces_old() {
        let mut rng = fastrand::Rng::with_seed(4);
        let mut commentary = Commentary::default();
        commentary.shout(ShoutKind::Takedown, 90, &mut rng);
        for _ in 0..50 {
            commentary.tick();
        }
        commentary.shout(ShoutKind::Takedown, 90, &mut rng);
        assert_eq!(commentary.current().map(|s| s.frames_remaining), Some(90));
    }

    #[test]
    fn test_tick_without_shout_is_noop() {
        let mut commentary = Commentary::default();
        commentary.tick();
        assert!(commentary.current().is_none());
    }
}
