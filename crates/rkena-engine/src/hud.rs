//! Text HUD.

use rkena_gameplay::snapshot::{FighterVitals, Snapshot};

/// Round clock as `MM:SS`.
#[must_use]
pub fn format_clock(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

fn bar(label: &str, vitals: &FighterVitals) -> String {
    format!(
        "{label} hp {:>3.0}/{:.0} st {:>3.0}/{:.0}",
        vitals.health, vitals.max_health, vitals.stamina, vitals.max_stamina
    )
}

/// One status line for logs.
#[must_use]
pub fn hud_line(snapshot: &Snapshot) -> String {
    format!(
        "{} | {} | {}",
        format_clock(snapshot.time_remaining),
        bar("P1", &snapshot.fighter1),
        bar("P2", &snapshot.fighter2)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vitals(health: f32, stamina: f32) -> FighterVitals {
        FighterVitals {
            health,
            max_health: 100.0,
            stamina,
            max_stamina: 100.0,
        }
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(180), "03:00");
        assert_eq!(format_clock(65), "01:05");
        assert_eq!(format_clock(9), "00:09");
        assert_eq!(format_clock(0), "00:00");
    }

    #[test]
    fn test_hud_line() {
        let snapshot = Snapshot {
            fighter1: vitals(100.0, 62.4),
            fighter2: vitals(8.0, 100.0),
            time_remaining: 75,
        };
        assert_eq!(
            hud_line(&snapshot),
            "01:15 | P1 hp 100/100 st  62/100 | P2 hp   8/100 st 100/100"
        );
    }
}
