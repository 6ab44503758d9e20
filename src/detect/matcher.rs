//! Triple-beep timing-pattern recognition.

use super::Pulse;

/// Inclusive window for a qualifying inter-pulse gap, in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GapWindow {
    /// Shortest qualifying gap.
    pub min_secs: f64,
    /// Longest qualifying gap.
    pub max_secs: f64,
}

impl GapWindow {
    fn contains(self, gap_secs: f64) -> bool {
        (self.min_secs..=self.max_secs).contains(&gap_secs)
    }
}

/// Scan time-ordered pulses for the triple-beep signature.
///
/// A triple beep is three pulses whose two consecutive gaps both fall inside
/// `window`; the incident time is the third pulse's time. Every qualifying
/// position emits independently: four evenly spaced pulses report two
/// incidents one gap apart. That mirrors the intended handling of
/// back-to-back alarms and is deliberately not deduplicated.
pub fn match_triple_beeps(pulses: &[Pulse], window: GapWindow) -> Vec<f64> {
    let mut incidents = Vec::new();

    for triplet in pulses.windows(3) {
        let first_gap = triplet[1].time - triplet[0].time;
        let second_gap = triplet[2].time - triplet[1].time;
        if window.contains(first_gap) && window.contains(second_gap) {
            incidents.push(triplet[2].time);
        }
    }

    incidents
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pulses_at(times: &[f64]) -> Vec<Pulse> {
        times
            .iter()
            .map(|&time| Pulse {
                time,
                strength: 1.0,
            })
            .collect()
    }

    const WINDOW: GapWindow = GapWindow {
        min_secs: 0.06,
        max_secs: 0.12,
    };

    #[test]
    fn triplet_with_qualifying_gaps_emits_third_pulse_time() {
        let incidents = match_triple_beeps(&pulses_at(&[0.0, 0.08, 0.16, 1.0]), WINDOW);
        assert_eq!(incidents, vec![0.16]);
    }

    #[test]
    fn fewer_than_three_pulses_emit_nothing() {
        assert!(match_triple_beeps(&pulses_at(&[]), WINDOW).is_empty());
        assert!(match_triple_beeps(&pulses_at(&[1.0]), WINDOW).is_empty());
        assert!(match_triple_beeps(&pulses_at(&[1.0, 1.08]), WINDOW).is_empty());
    }

    #[test]
    fn gap_outside_window_breaks_the_pattern() {
        // Second gap too long.
        assert!(match_triple_beeps(&pulses_at(&[0.0, 0.08, 0.30]), WINDOW).is_empty());
        // First gap too short.
        assert!(match_triple_beeps(&pulses_at(&[0.0, 0.03, 0.11]), WINDOW).is_empty());
    }

    #[test]
    fn boundary_gaps_are_inclusive() {
        let incidents = match_triple_beeps(&pulses_at(&[0.0, 0.06, 0.18]), WINDOW);
        assert_eq!(incidents, vec![0.18]);
    }

    #[test]
    fn chained_pulses_emit_one_incident_per_position() {
        // Four evenly spaced pulses: positions ending at 0.16 and 0.24 both
        // qualify; no deduplication.
        let incidents = match_triple_beeps(&pulses_at(&[0.0, 0.08, 0.16, 0.24]), WINDOW);
        assert_eq!(incidents, vec![0.16, 0.24]);
    }

    #[test]
    fn distinct_triples_emit_distinct_incidents() {
        let incidents =
            match_triple_beeps(&pulses_at(&[0.0, 0.08, 0.16, 5.0, 5.1, 5.2]), WINDOW);
        assert_eq!(incidents, vec![0.16, 5.2]);
    }
}
