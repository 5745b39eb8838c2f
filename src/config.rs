use serde::Serialize;

/// Schedule shape the engine operates over. Days, slot labels and the master
/// subject list are configuration, not computed values: the engine treats
/// every label as an opaque string and its contract does not change if the
/// lists are swapped.
#[derive(Debug, Clone, Serialize)]
pub struct ScheduleConfig {
    pub days: Vec<String>,
    pub time_slots: Vec<String>,
    pub subject_names: Vec<String>,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        ScheduleConfig {
            // The current product models one representative day.
            days: vec!["Saturday".to_string()],
            time_slots: [
                "09:00 AM", "10:00 AM", "11:00 AM", "12:00 PM", "01:00 PM", "02:00 PM", "03:00 PM",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            subject_names: [
                "Piano",
                "Guitar",
                "Flute",
                "Recorder",
                "Clarinet",
                "Cello",
                "Drums & Percussion",
                "Voice",
                "Music Theory",
                "Composition",
                "Violin – Practical Musicianship",
                "Ensemble Skills",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

impl ScheduleConfig {
    pub fn has_day(&self, day: &str) -> bool {
        self.days.iter().any(|d| d == day)
    }

    pub fn has_time_slot(&self, slot: &str) -> bool {
        self.time_slots.iter().any(|s| s == slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_spans_seven_slots() {
        let cfg = ScheduleConfig::default();
        assert_eq!(cfg.days, vec!["Saturday"]);
        assert_eq!(cfg.time_slots.len(), 7);
        assert_eq!(cfg.time_slots.first().map(String::as_str), Some("09:00 AM"));
        assert_eq!(cfg.time_slots.last().map(String::as_str), Some("03:00 PM"));
        assert_eq!(cfg.subject_names.len(), 12);
    }

    #[test]
    fn membership_checks_are_exact() {
        let cfg = ScheduleConfig::default();
        assert!(cfg.has_day("Saturday"));
        assert!(!cfg.has_day("saturday"));
        assert!(cfg.has_time_slot("01:00 PM"));
        assert!(!cfg.has_time_slot("13:00"));
    }
}
