use contracts::shared::autosave::MAX_RECORD_AGE_MS;

pub const DEFAULT_SAVE_INTERVAL_MS: u32 = 30_000;
pub const DEFAULT_DEBOUNCE_MS: u32 = 1_000;
pub const DEFAULT_INDICATOR_MS: u32 = 2_000;
/// Shortest accepted period of the periodic save
pub const MIN_SAVE_INTERVAL_MS: u32 = 1_000;

/// Timing of one autosave session
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AutosaveConfig {
    /// Period of the safety-net save
    pub save_interval_ms: u32,
    /// Quiet time after the last input before saving
    pub debounce_ms: u32,
    /// Drafts at least this old are dropped on load
    pub max_age_ms: i64,
    /// How long the "Draft saved" toast stays visible
    pub indicator_ms: u32,
}

impl Default for AutosaveConfig {
    fn default() -> Self {
        Self {
            save_interval_ms: DEFAULT_SAVE_INTERVAL_MS,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            max_age_ms: MAX_RECORD_AGE_MS,
            indicator_ms: DEFAULT_INDICATOR_MS,
        }
    }
}

impl AutosaveConfig {
    /// Periods below `MIN_SAVE_INTERVAL_MS` (including 0) are raised to it
    pub fn with_save_interval(mut self, save_interval_ms: u32) -> Self {
        self.save_interval_ms = save_interval_ms.max(MIN_SAVE_INTERVAL_MS);
        self
    }

    pub fn with_debounce(mut self, debounce_ms: u32) -> Self {
        self.debounce_ms = debounce_ms;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AutosaveConfig::default();
        assert_eq!(config.save_interval_ms, 30_000);
        assert_eq!(config.debounce_ms, 1_000);
        assert_eq!(config.max_age_ms, 86_400_000);
    }

    #[test]
    fn test_overrides() {
        let config = AutosaveConfig::default()
            .with_save_interval(5_000)
            .with_debounce(250);
        assert_eq!(config.save_interval_ms, 5_000);
        assert_eq!(config.debounce_ms, 250);
        assert_eq!(config.indicator_ms, DEFAULT_INDICATOR_MS);
    }

    #[test]
    fn test_save_interval_has_a_floor() {
        assert_eq!(
            AutosaveConfig::default().with_save_interval(0).save_interval_ms,
            MIN_SAVE_INTERVAL_MS
        );
        assert_eq!(
            AutosaveConfig::default().with_save_interval(10).save_interval_ms,
            MIN_SAVE_INTERVAL_MS
        );
        assert_eq!(
            AutosaveConfig::default()
                .with_save_interval(MIN_SAVE_INTERVAL_MS)
                .save_interval_ms,
            1_000
        );
    }
}
