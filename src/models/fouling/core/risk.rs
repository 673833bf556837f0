use uom::si::{f64::Time, time::hour};

/// Fouling severity bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RiskBand {
    Ok,
    Watch,
    Critical,
}

impl RiskBand {
    /// Indices below this are [`RiskBand::Ok`].
    pub const OK_LIMIT: f64 = 0.60;

    /// Indices below this, and at or above [`RiskBand::OK_LIMIT`], are
    /// [`RiskBand::Watch`].
    pub const WATCH_LIMIT: f64 = 0.85;

    /// Classifies a fouling index; each limit belongs to the band above it.
    #[must_use]
    pub fn classify(fouling_index: f64) -> Self {
        if fouling_index < Self::OK_LIMIT {
            Self::Ok
        } else if fouling_index < Self::WATCH_LIMIT {
            Self::Watch
        } else {
            Self::Critical
        }
    }
}

/// Post-processed output of the two regressors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FoulingPrediction {
    /// Nominally in `[0, 1]`, reported as predicted.
    pub fouling_index: f64,
    /// Never negative.
    pub time_to_clean: Time,
    pub risk: RiskBand,
}

impl FoulingPrediction {
    #[must_use]
    pub fn time_to_clean_hours(&self) -> f64 {
        self.time_to_clean.get::<hour>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bands() {
        assert_eq!(RiskBand::classify(0.5), RiskBand::Ok);
        assert_eq!(RiskBand::classify(0.70), RiskBand::Watch);
        assert_eq!(RiskBand::classify(0.90), RiskBand::Critical);
        assert_eq!(RiskBand::classify(-0.1), RiskBand::Ok);
    }

    #[test]
    fn limits_resolve_to_the_upper_band() {
        assert_eq!(RiskBand::classify(0.60), RiskBand::Watch);
        assert_eq!(RiskBand::classify(0.85), RiskBand::Critical);
        assert_eq!(RiskBand::classify(0.599_999_9), RiskBand::Ok);
        assert_eq!(RiskBand::classify(0.849_999_9), RiskBand::Watch);
    }
}
