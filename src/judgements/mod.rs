pub mod counter_display;

use std::fmt;

/// Bucket a judgement is tallied under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    /// Best possible basic judgement
    Max,
    Basic,
    /// Nested judgements outside the spinner, e.g. slider ticks
    Tick,
    Bonus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hit {
    X300,
    X100,
    X50,
    MISS,
    SliderTick,
    SpinnerSpin,
    SpinnerBonus,
}

impl Hit {
    /// Every judgement in display order, the max judgement first
    pub const ALL: [Hit; 7] = [
        Hit::X300,
        Hit::X100,
        Hit::X50,
        Hit::MISS,
        Hit::SliderTick,
        Hit::SpinnerSpin,
        Hit::SpinnerBonus,
    ];

    pub fn classification(&self) -> Classification {
        match self {
            Hit::X300 => Classification::Max,
            Hit::X100 | Hit::X50 | Hit::MISS | Hit::SpinnerSpin => Classification::Basic,
            Hit::SliderTick => Classification::Tick,
            Hit::SpinnerBonus => Classification::Bonus,
        }
    }

    /// Classified as basic, the max judgement included
    pub fn is_basic(&self) -> bool {
        matches!(self.classification(), Classification::Max | Classification::Basic)
    }

    pub fn is_bonus(&self) -> bool {
        self.classification() == Classification::Bonus
    }

    pub fn name(&self) -> &'static str {
        match self {
            Hit::X300 => "300",
            Hit::X100 => "100",
            Hit::X50 => "50",
            Hit::MISS => "Miss",
            Hit::SliderTick => "Slider tick",
            Hit::SpinnerSpin => "Spinner spin",
            Hit::SpinnerBonus => "Spinner bonus",
        }
    }
}

impl fmt::Display for Hit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JudgementCount {
    pub hit: Hit,
    pub count: u32,
}

impl JudgementCount {
    #[inline]
    pub fn is_max(&self) -> bool {
        self.hit.classification() == Classification::Max
    }
}

/// Per-judgement hit counts.
///
/// Mutated from a single consumer, shared state is left to callers.
#[derive(Debug, Clone)]
pub struct JudgementTally {
    results: Vec<JudgementCount>,
}

impl Default for JudgementTally {
    fn default() -> Self {
        Self {
            results: Hit::ALL
                .iter()
                .map(|&hit| JudgementCount { hit, count: 0 })
                .collect(),
        }
    }
}

impl JudgementTally {
    /// Ordered buckets, the first one is always the max judgement
    pub fn results(&self) -> &[JudgementCount] {
        &self.results
    }

    pub fn max_result(&self) -> &JudgementCount {
        &self.results[0]
    }

    pub fn record(&mut self, hit: Hit) {
        if let Some(result) = self.results.iter_mut().find(|r| r.hit == hit) {
            result.count += 1;
        }
    }

    pub fn count(&self, hit: Hit) -> u32 {
        self.results
            .iter()
            .find(|r| r.hit == hit)
            .map(|r| r.count)
            .unwrap_or(0)
    }

    pub fn count_by(&self, classification: Classification) -> u32 {
        self.results
            .iter()
            .filter(|r| r.hit.classification() == classification)
            .map(|r| r.count)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        assert_eq!(Hit::X300.classification(), Classification::Max);
        assert_eq!(Hit::X100.classification(), Classification::Basic);
        assert_eq!(Hit::SpinnerSpin.classification(), Classification::Basic);
        assert_eq!(Hit::SpinnerBonus.classification(), Classification::Bonus);

        assert_eq!(Hit::SliderTick.classification(), Classification::Tick);

        assert!(Hit::MISS.is_basic());
        assert!(Hit::X300.is_basic());
        assert!(Hit::SpinnerSpin.is_basic());
        assert!(!Hit::SpinnerSpin.is_bonus());
        assert!(!Hit::SliderTick.is_basic());
        assert!(!Hit::SliderTick.is_bonus());
        assert!(!Hit::SpinnerBonus.is_basic());
        assert!(Hit::SpinnerBonus.is_bonus());
    }

    #[test]
    fn test_basic_agrees_with_classification() {
        for hit in Hit::ALL {
            let basic = matches!(hit.classification(), Classification::Max | Classification::Basic);
            assert_eq!(hit.is_basic(), basic, "{hit}");
        }
    }

    #[test]
    fn test_tally_counts() {
        let mut tally = JudgementTally::default();

        assert!(tally.max_result().is_max());
        assert_eq!(tally.results().len(), Hit::ALL.len());

        tally.record(Hit::X300);
        tally.record(Hit::X300);
        tally.record(Hit::SpinnerSpin);
        tally.record(Hit::SpinnerBonus);

        assert_eq!(tally.count(Hit::X300), 2);
        assert_eq!(tally.max_result().count, 2);
        assert_eq!(tally.count_by(Classification::Basic), 1);
        assert_eq!(tally.count_by(Classification::Bonus), 1);
        assert_eq!(tally.count(Hit::X100), 0);
    }
}
