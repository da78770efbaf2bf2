use crate::{
    hit_objects::{spinner::{SpinnerTick, TickKind}, HitSample},
    judgements::{counter_display::CounterEvent, Hit, JudgementTally},
};

/// Spinner tick wrapped with its outcome, kind and sample are kept as is
#[derive(Debug, Clone, PartialEq)]
pub struct JudgedTick {
    pub tick: SpinnerTick,
    pub hit: bool,
}

impl JudgedTick {
    #[inline]
    pub fn kind(&self) -> TickKind {
        self.tick.kind
    }

    #[inline]
    pub fn sample(&self) -> Option<&HitSample> {
        self.tick.sample.as_ref()
    }

    pub fn result(&self) -> Option<Hit> {
        self.tick.kind.hit_result(self.hit)
    }

    /// Message for the counter display, `None` for ignored misses
    pub fn event(&self) -> Option<CounterEvent> {
        self.result().map(CounterEvent::Judged)
    }
}

/// Responsible for
/// 1. Tracking completed spins of a single spinner
/// 2. Assigning results to its ticks in generation order
pub struct SpinnerProcessor<'a> {
    ticks: &'a [SpinnerTick],

    /// Ticks before this index are already judged
    judged: usize,
}

impl<'a> SpinnerProcessor<'a> {
    pub fn new(ticks: &'a [SpinnerTick]) -> Self {
        Self { ticks, judged: 0 }
    }

    pub fn remaining(&self) -> usize {
        self.ticks.len() - self.judged
    }

    /// Judges every tick covered by `completed_spins` as hit.
    /// Spin counts never go backwards, lower values are ignored.
    pub fn store_spins(&mut self, completed_spins: u32) -> Vec<JudgedTick> {
        let target = (completed_spins as usize).min(self.ticks.len());

        if target < self.judged {
            tracing::warn!(
                "Ignoring spin count {} lower than already judged {}",
                completed_spins, self.judged
            );
            return Vec::new();
        }

        self.judge_until(target, true)
    }

    /// Spinner ended, every tick left is a miss
    pub fn finish(mut self) -> Vec<JudgedTick> {
        let end = self.ticks.len();
        self.judge_until(end, false)
    }

    fn judge_until(&mut self, end: usize, hit: bool) -> Vec<JudgedTick> {
        let judged = self.ticks[self.judged..end]
            .iter()
            .map(|tick| JudgedTick {
                tick: tick.clone(),
                hit,
            })
            .collect();

        self.judged = end;

        judged
    }
}

/// Records every judged tick that produces a result
pub fn record_all(tally: &mut JudgementTally, judged: &[JudgedTick]) {
    for hit in judged.iter().filter_map(JudgedTick::result) {
        tally.record(hit);
    }
}

#[cfg(test)]
mod tests {
    use crate::hit_objects::{
        cancel::NeverCancel, spinner::Spinner, BeatmapDifficulty, NestedObjects,
    };

    use super::*;

    fn ticks() -> Vec<SpinnerTick> {
        let spinner = Spinner::new(0.0, 2000.0);
        let params = spinner.derive_parameters(&BeatmapDifficulty::new(5.0)).unwrap();

        spinner
            .generate_nested(&params, &NeverCancel)
            .unwrap()
            .completed()
            .unwrap()
    }

    #[test]
    fn test_partial_spins_then_finish() {
        let ticks = ticks();
        let mut processor = SpinnerProcessor::new(&ticks);

        let first = processor.store_spins(3);
        assert_eq!(first.len(), 3);
        assert!(first.iter().all(|t| t.hit && t.result() == Some(Hit::SpinnerSpin)));

        assert!(processor.store_spins(2).is_empty());

        let rest = processor.finish();
        assert_eq!(rest.len(), 12);
        assert!(rest.iter().all(|t| !t.hit && t.result().is_none()));
    }

    #[test]
    fn test_bonus_ticks_keep_sample() {
        let ticks = ticks();
        let mut processor = SpinnerProcessor::new(&ticks);

        let judged = processor.store_spins(100);
        assert_eq!(judged.len(), 15);
        assert_eq!(processor.remaining(), 0);

        let bonus: Vec<_> = judged.iter().filter(|t| t.kind() == TickKind::Bonus).collect();
        assert_eq!(bonus.len(), 8);
        assert!(bonus.iter().all(|t| t.sample().map(|s| s.name.as_str()) == Some("spinnerbonus")));

        let mut tally = JudgementTally::default();
        record_all(&mut tally, &judged);

        assert_eq!(tally.count(Hit::SpinnerSpin), 7);
        assert_eq!(tally.count(Hit::SpinnerBonus), 8);
    }
}
