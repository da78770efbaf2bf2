use crate::{judgements::Hit, math::diff_rate};

use super::{
    cancel::CancelSignal, hit_window::HitWindow, BeatmapDifficulty, GenerationError,
    GenerationOutcome, HitSample, NestedObjects,
};

/// Highest spin rate a player can physically reach
pub const MAXIMUM_ROTATIONS_PER_SECOND: f64 = 477.0 / 60.0;

/// Longest spinner, in milliseconds, whose spin counts fit into `i32`
pub const MAXIMUM_DURATION: f64 = i32::MAX as f64 / MAXIMUM_ROTATIONS_PER_SECOND * 1000.0;

/// Spins between spinner completion and the first bonus-awarding spin
pub const BONUS_SPINS_GAP: i32 = 2;

pub const SPINNER_BONUS_SAMPLE: &str = "spinnerbonus";
pub const SPINNER_SPIN_SAMPLE: &str = "spinnerspin";

/// Values derived from spinner duration and overall difficulty
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpinnerParameters {
    /// Spins needed to clear the spinner without a miss
    pub spins_required: i32,

    /// Spins available for bonus beyond `spins_required`.
    /// Short spinners on high difficulties produce negative values,
    /// this field keeps the raw value, see [`Self::maximum_bonus_spins`]
    pub raw_bonus_spins: i32,
}

impl SpinnerParameters {
    /// Derives spin counts for `duration` milliseconds of spinning
    pub fn new(duration: f64, overall_difficulty: f64) -> Self {
        let seconds_duration = duration / 1000.0;
        let minimum_rotations_per_second = diff_rate(overall_difficulty, 1.5, 2.5, 3.75);

        let spins_required = ((seconds_duration * minimum_rotations_per_second) as i32).max(0);
        let raw_bonus_spins = ((MAXIMUM_ROTATIONS_PER_SECOND - minimum_rotations_per_second)
            * seconds_duration) as i32
            - BONUS_SPINS_GAP;

        Self {
            spins_required,
            raw_bonus_spins,
        }
    }

    #[inline]
    pub fn maximum_bonus_spins(&self) -> i32 {
        self.raw_bonus_spins.max(0)
    }

    /// The first bonus is awarded on this spin count
    #[inline]
    pub fn spins_required_for_bonus(&self) -> i32 {
        self.spins_required.saturating_add(BONUS_SPINS_GAP)
    }

    /// Summed in `i64` so hand-built parameters can't overflow
    #[inline]
    pub fn total_spins(&self) -> i64 {
        self.raw_bonus_spins as i64 + self.spins_required as i64 + BONUS_SPINS_GAP as i64
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TickKind {
    /// Counts towards required spins
    Basic,
    /// Awarded for spins past `spins_required_for_bonus`
    Bonus,
}

impl TickKind {
    /// Judgement a hit tick of this kind produces, missed ticks are
    /// ignored by the tally.
    pub fn hit_result(&self, hit: bool) -> Option<Hit> {
        match (self, hit) {
            (_, false) => None,
            (TickKind::Basic, true) => Some(Hit::SpinnerSpin),
            (TickKind::Bonus, true) => Some(Hit::SpinnerBonus),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpinnerTick {
    pub index: usize,
    pub time: f64,
    pub kind: TickKind,
    /// Only present on bonus ticks
    pub sample: Option<HitSample>,
    pub spinner_duration: f64,
}

impl SpinnerTick {
    #[inline]
    pub fn is_bonus(&self) -> bool {
        self.kind == TickKind::Bonus
    }
}

#[derive(Debug, Clone)]
pub struct Spinner {
    pub start_time: f64,
    pub duration: f64,
    pub samples: Vec<HitSample>,

    /// Published together with `ticks` once generation completes
    pub parameters: Option<SpinnerParameters>,
    pub ticks: Vec<SpinnerTick>,
}

impl Spinner {
    pub fn new(start_time: f64, duration: f64) -> Self {
        Self {
            start_time,
            duration,
            samples: Vec::new(),
            parameters: None,
            ticks: Vec::new(),
        }
    }

    pub fn with_samples(mut self, samples: Vec<HitSample>) -> Self {
        self.samples = samples;
        self
    }

    #[inline]
    pub fn end_time(&self) -> f64 {
        self.start_time + self.duration
    }

    pub fn set_end_time(&mut self, end_time: f64) {
        self.duration = end_time - self.start_time;
    }

    pub fn hit_window(&self) -> HitWindow {
        HitWindow::empty()
    }

    /// Sample named `name` sharing bank and volume with the first sample
    pub fn create_hit_sample(&self, name: &str) -> HitSample {
        match self.samples.first() {
            Some(reference) => reference.with_name(name),
            None => HitSample::new(name),
        }
    }

    /// Looping samples played while the spinner is being spun
    pub fn auxiliary_samples(&self) -> Vec<HitSample> {
        self.samples
            .first()
            .map(|reference| vec![reference.with_name(SPINNER_SPIN_SAMPLE)])
            .unwrap_or_default()
    }

    /// Derives parameters and ticks, replacing the previous ones only
    /// when generation runs to completion.
    pub fn apply_defaults<C: CancelSignal + ?Sized>(
        &mut self,
        difficulty: &BeatmapDifficulty,
        cancel: &C,
    ) -> Result<GenerationOutcome<()>, GenerationError> {
        let params = self.derive_parameters(difficulty)?;

        let outcome = self.generate_nested(&params, cancel)?.map(|ticks| {
            self.parameters = Some(params);
            self.ticks = ticks;
        });

        Ok(outcome)
    }
}

impl NestedObjects for Spinner {
    type Parameters = SpinnerParameters;
    type Nested = SpinnerTick;

    fn derive_parameters(
        &self,
        difficulty: &BeatmapDifficulty,
    ) -> Result<SpinnerParameters, GenerationError> {
        if !(self.duration > 0.0) || !self.duration.is_finite() {
            tracing::warn!(
                "Spinner at {} has invalid duration {}",
                self.start_time, self.duration
            );

            return Err(GenerationError::InvalidDuration {
                start_time: self.start_time,
                duration: self.duration,
            });
        }

        if self.duration > MAXIMUM_DURATION {
            tracing::warn!(
                "Spinner at {} is too long ({}ms) to count its spins",
                self.start_time, self.duration
            );

            return Err(GenerationError::TooLong {
                start_time: self.start_time,
                duration: self.duration,
            });
        }

        let params = SpinnerParameters::new(self.duration, difficulty.overall_difficulty);

        tracing::debug!(
            "Spinner at {}: required: {}, bonus: {}, total: {}",
            self.start_time,
            params.spins_required,
            params.raw_bonus_spins,
            params.total_spins()
        );

        Ok(params)
    }

    fn generate_nested<C: CancelSignal + ?Sized>(
        &self,
        params: &SpinnerParameters,
        cancel: &C,
    ) -> Result<GenerationOutcome<Vec<SpinnerTick>>, GenerationError> {
        let total_spins = params.total_spins();

        if total_spins <= 0 {
            tracing::warn!(
                "Spinner at {} is too short to place any ticks",
                self.start_time
            );

            return Err(GenerationError::NoTicks {
                start_time: self.start_time,
                total_spins,
            });
        }

        if total_spins > i32::MAX as i64 {
            return Err(GenerationError::TooLong {
                start_time: self.start_time,
                duration: self.duration,
            });
        }

        let spins_required_for_bonus = params.spins_required_for_bonus() as i64;
        let mut ticks = Vec::with_capacity(total_spins as usize);

        for i in 0..total_spins {
            if cancel.is_cancelled() {
                tracing::debug!("Spinner at {} cancelled after {} ticks", self.start_time, i);
                return Ok(GenerationOutcome::Cancelled);
            }

            let time = self.start_time + (i + 1) as f64 / total_spins as f64 * self.duration;

            let (kind, sample) = if i < spins_required_for_bonus {
                (TickKind::Basic, None)
            } else {
                (TickKind::Bonus, Some(self.create_hit_sample(SPINNER_BONUS_SAMPLE)))
            };

            ticks.push(SpinnerTick {
                index: i as usize,
                time,
                kind,
                sample,
                spinner_duration: self.duration,
            });
        }

        Ok(GenerationOutcome::Completed(ticks))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicBool;

    use approx::assert_relative_eq;

    use crate::hit_objects::cancel::NeverCancel;

    use super::*;

    fn generate(spinner: &Spinner, od: f64) -> Vec<SpinnerTick> {
        let params = spinner.derive_parameters(&BeatmapDifficulty::new(od)).unwrap();

        spinner
            .generate_nested(&params, &NeverCancel)
            .unwrap()
            .completed()
            .unwrap()
    }

    #[test]
    fn test_parameters_for_two_second_spinner() {
        let params = SpinnerParameters::new(2000.0, 5.0);

        assert_eq!(params.spins_required, 5);
        assert_eq!(params.maximum_bonus_spins(), 8);
        assert_eq!(params.spins_required_for_bonus(), 7);
        assert_eq!(params.total_spins(), 15);
    }

    #[test]
    fn test_negative_bonus_spins_are_clamped_for_consumers() {
        let params = SpinnerParameters::new(200.0, 10.0);

        assert!(params.raw_bonus_spins < 0);
        assert_eq!(params.maximum_bonus_spins(), 0);
    }

    #[test]
    fn test_first_tick_time() {
        let spinner = Spinner::new(1000.0, 2000.0);
        let ticks = generate(&spinner, 5.0);

        assert_eq!(ticks.len(), 15);
        assert_relative_eq!(ticks[0].time, 1000.0 + 2000.0 / 15.0);
        assert_eq!(ticks[14].time, spinner.end_time());
    }

    #[test]
    fn test_bonus_ticks_carry_reference_sample_bank() {
        let reference = HitSample {
            name: "hitnormal".to_owned(),
            bank: Some("soft".to_owned()),
            volume: 70,
        };
        let spinner = Spinner::new(0.0, 2000.0).with_samples(vec![reference]);

        let ticks = generate(&spinner, 5.0);
        let bonus = ticks.iter().find(|t| t.is_bonus()).unwrap();
        let sample = bonus.sample.as_ref().unwrap();

        assert_eq!(sample.name, SPINNER_BONUS_SAMPLE);
        assert_eq!(sample.bank.as_deref(), Some("soft"));
        assert_eq!(sample.volume, 70);
    }

    #[test]
    fn test_auxiliary_samples() {
        let spinner = Spinner::new(0.0, 1000.0);
        assert!(spinner.auxiliary_samples().is_empty());

        let spinner = spinner.with_samples(vec![HitSample::new("hitnormal")]);
        let samples = spinner.auxiliary_samples();

        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].name, SPINNER_SPIN_SAMPLE);
    }

    #[test]
    fn test_end_time() {
        let mut spinner = Spinner::new(500.0, 1000.0);
        assert_eq!(spinner.end_time(), 1500.0);

        spinner.set_end_time(3500.0);
        assert_eq!(spinner.duration, 3000.0);
        assert!(spinner.hit_window().is_empty());
    }

    #[test]
    fn test_cancelled_apply_defaults_keeps_previous_state() {
        let mut spinner = Spinner::new(0.0, 2000.0);
        let difficulty = BeatmapDifficulty::new(5.0);

        assert!(!spinner.apply_defaults(&difficulty, &NeverCancel).unwrap().is_cancelled());
        let published = spinner.ticks.clone();

        spinner.duration = 4000.0;
        let cancel = AtomicBool::new(true);
        let outcome = spinner.apply_defaults(&difficulty, &cancel).unwrap();

        assert!(outcome.is_cancelled());
        assert_eq!(spinner.ticks, published);
        assert_eq!(spinner.parameters, Some(SpinnerParameters::new(2000.0, 5.0)));
    }

    #[test]
    fn test_oversized_parameters_do_not_overflow() {
        let params = SpinnerParameters {
            spins_required: i32::MAX,
            raw_bonus_spins: i32::MAX - 2,
        };

        assert_eq!(params.total_spins(), 2 * i32::MAX as i64);
        assert_eq!(params.spins_required_for_bonus(), i32::MAX);

        let spinner = Spinner::new(0.0, 1000.0);
        let err = spinner.generate_nested(&params, &NeverCancel).unwrap_err();
        assert!(matches!(err, GenerationError::TooLong { .. }));
    }

    #[test]
    fn test_hit_results() {
        assert_eq!(TickKind::Basic.hit_result(true), Some(Hit::SpinnerSpin));
        assert_eq!(TickKind::Bonus.hit_result(true), Some(Hit::SpinnerBonus));
        assert_eq!(TickKind::Bonus.hit_result(false), None);
    }
}
