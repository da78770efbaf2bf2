pub mod cancel;
pub mod circle;
pub mod hit_window;
pub mod spinner;

use cancel::CancelSignal;
use circle::Circle;
use rosu_map::{
    section::hit_objects::{
        hit_samples::{HitSampleDefaultName, HitSampleInfo, HitSampleInfoName, SampleBank},
        HitObject, HitObjectKind,
    },
    Beatmap,
};
use spinner::Spinner;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GenerationError {
    #[error("spinner at {start_time} has a non-positive duration `{duration}`")]
    InvalidDuration { start_time: f64, duration: f64 },
    #[error("spinner at {start_time} has no room for ticks (total spins: {total_spins})")]
    NoTicks { start_time: f64, total_spins: i64 },
    #[error("spinner at {start_time} is too long to count its spins (duration: {duration})")]
    TooLong { start_time: f64, duration: f64 },
}

/// Result of a cancellable generation step.
///
/// Cancellation is not a failure, callers are expected to
/// discard or retry the object without any side effects.
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub enum GenerationOutcome<T> {
    Completed(T),
    Cancelled,
}

impl<T> GenerationOutcome<T> {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    pub fn completed(self) -> Option<T> {
        match self {
            Self::Completed(value) => Some(value),
            Self::Cancelled => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> GenerationOutcome<U> {
        match self {
            Self::Completed(value) => GenerationOutcome::Completed(f(value)),
            Self::Cancelled => GenerationOutcome::Cancelled,
        }
    }
}

/// Beatmap-wide values that nested objects are derived from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BeatmapDifficulty {
    /// Expected to be within `0..=10`
    pub overall_difficulty: f64,
}

impl BeatmapDifficulty {
    pub fn new(overall_difficulty: f64) -> Self {
        Self { overall_difficulty }
    }
}

impl From<&Beatmap> for BeatmapDifficulty {
    fn from(beatmap: &Beatmap) -> Self {
        Self::new((beatmap.overall_difficulty as f64).clamp(0.0, 10.0))
    }
}

/// Named audio cue attached to an object
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HitSample {
    pub name: String,
    pub bank: Option<String>,
    pub volume: u8,
}

impl HitSample {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bank: None,
            volume: 100,
        }
    }

    /// Same bank and volume under another name
    pub fn with_name(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bank: self.bank.clone(),
            volume: self.volume,
        }
    }
}

impl From<&HitSampleInfo> for HitSample {
    fn from(info: &HitSampleInfo) -> Self {
        let name = match &info.name {
            HitSampleInfoName::Default(HitSampleDefaultName::Normal) => "hitnormal".to_owned(),
            HitSampleInfoName::Default(HitSampleDefaultName::Whistle) => "hitwhistle".to_owned(),
            HitSampleInfoName::Default(HitSampleDefaultName::Finish) => "hitfinish".to_owned(),
            HitSampleInfoName::Default(HitSampleDefaultName::Clap) => "hitclap".to_owned(),
            HitSampleInfoName::File(filename) => filename.clone(),
        };

        let bank = match info.bank {
            SampleBank::None => None,
            SampleBank::Normal => Some("normal".to_owned()),
            SampleBank::Soft => Some("soft".to_owned()),
            SampleBank::Drum => Some("drum".to_owned()),
        };

        Self {
            name,
            bank,
            volume: info.volume.clamp(0, 100) as u8,
        }
    }
}

/// Capability of a hit object to derive difficulty dependent values
/// and the nested scoring objects built from them.
///
/// Both steps are pure, the same inputs always yield the same output.
pub trait NestedObjects {
    type Parameters;
    type Nested;

    fn derive_parameters(
        &self,
        difficulty: &BeatmapDifficulty,
    ) -> Result<Self::Parameters, GenerationError>;

    fn generate_nested<C: CancelSignal + ?Sized>(
        &self,
        params: &Self::Parameters,
        cancel: &C,
    ) -> Result<GenerationOutcome<Vec<Self::Nested>>, GenerationError>;
}

pub struct Object {
    pub start_time: f64,
    pub kind: ObjectKind,
}

pub enum ObjectKind {
    Circle(Circle),
    Spinner(Spinner),
}

impl Object {
    pub fn from_rosu(beatmap: &Beatmap) -> Vec<Object> {
        beatmap.hit_objects.iter().filter_map(Self::from_rosu_object).collect()
    }

    fn from_rosu_object(value: &HitObject) -> Option<Self> {
        match &value.kind {
            HitObjectKind::Circle(circle) => Some(Self {
                start_time: value.start_time,
                kind: ObjectKind::Circle(Circle::new(value.start_time, circle.pos)),
            }),
            HitObjectKind::Spinner(spinner) => Some(Self {
                start_time: value.start_time,
                kind: ObjectKind::Spinner(
                    Spinner::new(value.start_time, spinner.duration)
                        .with_samples(value.samples.iter().map(HitSample::from).collect()),
                ),
            }),
            _ => None,
        }
    }

    #[inline]
    pub fn end_time(&self) -> f64 {
        match &self.kind {
            ObjectKind::Circle(_) => self.start_time,
            ObjectKind::Spinner(spinner) => spinner.end_time(),
        }
    }

    pub fn apply_defaults<C: CancelSignal + ?Sized>(
        &mut self,
        difficulty: &BeatmapDifficulty,
        cancel: &C,
    ) -> Result<GenerationOutcome<()>, GenerationError> {
        match &mut self.kind {
            ObjectKind::Circle(circle) => {
                circle.apply_defaults(difficulty)?;
                Ok(GenerationOutcome::Completed(()))
            }
            ObjectKind::Spinner(spinner) => spinner.apply_defaults(difficulty, cancel),
        }
    }
}

/// Derives every object of a beatmap, stops on the first failure
/// or as soon as cancellation is requested.
pub fn apply_defaults<C: CancelSignal + ?Sized>(
    objects: &mut [Object],
    difficulty: &BeatmapDifficulty,
    cancel: &C,
) -> Result<GenerationOutcome<()>, GenerationError> {
    for object in objects.iter_mut() {
        if object.apply_defaults(difficulty, cancel)?.is_cancelled() {
            tracing::debug!("Processing cancelled at object {}", object.start_time);
            return Ok(GenerationOutcome::Cancelled);
        }
    }

    Ok(GenerationOutcome::Completed(()))
}
