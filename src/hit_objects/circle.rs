use rosu_map::util::Pos;

use super::{
    cancel::CancelSignal, hit_window::HitWindow, BeatmapDifficulty, GenerationError,
    GenerationOutcome, NestedObjects,
};

pub struct Circle {
    pub start_time: f64,
    pub pos: Pos,

    pub hit_window: HitWindow,
}

impl Circle {
    pub fn new(start_time: f64, pos: Pos) -> Self {
        Self {
            start_time,
            pos,
            hit_window: HitWindow::empty(),
        }
    }

    pub fn apply_defaults(&mut self, difficulty: &BeatmapDifficulty) -> Result<(), GenerationError> {
        self.hit_window = self.derive_parameters(difficulty)?;
        Ok(())
    }
}

/// Circles have nothing nested, only hit windows depend on difficulty
impl NestedObjects for Circle {
    type Parameters = HitWindow;
    type Nested = ();

    fn derive_parameters(&self, difficulty: &BeatmapDifficulty) -> Result<HitWindow, GenerationError> {
        Ok(HitWindow::from_od(difficulty.overall_difficulty))
    }

    fn generate_nested<C: CancelSignal + ?Sized>(
        &self,
        _params: &HitWindow,
        _cancel: &C,
    ) -> Result<GenerationOutcome<Vec<()>>, GenerationError> {
        Ok(GenerationOutcome::Completed(Vec::new()))
    }
}
