use std::{path::PathBuf, process::ExitCode};

use rosu::{
    config::Config,
    hit_objects::{self, cancel::NeverCancel, BeatmapDifficulty, Object, ObjectKind},
    judgements::{counter_display::JudgementCounterDisplay, JudgementTally},
    processor::SpinnerProcessor,
};
use rosu_map::Beatmap;

fn run(beatmap_path: PathBuf, config_path: Option<PathBuf>) -> Result<(), String> {
    let config = match config_path {
        Some(path) => Config::from_path(&path).map_err(|e| format!("{}: {e}", path.display()))?,
        None => Config::default(),
    };

    let beatmap = Beatmap::from_path(&beatmap_path)
        .map_err(|e| format!("{}: {e}", beatmap_path.display()))?;

    let difficulty = BeatmapDifficulty::from(&beatmap);
    let mut objects = Object::from_rosu(&beatmap);

    tracing::info!(
        "Loaded {} objects, od: {}",
        objects.len(),
        difficulty.overall_difficulty
    );

    if hit_objects::apply_defaults(&mut objects, &difficulty, &NeverCancel)
        .map_err(|e| e.to_string())?
        .is_cancelled()
    {
        return Err("processing was cancelled".to_owned());
    }

    let mut display = JudgementCounterDisplay::new(&JudgementTally::default(), config.counter);

    for object in &objects {
        let ObjectKind::Spinner(spinner) = &object.kind else {
            continue;
        };

        if let Some(params) = &spinner.parameters {
            tracing::info!(
                "Spinner {}..{}: required: {}, bonus: {}, ticks: {}",
                spinner.start_time,
                spinner.end_time(),
                params.spins_required,
                params.maximum_bonus_spins(),
                spinner.ticks.len()
            );
        }

        let mut processor = SpinnerProcessor::new(&spinner.ticks);
        let judged = processor.store_spins(spinner.ticks.len() as u32);

        for event in judged.iter().filter_map(|tick| tick.event()) {
            display.handle(event);
        }
    }

    for counter in display.visible_counters() {
        if counter.show_name {
            tracing::info!("{}: {}", counter.name(), counter.count);
        } else {
            tracing::info!("{}", counter.count);
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(false)
        .with_thread_names(true)
        .init();

    let mut args = std::env::args_os().skip(1);

    let Some(beatmap_path) = args.next().map(PathBuf::from) else {
        eprintln!("usage: rosu-spinner <beatmap.osu> [counter.ini]");
        return ExitCode::FAILURE;
    };
    let config_path = args.next().map(PathBuf::from);

    match run(beatmap_path, config_path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
