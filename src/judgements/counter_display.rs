use std::sync::mpsc::Receiver;

use crate::config::{CounterConfig, DisplayMode, FlowDirection};

use super::{Hit, JudgementTally};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillDirection {
    Horizontal,
    Vertical,
}

impl From<FlowDirection> for FillDirection {
    fn from(value: FlowDirection) -> Self {
        match value {
            FlowDirection::Horizontal => FillDirection::Horizontal,
            FlowDirection::Vertical => FillDirection::Vertical,
        }
    }
}

/// Settings changes and completed judgements, sent by whoever
/// owns the configuration and the scoring loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterEvent {
    Judged(Hit),
    SetDirection(FlowDirection),
    SetShowName(bool),
    SetShowMax(bool),
    SetMode(DisplayMode),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JudgementCounter {
    pub hit: Hit,
    pub count: u32,
    pub direction: FillDirection,
    pub show_name: bool,

    /// Visibility picked by the display mode
    visible: bool,
    is_max: bool,
}

impl JudgementCounter {
    pub fn name(&self) -> &'static str {
        self.hit.name()
    }

    pub fn is_max(&self) -> bool {
        self.is_max
    }

    fn show(&mut self) {
        self.visible = true;
    }

    fn hide(&mut self) {
        self.visible = false;
    }
}

pub struct JudgementCounterDisplay {
    config: CounterConfig,
    direction: FillDirection,
    counters: Vec<JudgementCounter>,
}

impl JudgementCounterDisplay {
    pub fn new(tally: &JudgementTally, config: CounterConfig) -> Self {
        let direction = FillDirection::from(config.flow_direction);

        let counters = tally
            .results()
            .iter()
            .enumerate()
            .map(|(i, result)| JudgementCounter {
                hit: result.hit,
                count: result.count,
                direction,
                show_name: config.show_name,
                visible: true,
                is_max: i == 0,
            })
            .collect();

        let mut display = Self {
            config,
            direction,
            counters,
        };

        display.update_counters();

        display
    }

    pub fn config(&self) -> &CounterConfig {
        &self.config
    }

    pub fn direction(&self) -> FillDirection {
        self.direction
    }

    pub fn counters(&self) -> &[JudgementCounter] {
        &self.counters
    }

    pub fn is_visible(&self, counter: &JudgementCounter) -> bool {
        counter.visible && (self.config.show_max || !counter.is_max)
    }

    /// Counters currently shown, in display order
    pub fn visible_counters(&self) -> impl Iterator<Item = &JudgementCounter> {
        self.counters.iter().filter(move |c| self.is_visible(c))
    }

    pub fn visible_hits(&self) -> Vec<Hit> {
        self.visible_counters().map(|c| c.hit).collect()
    }

    pub fn handle(&mut self, event: CounterEvent) {
        match event {
            CounterEvent::Judged(hit) => {
                if let Some(counter) = self.counters.iter_mut().find(|c| c.hit == hit) {
                    counter.count += 1;
                }
            }
            CounterEvent::SetDirection(flow) => {
                self.config.flow_direction = flow;
                self.direction = flow.into();

                for counter in self.counters.iter_mut() {
                    counter.direction = self.direction;
                }
            }
            CounterEvent::SetShowName(show_name) => {
                self.config.show_name = show_name;

                for counter in self.counters.iter_mut() {
                    counter.show_name = show_name;
                }
            }
            CounterEvent::SetShowMax(show_max) => {
                self.config.show_max = show_max;
            }
            CounterEvent::SetMode(mode) => {
                self.config.display_mode = mode;
                self.update_counters();
            }
        }
    }

    /// Applies every pending event without blocking
    pub fn drain(&mut self, rx: &Receiver<CounterEvent>) -> usize {
        let mut handled = 0;

        for event in rx.try_iter() {
            self.handle(event);
            handled += 1;
        }

        handled
    }

    fn update_counters(&mut self) {
        match self.config.display_mode {
            DisplayMode::Simple => {
                for counter in self.counters.iter_mut() {
                    if counter.hit.is_basic() {
                        counter.show()
                    } else {
                        counter.hide()
                    }
                }
            }
            DisplayMode::Normal => {
                for counter in self.counters.iter_mut() {
                    if counter.hit.is_bonus() {
                        counter.hide()
                    } else {
                        counter.show()
                    }
                }
            }
            DisplayMode::All => {
                for counter in self.counters.iter_mut().filter(|c| c.count == 0) {
                    counter.show()
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show_max_hides_first_counter_only() {
        let tally = JudgementTally::default();
        let config = CounterConfig {
            show_max: false,
            ..Default::default()
        };

        let display = JudgementCounterDisplay::new(&tally, config);

        assert_eq!(display.visible_hits(), vec![Hit::X100, Hit::X50, Hit::MISS, Hit::SpinnerSpin]);
    }

    #[test]
    fn test_direction_propagates_to_counters() {
        let mut display = JudgementCounterDisplay::new(&JudgementTally::default(), CounterConfig::default());
        assert_eq!(display.direction(), FillDirection::Horizontal);

        display.handle(CounterEvent::SetDirection(FlowDirection::Vertical));

        assert_eq!(display.direction(), FillDirection::Vertical);
        assert!(display.counters().iter().all(|c| c.direction == FillDirection::Vertical));
    }
}
