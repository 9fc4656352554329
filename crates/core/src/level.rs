//! Level sequencer: an ordered list of levels and the current index.

use tracing::{info, warn};

use crate::types::GridConfiguration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelEvent {
    Started(usize),
    Completed(usize),
}

#[derive(Debug, Clone, Default)]
pub struct LevelSequencer {
    levels: Vec<GridConfiguration>,
    current: usize,
    events: Vec<LevelEvent>,
}

impl LevelSequencer {
    pub fn new(levels: Vec<GridConfiguration>) -> Self {
        Self {
            levels,
            current: 0,
            events: Vec::new(),
        }
    }

    pub fn levels(&self) -> &[GridConfiguration] {
        &self.levels
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    pub fn level_index(&self) -> usize {
        self.current
    }

    /// Configuration of the level to play, emitting [`LevelEvent::Started`].
    ///
    /// An index past the end wraps back to the first level. Returns `None`
    /// only when there are no levels.
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_jigsaw_core::{LevelEvent, LevelSequencer};
    /// use tui_jigsaw_core::config::default_levels;
    ///
    /// let mut levels = LevelSequencer::new(default_levels());
    /// for _ in 0..levels.level_count() {
    ///     levels.advance_level();
    /// }
    /// assert!(levels.start_level().is_some());
    /// assert_eq!(levels.level_index(), 0);
    /// assert_eq!(levels.take_events(), vec![LevelEvent::Started(0)]);
    /// ```
    pub fn start_level(&mut self) -> Option<GridConfiguration> {
        if self.levels.is_empty() {
            warn!("no levels to start");
            return None;
        }
        self.current = self.upcoming_index();
        info!(level = self.current, of = self.levels.len(), "level started");
        self.events.push(LevelEvent::Started(self.current));
        Some(self.levels[self.current])
    }

    pub fn current_configuration(&self) -> Option<&GridConfiguration> {
        self.levels.get(self.current)
    }

    /// The level [`start_level`](Self::start_level) would return, without
    /// starting it.
    pub fn upcoming(&self) -> Option<&GridConfiguration> {
        self.levels.get(self.upcoming_index())
    }

    fn upcoming_index(&self) -> usize {
        if self.current >= self.levels.len() {
            0
        } else {
            self.current
        }
    }

    /// Jump to `index`. Out-of-range values wrap on the next `start_level`.
    pub fn set_level_index(&mut self, index: usize) {
        self.current = index;
    }

    /// Move to the next index. Wrapping happens on the next `start_level`.
    pub fn advance_level(&mut self) {
        self.current = self.current.saturating_add(1);
    }

    pub fn notify_completed(&mut self) {
        info!(level = self.current, "level completed");
        self.events.push(LevelEvent::Completed(self.current));
    }

    pub fn take_events(&mut self) -> Vec<LevelEvent> {
        std::mem::take(&mut self.events)
    }

    /// Events not yet drained.
    pub fn pending_events(&self) -> &[LevelEvent] {
        &self.events
    }
}
