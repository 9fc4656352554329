//! Puzzle session - the state machine that owns one puzzle.
//!
//! ```text
//! Idle -> SettingUp -> Shuffling -> Ready <-> Resolving
//!                                     \
//!                                      -> Complete
//! ```
//!
//! Every timed wait (spawn animation, shuffle settle, swap resolve, win
//! celebration) is a [`Scheduler`] task advanced by [`PuzzleSession::tick`].
//! Starting a new puzzle cancels all of them, so a late task from a previous
//! setup can never unlock input or touch the new tiles.
//!
//! # Examples
//!
//! ```
//! use tui_jigsaw_core::PuzzleSession;
//! use tui_jigsaw_core::types::{GridConfiguration, PuzzleMode, SessionPhase, SourceImage};
//!
//! let mut session = PuzzleSession::default();
//! let config = GridConfiguration::new(3, 3, Some(SourceImage::new(300, 300)), PuzzleMode::DragAndDrop);
//! assert!(session.start_puzzle(&config));
//! assert_eq!(session.phase(), SessionPhase::SettingUp);
//! assert!(session.is_input_locked());
//!
//! // Spawn (3 * 100 + 500) then shuffle settle (600).
//! session.tick(800);
//! session.tick(600);
//! assert_eq!(session.phase(), SessionPhase::Ready);
//! assert!(!session.is_solved());
//! ```

use tracing::{debug, info, warn};

use crate::arrangement::derangement;
use crate::config::SessionSettings;
use crate::layout::LayoutMetrics;
use crate::rng::SimpleRng;
use crate::schedule::Scheduler;
use crate::tile::{Tile, TileId, TilePool, TileVisual};
use crate::types::{
    spawn_duration_ms, win_celebration_ms, Coordinate, GridConfiguration, Rect, SessionPhase,
    SpriteRegion, Vec2, DRAG_DRAW_ORDER, DRAG_LIFT_SCALE, LIFT_MS, RETURN_MOVE_MS,
    SELECTED_DRAW_ORDER, SELECT_PUNCH_MS, SELECT_PUNCH_SCALE, SHUFFLE_SETTLE_MS,
    SPAWN_ROW_DELAY_MS, SWAP_RESOLVE_MS, WIN_PUNCH_MS, WIN_PUNCH_SCALE,
};

/// Duration of each tile's spawn scale-in.
const SPAWN_SCALE_MS: u32 = 400;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionTask {
    SpawnFinished,
    ShuffleSettled,
    SwapResolved { a: TileId, b: TileId },
    CelebrationFinished,
}

/// Notifications produced by the session, drained with [`PuzzleSession::take_events`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PuzzleEvent {
    SetupStarted { episode: u32, tiles: usize },
    /// The shuffled arrangement settled; input is open.
    Shuffled,
    /// A swap settled; input is open again.
    Swapped { a: TileId, b: TileId },
    Solved,
    /// The win celebration finished.
    LevelCompleted,
}

#[derive(Debug, Clone)]
pub struct PuzzleSession {
    pool: TilePool,
    config: Option<GridConfiguration>,
    metrics: Option<LayoutMetrics>,
    board: Option<Rect>,
    phase: SessionPhase,
    input_locked: bool,
    episode: u32,
    revision: u64,
    scheduler: Scheduler<SessionTask>,
    rng: SimpleRng,
    snap_threshold: f32,
    events: Vec<PuzzleEvent>,
}

impl Default for PuzzleSession {
    fn default() -> Self {
        Self::new(SessionSettings::default())
    }
}

impl PuzzleSession {
    pub fn new(settings: SessionSettings) -> Self {
        Self {
            pool: TilePool::new(),
            config: None,
            metrics: None,
            board: None,
            phase: SessionPhase::Idle,
            input_locked: true,
            episode: 0,
            revision: 0,
            scheduler: Scheduler::new(),
            rng: SimpleRng::new(settings.seed),
            snap_threshold: settings.snap_threshold,
            events: Vec::new(),
        }
    }

    /// Set the world-space rectangle the grid is fitted into.
    ///
    /// Only the local-to-world mapping changes; coordinates and tile local
    /// positions are untouched.
    pub fn set_board_bounds(&mut self, board: Rect) {
        self.board = Some(board);
        if let Some(config) = self.config {
            self.metrics = LayoutMetrics::from_config(&config, self.board);
        }
        self.revision += 1;
    }

    pub fn board_bounds(&self) -> Option<Rect> {
        self.board
    }

    /// Build a fresh puzzle from `config`.
    ///
    /// A configuration without an image, without tiles, or with more tiles
    /// than the pool holds is ignored and the current puzzle keeps running.
    pub fn start_puzzle(&mut self, config: &GridConfiguration) -> bool {
        let Some(image) = config.image else {
            warn!("start ignored: level has no image");
            return false;
        };
        let count = config.tile_count();
        if count == 0 {
            warn!(rows = config.rows, columns = config.columns, "start ignored: no tiles");
            return false;
        }
        if count > self.pool.capacity() {
            warn!(
                tiles = count,
                capacity = self.pool.capacity(),
                "start ignored: grid exceeds tile pool"
            );
            return false;
        }

        let cancelled = self.scheduler.cancel_all();
        if cancelled > 0 {
            debug!(cancelled, "cancelled pending tasks from previous setup");
        }
        self.events.clear();
        self.episode = self.episode.wrapping_add(1);

        let metrics = LayoutMetrics::compute(
            &image,
            config.rows,
            config.columns,
            config.spacing,
            config.board_margin,
            self.board,
        );
        let piece_w = image.width / config.columns as u32;
        let piece_h = image.height / config.rows as u32;

        self.pool.reset(count);
        let episode = self.episode;
        for (slot, tile) in self.pool.active_mut().iter_mut().enumerate() {
            let correct = Coordinate::from_index(slot, config.columns);
            let region = SpriteRegion {
                x: correct.x as u32 * piece_w,
                y: correct.y as u32 * piece_h,
                width: piece_w,
                height: piece_h,
            };
            tile.initialize(TileId::new(slot, episode), correct, region, metrics.piece_size);
            let visual = tile.visual_mut();
            visual.set_local_position(metrics.local_position(correct), false);
            visual.tween_scale(0.0, 1.0, SPAWN_SCALE_MS, correct.y as u32 * SPAWN_ROW_DELAY_MS);
        }

        self.config = Some(*config);
        self.metrics = Some(metrics);
        self.input_locked = true;
        self.set_phase(SessionPhase::SettingUp);
        self.schedule(spawn_duration_ms(config.rows), SessionTask::SpawnFinished);
        self.events.push(PuzzleEvent::SetupStarted {
            episode,
            tiles: count,
        });
        self.revision += 1;

        info!(
            episode,
            rows = config.rows,
            columns = config.columns,
            mode = config.mode.as_str(),
            "puzzle started"
        );
        true
    }

    /// Advance animations and timed tasks. Returns true if anything changed.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        let mut changed = false;
        for tile in self.pool.active_mut() {
            changed |= tile.visual_mut().advance(elapsed_ms);
        }

        for task in self.scheduler.advance(elapsed_ms) {
            self.run_task(task);
            changed = true;
        }

        if changed {
            self.revision += 1;
        }
        changed
    }

    fn run_task(&mut self, task: SessionTask) {
        match task {
            SessionTask::SpawnFinished => self.shuffle(),
            SessionTask::ShuffleSettled => {
                self.input_locked = false;
                self.set_phase(SessionPhase::Ready);
                self.events.push(PuzzleEvent::Shuffled);
                self.check_win();
            }
            SessionTask::SwapResolved { a, b } => {
                self.input_locked = false;
                self.set_phase(SessionPhase::Ready);
                self.events.push(PuzzleEvent::Swapped { a, b });
                self.check_win();
            }
            SessionTask::CelebrationFinished => {
                info!(episode = self.episode, "level completed");
                self.events.push(PuzzleEvent::LevelCompleted);
            }
        }
    }

    fn shuffle(&mut self) {
        let Some(metrics) = self.metrics else {
            return;
        };
        self.input_locked = true;
        self.set_phase(SessionPhase::Shuffling);

        let correct: Vec<Coordinate> = self
            .pool
            .active()
            .iter()
            .map(Tile::correct_coordinate)
            .collect();
        let arrangement = derangement(&correct, &mut self.rng);

        for (tile, coord) in self.pool.active_mut().iter_mut().zip(arrangement) {
            tile.set_coordinate(coord);
            tile.visual_mut()
                .set_local_position(metrics.local_position(coord), true);
        }
        self.schedule(SHUFFLE_SETTLE_MS, SessionTask::ShuffleSettled);
    }

    /// Swap two tiles' grid coordinates.
    ///
    /// Only accepted in `Ready` with both ids live and distinct. Input stays
    /// locked for [`SWAP_RESOLVE_MS`] afterwards.
    pub fn request_swap(&mut self, a: TileId, b: TileId) -> bool {
        if self.phase != SessionPhase::Ready || self.input_locked {
            debug!(phase = self.phase.as_str(), "swap ignored: input locked");
            return false;
        }
        let Some(metrics) = self.metrics else {
            return false;
        };
        let Some((tile_a, tile_b)) = self.pool.get_pair_mut(a, b) else {
            warn!(?a, ?b, "swap ignored: stale or identical tiles");
            return false;
        };

        let coord_a = tile_a.current_coordinate();
        let coord_b = tile_b.current_coordinate();
        tile_a.set_coordinate(coord_b);
        tile_b.set_coordinate(coord_a);
        tile_a
            .visual_mut()
            .set_local_position(metrics.local_position(coord_b), true);
        tile_b
            .visual_mut()
            .set_local_position(metrics.local_position(coord_a), true);

        self.input_locked = true;
        self.set_phase(SessionPhase::Resolving);
        self.schedule(SWAP_RESOLVE_MS, SessionTask::SwapResolved { a, b });
        self.revision += 1;
        true
    }

    /// Every live tile sits on its correct coordinate. An empty session is never solved.
    pub fn is_solved(&self) -> bool {
        let tiles = self.pool.active();
        !tiles.is_empty() && tiles.iter().all(Tile::is_in_correct_position)
    }

    /// Evaluate the win condition, completing the puzzle when it holds.
    ///
    /// Completion only happens once play has begun (`Ready` or `Resolving`);
    /// `Solved` is emitted once per setup. Completing during `Resolving`
    /// cancels the pending resolve, so `Complete` is never left again.
    pub fn check_win(&mut self) -> bool {
        let solved = self.is_solved();
        if !solved || !matches!(self.phase, SessionPhase::Ready | SessionPhase::Resolving) {
            return solved;
        }

        let cancelled = self.scheduler.cancel_all();
        if cancelled > 0 {
            debug!(cancelled, "cancelled pending tasks on completion");
        }
        self.input_locked = true;
        self.set_phase(SessionPhase::Complete);
        self.events.push(PuzzleEvent::Solved);
        for tile in self.pool.active_mut() {
            let delay = tile.correct_coordinate().y as u32 * SPAWN_ROW_DELAY_MS;
            tile.visual_mut().punch(WIN_PUNCH_SCALE, WIN_PUNCH_MS, delay);
        }
        let rows = self.config.map(|c| c.rows).unwrap_or(0);
        self.schedule(win_celebration_ms(rows), SessionTask::CelebrationFinished);
        self.revision += 1;
        info!(episode = self.episode, "puzzle solved");
        true
    }

    /// Nearest tile strictly within the snap threshold of `world`.
    ///
    /// Distances use each tile's current visual position. Ties keep the
    /// lowest slot.
    pub fn find_nearest_tile(&self, world: Vec2, excluding: Option<TileId>) -> Option<TileId> {
        let metrics = self.metrics?;
        let mut best: Option<(TileId, f32)> = None;
        for tile in self.pool.active() {
            if !tile.is_active() || Some(tile.id()) == excluding {
                continue;
            }
            let distance = metrics
                .to_world(tile.visual().local_position())
                .distance(world);
            if distance < self.snap_threshold && best.map_or(true, |(_, d)| distance < d) {
                best = Some((tile.id(), distance));
            }
        }
        best.map(|(id, _)| id)
    }

    /// Topmost tile under `world`: highest draw order, then highest slot.
    pub fn tile_at(&self, world: Vec2) -> Option<TileId> {
        let local = self.metrics?.to_local(world);
        self.pool
            .active()
            .iter()
            .filter(|tile| tile.contains_point(local))
            .max_by_key(|tile| tile.visual().draw_order())
            .map(Tile::id)
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_input_locked(&self) -> bool {
        self.input_locked
    }

    pub fn tiles(&self) -> &[Tile] {
        self.pool.active()
    }

    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        self.pool.get(id)
    }

    pub fn tile_at_coordinate(&self, coord: Coordinate) -> Option<&Tile> {
        self.pool
            .active()
            .iter()
            .find(|tile| tile.current_coordinate() == coord)
    }

    pub fn metrics(&self) -> Option<&LayoutMetrics> {
        self.metrics.as_ref()
    }

    pub fn configuration(&self) -> Option<&GridConfiguration> {
        self.config.as_ref()
    }

    pub fn episode(&self) -> u32 {
        self.episode
    }

    /// Bumped on every visible change; used by renderers to skip static frames.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn snap_threshold(&self) -> f32 {
        self.snap_threshold
    }

    pub fn take_events(&mut self) -> Vec<PuzzleEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_animating(&self) -> bool {
        self.pool
            .active()
            .iter()
            .any(|tile| tile.visual().is_animating())
    }

    pub fn tile_local_position(&self, id: TileId) -> Option<Vec2> {
        self.pool.get(id).map(|tile| tile.visual().local_position())
    }

    pub fn tile_world_position(&self, id: TileId) -> Option<Vec2> {
        let metrics = self.metrics?;
        self.tile_local_position(id).map(|local| metrics.to_world(local))
    }

    /// Raise a tile for dragging: settle its motion, draw it on top and scale it up.
    pub fn lift_tile(&mut self, id: TileId) -> bool {
        self.with_visual(id, |visual| {
            visual.finish_animations();
            visual.set_draw_order(DRAG_DRAW_ORDER);
            visual.scale_to(DRAG_LIFT_SCALE, LIFT_MS);
        })
    }

    /// Move a lifted tile's visual to a world position. Coordinates are untouched.
    pub fn drag_tile_to(&mut self, id: TileId, world: Vec2) -> bool {
        let Some(metrics) = self.metrics else {
            return false;
        };
        self.with_visual(id, |visual| {
            visual.set_local_position(metrics.to_local(world), false);
        })
    }

    /// Undo [`lift_tile`](Self::lift_tile).
    pub fn drop_tile(&mut self, id: TileId) -> bool {
        self.with_visual(id, |visual| {
            visual.reset_draw_order();
            visual.scale_to(1.0, LIFT_MS);
        })
    }

    /// Glide a tile's visual back to `local`.
    pub fn send_tile_home(&mut self, id: TileId, local: Vec2) -> bool {
        self.with_visual(id, |visual| visual.move_to(local, RETURN_MOVE_MS))
    }

    /// Mark or unmark a tile as the click-mode selection.
    pub fn highlight_tile(&mut self, id: TileId, selected: bool) -> bool {
        self.with_visual(id, |visual| {
            if selected {
                visual.set_draw_order(SELECTED_DRAW_ORDER);
                visual.punch(SELECT_PUNCH_SCALE, SELECT_PUNCH_MS, 0);
            } else {
                visual.reset_draw_order();
            }
        })
    }

    fn with_visual(&mut self, id: TileId, f: impl FnOnce(&mut TileVisual)) -> bool {
        match self.pool.get_mut(id) {
            Some(tile) => {
                f(tile.visual_mut());
                self.revision += 1;
                true
            }
            None => false,
        }
    }

    fn set_phase(&mut self, phase: SessionPhase) {
        if self.phase != phase {
            debug!(from = self.phase.as_str(), to = phase.as_str(), "phase change");
            self.phase = phase;
        }
    }

    fn schedule(&mut self, delay_ms: u32, task: SessionTask) {
        if self.scheduler.schedule_after(delay_ms, task).is_none() {
            warn!(?task, "scheduler full, task dropped");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PuzzleMode, SourceImage, TICK_MS};

    fn config(rows: u8, columns: u8) -> GridConfiguration {
        GridConfiguration::new(
            rows,
            columns,
            Some(SourceImage::new(columns as u32 * 100, rows as u32 * 100)),
            PuzzleMode::DragAndDrop,
        )
    }

    fn ready_session(rows: u8, columns: u8) -> PuzzleSession {
        let mut session = PuzzleSession::new(SessionSettings {
            snap_threshold: 0.5,
            seed: 42,
        });
        assert!(session.start_puzzle(&config(rows, columns)));
        session.tick(spawn_duration_ms(rows));
        session.tick(SHUFFLE_SETTLE_MS);
        assert_eq!(session.phase(), SessionPhase::Ready);
        session
    }

    fn first_misplaced(session: &PuzzleSession) -> Option<(TileId, Coordinate)> {
        session
            .tiles()
            .iter()
            .find(|t| !t.is_in_correct_position())
            .map(|t| (t.id(), t.correct_coordinate()))
    }

    fn id_at(session: &PuzzleSession, x: u8, y: u8) -> TileId {
        session
            .tile_at_coordinate(Coordinate::new(x, y))
            .map(Tile::id)
            .unwrap()
    }

    #[test]
    fn test_start_initialises_tiles_in_order() {
        let mut session = PuzzleSession::default();
        assert!(session.start_puzzle(&config(2, 3)));
        assert_eq!(session.tiles().len(), 6);
        assert!(session.tiles().iter().all(Tile::is_in_correct_position));

        let tile = &session.tiles()[4];
        assert_eq!(tile.correct_coordinate(), Coordinate::new(1, 1));
        let sprite = tile.visual().sprite().unwrap();
        assert_eq!((sprite.x, sprite.y, sprite.width, sprite.height), (100, 100, 100, 100));
        assert_eq!(
            session.take_events(),
            vec![PuzzleEvent::SetupStarted { episode: 1, tiles: 6 }]
        );
    }

    #[test]
    fn test_invalid_start_keeps_current_puzzle() {
        let mut session = ready_session(2, 2);
        let mut missing = config(3, 3);
        missing.image = None;
        assert!(!session.start_puzzle(&missing));
        assert!(!session.start_puzzle(&config(0, 4)));
        assert!(!session.start_puzzle(&config(25, 20)));
        assert_eq!(session.phase(), SessionPhase::Ready);
        assert_eq!(session.tiles().len(), 4);
        assert_eq!(session.episode(), 1);
    }

    #[test]
    fn test_shuffle_leaves_no_tile_in_place() {
        let session = ready_session(3, 3);
        assert!(session.tiles().iter().all(|t| !t.is_in_correct_position()));
        assert!(!session.is_input_locked());
        assert!(!session.is_solved());
    }

    #[test]
    fn test_phases_follow_timing() {
        let mut session = PuzzleSession::default();
        session.start_puzzle(&config(3, 3));
        session.tick(spawn_duration_ms(3) - 1);
        assert_eq!(session.phase(), SessionPhase::SettingUp);
        session.tick(1);
        assert_eq!(session.phase(), SessionPhase::Shuffling);
        assert!(session.is_input_locked());
        session.tick(SHUFFLE_SETTLE_MS - 1);
        assert_eq!(session.phase(), SessionPhase::Shuffling);
        session.tick(1);
        assert_eq!(session.phase(), SessionPhase::Ready);
        assert!(session.take_events().contains(&PuzzleEvent::Shuffled));
    }

    #[test]
    fn test_swap_locks_then_unlocks() {
        let mut session = ready_session(3, 3);
        let a = id_at(&session, 0, 0);
        let b = id_at(&session, 2, 2);
        session.take_events();

        assert!(session.request_swap(a, b));
        assert_eq!(session.tile(a).unwrap().current_coordinate(), Coordinate::new(2, 2));
        assert_eq!(session.tile(b).unwrap().current_coordinate(), Coordinate::new(0, 0));
        assert!(session.is_input_locked());
        assert_eq!(session.phase(), SessionPhase::Resolving);

        session.tick(SWAP_RESOLVE_MS - 1);
        assert!(session.is_input_locked());
        session.tick(1);
        assert!(!session.is_input_locked());
        assert_eq!(session.take_events(), vec![PuzzleEvent::Swapped { a, b }]);
    }

    #[test]
    fn test_swap_while_locked_is_ignored() {
        let mut session = ready_session(3, 3);
        let a = id_at(&session, 0, 0);
        let b = id_at(&session, 1, 0);
        let c = id_at(&session, 2, 0);
        assert!(session.request_swap(a, b));
        assert!(!session.request_swap(a, c));
        assert_eq!(session.tile(a).unwrap().current_coordinate(), Coordinate::new(1, 0));
        assert_eq!(session.tile(c).unwrap().current_coordinate(), Coordinate::new(2, 0));
    }

    #[test]
    fn test_swap_rejects_stale_and_identical_ids() {
        let mut session = ready_session(2, 2);
        let a = id_at(&session, 0, 0);
        assert!(!session.request_swap(a, a));

        let stale = TileId::new(a.slot(), a.episode() + 7);
        let b = id_at(&session, 1, 0);
        assert!(!session.request_swap(stale, b));
        assert_eq!(session.phase(), SessionPhase::Ready);
    }

    #[test]
    fn test_find_nearest_tile() {
        let session = ready_session(3, 3);
        let a = id_at(&session, 1, 1);
        let pos = session.tile_world_position(a).unwrap();

        assert_eq!(session.find_nearest_tile(pos, None), Some(a));
        assert_eq!(session.find_nearest_tile(pos, Some(a)), None);
        assert_eq!(session.find_nearest_tile(Vec2::new(500.0, 500.0), None), None);
    }

    #[test]
    fn test_tile_at_prefers_raised_tile() {
        let mut session = ready_session(2, 2);
        let a = id_at(&session, 0, 0);
        let b = id_at(&session, 1, 0);
        assert_eq!(session.tile_at(session.tile_world_position(a).unwrap()), Some(a));

        // Drag b over a; the lifted tile is on top.
        let target = session.tile_world_position(a).unwrap();
        session.lift_tile(b);
        session.drag_tile_to(b, target);
        assert_eq!(session.tile_at(target), Some(b));
    }

    #[test]
    fn test_restart_mid_shuffle_cancels_old_tasks() {
        let mut session = PuzzleSession::default();
        session.start_puzzle(&config(3, 3));
        session.tick(spawn_duration_ms(3));
        assert_eq!(session.phase(), SessionPhase::Shuffling);

        assert!(session.start_puzzle(&config(3, 3)));
        assert_eq!(session.episode(), 2);
        // The old settle deadline passes without unlocking the new setup.
        session.tick(SHUFFLE_SETTLE_MS);
        assert_eq!(session.phase(), SessionPhase::SettingUp);
        assert!(session.is_input_locked());
        assert!(!session.take_events().contains(&PuzzleEvent::Shuffled));
    }

    #[test]
    fn test_solving_completes_level_after_celebration() {
        let mut session = ready_session(2, 2);
        session.take_events();

        while let Some((id, home)) = first_misplaced(&session) {
            let occupant = id_at(&session, home.x, home.y);
            assert!(session.request_swap(id, occupant));
            session.tick(SWAP_RESOLVE_MS);
        }

        assert!(session.is_solved());
        assert_eq!(session.phase(), SessionPhase::Complete);
        assert!(session.is_input_locked());
        let events = session.take_events();
        assert_eq!(events.iter().filter(|e| **e == PuzzleEvent::Solved).count(), 1);

        // A second check does not re-emit.
        assert!(session.check_win());
        assert!(session.take_events().is_empty());

        let mut elapsed = 0;
        while elapsed < win_celebration_ms(2) {
            session.tick(TICK_MS);
            elapsed += TICK_MS;
        }
        assert_eq!(session.take_events(), vec![PuzzleEvent::LevelCompleted]);
    }

    #[test]
    fn test_check_win_while_resolving_completes_once() {
        let mut session = ready_session(2, 2);
        session.take_events();

        while let Some((id, home)) = first_misplaced(&session) {
            let occupant = id_at(&session, home.x, home.y);
            assert!(session.request_swap(id, occupant));
            assert_eq!(session.phase(), SessionPhase::Resolving);
            if session.check_win() {
                break;
            }
            session.tick(SWAP_RESOLVE_MS);
        }
        assert_eq!(session.phase(), SessionPhase::Complete);

        let mut elapsed = 0;
        while elapsed < 10_000 {
            session.tick(TICK_MS);
            elapsed += TICK_MS;
            assert_eq!(session.phase(), SessionPhase::Complete);
            assert!(session.is_input_locked());
        }

        let events = session.take_events();
        let solved = events.iter().filter(|e| **e == PuzzleEvent::Solved).count();
        let done = events.iter().filter(|e| **e == PuzzleEvent::LevelCompleted).count();
        assert_eq!((solved, done), (1, 1));
    }

    #[test]
    fn test_check_win_before_play_does_not_complete() {
        let mut session = PuzzleSession::default();
        session.start_puzzle(&config(2, 2));
        assert!(session.check_win());
        assert_eq!(session.phase(), SessionPhase::SettingUp);
    }

    #[test]
    fn test_board_bounds_rescale_keeps_coordinates() {
        let mut session = ready_session(2, 2);
        let before: Vec<_> = session.tiles().iter().map(Tile::current_coordinate).collect();
        session.set_board_bounds(Rect::from_center_size(Vec2::new(50.0, 20.0), Vec2::new(40.0, 40.0)));
        let after: Vec<_> = session.tiles().iter().map(Tile::current_coordinate).collect();
        assert_eq!(before, after);
        assert_eq!(session.metrics().unwrap().board_center, Vec2::new(50.0, 20.0));
    }

    #[test]
    fn test_empty_session_is_not_solved() {
        let mut session = PuzzleSession::default();
        assert!(!session.is_solved());
        assert!(!session.check_win());
        assert_eq!(session.find_nearest_tile(Vec2::ZERO, None), None);
    }
}
