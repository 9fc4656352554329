//! Input mode strategies.
//!
//! A strategy receives world-space pointer events and drives the
//! [`PuzzleSession`]: visual feedback through the session's presentation
//! helpers, rule changes only through [`PuzzleSession::request_swap`].
//! Every strategy is inert while the session is input-locked.

use tracing::debug;
use tui_jigsaw_core::{PuzzleSession, TileId};

use crate::types::{PointerEvent, PuzzleMode, Vec2};

pub trait InputStrategy: std::fmt::Debug {
    fn mode(&self) -> PuzzleMode;

    fn on_press(&mut self, session: &mut PuzzleSession, world: Vec2);

    fn on_move(&mut self, session: &mut PuzzleSession, world: Vec2);

    fn on_release(&mut self, session: &mut PuzzleSession, world: Vec2);

    /// Forget any drag or selection.
    fn reset(&mut self);

    /// Tile currently dragged or selected, if any.
    fn active_tile(&self) -> Option<TileId>;

    fn handle(&mut self, session: &mut PuzzleSession, event: PointerEvent) {
        match event {
            PointerEvent::Pressed(p) => self.on_press(session, p),
            PointerEvent::Moved(p) => self.on_move(session, p),
            PointerEvent::Released(p) => self.on_release(session, p),
        }
    }
}

pub fn strategy_for(mode: PuzzleMode) -> Box<dyn InputStrategy> {
    match mode {
        PuzzleMode::DragAndDrop => Box::new(DragAndDrop::default()),
        PuzzleMode::ClickAndSwap => Box::new(ClickAndSwap::default()),
    }
}

#[derive(Debug, Clone, Copy)]
struct Drag {
    tile: TileId,
    /// Local position the tile returns to if the drop finds no target.
    home: Vec2,
    /// Tile position minus pointer position, in world space.
    offset: Vec2,
}

/// Press to pick a tile up, move to carry it, release over another tile to swap.
#[derive(Debug, Default)]
pub struct DragAndDrop {
    drag: Option<Drag>,
}

impl InputStrategy for DragAndDrop {
    fn mode(&self) -> PuzzleMode {
        PuzzleMode::DragAndDrop
    }

    fn on_press(&mut self, session: &mut PuzzleSession, world: Vec2) {
        if session.is_input_locked() || self.drag.is_some() {
            return;
        }
        let Some(tile) = session.tile_at(world) else {
            return;
        };
        session.lift_tile(tile);
        let (Some(home), Some(tile_world)) =
            (session.tile_local_position(tile), session.tile_world_position(tile))
        else {
            return;
        };
        self.drag = Some(Drag {
            tile,
            home,
            offset: tile_world - world,
        });
        debug!(?tile, "drag started");
    }

    fn on_move(&mut self, session: &mut PuzzleSession, world: Vec2) {
        if let Some(drag) = self.drag {
            session.drag_tile_to(drag.tile, world + drag.offset);
        }
    }

    fn on_release(&mut self, session: &mut PuzzleSession, _world: Vec2) {
        let Some(drag) = self.drag.take() else {
            return;
        };
        session.drop_tile(drag.tile);

        let target = if session.is_input_locked() {
            None
        } else {
            session
                .tile_world_position(drag.tile)
                .and_then(|pos| session.find_nearest_tile(pos, Some(drag.tile)))
        };

        let swapped = target.is_some_and(|target| session.request_swap(drag.tile, target));
        if !swapped {
            session.send_tile_home(drag.tile, drag.home);
        }
        debug!(tile = ?drag.tile, swapped, "drag released");
    }

    fn reset(&mut self) {
        self.drag = None;
    }

    fn active_tile(&self) -> Option<TileId> {
        self.drag.map(|d| d.tile)
    }
}

/// Click one tile, then another, to swap them.
#[derive(Debug, Default)]
pub struct ClickAndSwap {
    selected: Option<TileId>,
}

impl InputStrategy for ClickAndSwap {
    fn mode(&self) -> PuzzleMode {
        PuzzleMode::ClickAndSwap
    }

    fn on_press(&mut self, session: &mut PuzzleSession, world: Vec2) {
        if session.is_input_locked() {
            return;
        }
        let Some(tile) = session.tile_at(world) else {
            return;
        };

        match self.selected.take() {
            None => {
                session.highlight_tile(tile, true);
                self.selected = Some(tile);
            }
            Some(selected) if selected == tile => {
                session.highlight_tile(tile, false);
            }
            Some(selected) => {
                session.highlight_tile(selected, false);
                let swapped = session.request_swap(selected, tile);
                debug!(?selected, ?tile, swapped, "click swap");
            }
        }
    }

    fn on_move(&mut self, _session: &mut PuzzleSession, _world: Vec2) {}

    fn on_release(&mut self, _session: &mut PuzzleSession, _world: Vec2) {}

    fn reset(&mut self) {
        self.selected = None;
    }

    fn active_tile(&self) -> Option<TileId> {
        self.selected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        spawn_duration_ms, Coordinate, GridConfiguration, SessionPhase, SourceImage,
        RETURN_MOVE_MS, SELECTED_DRAW_ORDER, SHUFFLE_SETTLE_MS, SWAP_RESOLVE_MS,
    };
    use tui_jigsaw_core::SessionSettings;

    fn ready_session(mode: PuzzleMode) -> PuzzleSession {
        let mut session = PuzzleSession::new(SessionSettings {
            snap_threshold: 0.5,
            seed: 9,
        });
        let config = GridConfiguration::new(3, 3, Some(SourceImage::new(300, 300)), mode);
        session.start_puzzle(&config);
        session.tick(spawn_duration_ms(3));
        session.tick(SHUFFLE_SETTLE_MS);
        assert_eq!(session.phase(), SessionPhase::Ready);
        session
    }

    fn at(session: &PuzzleSession, x: u8, y: u8) -> (TileId, Vec2) {
        let id = session
            .tile_at_coordinate(Coordinate::new(x, y))
            .map(|t| t.id())
            .unwrap();
        (id, session.tile_world_position(id).unwrap())
    }

    #[test]
    fn test_drag_onto_tile_swaps() {
        let mut session = ready_session(PuzzleMode::DragAndDrop);
        let mut input = DragAndDrop::default();
        let (a, a_pos) = at(&session, 0, 0);
        let (b, b_pos) = at(&session, 1, 0);

        // Grab slightly off-centre; the offset keeps the tile under the same spot.
        let grab = a_pos + Vec2::new(0.2, 0.1);
        input.handle(&mut session, PointerEvent::Pressed(grab));
        assert_eq!(input.active_tile(), Some(a));
        input.handle(&mut session, PointerEvent::Moved(b_pos + Vec2::new(0.2, 0.1)));
        let dragged = session.tile_world_position(a).unwrap();
        assert!(dragged.distance(b_pos) < 1e-4);

        input.handle(&mut session, PointerEvent::Released(b_pos));
        assert_eq!(input.active_tile(), None);
        assert_eq!(session.phase(), SessionPhase::Resolving);
        assert_eq!(session.tile(a).unwrap().current_coordinate(), Coordinate::new(1, 0));
        assert_eq!(session.tile(b).unwrap().current_coordinate(), Coordinate::new(0, 0));
    }

    #[test]
    fn test_drop_on_nothing_returns_home() {
        let mut session = ready_session(PuzzleMode::DragAndDrop);
        let mut input = DragAndDrop::default();
        let (a, a_pos) = at(&session, 2, 2);
        let home = session.tile_local_position(a).unwrap();

        input.handle(&mut session, PointerEvent::Pressed(a_pos));
        input.handle(&mut session, PointerEvent::Moved(Vec2::new(40.0, 40.0)));
        input.handle(&mut session, PointerEvent::Released(Vec2::new(40.0, 40.0)));

        assert_eq!(session.phase(), SessionPhase::Ready);
        session.tick(RETURN_MOVE_MS);
        assert_eq!(session.tile_local_position(a), Some(home));
        assert_eq!(session.tile(a).unwrap().current_coordinate(), Coordinate::new(2, 2));
    }

    #[test]
    fn test_press_while_locked_is_inert() {
        let mut session = ready_session(PuzzleMode::DragAndDrop);
        let (a, _) = at(&session, 0, 0);
        let (b, b_pos) = at(&session, 1, 1);
        assert!(session.request_swap(a, b));

        let mut input = DragAndDrop::default();
        input.handle(&mut session, PointerEvent::Pressed(b_pos));
        assert_eq!(input.active_tile(), None);

        session.tick(SWAP_RESOLVE_MS);
        input.handle(&mut session, PointerEvent::Pressed(b_pos));
        assert!(input.active_tile().is_some());
    }

    #[test]
    fn test_click_select_deselect_and_swap() {
        let mut session = ready_session(PuzzleMode::ClickAndSwap);
        let mut input = ClickAndSwap::default();
        let (a, a_pos) = at(&session, 0, 1);
        let (b, b_pos) = at(&session, 2, 1);

        input.handle(&mut session, PointerEvent::Pressed(a_pos));
        assert_eq!(input.active_tile(), Some(a));
        assert_eq!(session.tile(a).unwrap().visual().draw_order(), SELECTED_DRAW_ORDER);

        input.handle(&mut session, PointerEvent::Pressed(a_pos));
        assert_eq!(input.active_tile(), None);
        assert_eq!(session.tile(a).unwrap().visual().draw_order(), 0);

        input.handle(&mut session, PointerEvent::Pressed(a_pos));
        input.handle(&mut session, PointerEvent::Pressed(b_pos));
        assert_eq!(input.active_tile(), None);
        assert_eq!(session.tile(a).unwrap().visual().draw_order(), 0);
        assert_eq!(session.tile(a).unwrap().current_coordinate(), Coordinate::new(2, 1));
        assert_eq!(session.tile(b).unwrap().current_coordinate(), Coordinate::new(0, 1));
    }

    #[test]
    fn test_reset_clears_state() {
        let mut session = ready_session(PuzzleMode::ClickAndSwap);
        let mut input = strategy_for(PuzzleMode::ClickAndSwap);
        let (_, a_pos) = at(&session, 0, 0);
        input.handle(&mut session, PointerEvent::Pressed(a_pos));
        assert!(input.active_tile().is_some());
        input.reset();
        assert_eq!(input.active_tile(), None);
        assert_eq!(input.mode(), PuzzleMode::ClickAndSwap);
    }
}
