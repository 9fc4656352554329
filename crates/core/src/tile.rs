//! Tiles, their presentation state, and the fixed-capacity tile pool.
//!
//! A [`Tile`] knows where it belongs (`correct`) and where it is (`current`).
//! Its [`TileVisual`] is the presentation handle: sprite region, local
//! position, draw order and emphasis scale, advanced by the session tick.

use crate::types::{Coordinate, Rect, SpriteRegion, Vec2, POOL_CAPACITY, TILE_MOVE_MS};

/// Handle to a tile in the current setup.
///
/// `episode` is the session's setup counter; a handle from an earlier setup
/// never resolves against the current tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileId {
    slot: u16,
    episode: u32,
}

impl TileId {
    pub fn new(slot: usize, episode: u32) -> Self {
        Self {
            slot: slot as u16,
            episode,
        }
    }

    pub fn slot(&self) -> usize {
        self.slot as usize
    }

    pub fn episode(&self) -> u32 {
        self.episode
    }
}

/// Cubic ease-out.
fn ease_out(t: f32) -> f32 {
    let inv = 1.0 - t.clamp(0.0, 1.0);
    1.0 - inv * inv * inv
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Motion {
    from: Vec2,
    to: Vec2,
    elapsed_ms: u32,
    duration_ms: u32,
}

impl Motion {
    fn progress(&self) -> f32 {
        if self.duration_ms == 0 {
            return 1.0;
        }
        self.elapsed_ms as f32 / self.duration_ms as f32
    }

    fn position(&self) -> Vec2 {
        self.from.lerp(self.to, ease_out(self.progress()))
    }

    fn finished(&self) -> bool {
        self.elapsed_ms >= self.duration_ms
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct ScaleTween {
    from: f32,
    to: f32,
    delay_ms: u32,
    elapsed_ms: u32,
    duration_ms: u32,
}

impl ScaleTween {
    fn value(&self) -> f32 {
        if self.elapsed_ms <= self.delay_ms {
            return self.from;
        }
        if self.duration_ms == 0 {
            return self.to;
        }
        let t = (self.elapsed_ms - self.delay_ms) as f32 / self.duration_ms as f32;
        self.from + (self.to - self.from) * ease_out(t)
    }

    fn finished(&self) -> bool {
        self.elapsed_ms >= self.delay_ms + self.duration_ms
    }
}

/// Temporary scale bump that returns to zero (selection and win feedback).
#[derive(Debug, Clone, Copy, PartialEq)]
struct Pulse {
    peak: f32,
    delay_ms: u32,
    elapsed_ms: u32,
    duration_ms: u32,
}

impl Pulse {
    fn value(&self) -> f32 {
        if self.elapsed_ms <= self.delay_ms || self.duration_ms == 0 {
            return 0.0;
        }
        let t = ((self.elapsed_ms - self.delay_ms) as f32 / self.duration_ms as f32).min(1.0);
        self.peak * (t * std::f32::consts::PI).sin()
    }

    fn finished(&self) -> bool {
        self.elapsed_ms >= self.delay_ms + self.duration_ms
    }
}

/// Presentation state of one tile, in the grid's local space.
#[derive(Debug, Clone, PartialEq)]
pub struct TileVisual {
    sprite: Option<SpriteRegion>,
    position: Vec2,
    motion: Option<Motion>,
    size: Vec2,
    draw_order: i32,
    default_draw_order: i32,
    scale: f32,
    scale_tween: Option<ScaleTween>,
    pulse: Option<Pulse>,
}

impl Default for TileVisual {
    fn default() -> Self {
        Self {
            sprite: None,
            position: Vec2::ZERO,
            motion: None,
            size: Vec2::ZERO,
            draw_order: 0,
            default_draw_order: 0,
            scale: 1.0,
            scale_tween: None,
            pulse: None,
        }
    }
}

impl TileVisual {
    pub fn sprite(&self) -> Option<SpriteRegion> {
        self.sprite
    }

    pub fn set_sprite(&mut self, region: Option<SpriteRegion>) {
        self.sprite = region;
    }

    pub fn set_size(&mut self, size: Vec2) {
        self.size = size;
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    /// Current (possibly mid-animation) local position.
    pub fn local_position(&self) -> Vec2 {
        self.position
    }

    /// Where the tile comes to rest once its motion finishes.
    pub fn target_position(&self) -> Vec2 {
        self.motion.map(|m| m.to).unwrap_or(self.position)
    }

    pub fn is_moving(&self) -> bool {
        self.motion.is_some()
    }

    /// Place the tile, either instantly or with a [`TILE_MOVE_MS`] glide.
    pub fn set_local_position(&mut self, pos: Vec2, animate: bool) {
        if animate {
            self.move_to(pos, TILE_MOVE_MS);
        } else {
            self.motion = None;
            self.position = pos;
        }
    }

    pub fn move_to(&mut self, pos: Vec2, duration_ms: u32) {
        self.motion = Some(Motion {
            from: self.position,
            to: pos,
            elapsed_ms: 0,
            duration_ms,
        });
    }

    /// Jump any in-flight motion and scale tween to its end state.
    pub fn finish_animations(&mut self) {
        if let Some(motion) = self.motion.take() {
            self.position = motion.to;
        }
        if let Some(tween) = self.scale_tween.take() {
            self.scale = tween.to;
        }
        self.pulse = None;
    }

    /// Stop everything where it is and return to rest scale.
    pub fn kill_animations(&mut self) {
        if let Some(motion) = self.motion.take() {
            self.position = motion.position();
        }
        self.scale_tween = None;
        self.pulse = None;
        self.scale = 1.0;
    }

    pub fn draw_order(&self) -> i32 {
        self.draw_order
    }

    pub fn set_draw_order(&mut self, order: i32) {
        self.draw_order = order;
    }

    pub fn reset_draw_order(&mut self) {
        self.draw_order = self.default_draw_order;
    }

    /// Tween the rest scale to `to`.
    pub fn tween_scale(&mut self, from: f32, to: f32, duration_ms: u32, delay_ms: u32) {
        self.scale = from;
        self.scale_tween = Some(ScaleTween {
            from,
            to,
            delay_ms,
            elapsed_ms: 0,
            duration_ms,
        });
    }

    pub fn scale_to(&mut self, to: f32, duration_ms: u32) {
        let from = self.emphasis();
        self.tween_scale(from, to, duration_ms, 0);
    }

    /// Brief scale bump peaking at `1 + peak`.
    pub fn punch(&mut self, peak: f32, duration_ms: u32, delay_ms: u32) {
        self.pulse = Some(Pulse {
            peak,
            delay_ms,
            elapsed_ms: 0,
            duration_ms,
        });
    }

    /// Effective scale including any tween and pulse.
    pub fn emphasis(&self) -> f32 {
        let base = self.scale_tween.map(|t| t.value()).unwrap_or(self.scale);
        base + self.pulse.map(|p| p.value()).unwrap_or(0.0)
    }

    pub fn is_animating(&self) -> bool {
        self.motion.is_some() || self.scale_tween.is_some() || self.pulse.is_some()
    }

    /// Local bounds at the current position and emphasis.
    pub fn bounds(&self) -> Rect {
        Rect::from_center_size(self.position, self.size * self.emphasis())
    }

    /// Hit test in local space.
    pub fn hit_test(&self, local_point: Vec2) -> bool {
        self.sprite.is_some() && self.bounds().contains(local_point)
    }

    /// Advance animations. Returns true if anything visible changed.
    pub fn advance(&mut self, elapsed_ms: u32) -> bool {
        let mut changed = false;

        if let Some(motion) = self.motion.as_mut() {
            motion.elapsed_ms = motion.elapsed_ms.saturating_add(elapsed_ms);
            self.position = motion.position();
            if motion.finished() {
                self.position = motion.to;
                self.motion = None;
            }
            changed = true;
        }

        if let Some(tween) = self.scale_tween.as_mut() {
            tween.elapsed_ms = tween.elapsed_ms.saturating_add(elapsed_ms);
            if tween.finished() {
                self.scale = tween.to;
                self.scale_tween = None;
            }
            changed = true;
        }

        if let Some(pulse) = self.pulse.as_mut() {
            pulse.elapsed_ms = pulse.elapsed_ms.saturating_add(elapsed_ms);
            if pulse.finished() {
                self.pulse = None;
            }
            changed = true;
        }

        changed
    }
}

/// One puzzle piece.
#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    id: TileId,
    correct: Coordinate,
    current: Coordinate,
    active: bool,
    visual: TileVisual,
}

impl Default for Tile {
    fn default() -> Self {
        Self {
            id: TileId::new(0, 0),
            correct: Coordinate::default(),
            current: Coordinate::default(),
            active: false,
            visual: TileVisual::default(),
        }
    }
}

impl Tile {
    /// Reinitialise a pooled tile for a new setup.
    ///
    /// The tile starts at its correct coordinate; `correct` is fixed from here
    /// until the next initialisation.
    pub fn initialize(&mut self, id: TileId, correct: Coordinate, sprite: SpriteRegion, size: Vec2) {
        self.id = id;
        self.correct = correct;
        self.current = correct;
        self.active = true;
        self.visual = TileVisual::default();
        self.visual.set_sprite(Some(sprite));
        self.visual.set_size(size);
    }

    /// Return the tile to the pool.
    pub fn deactivate(&mut self) {
        self.visual.kill_animations();
        self.visual.set_sprite(None);
        self.active = false;
    }

    pub fn id(&self) -> TileId {
        self.id
    }

    pub fn correct_coordinate(&self) -> Coordinate {
        self.correct
    }

    pub fn current_coordinate(&self) -> Coordinate {
        self.current
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Pure state change; moving the visual is the caller's business.
    pub fn set_coordinate(&mut self, coord: Coordinate) {
        self.current = coord;
    }

    pub fn is_in_correct_position(&self) -> bool {
        self.current == self.correct
    }

    /// Hit test against the visual bounds (point in local space).
    pub fn contains_point(&self, local_point: Vec2) -> bool {
        self.active && self.visual.hit_test(local_point)
    }

    pub fn visual(&self) -> &TileVisual {
        &self.visual
    }

    pub fn visual_mut(&mut self) -> &mut TileVisual {
        &mut self.visual
    }
}

/// Fixed-capacity arena of tiles, reused across setups.
///
/// Slots `[0, active_len)` are the live tiles; the rest stay inactive.
#[derive(Debug, Clone)]
pub struct TilePool {
    slots: Vec<Tile>,
    active: usize,
}

impl TilePool {
    pub fn new() -> Self {
        Self::with_capacity(POOL_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: vec![Tile::default(); capacity],
            active: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn active_len(&self) -> usize {
        self.active
    }

    /// Deactivate every live tile and reserve `count` slots for the next setup.
    ///
    /// Returns the number of reserved slots (capped at capacity). Reserved
    /// slots must be initialised by the caller.
    pub fn reset(&mut self, count: usize) -> usize {
        for tile in &mut self.slots[..self.active] {
            tile.deactivate();
        }
        self.active = count.min(self.slots.len());
        self.active
    }

    pub fn active(&self) -> &[Tile] {
        &self.slots[..self.active]
    }

    pub fn active_mut(&mut self) -> &mut [Tile] {
        &mut self.slots[..self.active]
    }

    /// Live tile for `id`, or `None` for stale or out-of-range handles.
    pub fn get(&self, id: TileId) -> Option<&Tile> {
        self.active()
            .get(id.slot())
            .filter(|tile| tile.is_active() && tile.id() == id)
    }

    pub fn get_mut(&mut self, id: TileId) -> Option<&mut Tile> {
        self.active_mut()
            .get_mut(id.slot())
            .filter(|tile| tile.is_active() && tile.id() == id)
    }

    /// Two distinct live tiles at once.
    pub fn get_pair_mut(&mut self, a: TileId, b: TileId) -> Option<(&mut Tile, &mut Tile)> {
        if a.slot() == b.slot() || self.get(a).is_none() || self.get(b).is_none() {
            return None;
        }
        let (lo, hi, swapped) = if a.slot() < b.slot() {
            (a.slot(), b.slot(), false)
        } else {
            (b.slot(), a.slot(), true)
        };
        let (left, right) = self.slots.split_at_mut(hi);
        let first = &mut left[lo];
        let second = &mut right[0];
        if swapped {
            Some((second, first))
        } else {
            Some((first, second))
        }
    }
}

impl Default for TilePool {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region() -> SpriteRegion {
        SpriteRegion {
            x: 0,
            y: 0,
            width: 100,
            height: 100,
        }
    }

    #[test]
    fn test_initialize_places_tile_correctly() {
        let mut tile = Tile::default();
        tile.initialize(TileId::new(3, 1), Coordinate::new(1, 2), region(), Vec2::splat(1.0));
        assert!(tile.is_active());
        assert!(tile.is_in_correct_position());

        tile.set_coordinate(Coordinate::new(0, 0));
        assert!(!tile.is_in_correct_position());
        assert_eq!(tile.correct_coordinate(), Coordinate::new(1, 2));
    }

    #[test]
    fn test_motion_reaches_target() {
        let mut visual = TileVisual::default();
        visual.set_local_position(Vec2::new(4.0, 0.0), true);
        assert!(visual.is_moving());
        assert_eq!(visual.target_position(), Vec2::new(4.0, 0.0));

        visual.advance(TILE_MOVE_MS / 2);
        let mid = visual.local_position();
        assert!(mid.x > 0.0 && mid.x < 4.0);

        visual.advance(TILE_MOVE_MS);
        assert!(!visual.is_moving());
        assert_eq!(visual.local_position(), Vec2::new(4.0, 0.0));
    }

    #[test]
    fn test_finish_and_kill_animations() {
        let mut visual = TileVisual::default();
        visual.set_local_position(Vec2::new(2.0, 2.0), true);
        visual.finish_animations();
        assert_eq!(visual.local_position(), Vec2::new(2.0, 2.0));

        visual.set_local_position(Vec2::ZERO, true);
        visual.advance(TILE_MOVE_MS / 3);
        let here = visual.local_position();
        visual.kill_animations();
        assert_eq!(visual.local_position(), here);
        assert!(!visual.is_animating());
    }

    #[test]
    fn test_punch_returns_to_rest() {
        let mut visual = TileVisual::default();
        visual.punch(0.2, 200, 0);
        visual.advance(100);
        assert!(visual.emphasis() > 1.0);
        visual.advance(100);
        assert_eq!(visual.emphasis(), 1.0);
    }

    #[test]
    fn test_hit_test_needs_sprite() {
        let mut visual = TileVisual::default();
        visual.set_size(Vec2::splat(2.0));
        assert!(!visual.hit_test(Vec2::ZERO));
        visual.set_sprite(Some(region()));
        assert!(visual.hit_test(Vec2::new(1.0, -1.0)));
        assert!(!visual.hit_test(Vec2::new(1.5, 0.0)));
    }

    #[test]
    fn test_pool_reset_deactivates_old_tiles() {
        let mut pool = TilePool::with_capacity(8);
        assert_eq!(pool.reset(6), 6);
        for (i, tile) in pool.active_mut().iter_mut().enumerate() {
            tile.initialize(TileId::new(i, 1), Coordinate::from_index(i, 3), region(), Vec2::splat(1.0));
        }

        assert_eq!(pool.reset(20), 8, "capped at capacity");
        assert!(pool.active().iter().all(|t| !t.is_active()));
    }

    #[test]
    fn test_pool_rejects_stale_ids() {
        let mut pool = TilePool::with_capacity(4);
        pool.reset(4);
        for (i, tile) in pool.active_mut().iter_mut().enumerate() {
            tile.initialize(TileId::new(i, 1), Coordinate::from_index(i, 2), region(), Vec2::splat(1.0));
        }
        assert!(pool.get(TileId::new(2, 1)).is_some());
        assert!(pool.get(TileId::new(2, 0)).is_none());
        assert!(pool.get(TileId::new(9, 1)).is_none());

        pool.reset(2);
        assert!(pool.get(TileId::new(3, 1)).is_none());
    }

    #[test]
    fn test_get_pair_mut_preserves_argument_order() {
        let mut pool = TilePool::with_capacity(4);
        pool.reset(4);
        for (i, tile) in pool.active_mut().iter_mut().enumerate() {
            tile.initialize(TileId::new(i, 1), Coordinate::from_index(i, 2), region(), Vec2::splat(1.0));
        }
        let a = TileId::new(3, 1);
        let b = TileId::new(0, 1);
        let (ta, tb) = pool.get_pair_mut(a, b).unwrap();
        assert_eq!(ta.id(), a);
        assert_eq!(tb.id(), b);
        assert!(pool.get_pair_mut(a, a).is_none());
    }
}
