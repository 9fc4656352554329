//! Frame pacing for the terminal loop.
//!
//! While tiles animate every tick is drawn. Once the board is still, a frame
//! is drawn only when the session revision changes, plus a slow refresh so a
//! terminal that lost output recovers.

#[derive(Debug, Clone)]
pub struct RenderThrottle {
    idle_refresh_ms: u64,
    last: Option<(u64, u64)>,
}

impl RenderThrottle {
    pub fn new(idle_refresh_ms: u64) -> Self {
        Self {
            idle_refresh_ms,
            last: None,
        }
    }

    /// Decide whether to draw at `now_ms` for the given session `revision`.
    pub fn should_render(&mut self, now_ms: u64, revision: u64, animating: bool) -> bool {
        let render = match self.last {
            None => true,
            Some(_) if animating => true,
            Some((_, seen)) if seen != revision => true,
            Some((at, _)) => now_ms.saturating_sub(at) >= self.idle_refresh_ms,
        };
        if render {
            self.last = Some((now_ms, revision));
        }
        render
    }

    /// Forget the last frame so the next call draws (terminal resize).
    pub fn reset(&mut self) {
        self.last = None;
    }
}
