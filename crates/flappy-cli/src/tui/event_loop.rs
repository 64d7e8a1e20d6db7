use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CrosstermEvent};

#[derive(Debug, Clone, derive_more::IsVariant, derive_more::From)]
pub(super) enum TuiEvent {
    Tick,
    Render,
    Crossterm(CrosstermEvent),
}

/// Produces ticks and renders on their own deadlines, terminal events as they arrive.
///
/// Ticks take priority over renders, so a slow terminal drops frames rather than slowing
/// the simulation down.
#[derive(Debug)]
pub(super) struct EventLoop {
    pub(super) tick_interval: Duration,
    pub(super) frame_interval: Duration,
    next_tick: Instant,
    next_render: Instant,
}

impl Default for EventLoop {
    fn default() -> Self {
        let now = Instant::now();
        Self {
            tick_interval: Duration::from_secs_f64(1.0 / 60.0),
            frame_interval: Duration::from_secs_f64(1.0 / 30.0),
            next_tick: now,
            next_render: now,
        }
    }
}

impl EventLoop {
    /// Blocks until the next event is due.
    pub(super) fn next(&mut self) -> anyhow::Result<TuiEvent> {
        loop {
            let now = Instant::now();
            if now >= self.next_tick {
                // skip missed ticks instead of replaying them in a burst
                self.next_tick = (self.next_tick + self.tick_interval).max(now);
                return Ok(TuiEvent::Tick);
            }
            if now >= self.next_render {
                self.next_render = now + self.frame_interval;
                return Ok(TuiEvent::Render);
            }

            let timeout = self.next_tick.min(self.next_render) - now;
            if event::poll(timeout)? {
                return Ok(event::read()?.into());
            }
        }
    }
}
