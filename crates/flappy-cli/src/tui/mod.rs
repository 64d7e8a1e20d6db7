//! Fixed-rate terminal runtime.
//!
//! Simulation ticks and redraws are paced independently: a [`Tui`] fires
//! [`App::update`] at the tick rate and [`App::draw`] at the frame rate, and forwards every
//! terminal event in between.

use std::time::Duration;

use crossterm::event::Event;
use ratatui::Frame;

use self::event_loop::{EventLoop, TuiEvent};

mod event_loop;

/// An application driven by [`Tui::run`].
pub trait App {
    /// Called once before the loop starts. Configure rates here.
    fn init(&mut self, tui: &mut Tui);

    fn should_exit(&self) -> bool;

    fn handle_event(&mut self, event: &Event);

    fn draw(&self, frame: &mut Frame);

    /// Advances the application by one tick.
    fn update(&mut self);
}

#[derive(Debug, Default)]
pub struct Tui {
    events: EventLoop,
}

impl Tui {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ticks per second.
    pub fn set_tick_rate(&mut self, rate: f64) {
        self.events.tick_interval = Duration::from_secs_f64(1.0 / rate);
    }

    /// Redraws per second.
    pub fn set_frame_rate(&mut self, rate: f64) {
        self.events.frame_interval = Duration::from_secs_f64(1.0 / rate);
    }

    /// Takes over the terminal until `app.should_exit()`, restoring it afterwards.
    pub fn run<A>(mut self, app: &mut A) -> anyhow::Result<()>
    where
        A: App,
    {
        app.init(&mut self);
        ratatui::run(|terminal| {
            while !app.should_exit() {
                match self.events.next()? {
                    TuiEvent::Tick => app.update(),
                    TuiEvent::Render => {
                        terminal.draw(|frame| app.draw(frame))?;
                    }
                    TuiEvent::Crossterm(event) => app.handle_event(&event),
                }
            }
            Ok(())
        })
    }
}
