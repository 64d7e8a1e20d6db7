use crossterm::event::{Event, KeyCode, KeyEventKind};
use flappy_training::mode::{GameMode, ModeKind, ModeStatus};
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    style::{Color, Style},
    text::{Line, Text},
    widgets::Block,
};

use crate::{
    tui::{App, Tui},
    ui::{CourseView, StatusPanel},
};

const TICK_RATE: f64 = 120.0;
const FRAME_RATE: f64 = 30.0;
const MAX_SPEED: u32 = 256;

/// Terminal front-end shared by every [`GameMode`].
///
/// One update runs `speed` simulation ticks. A pending flap is consumed by the first of them.
/// Speeding up is only offered when no human is flying.
#[derive(Debug)]
pub struct SimulationApp {
    mode: GameMode,
    status: ModeStatus,
    has_player: bool,
    speed: u32,
    paused: bool,
    flap: bool,
    is_exiting: bool,
}

impl SimulationApp {
    pub fn new(mode: GameMode) -> Self {
        let has_player = match &mode {
            GameMode::ManualPlay(_) => true,
            GameMode::Training(_) => false,
            GameMode::BestAgentReplay(session) => session.player().is_some(),
        };
        Self {
            status: mode.status(),
            mode,
            has_player,
            speed: 1,
            paused: false,
            flap: false,
            is_exiting: false,
        }
    }

    pub fn status(&self) -> &ModeStatus {
        &self.status
    }

    fn bird_color(&self, index: usize) -> Color {
        match (self.mode.kind(), index) {
            (ModeKind::BestAgentReplay, 0) => Color::Cyan,
            _ => Color::Yellow,
        }
    }

    fn help_text(&self) -> &'static str {
        if self.status.is_over {
            "Controls: q (Quit)"
        } else if self.paused {
            "Controls: p (Resume) | q (Quit)"
        } else if self.has_player {
            "Controls: Space (Flap) | p (Pause) | q (Quit)"
        } else {
            "Controls: + - (Speed) | p (Pause) | q (Quit)"
        }
    }
}

impl App for SimulationApp {
    fn init(&mut self, tui: &mut Tui) {
        tui.set_tick_rate(TICK_RATE);
        tui.set_frame_rate(FRAME_RATE);
    }

    fn should_exit(&self) -> bool {
        self.is_exiting
    }

    fn handle_event(&mut self, event: &Event) {
        let Some(key) = event.as_key_event() else {
            return;
        };
        if key.kind != KeyEventKind::Press {
            return;
        }
        let is_running = !self.paused && !self.status.is_over;
        match key.code {
            KeyCode::Char(' ') | KeyCode::Up if is_running && self.has_player => self.flap = true,
            KeyCode::Char('+' | '=') if !self.has_player => {
                self.speed = (self.speed * 2).min(MAX_SPEED);
            }
            KeyCode::Char('-') if !self.has_player => self.speed = (self.speed / 2).max(1),
            KeyCode::Char('p') if !self.status.is_over => self.paused = !self.paused,
            KeyCode::Char('q') | KeyCode::Esc => self.is_exiting = true,
            _ => {}
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let border_style = if self.status.is_over {
            Style::default().fg(Color::Red)
        } else if self.paused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };

        let course_view = self.mode.birds().into_iter().enumerate().fold(
            CourseView::new(self.mode.course()),
            |view, (index, bird)| view.bird(bird, self.bird_color(index)),
        );
        let course_view = course_view.block(Block::bordered().border_style(border_style));
        let status_panel = StatusPanel::new(&self.status)
            .speed(self.speed)
            .paused(self.paused)
            .block(
                Block::bordered()
                    .title(Line::from("STATS").centered())
                    .border_style(border_style),
            );
        let help_text = Text::from(self.help_text())
            .style(Style::default().fg(Color::DarkGray))
            .centered();

        let [main_area, help_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(frame.area());
        let [course_area, status_area] =
            Layout::horizontal([Constraint::Fill(1), Constraint::Length(24)]).areas(main_area);
        frame.render_widget(course_view, course_area);
        frame.render_widget(status_panel, status_area);
        frame.render_widget(help_text, help_area);
    }

    fn update(&mut self) {
        if self.paused || self.status.is_over {
            return;
        }
        for _ in 0..self.speed {
            self.status = self.mode.tick(self.flap);
            self.flap = false;
            if self.status.is_over {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyEvent, KeyModifiers};
    use flappy_engine::{Seed, WorldConfig};
    use flappy_training::{
        config::TrainingConfig, mode::ManualSession, population::PopulationManager,
    };

    use super::*;

    fn press(app: &mut SimulationApp, c: char) {
        app.handle_event(&Event::Key(KeyEvent::new(
            KeyCode::Char(c),
            KeyModifiers::NONE,
        )));
    }

    #[test]
    fn test_manual_play_flaps_on_space() {
        let session = ManualSession::new(WorldConfig::default(), Seed::from_u128(1)).unwrap();
        let mut app = SimulationApp::new(GameMode::ManualPlay(session));
        press(&mut app, ' ');
        press(&mut app, '+');
        app.update();
        assert_eq!(app.speed, 1);
        let GameMode::ManualPlay(session) = &app.mode else {
            unreachable!()
        };
        assert!(session.bird().is_jumping());
    }

    #[test]
    fn test_training_speed_and_pause() {
        let training = TrainingConfig {
            population_size: 4,
            ..TrainingConfig::default()
        };
        let manager =
            PopulationManager::new(WorldConfig::default(), training, Seed::from_u128(1)).unwrap();
        let mut app = SimulationApp::new(GameMode::Training(Box::new(manager)));
        press(&mut app, '+');
        press(&mut app, '+');
        assert_eq!(app.speed, 4);

        press(&mut app, 'p');
        let before = app.mode.course().obstacles().next().map(|o| o.x());
        app.update();
        assert_eq!(app.mode.course().obstacles().next().map(|o| o.x()), before);

        press(&mut app, 'p');
        app.update();
        assert_eq!(
            app.mode.course().obstacles().next().map(|o| o.x()),
            before.map(|x| x - 4)
        );

        press(&mut app, 'q');
        assert!(app.should_exit());
    }
}
