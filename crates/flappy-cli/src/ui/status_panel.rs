use flappy_training::mode::ModeStatus;
use ratatui::{
    prelude::{Buffer, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};

#[derive(Debug)]
pub struct StatusPanel<'a> {
    status: &'a ModeStatus,
    speed: u32,
    paused: bool,
    block: Option<Block<'a>>,
}

impl<'a> StatusPanel<'a> {
    pub fn new(status: &'a ModeStatus) -> Self {
        Self {
            status,
            speed: 1,
            paused: false,
            block: None,
        }
    }

    pub fn speed(self, speed: u32) -> Self {
        Self { speed, ..self }
    }

    pub fn paused(self, paused: bool) -> Self {
        Self { paused, ..self }
    }

    pub fn block(self, block: Block<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    fn lines(&self) -> Vec<Line<'static>> {
        let row = |label: &'static str, value: String| {
            Line::from(vec![
                Span::styled(format!("{label:<11}"), Style::default().fg(Color::DarkGray)),
                Span::raw(value),
            ])
        };
        let mut lines = vec![row("Mode", self.status.kind.to_string())];
        if let Some(generation) = self.status.generation {
            lines.push(row("Generation", generation.to_string()));
        }
        lines.push(row("Score", self.status.score.to_string()));
        lines.push(row("Alive", self.status.alive_count.to_string()));
        lines.push(row("Speed", format!("x{}", self.speed)));
        if self.paused {
            lines.push(Line::styled("PAUSED", Style::default().fg(Color::Yellow)));
        } else if self.status.is_over {
            lines.push(Line::styled("GAME OVER", Style::default().fg(Color::Red)));
        }
        lines
    }
}

impl Widget for StatusPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut paragraph = Paragraph::new(self.lines());
        if let Some(block) = self.block {
            paragraph = paragraph.block(block);
        }
        paragraph.render(area, buf);
    }
}
