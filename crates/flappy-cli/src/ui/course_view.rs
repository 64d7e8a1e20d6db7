use flappy_engine::{Bird, Course, Rect as CourseRect};
use ratatui::{
    prelude::{Buffer, Rect},
    style::Color,
    symbols::Marker,
    widgets::{
        Block, Widget,
        canvas::{Canvas, Circle, Rectangle},
    },
};

/// Draws the play area: obstacles, then every bird on top.
///
/// The course measures `y` downwards from the top edge while the canvas measures it upwards,
/// so every vertical coordinate is flipped.
#[derive(Debug)]
pub struct CourseView<'a> {
    course: &'a Course,
    birds: Vec<(&'a Bird, Color)>,
    block: Option<Block<'a>>,
}

impl<'a> CourseView<'a> {
    pub fn new(course: &'a Course) -> Self {
        Self {
            course,
            birds: Vec::new(),
            block: None,
        }
    }

    pub fn bird(mut self, bird: &'a Bird, color: Color) -> Self {
        self.birds.push((bird, color));
        self
    }

    pub fn block(self, block: Block<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }
}

fn to_canvas(rect: CourseRect, play_height: i32, color: Color) -> Rectangle {
    Rectangle {
        x: f64::from(rect.x),
        y: f64::from(play_height - rect.y - rect.height),
        width: f64::from(rect.width),
        height: f64::from(rect.height),
        color,
    }
}

impl Widget for CourseView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let config = self.course.config();
        let (width, height) = (config.play_width, config.play_height);
        let radius = f64::from(config.bird_radius);

        let canvas = Canvas::default()
            .marker(Marker::Braille)
            .x_bounds([0.0, f64::from(width)])
            .y_bounds([0.0, f64::from(height)])
            .paint(|ctx| {
                for obstacle in self.course.obstacles() {
                    ctx.draw(&to_canvas(obstacle.top_rect(), height, Color::Green));
                    ctx.draw(&to_canvas(obstacle.bottom_rect(height), height, Color::Green));
                }
                ctx.layer();
                for &(bird, color) in &self.birds {
                    let color = if bird.is_alive() { color } else { Color::DarkGray };
                    ctx.draw(&Circle {
                        x: f64::from(bird.x()),
                        y: f64::from(height) - f64::from(bird.y()),
                        radius,
                        color,
                    });
                }
            });
        match self.block {
            Some(block) => canvas.block(block).render(area, buf),
            None => canvas.render(area, buf),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flips_vertical_axis() {
        let top = CourseRect {
            x: 100,
            y: 0,
            width: 60,
            height: 150,
        };
        let rect = to_canvas(top, 600, Color::Green);
        assert_eq!((rect.x, rect.y, rect.height), (100.0, 450.0, 150.0));

        let bottom = CourseRect {
            x: 100,
            y: 340,
            width: 60,
            height: 260,
        };
        let rect = to_canvas(bottom, 600, Color::Green);
        assert_eq!((rect.y, rect.height), (0.0, 260.0));
    }
}
