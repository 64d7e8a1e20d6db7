use rand::Rng;

use crate::WorldConfig;

/// Axis-aligned rectangle in play-area coordinates (`y` grows downwards).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

/// A vertically gapped pair of solid segments.
///
/// The top segment spans `[0, gap_top)` and the bottom one `[gap_bottom, play_height)`,
/// both sharing the same horizontal span `[x, x + width]`. Only `x` changes after spawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Obstacle {
    x: i32,
    width: i32,
    gap_top: i32,
    gap_height: i32,
}

impl Obstacle {
    #[must_use]
    pub const fn new(x: i32, width: i32, gap_top: i32, gap_height: i32) -> Self {
        Self {
            x,
            width,
            gap_top,
            gap_height,
        }
    }

    /// Spawns an obstacle at the right edge of the play area.
    ///
    /// `gap_top` is drawn uniformly from `0..=play_height - pipe_gap`, so the gap always fits.
    pub fn spawn<R>(rng: &mut R, config: &WorldConfig) -> Self
    where
        R: Rng + ?Sized,
    {
        let gap_top = rng.random_range(0..=config.max_gap_top());
        Self::new(
            config.play_width,
            config.pipe_width,
            gap_top,
            config.pipe_gap,
        )
    }

    /// Leading (left) edge.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    #[must_use]
    pub const fn width(&self) -> i32 {
        self.width
    }

    /// Trailing (right) edge.
    #[must_use]
    pub const fn right(&self) -> i32 {
        self.x + self.width
    }

    #[must_use]
    pub const fn gap_top(&self) -> i32 {
        self.gap_top
    }

    #[must_use]
    pub const fn gap_height(&self) -> i32 {
        self.gap_height
    }

    /// Top edge of the bottom segment.
    #[must_use]
    pub const fn gap_bottom(&self) -> i32 {
        self.gap_top + self.gap_height
    }

    /// Whether `[left, right]` intersects this obstacle's horizontal span.
    #[must_use]
    pub const fn spans(&self, left: i32, right: i32) -> bool {
        left <= self.right() && self.x <= right
    }

    #[must_use]
    pub const fn is_off_screen(&self) -> bool {
        self.right() <= 0
    }

    pub const fn advance(&mut self, dx: i32) {
        self.x -= dx;
    }

    #[must_use]
    pub const fn top_rect(&self) -> Rect {
        Rect {
            x: self.x,
            y: 0,
            width: self.width,
            height: self.gap_top,
        }
    }

    #[must_use]
    pub const fn bottom_rect(&self, play_height: i32) -> Rect {
        Rect {
            x: self.x,
            y: self.gap_bottom(),
            width: self.width,
            height: play_height - self.gap_bottom(),
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    #[test]
    fn test_spawned_gap_fits_play_height() {
        let config = WorldConfig::default();
        let mut rng = Pcg32::seed_from_u64(3);
        for _ in 0..1000 {
            let obstacle = Obstacle::spawn(&mut rng, &config);
            assert_eq!(obstacle.x(), config.play_width);
            assert!(obstacle.gap_top() >= 0);
            assert!(
                obstacle.gap_bottom() <= config.play_height,
                "gap {}..{} leaves the play area",
                obstacle.gap_top(),
                obstacle.gap_bottom()
            );
        }
    }

    #[test]
    fn test_gap_equal_to_play_height_has_no_segments() {
        let config = WorldConfig {
            pipe_gap: 600,
            ..WorldConfig::default()
        };
        let mut rng = Pcg32::seed_from_u64(0);
        let obstacle = Obstacle::spawn(&mut rng, &config);
        assert_eq!(obstacle.top_rect().height, 0);
        assert_eq!(obstacle.bottom_rect(config.play_height).height, 0);
    }

    #[test]
    fn test_segments_surround_gap() {
        let obstacle = Obstacle::new(100, 60, 200, 190);
        assert_eq!(
            obstacle.top_rect(),
            Rect {
                x: 100,
                y: 0,
                width: 60,
                height: 200
            }
        );
        assert_eq!(
            obstacle.bottom_rect(600),
            Rect {
                x: 100,
                y: 390,
                width: 60,
                height: 210
            }
        );
    }

    #[test]
    fn test_spans() {
        let obstacle = Obstacle::new(100, 60, 200, 190);
        assert!(obstacle.spans(90, 100));
        assert!(obstacle.spans(160, 170));
        assert!(obstacle.spans(120, 130));
        assert!(!obstacle.spans(70, 99));
        assert!(!obstacle.spans(161, 190));
    }
}
