use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Geometry and kinematics of the play area.
///
/// Vertical coordinates grow downwards: `y = 0` is the top edge and `y = play_height` the
/// bottom edge. Horizontal coordinates are integral, vertical ones are `f32` so that
/// fractional fall rates integrate without drift.
///
/// Defaults reproduce the classic 800×600 course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub play_width: i32,
    pub play_height: i32,
    pub bird_radius: i32,
    /// Spawn column of every bird.
    pub bird_x: i32,
    /// Spawn height of every bird.
    pub bird_y: f32,
    pub pipe_width: i32,
    /// Height of the opening between the two obstacle segments.
    pub pipe_gap: i32,
    /// Ticks between two spawns, minus one (the countdown runs `pipe_frequency..=0`).
    pub pipe_frequency: u32,
    /// Horizontal distance an obstacle travels per tick.
    pub pipe_speed: i32,
    /// Downward displacement per tick outside of a jump.
    pub fall_rate: f32,
    /// Duration of the upward phase triggered by a jump, in ticks.
    pub jump_time: u32,
    /// Upward displacement per tick during a jump, as a multiple of `fall_rate`.
    pub jump_speed: f32,
    /// Value of the jump-phase observation while a jump is in progress.
    pub jump_signal: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            play_width: 800,
            play_height: 600,
            bird_radius: 13,
            bird_x: 50,
            bird_y: 300.0,
            pipe_width: 60,
            pipe_gap: 190,
            pipe_frequency: 450,
            pipe_speed: 1,
            fall_rate: 1.0,
            jump_time: 50,
            jump_speed: 2.0,
            jump_signal: 0.1,
        }
    }
}

impl WorldConfig {
    /// Checks every constraint the simulation relies on.
    ///
    /// In particular two obstacles never overlap horizontally: the closest two spawns ever
    /// get, [`Self::min_spawn_spacing`], must exceed `pipe_width`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("play width", self.play_width),
            ("play height", self.play_height),
            ("bird radius", self.bird_radius),
            ("pipe width", self.pipe_width),
            ("pipe speed", self.pipe_speed),
        ] {
            if value <= 0 {
                return Err(ConfigError::NonPositiveDimension {
                    name,
                    value: value.into(),
                });
            }
        }
        for (name, value) in [
            ("fall rate", self.fall_rate),
            ("jump speed", self.jump_speed),
            ("jump signal", self.jump_signal),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidRate { name, value });
            }
        }
        if self.pipe_gap <= 0 {
            return Err(ConfigError::NonPositiveGapHeight { gap: self.pipe_gap });
        }
        if self.pipe_gap > self.play_height {
            return Err(ConfigError::GapExceedsPlayHeight {
                gap: self.pipe_gap,
                play_height: self.play_height,
            });
        }
        let spacing = self.min_spawn_spacing();
        if spacing <= i64::from(self.pipe_width) {
            return Err(ConfigError::ObstacleSpacing {
                spacing,
                width: self.pipe_width,
            });
        }
        #[expect(clippy::cast_precision_loss)]
        let (radius, height) = (self.bird_radius as f32, self.play_height as f32);
        if !self.bird_y.is_finite() || self.bird_y - radius < 0.0 || self.bird_y + radius >= height
        {
            return Err(ConfigError::BirdOutOfBounds {
                y: self.bird_y,
                radius: self.bird_radius,
                play_height: self.play_height,
            });
        }
        Ok(())
    }

    /// Horizontal distance between the leading edges of two obstacles spawned by
    /// consecutive countdowns.
    #[must_use]
    pub fn spawn_spacing(&self) -> i64 {
        (i64::from(self.pipe_frequency) + 1) * i64::from(self.pipe_speed)
    }

    /// Distance between the obstacle force-spawned by a course reset and the next one.
    ///
    /// The reset obstacle does not move until the following tick, so it ends up one
    /// step closer to its successor than [`Self::spawn_spacing`].
    #[must_use]
    pub fn min_spawn_spacing(&self) -> i64 {
        i64::from(self.pipe_frequency) * i64::from(self.pipe_speed)
    }

    /// Largest `gap_top` an obstacle may be spawned with.
    #[must_use]
    pub fn max_gap_top(&self) -> i32 {
        self.play_height - self.pipe_gap
    }
}
