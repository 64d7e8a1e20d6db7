use crate::{Obstacle, Observation, WorldConfig};

/// Kinematic state of a single flyer.
///
/// Motion carries no velocity between ticks. The direction of travel is decided purely by
/// the jump phase: while `jump_timer > 0` the bird rises by `fall_rate * jump_speed` per tick,
/// otherwise it falls by `fall_rate`. A jump is therefore a fixed-duration upward phase, not
/// an impulse.
///
/// Death is terminal. Once [`Self::check_collision`] reports a hit the bird stops moving and
/// `lifetime_ticks` keeps the number of physics steps it survived.
#[derive(Debug, Clone, PartialEq)]
pub struct Bird {
    x: i32,
    y: f32,
    jump_timer: u32,
    lifetime_ticks: u64,
    alive: bool,
}

impl Bird {
    /// Creates a bird at the configured spawn point.
    #[must_use]
    pub fn new(config: &WorldConfig) -> Self {
        Self::at(config.bird_x, config.bird_y)
    }

    #[must_use]
    pub const fn at(x: i32, y: f32) -> Self {
        Self {
            x,
            y,
            jump_timer: 0,
            lifetime_ticks: 0,
            alive: true,
        }
    }

    #[must_use]
    pub const fn position(&self) -> (i32, f32) {
        (self.x, self.y)
    }

    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    #[must_use]
    pub const fn y(&self) -> f32 {
        self.y
    }

    #[must_use]
    pub const fn jump_timer(&self) -> u32 {
        self.jump_timer
    }

    #[must_use]
    pub const fn is_jumping(&self) -> bool {
        self.jump_timer > 0
    }

    #[must_use]
    pub const fn is_alive(&self) -> bool {
        self.alive
    }

    /// Physics steps survived; frozen once the bird is dead.
    #[must_use]
    pub const fn lifetime_ticks(&self) -> u64 {
        self.lifetime_ticks
    }

    /// Horizontal extent `[x - radius, x + radius]`.
    #[must_use]
    pub const fn horizontal_span(&self, config: &WorldConfig) -> (i32, i32) {
        (self.x - config.bird_radius, self.x + config.bird_radius)
    }

    /// Rightmost point of the bird, `x + radius`. Obstacles collide with it only while their
    /// span contains this point.
    #[must_use]
    pub const fn front_edge(&self, config: &WorldConfig) -> i32 {
        self.x + config.bird_radius
    }

    /// Starts (or restarts) the upward phase.
    pub fn jump(&mut self, config: &WorldConfig) {
        if self.alive {
            self.jump_timer = config.jump_time;
        }
    }

    /// Applies an action supplied from outside the policy, e.g. a key press.
    pub fn receive_external_action(&mut self, trigger: bool, config: &WorldConfig) {
        if trigger {
            self.jump(config);
        }
    }

    /// Builds the policy inputs relative to `obstacle`, the nearest one ahead.
    ///
    /// With no obstacle ahead the distance term is zero.
    #[must_use]
    pub fn observe(&self, obstacle: Option<&Obstacle>, config: &WorldConfig) -> Observation {
        #[expect(clippy::cast_precision_loss)]
        let play_height = config.play_height as f32;
        #[expect(clippy::cast_precision_loss)]
        let vertical_distance =
            obstacle.map_or(0.0, |obstacle| self.y - obstacle.gap_bottom() as f32);
        Observation {
            height: self.y / play_height,
            vertical_distance: vertical_distance / play_height,
            jump_phase: if self.is_jumping() {
                config.jump_signal
            } else {
                0.0
            },
        }
    }

    /// Advances one tick of Euler integration. Dead birds do not move.
    pub fn step_physics(&mut self, config: &WorldConfig) {
        if !self.alive {
            return;
        }
        if self.jump_timer == 0 {
            self.y += config.fall_rate;
        } else {
            self.y -= config.fall_rate * config.jump_speed;
            self.jump_timer -= 1;
        }
        self.lifetime_ticks += 1;
    }

    /// Tests the bird against the play bounds and `obstacle`.
    ///
    /// The bird dies when its circle leaves the play height, or when the obstacle's span
    /// contains its front edge while any part of it is outside the gap. Returns `true` only on
    /// the call that kills the bird.
    pub fn check_collision(&mut self, obstacle: Option<&Obstacle>, config: &WorldConfig) -> bool {
        if !self.alive {
            return false;
        }
        if self.hits_bounds(config) || obstacle.is_some_and(|o| self.hits_obstacle(o, config)) {
            self.alive = false;
            return true;
        }
        false
    }

    #[must_use]
    pub fn hits_bounds(&self, config: &WorldConfig) -> bool {
        #[expect(clippy::cast_precision_loss)]
        let (radius, height) = (config.bird_radius as f32, config.play_height as f32);
        self.y + radius >= height || self.y - radius < 0.0
    }

    #[must_use]
    pub fn hits_obstacle(&self, obstacle: &Obstacle, config: &WorldConfig) -> bool {
        let front = self.front_edge(config);
        if !obstacle.spans(front, front) {
            return false;
        }
        #[expect(clippy::cast_precision_loss)]
        let (radius, top, bottom) = (
            config.bird_radius as f32,
            obstacle.gap_top() as f32,
            obstacle.gap_bottom() as f32,
        );
        self.y + radius > bottom || self.y - radius < top
    }
}
