use std::collections::VecDeque;

use rand_pcg::Pcg32;

use crate::{Bird, ConfigError, Obstacle, Seed, WorldConfig};

/// Outcome of [`Course::collide`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Collision {
    /// The bird died during this check.
    pub died: bool,
    /// More than one obstacle was within reach of the bird.
    pub invariant_violation: bool,
}

/// The environment driver: shared obstacle state and score.
///
/// Obstacles are kept in spawn order, which is also left-to-right order since they all
/// move at the same speed.
///
/// # Spawning
///
/// A countdown starts at zero, so the first [`Self::tick`] spawns an obstacle. After each
/// spawn the countdown is reset to `pipe_frequency` and decremented once per tick.
///
/// # Scoring
///
/// Each obstacle that scrolls fully past the left edge is removed and adds one point.
/// The score belongs to the course, not to any bird.
#[derive(Debug, Clone)]
pub struct Course {
    config: WorldConfig,
    rng: Pcg32,
    obstacles: VecDeque<Obstacle>,
    spawn_countdown: u32,
    score: u32,
}

impl Course {
    /// Validates `config` and creates an empty course.
    pub fn new(config: WorldConfig, seed: Seed) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            rng: seed.rng(),
            obstacles: VecDeque::new(),
            spawn_countdown: 0,
            score: 0,
        })
    }

    /// Validates `config` and creates a course holding `obstacles` in left-to-right order.
    ///
    /// The spawn countdown starts as it does after [`Self::reset`], so the next obstacle is
    /// spawned `pipe_frequency + 1` ticks later.
    pub fn with_obstacles<I>(
        config: WorldConfig,
        seed: Seed,
        obstacles: I,
    ) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = Obstacle>,
    {
        let mut course = Self::new(config, seed)?;
        course.obstacles.extend(obstacles);
        course.spawn_countdown = course.config.pipe_frequency;
        Ok(course)
    }

    #[must_use]
    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn spawn_countdown(&self) -> u32 {
        self.spawn_countdown
    }

    pub fn obstacles(&self) -> impl Iterator<Item = &Obstacle> + '_ {
        self.obstacles.iter()
    }

    /// Advances the course by one tick and returns the number of obstacles removed.
    pub fn tick(&mut self) -> u32 {
        if self.spawn_countdown == 0 {
            self.spawn();
            self.spawn_countdown = self.config.pipe_frequency;
        } else {
            self.spawn_countdown -= 1;
        }

        for obstacle in &mut self.obstacles {
            obstacle.advance(self.config.pipe_speed);
        }

        let mut removed = 0;
        while self.obstacles.front().is_some_and(Obstacle::is_off_screen) {
            self.obstacles.pop_front();
            removed += 1;
        }
        self.score += removed;
        removed
    }

    /// Clears the course for a new round.
    ///
    /// One obstacle is spawned immediately so that birds always have a reference obstacle
    /// on the first tick of the round.
    pub fn reset(&mut self) {
        self.obstacles.clear();
        self.spawn();
        self.spawn_countdown = self.config.pipe_frequency;
        self.score = 0;
    }

    fn spawn(&mut self) {
        let obstacle = Obstacle::spawn(&mut self.rng, &self.config);
        if let Some(last) = self.obstacles.back()
            && last.right() >= obstacle.x()
        {
            tracing::warn!(
                last_right = last.right(),
                spawn_x = obstacle.x(),
                "spawned obstacle overlaps the previous one"
            );
        }
        tracing::trace!(gap_top = obstacle.gap_top(), "spawned obstacle");
        self.obstacles.push_back(obstacle);
    }

    /// First obstacle whose right edge has not yet passed `left`.
    #[must_use]
    pub fn nearest_upcoming(&self, left: i32) -> Option<&Obstacle> {
        self.obstacles.iter().find(|o| o.right() >= left)
    }

    /// Nearest obstacle ahead of `bird`, the one it observes.
    #[must_use]
    pub fn nearest_for(&self, bird: &Bird) -> Option<&Obstacle> {
        let (left, _) = bird.horizontal_span(&self.config);
        self.nearest_upcoming(left)
    }

    /// Every obstacle whose horizontal span intersects `[left, right]`.
    pub fn overlapping(&self, left: i32, right: i32) -> impl Iterator<Item = &Obstacle> + '_ {
        self.obstacles.iter().filter(move |o| o.spans(left, right))
    }

    /// Tests `bird` against the bounds and the obstacle within its reach.
    ///
    /// An obstacle is within reach while its span contains the bird's front edge
    /// (see [`Bird::front_edge`]). The spacing check in [`WorldConfig::validate`] guarantees
    /// that at most one obstacle is. If that ever fails, the violation is logged and
    /// reported, and the bird is tested against every obstacle within reach so that no hit
    /// goes unnoticed.
    pub fn collide(&self, bird: &mut Bird) -> Collision {
        let front = bird.front_edge(&self.config);
        let mut collision = Collision {
            died: bird.check_collision(self.overlapping(front, front).next(), &self.config),
            invariant_violation: false,
        };

        let overlapping = self.overlapping(front, front).count();
        if overlapping > 1 {
            tracing::warn!(
                overlapping,
                bird_x = bird.x(),
                "several obstacles within reach of a bird"
            );
            collision.invariant_violation = true;
            if !collision.died {
                collision.died = self
                    .overlapping(front, front)
                    .any(|o| bird.check_collision(Some(o), &self.config));
            }
        }
        collision
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course() -> Course {
        Course::new(WorldConfig::default(), Seed::from_u128(1)).unwrap()
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = WorldConfig {
            pipe_gap: 700,
            ..WorldConfig::default()
        };
        assert!(Course::new(config, Seed::from_u128(1)).is_err());
    }

    #[test]
    fn test_first_tick_spawns() {
        let mut course = course();
        assert_eq!(course.obstacles().count(), 0);
        course.tick();
        let obstacles = course.obstacles().collect::<Vec<_>>();
        assert_eq!(obstacles.len(), 1);
        assert_eq!(obstacles[0].x(), 799);
    }

    #[test]
    fn test_obstacle_removed_and_scored_at_tick_860() {
        let mut course = course();
        for tick in 1..860 {
            assert_eq!(course.tick(), 0, "nothing should be removed at tick {tick}");
        }
        assert_eq!(course.score(), 0);
        assert_eq!(course.tick(), 1);
        assert_eq!(course.score(), 1);
    }

    #[test]
    fn test_spawn_period() {
        let mut course = course();
        let config = course.config().clone();
        let period = config.pipe_frequency + 1;
        for _ in 0..period {
            course.tick();
        }
        assert_eq!(course.obstacles().count(), 1);
        course.tick();
        let xs = course.obstacles().map(Obstacle::x).collect::<Vec<_>>();
        assert_eq!(xs.len(), 2);
        assert_eq!(i64::from(xs[1] - xs[0]), config.spawn_spacing());
    }

    #[test]
    fn test_reset_force_spawns() {
        let mut course = course();
        for _ in 0..2000 {
            course.tick();
        }
        assert!(course.score() > 0);
        course.reset();
        assert_eq!(course.score(), 0);
        let obstacles = course.obstacles().collect::<Vec<_>>();
        assert_eq!(obstacles.len(), 1);
        assert_eq!(obstacles[0].x(), course.config().play_width);
        assert_eq!(course.spawn_countdown(), course.config().pipe_frequency);
    }

    #[test]
    fn test_spans_never_touch_after_reset() {
        // the tightest spacing validation accepts with this width
        let config = WorldConfig {
            pipe_frequency: 31,
            pipe_speed: 2,
            ..WorldConfig::default()
        };
        let mut course = Course::new(config, Seed::from_u128(5)).unwrap();
        for round in 0..3 {
            course.reset();
            for tick in 0..1000 {
                course.tick();
                let obstacles = course.obstacles().collect::<Vec<_>>();
                for pair in obstacles.windows(2) {
                    assert!(
                        pair[0].right() < pair[1].x(),
                        "round {round} tick {tick}: {:?} touches {:?}",
                        pair[0],
                        pair[1]
                    );
                }
                let mut bird = Bird::at(50, 300.0);
                assert!(!course.collide(&mut bird).invariant_violation);
            }
        }
    }

    #[test]
    fn test_with_obstacles_keeps_layout() {
        let config = WorldConfig::default();
        let layout = [Obstacle::new(800, 60, 150, 191)];
        let mut course =
            Course::with_obstacles(config.clone(), Seed::from_u128(1), layout.clone()).unwrap();
        assert!(course.obstacles().eq(layout.iter()));
        assert_eq!(course.spawn_countdown(), config.pipe_frequency);

        for _ in 0..config.pipe_frequency {
            course.tick();
        }
        assert_eq!(course.obstacles().count(), 1);
        course.tick();
        assert_eq!(course.obstacles().count(), 2);
    }

    #[test]
    fn test_same_seed_same_layout() {
        let mut a = course();
        let mut b = course();
        for _ in 0..3000 {
            a.tick();
            b.tick();
        }
        assert!(a.obstacles().eq(b.obstacles()));
    }

    #[test]
    fn test_nearest_upcoming_skips_passed_obstacles() {
        let mut course = course();
        course.obstacles = VecDeque::from([
            Obstacle::new(-40, 60, 100, 190),
            Obstacle::new(300, 60, 200, 190),
        ]);
        // bird at x = 50 with radius 13 has its left edge at 37; the first obstacle ends at 20
        let bird = Bird::at(50, 300.0);
        assert_eq!(course.nearest_for(&bird).map(Obstacle::x), Some(300));

        let bird = Bird::at(30, 300.0);
        assert_eq!(course.nearest_for(&bird).map(Obstacle::x), Some(-40));
    }

    #[test]
    fn test_collide_scans_all_overlapping_obstacles() {
        let mut course = course();
        // both obstacles contain the front edge at 63; the bird is inside the first gap only
        course.obstacles = VecDeque::from([
            Obstacle::new(30, 60, 250, 190),
            Obstacle::new(45, 60, 0, 100),
        ]);
        let mut bird = Bird::at(50, 300.0);
        let collision = course.collide(&mut bird);
        assert!(collision.invariant_violation);
        assert!(collision.died);
        assert!(!bird.is_alive());
    }

    #[test]
    fn test_collide_ignores_obstacle_behind_front_edge() {
        let mut course = course();
        // observed (right edge 55 is not past the left edge 37) but out of reach
        course.obstacles = VecDeque::from([
            Obstacle::new(-5, 60, 0, 100),
            Obstacle::new(300, 60, 0, 100),
        ]);
        let mut bird = Bird::at(50, 300.0);
        assert_eq!(course.nearest_for(&bird).map(Obstacle::x), Some(-5));
        assert_eq!(course.collide(&mut bird), Collision::default());
        assert!(bird.is_alive());
    }

    #[test]
    fn test_collide_reaches_past_observed_obstacle() {
        let config = WorldConfig {
            pipe_width: 30,
            ..WorldConfig::default()
        };
        // the observed obstacle [20, 50] is behind the front edge, the next one [60, 90] is not
        let course = Course::with_obstacles(
            config,
            Seed::from_u128(1),
            [Obstacle::new(20, 30, 250, 190), Obstacle::new(60, 30, 0, 100)],
        )
        .unwrap();
        let mut bird = Bird::at(50, 300.0);
        assert_eq!(course.nearest_for(&bird).map(Obstacle::x), Some(20));
        let collision = course.collide(&mut bird);
        assert!(collision.died);
        assert!(!collision.invariant_violation);
    }

    #[test]
    fn test_collide_inside_gap_survives() {
        let mut course = course();
        course.obstacles = VecDeque::from([Obstacle::new(30, 60, 250, 190)]);
        let mut bird = Bird::at(50, 300.0);
        assert_eq!(course.collide(&mut bird), Collision::default());
        assert!(bird.is_alive());
    }
}
