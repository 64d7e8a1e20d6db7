use flappy_engine::{Bird, Collision, Course, Observation, WorldConfig};
use flappy_policy::{FeedForwardPolicy, Policy as _};

use crate::genome::Genome;

/// A bird flown by the policy built from its genome.
#[derive(Debug, Clone)]
pub struct Agent {
    bird: Bird,
    genome: Genome,
    policy: FeedForwardPolicy,
}

impl Agent {
    #[must_use]
    pub fn new(genome: Genome, config: &WorldConfig) -> Self {
        Self {
            bird: Bird::new(config),
            policy: FeedForwardPolicy::new(genome.params()),
            genome,
        }
    }

    #[must_use]
    pub fn bird(&self) -> &Bird {
        &self.bird
    }

    #[must_use]
    pub fn genome(&self) -> &Genome {
        &self.genome
    }

    #[must_use]
    pub fn policy(&self) -> &FeedForwardPolicy {
        &self.policy
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.bird.is_alive()
    }

    /// Fitness: ticks survived.
    #[must_use]
    pub fn lifetime_ticks(&self) -> u64 {
        self.bird.lifetime_ticks()
    }

    #[must_use]
    pub fn observe(&self, course: &Course) -> Observation {
        self.bird.observe(course.nearest_for(&self.bird), course.config())
    }

    /// Jumps if the policy output exceeds `confidence`. Returns whether it jumped.
    pub fn act(
        &mut self,
        observation: &Observation,
        confidence: f32,
        config: &WorldConfig,
    ) -> bool {
        let jump = self.policy.should_jump(observation, confidence);
        if jump {
            self.bird.jump(config);
        }
        jump
    }

    /// Runs one tick for this agent: decide (when `decide` is set), physics, collision.
    pub fn step(&mut self, course: &Course, decide: bool, confidence: f32) -> Collision {
        if !self.is_alive() {
            return Collision::default();
        }
        let config = course.config();
        if decide {
            let observation = self.observe(course);
            self.act(&observation, confidence, config);
        }
        self.bird.step_physics(config);
        course.collide(&mut self.bird)
    }
}

#[cfg(test)]
mod tests {
    use flappy_engine::Seed;
    use flappy_policy::PolicyParams;

    use super::*;

    /// Large positive weights on the height input: the output saturates at 1.
    fn always_jump() -> Genome {
        let mut params = PolicyParams::ZERO;
        params.w1[0] = [10.0; 5];
        params.w2 = [10.0; 5];
        params.into()
    }

    #[test]
    fn test_act_respects_confidence() {
        let config = WorldConfig::default();
        let observation = Observation {
            height: 0.5,
            vertical_distance: 0.0,
            jump_phase: 0.0,
        };

        let mut jumper = Agent::new(always_jump(), &config);
        assert!(jumper.act(&observation, 0.5, &config));
        assert!(jumper.bird().is_jumping());

        let mut idle = Agent::new(Genome::from(PolicyParams::ZERO), &config);
        assert!(!idle.act(&observation, 0.5, &config));
        assert!(!idle.bird().is_jumping());
    }

    #[test]
    fn test_step_skips_decision_off_cadence() {
        let config = WorldConfig::default();
        let mut course = Course::new(config.clone(), Seed::from_u128(0)).unwrap();
        course.reset();

        let mut agent = Agent::new(always_jump(), &config);
        agent.step(&course, false, 0.5);
        assert!(!agent.bird().is_jumping());
        assert_eq!(agent.bird().y(), config.bird_y + config.fall_rate);

        agent.step(&course, true, 0.5);
        assert_eq!(agent.bird().jump_timer(), config.jump_time - 1);
    }

    #[test]
    fn test_dead_agent_is_inert() {
        let config = WorldConfig {
            bird_y: 586.5,
            ..WorldConfig::default()
        };
        let mut course = Course::new(config.clone(), Seed::from_u128(0)).unwrap();
        course.reset();

        let mut agent = Agent::new(Genome::from(PolicyParams::ZERO), &config);
        assert!(agent.step(&course, true, 0.5).died);
        let lifetime = agent.lifetime_ticks();
        let position = agent.bird().position();
        assert_eq!(agent.step(&course, true, 0.5), Collision::default());
        assert_eq!(agent.lifetime_ticks(), lifetime);
        assert_eq!(agent.bird().position(), position);
    }
}
