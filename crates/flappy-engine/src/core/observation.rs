/// Normalized inputs a bird feeds to its policy.
///
/// Position terms are divided by the play height; the jump phase is a small fixed
/// signal while a jump is in progress and zero otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Observation {
    /// Own height, `y / play_height`.
    pub height: f32,
    /// `(y - gap_bottom) / play_height` for the nearest upcoming obstacle.
    pub vertical_distance: f32,
    /// `jump_signal` while jumping, else `0.0`.
    pub jump_phase: f32,
}

impl Observation {
    pub const LEN: usize = 3;

    #[must_use]
    pub const fn to_array(self) -> [f32; Self::LEN] {
        [self.height, self.vertical_distance, self.jump_phase]
    }
}
