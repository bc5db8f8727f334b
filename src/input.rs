use glam::Vec2;

/// Squared move-vector length below which the player counts as standing.
pub const MOVE_DEADZONE_SQ: f32 = 1e-4;

/// Per-tick boundary signals the drivers read.
///
/// The host fills this from whatever input layer it has (raw axes, a
/// network snapshot, a replay) and calls [`end_frame`](Self::end_frame)
/// after the rig ticked.
#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub struct RigInput {
    /// Strafe (x) / forward (y) intent
    pub move_vector: Vec2,
    /// Look delta accumulated since the last tick
    pub look_delta: Vec2,
    /// Fire was pressed this tick (edge)
    pub fire_triggered: bool,
    /// Fire is held down
    pub fire_held: bool,
    /// Aim-down-sights is held down
    pub aim_held: bool,
}

impl RigInput {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_moving(&self) -> bool {
        self.move_vector.length_squared() >= MOVE_DEADZONE_SQ
    }

    pub fn handle_look(&mut self, dx: f32, dy: f32) {
        self.look_delta += Vec2::new(dx, dy);
    }

    pub fn press_fire(&mut self) {
        if !self.fire_held {
            self.fire_triggered = true;
        }
        self.fire_held = true;
    }

    pub fn release_fire(&mut self) {
        self.fire_held = false;
    }

    /// Clears edges and deltas; held state carries over.
    pub fn end_frame(&mut self) {
        self.look_delta = Vec2::ZERO;
        self.fire_triggered = false;
    }
}
