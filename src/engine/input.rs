/// One tick of player intent, each axis in `-1 … +1`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InputCmd {
    pub forward: f32, // + ahead
    pub strafe: f32,  // + right
    pub turn: f32,    // + left
}

impl InputCmd {
    /// Same command with every axis clamped to `[-1, 1]`.
    pub fn clamped(self) -> Self {
        Self {
            forward: self.forward.clamp(-1.0, 1.0),
            strafe: self.strafe.clamp(-1.0, 1.0),
            turn: self.turn.clamp(-1.0, 1.0),
        }
    }

    pub fn is_idle(&self) -> bool {
        self.forward == 0.0 && self.strafe == 0.0 && self.turn == 0.0
    }
}
