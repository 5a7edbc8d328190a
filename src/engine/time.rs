use std::time::Instant;

/// Longest frame the simulation will accept. Stalls (window drag, debugger)
/// otherwise produce a dt large enough to tunnel entities through colliders.
const MAX_DT: f32 = 0.1;

/// Supplies each frame's elapsed seconds to the systems.
pub struct FrameTimer {
    last: Instant,
    pub dt: f32,
}

impl FrameTimer {
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
            dt: 0.0,
        }
    }

    pub fn tick(&mut self) {
        let now = Instant::now();
        self.dt = now.duration_since(self.last).as_secs_f32().min(MAX_DT);
        self.last = now;
    }
}
