//! Shared animation timeline.
//!
//! The timeline is owned by whoever mounts the skeleton and read by every
//! bone on each tick. It never schedules anything itself: the host passes
//! the current time in and reads back a value in `[0, 1]`.

use crate::animation::Animation;

/// Shape of one timeline cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    /// 0 to 1, then jump back to 0.
    Sawtooth,
    /// 0 to 1 over the first half of the cycle, back to 0 over the second.
    PingPong,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repeat {
    Forever,
    /// Run a single cycle, then hold the final value.
    Once,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeline {
    cycle_ms: u64,
    waveform: Waveform,
    repeat: Repeat,
    origin_ms: u64,
}

impl Timeline {
    pub fn new(cycle_ms: u64, waveform: Waveform, repeat: Repeat) -> Self {
        Self {
            cycle_ms,
            waveform,
            repeat,
            origin_ms: 0,
        }
    }

    /// Timeline for an animation of the given duration.
    ///
    /// Shimmer bands sweep once per `duration_ms`, forever. Pulses go out and
    /// back in legs of half the duration; they repeat while loading and run a
    /// single pass otherwise.
    pub fn for_animation(animation: Animation, duration_ms: u64, is_loading: bool) -> Self {
        match animation {
            Animation::Shiver(_) => Self::new(duration_ms, Waveform::Sawtooth, Repeat::Forever),
            Animation::Pulse | Animation::None => {
                let repeat = if is_loading {
                    Repeat::Forever
                } else {
                    Repeat::Once
                };
                // Two legs of duration / 2 each.
                Self::new(duration_ms / 2 * 2, Waveform::PingPong, repeat)
            }
        }
    }

    /// Start counting from `now_ms`.
    pub fn restart(&mut self, now_ms: u64) {
        self.origin_ms = now_ms;
    }

    /// Whether a single-pass timeline has reached its end.
    pub fn is_finished(&self, now_ms: u64) -> bool {
        self.repeat == Repeat::Once && now_ms.saturating_sub(self.origin_ms) >= self.cycle_ms
    }

    /// Timeline value at `now_ms`, in `[0, 1]`.
    pub fn value(&self, now_ms: u64) -> f32 {
        if self.cycle_ms == 0 {
            return 0.0;
        }
        if self.is_finished(now_ms) {
            return match self.waveform {
                Waveform::Sawtooth => 1.0,
                Waveform::PingPong => 0.0,
            };
        }

        let elapsed = now_ms.saturating_sub(self.origin_ms);
        let phase = (elapsed % self.cycle_ms) as f32 / self.cycle_ms as f32;
        match self.waveform {
            Waveform::Sawtooth => phase,
            Waveform::PingPong if phase < 0.5 => phase * 2.0,
            Waveform::PingPong => 2.0 - phase * 2.0,
        }
    }
}
