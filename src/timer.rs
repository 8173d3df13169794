/// Per-question countdown, driven by externally scheduled one-second ticks.
///
/// The core never sleeps: the host delivers a tick event once per second and
/// the timer is a plain state machine over those ticks, so tests can advance
/// time by calling [`QuestionTimer::tick`] directly.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TimerState {
    Stopped,
    Armed,
    Fired,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionTimer {
    budget: u32,
    remaining: u32,
    state: TimerState,
}

impl QuestionTimer {
    pub fn new(budget_seconds: u32) -> Self {
        Self {
            budget: budget_seconds,
            remaining: budget_seconds,
            state: TimerState::Stopped,
        }
    }

    /// Arm the countdown at the full per-question budget. Starting an already
    /// armed timer restarts it, so duplicate countdowns cannot accumulate.
    pub fn start(&mut self) {
        self.remaining = self.budget;
        self.state = TimerState::Armed;
    }

    /// Idempotent. Must be called before any mutation that invalidates the
    /// current countdown, so a late tick cannot fire against stale state.
    pub fn stop(&mut self) {
        self.state = TimerState::Stopped;
    }

    /// Advance one second. Returns `true` exactly once, when the countdown
    /// reaches zero; after that (or after `stop()`) ticks are no-ops until
    /// the timer is re-armed.
    pub fn tick(&mut self) -> bool {
        if self.state != TimerState::Armed {
            return false;
        }

        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.state = TimerState::Fired;
            return true;
        }
        false
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.remaining
    }

    pub fn is_running(&self) -> bool {
        self.state == TimerState::Armed
    }
}
