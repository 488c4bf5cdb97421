//! Logical-time scheduler for the countdown, per-word and session timers.
//!
//! Arming a timer hands out a token carrying a fresh generation. Re-arming or
//! cancelling retires the old token, so a fire that belongs to a superseded
//! word or session is recognisably stale.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TimerKind {
    Countdown,
    Word,
    Session,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerToken {
    pub kind: TimerKind,
    pub generation: u64,
}

#[derive(Clone, Debug)]
struct Armed {
    token: TimerToken,
    interval_ms: u64,
    due_in_ms: u64,
}

#[derive(Clone, Debug, Default)]
pub struct Timers {
    generation: u64,
    armed: Vec<Armed>,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm a repeating timer, replacing any timer of the same kind.
    pub fn arm(&mut self, kind: TimerKind, interval_ms: u64) -> TimerToken {
        self.cancel(kind);
        self.generation += 1;
        let token = TimerToken {
            kind,
            generation: self.generation,
        };
        let interval_ms = interval_ms.max(1);
        self.armed.push(Armed {
            token,
            interval_ms,
            due_in_ms: interval_ms,
        });
        token
    }

    pub fn cancel(&mut self, kind: TimerKind) {
        self.armed.retain(|a| a.token.kind != kind);
    }

    pub fn cancel_all(&mut self) {
        self.armed.clear();
    }

    pub fn is_current(&self, token: TimerToken) -> bool {
        self.armed.iter().any(|a| a.token == token)
    }

    pub fn token(&self, kind: TimerKind) -> Option<TimerToken> {
        self.armed.iter().find(|a| a.token.kind == kind).map(|a| a.token)
    }

    pub fn is_idle(&self) -> bool {
        self.armed.is_empty()
    }

    /// Pop the earliest fire due within `budget_ms`, moving every timer
    /// forward by the wait. Returns the token and how long was waited.
    /// Ties go to the timer armed first.
    pub fn next_fire(&mut self, budget_ms: u64) -> Option<(TimerToken, u64)> {
        let (idx, wait) = self
            .armed
            .iter()
            .enumerate()
            .min_by_key(|(_, a)| a.due_in_ms)
            .map(|(i, a)| (i, a.due_in_ms))?;
        if wait > budget_ms {
            return None;
        }
        self.elapse(wait);
        let fired = &mut self.armed[idx];
        fired.due_in_ms = fired.interval_ms;
        Some((fired.token, wait))
    }

    /// Fire `token` now, as if its wait had just run out. Every timer moves
    /// forward by that wait and the fired one re-arms. Returns the wait, or
    /// `None` for a stale token.
    pub fn fire(&mut self, token: TimerToken) -> Option<u64> {
        let idx = self.armed.iter().position(|a| a.token == token)?;
        let wait = self.armed[idx].due_in_ms;
        self.elapse(wait);
        let fired = &mut self.armed[idx];
        fired.due_in_ms = fired.interval_ms;
        Some(wait)
    }

    /// Move every timer forward without firing.
    pub fn elapse(&mut self, ms: u64) {
        for armed in &mut self.armed {
            armed.due_in_ms = armed.due_in_ms.saturating_sub(ms);
        }
    }
}
