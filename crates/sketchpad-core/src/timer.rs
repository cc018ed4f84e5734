//! One-shot long-press timer tied to a gesture.
//!
//! The surface does not own a clock. Arming the timer produces a
//! [`TimerCommand::Schedule`] that the host turns into a real deferred
//! callback; disarming produces a [`TimerCommand::Cancel`]. Firings are
//! matched by id, so a callback that outlives its gesture is ignored.

use std::time::Duration;

// Use web_time for WASM compatibility
#[cfg(target_arch = "wasm32")]
pub use web_time::Instant;
#[cfg(not(target_arch = "wasm32"))]
pub use std::time::Instant;

/// Identifies one armed timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

impl TimerId {
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Instruction for the host's timer facility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerCommand {
    /// Call back into the surface with `id` after `delay`.
    Schedule { id: TimerId, delay: Duration },
    /// The timer with `id` is no longer wanted.
    Cancel(TimerId),
}

#[derive(Debug, Clone, Copy)]
struct PendingTimer {
    id: TimerId,
    deadline: Instant,
}

/// Bookkeeping for the single long-press timer of the surface.
#[derive(Debug, Clone)]
pub struct LongPressTimer {
    delay: Duration,
    next_id: u64,
    pending: Option<PendingTimer>,
}

impl LongPressTimer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            next_id: 1,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Arm a fresh timer. Any previous timer is replaced; its cancel command
    /// is returned first.
    pub fn arm(&mut self, now: Instant) -> Vec<TimerCommand> {
        let mut commands = Vec::with_capacity(2);
        commands.extend(self.disarm());

        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.pending = Some(PendingTimer {
            id,
            deadline: now + self.delay,
        });
        commands.push(TimerCommand::Schedule {
            id,
            delay: self.delay,
        });
        commands
    }

    /// Cancel the pending timer, if any.
    pub fn disarm(&mut self) -> Option<TimerCommand> {
        self.pending.take().map(|p| TimerCommand::Cancel(p.id))
    }

    /// Consume a host callback. Returns false for stale or unknown ids.
    pub fn fire(&mut self, id: TimerId) -> bool {
        match self.pending {
            Some(p) if p.id == id => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }

    /// Fire the pending timer if its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<TimerId> {
        match self.pending {
            Some(p) if now >= p.deadline => {
                self.pending = None;
                Some(p.id)
            }
            _ => None,
        }
    }

    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(1000);

    fn scheduled_id(commands: &[TimerCommand]) -> TimerId {
        match commands.last() {
            Some(TimerCommand::Schedule { id, .. }) => *id,
            other => panic!("expected schedule, got {other:?}"),
        }
    }

    #[test]
    fn test_arm_schedules_with_delay() {
        let mut timer = LongPressTimer::new(DELAY);
        let commands = timer.arm(Instant::now());
        assert_eq!(commands.len(), 1);
        assert!(matches!(commands[0], TimerCommand::Schedule { delay, .. } if delay == DELAY));
        assert!(timer.is_armed());
    }

    #[test]
    fn test_rearm_cancels_previous() {
        let mut timer = LongPressTimer::new(DELAY);
        let first = scheduled_id(&timer.arm(Instant::now()));
        let commands = timer.arm(Instant::now());
        assert_eq!(commands[0], TimerCommand::Cancel(first));
        assert_ne!(scheduled_id(&commands), first);
    }

    #[test]
    fn test_fire_matching_id() {
        let mut timer = LongPressTimer::new(DELAY);
        let id = scheduled_id(&timer.arm(Instant::now()));
        assert!(timer.fire(id));
        assert!(!timer.is_armed());
        // Second firing of the same id is stale.
        assert!(!timer.fire(id));
    }

    #[test]
    fn test_fire_after_disarm_is_stale() {
        let mut timer = LongPressTimer::new(DELAY);
        let id = scheduled_id(&timer.arm(Instant::now()));
        assert_eq!(timer.disarm(), Some(TimerCommand::Cancel(id)));
        assert!(!timer.fire(id));
        assert_eq!(timer.disarm(), None);
    }

    #[test]
    fn test_poll_respects_deadline() {
        let mut timer = LongPressTimer::new(DELAY);
        let start = Instant::now();
        let id = scheduled_id(&timer.arm(start));

        assert_eq!(timer.poll(start + Duration::from_millis(999)), None);
        assert_eq!(timer.poll(start + DELAY), Some(id));
        assert_eq!(timer.poll(start + DELAY * 2), None);
    }
}
