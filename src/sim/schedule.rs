//! Deferred tasks for UI pacing.
//!
//! A logical clock that only moves when the host calls `advance`. Each task
//! carries the run generation it was scheduled under; the game drops a task
//! whose token no longer matches when it comes due, so a late reset can
//! never clobber a phase or level the player has already moved past.

use std::time::Duration;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TaskKind {
    /// Empty the boxes and unplace every item after an uneven split.
    RetryReset,
    /// Start a fresh run after the last level.
    RunReset,
}

/// Run generation captured when a task was scheduled.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
pub struct Token(pub u64);

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct DueTask {
    pub kind: TaskKind,
    pub token: Token,
}

#[derive(Clone, Debug)]
struct ScheduledTask {
    due: Duration,
    seq: u64,
    task: DueTask,
}

#[derive(Clone, Debug, Default)]
pub struct Scheduler {
    now: Duration,
    next_seq: u64,
    tasks: Vec<ScheduledTask>,
}

impl Scheduler {
    pub fn new() -> Self {
        Scheduler { now: Duration::ZERO, next_seq: 0, tasks: vec![] }
    }

    pub fn schedule(&mut self, delay: Duration, kind: TaskKind, token: Token) {
        self.tasks.push(ScheduledTask {
            due: self.now + delay,
            seq: self.next_seq,
            task: DueTask { kind, token },
        });
        self.next_seq += 1;
    }

    pub fn is_pending(&self, kind: TaskKind) -> bool {
        self.tasks.iter().any(|t| t.task.kind == kind)
    }

    pub fn cancel(&mut self, kind: TaskKind) {
        self.tasks.retain(|t| t.task.kind != kind);
    }

    pub fn cancel_all(&mut self) {
        self.tasks.clear();
    }

    /// Move the clock forward and hand back every task that came due,
    /// ordered by due time, then by scheduling order.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<DueTask> {
        self.now += elapsed;
        let now = self.now;
        let (mut due, rest): (Vec<_>, Vec<_>) =
            self.tasks.drain(..).partition(|t| t.due <= now);
        self.tasks = rest;
        due.sort_by_key(|t| (t.due, t.seq));
        due.into_iter().map(|t| t.task).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn nothing_fires_early() {
        let mut s = Scheduler::new();
        s.schedule(ms(100), TaskKind::RetryReset, Token(1));
        assert!(s.advance(ms(99)).is_empty());
        assert!(s.is_pending(TaskKind::RetryReset));
        assert_eq!(
            s.advance(ms(1)),
            vec![DueTask { kind: TaskKind::RetryReset, token: Token(1) }],
        );
        assert!(!s.is_pending(TaskKind::RetryReset));
    }

    #[test]
    fn fires_in_due_order_then_schedule_order() {
        let mut s = Scheduler::new();
        s.schedule(ms(50), TaskKind::RunReset, Token(1));
        s.schedule(ms(10), TaskKind::RetryReset, Token(2));
        s.schedule(ms(50), TaskKind::RetryReset, Token(3));
        let fired: Vec<_> = s.advance(ms(60)).into_iter().map(|t| t.token).collect();
        assert_eq!(fired, vec![Token(2), Token(1), Token(3)]);
    }

    #[test]
    fn delay_is_relative_to_current_clock() {
        let mut s = Scheduler::new();
        s.advance(ms(1000));
        s.schedule(ms(100), TaskKind::RunReset, Token(0));
        assert!(s.advance(ms(50)).is_empty());
        assert_eq!(s.advance(ms(50)).len(), 1);
        assert_eq!(s.now, ms(1100));
    }

    #[test]
    fn cancel_by_kind() {
        let mut s = Scheduler::new();
        s.schedule(ms(1), TaskKind::RunReset, Token(0));
        s.schedule(ms(2), TaskKind::RetryReset, Token(0));
        s.cancel(TaskKind::RetryReset);
        assert_eq!(s.advance(ms(10)), vec![DueTask { kind: TaskKind::RunReset, token: Token(0) }]);
    }

    #[test]
    fn cancel_all_drops_everything() {
        let mut s = Scheduler::new();
        s.schedule(ms(1), TaskKind::RunReset, Token(0));
        s.schedule(ms(2), TaskKind::RetryReset, Token(0));
        s.cancel_all();
        assert!(!s.is_pending(TaskKind::RunReset));
        assert!(s.advance(ms(10)).is_empty());
    }
}
