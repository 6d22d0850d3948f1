//! Delayed state transitions.
//!
//! Tasks are never cancelled. Each one is applied against whatever the
//! state looks like when it comes due, and the caller re-checks its guard
//! before mutating anything.

use serde::{Deserialize, Serialize};

/// A deferred mutation of the game state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TaskKind {
    /// Start `wave` if the run is still waiting for it.
    WaveAdvance { wave: u32 },
    /// Remove `effect` if no newer activation has happened since.
    EffectExpiry { effect: String, epoch: u64 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledTask {
    /// Simulation clock (ms) at which the task comes due.
    pub due_ms: f64,
    pub kind: TaskKind,
}

/// Pending tasks ordered by due time, ties in insertion order.
///
/// Serialized as the plain task list; decoding re-sorts it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<ScheduledTask>", into = "Vec<ScheduledTask>")]
pub struct Scheduler {
    tasks: Vec<ScheduledTask>,
}

impl From<Vec<ScheduledTask>> for Scheduler {
    fn from(tasks: Vec<ScheduledTask>) -> Self {
        let mut s = Self::new();
        for t in tasks {
            s.schedule(t.due_ms, t.kind);
        }
        s
    }
}

impl From<Scheduler> for Vec<ScheduledTask> {
    fn from(s: Scheduler) -> Self {
        s.tasks
    }
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, due_ms: f64, kind: TaskKind) {
        let idx = self.tasks.partition_point(|t| t.due_ms <= due_ms);
        self.tasks.insert(idx, ScheduledTask { due_ms, kind });
    }

    /// Remove and return every task due at or before `now_ms`.
    pub fn take_due(&mut self, now_ms: f64) -> Vec<TaskKind> {
        let n = self.tasks.partition_point(|t| t.due_ms <= now_ms);
        self.tasks.drain(..n).map(|t| t.kind).collect()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn clear(&mut self) {
        self.tasks.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expiry(effect: &str, epoch: u64) -> TaskKind {
        TaskKind::EffectExpiry {
            effect: effect.to_string(),
            epoch,
        }
    }

    #[test]
    fn due_tasks_come_out_in_order() {
        let mut s = Scheduler::new();
        s.schedule(300.0, expiry("b", 1));
        s.schedule(100.0, expiry("a", 1));
        s.schedule(300.0, TaskKind::WaveAdvance { wave: 2 });
        assert!(s.take_due(50.0).is_empty());
        assert_eq!(s.take_due(100.0), vec![expiry("a", 1)]);
        assert_eq!(
            s.take_due(1000.0),
            vec![expiry("b", 1), TaskKind::WaveAdvance { wave: 2 }]
        );
        assert!(s.is_empty());
    }

    #[test]
    fn decoding_restores_due_order() {
        let tasks = vec![
            ScheduledTask {
                due_ms: 50.0,
                kind: expiry("late", 2),
            },
            ScheduledTask {
                due_ms: 10.0,
                kind: TaskKind::WaveAdvance { wave: 4 },
            },
        ];
        let mut s = Scheduler::from(tasks);
        assert_eq!(s.take_due(10.0), vec![TaskKind::WaveAdvance { wave: 4 }]);
        assert_eq!(s.take_due(50.0), vec![expiry("late", 2)]);
    }

    #[test]
    fn clear_drops_everything() {
        let mut s = Scheduler::new();
        s.schedule(1.0, TaskKind::WaveAdvance { wave: 3 });
        s.clear();
        assert_eq!(s.len(), 0);
        assert!(s.take_due(f64::MAX).is_empty());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn take_due_splits_at_now(
                dues in prop::collection::vec(0u32..10_000, 0..40),
                now in 0u32..10_000,
            ) {
                let mut s = Scheduler::new();
                for (i, due) in dues.iter().enumerate() {
                    s.schedule(f64::from(*due), TaskKind::WaveAdvance { wave: i as u32 });
                }
                let taken = s.take_due(f64::from(now));
                let expected = dues.iter().filter(|d| **d <= now).count();
                prop_assert_eq!(taken.len(), expected);
                prop_assert_eq!(s.len(), dues.len() - expected);
                prop_assert!(s.take_due(f64::from(now)).is_empty());
            }

            #[test]
            fn equal_due_times_keep_insertion_order(n in 1u32..20) {
                let mut s = Scheduler::new();
                for wave in 0..n {
                    s.schedule(5.0, TaskKind::WaveAdvance { wave });
                }
                let waves: Vec<u32> = s
                    .take_due(5.0)
                    .into_iter()
                    .filter_map(|t| match t {
                        TaskKind::WaveAdvance { wave } => Some(wave),
                        TaskKind::EffectExpiry { .. } => None,
                    })
                    .collect();
                prop_assert_eq!(waves, (0..n).collect::<Vec<_>>());
            }
        }
    }
}
