//! Status bookkeeping: stack instances and the delayed-application queue.
//!
//! Only durations live here. Effects (healing, damage, extra statuses) are
//! executed by the status hooks through the battle's dispatcher.
use std::collections::BTreeMap;

/// One independently-expiring instance of a status.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusStack {
    pub amount: i32,
    pub remaining: u32,
}

/// Status id → ordered stack instances (oldest first).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct StatusStacks {
    entries: BTreeMap<String, Vec<StatusStack>>,
}

impl StatusStacks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an instance. Non-positive amounts are ignored and a zero duration
    /// is clamped to one round.
    pub fn add(&mut self, id: &str, amount: i32, duration: u32) {
        if amount <= 0 {
            return;
        }
        self.entries.entry(id.to_owned()).or_default().push(StatusStack {
            amount,
            remaining: duration.max(1),
        });
    }

    /// Sum of all instance amounts.
    pub fn total(&self, id: &str) -> i32 {
        self.instances(id).iter().map(|stack| stack.amount).sum()
    }

    pub fn has(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn instances(&self, id: &str) -> &[StatusStack] {
        self.entries.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn remove(&mut self, id: &str) -> bool {
        self.entries.remove(id).is_some()
    }

    /// Spends up to `amount` stacks, oldest instances first. Returns what was
    /// actually spent.
    pub fn consume(&mut self, id: &str, amount: i32) -> i32 {
        if amount <= 0 {
            return 0;
        }
        let Some(instances) = self.entries.get_mut(id) else {
            return 0;
        };
        let mut left = amount;
        for stack in instances.iter_mut() {
            let taken = stack.amount.min(left);
            stack.amount -= taken;
            left -= taken;
            if left == 0 {
                break;
            }
        }
        instances.retain(|stack| stack.amount > 0);
        if instances.is_empty() {
            self.entries.remove(id);
        }
        amount - left
    }

    /// `(id, total)` for every active status, in id order.
    pub fn active(&self) -> impl Iterator<Item = (&str, i32)> + '_ {
        self.entries.iter().map(|(id, instances)| {
            (
                id.as_str(),
                instances.iter().map(|stack| stack.amount).sum(),
            )
        })
    }

    /// Owned snapshot of [`Self::active`], for dispatch loops that mutate the
    /// owner.
    pub fn snapshot(&self) -> Vec<(String, i32)> {
        self.active().map(|(id, total)| (id.to_owned(), total)).collect()
    }

    /// Round-end duration step: every instance loses one round and instances
    /// reaching zero are dropped. Returns ids that disappeared entirely.
    pub fn tick_round_end(&mut self) -> Vec<String> {
        let mut expired = Vec::new();
        for (id, instances) in self.entries.iter_mut() {
            for stack in instances.iter_mut() {
                stack.remaining = stack.remaining.saturating_sub(1);
            }
            instances.retain(|stack| stack.remaining > 0);
            if instances.is_empty() {
                expired.push(id.clone());
            }
        }
        for id in &expired {
            self.entries.remove(id);
        }
        expired
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// A status scheduled to start after a number of round ends.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DelayedStatus {
    pub status: String,
    pub amount: i32,
    pub duration: u32,
    pub remaining_delay: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct DelayedQueue {
    entries: Vec<DelayedStatus>,
}

impl DelayedQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, status: &str, amount: i32, duration: u32, delay: u32) {
        if amount <= 0 {
            return;
        }
        self.entries.push(DelayedStatus {
            status: status.to_owned(),
            amount,
            duration,
            remaining_delay: delay,
        });
    }

    /// Round-end step: delays count down (saturating) and entries reaching
    /// zero are instantiated into `stacks` and removed. Returns the
    /// materialized entries.
    pub fn tick(&mut self, stacks: &mut StatusStacks) -> Vec<DelayedStatus> {
        let mut ready = Vec::new();
        let mut waiting = Vec::with_capacity(self.entries.len());
        for mut entry in self.entries.drain(..) {
            entry.remaining_delay = entry.remaining_delay.saturating_sub(1);
            if entry.remaining_delay == 0 {
                stacks.add(&entry.status, entry.amount, entry.duration);
                ready.push(entry);
            } else {
                waiting.push(entry);
            }
        }
        self.entries = waiting;
        ready
    }

    pub fn pending(&self) -> &[DelayedStatus] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_decreases_by_one_and_expires_exactly_at_zero() {
        let mut stacks = StatusStacks::new();
        stacks.add("burn", 2, 3);

        for expected in [2, 1] {
            assert!(stacks.tick_round_end().is_empty());
            assert_eq!(stacks.instances("burn")[0].remaining, expected);
        }
        assert_eq!(stacks.tick_round_end(), vec!["burn".to_owned()]);
        assert!(!stacks.has("burn"));
    }

    #[test]
    fn instances_expire_independently() {
        let mut stacks = StatusStacks::new();
        stacks.add("strength", 1, 1);
        stacks.add("strength", 2, 2);
        assert_eq!(stacks.total("strength"), 3);

        stacks.tick_round_end();
        assert_eq!(stacks.total("strength"), 2);
        assert_eq!(stacks.instances("strength").len(), 1);
    }

    #[test]
    fn zero_duration_is_clamped_and_non_positive_amount_ignored() {
        let mut stacks = StatusStacks::new();
        stacks.add("haste", 1, 0);
        stacks.add("bind", 0, 3);
        assert_eq!(stacks.instances("haste")[0].remaining, 1);
        assert!(!stacks.has("bind"));
    }

    #[test]
    fn consume_spends_oldest_first() {
        let mut stacks = StatusStacks::new();
        stacks.add("barrier", 3, 2);
        stacks.add("barrier", 4, 5);

        assert_eq!(stacks.consume("barrier", 5), 5);
        assert_eq!(stacks.instances("barrier"), &[StatusStack { amount: 2, remaining: 5 }]);
        assert_eq!(stacks.consume("barrier", 9), 2);
        assert!(!stacks.has("barrier"));
        assert_eq!(stacks.consume("barrier", 1), 0);
    }

    #[test]
    fn delayed_entries_materialize_when_delay_runs_out() {
        let mut stacks = StatusStacks::new();
        let mut queue = DelayedQueue::new();
        queue.schedule("strength", 2, 1, 2);
        queue.schedule("haste", 1, 1, 0);

        let first = queue.tick(&mut stacks);
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].status, "haste");
        assert!(stacks.has("haste"));
        assert_eq!(queue.pending()[0].remaining_delay, 1);

        let second = queue.tick(&mut stacks);
        assert_eq!(second[0].status, "strength");
        assert_eq!(stacks.total("strength"), 2);
        assert!(queue.is_empty());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn stacks_and_queue_round_trip() {
        let mut stacks = StatusStacks::new();
        stacks.add("burn", 3, 2);
        stacks.add("burn", 1, 4);
        stacks.add("protection", 2, 1);
        let mut queue = DelayedQueue::new();
        queue.schedule("strength", 1, 2, 1);

        let stacks_json = serde_json::to_string(&stacks).expect("serialize stacks");
        let queue_json = serde_json::to_string(&queue).expect("serialize queue");

        assert_eq!(
            serde_json::from_str::<StatusStacks>(&stacks_json).expect("stacks"),
            stacks
        );
        assert_eq!(
            serde_json::from_str::<DelayedQueue>(&queue_json).expect("queue"),
            queue
        );
    }
}
