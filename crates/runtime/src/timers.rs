use foundation::time::Time;

#[derive(Debug, Clone)]
struct Timer<K> {
    key: K,
    deadline: Time,
    order: u64,
}

/// One-shot deadlines keyed by owner. Each key holds at most one timer.
///
/// Due timers fire in a deterministic order: `(deadline, insertion_order)`.
#[derive(Debug, Clone)]
pub struct TimerQueue<K> {
    next_order: u64,
    timers: Vec<Timer<K>>,
}

impl<K> Default for TimerQueue<K> {
    fn default() -> Self {
        Self {
            next_order: 0,
            timers: Vec::new(),
        }
    }
}

impl<K: Copy + PartialEq> TimerQueue<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms the timer for `key`, replacing any timer it already had.
    pub fn schedule(&mut self, key: K, deadline: Time) {
        self.cancel(key);
        let order = self.next_order;
        self.next_order = self.next_order.wrapping_add(1);
        self.timers.push(Timer {
            key,
            deadline,
            order,
        });
    }

    /// Returns true when a timer was removed.
    pub fn cancel(&mut self, key: K) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.key != key);
        self.timers.len() != before
    }

    pub fn deadline(&self, key: K) -> Option<Time> {
        self.timers.iter().find(|t| t.key == key).map(|t| t.deadline)
    }

    pub fn next_deadline(&self) -> Option<Time> {
        self.timers
            .iter()
            .map(|t| t.deadline)
            .min_by(|a, b| a.0.total_cmp(&b.0))
    }

    /// Removes and returns every key whose deadline is at or before `now`.
    pub fn pop_due(&mut self, now: Time) -> Vec<K> {
        let (mut due, pending): (Vec<_>, Vec<_>) = std::mem::take(&mut self.timers)
            .into_iter()
            .partition(|t| t.deadline.0 <= now.0);
        self.timers = pending;
        due.sort_by(|a, b| a.deadline.0.total_cmp(&b.deadline.0).then_with(|| a.order.cmp(&b.order)));
        due.into_iter().map(|t| t.key).collect()
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }
}
