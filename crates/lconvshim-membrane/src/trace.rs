//! Bounded trace of recent locale decisions.
//!
//! Fixed array of atomic slots indexed by a global sequence counter, so
//! recording never locks or allocates. Each slot carries a stamp
//! (`seqno + 1`, `0` when empty) and the decision packed into one word.
//! Readers accept a slot only when the stamp is identical before and after
//! reading the payload.
//!
//! When writers lap the ring faster than a single store completes, the
//! later writer finds the slot claimed and drops its record. The sequence
//! number is still consumed, so `total_pushed` stays exact.

use std::sync::atomic::{AtomicU64, Ordering, fence};

use crate::policy::RuntimeDecision;

/// Default capacity of the global trace.
pub const TRACE_CAPACITY: usize = 256;

const STAMP_EMPTY: u64 = 0;
const STAMP_WRITING: u64 = u64::MAX;

/// One traced decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecisionRecord {
    pub seqno: u64,
    pub decision: RuntimeDecision,
}

struct Slot {
    stamp: AtomicU64,
    packed: AtomicU64,
}

impl Slot {
    const fn new() -> Self {
        Self {
            stamp: AtomicU64::new(STAMP_EMPTY),
            packed: AtomicU64::new(0),
        }
    }

    fn write(&self, seqno: u64, packed: u64) {
        if self.stamp.swap(STAMP_WRITING, Ordering::Relaxed) == STAMP_WRITING {
            return;
        }
        fence(Ordering::Release);
        self.packed.store(packed, Ordering::Relaxed);
        self.stamp.store(seqno.wrapping_add(1), Ordering::Release);
    }

    fn read(&self) -> Option<DecisionRecord> {
        let before = self.stamp.load(Ordering::Acquire);
        if before == STAMP_EMPTY || before == STAMP_WRITING {
            return None;
        }
        let packed = self.packed.load(Ordering::Relaxed);
        fence(Ordering::Acquire);
        if self.stamp.load(Ordering::Relaxed) != before {
            return None;
        }
        Some(DecisionRecord {
            seqno: before - 1,
            decision: RuntimeDecision::unpack(packed)?,
        })
    }
}

/// Ring of the most recent `N` decisions.
pub struct DecisionTrace<const N: usize = TRACE_CAPACITY> {
    next_seqno: AtomicU64,
    /// Records below this seqno were cleared.
    floor: AtomicU64,
    slots: [Slot; N],
}

impl<const N: usize> DecisionTrace<N> {
    #[must_use]
    pub const fn new() -> Self {
        const { assert!(N > 0, "decision trace needs at least one slot") };
        Self {
            next_seqno: AtomicU64::new(0),
            floor: AtomicU64::new(0),
            slots: [const { Slot::new() }; N],
        }
    }

    #[must_use]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Append a decision, overwriting the oldest when full. Returns its seqno.
    pub fn push(&self, decision: RuntimeDecision) -> u64 {
        let seqno = self.next_seqno.fetch_add(1, Ordering::Relaxed);
        self.slots[(seqno % N as u64) as usize].write(seqno, decision.pack());
        seqno
    }

    /// Copy of the retained records, oldest first.
    #[must_use]
    pub fn snapshot(&self) -> Vec<DecisionRecord> {
        let floor = self.floor.load(Ordering::Acquire);
        let mut records: Vec<DecisionRecord> = self
            .slots
            .iter()
            .filter_map(Slot::read)
            .filter(|r| r.seqno >= floor)
            .collect();
        records.sort_unstable_by_key(|r| r.seqno);
        records
    }

    /// Total records ever pushed, including overwritten ones.
    #[must_use]
    pub fn total_pushed(&self) -> u64 {
        self.next_seqno.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        let floor = self.floor.load(Ordering::Acquire);
        self.slots
            .iter()
            .filter_map(Slot::read)
            .filter(|r| r.seqno >= floor)
            .count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Hide retained records. Sequence numbers keep counting.
    pub fn clear(&self) {
        let next = self.next_seqno.load(Ordering::Relaxed);
        self.floor.fetch_max(next, Ordering::Release);
    }
}

impl<const N: usize> Default for DecisionTrace<N> {
    fn default() -> Self {
        Self::new()
    }
}

static GLOBAL_TRACE: DecisionTrace = DecisionTrace::new();

/// Access the global decision trace.
#[must_use]
pub fn global_trace() -> &'static DecisionTrace {
    &GLOBAL_TRACE
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SafetyLevel;
    use crate::policy::CallOutcome;

    fn query(category: i32) -> RuntimeDecision {
        RuntimeDecision::setlocale(category, SafetyLevel::Strict, CallOutcome::Query)
    }

    #[test]
    fn push_assigns_increasing_seqnos() {
        let trace = DecisionTrace::<4>::new();
        assert_eq!(trace.push(query(0)), 0);
        assert_eq!(trace.push(query(1)), 1);
        let snap = trace.snapshot();
        assert_eq!(snap.len(), 2);
        assert_eq!(snap[0].decision.category, 0);
        assert_eq!(snap[1].seqno, 1);
    }

    #[test]
    fn full_ring_evicts_oldest() {
        let trace = DecisionTrace::<3>::new();
        for cat in 0..5 {
            trace.push(query(cat));
        }
        let cats: Vec<i32> = trace.snapshot().iter().map(|r| r.decision.category).collect();
        assert_eq!(cats, vec![2, 3, 4]);
        assert_eq!(trace.total_pushed(), 5);
        assert_eq!(trace.len(), 3);
        assert_eq!(trace.capacity(), 3);
    }

    #[test]
    fn slot_mid_write_is_skipped() {
        let trace = DecisionTrace::<2>::new();
        trace.push(query(0));
        trace.push(query(1));
        trace.slots[0].stamp.store(STAMP_WRITING, Ordering::Relaxed);
        let snap = trace.snapshot();
        assert_eq!(snap.len(), 1);
        assert_eq!(snap[0].decision.category, 1);

        // A second writer landing on a claimed slot leaves it alone.
        trace.slots[0].write(2, query(7).pack());
        assert_eq!(trace.slots[0].stamp.load(Ordering::Relaxed), STAMP_WRITING);
    }

    #[test]
    fn clear_keeps_sequence() {
        let trace = DecisionTrace::<2>::new();
        trace.push(query(0));
        trace.clear();
        assert!(trace.is_empty());
        assert_eq!(trace.push(query(1)), 1);
        assert_eq!(trace.snapshot()[0].decision.category, 1);
    }

    #[test]
    fn concurrent_pushes_are_all_counted() {
        let trace = DecisionTrace::<8>::new();
        std::thread::scope(|s| {
            for t in 0..4 {
                let trace = &trace;
                s.spawn(move || {
                    for _ in 0..100 {
                        trace.push(query(t));
                    }
                });
            }
        });
        assert_eq!(trace.total_pushed(), 400);
        assert_eq!(trace.len(), 8);
        assert!(trace.snapshot().iter().all(|r| (0..4).contains(&r.decision.category)));
    }

    #[test]
    fn global_trace_uses_default_capacity() {
        assert_eq!(global_trace().capacity(), TRACE_CAPACITY);
    }
}
