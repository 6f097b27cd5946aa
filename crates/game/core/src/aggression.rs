//! Aggression arbitration.
//!
//! Only a limited number of enemies (one by default) may actively pursue and
//! attack the player at a time. The [`AggressivityTracker`] rations that
//! permission as a mutual-exclusion token; AI tasks acquire it through
//! [`TrackerHandle::request`] and give it back with
//! [`TrackerHandle::release`].
//!
//! Requests that cannot be served immediately wait in a FIFO queue, so a
//! freed slot always goes to the enemy that has been waiting longest.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use crate::character::EntityId;

/// Grants the "may be aggressive" token to at most `cap` characters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AggressivityTracker {
    cap: usize,
    holders: Vec<EntityId>,
    pending: VecDeque<EntityId>,
}

impl AggressivityTracker {
    pub fn new(cap: usize) -> Self {
        Self {
            cap,
            holders: Vec::with_capacity(cap),
            pending: VecDeque::new(),
        }
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    /// Asks for a grant on behalf of `id`.
    ///
    /// Returns `true` if `id` holds a grant after the call. Otherwise `id` is
    /// queued (once) and should ask again on a later tick.
    pub fn request(&mut self, id: EntityId) -> bool {
        if self.is_holder(id) {
            return true;
        }

        let first_in_line = self.pending.front().is_none_or(|front| *front == id);
        if self.holders.len() < self.cap && first_in_line {
            self.pending.retain(|pending| *pending != id);
            self.holders.push(id);
            tracing::info!(entity = %id, holders = self.holders.len(), "aggression granted");
            return true;
        }

        if !self.pending.contains(&id) {
            tracing::debug!(entity = %id, position = self.pending.len(), "aggression request queued");
            self.pending.push_back(id);
        }
        false
    }

    /// Gives back the grant held by `id` and drops any queued request.
    ///
    /// Calling this without holding a grant is a no-op.
    pub fn release(&mut self, id: EntityId) {
        self.cancel_request(id);
        if let Some(index) = self.holders.iter().position(|holder| *holder == id) {
            self.holders.remove(index);
            tracing::info!(entity = %id, "aggression released");
        }
    }

    /// Withdraws a queued request without touching an existing grant.
    pub fn cancel_request(&mut self, id: EntityId) {
        self.pending.retain(|pending| *pending != id);
    }

    pub fn is_holder(&self, id: EntityId) -> bool {
        self.holders.contains(&id)
    }

    pub fn is_pending(&self, id: EntityId) -> bool {
        self.pending.contains(&id)
    }

    /// Current grant holders in grant order.
    pub fn holders(&self) -> &[EntityId] {
        &self.holders
    }
}

/// Shared reference to the encounter's tracker.
///
/// The world owns one tracker and hands a clone of this handle to every AI
/// controller it builds. The simulation is single threaded, so the handle is
/// an `Rc<RefCell<_>>`; borrows never outlive a single method call.
#[derive(Clone, Debug)]
pub struct TrackerHandle(Rc<RefCell<AggressivityTracker>>);

impl TrackerHandle {
    pub fn new(cap: usize) -> Self {
        Self(Rc::new(RefCell::new(AggressivityTracker::new(cap))))
    }

    pub fn request(&self, id: EntityId) -> bool {
        self.0.borrow_mut().request(id)
    }

    pub fn release(&self, id: EntityId) {
        self.0.borrow_mut().release(id);
    }

    pub fn cancel_request(&self, id: EntityId) {
        self.0.borrow_mut().cancel_request(id);
    }

    pub fn is_holder(&self, id: EntityId) -> bool {
        self.0.borrow().is_holder(id)
    }

    pub fn is_pending(&self, id: EntityId) -> bool {
        self.0.borrow().is_pending(id)
    }

    pub fn holders(&self) -> Vec<EntityId> {
        self.0.borrow().holders().to_vec()
    }

    pub fn cap(&self) -> usize {
        self.0.borrow().cap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: EntityId = EntityId(1);
    const B: EntityId = EntityId(2);
    const C: EntityId = EntityId(3);

    #[test]
    fn never_grants_more_than_cap() {
        let mut tracker = AggressivityTracker::new(1);
        assert!(tracker.request(A));
        assert!(!tracker.request(B));
        assert!(!tracker.request(C));
        assert_eq!(tracker.holders(), &[A]);

        // Asking again while holding is not a second grant
        assert!(tracker.request(A));
        assert_eq!(tracker.holders().len(), 1);
    }

    #[test]
    fn releasing_without_grant_is_noop() {
        let mut tracker = AggressivityTracker::new(1);
        tracker.release(B);
        assert!(tracker.holders().is_empty());

        assert!(tracker.request(A));
        tracker.release(B);
        assert_eq!(tracker.holders(), &[A]);
        tracker.release(A);
        tracker.release(A);
        assert!(tracker.holders().is_empty());
    }

    #[test]
    fn freed_slot_goes_to_longest_waiter() {
        let mut tracker = AggressivityTracker::new(1);
        assert!(tracker.request(A));
        assert!(!tracker.request(B));
        assert!(!tracker.request(C));

        tracker.release(A);
        // C asks first after the release but B has been waiting longer
        assert!(!tracker.request(C));
        assert!(tracker.request(B));
        assert_eq!(tracker.holders(), &[B]);
        assert!(!tracker.is_pending(B));
        assert!(tracker.is_pending(C));
    }

    #[test]
    fn withdrawn_request_frees_the_queue() {
        let mut tracker = AggressivityTracker::new(1);
        assert!(tracker.request(A));
        assert!(!tracker.request(B));
        assert!(!tracker.request(C));

        tracker.cancel_request(B);
        tracker.release(A);
        assert!(tracker.request(C));
    }

    #[test]
    fn handle_shares_one_tracker() {
        let handle = TrackerHandle::new(2);
        let other = handle.clone();
        assert!(handle.request(A));
        assert!(other.request(B));
        assert!(!handle.request(C));
        assert_eq!(other.holders(), vec![A, B]);
        assert!(handle.is_pending(C));
    }
}
