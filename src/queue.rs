use std::collections::VecDeque;

use crate::types::request::{Direction, Request, RequestId};

/// Pending requests in arrival order. The head is the request the dispatcher
/// commits to next; everything behind it is fair game for batching.
#[derive(Debug, Default)]
pub struct RequestQueue {
    requests: VecDeque<Request>,
}

impl RequestQueue {
    pub fn enqueue(&mut self, request: Request) {
        self.requests.push_back(request);
    }

    pub fn peek_first(&self) -> Option<&Request> {
        self.requests.front()
    }

    /// Removes exactly one matching entry. Absent ids are a no-op.
    pub fn remove_by_id(&mut self, id: RequestId) -> Option<Request> {
        let index = self.requests.iter().position(|request| request.id == id)?;
        self.requests.remove(index)
    }

    /// Removes every entry satisfied by a stop at `floor` while travelling
    /// `direction`: the floor matches and the entry is a GoTo or shares the
    /// direction. Floor 0 is the no-target sentinel; nothing is removed.
    pub fn remove_by_floor_and_direction(
        &mut self,
        floor: u8,
        direction: Direction,
    ) -> Vec<Request> {
        if floor == 0 {
            return Vec::new();
        }
        let mut kept = VecDeque::with_capacity(self.requests.len());
        let mut removed = Vec::new();
        for request in self.requests.drain(..) {
            if request.floor == floor && request.direction.satisfied_by(direction) {
                removed.push(request);
            } else {
                kept.push_back(request);
            }
        }
        self.requests = kept;
        removed
    }

    /// Whether `floor` holds an entry a stop travelling `direction` would
    /// satisfy.
    pub fn wants_stop(&self, floor: u8, direction: Direction) -> bool {
        self.requests
            .iter()
            .any(|request| request.floor == floor && request.direction.satisfied_by(direction))
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Request> {
        self.requests.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::request::RequestId;

    fn call(id: u64, floor: u8, direction: Direction) -> Request {
        Request::floor_call(RequestId(id), floor, direction, None)
    }

    fn goto(id: u64, floor: u8) -> Request {
        Request::destination(RequestId(id), floor, None)
    }

    #[test]
    fn arrival_order_is_preserved() {
        let mut queue = RequestQueue::default();
        queue.enqueue(call(1, 3, Direction::Up));
        queue.enqueue(call(2, 8, Direction::Down));
        assert_eq!(queue.peek_first().map(|r| r.id), Some(RequestId(1)));
        queue.remove_by_id(RequestId(1));
        assert_eq!(queue.peek_first().map(|r| r.id), Some(RequestId(2)));
    }

    #[test]
    fn remove_by_id_on_absent_id_is_a_noop() {
        let mut queue = RequestQueue::default();
        queue.enqueue(call(1, 3, Direction::Up));
        assert!(queue.remove_by_id(RequestId(99)).is_none());
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn remove_by_id_takes_exactly_one_entry() {
        let mut queue = RequestQueue::default();
        queue.enqueue(call(1, 3, Direction::Up));
        queue.enqueue(call(2, 3, Direction::Up));
        let removed = queue.remove_by_id(RequestId(2)).unwrap();
        assert_eq!(removed.id, RequestId(2));
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn floor_and_direction_clears_goto_and_matching_intents() {
        let mut queue = RequestQueue::default();
        queue.enqueue(call(1, 5, Direction::Up));
        queue.enqueue(call(2, 5, Direction::Down));
        queue.enqueue(goto(3, 5));
        queue.enqueue(goto(4, 7));

        let removed = queue.remove_by_floor_and_direction(5, Direction::Up);
        let ids: Vec<_> = removed.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![RequestId(1), RequestId(3)]);
        // the opposite-direction intent and the other floor stay queued
        assert!(queue.wants_stop(5, Direction::Down));
        assert!(queue.wants_stop(7, Direction::Up));
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn floor_zero_sentinel_removes_nothing() {
        let mut queue = RequestQueue::default();
        queue.enqueue(goto(1, 4));
        let removed = queue.remove_by_floor_and_direction(0, Direction::Up);
        assert!(removed.is_empty());
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn wants_stop_matches_goto_and_same_direction_only() {
        let mut queue = RequestQueue::default();
        queue.enqueue(call(1, 4, Direction::Down));
        assert!(!queue.wants_stop(4, Direction::Up));
        assert!(queue.wants_stop(4, Direction::Down));
        queue.enqueue(goto(2, 6));
        assert!(queue.wants_stop(6, Direction::Up));
        assert!(queue.wants_stop(6, Direction::Down));
    }
}
