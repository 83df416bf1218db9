//! 离场日程
//!
//! 按离场时间排序的最小堆，同一时间离场的人按 id 升序处理。

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::engine::Person;
use crate::sim::SimTime;

/// 已排期的离场事件，持有正在占用槽位的人
#[derive(Debug)]
pub struct ScheduledDeparture {
    pub at: SimTime,
    pub person: Person,
}

impl Ord for ScheduledDeparture {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.at.cmp(&other.at) {
            Ordering::Equal => self.person.id.cmp(&other.person.id),
            ord => ord,
        }
        .reverse()
    }
}

impl PartialOrd for ScheduledDeparture {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for ScheduledDeparture {
    fn eq(&self, other: &Self) -> bool {
        self.at == other.at && self.person.id == other.person.id
    }
}

impl Eq for ScheduledDeparture {}

#[derive(Debug, Default)]
pub struct DepartureSchedule {
    heap: BinaryHeap<ScheduledDeparture>,
}

impl DepartureSchedule {
    /// 最早的离场时间（不移除）
    pub fn peek_min(&self) -> Option<SimTime> {
        self.heap.peek().map(|d| d.at)
    }

    pub fn pop_min(&mut self) -> Option<ScheduledDeparture> {
        self.heap.pop()
    }

    pub fn push(&mut self, at: SimTime, person: Person) {
        self.heap.push(ScheduledDeparture { at, person });
    }

    /// 若最早离场时间不晚于 `now`，弹出它
    pub fn pop_due(&mut self, now: SimTime) -> Option<ScheduledDeparture> {
        if self.peek_min()? <= now {
            self.heap.pop()
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
