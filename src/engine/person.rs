//! 人员及其生命周期
//!
//! Waiting -> Dipping -> Exiting，只能单向推进。

use serde::{Deserialize, Serialize};

use super::{PersonId, SlotId};
use crate::sim::SimTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Waiting,
    Dipping,
    Exiting,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    pub id: PersonId,
    pub arrival: SimTime,
    pub status: Status,
    /// 分配到的槽位；Waiting 时为 None
    pub slot: Option<SlotId>,
    pub assigned_at: Option<SimTime>,
    pub departure: Option<SimTime>,
}

impl Person {
    pub fn new(id: PersonId, arrival: SimTime) -> Self {
        Self {
            id,
            arrival,
            status: Status::Waiting,
            slot: None,
            assigned_at: None,
            departure: None,
        }
    }

    /// 进入槽位，返回离场时间
    pub(crate) fn start_dipping(&mut self, slot: SlotId, now: SimTime, service: SimTime) -> SimTime {
        debug_assert_eq!(self.status, Status::Waiting);
        let departure = now.saturating_add(service);
        self.status = Status::Dipping;
        self.slot = Some(slot);
        self.assigned_at = Some(now);
        self.departure = Some(departure);
        departure
    }

    pub(crate) fn exit(&mut self) {
        debug_assert_eq!(self.status, Status::Dipping);
        self.status = Status::Exiting;
    }

    /// 排队等待时长（尚未分配时为 None）
    pub fn wait_time(&self) -> Option<SimTime> {
        self.assigned_at.map(|t| t.since(self.arrival))
    }
}
