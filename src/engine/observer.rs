//! 状态转换观察者
//!
//! 引擎本身不输出任何内容；到达、分配、离场等转换通过调用方注入的
//! `EngineObserver` 回调上报。所有方法默认空实现。

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::{Person, PersonId, SlotId};
use crate::sim::SimTime;

pub trait EngineObserver: Send {
    /// 人员进入等待区之后
    fn on_arrival(&mut self, _now: SimTime, _person: &Person) {}
    /// 等待区已满，人员未被接纳
    fn on_rejected(&mut self, _now: SimTime, _person: PersonId) {}
    /// 人员进入槽位（status 已为 Dipping）
    fn on_assign(&mut self, _now: SimTime, _person: &Person) {}
    /// 人员离场（status 已为 Exiting），槽位已归还
    fn on_departure(&mut self, _now: SimTime, _person: &Person) {}
}

pub struct NoopObserver;

impl EngineObserver for NoopObserver {}

/// 把状态转换写成 tracing 事件
#[derive(Debug, Default)]
pub struct TracingObserver;

impl EngineObserver for TracingObserver {
    fn on_arrival(&mut self, now: SimTime, person: &Person) {
        debug!(now = now.0, person = person.id.0, "到达并等待");
    }

    fn on_rejected(&mut self, now: SimTime, person: PersonId) {
        warn!(now = now.0, person = person.0, "等待区已满，拒绝进入");
    }

    fn on_assign(&mut self, now: SimTime, person: &Person) {
        info!(
            now = now.0,
            person = person.id.0,
            slot = ?person.slot.map(|s| s.0),
            "进入槽位"
        );
    }

    fn on_departure(&mut self, now: SimTime, person: &Person) {
        info!(
            now = now.0,
            person = person.id.0,
            slot = ?person.slot.map(|s| s.0),
            "离开槽位"
        );
    }
}

/// 记录下来的状态转换
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TraceEvent {
    Arrival {
        t: SimTime,
        person: PersonId,
    },
    Rejected {
        t: SimTime,
        person: PersonId,
    },
    Assign {
        t: SimTime,
        person: PersonId,
        slot: SlotId,
        departure: SimTime,
    },
    Departure {
        t: SimTime,
        person: PersonId,
        slot: SlotId,
    },
}

/// 把转换收集到共享的 Vec 中，可在运行结束后读取
#[derive(Debug, Clone, Default)]
pub struct TraceRecorder {
    events: Arc<Mutex<Vec<TraceEvent>>>,
}

impl TraceRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Arc<Mutex<Vec<TraceEvent>>> {
        Arc::clone(&self.events)
    }

    fn record(&self, ev: TraceEvent) {
        self.events.lock().expect("trace log lock").push(ev);
    }
}

impl EngineObserver for TraceRecorder {
    fn on_arrival(&mut self, now: SimTime, person: &Person) {
        self.record(TraceEvent::Arrival {
            t: now,
            person: person.id,
        });
    }

    fn on_rejected(&mut self, now: SimTime, person: PersonId) {
        self.record(TraceEvent::Rejected { t: now, person });
    }

    fn on_assign(&mut self, now: SimTime, person: &Person) {
        if let (Some(slot), Some(departure)) = (person.slot, person.departure) {
            self.record(TraceEvent::Assign {
                t: now,
                person: person.id,
                slot,
                departure,
            });
        }
    }

    fn on_departure(&mut self, now: SimTime, person: &Person) {
        if let Some(slot) = person.slot {
            self.record(TraceEvent::Departure {
                t: now,
                person: person.id,
                slot,
            });
        }
    }
}
