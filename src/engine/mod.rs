//! 调度引擎模块
//!
//! 人员、槽位标识、引擎本体以及状态转换观察者。

mod error;
mod id;
mod observer;
mod person;
mod scheduler;
mod shared;

pub use error::EngineError;
pub use id::{PersonId, SlotId};
pub use observer::{EngineObserver, NoopObserver, TraceEvent, TraceRecorder, TracingObserver};
pub use person::{Person, Status};
pub use scheduler::{
    AdmissionPolicy, DEFAULT_BATCH_CAP, DEFAULT_QUEUE_CAPACITY, Engine, EngineConfig, Stats,
};
pub use shared::SharedEngine;
