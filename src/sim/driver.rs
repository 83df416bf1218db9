//! 驱动器
//!
//! 外层的薄驱动：每个到达先交给引擎，再处理到期离场；到达流结束后排空。

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{ArrivalSource, SimTime};
use crate::engine::{Engine, EngineError, Person, PersonId, Stats};

/// 等待区已满时驱动器的处理方式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Backpressure {
    /// 立即返回 QueueFull
    #[default]
    Fail,
    /// 丢弃该人员，继续后续到达
    Drop,
    /// 推进时钟处理离场，直到等待区接纳该人员
    Stall,
}

#[derive(Debug, Clone)]
pub struct RunReport {
    pub final_time: SimTime,
    pub stats: Stats,
    /// 按离场顺序排列
    pub departures: Vec<Person>,
}

/// 按驱动协议运行到达源直到结束，人员 id 从 1 开始按到达顺序分配
pub fn run(
    engine: &mut Engine,
    source: &mut dyn ArrivalSource,
    backpressure: Backpressure,
) -> Result<RunReport, EngineError> {
    info!(
        slots = engine.config().slots,
        batch_size = engine.batch_size(),
        ?backpressure,
        "▶️  开始运行仿真"
    );

    let mut departures = Vec::new();
    let mut next_id = 1_u64;
    while let Some(at) = source.next_arrival(engine.now()) {
        let id = PersonId(next_id);
        next_id += 1;
        admit(engine, id, at, backpressure, &mut departures)?;
        departures.extend(engine.process_departures());
    }
    departures.extend(engine.drain());

    let stats = engine.stats();
    info!(
        final_time = engine.now().0,
        arrived = stats.arrived,
        departed = stats.departed,
        rejected = stats.rejected,
        "✅ 仿真完成"
    );
    Ok(RunReport {
        final_time: engine.now(),
        stats,
        departures,
    })
}

fn admit(
    engine: &mut Engine,
    id: PersonId,
    at: SimTime,
    backpressure: Backpressure,
    departures: &mut Vec<Person>,
) -> Result<(), EngineError> {
    loop {
        let err = match engine.on_arrival(id, at) {
            Ok(()) => return Ok(()),
            Err(err @ EngineError::QueueFull { .. }) => err,
            Err(err) => return Err(err),
        };
        match backpressure {
            Backpressure::Fail => return Err(err),
            Backpressure::Drop => {
                debug!(person = id.0, "等待区已满，丢弃");
                return Ok(());
            }
            Backpressure::Stall => {
                let freed = engine.advance();
                if freed.is_empty() {
                    // 没有在场的人可以离开，等待区不会再腾出空间
                    return Err(err);
                }
                departures.extend(freed);
            }
        }
    }
}
