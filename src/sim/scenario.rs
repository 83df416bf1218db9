use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::driver::{self, Backpressure, RunReport};
use super::{ArrivalSource, FixedArrivals, SimTime, StaggeredArrivals};
use crate::engine::{AdmissionPolicy, Engine, EngineConfig, EngineError, EngineObserver};

pub const DEFAULT_SEED: u64 = 0;

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("read scenario {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("parse scenario: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Engine(#[from] EngineError),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioSpec {
    pub slots: usize,
    pub service_time: u64,
    #[serde(default)]
    pub batch_cap: Option<usize>,
    #[serde(default)]
    pub queue_capacity: Option<usize>,
    #[serde(default)]
    pub policy: Option<AdmissionPolicy>,
    #[serde(default)]
    pub backpressure: Option<Backpressure>,
    pub arrivals: ArrivalSpec,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ArrivalSpec {
    Fixed {
        times: Vec<u64>,
    },
    Staggered {
        count: u64,
        max_gap: u64,
        #[serde(default)]
        seed: Option<u64>,
    },
}

impl ScenarioSpec {
    pub fn from_json(raw: &str) -> Result<Self, ScenarioError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn load(path: &Path) -> Result<Self, ScenarioError> {
        let raw = fs::read_to_string(path).map_err(|source| ScenarioError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw)
    }

    pub fn engine_config(&self) -> EngineConfig {
        let mut cfg = EngineConfig::new(self.slots, SimTime(self.service_time));
        if let Some(cap) = self.batch_cap {
            cfg.batch_cap = cap;
        }
        if let Some(cap) = self.queue_capacity {
            cfg.queue_capacity = cap;
        }
        if let Some(policy) = self.policy {
            cfg.policy = policy;
        }
        cfg
    }

    pub fn arrival_source(&self) -> Box<dyn ArrivalSource> {
        match &self.arrivals {
            ArrivalSpec::Fixed { times } => {
                Box::new(FixedArrivals::new(times.iter().copied().map(SimTime)))
            }
            ArrivalSpec::Staggered {
                count,
                max_gap,
                seed,
            } => Box::new(StaggeredArrivals::new(
                *count,
                *max_gap,
                seed.unwrap_or(DEFAULT_SEED),
            )),
        }
    }

    /// 构建引擎并运行整个场景
    pub fn run(&self, observer: Box<dyn EngineObserver>) -> Result<RunReport, ScenarioError> {
        let mut engine = Engine::new(self.engine_config())?;
        engine.set_observer(observer);
        let mut source = self.arrival_source();
        let report = driver::run(
            &mut engine,
            source.as_mut(),
            self.backpressure.unwrap_or_default(),
        )?;
        Ok(report)
    }
}
