//! 仿真外层模块
//!
//! 仿真时间、到达源、驱动器和场景配置。引擎核心见 `crate::engine`。

mod arrivals;
pub mod driver;
mod scenario;
mod time;

pub use arrivals::{ArrivalSource, FixedArrivals, StaggeredArrivals};
pub use driver::{Backpressure, RunReport};
pub use scenario::{ArrivalSpec, DEFAULT_SEED, ScenarioError, ScenarioSpec};
pub use time::SimTime;
