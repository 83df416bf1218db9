//! 标识符类型
//!
//! 定义人员和槽位的唯一标识符。

use serde::{Deserialize, Serialize};

/// 人员标识符（按到达顺序分配）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonId(pub u64);

/// 槽位标识符，取值范围 [0, N)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotId(pub usize);
