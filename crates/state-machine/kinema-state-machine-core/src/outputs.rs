//! Per-advance observation data.

use serde::{Deserialize, Serialize};

use crate::ids::{LayerId, StateId};

/// One fired transition, recorded in firing order during an advance.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateChange {
    pub layer: LayerId,
    pub from: StateId,
    pub to: StateId,
}
