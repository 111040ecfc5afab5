use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a chef. Chefs are numbered from 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChefId(pub u32);

impl fmt::Display for ChefId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Worker state of a chef.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChefState {
    Idle,
    SelectingWork,
    ServingPayment,
    Baking,
    Shutdown,
}
