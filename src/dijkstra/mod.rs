// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

mod cost;
mod search;

pub use cost::{CostFunction, Pace, ParseCostFunctionError, DEFAULT_PACE};
pub use search::{find_route, find_route_with_pace};
