//! Transport-layer types shared by the HTTP boundary.
//! These structs are the request/response payloads of the earnings API so that
//! handlers, tests and any API client agree on a single shape.

mod earnings;
mod week;

pub use earnings::{UpdateEarningsRequest, WeeklyEarningsDto};
pub use week::{format_instant, WeekInfoDto, WeekRangeDto};
