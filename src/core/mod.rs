pub mod clock;
pub mod economy_state;
pub mod services;
pub mod utils;

pub use clock::{Clock, FixedClock, SystemClock};
pub use economy_state::{DayReport, EconomyState, OVERDRAFT_COMMENT};
