//! Check-in capture and the records it produces.

mod flow;
mod record;

pub use flow::{CheckinFlow, CheckinInput, CheckinRejection, CheckinStep};
pub use record::{CheckinRecord, CompletionRecord, PriorityHabitEvent};
