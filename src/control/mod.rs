//! Control logic — the per-plant pump state machine.

pub mod pump;
