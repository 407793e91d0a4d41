//! ISR-debounced capacitive touch pad driver.
//!
//! ## Hardware
//!
//! Three TTP223 touch pads (prev / next / action) with active-high digital
//! outputs. Each pad fires a GPIO interrupt on the rising edge (touch-down);
//! the ISR debounces against the last accepted edge and pushes the matching
//! input event onto the lock-free event queue. Touch-up is ignored — a pad
//! held down produces exactly one event.

use core::sync::atomic::{AtomicU32, Ordering};

use crate::events::{push_event, Event};

const DEBOUNCE_MS: u32 = 50;

/// Last accepted touch-down timestamp per pad (ms since boot, u32 wrap).
static LAST_ACCEPT_MS: [AtomicU32; 3] = [
    AtomicU32::new(0),
    AtomicU32::new(0),
    AtomicU32::new(0),
];

/// Physical touch pads on the carrier face.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchPad {
    Prev = 0,
    Next = 1,
    Action = 2,
}

impl TouchPad {
    fn event(self) -> Event {
        match self {
            Self::Prev => Event::PrevPressed,
            Self::Next => Event::NextPressed,
            Self::Action => Event::ActionPressed,
        }
    }
}

/// ISR handler — register on each pad's rising edge.
/// Safe to call from interrupt context: an atomic timestamp check plus a
/// lock-free queue push, no allocation or blocking.
pub fn touch_isr_handler(pad: TouchPad, now_ms: u32) {
    if debounce_accept(&LAST_ACCEPT_MS[pad as usize], now_ms) {
        push_event(pad.event());
    }
}

/// Accept an edge only if at least `DEBOUNCE_MS` has passed since the last
/// accepted edge on the same pad. Timestamp 0 is reserved for "never".
fn debounce_accept(slot: &AtomicU32, now_ms: u32) -> bool {
    let last = slot.load(Ordering::Acquire);
    if last != 0 && now_ms.wrapping_sub(last) < DEBOUNCE_MS {
        return false;
    }
    slot.store(now_ms.max(1), Ordering::Release);
    true
}
