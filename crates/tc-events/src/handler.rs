//! The `EventHandler` trait and the ordered replay driver.

use std::borrow::Borrow;

use log::debug;
use tc_core::EventTime;

use crate::{Event, EventError, EventResult};

/// Consumer of a replayed event stream.
///
/// Handlers own all per-replay state.  [`reset`][Self::reset] is called once
/// before the first event of every replay, so one handler instance can be
/// driven through several independent replays in sequence.
///
/// # Example — event counter
///
/// ```rust,ignore
/// struct Counter(usize);
///
/// impl EventHandler for Counter {
///     fn handle_event(&mut self, _event: &Event) {
///         self.0 += 1;
///     }
///
///     fn reset(&mut self, _iteration: u32) {
///         self.0 = 0;
///     }
/// }
/// ```
pub trait EventHandler {
    /// Called once per event, in stream order.
    fn handle_event(&mut self, event: &Event);

    /// Clear all per-replay state.  Default: no-op.
    fn reset(&mut self, _iteration: u32) {}
}

/// Reset `handler` for `iteration` and feed it every event in `events`.
///
/// Returns the number of events delivered.
///
/// # Errors
///
/// `EventError::OutOfOrder` as soon as an event's time is earlier than its
/// predecessor's (or is NaN).  Events before the offending one have already
/// been delivered; the replay should be discarded.
pub fn replay<I, H>(events: I, handler: &mut H, iteration: u32) -> EventResult<usize>
where
    I: IntoIterator,
    I::Item: Borrow<Event>,
    H: EventHandler + ?Sized,
{
    handler.reset(iteration);

    let mut previous = EventTime(f64::NEG_INFINITY);
    let mut count = 0usize;

    for (index, item) in events.into_iter().enumerate() {
        let event = item.borrow();
        let time = event.time();
        // `!(a >= b)` also rejects NaN timestamps.
        if !(time >= previous) {
            return Err(EventError::OutOfOrder { index, time, previous });
        }
        previous = time;
        handler.handle_event(event);
        count += 1;
    }

    debug!("replay {iteration}: delivered {count} events");
    Ok(count)
}
