use thiserror::Error;

use tc_core::EventTime;

#[derive(Debug, Error)]
pub enum EventError {
    #[error("event {index} at {time} is earlier than the previous event at {previous}")]
    OutOfOrder {
        index:    usize,
        time:     EventTime,
        previous: EventTime,
    },

    #[error("event parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type EventResult<T> = Result<T, EventError>;
