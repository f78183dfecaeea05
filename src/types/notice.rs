use std::fmt;
use std::fmt::Display;

use crate::types::request::{CarId, Direction, Mode, Request, RequestId};

/// A state transition made visible to the embedder.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    Enqueued(Request),
    Removed(Request),
    Attached(CarId),
    Detached(CarId),
    ModeChanged(CarId, Mode),
    Moved(CarId, u8, Direction),
    DoorsOpened(CarId, u8),
    DoorsClosed(CarId, u8),
    NoCapacity(RequestId),
    Started,
    Stopped,
}

impl Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::Enqueued(request) => write!(f, "queued {request}"),
            Notice::Removed(request) => write!(f, "cleared {request}"),
            Notice::Attached(car) => write!(f, "{car} attached"),
            Notice::Detached(car) => write!(f, "{car} detached"),
            Notice::ModeChanged(car, mode) => write!(f, "{car} mode {mode:?}"),
            Notice::Moved(car, floor, direction) => {
                write!(f, "{car} moving {direction:?}, now at floor {floor}")
            }
            Notice::DoorsOpened(car, floor) => {
                write!(f, "{car} opening doors at floor {floor}")
            }
            Notice::DoorsClosed(car, floor) => {
                write!(f, "{car} closing doors at floor {floor}")
            }
            Notice::NoCapacity(request) => {
                write!(f, "no car available for {request}, please attach one")
            }
            Notice::Started => write!(f, "dispatch started"),
            Notice::Stopped => write!(f, "dispatch stopped"),
        }
    }
}
