use std::fmt;
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(pub u64);

impl Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rq-{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CarId(pub u64);

impl Display for CarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "car-{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Idle,
    GoTo,
}

impl Direction {
    /// Whether a queued intent is cleared by a stop made while travelling
    /// `travel`. GoTo entries only care about the floor.
    pub fn satisfied_by(self, travel: Direction) -> bool {
        self == Direction::GoTo || self == travel
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Idle,
    Active,
    Disabled,
    Override,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    FloorCall,
    Destination,
}

/// The floor a boarding rider will select once aboard. Plain data: the
/// dispatcher constructs the follow-up destination request itself when the
/// car stops for the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DestinationPolicy {
    pub floor: u8,
}

/// A call as handed to the dispatcher. Ids are assigned on the way into the
/// queue, not by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Call {
    Floor {
        floor: u8,
        direction: Direction,
        destination: Option<DestinationPolicy>,
    },
    Destination {
        floor: u8,
    },
}

impl Call {
    pub fn floor(&self) -> u8 {
        match self {
            Call::Floor { floor, .. } | Call::Destination { floor } => *floor,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub id: RequestId,
    pub kind: RequestKind,
    pub floor: u8,
    pub direction: Direction,
    pub destination: Option<DestinationPolicy>,
    pub origin: Option<RequestId>,
}

impl Request {
    pub fn floor_call(
        id: RequestId,
        floor: u8,
        direction: Direction,
        destination: Option<DestinationPolicy>,
    ) -> Self {
        Request {
            id,
            kind: RequestKind::FloorCall,
            floor,
            direction,
            destination,
            origin: None,
        }
    }

    pub fn destination(id: RequestId, floor: u8, origin: Option<RequestId>) -> Self {
        Request {
            id,
            kind: RequestKind::Destination,
            floor,
            direction: Direction::GoTo,
            destination: None,
            origin,
        }
    }
}

impl Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<request {} {:?} floor {} {:?}>",
            self.id, self.kind, self.floor, self.direction
        )
    }
}
