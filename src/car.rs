use std::fmt;
use std::fmt::Display;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;

use crate::observer::{NullObserver, Observer};
use crate::types::notice::Notice;
use crate::types::request::{CarId, Direction, Mode};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarStatus {
    pub floor: u8,
    pub direction: Direction,
    pub mode: Mode,
    pub load: f64,
}

/// One elevator car. Scheduling lives in the dispatcher; the car only knows
/// how to move one floor, dwell with the doors open, and keep its own
/// bookkeeping.
pub struct Car {
    id: CarId,
    floor: u8,
    direction: Direction,
    mode: Mode,
    capacity_used: f64,
    capacity_max: f64,
    observer: Arc<dyn Observer>,
}

impl Car {
    /// Seconds of simulated travel per floor.
    pub const VELOCITY: Duration = Duration::from_secs(1);
    /// Door-open dwell, twice the travel unit.
    pub const DOOR_DWELL: Duration = Duration::from_secs(2);

    pub fn new(id: CarId, capacity_max: f64) -> Self {
        Car {
            id,
            floor: 1,
            direction: Direction::Idle,
            mode: Mode::Idle,
            capacity_used: 0.0,
            capacity_max,
            observer: Arc::new(NullObserver),
        }
    }

    pub fn id(&self) -> CarId {
        self.id
    }

    pub fn floor(&self) -> u8 {
        self.floor
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn status(&self) -> CarStatus {
        CarStatus {
            floor: self.floor,
            direction: self.direction,
            mode: self.mode,
            load: self.capacity_used,
        }
    }

    /// A car in Disabled or Override is out of the dispatcher's hands.
    pub fn available(&self) -> bool {
        matches!(self.mode, Mode::Idle | Mode::Active)
    }

    pub(crate) fn set_observer(&mut self, observer: Arc<dyn Observer>) {
        self.observer = observer;
    }

    /// Travels one floor in `direction`. Idle is a no-op; the suspension is
    /// the simulated travel time.
    pub async fn travel(&mut self, direction: Direction) {
        if direction == Direction::Idle {
            return;
        }
        self.direction = direction;
        sleep(Self::VELOCITY).await;
        match self.direction {
            Direction::Up => self.floor += 1,
            Direction::Down => self.floor -= 1,
            _ => {}
        }
        self.observer
            .notify(Notice::Moved(self.id, self.floor, self.direction));
    }

    /// Opens the doors, dwells, closes the doors.
    pub async fn arrive(&mut self) {
        self.observer.notify(Notice::DoorsOpened(self.id, self.floor));
        sleep(Self::DOOR_DWELL).await;
        self.observer.notify(Notice::DoorsClosed(self.id, self.floor));
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
        self.observer.notify(Notice::ModeChanged(self.id, mode));
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    /// Tracked, never enforced.
    pub fn board(&mut self, weight: f64) -> f64 {
        self.capacity_used += weight;
        self.capacity_used
    }

    pub fn unboard(&mut self, weight: f64) -> f64 {
        self.capacity_used -= weight;
        self.capacity_used
    }
}

impl Display for Car {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<{} floor {} {:?} {:?} load {}/{}>",
            self.id, self.floor, self.direction, self.mode, self.capacity_used, self.capacity_max
        )
    }
}
