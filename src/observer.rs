use crate::types::notice::Notice;

/// Sink for dispatcher state transitions. Called inline from the dispatch
/// task, so implementations must not block.
pub trait Observer: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Prints every transition, one line each.
#[derive(Debug, Default)]
pub struct ConsoleObserver;

impl Observer for ConsoleObserver {
    fn notify(&self, notice: Notice) {
        match notice {
            Notice::NoCapacity(_) => eprintln!("{notice}"),
            _ => println!("{notice}"),
        }
    }
}

/// Discards everything.
#[derive(Debug, Default)]
pub struct NullObserver;

impl Observer for NullObserver {
    fn notify(&self, _notice: Notice) {}
}
