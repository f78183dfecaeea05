pub mod car;
pub mod dispatcher;
pub mod ids;
pub mod observer;
pub mod queue;
pub mod selector;
pub mod services;
pub mod types;

pub use car::{Car, CarStatus};
pub use dispatcher::{DispatchConfig, Dispatcher};
pub use observer::{ConsoleObserver, NullObserver, Observer};
pub use selector::{FirstAvailable, Selector};
pub use types::notice::Notice;
pub use types::request::{
    Call, CarId, DestinationPolicy, Direction, Mode, Request, RequestId, RequestKind,
};
