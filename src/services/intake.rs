use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use tokio::sync::{Mutex, Notify};
use tower::filter::Predicate;
use tower::{BoxError, Service};

use crate::ids::IdGen;
use crate::observer::Observer;
use crate::queue::RequestQueue;
use crate::types::notice::Notice;
use crate::types::request::{Call, Direction, Request, RequestId};

/// Rejects calls the building cannot serve before they reach the queue.
#[derive(Clone)]
pub struct CallValidation {
    pub max_floor: u8,
}

impl Predicate<Call> for CallValidation {
    type Request = Call;

    fn check(&mut self, call: Call) -> Result<Call, BoxError> {
        let floor = call.floor();
        if floor < 1 || floor > self.max_floor {
            return Err(BoxError::from(format!(
                "floor {floor} outside 1..={}",
                self.max_floor
            )));
        }
        if let Call::Floor {
            direction,
            destination,
            ..
        } = &call
        {
            if !matches!(direction, Direction::Up | Direction::Down) {
                return Err(BoxError::from(format!(
                    "floor call needs an Up or Down intent, got {direction:?}"
                )));
            }
            if let Some(policy) = destination {
                if policy.floor < 1 || policy.floor > self.max_floor {
                    return Err(BoxError::from(format!(
                        "destination floor {} outside 1..={}",
                        policy.floor, self.max_floor
                    )));
                }
            }
        }
        Ok(call)
    }
}

/// Innermost intake service: mints the request, appends it, wakes the
/// dispatch task.
#[derive(Clone)]
pub struct EnqueueService {
    queue: Arc<Mutex<RequestQueue>>,
    ids: Arc<IdGen>,
    observer: Arc<dyn Observer>,
    wakeup: Arc<Notify>,
}

impl EnqueueService {
    pub fn new(
        queue: Arc<Mutex<RequestQueue>>,
        ids: Arc<IdGen>,
        observer: Arc<dyn Observer>,
        wakeup: Arc<Notify>,
    ) -> Self {
        EnqueueService {
            queue,
            ids,
            observer,
            wakeup,
        }
    }
}

impl Service<Call> for EnqueueService {
    type Response = RequestId;
    type Error = BoxError;
    type Future = Pin<Box<dyn Future<Output = Result<RequestId, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, call: Call) -> Self::Future {
        let queue = self.queue.clone();
        let ids = self.ids.clone();
        let observer = self.observer.clone();
        let wakeup = self.wakeup.clone();

        Box::pin(async move {
            let request = match call {
                Call::Floor {
                    floor,
                    direction,
                    destination,
                } => Request::floor_call(ids.request_id(), floor, direction, destination),
                Call::Destination { floor } => {
                    Request::destination(ids.request_id(), floor, None)
                }
            };
            let id = request.id;
            observer.notify(Notice::Enqueued(request.clone()));
            queue.lock().await.enqueue(request);
            wakeup.notify_one();
            Ok(id)
        })
    }
}
