use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::time::Duration;

use tokio::sync::{Mutex, Notify};
use tokio::task::JoinHandle;
use tower::filter::{Filter, FilterLayer};
use tower::{Service, ServiceBuilder, ServiceExt};

use crate::car::{Car, CarStatus};
use crate::ids::IdGen;
use crate::observer::{ConsoleObserver, Observer};
use crate::queue::RequestQueue;
use crate::selector::{FirstAvailable, Selector};
use crate::services::intake::{CallValidation, EnqueueService};
use crate::types::notice::Notice;
use crate::types::request::{Call, CarId, Direction, Mode, Request, RequestId};

const MIN_FLOOR: u8 = 1;
const BACKOFF_EXP_CAP: u32 = 10;

#[derive(Debug, Clone)]
pub struct DispatchConfig {
    pub max_floor: u8,
    /// First retry delay after "no car available".
    pub retry_base: Duration,
    /// Ceiling for the doubling retry delay.
    pub retry_cap: Duration,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        DispatchConfig {
            max_floor: 10,
            retry_base: Duration::from_millis(250),
            retry_cap: Duration::from_secs(4),
        }
    }
}

struct Core {
    config: DispatchConfig,
    queue: Arc<Mutex<RequestQueue>>,
    cars: Mutex<HashMap<CarId, Arc<Mutex<Car>>>>,
    running: AtomicBool,
    retries: AtomicU32,
    wakeup: Arc<Notify>,
    ids: Arc<IdGen>,
    observer: Arc<dyn Observer>,
    selector: Arc<dyn Selector>,
}

/// Owns the request queue and the attached cars, and runs the dispatch task
/// that drives one car at a time toward the head request, stopping for any
/// floor the current pass can also satisfy.
pub struct Dispatcher {
    core: Arc<Core>,
    intake: Mutex<Filter<EnqueueService, CallValidation>>,
    task: JoinHandle<()>,
}

impl Dispatcher {
    pub fn new(config: DispatchConfig) -> Self {
        Self::with_parts(config, Arc::new(ConsoleObserver), Arc::new(FirstAvailable))
    }

    /// Must be called from within a tokio runtime; the dispatch task is
    /// spawned here and parks until `start`.
    pub fn with_parts(
        config: DispatchConfig,
        observer: Arc<dyn Observer>,
        selector: Arc<dyn Selector>,
    ) -> Self {
        let max_floor = config.max_floor;
        let queue = Arc::new(Mutex::new(RequestQueue::default()));
        let ids = Arc::new(IdGen::default());
        let wakeup = Arc::new(Notify::new());
        let core = Arc::new(Core {
            config,
            queue: queue.clone(),
            cars: Mutex::new(HashMap::new()),
            running: AtomicBool::new(false),
            retries: AtomicU32::new(0),
            wakeup: wakeup.clone(),
            ids: ids.clone(),
            observer: observer.clone(),
            selector,
        });
        let intake = ServiceBuilder::new()
            .layer(FilterLayer::new(CallValidation { max_floor }))
            .service(EnqueueService::new(queue, ids, observer, wakeup));
        let task = tokio::spawn(Arc::clone(&core).run());
        Dispatcher {
            core,
            intake: Mutex::new(intake),
            task,
        }
    }

    pub async fn attach(&self, mut car: Car) -> anyhow::Result<()> {
        let id = car.id();
        let mut cars = self.core.cars.lock().await;
        if cars.contains_key(&id) {
            anyhow::bail!("{id} is already attached");
        }
        car.set_observer(self.core.observer.clone());
        cars.insert(id, Arc::new(Mutex::new(car)));
        drop(cars);
        // a fresh car may unblock a deferred request right away
        self.core.retries.store(0, Ordering::SeqCst);
        self.core.observer.notify(Notice::Attached(id));
        self.core.wakeup.notify_one();
        Ok(())
    }

    pub async fn detach(&self, id: CarId) -> anyhow::Result<()> {
        let mut cars = self.core.cars.lock().await;
        if cars.remove(&id).is_none() {
            anyhow::bail!("no attached car {id}");
        }
        drop(cars);
        self.core.observer.notify(Notice::Detached(id));
        Ok(())
    }

    /// Validates and enqueues a call. Returns once the request is queued;
    /// service happens asynchronously on the dispatch task.
    pub async fn call_elevator(&self, call: Call) -> anyhow::Result<RequestId> {
        let mut intake = self.intake.lock().await;
        let ready = intake
            .ready()
            .await
            .map_err(|e| anyhow::anyhow!("intake unavailable: {e}"))?;
        ready
            .call(call)
            .await
            .map_err(|e| anyhow::anyhow!("call rejected: {e}"))
    }

    pub fn start(&self) {
        if !self.core.running.swap(true, Ordering::SeqCst) {
            self.core.observer.notify(Notice::Started);
        }
        self.core.wakeup.notify_one();
    }

    /// Cooperative: the flag is observed at the top of the next cycle, an
    /// in-flight move or door dwell is never cancelled.
    pub fn stop(&self) {
        if self.core.running.swap(false, Ordering::SeqCst) {
            self.core.observer.notify(Notice::Stopped);
        }
    }

    /// Operator intervention path; the dispatch loop itself only ever sets
    /// Active and Idle.
    pub async fn set_car_mode(&self, id: CarId, mode: Mode) -> anyhow::Result<()> {
        let car = self.core.cars.lock().await.get(&id).cloned();
        let Some(car) = car else {
            anyhow::bail!("no attached car {id}");
        };
        car.lock().await.set_mode(mode);
        Ok(())
    }

    pub async fn car_status(&self, id: CarId) -> anyhow::Result<CarStatus> {
        let car = self.core.cars.lock().await.get(&id).cloned();
        let Some(car) = car else {
            anyhow::bail!("no attached car {id}");
        };
        let status = car.lock().await.status();
        Ok(status)
    }

    pub async fn pending(&self) -> usize {
        self.core.queue.lock().await.len()
    }
}

impl Drop for Dispatcher {
    fn drop(&mut self) {
        self.task.abort();
    }
}

fn direction_toward(from: u8, to: u8) -> Direction {
    if from < to { Direction::Up } else { Direction::Down }
}

impl Core {
    async fn run(self: Arc<Self>) {
        loop {
            if !self.running.load(Ordering::SeqCst) {
                self.wakeup.notified().await;
                continue;
            }
            let next = self.queue.lock().await.peek_first().cloned();
            let Some(next) = next else {
                self.wakeup.notified().await;
                continue;
            };
            let car = {
                let cars = self.cars.lock().await;
                match self.selector.select(&next, &cars).await {
                    Some(id) => cars.get(&id).cloned(),
                    None => None,
                }
            };
            let Some(car) = car else {
                self.observer.notify(Notice::NoCapacity(next.id));
                self.back_off().await;
                continue;
            };
            self.retries.store(0, Ordering::SeqCst);
            self.drive(car, next).await;
        }
    }

    /// Doubling delay, capped; the request stays queued and is retried on
    /// the next cycle.
    async fn back_off(&self) {
        let attempt = self
            .retries
            .fetch_add(1, Ordering::SeqCst)
            .min(BACKOFF_EXP_CAP);
        let delay = (self.config.retry_base * 2u32.saturating_pow(attempt)).min(self.config.retry_cap);
        tokio::time::sleep(delay).await;
    }

    /// One dispatch cycle: drive `car` floor by floor toward the head
    /// request, stopping wherever the pass can satisfy something.
    async fn drive(&self, car: Arc<Mutex<Car>>, next: Request) {
        car.lock().await.set_mode(Mode::Active);
        loop {
            let floor = car.lock().await.floor();
            if floor == next.floor {
                // already there, open without moving
                self.stop_at(&car, &next, floor, direction_toward(floor, next.floor))
                    .await;
                break;
            }
            let direction = direction_toward(floor, next.floor);
            car.lock().await.travel(direction).await;
            let floor = car.lock().await.floor();
            let stop_wanted =
                floor == next.floor || self.queue.lock().await.wants_stop(floor, direction);
            if stop_wanted {
                self.stop_at(&car, &next, floor, direction).await;
                if floor == next.floor {
                    break;
                }
            }
        }
        if self.queue.lock().await.is_empty() {
            car.lock().await.set_mode(Mode::Idle);
        }
    }

    /// A qualifying stop at `floor` made while travelling `traveled`: open
    /// the doors, clear what the stop satisfies, and pick the direction the
    /// car leaves with.
    async fn stop_at(&self, car: &Arc<Mutex<Car>>, next: &Request, floor: u8, traveled: Direction) {
        car.lock().await.arrive().await;
        let mut queue = self.queue.lock().await;
        if floor == next.floor {
            if let Some(served) = queue.remove_by_id(next.id) {
                self.observer.notify(Notice::Removed(served.clone()));
                self.push_destination(&mut queue, &served);
            }
        }
        for served in queue.remove_by_floor_and_direction(floor, traveled) {
            self.observer.notify(Notice::Removed(served.clone()));
            self.push_destination(&mut queue, &served);
        }
        // reversal lookahead: the direction the car leaves this stop with
        let onward = match queue.peek_first() {
            None => Direction::Idle,
            Some(head) if head.direction != traveled => head.direction,
            Some(_) => traveled,
        };
        if floor == MIN_FLOOR || floor == self.config.max_floor {
            // the car cannot continue outward; same-floor intents for the
            // forced reversal are served by this stop as well
            for served in queue.remove_by_floor_and_direction(floor, onward) {
                self.observer.notify(Notice::Removed(served.clone()));
                self.push_destination(&mut queue, &served);
            }
        }
        drop(queue);
        car.lock().await.set_direction(onward);
    }

    /// A rider who boarded at this stop presses the floor their call
    /// declared; the follow-up request carries the call id for tracing.
    fn push_destination(&self, queue: &mut RequestQueue, served: &Request) {
        let Some(policy) = served.destination else {
            return;
        };
        let request = Request::destination(self.ids.request_id(), policy.floor, Some(served.id));
        self.observer.notify(Notice::Enqueued(request.clone()));
        queue.enqueue(request);
    }
}
