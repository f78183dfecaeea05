use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::car::Car;
use crate::types::request::{CarId, Request};

/// Picks the car that should serve a request. Consulted once per dispatch
/// cycle; returning None defers the request to the next cycle.
#[async_trait]
pub trait Selector: Send + Sync {
    async fn select(
        &self,
        request: &Request,
        cars: &HashMap<CarId, Arc<Mutex<Car>>>,
    ) -> Option<CarId>;
}

/// Lowest-id attached car that is not Disabled or in Override.
#[derive(Debug, Default)]
pub struct FirstAvailable;

#[async_trait]
impl Selector for FirstAvailable {
    async fn select(
        &self,
        _request: &Request,
        cars: &HashMap<CarId, Arc<Mutex<Car>>>,
    ) -> Option<CarId> {
        let mut ids: Vec<CarId> = cars.keys().copied().collect();
        ids.sort();
        for id in ids {
            if let Some(car) = cars.get(&id) {
                if car.lock().await.available() {
                    return Some(id);
                }
            }
        }
        None
    }
}
