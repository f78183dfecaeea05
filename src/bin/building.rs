use std::sync::Arc;
use std::time::Duration;

use hoistway::{Call, Car, CarId, DestinationPolicy, DispatchConfig, Dispatcher, Direction};

const FLOORS: u8 = 10;
const CAR_CAPACITY: f64 = 1200.0;

// (delay seconds, call floor, travel intent, destination floor)
const SCHEDULE: [(u64, u8, Direction, u8); 8] = [
    (2, 10, Direction::Down, 5),
    (3, 3, Direction::Up, 4),
    (6, 8, Direction::Down, 2),
    (9, 1, Direction::Up, 9),
    (10, 5, Direction::Up, 9),
    (12, 5, Direction::Down, 1),
    (15, 10, Direction::Down, 1),
    (18, 3, Direction::Down, 1),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let dispatcher = Arc::new(Dispatcher::new(DispatchConfig {
        max_floor: FLOORS,
        ..DispatchConfig::default()
    }));
    dispatcher.attach(Car::new(CarId(1), CAR_CAPACITY)).await?;
    dispatcher.start();
    println!("building with {FLOORS} floors, one car, doors at your service");

    for (delay, floor, direction, destination) in SCHEDULE {
        let dispatcher = dispatcher.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(delay)).await;
            let call = Call::Floor {
                floor,
                direction,
                destination: Some(DestinationPolicy { floor: destination }),
            };
            if let Err(err) = dispatcher.call_elevator(call).await {
                eprintln!("{err}");
            }
        });
    }

    // let the schedule play out, then wait for the queue to drain
    tokio::time::sleep(Duration::from_secs(20)).await;
    while dispatcher.pending().await > 0 {
        tokio::time::sleep(Duration::from_secs(1)).await;
    }
    dispatcher.stop();
    let status = dispatcher.car_status(CarId(1)).await?;
    println!("all requests served, car resting at floor {}", status.floor);
    Ok(())
}
