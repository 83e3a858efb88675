/***************************************/
/*        3rd party libraries          */
/***************************************/
use std::sync::Arc;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::config::ElevatorSettings;
use crate::elevator::Car;
use crate::shared::DispatchError;

/***************************************/
/*             Public API              */
/***************************************/
/// Lookup of the building's cars.
pub trait CarRepository: Send + Sync {
    /// Every car, in a stable order.
    fn get_all(&self) -> Vec<Arc<Car>>;

    fn get_by_id(&self, id: u8) -> Option<Arc<Car>>;
}

/**
 * Fleet held in memory for the lifetime of the process.
 *
 * Cars get ids `1..=car_count`, start at the lobby floor and are enumerated in id
 * order.
 */
pub struct InMemoryCarRepository {
    cars: Vec<Arc<Car>>,
}

impl InMemoryCarRepository {
    pub fn new(settings: &ElevatorSettings) -> Result<InMemoryCarRepository, DispatchError> {
        settings.validate()?;

        let cars = (1..=settings.car_count)
            .map(|id| {
                Arc::new(Car::new(
                    id,
                    settings.min_floor,
                    settings.max_floor,
                    settings.lobby_floor,
                ))
            })
            .collect();

        Ok(InMemoryCarRepository { cars })
    }
}

impl CarRepository for InMemoryCarRepository {
    fn get_all(&self) -> Vec<Arc<Car>> {
        self.cars.clone()
    }

    fn get_by_id(&self, id: u8) -> Option<Arc<Car>> {
        self.cars.iter().find(|car| car.id() == id).cloned()
    }
}
