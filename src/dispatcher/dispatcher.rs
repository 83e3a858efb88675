/***************************************/
/*        3rd party libraries          */
/***************************************/
use std::sync::Arc;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::elevator::Car;
use crate::fleet::CarRepository;
use crate::shared::DispatchError;

/**
 * Assigns floor calls to cars.
 *
 * A call goes to the car that has to honour the fewest pending stops before it can
 * reach the floor. Equally loaded cars are ranked by floor distance, and any remaining
 * tie goes to the car the fleet lists first.
 *
 * The dispatcher holds no fleet-wide lock. Two calls racing for the same floor may
 * both rank the fleet before either stop lands; `Car::add_stop` being idempotent keeps
 * each car consistent in that case.
 *
 * # Fields
 * - `repository`:  Fleet the calls are assigned within.
 * - `min_floor`:   Lowest floor of the building.
 * - `max_floor`:   Top floor of the building.
 */
pub struct Dispatcher {
    repository: Arc<dyn CarRepository>,
    min_floor: i8,
    max_floor: i8,
}

impl Dispatcher {
    pub fn new(repository: Arc<dyn CarRepository>, min_floor: i8, max_floor: i8) -> Dispatcher {
        Dispatcher {
            repository,
            min_floor,
            max_floor,
        }
    }

    /// Assigns `floor` within the whole fleet.
    pub fn call(&self, floor: i8) -> Result<Arc<Car>, DispatchError> {
        let cars = self.repository.get_all();
        self.call_car(floor, &cars)
    }

    /// Assigns `floor` to one of `cars` and returns the chosen car.
    pub fn call_car(&self, floor: i8, cars: &[Arc<Car>]) -> Result<Arc<Car>, DispatchError> {
        if floor < self.min_floor || floor > self.max_floor {
            return Err(DispatchError::FloorOutOfRange {
                floor,
                min: self.min_floor,
                max: self.max_floor,
            });
        }

        // Floor already assigned
        if let Some(car) = cars.iter().find(|car| car.has_stop(floor)) {
            return Ok(Arc::clone(car));
        }

        let car = self.select_car(floor, cars).ok_or_else(|| {
            DispatchError::ServiceUnavailable("no cars in the fleet".to_string())
        })?;
        car.add_stop(floor)?;

        Ok(car)
    }

    fn select_car(&self, floor: i8, cars: &[Arc<Car>]) -> Option<Arc<Car>> {
        let ranked: Vec<_> = cars
            .iter()
            .map(|car| (car, car.distance_from(floor)))
            .collect();

        let fewest_stops = ranked.iter().map(|(_, d)| d.stops_til).min()?;
        let candidates: Vec<_> = ranked
            .into_iter()
            .filter(|(_, d)| d.stops_til == fewest_stops)
            .collect();

        if let [(car, _)] = candidates.as_slice() {
            return Some(Arc::clone(car));
        }

        // min_by_key keeps the first of equal elements
        candidates
            .into_iter()
            .min_by_key(|(_, d)| d.distance_from)
            .map(|(car, _)| Arc::clone(car))
    }
}
