/*
 * Unit tests for the dispatcher
 *
 * The unit tests follows the Arrange, Act, Assert pattern.
 *
 * Tests:
 *  - test_dispatcher_floor_out_of_range
 *  - test_dispatcher_floor_already_assigned
 *  - test_dispatcher_all_idle
 *  - test_dispatcher_coincident_idle_cars
 *  - test_dispatcher_repeated_call
 *  - test_dispatcher_call_at_lobby
 *  - test_dispatcher_call_where_car_waits
 *  - test_dispatcher_fewest_stops_wins
 *  - test_dispatcher_busy_fleet
 *  - test_dispatcher_distance_tie_break
 *  - test_dispatcher_full_tie_takes_first
 *  - test_dispatcher_concurrent_calls
 */

/***************************************/
/*             Unit tests              */
/***************************************/
#[cfg(test)]
mod dispatcher_tests {
    use crate::config::ElevatorSettings;
    use crate::dispatcher::Dispatcher;
    use crate::elevator::Car;
    use crate::fleet::{CarRepository, InMemoryCarRepository};
    use crate::shared::DispatchError;
    use std::sync::Arc;
    use std::thread::spawn;

    // Three cars parked at floor 1 in a building spanning -1..=8
    fn setup_dispatcher() -> (Dispatcher, Arc<InMemoryCarRepository>) {
        let settings = ElevatorSettings {
            car_count: 3,
            min_floor: -1,
            max_floor: 8,
            lobby_floor: 1,
        };
        let repository = Arc::new(InMemoryCarRepository::new(&settings).unwrap());
        let dispatcher = Dispatcher::new(repository.clone(), settings.min_floor, settings.max_floor);

        (dispatcher, repository)
    }

    fn car(id: u8, floor: i8, stops: &[i8]) -> Arc<Car> {
        let car = Car::new(id, -10, 10, floor);
        for &stop in stops {
            car.add_stop(stop).unwrap();
        }
        Arc::new(car)
    }

    #[test]
    fn test_dispatcher_floor_out_of_range() {
        // Arrange
        let (dispatcher, repository) = setup_dispatcher();

        // Act
        let above = dispatcher.call(9);
        let below = dispatcher.call(-2);

        // Assert
        assert_eq!(
            above.unwrap_err(),
            DispatchError::FloorOutOfRange { floor: 9, min: -1, max: 8 }
        );
        assert_eq!(
            below.unwrap_err(),
            DispatchError::FloorOutOfRange { floor: -2, min: -1, max: 8 }
        );
        assert!(repository.get_all().iter().all(|car| car.stops().is_empty()));
    }

    #[test]
    fn test_dispatcher_floor_already_assigned() {
        // Arrange
        let (dispatcher, repository) = setup_dispatcher();
        repository.get_by_id(2).unwrap().add_stop(3).unwrap();

        // Act
        let car = dispatcher.call(3).unwrap();

        // Assert
        assert_eq!(car.id(), 2);
        assert_eq!(car.stops(), vec![3]);
        assert!(repository.get_by_id(1).unwrap().stops().is_empty());
        assert!(repository.get_by_id(3).unwrap().stops().is_empty());
    }

    #[test]
    fn test_dispatcher_all_idle() {
        // Arrange
        let (dispatcher, _repository) = setup_dispatcher();

        // Act
        let car_one = dispatcher.call(2).unwrap();
        let car_two = dispatcher.call(3).unwrap();
        let car_three = dispatcher.call(4).unwrap();

        // Assert
        assert_eq!(car_one.next_floor(), Some(2));
        assert_eq!(car_two.next_floor(), Some(3));
        assert_eq!(car_three.next_floor(), Some(4));
        assert_eq!(
            vec![car_one.id(), car_two.id(), car_three.id()],
            vec![1, 2, 3]
        );
    }

    #[test]
    fn test_dispatcher_coincident_idle_cars() {
        // Arrange
        let (dispatcher, _repository) = setup_dispatcher();
        let cars = vec![car(1, 2, &[]), car(2, 3, &[]), car(3, 4, &[])];

        for (floor, expected_id) in [(2, 1), (3, 2), (4, 3)] {
            // Act
            let assigned = dispatcher.call_car(floor, &cars).unwrap();

            // Assert
            assert_eq!(assigned.id(), expected_id);
            assert_eq!(assigned.current_floor(), floor);
        }
        assert!(cars.iter().all(|car| car.stops().is_empty()));
    }

    #[test]
    fn test_dispatcher_repeated_call() {
        // Arrange
        let (dispatcher, repository) = setup_dispatcher();

        // Act
        let first = dispatcher.call(2).unwrap();
        let second = dispatcher.call(3).unwrap();
        let repeated = dispatcher.call(2).unwrap();

        // Assert
        assert_ne!(first.id(), second.id());
        assert_eq!(first.id(), repeated.id());
        assert_eq!(repeated.stops(), vec![2]);
        assert_eq!(second.stops(), vec![3]);
        assert!(repository.get_by_id(3).unwrap().stops().is_empty());
    }

    #[test]
    fn test_dispatcher_call_at_lobby() {
        // Arrange
        let (dispatcher, repository) = setup_dispatcher();

        // Act
        let car = dispatcher.call(1).unwrap();

        // Assert
        assert_eq!(car.id(), 1);
        assert_eq!(car.next_floor(), None);
        assert!(repository.get_all().iter().all(|car| car.stops().is_empty()));
    }

    #[test]
    fn test_dispatcher_call_where_car_waits() {
        // Arrange
        let (dispatcher, repository) = setup_dispatcher();
        let moved = repository.get_by_id(2).unwrap();
        moved.add_stop(2).unwrap();
        moved.move_next();

        // Act
        let car = dispatcher.call(2).unwrap();

        // Assert
        assert_eq!(car.id(), 2);
        assert_eq!(car.current_floor(), 2);
        assert_eq!(car.next_floor(), None);
    }

    #[test]
    fn test_dispatcher_fewest_stops_wins() {
        // Arrange
        let (dispatcher, _repository) = setup_dispatcher();

        let car_one = dispatcher.call(1).unwrap();
        car_one.add_stop(2).unwrap();

        let car_two = dispatcher.call(-1).unwrap();
        car_two.add_stop(0).unwrap();

        let car_three = dispatcher.call(6).unwrap();

        // Act
        let assigned = dispatcher.call(3).unwrap();

        // Assert: car one is closer, but car three has no stops in the way
        assert_eq!(vec![car_one.id(), car_two.id(), car_three.id()], vec![1, 2, 3]);
        assert_eq!(assigned.id(), car_three.id());
        assert_eq!(car_three.stops(), vec![3, 6]);
    }

    #[test]
    fn test_dispatcher_busy_fleet() {
        // Arrange
        let (dispatcher, _repository) = setup_dispatcher();
        dispatcher.call(-1).unwrap();
        dispatcher.call(2).unwrap();
        let car_three = dispatcher.call(5).unwrap();

        // Act
        let assigned = dispatcher.call(4).unwrap();

        // Assert
        assert_eq!(assigned.id(), car_three.id());
        assert_eq!(car_three.stops(), vec![4, 5]);
    }

    #[test]
    fn test_dispatcher_distance_tie_break() {
        // Arrange
        let (dispatcher, _repository) = setup_dispatcher();
        let cars = vec![car(1, 0, &[2]), car(2, 4, &[6])];

        // Act
        let assigned = dispatcher.call_car(8, &cars).unwrap();

        // Assert: one stop each before floor 8, car two ends its route closer
        assert_eq!(assigned.id(), 2);
        assert_eq!(cars[1].stops(), vec![6, 8]);
        assert_eq!(cars[0].stops(), vec![2]);
    }

    #[test]
    fn test_dispatcher_full_tie_takes_first() {
        // Arrange
        let (dispatcher, _repository) = setup_dispatcher();
        let cars = vec![car(1, 0, &[2]), car(2, 0, &[2]), car(3, 4, &[6])];

        // Act
        let assigned = dispatcher.call_car(5, &cars).unwrap();

        // Assert
        assert_eq!(assigned.id(), 3);

        // Cars one and two rank equally for floor -1, car three has more stops
        let assigned = dispatcher.call_car(-1, &cars).unwrap();
        assert_eq!(assigned.id(), 1);
        assert_eq!(cars[0].stops(), vec![2, -1]);
        assert_eq!(cars[1].stops(), vec![2]);
    }

    #[test]
    fn test_dispatcher_concurrent_calls() {
        // Arrange
        let (dispatcher, repository) = setup_dispatcher();
        let dispatcher = Arc::new(dispatcher);

        // Act
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let dispatcher = Arc::clone(&dispatcher);
                spawn(move || dispatcher.call(5).unwrap().id())
            })
            .collect();
        let ids: Vec<u8> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        // Assert
        assert!(ids.iter().all(|&id| id == 1));
        assert_eq!(repository.get_by_id(1).unwrap().stops(), vec![5]);
        assert!(repository.get_by_id(2).unwrap().stops().is_empty());
        assert!(repository.get_by_id(3).unwrap().stops().is_empty());
    }
}
