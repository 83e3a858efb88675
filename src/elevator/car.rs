/***************************************/
/*        3rd party libraries          */
/***************************************/
use std::collections::BTreeSet;
use std::sync::{Mutex, MutexGuard};

/***************************************/
/*           Local modules             */
/***************************************/
use crate::shared::{CarDistance, CarResponse, DispatchError, Direction};

/**
 * One elevator car and its pending stops.
 *
 * The car serves stops in SCAN order: every stop in the current direction of travel is
 * served before the car turns around. Stops are filed into an ascending and a
 * descending set depending on where they lie relative to the car when they are added.
 *
 * All state sits behind one mutex, so a car can be shared between request threads as
 * an `Arc<Car>` and no caller ever sees a half-updated stop order.
 *
 * # Fields
 * - `id`:          Fleet-unique id, starting at 1.
 * - `min_floor`:   Lowest floor the car may stop at.
 * - `max_floor`:   Top floor the car may stop at.
 * - `queue`:       Current floor, direction and pending stops.
 */
#[derive(Debug)]
pub struct Car {
    id: u8,
    min_floor: i8,
    max_floor: i8,
    queue: Mutex<StopQueue>,
}

#[derive(Debug)]
struct StopQueue {
    current_floor: i8,
    direction: Direction,
    ascending: BTreeSet<i8>,
    descending: BTreeSet<i8>,
}

impl StopQueue {
    // Ascending set low to high, descending set high to low, current sweep first.
    fn stops(&self) -> Vec<i8> {
        let up = self.ascending.iter().copied();
        let down = self.descending.iter().rev().copied();

        match self.direction {
            Direction::Descending => down.chain(up).collect(),
            Direction::Idle | Direction::Ascending => up.chain(down).collect(),
        }
    }

    fn next_floor(&self) -> Option<i8> {
        match self.direction {
            Direction::Descending => self
                .descending
                .iter()
                .next_back()
                .or_else(|| self.ascending.iter().next())
                .copied(),
            Direction::Idle | Direction::Ascending => self
                .ascending
                .iter()
                .next()
                .or_else(|| self.descending.iter().next_back())
                .copied(),
        }
    }

    fn contains(&self, floor: i8) -> bool {
        self.ascending.contains(&floor) || self.descending.contains(&floor)
    }

    fn is_empty(&self) -> bool {
        self.ascending.is_empty() && self.descending.is_empty()
    }
}

impl Car {
    pub fn new(id: u8, min_floor: i8, max_floor: i8, initial_floor: i8) -> Car {
        Car {
            id,
            min_floor,
            max_floor,
            queue: Mutex::new(StopQueue {
                current_floor: initial_floor,
                direction: Direction::Idle,
                ascending: BTreeSet::new(),
                descending: BTreeSet::new(),
            }),
        }
    }

    pub fn id(&self) -> u8 {
        self.id
    }

    pub fn current_floor(&self) -> i8 {
        self.lock().current_floor
    }

    pub fn direction(&self) -> Direction {
        self.lock().direction
    }

    pub fn next_floor(&self) -> Option<i8> {
        self.lock().next_floor()
    }

    pub fn stops(&self) -> Vec<i8> {
        self.lock().stops()
    }

    pub fn has_stop(&self, floor: i8) -> bool {
        self.lock().contains(floor)
    }

    /// Observable state read under a single lock.
    pub fn snapshot(&self) -> CarResponse {
        let queue = self.lock();
        CarResponse {
            id: self.id,
            next_floor: queue.next_floor(),
            current_floor: queue.current_floor,
            stops: queue.stops(),
        }
    }

    /**
     * Adds `floor` to the car's pending stops.
     *
     * Adding the current floor or a floor that is already pending does nothing. An idle
     * car takes its direction from the first stop it gets.
     */
    pub fn add_stop(&self, floor: i8) -> Result<(), DispatchError> {
        if floor < self.min_floor || floor > self.max_floor {
            return Err(DispatchError::FloorOutOfRange {
                floor,
                min: self.min_floor,
                max: self.max_floor,
            });
        }

        let mut queue = self.lock();
        if floor == queue.current_floor || queue.contains(floor) {
            return Ok(());
        }

        let above = floor > queue.current_floor;
        if above {
            queue.ascending.insert(floor);
        } else {
            queue.descending.insert(floor);
        }

        if queue.direction == Direction::Idle {
            queue.direction = if above {
                Direction::Ascending
            } else {
                Direction::Descending
            };
        }

        Ok(())
    }

    /// Moves the car to its next stop. Does nothing when no stop is pending.
    pub fn move_next(&self) {
        let mut queue = self.lock();
        let Some(next) = queue.next_floor() else {
            return;
        };

        queue.current_floor = next;
        if !queue.ascending.remove(&next) {
            queue.descending.remove(&next);
        }

        if queue.is_empty() {
            queue.direction = Direction::Idle;
        }
    }

    /**
     * Measures how far `floor` lies along the car's route.
     *
     * The route is the current floor followed by the pending stops. The first leg that
     * passes `floor` decides the result: `stops_til` is the number of stops served
     * before that leg starts and `distance_from` the floors between the leg's start and
     * `floor`. A floor beyond every leg counts all stops and is measured from the last.
     */
    pub fn distance_from(&self, floor: i8) -> CarDistance {
        let queue = self.lock();

        if queue.direction == Direction::Idle || queue.current_floor == floor {
            return CarDistance::new(0, floor_gap(queue.current_floor, floor));
        }

        let mut route = Vec::with_capacity(queue.ascending.len() + queue.descending.len() + 1);
        route.push(queue.current_floor);
        route.extend(queue.stops());
        drop(queue);

        for (stops_til, leg) in route.windows(2).enumerate() {
            let (from, to) = (leg[0], leg[1]);
            if from.min(to) <= floor && floor <= from.max(to) {
                return CarDistance::new(stops_til, floor_gap(from, floor));
            }
        }

        // Route has at least one stop here since the car is not idle.
        let last = route[route.len() - 1];
        CarDistance::new(route.len() - 1, floor_gap(last, floor))
    }

    // Every critical section leaves the queue consistent, so a poisoned lock is safe to reuse.
    fn lock(&self) -> MutexGuard<'_, StopQueue> {
        self.queue
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl PartialEq for Car {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Car {}

fn floor_gap(a: i8, b: i8) -> u32 {
    (i32::from(a) - i32::from(b)).unsigned_abs()
}
