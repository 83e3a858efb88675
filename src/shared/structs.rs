/***************************************/
/*        3rd party libraries          */
/***************************************/
use serde::Deserialize;
use serde::Serialize;

/***************************************/
/*       Public data structures        */
/***************************************/
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Idle,
    Ascending,
    Descending,
}

/**
 * How far a car is from a floor, measured in the two signals the dispatcher ranks by.
 *
 * - `stops_til`:       Pending stops the car honours before it passes the floor.
 * - `distance_from`:   Floors between the floor and the point where the car's route
 *                      reaches it.
 */
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarDistance {
    #[serde(rename = "stopsTil")]
    pub stops_til: usize,
    #[serde(rename = "distanceFrom")]
    pub distance_from: u32,
}

impl CarDistance {
    pub fn new(stops_til: usize, distance_from: u32) -> CarDistance {
        CarDistance {
            stops_til,
            distance_from,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CarResponse {
    pub id: u8,
    #[serde(rename = "nextFloor")]
    pub next_floor: Option<i8>,
    #[serde(rename = "currentFloor")]
    pub current_floor: i8,
    pub stops: Vec<i8>,
}
