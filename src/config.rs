/***************************************/
/*        3rd party libraries          */
/***************************************/
use serde::Deserialize;
use std::fs;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::shared::DispatchError;

/***************************************/
/*       Public data structures        */
/***************************************/
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Config {
    pub elevator: ElevatorSettings,
    #[serde(default)]
    pub service: ServiceConfig,
}

/**
 * Building and fleet settings.
 *
 * # Fields
 * - `car_count`:       Number of cars in the building.
 * - `min_floor`:       Lowest floor, inclusive.
 * - `max_floor`:       Top floor, inclusive.
 * - `lobby_floor`:     Floor every car starts at. Must lie within the floor range.
 */
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ElevatorSettings {
    pub car_count: u8,
    pub min_floor: i8,
    pub max_floor: i8,
    pub lobby_floor: i8,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    #[serde(default = "default_worker_threads")]
    pub worker_threads: usize,
    /// Milliseconds a client waits for a worker's reply.
    #[serde(default = "default_reply_timeout")]
    pub reply_timeout: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        ServiceConfig {
            worker_threads: default_worker_threads(),
            reply_timeout: default_reply_timeout(),
        }
    }
}

fn default_worker_threads() -> usize {
    4
}

fn default_reply_timeout() -> u64 {
    1000
}

impl ElevatorSettings {
    pub fn validate(&self) -> Result<(), DispatchError> {
        if self.car_count < 1 {
            return Err(DispatchError::InvalidConfiguration(
                "CarCount must be greater than zero".to_string(),
            ));
        }

        if self.min_floor >= self.max_floor {
            return Err(DispatchError::InvalidConfiguration(
                "MinFloor must be less than MaxFloor".to_string(),
            ));
        }

        if self.lobby_floor < self.min_floor || self.lobby_floor > self.max_floor {
            return Err(DispatchError::InvalidConfiguration(
                "LobbyFloor must be between MinFloor and MaxFloor".to_string(),
            ));
        }

        Ok(())
    }
}

/***************************************/
/*             Public API              */
/***************************************/
pub fn load_config(path: &str) -> Result<Config, DispatchError> {
    let config_str = fs::read_to_string(path)
        .map_err(|e| DispatchError::Config(format!("failed to read {path}: {e}")))?;
    parse_config(&config_str)
}

pub fn parse_config(config_str: &str) -> Result<Config, DispatchError> {
    let mut config: Config = toml::from_str(config_str)?;
    config.elevator.validate()?;

    if config.service.worker_threads == 0 {
        config.service.worker_threads = 1;
    }

    Ok(config)
}

/***************************************/
/*             Unit tests              */
/***************************************/
#[cfg(test)]
mod config_tests {
    use super::*;

    fn settings(car_count: u8, min_floor: i8, max_floor: i8, lobby_floor: i8) -> ElevatorSettings {
        ElevatorSettings {
            car_count,
            min_floor,
            max_floor,
            lobby_floor,
        }
    }

    #[test]
    fn test_validate_accepts_valid_settings() {
        assert_eq!(settings(3, -1, 8, 1).validate(), Ok(()));
        assert_eq!(settings(1, 0, 1, 1).validate(), Ok(()));
    }

    #[test]
    fn test_validate_rejects_zero_cars() {
        // Arrange
        let settings = settings(0, 0, 1, 0);

        // Act
        let result = settings.validate();

        // Assert
        assert_eq!(
            result,
            Err(DispatchError::InvalidConfiguration(
                "CarCount must be greater than zero".to_string()
            ))
        );
    }

    #[test]
    fn test_validate_rejects_inverted_floor_range() {
        for (min_floor, max_floor) in [(1, 1), (2, 1)] {
            let result = settings(1, min_floor, max_floor, min_floor).validate();
            assert_eq!(
                result,
                Err(DispatchError::InvalidConfiguration(
                    "MinFloor must be less than MaxFloor".to_string()
                ))
            );
        }
    }

    #[test]
    fn test_validate_rejects_lobby_outside_range() {
        for lobby_floor in [-2, 9] {
            let result = settings(3, -1, 8, lobby_floor).validate();
            assert_eq!(
                result,
                Err(DispatchError::InvalidConfiguration(
                    "LobbyFloor must be between MinFloor and MaxFloor".to_string()
                ))
            );
        }
    }

    #[test]
    fn test_parse_config() {
        // Arrange
        let config_str = r#"
            [elevator]
            car_count = 3
            min_floor = -1
            max_floor = 8
            lobby_floor = 1

            [service]
            worker_threads = 0
            reply_timeout = 250
        "#;

        // Act
        let config = parse_config(config_str).unwrap();

        // Assert
        assert_eq!(config.elevator, settings(3, -1, 8, 1));
        assert_eq!(config.service.worker_threads, 1);
        assert_eq!(config.service.reply_timeout, 250);
    }

    #[test]
    fn test_parse_config_without_service_section() {
        let config = parse_config(
            "[elevator]\ncar_count = 1\nmin_floor = 0\nmax_floor = 1\nlobby_floor = 0\n",
        )
        .unwrap();

        assert_eq!(config.service, ServiceConfig::default());
    }

    #[test]
    fn test_parse_config_errors() {
        let missing_field = parse_config("[elevator]\ncar_count = 1\n");
        assert!(matches!(missing_field, Err(DispatchError::Config(_))));

        let invalid = parse_config(
            "[elevator]\ncar_count = 0\nmin_floor = 0\nmax_floor = 1\nlobby_floor = 0\n",
        );
        assert!(matches!(invalid, Err(DispatchError::InvalidConfiguration(_))));

        let missing_file = load_config("does/not/exist.toml");
        assert!(matches!(missing_file, Err(DispatchError::Config(_))));
    }
}
