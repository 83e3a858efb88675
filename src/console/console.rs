/***************************************/
/*        3rd party libraries          */
/***************************************/
use log::info;
use std::io::{self, BufRead, Write};

/***************************************/
/*           Local modules             */
/***************************************/
use crate::service::{Reply, Request, ServiceClient};
use crate::shared::{CarResponse, DispatchError};

/***************************************/
/*               Enums                 */
/***************************************/
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Send(Request),
    Help,
    Quit,
}

const HELP: &str = "commands: get <car> | stop <car> <floor> | move <car> | call <floor> | help | quit";

/***************************************/
/*             Public API              */
/***************************************/
/// Parses one console line. Blank lines parse to `None`.
pub fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let words: Vec<&str> = line.split_whitespace().collect();

    let command = match words.as_slice() {
        [] => return Ok(None),
        ["get", car] => Command::Send(Request::GetCar(parse_arg(car, "car")?)),
        ["stop", car, floor] => Command::Send(Request::AddStop {
            car_id: parse_arg(car, "car")?,
            floor: parse_arg(floor, "floor")?,
        }),
        ["move", car] => Command::Send(Request::MoveCar(parse_arg(car, "car")?)),
        ["call", floor] => Command::Send(Request::CallCar(parse_arg(floor, "floor")?)),
        ["help"] => Command::Help,
        ["quit"] | ["exit"] => Command::Quit,
        _ => return Err(format!("unknown command '{}'", line.trim())),
    };

    Ok(Some(command))
}

/// Renders a reply as one output line: the car as JSON, or the error with its status.
pub fn format_reply(reply: &Reply) -> String {
    match reply {
        Ok(car) => match serde_json::to_string(car) {
            Ok(json) => json,
            Err(e) => format!("error 500: {e}"),
        },
        Err(e) => format!("error {}: {}", e.status_code(), e),
    }
}

/// Reads commands from `input` until it ends or `quit` is entered.
pub fn run_console<R: BufRead, W: Write>(
    client: &ServiceClient,
    input: R,
    output: &mut W,
) -> io::Result<()> {
    writeln!(output, "{HELP}")?;

    for line in input.lines() {
        match parse_command(&line?) {
            Ok(Some(Command::Send(request))) => {
                writeln!(output, "{}", format_reply(&client.send(request)))?
            }
            Ok(Some(Command::Help)) => writeln!(output, "{HELP}")?,
            Ok(Some(Command::Quit)) => break,
            Ok(None) => {}
            Err(e) => writeln!(output, "{e}")?,
        }
    }

    Ok(())
}

/**
 * Scripted walk-through of a morning in the building.
 *
 * A person on floor 1 calls a car and rides it to floor 4, then a person on floor -1
 * calls a car. Every step prints the car the service answered with.
 */
pub fn run_demo<W: Write>(client: &ServiceClient, output: &mut W) -> Result<(), DispatchError> {
    let mut step = |title: &str, reply: Reply| -> Result<CarResponse, DispatchError> {
        info!("{}", title);
        let line = format_reply(&reply);
        writeln!(output, "{title}\n{line}\n")?;
        reply
    };

    let car = step("Person on floor 1 calls elevator ...", client.call_car(1))?;
    step(&format!("Retrieving car #{} status ...", car.id), client.get_car(car.id))?;
    step(&format!("Moving car #{} to next stop ...", car.id), client.move_car(car.id))?;
    step(
        &format!("Person in car #{} presses button for floor 4 ...", car.id),
        client.add_stop(car.id, 4),
    )?;
    step(&format!("Checking car #{} destinations ...", car.id), client.get_car(car.id))?;
    step(&format!("Moving car #{} to next stop ...", car.id), client.move_car(car.id))?;

    let second = step("Person on floor -1 calls elevator ...", client.call_car(-1))?;
    step(&format!("Checking car #{} status ...", second.id), client.get_car(second.id))?;
    step(&format!("Moving car #{} to next stop ...", second.id), client.move_car(second.id))?;

    Ok(())
}

fn parse_arg<T: std::str::FromStr>(word: &str, name: &str) -> Result<T, String> {
    word.parse()
        .map_err(|_| format!("invalid {name} '{word}'"))
}
