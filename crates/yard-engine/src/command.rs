// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! # Line Protocol
//!
//! One command per line, tokens separated by whitespace:
//!
//! | line                              | response                         |
//! |-----------------------------------|----------------------------------|
//! | `create_parking_lot <cap> <limit>`| none                             |
//! | `delete_parking_lot <cap>`        | none                             |
//! | `add_truck <id> <cap>`            | lot capacity or `-1`             |
//! | `ready <cap>`                     | `<id> <lot>` or `-1`             |
//! | `count <cap>`                     | number of trucks                 |
//! | `load <cap> <amount>`             | `<id> <lot>` pairs joined by ` - `, or `-1` |

use crate::{
    err::AllocError,
    yard::{Promotion, Relocation, Yard},
};
use std::{fmt::Display, str::FromStr};
use tracing::error;
use yard_core::{Quantity, capacity::Capacity};
use yard_model::prelude::TruckId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command<T: Quantity> {
    CreateLot {
        capacity: Capacity<T>,
        truck_limit: usize,
    },
    DeleteLot {
        capacity: Capacity<T>,
    },
    AddTruck {
        id: TruckId,
        capacity: Capacity<T>,
    },
    Ready {
        capacity: Capacity<T>,
    },
    Count {
        capacity: Capacity<T>,
    },
    Load {
        capacity: Capacity<T>,
        amount: Capacity<T>,
    },
}

impl<T: Quantity> Command<T> {
    /// Protocol keyword of the command.
    pub fn name(&self) -> &'static str {
        match self {
            Command::CreateLot { .. } => "create_parking_lot",
            Command::DeleteLot { .. } => "delete_parking_lot",
            Command::AddTruck { .. } => "add_truck",
            Command::Ready { .. } => "ready",
            Command::Count { .. } => "count",
            Command::Load { .. } => "load",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParseCommandError {
    Empty,
    UnknownCommand(String),
    WrongArity {
        command: &'static str,
        expected: usize,
        found: usize,
    },
    InvalidNumber(String),
}

impl Display for ParseCommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseCommandError::Empty => write!(f, "Empty command line"),
            ParseCommandError::UnknownCommand(c) => write!(f, "Unknown command '{}'", c),
            ParseCommandError::WrongArity {
                command,
                expected,
                found,
            } => write!(
                f,
                "Command '{}' takes {} arguments, found {}",
                command, expected, found
            ),
            ParseCommandError::InvalidNumber(tok) => write!(f, "Invalid number '{}'", tok),
        }
    }
}

impl std::error::Error for ParseCommandError {}

fn quantity<T: Quantity>(tok: &str) -> Result<Capacity<T>, ParseCommandError> {
    T::from_str_radix(tok, 10)
        .map(Capacity::new)
        .map_err(|_| ParseCommandError::InvalidNumber(tok.to_owned()))
}

fn integer<N: FromStr>(tok: &str) -> Result<N, ParseCommandError> {
    tok.parse()
        .map_err(|_| ParseCommandError::InvalidNumber(tok.to_owned()))
}

impl<T: Quantity> FromStr for Command<T> {
    type Err = ParseCommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut tokens = line.split_whitespace();
        let keyword = tokens.next().ok_or(ParseCommandError::Empty)?;
        let args: Vec<&str> = tokens.collect();

        let (command, arity): (&'static str, usize) = match keyword {
            "create_parking_lot" => ("create_parking_lot", 2),
            "delete_parking_lot" => ("delete_parking_lot", 1),
            "add_truck" => ("add_truck", 2),
            "ready" => ("ready", 1),
            "count" => ("count", 1),
            "load" => ("load", 2),
            other => return Err(ParseCommandError::UnknownCommand(other.to_owned())),
        };
        if args.len() != arity {
            return Err(ParseCommandError::WrongArity {
                command,
                expected: arity,
                found: args.len(),
            });
        }

        Ok(match command {
            "create_parking_lot" => Command::CreateLot {
                capacity: quantity(args[0])?,
                truck_limit: integer(args[1])?,
            },
            "delete_parking_lot" => Command::DeleteLot {
                capacity: quantity(args[0])?,
            },
            "add_truck" => Command::AddTruck {
                id: TruckId::new(integer(args[0])?),
                capacity: quantity(args[1])?,
            },
            "ready" => Command::Ready {
                capacity: quantity(args[0])?,
            },
            "count" => Command::Count {
                capacity: quantity(args[0])?,
            },
            _ => Command::Load {
                capacity: quantity(args[0])?,
                amount: quantity(args[1])?,
            },
        })
    }
}

/// The line written back for a command.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Response<T: Quantity> {
    Placed(Capacity<T>),
    Promoted(Promotion<T>),
    Count(usize),
    Loaded(Vec<Relocation<T>>),
    Failed,
}

impl<T: Quantity> Response<T> {
    #[inline]
    pub fn is_failure(&self) -> bool {
        matches!(self, Response::Failed)
    }
}

impl<T: Quantity> Display for Response<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Response::Placed(lot) => write!(f, "{lot}"),
            Response::Promoted(p) => write!(f, "{p}"),
            Response::Count(n) => write!(f, "{n}"),
            Response::Loaded(moves) => {
                for (i, m) in moves.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" - ")?;
                    }
                    write!(f, "{m}")?;
                }
                Ok(())
            }
            Response::Failed => f.write_str("-1"),
        }
    }
}

fn respond<T: Quantity, R>(
    command: &'static str,
    result: Result<R, AllocError<T>>,
    ok: impl FnOnce(R) -> Response<T>,
) -> Response<T> {
    match result {
        Ok(r) => ok(r),
        Err(e) => {
            if !e.is_sentinel() {
                error!(command, error = %e, "Allocator state error");
            }
            Response::Failed
        }
    }
}

impl<T: Quantity> Yard<T> {
    /// Runs one command. Lot creation and deletion produce no response.
    pub fn execute(&mut self, command: Command<T>) -> Option<Response<T>> {
        let name = command.name();
        match command {
            Command::CreateLot {
                capacity,
                truck_limit,
            } => {
                self.create_lot(capacity, truck_limit);
                None
            }
            Command::DeleteLot { capacity } => {
                self.delete_lot(capacity);
                None
            }
            Command::AddTruck { id, capacity } => Some(respond(
                name,
                self.add_truck(id, capacity),
                |p| Response::Placed(p.lot()),
            )),
            Command::Ready { capacity } => Some(respond(
                name,
                self.advance_to_ready(capacity),
                Response::Promoted,
            )),
            Command::Count { capacity } => Some(Response::Count(self.count_at_least(capacity))),
            Command::Load { capacity, amount } => Some(respond(
                name,
                self.distribute_load(capacity, amount),
                Response::Loaded,
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CountBoundary, YardConfig};

    fn run(yard: &mut Yard<u64>, script: &str) -> Vec<String> {
        script
            .lines()
            .filter(|l| !l.trim().is_empty())
            .filter_map(|l| {
                let cmd: Command<u64> = l.parse().unwrap();
                yard.execute(cmd).map(|r| r.to_string())
            })
            .collect()
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            "create_parking_lot 10 2".parse::<Command<u64>>(),
            Ok(Command::CreateLot {
                capacity: Capacity::new(10),
                truck_limit: 2
            })
        );
        assert_eq!(
            "  add_truck   7 12 ".parse::<Command<u64>>(),
            Ok(Command::AddTruck {
                id: TruckId::new(7),
                capacity: Capacity::new(12)
            })
        );
        assert_eq!(
            "load 5 12".parse::<Command<u64>>(),
            Ok(Command::Load {
                capacity: Capacity::new(5),
                amount: Capacity::new(12)
            })
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<Command<u64>>(), Err(ParseCommandError::Empty));
        assert_eq!(
            "park 1".parse::<Command<u64>>(),
            Err(ParseCommandError::UnknownCommand("park".into()))
        );
        assert_eq!(
            "ready".parse::<Command<u64>>(),
            Err(ParseCommandError::WrongArity {
                command: "ready",
                expected: 1,
                found: 0
            })
        );
        assert_eq!(
            "count -3".parse::<Command<u64>>(),
            Err(ParseCommandError::InvalidNumber("-3".into()))
        );
        assert_eq!(
            "count 300".parse::<Command<u8>>(),
            Err(ParseCommandError::InvalidNumber("300".into()))
        );
    }

    #[test]
    fn test_fill_and_reject_scenario() {
        let mut yard = Yard::default();
        let out = run(
            &mut yard,
            "create_parking_lot 10 2
             add_truck 1 10
             add_truck 2 10
             add_truck 3 10",
        );
        assert_eq!(out, vec!["10", "10", "-1"]);
    }

    #[test]
    fn test_huge_truck_limit_is_accepted() {
        let mut yard = Yard::default();
        let out = run(
            &mut yard,
            "create_parking_lot 5 18446744073709551615
             add_truck 1 5
             add_truck 2 9
             ready 5
             count 0",
        );
        assert_eq!(out, vec!["5", "5", "1 5", "2"]);
        yard.validate().unwrap();
    }

    #[test]
    fn test_ready_scenario() {
        let mut yard = Yard::default();
        let out = run(
            &mut yard,
            "create_parking_lot 10 2
             add_truck 1 10
             ready 10
             ready 10",
        );
        assert_eq!(out, vec!["10", "1 10", "-1"]);
    }

    #[test]
    fn test_count_scenario() {
        let script = "create_parking_lot 5 3
             create_parking_lot 10 3
             add_truck 1 5
             add_truck 2 6
             add_truck 3 7
             add_truck 4 10
             add_truck 5 11
             add_truck 6 12
             count 5";

        let mut inclusive = Yard::default();
        assert_eq!(run(&mut inclusive, script).last().map(String::as_str), Some("6"));

        let mut exclusive = Yard::new(YardConfig {
            count_boundary: CountBoundary::Exclusive,
        });
        assert_eq!(run(&mut exclusive, script).last().map(String::as_str), Some("3"));
    }

    #[test]
    fn test_load_scenario() {
        let mut yard = Yard::default();
        let out = run(
            &mut yard,
            "create_parking_lot 5 2
             add_truck 1 12
             ready 5
             create_parking_lot 7 1
             create_parking_lot 3 1
             add_truck 2 3
             ready 3
             load 5 12
             load 1 12
             load 1 12",
        );
        // Truck 1 takes 5 units and, with 7 left, moves to lot 7. Truck 2 then
        // fills up exactly, is emptied and returns to lot 3.
        assert_eq!(out, vec!["5", "1 5", "3", "2 3", "1 7", "2 3", "-1"]);
    }

    #[test]
    fn test_load_output_joins_pairs() {
        let mut yard = Yard::default();
        let out = run(
            &mut yard,
            "create_parking_lot 3 2
             create_parking_lot 6 2
             add_truck 1 3
             add_truck 2 6
             ready 3
             ready 6
             load 1 100",
        );
        assert_eq!(out.last().map(String::as_str), Some("1 3 - 2 6"));
    }

    #[test]
    fn test_delete_and_recreate_are_silent() {
        let mut yard: Yard<u64> = Yard::default();
        let out = run(
            &mut yard,
            "delete_parking_lot 4
             create_parking_lot 4 1
             create_parking_lot 4 9
             delete_parking_lot 4
             delete_parking_lot 4
             count 0",
        );
        assert_eq!(out, vec!["0"]);
    }
}
