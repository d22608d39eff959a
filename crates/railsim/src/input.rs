//! Plain-text simulation input.
//!
//! ```text
//! <num_stations>
//! <name>,<name>,...
//! <num_stations rows of num_stations costs, whitespace separated>
//! <popularity>,<popularity>,...
//! <green line stations, comma separated>
//! <yellow line stations>
//! <blue line stations>
//! <num_ticks>
//! <green trains>,<yellow trains>,<blue trains>
//! ```
//!
//! Blank lines are ignored. The result carries default seed, dwell and
//! worker settings; callers override them before building a simulation.

use std::fmt;
use std::io::Read;
use std::str::FromStr;

use railsim_engine::{ConfigError, DwellConfig, LineConfig, SimConfig};
use railsim_network::LineDef;

/// Names of the three lines, in input order.
pub const LINE_NAMES: [&str; 3] = ["green", "yellow", "blue"];

/// Errors from reading or parsing the input text.
#[derive(Debug)]
pub enum InputError {
    /// The input could not be read.
    Io(std::io::Error),
    /// The input ended while `expected` was still missing.
    UnexpectedEof {
        /// What was being read.
        expected: &'static str,
    },
    /// A token that should have been a number was not.
    BadNumber {
        /// 1-based line number in the input.
        line: usize,
        /// The offending token.
        token: String,
    },
    /// The station-name list does not match the declared station count.
    NameCount {
        /// Declared count.
        expected: usize,
        /// Names found.
        found: usize,
    },
    /// A cost matrix row has the wrong number of entries.
    MatrixWidth {
        /// 1-based line number in the input.
        line: usize,
        /// Required entries.
        expected: usize,
        /// Entries found.
        found: usize,
    },
    /// The parsed values do not form a valid configuration.
    Config(ConfigError),
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "failed to read input: {e}"),
            Self::UnexpectedEof { expected } => {
                write!(f, "input ended before {expected}")
            }
            Self::BadNumber { line, token } => {
                write!(f, "line {line}: '{token}' is not a valid number")
            }
            Self::NameCount { expected, found } => {
                write!(f, "expected {expected} station names, found {found}")
            }
            Self::MatrixWidth {
                line,
                expected,
                found,
            } => write!(
                f,
                "line {line}: cost row has {found} entries, expected {expected}"
            ),
            Self::Config(e) => write!(f, "invalid configuration: {e}"),
        }
    }
}

impl std::error::Error for InputError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Config(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for InputError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<ConfigError> for InputError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

/// Non-blank lines with their 1-based line numbers.
struct Cursor<'a> {
    lines: std::vec::IntoIter<(usize, &'a str)>,
}

impl<'a> Cursor<'a> {
    fn new(text: &'a str) -> Self {
        let lines: Vec<_> = text
            .lines()
            .enumerate()
            .map(|(i, l)| (i + 1, l.trim()))
            .filter(|(_, l)| !l.is_empty())
            .collect();
        Self {
            lines: lines.into_iter(),
        }
    }

    fn next(&mut self, expected: &'static str) -> Result<(usize, &'a str), InputError> {
        self.lines.next().ok_or(InputError::UnexpectedEof { expected })
    }

    fn number<T: FromStr>(&mut self, expected: &'static str) -> Result<T, InputError> {
        let (line, text) = self.next(expected)?;
        parse_token(line, text)
    }

    fn list<T: FromStr>(&mut self, expected: &'static str) -> Result<Vec<T>, InputError> {
        let (line, text) = self.next(expected)?;
        split_commas(text).map(|t| parse_token(line, t)).collect()
    }
}

fn parse_token<T: FromStr>(line: usize, token: &str) -> Result<T, InputError> {
    token.parse().map_err(|_| InputError::BadNumber {
        line,
        token: token.to_string(),
    })
}

fn split_commas(text: &str) -> impl Iterator<Item = &str> {
    text.split(',').map(str::trim).filter(|t| !t.is_empty())
}

/// Parse a complete input text into a configuration.
///
/// Structural problems of the network itself (unknown stations, missing
/// link costs) are reported as [`InputError::Config`].
pub fn parse(text: &str) -> Result<SimConfig, InputError> {
    let mut cursor = Cursor::new(text);

    let num_stations: usize = cursor.number("the station count")?;
    let (_, names_line) = cursor.next("the station names")?;
    let names: Vec<String> = split_commas(names_line).map(str::to_string).collect();
    if names.len() != num_stations {
        return Err(InputError::NameCount {
            expected: num_stations,
            found: names.len(),
        });
    }

    let mut link_costs = Vec::with_capacity(num_stations);
    for _ in 0..num_stations {
        let (line, text) = cursor.next("the link cost matrix")?;
        let row = text
            .split_whitespace()
            .map(|t| parse_token(line, t))
            .collect::<Result<Vec<u32>, _>>()?;
        if row.len() != num_stations {
            return Err(InputError::MatrixWidth {
                line,
                expected: num_stations,
                found: row.len(),
            });
        }
        link_costs.push(row);
    }

    let popularity: Vec<f32> = cursor.list("the station popularity list")?;
    let stations = SimConfig::stations_from(names, &popularity)?;

    let mut defs = Vec::with_capacity(LINE_NAMES.len());
    for name in LINE_NAMES {
        let (_, text) = cursor.next("a line definition")?;
        defs.push(LineDef::new(name, split_commas(text)));
    }

    let ticks: u64 = cursor.number("the tick count")?;
    let trains: Vec<u32> = cursor.list("the train counts")?;
    let lines = LineConfig::zip(defs, &trains)?;

    let config = SimConfig {
        stations,
        link_costs,
        lines,
        ticks,
        seed: 0,
        dwell: DwellConfig::default(),
        workers: None,
    };
    config.validate()?;
    Ok(config)
}

/// Read all of `reader` and [`parse`] it.
pub fn read<R: Read>(mut reader: R) -> Result<SimConfig, InputError> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    parse(&text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use railsim_network::NetworkError;

    const SAMPLE: &str = "\
3
centre,east,west

0 3 2
3 0 0
2 0 0
1.0,0.5,2.0
west,centre,east
east,centre
centre,west
12
2,1,3
";

    #[test]
    fn parses_sample() {
        let config = parse(SAMPLE).unwrap();
        assert_eq!(config.stations.len(), 3);
        assert_eq!(config.stations[2].name, "west");
        assert_eq!(config.stations[1].popularity, 0.5);
        assert_eq!(config.link_costs[0], vec![0, 3, 2]);
        assert_eq!(config.lines[0].name, "green");
        assert_eq!(config.lines[0].stations, vec!["west", "centre", "east"]);
        assert_eq!(config.lines[2].name, "blue");
        assert_eq!(config.trains_per_line(), vec![2, 1, 3]);
        assert_eq!(config.ticks, 12);
        assert_eq!(config.workers, None);
    }

    #[test]
    fn truncated_input_names_missing_part() {
        let cut: String = SAMPLE.lines().take(8).collect::<Vec<_>>().join("\n");
        match parse(&cut) {
            Err(InputError::UnexpectedEof { expected }) => assert_eq!(expected, "a line definition"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn bad_number_reports_line() {
        let text = SAMPLE.replace("0 3 2", "0 x 2");
        match parse(&text) {
            Err(InputError::BadNumber { line, token }) => {
                assert_eq!(line, 4);
                assert_eq!(token, "x");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn short_matrix_row() {
        let text = SAMPLE.replace("3 0 0", "3 0");
        assert!(matches!(
            parse(&text),
            Err(InputError::MatrixWidth { expected: 3, found: 2, .. })
        ));
    }

    #[test]
    fn name_count_mismatch() {
        let text = SAMPLE.replace("centre,east,west", "centre,east");
        assert!(matches!(
            parse(&text),
            Err(InputError::NameCount { expected: 3, found: 2 })
        ));
    }

    #[test]
    fn missing_link_is_a_config_error() {
        let text = SAMPLE.replace("east,centre\n", "east,west\n");
        match parse(&text) {
            Err(InputError::Config(ConfigError::Network(NetworkError::MissingLinkCost { .. }))) => {}
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn train_count_mismatch() {
        let text = SAMPLE.replace("2,1,3", "2,1");
        assert!(matches!(
            parse(&text),
            Err(InputError::Config(ConfigError::TrainCountMismatch { .. }))
        ));
    }
}
