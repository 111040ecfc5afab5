//! # Arrival Schedule
//!
//! Input is one arrival per line, `"<time> Customer <id>"`, terminated by a line holding
//! only `<EOF>`. Lines that do not parse are skipped with a warning. The parsed schedule
//! is sorted by arrival time (stable, so equal times keep input order) and its earliest
//! time is the baseline the simulated clock starts from.

use std::io::{self, BufRead};
use thiserror::Error;
use tracing::warn;

use crate::model::{CustomerId, SimTime};

/// Marks the end of the arrival list.
pub const END_OF_INPUT: &str = "<EOF>";

/// A line that is not a valid arrival record.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ParseError {
    #[error("Malformed arrival {0:?}: expected `<time> Customer <id>`")]
    MalformedArrival(String),
}

/// One customer arriving at a simulated time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arrival {
    pub time: SimTime,
    pub customer: CustomerId,
}

/// Parses `"<time> Customer <id>"`. Anything after the id is ignored.
pub fn parse_arrival(line: &str) -> Result<Arrival, ParseError> {
    let malformed = || ParseError::MalformedArrival(line.trim_end().to_string());
    let mut tokens = line.split_whitespace();

    let time = tokens.next().and_then(|t| t.parse().ok()).ok_or_else(malformed)?;
    if tokens.next() != Some("Customer") {
        return Err(malformed());
    }
    let id = tokens.next().and_then(|t| t.parse().ok()).ok_or_else(malformed)?;

    Ok(Arrival {
        time,
        customer: CustomerId(id),
    })
}

/// Arrivals in replay order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schedule {
    arrivals: Vec<Arrival>,
}

impl Schedule {
    pub fn from_arrivals(mut arrivals: Vec<Arrival>) -> Self {
        arrivals.sort_by_key(|a| a.time);
        Self { arrivals }
    }

    /// Parses everything up to the `<EOF>` sentinel (or the end of `text`).
    pub fn parse(text: &str) -> Self {
        Self::from_lines(text.lines().map(str::to_string))
    }

    /// Reads and parses a schedule, stopping at the `<EOF>` sentinel.
    ///
    /// Nothing past the sentinel is read, so an interactive stream that stays open after
    /// `<EOF>` does not block.
    pub fn read(reader: impl BufRead) -> io::Result<Self> {
        let mut lines = Vec::new();
        for line in reader.lines() {
            let line = line?;
            if line.trim() == END_OF_INPUT {
                break;
            }
            lines.push(line);
        }
        Ok(Self::from_lines(lines))
    }

    fn from_lines(lines: impl IntoIterator<Item = String>) -> Self {
        let mut arrivals = Vec::new();
        for line in lines {
            if line.trim() == END_OF_INPUT {
                break;
            }
            match parse_arrival(&line) {
                Ok(arrival) => arrivals.push(arrival),
                Err(e) => warn!(error = %e, "Skipping input line"),
            }
        }
        Self::from_arrivals(arrivals)
    }

    pub fn arrivals(&self) -> &[Arrival] {
        &self.arrivals
    }

    pub fn len(&self) -> usize {
        self.arrivals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arrivals.is_empty()
    }

    /// Earliest arrival time, the simulated clock's starting point.
    pub fn baseline(&self) -> Option<SimTime> {
        self.arrivals.first().map(|a| a.time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_arrival() {
        assert_eq!(
            parse_arrival("12 Customer 7"),
            Ok(Arrival {
                time: 12,
                customer: CustomerId(7)
            })
        );
        assert_eq!(parse_arrival("  3   Customer 1 extra").map(|a| a.time), Ok(3));
        assert!(parse_arrival("12 Client 7").is_err());
        assert!(parse_arrival("soon Customer 7").is_err());
        assert!(parse_arrival("12 Customer").is_err());
        assert!(parse_arrival("").is_err());
    }

    #[test]
    fn test_schedule_stops_at_sentinel_and_skips_garbage() {
        let schedule = Schedule::parse(
            "5 Customer 2\nnot an arrival\n3 Customer 1\n5 Customer 3\n<EOF>\n1 Customer 9\n",
        );
        let ids: Vec<u32> = schedule.arrivals().iter().map(|a| a.customer.0).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(schedule.baseline(), Some(3));
    }

    #[test]
    fn test_read_from_buffer() {
        let input = io::Cursor::new("0 Customer 1\r\n<EOF>\r\n");
        let schedule = Schedule::read(input).unwrap();
        assert_eq!(schedule.len(), 1);

        let empty = Schedule::read(io::Cursor::new("<EOF>")).unwrap();
        assert!(empty.is_empty());
        assert_eq!(empty.baseline(), None);
    }

    /// A stream that errors on every read, like a terminal that is still open.
    struct StillOpen;

    impl io::Read for StillOpen {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::WouldBlock, "stdin still open"))
        }
    }

    #[test]
    fn test_read_stops_at_sentinel() {
        use std::io::Read;

        let input = io::BufReader::new(io::Cursor::new("0 Customer 1\n<EOF>\n").chain(StillOpen));
        let schedule = Schedule::read(input).unwrap();
        assert_eq!(schedule.len(), 1);
        assert_eq!(schedule.arrivals()[0].customer, CustomerId(1));

        // Without the sentinel the stream error surfaces.
        let unterminated = io::BufReader::new(io::Cursor::new("0 Customer 1\n").chain(StillOpen));
        assert_eq!(
            Schedule::read(unterminated).unwrap_err().kind(),
            io::ErrorKind::WouldBlock
        );
    }
}
