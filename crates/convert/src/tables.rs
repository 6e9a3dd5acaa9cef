//! The table catalogue: which CSVs are converted, their key columns, and the
//! cleaning steps applied to each.

use serde::Serialize;
use tracing::warn;

use crate::coerce::{self, Coerced};
use crate::error::ConvertError;
use crate::frame::{Column, Frame};

/// One cleaning step, applied in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Remove columns. Each must exist.
    Drop(&'static [&'static str]),
    /// Lenient numeric coercion, in place. Integer columns stay Int64 with
    /// nulls rather than widening to Float64 the way a dataframe NaN would,
    /// so e.g. `drivers.number` is written as a nullable int64.
    Numeric(&'static str),
    /// Lenient datetime coercion, in place.
    Datetime(&'static str),
    /// Lap-time strings to milliseconds. In place when `source == target`.
    LapTime {
        source: &'static str,
        target: &'static str,
    },
    /// `date + " " + time`, parsed as a datetime into a new column.
    CombineDatetime {
        date: &'static str,
        time: &'static str,
        target: &'static str,
    },
}

/// Counters collected while applying steps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StepStats {
    /// Values that were present in the CSV and became null through coercion.
    pub coerced_nulls: usize,
}

impl Step {
    pub fn apply(&self, frame: &mut Frame, stats: &mut StepStats) -> Result<(), ConvertError> {
        let (target, coerced) = match *self {
            Step::Drop(columns) => return frame.drop_columns(columns),
            Step::Numeric(column) => (column, coerce::to_numeric(&frame.require(column)?.data)),
            Step::Datetime(column) => (column, coerce::to_datetime(&frame.require(column)?.data)),
            Step::LapTime { source, target } => {
                (target, coerce::lap_times_to_millis(&frame.require(source)?.data))
            }
            Step::CombineDatetime { date, time, target } => (
                target,
                coerce::combine_datetime(&frame.require(date)?.data, &frame.require(time)?.data),
            ),
        };

        let Coerced { data, nulled } = coerced;
        if nulled > 0 {
            warn!(
                table = frame.table(),
                column = target,
                count = nulled,
                "Values coerced to null"
            );
        }
        stats.coerced_nulls += nulled;
        frame.put_column(Column::new(target, data))
    }
}

/// Conversion recipe for one CSV.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSpec {
    pub name: &'static str,
    pub index: &'static [&'static str],
    pub steps: &'static [Step],
}

impl TableSpec {
    pub fn source_file(&self) -> String {
        format!("{}.csv", self.name)
    }

    pub fn output_file(&self) -> String {
        format!("{}.parquet", self.name)
    }

    /// Set the index, then run every step. Returns the duplicate key count.
    pub fn apply(&self, frame: &mut Frame, stats: &mut StepStats) -> Result<usize, ConvertError> {
        let duplicates = frame.set_index(self.index)?;
        if duplicates > 0 {
            warn!(
                table = self.name,
                key = ?self.index,
                duplicates,
                "Duplicate index keys"
            );
        }
        for step in self.steps {
            step.apply(frame, stats)?;
        }
        Ok(duplicates)
    }

    pub fn by_name(name: &str) -> Option<&'static TableSpec> {
        TABLES.iter().find(|t| t.name == name)
    }
}

pub const TABLES: &[TableSpec] = &[
    TableSpec {
        name: "circuits",
        index: &["circuitId"],
        steps: &[Step::Numeric("alt")],
    },
    TableSpec {
        name: "constructor_results",
        index: &["constructorResultsId"],
        steps: &[],
    },
    TableSpec {
        name: "constructor_standings",
        index: &["raceId", "constructorId"],
        steps: &[Step::Drop(&["constructorStandingsId"])],
    },
    TableSpec {
        name: "constructors",
        index: &["constructorId"],
        steps: &[],
    },
    TableSpec {
        name: "driver_standings",
        index: &["driverStandingsId"],
        steps: &[],
    },
    TableSpec {
        name: "drivers",
        index: &["driverId"],
        steps: &[Step::Numeric("number"), Step::Datetime("dob")],
    },
    TableSpec {
        name: "lap_times",
        index: &["raceId", "driverId", "lap"],
        // Duplicates `milliseconds`.
        steps: &[Step::Drop(&["time"])],
    },
    TableSpec {
        name: "races",
        index: &["raceId"],
        steps: &[Step::CombineDatetime {
            date: "date",
            time: "time",
            target: "datetime",
        }],
    },
    TableSpec {
        name: "pit_stops",
        index: &["raceId", "driverId", "stop"],
        steps: &[Step::Drop(&["duration"])],
    },
    TableSpec {
        name: "qualifying",
        index: &["raceId", "driverId"],
        steps: &[
            Step::Drop(&["qualifyId"]),
            Step::LapTime { source: "q1", target: "q1" },
            Step::LapTime { source: "q2", target: "q2" },
            Step::LapTime { source: "q3", target: "q3" },
        ],
    },
    TableSpec {
        name: "results",
        index: &["raceId", "driverId"],
        steps: &[
            Step::Drop(&["resultId", "number", "positionText", "positionOrder", "time"]),
            Step::Numeric("position"),
            Step::Numeric("milliseconds"),
            Step::Numeric("fastestLap"),
            Step::Numeric("rank"),
            Step::LapTime {
                source: "fastestLapTime",
                target: "fastestLapMillis",
            },
        ],
    },
    TableSpec {
        name: "status",
        index: &["statusId"],
        steps: &[],
    },
];
