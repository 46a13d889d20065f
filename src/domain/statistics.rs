use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{self, Write};

use crate::domain::network::network::Network;
use crate::domain::scheduler::schedule_entry::Direction;
use crate::error::{Error, Result};

/// Each event consists of a set of key-value-pairs with the measured data of one slotframe cycle.
/// This enum specifies all allowed keys and thus the columns in the output file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatParameter {
    /// Slotframe cycle index since simulation start.
    Cycle,

    /// Absolute slot number at which the row was recorded.
    Asn,

    /// Number of links created by the last scheduler run.
    Links,

    /// Total demand (cells requested) of the last scheduler run.
    TotalDemand,

    /// Grid cells occupied by the last scheduler run.
    CellsPlaced,

    /// Share of grid cells occupied by the last scheduler run.
    Utilization,

    /// Demand units that found no cell in the last scheduler run.
    UnmetDemand,

    /// Motes holding at least one scheduled cell.
    ActiveMotes,

    /// TX cells sharing `(timeslot, channel)` with another TX cell.
    ScheduleCollisions,
}

impl StatParameter {
    /// Column order of the CSV output.
    pub const ALL: [StatParameter; 9] = [
        StatParameter::Cycle,
        StatParameter::Asn,
        StatParameter::Links,
        StatParameter::TotalDemand,
        StatParameter::CellsPlaced,
        StatParameter::Utilization,
        StatParameter::UnmetDemand,
        StatParameter::ActiveMotes,
        StatParameter::ScheduleCollisions,
    ];

    pub fn header(&self) -> &'static str {
        match self {
            StatParameter::Cycle => "Cycle",
            StatParameter::Asn => "Asn",
            StatParameter::Links => "Links",
            StatParameter::TotalDemand => "TotalDemand",
            StatParameter::CellsPlaced => "CellsPlaced",
            StatParameter::Utilization => "Utilization",
            StatParameter::UnmetDemand => "UnmetDemand",
            StatParameter::ActiveMotes => "ActiveMotes",
            StatParameter::ScheduleCollisions => "ScheduleCollisions",
        }
    }

    pub fn headers() -> Vec<&'static str> {
        Self::ALL.iter().map(StatParameter::header).collect()
    }
}

/// Store values in their native format, only format them when writing to the CSV.
#[derive(Debug, Clone, PartialEq)]
pub enum StatValue {
    Integer(i64),
    Float(f64),
}

impl From<u64> for StatValue {
    fn from(v: u64) -> Self {
        StatValue::Integer(v as i64)
    }
}

impl From<usize> for StatValue {
    fn from(v: usize) -> Self {
        StatValue::Integer(v as i64)
    }
}

impl From<f64> for StatValue {
    fn from(v: f64) -> Self {
        StatValue::Float(v)
    }
}

impl StatValue {
    fn to_field(&self) -> String {
        match self {
            StatValue::Integer(i) => i.to_string(),
            StatValue::Float(f) => format!("{:.3}", f),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct StatisticEvent {
    data: HashMap<StatParameter, StatValue>,
}

impl StatisticEvent {
    pub fn new() -> Self {
        Self { data: HashMap::new() }
    }

    pub fn set<V: Into<StatValue>>(&mut self, param: StatParameter, value: V) -> &mut Self {
        self.data.insert(param, value.into());
        self
    }

    pub fn get(&self, param: StatParameter) -> Option<&StatValue> {
        self.data.get(&param)
    }
}

/// Writes one `;`-separated CSV row per statistic event. Missing values are written as `NA`.
pub struct StatsCollector<W: Write> {
    writer: csv::Writer<W>,
}

impl StatsCollector<Box<dyn Write>> {
    /// Opens `filename` or falls back to stdout and writes the header row.
    pub fn open(filename: Option<&str>) -> Result<Self> {
        StatsCollector::from_writer(open_output(filename)?)
    }
}

impl<W: Write> StatsCollector<W> {
    pub fn from_writer(writer: W) -> Result<Self> {
        let mut writer = csv::WriterBuilder::new().delimiter(b';').from_writer(writer);
        writer.write_record(StatParameter::headers())?;

        Ok(Self { writer })
    }

    pub fn add_event(&mut self, event: &StatisticEvent) -> Result<()> {
        let row: Vec<String> = StatParameter::ALL.iter().map(|param| event.get(*param).map(StatValue::to_field).unwrap_or_else(|| "NA".to_string())).collect();

        self.writer.write_record(&row)?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> Result<W> {
        self.writer.into_inner().map_err(|e| Error::IoError(e.into_error()))
    }
}

/// Counts TX cells that reuse a `(timeslot, channel)` pair already used by another TX cell.
pub fn count_schedule_collisions(network: &Network) -> u64 {
    let mut tx_cells: HashSet<(usize, usize)> = HashSet::new();
    let mut collisions = 0;

    for mote in network.motes() {
        for entry in mote.schedule().iter().filter(|entry| entry.direction == Direction::Tx) {
            if !tx_cells.insert((entry.timeslot, entry.channel)) {
                collisions += 1;
            }
        }
    }

    collisions
}

/// Number of motes holding at least one scheduled cell.
pub fn count_active_motes(network: &Network) -> usize {
    network.motes().filter(|mote| !mote.schedule().is_empty()).count()
}

/// Dumps every mote's schedule as `;`-separated rows `MoteId;Timeslot;Channel;Direction;Neighbor`.
pub fn write_schedule<W: Write>(network: &Network, writer: W) -> Result<()> {
    let mut csv_wtr = csv::WriterBuilder::new().delimiter(b';').from_writer(writer);

    csv_wtr.write_record(["MoteId", "Timeslot", "Channel", "Direction", "Neighbor"])?;

    for mote in network.motes() {
        let mut entries = mote.schedule().to_vec();
        entries.sort();

        for entry in entries {
            csv_wtr.write_record([
                mote.id.to_string(),
                entry.timeslot.to_string(),
                entry.channel.to_string(),
                entry.direction.to_string(),
                entry.neighbor.to_string(),
            ])?;
        }
    }

    csv_wtr.flush()?;
    Ok(())
}

/// Opens the output file, or stdout when no file name is given.
pub fn open_output(filename: Option<&str>) -> Result<Box<dyn Write>> {
    let writer: Box<dyn Write> = match filename {
        Some(f) => Box::new(File::create(f)?),
        None => Box::new(io::stdout()),
    };
    Ok(writer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::network::mote::Mote;
    use crate::domain::network::topology_trait::MoteTopology;
    use crate::domain::scheduler::schedule_entry::ScheduleEntry;
    use crate::domain::utils::id::MoteId;

    #[test]
    fn rows_follow_the_header_and_fill_gaps_with_na() {
        let mut collector = StatsCollector::from_writer(Vec::new()).unwrap();

        let mut event = StatisticEvent::new();
        event.set(StatParameter::Cycle, 3u64).set(StatParameter::Utilization, 0.5).set(StatParameter::ScheduleCollisions, 0usize);
        collector.add_event(&event).unwrap();

        let output = String::from_utf8(collector.into_inner().unwrap()).unwrap();
        let rows: Vec<&str> = output.lines().collect();

        assert_eq!(rows[0], StatParameter::headers().join(";"));
        assert_eq!(rows[1], "3;NA;NA;NA;NA;0.500;NA;NA;0");
    }

    #[test]
    fn shared_tx_cell_counts_as_collision() {
        let mote = |id: u32| Mote::new(MoteId::new(id), id, vec![MoteId::new(0)], 1, false);
        let mut network = Network::new(vec![mote(0), mote(1), mote(2)]).unwrap();

        network.assign_schedule(MoteId::new(1), vec![ScheduleEntry::new(4, Direction::Tx, MoteId::new(0), 2)], 10).unwrap();
        network.assign_schedule(MoteId::new(2), vec![ScheduleEntry::new(4, Direction::Tx, MoteId::new(0), 2)], 10).unwrap();

        assert_eq!(count_schedule_collisions(&network), 1);
        assert_eq!(count_active_motes(&network), 2);
    }
}
