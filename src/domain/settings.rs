use crate::api::simulation_dto::{DEFAULT_NUM_CHANNELS, DEFAULT_NUM_CYCLES, DEFAULT_SLOTFRAME_LENGTH, DEFAULT_UPDATE_PERIOD, SettingsDto};
use crate::domain::simulator::simulator::Asn;
use crate::error::{Error, Result};

/// Validated simulation and scheduler parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimSettings {
    /// Number of channel offsets in the grid.
    pub num_channels: usize,

    /// Timeslots per slotframe; also the number of grid columns.
    pub slotframe_length: usize,

    /// Ticks between two runs of the link scheduler.
    pub update_period: Asn,

    /// Number of slotframe cycles to simulate.
    pub num_cycles: u64,

    /// Seed for the channel randomization. `None` draws one from the OS.
    pub rng_seed: Option<u64>,

    pub stats_file: Option<String>,
    pub schedule_file: Option<String>,
}

impl SimSettings {
    pub fn new(num_channels: i64, slotframe_length: i64, update_period: i64, num_cycles: i64) -> Result<Self> {
        Ok(Self {
            num_channels: positive("numChannels", num_channels)? as usize,
            slotframe_length: positive("slotframeLength", slotframe_length)? as usize,
            update_period: positive("updatePeriod", update_period)?,
            num_cycles: positive("numCycles", num_cycles)?,
            rng_seed: None,
            stats_file: None,
            schedule_file: None,
        })
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    /// ASN at which the simulation ends.
    pub fn end_asn(&self) -> Asn {
        self.num_cycles.saturating_mul(self.slotframe_length as u64)
    }
}

impl Default for SimSettings {
    fn default() -> Self {
        Self {
            num_channels: DEFAULT_NUM_CHANNELS as usize,
            slotframe_length: DEFAULT_SLOTFRAME_LENGTH as usize,
            update_period: DEFAULT_UPDATE_PERIOD as Asn,
            num_cycles: DEFAULT_NUM_CYCLES as u64,
            rng_seed: None,
            stats_file: None,
            schedule_file: None,
        }
    }
}

impl TryFrom<SettingsDto> for SimSettings {
    type Error = Error;

    fn try_from(dto: SettingsDto) -> Result<Self> {
        let mut settings = SimSettings::new(dto.num_channels, dto.slotframe_length, dto.update_period, dto.num_cycles)?;
        settings.rng_seed = dto.rng_seed;
        settings.stats_file = dto.stats_file;
        settings.schedule_file = dto.schedule_file;
        Ok(settings)
    }
}

fn positive(name: &str, value: i64) -> Result<u64> {
    if value <= 0 {
        return Err(Error::Configuration(format!("{} must be greater than 0, got {}.", name, value)));
    }
    Ok(value as u64)
}
