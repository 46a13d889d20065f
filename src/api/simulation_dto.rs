use serde::Deserialize;

pub const DEFAULT_NUM_CHANNELS: i64 = 16;
pub const DEFAULT_SLOTFRAME_LENGTH: i64 = 100;
pub const DEFAULT_UPDATE_PERIOD: i64 = 10_000;
pub const DEFAULT_NUM_CYCLES: i64 = 10;

/// Root of a scenario file.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioDto {
    #[serde(default)]
    pub settings: SettingsDto,
    pub motes: Vec<MoteDto>,
}

/// Numeric fields are signed so that invalid values reach validation instead of failing
/// deserialization with a less helpful message.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsDto {
    #[serde(default = "default_num_channels")]
    pub num_channels: i64,
    #[serde(default = "default_slotframe_length")]
    pub slotframe_length: i64,
    #[serde(default = "default_update_period")]
    pub update_period: i64,
    #[serde(default = "default_num_cycles")]
    pub num_cycles: i64,
    #[serde(default)]
    pub rng_seed: Option<u64>,
    #[serde(default)]
    pub stats_file: Option<String>,
    #[serde(default)]
    pub schedule_file: Option<String>,
}

impl Default for SettingsDto {
    fn default() -> Self {
        Self {
            num_channels: DEFAULT_NUM_CHANNELS,
            slotframe_length: DEFAULT_SLOTFRAME_LENGTH,
            update_period: DEFAULT_UPDATE_PERIOD,
            num_cycles: DEFAULT_NUM_CYCLES,
            rng_seed: None,
            stats_file: None,
            schedule_file: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoteDto {
    pub id: u32,
    pub rank: u32,
    #[serde(default)]
    pub neighbors: Vec<u32>,
    #[serde(default)]
    pub packets_per_epoch: u32,
    #[serde(default)]
    pub is_root: bool,
}

fn default_num_channels() -> i64 {
    DEFAULT_NUM_CHANNELS
}

fn default_slotframe_length() -> i64 {
    DEFAULT_SLOTFRAME_LENGTH
}

fn default_update_period() -> i64 {
    DEFAULT_UPDATE_PERIOD
}

fn default_num_cycles() -> i64 {
    DEFAULT_NUM_CYCLES
}
