use pondus_domain::WeightUnit;
use serde::{Deserialize, Serialize};

#[allow(async_fn_in_trait)]
pub trait SettingsService {
    async fn get_settings(&self) -> Result<Settings, String>;
    async fn set_settings(&self, settings: Settings) -> Result<(), String>;
}

#[allow(async_fn_in_trait)]
pub trait SettingsRepository {
    async fn read_settings(&self) -> Result<Settings, String>;
    async fn write_settings(&self, settings: Settings) -> Result<(), String>;
}

/// The weight unit here is the process-wide preference. Exercise cards may
/// shadow it with a local override; that override never writes back.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    #[serde(with = "WeightUnitDef")]
    pub weight_unit: WeightUnit,
    pub show_rpe: bool,
    pub show_previous: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            weight_unit: WeightUnit::Kg,
            show_rpe: true,
            show_previous: true,
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(remote = "WeightUnit")]
enum WeightUnitDef {
    Kg,
    Lb,
}
