use chrono::{DateTime, Utc};

use crate::models::{SkyCondition, SoilHourly, SoilSnapshot};

// WMO weather interpretation codes, grouped the way the forecast card shows them.
pub fn condition_for_code(code: u16) -> SkyCondition {
    match code {
        95.. => SkyCondition::Thunderstorm,
        80..=94 => SkyCondition::Showers,
        61..=79 => SkyCondition::Rain,
        51..=60 => SkyCondition::Drizzle,
        4..=50 => SkyCondition::Cloudy,
        3 => SkyCondition::Overcast,
        2 => SkyCondition::PartlyCloudy,
        1 => SkyCondition::MainlyClear,
        0 => SkyCondition::ClearSky,
    }
}

pub fn first_hour_after(times: &[DateTime<Utc>], now: DateTime<Utc>) -> Option<usize> {
    times.iter().position(|time| *time > now)
}

impl SoilHourly {
    pub fn snapshot_at(&self, now: DateTime<Utc>) -> Option<SoilSnapshot> {
        let index = first_hour_after(&self.time, now)?;

        Some(SoilSnapshot {
            at: self.time[index],
            moisture_0_1cm: self.soil_moisture_0_to_1cm.get(index).copied()?,
            moisture_1_3cm: self.soil_moisture_1_to_3cm.get(index).copied()?,
            surface_temp_c: self.soil_temperature_0cm.get(index).copied()?.round() as i32,
            temp_6cm_c: self.soil_temperature_6cm.get(index).copied()?.round() as i32,
        })
    }
}
