use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::stats::{StatsError, parse_time};

pub const KEY_STANDARD_CHECK_IN: &str = "standard_check_in";
pub const KEY_STANDARD_CHECK_OUT: &str = "standard_check_out";
pub const KEY_OVERTIME_THRESHOLD: &str = "overtime_threshold";

/// Global attendance rules. Persisted as key/value rows; missing keys fall
/// back to [`Settings::default`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Settings {
    /// Expected arrival time
    #[serde(with = "hhmm")]
    #[schema(value_type = String, example = "09:00")]
    pub standard_check_in: NaiveTime,

    /// Expected departure time
    #[serde(with = "hhmm")]
    #[schema(value_type = String, example = "17:00")]
    pub standard_check_out: NaiveTime,

    /// Check-outs later than this are capped here for overtime
    #[serde(rename = "overtime_threshold", with = "hhmm")]
    #[schema(value_type = String, example = "20:00")]
    pub overtime_cap: NaiveTime,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            standard_check_in: clock(9, 0),
            standard_check_out: clock(17, 0),
            overtime_cap: clock(20, 0),
        }
    }
}

fn clock(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN)
}

impl Settings {
    /// Builds settings from stored key/value pairs, starting from defaults.
    pub fn load_with_defaults<I, K, V>(pairs: I) -> Result<Self, StatsError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut settings = Settings::default();
        settings.merge(pairs)?;
        Ok(settings)
    }

    /// Overrides the fields named by `pairs`. Unknown keys and empty values
    /// are ignored; the first malformed time aborts without partial writes.
    pub fn merge<I, K, V>(&mut self, pairs: I) -> Result<(), StatsError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut next = *self;

        for (key, value) in pairs {
            let value = value.as_ref();
            if value.trim().is_empty() {
                continue;
            }

            let slot = match key.as_ref() {
                KEY_STANDARD_CHECK_IN => &mut next.standard_check_in,
                KEY_STANDARD_CHECK_OUT => &mut next.standard_check_out,
                KEY_OVERTIME_THRESHOLD => &mut next.overtime_cap,
                _ => continue,
            };
            *slot = truncate_seconds(parse_time(value)?);
        }

        *self = next;
        Ok(())
    }

    pub fn to_pairs(&self) -> [(&'static str, String); 3] {
        [
            (KEY_STANDARD_CHECK_IN, hhmm::format(self.standard_check_in)),
            (KEY_STANDARD_CHECK_OUT, hhmm::format(self.standard_check_out)),
            (KEY_OVERTIME_THRESHOLD, hhmm::format(self.overtime_cap)),
        ]
    }
}

fn truncate_seconds(time: NaiveTime) -> NaiveTime {
    time.with_second(0).unwrap_or(time)
}

mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn format(time: NaiveTime) -> String {
        time.format("%H:%M").to_string()
    }

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format(*time))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        crate::stats::parse_time(&raw)
            .map(super::truncate_seconds)
            .map_err(D::Error::custom)
    }
}
