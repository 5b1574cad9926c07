use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;

use super::{AttendanceStore, LogFilter, SettingsStore, StoreError};
use crate::model::attendance::{AttendanceLog, NewAttendanceLog};
use crate::model::settings::Settings;

/// Mock-mode event log, used when no database is configured.
#[derive(Default)]
pub struct MemoryAttendanceStore {
    logs: RwLock<Vec<AttendanceLog>>,
}

#[async_trait]
impl AttendanceStore for MemoryAttendanceStore {
    async fn insert(&self, new: NewAttendanceLog) -> Result<AttendanceLog, StoreError> {
        let log = new.into_log(Utc::now());
        self.logs.write().push(log.clone());
        Ok(log)
    }

    async fn query(&self, filter: &LogFilter) -> Result<Vec<AttendanceLog>, StoreError> {
        // newest insert first, so equal (date, time) pairs keep that order after the stable sort
        let mut logs: Vec<AttendanceLog> = self
            .logs
            .read()
            .iter()
            .rev()
            .filter(|log| filter.matches(log))
            .cloned()
            .collect();

        logs.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| b.time.cmp(&a.time)));

        if let Some(limit) = filter.limit {
            logs.truncate(limit as usize);
        }

        Ok(logs)
    }

    async fn count(&self) -> Result<u64, StoreError> {
        Ok(self.logs.read().len() as u64)
    }
}

#[derive(Default)]
pub struct MemorySettingsStore {
    settings: RwLock<Settings>,
}

#[async_trait]
impl SettingsStore for MemorySettingsStore {
    async fn get(&self) -> Result<Settings, StoreError> {
        Ok(*self.settings.read())
    }

    async fn put(&self, settings: &Settings) -> Result<(), StoreError> {
        *self.settings.write() = *settings;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::{parse_date, parse_time};

    fn new_log(name: &str, date: &str, time: &str) -> NewAttendanceLog {
        NewAttendanceLog {
            name: name.to_string(),
            date: parse_date(date).unwrap(),
            time: parse_time(time).unwrap(),
            kind: None,
        }
    }

    #[actix_web::test]
    async fn query_orders_newest_first_and_filters() {
        let store = MemoryAttendanceStore::default();
        store.insert(new_log("Ana", "2026-01-02", "09:00")).await.unwrap();
        store.insert(new_log("Ana", "2026-01-03", "08:00")).await.unwrap();
        store.insert(new_log("Bob", "2026-01-03", "10:00")).await.unwrap();
        store.insert(new_log("Ana", "2026-01-01", "17:00")).await.unwrap();

        let all = store.query(&LogFilter::all()).await.unwrap();
        let order: Vec<_> = all.iter().map(|l| (l.name.as_str(), l.date.to_string())).collect();
        assert_eq!(
            order,
            [
                ("Bob", "2026-01-03".to_string()),
                ("Ana", "2026-01-03".to_string()),
                ("Ana", "2026-01-02".to_string()),
                ("Ana", "2026-01-01".to_string()),
            ]
        );

        let start = parse_date("2026-01-02").unwrap();
        let end = parse_date("2026-01-03").unwrap();
        let ana = store
            .query(&LogFilter::between(start, end).employee("Ana"))
            .await
            .unwrap();
        assert_eq!(ana.len(), 2);

        let latest = store.query(&LogFilter::all().limit(1)).await.unwrap();
        assert_eq!(latest[0].name, "Bob");
        assert_eq!(store.count().await.unwrap(), 4);
    }

    #[actix_web::test]
    async fn settings_round_trip() {
        let store = MemorySettingsStore::default();
        assert_eq!(store.get().await.unwrap(), Settings::default());

        let mut updated = Settings::default();
        updated.merge([("standard_check_in", "08:15")]).unwrap();
        store.put(&updated).await.unwrap();

        assert_eq!(store.get().await.unwrap(), updated);
    }
}
