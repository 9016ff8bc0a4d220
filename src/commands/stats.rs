//! Statistics command
//!
//! Personal numbers come from the local history. Server-wide numbers are added
//! when a remote is configured and answers; otherwise they are left out.

use crate::game::{
    DailyRecord, DailyServerStats, PersonalStats, RemoteEvaluator, ServerStats, StateStore,
};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use tracing::warn;

/// Everything `sutom stats` shows
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StatsReport {
    pub personal: PersonalStats,
    pub server: Option<ServerStats>,
    /// Server results of the daily challenge on the requested date
    pub daily: Option<DailyServerStats>,
}

/// Compute daily-challenge statistics from the stored history, plus the
/// server's view when `remote` is given
///
/// # Errors
/// Returns an error if the history cannot be read. Remote failures are
/// logged and leave the server sections empty.
pub fn collect_stats(
    store: &dyn StateStore,
    remote: Option<&dyn RemoteEvaluator>,
    date: NaiveDate,
) -> Result<StatsReport> {
    let history = store.load_history().context("Failed to read history")?;
    let records: Vec<DailyRecord> = history.into_values().collect();
    let personal = PersonalStats::from_history(&records);

    let Some(remote) = remote else {
        return Ok(StatsReport {
            personal,
            ..StatsReport::default()
        });
    };

    let server = remote
        .server_stats()
        .inspect_err(|err| warn!(error = %err, "server statistics unavailable"))
        .ok();
    let daily = remote
        .daily_stats(date)
        .inspect_err(|err| warn!(error = %err, %date, "daily statistics unavailable"))
        .ok();

    Ok(StatsReport {
        personal,
        server,
        daily,
    })
}
