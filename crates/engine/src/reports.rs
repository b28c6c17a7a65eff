//! Read-only report engine.
//!
//! Scans the delivery collection and groups by status, client, and time
//! window. Every value aggregate sums the stored `total_value` field; it is
//! never recomputed from line items, so a record whose total disagrees with
//! its line items propagates that disagreement into every report.
//!
//! Client names are joined lazily at read time. A reference that no longer
//! resolves is reported under the [`CLIENT_NOT_FOUND`] sentinel rather than
//! failing the report.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use dispatch_core::{ClientId, DeliveryStatus, ReportPeriod};

use crate::clients::ClientRegistry;
use crate::error::{EngineError, Result};
use crate::models::Delivery;
use crate::store::MemoryStore;

/// Sentinel client name for stale references.
pub const CLIENT_NOT_FOUND: &str = "client not found";

/// How many clients the statistics breakdown keeps.
const STATISTICS_TOP_CLIENTS: usize = 10;

/// How many clients the performance report keeps.
const PERFORMANCE_TOP_CLIENTS: usize = 5;

/// Count and value sum for one status.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusBreakdown {
    pub status: DeliveryStatus,
    pub count: u64,
    pub value_sum: Decimal,
}

/// Count and value sum for one client, annotated with the resolved name or
/// the [`CLIENT_NOT_FOUND`] sentinel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientBreakdown {
    pub client: ClientId,
    pub client_name: String,
    pub count: u64,
    pub value_sum: Decimal,
}

/// Per-status counts, zero-filled for all four statuses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCounts {
    pub scheduled: u64,
    pub in_transit: u64,
    pub delivered: u64,
    pub canceled: u64,
}

impl StatusCounts {
    fn record(&mut self, status: DeliveryStatus) {
        match status {
            DeliveryStatus::Scheduled => self.scheduled += 1,
            DeliveryStatus::InTransit => self.in_transit += 1,
            DeliveryStatus::Delivered => self.delivered += 1,
            DeliveryStatus::Canceled => self.canceled += 1,
        }
    }

    /// The count for one status.
    #[must_use]
    pub const fn get(&self, status: DeliveryStatus) -> u64 {
        match status {
            DeliveryStatus::Scheduled => self.scheduled,
            DeliveryStatus::InTransit => self.in_transit,
            DeliveryStatus::Delivered => self.delivered,
            DeliveryStatus::Canceled => self.canceled,
        }
    }

    /// Sum over all four statuses.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.scheduled + self.in_transit + self.delivered + self.canceled
    }
}

/// Dashboard statistics over an optional date window.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub total_count: u64,
    pub total_value: Decimal,
    /// One entry per status, zero-filled, in enum declaration order.
    pub per_status: Vec<StatusBreakdown>,
    /// Top clients by value sum descending; ties keep record order.
    pub per_client: Vec<ClientBreakdown>,
}

/// A delivery row joined with the client name only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamedDelivery {
    pub delivery: Delivery,
    /// `None` when the reference no longer resolves.
    pub client_name: Option<String>,
}

/// Report over a required date window.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodReport {
    pub total_count: u64,
    pub total_value: Decimal,
    pub per_status_counts: StatusCounts,
    /// Matched deliveries, newest scheduled date first.
    pub deliveries: Vec<NamedDelivery>,
}

/// Short client projection used in report headers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientRef {
    pub id: ClientId,
    pub name: String,
}

/// Per-client report over an optional date window.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientReport {
    pub client: ClientRef,
    pub total_count: u64,
    pub total_value: Decimal,
    pub per_status_counts: StatusCounts,
    /// The client's deliveries, newest scheduled date first.
    pub deliveries: Vec<Delivery>,
}

/// Rolling-window performance report.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceReport {
    pub period: ReportPeriod,
    pub window_start: DateTime<Utc>,
    pub window_end: DateTime<Utc>,
    pub total_count: u64,
    pub total_value: Decimal,
    pub per_status_counts: StatusCounts,
    /// Top clients by value sum descending; ties keep record order.
    pub top_clients: Vec<ClientBreakdown>,
}

/// Read-only aggregation over the shared record store.
///
/// Reports are full-collection rescans with no snapshot isolation; a scan
/// may observe records modified concurrently, which is acceptable.
#[derive(Debug, Clone)]
pub struct ReportEngine {
    store: MemoryStore,
    clients: ClientRegistry,
}

impl ReportEngine {
    /// Create a report engine over the shared store.
    #[must_use]
    pub fn new(store: MemoryStore) -> Self {
        let clients = ClientRegistry::new(store.clone());
        Self { store, clients }
    }

    /// Dashboard statistics, optionally bounded by an inclusive scheduled
    /// date window.
    ///
    /// The per-status counts always sum to `total_count`; per-client keeps
    /// the top ten clients by value sum.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Store`] on store failure.
    #[instrument(skip(self))]
    pub fn statistics(
        &self,
        date_from: Option<DateTime<Utc>>,
        date_to: Option<DateTime<Utc>>,
    ) -> Result<Statistics> {
        let matched = self.matched(date_from, date_to)?;

        let per_status = DeliveryStatus::ALL
            .into_iter()
            .map(|status| {
                let rows = matched.iter().filter(|d| d.status == status);
                StatusBreakdown {
                    status,
                    count: rows.clone().count() as u64,
                    value_sum: rows.map(|d| d.total_value).sum(),
                }
            })
            .collect();

        let per_client = self.rank_clients(&matched, STATISTICS_TOP_CLIENTS)?;

        Ok(Statistics {
            total_count: matched.len() as u64,
            total_value: matched.iter().map(|d| d.total_value).sum(),
            per_status,
            per_client,
        })
    }

    /// Deliveries and totals over a required date window.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Validation`] when either bound is missing.
    #[instrument(skip(self))]
    pub fn period_report(
        &self,
        date_from: Option<DateTime<Utc>>,
        date_to: Option<DateTime<Utc>>,
    ) -> Result<PeriodReport> {
        let (Some(from), Some(to)) = (date_from, date_to) else {
            return Err(EngineError::validation(
                "period report requires both dateFrom and dateTo",
            ));
        };

        let mut matched = self.matched(Some(from), Some(to))?;
        matched.sort_by(|a, b| b.scheduled_date.cmp(&a.scheduled_date));

        let mut per_status_counts = StatusCounts::default();
        let mut total_value = Decimal::ZERO;
        for delivery in &matched {
            per_status_counts.record(delivery.status);
            total_value += delivery.total_value;
        }

        let deliveries = matched
            .into_iter()
            .map(|delivery| {
                let client_name = self.clients.resolve(delivery.client)?.map(|c| c.name);
                Ok(NamedDelivery {
                    delivery,
                    client_name,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(PeriodReport {
            total_count: deliveries.len() as u64,
            total_value,
            per_status_counts,
            deliveries,
        })
    }

    /// Per-client report over an optional date window.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NotFound`] when the client id does not
    /// resolve; never an empty-but-successful report.
    #[instrument(skip(self))]
    pub fn client_report(
        &self,
        client_id: ClientId,
        date_from: Option<DateTime<Utc>>,
        date_to: Option<DateTime<Utc>>,
    ) -> Result<ClientReport> {
        let client = self
            .clients
            .resolve(client_id)?
            .ok_or_else(|| EngineError::not_found("client not found"))?;

        let mut matched: Vec<Delivery> = self
            .matched(date_from, date_to)?
            .into_iter()
            .filter(|d| d.client == client_id)
            .collect();
        matched.sort_by(|a, b| b.scheduled_date.cmp(&a.scheduled_date));

        let mut per_status_counts = StatusCounts::default();
        let mut total_value = Decimal::ZERO;
        for delivery in &matched {
            per_status_counts.record(delivery.status);
            total_value += delivery.total_value;
        }

        Ok(ClientReport {
            client: ClientRef {
                id: client.id,
                name: client.name,
            },
            total_count: matched.len() as u64,
            total_value,
            per_status_counts,
            deliveries: matched,
        })
    }

    /// Performance over a rolling window ending now.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Store`] on store failure.
    pub fn performance_report(&self, period: ReportPeriod) -> Result<PerformanceReport> {
        self.performance_report_at(period, Utc::now())
    }

    /// Performance over the rolling window `[now - period, now]` for an
    /// explicit `now`, useful for pinned-time callers and tests.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Store`] on store failure.
    #[instrument(skip(self))]
    pub fn performance_report_at(
        &self,
        period: ReportPeriod,
        now: DateTime<Utc>,
    ) -> Result<PerformanceReport> {
        let window_start = period.window_start(now);
        let matched = self.matched(Some(window_start), Some(now))?;

        let mut per_status_counts = StatusCounts::default();
        let mut total_value = Decimal::ZERO;
        for delivery in &matched {
            per_status_counts.record(delivery.status);
            total_value += delivery.total_value;
        }

        let top_clients = self.rank_clients(&matched, PERFORMANCE_TOP_CLIENTS)?;

        Ok(PerformanceReport {
            period,
            window_start,
            window_end: now,
            total_count: matched.len() as u64,
            total_value,
            per_status_counts,
            top_clients,
        })
    }

    /// Deliveries inside the inclusive scheduled date window, in insertion
    /// order.
    fn matched(
        &self,
        date_from: Option<DateTime<Utc>>,
        date_to: Option<DateTime<Utc>>,
    ) -> Result<Vec<Delivery>> {
        Ok(self
            .store
            .deliveries
            .scan()?
            .into_iter()
            .filter(|d| {
                date_from.is_none_or(|from| d.scheduled_date >= from)
                    && date_to.is_none_or(|to| d.scheduled_date <= to)
            })
            .collect())
    }

    /// Group by client in first-appearance order, rank by value sum
    /// descending (stable, so ties keep natural record order), truncate to
    /// `limit`, then resolve names.
    fn rank_clients(&self, matched: &[Delivery], limit: usize) -> Result<Vec<ClientBreakdown>> {
        let mut groups: Vec<(ClientId, u64, Decimal)> = Vec::new();
        for delivery in matched {
            match groups.iter_mut().find(|(id, _, _)| *id == delivery.client) {
                Some((_, count, value_sum)) => {
                    *count += 1;
                    *value_sum += delivery.total_value;
                }
                None => groups.push((delivery.client, 1, delivery.total_value)),
            }
        }

        groups.sort_by(|a, b| b.2.cmp(&a.2));
        groups.truncate(limit);

        groups
            .into_iter()
            .map(|(client, count, value_sum)| {
                let client_name = self
                    .clients
                    .resolve(client)?
                    .map_or_else(|| CLIENT_NOT_FOUND.to_owned(), |c| c.name);
                Ok(ClientBreakdown {
                    client,
                    client_name,
                    count,
                    value_sum,
                })
            })
            .collect()
    }
}
