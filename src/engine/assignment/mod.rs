//! Vendor assignment matcher: trade filtering, time-slot overlap scoring,
//! and fair tie-broken selection of one primary plus up to two backups.

pub mod fairness;
pub mod slots;

#[cfg(test)]
mod tests;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::domain::Trade;
pub use fairness::{AtomicFairnessCounter, FairnessCounter, FixedCounter};
pub use slots::{DayPattern, SlotParseError, TenantSlot, TimeWindow};

/// At most one primary and two backups per assignment.
const MAX_ASSIGNED: usize = 3;
/// Tenants may express up to three preferred times.
const MAX_TENANT_SLOTS: usize = 3;

/// Service vendor as supplied by the caller's vendor pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vendor {
    pub vendor_id: String,
    pub company_name: String,
    pub primary_trade: String,
    #[serde(default)]
    pub availability: Vec<TimeWindow>,
    #[serde(default)]
    pub handles_emergency: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentRole {
    Primary,
    Backup,
}

impl AssignmentRole {
    pub const fn label(self) -> &'static str {
        match self {
            AssignmentRole::Primary => "primary",
            AssignmentRole::Backup => "backup",
        }
    }
}

/// One selected vendor with the literal tenant slots it can satisfy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignedVendor {
    pub vendor: Vendor,
    pub role: AssignmentRole,
    pub matched_times: Vec<String>,
}

/// Assignment outcome. An empty `assigned` with `total_available == 0`
/// means no vendor covers the trade; that is a normal result, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentResult {
    pub trade: String,
    pub total_available: usize,
    pub assigned: Vec<AssignedVendor>,
    pub warnings: Vec<String>,
}

/// Matcher over an injected fairness counter.
pub struct VendorMatcher<C> {
    counter: C,
}

impl Default for VendorMatcher<AtomicFairnessCounter> {
    fn default() -> Self {
        Self::with_counter(AtomicFairnessCounter::new())
    }
}

impl<C: FairnessCounter> VendorMatcher<C> {
    pub fn with_counter(counter: C) -> Self {
        Self { counter }
    }

    /// Filter by trade, score by tenant-slot overlap, rank, rotate tied
    /// groups by the fairness counter, and select up to three vendors.
    pub fn assign(
        &self,
        trade: &Trade,
        tenant_preferred_times: &[String],
        vendors: &[Vendor],
    ) -> AssignmentResult {
        let mut warnings = Vec::new();
        let slots = tokenize(tenant_preferred_times, &mut warnings);

        let pool = filter_by_trade(trade, vendors);
        let total_available = pool.len();
        if pool.is_empty() {
            tracing::debug!(trade = trade.as_str(), "no vendors cover trade");
            return AssignmentResult {
                trade: trade.as_str().to_string(),
                total_available: 0,
                assigned: Vec::new(),
                warnings,
            };
        }

        let mut scored: Vec<ScoredVendor<'_>> = pool
            .into_iter()
            .map(|vendor| {
                let matched_times: Vec<String> = slots
                    .iter()
                    .filter(|slot| vendor_matches_slot(vendor, slot))
                    .map(|slot| slot.original().to_string())
                    .collect();
                ScoredVendor {
                    vendor,
                    matched_times,
                }
            })
            .collect();

        // Stable by construction: equal counts keep pool order until the
        // rotation below.
        scored.sort_by(|a, b| b.matched_count().cmp(&a.matched_count()));
        rotate_tied_groups(&mut scored, self.counter.next());

        let assigned = scored
            .into_iter()
            .take(MAX_ASSIGNED)
            .enumerate()
            .map(|(rank, entry)| AssignedVendor {
                vendor: entry.vendor.clone(),
                role: if rank == 0 {
                    AssignmentRole::Primary
                } else {
                    AssignmentRole::Backup
                },
                matched_times: entry.matched_times,
            })
            .collect();

        AssignmentResult {
            trade: trade.as_str().to_string(),
            total_available,
            assigned,
            warnings,
        }
    }
}

struct ScoredVendor<'a> {
    vendor: &'a Vendor,
    matched_times: Vec<String>,
}

impl ScoredVendor<'_> {
    fn matched_count(&self) -> usize {
        self.matched_times.len()
    }
}

fn tokenize(tenant_preferred_times: &[String], warnings: &mut Vec<String>) -> Vec<TenantSlot> {
    if tenant_preferred_times.len() > MAX_TENANT_SLOTS {
        warnings.push(format!(
            "{} preferred times supplied, only the first {} are considered",
            tenant_preferred_times.len(),
            MAX_TENANT_SLOTS
        ));
    }

    tenant_preferred_times
        .iter()
        .take(MAX_TENANT_SLOTS)
        .filter_map(|raw| match slots::parse_tenant_slot(raw) {
            Ok(slot) => Some(slot),
            Err(err) => {
                tracing::warn!(slot = raw.as_str(), "dropping malformed tenant slot");
                warnings.push(err.to_string());
                None
            }
        })
        .collect()
}

/// Case-insensitive exact match on the primary trade; duplicate vendor ids
/// are dropped so the assignment can never repeat a vendor.
fn filter_by_trade<'a>(trade: &Trade, vendors: &'a [Vendor]) -> Vec<&'a Vendor> {
    let mut seen: HashSet<&str> = HashSet::new();
    vendors
        .iter()
        .filter(|vendor| trade.matches(&vendor.primary_trade))
        .filter(|vendor| seen.insert(vendor.vendor_id.as_str()))
        .collect()
}

fn vendor_matches_slot(vendor: &Vendor, slot: &TenantSlot) -> bool {
    match slot {
        // Emergency wildcard: any day, but only emergency-capable vendors,
        // regardless of their listed windows.
        TenantSlot::Emergency { .. } => vendor.handles_emergency,
        TenantSlot::Window { window, .. } => vendor
            .availability
            .iter()
            .any(|available| available.overlaps(window)),
    }
}

/// Rotate each run of equally-scored vendors left by the counter, so
/// repeated calls with identical inputs spread work across tied vendors
/// without ever promoting a worse-scored vendor above a better one.
fn rotate_tied_groups(scored: &mut [ScoredVendor<'_>], counter: u64) {
    let mut start = 0;
    while start < scored.len() {
        let count = scored[start].matched_count();
        let mut end = start + 1;
        while end < scored.len() && scored[end].matched_count() == count {
            end += 1;
        }
        let group = &mut scored[start..end];
        if group.len() > 1 {
            let offset = (counter % group.len() as u64) as usize;
            group.rotate_left(offset);
        }
        start = end;
    }
}
