//! SLA resolver: severity-keyed response/resolution targets and the
//! business-hours calendar arithmetic that turns them into deadlines.

use chrono::{Datelike, Duration, NaiveDateTime, NaiveTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};

use super::domain::Severity;

/// Vendor tier eligibility attached to an SLA tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VendorTierRequirement {
    Any,
    StandardOrBetter,
}

impl VendorTierRequirement {
    pub const fn label(self) -> &'static str {
        match self {
            VendorTierRequirement::Any => "ANY",
            VendorTierRequirement::StandardOrBetter => "STANDARD_OR_BETTER",
        }
    }
}

/// Static SLA parameters for one severity tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlaSpec {
    pub tier: Severity,
    pub response_hours: u32,
    pub resolution_hours: u32,
    pub business_hours_only: bool,
    pub vendor_tier: VendorTierRequirement,
}

/// Pure lookup, independent of the numeric priority score.
pub const fn spec_for(severity: Severity) -> SlaSpec {
    match severity {
        Severity::Emergency => SlaSpec {
            tier: Severity::Emergency,
            response_hours: 4,
            resolution_hours: 24,
            business_hours_only: false,
            vendor_tier: VendorTierRequirement::Any,
        },
        Severity::High => SlaSpec {
            tier: Severity::High,
            response_hours: 24,
            resolution_hours: 48,
            business_hours_only: true,
            vendor_tier: VendorTierRequirement::StandardOrBetter,
        },
        Severity::Medium => SlaSpec {
            tier: Severity::Medium,
            response_hours: 48,
            resolution_hours: 120,
            business_hours_only: true,
            vendor_tier: VendorTierRequirement::Any,
        },
        Severity::Low => SlaSpec {
            tier: Severity::Low,
            response_hours: 72,
            resolution_hours: 168,
            business_hours_only: true,
            vendor_tier: VendorTierRequirement::Any,
        },
    }
}

/// Local business window used when a tier counts business hours only.
/// Weekends never count as business time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusinessCalendar {
    open_hour: u32,
    close_hour: u32,
}

impl Default for BusinessCalendar {
    fn default() -> Self {
        Self {
            open_hour: 8,
            close_hour: 18,
        }
    }
}

impl BusinessCalendar {
    pub fn new(open_hour: u32, close_hour: u32) -> Option<Self> {
        if open_hour < close_hour && close_hour <= 24 {
            Some(Self { open_hour, close_hour })
        } else {
            None
        }
    }

    fn is_business_day(day: Weekday) -> bool {
        !matches!(day, Weekday::Sat | Weekday::Sun)
    }

    fn is_business_time(&self, at: NaiveDateTime) -> bool {
        Self::is_business_day(at.weekday())
            && at.hour() >= self.open_hour
            && at.hour() < self.close_hour
    }

    fn open_time(&self) -> NaiveTime {
        NaiveTime::from_hms_opt(self.open_hour, 0, 0).unwrap_or(NaiveTime::MIN)
    }

    /// Start of the next business window at or after `at`.
    fn next_open(&self, at: NaiveDateTime) -> NaiveDateTime {
        if Self::is_business_day(at.weekday()) && at.hour() < self.open_hour {
            return at.date().and_time(self.open_time());
        }
        let mut day = at.date() + Duration::days(1);
        while !Self::is_business_day(day.weekday()) {
            day += Duration::days(1);
        }
        day.and_time(self.open_time())
    }

    /// Add `hours` of business time to `start`, skipping nights and
    /// weekends. Counting begins at the next open window when `start`
    /// falls outside one.
    pub fn add_business_hours(&self, start: NaiveDateTime, hours: u32) -> NaiveDateTime {
        let mut current = if self.is_business_time(start) {
            start
        } else {
            self.next_open(start)
        };
        let mut remaining = Duration::hours(i64::from(hours));

        loop {
            let close = current
                .date()
                .and_time(NaiveTime::from_hms_opt(self.close_hour % 24, 0, 0).unwrap_or(NaiveTime::MIN));
            let close = if self.close_hour == 24 {
                current.date().and_time(NaiveTime::MIN) + Duration::days(1)
            } else {
                close
            };
            let available = close - current;

            if remaining <= available {
                return current + remaining;
            }
            remaining = remaining - available;
            current = self.next_open(close);
        }
    }
}

/// SLA spec plus the absolute deadlines for one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlaResolution {
    pub spec: SlaSpec,
    pub response_deadline: NaiveDateTime,
    pub resolution_deadline: NaiveDateTime,
}

/// Resolve deadlines from the reported timestamp. Emergency tiers count
/// wall-clock hours; the rest accumulate business hours only.
pub fn resolve(
    severity: Severity,
    reported_at: NaiveDateTime,
    calendar: &BusinessCalendar,
) -> SlaResolution {
    let spec = spec_for(severity);

    let (response_deadline, resolution_deadline) = if spec.business_hours_only {
        (
            calendar.add_business_hours(reported_at, spec.response_hours),
            calendar.add_business_hours(reported_at, spec.resolution_hours),
        )
    } else {
        (
            reported_at + Duration::hours(i64::from(spec.response_hours)),
            reported_at + Duration::hours(i64::from(spec.resolution_hours)),
        )
    };

    SlaResolution {
        spec,
        response_deadline,
        resolution_deadline,
    }
}
