use crate::engine::assignment::{TimeWindow, Vendor, VendorMatcher};
use crate::engine::assignment::fairness::FixedCounter;
use crate::engine::domain::Trade;

pub(super) fn trade(tag: &str) -> Trade {
    Trade::parse(tag).expect("valid trade")
}

pub(super) fn window(raw: &str) -> TimeWindow {
    TimeWindow::parse(raw).expect("valid availability window")
}

pub(super) fn vendor(id: &str, name: &str, trade: &str, availability: &[&str]) -> Vendor {
    Vendor {
        vendor_id: id.to_string(),
        company_name: name.to_string(),
        primary_trade: trade.to_string(),
        availability: availability.iter().map(|raw| window(raw)).collect(),
        handles_emergency: false,
    }
}

pub(super) fn emergency_vendor(id: &str, name: &str, trade: &str) -> Vendor {
    Vendor {
        vendor_id: id.to_string(),
        company_name: name.to_string(),
        primary_trade: trade.to_string(),
        availability: Vec::new(),
        handles_emergency: true,
    }
}

pub(super) fn pinned_matcher(counter: u64) -> VendorMatcher<FixedCounter> {
    VendorMatcher::with_counter(FixedCounter::new(counter))
}

pub(super) fn times(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|slot| slot.to_string()).collect()
}
