//! Process-wide Prometheus registry with HR domain counters.

use once_cell::sync::Lazy;
use prometheus::{Encoder, IntCounterVec, Opts, Registry, TextEncoder};

pub static REGISTRY: Lazy<Registry> = Lazy::new(Registry::new);

/// Domain events, labelled by `event` (e.g. `registration`, `leave_request`).
pub static HR_EVENTS: Lazy<IntCounterVec> = Lazy::new(|| {
    let c = IntCounterVec::new(Opts::new("hr_events_total", "HR domain events"), &["event"])
        .expect("valid hr_events_total opts");
    REGISTRY.register(Box::new(c.clone())).expect("register hr_events_total");
    c
});

/// Login attempts labelled by `outcome` (`success`, `failure`).
pub static LOGINS: Lazy<IntCounterVec> = Lazy::new(|| {
    let c = IntCounterVec::new(Opts::new("hr_logins_total", "Login attempts"), &["outcome"])
        .expect("valid hr_logins_total opts");
    REGISTRY.register(Box::new(c.clone())).expect("register hr_logins_total");
    c
});

pub fn record_event(event: &str) {
    HR_EVENTS.with_label_values(&[event]).inc();
}

pub fn record_login(success: bool) {
    LOGINS.with_label_values(&[if success { "success" } else { "failure" }]).inc();
}

/// Render all registered metrics in the Prometheus text format.
pub fn render() -> String {
    Lazy::force(&HR_EVENTS);
    Lazy::force(&LOGINS);
    let mut buf = Vec::new();
    let encoder = TextEncoder::new();
    if encoder.encode(&REGISTRY.gather(), &mut buf).is_err() {
        return String::new();
    }
    String::from_utf8(buf).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_contains_recorded_event() {
        record_event("leave_request");
        record_login(false);
        let out = render();
        assert!(out.contains("hr_events_total"));
        assert!(out.contains("leave_request"));
        assert!(out.contains("hr_logins_total"));
    }
}
