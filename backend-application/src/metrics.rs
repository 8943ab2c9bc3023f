use std::sync::atomic::{AtomicU64, Ordering};

use backend_domain::CheckinStatus;

#[derive(Debug, Default)]
pub struct Metrics {
    checkin_success: AtomicU64,
    checkin_duplicate: AtomicU64,
    checkin_fail: AtomicU64,
    checkin_late: AtomicU64,
    checkin_errors: AtomicU64,
    finalized: AtomicU64,
    identity_failures: AtomicU64,
    event_mutations: AtomicU64,
}

impl Metrics {
    pub fn record_checkin(&self, status: CheckinStatus) {
        let counter = match status {
            CheckinStatus::Success => &self.checkin_success,
            CheckinStatus::Duplicate => &self.checkin_duplicate,
            CheckinStatus::Fail => &self.checkin_fail,
            CheckinStatus::Late => &self.checkin_late,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_checkin_error(&self) {
        self.checkin_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_finalized(&self) {
        self.finalized.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_identity_failure(&self) {
        self.identity_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_event_mutation(&self) {
        self.event_mutations.fetch_add(1, Ordering::Relaxed);
    }

    pub fn render_prometheus(&self) -> String {
        let success = self.checkin_success.load(Ordering::Relaxed);
        let duplicate = self.checkin_duplicate.load(Ordering::Relaxed);
        let fail = self.checkin_fail.load(Ordering::Relaxed);
        let late = self.checkin_late.load(Ordering::Relaxed);
        let errors = self.checkin_errors.load(Ordering::Relaxed);
        let finalized = self.finalized.load(Ordering::Relaxed);
        let identity_failures = self.identity_failures.load(Ordering::Relaxed);
        let mutations = self.event_mutations.load(Ordering::Relaxed);

        format!(
            "# TYPE rollcall_checkins_total counter\n\
rollcall_checkins_total{{status=\"SUCCESS\"}} {}\n\
rollcall_checkins_total{{status=\"DUPLICATE\"}} {}\n\
rollcall_checkins_total{{status=\"FAIL\"}} {}\n\
rollcall_checkins_total{{status=\"LATE\"}} {}\n\
# TYPE rollcall_checkin_errors_total counter\n\
rollcall_checkin_errors_total {}\n\
# TYPE rollcall_checkins_finalized_total counter\n\
rollcall_checkins_finalized_total {}\n\
# TYPE rollcall_identity_failures_total counter\n\
rollcall_identity_failures_total {}\n\
# TYPE rollcall_event_mutations_total counter\n\
rollcall_event_mutations_total {}\n",
            success, duplicate, fail, late, errors, finalized, identity_failures, mutations
        )
    }
}
