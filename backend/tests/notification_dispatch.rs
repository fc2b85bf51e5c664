use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use carsplatform_backend::models::telemetry::LOW_BATTERY_THRESHOLD;
use carsplatform_backend::models::vehicle::Vehicle;
use carsplatform_backend::services::email::EmailSender;
use carsplatform_backend::services::telemetry::dispatch_low_battery_alert;

#[derive(Default)]
struct RecordingMailer {
    sent: AtomicUsize,
    last_subject: Mutex<Option<String>>,
    fail: bool,
}

impl EmailSender for RecordingMailer {
    fn send(&self, _to: &str, subject: &str, _body: &str) -> anyhow::Result<()> {
        self.sent.fetch_add(1, Ordering::SeqCst);
        *self.last_subject.lock().unwrap() = Some(subject.to_string());
        if self.fail {
            anyhow::bail!("smtp unavailable");
        }
        Ok(())
    }
}

fn vehicle() -> Vehicle {
    Vehicle::new(
        Some("owner-1".into()),
        "Nissan".into(),
        "Leaf".into(),
        2021,
        "1N4AZ1CP8KC300000".into(),
    )
}

#[test]
fn low_battery_triggers_exactly_one_alert() {
    let mailer = RecordingMailer::default();
    let attempted = dispatch_low_battery_alert(&mailer, &vehicle(), "owner@example.com", 15.0);

    assert!(attempted);
    assert_eq!(mailer.sent.load(Ordering::SeqCst), 1);
    let subject = mailer.last_subject.lock().unwrap().clone().unwrap();
    assert_eq!(subject, "Low Battery Alert for Nissan Leaf (2021)");
}

#[test]
fn battery_at_threshold_sends_nothing() {
    let mailer = RecordingMailer::default();
    let attempted =
        dispatch_low_battery_alert(&mailer, &vehicle(), "owner@example.com", LOW_BATTERY_THRESHOLD);

    assert!(!attempted);
    assert_eq!(mailer.sent.load(Ordering::SeqCst), 0);
}

#[test]
fn healthy_battery_sends_nothing() {
    let mailer = RecordingMailer::default();
    let attempted = dispatch_low_battery_alert(&mailer, &vehicle(), "owner@example.com", 87.5);

    assert!(!attempted);
    assert_eq!(mailer.sent.load(Ordering::SeqCst), 0);
}

#[test]
fn mailer_failure_is_swallowed() {
    let mailer = RecordingMailer {
        fail: true,
        ..Default::default()
    };

    // dispatch reports the attempt and does not propagate the send error
    let attempted = dispatch_low_battery_alert(&mailer, &vehicle(), "owner@example.com", 5.0);
    assert!(attempted);
    assert_eq!(mailer.sent.load(Ordering::SeqCst), 1);
}
