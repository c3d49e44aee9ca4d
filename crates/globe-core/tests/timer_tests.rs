// Integration tests for the deferred event queue.

use globe_core::*;

#[test]
fn events_fire_in_due_order() {
    let mut timers = TimerQueue::new();
    timers.schedule_after(2.0, "late");
    timers.schedule_after(0.5, "early");
    timers.schedule_after(1.0, "middle");

    let mut out = Vec::new();
    timers.advance(0.4, &mut out);
    assert!(out.is_empty());

    timers.advance(2.0, &mut out);
    let payloads: Vec<_> = out.iter().map(|f| f.payload).collect();
    assert_eq!(payloads, vec!["early", "middle", "late"]);
    assert!(timers.is_empty());
}

#[test]
fn equal_due_times_keep_insertion_order() {
    let mut timers = TimerQueue::new();
    for i in 0..5 {
        timers.schedule_after(1.0, i);
    }
    let mut out = Vec::new();
    timers.advance(1.0, &mut out);
    let payloads: Vec<_> = out.iter().map(|f| f.payload).collect();
    assert_eq!(payloads, vec![0, 1, 2, 3, 4]);
}

#[test]
fn cancelled_events_never_fire() {
    let mut timers = TimerQueue::new();
    let keep = timers.schedule_after(1.0, 'k');
    let drop = timers.schedule_after(1.0, 'd');
    assert_eq!(timers.len(), 2);

    assert_eq!(timers.cancel(drop), Some('d'));
    assert_eq!(timers.cancel(drop), None);
    assert!(!timers.is_pending(drop));
    assert!(timers.is_pending(keep));

    let mut out = Vec::new();
    timers.advance(5.0, &mut out);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].handle, keep);
    assert!(!timers.is_pending(keep));
}

#[test]
fn due_time_is_reported_not_fire_time() {
    let mut timers = TimerQueue::new();
    timers.schedule_after(0.5, ());
    let mut out = Vec::new();
    timers.advance(0.8, &mut out);
    assert_eq!(out.len(), 1);
    assert!((out[0].due_sec - 0.5).abs() < 1e-9);
    assert!((timers.now_sec() - 0.8).abs() < 1e-9);
}

#[test]
fn past_absolute_times_fire_on_next_advance() {
    let mut timers = TimerQueue::new();
    let mut out = Vec::new();
    timers.advance(3.0, &mut out);
    timers.schedule_at(1.0, "overdue");
    timers.advance(0.0, &mut out);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].payload, "overdue");
}
