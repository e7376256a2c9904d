use super::PeriodicTask;
use anyhow::Result;
use std::ops::ControlFlow;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

#[tokio::test(start_paused = true)]
async fn test_periodic_task_ticks_until_it_breaks() -> Result<()> {
    let ticks = Arc::new(AtomicUsize::new(0));
    let counter = ticks.clone();

    let handle = PeriodicTask::spawn(Duration::from_millis(200), move || {
        if counter.fetch_add(1, Ordering::SeqCst) + 1 == 5 {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    });

    handle.finished().await?;

    assert_eq!(ticks.load(Ordering::SeqCst), 5);

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_periodic_task_first_tick_waits_one_period() {
    let ticks = Arc::new(AtomicUsize::new(0));
    let counter = ticks.clone();

    let _handle = PeriodicTask::spawn(Duration::from_millis(200), move || {
        counter.fetch_add(1, Ordering::SeqCst);
        ControlFlow::Continue(())
    });

    sleep(Duration::from_millis(150)).await;
    assert_eq!(ticks.load(Ordering::SeqCst), 0);

    sleep(Duration::from_millis(100)).await;
    assert_eq!(ticks.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn test_cancelled_task_stops_ticking() {
    let ticks = Arc::new(AtomicUsize::new(0));
    let counter = ticks.clone();

    let mut handle = PeriodicTask::spawn(Duration::from_millis(100), move || {
        counter.fetch_add(1, Ordering::SeqCst);
        ControlFlow::Continue(())
    });

    sleep(Duration::from_millis(350)).await;
    handle.cancel();
    let observed = ticks.load(Ordering::SeqCst);

    sleep(Duration::from_millis(1000)).await;

    assert_eq!(observed, 3);
    assert_eq!(ticks.load(Ordering::SeqCst), observed);
    assert!(!handle.is_active());
}

#[tokio::test(start_paused = true)]
async fn test_dropped_handle_stops_ticking() {
    let ticks = Arc::new(AtomicUsize::new(0));
    let counter = ticks.clone();

    let handle = PeriodicTask::spawn(Duration::from_millis(100), move || {
        counter.fetch_add(1, Ordering::SeqCst);
        ControlFlow::Continue(())
    });

    sleep(Duration::from_millis(250)).await;
    drop(handle);
    let observed = ticks.load(Ordering::SeqCst);

    sleep(Duration::from_millis(1000)).await;

    assert_eq!(ticks.load(Ordering::SeqCst), observed);
}

#[tokio::test(start_paused = true)]
async fn test_delay_runs_once_unless_cancelled() -> Result<()> {
    let fired = Arc::new(AtomicUsize::new(0));

    let counter = fired.clone();
    let handle = PeriodicTask::delay(Duration::from_millis(500), move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    handle.finished().await?;

    assert_eq!(fired.load(Ordering::SeqCst), 1);

    let counter = fired.clone();
    let mut handle = PeriodicTask::delay(Duration::from_millis(500), move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    sleep(Duration::from_millis(100)).await;
    handle.cancel();
    sleep(Duration::from_millis(1000)).await;

    assert_eq!(fired.load(Ordering::SeqCst), 1);

    Ok(())
}
