use std::{sync::Arc, time::Duration};

use thermostat_common::{ClockSubscription, ControllerStatus, ThermostatController};
use tokio::{
    sync::{mpsc, watch, Mutex},
    task::JoinHandle,
    time::{Instant, MissedTickBehavior},
};
use tracing::debug;

pub struct IntervalClock {
    schedule: watch::Sender<Option<Duration>>,
}

impl IntervalClock {
    pub fn new() -> (Self, watch::Receiver<Option<Duration>>) {
        let (schedule, receiver) = watch::channel(None);
        (Self { schedule }, receiver)
    }
}

impl ClockSubscription for IntervalClock {
    fn start(&mut self, interval_ms: u64) {
        debug!("tick clock started ({interval_ms} ms)");
        self.schedule
            .send_replace(Some(Duration::from_millis(interval_ms)));
    }

    fn stop(&mut self) {
        debug!("tick clock stopped");
        self.schedule.send_replace(None);
    }
}

pub fn spawn_tick_loop(
    controller: Arc<Mutex<ThermostatController>>,
    mut schedule: watch::Receiver<Option<Duration>>,
    updates: mpsc::Sender<ControllerStatus>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            let period = *schedule.borrow_and_update();
            let Some(period) = period else {
                if schedule.changed().await.is_err() {
                    return;
                }
                continue;
            };

            // First tick lands one full period after (re)start.
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    changed = schedule.changed() => {
                        if changed.is_err() {
                            return;
                        }
                        break;
                    }
                    _ = interval.tick() => {
                        let (activity, status) = {
                            let mut controller = controller.lock().await;
                            (controller.tick(), controller.status())
                        };
                        let Some(activity) = activity else {
                            continue;
                        };

                        debug!(
                            "tick: {} current={:.1}°F target={:.1}°F",
                            activity.as_str(),
                            status.current_temp_f,
                            status.target_temp_f
                        );
                        if updates.send(status).await.is_err() {
                            return;
                        }
                    }
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use thermostat_common::{ScriptedDrift, SimulationConfig, StartupSettings};

    fn shared_controller() -> Arc<Mutex<ThermostatController>> {
        Arc::new(Mutex::new(ThermostatController::new(
            SimulationConfig::default(),
            StartupSettings::default(),
            Box::new(ScriptedDrift::default()),
        )))
    }

    async fn attach(
        controller: &Arc<Mutex<ThermostatController>>,
    ) -> (JoinHandle<()>, mpsc::Receiver<ControllerStatus>) {
        let (clock, schedule) = IntervalClock::new();
        let (updates, receiver) = mpsc::channel(8);
        controller.lock().await.attach_clock(Box::new(clock));
        (spawn_tick_loop(controller.clone(), schedule, updates), receiver)
    }

    #[tokio::test(start_paused = true)]
    async fn ticks_once_per_interval() {
        let controller = shared_controller();
        let (_handle, mut updates) = attach(&controller).await;
        let started = Instant::now();

        let first = updates.recv().await.unwrap();
        assert_eq!(first.current_temp_f, 68.5);
        assert!(first.heating);
        assert_eq!(started.elapsed(), Duration::from_millis(2_000));

        let second = updates.recv().await.unwrap();
        assert_eq!(second.current_temp_f, 69.0);
        assert_eq!(started.elapsed(), Duration::from_millis(4_000));
    }

    #[tokio::test(start_paused = true)]
    async fn power_off_stops_ticks_and_power_on_resumes() {
        let controller = shared_controller();
        let (_handle, mut updates) = attach(&controller).await;

        let first = updates.recv().await.unwrap();
        assert_eq!(first.current_temp_f, 68.5);

        controller.lock().await.toggle_power();
        let idle = tokio::time::timeout(Duration::from_secs(30), updates.recv()).await;
        assert!(idle.is_err());
        assert_eq!(controller.lock().await.current_temp_f(), 68.5);

        controller.lock().await.toggle_power();
        let resumed_at = Instant::now();
        let resumed = updates.recv().await.unwrap();
        assert_eq!(resumed.current_temp_f, 69.0);
        assert_eq!(resumed_at.elapsed(), Duration::from_millis(2_000));
    }

    #[tokio::test(start_paused = true)]
    async fn loop_exits_when_clock_is_detached() {
        let controller = shared_controller();
        let (handle, _updates) = attach(&controller).await;

        let clock = controller.lock().await.detach_clock();
        drop(clock);

        handle.await.unwrap();
    }
}
