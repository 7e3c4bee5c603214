//! Background status polling.
//!
//! The poller thread polls the controller at the moving rate while anything
//! moves and at the idle rate otherwise, and publishes every [`PollReport`].
//! Commands from other threads share the controller through the same mutex,
//! so a poll never interleaves with a command exchange.

use std::sync::{Arc, Mutex, PoisonError};
use std::thread::JoinHandle;
use std::time::Duration;

use crossbeam_channel::{unbounded, Receiver, RecvTimeoutError, Sender};
use tracing::{debug, info, warn};

use super::motor_controller::PiMotorController;
use super::status::PollReport;

enum Signal {
    Wake,
    Shutdown,
}

/// Handle to the polling thread. Dropping it stops the thread.
pub struct Poller {
    signals: Sender<Signal>,
    worker: Option<JoinHandle<()>>,
}

impl Poller {
    /// Start polling `controller`. Reports arrive on the returned receiver,
    /// the first one immediately.
    pub fn spawn(
        controller: Arc<Mutex<PiMotorController>>,
        moving_period: Duration,
        idle_period: Duration,
    ) -> (Self, Receiver<PollReport>) {
        let (signals, signal_rx) = unbounded::<Signal>();
        let (report_tx, reports) = unbounded::<PollReport>();

        let worker = std::thread::spawn(move || {
            info!("Poller started");
            loop {
                let report = controller
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .poll();
                let period = if report.any_moving {
                    moving_period
                } else {
                    idle_period
                };
                if report_tx.send(report).is_err() {
                    debug!("Poll report receiver dropped");
                }

                match signal_rx.recv_timeout(period) {
                    Ok(Signal::Wake) | Err(RecvTimeoutError::Timeout) => {}
                    Ok(Signal::Shutdown) | Err(RecvTimeoutError::Disconnected) => break,
                }
            }
            info!("Poller shutting down");
        });

        (
            Self {
                signals,
                worker: Some(worker),
            },
            reports,
        )
    }

    /// Poll now instead of waiting for the period to run out.
    pub fn wake(&self) {
        let _ = self.signals.send(Signal::Wake);
    }

    /// Stop the thread and wait for it to finish.
    pub fn shutdown(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        if let Some(worker) = self.worker.take() {
            let _ = self.signals.send(Signal::Shutdown);
            if let Err(e) = worker.join() {
                warn!("Poller thread panicked: {:?}", e);
            }
        }
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pi::motor_controller::ControllerOptions;
    use crate::pi::testing::motor_port;

    const WAIT: Duration = Duration::from_secs(5);

    #[test]
    fn test_wake_forces_poll() {
        let port = motor_port();
        let controller = PiMotorController::connect(port.interface(), ControllerOptions::default()).unwrap();
        let controller = Arc::new(Mutex::new(controller));

        let (poller, reports) = Poller::spawn(
            Arc::clone(&controller),
            Duration::from_millis(10),
            Duration::from_secs(3600),
        );
        let first = reports.recv_timeout(WAIT).unwrap();
        assert_eq!(first.axes.len(), 2);
        assert!(!first.any_moving);

        port.reply("POS? 1", "1=0.125");
        poller.wake();
        let second = reports.recv_timeout(WAIT).unwrap();
        assert_eq!(second.axes[0].position, 1250);

        poller.shutdown();
        assert!(reports.recv_timeout(Duration::from_millis(50)).is_err());
    }

    #[test]
    fn test_moving_axes_use_fast_period() {
        let port = motor_port();
        // axis 1 moving, servo on
        port.reply("#4", "0x30009000");
        let controller = PiMotorController::connect(port.interface(), ControllerOptions::default()).unwrap();
        let (poller, reports) = Poller::spawn(
            Arc::new(Mutex::new(controller)),
            Duration::from_millis(5),
            Duration::from_secs(3600),
        );

        for _ in 0..3 {
            let report = reports.recv_timeout(WAIT).unwrap();
            assert!(report.any_moving);
        }
        drop(poller);
    }
}
