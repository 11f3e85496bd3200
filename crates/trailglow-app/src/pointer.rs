use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};
use glam::DVec2;
use tracing::{debug, info, warn};
use trailglow_core::InputEvent;
use trailglow_platform::{InputSource, Result};

use crate::config::PointerConfig;

/// Stands in for a real pointer: traces a Lissajous figure on its own thread,
/// one gesture at a time, fading out between gestures.
pub struct ScriptedPointer {
    config: PointerConfig,
    stop_signal: Option<Sender<()>>,
    worker: Option<JoinHandle<()>>,
}

impl ScriptedPointer {
    pub fn new(config: PointerConfig) -> Self {
        Self {
            config,
            stop_signal: None,
            worker: None,
        }
    }
}

/// Sleeps for `duration` unless a stop arrives first. Returns `true` when
/// stopped; dropping the sender counts as a stop.
fn wait_for_stop(stop: &Receiver<()>, duration: Duration) -> bool {
    match stop.recv_timeout(duration) {
        Err(RecvTimeoutError::Timeout) => false,
        Ok(()) | Err(RecvTimeoutError::Disconnected) => true,
    }
}

/// Position on the figure at `t` seconds into a gesture.
pub fn lissajous(config: &PointerConfig, t: f64) -> DVec2 {
    let center = DVec2::from_array(config.center);
    let radius = DVec2::from_array(config.radius);
    let phase = DVec2::from_array(config.frequency) * t * std::f64::consts::TAU / 3.0;
    center + radius * DVec2::new(phase.x.sin(), phase.y.cos())
}

/// Every event a gesture produces, paired with its delay from gesture start.
pub fn gesture_events(config: &PointerConfig, gesture: u32) -> Vec<(Duration, InputEvent)> {
    let step = Duration::from_secs(1) / config.samples_per_second.max(1);
    let samples = Duration::from_millis(config.gesture_ms).as_nanos() / step.as_nanos().max(1);
    // each gesture starts a little further along the figure
    let offset = f64::from(gesture) * 0.37;

    let mut events = Vec::with_capacity(samples as usize + 2);
    events.push((Duration::ZERO, InputEvent::Start(lissajous(config, offset))));
    for i in 1..=samples as u32 {
        let at = step * i;
        let point = lissajous(config, offset + at.as_secs_f64());
        events.push((at, InputEvent::Move(point)));
    }
    events.push((Duration::from_millis(config.gesture_ms), InputEvent::FadeOut));
    events
}

impl InputSource for ScriptedPointer {
    fn start(&mut self, events: Sender<InputEvent>) -> Result<()> {
        if self.worker.is_some() {
            return Err("scripted pointer already running".into());
        }
        let (stop_signal, stop) = crossbeam_channel::bounded::<()>(1);
        let config = self.config.clone();

        let worker = thread::Builder::new()
            .name("scripted-pointer".into())
            .spawn(move || {
                'gestures: for gesture in 0..config.gestures {
                    debug!(gesture, "pointer gesture begins");
                    let mut elapsed = Duration::ZERO;
                    for (at, event) in gesture_events(&config, gesture) {
                        if wait_for_stop(&stop, at.saturating_sub(elapsed)) {
                            break 'gestures;
                        }
                        elapsed = at;
                        if events.send(event).is_err() {
                            warn!("input channel closed; scripted pointer exiting");
                            break 'gestures;
                        }
                    }
                    if wait_for_stop(&stop, Duration::from_millis(config.pause_ms)) {
                        break;
                    }
                }
                debug!("scripted pointer finished");
            })?;
        self.stop_signal = Some(stop_signal);
        self.worker = Some(worker);
        info!("scripted pointer started");
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        // dropping the sender wakes the worker out of any wait
        self.stop_signal.take();
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                return Err("scripted pointer thread panicked".into());
            }
        }
        Ok(())
    }
}

impl Drop for ScriptedPointer {
    fn drop(&mut self) {
        let _ = self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gesture_is_start_moves_fade() {
        let config = PointerConfig {
            samples_per_second: 100,
            gesture_ms: 200,
            ..PointerConfig::default()
        };
        let events = gesture_events(&config, 0);
        assert_eq!(events.len(), 22);
        assert!(matches!(events[0].1, InputEvent::Start(_)));
        assert!(events[1..21]
            .iter()
            .all(|(_, e)| matches!(e, InputEvent::Move(_))));
        assert_eq!(events[21].1, InputEvent::FadeOut);
        assert!(events.windows(2).all(|w| w[0].0 <= w[1].0));
    }

    #[test]
    fn figure_stays_within_radius() {
        let config = PointerConfig::default();
        for i in 0..500 {
            let p = lissajous(&config, i as f64 * 0.013);
            assert!((p.x - 400.0).abs() <= 300.0 + 1e-9);
            assert!((p.y - 300.0).abs() <= 200.0 + 1e-9);
        }
    }

    #[test]
    fn delivers_over_channel_and_stops() {
        let config = PointerConfig {
            samples_per_second: 1_000,
            gesture_ms: 20,
            pause_ms: 0,
            gestures: 1,
            ..PointerConfig::default()
        };
        let (tx, rx) = trailglow_core::input::channel();
        let mut pointer = ScriptedPointer::new(config);
        pointer.start(tx).unwrap();
        let first = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert!(matches!(first, InputEvent::Start(_)));
        pointer.stop().unwrap();
        let rest: Vec<_> = rx.try_iter().collect();
        assert!(rest.len() <= 21);
    }

    #[test]
    fn stop_interrupts_pause() {
        let config = PointerConfig {
            samples_per_second: 1_000,
            gesture_ms: 20,
            pause_ms: 3_000,
            gestures: 2,
            ..PointerConfig::default()
        };
        let (tx, rx) = trailglow_core::input::channel();
        let mut pointer = ScriptedPointer::new(config);
        pointer.start(tx).unwrap();
        loop {
            let event = rx.recv_timeout(Duration::from_secs(5)).unwrap();
            if event == InputEvent::FadeOut {
                break;
            }
        }

        let started = std::time::Instant::now();
        pointer.stop().unwrap();
        let took = started.elapsed();
        assert!(took < Duration::from_millis(500), "stop took {took:?}");
        // the second gesture never begins
        assert!(rx.try_iter().next().is_none());
    }
}
