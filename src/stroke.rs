//! Circle stroke engine
//!
//! Synthesizes an ordered sequence of points approximating a circle around
//! the pointer's current position and drives the pointer device through
//! them with the primary button held down. Button release and the warp back
//! to the original center are tied to an RAII guard, so they run exactly
//! once on every exit path: completion, cancellation, a device fault, or a
//! panic on the stroke thread.

use std::f64::consts::TAU;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{error, info};

use crate::config::Settings;
use crate::constants::stroke::SETTLE_DELAY_MS;
use crate::pointer::{Point, PointerDevice};
use crate::run_state::RunState;

/// Immutable parameters of one stroke
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeParams {
    /// Radius in pixels
    pub radius: i32,
    /// Points sampled along the circle
    pub steps: u32,
    /// Pause between steps (zero = none)
    pub delay: Duration,
}

impl From<&Settings> for StrokeParams {
    fn from(settings: &Settings) -> Self {
        Self {
            radius: settings.radius as i32,
            steps: settings.steps,
            delay: settings.draw_delay(),
        }
    }
}

/// Point at angle `(step / steps) * 2pi` on the circle, rounded to the
/// nearest pixel. Step 0 is `(center.x + radius, center.y)`.
pub fn circle_point(center: Point, radius: i32, step: u32, steps: u32) -> Point {
    let angle = (step as f64 / steps as f64) * TAU;
    Point::new(
        (center.x as f64 + radius as f64 * angle.cos()).round() as i32,
        (center.y as f64 + radius as f64 * angle.sin()).round() as i32,
    )
}

/// Holds the pressed button; dropping it releases the button and returns
/// the pointer to the stroke center, best effort, logging any failure.
struct ButtonGuard<'a, D: PointerDevice> {
    device: &'a mut D,
    center: Point,
}

impl<D: PointerDevice> Drop for ButtonGuard<'_, D> {
    fn drop(&mut self) {
        if let Err(e) = self.device.release() {
            error!(error = ?e, "Failed to release button during stroke cleanup");
        }
        if let Err(e) = self.device.set_position(self.center) {
            error!(error = ?e, "Failed to restore pointer to stroke center");
        }
    }
}

/// Draw one full circle around the pointer's current position.
///
/// The center is sampled from the device at call time; the pointer first
/// warps to the angle-0 start point and settles briefly before the button
/// goes down. `state.keep_running` is checked once per step boundary.
pub fn run_stroke<D: PointerDevice>(
    device: &mut D,
    params: &StrokeParams,
    state: &RunState,
) -> Result<()> {
    let center = device.position().context("Failed to sample stroke center")?;
    info!(x = center.x, y = center.y, "Stroke center captured");

    let start = circle_point(center, params.radius, 0, params.steps);
    device
        .set_position(start)
        .context("Failed to move to stroke start point")?;
    thread::sleep(Duration::from_millis(SETTLE_DELAY_MS));
    device.press().context("Failed to press button")?;

    let mut guard = ButtonGuard { device, center };
    let result = trace_circle(&mut guard, params, state);
    drop(guard);

    if result.is_ok() {
        info!("Stroke complete, pointer restored to center");
    }
    result
}

fn trace_circle<D: PointerDevice>(
    guard: &mut ButtonGuard<'_, D>,
    params: &StrokeParams,
    state: &RunState,
) -> Result<()> {
    for step in 1..=params.steps {
        if !state.keep_running() {
            info!(step, "Stroke cancelled by exit request");
            break;
        }

        let point = circle_point(guard.center, params.radius, step, params.steps);
        guard
            .device
            .set_position(point)
            .context(format!("Failed to move pointer at step {step}"))?;

        if !params.delay.is_zero() {
            thread::sleep(params.delay);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::bail;

    struct MockPointer {
        pos: Point,
        moves: Vec<Point>,
        presses: u32,
        releases: u32,
        /// Fail the set_position call with this index (0-based), once
        fail_on_move: Option<usize>,
        fail_press: bool,
    }

    impl MockPointer {
        fn at(x: i32, y: i32) -> Self {
            Self {
                pos: Point::new(x, y),
                moves: Vec::new(),
                presses: 0,
                releases: 0,
                fail_on_move: None,
                fail_press: false,
            }
        }
    }

    impl PointerDevice for MockPointer {
        fn position(&mut self) -> Result<Point> {
            Ok(self.pos)
        }

        fn set_position(&mut self, point: Point) -> Result<()> {
            if self.fail_on_move == Some(self.moves.len()) {
                self.fail_on_move = None;
                bail!("simulated device fault");
            }
            self.moves.push(point);
            Ok(())
        }

        fn press(&mut self) -> Result<()> {
            if self.fail_press {
                bail!("simulated press fault");
            }
            self.presses += 1;
            Ok(())
        }

        fn release(&mut self) -> Result<()> {
            self.releases += 1;
            Ok(())
        }
    }

    fn params(radius: i32, steps: u32) -> StrokeParams {
        StrokeParams {
            radius,
            steps,
            delay: Duration::ZERO,
        }
    }

    fn distance(a: Point, b: Point) -> f64 {
        (((a.x - b.x).pow(2) + (a.y - b.y).pow(2)) as f64).sqrt()
    }

    #[test]
    fn test_circle_point_worked_example() {
        // radius=340, steps=2000, center=(500,500) from the original tool
        let center = Point::new(500, 500);
        assert_eq!(circle_point(center, 340, 0, 2000), Point::new(840, 500));
        assert_eq!(circle_point(center, 340, 500, 2000), Point::new(500, 840));
        assert_eq!(circle_point(center, 340, 1000, 2000), Point::new(160, 500));
        assert_eq!(circle_point(center, 340, 2000, 2000), Point::new(840, 500));
    }

    #[test]
    fn test_circle_points_stay_on_circle() {
        let center = Point::new(500, 500);
        for step in 0..=97 {
            let p = circle_point(center, 340, step, 97);
            // 1 px rounding tolerance
            assert!(
                (distance(p, center) - 340.0).abs() <= 1.0,
                "step {step} off circle: {p:?}"
            );
        }
    }

    #[test]
    fn test_full_stroke_sequence() {
        let mut device = MockPointer::at(500, 500);
        let state = RunState::new();
        let params = params(100, 8);

        run_stroke(&mut device, &params, &state).unwrap();

        // start move + 8 steps + final restore
        assert_eq!(device.moves.len(), 10);
        assert_eq!(device.moves[0], Point::new(600, 500));
        // last loop point closes the circle at angle 2pi
        assert_eq!(device.moves[8], Point::new(600, 500));
        assert_eq!(*device.moves.last().unwrap(), Point::new(500, 500));
        assert_eq!(device.presses, 1);
        assert_eq!(device.releases, 1);
    }

    #[test]
    fn test_cancel_before_first_step() {
        let mut device = MockPointer::at(500, 500);
        let state = RunState::new();
        state.request_shutdown();

        run_stroke(&mut device, &params(100, 50), &state).unwrap();

        // only the start move and the restore; button still cycled once
        assert_eq!(device.moves, vec![Point::new(600, 500), Point::new(500, 500)]);
        assert_eq!(device.presses, 1);
        assert_eq!(device.releases, 1);
    }

    #[test]
    fn test_device_fault_still_finalizes() {
        let mut device = MockPointer::at(500, 500);
        // fail on the third set_position (start move + 2 steps succeed)
        device.fail_on_move = Some(3);
        let state = RunState::new();

        let result = run_stroke(&mut device, &params(100, 20), &state);

        assert!(result.is_err());
        assert_eq!(device.releases, 1);
        assert_eq!(*device.moves.last().unwrap(), Point::new(500, 500));
    }

    #[test]
    fn test_press_fault_does_not_release() {
        let mut device = MockPointer::at(500, 500);
        device.fail_press = true;
        let state = RunState::new();

        let result = run_stroke(&mut device, &params(100, 20), &state);

        // button was never down, so no release and no restore
        assert!(result.is_err());
        assert_eq!(device.releases, 0);
        assert_eq!(device.moves, vec![Point::new(600, 500)]);
    }

    #[test]
    fn test_params_from_settings() {
        let settings = Settings {
            radius: 250,
            steps: 1000,
            draw_speed: 0.002,
            ..Settings::default()
        };
        let params = StrokeParams::from(&settings);
        assert_eq!(params.radius, 250);
        assert_eq!(params.steps, 1000);
        assert_eq!(params.delay, Duration::from_micros(2000));
    }
}
