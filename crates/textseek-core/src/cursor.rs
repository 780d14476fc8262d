//! Cursor movement.

use std::thread;
use std::time::Duration;

use enigo::{Coordinate, Enigo, Mouse, Settings};
use textseek_protocol::Waypoint;
use tracing::{debug, info};

use crate::{Error, Result};

/// Interval between intermediate cursor positions while gliding.
const STEP_INTERVAL: Duration = Duration::from_millis(16);

/// Moves shorter than this jump straight to the target.
const MIN_GLIDE: Duration = Duration::from_millis(100);

/// Upper bound on intermediate positions; longer glides take longer steps.
const MAX_GLIDE_STEPS: u128 = 1000;

/// Something that can report and set the cursor position.
pub trait Pointer {
    fn position(&mut self) -> Result<(i32, i32)>;
    fn warp(&mut self, x: i32, y: i32) -> Result<()>;
}

/// The system cursor, driven through enigo.
pub struct EnigoPointer {
    enigo: Enigo,
}

impl EnigoPointer {
    pub fn new() -> Result<Self> {
        let enigo = Enigo::new(&Settings::default()).map_err(|e| Error::Cursor(e.to_string()))?;
        Ok(Self { enigo })
    }
}

impl Pointer for EnigoPointer {
    fn position(&mut self) -> Result<(i32, i32)> {
        self.enigo.location().map_err(|e| Error::Cursor(e.to_string()))
    }

    fn warp(&mut self, x: i32, y: i32) -> Result<()> {
        self.enigo
            .move_mouse(x, y, Coordinate::Abs)
            .map_err(|e| Error::Cursor(e.to_string()))
    }
}

/// How a move is animated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Motion {
    /// Time taken to travel to the target.
    pub duration: Duration,
    /// Time to rest on the target afterwards.
    pub pause: Duration,
}

impl Default for Motion {
    fn default() -> Self {
        Self {
            duration: Duration::from_secs(1),
            pause: Duration::from_secs(1),
        }
    }
}

/// Glide the cursor to `(x, y)` over `motion.duration`, then rest for `motion.pause`.
pub fn move_to_location<P: Pointer + ?Sized>(
    pointer: &mut P,
    x: i32,
    y: i32,
    text: &str,
    motion: &Motion,
) -> Result<()> {
    move_with(pointer, x, y, text, motion, &mut thread::sleep)
}

/// Visit each waypoint in order.
pub fn tour<P: Pointer + ?Sized>(pointer: &mut P, waypoints: &[Waypoint], motion: &Motion) -> Result<()> {
    tour_with(pointer, waypoints, motion, &mut thread::sleep)
}

fn tour_with<P: Pointer + ?Sized>(
    pointer: &mut P,
    waypoints: &[Waypoint],
    motion: &Motion,
    sleep: &mut dyn FnMut(Duration),
) -> Result<()> {
    for waypoint in waypoints {
        move_with(pointer, waypoint.x, waypoint.y, &waypoint.text, motion, sleep)?;
    }
    Ok(())
}

fn move_with<P: Pointer + ?Sized>(
    pointer: &mut P,
    x: i32,
    y: i32,
    text: &str,
    motion: &Motion,
    sleep: &mut dyn FnMut(Duration),
) -> Result<()> {
    info!("Moving to '{}' at ({}, {})", text, x, y);

    if motion.duration < MIN_GLIDE {
        pointer.warp(x, y)?;
    } else {
        let start = pointer.position()?;
        let path = glide_path(start, (x, y), motion.duration);
        debug!("Gliding from {:?} in {} steps", start, path.len());

        let steps = u32::try_from(path.len()).unwrap_or(u32::MAX).max(1);
        let step_sleep = motion.duration / steps;
        for (px, py) in path {
            pointer.warp(px, py)?;
            sleep(step_sleep);
        }
    }

    if !motion.pause.is_zero() {
        sleep(motion.pause);
    }
    Ok(())
}

/// Linear path from `start` to `end`, excluding `start` and ending exactly on `end`.
fn glide_path(start: (i32, i32), end: (i32, i32), duration: Duration) -> Vec<(i32, i32)> {
    let steps = (duration.as_millis() / STEP_INTERVAL.as_millis()).clamp(1, MAX_GLIDE_STEPS) as i64;
    let (dx, dy) = ((end.0 - start.0) as i64, (end.1 - start.1) as i64);

    (1..=steps)
        .map(|i| {
            (
                start.0 + (dx * i / steps) as i32,
                start.1 + (dy * i / steps) as i32,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records every warp.
    struct FakePointer {
        at: (i32, i32),
        moves: Vec<(i32, i32)>,
    }

    impl FakePointer {
        fn at(x: i32, y: i32) -> Self {
            Self {
                at: (x, y),
                moves: Vec::new(),
            }
        }
    }

    impl Pointer for FakePointer {
        fn position(&mut self) -> Result<(i32, i32)> {
            Ok(self.at)
        }

        fn warp(&mut self, x: i32, y: i32) -> Result<()> {
            self.at = (x, y);
            self.moves.push((x, y));
            Ok(())
        }
    }

    struct StuckPointer;

    impl Pointer for StuckPointer {
        fn position(&mut self) -> Result<(i32, i32)> {
            Ok((0, 0))
        }

        fn warp(&mut self, _x: i32, _y: i32) -> Result<()> {
            Err(Error::Cursor("no display".to_string()))
        }
    }

    fn motion(duration_ms: u64, pause_ms: u64) -> Motion {
        Motion {
            duration: Duration::from_millis(duration_ms),
            pause: Duration::from_millis(pause_ms),
        }
    }

    #[test]
    fn test_glide_ends_on_target() {
        let mut pointer = FakePointer::at(0, 0);
        let mut slept = Vec::new();

        move_with(&mut pointer, 115, 1185, "fsfs", &motion(1000, 1000), &mut |d| slept.push(d)).unwrap();

        assert_eq!(pointer.moves.len(), 62);
        assert_eq!(*pointer.moves.last().unwrap(), (115, 1185));
        assert_eq!(*slept.last().unwrap(), Duration::from_secs(1));
        let total: Duration = slept.iter().sum();
        assert!(total >= Duration::from_millis(1990) && total <= Duration::from_secs(2));
    }

    #[test]
    fn test_glide_is_monotonic() {
        let path = glide_path((300, 10), (0, 200), Duration::from_millis(500));
        for pair in path.windows(2) {
            assert!(pair[1].0 <= pair[0].0);
            assert!(pair[1].1 >= pair[0].1);
        }
        assert_eq!(*path.last().unwrap(), (0, 200));
    }

    #[test]
    fn test_long_glide_is_capped() {
        let path = glide_path((0, 0), (-1920, 1080), Duration::MAX);
        assert_eq!(path.len() as u128, MAX_GLIDE_STEPS);
        assert_eq!(*path.last().unwrap(), (-1920, 1080));

        let mut pointer = FakePointer::at(0, 0);
        let mut slept = Vec::new();
        let day = Duration::from_secs(24 * 60 * 60);
        move_with(&mut pointer, 40, 20, "Login", &Motion { duration: day, pause: Duration::ZERO }, &mut |d| {
            slept.push(d)
        })
        .unwrap();

        assert_eq!(pointer.moves.len() as u128, MAX_GLIDE_STEPS);
        assert_eq!(*pointer.moves.last().unwrap(), (40, 20));
        assert_eq!(slept.iter().sum::<Duration>(), day);
    }

    #[test]
    fn test_short_moves_jump() {
        let mut pointer = FakePointer::at(5, 5);
        let mut slept = Vec::new();

        move_with(&mut pointer, 281, 291, "Dayz", &motion(50, 0), &mut |d| slept.push(d)).unwrap();

        assert_eq!(pointer.moves, vec![(281, 291)]);
        assert!(slept.is_empty());
    }

    #[test]
    fn test_tour_visits_in_order() {
        let mut pointer = FakePointer::at(0, 0);
        let waypoints = vec![
            Waypoint {
                text: "fsfs".to_string(),
                x: 115,
                y: 1185,
            },
            Waypoint {
                text: "Dayz".to_string(),
                x: 281,
                y: 291,
            },
        ];

        tour_with(&mut pointer, &waypoints, &motion(0, 10), &mut |_| {}).unwrap();
        assert_eq!(pointer.moves, vec![(115, 1185), (281, 291)]);
    }

    #[test]
    fn test_warp_errors_stop_the_move() {
        let result = move_with(&mut StuckPointer, 1, 1, "x", &motion(0, 0), &mut |_| {});
        assert!(matches!(result, Err(Error::Cursor(_))));
    }
}
