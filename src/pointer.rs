//! Pointer device control
//!
//! Thin abstraction over the OS pointing-device facility: read the current
//! position, warp to a position, press and release the primary button. The
//! X11 implementation uses the core protocol for position queries and
//! movement and the XTEST extension for synthesized button events.

use anyhow::{Context, Result};
use tracing::info;
use x11rb::connection::Connection;
use x11rb::protocol::xproto::{BUTTON_PRESS_EVENT, BUTTON_RELEASE_EVENT, ConnectionExt, Window};
use x11rb::protocol::xtest::ConnectionExt as XTestConnectionExt;
use x11rb::rust_connection::RustConnection;

use crate::constants::mouse;

/// A pixel position in root-window coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// The four operations the stroke engine needs from a pointing device
pub trait PointerDevice {
    fn position(&mut self) -> Result<Point>;
    fn set_position(&mut self, point: Point) -> Result<()>;
    fn press(&mut self) -> Result<()>;
    fn release(&mut self) -> Result<()>;
}

/// X11-backed pointer driver
pub struct X11Pointer {
    conn: RustConnection,
    root: Window,
}

impl X11Pointer {
    /// Connect to the X server named by $DISPLAY
    pub fn connect() -> Result<Self> {
        let (conn, screen_num) = x11rb::connect(None).context("Failed to connect to X11")?;
        let root = conn.setup().roots[screen_num].root;
        info!(screen = screen_num, "Connected to X11 for pointer control");
        Ok(Self { conn, root })
    }

    /// X11 warp coordinates are i16; clamp rather than wrap
    fn clamp(v: i32) -> i16 {
        v.clamp(i16::MIN as i32, i16::MAX as i32) as i16
    }
}

impl PointerDevice for X11Pointer {
    fn position(&mut self) -> Result<Point> {
        let reply = self
            .conn
            .query_pointer(self.root)
            .context("Failed to query pointer position")?
            .reply()
            .context("Failed to get reply for pointer query")?;
        Ok(Point::new(reply.root_x as i32, reply.root_y as i32))
    }

    fn set_position(&mut self, point: Point) -> Result<()> {
        self.conn
            .warp_pointer(
                x11rb::NONE,
                self.root,
                0,
                0,
                0,
                0,
                Self::clamp(point.x),
                Self::clamp(point.y),
            )
            .context("Failed to warp pointer")?;
        self.conn
            .flush()
            .context("Failed to flush X11 connection after pointer warp")?;
        Ok(())
    }

    fn press(&mut self) -> Result<()> {
        self.conn
            .xtest_fake_input(
                BUTTON_PRESS_EVENT,
                mouse::BUTTON_LEFT,
                x11rb::CURRENT_TIME,
                x11rb::NONE,
                0,
                0,
                0,
            )
            .context("Failed to synthesize button press")?;
        self.conn
            .flush()
            .context("Failed to flush X11 connection after button press")?;
        Ok(())
    }

    fn release(&mut self) -> Result<()> {
        self.conn
            .xtest_fake_input(
                BUTTON_RELEASE_EVENT,
                mouse::BUTTON_LEFT,
                x11rb::CURRENT_TIME,
                x11rb::NONE,
                0,
                0,
                0,
            )
            .context("Failed to synthesize button release")?;
        self.conn
            .flush()
            .context("Failed to flush X11 connection after button release")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_passes_normal_coordinates() {
        assert_eq!(X11Pointer::clamp(840), 840);
        assert_eq!(X11Pointer::clamp(-5), -5);
        assert_eq!(X11Pointer::clamp(0), 0);
    }

    #[test]
    fn test_clamp_saturates_out_of_range() {
        assert_eq!(X11Pointer::clamp(100_000), i16::MAX);
        assert_eq!(X11Pointer::clamp(-100_000), i16::MIN);
    }
}
