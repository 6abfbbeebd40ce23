use std::sync::atomic::{AtomicU64, Ordering};

use glam::{Vec3, Vec4};
use parking_lot::Mutex;

use crate::debug::DebugVertex;

/// A world-space overlay segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DebugLine {
    pub start: Vec3,
    pub end: Vec3,
    pub color: Vec4,
}

/// Frame-latched accumulator for overlay lines.
///
/// Two line lists alternate by tick parity: contexts append to the list of
/// the current tick, [`take_render_data`](Self::take_render_data) drains the
/// list of the previous one.
pub struct DebugDrawer {
    current_tick: AtomicU64,
    frames: Mutex<[Vec<DebugLine>; 2]>,
}

impl DebugDrawer {
    pub fn new() -> Self {
        Self {
            current_tick: AtomicU64::new(0),
            frames: Mutex::new([Vec::new(), Vec::new()]),
        }
    }

    pub fn current_tick(&self) -> u64 {
        self.current_tick.load(Ordering::Acquire)
    }

    /// Start a new frame. Clears the list the new tick writes into.
    pub fn advance_tick(&self) {
        let new_tick = self.current_tick() + 1;
        self.frames.lock()[(new_tick % 2) as usize].clear();
        self.current_tick.store(new_tick, Ordering::Release);
    }

    /// Open a context that flushes into the current tick when dropped.
    pub fn context(&self) -> DebugDrawerContext<'_> {
        DebugDrawerContext {
            drawer: self,
            tick: self.current_tick(),
            lines: Vec::new(),
        }
    }

    /// Drain the lines recorded during the previous tick.
    pub fn take_render_data(&self) -> Vec<DebugLine> {
        let render_index = ((self.current_tick() + 1) % 2) as usize;
        std::mem::take(&mut self.frames.lock()[render_index])
    }

    /// Like [`take_render_data`](Self::take_render_data), flattened into line-list vertices.
    pub fn take_render_vertices(&self) -> Vec<DebugVertex> {
        self.take_render_data()
            .iter()
            .flat_map(|line| line.vertices())
            .collect()
    }

    fn flush(&self, tick: u64, lines: Vec<DebugLine>) {
        if lines.is_empty() {
            return;
        }
        let current = self.current_tick();
        if tick != current {
            log::warn!(
                "Debug context from tick {} flushed at tick {}; dropping {} lines",
                tick,
                current,
                lines.len()
            );
            return;
        }
        self.frames.lock()[(tick % 2) as usize].extend(lines);
    }
}

impl Default for DebugDrawer {
    fn default() -> Self {
        Self::new()
    }
}

/// Short-lived collector of overlay lines.
///
/// Obtain via [`DebugDrawer::context()`].
pub struct DebugDrawerContext<'a> {
    drawer: &'a DebugDrawer,
    tick: u64,
    lines: Vec<DebugLine>,
}

impl DebugDrawerContext<'_> {
    /// Queue a world-space segment.
    pub fn draw_line(&mut self, start: Vec3, end: Vec3, color: Vec4) {
        self.lines.push(DebugLine { start, end, color });
    }

    /// Lines queued so far and not yet flushed.
    pub fn pending(&self) -> &[DebugLine] {
        &self.lines
    }
}

impl Drop for DebugDrawerContext<'_> {
    fn drop(&mut self) {
        let lines = std::mem::take(&mut self.lines);
        self.drawer.flush(self.tick, lines);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines_visible_next_tick() {
        let drawer = DebugDrawer::new();
        drawer.advance_tick();

        drawer
            .context()
            .draw_line(Vec3::ZERO, Vec3::ONE, Vec4::new(1.0, 0.0, 0.0, 1.0));
        assert!(drawer.take_render_data().is_empty());

        drawer.advance_tick();
        let lines = drawer.take_render_data();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].end, Vec3::ONE);
    }

    #[test]
    fn test_stale_context_discarded() {
        let drawer = DebugDrawer::new();
        let mut ctx = drawer.context();
        ctx.draw_line(Vec3::ZERO, Vec3::X, Vec4::ONE);

        drawer.advance_tick();
        drawer.advance_tick();
        drop(ctx);

        assert!(drawer.take_render_data().is_empty());
    }

    #[test]
    fn test_render_vertices() {
        let drawer = DebugDrawer::new();
        {
            let mut ctx = drawer.context();
            ctx.draw_line(Vec3::ZERO, Vec3::X, Vec4::ONE);
            ctx.draw_line(Vec3::Y, Vec3::Z, Vec4::ONE);
            assert_eq!(ctx.pending().len(), 2);
        }
        drawer.advance_tick();

        let vertices = drawer.take_render_vertices();
        assert_eq!(vertices.len(), 4);
        assert_eq!(vertices[3].position, [0.0, 0.0, 1.0]);
    }
}
