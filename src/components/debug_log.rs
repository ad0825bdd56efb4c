//! In-memory log sink and the panel that shows it.
//!
//! The terminal is in raw alternate-screen mode while the store runs, so log
//! lines cannot go to stderr. The tracing subscriber writes into a bounded
//! ring buffer instead, and F12 shows its tail.

use std::collections::VecDeque;
use std::io::{self, Write};
use std::sync::{Arc, Mutex, OnceLock};

use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::components::{Component, ComponentContext};
use crate::ui::UiFrame;

const DEFAULT_MAX_LINES: usize = 500;
static GLOBAL_LOG: OnceLock<DebugLogHandle> = OnceLock::new();

pub fn set_global_debug_log(handle: DebugLogHandle) -> bool {
    GLOBAL_LOG.set(handle).is_ok()
}

pub fn global_debug_log() -> Option<DebugLogHandle> {
    GLOBAL_LOG.get().cloned()
}

#[derive(Debug)]
struct DebugLogBuffer {
    lines: VecDeque<String>,
    max_lines: usize,
}

impl DebugLogBuffer {
    fn new(max_lines: usize) -> Self {
        Self {
            lines: VecDeque::new(),
            max_lines: max_lines.max(1),
        }
    }

    fn push_line(&mut self, line: String) {
        self.lines.push_back(line);
        while self.lines.len() > self.max_lines {
            self.lines.pop_front();
        }
    }
}

#[derive(Clone, Debug)]
pub struct DebugLogHandle {
    inner: Arc<Mutex<DebugLogBuffer>>,
}

impl DebugLogHandle {
    pub fn new(max_lines: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(DebugLogBuffer::new(max_lines))),
        }
    }

    pub fn push(&self, line: impl Into<String>) {
        if let Ok(mut buffer) = self.inner.lock() {
            buffer.push_line(line.into());
        }
    }

    /// The last `count` lines, oldest first.
    pub fn tail(&self, count: usize) -> Vec<String> {
        match self.inner.lock() {
            Ok(buffer) => {
                let skip = buffer.lines.len().saturating_sub(count);
                buffer.lines.iter().skip(skip).cloned().collect()
            }
            Err(_) => Vec::new(),
        }
    }

    pub fn writer(&self) -> DebugLogWriter {
        DebugLogWriter::new(self.clone())
    }
}

impl Default for DebugLogHandle {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_LINES)
    }
}

/// `io::Write` adapter that splits the byte stream into lines.
#[derive(Debug)]
pub struct DebugLogWriter {
    handle: DebugLogHandle,
    pending: Vec<u8>,
}

impl DebugLogWriter {
    pub fn new(handle: DebugLogHandle) -> Self {
        Self {
            handle,
            pending: Vec::new(),
        }
    }

    fn flush_pending(&mut self, force: bool) {
        let end = if force {
            self.pending.len()
        } else {
            match self.pending.iter().rposition(|b| *b == b'\n') {
                Some(pos) => pos + 1,
                None => return,
            }
        };
        let drained: Vec<u8> = self.pending.drain(..end).collect();
        let text = String::from_utf8_lossy(&drained);
        for line in text.split('\n').filter(|l| !l.is_empty()) {
            self.handle.push(line.to_string());
        }
    }
}

impl Write for DebugLogWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.pending.extend_from_slice(buf);
        self.flush_pending(false);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.flush_pending(true);
        Ok(())
    }
}

/// Panel following the tail of the log.
#[derive(Debug)]
pub struct DebugLogComponent {
    handle: DebugLogHandle,
}

impl DebugLogComponent {
    pub fn new(handle: DebugLogHandle) -> Self {
        Self { handle }
    }
}

impl Component for DebugLogComponent {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, ctx: &ComponentContext) {
        if area.width < 3 || area.height < 3 {
            return;
        }
        let palette = ctx.palette();
        let block = Block::default()
            .borders(Borders::ALL)
            .title("Debug log (F12)")
            .border_style(Style::default().fg(palette.muted));
        let view = block.inner(area).height as usize;
        let lines: Vec<Line> = self
            .handle
            .tail(view)
            .into_iter()
            .map(Line::from)
            .collect();
        frame.render_widget(Clear, area);
        frame.render_widget(
            Paragraph::new(lines)
                .block(block)
                .style(Style::default().fg(palette.fg).bg(palette.bg)),
            area,
        );
    }
}
