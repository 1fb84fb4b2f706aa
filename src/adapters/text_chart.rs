//! Terminal chart adapter.
//!
//! Implements [`ChartSink`] by drawing one strip per monitored pin, newest
//! sample on the right:
//!
//! ```text
//! t 12.0s … 17.0s (11 samples)
//! Pin  0 │▁▁▁▁▁██████│ HIGH
//! Pin  1 │▁▁▁▁▁▁▁▁▁▁▁│ LOW
//! ```

use std::io::Write;

use log::debug;

use crate::app::ports::ChartSink;
use crate::monitor::HistorySnapshot;

const LOW_GLYPH: char = '▁';
const HIGH_GLYPH: char = '█';

/// Render the last `width` samples of every pin.
pub fn render(history: &HistorySnapshot, width: usize) -> String {
    let mut out = String::new();
    match history.span() {
        Some((first, last)) => out.push_str(&format!(
            "t {:.1}s … {:.1}s ({} samples)\n",
            first,
            last,
            history.len()
        )),
        None => out.push_str("no samples yet\n"),
    }

    for (pin, values) in &history.series {
        let tail = &values[values.len().saturating_sub(width)..];
        let strip: String = tail
            .iter()
            .map(|&v| if v == 0 { LOW_GLYPH } else { HIGH_GLYPH })
            .collect();
        let state = match values.last() {
            Some(0) => "LOW",
            Some(_) => "HIGH",
            None => "-",
        };
        out.push_str(&format!("Pin {:>2} │{:<width$}│ {}\n", pin, strip, state, width = width));
    }
    out
}

/// Chart sink writing rendered frames to any writer (stdout by default).
pub struct TextChart<W: Write> {
    out: W,
    width: usize,
    clear_screen: bool,
}

impl TextChart<std::io::Stdout> {
    /// Full-screen chart on stdout.
    pub fn stdout(width: usize) -> Self {
        Self {
            out: std::io::stdout(),
            width,
            clear_screen: true,
        }
    }
}

impl<W: Write> TextChart<W> {
    /// Append frames to `out` without terminal control codes.
    pub fn new(out: W, width: usize) -> Self {
        Self {
            out,
            width,
            clear_screen: false,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ChartSink for TextChart<W> {
    fn draw(&mut self, history: &HistorySnapshot) {
        let frame = render(history, self.width);
        let result = if self.clear_screen {
            write!(self.out, "\x1b[2J\x1b[H{}", frame)
        } else {
            write!(self.out, "{}", frame)
        };
        if let Err(e) = result.and_then(|()| self.out.flush()) {
            debug!("TextChart: draw failed: {}", e);
        }
    }
}
