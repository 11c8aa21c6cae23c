/// Which stream a line of text belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    /// Narration: descriptions, confirmations, refusals.
    Feedback,
    /// Text printed by the world itself, e.g. writing that goes down the drain.
    Output,
}

/// One line of text produced while running a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// Where the line goes.
    pub channel: Channel,
    /// The text, without a trailing newline.
    pub text: String,
}

impl Line {
    /// A narration line.
    pub fn feedback(text: impl Into<String>) -> Self {
        Self {
            channel: Channel::Feedback,
            text: text.into(),
        }
    }

    /// A line of printed output.
    pub fn output(text: impl Into<String>) -> Self {
        Self {
            channel: Channel::Output,
            text: text.into(),
        }
    }
}

/// Buffer of lines waiting to be routed by the front end.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    lines: Vec<Line>,
}

impl Transcript {
    /// Buffer `line` until the next drain.
    pub fn push(&mut self, line: Line) {
        self.lines.push(line);
    }

    /// Take all buffered lines, leaving the transcript empty.
    pub fn drain(&mut self) -> Vec<Line> {
        std::mem::take(&mut self.lines)
    }
}

/// Uppercase the first character of `text`.
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
