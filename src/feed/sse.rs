//! `text/event-stream` decoding
//!
//! Incremental parser for server-sent events. Bytes go in as they arrive off
//! the wire, in chunks of any size; complete events come out.
//!
//! Follows the HTML event-stream interpretation rules: `data`, `event`,
//! `id` and `retry` fields, `:` comments, CR / LF / CRLF line endings, and
//! multi-line `data` joined with `\n`. An event is dispatched on a blank
//! line, and only if it carried data. One leading UTF-8 byte order mark is
//! skipped at the start of each stream.

use std::time::Duration;

const BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// Longest line kept. Anything past it up to the next line break is dropped.
pub const MAX_LINE_LEN: usize = 1024 * 1024;

/// One dispatched event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SseEvent {
    /// Event type, `message` when the stream did not name one
    pub event: String,
    pub data: String,
    /// Last event id seen on the stream at dispatch time
    pub id: Option<String>,
}

impl SseEvent {
    /// A default-typed event carrying `data`
    pub fn message(data: impl Into<String>) -> Self {
        Self {
            event: "message".to_string(),
            data: data.into(),
            id: None,
        }
    }
}

/// Streaming decoder state
#[derive(Debug, Default)]
pub struct SseDecoder {
    /// Past the optional byte order mark
    started: bool,
    /// Leading bytes matched against the byte order mark so far
    bom_matched: usize,
    line: Vec<u8>,
    /// Current line went over `MAX_LINE_LEN`; skip to the next break
    overflow: bool,
    /// Last byte seen was a CR; a following LF belongs to the same break
    after_cr: bool,
    data: String,
    has_data: bool,
    event: Option<String>,
    last_id: Option<String>,
    retry: Option<Duration>,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a chunk, returning every event it completed
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<SseEvent> {
        let mut events = Vec::new();

        for &byte in chunk {
            if !self.started {
                if byte == BOM[self.bom_matched] {
                    self.bom_matched += 1;
                    if self.bom_matched == BOM.len() {
                        self.started = true;
                    }
                    continue;
                }

                // Not a byte order mark after all: replay what was held back
                self.started = true;
                let held = std::mem::take(&mut self.bom_matched);
                for &b in &BOM[..held] {
                    self.push_byte(b, &mut events);
                }
            }

            self.push_byte(byte, &mut events);
        }

        events
    }

    /// Last event id, for `Last-Event-ID` on reconnect
    pub fn last_event_id(&self) -> Option<&str> {
        self.last_id.as_deref()
    }

    fn push_byte(&mut self, byte: u8, events: &mut Vec<SseEvent>) {
        match byte {
            b'\n' if self.after_cr => {
                self.after_cr = false;
            }
            b'\n' | b'\r' => {
                self.after_cr = byte == b'\r';
                let line = std::mem::take(&mut self.line);
                if std::mem::take(&mut self.overflow) {
                    return;
                }
                if let Some(event) = self.process_line(&line) {
                    events.push(event);
                }
            }
            _ => {
                self.after_cr = false;
                if self.overflow {
                    return;
                }
                if self.line.len() >= MAX_LINE_LEN {
                    tracing::warn!(limit = MAX_LINE_LEN, "Dropping over-long event-stream line");
                    self.line = Vec::new();
                    self.overflow = true;
                    return;
                }
                self.line.push(byte);
            }
        }
    }

    /// Reconnection delay requested by the server
    pub fn retry(&self) -> Option<Duration> {
        self.retry
    }

    /// Forget a half-received event (the connection dropped). The last event
    /// id and retry hint survive, as they apply to the next connection.
    pub fn reset(&mut self) {
        self.started = false;
        self.bom_matched = 0;
        self.line.clear();
        self.overflow = false;
        self.after_cr = false;
        self.data.clear();
        self.has_data = false;
        self.event = None;
    }

    fn process_line(&mut self, raw: &[u8]) -> Option<SseEvent> {
        if raw.is_empty() {
            return self.dispatch();
        }

        let line = String::from_utf8_lossy(raw);

        // Comment
        if line.starts_with(':') {
            return None;
        }

        let (field, value) = match line.find(':') {
            Some(idx) => {
                let value = &line[idx + 1..];
                (&line[..idx], value.strip_prefix(' ').unwrap_or(value))
            }
            None => (&*line, ""),
        };

        match field {
            "data" => {
                if self.has_data {
                    self.data.push('\n');
                }
                self.data.push_str(value);
                self.has_data = true;
            }
            "event" => self.event = Some(value.to_string()),
            "id" => {
                // Ids containing NUL are ignored
                if !value.contains('\0') {
                    self.last_id = Some(value.to_string());
                }
            }
            "retry" => {
                if !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit()) {
                    if let Ok(ms) = value.parse::<u64>() {
                        self.retry = Some(Duration::from_millis(ms));
                    }
                }
            }
            _ => {}
        }

        None
    }

    fn dispatch(&mut self) -> Option<SseEvent> {
        let event_type = self.event.take();

        if !self.has_data {
            return None;
        }
        self.has_data = false;

        let event = event_type
            .filter(|e| !e.is_empty())
            .unwrap_or_else(|| "message".to_string());

        Some(SseEvent {
            event,
            data: std::mem::take(&mut self.data),
            id: self.last_id.clone(),
        })
    }
}
