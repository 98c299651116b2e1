use std::collections::VecDeque;
use std::io::Read;

/// A lookahead-capable character stream `in(n)`/`in(c)` read from.
///
/// Implementations shipped by this crate ([`ChannelInputSource`], [`EchoInputSource`])
/// are eager: they read their entire source up front, so `is_eof_confirmed` is always
/// `true` and `iter_buffered` never blocks. A front-end that wants truly interactive,
/// streamed input (the TUI debugger, out of scope here — see §1 of SPEC_FULL.md) can
/// implement this trait with a lazily-filled buffer instead.
pub trait InputSource {
    /// Iterates over the currently buffered characters without consuming them.
    fn iter_buffered(&self) -> Box<dyn Iterator<Item = char> + '_>;
    /// Removes and returns the head character. Panics if nothing is buffered.
    fn dequeue(&mut self) -> char;
    fn buffered_len(&self) -> usize;
    fn is_eof_confirmed(&self) -> bool;
}

/// Wraps an [`InputSource`] with the integer/char lookahead parsing `in(n)`/`in(c)`
/// need.
pub struct InputBuffer<S: InputSource> {
    source: S,
}

struct ScannedInteger {
    consume_chars: usize,
    value: i128,
}

impl<S: InputSource> InputBuffer<S> {
    pub fn new(source: S) -> Self {
        InputBuffer { source }
    }

    /// Scans from the head, skipping leading ASCII whitespace, then an optional
    /// sign followed by one or more digits, stopping at the first non-digit.
    /// Returns `None` if the non-space portion is empty or is just a lone sign.
    fn scan_integer(&self) -> Option<ScannedInteger> {
        let mut space_count = 0usize;
        let mut matched = String::new();

        for c in self.source.iter_buffered() {
            if matched.is_empty() {
                if c.is_ascii_whitespace() {
                    space_count += 1;
                    continue;
                }
                if c == '+' || c == '-' || c.is_ascii_digit() {
                    matched.push(c);
                    continue;
                }
                return None;
            }
            if c.is_ascii_digit() {
                matched.push(c);
            } else {
                break;
            }
        }

        if matched.is_empty() || matched == "+" || matched == "-" {
            return None;
        }

        Some(ScannedInteger {
            consume_chars: space_count + matched.chars().count(),
            value: matched.parse().expect("matched only sign + digits"),
        })
    }

    pub fn validate_request_integer(&self) -> bool {
        self.scan_integer().is_some()
    }

    /// Consumes the whitespace and integer characters (leaving the character that
    /// stopped the scan buffered) and returns the parsed value. Panics if
    /// [`validate_request_integer`](Self::validate_request_integer) would return
    /// `false`; callers must validate first.
    pub fn request_integer(&mut self) -> i128 {
        let scanned = self
            .scan_integer()
            .expect("request_integer called without a valid integer buffered");
        for _ in 0..scanned.consume_chars {
            self.source.dequeue();
        }
        scanned.value
    }

    pub fn validate_request_char(&self) -> bool {
        self.source.buffered_len() > 0
    }

    /// Consumes one character and returns its Unicode code point. Panics if
    /// [`validate_request_char`](Self::validate_request_char) would return `false`.
    pub fn request_char(&mut self) -> i128 {
        self.source.dequeue() as i128
    }
}

fn eager_buffer(text: impl Into<String>) -> VecDeque<char> {
    text.into().chars().collect()
}

/// An [`InputSource`] that eagerly reads an entire [`Read`] stream (stdin, or a
/// `-i/--input` file) into memory.
pub struct ChannelInputSource {
    buffer: VecDeque<char>,
}

impl ChannelInputSource {
    pub fn new(mut reader: impl Read) -> std::io::Result<Self> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        Ok(ChannelInputSource {
            buffer: eager_buffer(text),
        })
    }
}

impl InputSource for ChannelInputSource {
    fn iter_buffered(&self) -> Box<dyn Iterator<Item = char> + '_> {
        Box::new(self.buffer.iter().copied())
    }

    fn dequeue(&mut self) -> char {
        self.buffer
            .pop_front()
            .expect("dequeue called with no buffered input")
    }

    fn buffered_len(&self) -> usize {
        self.buffer.len()
    }

    fn is_eof_confirmed(&self) -> bool {
        true
    }
}

/// An [`InputSource`] backed by a literal string, used for `-e/--echo`. Just a
/// [`ChannelInputSource`] over the string's bytes; reading from an in-memory buffer
/// cannot fail.
pub struct EchoInputSource {
    inner: ChannelInputSource,
}

impl EchoInputSource {
    pub fn new(text: impl Into<String>) -> Self {
        EchoInputSource {
            inner: ChannelInputSource::new(text.into().as_bytes())
                .expect("reading from an in-memory string cannot fail"),
        }
    }
}

impl InputSource for EchoInputSource {
    fn iter_buffered(&self) -> Box<dyn Iterator<Item = char> + '_> {
        self.inner.iter_buffered()
    }

    fn dequeue(&mut self) -> char {
        self.inner.dequeue()
    }

    fn buffered_len(&self) -> usize {
        self.inner.buffered_len()
    }

    fn is_eof_confirmed(&self) -> bool {
        self.inner.is_eof_confirmed()
    }
}
