use core::fmt;
use regex::bytes::Regex;
use std::{collections::VecDeque, io::BufRead};
use tracing::{debug, warn};

use crate::error::{Error, Result};

/*
 * Longest token a node can hold, in bytes
 */
pub const MAX_TOKEN_LEN: usize = 63;

/*
 * A token made of exactly these bytes stops reading
 */
pub const SENTINEL: &[u8] = b".";

// Any run of bytes that are not ASCII whitespace (same set as C's isspace)
const WORD_PATTERN: &str = r"(?-u:\S)+";

/*
 * A bounded token stored inline, so a node never needs a second allocation.
 * Bytes are kept raw : input is not required to be UTF-8.
 */
#[derive(Clone, Copy)]
pub struct Token {
    bytes: [u8; MAX_TOKEN_LEN],
    len: u8,
}

impl Token {
    pub fn new(bytes: &[u8]) -> Result<Self> {
        if bytes.len() > MAX_TOKEN_LEN {
            return Err(Error::TokenTooLong {
                len: bytes.len(),
                max: MAX_TOKEN_LEN,
            });
        }
        let mut token = Token {
            bytes: [0; MAX_TOKEN_LEN],
            len: bytes.len() as u8,
        };
        token.bytes[..bytes.len()].copy_from_slice(bytes);
        Ok(token)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len as usize]
    }

    pub fn is_sentinel(&self) -> bool {
        self.as_bytes() == SENTINEL
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl Eq for Token {}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(self.as_bytes()))
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", String::from_utf8_lossy(self.as_bytes()))
    }
}

/*
 * What to do with a word longer than `MAX_TOKEN_LEN`
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Overlong {
    /*
     * Cut the word into consecutive bounded tokens, like a bounded read does
     */
    #[default]
    Split,
    /*
     * Fail with `Error::TokenTooLong`
     */
    Reject,
}

/*
 * Yields tokens from a line-oriented reader until the sentinel token or
 * end-of-stream. Lines are pulled one at a time so nothing past the
 * sentinel's line is ever read.
 */
pub struct TokenSource<R> {
    reader: R,
    words: Regex,
    overlong: Overlong,
    pending: VecDeque<Token>,
    line: Vec<u8>,
    line_no: usize,
    done: bool,
}

impl<R: BufRead> TokenSource<R> {
    pub fn new(reader: R, overlong: Overlong) -> Result<Self> {
        Ok(TokenSource {
            reader,
            words: Regex::new(WORD_PATTERN)?,
            overlong,
            pending: VecDeque::new(),
            line: Vec::new(),
            line_no: 0,
            done: false,
        })
    }

    /*
     * Next token, or None once the sentinel or end-of-stream was seen.
     * After returning None (or an error) the source stays exhausted.
     */
    pub fn next_token(&mut self) -> Result<Option<Token>> {
        while !self.done {
            if let Some(token) = self.pending.pop_front() {
                if token.is_sentinel() {
                    debug!(line = self.line_no, "sentinel reached");
                    self.finish();
                    return Ok(None);
                }
                return Ok(Some(token));
            }
            if let Err(err) = self.fill() {
                self.finish();
                return Err(err);
            }
        }
        Ok(None)
    }

    fn finish(&mut self) {
        self.done = true;
        self.pending.clear();
    }

    // Tokenize the next input line into `pending`
    fn fill(&mut self) -> Result<()> {
        self.line.clear();
        if self.reader.read_until(b'\n', &mut self.line)? == 0 {
            debug!(lines = self.line_no, "end of input");
            self.done = true;
            return Ok(());
        }
        self.line_no += 1;

        for word in self.words.find_iter(&self.line) {
            let word = word.as_bytes();
            if word.len() > MAX_TOKEN_LEN {
                match self.overlong {
                    Overlong::Reject => {
                        return Err(Error::TokenTooLong {
                            len: word.len(),
                            max: MAX_TOKEN_LEN,
                        })
                    }
                    Overlong::Split => warn!(
                        line = self.line_no,
                        len = word.len(),
                        max = MAX_TOKEN_LEN,
                        "overlong word split into bounded tokens"
                    ),
                }
            }
            for chunk in word.chunks(MAX_TOKEN_LEN) {
                self.pending.push_back(Token::new(chunk)?);
            }
        }
        Ok(())
    }
}

impl<R: BufRead> Iterator for TokenSource<R> {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token().transpose()
    }
}
