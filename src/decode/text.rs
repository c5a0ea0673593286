use log::trace;
use thiserror::Error;

use crate::core::mask::AttributeMask;
use crate::core::mesh::{self, MeshRecord};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    ReadingFlags,
    ReadingVertices,
    ReadingIndices,
}

/// Incremental decoder for the text variant of the mesh format.
///
/// Input may be fed in chunks of any size; a line split across two chunks is
/// carried over until its newline arrives. Vertex and index counts are not
/// stored in the text, they follow from the number of lines of each block.
#[derive(Debug)]
pub struct TextDecoder {
    state: State,
    /// Incomplete last line of the input fed so far.
    pending: String,
    line_no: usize,
    mask: AttributeMask,
    vertices: Vec<f32>,
    indices: Vec<u32>,
}

impl Default for TextDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl TextDecoder {
    pub fn new() -> Self {
        Self {
            state: State::ReadingFlags,
            pending: String::new(),
            line_no: 0,
            mask: AttributeMask::NONE,
            vertices: Vec::new(),
            indices: Vec::new(),
        }
    }

    /// Consumes every complete line of `chunk`.
    pub fn feed(&mut self, chunk: &str) -> Result<(), Err> {
        let mut buffer = std::mem::take(&mut self.pending);
        buffer.push_str(chunk);

        let mut start = 0;
        while let Some(len) = buffer[start..].find('\n') {
            self.line(&buffer[start..start + len])?;
            start += len + 1;
        }

        buffer.drain(..start);
        self.pending = buffer;
        Ok(())
    }

    /// Ends the input and returns the decoded mesh. A last line without a
    /// trailing newline is accepted.
    pub fn finish(mut self) -> Result<MeshRecord, Err> {
        if !self.pending.is_empty() {
            let last = std::mem::take(&mut self.pending);
            self.line(&last)?;
        }

        match self.state {
            State::ReadingFlags => return Err(Err::MissingFlagLine),
            State::ReadingVertices => return Err(Err::MissingSeparator),
            State::ReadingIndices => {}
        }
        trace!("text decoder: done after {} lines", self.line_no);

        Ok(MeshRecord::new(self.mask, self.vertices, self.indices)?)
    }

    fn line(&mut self, line: &str) -> Result<(), Err> {
        self.line_no += 1;
        let line = line.strip_suffix('\r').unwrap_or(line);

        match self.state {
            State::ReadingFlags => {
                for c in line.chars().filter(|c| !c.is_whitespace()) {
                    let flag = AttributeMask::from_flag_char(c)
                        .ok_or(Err::UnknownFlag { line: self.line_no, flag: c })?;
                    self.mask |= flag;
                }
                self.transition(State::ReadingVertices);
            }
            State::ReadingVertices => {
                if line.trim().is_empty() {
                    self.transition(State::ReadingIndices);
                    return Ok(());
                }
                let expected = self.mask.components_per_vertex();
                let before = self.vertices.len();
                for token in line.split_whitespace() {
                    let value = token.parse::<f32>()
                        .map_err(|_| Err::InvalidFloat { line: self.line_no, token: token.to_owned() })?;
                    self.vertices.push(value);
                }
                let found = self.vertices.len() - before;
                if found != expected {
                    return Err(Err::ComponentCountMismatch { line: self.line_no, expected, found });
                }
            }
            State::ReadingIndices => {
                if line.trim().is_empty() {
                    return Ok(());
                }
                let before = self.indices.len();
                for token in line.split_whitespace() {
                    let value = token.parse::<u32>()
                        .map_err(|_| Err::InvalidIndex { line: self.line_no, token: token.to_owned() })?;
                    self.indices.push(value);
                }
                let found = self.indices.len() - before;
                if found != 3 {
                    return Err(Err::IndexCountMismatch { line: self.line_no, found });
                }
            }
        }
        Ok(())
    }

    fn transition(&mut self, next: State) {
        trace!("text decoder: {:?} -> {:?} at line {}", self.state, next, self.line_no);
        self.state = next;
    }
}

/// Decodes a whole text-format mesh at once.
pub fn decode_text(text: &str) -> Result<MeshRecord, Err> {
    let mut decoder = TextDecoder::new();
    decoder.feed(text)?;
    decoder.finish()
}

/// Like [decode_text], for raw file contents.
pub fn decode_text_bytes(data: &[u8]) -> Result<MeshRecord, Err> {
    decode_text(std::str::from_utf8(data)?)
}

#[remain::sorted]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Err {
    #[error("Line {line}: expected {expected} floats per vertex, found {found}")]
    ComponentCountMismatch { line: usize, expected: usize, found: usize },

    #[error("Line {line}: expected 3 indices per triangle, found {found}")]
    IndexCountMismatch { line: usize, found: usize },

    #[error("Line {line}: invalid float {token:?}")]
    InvalidFloat { line: usize, token: String },

    #[error("Line {line}: invalid index {token:?}")]
    InvalidIndex { line: usize, token: String },

    #[error("Decoded mesh is invalid: {0}")]
    InvalidMesh(#[from] mesh::Err),

    #[error("The input is empty; the attribute flag line is missing")]
    MissingFlagLine,

    #[error("No blank line separates the vertex block from the index block")]
    MissingSeparator,

    #[error("Line {line}: unknown attribute flag {flag:?}")]
    UnknownFlag { line: usize, flag: char },

    #[error("The input is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),
}
