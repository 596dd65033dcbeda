// SPDX-FileCopyrightText: 2025 - 2026 Eli Array Minkoff
//
// SPDX-License-Identifier: 0BSD

//! Reading intcode programs from text and binary files
//!
//! # Example
//!
//! ```
//! use intcode::loader::parse_program;
//! assert_eq!(parse_program("1,0,0,0,99\n"), Ok(vec![1, 0, 0, 0, 99]));
//! assert!(parse_program("1,0,,99").is_err());
//! ```

use std::fs;
use std::io;
use std::num::ParseIntError;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// The on-disk encoding of a program
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// comma-separated ASCII-encoded decimal numbers
    #[default]
    Ascii,
    /// little-endian 64-bit integers
    LittleEndian,
    /// big-endian 64-bit integers
    BigEndian,
}

/// An error encountered while loading a program
#[derive(Debug, Error)]
pub enum LoadError {
    /// The program contained no ints at all
    #[error("program is empty")]
    Empty,
    /// An item in a text program could not be parsed as an [i64]
    #[error("int {index} ({token:?}) is not a valid i64: {source}")]
    BadInt {
        /// zero-based position of the item
        index: usize,
        /// the item, with surrounding whitespace removed
        token: String,
        /// the underlying parse error
        #[source]
        source: ParseIntError,
    },
    /// A binary program's size was not a multiple of 8 bytes
    #[error("expected 8 bytes, got {}: {:02x?}", .0.len(), .0)]
    IncompleteWord(Box<[u8]>),
    /// The file could not be read
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        /// the file that could not be read
        path: PathBuf,
        /// the underlying I/O error
        #[source]
        source: io::Error,
    },
}

// io::Error has no PartialEq, so compare by kind
impl PartialEq for LoadError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Empty, Self::Empty) => true,
            (
                Self::BadInt {
                    index: i1,
                    token: t1,
                    source: s1,
                },
                Self::BadInt {
                    index: i2,
                    token: t2,
                    source: s2,
                },
            ) => i1 == i2 && t1 == t2 && s1 == s2,
            (Self::IncompleteWord(lhs), Self::IncompleteWord(rhs)) => lhs == rhs,
            (
                Self::Io {
                    path: p1,
                    source: s1,
                },
                Self::Io {
                    path: p2,
                    source: s2,
                },
            ) => p1 == p2 && s1.kind() == s2.kind(),
            _ => false,
        }
    }
}

/// Parse comma-separated decimal ints. Whitespace around each one, including a trailing newline,
/// is ignored.
pub fn parse_program(text: &str) -> Result<Vec<i64>, LoadError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(LoadError::Empty);
    }
    text.split(',')
        .map(str::trim)
        .enumerate()
        .map(|(index, token)| {
            token.parse().map_err(|source| LoadError::BadInt {
                index,
                token: token.to_owned(),
                source,
            })
        })
        .collect()
}

/// Decode a binary program, 8 bytes per int
pub fn decode_binary(bytes: &[u8], format: Format) -> Result<Vec<i64>, LoadError> {
    let decode = match format {
        Format::LittleEndian => i64::from_le_bytes,
        Format::BigEndian => i64::from_be_bytes,
        Format::Ascii => {
            return parse_program(&String::from_utf8_lossy(bytes));
        }
    };
    let chunks = bytes.chunks_exact(8);
    let remainder = chunks.remainder();
    if !remainder.is_empty() {
        return Err(LoadError::IncompleteWord(Box::from(remainder)));
    }
    let code: Vec<i64> = chunks
        .map(|c| {
            let mut word = [0; 8];
            word.copy_from_slice(c);
            decode(word)
        })
        .collect();
    if code.is_empty() {
        return Err(LoadError::Empty);
    }
    Ok(code)
}

/// Encode a program as binary, 8 bytes per int. [`Format::Ascii`] produces the text format.
pub fn encode(code: &[i64], format: Format) -> Vec<u8> {
    match format {
        Format::Ascii => {
            let mut text = itertools::join(code, ",");
            text.push('\n');
            text.into_bytes()
        }
        Format::LittleEndian => code.iter().flat_map(|i| i.to_le_bytes()).collect(),
        Format::BigEndian => code.iter().flat_map(|i| i.to_be_bytes()).collect(),
    }
}

/// Read a program from the file at `path`
pub fn read_program(path: impl AsRef<Path>, format: Format) -> Result<Vec<i64>, LoadError> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_owned(),
        source,
    })?;
    log::debug!("read {} bytes from {}", bytes.len(), path.display());
    decode_binary(&bytes, format)
}
