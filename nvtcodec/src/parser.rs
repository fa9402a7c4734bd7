//
// Copyright 2017-2026 Hans W. Uhlig. All Rights Reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//

//! Decoding of a single sequence following an IAC.
//!
//! The scanner borrows the caller's buffer and never mutates it. It reports
//! how far the sequence extended so the caller can advance its own cursor.

use crate::{NvtCommand, NvtOption, NvtSequence, consts};
use bytes::Bytes;

/// Outcome of scanning the bytes after an IAC.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum Scan {
    /// A full sequence was decoded; its `length` is the number of bytes consumed.
    Complete(NvtSequence),
    /// The input ended before the grammar was satisfied.
    Incomplete,
    /// The bytes cannot form a sequence. Discarding `skip` bytes resynchronizes.
    Malformed {
        /// Bytes to discard after the IAC
        skip: usize,
        /// Why the bytes were rejected
        reason: &'static str,
    },
}

/// Read position over a borrowed byte slice.
struct Cursor<'a> {
    input: &'a [u8],
    position: usize,
}

impl<'a> Cursor<'a> {
    fn new(input: &'a [u8]) -> Cursor<'a> {
        Cursor { input, position: 0 }
    }

    fn position(&self) -> usize {
        self.position
    }

    fn take(&mut self) -> Option<u8> {
        let byte = *self.input.get(self.position)?;
        self.position += 1;
        Some(byte)
    }

    /// Consumes bytes up to, but not including, the next `stop` byte or the end of input.
    fn take_until(&mut self, stop: u8) -> &'a [u8] {
        let rest = &self.input[self.position..];
        let len = rest.iter().position(|b| *b == stop).unwrap_or(rest.len());
        self.position += len;
        &rest[..len]
    }

    /// Offset just past the next `IAC SE` at or after the cursor.
    fn find_terminator(&self) -> Option<usize> {
        self.input[self.position..]
            .windows(2)
            .position(|pair| pair == [consts::IAC, consts::SE])
            .map(|offset| self.position + offset + 2)
    }
}

/// Scans one sequence from `input`, which starts just after a consumed IAC.
pub(crate) fn scan(input: &[u8]) -> Scan {
    let mut cursor = Cursor::new(input);
    let Some(byte) = cursor.take() else {
        return Scan::Incomplete;
    };
    let Ok(command) = NvtCommand::try_from(byte) else {
        return Scan::Malformed {
            skip: 1,
            reason: "byte is not a command",
        };
    };
    if command == NvtCommand::Subnegotiation {
        return scan_sb(cursor);
    }
    let Some(byte) = cursor.take() else {
        return Scan::Incomplete;
    };
    match NvtOption::try_from(byte) {
        Ok(option) => Scan::Complete(NvtSequence::negotiation(command, option)),
        Err(_) => Scan::Malformed {
            skip: cursor.position(),
            reason: "unknown option",
        },
    }
}

/// Scans `<option> 0 <value> IAC SE`, where `input` starts just after SB.
///
/// The reported length still counts the SB byte, as if scanned by [`scan`].
pub(crate) fn scan_subnegotiation(input: &[u8]) -> Scan {
    scan_sb(Cursor::new(input))
}

// SB <option> 0 <value> IAC SE, the cursor sits just past SB.
fn scan_sb(mut cursor: Cursor<'_>) -> Scan {
    let Some(byte) = cursor.take() else {
        return Scan::Incomplete;
    };
    let Ok(option) = NvtOption::try_from(byte) else {
        return resync(&cursor, "unknown subnegotiation option");
    };
    match cursor.take() {
        None => return Scan::Incomplete,
        Some(consts::SB_VALUE) => {}
        // Queries are only ever sent, never accepted.
        Some(_) => return resync(&cursor, "subnegotiation does not carry a value"),
    }
    let value = cursor.take_until(consts::IAC);
    if cursor.take().is_none() {
        return Scan::Incomplete;
    }
    match cursor.take() {
        None => Scan::Incomplete,
        Some(consts::SE) => Scan::Complete(NvtSequence::subnegotiation(
            option,
            Bytes::copy_from_slice(value),
        )),
        // Skip through the real terminator so no payload leaks out as data.
        Some(_) => resync(&cursor, "subnegotiation not terminated by IAC SE"),
    }
}

fn resync(cursor: &Cursor<'_>, reason: &'static str) -> Scan {
    match cursor.find_terminator() {
        Some(skip) => Scan::Malformed { skip, reason },
        None => Scan::Incomplete,
    }
}
