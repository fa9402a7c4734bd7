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

use crate::NvtCommand;
use thiserror::Error;

/// Result Type for NVT Operations
pub type NvtResult<T> = Result<T, NvtError>;

/// Errors raised while converting wire bytes or writing negotiations to a transport.
///
/// Decoding never produces one of these; a sequence that cannot be decoded is
/// reported as absence by [`crate::Nvt::parse_sequence`].
#[derive(Debug, Error)]
pub enum NvtError {
    /// The transport failed outright.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The transport accepted fewer bytes than were handed to it.
    #[error("short write: {written} of {expected} bytes")]
    ShortWrite {
        /// Number of bytes in the encoded sequence
        expected: usize,
        /// Number of bytes the transport reported as written
        written: usize,
    },

    /// The command has no acknowledging counterpart.
    #[error("do not know how to ACK: {0}")]
    NoAcknowledgement(NvtCommand),

    /// The command has no refusing counterpart.
    #[error("do not know how to NAK: {0}")]
    NoRefusal(NvtCommand),

    /// The byte is not a Telnet command opcode.
    #[error("unknown telnet command: 0x{0:02X}")]
    UnknownCommand(u8),

    /// The byte is not an option this engine negotiates.
    #[error("unknown telnet option: {0}")]
    UnknownOption(u8),
}

impl NvtError {
    /// Check if the error came from the transport rather than from the request itself.
    pub fn is_transport_error(&self) -> bool {
        matches!(self, NvtError::Io(_) | NvtError::ShortWrite { .. })
    }
}
