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

use crate::{NvtCommand, NvtOption};
use bytes::Bytes;

/// One decoded (or to-be-encoded) protocol unit following an IAC.
///
/// Plain negotiations carry an empty `argument`; only subnegotiations
/// (`command == SB`) carry one. `length` is the number of bytes the unit
/// occupied after the leading IAC, so a caller holding a read cursor at the
/// IAC advances it by `length + 1`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NvtSequence {
    /// Command following the IAC
    pub command: NvtCommand,
    /// Option the command applies to
    pub option: NvtOption,
    /// Subnegotiation value, empty for plain negotiations
    pub argument: Bytes,
    /// Encoded length beyond the leading IAC
    pub length: usize,
}

impl NvtSequence {
    /// Creates a two byte `<cmd> <option>` sequence.
    pub fn negotiation(command: NvtCommand, option: NvtOption) -> NvtSequence {
        NvtSequence {
            command,
            option,
            argument: Bytes::new(),
            length: 2,
        }
    }

    /// Creates a `SB <option> 0 <argument> IAC SE` sequence.
    pub fn subnegotiation(option: NvtOption, argument: impl Into<Bytes>) -> NvtSequence {
        let argument = argument.into();
        let length = argument.len() + 5;
        NvtSequence {
            command: NvtCommand::Subnegotiation,
            option,
            argument,
            length,
        }
    }

    /// True if this is a subnegotiation.
    pub fn is_subnegotiation(&self) -> bool {
        self.command == NvtCommand::Subnegotiation
    }
}

impl std::fmt::Display for NvtSequence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "IAC Seq: Cmd: {} Opt: {} Arg: '{}'",
            self.command,
            self.option,
            String::from_utf8_lossy(&self.argument).escape_debug()
        )
    }
}
