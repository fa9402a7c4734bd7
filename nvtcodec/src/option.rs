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

use crate::{NvtError, consts};

///
/// Negotiable options understood by the engine.
///
/// See the [IANA registry](https://www.iana.org/assignments/telnet-options/telnet-options.xhtml).
/// Option bytes outside this set cannot be decoded and are rejected by the parser.
///
#[repr(u8)]
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum NvtOption {
    /// [`consts::option::BINARY`] Telnet Binary Transmission [RFC856](https://tools.ietf.org/html/rfc856)
    Binary = consts::option::BINARY,
    /// [`consts::option::ECHO`] Telnet Echo Option [RFC857](https://tools.ietf.org/html/rfc857)
    Echo = consts::option::ECHO,
    /// [`consts::option::SGA`] Suppress Go Ahead [RFC858](https://tools.ietf.org/html/rfc858)
    SuppressGoAhead = consts::option::SGA,
    /// [`consts::option::SNDLOC`] Send Location [RFC779](http://www.iana.org/go/rfc779)
    SendLocation = consts::option::SNDLOC,
    /// [`consts::option::LINEMODE`] Linemode [RFC1184](http://www.iana.org/go/rfc1184)
    Linemode = consts::option::LINEMODE,
}

impl NvtOption {
    /// Every option, in wire-value order.
    pub const ALL: [NvtOption; 5] = [
        NvtOption::Binary,
        NvtOption::Echo,
        NvtOption::SuppressGoAhead,
        NvtOption::SendLocation,
        NvtOption::Linemode,
    ];

    /// Wire value of the option.
    pub fn to_u8(self) -> u8 {
        self as u8
    }
}

impl std::fmt::Display for NvtOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NvtOption::Binary => write!(f, "BINARY"),
            NvtOption::Echo => write!(f, "ECHO"),
            NvtOption::SuppressGoAhead => write!(f, "SUPPRESS_GA"),
            NvtOption::SendLocation => write!(f, "SEND_LOCATION"),
            NvtOption::Linemode => write!(f, "LINEMODE"),
        }
    }
}

impl From<NvtOption> for u8 {
    fn from(option: NvtOption) -> Self {
        option.to_u8()
    }
}

impl TryFrom<u8> for NvtOption {
    type Error = NvtError;

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        match byte {
            consts::option::BINARY => Ok(NvtOption::Binary),
            consts::option::ECHO => Ok(NvtOption::Echo),
            consts::option::SGA => Ok(NvtOption::SuppressGoAhead),
            consts::option::SNDLOC => Ok(NvtOption::SendLocation),
            consts::option::LINEMODE => Ok(NvtOption::Linemode),
            byte => Err(NvtError::UnknownOption(byte)),
        }
    }
}
