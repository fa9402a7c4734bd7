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

//! Raw byte values of the Telnet NVT wire grammar.

/// End of subnegotiation parameters.
pub const SE: u8 = 240;
/// No operation.
pub const NOP: u8 = 241;
/// Data Mark, the data stream portion of a Synch.
pub const DM: u8 = 242;
/// NVT character BRK.
pub const BRK: u8 = 243;
/// Interrupt Process.
pub const IP: u8 = 244;
/// Abort Output.
pub const AO: u8 = 245;
/// Are You There.
pub const AYT: u8 = 246;
/// Erase Character.
pub const EC: u8 = 247;
/// Erase Line.
pub const EL: u8 = 248;
/// Go Ahead.
pub const GA: u8 = 249;
/// Subnegotiation of the indicated option follows.
pub const SB: u8 = 250;
/// Desire to begin, or confirmation of, performing the indicated option.
pub const WILL: u8 = 251;
/// Refusal to perform, or to continue performing, the indicated option.
pub const WONT: u8 = 252;
/// Request that the other party perform the indicated option.
pub const DO: u8 = 253;
/// Demand that the other party stop performing the indicated option.
pub const DONT: u8 = 254;
/// Interpret As Command.
pub const IAC: u8 = 255;

/// Subnegotiation flag: a value follows.
pub const SB_VALUE: u8 = 0x00;
/// Subnegotiation flag: no value, this is a query.
pub const SB_QUERY: u8 = 0x01;

/// Option codes understood by the engine.
pub mod option {
    /// Binary Transmission [RFC856](https://tools.ietf.org/html/rfc856)
    pub const BINARY: u8 = 0;
    /// Echo [RFC857](https://tools.ietf.org/html/rfc857)
    pub const ECHO: u8 = 1;
    /// Suppress Go Ahead [RFC858](https://tools.ietf.org/html/rfc858)
    pub const SGA: u8 = 3;
    /// Send Location [RFC779](http://www.iana.org/go/rfc779)
    pub const SNDLOC: u8 = 23;
    /// Linemode [RFC1184](http://www.iana.org/go/rfc1184)
    pub const LINEMODE: u8 = 34;
}
