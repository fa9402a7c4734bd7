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
/// Telnet control opcodes [RFC854](https://tools.ietf.org/html/rfc854)
///
/// Every variant is bound to its one-byte wire value (240 through 255).
///
#[repr(u8)]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum NvtCommand {
    /// [`consts::SE`] End of subnegotiation parameters.
    SubnegotiationEnd = consts::SE,
    /// [`consts::NOP`] No operation.
    NoOperation = consts::NOP,
    /// [`consts::DM`] Data Mark, the data stream portion of a Synch.
    DataMark = consts::DM,
    /// [`consts::BRK`] The "break" or "attention" key was hit.
    Break = consts::BRK,
    /// [`consts::IP`] Suspend, interrupt or abort the attached process.
    InterruptProcess = consts::IP,
    /// [`consts::AO`] Let the current process finish without sending its output.
    AbortOutput = consts::AO,
    /// [`consts::AYT`] Send back visible evidence that the AYT was received.
    AreYouThere = consts::AYT,
    /// [`consts::EC`] Delete the last preceding undeleted character.
    EraseCharacter = consts::EC,
    /// [`consts::EL`] Delete back to, but not including, the previous CRLF.
    EraseLine = consts::EL,
    /// [`consts::GA`] Go Ahead.
    GoAhead = consts::GA,
    /// [`consts::SB`] Subnegotiation of the indicated option follows.
    Subnegotiation = consts::SB,
    /// [`consts::WILL`] Desire to begin, or confirmation of, performing an option.
    Will = consts::WILL,
    /// [`consts::WONT`] Refusal to perform, or continue performing, an option.
    Wont = consts::WONT,
    /// [`consts::DO`] Request that the other party perform an option.
    Do = consts::DO,
    /// [`consts::DONT`] Demand that the other party stop performing an option.
    Dont = consts::DONT,
    /// [`consts::IAC`] Interpret As Command.
    Iac = consts::IAC,
}

impl NvtCommand {
    /// Wire value of the command.
    pub fn to_u8(self) -> u8 {
        self as u8
    }

    /// The command that agrees with a received negotiation.
    ///
    /// `DO`/`DONT` are answered with `WILL`, `WILL`/`WONT` with `DO`. Every
    /// other command has no acknowledgement.
    pub fn acknowledge(self) -> Option<NvtCommand> {
        match self {
            NvtCommand::Do | NvtCommand::Dont => Some(NvtCommand::Will),
            NvtCommand::Will | NvtCommand::Wont => Some(NvtCommand::Do),
            NvtCommand::SubnegotiationEnd
            | NvtCommand::NoOperation
            | NvtCommand::DataMark
            | NvtCommand::Break
            | NvtCommand::InterruptProcess
            | NvtCommand::AbortOutput
            | NvtCommand::AreYouThere
            | NvtCommand::EraseCharacter
            | NvtCommand::EraseLine
            | NvtCommand::GoAhead
            | NvtCommand::Subnegotiation
            | NvtCommand::Iac => None,
        }
    }

    /// The command that refuses a received negotiation.
    ///
    /// `DO`/`DONT` are refused with `WONT`, `WILL`/`WONT` with `DONT`. Every
    /// other command has no refusal.
    pub fn refuse(self) -> Option<NvtCommand> {
        match self {
            NvtCommand::Do | NvtCommand::Dont => Some(NvtCommand::Wont),
            NvtCommand::Will | NvtCommand::Wont => Some(NvtCommand::Dont),
            NvtCommand::SubnegotiationEnd
            | NvtCommand::NoOperation
            | NvtCommand::DataMark
            | NvtCommand::Break
            | NvtCommand::InterruptProcess
            | NvtCommand::AbortOutput
            | NvtCommand::AreYouThere
            | NvtCommand::EraseCharacter
            | NvtCommand::EraseLine
            | NvtCommand::GoAhead
            | NvtCommand::Subnegotiation
            | NvtCommand::Iac => None,
        }
    }

    /// True for the four option negotiation verbs.
    pub fn is_negotiation(self) -> bool {
        matches!(
            self,
            NvtCommand::Will | NvtCommand::Wont | NvtCommand::Do | NvtCommand::Dont
        )
    }

    /// True for the commands that stand alone as `IAC <cmd>` on the wire.
    pub fn is_standalone(self) -> bool {
        matches!(
            self,
            NvtCommand::NoOperation
                | NvtCommand::DataMark
                | NvtCommand::Break
                | NvtCommand::InterruptProcess
                | NvtCommand::AbortOutput
                | NvtCommand::AreYouThere
                | NvtCommand::EraseCharacter
                | NvtCommand::EraseLine
                | NvtCommand::GoAhead
        )
    }
}

impl std::fmt::Display for NvtCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NvtCommand::SubnegotiationEnd => write!(f, "SE"),
            NvtCommand::NoOperation => write!(f, "NOP"),
            NvtCommand::DataMark => write!(f, "DM"),
            NvtCommand::Break => write!(f, "BRK"),
            NvtCommand::InterruptProcess => write!(f, "IP"),
            NvtCommand::AbortOutput => write!(f, "AO"),
            NvtCommand::AreYouThere => write!(f, "AYT"),
            NvtCommand::EraseCharacter => write!(f, "EC"),
            NvtCommand::EraseLine => write!(f, "EL"),
            NvtCommand::GoAhead => write!(f, "GA"),
            NvtCommand::Subnegotiation => write!(f, "SB"),
            NvtCommand::Will => write!(f, "WILL"),
            NvtCommand::Wont => write!(f, "WONT"),
            NvtCommand::Do => write!(f, "DO"),
            NvtCommand::Dont => write!(f, "DONT"),
            NvtCommand::Iac => write!(f, "IAC"),
        }
    }
}

impl From<NvtCommand> for u8 {
    fn from(command: NvtCommand) -> Self {
        command.to_u8()
    }
}

impl TryFrom<u8> for NvtCommand {
    type Error = NvtError;

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        match byte {
            consts::SE => Ok(NvtCommand::SubnegotiationEnd),
            consts::NOP => Ok(NvtCommand::NoOperation),
            consts::DM => Ok(NvtCommand::DataMark),
            consts::BRK => Ok(NvtCommand::Break),
            consts::IP => Ok(NvtCommand::InterruptProcess),
            consts::AO => Ok(NvtCommand::AbortOutput),
            consts::AYT => Ok(NvtCommand::AreYouThere),
            consts::EC => Ok(NvtCommand::EraseCharacter),
            consts::EL => Ok(NvtCommand::EraseLine),
            consts::GA => Ok(NvtCommand::GoAhead),
            consts::SB => Ok(NvtCommand::Subnegotiation),
            consts::WILL => Ok(NvtCommand::Will),
            consts::WONT => Ok(NvtCommand::Wont),
            consts::DO => Ok(NvtCommand::Do),
            consts::DONT => Ok(NvtCommand::Dont),
            consts::IAC => Ok(NvtCommand::Iac),
            byte => Err(NvtError::UnknownCommand(byte)),
        }
    }
}
