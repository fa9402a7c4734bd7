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
use std::collections::HashMap;

/// Bilateral negotiation record for one option.
///
/// The option is enabled only while both halves are affirmed. `value` holds
/// the last subnegotiated value and survives flag changes.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct OptionState {
    /// The WILL half has been asserted
    pub will: bool,
    /// The DO half has been asserted
    pub do_: bool,
    /// Last value communicated through subnegotiation
    pub value: Bytes,
}

impl OptionState {
    /// True when both halves are affirmed.
    pub fn enabled(&self) -> bool {
        self.will && self.do_
    }

    /// Applies a negotiation verb to the half-states.
    ///
    /// `DONT` clears `will`, exactly like `WONT`; `do_` is only ever set.
    /// Commands other than the four verbs leave the flags alone.
    fn apply(&mut self, command: NvtCommand) {
        match command {
            NvtCommand::Will => self.will = true,
            NvtCommand::Do => self.do_ = true,
            NvtCommand::Wont | NvtCommand::Dont => self.will = false,
            _ => {}
        }
    }
}

/// Per-session mapping from option to its negotiation record.
///
/// Options never mentioned are absent, which reads as disabled with no value.
#[derive(Clone, Debug, Default)]
pub struct NegotiationTable {
    options: HashMap<NvtOption, OptionState>,
}

impl NegotiationTable {
    /// Creates an empty table.
    pub fn new() -> NegotiationTable {
        NegotiationTable::default()
    }

    /// Record for `option`, inserting a default one if none exists yet.
    pub fn entry(&mut self, option: NvtOption) -> &mut OptionState {
        self.options.entry(option).or_default()
    }

    /// Record for `option`, if it has ever been negotiated.
    pub fn get(&self, option: NvtOption) -> Option<&OptionState> {
        self.options.get(&option)
    }

    /// Mutable record for `option`, if it has ever been negotiated.
    pub fn get_mut(&mut self, option: NvtOption) -> Option<&mut OptionState> {
        self.options.get_mut(&option)
    }

    /// Applies `command` to `option`, creating the record on first use.
    ///
    /// A non-empty `value` replaces the stored one.
    pub fn process_command(&mut self, command: NvtCommand, option: NvtOption, value: &[u8]) {
        let state = self.entry(option);
        state.apply(command);
        if !value.is_empty() {
            state.value = Bytes::copy_from_slice(value);
        }
    }

    /// Replaces the value of an already negotiated option; unknown options are ignored.
    ///
    /// Returns whether a record existed.
    pub fn process_option_value(&mut self, option: NvtOption, value: &[u8]) -> bool {
        match self.get_mut(option) {
            Some(state) => {
                state.value = Bytes::copy_from_slice(value);
                true
            }
            None => false,
        }
    }

    /// Empties the value of an already negotiated option.
    pub fn clear_value(&mut self, option: NvtOption) {
        if let Some(state) = self.get_mut(option) {
            state.value.clear();
        }
    }

    /// True iff a record exists and both halves are affirmed.
    pub fn enabled(&self, option: NvtOption) -> bool {
        self.get(option).is_some_and(OptionState::enabled)
    }

    /// Stored value for `option`, regardless of enablement.
    pub fn value(&self, option: NvtOption) -> Option<&Bytes> {
        self.get(option).map(|state| &state.value)
    }

    /// Number of options with a record.
    pub fn len(&self) -> usize {
        self.options.len()
    }

    /// True if no option has been negotiated.
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Iterates over every record, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (NvtOption, &OptionState)> {
        self.options.iter().map(|(option, state)| (*option, state))
    }

    /// Forgets every record.
    pub fn clear(&mut self) {
        self.options.clear();
    }
}
