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

//! Session negotiation settings
//!
//! ```
//! use nvtix_nvtcodec::{NvtCommand, NvtConfig, NvtOption};
//!
//! let config = NvtConfig::new()
//!     .with_greeting(vec![(NvtCommand::Will, NvtOption::Echo)])
//!     .with_flush(false);
//! ```

use crate::{NvtCommand, NvtOption};

/// Negotiation settings for one terminal session.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct NvtConfig {
    /// Negotiations written, in order, when the session opens
    pub greeting: Vec<(NvtCommand, NvtOption)>,

    /// Flush the transport after every write
    pub flush: bool,

    /// Longest sequence, in bytes after the IAC, the stream codec buffers
    /// before giving up on it
    pub max_sequence_len: usize,
}

impl Default for NvtConfig {
    fn default() -> Self {
        Self {
            greeting: vec![
                (NvtCommand::Will, NvtOption::Echo),
                (NvtCommand::Will, NvtOption::SuppressGoAhead),
                (NvtCommand::Do, NvtOption::Binary),
                (NvtCommand::Will, NvtOption::Binary),
            ],
            flush: true,
            max_sequence_len: 1024,
        }
    }
}

impl NvtConfig {
    /// Create a configuration with the default greeting
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the opening negotiations
    pub fn with_greeting(mut self, greeting: Vec<(NvtCommand, NvtOption)>) -> Self {
        self.greeting = greeting;
        self
    }

    /// Enable or disable flushing after each write
    pub fn with_flush(mut self, flush: bool) -> Self {
        self.flush = flush;
        self
    }

    /// Set the longest sequence the stream codec will buffer
    pub fn with_max_sequence_len(mut self, len: usize) -> Self {
        self.max_sequence_len = len;
        self
    }
}
