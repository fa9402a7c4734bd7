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

use std::io;

/// Byte channel the session driver writes negotiations to.
///
/// Implementations perform a single synchronous write and report how many
/// bytes were accepted. The driver treats anything short of the full length
/// as a failure and never retries.
pub trait Transport {
    /// Writes `data`, flushing afterwards when `flush` is set.
    fn write(&mut self, data: &[u8], flush: bool) -> io::Result<usize>;
}

impl<W: io::Write> Transport for W {
    fn write(&mut self, data: &[u8], flush: bool) -> io::Result<usize> {
        let written = io::Write::write(self, data)?;
        if flush {
            io::Write::flush(self)?;
        }
        Ok(written)
    }
}
