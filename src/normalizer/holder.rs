// Copyright (C) 2026 The Phonenorm Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

/// Display-oriented result of a lenient split, carrying partially parsed
/// numbers without failing. A number whose country code could be attributed
/// is `Resolved`; everything else keeps its national part as given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhoneNumberHolder {
    /// The number carried a recognizable country code.
    Resolved {
        /// Dialable country prefix, e.g. `+47`.
        prefix: String,
        /// National part as dialled, Italian leading zero included.
        national: String,
        /// Canonical `+<cc><nsn>` composition.
        full: String,
    },
    /// No country code could be attributed; the input is kept verbatim.
    Unresolved { national: String },
}

impl PhoneNumberHolder {
    pub fn prefix(&self) -> Option<&str> {
        match self {
            Self::Resolved { prefix, .. } => Some(prefix),
            Self::Unresolved { .. } => None,
        }
    }

    pub fn national(&self) -> &str {
        match self {
            Self::Resolved { national, .. } | Self::Unresolved { national } => national,
        }
    }

    pub fn full_number(&self) -> Option<&str> {
        match self {
            Self::Resolved { full, .. } => Some(full),
            Self::Unresolved { .. } => None,
        }
    }
}
