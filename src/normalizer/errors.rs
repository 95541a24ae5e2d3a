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

use thiserror::Error;

/// Raised by a metadata provider when the underlying library cannot make
/// structural sense of the input at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("metadata provider rejected the number: {reason}")]
pub struct ProviderParseError {
    reason: String,
}

impl ProviderParseError {
    pub(crate) fn new(reason: impl Into<String>) -> Self {
        Self { reason: reason.into() }
    }

    /// The failure message of the underlying metadata library.
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// Failure modes of the normalization pipeline. All variants are terminal;
/// only the designated soft-fallback operations
/// (`national_number_with_fallback`, `compares_national_numbers`) convert
/// them into sentinels instead of reporting them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    /// The input was empty or contained no digits at all.
    #[error("input contains no digits")]
    InvalidInput,

    /// The number does not carry its own country code and no usable country
    /// hint was supplied.
    #[error("number carries no country code and no usable country hint was given")]
    MissingCountryContext,

    /// The metadata provider could not parse the number.
    #[error("{0}")]
    UnparsableNumber(#[from] ProviderParseError),

    /// The provider parsed the number, but its national part falls outside
    /// every plausible length.
    #[error("number is structurally impossible")]
    ImpossibleNumber,
}
