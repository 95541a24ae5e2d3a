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

use log::debug;
use phonenumber::{country, metadata};

use crate::interfaces::{MetadataProvider, ParsedNumber};
use crate::normalizer::errors::ProviderParseError;

/// [`MetadataProvider`] backed by the `phonenumber` crate, which carries the
/// compiled libphonenumber metadata: country calling codes, national number
/// patterns and the region tables.
pub(crate) struct PhonenumberProvider;

impl PhonenumberProvider {
    pub(crate) fn new() -> Self {
        Self
    }
}

impl MetadataProvider for PhonenumberProvider {
    fn parse(
        &self,
        number: &str,
        region: Option<&str>,
    ) -> Result<ParsedNumber, ProviderParseError> {
        let region_id = match region {
            Some(region) => Some(region.parse::<country::Id>().map_err(|_| {
                ProviderParseError::new(format!("unknown region code {region:?}"))
            })?),
            None => None,
        };
        let parsed = phonenumber::parse(region_id, number)
            .map_err(|err| ProviderParseError::new(err.to_string()))?;
        Ok(ParsedNumber {
            country_calling_code: parsed.country().code(),
            national_number: parsed.national().value(),
            italian_leading_zero: parsed.national().zeros() > 0,
        })
    }

    fn is_valid(&self, number: &ParsedNumber) -> bool {
        // Validity needs the full pattern data the coarse parse result does
        // not carry, so the canonical composition goes through the metadata
        // again.
        match phonenumber::parse(None, &self.format_e164(number)) {
            Ok(parsed) => phonenumber::is_valid(&parsed),
            Err(err) => {
                debug!("re-parse of composed number failed: {}", err);
                false
            }
        }
    }

    fn region_for_calling_code(&self, calling_code: u16) -> Option<String> {
        metadata::DATABASE
            .by_code(&calling_code)
            .and_then(|regions| regions.first().map(|meta| meta.id().to_owned()))
    }
}
