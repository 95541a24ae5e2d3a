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

use std::collections::HashSet;

use log::debug;

use crate::interfaces::{MetadataProvider, ParsedNumber};
use crate::phonenumber_provider::PhonenumberProvider;
use crate::sanitize::{digits_as_integer, digits_only, rewrite_international_prefix, sanitize};

use super::errors::NormalizeError;
use super::helper_constants::{
    IDD_PREFIX, ITALIAN_LEADING_ZERO, NANP_LEADING_DIGIT, NULL_LITERAL_PREFIX, PLUS_SIGN,
};
use super::holder::PhoneNumberHolder;

// Helper type for Result
pub type Result<T> = std::result::Result<T, NormalizeError>;

/// One step of the ordered fallback chain. Walking an explicit list keeps
/// the order of the heuristics visible in one place instead of burying it
/// in nested error handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseStrategy {
    /// Parse the cleaned string as-is, with no region context.
    Direct,
    /// The cleaned string speaks for itself: it starts with `+` and the
    /// provider deems the parse possible.
    DirectInternational,
    /// Derive a region from the country hint and parse relative to it.
    RegionHint,
    /// Bare NANP numbers are the single ambiguous no-plus case worth
    /// auto-correcting: prepend `+` and retry.
    AutoPlusPrefix,
}

/// Tagged outcome of a single strategy attempt.
enum StrategyOutcome {
    Parsed(ParsedNumber),
    /// The strategy's precondition did not hold; move on to the next one.
    NotApplicable,
    Failed(NormalizeError),
}

/// The normalization pipeline: turns an arbitrary, possibly malformed phone
/// number string into a canonical `+<cc><nsn>` representation, or fails with
/// a typed error. Every operation is a pure function of its inputs plus one
/// read-only metadata handle, so a single instance serves arbitrary
/// concurrent callers.
pub struct PhoneNormalizer {
    /// Metadata access behind an API seam, so another metadata library can
    /// be swapped in without touching the pipeline.
    provider: Box<dyn MetadataProvider>,
}

impl Default for PhoneNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl PhoneNormalizer {
    /// A normalizer over the compiled libphonenumber metadata.
    pub fn new() -> Self {
        Self { provider: Box::new(PhonenumberProvider::new()) }
    }

    #[cfg(test)]
    pub(crate) fn with_provider(provider: Box<dyn MetadataProvider>) -> Self {
        Self { provider }
    }

    /// Converts `raw` (plus an optional default calling-code hint such as
    /// `"+47"`) into the canonical international form.
    ///
    /// The cleaned input is tried against an ordered strategy chain: first
    /// as a self-contained international number, then relative to the region
    /// derived from the hint. Possibility, not full validity, gates
    /// acceptance, so legitimately-unassigned but structurally sound numbers
    /// normalize fine.
    ///
    /// # Errors
    /// [`NormalizeError::InvalidInput`] when no digits survive sanitizing,
    /// [`NormalizeError::MissingCountryContext`] when neither the number nor
    /// the hint carries a usable country code,
    /// [`NormalizeError::UnparsableNumber`] when the provider rejects the
    /// digits, and [`NormalizeError::ImpossibleNumber`] when the parse
    /// succeeds but the national part has no plausible length.
    pub fn normalize(&self, raw: &str, country_hint: Option<&str>) -> Result<String> {
        let parsed = self.parse_pipeline(raw, country_hint)?;
        Ok(self.provider.format_e164(&parsed))
    }

    /// Whether the number is valid under the full numbering plan of its
    /// country. The number runs through the same parse pipeline as
    /// [`PhoneNormalizer::normalize`]; anything that pipeline rejects is
    /// simply not valid.
    pub fn is_valid(&self, country_hint: Option<&str>, raw: &str) -> bool {
        match self.parse_pipeline(raw, country_hint) {
            Ok(parsed) => self.provider.is_valid(&parsed),
            Err(err) => {
                debug!("validity check failed to parse {:?}: {}", raw, err);
                false
            }
        }
    }

    /// True when the cleaned number carries its own country code, i.e. it
    /// starts with `+` (or the `00` prefix rewritten to `+`) and the
    /// provider can actually make sense of it. Unparsable input answers
    /// false rather than failing.
    pub fn has_explicit_country_code(&self, raw: &str) -> bool {
        let cleaned = sanitize(raw);
        let rewritten = rewrite_international_prefix(&cleaned);
        if !rewritten.starts_with(PLUS_SIGN) {
            return false;
        }
        match self.provider.parse(&rewritten, None) {
            Ok(parsed) => self.provider.is_possible(&parsed),
            Err(_) => false,
        }
    }

    /// True when the number is a possible full number whose country calling
    /// code equals `calling_code`.
    pub fn has_country_code_matching(&self, calling_code: u16, raw: &str) -> bool {
        let cleaned = sanitize(raw);
        let rewritten = rewrite_international_prefix(&cleaned);
        match self.provider.parse(&rewritten, None) {
            Ok(parsed) => {
                self.provider.is_possible(&parsed)
                    && parsed.country_calling_code() == calling_code
            }
            Err(_) => false,
        }
    }

    /// Parses a full number directly, retrying with a `+` prepended when the
    /// input has none and starts with the NANP digit `1`. On retry failure
    /// the original parse error is propagated, so the heuristic can never
    /// mask the real reason.
    pub fn parse_with_auto_plus_prefix(&self, raw: &str) -> Result<ParsedNumber> {
        let cleaned = sanitize(raw);
        if cleaned.is_empty() {
            return Err(NormalizeError::InvalidInput);
        }
        self.run_strategies(
            &[ParseStrategy::Direct, ParseStrategy::AutoPlusPrefix],
            &cleaned,
            None,
        )
    }

    /// Extracts the national number, falling back to reading the digit
    /// remainder of `raw` as a plain integer. Callers pass free-text labels
    /// here ("Check Balance"), so this never fails; anything non-numeric
    /// yields `None`.
    pub fn national_number_with_fallback(&self, raw: &str) -> Option<u64> {
        match self.parse_with_auto_plus_prefix(raw) {
            Ok(parsed) => Some(parsed.national_number()),
            Err(err) => {
                debug!("falling back to digit stripping for {:?}: {}", raw, err);
                digits_as_integer(raw)
            }
        }
    }

    /// True only when both sides yield a national number through
    /// [`PhoneNormalizer::national_number_with_fallback`] and the numbers
    /// are equal. Symmetric, never fails.
    pub fn compares_national_numbers(&self, first: &str, second: &str) -> bool {
        match (
            self.national_number_with_fallback(first),
            self.national_number_with_fallback(second),
        ) {
            (Some(first), Some(second)) => first == second,
            _ => false,
        }
    }

    /// Normalizes every entry that is a valid number under the hint's
    /// numbering plan, dropping empty, unparsable and invalid entries.
    /// Duplicates collapse to their first occurrence; first-seen order is
    /// preserved.
    pub fn filter_and_normalize_all<I, S>(
        &self,
        numbers: I,
        country_hint: Option<&str>,
    ) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut normalized = Vec::new();
        for number in numbers {
            let number = number.as_ref();
            let parsed = match self.parse_pipeline(number, country_hint) {
                Ok(parsed) => parsed,
                Err(_) => continue,
            };
            if !self.provider.is_valid(&parsed) {
                continue;
            }
            let formatted = self.provider.format_e164(&parsed);
            if seen.insert(formatted.clone()) {
                normalized.push(formatted);
            }
        }
        normalized
    }

    /// Calling code of a full number: `+4745037118` gives 47.
    pub fn country_code_of(&self, full_number: &str) -> Result<u16> {
        let parsed = self.provider.parse(full_number, None)?;
        Ok(parsed.country_calling_code())
    }

    /// Calling code of a full number rendered as a dialable prefix: `+47`.
    pub fn calling_code_prefix_of(&self, full_number: &str) -> Result<String> {
        let parsed = self.provider.parse(full_number, None)?;
        let mut buf = itoa::Buffer::new();
        let calling_code = buf.format(parsed.country_calling_code());
        Ok(fast_cat::concat_str!(PLUS_SIGN, calling_code))
    }

    /// National part of a full number as dialled, the Italian leading zero
    /// kept: `+39055555555` gives `055555555`.
    pub fn national_part_of(&self, full_number: &str) -> Result<String> {
        let parsed = self.provider.parse(full_number, None)?;
        Ok(parsed.national_number_as_string())
    }

    /// Never-failing split of whatever the caller has into a display holder.
    /// Upstream systems sometimes concatenate a literal `"null"` where the
    /// country prefix belongs; that junk is stripped from the unresolved
    /// national part.
    pub fn split_lenient(&self, raw: &str) -> PhoneNumberHolder {
        match self.provider.parse(raw, None) {
            Ok(parsed) => {
                let mut buf = itoa::Buffer::new();
                let calling_code = buf.format(parsed.country_calling_code());
                PhoneNumberHolder::Resolved {
                    prefix: fast_cat::concat_str!(PLUS_SIGN, calling_code),
                    national: parsed.national_number_as_string(),
                    full: self.provider.format_e164(&parsed),
                }
            }
            Err(err) => {
                debug!("keeping {:?} unresolved: {}", raw, err);
                if raw.trim().eq_ignore_ascii_case(NULL_LITERAL_PREFIX) {
                    return PhoneNumberHolder::Unresolved { national: String::new() };
                }
                match raw.strip_prefix(NULL_LITERAL_PREFIX) {
                    Some(rest) => PhoneNumberHolder::Unresolved { national: rest.to_owned() },
                    None => PhoneNumberHolder::Unresolved { national: raw.to_owned() },
                }
            }
        }
    }

    /// Normalizes numbers that carry their own country code; for anything
    /// else drops a leading `00` or `0` national prefix and otherwise
    /// returns the input unchanged.
    pub fn strip_national_leading_zero(&self, raw: &str) -> String {
        match self.normalize(raw, None) {
            Ok(normalized) => normalized,
            Err(_) => {
                if let Some(rest) = raw.strip_prefix(IDD_PREFIX) {
                    return rest.to_owned();
                }
                if let Some(rest) = raw.strip_prefix(ITALIAN_LEADING_ZERO) {
                    return rest.to_owned();
                }
                raw.to_owned()
            }
        }
    }

    /// Shared front half of `normalize`, `is_valid` and the batch helper:
    /// sanitize, rewrite the international prefix, walk the strategy chain.
    fn parse_pipeline(&self, raw: &str, country_hint: Option<&str>) -> Result<ParsedNumber> {
        let cleaned = sanitize(raw);
        if cleaned.is_empty() {
            return Err(NormalizeError::InvalidInput);
        }
        let rewritten = rewrite_international_prefix(&cleaned);
        self.run_strategies(
            &[ParseStrategy::DirectInternational, ParseStrategy::RegionHint],
            &rewritten,
            country_hint,
        )
    }

    /// Walks `strategies` in order and returns the first successful parse.
    /// When nothing succeeds the first recorded failure is reported, so a
    /// later heuristic can never mask the original reason.
    fn run_strategies(
        &self,
        strategies: &[ParseStrategy],
        cleaned: &str,
        country_hint: Option<&str>,
    ) -> Result<ParsedNumber> {
        let mut first_failure: Option<NormalizeError> = None;
        for strategy in strategies {
            match self.attempt(*strategy, cleaned, country_hint) {
                StrategyOutcome::Parsed(parsed) => return Ok(parsed),
                StrategyOutcome::NotApplicable => continue,
                StrategyOutcome::Failed(err) => {
                    debug!("{:?} failed for {:?}: {}", strategy, cleaned, err);
                    first_failure.get_or_insert(err);
                }
            }
        }
        Err(first_failure.unwrap_or(NormalizeError::MissingCountryContext))
    }

    fn attempt(
        &self,
        strategy: ParseStrategy,
        cleaned: &str,
        country_hint: Option<&str>,
    ) -> StrategyOutcome {
        match strategy {
            ParseStrategy::Direct => match self.provider.parse(cleaned, None) {
                Ok(parsed) => StrategyOutcome::Parsed(parsed),
                Err(err) => StrategyOutcome::Failed(err.into()),
            },
            ParseStrategy::DirectInternational => {
                if !cleaned.starts_with(PLUS_SIGN) {
                    return StrategyOutcome::NotApplicable;
                }
                match self.provider.parse(cleaned, None) {
                    Ok(parsed) if self.provider.is_possible(&parsed) => {
                        StrategyOutcome::Parsed(parsed)
                    }
                    Ok(_) => StrategyOutcome::Failed(NormalizeError::ImpossibleNumber),
                    Err(err) => StrategyOutcome::Failed(err.into()),
                }
            }
            ParseStrategy::RegionHint => {
                let region = match self.region_from_hint(country_hint) {
                    Ok(region) => region,
                    Err(err) => return StrategyOutcome::Failed(err),
                };
                match self.provider.parse(cleaned, Some(&region)) {
                    Ok(parsed) if self.provider.is_possible(&parsed) => {
                        StrategyOutcome::Parsed(parsed)
                    }
                    Ok(_) => StrategyOutcome::Failed(NormalizeError::ImpossibleNumber),
                    Err(err) => StrategyOutcome::Failed(err.into()),
                }
            }
            ParseStrategy::AutoPlusPrefix => {
                if cleaned.starts_with(PLUS_SIGN) || !cleaned.starts_with(NANP_LEADING_DIGIT) {
                    return StrategyOutcome::NotApplicable;
                }
                let prefixed = fast_cat::concat_str!(PLUS_SIGN, cleaned);
                match self.provider.parse(&prefixed, None) {
                    Ok(parsed) if self.provider.is_possible(&parsed) => {
                        debug!("recovered {:?} by prepending a plus sign", cleaned);
                        StrategyOutcome::Parsed(parsed)
                    }
                    // propagate whatever the direct attempt recorded
                    _ => StrategyOutcome::NotApplicable,
                }
            }
        }
    }

    /// Turns a calling-code hint such as `"+47"` into the region the
    /// provider associates with it. An absent, empty, non-numeric or unknown
    /// hint supplies no usable country context.
    fn region_from_hint(&self, country_hint: Option<&str>) -> Result<String> {
        let digits = country_hint.map(digits_only).unwrap_or_default();
        if digits.is_empty() {
            return Err(NormalizeError::MissingCountryContext);
        }
        let calling_code = digits
            .parse::<u16>()
            .map_err(|_| NormalizeError::MissingCountryContext)?;
        self.provider
            .region_for_calling_code(calling_code)
            .ok_or(NormalizeError::MissingCountryContext)
    }
}

/// Joins numbers for display or log output: `+4745037118, +4790630185`.
pub fn pretty_print<I, S>(numbers: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut printed = String::new();
    for number in numbers {
        if !printed.is_empty() {
            printed.push_str(", ");
        }
        printed.push_str(number.as_ref());
    }
    printed
}
