use crate::normalizer::errors::ProviderParseError;
use crate::normalizer::helper_constants::{
    ITALIAN_LEADING_ZERO, MAX_LENGTH_FOR_NSN, MIN_LENGTH_FOR_NSN, PLUS_SIGN,
};

/// Result of a successful metadata parse: the country calling code, the
/// national subscriber number and the Italian-leading-zero flag. Produced
/// only by a [`MetadataProvider`] and immutable once created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParsedNumber {
    pub(crate) country_calling_code: u16,
    pub(crate) national_number: u64,
    pub(crate) italian_leading_zero: bool,
}

impl ParsedNumber {
    /// The numeric country prefix dialled after `+`, e.g. 47 for Norway.
    pub fn country_calling_code(&self) -> u16 {
        self.country_calling_code
    }

    /// The subscriber number portion, excluding the calling code and any
    /// significant leading zero.
    pub fn national_number(&self) -> u64 {
        self.national_number
    }

    /// Whether a leading zero is semantically part of the subscriber number
    /// and must survive every extraction and re-composition step.
    pub fn italian_leading_zero(&self) -> bool {
        self.italian_leading_zero
    }

    /// The national number as dialled, leading zero included.
    pub fn national_number_as_string(&self) -> String {
        let mut buf = itoa::Buffer::new();
        let digits = buf.format(self.national_number);
        if self.italian_leading_zero {
            fast_cat::concat_str!(ITALIAN_LEADING_ZERO, digits)
        } else {
            digits.to_owned()
        }
    }

    fn national_digit_count(&self) -> usize {
        let mut buf = itoa::Buffer::new();
        let digits = buf.format(self.national_number).len();
        if self.italian_leading_zero { digits + 1 } else { digits }
    }
}

/// Internal metadata access API used to isolate the underlying phone-number
/// library and allow different implementations to be swapped in easily.
pub(crate) trait MetadataProvider: Send + Sync {
    /// Parses a digit string into a [`ParsedNumber`], relative to an
    /// ISO 3166-1 region when one is given.
    fn parse(
        &self,
        number: &str,
        region: Option<&str>,
    ) -> Result<ParsedNumber, ProviderParseError>;

    /// Coarse structural check: the national number merely has to fall in
    /// the digit-count range the numbering plans accept for any region.
    /// Strictly looser than [`MetadataProvider::is_valid`].
    fn is_possible(&self, number: &ParsedNumber) -> bool {
        (MIN_LENGTH_FOR_NSN..=MAX_LENGTH_FOR_NSN).contains(&number.national_digit_count())
    }

    /// Full numbering-plan validation: the number must match a real pattern
    /// of its region, not just a plausible length.
    fn is_valid(&self, number: &ParsedNumber) -> bool;

    /// The main region assigned to a country calling code, e.g. `NO` for 47.
    fn region_for_calling_code(&self, calling_code: u16) -> Option<String>;

    /// Composes the canonical `+<countryCallingCode><nationalNumber>` form,
    /// the Italian leading zero kept in place.
    fn format_e164(&self, number: &ParsedNumber) -> String {
        let mut buf = itoa::Buffer::new();
        let calling_code = buf.format(number.country_calling_code);
        let national = number.national_number_as_string();
        fast_cat::concat_str!(PLUS_SIGN, calling_code, &national)
    }
}
