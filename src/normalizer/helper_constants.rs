// The minimum and maximum length of the national significant number.
// The ITU says the maximum length should be 15, but longer numbers have
// been seen in Germany.
pub(crate) const MIN_LENGTH_FOR_NSN: usize = 2;
pub(crate) const MAX_LENGTH_FOR_NSN: usize = 17;

pub(crate) const PLUS_SIGN: &'static str = "+";

// International direct dialling prefix accepted in place of the plus sign.
// Must be rewritten before any provider parse, because the provider only
// recognizes plus-prefixed or region-qualified input.
pub(crate) const IDD_PREFIX: &'static str = "00";

// A significant leading zero of an Italian national number, part of the
// subscriber number itself rather than a formatting artifact.
pub(crate) const ITALIAN_LEADING_ZERO: &'static str = "0";

// Bare NANP numbers are the single ambiguous no-plus case worth
// auto-correcting; anything else starting with a digit is a national number.
pub(crate) const NANP_LEADING_DIGIT: char = '1';

// Upstream systems that string-concatenate an absent country prefix leave a
// literal "null" in front of the national part.
pub(crate) const NULL_LITERAL_PREFIX: &'static str = "null";
