use std::sync::Once;

use regex::Regex;

use crate::interfaces::{MetadataProvider, ParsedNumber};
use crate::normalizer::errors::ProviderParseError;
use crate::normalizer::normalizer::pretty_print;
use crate::{NormalizeError, PhoneNormalizer, PhoneNumberHolder};

static ONCE: Once = Once::new();

fn normalizer() -> PhoneNormalizer {
    ONCE.call_once(|| {
        colog::default_builder()
            .filter_level(log::LevelFilter::Debug)
            .init()
    });
    PhoneNormalizer::new()
}

#[test]
fn normalize_with_country_hint() {
    let normalizer = normalizer();
    assert_eq!(
        normalizer.normalize("45037118", Some("+47")).unwrap(),
        "+4745037118"
    );
    assert_eq!(
        normalizer.normalize("90022909", Some("+47")).unwrap(),
        "+4790022909"
    );
}

#[test]
fn normalize_rewrites_international_prefix() {
    let normalizer = normalizer();
    assert_eq!(
        normalizer.normalize("004790022909", Some("+47")).unwrap(),
        "+4790022909"
    );
    // the 00 prefix alone already carries the country code
    assert_eq!(
        normalizer.normalize("004790022909", None).unwrap(),
        "+4790022909"
    );
}

#[test]
fn normalize_prefers_the_numbers_own_country_code() {
    let normalizer = normalizer();
    assert_eq!(
        normalizer.normalize("+4745037118", Some("+1")).unwrap(),
        "+4745037118"
    );
}

#[test]
fn normalize_strips_punctuation_and_whitespace() {
    let normalizer = normalizer();
    assert_eq!(
        normalizer.normalize("(+47) 45-03.71 18", None).unwrap(),
        "+4745037118"
    );
}

#[test]
fn normalize_keeps_italian_leading_zero() {
    // Structurally possible though not necessarily assigned; possibility,
    // not validity, gates normalization.
    let normalizer = normalizer();
    assert_eq!(
        normalizer.normalize("+39055555555", None).unwrap(),
        "+39055555555"
    );
}

#[test]
fn normalize_rejects_digitless_input() {
    let normalizer = normalizer();
    assert_eq!(
        normalizer.normalize("a lot of scrambled text", Some("+47")),
        Err(NormalizeError::InvalidInput)
    );
    assert_eq!(
        normalizer.normalize("", Some("+47")),
        Err(NormalizeError::InvalidInput)
    );
}

#[test]
fn normalize_requires_country_context() {
    let normalizer = normalizer();
    assert_eq!(
        normalizer.normalize("45037118", None),
        Err(NormalizeError::MissingCountryContext)
    );
    assert_eq!(
        normalizer.normalize("45037118", Some("no digits here")),
        Err(NormalizeError::MissingCountryContext)
    );
}

#[test]
fn normalize_reports_the_first_strategy_failure() {
    let normalizer = normalizer();
    // "+0" is no one's country code; the direct failure must not be masked
    // by the later region-hint attempt.
    assert!(matches!(
        normalizer.normalize("+0", Some("+47")),
        Err(NormalizeError::UnparsableNumber(_))
    ));
}

#[test]
fn normalize_is_idempotent() {
    let normalizer = normalizer();
    let inputs = [
        ("45037118", Some("+47")),
        ("004790022909", Some("+47")),
        ("+39055555555", None),
    ];
    for (raw, hint) in inputs {
        let once = normalizer.normalize(raw, hint).unwrap();
        let twice = normalizer.normalize(&once, hint).unwrap();
        assert_eq!(once, twice);
    }
}

#[test]
fn normalized_numbers_match_the_canonical_shape() {
    let normalizer = normalizer();
    let shape = Regex::new(r"^\+[1-9][0-9]+$").unwrap();
    let inputs = [
        ("45037118", Some("+47")),
        ("0047 90 02 29 09", Some("+47")),
        ("+39055555555", None),
        ("(+1) 650-713-9923", None),
    ];
    for (raw, hint) in inputs {
        let normalized = normalizer.normalize(raw, hint).unwrap();
        assert!(
            shape.is_match(&normalized),
            "{:?} normalized to {:?}",
            raw,
            normalized
        );
    }
}

#[test]
fn national_number_with_fallback_prefers_a_real_parse() {
    let normalizer = normalizer();
    assert_eq!(
        normalizer.national_number_with_fallback("+4745037118"),
        Some(45037118)
    );
    // bare NANP number, recovered by the auto-plus heuristic
    assert_eq!(
        normalizer.national_number_with_fallback("16507139923"),
        Some(6507139923)
    );
}

#[test]
fn national_number_with_fallback_strips_digits_as_last_resort() {
    let normalizer = normalizer();
    // leading zero keeps the auto-plus heuristic out; the digit remainder
    // is read as one integer
    assert_eq!(
        normalizer.national_number_with_fallback("01(650)-713(9923)"),
        Some(16507139923)
    );
    assert_eq!(normalizer.national_number_with_fallback("Check Balance"), None);
    assert_eq!(normalizer.national_number_with_fallback(""), None);
}

#[test]
fn parse_with_auto_plus_prefix_only_recovers_nanp_shapes() {
    let normalizer = normalizer();
    let parsed = normalizer.parse_with_auto_plus_prefix("16507139923").unwrap();
    assert_eq!(parsed.country_calling_code(), 1);
    assert_eq!(parsed.national_number(), 6507139923);

    // same length, wrong leading digit: the original failure propagates
    assert!(matches!(
        normalizer.parse_with_auto_plus_prefix("26507139923"),
        Err(NormalizeError::UnparsableNumber(_))
    ));
}

#[test]
fn compares_national_numbers_over_mixed_formats() {
    let normalizer = normalizer();
    assert!(normalizer.compares_national_numbers("16507139923", "+16507139923"));
    assert!(normalizer.compares_national_numbers("+16507139923", "16507139923"));
    assert!(normalizer.compares_national_numbers("+4745037118", "45037118"));
    assert!(!normalizer.compares_national_numbers("45037118", "90022909"));
    assert!(!normalizer.compares_national_numbers("Check Balance", "Check Balance"));
    assert!(!normalizer.compares_national_numbers("", "+4745037118"));
}

#[test]
fn is_valid_checks_the_full_numbering_plan() {
    let normalizer = normalizer();
    assert!(normalizer.is_valid(Some("+47"), "45037118"));
    assert!(normalizer.is_valid(None, "+4745037118"));
    // plausible length, but no Norwegian number starts with 1
    assert!(!normalizer.is_valid(Some("+47"), "15037118"));
    assert!(!normalizer.is_valid(Some("+47"), "scrambled text"));
    assert!(!normalizer.is_valid(None, "45037118"));
}

#[test]
fn filter_and_normalize_all_drops_dedupes_and_keeps_order() {
    let normalizer = normalizer();
    let numbers = [
        "45037118",
        "",
        "0047 90 02 29 09",
        "45037118",
        "bogus text",
        "+4745037118",
    ];
    assert_eq!(
        normalizer.filter_and_normalize_all(numbers, Some("+47")),
        vec!["+4745037118".to_owned(), "+4790022909".to_owned()]
    );
    assert!(
        normalizer
            .filter_and_normalize_all(Vec::<String>::new(), Some("+47"))
            .is_empty()
    );
}

#[test]
fn has_explicit_country_code_accepts_plus_and_idd_prefixes() {
    let normalizer = normalizer();
    assert!(normalizer.has_explicit_country_code("+4745037118"));
    assert!(normalizer.has_explicit_country_code("004790022909"));
    assert!(!normalizer.has_explicit_country_code("45037118"));
    assert!(!normalizer.has_explicit_country_code("some text"));
}

#[test]
fn has_country_code_matching_compares_the_calling_code() {
    let normalizer = normalizer();
    assert!(normalizer.has_country_code_matching(47, "+4745037118"));
    assert!(normalizer.has_country_code_matching(47, "004745037118"));
    assert!(!normalizer.has_country_code_matching(1, "+4745037118"));
    assert!(!normalizer.has_country_code_matching(47, "45037118"));
}

#[test]
fn calling_code_extraction() {
    let normalizer = normalizer();
    assert_eq!(normalizer.country_code_of("+4745037118").unwrap(), 47);
    assert_eq!(
        normalizer.calling_code_prefix_of("+4745037118").unwrap(),
        "+47"
    );
    assert!(matches!(
        normalizer.country_code_of("45037118"),
        Err(NormalizeError::UnparsableNumber(_))
    ));
}

#[test]
fn national_part_keeps_the_italian_leading_zero() {
    let normalizer = normalizer();
    assert_eq!(
        normalizer.national_part_of("+4745037118").unwrap(),
        "45037118"
    );
    assert_eq!(
        normalizer.national_part_of("+39055555555").unwrap(),
        "055555555"
    );
}

#[test]
fn split_lenient_resolves_full_numbers() {
    let normalizer = normalizer();
    let holder = normalizer.split_lenient("+4745037118");
    assert_eq!(
        holder,
        PhoneNumberHolder::Resolved {
            prefix: "+47".to_owned(),
            national: "45037118".to_owned(),
            full: "+4745037118".to_owned(),
        }
    );
    assert_eq!(holder.prefix(), Some("+47"));
    assert_eq!(holder.national(), "45037118");
    assert_eq!(holder.full_number(), Some("+4745037118"));
}

#[test]
fn split_lenient_keeps_unresolvable_input() {
    let normalizer = normalizer();
    assert_eq!(
        normalizer.split_lenient("null45037118"),
        PhoneNumberHolder::Unresolved { national: "45037118".to_owned() }
    );
    assert_eq!(
        normalizer.split_lenient("null"),
        PhoneNumberHolder::Unresolved { national: String::new() }
    );
    let holder = normalizer.split_lenient("free text");
    assert_eq!(
        holder,
        PhoneNumberHolder::Unresolved { national: "free text".to_owned() }
    );
    assert_eq!(holder.prefix(), None);
    assert_eq!(holder.full_number(), None);
}

#[test]
fn strip_national_leading_zero_rows() {
    let normalizer = normalizer();
    // self-contained numbers just normalize
    assert_eq!(
        normalizer.strip_national_leading_zero("+4790022909"),
        "+4790022909"
    );
    assert_eq!(
        normalizer.strip_national_leading_zero("004790022909"),
        "+4790022909"
    );
    // national numbers lose their leading zero and nothing else
    assert_eq!(normalizer.strip_national_leading_zero("045037118"), "45037118");
    assert_eq!(normalizer.strip_national_leading_zero("45037118"), "45037118");
}

#[test]
fn pretty_print_joins_with_commas() {
    assert_eq!(pretty_print(Vec::<String>::new()), "");
    assert_eq!(pretty_print(["+4745037118"]), "+4745037118");
    assert_eq!(
        pretty_print(["+4745037118", "+4790630185"]),
        "+4745037118, +4790630185"
    );
}

/// Provider stub that parses everything to one fixed number, for driving
/// the pipeline into branches the real metadata never reaches.
struct StubProvider {
    parsed: ParsedNumber,
}

impl MetadataProvider for StubProvider {
    fn parse(
        &self,
        _number: &str,
        _region: Option<&str>,
    ) -> Result<ParsedNumber, ProviderParseError> {
        Ok(self.parsed)
    }

    fn is_valid(&self, _number: &ParsedNumber) -> bool {
        false
    }

    fn region_for_calling_code(&self, _calling_code: u16) -> Option<String> {
        Some("NO".to_owned())
    }
}

#[test]
fn normalize_rejects_impossible_numbers() {
    // a one-digit national number parses but can exist nowhere
    let stub = StubProvider {
        parsed: ParsedNumber {
            country_calling_code: 47,
            national_number: 1,
            italian_leading_zero: false,
        },
    };
    let normalizer = PhoneNormalizer::with_provider(Box::new(stub));
    assert_eq!(
        normalizer.normalize("+471", None),
        Err(NormalizeError::ImpossibleNumber)
    );
    assert_eq!(
        normalizer.normalize("471", Some("+47")),
        Err(NormalizeError::ImpossibleNumber)
    );
    assert!(!normalizer.is_valid(Some("+47"), "471"));
}
