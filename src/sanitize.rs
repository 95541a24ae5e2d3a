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

use std::borrow::Cow;
use std::sync::LazyLock;

use log::warn;
use regex::Regex;

use crate::normalizer::helper_constants::{IDD_PREFIX, PLUS_SIGN};

/// Everything that can never be part of a cleaned number: anything but
/// ASCII digits and the plus sign.
static NON_DIGIT_OR_PLUS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^+0-9]").unwrap());

/// Anything but ASCII digits, for the integer fallback path.
static NON_DIGIT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^0-9]").unwrap());

/// Removes every character except ASCII digits and a single leading plus
/// sign. Pure and total; any string input yields a (possibly empty) cleaned
/// string.
pub(crate) fn sanitize(raw: &str) -> String {
    let stripped = NON_DIGIT_OR_PLUS.replace_all(raw, "");
    match stripped.strip_prefix(PLUS_SIGN) {
        Some(rest) => {
            let digits = rest.replace('+', "");
            fast_cat::concat_str!(PLUS_SIGN, &digits)
        }
        None => stripped.replace('+', ""),
    }
}

/// Rewrites a leading `00` international call prefix to `+`; anything else
/// passes through unchanged.
pub(crate) fn rewrite_international_prefix(cleaned: &str) -> Cow<'_, str> {
    match cleaned.strip_prefix(IDD_PREFIX) {
        Some(rest) => Cow::Owned(fast_cat::concat_str!(PLUS_SIGN, rest)),
        None => Cow::Borrowed(cleaned),
    }
}

/// Drops everything but ASCII digits.
pub(crate) fn digits_only(raw: &str) -> String {
    NON_DIGIT.replace_all(raw, "").into_owned()
}

/// Strips the input to its digits and reads the remainder as one integer.
/// Returns `None` when nothing numeric is left or the digits overflow.
pub(crate) fn digits_as_integer(raw: &str) -> Option<u64> {
    let digits = digits_only(raw);
    if digits.is_empty() {
        return None;
    }
    match digits.parse::<u64>() {
        Ok(number) => Some(number),
        Err(err) => {
            warn!("digit remainder of {:?} is not an integer: {}", raw, err);
            None
        }
    }
}
