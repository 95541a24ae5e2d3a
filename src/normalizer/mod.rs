pub mod errors;
pub mod holder;
pub mod normalizer;
pub(crate) mod helper_constants;

use std::sync::LazyLock;

use crate::normalizer::normalizer::PhoneNormalizer;

/// Process-wide normalizer over the compiled metadata tables. The instance
/// owns no external resources, is never mutated after construction and is
/// safe for arbitrary concurrent callers.
pub static PHONE_NORMALIZER: LazyLock<PhoneNormalizer> = LazyLock::new(PhoneNormalizer::new);
