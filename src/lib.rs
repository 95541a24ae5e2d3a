mod interfaces;
mod phonenumber_provider;
mod normalizer;
pub(crate) mod sanitize;

#[cfg(test)]
mod tests;

pub use interfaces::ParsedNumber;
pub use normalizer::{
    PHONE_NORMALIZER,
    errors::{NormalizeError, ProviderParseError},
    holder::PhoneNumberHolder,
    normalizer::{PhoneNormalizer, pretty_print},
};
