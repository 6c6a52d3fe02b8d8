//! Group and offer identifiers.

use md5::{Digest, Md5};

use feed_model::GroupId;

use crate::context::CompileContext;

/// Modulus applied to digit-derived group ids.
pub const GROUP_ID_MODULUS: u64 = 2_147_483_647;

/// Length of the hex disambiguator appended to variant offer ids.
pub const DISAMBIGUATOR_LEN: usize = 8;

/// Derive the group id of a product code.
///
/// Codes containing digits map to the concatenated digits modulo
/// [`GROUP_ID_MODULUS`], with 0 replaced by 1. Codes without digits take
/// the next per-cycle counter value from `ctx`.
pub fn group_id(product_code: &str, ctx: &mut CompileContext) -> GroupId {
    match digits_modulo(product_code) {
        Some(value) => GroupId::at_least_one(value),
        None => GroupId::at_least_one(ctx.counter_for(product_code)),
    }
}

/// Digits of `text` read as one decimal number, reduced modulo [`GROUP_ID_MODULUS`].
fn digits_modulo(text: &str) -> Option<u32> {
    let mut seen = false;
    let mut acc: u64 = 0;
    for digit in text.chars().filter_map(|ch| ch.to_digit(10)) {
        seen = true;
        acc = (acc * 10 + u64::from(digit)) % GROUP_ID_MODULUS;
    }
    seen.then_some(acc as u32)
}

/// First 8 hex characters of the MD5 digest of a variant label.
pub fn variant_disambiguator(label: &str) -> String {
    let digest = Md5::digest(label.as_bytes());
    let mut encoded = hex::encode(digest);
    encoded.truncate(DISAMBIGUATOR_LEN);
    encoded
}

pub fn main_offer_id(product_code: &str) -> String {
    format!("{product_code}_main")
}

pub fn variant_offer_id(product_code: &str, label: &str) -> String {
    format!("{product_code}_{}", variant_disambiguator(label))
}
