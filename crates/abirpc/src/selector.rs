//! # Selectors and Topics
//!
//! A signature is `name(type1,type2,...)` over canonical type strings. A function
//! selector is the first 4 bytes of its hash; an event topic is the whole hash.

use crate::argument::Arguments;
use crate::hash::Hasher256;

/// Canonical signature of `name` over `args`.
pub fn signature(name: &str, args: &Arguments) -> String {
    let types: Vec<String> = args.iter().map(|a| a.ty.canonical()).collect();
    format!("{}({})", name, types.join(","))
}

/// First 4 bytes of `hash256(signature)`.
pub fn selector<H: Hasher256 + ?Sized>(hasher: &H, signature: &str) -> [u8; 4] {
    let digest = hasher.hash256(signature.as_bytes());
    let mut id = [0u8; 4];
    id.copy_from_slice(&digest[..4]);
    id
}

/// Full `hash256(signature)`.
pub fn topic<H: Hasher256 + ?Sized>(hasher: &H, signature: &str) -> [u8; 32] {
    hasher.hash256(signature.as_bytes())
}
