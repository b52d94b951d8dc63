//! # Projection k-mer min-hash families
//!
//! A projection k-mer hash ([`Pkh`]) hashes a k-mer window as a weighted sum
//! of per-position, per-base Gaussian weights, and hashes a whole sequence
//! as the minimum over all its k-mer windows. A [`HashFamily`] is a vector
//! of independently seeded `Pkh`s sharing one k-mer width — applying it to a
//! sequence produces the hash vector a pipeline stage writes out per
//! sequence.

mod family;
mod pkh;

pub use family::HashFamily;
pub use pkh::Pkh;
