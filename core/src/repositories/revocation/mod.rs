#[path = "trait.rs"]
mod trait_;

pub use trait_::RevocationRepository;

#[cfg(test)]
pub mod mock;
#[cfg(test)]
pub use mock::MockRevocationRepository;

#[cfg(test)]
mod tests;
