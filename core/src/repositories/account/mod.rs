#[path = "trait.rs"]
mod trait_;

pub use trait_::AccountRepository;

#[cfg(test)]
pub mod mock;
#[cfg(test)]
pub use mock::MockAccountRepository;
