#[path = "trait.rs"]
mod trait_;

pub use trait_::PaymentRepository;

#[cfg(test)]
pub mod mock;
#[cfg(test)]
pub use mock::MockPaymentRepository;

