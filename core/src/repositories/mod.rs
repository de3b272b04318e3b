pub mod account;
pub mod payment;
pub mod revocation;

pub use account::AccountRepository;
pub use payment::PaymentRepository;
pub use revocation::RevocationRepository;

#[cfg(test)]
pub use account::MockAccountRepository;
#[cfg(test)]
pub use payment::MockPaymentRepository;
#[cfg(test)]
pub use revocation::MockRevocationRepository;
