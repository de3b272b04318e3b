//! Payment request handling behind the role gates

mod service;


pub use service::{PaymentService, SubmitPaymentCommand};
