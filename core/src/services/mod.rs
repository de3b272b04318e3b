//! Business services containing domain logic and use cases.

pub mod auth;
pub mod payment;
pub mod token;

// Re-export commonly used types
pub use auth::{
    require_role, AccountStore, AuthOutcome, Authenticator, CreateStaffCommand, CredentialService,
    LoginCommand, NewAccount, PasswordHasher, RegisterCommand, RequestAuthenticator, StaffService,
};
pub use payment::{PaymentService, SubmitPaymentCommand};
pub use token::{RevocationLedger, RevocationSweeper, SweepResult, TokenIssuer};
