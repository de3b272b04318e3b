
mod authenticator_tests;
mod policy_tests;
