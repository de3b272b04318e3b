//! Input validation helpers for account and payment fields

use once_cell::sync::Lazy;
use regex::Regex;

/// Minimum display name length after trimming
pub const DISPLAY_NAME_MIN: usize = 3;
/// Maximum display name length after trimming
pub const DISPLAY_NAME_MAX: usize = 20;
/// Minimum password length
pub const PASSWORD_MIN_LENGTH: usize = 8;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid email regex")
});

static CUSTOMER_NAME_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z ]{2,50}$").expect("Invalid customer name regex"));

/// Accepted payment methods
pub const PAYMENT_METHODS: [&str; 4] = ["card", "bank", "cash", "paypal"];

/// Trim and lowercase an email address
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Check the `local@domain.tld` shape of an already normalized email
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Check display name length (3-20 characters after trimming)
pub fn is_valid_display_name(name: &str) -> bool {
    let len = name.trim().chars().count();
    (DISPLAY_NAME_MIN..=DISPLAY_NAME_MAX).contains(&len)
}

/// Whether two display names collide: trimmed, case-insensitive
pub fn display_names_match(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

/// Check password strength: at least 8 characters with an uppercase letter,
/// a lowercase letter, a digit and a symbol
pub fn is_strong_password(password: &str) -> bool {
    password.chars().count() >= PASSWORD_MIN_LENGTH
        && password.chars().any(|c| c.is_uppercase())
        && password.chars().any(|c| c.is_lowercase())
        && password.chars().any(|c| c.is_ascii_digit())
        && password
            .chars()
            .any(|c| !c.is_alphanumeric() && !c.is_whitespace())
}

/// Check a payer name: 2-50 ASCII letters or spaces
pub fn is_valid_customer_name(name: &str) -> bool {
    CUSTOMER_NAME_REGEX.is_match(name)
}

/// Check that a payment method is one of [`PAYMENT_METHODS`]
pub fn is_valid_payment_method(method: &str) -> bool {
    PAYMENT_METHODS.contains(&method)
}

/// Mask an email for logging, keeping the first character and the domain
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => {
            let first = local.chars().next().map(String::from).unwrap_or_default();
            format!("{}***@{}", first, domain)
        }
        None => "***".to_string(),
    }
}
