use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref EMAIL_RE: Regex =
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern compiles");
}

/// `local@domain.tld`, no whitespace, a single `@`.
pub fn is_email_valid(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}
