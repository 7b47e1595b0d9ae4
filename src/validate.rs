use std::fmt;

use crate::models::NewEnquiry;
use crate::payment::BookingRequest;

/// One form field that failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

fn push(errors: &mut Vec<FieldError>, field: &'static str, message: &'static str) {
    errors.push(FieldError { field, message });
}

/// Accepts `local@host.tld` where the local part uses the usual email
/// charset, the host is alphanumeric with dots and dashes, and the TLD
/// is at least two letters.
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty()
        || !local
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "._%+-".contains(c))
    {
        return false;
    }
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    if host.is_empty()
        || !host
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
    {
        return false;
    }
    tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic())
}

/// Accepts an optional leading `+` followed by at least ten digits,
/// spaces, dashes, or parentheses.
pub fn is_valid_phone(phone: &str) -> bool {
    let rest = phone.strip_prefix('+').unwrap_or(phone);
    rest.len() >= 10
        && rest
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_whitespace() || "-()".contains(c))
}

fn check_contact(errors: &mut Vec<FieldError>, name: &str, email: &str, phone: &str) {
    if name.trim().is_empty() {
        push(errors, "name", "Name is required");
    }
    if email.trim().is_empty() {
        push(errors, "email", "Email is required");
    } else if !is_valid_email(email.trim()) {
        push(errors, "email", "Invalid email address");
    }
    if phone.trim().is_empty() {
        push(errors, "phone", "Phone number is required");
    } else if !is_valid_phone(phone.trim()) {
        push(errors, "phone", "Invalid phone number");
    }
}

/// Field checks for the booking form. The remaining-spots ceiling is
/// the checkout flow's concern, not a field rule.
pub fn validate_booking(request: &BookingRequest) -> Vec<FieldError> {
    let mut errors = Vec::new();
    check_contact(&mut errors, &request.name, &request.email, &request.phone);
    if request.participants < 1 {
        push(&mut errors, "participants", "At least 1 participant required");
    }
    errors
}

/// Field checks for the enquiry form.
pub fn validate_enquiry(enquiry: &NewEnquiry) -> Vec<FieldError> {
    let mut errors = Vec::new();
    check_contact(&mut errors, &enquiry.name, &enquiry.email, &enquiry.phone);
    if enquiry.message.trim().is_empty() {
        push(&mut errors, "message", "Message is required");
    }
    errors
}
