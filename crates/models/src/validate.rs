//! Field checks shared by the entity constructors and the service layer.
use crate::errors::ModelError;

pub const MAX_NAME_LEN: usize = 128;

pub fn validate_email(email: &str) -> Result<(), ModelError> {
    let email = email.trim();
    let Some((local, domain)) = email.split_once('@') else {
        return Err(ModelError::validation("invalid email"));
    };
    let domain_ok = domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.');
    if local.is_empty() || !domain_ok || domain.contains('@') || email.len() > 255 {
        return Err(ModelError::validation("invalid email"));
    }
    Ok(())
}

/// Required, trimmed, at most [`MAX_NAME_LEN`] chars.
pub fn validate_name(field: &str, value: &str) -> Result<(), ModelError> {
    let v = value.trim();
    if v.is_empty() {
        return Err(ModelError::Validation(format!("{field} required")));
    }
    if v.chars().count() > MAX_NAME_LEN {
        return Err(ModelError::Validation(format!("{field} too long (<= {MAX_NAME_LEN})")));
    }
    Ok(())
}

pub fn validate_optional(field: &str, value: Option<&str>, max: usize) -> Result<(), ModelError> {
    match value {
        Some(v) if v.chars().count() > max => Err(ModelError::Validation(format!("{field} too long (<= {max})"))),
        _ => Ok(()),
    }
}

pub fn validate_phone(phone: &str) -> Result<(), ModelError> {
    let p = phone.trim();
    let allowed = p.chars().all(|c| c.is_ascii_digit() || matches!(c, ' ' | '+' | '-' | '(' | ')'));
    if !(7..=20).contains(&p.len()) || !allowed || !p.chars().any(|c| c.is_ascii_digit()) {
        return Err(ModelError::validation("invalid phone number"));
    }
    Ok(())
}

/// Empty strings from forms are treated as absent.
pub fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_rules() {
        assert!(validate_email("ayse@acme.com").is_ok());
        assert!(validate_email("ayse@acme").is_err());
        assert!(validate_email("@acme.com").is_err());
        assert!(validate_email("ayse.acme.com").is_err());
        assert!(validate_email("a@b@c.com").is_err());
    }

    #[test]
    fn name_rules() {
        assert!(validate_name("name", "Ayse").is_ok());
        assert!(validate_name("name", "   ").is_err());
        assert!(validate_name("name", &"x".repeat(129)).is_err());
    }

    #[test]
    fn phone_rules() {
        assert!(validate_phone("+90 (212) 555-0101").is_ok());
        assert!(validate_phone("12345").is_err());
        assert!(validate_phone("555-ABCD-12").is_err());
    }

    #[test]
    fn blank_optional_becomes_none() {
        assert_eq!(non_empty(Some("  ".into())), None);
        assert_eq!(non_empty(Some(" x ".into())), Some("x".to_string()));
    }
}
