//! Local checks for the account security form.

use crate::error::AppError;

const MIN_PASSWORD_LENGTH: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordStrength {
    None,
    Weak,
    Fair,
    Strong,
}

impl PasswordStrength {
    pub fn label(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Weak => "Weak",
            Self::Fair => "Fair",
            Self::Strong => "Strong",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Self::None => "#ccc",
            Self::Weak => "#d9534f",
            Self::Fair => "#f0ad4e",
            Self::Strong => "#5cb85c",
        }
    }

    /// Width of the strength meter, in percent.
    pub fn fill_percent(self) -> u8 {
        match self {
            Self::None => 0,
            Self::Weak => 33,
            Self::Fair => 66,
            Self::Strong => 100,
        }
    }
}

pub fn password_strength(password: &str) -> PasswordStrength {
    if password.is_empty() {
        return PasswordStrength::None;
    }

    let length = password.chars().count();
    let has_lower = password.chars().any(|ch| ch.is_ascii_lowercase());
    let has_upper = password.chars().any(|ch| ch.is_ascii_uppercase());
    let checks = [
        length >= 8,
        length >= 12,
        has_lower && has_upper,
        password.chars().any(|ch| ch.is_ascii_digit()),
        password.chars().any(|ch| !ch.is_ascii_alphanumeric()),
    ];
    let score = checks.iter().filter(|passed| **passed).count();

    match score {
        0..=2 => PasswordStrength::Weak,
        3 => PasswordStrength::Fair,
        _ => PasswordStrength::Strong,
    }
}

pub fn validate_password_change(current: &str, new: &str, confirm: &str) -> Result<(), AppError> {
    if current.is_empty() || new.is_empty() || confirm.is_empty() {
        return Err(AppError::invalid_input("please fill in all fields"));
    }
    if new != confirm {
        return Err(AppError::invalid_input("new passwords do not match"));
    }
    if new.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AppError::invalid_input(format!(
            "new password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }
    if current == new {
        return Err(AppError::invalid_input(
            "new password must be different from current password",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{PasswordStrength, password_strength, validate_password_change};

    #[test]
    fn empty_password_has_no_strength() {
        let strength = password_strength("");
        assert_eq!(strength, PasswordStrength::None);
        assert_eq!(strength.fill_percent(), 0);
    }

    #[test]
    fn strength_follows_score() {
        assert_eq!(password_strength("abc"), PasswordStrength::Weak);
        assert_eq!(password_strength("abcdefgh1"), PasswordStrength::Weak);
        assert_eq!(password_strength("Abcdefgh1"), PasswordStrength::Fair);
        assert_eq!(password_strength("Abcdefgh1!"), PasswordStrength::Strong);
        assert_eq!(password_strength("Abcdefghijk1"), PasswordStrength::Strong);
    }

    #[test]
    fn strength_exposes_meter_values() {
        let strong = password_strength("Cacao-Pod-2024");
        assert_eq!(strong.label(), "Strong");
        assert_eq!(strong.color(), "#5cb85c");
        assert_eq!(strong.fill_percent(), 100);
    }

    #[test]
    fn change_requires_every_field() {
        let err = validate_password_change("", "secret1", "secret1").unwrap_err();
        assert_eq!(err.code(), "invalid_input");
    }

    #[test]
    fn change_rejects_mismatch_short_and_reused() {
        assert!(validate_password_change("old-pass", "secret1", "secret2").is_err());
        assert!(validate_password_change("old-pass", "abc", "abc").is_err());
        assert!(validate_password_change("secret1", "secret1", "secret1").is_err());
    }

    #[test]
    fn change_accepts_valid_input() {
        assert!(validate_password_change("old-pass", "Cacao-2024", "Cacao-2024").is_ok());
    }
}
