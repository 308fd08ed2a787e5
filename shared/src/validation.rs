//! Validation utilities for the Construction Materials Inventory Platform

// ============================================================================
// Material Validations
// ============================================================================

/// Validate a material barcode/QR code: 3-32 chars, uppercase alphanumerics
/// plus `-` and `_`
pub fn validate_material_code(code: &str) -> Result<(), &'static str> {
    if code.len() < 3 || code.len() > 32 {
        return Err("Material code must be between 3 and 32 characters");
    }
    if !code
        .chars()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '-' || c == '_')
    {
        return Err("Material code may only contain uppercase letters, digits, '-' and '_'");
    }
    Ok(())
}

/// Validate stock bounds: 0 <= min_stock <= max_stock
pub fn validate_stock_bounds(min_stock: i64, max_stock: i64) -> Result<(), &'static str> {
    if min_stock < 0 {
        return Err("Minimum stock cannot be negative");
    }
    if max_stock < min_stock {
        return Err("Maximum stock must be at least the minimum stock");
    }
    Ok(())
}

// ============================================================================
// Provider Validations
// ============================================================================

/// Validate a Peruvian RUC: exactly 11 digits
pub fn validate_tax_id(ruc: &str) -> Result<(), &'static str> {
    if ruc.len() != 11 || !ruc.chars().all(|c| c.is_ascii_digit()) {
        return Err("RUC must be exactly 11 digits");
    }
    Ok(())
}

/// Validate phone format (basic check): digits, spaces, '+', '-'
pub fn validate_phone(phone: &str) -> Result<(), &'static str> {
    if phone.len() < 6 || phone.len() > 20 {
        return Err("Phone number must be between 6 and 20 characters");
    }
    if !phone
        .chars()
        .all(|c| c.is_ascii_digit() || c == ' ' || c == '+' || c == '-')
    {
        return Err("Phone number contains invalid characters");
    }
    Ok(())
}

// ============================================================================
// General Validations
// ============================================================================

/// Validate email format (basic check)
pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if email.contains('@') && email.contains('.') && email.len() >= 5 {
        Ok(())
    } else {
        Err("Invalid email format")
    }
}

/// Validate password strength: at least 8 characters with a letter and a digit
pub fn validate_password(password: &str) -> Result<(), &'static str> {
    if password.len() < 8 {
        return Err("Password must be at least 8 characters");
    }
    if !password.chars().any(|c| c.is_ascii_alphabetic())
        || !password.chars().any(|c| c.is_ascii_digit())
    {
        return Err("Password must contain both letters and digits");
    }
    Ok(())
}

/// Trim a free-text field and reject control characters
pub fn sanitize_text(input: &str) -> Result<String, &'static str> {
    let trimmed = input.trim();
    if trimmed.chars().any(|c| c.is_control() && c != '\n') {
        return Err("Text contains control characters");
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_material_codes() {
        assert!(validate_material_code("MAT-001").is_ok());
        assert!(validate_material_code("CEM_PORTLAND_1").is_ok());
        assert!(validate_material_code("AB").is_err()); // Too short
        assert!(validate_material_code("mat-001").is_err()); // Lowercase
        assert!(validate_material_code("MAT 001").is_err()); // Space
    }

    #[test]
    fn test_stock_bounds() {
        assert!(validate_stock_bounds(10, 1000).is_ok());
        assert!(validate_stock_bounds(0, 0).is_ok());
        assert!(validate_stock_bounds(-1, 100).is_err());
        assert!(validate_stock_bounds(100, 50).is_err());
    }

    #[test]
    fn test_tax_id() {
        assert!(validate_tax_id("20123456789").is_ok());
        assert!(validate_tax_id("2012345678").is_err()); // 10 digits
        assert!(validate_tax_id("2012345678X").is_err()); // Letter
    }

    #[test]
    fn test_email() {
        assert!(validate_email("almacen@marvic.pe").is_ok());
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("a@b").is_err());
    }

    #[test]
    fn test_password() {
        assert!(validate_password("obra2024segura").is_ok());
        assert!(validate_password("short1").is_err());
        assert!(validate_password("solopalabras").is_err());
        assert!(validate_password("12345678").is_err());
    }

    #[test]
    fn test_sanitize_text() {
        assert_eq!(sanitize_text("  hola  ").unwrap(), "hola");
        assert!(sanitize_text("bad\u{0007}text").is_err());
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn sanitize_is_idempotent(input in "[a-zA-Z0-9 áéíóúñ.,-]{0,80}") {
                if let Ok(once) = sanitize_text(&input) {
                    prop_assert_eq!(sanitize_text(&once).unwrap(), once);
                }
            }

            #[test]
            fn valid_rucs_are_accepted(ruc in "[0-9]{11}") {
                prop_assert!(validate_tax_id(&ruc).is_ok());
            }

            #[test]
            fn wrong_length_rucs_are_rejected(ruc in "[0-9]{1,10}") {
                prop_assert!(validate_tax_id(&ruc).is_err());
            }

            #[test]
            fn passwords_need_letters_and_digits(password in "[0-9]{8,20}") {
                prop_assert!(validate_password(&password).is_err());
            }
        }
    }
}
