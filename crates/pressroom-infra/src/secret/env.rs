//! Environment variable names and lookup.

pub const WEBHOOK_SECRET_VAR: &str = "CHAIBUILDER_WEBHOOK_SECRET";
pub const APP_KEY_VAR: &str = "CHAIBUILDER_APP_KEY";
pub const SUPABASE_SERVICE_KEY_VAR: &str = "SUPABASE_SERVICE_ROLE_KEY";
pub const OPENAI_API_KEY_VAR: &str = "OPENAI_API_KEY";

/// Read one environment variable.
///
/// A variable holding invalid Unicode is treated as unset, since secrets
/// must be valid strings.
pub fn read_var(key: &str) -> Option<String> {
    match std::env::var(key) {
        Ok(val) => Some(val),
        Err(std::env::VarError::NotPresent) => None,
        Err(std::env::VarError::NotUnicode(_)) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_var_missing() {
        assert!(read_var("PRESSROOM_TEST_NONEXISTENT_VAR_XYZ").is_none());
    }

    #[test]
    fn test_read_var_existing() {
        // SAFETY: the variable name is unique to this test.
        unsafe { std::env::set_var("PRESSROOM_TEST_SECRET_1", "value-123") };
        assert_eq!(read_var("PRESSROOM_TEST_SECRET_1").as_deref(), Some("value-123"));
        // SAFETY: set above, not shared with other tests.
        unsafe { std::env::remove_var("PRESSROOM_TEST_SECRET_1") };
    }
}
