//! HTTP handlers for heroes, powers and hero powers.

pub mod hero_powers;
pub mod heroes;
pub mod powers;
pub use hero_powers::*;
pub use heroes::*;
pub use powers::*;

use crate::error::AppError;

/// Parse an integer path id. Anything else cannot name a row, so it is reported as `not_found`.
fn parse_id(raw: &str, not_found: &str) -> Result<i64, AppError> {
    raw.parse().map_err(|_| AppError::NotFound(not_found.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_numeric_ids_are_not_found() {
        assert_eq!(parse_id("12", "x").unwrap(), 12);
        assert!(matches!(parse_id("twelve", "Hero not found"), Err(AppError::NotFound(m)) if m == "Hero not found"));
    }
}
