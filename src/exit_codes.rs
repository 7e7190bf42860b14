//! Exit code constants for the sspc CLI.
//!
//! - 0: Success
//! - 1: Configuration error (missing product name, bad config or skeleton)
//! - 2: I/O failure (unreadable template, unwritable destination)
//! - 3: Malformed template (unterminated tag)
//! - 4: Internal translation failure (placeholder bookkeeping)

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// Configuration error: missing product name, invalid config or skeleton.
pub const CONFIG_ERROR: i32 = 1;

/// I/O failure: source unreadable or destination unwritable.
pub const IO_FAILURE: i32 = 2;

/// The template could not be parsed.
pub const TEMPLATE_FAILURE: i32 = 3;

/// Placeholder bookkeeping broke an invariant.
pub const INTERNAL_FAILURE: i32 = 4;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_distinct() {
        let codes = [
            SUCCESS,
            CONFIG_ERROR,
            IO_FAILURE,
            TEMPLATE_FAILURE,
            INTERNAL_FAILURE,
        ];
        for (i, &a) in codes.iter().enumerate() {
            for (j, &b) in codes.iter().enumerate() {
                if i != j {
                    assert_ne!(a, b, "Exit codes must be distinct");
                }
            }
        }
    }

    #[test]
    fn success_is_zero() {
        assert_eq!(SUCCESS, 0);
    }
}
