/// Process-level error: a message plus the exit code `main` should return.
///
/// Exit codes:
/// - `2`: invalid input, configuration, or IO
/// - `3`: a cached matrix was requested but none is stored
/// - `4`: stored or computed data is inconsistent, or rendering failed
#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    /// Malformed user input or an IO failure.
    pub fn input(message: impl Into<String>) -> Self {
        Self::new(2, message)
    }

    /// Cache lookup failure (no fallback to recomputation).
    pub fn missing(message: impl Into<String>) -> Self {
        Self::new(3, message)
    }

    /// Inconsistent matrices or a failed render.
    pub fn data(message: impl Into<String>) -> Self {
        Self::new(4, message)
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_set_exit_codes() {
        assert_eq!(AppError::input("x").exit_code(), 2);
        assert_eq!(AppError::missing("x").exit_code(), 3);
        assert_eq!(AppError::data("x").exit_code(), 4);
        assert_eq!(AppError::data("boom").to_string(), "boom");
    }
}
