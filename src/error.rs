/// Crate-wide error type.
///
/// Variants follow the two failure families the pipeline distinguishes —
/// upstream transport/decode problems vs data that arrived but does not have
/// the expected shape — plus `Config` for missing credentials before any
/// request is made.
#[derive(Clone, Debug)]
pub enum AppError {
    Config(String),
    Upstream(String),
    DataShape(String),
}

impl AppError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        Self::Upstream(message.into())
    }

    pub fn data_shape(message: impl Into<String>) -> Self {
        Self::DataShape(message.into())
    }

    /// Process exit code for runs that abort before a report is produced.
    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::Config(_) => 2,
            AppError::Upstream(_) => 3,
            AppError::DataShape(_) => 4,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            AppError::Config(_) => "config",
            AppError::Upstream(_) => "upstream",
            AppError::DataShape(_) => "data shape",
        }
    }

    fn message(&self) -> &str {
        match self {
            AppError::Config(m) | AppError::Upstream(m) | AppError::DataShape(m) => m,
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} error: {}", self.kind(), self.message())
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_kind_and_message() {
        let err = AppError::data_shape("bad unit");
        assert_eq!(err.to_string(), "data shape error: bad unit");
        assert_eq!(err.exit_code(), 4);
    }
}
