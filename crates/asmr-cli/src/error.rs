use std::fmt;

use asmr_design::DesignError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// CLI usage error (missing args, invalid flags).
    Usage = 1,
    /// Input error (missing config file, invalid YAML, infeasible grid parameters).
    Input = 2,
    /// Processing error (failure while writing outputs).
    Processing = 3,
}

#[derive(Debug)]
pub struct CliError {
    pub code: ErrorCode,
    pub message: String,
}

impl CliError {
    pub fn usage(message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::Usage,
            message: message.into(),
        }
    }

    pub fn input(message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::Input,
            message: message.into(),
        }
    }

    pub fn processing(message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::Processing,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn exit_code(&self) -> u8 {
        self.code as u8
    }
}

impl From<DesignError> for CliError {
    fn from(err: DesignError) -> Self {
        if err.is_configuration() {
            CliError::input(err.to_string())
        } else {
            CliError::processing(err.to_string())
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}
