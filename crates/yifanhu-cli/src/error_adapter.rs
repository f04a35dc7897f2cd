//! Error adapter for converting [`CliError`] to miette diagnostics.
//!
//! This module provides the bridge between the CLI's standard error types
//! and miette's rich diagnostic formatting.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan};

use crate::error::CliError;

/// Adapter rendering a [`CliError`] as a miette diagnostic.
pub struct ErrorAdapter<'a>(pub &'a CliError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(self.0)
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match self.0 {
            CliError::Io(_) => "yifanhu::io",
            CliError::Input { .. } | CliError::Graph(_) => "yifanhu::input",
            CliError::Config(_) => "yifanhu::config",
            CliError::Layout(_) => "yifanhu::layout",
            CliError::Output(_) => "yifanhu::output",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match self.0 {
            CliError::Input { .. } => {
                "each record must be `source,target` or a single non-negative node id"
            }
            CliError::Layout(_) => "check the [layout] section of the configuration",
            _ => return None,
        };
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        None
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}
