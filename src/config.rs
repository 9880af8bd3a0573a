//! Run configuration

/// Output format for a run report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    /// Plain text summary
    #[default]
    Console,
    /// A single JSON document
    Json,
}

/// Run configuration
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Print per-test status, timing and error causes
    pub verbose: bool,
    /// Use ANSI colors in console output
    pub color: bool,
    /// Replace the panic hook while tests run, so panics from test bodies are not printed
    ///
    /// The panic hook is process-wide. While any quiet run is in progress, panics on every thread are
    /// silenced, including those of concurrent runs that did not ask for it. The original hook comes back
    /// once the last quiet run finishes.
    pub quiet_panics: bool,
    /// Exit non-zero when any test failed or errored
    pub strict_exit: bool,
    /// Report output format
    pub format: ReportFormat,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            verbose: false,
            color: true,
            quiet_panics: false,
            strict_exit: true,
            format: ReportFormat::Console,
        }
    }
}

impl RunConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn with_quiet_panics(mut self, quiet: bool) -> Self {
        self.quiet_panics = quiet;
        self
    }

    pub fn with_strict_exit(mut self, strict: bool) -> Self {
        self.strict_exit = strict;
        self
    }

    pub fn with_format(mut self, format: ReportFormat) -> Self {
        self.format = format;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RunConfig::default();
        assert!(!config.verbose);
        assert!(config.color);
        assert!(!config.quiet_panics);
        assert!(config.strict_exit);
        assert_eq!(config.format, ReportFormat::Console);
    }

    #[test]
    fn test_builder_chain() {
        let config = RunConfig::new()
            .with_verbose(true)
            .with_color(false)
            .with_quiet_panics(true)
            .with_strict_exit(false)
            .with_format(ReportFormat::Json);
        assert!(config.verbose);
        assert!(!config.color);
        assert!(config.quiet_panics);
        assert!(!config.strict_exit);
        assert_eq!(config.format, ReportFormat::Json);
    }
}
