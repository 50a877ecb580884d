//! Cleanup options

/// Options for cleanup operations
#[derive(Debug, Clone)]
pub struct CleanupOptions {
    /// Ask for the typed confirmation phrase before deleting
    pub require_confirmation: bool,
    /// Report what matches without deleting anything
    pub dry_run: bool,
}

impl Default for CleanupOptions {
    fn default() -> Self {
        Self {
            require_confirmation: true,
            dry_run: false,
        }
    }
}

impl CleanupOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_confirmation(mut self, required: bool) -> Self {
        self.require_confirmation = required;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}
