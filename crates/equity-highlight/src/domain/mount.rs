use scraper::ElementRef;

/// Attribute carrying the ticker symbol.
pub const SYMBOL_ATTRIBUTE: &str = "data-o-equity-highlight-app-symbol";
/// Attribute carrying the environment flag.
pub const ENVIRONMENT_ATTRIBUTE: &str = "data-env";
/// Selector identifying mount-point elements.
pub const MOUNT_MARKER_SELECTOR: &str = r#"[data-o-component="o-equity-highlight-app"]"#;

/// Attributes captured from a mount-point element at discovery time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MountPoint {
    symbol: Option<String>,
    environment: Option<String>,
}

impl MountPoint {
    pub fn new(symbol: Option<String>, environment: Option<String>) -> Self {
        Self {
            symbol,
            environment,
        }
    }

    /// Reads the mount-point attributes from a parsed element.
    pub fn from_element(element: &ElementRef<'_>) -> Self {
        let value = element.value();
        Self::new(
            value.attr(SYMBOL_ATTRIBUTE).map(str::to_owned),
            value.attr(ENVIRONMENT_ATTRIBUTE).map(str::to_owned),
        )
    }

    /// Raw symbol attribute, unvalidated.
    pub fn symbol(&self) -> Option<&str> {
        self.symbol.as_deref()
    }

    pub fn environment(&self) -> Option<&str> {
        self.environment.as_deref()
    }
}
