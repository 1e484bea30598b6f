//! Option and result types for browser actions.

use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;
use toolbridge_core::{ArtifactMetadata, CallOptions, ImageFormat};

/// Page lifecycle event to wait for after navigation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WaitUntil {
    #[default]
    Load,
    DomContentLoaded,
    NetworkIdle0,
    NetworkIdle2,
}

impl WaitUntil {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Load => "load",
            Self::DomContentLoaded => "domcontentloaded",
            Self::NetworkIdle0 => "networkidle0",
            Self::NetworkIdle2 => "networkidle2",
        }
    }
}

impl std::str::FromStr for WaitUntil {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "load" => Ok(Self::Load),
            "domcontentloaded" => Ok(Self::DomContentLoaded),
            "networkidle0" => Ok(Self::NetworkIdle0),
            "networkidle2" => Ok(Self::NetworkIdle2),
            other => Err(format!("unknown wait condition: {other}")),
        }
    }
}

// ============================================================================
// Navigate
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigateOptions {
    pub url: String,
    pub wait_until: WaitUntil,
    pub call: CallOptions,
}

impl NavigateOptions {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            wait_until: WaitUntil::default(),
            call: CallOptions::default(),
        }
    }

    #[must_use]
    pub const fn wait_until(mut self, wait_until: WaitUntil) -> Self {
        self.wait_until = wait_until;
        self
    }

    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.call = CallOptions::with_timeout(timeout);
        self
    }
}

/// Page metadata instead of page content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigateResult {
    pub url: String,
    pub title: String,
    pub status: u16,
    /// Wall-clock time around the bridge call, spawn included.
    pub load_time_ms: u64,
}

// ============================================================================
// Click
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickOptions {
    pub selector: String,
    pub wait_for_navigation: bool,
    pub delay_ms: Option<u64>,
    pub call: CallOptions,
}

impl ClickOptions {
    pub fn new(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            wait_for_navigation: false,
            delay_ms: None,
            call: CallOptions::default(),
        }
    }

    #[must_use]
    pub const fn wait_for_navigation(mut self, wait: bool) -> Self {
        self.wait_for_navigation = wait;
        self
    }

    #[must_use]
    pub const fn delay_ms(mut self, delay_ms: u64) -> Self {
        self.delay_ms = Some(delay_ms);
        self
    }

    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.call = CallOptions::with_timeout(timeout);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClickResult {
    pub success: bool,
    pub selector: String,
    pub element_found: bool,
    pub navigation_occurred: bool,
}

// ============================================================================
// Fill
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeOptions {
    pub selector: String,
    pub text: String,
    pub call: CallOptions,
}

impl TypeOptions {
    pub fn new(selector: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            text: text.into(),
            call: CallOptions::default(),
        }
    }

    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.call = CallOptions::with_timeout(timeout);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeResult {
    pub success: bool,
    pub selector: String,
    /// Characters, not bytes.
    pub characters_typed: usize,
}

// ============================================================================
// Screenshot
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScreenshotOptions {
    /// Where to write the image. Without it nothing is written.
    pub path: Option<PathBuf>,
    pub full_page: bool,
    pub format: ImageFormat,
    /// JPEG quality, passed through untouched.
    pub quality: Option<u8>,
    pub call: CallOptions,
}

impl ScreenshotOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    #[must_use]
    pub const fn full_page(mut self, full_page: bool) -> Self {
        self.full_page = full_page;
        self
    }

    #[must_use]
    pub const fn format(mut self, format: ImageFormat) -> Self {
        self.format = format;
        self
    }

    #[must_use]
    pub const fn quality(mut self, quality: u8) -> Self {
        self.quality = Some(quality);
        self
    }

    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.call = CallOptions::with_timeout(timeout);
        self
    }
}

/// What survives of a screenshot: whether it was written, and its metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenshotResult {
    pub saved: bool,
    #[serde(flatten)]
    pub metadata: ArtifactMetadata,
}
