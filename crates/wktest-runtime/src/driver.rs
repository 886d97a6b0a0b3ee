//! Subprocess-driver variant selection.
//!
//! Tests run the driver under a display server. The default is a
//! virtual framebuffer (software rendering); setting
//! `USE_NATIVE_XDISPLAY` in the environment selects the native X
//! display instead. The choice is made once, at port construction.

use wktest_core::environ::HostEnv;

/// Environment flag selecting the native display driver.
pub const USE_NATIVE_XDISPLAY: &str = "USE_NATIVE_XDISPLAY";

/// Which display wrapper the driver subprocess runs under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverKind {
    /// Virtual framebuffer; rendering falls back to a software
    /// rasterizer.
    Xvfb,
    /// The host's native X display.
    Xorg,
}

impl DriverKind {
    /// Select the driver variant from the environment snapshot.
    #[must_use]
    pub fn select(env: &HostEnv) -> Self {
        if env.get(USE_NATIVE_XDISPLAY).is_some_and(|v| !v.is_empty()) {
            Self::Xorg
        } else {
            Self::Xvfb
        }
    }

    /// Whether this variant renders in software (and so wants the
    /// llvmpipe rasterizer on its library path).
    #[must_use]
    pub const fn is_software_rendering(self) -> bool {
        matches!(self, Self::Xvfb)
    }

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Xvfb => "Xvfb",
            Self::Xorg => "Xorg",
        }
    }
}

impl std::fmt::Display for DriverKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}
