//! Graphics context version/profile selection.
//!
//! A core profile is preferred. Desktop platforms known to cap the core
//! version (Windows, macOS) get a lower one; everything else gets the newest
//! core profile, or an ES context when core is not wanted.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextProfile {
    Core,
    Compatibility,
    Es,
}

impl ContextProfile {
    pub fn label(self) -> &'static str {
        match self {
            Self::Core => "CORE",
            Self::Compatibility => "COMPATIBILITY",
            Self::Es => "ES",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContextVersion {
    pub major: u8,
    pub minor: u8,
    pub profile: ContextProfile,
}

impl std::fmt::Display for ContextVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{} {}", self.major, self.minor, self.profile.label())
    }
}

/// Human-readable name of the platform this binary was built for.
pub fn platform_name() -> &'static str {
    match std::env::consts::OS {
        "windows" => "Windows",
        "macos" => "Mac OS X",
        "linux" => "Linux",
        "android" => "Android",
        "ios" => "iOS",
        "freebsd" => "FreeBSD",
        _ => "Unknown",
    }
}

pub fn select_context(platform: &str, prefer_core: bool) -> ContextVersion {
    match platform {
        "Windows" => ContextVersion {
            major: 4,
            minor: 3,
            profile: ContextProfile::Core,
        },
        "Mac OS X" => ContextVersion {
            major: 4,
            minor: 1,
            profile: ContextProfile::Core,
        },
        _ if prefer_core => ContextVersion {
            major: 4,
            minor: 6,
            profile: ContextProfile::Core,
        },
        _ => ContextVersion {
            major: 3,
            minor: 2,
            profile: ContextProfile::Es,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn core_is_default_on_linux() {
        let v = select_context("Linux", true);
        assert_eq!((v.major, v.minor, v.profile), (4, 6, ContextProfile::Core));
        assert_eq!(v.to_string(), "4.6 CORE");
    }

    #[test]
    fn es_fallback_when_core_not_preferred() {
        let v = select_context("Linux", false);
        assert_eq!((v.major, v.minor, v.profile), (3, 2, ContextProfile::Es));
        assert_eq!(v.to_string(), "3.2 ES");
    }

    #[test]
    fn windows_and_mac_always_get_core() {
        for prefer_core in [true, false] {
            let win = select_context("Windows", prefer_core);
            assert_eq!((win.major, win.minor, win.profile), (4, 3, ContextProfile::Core));
            let mac = select_context("Mac OS X", prefer_core);
            assert_eq!((mac.major, mac.minor, mac.profile), (4, 1, ContextProfile::Core));
        }
    }

    #[test]
    fn platform_name_is_known_for_host() {
        assert!(!platform_name().is_empty());
    }

    #[test]
    fn profile_labels() {
        assert_eq!(ContextProfile::Compatibility.label(), "COMPATIBILITY");
    }
}
