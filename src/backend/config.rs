use std::env;

/// Environment variable selecting [`BackendMode`] (`auto`, `reference`, `accelerated`).
pub const ENV_BACKEND: &str = "DENSO_BACKEND";
/// Environment variable listing candidate CBLAS libraries, separated like `PATH`.
pub const ENV_LIBRARY: &str = "DENSO_BLAS_LIBRARY";
/// Environment variable overriding [`BackendConfig::min_elements`].
pub const ENV_MIN_ELEMENTS: &str = "DENSO_BLAS_MIN_ELEMENTS";

/// How the process-wide backend is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackendMode {
    /// Load a CBLAS library if one is found, otherwise use the reference kernels.
    #[default]
    Auto,
    /// Never load a library.
    Reference,
    /// Load a CBLAS library; failure is logged as a warning.
    Accelerated,
}

impl BackendMode {
    fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" | "" => Some(Self::Auto),
            "reference" | "ref" | "off" | "none" => Some(Self::Reference),
            "accelerated" | "blas" | "cblas" | "on" => Some(Self::Accelerated),
            _ => None,
        }
    }
}

/// Backend resolution settings.
///
/// ```
/// use denso::backend::{BackendConfig, BackendMode};
///
/// let cfg = BackendConfig {
///     mode: BackendMode::Reference,
///     ..BackendConfig::default()
/// };
/// assert_eq!(cfg.mode, BackendMode::Reference);
/// assert!(!cfg.libraries.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    pub mode: BackendMode,
    /// Library names or paths tried in order.
    pub libraries: Vec<String>,
    /// Calls touching fewer elements than this run on the reference kernels.
    pub min_elements: usize,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            mode: BackendMode::Auto,
            libraries: default_libraries(),
            min_elements: 0,
        }
    }
}

impl BackendConfig {
    /// Defaults overridden by `DENSO_BACKEND`, `DENSO_BLAS_LIBRARY` and
    /// `DENSO_BLAS_MIN_ELEMENTS`. Unparsable values are ignored with a warning.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Ok(raw) = env::var(ENV_BACKEND) {
            match BackendMode::parse(&raw) {
                Some(mode) => cfg.mode = mode,
                None => tracing::warn!(variable = ENV_BACKEND, value = %raw, "unrecognized backend mode"),
            }
        }

        if let Some(raw) = env::var_os(ENV_LIBRARY) {
            let libs: Vec<String> = env::split_paths(&raw)
                .filter(|p| !p.as_os_str().is_empty())
                .map(|p| p.to_string_lossy().into_owned())
                .collect();
            if !libs.is_empty() {
                cfg.libraries = libs;
            }
        }

        if let Ok(raw) = env::var(ENV_MIN_ELEMENTS) {
            match raw.trim().parse::<usize>() {
                Ok(n) => cfg.min_elements = n,
                Err(_) => {
                    tracing::warn!(variable = ENV_MIN_ELEMENTS, value = %raw, "expected an integer")
                }
            }
        }

        cfg
    }
}

fn default_libraries() -> Vec<String> {
    #[cfg(target_os = "linux")]
    let names: &[&str] = &[
        "libopenblas.so.0",
        "libopenblas.so",
        "libcblas.so.3",
        "libblas.so.3",
    ];

    #[cfg(target_os = "macos")]
    let names: &[&str] = &[
        "/System/Library/Frameworks/Accelerate.framework/Accelerate",
        "libopenblas.dylib",
        "libopenblas.0.dylib",
    ];

    #[cfg(target_os = "windows")]
    let names: &[&str] = &["libopenblas.dll", "openblas.dll"];

    #[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
    let names: &[&str] = &[];

    names.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_modes() {
        assert_eq!(BackendMode::parse("AUTO"), Some(BackendMode::Auto));
        assert_eq!(BackendMode::parse(" reference "), Some(BackendMode::Reference));
        assert_eq!(BackendMode::parse("accelerated"), Some(BackendMode::Accelerated));
        assert_eq!(BackendMode::parse("gpu"), None);
    }

    #[test]
    fn default_config() {
        let cfg = BackendConfig::default();
        assert_eq!(cfg.mode, BackendMode::Auto);
        assert_eq!(cfg.min_elements, 0);
    }
}
