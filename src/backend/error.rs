use thiserror::Error;

/// Failure to install an accelerated backend.
///
/// Never raised by kernels: resolution failures are logged and the crate
/// keeps running on the reference kernels. The error is only surfaced by the
/// explicit entry points [`configure`](super::configure) and
/// [`AcceleratedBackend::load`](super::AcceleratedBackend::load).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    /// The configuration selects the reference backend.
    #[error("accelerated backend disabled by configuration")]
    Disabled,

    /// None of the candidate libraries could be opened.
    #[error("no CBLAS library could be loaded (tried: {})", .tried.join(", "))]
    LibraryNotFound { tried: Vec<String> },

    /// The library opened but exports no CBLAS routine we use.
    #[error("library `{library}` exports no usable CBLAS symbols")]
    NoSymbols { library: String },

    /// Backend resolution already ran; configuration can no longer change.
    #[error("backend already resolved")]
    AlreadyResolved,
}
