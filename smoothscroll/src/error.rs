use alloc::string::String;

/// Errors reported by the core engine.
///
/// Runtime operations (starting, ticking and cancelling runs) never fail; errors only come
/// from parsing user-facing configuration.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("unknown easing curve `{name}`")]
    UnknownEasing { name: String },
}
