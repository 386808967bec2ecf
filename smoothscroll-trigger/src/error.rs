use alloc::string::String;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("invalid trigger position `{input}` (expected e.g. \"top 80%\")")]
    InvalidPosition { input: String },
    #[error("invalid toggle actions `{input}` (expected four of play, pause, resume, reverse, restart, reset, complete, none)")]
    InvalidToggleActions { input: String },
    #[error(transparent)]
    Core(#[from] smoothscroll::Error),
}
