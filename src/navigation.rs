//! Addressable views

/// The two views the application navigates between
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// Upload entry point
    Acquisition,
    /// Reader for the stored document
    Reader,
}

impl Navigation {
    pub fn path(self) -> &'static str {
        match self {
            Navigation::Acquisition => "/",
            Navigation::Reader => "/reader",
        }
    }
}
