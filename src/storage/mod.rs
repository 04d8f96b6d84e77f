//! Persistent document slot
//!
//! A single-slot mailbox that hands a converted document from the upload
//! flow to the reader. Writes always replace the whole value; the reader
//! clears the slot when the value cannot be hydrated.

mod slot;

pub use slot::{DocumentSlot, FileSlot, MemorySlot, StorageError};
