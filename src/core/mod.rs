//! Core library components.
//!
//! The trust roster, recipient resolution, and the guard in front of
//! encryption, plus the adapters they need: configuration, the gpg
//! backend, and the editor.

pub mod access;
pub mod cipher;
pub mod config;
pub mod constants;
pub mod domain;
pub mod editor;
pub mod guard;
pub mod roster;
pub mod scope;
pub mod secrets;
pub mod trust;
pub mod types;
pub mod validation;
