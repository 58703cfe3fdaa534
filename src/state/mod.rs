//! The data controller and the state it hands out.
//!
//! This module provides the `DataController`, the single access point for
//! preference flags and the current-user reference.

pub mod data_controller;
pub mod user;

pub use {
    data_controller::{DataController, PreferenceEvent, shared_instance},
    user::CurrentUser,
};
