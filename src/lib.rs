//! Core of the UniHelp question-and-answer desk.
//!
//! [`store::QaStore`] owns all state and is the only way to change it.
//! [`views`] derives what the front-end shows, [`persist`] keeps the
//! snapshot on disk and [`session`] handles demo login.

pub mod config;
pub mod logging;
pub mod model;
pub mod mvi;
pub mod persist;
pub mod session;
pub mod store;
pub mod views;
