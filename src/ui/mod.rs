//! Screen logic, independent of any rendering toolkit.

pub mod mvi;
pub mod users;
