//! Session ports, validity state and auth-failure policy

pub mod policy;
pub mod ports;
pub mod state;
