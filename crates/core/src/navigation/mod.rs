//! Navigation port used to hand routing decisions to the application shell

pub mod ports;
