//! Request middleware. Only access logging for now; the registry has no
//! authentication layer.

pub mod access_log;
