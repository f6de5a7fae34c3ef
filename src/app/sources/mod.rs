pub mod nspd;
pub mod pkk;

pub use nspd::NspdSource;
pub use pkk::PkkSource;
