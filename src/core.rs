pub mod battery;
pub mod cooling;
pub mod form;
pub mod severity;
pub mod storage;
