pub mod conversion;
pub mod redeem;
pub mod usage;
