pub mod redeem;
