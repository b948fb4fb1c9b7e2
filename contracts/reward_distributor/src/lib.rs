#![no_std]

mod contract;
mod controller;
mod distributor;
mod events;
mod math;
pub mod storage;

pub use crate::contract::{ RewardDistributor, RewardDistributorClient };

#[cfg(test)]
mod tests;
