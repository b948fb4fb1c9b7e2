#![no_std]

mod allowance;
mod balance;
mod contract;
mod controller;
mod es_token;
mod events;
mod math;
mod metadata;
pub mod storage;

pub use crate::contract::{ EsToken, EsTokenClient };
