use escrowed::{
    constants::ACC_REWARD_PRECISION,
    error::EscrowResult,
    math::{ casting::Cast, safe_math::{ SafeMath, SafeMulDiv } },
};
use soroban_sdk::Env;

use crate::storage::UserInfo;

/// Reward a pool earned over `elapsed` seconds: its `alloc_point` share of
/// the distributor's rate.
pub fn calculate_pool_reward(
    env: &Env,
    elapsed: u64,
    token_per_sec: i128,
    alloc_point: u64,
    total_alloc_point: u64
) -> EscrowResult<i128> {
    if total_alloc_point == 0 {
        return Ok(0);
    }

    elapsed
        .cast::<i128>(env)?
        .safe_mul(token_per_sec, env)?
        .safe_mul_div_floor(alloc_point.cast(env)?, total_alloc_point.cast(env)?, env)
}

pub fn calculate_acc_reward_increment(
    env: &Env,
    reward: i128,
    total_staked: i128
) -> EscrowResult<i128> {
    reward.safe_mul_div_floor(ACC_REWARD_PRECISION, total_staked, env)
}

/// Reward accumulated by `amount` staked units since the pool started.
pub fn calculate_accumulated(env: &Env, amount: i128, acc_reward_per_share: i128) -> EscrowResult<i128> {
    amount.safe_mul_div_floor(acc_reward_per_share, ACC_REWARD_PRECISION, env)
}

pub fn calculate_pending(env: &Env, user: &UserInfo, acc_reward_per_share: i128) -> EscrowResult<i128> {
    calculate_accumulated(env, user.amount, acc_reward_per_share)?.safe_sub(user.reward_debt, env)
}

/// The distributor's own share of the global rate.
pub fn calculate_token_per_sec(
    env: &Env,
    global_token_per_sec: i128,
    alloc_point: u128,
    total_alloc_point: u128
) -> EscrowResult<i128> {
    if total_alloc_point == 0 {
        return Ok(0);
    }

    global_token_per_sec.safe_mul_div_floor(alloc_point.cast(env)?, total_alloc_point.cast(env)?, env)
}
