use escrowed::{ error::{ ErrorCode, EscrowResult }, math::safe_math::SafeMath, validate };
use soroban_sdk::{ Address, Env, Vec };

use crate::{
    events::RewardDistributorEvents,
    math::reward::{ calculate_acc_reward_increment, calculate_pool_reward },
    storage::{
        get_pool,
        get_pool_id_by_asset,
        get_pool_length,
        get_token_per_sec,
        get_total_alloc_point,
        push_pool,
        save_pool,
        save_total_alloc_point,
        PoolInfo,
    },
};

pub fn add_pool(
    env: &Env,
    alloc_point: u64,
    staked_asset: &Address,
    harvest_interval: u64,
    rewarders: Vec<Address>
) -> EscrowResult<u32> {
    validate!(
        env,
        get_pool_id_by_asset(env, staked_asset).is_none(),
        ErrorCode::PoolAlreadyExists,
        "addPool: staked asset already has a pool"
    )?;

    mass_update_pools(env)?;

    save_total_alloc_point(env, get_total_alloc_point(env).safe_add(alloc_point, env)?);

    let pool = PoolInfo {
        id: get_pool_length(env),
        staked_asset: staked_asset.clone(),
        total_staked: 0,
        acc_reward_per_share: 0,
        last_reward_time: env.ledger().timestamp(),
        alloc_point,
        harvest_interval,
        rewarders,
    };
    push_pool(env, &pool);

    RewardDistributorEvents::add_pool(
        env,
        pool.id,
        staked_asset.clone(),
        alloc_point,
        harvest_interval
    );

    Ok(pool.id)
}

pub fn set_pool(
    env: &Env,
    pool_id: u32,
    alloc_point: u64,
    harvest_interval: u64,
    rewarders: Vec<Address>
) -> EscrowResult {
    // existence is checked before the mass update touches every pool
    get_pool(env, pool_id)?;

    mass_update_pools(env)?;

    let mut pool = get_pool(env, pool_id)?;
    save_total_alloc_point(
        env,
        get_total_alloc_point(env).safe_sub(pool.alloc_point, env)?.safe_add(alloc_point, env)?
    );

    pool.alloc_point = alloc_point;
    pool.harvest_interval = harvest_interval;
    pool.rewarders = rewarders;
    save_pool(env, &pool);

    RewardDistributorEvents::set_pool(env, pool_id, alloc_point, harvest_interval);

    Ok(())
}

/// Accumulator of `pool` as if it were updated now.
///
/// Time that passes while nothing is staked adds nothing: the emission for it
/// is never distributed.
pub fn current_acc_reward_per_share(env: &Env, pool: &PoolInfo) -> EscrowResult<i128> {
    let now = env.ledger().timestamp();
    if now <= pool.last_reward_time || pool.total_staked <= 0 {
        return Ok(pool.acc_reward_per_share);
    }

    let reward = calculate_pool_reward(
        env,
        now - pool.last_reward_time,
        get_token_per_sec(env),
        pool.alloc_point,
        get_total_alloc_point(env)
    )?;
    let increment = calculate_acc_reward_increment(env, reward, pool.total_staked)?;

    pool.acc_reward_per_share.safe_add(increment, env)
}

/// Brings `pool` up to the current time at the current rate.
pub fn accrue(env: &Env, pool: &mut PoolInfo) -> EscrowResult {
    let now = env.ledger().timestamp();
    if now <= pool.last_reward_time {
        return Ok(());
    }

    pool.acc_reward_per_share = current_acc_reward_per_share(env, pool)?;
    pool.last_reward_time = now;

    RewardDistributorEvents::update_pool(
        env,
        pool.id,
        pool.last_reward_time,
        pool.total_staked,
        pool.acc_reward_per_share
    );

    Ok(())
}

pub fn update_pool(env: &Env, pool_id: u32) -> EscrowResult<PoolInfo> {
    let mut pool = get_pool(env, pool_id)?;
    accrue(env, &mut pool)?;
    save_pool(env, &pool);
    Ok(pool)
}

pub fn mass_update_pools(env: &Env) -> EscrowResult {
    for pool_id in 0..get_pool_length(env) {
        update_pool(env, pool_id)?;
    }
    Ok(())
}
