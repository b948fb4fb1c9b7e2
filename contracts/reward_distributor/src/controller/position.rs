use escrowed::{
    error::{ ErrorCode, EscrowResult },
    interfaces::ComplexRewarderClient,
    math::safe_math::SafeMath,
    safe_decrement,
    safe_increment,
    validate,
};
use soroban_sdk::{ log, token, Address, Env };

use crate::{
    controller::{
        emission::sync_emission_rate,
        pool::{ current_acc_reward_per_share, update_pool },
    },
    events::RewardDistributorEvents,
    math::reward::{ calculate_accumulated, calculate_pending },
    storage::{
        get_config,
        get_pool,
        get_pool_id_by_asset,
        get_user_info,
        save_pool,
        save_user_info,
        PoolInfo,
        UserInfo,
    },
};

fn pool_id_for_usage(env: &Env, es_token: &Address) -> EscrowResult<u32> {
    get_pool_id_by_asset(env, es_token).ok_or_else(|| {
        log!(env, "Reward Distributor: caller has no pool");
        ErrorCode::UsageNotAllowed
    })
}

/// Sends up to `amount` reward token to `user` and returns what was sent.
fn pay_reward(env: &Env, user: &Address, amount: i128) -> i128 {
    let reward_token = token::Client::new(env, &get_config(env).reward_token);
    let custody = env.current_contract_address();

    let paid = amount.min(reward_token.balance(&custody));
    if paid > 0 {
        reward_token.transfer(&custody, user, &paid);
    }
    paid
}

/// Pays out or locks up what `user_info` earned up to the pool's current
/// accumulator.
///
/// A payout happens on the first settlement with something to pay, or once
/// `harvest_interval` has passed since the previous payout. Otherwise the
/// pending reward is added to the carry. Whatever the reward balance cannot
/// cover also stays in the carry.
fn settle(env: &Env, pool: &PoolInfo, user: &Address, user_info: &mut UserInfo) -> EscrowResult {
    let pending = calculate_pending(env, user_info, pool.acc_reward_per_share)?;
    let now = env.ledger().timestamp();

    let harvestable = match user_info.last_harvest_time {
        None => true,
        Some(last) => now.safe_sub(last, env)? >= pool.harvest_interval,
    };

    if !harvestable {
        if pending > 0 {
            safe_increment!(env, user_info.reward_carry, pending);
            RewardDistributorEvents::reward_locked_up(env, user.clone(), pool.id, pending);
        }
        return Ok(());
    }

    let total = pending.safe_add(user_info.reward_carry, env)?;
    if total <= 0 {
        return Ok(());
    }

    let paid = pay_reward(env, user, total);
    user_info.reward_carry = total.safe_sub(paid, env)?;
    user_info.last_harvest_time = Some(now);

    if paid > 0 {
        RewardDistributorEvents::harvest(env, user.clone(), pool.id, paid);
    }
    if user_info.reward_carry > 0 {
        RewardDistributorEvents::reward_locked_up(
            env,
            user.clone(),
            pool.id,
            user_info.reward_carry
        );
    }

    Ok(())
}

fn notify_rewarders(env: &Env, pool: &PoolInfo, user: &Address, new_amount: i128) {
    for rewarder in pool.rewarders.iter() {
        ComplexRewarderClient::new(env, &rewarder).on_reward(&pool.id, user, &new_amount);
    }
}

/// Stakes `amount` of escrow that `user` just allocated through `es_token`.
pub fn set_allocation(env: &Env, es_token: &Address, user: &Address, amount: i128) -> EscrowResult {
    validate!(env, amount > 0, ErrorCode::InvalidAmount, "setAllocation: amount must be positive")?;

    let pool_id = pool_id_for_usage(env, es_token)?;
    let mut pool = update_pool(env, pool_id)?;
    let mut user_info = get_user_info(env, pool_id, user);

    settle(env, &pool, user, &mut user_info)?;

    safe_increment!(env, user_info.amount, amount);
    safe_increment!(env, pool.total_staked, amount);
    user_info.reward_debt = calculate_accumulated(env, user_info.amount, pool.acc_reward_per_share)?;

    save_pool(env, &pool);
    save_user_info(env, pool_id, user, &user_info);

    notify_rewarders(env, &pool, user, user_info.amount);

    RewardDistributorEvents::deposit(env, user.clone(), pool_id, amount);

    Ok(())
}

/// Unstakes `amount` of escrow that `user` just deallocated through
/// `es_token`. The emission rate is refreshed before the pool is updated, so
/// the interval since the pool's last update is settled at the new rate.
pub fn unset_allocation(
    env: &Env,
    es_token: &Address,
    user: &Address,
    amount: i128
) -> EscrowResult {
    validate!(env, amount > 0, ErrorCode::InvalidAmount, "unsetAllocation: amount must be positive")?;

    let pool_id = pool_id_for_usage(env, es_token)?;

    sync_emission_rate(env, es_token)?;

    let mut pool = update_pool(env, pool_id)?;
    let mut user_info = get_user_info(env, pool_id, user);
    validate!(
        env,
        amount <= user_info.amount,
        ErrorCode::InsufficientAllocation,
        "unsetAllocation: amount exceeds staked amount"
    )?;

    settle(env, &pool, user, &mut user_info)?;

    safe_decrement!(env, user_info.amount, amount);
    safe_decrement!(env, pool.total_staked, amount);
    user_info.reward_debt = calculate_accumulated(env, user_info.amount, pool.acc_reward_per_share)?;

    save_pool(env, &pool);
    save_user_info(env, pool_id, user, &user_info);

    notify_rewarders(env, &pool, user, user_info.amount);

    RewardDistributorEvents::withdraw(env, user.clone(), pool_id, amount);

    Ok(())
}

pub fn harvest(env: &Env, user: &Address, pool_id: u32) -> EscrowResult {
    let pool = update_pool(env, pool_id)?;
    let mut user_info = get_user_info(env, pool_id, user);

    settle(env, &pool, user, &mut user_info)?;
    user_info.reward_debt = calculate_accumulated(env, user_info.amount, pool.acc_reward_per_share)?;

    save_user_info(env, pool_id, user, &user_info);

    notify_rewarders(env, &pool, user, user_info.amount);

    Ok(())
}

/// What `harvest` would pay at the current time, ignoring the harvest
/// interval and the reward balance.
pub fn pending_reward(env: &Env, pool_id: u32, user: &Address) -> EscrowResult<i128> {
    let pool = get_pool(env, pool_id)?;
    let acc_reward_per_share = current_acc_reward_per_share(env, &pool)?;

    let user_info = get_user_info(env, pool_id, user);
    calculate_pending(env, &user_info, acc_reward_per_share)?.safe_add(
        user_info.reward_carry,
        env
    )
}
