use escrowed::{
    error::{ ErrorCode, EscrowResult },
    interfaces::EsTokenUsageClient,
    safe_decrement,
    safe_increment,
    validate,
};
use soroban_sdk::{ Address, Bytes, Env };

use crate::{
    balance::{ read_balance, receive_balance, spend_balance },
    events::EsTokenEvents,
    storage::{ get_es_balance, get_usage_approval, save_es_balance, save_usage_approval },
};

pub fn approve_usage(env: &Env, user: &Address, usage: &Address, amount: i128) -> EscrowResult {
    validate!(env, amount >= 0, ErrorCode::InvalidAmount, "approveUsage: negative amount")?;

    let mut approval = get_usage_approval(env, user, usage);
    approval.approved = amount;
    save_usage_approval(env, user, usage, &approval);

    EsTokenEvents::approve_usage(env, user.clone(), usage.clone(), amount);

    Ok(())
}

/// Moves `amount` spendable escrow into an allocation to `usage` and notifies
/// it through its `set_allocation` hook.
pub fn allocate(
    env: &Env,
    user: &Address,
    usage: &Address,
    amount: i128,
    data: &Bytes
) -> EscrowResult {
    validate!(env, amount > 0, ErrorCode::InvalidAmount, "allocate: amount must be positive")?;

    let mut approval = get_usage_approval(env, user, usage);
    validate!(
        env,
        amount <= approval.headroom(),
        ErrorCode::InsufficientApproval,
        "allocate: non authorized amount"
    )?;
    validate!(
        env,
        amount <= read_balance(env, user),
        ErrorCode::InsufficientBalance,
        "allocate: amount exceeds spendable balance"
    )?;

    spend_balance(env, user, amount)?;

    safe_increment!(env, approval.allocated, amount);
    save_usage_approval(env, user, usage, &approval);

    let mut es_balance = get_es_balance(env, user);
    safe_increment!(env, es_balance.allocated_amount, amount);
    save_es_balance(env, user, &es_balance);

    EsTokenUsageClient::new(env, usage).set_allocation(
        &env.current_contract_address(),
        user,
        &amount,
        data
    );

    EsTokenEvents::allocate(env, user.clone(), usage.clone(), amount);

    Ok(())
}

/// Returns `amount` allocated to `usage` to the spendable balance and notifies
/// it through its `unset_allocation` hook.
pub fn deallocate(
    env: &Env,
    user: &Address,
    usage: &Address,
    amount: i128,
    data: &Bytes
) -> EscrowResult {
    validate!(env, amount > 0, ErrorCode::InvalidAmount, "deallocate: amount must be positive")?;

    let mut approval = get_usage_approval(env, user, usage);
    validate!(
        env,
        amount <= approval.allocated,
        ErrorCode::InsufficientAllocation,
        "deallocate: non authorized amount"
    )?;

    safe_decrement!(env, approval.allocated, amount);
    save_usage_approval(env, user, usage, &approval);

    let mut es_balance = get_es_balance(env, user);
    safe_decrement!(env, es_balance.allocated_amount, amount);
    save_es_balance(env, user, &es_balance);

    receive_balance(env, user, amount)?;

    EsTokenUsageClient::new(env, usage).unset_allocation(
        &env.current_contract_address(),
        user,
        &amount,
        data
    );

    EsTokenEvents::deallocate(env, user.clone(), usage.clone(), amount);

    Ok(())
}
