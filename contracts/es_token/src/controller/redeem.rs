use escrowed::{
    error::{ ErrorCode, EscrowResult },
    math::safe_math::SafeMath,
    safe_decrement,
    safe_increment,
    validate,
};
use soroban_sdk::{ log, token, Address, Env };
use soroban_token_sdk::TokenUtils;

use crate::{
    balance::{ read_balance, receive_balance, spend_balance },
    events::EsTokenEvents,
    math::redeem::{ calculate_free_redeem_cap, calculate_underlying_by_duration, split_forfeited },
    storage::{
        get_es_balance,
        get_last_free_redeem,
        get_redeem_settings,
        get_user_redeem,
        get_user_redeems,
        remove_user_redeem,
        save_es_balance,
        save_last_free_redeem,
        save_user_redeems,
        utils::{ get_dividends_address, get_total_supply, get_underlying, save_total_supply },
        RedeemRequest,
        RedeemSettings,
    },
};

/// Starts a redemption of `es_amount` spendable escrow.
///
/// A zero `duration` is a free redemption: capped, rate limited by the
/// cooldown and settled immediately at 100%. Any other duration must lie in
/// the configured window and opens a pending request priced by the curve.
pub fn redeem(env: &Env, user: &Address, es_amount: i128, duration: u64) -> EscrowResult {
    validate!(env, es_amount > 0, ErrorCode::InvalidAmount, "redeem: amount must be positive")?;

    let balance = read_balance(env, user);
    validate!(
        env,
        es_amount <= balance,
        ErrorCode::InsufficientBalance,
        "redeem: amount exceeds spendable balance"
    )?;

    let settings = get_redeem_settings(env);

    if duration == 0 {
        return free_redeem(env, user, es_amount, balance, &settings);
    }

    validate!(
        env,
        duration >= settings.min_redeem_duration && duration <= settings.max_redeem_duration,
        ErrorCode::InvalidDuration,
        "redeem: duration outside of the redeem window"
    )?;

    let underlying_amount = calculate_underlying_by_duration(env, &settings, es_amount, duration)?;

    spend_balance(env, user, es_amount)?;

    let mut es_balance = get_es_balance(env, user);
    safe_increment!(env, es_balance.redeeming_amount, es_amount);
    save_es_balance(env, user, &es_balance);

    let now = env.ledger().timestamp();
    let mut redeems = get_user_redeems(env, user);
    redeems.push_back(RedeemRequest {
        es_amount,
        underlying_amount,
        end_time: now.safe_add(duration, env)?,
        duration,
    });
    save_user_redeems(env, user, &redeems);

    EsTokenEvents::redeem(env, user.clone(), es_amount, underlying_amount, duration);

    Ok(())
}

fn free_redeem(
    env: &Env,
    user: &Address,
    es_amount: i128,
    balance: i128,
    settings: &RedeemSettings
) -> EscrowResult {
    let cap = calculate_free_redeem_cap(env, settings, balance)?;
    validate!(
        env,
        es_amount <= cap,
        ErrorCode::FreeRedeemCapExceeded,
        "redeem: amount exceeds free redeem cap"
    )?;

    let now = env.ledger().timestamp();
    if let Some(last_free_redeem) = get_last_free_redeem(env, user) {
        validate!(
            env,
            now >= last_free_redeem.safe_add(settings.free_redeem_cooldown, env)?,
            ErrorCode::FreeRedeemCooldown,
            "redeem: free redeem cooldown not elapsed"
        )?;
    }

    spend_balance(env, user, es_amount)?;
    save_total_supply(env, get_total_supply(env).safe_sub(es_amount, env)?);
    save_last_free_redeem(env, user, now);

    token::Client::new(env, &get_underlying(env)).transfer(
        &env.current_contract_address(),
        user,
        &es_amount
    );

    TokenUtils::new(env).events().burn(user.clone(), es_amount);
    EsTokenEvents::finalize_redeem(env, user.clone(), es_amount, es_amount);

    Ok(())
}

/// Settles the request at `index` once it has matured and before its grace
/// period runs out.
pub fn finalize_redeem(env: &Env, user: &Address, index: u32) -> EscrowResult {
    let mut redeems = get_user_redeems(env, user);
    let request = get_user_redeem(env, &redeems, index)?;
    let settings = get_redeem_settings(env);

    let now = env.ledger().timestamp();
    validate!(
        env,
        now >= request.end_time,
        ErrorCode::RedeemNotReady,
        "finalizeRedeem: vesting duration has not ended yet"
    )?;
    validate!(
        env,
        now <= request.end_time.safe_add(settings.redemption_grace_period, env)?,
        ErrorCode::GracePeriodExpired,
        "finalizeRedeem: grace period expired"
    )?;

    let mut es_balance = get_es_balance(env, user);
    safe_decrement!(env, es_balance.redeeming_amount, request.es_amount);
    save_es_balance(env, user, &es_balance);

    save_total_supply(env, get_total_supply(env).safe_sub(request.es_amount, env)?);

    remove_user_redeem(&mut redeems, index);
    save_user_redeems(env, user, &redeems);

    let (dividends, burned) = split_forfeited(
        env,
        &settings,
        request.es_amount,
        request.underlying_amount
    )?;

    let underlying = token::Client::new(env, &get_underlying(env));
    let custody = env.current_contract_address();

    if request.underlying_amount > 0 {
        underlying.transfer(&custody, user, &request.underlying_amount);
    }
    if dividends > 0 {
        underlying.transfer(&custody, &get_dividends_address(env), &dividends);
    }
    if burned > 0 {
        log!(env, "finalizeRedeem: burning forfeited underlying", burned);
        underlying.burn(&custody, &burned);
    }

    TokenUtils::new(env).events().burn(user.clone(), request.es_amount);
    EsTokenEvents::finalize_redeem(env, user.clone(), request.es_amount, request.underlying_amount);

    Ok(())
}

/// Drops the request at `index` and returns its escrow to the spendable
/// balance.
pub fn cancel_redeem(env: &Env, user: &Address, index: u32) -> EscrowResult {
    let mut redeems = get_user_redeems(env, user);
    let request = get_user_redeem(env, &redeems, index)?;

    let mut es_balance = get_es_balance(env, user);
    safe_decrement!(env, es_balance.redeeming_amount, request.es_amount);
    save_es_balance(env, user, &es_balance);

    receive_balance(env, user, request.es_amount)?;

    remove_user_redeem(&mut redeems, index);
    save_user_redeems(env, user, &redeems);

    EsTokenEvents::cancel_redeem(env, user.clone(), index, request.es_amount);

    Ok(())
}
