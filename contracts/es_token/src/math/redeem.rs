use escrowed::{
    constants::BPS_DENOMINATOR,
    error::EscrowResult,
    math::{ casting::Cast, safe_math::{ SafeMath, SafeMulDiv } },
};
use soroban_sdk::Env;

use crate::storage::RedeemSettings;

/// Payout ratio in bps for a vesting `duration`.
///
/// Linear between `min_redeem_ratio` at `min_redeem_duration` and
/// `max_redeem_ratio` at `max_redeem_duration`, truncated. Durations at or
/// past the maximum get the maximum ratio.
pub fn calculate_redeem_ratio(env: &Env, settings: &RedeemSettings, duration: u64) -> EscrowResult<i128> {
    let min_ratio: i128 = settings.min_redeem_ratio.cast(env)?;
    let max_ratio: i128 = settings.max_redeem_ratio.cast(env)?;

    if duration >= settings.max_redeem_duration {
        return Ok(max_ratio);
    }
    if duration <= settings.min_redeem_duration {
        return Ok(min_ratio);
    }

    let elapsed: i128 = duration.safe_sub(settings.min_redeem_duration, env)?.cast(env)?;
    let span: i128 = settings.max_redeem_duration
        .safe_sub(settings.min_redeem_duration, env)?
        .cast(env)?;

    max_ratio
        .safe_sub(min_ratio, env)?
        .safe_mul_div_floor(elapsed, span, env)?
        .safe_add(min_ratio, env)
}

/// Underlying released for `es_amount` vested over `duration`.
pub fn calculate_underlying_by_duration(
    env: &Env,
    settings: &RedeemSettings,
    es_amount: i128,
    duration: u64
) -> EscrowResult<i128> {
    let ratio = calculate_redeem_ratio(env, settings, duration)?;
    es_amount.safe_mul_div_floor(ratio, BPS_DENOMINATOR, env)
}

/// Largest amount a holder with `balance` spendable escrow can redeem for free.
pub fn calculate_free_redeem_cap(
    env: &Env,
    settings: &RedeemSettings,
    balance: i128
) -> EscrowResult<i128> {
    balance
        .safe_mul_div_floor(settings.free_redeem_percentage.cast(env)?, BPS_DENOMINATOR, env)?
        .safe_add(settings.min_free_redeem, env)
}

/// Splits the escrow forfeited by a finalized request into the part sent to
/// the dividends address and the part removed from supply.
pub fn split_forfeited(
    env: &Env,
    settings: &RedeemSettings,
    es_amount: i128,
    underlying_amount: i128
) -> EscrowResult<(i128, i128)> {
    let forfeited = es_amount.safe_sub(underlying_amount, env)?;
    let dividends = forfeited.safe_mul_div_floor(
        settings.redeem_dividends_adjustment.cast(env)?,
        BPS_DENOMINATOR,
        env
    )?;
    let burned = forfeited.safe_sub(dividends, env)?;

    Ok((dividends, burned))
}
