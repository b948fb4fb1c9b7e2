use escrowed::{ error::{ ErrorCode, EscrowResult }, math::safe_math::SafeMath, validate };
use soroban_sdk::{ token, Address, Env };
use soroban_token_sdk::TokenUtils;

use crate::{
    balance::receive_balance,
    events::EsTokenEvents,
    storage::utils::{ get_total_supply, get_underlying, save_total_supply },
};

/// Takes `amount` underlying from `from` into custody and mints the same
/// amount of escrow to `to`.
pub fn convert(env: &Env, from: &Address, amount: i128, to: &Address) -> EscrowResult {
    validate!(env, amount > 0, ErrorCode::InvalidAmount, "convert: amount must be positive")?;

    let underlying = token::Client::new(env, &get_underlying(env));
    validate!(
        env,
        underlying.balance(from) >= amount,
        ErrorCode::InsufficientBalance,
        "convert: insufficient underlying balance"
    )?;

    underlying.transfer(from, &env.current_contract_address(), &amount);

    receive_balance(env, to, amount)?;
    save_total_supply(env, get_total_supply(env).safe_add(amount, env)?);

    TokenUtils::new(env).events().mint(env.current_contract_address(), to.clone(), amount);
    EsTokenEvents::convert(env, from.clone(), to.clone(), amount);

    Ok(())
}
