use escrowed::{
    constants::{ BALANCE_BUMP_AMOUNT, BALANCE_LIFETIME_THRESHOLD },
    error::{ ErrorCode, EscrowResult },
    math::safe_math::SafeMath,
    validate,
};
use soroban_sdk::{ Address, Env };

use crate::storage::DataKey;

/// Spendable escrow of `addr`. Escrow locked in redeems or allocations is
/// tracked separately in `EsBalance`.
pub fn read_balance(env: &Env, addr: &Address) -> i128 {
    let key = DataKey::Balance(addr.clone());
    if let Some(balance) = env.storage().persistent().get::<DataKey, i128>(&key) {
        env.storage().persistent().extend_ttl(&key, BALANCE_LIFETIME_THRESHOLD, BALANCE_BUMP_AMOUNT);
        balance
    } else {
        0
    }
}

fn write_balance(env: &Env, addr: &Address, amount: i128) {
    let key = DataKey::Balance(addr.clone());
    env.storage().persistent().set(&key, &amount);
    env.storage().persistent().extend_ttl(&key, BALANCE_LIFETIME_THRESHOLD, BALANCE_BUMP_AMOUNT);
}

pub fn receive_balance(env: &Env, addr: &Address, amount: i128) -> EscrowResult {
    let balance = read_balance(env, addr);
    let new_balance = balance.safe_add(amount, env)?;
    write_balance(env, addr, new_balance);
    Ok(())
}

pub fn spend_balance(env: &Env, addr: &Address, amount: i128) -> EscrowResult {
    let balance = read_balance(env, addr);
    validate!(env, balance >= amount, ErrorCode::InsufficientBalance, "insufficient balance")?;
    write_balance(env, addr, balance - amount);
    Ok(())
}

#[cfg(test)]
mod test {
    use escrowed::error::ErrorCode;
    use pretty_assertions::assert_eq;
    use soroban_sdk::{ testutils::Address as _, Address, Env };

    use super::{ read_balance, receive_balance, spend_balance };
    use crate::contract::EsToken;

    #[test]
    fn receive_balance_rejects_overflow() {
        let env = Env::default();
        let contract_id = env.register(EsToken, ());
        let holder = Address::generate(&env);

        env.as_contract(&contract_id, || {
            receive_balance(&env, &holder, i128::MAX).unwrap();
            assert_eq!(receive_balance(&env, &holder, 1), Err(ErrorCode::MathError));
            assert_eq!(read_balance(&env, &holder), i128::MAX);
        });
    }

    #[test]
    fn spend_balance_rejects_overdraft() {
        let env = Env::default();
        let contract_id = env.register(EsToken, ());
        let holder = Address::generate(&env);

        env.as_contract(&contract_id, || {
            receive_balance(&env, &holder, 100).unwrap();
            assert_eq!(spend_balance(&env, &holder, 101), Err(ErrorCode::InsufficientBalance));
            spend_balance(&env, &holder, 100).unwrap();
            assert_eq!(read_balance(&env, &holder), 0);
        });
    }
}
