use soroban_sdk::{ log, symbol_short, Env, Symbol };

use crate::error::{ ErrorCode, EscrowResult };

const LOCKED: Symbol = symbol_short!("LOCKED");

/// Runs `f` while holding the contract-wide reentrancy flag.
///
/// The flag lives in instance storage and is cleared once `f` returns. When `f`
/// fails the host rolls the whole invocation back, flag included.
pub fn non_reentrant<T, F>(env: &Env, f: F) -> EscrowResult<T> where F: FnOnce() -> EscrowResult<T> {
    if env.storage().instance().get::<_, bool>(&LOCKED).unwrap_or(false) {
        log!(env, "Reentrant call rejected");
        return Err(ErrorCode::Reentrancy);
    }

    env.storage().instance().set(&LOCKED, &true);
    let result = f();
    env.storage().instance().remove(&LOCKED);

    result
}
