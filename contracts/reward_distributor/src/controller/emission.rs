use escrowed::{ error::EscrowResult, interfaces::GlobalDistributorClient };
use soroban_sdk::{ Address, Env };

use crate::{
    controller::pool::mass_update_pools,
    events::RewardDistributorEvents,
    math::reward::calculate_token_per_sec,
    storage::{ get_config, get_token_per_sec, save_token_per_sec },
};

/// Reads this distributor's share of the global rate.
pub fn fetch_token_per_sec(env: &Env) -> EscrowResult<i128> {
    let config = get_config(env);
    let global = GlobalDistributorClient::new(env, &config.global_distributor);

    let total_alloc_point = global.query_total_alloc_point();
    let alloc_point = global.query_alloc_point(&env.current_contract_address());
    let global_token_per_sec = global.query_token_per_sec();

    calculate_token_per_sec(env, global_token_per_sec, alloc_point, total_alloc_point)
}

/// Switches to the rate the global distributor implies now. Pools that were
/// not updated beforehand accrue their stale interval at the new rate.
pub fn sync_emission_rate(env: &Env, caller: &Address) -> EscrowResult<i128> {
    let previous = get_token_per_sec(env);
    let token_per_sec = fetch_token_per_sec(env)?;
    save_token_per_sec(env, token_per_sec);

    RewardDistributorEvents::emission_rate_updated(env, caller.clone(), previous, token_per_sec);

    Ok(token_per_sec)
}

/// Closes every pool's accrual at the old rate, then switches to the rate the
/// global distributor implies now.
pub fn update_emission_rate(env: &Env, caller: &Address) -> EscrowResult<i128> {
    mass_update_pools(env)?;
    sync_emission_rate(env, caller)
}
