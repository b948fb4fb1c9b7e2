use soroban_sdk::{ contractclient, Address, Bytes, Env };

use crate::error::ErrorCode;

/// Capability a contract exposes to receive escrow allocations.
///
/// `es_token` is the calling escrow token; implementations must call
/// `es_token.require_auth()` so only the token itself can move allocations.
#[contractclient(name = "EsTokenUsageClient")]
pub trait EsTokenUsageTrait {
    fn set_allocation(
        env: Env,
        es_token: Address,
        user: Address,
        amount: i128,
        data: Bytes
    ) -> Result<(), ErrorCode>;

    fn unset_allocation(
        env: Env,
        es_token: Address,
        user: Address,
        amount: i128,
        data: Bytes
    ) -> Result<(), ErrorCode>;
}

/// Read side of the top-level allocator that splits the global emission
/// between sub-distributors.
#[contractclient(name = "GlobalDistributorClient")]
pub trait GlobalDistributorTrait {
    fn query_total_alloc_point(env: Env) -> u128;

    fn query_alloc_point(env: Env, sub_distributor: Address) -> u128;

    fn query_token_per_sec(env: Env) -> i128;
}

/// Extra reward hook notified whenever a staked position changes.
#[contractclient(name = "ComplexRewarderClient")]
pub trait ComplexRewarderTrait {
    fn on_reward(env: Env, pool_id: u32, user: Address, new_amount: i128);
}
