use escrowed::error::ErrorCode;
use soroban_sdk::{ Address, Env, Vec };

use crate::storage::{ Config, PoolInfo, UserInfo };

pub trait RewardDistributorTrait {
    // ################################################################
    //                             ADMIN
    // ################################################################

    fn initialize(env: Env, admin: Address, reward_token: Address, global_distributor: Address);

    fn add_pool(
        env: Env,
        sender: Address,
        alloc_point: u64,
        staked_asset: Address,
        harvest_interval: u64,
        rewarders: Vec<Address>
    ) -> Result<u32, ErrorCode>;

    fn set_pool(
        env: Env,
        sender: Address,
        pool_id: u32,
        alloc_point: u64,
        harvest_interval: u64,
        rewarders: Vec<Address>
    ) -> Result<(), ErrorCode>;

    /// Re-derives the rate from the global distributor after closing
    /// accrual at the old one.
    fn update_emission_rate(env: Env, sender: Address) -> Result<i128, ErrorCode>;

    // ################################################################
    //                             USER
    // ################################################################

    fn update_pool(env: Env, pool_id: u32) -> Result<(), ErrorCode>;

    fn mass_update_pools(env: Env) -> Result<(), ErrorCode>;

    fn harvest(env: Env, user: Address, pool_id: u32) -> Result<(), ErrorCode>;

    // ################################################################
    //                             QUERIES
    // ################################################################

    fn query_config(env: Env) -> Config;

    fn query_pool(env: Env, pool_id: u32) -> Result<PoolInfo, ErrorCode>;

    fn query_pool_length(env: Env) -> u32;

    fn query_user_info(env: Env, pool_id: u32, user: Address) -> UserInfo;

    fn query_pending_reward(env: Env, pool_id: u32, user: Address) -> Result<i128, ErrorCode>;

    fn query_token_per_sec(env: Env) -> i128;

    fn query_total_alloc_point(env: Env) -> u64;
}
