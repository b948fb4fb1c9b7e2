use escrowed::{ error::ErrorCode, guard::non_reentrant, interfaces::EsTokenUsageTrait };
use soroban_sdk::{ contract, contractimpl, contractmeta, log, panic_with_error, Address, Bytes, Env, Vec };

use crate::{
    controller,
    distributor::RewardDistributorTrait,
    events::RewardDistributorEvents,
    storage::{
        get_config,
        get_pool,
        get_pool_length,
        get_token_per_sec,
        get_total_alloc_point,
        get_user_info,
        save_config,
        save_token_per_sec,
        utils::{ extend_instance_ttl, is_admin, is_initialized, set_initialized },
        Config,
        PoolInfo,
        UserInfo,
    },
};

contractmeta!(
    key = "Description",
    val = "Distributes a share of the global emission to escrow allocated by holders"
);

#[contract]
pub struct RewardDistributor;

#[contractimpl]
impl RewardDistributorTrait for RewardDistributor {
    // ################################################################
    //                             ADMIN
    // ################################################################

    fn initialize(env: Env, admin: Address, reward_token: Address, global_distributor: Address) {
        if is_initialized(&env) {
            log!(&env, "Reward Distributor: Initialize: initializing contract twice is not allowed");
            panic_with_error!(&env, ErrorCode::AlreadyInitialized);
        }

        set_initialized(&env);

        save_config(&env, &Config {
            admin: admin.clone(),
            reward_token: reward_token.clone(),
            global_distributor: global_distributor.clone(),
        });

        match controller::emission::fetch_token_per_sec(&env) {
            Ok(token_per_sec) => save_token_per_sec(&env, token_per_sec),
            Err(error) => panic_with_error!(&env, error),
        }

        RewardDistributorEvents::initialize(&env, admin, reward_token, global_distributor);
    }

    fn add_pool(
        env: Env,
        sender: Address,
        alloc_point: u64,
        staked_asset: Address,
        harvest_interval: u64,
        rewarders: Vec<Address>
    ) -> Result<u32, ErrorCode> {
        sender.require_auth();
        is_admin(&env, &sender)?;
        extend_instance_ttl(&env);

        controller::pool::add_pool(&env, alloc_point, &staked_asset, harvest_interval, rewarders)
    }

    fn set_pool(
        env: Env,
        sender: Address,
        pool_id: u32,
        alloc_point: u64,
        harvest_interval: u64,
        rewarders: Vec<Address>
    ) -> Result<(), ErrorCode> {
        sender.require_auth();
        is_admin(&env, &sender)?;
        extend_instance_ttl(&env);

        controller::pool::set_pool(&env, pool_id, alloc_point, harvest_interval, rewarders)
    }

    fn update_emission_rate(env: Env, sender: Address) -> Result<i128, ErrorCode> {
        sender.require_auth();
        is_admin(&env, &sender)?;
        extend_instance_ttl(&env);

        controller::emission::update_emission_rate(&env, &sender)
    }

    // ################################################################
    //                             USER
    // ################################################################

    fn update_pool(env: Env, pool_id: u32) -> Result<(), ErrorCode> {
        extend_instance_ttl(&env);

        controller::pool::update_pool(&env, pool_id)?;
        Ok(())
    }

    fn mass_update_pools(env: Env) -> Result<(), ErrorCode> {
        extend_instance_ttl(&env);

        controller::pool::mass_update_pools(&env)
    }

    fn harvest(env: Env, user: Address, pool_id: u32) -> Result<(), ErrorCode> {
        user.require_auth();
        extend_instance_ttl(&env);

        non_reentrant(&env, || controller::position::harvest(&env, &user, pool_id))
    }

    // ################################################################
    //                             QUERIES
    // ################################################################

    fn query_config(env: Env) -> Config {
        get_config(&env)
    }

    fn query_pool(env: Env, pool_id: u32) -> Result<PoolInfo, ErrorCode> {
        get_pool(&env, pool_id)
    }

    fn query_pool_length(env: Env) -> u32 {
        get_pool_length(&env)
    }

    fn query_user_info(env: Env, pool_id: u32, user: Address) -> UserInfo {
        get_user_info(&env, pool_id, &user)
    }

    fn query_pending_reward(env: Env, pool_id: u32, user: Address) -> Result<i128, ErrorCode> {
        controller::position::pending_reward(&env, pool_id, &user)
    }

    fn query_token_per_sec(env: Env) -> i128 {
        get_token_per_sec(&env)
    }

    fn query_total_alloc_point(env: Env) -> u64 {
        get_total_alloc_point(&env)
    }
}

#[contractimpl]
impl EsTokenUsageTrait for RewardDistributor {
    fn set_allocation(
        env: Env,
        es_token: Address,
        user: Address,
        amount: i128,
        _data: Bytes
    ) -> Result<(), ErrorCode> {
        es_token.require_auth();
        extend_instance_ttl(&env);

        non_reentrant(&env, || controller::position::set_allocation(&env, &es_token, &user, amount))
    }

    fn unset_allocation(
        env: Env,
        es_token: Address,
        user: Address,
        amount: i128,
        _data: Bytes
    ) -> Result<(), ErrorCode> {
        es_token.require_auth();
        extend_instance_ttl(&env);

        non_reentrant(&env, || {
            controller::position::unset_allocation(&env, &es_token, &user, amount)
        })
    }
}
