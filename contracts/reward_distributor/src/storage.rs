use escrowed::{
    constants::{
        INSTANCE_BUMP_AMOUNT,
        INSTANCE_LIFETIME_THRESHOLD,
        PERSISTENT_BUMP_AMOUNT,
        PERSISTENT_LIFETIME_THRESHOLD,
    },
    error::{ ErrorCode, EscrowResult },
};
use soroban_sdk::{ contracttype, log, panic_with_error, Address, Env, Vec };

#[derive(Clone)]
#[contracttype]
pub struct UserDataKey {
    pub pool_id: u32,
    pub user: Address,
}

#[derive(Clone)]
#[contracttype]
pub enum DataKey {
    Config,
    Initialized,
    TokenPerSec,
    TotalAllocPoint,
    PoolLength,
    Pool(u32),
    PoolByAsset(Address),
    User(UserDataKey),
}

// ################################################################
//                             Config
// ################################################################

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    pub admin: Address,
    /// Token paid out on harvest
    pub reward_token: Address,
    /// Parent allocator the emission rate is derived from
    pub global_distributor: Address,
}

pub fn save_config(env: &Env, config: &Config) {
    env.storage().instance().set(&DataKey::Config, config);
}

pub fn get_config(env: &Env) -> Config {
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .unwrap_or_else(|| {
            log!(env, "Reward Distributor: Config not set");
            panic_with_error!(env, ErrorCode::NotInitialized)
        })
}

pub fn get_token_per_sec(env: &Env) -> i128 {
    env.storage().instance().get(&DataKey::TokenPerSec).unwrap_or(0)
}

pub fn save_token_per_sec(env: &Env, token_per_sec: i128) {
    env.storage().instance().set(&DataKey::TokenPerSec, &token_per_sec);
}

pub fn get_total_alloc_point(env: &Env) -> u64 {
    env.storage().instance().get(&DataKey::TotalAllocPoint).unwrap_or(0)
}

pub fn save_total_alloc_point(env: &Env, total_alloc_point: u64) {
    env.storage().instance().set(&DataKey::TotalAllocPoint, &total_alloc_point);
}

// ################################################################
//                             Pools
// ################################################################

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolInfo {
    pub id: u32,
    /// Escrow token whose allocations are staked in this pool
    pub staked_asset: Address,
    pub total_staked: i128,
    /// Reward per staked unit, scaled by `ACC_REWARD_PRECISION`
    pub acc_reward_per_share: i128,
    pub last_reward_time: u64,
    pub alloc_point: u64,
    /// Minimum time between two payouts to the same user
    pub harvest_interval: u64,
    pub rewarders: Vec<Address>,
}

pub fn get_pool_length(env: &Env) -> u32 {
    env.storage().instance().get(&DataKey::PoolLength).unwrap_or(0)
}

fn save_pool_length(env: &Env, length: u32) {
    env.storage().instance().set(&DataKey::PoolLength, &length);
}

pub fn get_pool(env: &Env, pool_id: u32) -> EscrowResult<PoolInfo> {
    let key = DataKey::Pool(pool_id);
    match env.storage().persistent().get::<_, PoolInfo>(&key) {
        Some(pool) => {
            env.storage()
                .persistent()
                .extend_ttl(&key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
            Ok(pool)
        }
        None => {
            log!(env, "Reward Distributor: pool not found", pool_id);
            Err(ErrorCode::PoolNotFound)
        }
    }
}

pub fn save_pool(env: &Env, pool: &PoolInfo) {
    let key = DataKey::Pool(pool.id);
    env.storage().persistent().set(&key, pool);
    env.storage()
        .persistent()
        .extend_ttl(&key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

/// Stores a new pool under the next id and indexes it by staked asset.
pub fn push_pool(env: &Env, pool: &PoolInfo) {
    save_pool(env, pool);
    save_pool_length(env, pool.id + 1);

    let key = DataKey::PoolByAsset(pool.staked_asset.clone());
    env.storage().persistent().set(&key, &pool.id);
    env.storage()
        .persistent()
        .extend_ttl(&key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

pub fn get_pool_id_by_asset(env: &Env, staked_asset: &Address) -> Option<u32> {
    let key = DataKey::PoolByAsset(staked_asset.clone());
    let pool_id = env.storage().persistent().get::<_, u32>(&key);
    if pool_id.is_some() {
        env.storage()
            .persistent()
            .extend_ttl(&key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
    }
    pool_id
}

// ################################################################
//                             Users
// ################################################################

#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct UserInfo {
    /// Escrow the user has allocated to the pool
    pub amount: i128,
    pub reward_debt: i128,
    /// Unset until the first payout
    pub last_harvest_time: Option<u64>,
    /// Reward earned but not paid out yet
    pub reward_carry: i128,
}

pub fn get_user_info(env: &Env, pool_id: u32, user: &Address) -> UserInfo {
    let key = DataKey::User(UserDataKey {
        pool_id,
        user: user.clone(),
    });
    match env.storage().persistent().get::<_, UserInfo>(&key) {
        Some(info) => {
            env.storage()
                .persistent()
                .extend_ttl(&key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
            info
        }
        None => UserInfo::default(),
    }
}

pub fn save_user_info(env: &Env, pool_id: u32, user: &Address, info: &UserInfo) {
    let key = DataKey::User(UserDataKey {
        pool_id,
        user: user.clone(),
    });
    env.storage().persistent().set(&key, info);
    env.storage()
        .persistent()
        .extend_ttl(&key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

// ################################################################
//                             Utils
// ################################################################

pub mod utils {
    use escrowed::validate;

    use super::*;

    pub fn is_initialized(env: &Env) -> bool {
        env.storage().instance().get(&DataKey::Initialized).unwrap_or(false)
    }

    pub fn set_initialized(env: &Env) {
        env.storage().instance().set(&DataKey::Initialized, &true);
        extend_instance_ttl(env);
    }

    pub fn extend_instance_ttl(env: &Env) {
        env.storage().instance().extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
    }

    pub fn is_admin(env: &Env, sender: &Address) -> EscrowResult {
        validate!(
            env,
            get_config(env).admin == *sender,
            ErrorCode::NotAuthorized,
            "Reward Distributor: You are not authorized!"
        )
    }
}
