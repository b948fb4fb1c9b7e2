use soroban_sdk::{ Address, Env, Symbol };

pub struct RewardDistributorEvents {}

impl RewardDistributorEvents {
    /// - topics - `["initialize", admin: Address]`
    /// - data - `[reward_token: Address, global_distributor: Address]`
    pub fn initialize(
        env: &Env,
        admin: Address,
        reward_token: Address,
        global_distributor: Address
    ) {
        let topics = (Symbol::new(env, "initialize"), admin);
        env.events().publish(topics, (reward_token, global_distributor));
    }

    // Pool Events

    /// Emitted when a pool is registered for an escrow token
    ///
    /// - topics - `["add_pool", pool_id: u32]`
    /// - data - `[staked_asset: Address, alloc_point: u64, harvest_interval: u64]`
    pub fn add_pool(
        env: &Env,
        pool_id: u32,
        staked_asset: Address,
        alloc_point: u64,
        harvest_interval: u64
    ) {
        let topics = (Symbol::new(env, "add_pool"), pool_id);
        env.events().publish(topics, (staked_asset, alloc_point, harvest_interval));
    }

    /// - topics - `["set_pool", pool_id: u32]`
    /// - data - `[alloc_point: u64, harvest_interval: u64]`
    pub fn set_pool(env: &Env, pool_id: u32, alloc_point: u64, harvest_interval: u64) {
        let topics = (Symbol::new(env, "set_pool"), pool_id);
        env.events().publish(topics, (alloc_point, harvest_interval));
    }

    /// - topics - `["update_pool", pool_id: u32]`
    /// - data - `[last_reward_time: u64, total_staked: i128, acc_reward_per_share: i128]`
    pub fn update_pool(
        env: &Env,
        pool_id: u32,
        last_reward_time: u64,
        total_staked: i128,
        acc_reward_per_share: i128
    ) {
        let topics = (Symbol::new(env, "update_pool"), pool_id);
        env.events().publish(topics, (last_reward_time, total_staked, acc_reward_per_share));
    }

    // User Events

    /// - topics - `["deposit", user: Address, pool_id: u32]`
    /// - data - `amount: i128`
    pub fn deposit(env: &Env, user: Address, pool_id: u32, amount: i128) {
        let topics = (Symbol::new(env, "deposit"), user, pool_id);
        env.events().publish(topics, amount);
    }

    /// - topics - `["withdraw", user: Address, pool_id: u32]`
    /// - data - `amount: i128`
    pub fn withdraw(env: &Env, user: Address, pool_id: u32, amount: i128) {
        let topics = (Symbol::new(env, "withdraw"), user, pool_id);
        env.events().publish(topics, amount);
    }

    /// Emitted when reward is paid out to a user
    ///
    /// - topics - `["harvest", user: Address, pool_id: u32]`
    /// - data - `amount: i128`
    pub fn harvest(env: &Env, user: Address, pool_id: u32, amount: i128) {
        let topics = (Symbol::new(env, "harvest"), user, pool_id);
        env.events().publish(topics, amount);
    }

    /// Emitted when pending reward is held back by the harvest interval or by
    /// a short reward balance
    ///
    /// - topics - `["reward_locked_up", user: Address, pool_id: u32]`
    /// - data - `amount: i128`
    pub fn reward_locked_up(env: &Env, user: Address, pool_id: u32, amount: i128) {
        let topics = (Symbol::new(env, "reward_locked_up"), user, pool_id);
        env.events().publish(topics, amount);
    }

    /// - topics - `["emission_rate_updated", caller: Address]`
    /// - data - `[previous: i128, token_per_sec: i128]`
    pub fn emission_rate_updated(env: &Env, caller: Address, previous: i128, token_per_sec: i128) {
        let topics = (Symbol::new(env, "emission_rate_updated"), caller);
        env.events().publish(topics, (previous, token_per_sec));
    }
}
