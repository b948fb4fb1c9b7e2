use escrowed::interfaces::{ ComplexRewarderTrait, GlobalDistributorTrait };
use escrowed_es_token::{ EsToken, EsTokenClient };
use soroban_sdk::{
    contract,
    contractimpl,
    contracttype,
    testutils::{ Address as _, Ledger },
    token,
    vec,
    Address,
    Bytes,
    Env,
    String,
};

use crate::contract::{ RewardDistributor, RewardDistributorClient };

pub const START_TIME: u64 = 1_700_000_000;
pub const GLOBAL_TOKEN_PER_SEC: i128 = 1_000;
pub const OWN_ALLOC_POINT: u128 = 70;
pub const GLOBAL_ALLOC_POINT: u128 = 100;
pub const REWARD_RESERVE: i128 = 1_000_000_000_000;

// ################################################################
//                     Mock global distributor
// ################################################################

#[contracttype]
pub enum GlobalDataKey {
    TotalAllocPoint,
    AllocPoint(Address),
    TokenPerSec,
}

#[contract]
pub struct MockGlobalDistributor;

#[contractimpl]
impl GlobalDistributorTrait for MockGlobalDistributor {
    fn query_total_alloc_point(env: Env) -> u128 {
        env.storage().instance().get(&GlobalDataKey::TotalAllocPoint).unwrap_or(0)
    }

    fn query_alloc_point(env: Env, sub_distributor: Address) -> u128 {
        env.storage().instance().get(&GlobalDataKey::AllocPoint(sub_distributor)).unwrap_or(0)
    }

    fn query_token_per_sec(env: Env) -> i128 {
        env.storage().instance().get(&GlobalDataKey::TokenPerSec).unwrap_or(0)
    }
}

#[contractimpl]
impl MockGlobalDistributor {
    pub fn set_total_alloc_point(env: Env, total_alloc_point: u128) {
        env.storage().instance().set(&GlobalDataKey::TotalAllocPoint, &total_alloc_point);
    }

    pub fn set_alloc_point(env: Env, sub_distributor: Address, alloc_point: u128) {
        env.storage().instance().set(&GlobalDataKey::AllocPoint(sub_distributor), &alloc_point);
    }

    pub fn set_token_per_sec(env: Env, token_per_sec: i128) {
        env.storage().instance().set(&GlobalDataKey::TokenPerSec, &token_per_sec);
    }
}

// ################################################################
//                         Mock rewarder
// ################################################################

#[contracttype]
pub enum RewarderDataKey {
    Calls,
    LastAmount(Address),
}

#[contract]
pub struct MockRewarder;

#[contractimpl]
impl ComplexRewarderTrait for MockRewarder {
    fn on_reward(env: Env, _pool_id: u32, user: Address, new_amount: i128) {
        let calls: u32 = env.storage().instance().get(&RewarderDataKey::Calls).unwrap_or(0);
        env.storage().instance().set(&RewarderDataKey::Calls, &(calls + 1));
        env.storage().instance().set(&RewarderDataKey::LastAmount(user), &new_amount);
    }
}

#[contractimpl]
impl MockRewarder {
    pub fn calls(env: Env) -> u32 {
        env.storage().instance().get(&RewarderDataKey::Calls).unwrap_or(0)
    }

    pub fn last_amount(env: Env, user: Address) -> i128 {
        env.storage().instance().get(&RewarderDataKey::LastAmount(user)).unwrap_or(0)
    }
}

// ################################################################
//                            Deploy
// ################################################################

pub fn deploy_token_contract<'a>(
    env: &Env,
    admin: &Address
) -> (token::Client<'a>, token::StellarAssetClient<'a>) {
    let address = env.register_stellar_asset_contract_v2(admin.clone()).address();
    (token::Client::new(env, &address), token::StellarAssetClient::new(env, &address))
}

pub fn deploy_es_token_contract<'a>(
    env: &Env,
    admin: &Address,
    underlying: &Address
) -> EsTokenClient<'a> {
    let es_token = EsTokenClient::new(env, &env.register(EsToken, ()));

    es_token.initialize(
        admin,
        underlying,
        &String::from_str(env, "Escrowed Token"),
        &String::from_str(env, "esTKN"),
        &7u32
    );

    es_token
}

pub fn deploy_reward_distributor_contract<'a>(
    env: &Env,
    admin: &Address,
    reward_token: &Address,
    global_distributor: &Address
) -> RewardDistributorClient<'a> {
    let distributor = RewardDistributorClient::new(env, &env.register(RewardDistributor, ()));
    distributor.initialize(admin, reward_token, global_distributor);
    distributor
}

pub fn set_time(env: &Env, timestamp: u64) {
    env.ledger().with_mut(|li| {
        li.timestamp = timestamp;
    });
}

pub struct Setup<'a> {
    pub env: Env,
    pub admin: Address,
    pub reward_token: token::Client<'a>,
    pub reward_token_admin: token::StellarAssetClient<'a>,
    pub underlying_admin: token::StellarAssetClient<'a>,
    pub es_token: EsTokenClient<'a>,
    pub global: MockGlobalDistributorClient<'a>,
    pub distributor: RewardDistributorClient<'a>,
}

impl<'a> Setup<'a> {
    /// Distributor weighted 70 out of 100 in a global distributor emitting
    /// 1_000 per second, with `reward_reserve` reward token to pay out.
    pub fn new(reward_reserve: i128) -> Self {
        let env = Env::default();
        env.mock_all_auths();
        env.cost_estimate().budget().reset_unlimited();
        set_time(&env, START_TIME);

        let admin = Address::generate(&env);

        let (reward_token, reward_token_admin) = deploy_token_contract(&env, &admin);
        let (underlying, underlying_admin) = deploy_token_contract(&env, &admin);
        let es_token = deploy_es_token_contract(&env, &admin, &underlying.address);

        let global = MockGlobalDistributorClient::new(
            &env,
            &env.register(MockGlobalDistributor, ())
        );
        global.set_token_per_sec(&GLOBAL_TOKEN_PER_SEC);
        global.set_total_alloc_point(&GLOBAL_ALLOC_POINT);

        // the distributor address is needed to register its weight
        let distributor = RewardDistributorClient::new(
            &env,
            &env.register(RewardDistributor, ())
        );
        global.set_alloc_point(&distributor.address, &OWN_ALLOC_POINT);
        distributor.initialize(&admin, &reward_token.address, &global.address);

        if reward_reserve > 0 {
            reward_token_admin.mint(&distributor.address, &reward_reserve);
        }

        Setup {
            env,
            admin,
            reward_token,
            reward_token_admin,
            underlying_admin,
            es_token,
            global,
            distributor,
        }
    }

    /// Registers the escrow token as pool 0.
    pub fn with_pool(reward_reserve: i128, alloc_point: u64, harvest_interval: u64) -> Self {
        let setup = Self::new(reward_reserve);
        setup.distributor.add_pool(
            &setup.admin,
            &alloc_point,
            &setup.es_token.address,
            &harvest_interval,
            &vec![&setup.env]
        );
        setup
    }

    /// New holder with `amount` escrow allocated to the distributor.
    pub fn staker(&self, amount: i128) -> Address {
        let user = Address::generate(&self.env);
        self.allocate(&user, amount);
        user
    }

    pub fn allocate(&self, user: &Address, amount: i128) {
        self.underlying_admin.mint(user, &amount);
        self.es_token.convert(user, &amount);
        let approved = self.es_token.query_usage_approval(user, &self.distributor.address);
        self.es_token.approve_usage(user, &self.distributor.address, &(approved + amount));
        self.es_token.allocate(user, &self.distributor.address, &amount, &Bytes::new(&self.env));
    }

    pub fn deallocate(&self, user: &Address, amount: i128) {
        self.es_token.deallocate(user, &self.distributor.address, &amount, &Bytes::new(&self.env));
    }

    pub fn advance_time(&self, seconds: u64) {
        let now = self.env.ledger().timestamp();
        set_time(&self.env, now + seconds);
    }
}
