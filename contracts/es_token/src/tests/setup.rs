use soroban_sdk::{ testutils::{ Address as _, Ledger }, token, Address, Env, String };

use crate::contract::{ EsToken, EsTokenClient };

pub const ONE_HOUR: u64 = 3_600;
pub const ONE_DAY: u64 = 86_400;
pub const START_TIME: u64 = 1_700_000_000;

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

pub fn set_time(env: &Env, timestamp: u64) {
    env.ledger().with_mut(|li| {
        li.timestamp = timestamp;
    });
}

pub struct Setup<'a> {
    pub env: Env,
    pub admin: Address,
    pub user: Address,
    pub underlying: token::Client<'a>,
    pub underlying_admin: token::StellarAssetClient<'a>,
    pub es_token: EsTokenClient<'a>,
}

impl<'a> Setup<'a> {
    /// Deploys both tokens and gives `user` `converted` escrow out of
    /// `minted` underlying.
    pub fn new(minted: i128, converted: i128) -> Self {
        let env = Env::default();
        env.mock_all_auths();
        set_time(&env, START_TIME);

        let admin = Address::generate(&env);
        let user = Address::generate(&env);

        let (underlying, underlying_admin) = deploy_token_contract(&env, &admin);
        let es_token = deploy_es_token_contract(&env, &admin, &underlying.address);

        if minted > 0 {
            underlying_admin.mint(&user, &minted);
        }
        if converted > 0 {
            es_token.convert(&user, &converted);
        }

        Setup {
            env,
            admin,
            user,
            underlying,
            underlying_admin,
            es_token,
        }
    }

    pub fn advance_time(&self, seconds: u64) {
        let now = self.env.ledger().timestamp();
        set_time(&self.env, now + seconds);
    }
}

// ################################################################
//                          Mock usage
// ################################################################

pub use mock_usage::{ MockUsage, MockUsageClient };
pub use rejecting_usage::RejectingUsage;

// each contract implementing the same trait needs its own module
mod mock_usage {
    use escrowed::{ error::ErrorCode, interfaces::EsTokenUsageTrait };
    use soroban_sdk::{ contract, contractimpl, contracttype, Address, Bytes, Env };

    #[contracttype]
    pub enum UsageDataKey {
        Allocation(Address),
    }

    /// Usage that keeps a running total of what each holder allocated to it.
    #[contract]
    pub struct MockUsage;

    #[contractimpl]
    impl EsTokenUsageTrait for MockUsage {
        fn set_allocation(
            env: Env,
            es_token: Address,
            user: Address,
            amount: i128,
            _data: Bytes
        ) -> Result<(), ErrorCode> {
            es_token.require_auth();
            let key = UsageDataKey::Allocation(user);
            let current: i128 = env.storage().persistent().get(&key).unwrap_or(0);
            env.storage().persistent().set(&key, &(current + amount));
            Ok(())
        }

        fn unset_allocation(
            env: Env,
            es_token: Address,
            user: Address,
            amount: i128,
            _data: Bytes
        ) -> Result<(), ErrorCode> {
            es_token.require_auth();
            let key = UsageDataKey::Allocation(user);
            let current: i128 = env.storage().persistent().get(&key).unwrap_or(0);
            env.storage().persistent().set(&key, &(current - amount));
            Ok(())
        }
    }

    #[contractimpl]
    impl MockUsage {
        pub fn allocation(env: Env, user: Address) -> i128 {
            env.storage().persistent().get(&UsageDataKey::Allocation(user)).unwrap_or(0)
        }
    }
}

mod rejecting_usage {
    use escrowed::{ error::ErrorCode, interfaces::EsTokenUsageTrait };
    use soroban_sdk::{ contract, contractimpl, Address, Bytes, Env };

    /// Usage that refuses every allocation change.
    #[contract]
    pub struct RejectingUsage;

    #[contractimpl]
    impl EsTokenUsageTrait for RejectingUsage {
        fn set_allocation(
            _env: Env,
            _es_token: Address,
            _user: Address,
            _amount: i128,
            _data: Bytes
        ) -> Result<(), ErrorCode> {
            Err(ErrorCode::UsageNotAllowed)
        }

        fn unset_allocation(
            _env: Env,
            _es_token: Address,
            _user: Address,
            _amount: i128,
            _data: Bytes
        ) -> Result<(), ErrorCode> {
            Err(ErrorCode::UsageNotAllowed)
        }
    }
}
