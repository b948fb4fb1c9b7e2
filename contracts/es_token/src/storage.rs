use escrowed::{
    constants::{ ONE_DAY, ONE_HOUR, PERSISTENT_BUMP_AMOUNT, PERSISTENT_LIFETIME_THRESHOLD },
    error::{ ErrorCode, EscrowResult },
    validate,
};
use soroban_sdk::{ contracttype, log, panic_with_error, Address, Env, Vec };

#[derive(Clone)]
#[contracttype]
pub struct AllowanceDataKey {
    pub from: Address,
    pub spender: Address,
}

#[contracttype]
pub struct AllowanceValue {
    pub amount: i128,
    pub expiration_ledger: u32,
}

#[derive(Clone)]
#[contracttype]
pub struct UsageDataKey {
    pub user: Address,
    pub usage: Address,
}

#[derive(Clone)]
#[contracttype]
pub enum DataKey {
    Admin,
    Initialized,
    Underlying,
    DividendsAddress,
    RedeemSettings,
    TotalSupply,
    Allowance(AllowanceDataKey),
    Balance(Address),
    EsBalance(Address),
    UserRedeems(Address),
    LastFreeRedeem(Address),
    UsageApproval(UsageDataKey),
    TransferWhitelist(Address),
}

// ################################################################
//                         Redeem Settings
// ################################################################

/// Parameters of the redemption curve, the free redemption path and the
/// finalization window. Replaced as a whole by the admin.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RedeemSettings {
    /// Payout ratio (bps) at `min_redeem_duration`
    pub min_redeem_ratio: u32,
    /// Payout ratio (bps) at `max_redeem_duration` and above
    pub max_redeem_ratio: u32,
    pub min_redeem_duration: u64,
    pub max_redeem_duration: u64,
    /// Share (bps) of the forfeited amount sent to the dividends address
    pub redeem_dividends_adjustment: u32,
    /// Share (bps) of the spendable balance that can be redeemed for free
    pub free_redeem_percentage: u32,
    /// Flat amount added on top of the free redeem percentage
    pub min_free_redeem: i128,
    pub free_redeem_cooldown: u64,
    /// Time after `end_time` during which a request can still be finalized
    pub redemption_grace_period: u64,
}

impl RedeemSettings {
    pub fn default_settings() -> Self {
        RedeemSettings {
            min_redeem_ratio: 5_000,
            max_redeem_ratio: 10_000,
            min_redeem_duration: 15 * ONE_DAY,
            max_redeem_duration: 30 * ONE_DAY,
            redeem_dividends_adjustment: 0,
            free_redeem_percentage: 100,
            min_free_redeem: 0,
            free_redeem_cooldown: 12 * ONE_HOUR,
            redemption_grace_period: 7 * ONE_DAY,
        }
    }
}

pub fn save_redeem_settings(env: &Env, settings: &RedeemSettings) {
    env.storage().persistent().set(&DataKey::RedeemSettings, settings);
    env.storage()
        .persistent()
        .extend_ttl(
            &DataKey::RedeemSettings,
            PERSISTENT_LIFETIME_THRESHOLD,
            PERSISTENT_BUMP_AMOUNT
        );
}

pub fn get_redeem_settings(env: &Env) -> RedeemSettings {
    let settings = env
        .storage()
        .persistent()
        .get(&DataKey::RedeemSettings)
        .unwrap_or_else(|| {
            log!(env, "Es Token: Redeem settings not set");
            panic_with_error!(env, ErrorCode::NotInitialized)
        });

    env.storage()
        .persistent()
        .extend_ttl(
            &DataKey::RedeemSettings,
            PERSISTENT_LIFETIME_THRESHOLD,
            PERSISTENT_BUMP_AMOUNT
        );

    settings
}

// ################################################################
//                           Redeems
// ################################################################

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RedeemRequest {
    /// Escrow locked by the request
    pub es_amount: i128,
    /// Underlying released on finalization, fixed when the request is made
    pub underlying_amount: i128,
    /// Earliest finalization time
    pub end_time: u64,
    pub duration: u64,
}

/// Pending redemptions of one holder.
///
/// Requests are addressed by position. Removing a request moves the last one
/// into its slot, so an index only stays valid until the next removal for the
/// same holder.
pub fn get_user_redeems(env: &Env, user: &Address) -> Vec<RedeemRequest> {
    let key = DataKey::UserRedeems(user.clone());
    match env.storage().persistent().get::<_, Vec<RedeemRequest>>(&key) {
        Some(redeems) => {
            env.storage()
                .persistent()
                .extend_ttl(&key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
            redeems
        }
        None => Vec::new(env),
    }
}

pub fn save_user_redeems(env: &Env, user: &Address, redeems: &Vec<RedeemRequest>) {
    let key = DataKey::UserRedeems(user.clone());
    if redeems.is_empty() {
        env.storage().persistent().remove(&key);
        return;
    }
    env.storage().persistent().set(&key, redeems);
    env.storage()
        .persistent()
        .extend_ttl(&key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

pub fn get_user_redeem(
    env: &Env,
    redeems: &Vec<RedeemRequest>,
    index: u32
) -> EscrowResult<RedeemRequest> {
    validate!(env, index < redeems.len(), ErrorCode::RedeemNotFound, "redeem request not found")?;
    redeems.get(index).ok_or(ErrorCode::RedeemNotFound)
}

/// Swap-and-pop removal: the last request takes the place of `index`.
pub fn remove_user_redeem(redeems: &mut Vec<RedeemRequest>, index: u32) {
    let last = redeems.len() - 1;
    if index != last {
        if let Some(moved) = redeems.get(last) {
            redeems.set(index, moved);
        }
    }
    redeems.pop_back();
}

pub fn get_last_free_redeem(env: &Env, user: &Address) -> Option<u64> {
    let key = DataKey::LastFreeRedeem(user.clone());
    let last = env.storage().persistent().get::<_, u64>(&key);
    if last.is_some() {
        env.storage()
            .persistent()
            .extend_ttl(&key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
    }
    last
}

pub fn save_last_free_redeem(env: &Env, user: &Address, ts: u64) {
    let key = DataKey::LastFreeRedeem(user.clone());
    env.storage().persistent().set(&key, &ts);
    env.storage()
        .persistent()
        .extend_ttl(&key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

// ################################################################
//                          Es Balance
// ################################################################

/// Escrow of a holder that is not spendable right now.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct EsBalance {
    /// Escrow allocated to usages
    pub allocated_amount: i128,
    /// Escrow locked in pending redeem requests
    pub redeeming_amount: i128,
}

pub fn get_es_balance(env: &Env, user: &Address) -> EsBalance {
    let key = DataKey::EsBalance(user.clone());
    match env.storage().persistent().get::<_, EsBalance>(&key) {
        Some(es_balance) => {
            env.storage()
                .persistent()
                .extend_ttl(&key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
            es_balance
        }
        None => EsBalance::default(),
    }
}

pub fn save_es_balance(env: &Env, user: &Address, es_balance: &EsBalance) {
    let key = DataKey::EsBalance(user.clone());
    env.storage().persistent().set(&key, es_balance);
    env.storage()
        .persistent()
        .extend_ttl(&key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

// ################################################################
//                            Usage
// ################################################################

#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct UsageApproval {
    /// Ceiling set by the holder
    pub approved: i128,
    /// Currently allocated to the usage
    pub allocated: i128,
}

impl UsageApproval {
    pub fn headroom(&self) -> i128 {
        self.approved - self.allocated
    }
}

pub fn get_usage_approval(env: &Env, user: &Address, usage: &Address) -> UsageApproval {
    let key = DataKey::UsageApproval(UsageDataKey {
        user: user.clone(),
        usage: usage.clone(),
    });
    match env.storage().persistent().get::<_, UsageApproval>(&key) {
        Some(approval) => {
            env.storage()
                .persistent()
                .extend_ttl(&key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
            approval
        }
        None => UsageApproval::default(),
    }
}

pub fn save_usage_approval(env: &Env, user: &Address, usage: &Address, approval: &UsageApproval) {
    let key = DataKey::UsageApproval(UsageDataKey {
        user: user.clone(),
        usage: usage.clone(),
    });
    env.storage().persistent().set(&key, approval);
    env.storage()
        .persistent()
        .extend_ttl(&key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

// ################################################################
//                            Utils
// ################################################################

pub mod utils {
    use escrowed::constants::{ INSTANCE_BUMP_AMOUNT, INSTANCE_LIFETIME_THRESHOLD };

    use super::*;

    pub fn is_initialized(env: &Env) -> bool {
        env.storage().instance().get(&DataKey::Initialized).unwrap_or(false)
    }

    pub fn set_initialized(env: &Env) {
        env.storage().instance().set(&DataKey::Initialized, &true);
        env.storage().instance().extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
    }

    pub fn save_admin(env: &Env, address: &Address) {
        env.storage().instance().set(&DataKey::Admin, address);
    }

    pub fn get_admin(env: &Env) -> Address {
        env.storage()
            .instance()
            .get(&DataKey::Admin)
            .unwrap_or_else(|| {
                log!(env, "Es Token: Admin not set");
                panic_with_error!(env, ErrorCode::NotInitialized)
            })
    }

    pub fn is_admin(env: &Env, sender: &Address) -> EscrowResult {
        validate!(
            env,
            get_admin(env) == *sender,
            ErrorCode::NotAuthorized,
            "Es Token: You are not authorized!"
        )
    }

    pub fn save_underlying(env: &Env, address: &Address) {
        env.storage().instance().set(&DataKey::Underlying, address);
    }

    pub fn get_underlying(env: &Env) -> Address {
        env.storage()
            .instance()
            .get(&DataKey::Underlying)
            .unwrap_or_else(|| {
                log!(env, "Es Token: Underlying not set");
                panic_with_error!(env, ErrorCode::NotInitialized)
            })
    }

    pub fn save_dividends_address(env: &Env, address: &Address) {
        env.storage().instance().set(&DataKey::DividendsAddress, address);
    }

    pub fn get_dividends_address(env: &Env) -> Address {
        env.storage()
            .instance()
            .get(&DataKey::DividendsAddress)
            .unwrap_or_else(|| {
                log!(env, "Es Token: Dividends address not set");
                panic_with_error!(env, ErrorCode::NotInitialized)
            })
    }

    pub fn get_total_supply(env: &Env) -> i128 {
        env.storage().instance().get(&DataKey::TotalSupply).unwrap_or(0)
    }

    pub fn save_total_supply(env: &Env, total_supply: i128) {
        env.storage().instance().set(&DataKey::TotalSupply, &total_supply);
    }

    pub fn is_transfer_whitelisted(env: &Env, account: &Address) -> bool {
        if *account == env.current_contract_address() {
            return true;
        }
        env.storage()
            .persistent()
            .get(&DataKey::TransferWhitelist(account.clone()))
            .unwrap_or(false)
    }

    pub fn set_transfer_whitelisted(env: &Env, account: &Address, whitelisted: bool) {
        let key = DataKey::TransferWhitelist(account.clone());
        if whitelisted {
            env.storage().persistent().set(&key, &true);
            env.storage()
                .persistent()
                .extend_ttl(&key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
        } else {
            env.storage().persistent().remove(&key);
        }
    }
}
