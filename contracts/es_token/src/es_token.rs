use escrowed::error::ErrorCode;
use soroban_sdk::{ Address, Bytes, Env, String };

use crate::storage::{ EsBalance, RedeemRequest, RedeemSettings };

pub trait EsTokenTrait {
    // ################################################################
    //                             ADMIN
    // ################################################################

    fn initialize(
        env: Env,
        admin: Address,
        underlying: Address,
        name: String,
        symbol: String,
        decimals: u32
    );

    fn update_redeem_settings(
        env: Env,
        sender: Address,
        settings: RedeemSettings
    ) -> Result<(), ErrorCode>;

    fn update_dividends_address(
        env: Env,
        sender: Address,
        dividends_address: Address
    ) -> Result<(), ErrorCode>;

    fn update_transfer_whitelist(
        env: Env,
        sender: Address,
        account: Address,
        add: bool
    ) -> Result<(), ErrorCode>;

    // ################################################################
    //                             USER
    // ################################################################

    fn convert(env: Env, user: Address, amount: i128) -> Result<(), ErrorCode>;

    fn convert_to(env: Env, user: Address, amount: i128, to: Address) -> Result<(), ErrorCode>;

    /// A zero `duration` redeems for free, within the cap and cooldown.
    fn redeem(env: Env, user: Address, es_amount: i128, duration: u64) -> Result<(), ErrorCode>;

    fn finalize_redeem(env: Env, user: Address, index: u32) -> Result<(), ErrorCode>;

    fn cancel_redeem(env: Env, user: Address, index: u32) -> Result<(), ErrorCode>;

    fn approve_usage(
        env: Env,
        user: Address,
        usage: Address,
        amount: i128
    ) -> Result<(), ErrorCode>;

    fn allocate(
        env: Env,
        user: Address,
        usage: Address,
        amount: i128,
        data: Bytes
    ) -> Result<(), ErrorCode>;

    fn deallocate(
        env: Env,
        user: Address,
        usage: Address,
        amount: i128,
        data: Bytes
    ) -> Result<(), ErrorCode>;

    // ################################################################
    //                             QUERIES
    // ################################################################

    fn query_admin(env: Env) -> Address;

    fn query_underlying(env: Env) -> Address;

    fn query_dividends_address(env: Env) -> Address;

    fn query_redeem_settings(env: Env) -> RedeemSettings;

    fn query_total_supply(env: Env) -> i128;

    fn query_es_balance(env: Env, user: Address) -> EsBalance;

    fn query_user_redeems_length(env: Env, user: Address) -> u32;

    fn query_user_redeem(env: Env, user: Address, index: u32) -> Result<RedeemRequest, ErrorCode>;

    fn query_usage_approval(env: Env, user: Address, usage: Address) -> i128;

    fn query_usage_allocation(env: Env, user: Address, usage: Address) -> i128;

    fn query_last_free_redeem(env: Env, user: Address) -> Option<u64>;

    fn query_free_redeem_cap(env: Env, user: Address) -> Result<i128, ErrorCode>;

    fn query_underlying_by_duration(
        env: Env,
        es_amount: i128,
        duration: u64
    ) -> Result<i128, ErrorCode>;

    fn query_is_transfer_whitelisted(env: Env, account: Address) -> bool;
}
