use escrowed::{
    constants::{ INSTANCE_BUMP_AMOUNT, INSTANCE_LIFETIME_THRESHOLD },
    error::{ ErrorCode, EscrowResult },
    guard::non_reentrant,
    validate,
};
use soroban_sdk::{
    contract,
    contractimpl,
    contractmeta,
    log,
    panic_with_error,
    token::{ self, Interface as _ },
    Address,
    Bytes,
    Env,
    String,
};
use soroban_token_sdk::{ metadata::TokenMetadata, TokenUtils };

use crate::{
    allowance::{ read_allowance, spend_allowance, write_allowance },
    balance::{ read_balance, receive_balance, spend_balance },
    controller,
    es_token::EsTokenTrait,
    events::EsTokenEvents,
    math::redeem::{ calculate_free_redeem_cap, calculate_underlying_by_duration },
    metadata::{ read_decimal, read_name, read_symbol, write_metadata },
    storage::{
        get_es_balance,
        get_last_free_redeem,
        get_redeem_settings,
        get_usage_approval,
        get_user_redeem,
        get_user_redeems,
        save_redeem_settings,
        utils::{
            get_admin,
            get_dividends_address,
            get_total_supply,
            get_underlying,
            is_admin,
            is_initialized,
            is_transfer_whitelisted,
            save_admin,
            save_dividends_address,
            save_total_supply,
            save_underlying,
            set_initialized,
            set_transfer_whitelisted,
        },
        EsBalance,
        RedeemRequest,
        RedeemSettings,
    },
};

contractmeta!(
    key = "Description",
    val = "Non-transferable escrow of an underlying token, redeemable over a vesting period"
);

#[contract]
pub struct EsToken;

fn extend_instance_ttl(env: &Env) {
    env.storage().instance().extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

fn check_nonnegative_amount(env: &Env, amount: i128) {
    if amount < 0 {
        log!(env, "Es Token: negative amount is not allowed");
        panic_with_error!(env, ErrorCode::InvalidAmount);
    }
}

fn check_transfer_allowed(env: &Env, from: &Address, to: &Address) {
    if !is_transfer_whitelisted(env, from) && !is_transfer_whitelisted(env, to) {
        log!(env, "Es Token: transfer not allowed");
        panic_with_error!(env, ErrorCode::TransferNotAllowed);
    }
}

fn unwrap_or_panic(env: &Env, result: EscrowResult) {
    if let Err(error) = result {
        panic_with_error!(env, error);
    }
}

#[contractimpl]
impl EsTokenTrait for EsToken {
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
    ) {
        if is_initialized(&env) {
            log!(&env, "Es Token: Initialize: initializing contract twice is not allowed");
            panic_with_error!(&env, ErrorCode::AlreadyInitialized);
        }
        if decimals > 18 {
            log!(&env, "Es Token: Initialize: decimals must not be greater than 18");
            panic_with_error!(&env, ErrorCode::InvalidAmount);
        }

        set_initialized(&env);

        save_admin(&env, &admin);
        save_underlying(&env, &underlying);
        save_dividends_address(&env, &admin);
        save_total_supply(&env, 0);
        save_redeem_settings(&env, &RedeemSettings::default_settings());

        write_metadata(&env, TokenMetadata {
            decimal: decimals,
            name,
            symbol,
        });

        EsTokenEvents::initialize(&env, admin, underlying);
    }

    fn update_redeem_settings(
        env: Env,
        sender: Address,
        settings: RedeemSettings
    ) -> Result<(), ErrorCode> {
        sender.require_auth();
        is_admin(&env, &sender)?;
        extend_instance_ttl(&env);

        save_redeem_settings(&env, &settings);

        EsTokenEvents::update_redeem_settings(&env, sender, settings);

        Ok(())
    }

    fn update_dividends_address(
        env: Env,
        sender: Address,
        dividends_address: Address
    ) -> Result<(), ErrorCode> {
        sender.require_auth();
        is_admin(&env, &sender)?;
        extend_instance_ttl(&env);

        save_dividends_address(&env, &dividends_address);

        EsTokenEvents::set_dividends_address(&env, sender, dividends_address);

        Ok(())
    }

    fn update_transfer_whitelist(
        env: Env,
        sender: Address,
        account: Address,
        add: bool
    ) -> Result<(), ErrorCode> {
        sender.require_auth();
        is_admin(&env, &sender)?;
        extend_instance_ttl(&env);

        validate!(
            &env,
            add || account != env.current_contract_address(),
            ErrorCode::TransferNotAllowed,
            "updateTransferWhitelist: cannot remove the token itself"
        )?;

        set_transfer_whitelisted(&env, &account, add);

        EsTokenEvents::set_transfer_whitelist(&env, account, add);

        Ok(())
    }

    // ################################################################
    //                             USER
    // ################################################################

    fn convert(env: Env, user: Address, amount: i128) -> Result<(), ErrorCode> {
        user.require_auth();
        extend_instance_ttl(&env);

        non_reentrant(&env, || controller::conversion::convert(&env, &user, amount, &user))
    }

    fn convert_to(env: Env, user: Address, amount: i128, to: Address) -> Result<(), ErrorCode> {
        user.require_auth();
        extend_instance_ttl(&env);

        validate!(
            &env,
            to == user || is_transfer_whitelisted(&env, &user),
            ErrorCode::TransferNotAllowed,
            "convertTo: not allowed"
        )?;

        non_reentrant(&env, || controller::conversion::convert(&env, &user, amount, &to))
    }

    fn redeem(env: Env, user: Address, es_amount: i128, duration: u64) -> Result<(), ErrorCode> {
        user.require_auth();
        extend_instance_ttl(&env);

        non_reentrant(&env, || controller::redeem::redeem(&env, &user, es_amount, duration))
    }

    fn finalize_redeem(env: Env, user: Address, index: u32) -> Result<(), ErrorCode> {
        user.require_auth();
        extend_instance_ttl(&env);

        non_reentrant(&env, || controller::redeem::finalize_redeem(&env, &user, index))
    }

    fn cancel_redeem(env: Env, user: Address, index: u32) -> Result<(), ErrorCode> {
        user.require_auth();
        extend_instance_ttl(&env);

        non_reentrant(&env, || controller::redeem::cancel_redeem(&env, &user, index))
    }

    fn approve_usage(
        env: Env,
        user: Address,
        usage: Address,
        amount: i128
    ) -> Result<(), ErrorCode> {
        user.require_auth();
        extend_instance_ttl(&env);

        controller::usage::approve_usage(&env, &user, &usage, amount)
    }

    fn allocate(
        env: Env,
        user: Address,
        usage: Address,
        amount: i128,
        data: Bytes
    ) -> Result<(), ErrorCode> {
        user.require_auth();
        extend_instance_ttl(&env);

        non_reentrant(&env, || controller::usage::allocate(&env, &user, &usage, amount, &data))
    }

    fn deallocate(
        env: Env,
        user: Address,
        usage: Address,
        amount: i128,
        data: Bytes
    ) -> Result<(), ErrorCode> {
        user.require_auth();
        extend_instance_ttl(&env);

        non_reentrant(&env, || controller::usage::deallocate(&env, &user, &usage, amount, &data))
    }

    // ################################################################
    //                             QUERIES
    // ################################################################

    fn query_admin(env: Env) -> Address {
        get_admin(&env)
    }

    fn query_underlying(env: Env) -> Address {
        get_underlying(&env)
    }

    fn query_dividends_address(env: Env) -> Address {
        get_dividends_address(&env)
    }

    fn query_redeem_settings(env: Env) -> RedeemSettings {
        get_redeem_settings(&env)
    }

    fn query_total_supply(env: Env) -> i128 {
        get_total_supply(&env)
    }

    fn query_es_balance(env: Env, user: Address) -> EsBalance {
        get_es_balance(&env, &user)
    }

    fn query_user_redeems_length(env: Env, user: Address) -> u32 {
        get_user_redeems(&env, &user).len()
    }

    fn query_user_redeem(env: Env, user: Address, index: u32) -> Result<RedeemRequest, ErrorCode> {
        let redeems = get_user_redeems(&env, &user);
        get_user_redeem(&env, &redeems, index)
    }

    fn query_usage_approval(env: Env, user: Address, usage: Address) -> i128 {
        get_usage_approval(&env, &user, &usage).approved
    }

    fn query_usage_allocation(env: Env, user: Address, usage: Address) -> i128 {
        get_usage_approval(&env, &user, &usage).allocated
    }

    fn query_last_free_redeem(env: Env, user: Address) -> Option<u64> {
        get_last_free_redeem(&env, &user)
    }

    fn query_free_redeem_cap(env: Env, user: Address) -> Result<i128, ErrorCode> {
        let settings = get_redeem_settings(&env);
        calculate_free_redeem_cap(&env, &settings, read_balance(&env, &user))
    }

    fn query_underlying_by_duration(
        env: Env,
        es_amount: i128,
        duration: u64
    ) -> Result<i128, ErrorCode> {
        let settings = get_redeem_settings(&env);
        calculate_underlying_by_duration(&env, &settings, es_amount, duration)
    }

    fn query_is_transfer_whitelisted(env: Env, account: Address) -> bool {
        is_transfer_whitelisted(&env, &account)
    }
}

#[contractimpl]
impl token::Interface for EsToken {
    fn allowance(env: Env, from: Address, spender: Address) -> i128 {
        extend_instance_ttl(&env);
        read_allowance(&env, from, spender).amount
    }

    fn approve(env: Env, from: Address, spender: Address, amount: i128, expiration_ledger: u32) {
        from.require_auth();
        check_nonnegative_amount(&env, amount);
        extend_instance_ttl(&env);

        unwrap_or_panic(
            &env,
            write_allowance(&env, from.clone(), spender.clone(), amount, expiration_ledger)
        );

        TokenUtils::new(&env).events().approve(from, spender, amount, expiration_ledger);
    }

    /// Spendable escrow only. Redeeming and allocated escrow are reported by
    /// `query_es_balance`.
    fn balance(env: Env, id: Address) -> i128 {
        extend_instance_ttl(&env);
        read_balance(&env, &id)
    }

    fn transfer(env: Env, from: Address, to: Address, amount: i128) {
        from.require_auth();
        check_nonnegative_amount(&env, amount);
        check_transfer_allowed(&env, &from, &to);
        extend_instance_ttl(&env);

        unwrap_or_panic(&env, spend_balance(&env, &from, amount));
        unwrap_or_panic(&env, receive_balance(&env, &to, amount));

        TokenUtils::new(&env).events().transfer(from, to, amount);
    }

    fn transfer_from(env: Env, spender: Address, from: Address, to: Address, amount: i128) {
        spender.require_auth();
        check_nonnegative_amount(&env, amount);
        check_transfer_allowed(&env, &from, &to);
        extend_instance_ttl(&env);

        unwrap_or_panic(&env, spend_allowance(&env, from.clone(), spender, amount));
        unwrap_or_panic(&env, spend_balance(&env, &from, amount));
        unwrap_or_panic(&env, receive_balance(&env, &to, amount));

        TokenUtils::new(&env).events().transfer(from, to, amount);
    }

    fn burn(env: Env, from: Address, _amount: i128) {
        from.require_auth();
        log!(&env, "Es Token: escrow can only leave supply through redemption");
        panic_with_error!(&env, ErrorCode::UnsupportedOperation);
    }

    fn burn_from(env: Env, spender: Address, _from: Address, _amount: i128) {
        spender.require_auth();
        log!(&env, "Es Token: escrow can only leave supply through redemption");
        panic_with_error!(&env, ErrorCode::UnsupportedOperation);
    }

    fn decimals(env: Env) -> u32 {
        read_decimal(&env)
    }

    fn name(env: Env) -> String {
        read_name(&env)
    }

    fn symbol(env: Env) -> String {
        read_symbol(&env)
    }
}
