use soroban_sdk::{ Address, Env, Symbol };

use crate::storage::RedeemSettings;

pub struct EsTokenEvents {}

impl EsTokenEvents {
    /// Emitted when the Es Token is initialized
    ///
    /// - topics - `["initialize", admin: Address]`
    /// - data - `underlying: Address`
    pub fn initialize(env: &Env, admin: Address, underlying: Address) {
        let topics = (Symbol::new(env, "initialize"), admin);
        env.events().publish(topics, underlying);
    }

    /// Emitted when underlying is converted into escrow
    ///
    /// - topics - `["convert", from: Address, to: Address]`
    /// - data - `amount: i128`
    pub fn convert(env: &Env, from: Address, to: Address, amount: i128) {
        let topics = (Symbol::new(env, "convert"), from, to);
        env.events().publish(topics, amount);
    }

    /// Emitted when a redeem request is created
    ///
    /// - topics - `["redeem", user: Address]`
    /// - data - `[es_amount: i128, underlying_amount: i128, duration: u64]`
    pub fn redeem(env: &Env, user: Address, es_amount: i128, underlying_amount: i128, duration: u64) {
        let topics = (Symbol::new(env, "redeem"), user);
        env.events().publish(topics, (es_amount, underlying_amount, duration));
    }

    /// Emitted when escrow is burned against underlying, either by finalizing a
    /// request or through a free redemption
    ///
    /// - topics - `["finalize_redeem", user: Address]`
    /// - data - `[es_amount: i128, underlying_amount: i128]`
    pub fn finalize_redeem(env: &Env, user: Address, es_amount: i128, underlying_amount: i128) {
        let topics = (Symbol::new(env, "finalize_redeem"), user);
        env.events().publish(topics, (es_amount, underlying_amount));
    }

    /// Emitted when a redeem request is cancelled
    ///
    /// - topics - `["cancel_redeem", user: Address]`
    /// - data - `[index: u32, es_amount: i128]`
    pub fn cancel_redeem(env: &Env, user: Address, index: u32, es_amount: i128) {
        let topics = (Symbol::new(env, "cancel_redeem"), user);
        env.events().publish(topics, (index, es_amount));
    }

    /// - topics - `["update_redeem_settings", admin: Address]`
    /// - data - `settings: RedeemSettings`
    pub fn update_redeem_settings(env: &Env, admin: Address, settings: RedeemSettings) {
        let topics = (Symbol::new(env, "update_redeem_settings"), admin);
        env.events().publish(topics, settings);
    }

    /// - topics - `["set_dividends_address", admin: Address]`
    /// - data - `dividends_address: Address`
    pub fn set_dividends_address(env: &Env, admin: Address, dividends_address: Address) {
        let topics = (Symbol::new(env, "set_dividends_address"), admin);
        env.events().publish(topics, dividends_address);
    }

    /// - topics - `["set_transfer_whitelist", account: Address]`
    /// - data - `whitelisted: bool`
    pub fn set_transfer_whitelist(env: &Env, account: Address, whitelisted: bool) {
        let topics = (Symbol::new(env, "set_transfer_whitelist"), account);
        env.events().publish(topics, whitelisted);
    }

    // Usage Events

    /// - topics - `["approve_usage", user: Address, usage: Address]`
    /// - data - `amount: i128`
    pub fn approve_usage(env: &Env, user: Address, usage: Address, amount: i128) {
        let topics = (Symbol::new(env, "approve_usage"), user, usage);
        env.events().publish(topics, amount);
    }

    /// - topics - `["allocate", user: Address, usage: Address]`
    /// - data - `amount: i128`
    pub fn allocate(env: &Env, user: Address, usage: Address, amount: i128) {
        let topics = (Symbol::new(env, "allocate"), user, usage);
        env.events().publish(topics, amount);
    }

    /// - topics - `["deallocate", user: Address, usage: Address]`
    /// - data - `amount: i128`
    pub fn deallocate(env: &Env, user: Address, usage: Address, amount: i128) {
        let topics = (Symbol::new(env, "deallocate"), user, usage);
        env.events().publish(topics, amount);
    }
}
