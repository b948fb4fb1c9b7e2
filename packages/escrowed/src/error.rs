use soroban_sdk::contracterror;

pub type EscrowResult<T = ()> = core::result::Result<T, ErrorCode>;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ErrorCode {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    MathError = 3,

    // Validation
    InvalidAmount = 10,
    InvalidDuration = 11,
    RedeemNotFound = 12,
    PoolNotFound = 13,
    PoolAlreadyExists = 14,
    FreeRedeemCapExceeded = 15,
    TransferNotAllowed = 16,
    UnsupportedOperation = 17,

    // Authorization
    NotAuthorized = 20,
    UsageNotAllowed = 21,

    // Timing
    RedeemNotReady = 30,
    GracePeriodExpired = 31,
    FreeRedeemCooldown = 32,

    // Insufficient funds
    InsufficientBalance = 40,
    InsufficientApproval = 41,
    InsufficientAllocation = 42,

    Reentrancy = 50,
}
