use soroban_sdk::{ log, Env };

use crate::error::{ ErrorCode, EscrowResult };

pub trait Cast: Sized {
    /// Perform a checked conversion, logging the failure.
    #[track_caller]
    #[inline(always)]
    fn cast<T: TryFrom<Self>>(self, env: &Env) -> EscrowResult<T> {
        match T::try_from(self) {
            Ok(result) => Ok(result),
            Err(_) => {
                log!(env, "Casting error thrown at line {}", line!());
                Err(ErrorCode::MathError)
            }
        }
    }
}

impl Cast for u128 {}
impl Cast for u64 {}
impl Cast for u32 {}
impl Cast for i128 {}

#[cfg(test)]
mod test {
    use super::Cast;
    use crate::error::ErrorCode;
    use soroban_sdk::Env;

    #[test]
    fn cast_in_range() {
        let env = Env::default();
        let value: i128 = (42_u128).cast(&env).unwrap();
        assert_eq!(value, 42);
    }

    #[test]
    fn cast_out_of_range() {
        let env = Env::default();
        let result: Result<i128, ErrorCode> = u128::MAX.cast(&env);
        assert_eq!(result, Err(ErrorCode::MathError));
    }
}
