use soroban_fixed_point_math::FixedPoint;
use soroban_sdk::{ log, Env };

use crate::error::{ ErrorCode, EscrowResult };

pub trait SafeMath: Sized {
    fn safe_add(self, rhs: Self, env: &Env) -> EscrowResult<Self>;
    fn safe_sub(self, rhs: Self, env: &Env) -> EscrowResult<Self>;
    fn safe_mul(self, rhs: Self, env: &Env) -> EscrowResult<Self>;
    fn safe_div(self, rhs: Self, env: &Env) -> EscrowResult<Self>;
}

macro_rules! checked_impl {
    ($t:ty) => {
        impl SafeMath for $t {
            #[track_caller]
            #[inline(always)]
            fn safe_add(self, v: $t, env: &Env) -> EscrowResult<$t> {
                match self.checked_add(v) {
                    Some(result) => Ok(result),
                    None => {
                        log!(env, "Math error thrown at line {}", line!());
                        Err(ErrorCode::MathError)
                    }
                }
            }

            #[track_caller]
            #[inline(always)]
            fn safe_sub(self, v: $t, env: &Env) -> EscrowResult<$t> {
                match self.checked_sub(v) {
                    Some(result) => Ok(result),
                    None => {
                        log!(env, "Math error thrown at line {}", line!());
                        Err(ErrorCode::MathError)
                    }
                }
            }

            #[track_caller]
            #[inline(always)]
            fn safe_mul(self, v: $t, env: &Env) -> EscrowResult<$t> {
                match self.checked_mul(v) {
                    Some(result) => Ok(result),
                    None => {
                        log!(env, "Math error thrown at line {}", line!());
                        Err(ErrorCode::MathError)
                    }
                }
            }

            #[track_caller]
            #[inline(always)]
            fn safe_div(self, v: $t, env: &Env) -> EscrowResult<$t> {
                match self.checked_div(v) {
                    Some(result) => Ok(result),
                    None => {
                        log!(env, "Math error thrown at line {}", line!());
                        Err(ErrorCode::MathError)
                    }
                }
            }
        }
    };
}

checked_impl!(u128);
checked_impl!(u64);
checked_impl!(u32);
checked_impl!(i128);

pub trait SafeMulDiv: Sized {
    /// Computes `self * y / denominator`, rounding toward zero.
    fn safe_mul_div_floor(self, y: Self, denominator: Self, env: &Env) -> EscrowResult<Self>;
}

impl SafeMulDiv for i128 {
    #[track_caller]
    #[inline(always)]
    fn safe_mul_div_floor(self, y: i128, denominator: i128, env: &Env) -> EscrowResult<i128> {
        match self.fixed_mul_floor(y, denominator) {
            Some(result) => Ok(result),
            None => {
                log!(env, "Math error thrown at line {}", line!());
                Err(ErrorCode::MathError)
            }
        }
    }
}

#[cfg(test)]
mod test {
    use crate::error::ErrorCode;
    use crate::math::safe_math::{ SafeMath, SafeMulDiv };
    use soroban_sdk::Env;

    #[test]
    fn safe_add() {
        let env = Env::default();
        assert_eq!((1_u128).safe_add(1, &env).unwrap(), 2);
        assert_eq!((1_u128).safe_add(u128::MAX, &env), Err(ErrorCode::MathError));
    }

    #[test]
    fn safe_sub() {
        let env = Env::default();
        assert_eq!((1_u128).safe_sub(1, &env).unwrap(), 0);
        assert_eq!((0_u128).safe_sub(1, &env), Err(ErrorCode::MathError));
        assert_eq!((0_i128).safe_sub(1, &env).unwrap(), -1);
    }

    #[test]
    fn safe_mul() {
        let env = Env::default();
        assert_eq!((8_u128).safe_mul(80, &env).unwrap(), 640);
        assert_eq!((2_u128).safe_mul(u128::MAX, &env), Err(ErrorCode::MathError));
    }

    #[test]
    fn safe_div() {
        let env = Env::default();
        assert_eq!((155_u128).safe_div(8, &env).unwrap(), 19);
        assert_eq!((160_u128).safe_div(8, &env).unwrap(), 20);
        assert_eq!((1_u128).safe_div(0, &env), Err(ErrorCode::MathError));
    }

    #[test]
    fn safe_mul_div_floor() {
        let env = Env::default();
        assert_eq!((10_000_i128).safe_mul_div_floor(5_000, 10_000, &env).unwrap(), 5_000);
        assert_eq!((7_i128).safe_mul_div_floor(1, 2, &env).unwrap(), 3);
        assert_eq!((1_i128).safe_mul_div_floor(1, 0, &env), Err(ErrorCode::MathError));
    }
}
