// src/integer_math/gcd.rs

use num::BigInt;
use num::Integer;

pub struct GCD;

impl GCD {
    pub fn find_gcd_pair(left: &BigInt, right: &BigInt) -> BigInt {
        left.gcd(right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gcd_pair_basic() {
        assert_eq!(GCD::find_gcd_pair(&BigInt::from(48), &BigInt::from(18)), BigInt::from(6));
    }

    #[test]
    fn gcd_pair_coprime() {
        assert_eq!(GCD::find_gcd_pair(&BigInt::from(17), &BigInt::from(13)), BigInt::from(1));
    }
}
