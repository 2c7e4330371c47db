// RSA Big Integer Operations
// Number-theoretic primitives over num-bigint: gcd, modular exponentiation,
// modular inverse and the Jacobi symbol

use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{One, Signed, ToPrimitive, Zero};

/// RSA Big Integer type alias
pub type RsaBigInt = BigUint;

/// Create a big integer from u64
pub fn from_u64(n: u64) -> RsaBigInt {
    RsaBigInt::from(n)
}

/// Create a big integer from bytes (big-endian, unsigned magnitude)
pub fn from_bytes(bytes: &[u8]) -> RsaBigInt {
    RsaBigInt::from_bytes_be(bytes)
}

/// Two's-complement big-endian encoding of a non-negative integer.
///
/// Values whose top bit is set gain a leading zero sign byte, so the result
/// can be one byte longer than the unsigned magnitude. Zero encodes as `[0]`.
pub fn to_signed_bytes(n: &RsaBigInt) -> Vec<u8> {
    BigInt::from(n.clone()).to_signed_bytes_be()
}

/// Greatest common divisor (iterative Euclidean algorithm)
pub fn gcd(a: &RsaBigInt, b: &RsaBigInt) -> RsaBigInt {
    let mut a = a.clone();
    let mut b = b.clone();

    while !b.is_zero() {
        let remainder = &a % &b;
        a = b;
        b = remainder;
    }

    a
}

/// Modular exponentiation: base^exp mod modulus
/// Square-and-multiply, consuming the exponent from the least significant bit
pub fn mod_pow(base: &RsaBigInt, exp: &RsaBigInt, modulus: &RsaBigInt) -> RsaBigInt {
    if modulus.is_one() {
        return RsaBigInt::zero();
    }

    let mut result = RsaBigInt::one();
    let mut base = base % modulus;
    let mut exp = exp.clone();

    while !exp.is_zero() {
        if exp.is_odd() {
            result = (&result * &base) % modulus;
        }
        base = (&base * &base) % modulus;
        exp >>= 1;
    }

    result
}

/// Compute modular inverse: a^(-1) mod n, normalized into [0, n)
/// Returns None if gcd(a, n) != 1
pub fn mod_inverse(a: &RsaBigInt, n: &RsaBigInt) -> Option<RsaBigInt> {
    if n.is_zero() {
        return None;
    }

    // Extended Euclid, tracking only the coefficient of a
    let modulus = BigInt::from(n.clone());
    let mut t = BigInt::zero();
    let mut new_t = BigInt::one();
    let mut r = modulus.clone();
    let mut new_r = BigInt::from(a % n);

    while !new_r.is_zero() {
        let quotient = &r / &new_r;

        let next_t = &t - &quotient * &new_t;
        t = std::mem::replace(&mut new_t, next_t);

        let next_r = &r - &quotient * &new_r;
        r = std::mem::replace(&mut new_r, next_r);
    }

    if !r.is_one() {
        return None;
    }

    if t.is_negative() {
        t += &modulus;
    }

    t.to_biguint()
}

/// Jacobi symbol (a / b) for odd positive b, returned as -1, 0 or 1.
///
/// Applies the reciprocity rules iteratively: factors of two flip the sign
/// when b = 3 or 5 (mod 8), and swapping two odd values flips it when both
/// are 3 (mod 4).
pub fn jacobi(a: &RsaBigInt, b: &RsaBigInt) -> i8 {
    debug_assert!(b.is_odd(), "jacobi symbol requires an odd modulus");

    let mut a = a % b;
    let mut b = b.clone();
    let mut sign = 1i8;

    loop {
        if b.is_one() || a.is_one() {
            return sign;
        }
        if a.is_zero() {
            return 0;
        }

        if a.is_even() {
            a >>= 1;
            if matches!(low_bits(&b, 8), 3 | 5) {
                sign = -sign;
            }
        } else {
            if low_bits(&a, 4) == 3 && low_bits(&b, 4) == 3 {
                sign = -sign;
            }
            let remainder = &b % &a;
            b = a;
            a = remainder;
        }
    }
}

/// n mod m for a small power-of-two m
fn low_bits(n: &RsaBigInt, m: u32) -> u32 {
    (n % m).to_u32().unwrap_or(0)
}
