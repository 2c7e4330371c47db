// RSA Key Generation
// Key material for a two-prime RSA pair and the generation procedure

use num_traits::Zero;
use rand::Rng;
use tracing::info;

use super::bigint::{mod_inverse, RsaBigInt};
use super::error::{KeyComponent, RsaError, RsaResult};
use super::prime::PrimeGenerator;

/// Bit length of each of the primes p and q
pub const PRIME_BITLENGTH: u64 = 128;

/// Bit length of the prime public exponent e
pub const PUBLIC_EXPONENT_BITLENGTH: u64 = 16;

/// RSA Public Key
#[derive(Debug, Clone, PartialEq)]
pub struct RsaPublicKey {
    pub n: RsaBigInt, // Modulus
    pub e: RsaBigInt, // Public exponent
}

/// RSA Private Key
#[derive(Debug, Clone, PartialEq)]
pub struct RsaPrivateKey {
    pub n: RsaBigInt, // Modulus (same as public)
    pub d: RsaBigInt, // Private exponent
}

impl RsaPublicKey {
    /// Get the bit length of the modulus
    pub fn bit_length(&self) -> u64 {
        self.n.bits()
    }

    /// Encrypt a payload in `chunk_size`-byte chunks
    pub fn encrypt(&self, plaintext: &[u8], chunk_size: usize) -> RsaResult<Vec<u8>> {
        super::encrypt::encrypt_bytes(plaintext, chunk_size, self)
    }
}

impl RsaPrivateKey {
    /// Get the bit length of the modulus
    pub fn bit_length(&self) -> u64 {
        self.n.bits()
    }

    /// Decrypt a chunked ciphertext stream
    pub fn decrypt(&self, ciphertext: &[u8]) -> RsaResult<Vec<u8>> {
        super::decrypt::decrypt_bytes(ciphertext, self)
    }
}

/// Every field of an RSA key pair, any of which may be unset.
///
/// Key generation fills all of them at once. Loading a key file fills only
/// n and one exponent, and nothing checks that loaded fields belong together.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeyMaterial {
    pub p: Option<RsaBigInt>,
    pub q: Option<RsaBigInt>,
    pub n: Option<RsaBigInt>,
    pub phi: Option<RsaBigInt>,
    pub e: Option<RsaBigInt>,
    pub d: Option<RsaBigInt>,
}

impl KeyMaterial {
    /// Derive n, φ and d from explicit primes and public exponent.
    /// Returns None if e divides φ or is otherwise not invertible mod φ.
    pub fn from_primes(p: RsaBigInt, q: RsaBigInt, e: RsaBigInt) -> Option<Self> {
        let n = &p * &q;
        let phi = totient(&n, &p, &q);

        if (&phi % &e).is_zero() {
            return None;
        }
        let d = mod_inverse(&e, &phi)?;

        Some(Self {
            p: Some(p),
            q: Some(q),
            n: Some(n),
            phi: Some(phi),
            e: Some(e),
            d: Some(d),
        })
    }

    pub fn modulus(&self) -> RsaResult<&RsaBigInt> {
        self.n
            .as_ref()
            .ok_or(RsaError::MissingKeyComponent(KeyComponent::Modulus))
    }

    pub fn public_exponent(&self) -> RsaResult<&RsaBigInt> {
        self.e
            .as_ref()
            .ok_or(RsaError::MissingKeyComponent(KeyComponent::PublicExponent))
    }

    pub fn private_exponent(&self) -> RsaResult<&RsaBigInt> {
        self.d
            .as_ref()
            .ok_or(RsaError::MissingKeyComponent(KeyComponent::PrivateExponent))
    }

    /// (n, e) view; the exponent is checked before the modulus
    pub fn public_key(&self) -> RsaResult<RsaPublicKey> {
        let e = self.public_exponent()?.clone();
        let n = self.modulus()?.clone();
        Ok(RsaPublicKey { n, e })
    }

    /// (n, d) view; the exponent is checked before the modulus
    pub fn private_key(&self) -> RsaResult<RsaPrivateKey> {
        let d = self.private_exponent()?.clone();
        let n = self.modulus()?.clone();
        Ok(RsaPrivateKey { n, d })
    }
}

/// φ(n) = n - (p + q) + 1, the closed form of (p - 1)(q - 1)
fn totient(n: &RsaBigInt, p: &RsaBigInt, q: &RsaBigInt) -> RsaBigInt {
    (n + 1u8) - (p + q)
}

/// Generate a complete key pair from fresh 128-bit primes
///
/// Nothing is returned until every field is computed, so a failure never
/// yields partially populated key material.
pub fn generate_key_material<R: Rng>(primes: &mut PrimeGenerator<R>) -> RsaResult<KeyMaterial> {
    // Step 1: Generate two random primes p and q
    let p = primes.get_prime(PRIME_BITLENGTH)?;
    let q = primes.get_prime(PRIME_BITLENGTH)?;

    // Step 2: Compute n = p * q and φ(n)
    let n = &p * &q;
    let phi = totient(&n, &p, &q);

    // Step 3: Draw prime exponents until one does not divide φ(n),
    // then invert it to get d
    let (e, d) = loop {
        let e = primes.get_prime(PUBLIC_EXPONENT_BITLENGTH)?;
        if (&phi % &e).is_zero() {
            continue;
        }
        if let Some(d) = mod_inverse(&e, &phi) {
            break (e, d);
        }
    };

    info!(modulus_bits = n.bits(), public_exponent = %e, "generated RSA key pair");

    Ok(KeyMaterial {
        p: Some(p),
        q: Some(q),
        n: Some(n),
        phi: Some(phi),
        e: Some(e),
        d: Some(d),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rsa::bigint::{from_u64, gcd};
    use crate::rsa::prime::{DEFAULT_MAX_PRIME_CANDIDATES, DEFAULT_PRIMALITY_ROUNDS};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn generator(seed: u64) -> PrimeGenerator<StdRng> {
        PrimeGenerator::new(
            StdRng::seed_from_u64(seed),
            DEFAULT_PRIMALITY_ROUNDS,
            DEFAULT_MAX_PRIME_CANDIDATES,
        )
    }

    #[test]
    fn test_textbook_key() {
        let keys = KeyMaterial::from_primes(from_u64(61), from_u64(53), from_u64(17)).unwrap();
        assert_eq!(keys.n, Some(from_u64(3233)));
        assert_eq!(keys.phi, Some(from_u64(3120)));
        assert_eq!(keys.d, Some(from_u64(2753)));
    }

    #[test]
    fn test_exponent_dividing_totient_rejected() {
        // φ = 3120 = 2^4 * 3 * 5 * 13
        assert!(KeyMaterial::from_primes(from_u64(61), from_u64(53), from_u64(13)).is_none());
        assert!(KeyMaterial::from_primes(from_u64(61), from_u64(53), from_u64(3)).is_none());
    }

    #[test]
    fn test_key_generation() {
        let keys = generate_key_material(&mut generator(1)).unwrap();

        let p = keys.p.clone().unwrap();
        let q = keys.q.clone().unwrap();
        assert_eq!(p.bits(), PRIME_BITLENGTH);
        assert_eq!(q.bits(), PRIME_BITLENGTH);
        assert_eq!(keys.e.as_ref().unwrap().bits(), PUBLIC_EXPONENT_BITLENGTH);

        // Verify n = p * q
        assert_eq!(keys.n.clone().unwrap(), &p * &q);
    }

    #[test]
    fn test_key_properties() {
        let mut primes = generator(2);
        for _ in 0..2 {
            let keys = generate_key_material(&mut primes).unwrap();
            let p = keys.p.unwrap();
            let q = keys.q.unwrap();
            let phi = keys.phi.unwrap();
            let e = keys.e.unwrap();
            let d = keys.d.unwrap();

            // φ(n) closed form equals (p-1)(q-1)
            assert_eq!(phi, (&p - 1u8) * (&q - 1u8));

            // Verify e * d ≡ 1 (mod φ(n))
            assert_eq!(gcd(&e, &phi), from_u64(1));
            assert_eq!((&e * &d) % &phi, from_u64(1));
        }
    }

    #[test]
    fn test_generation_timeout_propagates() {
        let mut primes = PrimeGenerator::new(StdRng::seed_from_u64(5), 10, 0);
        assert!(matches!(
            generate_key_material(&mut primes),
            Err(RsaError::PrimeGenerationTimeout { .. })
        ));
    }

    #[test]
    fn test_partial_key_views() {
        let keys = KeyMaterial {
            n: Some(from_u64(3233)),
            d: Some(from_u64(2753)),
            ..Default::default()
        };

        assert_eq!(
            keys.public_key(),
            Err(RsaError::MissingKeyComponent(KeyComponent::PublicExponent))
        );
        let private = keys.private_key().unwrap();
        assert_eq!(private.n, from_u64(3233));
        assert_eq!(private.bit_length(), 12);

        let keys = KeyMaterial {
            e: Some(from_u64(17)),
            ..Default::default()
        };
        assert_eq!(
            keys.public_key(),
            Err(RsaError::MissingKeyComponent(KeyComponent::Modulus))
        );
    }
}
