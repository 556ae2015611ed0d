use argon2::Argon2;
use argon2::Params;
use argon2::PasswordHash;
use argon2::PasswordHasher;
use argon2::PasswordVerifier;
use argon2::password_hash::SaltString;

fn salt() -> SaltString {
    use rand::Rng;
    let ref mut bytes = [0u8; 16];
    rand::rng().fill(bytes);
    SaltString::encode_b64(bytes).expect("salt")
}

/// Argon2id hasher with a configurable work factor.
///
/// The work factor is embedded in each PHC digest, so verification keeps
/// working for records hashed under older parameters.
pub struct Hasher {
    argon: Argon2<'static>,
}

impl Hasher {
    pub fn new(memory_kib: u32, iterations: u32, parallelism: u32) -> Self {
        let params = Params::new(memory_kib, iterations, parallelism, None).unwrap_or_default();
        Self {
            argon: Argon2::new(argon2::Algorithm::Argon2id, argon2::Version::V0x13, params),
        }
    }
    /// Reads `ARGON2_MEMORY_KIB`, `ARGON2_ITERATIONS`, `ARGON2_PARALLELISM`,
    /// falling back to the argon2 crate defaults.
    pub fn from_env() -> Self {
        let defaults = Params::default();
        let var = |key: &str, fallback: u32| {
            std::env::var(key)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(fallback)
        };
        Self::new(
            var("ARGON2_MEMORY_KIB", defaults.m_cost()),
            var("ARGON2_ITERATIONS", defaults.t_cost()),
            var("ARGON2_PARALLELISM", defaults.p_cost()),
        )
    }
    /// One-way hash with a fresh random salt. Failure here is internal and
    /// fatal to the calling operation.
    pub fn hash(&self, password: &str) -> anyhow::Result<String> {
        self.argon
            .hash_password(password.as_bytes(), &salt())
            .map(|h| h.to_string())
            .map_err(|e| anyhow::anyhow!("password hashing failed: {}", e))
    }
    /// Constant-time verification. Returns false for mismatches and for
    /// digests that do not parse; never errors.
    pub fn verify(&self, password: &str, hashword: &str) -> bool {
        PasswordHash::new(hashword)
            .ok()
            .as_ref()
            .map(|hash| self.argon.verify_password(password.as_bytes(), hash).is_ok())
            .unwrap_or(false)
    }
}
