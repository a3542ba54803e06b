use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{
        Error as PasswordHashError, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
        rand_core::OsRng,
    },
};

use crate::domain::error::DomainError;

/// Argon2id hashing with fixed parameters (19 MiB, 2 passes, 1 lane).
#[derive(Debug, Clone, Default)]
pub(crate) struct PasswordService;

impl PasswordService {
    /// Verified against unknown emails so a miss costs the same as a hit.
    const DUMMY_PASSWORD_HASH: &'static str = "$argon2id$v=19$m=19456,t=2,p=1$MDEyMzQ1Njc4OWFiY2RlZg$gwN6hT1sNdk9kI95f7n2Gl3fL0qRmBf2Ffkj2r90/0M";

    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) fn hash_password(&self, raw_password: &str) -> Result<String, DomainError> {
        let salt = SaltString::generate(&mut OsRng);
        let password_hash = Self::argon2()?
            .hash_password(raw_password.as_bytes(), &salt)
            .map_err(|err| DomainError::Unexpected(err.to_string()))?;
        Ok(password_hash.to_string())
    }

    pub(crate) fn verify_password(
        &self,
        raw_password: &str,
        password_hash: &str,
    ) -> Result<(), DomainError> {
        let parsed_hash = PasswordHash::new(password_hash)
            .map_err(|err| DomainError::Unexpected(err.to_string()))?;
        Self::argon2()?
            .verify_password(raw_password.as_bytes(), &parsed_hash)
            .map_err(|err| match err {
                PasswordHashError::Password => DomainError::InvalidCredentials,
                _ => DomainError::Unexpected(err.to_string()),
            })
    }

    /// Burns one verification and always reports bad credentials.
    pub(crate) fn reject_unknown_user(&self, raw_password: &str) -> DomainError {
        let _ = self.verify_password(raw_password, Self::DUMMY_PASSWORD_HASH);
        DomainError::InvalidCredentials
    }

    fn argon2() -> Result<Argon2<'static>, DomainError> {
        let params = Params::new(19 * 1024, 2, 1, None)
            .map_err(|err| DomainError::Unexpected(err.to_string()))?;
        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }
}

#[cfg(test)]
mod tests {
    use super::PasswordService;
    use crate::domain::error::DomainError;

    #[test]
    fn hash_then_verify_accepts_only_the_hashed_password() {
        let service = PasswordService::new();
        let hash = service
            .hash_password("Secret12!")
            .expect("hash must be created");

        assert!(hash.starts_with("$argon2id$"));
        service
            .verify_password("Secret12!", &hash)
            .expect("correct password must verify");

        let err = service
            .verify_password("Secret12?", &hash)
            .expect_err("wrong password must fail");
        assert!(matches!(err, DomainError::InvalidCredentials));
    }

    #[test]
    fn unknown_user_rejection_is_invalid_credentials() {
        let service = PasswordService::new();
        assert!(matches!(
            service.reject_unknown_user("whatever"),
            DomainError::InvalidCredentials
        ));
    }
}
