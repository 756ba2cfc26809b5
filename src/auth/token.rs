//! Grant results and the Bearer credential composed from them.

// self
use crate::_prelude::*;

/// Outcome of a successful grant call: the token value, its scheme, and its
/// lifetime in seconds, each optional exactly as token endpoints leave them.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct TokenGrant {
	/// Access token value, if the endpoint issued one.
	pub access_token: Option<String>,
	/// Token scheme reported by the endpoint (`bearer` is the only supported one).
	pub token_type: Option<String>,
	/// Lifetime of the token in seconds, if reported.
	pub expires_in: Option<u64>,
}
impl TokenGrant {
	/// Builds a grant carrying only an access token.
	pub fn bearer(access_token: impl Into<String>) -> Self {
		Self {
			access_token: Some(access_token.into()),
			token_type: Some("Bearer".into()),
			expires_in: None,
		}
	}

	/// Sets the reported lifetime in seconds.
	pub fn with_expires_in(mut self, secs: u64) -> Self {
		self.expires_in = Some(secs);

		self
	}

	/// Lifetime as a [`Duration`], when reported.
	pub fn lifetime(&self) -> Option<Duration> {
		self.expires_in.map(|secs| Duration::seconds(secs.min(i64::MAX as u64) as i64))
	}
}
impl Debug for TokenGrant {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TokenGrant")
			.field("access_token", &self.access_token.as_ref().map(|_| "<redacted>"))
			.field("token_type", &self.token_type)
			.field("expires_in", &self.expires_in)
			.finish()
	}
}

/// Validated `Authorization` header value of the form `Bearer <token>`.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerCredential(String);
impl BearerCredential {
	/// Composes a credential from a raw token value.
	pub fn new(token: impl AsRef<str>) -> Self {
		Self(format!("Bearer {}", token.as_ref()))
	}

	/// Wraps an already composed authorization value without recomposing it.
	///
	/// Used by stores, which persist the full header value rather than the
	/// bare token.
	pub fn from_authorization(authorization: impl Into<String>) -> Self {
		Self(authorization.into())
	}

	/// Validates a grant result and composes the credential from it.
	///
	/// Fails with [`Error::MissingToken`] when no access token is present and
	/// with [`Error::UnsupportedTokenType`] when the reported scheme is not
	/// case-insensitively `bearer`. An absent scheme is accepted.
	pub fn try_from_grant(grant: &TokenGrant) -> Result<Self> {
		let token = grant.access_token.as_deref().ok_or(Error::MissingToken)?;

		if let Some(token_type) = grant.token_type.as_deref()
			&& !token_type.eq_ignore_ascii_case("bearer")
		{
			return Err(Error::UnsupportedTokenType { token_type: token_type.to_owned() });
		}

		Ok(Self::new(token))
	}

	/// The full header value, scheme included.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}
impl Debug for BearerCredential {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("BearerCredential(<redacted>)")
	}
}
impl From<BearerCredential> for String {
	fn from(credential: BearerCredential) -> Self {
		credential.0
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn credential_composes_bearer_prefix() {
		let grant = TokenGrant::bearer("abc123");
		let credential =
			BearerCredential::try_from_grant(&grant).expect("Bearer grant should compose.");

		assert_eq!(credential.as_str(), "Bearer abc123");
	}

	#[test]
	fn scheme_check_is_case_insensitive_and_optional() {
		for token_type in [None, Some("bearer"), Some("Bearer"), Some("BEARER")] {
			let grant = TokenGrant {
				access_token: Some("abc".into()),
				token_type: token_type.map(Into::into),
				expires_in: None,
			};

			assert!(BearerCredential::try_from_grant(&grant).is_ok());
		}
	}

	#[test]
	fn non_bearer_scheme_is_rejected() {
		let grant = TokenGrant {
			access_token: Some("abc".into()),
			token_type: Some("mac".into()),
			expires_in: None,
		};
		let err = BearerCredential::try_from_grant(&grant)
			.expect_err("MAC scheme should be rejected.");

		assert!(matches!(err, Error::UnsupportedTokenType { token_type } if token_type == "mac"));
	}

	#[test]
	fn missing_access_token_is_rejected() {
		let grant = TokenGrant { token_type: Some("bearer".into()), ..Default::default() };

		assert!(matches!(
			BearerCredential::try_from_grant(&grant),
			Err(Error::MissingToken),
		));
	}

	#[test]
	fn debug_redacts_secrets() {
		let grant = TokenGrant::bearer("secret");

		assert!(!format!("{grant:?}").contains("secret"));
		assert!(!format!("{:?}", BearerCredential::new("secret")).contains("secret"));
	}
}
