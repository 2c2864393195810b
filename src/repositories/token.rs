//! Token repository.

use std::{collections::HashMap, path::Path};
use uuid::Uuid;

use crate::{
	models::{ConfigLoader, Token},
	repositories::error::RepositoryError,
};

pub struct TokenRepository {
	pub tokens: HashMap<Uuid, Token>,
}

impl TokenRepository {
	pub fn new(path: Option<&Path>) -> Result<Self, RepositoryError> {
		let tokens: Vec<(String, Token)> = Token::load_all(path)
			.map_err(|e| RepositoryError::load_error(format!("Failed to load tokens: {}", e)))?;
		Ok(Self::from_tokens(tokens.into_iter().map(|(_, token)| token)))
	}

	pub fn from_tokens(tokens: impl IntoIterator<Item = Token>) -> Self {
		Self {
			tokens: tokens.into_iter().map(|token| (token.id, token)).collect(),
		}
	}
}

pub trait TokenRepositoryTrait: Send + Sync {
	fn get_by_id(&self, id: &Uuid) -> Option<Token>;
}

impl TokenRepositoryTrait for TokenRepository {
	fn get_by_id(&self, id: &Uuid) -> Option<Token> {
		self.tokens.get(id).cloned()
	}
}
