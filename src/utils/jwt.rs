use chrono::{TimeDelta, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::middleware::error::{AppError, AppResult};

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
pub enum TokenType {
    Login,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub auth: String,
    pub exp: usize,
    pub iat: usize,
    pub r#type: TokenType,
}

pub struct JWT {
    key_enc: EncodingKey,
    key_dec: DecodingKey,
    duration: TimeDelta,
}

impl JWT {
    pub fn new(secret: String, duration: TimeDelta) -> Self {
        Self {
            duration,
            key_enc: EncodingKey::from_secret(secret.as_ref()),
            key_dec: DecodingKey::from_secret(secret.as_ref()),
        }
    }

    /// `user_id` is the raw record key of the user, without the table prefix.
    pub fn create_by_login(&self, user_id: &str) -> AppResult<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            auth: user_id.to_string(),
            exp: (now + self.duration).timestamp() as usize,
            iat: now.timestamp() as usize,
            r#type: TokenType::Login,
        };

        Ok(encode(&Header::default(), &claims, &self.key_enc)?)
    }

    pub fn decode_by_type(&self, token: &str, r#type: TokenType) -> AppResult<Claims> {
        let data = decode::<Claims>(token, &self.key_dec, &Validation::new(Algorithm::HS256))?
            .claims;

        if data.r#type == r#type {
            Ok(data)
        } else {
            Err(AppError::AuthFailJwtInvalid {
                source: "Token type is not equal".to_string(),
            })
        }
    }
}
