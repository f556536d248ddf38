use core::fmt;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::middleware::ctx::Ctx;
use crate::middleware::error::{AppError, CtxResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QryOrder {
    DESC,
    ASC,
}

impl Display for QryOrder {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            QryOrder::DESC => f.write_str("DESC"),
            QryOrder::ASC => f.write_str("ASC"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Pagination {
    pub order_dir: Option<QryOrder>,
    pub count: u16,
    pub start: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            order_dir: None,
            count: 100,
            start: 0,
        }
    }
}

pub fn with_not_found_err<T>(opt: Option<T>, ctx: &Ctx, ident: &str) -> CtxResult<T> {
    match opt {
        None => Err(ctx.to_ctx_error(AppError::EntityFailIdNotFound {
            ident: ident.to_string(),
        })),
        Some(res) => Ok(res),
    }
}
