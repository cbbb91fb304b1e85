/**
 * Responsibility
 * - repo が上位に伝える意味の定義
 * - 呼び出し側が意味を持たせる SQLSTATE だけを分類し、残りは Db
 */
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("db error")]
    Db(#[from] sqlx::Error),
    #[error("conflict on {constraint}")]
    Conflict { constraint: String },
    #[error("missing row referenced by {constraint}")]
    MissingReference { constraint: String },
}

pub type RepoResult<T> = Result<T, RepoError>;

const UNIQUE_VIOLATION: &str = "23505";
const FOREIGN_KEY_VIOLATION: &str = "23503";

impl RepoError {
    pub fn from_sqlx(e: sqlx::Error) -> Self {
        let sqlx::Error::Database(dbe) = &e else {
            return RepoError::Db(e);
        };
        let constraint = dbe.constraint().unwrap_or_default().to_string();
        let code = dbe.code().map(|c| c.into_owned());

        match code.as_deref() {
            Some(UNIQUE_VIOLATION) => RepoError::Conflict { constraint },
            Some(FOREIGN_KEY_VIOLATION) => RepoError::MissingReference { constraint },
            _ => RepoError::Db(e),
        }
    }
}
