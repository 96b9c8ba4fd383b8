use thiserror::Error;

use crate::catalog::CatalogError;
use crate::model::{ParseIdError, ProgressRecordError, QuestionError};

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    ProgressRecord(#[from] ProgressRecordError),
    #[error(transparent)]
    ParseId(#[from] ParseIdError),
}
