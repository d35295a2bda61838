pub mod error;
pub mod normalize;
pub mod raw;
pub mod request;

pub use error::{CoverageError, Result};
pub use normalize::{normalize, NormalizedResultRow, ResultNormalizer};
pub use raw::{RawOrganicResult, RawResultPage};
pub use request::{
    Recency, RecencyFilter, RelativeRange, RequestBuilder, SafeSearch, SearchOptions,
    SearchRequest,
};
