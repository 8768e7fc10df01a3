use std::future::Future;
use std::sync::Arc;

use crate::error::LlmError;

/// A single-turn text-completion provider.
///
/// `system` carries the output-format contract; `user` the request text.
/// Callers parse the returned text defensively and treat any error as a soft
/// failure.
pub trait LanguageModel: Send + Sync {
    fn complete(
        &self,
        system: &str,
        user: &str,
    ) -> impl Future<Output = Result<String, LlmError>> + Send;
}

impl<T: LanguageModel> LanguageModel for &T {
    fn complete(
        &self,
        system: &str,
        user: &str,
    ) -> impl Future<Output = Result<String, LlmError>> + Send {
        (**self).complete(system, user)
    }
}

impl<T: LanguageModel> LanguageModel for Arc<T> {
    fn complete(
        &self,
        system: &str,
        user: &str,
    ) -> impl Future<Output = Result<String, LlmError>> + Send {
        (**self).complete(system, user)
    }
}
