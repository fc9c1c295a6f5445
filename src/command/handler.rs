//! Action and completion callbacks
//!
//! Both are stored as shared, type-erased closures returning boxed futures,
//! so synchronous and asynchronous callbacks go through the same path.

use crate::command::input::ParsedInput;
use futures::future::{self, BoxFuture, FutureExt};
use std::fmt;
use std::future::Future;
use std::sync::Arc;

/// What an action hands back: `None` renders as an empty string
pub type ActionOutput = anyhow::Result<Option<String>>;

/// Type-erased action
pub type ActionFn = Arc<dyn Fn(ParsedInput) -> BoxFuture<'static, ActionOutput> + Send + Sync>;

/// Type-erased completion callback
pub type CompletionFn =
    Arc<dyn Fn(ParsedInput) -> BoxFuture<'static, anyhow::Result<Vec<String>>> + Send + Sync>;

/// Values an action may return
pub trait IntoActionOutput {
    fn into_output(self) -> ActionOutput;
}

impl IntoActionOutput for () {
    fn into_output(self) -> ActionOutput {
        Ok(None)
    }
}

impl IntoActionOutput for String {
    fn into_output(self) -> ActionOutput {
        Ok(Some(self))
    }
}

impl IntoActionOutput for &'static str {
    fn into_output(self) -> ActionOutput {
        Ok(Some(self.to_string()))
    }
}

impl IntoActionOutput for Option<String> {
    fn into_output(self) -> ActionOutput {
        Ok(self)
    }
}

impl<T: IntoActionOutput> IntoActionOutput for anyhow::Result<T> {
    fn into_output(self) -> ActionOutput {
        self.and_then(IntoActionOutput::into_output)
    }
}

/// Wrap a synchronous action
pub fn action_fn<F, R>(action: F) -> ActionFn
where
    F: Fn(&ParsedInput) -> R + Send + Sync + 'static,
    R: IntoActionOutput,
{
    Arc::new(move |input: ParsedInput| future::ready(action(&input).into_output()).boxed())
}

/// Wrap an asynchronous action
pub fn async_action_fn<F, Fut>(action: F) -> ActionFn
where
    F: Fn(ParsedInput) -> Fut + Send + Sync + 'static,
    Fut: Future + Send + 'static,
    Fut::Output: IntoActionOutput,
{
    Arc::new(move |input: ParsedInput| action(input).map(IntoActionOutput::into_output).boxed())
}

/// A completion callback bound to a parameter or option name
#[derive(Clone)]
pub struct CompletionHandler {
    name: String,
    filter: bool,
    callback: CompletionFn,
}

impl CompletionHandler {
    /// Synchronous, infallible callback
    pub fn new<F, I, S>(name: impl Into<String>, callback: F) -> Self
    where
        F: Fn(&ParsedInput) -> I + Send + Sync + 'static,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let erased: CompletionFn = Arc::new(move |input: ParsedInput| {
            let candidates: Vec<String> = callback(&input).into_iter().map(Into::into).collect();
            future::ready(Ok::<_, anyhow::Error>(candidates)).boxed()
        });

        CompletionHandler {
            name: name.into(),
            filter: false,
            callback: erased,
        }
    }

    /// Asynchronous, fallible callback
    pub fn from_async<F, Fut>(name: impl Into<String>, callback: F) -> Self
    where
        F: Fn(ParsedInput) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<Vec<String>>> + Send + 'static,
    {
        CompletionHandler {
            name: name.into(),
            filter: false,
            callback: Arc::new(move |input: ParsedInput| callback(input).boxed()),
        }
    }

    /// Drop candidates that do not extend what has been typed
    pub fn filtered(mut self) -> Self {
        self.filter = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn filters_prefix(&self) -> bool {
        self.filter
    }

    pub async fn call(&self, input: ParsedInput) -> anyhow::Result<Vec<String>> {
        (self.callback)(input).await
    }
}

impl fmt::Debug for CompletionHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompletionHandler")
            .field("name", &self.name)
            .field("filter", &self.filter)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;

    #[test]
    fn test_action_outputs() {
        let unit = action_fn(|_| ());
        assert_eq!(block_on(unit(ParsedInput::new())).unwrap(), None);

        let text = action_fn(|_| "done");
        assert_eq!(
            block_on(text(ParsedInput::new())).unwrap(),
            Some("done".to_string())
        );

        let failing = action_fn(|_| -> anyhow::Result<String> { Err(anyhow::anyhow!("boom")) });
        assert!(block_on(failing(ParsedInput::new())).is_err());
    }

    #[test]
    fn test_async_action() {
        let action = async_action_fn(|input: ParsedInput| async move {
            input.value("name").map(str::to_string)
        });
        assert_eq!(block_on(action(ParsedInput::new())).unwrap(), None);
    }

    #[test]
    fn test_completion_handler() {
        let handler = CompletionHandler::new("name", |_| vec!["foo", "bar"]).filtered();
        assert_eq!(handler.name(), "name");
        assert!(handler.filters_prefix());
        assert_eq!(
            block_on(handler.call(ParsedInput::new())).unwrap(),
            vec!["foo".to_string(), "bar".to_string()]
        );
    }

    #[test]
    fn test_async_completion_handler() {
        let handler = CompletionHandler::from_async("name", |_| async {
            Err(anyhow::anyhow!("unavailable"))
        });
        assert!(!handler.filters_prefix());
        assert!(block_on(handler.call(ParsedInput::new())).is_err());
    }
}
