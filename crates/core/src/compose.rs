//! Right-to-left function composition.
//!
//! Two flavours live here. [`compose!`](crate::compose!) composes statically typed
//! functions whose types differ from stage to stage. [`compose`] and
//! [`compose_async`] build pipelines over [`ExtractedValue`] from [`Stage`]s
//! that may be assembled at runtime, including stages referenced by name.
//!
//! In every form the last stage is applied first: `compose(f, g)(x) == f(g(x))`.
//! Pipelines check each stage only when it is about to run, so a misconfigured
//! stage fails the call that reaches it and nothing earlier.
//!
//! # Example
//!
//! ```rust
//! use quill_core::compose::{Stage, compose};
//! use quill_core::sanitize::{parse_integer, sanitize_numeric_string};
//! use quill_core::ExtractedValue;
//!
//! let number = compose([Stage::func(parse_integer), Stage::func(sanitize_numeric_string)]);
//! let views = number.apply(ExtractedValue::from("1,024 views")).unwrap();
//! assert_eq!(views, ExtractedValue::Integer(1024));
//! ```

use std::fmt;
use std::future::Future;
use std::rc::Rc;
use std::sync::Arc;

use futures::FutureExt;
use futures::future::{BoxFuture, LocalBoxFuture};

use crate::sanitize;
use crate::value::ExtractedValue;
use crate::{QuillError, Result};

/// Composes functions right to left: `compose!(f, g, h)(x) == f(g(h(x)))`.
///
/// `compose!()` is the identity.
///
/// ```rust
/// use quill_core::compose;
///
/// let shout = compose!(|s: String| s + "!", |s: &str| s.to_uppercase());
/// assert_eq!(shout("hi"), "HI!");
/// ```
#[macro_export]
macro_rules! compose {
    () => {
        |x| x
    };
    ($f:expr $(,)?) => {
        $f
    };
    ($f:expr, $($rest:expr),+ $(,)?) => {{
        let outer = $f;
        let inner = $crate::compose!($($rest),+);
        move |x| outer(inner(x))
    }};
}

/// A synchronous stage function.
pub type StageFn = Arc<dyn Fn(ExtractedValue) -> ExtractedValue + Send + Sync>;

/// An asynchronous stage function.
pub type DeferredFn = Arc<dyn Fn(ExtractedValue) -> BoxFuture<'static, Result<ExtractedValue>> + Send + Sync>;

/// One entry of a synchronous pipeline.
#[derive(Clone)]
pub enum Stage {
    Func(StageFn),
    /// Nested stages, flattened into the enclosing pipeline.
    Group(Vec<Stage>),
    /// A sanitizer referenced by name, see [`sanitize::by_name`].
    Named(String),
}

impl Stage {
    pub fn func<F>(f: F) -> Self
    where
        F: Fn(ExtractedValue) -> ExtractedValue + Send + Sync + 'static,
    {
        Stage::Func(Arc::new(f))
    }

    pub fn named(name: impl Into<String>) -> Self {
        Stage::Named(name.into())
    }

    pub fn group(stages: impl IntoIterator<Item = Stage>) -> Self {
        Stage::Group(stages.into_iter().collect())
    }
}

impl fmt::Debug for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Func(_) => f.write_str("Func(..)"),
            Stage::Group(stages) => f.debug_tuple("Group").field(stages).finish(),
            Stage::Named(name) => f.debug_tuple("Named").field(name).finish(),
        }
    }
}

#[derive(Clone)]
enum Step {
    Func(StageFn),
    Named(String),
}

impl Step {
    fn call(&self, position: usize, input: ExtractedValue) -> Result<ExtractedValue> {
        match self {
            Step::Func(f) => Ok(f(input)),
            Step::Named(name) => match sanitize::by_name(name) {
                Some(sanitizer) => Ok(sanitizer(input)),
                None => Err(QuillError::TypeConfiguration { position, stage: name.clone() }),
            },
        }
    }
}

fn flatten_into(stage: Stage, out: &mut Vec<Step>) {
    match stage {
        Stage::Func(f) => out.push(Step::Func(f)),
        Stage::Named(name) => out.push(Step::Named(name)),
        Stage::Group(stages) => stages.into_iter().for_each(|s| flatten_into(s, out)),
    }
}

/// A synchronous pipeline built by [`compose`].
#[derive(Clone, Default)]
pub struct Pipeline {
    steps: Vec<Step>,
}

impl Pipeline {
    /// Runs the stages from last to first.
    ///
    /// # Errors
    ///
    /// Returns [`QuillError::TypeConfiguration`] when a stage that is not
    /// callable is reached. Stages after it in execution order do not run.
    pub fn apply(&self, input: ExtractedValue) -> Result<ExtractedValue> {
        self.steps
            .iter()
            .enumerate()
            .rev()
            .try_fold(input, |acc, (position, step)| step.call(position, acc))
    }

    /// Number of stages after flattening.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline").field("stages", &self.steps.len()).finish()
    }
}

/// Composes stages right to left into a [`Pipeline`].
///
/// Groups are flattened. Nothing is validated here; see [`Pipeline::apply`].
pub fn compose(stages: impl IntoIterator<Item = Stage>) -> Pipeline {
    let mut steps = Vec::new();
    stages.into_iter().for_each(|s| flatten_into(s, &mut steps));
    Pipeline { steps }
}

/// One entry of an asynchronous pipeline.
#[derive(Clone)]
pub enum AsyncStage {
    Ready(Stage),
    Deferred(DeferredFn),
    Group(Vec<AsyncStage>),
}

impl AsyncStage {
    /// Wraps an async function as a stage.
    pub fn deferred<F, Fut>(f: F) -> Self
    where
        F: Fn(ExtractedValue) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<ExtractedValue>> + Send + 'static,
    {
        AsyncStage::Deferred(Arc::new(move |value| f(value).boxed()))
    }
}

impl From<Stage> for AsyncStage {
    fn from(stage: Stage) -> Self {
        AsyncStage::Ready(stage)
    }
}

#[derive(Clone)]
enum AsyncStep {
    Ready(Step),
    Deferred(DeferredFn),
}

fn flatten_async_into(stage: AsyncStage, out: &mut Vec<AsyncStep>) {
    match stage {
        AsyncStage::Ready(stage) => {
            let mut steps = Vec::new();
            flatten_into(stage, &mut steps);
            out.extend(steps.into_iter().map(AsyncStep::Ready));
        }
        AsyncStage::Deferred(f) => out.push(AsyncStep::Deferred(f)),
        AsyncStage::Group(stages) => stages.into_iter().for_each(|s| flatten_async_into(s, out)),
    }
}

/// An asynchronous pipeline built by [`compose_async`].
#[derive(Clone, Default)]
pub struct AsyncPipeline {
    steps: Vec<AsyncStep>,
}

impl AsyncPipeline {
    /// Runs the stages from last to first, awaiting each before the next starts.
    pub async fn apply(&self, input: ExtractedValue) -> Result<ExtractedValue> {
        let mut acc = input;
        for (position, step) in self.steps.iter().enumerate().rev() {
            acc = match step {
                AsyncStep::Ready(step) => step.call(position, acc)?,
                AsyncStep::Deferred(f) => f(acc).await?,
            };
        }
        Ok(acc)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Composes sync and async stages right to left into an [`AsyncPipeline`].
pub fn compose_async(stages: impl IntoIterator<Item = AsyncStage>) -> AsyncPipeline {
    let mut steps = Vec::new();
    stages.into_iter().for_each(|s| flatten_async_into(s, &mut steps));
    AsyncPipeline { steps }
}

/// Typed two-stage async composition: `x -> f(g(x).await?).await`.
///
/// The returned future is not required to be `Send`, so stages may hold a
/// parsed [`crate::Document`] across await points.
pub fn compose_async_fn<'s, A, B, C, F, G, FutF, FutG>(f: F, g: G) -> impl Fn(A) -> LocalBoxFuture<'s, Result<C>>
where
    F: Fn(B) -> FutF + 's,
    G: Fn(A) -> FutG + 's,
    FutF: Future<Output = Result<C>> + 's,
    FutG: Future<Output = Result<B>> + 's,
    A: 's,
    B: 's,
    C: 's,
{
    let f = Rc::new(f);
    move |input| {
        let f = Rc::clone(&f);
        let pending = g(input);
        async move {
            let intermediate = pending.await?;
            f(intermediate).await
        }
        .boxed_local()
    }
}
