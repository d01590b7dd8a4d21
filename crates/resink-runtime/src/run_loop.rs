//! Single-consumer FIFO run loops on dedicated threads.
//!
//! A run loop owns one state value and executes posted tasks against it
//! strictly in arrival order, one at a time, each to completion. Mutual
//! exclusion is structural: there is exactly one consumer thread and no
//! task ever overlaps another, so loop state needs no locking.
//!
//! The dispatch path is deliberately not reentrant. No API exists for a
//! task to synchronously drain or pump the queue from inside its own
//! execution; cleanup code that needs follow-up work enqueues it through a
//! [`LoopHandle`] and lets the loop pick it up as an ordinary task. The
//! context additionally asserts on recursive dispatch, so a violation of
//! this rule fails loudly instead of corrupting lifecycle ordering.

use std::marker::PhantomData;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::Sender;
use tokio::sync::oneshot;
use tracing::warn;

/// State owned and mutated exclusively by one run loop.
pub trait LoopState: Send + 'static {}

impl<T> LoopState for T where T: Send + 'static {}

/// A task payload with a typed response.
pub trait Message: Send + 'static {
    type Response: Send + 'static;
}

/// Per-loop execution context handed to task handlers.
pub struct LoopContext<S: LoopState> {
    exit_requested: bool,
    dispatch_depth: u8,
    self_handle: Option<LoopHandle<S>>,
    _marker: PhantomData<fn() -> S>,
}

impl<S: LoopState> LoopContext<S> {
    fn new() -> Self {
        Self {
            exit_requested: false,
            dispatch_depth: 0,
            self_handle: None,
            _marker: PhantomData,
        }
    }

    /// Marks the loop for termination once the current task returns.
    ///
    /// Tasks still queued behind the current one are dropped with the
    /// queue; posters observe [`PostError::LoopClosed`] afterwards.
    pub fn request_exit(&mut self) {
        self.exit_requested = true;
    }

    pub fn is_exit_requested(&self) -> bool {
        self.exit_requested
    }

    /// Posting handle for the loop itself, for enqueueing follow-up tasks.
    pub fn loop_handle(&self) -> LoopHandle<S> {
        self.self_handle
            .as_ref()
            .expect("loop_handle is only available while a task is executing")
            .clone()
    }

    fn enter_task(&mut self, self_handle: LoopHandle<S>) {
        assert_eq!(
            self.dispatch_depth, 0,
            "run loop dispatch re-entered while a task was executing"
        );
        self.dispatch_depth += 1;
        self.self_handle = Some(self_handle);
    }

    fn leave_task(&mut self) {
        self.dispatch_depth -= 1;
        self.self_handle = None;
    }
}

/// Executes tasks of type `M` against the loop state.
pub trait Handler<M>: LoopState + Sized
where
    M: Message,
{
    fn handle(&mut self, message: M, ctx: &mut LoopContext<Self>) -> M::Response;
}

trait Envelope<S: LoopState>: Send + 'static {
    fn dispatch(self: Box<Self>, state: &mut S, ctx: &mut LoopContext<S>);
}

struct PostEnvelope<M, S>
where
    M: Message<Response = ()>,
    S: Handler<M>,
{
    message: M,
    self_handle: LoopHandle<S>,
    _marker: PhantomData<fn() -> S>,
}

impl<M, S> Envelope<S> for PostEnvelope<M, S>
where
    M: Message<Response = ()>,
    S: Handler<M>,
{
    fn dispatch(self: Box<Self>, state: &mut S, ctx: &mut LoopContext<S>) {
        ctx.enter_task(self.self_handle.clone());
        state.handle(self.message, ctx);
        ctx.leave_task();
    }
}

struct CallEnvelope<M, S>
where
    M: Message,
    S: Handler<M>,
{
    message: M,
    response_tx: oneshot::Sender<M::Response>,
    self_handle: LoopHandle<S>,
    _marker: PhantomData<fn() -> S>,
}

impl<M, S> Envelope<S> for CallEnvelope<M, S>
where
    M: Message,
    S: Handler<M>,
{
    fn dispatch(self: Box<Self>, state: &mut S, ctx: &mut LoopContext<S>) {
        ctx.enter_task(self.self_handle.clone());
        let response = state.handle(self.message, ctx);
        ctx.leave_task();
        let _ = self.response_tx.send(response);
    }
}

/// Post failed because the loop has already terminated; the task was
/// dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostError {
    LoopClosed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallError {
    /// The loop had already terminated when the call was posted.
    LoopClosed,
    /// No response arrived within the timeout budget.
    Timeout,
    /// The loop terminated after accepting the call but before responding.
    LoopExited,
}

/// Cloneable cross-thread handle for posting tasks into one run loop.
pub struct LoopHandle<S: LoopState> {
    tx: Sender<Box<dyn Envelope<S>>>,
}

impl<S: LoopState> Clone for LoopHandle<S> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<S: LoopState> LoopHandle<S> {
    /// Appends a task to the queue tail. Never blocks; callable from any
    /// thread.
    pub fn post<M>(&self, message: M) -> Result<(), PostError>
    where
        M: Message<Response = ()>,
        S: Handler<M>,
    {
        let envelope: Box<dyn Envelope<S>> = Box::new(PostEnvelope::<M, S> {
            message,
            self_handle: self.clone(),
            _marker: PhantomData,
        });
        self.tx.send(envelope).map_err(|_| PostError::LoopClosed)
    }

    /// Posts a task and blocks for its response, up to `timeout`.
    pub fn call<M>(&self, message: M, timeout: Duration) -> Result<M::Response, CallError>
    where
        M: Message,
        S: Handler<M>,
    {
        crate::block_on(self.call_async(message, timeout))
    }

    pub async fn call_async<M>(
        &self,
        message: M,
        timeout: Duration,
    ) -> Result<M::Response, CallError>
    where
        M: Message,
        S: Handler<M>,
    {
        let response_rx = self.send_call(message)?;
        match tokio::time::timeout(timeout, response_rx).await {
            Ok(Ok(response)) => Ok(response),
            Ok(Err(_)) => Err(CallError::LoopExited),
            Err(_) => Err(CallError::Timeout),
        }
    }

    fn send_call<M>(&self, message: M) -> Result<oneshot::Receiver<M::Response>, CallError>
    where
        M: Message,
        S: Handler<M>,
    {
        let (response_tx, response_rx) = oneshot::channel();
        let envelope: Box<dyn Envelope<S>> = Box::new(CallEnvelope::<M, S> {
            message,
            response_tx,
            self_handle: self.clone(),
            _marker: PhantomData,
        });
        self.tx.send(envelope).map_err(|_| CallError::LoopClosed)?;
        Ok(response_rx)
    }
}

pub fn spawn_loop<S: LoopState>(state: S) -> std::io::Result<(LoopHandle<S>, JoinHandle<()>)> {
    spawn_loop_named(state, "resink-run-loop")
}

/// Spawns a dedicated named thread running the dispatch loop over `state`.
///
/// The thread exits after a task requests exit, after a task panics, or
/// once every [`LoopHandle`] has been dropped and the queue drained.
pub fn spawn_loop_named<S: LoopState>(
    state: S,
    thread_name: impl Into<String>,
) -> std::io::Result<(LoopHandle<S>, JoinHandle<()>)> {
    let (tx, rx) = crossbeam_channel::unbounded::<Box<dyn Envelope<S>>>();
    let handle = LoopHandle { tx };
    let join = thread::Builder::new()
        .name(thread_name.into())
        .spawn(move || run_dispatch_loop(state, rx))?;
    Ok((handle, join))
}

fn run_dispatch_loop<S: LoopState>(
    mut state: S,
    rx: crossbeam_channel::Receiver<Box<dyn Envelope<S>>>,
) {
    let mut ctx = LoopContext::<S>::new();
    while let Ok(envelope) = rx.recv() {
        let result = catch_unwind(AssertUnwindSafe(|| {
            envelope.dispatch(&mut state, &mut ctx);
        }));
        if result.is_err() {
            warn!("task panicked, terminating run loop");
            break;
        }
        if ctx.is_exit_requested() {
            break;
        }
    }
}
