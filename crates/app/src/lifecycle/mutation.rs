//! Confirm/validate/call/refetch lifecycle shared by every mutation.
//!
//! The sequencer owns the `submitting` flag that disables the triggering
//! control, runs the optional destructive confirmation as an explicit
//! two-step protocol, validates locally before any remote call, and
//! re-triggers the affected fetch on success. Every path returns an explicit
//! [`MutationOutcome`]; there is no implicit success.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::AppError;
use crate::navigation::{Confirmation, Prompt};

/// Explicit disposition of one mutation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationOutcome {
    /// The remote call succeeded and the re-fetch was triggered.
    Completed,
    /// The user cancelled the destructive confirmation; no side effect.
    Cancelled,
    /// A mutation from this control was already in flight; no side effect.
    Suppressed,
    /// Local validation failed; the remote call was never attempted.
    Rejected(AppError),
    /// The remote call failed; prior on-screen data is untouched.
    Failed(AppError),
}

/// A destructive-confirmation request routed through the screen's prompt.
pub struct ConfirmationRequest<'a, P> {
    pub prompt: &'a P,
    pub title: &'a str,
    pub message: &'a str,
}

/// The reusable mutation lifecycle.
///
/// One sequencer per triggering control: the `submitting` flag bounds
/// concurrent mutations from that control to one.
#[derive(Debug)]
pub struct MutationSequencer {
    submitting: AtomicBool,
}

impl MutationSequencer {
    /// Create an idle sequencer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            submitting: AtomicBool::new(false),
        }
    }

    /// Whether a mutation is in flight (the triggering control is disabled
    /// while this is true).
    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::SeqCst)
    }

    /// Run one mutation attempt.
    ///
    /// Protocol, in order:
    /// 1. optional destructive confirmation (cancel aborts, no side effect)
    /// 2. `submitting` set (a duplicate invocation is suppressed)
    /// 3. `payload` evaluated: local validation, no remote call on failure
    /// 4. `mutate` invoked with the validated payload
    /// 5. on success, `refetch` runs exactly once before `Completed` is
    ///    returned; on failure the error is carried verbatim in `Failed`
    pub async fn run<P, T, V, M, MFut, R, RFut>(
        &self,
        confirmation: Option<ConfirmationRequest<'_, P>>,
        payload: V,
        mutate: M,
        refetch: R,
    ) -> MutationOutcome
    where
        P: Prompt,
        V: FnOnce() -> Result<T, AppError>,
        M: FnOnce(T) -> MFut,
        MFut: Future<Output = Result<(), AppError>>,
        R: FnOnce() -> RFut,
        RFut: Future<Output = ()>,
    {
        if self.is_submitting() {
            return MutationOutcome::Suppressed;
        }

        if let Some(request) = confirmation {
            let choice = request.prompt.confirm(request.title, request.message).await;
            if choice == Confirmation::Cancelled {
                return MutationOutcome::Cancelled;
            }
        }

        if self.submitting.swap(true, Ordering::SeqCst) {
            // A confirmation prompt can suspend long enough for another tap
            // to slip in; the flag decides, not the entry check.
            return MutationOutcome::Suppressed;
        }

        let validated = match payload() {
            Ok(value) => value,
            Err(err) => {
                self.submitting.store(false, Ordering::SeqCst);
                return MutationOutcome::Rejected(err);
            }
        };

        let result = mutate(validated).await;
        self.submitting.store(false, Ordering::SeqCst);

        match result {
            Ok(()) => {
                refetch().await;
                MutationOutcome::Completed
            }
            Err(err) => {
                tracing::warn!(error = %err, "mutation failed");
                MutationOutcome::Failed(err)
            }
        }
    }
}

impl Default for MutationSequencer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::testing::ScriptedPrompt;
    use std::sync::atomic::AtomicUsize;

    fn sequencer() -> MutationSequencer {
        MutationSequencer::new()
    }

    #[tokio::test]
    async fn test_completed_runs_exactly_one_refetch() {
        let seq = sequencer();
        let refetches = AtomicUsize::new(0);

        let outcome = seq
            .run(
                None::<ConfirmationRequest<'_, ScriptedPrompt>>,
                || Ok(42),
                |_| async { Ok(()) },
                || async {
                    refetches.fetch_add(1, Ordering::SeqCst);
                },
            )
            .await;

        assert_eq!(outcome, MutationOutcome::Completed);
        assert_eq!(refetches.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_cancelled_confirmation_has_no_side_effect() {
        let seq = sequencer();
        let prompt = ScriptedPrompt::answering([Confirmation::Cancelled]);
        let calls = AtomicUsize::new(0);

        let outcome = seq
            .run(
                Some(ConfirmationRequest {
                    prompt: &prompt,
                    title: "Confirm deletion",
                    message: "Are you sure?",
                }),
                || Ok(()),
                |()| async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(())
                },
                || async {
                    calls.fetch_add(1, Ordering::SeqCst);
                },
            )
            .await;

        assert_eq!(outcome, MutationOutcome::Cancelled);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_validation_failure_blocks_remote_call() {
        let seq = sequencer();
        let remote_calls = AtomicUsize::new(0);

        let outcome = seq
            .run(
                None::<ConfirmationRequest<'_, ScriptedPrompt>>,
                || Err::<(), _>(AppError::Validation("Please enter a valid price.".into())),
                |()| async {
                    remote_calls.fetch_add(1, Ordering::SeqCst);
                    Ok(())
                },
                || async {},
            )
            .await;

        assert_eq!(
            outcome,
            MutationOutcome::Rejected(AppError::Validation("Please enter a valid price.".into()))
        );
        assert_eq!(remote_calls.load(Ordering::SeqCst), 0);
        assert!(!seq.is_submitting());
    }

    #[tokio::test]
    async fn test_remote_failure_skips_refetch_and_clears_flag() {
        let seq = sequencer();
        let refetches = AtomicUsize::new(0);

        let outcome = seq
            .run(
                None::<ConfirmationRequest<'_, ScriptedPrompt>>,
                || Ok(()),
                |()| async { Err(AppError::Remote("constraint violation".into())) },
                || async {
                    refetches.fetch_add(1, Ordering::SeqCst);
                },
            )
            .await;

        assert_eq!(
            outcome,
            MutationOutcome::Failed(AppError::Remote("constraint violation".into()))
        );
        assert_eq!(refetches.load(Ordering::SeqCst), 0);
        assert!(!seq.is_submitting());
    }

    #[tokio::test]
    async fn test_duplicate_invocation_is_suppressed() {
        let seq = sequencer();
        let (gate_tx, gate_rx) = tokio::sync::oneshot::channel::<()>();

        let first = seq.run(
            None::<ConfirmationRequest<'_, ScriptedPrompt>>,
            || Ok(()),
            |()| async {
                gate_rx.await.ok();
                Ok(())
            },
            || async {},
        );
        tokio::pin!(first);

        // Drive the first mutation to its in-flight await point.
        assert!(poll_once(first.as_mut()).await.is_none());
        assert!(seq.is_submitting());

        let second = seq
            .run(
                None::<ConfirmationRequest<'_, ScriptedPrompt>>,
                || Ok(()),
                |()| async { Ok(()) },
                || async {},
            )
            .await;
        assert_eq!(second, MutationOutcome::Suppressed);

        gate_tx.send(()).ok();
        assert_eq!(first.await, MutationOutcome::Completed);
        assert!(!seq.is_submitting());
    }

    /// Poll a future exactly once, returning its output if ready.
    async fn poll_once<F: Future + Unpin>(fut: F) -> Option<F::Output> {
        use std::pin::pin;
        use std::task::Poll;

        let mut fut = fut;
        std::future::poll_fn(move |cx| {
            let polled = pin!(&mut fut).poll(cx);
            Poll::Ready(match polled {
                Poll::Ready(out) => Some(out),
                Poll::Pending => None,
            })
        })
        .await
    }
}
