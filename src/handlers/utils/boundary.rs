use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use futures::FutureExt;
use crate::handlers::HandlerResult;

/// Runs the handling of an update so that neither an error nor a panic escapes it.
/// Both are logged and the dispatcher goes on with the next update.
pub async fn contained<F>(context: &str, handling: F) -> HandlerResult
where
    F: Future<Output = HandlerResult>
{
    match AssertUnwindSafe(handling).catch_unwind().await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => log::error!("{context} failed, the update is skipped: {e}"),
        Err(panic) => log::error!("{context} panicked, the update is skipped: {}", panic_message(panic.as_ref())),
    }
    Ok(())
}

fn panic_message(panic: &(dyn Any + Send)) -> &str {
    panic.downcast_ref::<&str>()
        .copied()
        .or_else(|| panic.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("<non-string payload>")
}

#[cfg(test)]
mod tests {
    use super::contained;

    #[tokio::test]
    async fn test_ok() {
        let result = contained("test", async { Ok(()) }).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_error_is_swallowed() {
        let result = contained("test", async { Err("Bad Request: chat not found".into()) }).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_panic_is_swallowed() {
        let result = contained("test", async {
            let answer: Option<&str> = None;
            log::debug!("{}", answer.expect("unexpected state"));
            Ok(())
        }).await;
        assert!(result.is_ok());
    }
}
