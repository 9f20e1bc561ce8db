use futures::future::join_all;
use std::future::Future;

/// Map `items` through an async resolver, returning outputs in input order.
///
/// With `concurrent` every future is started up front and the results are
/// collected by position; otherwise each one is awaited before the next
/// starts.
pub(crate) async fn map_in_order<I, F, Fut, T>(concurrent: bool, items: I, mut resolve: F) -> Vec<T>
where
    I: IntoIterator,
    F: FnMut(I::Item) -> Fut,
    Fut: Future<Output = T>,
{
    if concurrent {
        return join_all(items.into_iter().map(resolve)).await;
    }

    let mut out = Vec::new();
    for item in items {
        out.push(resolve(item).await);
    }
    out
}
