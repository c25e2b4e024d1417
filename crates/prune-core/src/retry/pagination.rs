use std::future::Future;
use std::time::Duration;

use crate::api::{ApiError, Page};

/// Fetch pages until one arrives without a continuation marker.
///
/// `fetch_page` receives the marker from the previous page (`None` first).
/// When `page_delay` is non-zero it is slept before every request, including
/// the first.
pub async fn collect_pages<T, F, Fut>(page_delay: Duration, mut fetch_page: F) -> Result<Vec<T>, ApiError>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<Page<T>, ApiError>>,
{
    let mut items = Vec::new();
    let mut marker = None;

    loop {
        if !page_delay.is_zero() {
            tokio::time::sleep(page_delay).await;
        }

        let page = fetch_page(marker.take()).await?;
        items.extend(page.items);

        match page.next_marker {
            Some(next) => marker = Some(next),
            None => return Ok(items),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiErrorKind;

    #[tokio::test(start_paused = true)]
    async fn test_three_pages_concatenated_in_three_calls() {
        let mut markers_seen = Vec::new();

        let items = collect_pages(Duration::ZERO, |marker| {
            markers_seen.push(marker.clone());
            async move {
                Ok(match marker.as_deref() {
                    None => Page::with_next(vec![1, 2], "p2"),
                    Some("p2") => Page::with_next(vec![3], "p3"),
                    _ => Page::last(vec![4, 5]),
                })
            }
        })
        .await
        .unwrap();

        assert_eq!(items, vec![1, 2, 3, 4, 5]);
        assert_eq!(
            markers_seen,
            vec![None, Some("p2".to_string()), Some("p3".to_string())]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_delay_applied_before_each_page() {
        let start = tokio::time::Instant::now();
        let mut calls = 0;

        let items: Vec<u8> = collect_pages(Duration::from_millis(10), |marker| {
            calls += 1;
            async move {
                Ok(if marker.is_none() {
                    Page::with_next(vec![], "next")
                } else {
                    Page::last(vec![])
                })
            }
        })
        .await
        .unwrap();

        assert!(items.is_empty());
        assert_eq!(calls, 2);
        assert_eq!(start.elapsed(), Duration::from_millis(20));
    }

    #[tokio::test(start_paused = true)]
    async fn test_error_stops_paging() {
        let mut calls = 0;

        let result: Result<Vec<u8>, ApiError> = collect_pages(Duration::ZERO, |marker| {
            calls += 1;
            async move {
                match marker {
                    None => Ok(Page::with_next(vec![1], "next")),
                    Some(_) => Err(ApiError::new(
                        "ListVersionsByFunction",
                        ApiErrorKind::AccessDenied,
                        "denied",
                    )),
                }
            }
        })
        .await;

        assert!(result.is_err());
        assert_eq!(calls, 2);
    }
}
