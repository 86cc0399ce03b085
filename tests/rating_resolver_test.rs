//! Rating dispatch tests
//!
//! Every site index must land on exactly one strategy, and only fetching
//! strategies may touch the network.

mod utils;

use sauce_lens::modules::search::domain::{RatingStrategy, RatingStrategyTable};
use sauce_lens::{RatingPolicy, RatingResolver, SiteIndex, SourceRating, SourceResult};
use std::time::Duration;
use utils::fakes::MockFetcher;

const POLICY: RatingPolicy = RatingPolicy {
    treat_unknown_as_questionable: false,
    prevent_explicit_results: false,
};

fn result_for(index: SiteIndex) -> SourceResult {
    SourceResult::new(
        vec![format!("https://source.example/{}", index.id())],
        index,
        75.0,
        String::new(),
    )
    .unwrap()
}

#[tokio::test]
async fn test_dispatch_is_total_and_fetches_only_when_needed() {
    let table = RatingStrategyTable::standard().unwrap();
    let resolver = RatingResolver::new(Duration::from_secs(1)).unwrap();

    for index in SiteIndex::ALL {
        let strategy = table.strategy_for(index);
        let expected_fetches = if strategy.needs_fetch() { 1 } else { 0 };

        let mut fetcher = MockFetcher::new();
        fetcher
            .expect_get_text()
            .times(expected_fetches)
            .returning(|_| Ok(String::new()));

        let rating = resolver.rate(&result_for(index), &fetcher).await;

        match strategy {
            RatingStrategy::Unrated => assert_eq!(rating, SourceRating::Unknown),
            RatingStrategy::Fixed(fixed) => assert_eq!(rating, fixed),
            RatingStrategy::Fetch(_) => {}
        }
        fetcher.checkpoint();
    }
}

#[tokio::test]
async fn test_unrecognized_indexes_are_unknown_without_fetch() {
    let resolver = RatingResolver::new(Duration::from_secs(1)).unwrap();

    for id in [1, 4, 7, 43, 999, 12345] {
        let mut fetcher = MockFetcher::new();
        fetcher.expect_get_text().times(0);

        let index = SiteIndex::from(id);
        assert_eq!(index, SiteIndex::Other(id));
        assert_eq!(resolver.rate(&result_for(index), &fetcher).await, SourceRating::Unknown);
    }
}

#[tokio::test]
async fn test_site_families() {
    let cases: Vec<(SiteIndex, &str, SourceRating)> = vec![
        (
            SiteIndex::DoujinshiDb,
            "<tr><td><b>Adult:</b></td><td>Yes</td></tr>",
            SourceRating::Nsfw,
        ),
        (
            SiteIndex::DoujinshiDb,
            "<tr><td><b>Adult:</b></td><td>No</td></tr>",
            SourceRating::Safe,
        ),
        (SiteIndex::DoujinshiDb, "<p>moved</p>", SourceRating::Unknown),
        (
            SiteIndex::PixivArchive,
            r#"<div class="introduction-modal"><p class="title">R-18</p></div>"#,
            SourceRating::Nsfw,
        ),
        (SiteIndex::Pixiv, "<main>artwork</main>", SourceRating::Safe),
        (
            SiteIndex::SankakuChannel,
            "<li>Rating: Questionable</li>",
            SourceRating::Questionable,
        ),
        (SiteIndex::IdolComplex, "<li>Rating: Safe</li>", SourceRating::Safe),
        (SiteIndex::Gelbooru, "<li>Source: x</li>", SourceRating::Unknown),
        (
            SiteIndex::Konachan,
            r#"<li>Rating: Explicit <span class="vote-desc"></span></li>"#,
            SourceRating::Nsfw,
        ),
        (
            SiteIndex::E621,
            r#"<li>Rating: <span class="post-rating-text-safe">Safe</span></li>"#,
            SourceRating::Safe,
        ),
        (
            SiteIndex::DeviantArt,
            "<h1>Mature Content</h1>",
            SourceRating::Nsfw,
        ),
        (SiteIndex::DeviantArt, "<h1>Sunset</h1>", SourceRating::Safe),
    ];

    let resolver = RatingResolver::new(Duration::from_secs(1)).unwrap();
    for (index, page, expected) in cases {
        let mut fetcher = MockFetcher::new();
        let page = page.to_string();
        fetcher
            .expect_get_text()
            .times(1)
            .returning(move |_| Ok(page.clone()));

        assert_eq!(
            resolver.rate(&result_for(index), &fetcher).await,
            expected,
            "{:?}",
            index
        );
    }
}

#[tokio::test]
async fn test_slow_source_times_out_to_unknown() {
    struct SlowFetcher;

    #[async_trait::async_trait]
    impl sauce_lens::HttpFetcher for SlowFetcher {
        async fn get_text(&self, _url: &str) -> Result<String, sauce_lens::ApiError> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok("<li>Rating: Safe</li>".to_string())
        }

        async fn post_form(
            &self,
            _url: &str,
            _fields: Vec<(String, String)>,
        ) -> Result<sauce_lens::FetchResponse, sauce_lens::ApiError> {
            Err(sauce_lens::ApiError::Connection)
        }
    }

    let resolver = RatingResolver::new(Duration::from_millis(20)).unwrap();
    let resolved = resolver
        .resolve(result_for(SiteIndex::Danbooru), &SlowFetcher, POLICY)
        .await
        .unwrap();
    assert_eq!(resolved.rating, SourceRating::Unknown);
}

#[tokio::test]
async fn test_strict_policy_withholds_everything_not_safe() {
    let policy = RatingPolicy {
        treat_unknown_as_questionable: true,
        prevent_explicit_results: true,
    };
    let resolver = RatingResolver::new(Duration::from_secs(1)).unwrap();

    let mut fetcher = MockFetcher::new();
    fetcher.expect_get_text().returning(|url| {
        if url.ends_with("/9") {
            Ok("<li>Rating: Safe</li>".to_string())
        } else {
            Ok("<li>Rating: Questionable</li>".to_string())
        }
    });

    let results = vec![
        result_for(SiteIndex::Twitter),
        result_for(SiteIndex::Danbooru),
        result_for(SiteIndex::Gelbooru),
        result_for(SiteIndex::TwoDMarket),
    ];
    let resolved = resolver.resolve_all(results, &fetcher, policy).await;

    assert_eq!(resolved.len(), 4);
    assert!(resolved[0].is_none());
    assert_eq!(resolved[1].as_ref().unwrap().rating, SourceRating::Safe);
    assert!(resolved[2].is_none());
    assert!(resolved[3].is_none());
}
