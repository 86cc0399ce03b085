use regex::Regex;
use std::collections::HashMap;
use std::sync::Arc;

use crate::modules::search::domain::value_objects::{SiteIndex, SourceRating};

/// Reads an explicitness rating out of a fetched source page.
///
/// Each implementation is tied to one site's known markup; none of them is a
/// general HTML parser.
pub trait RatingExtractor: Send + Sync {
    fn extract(&self, page: &str) -> SourceRating;
    fn name(&self) -> &'static str;
}

/// Positional booru vocabulary: safe, questionable, explicit
const BOORU_RATING_WORDS: [&str; 3] = ["safe", "questionable", "explicit"];

/// Map a booru rating word to a rating, `Unknown` if unrecognized
pub fn rating_from_word(word: &str) -> SourceRating {
    let word = word.trim().to_lowercase();
    match BOORU_RATING_WORDS.iter().position(|known| *known == word) {
        Some(0) => SourceRating::Safe,
        Some(1) => SourceRating::Questionable,
        Some(2) => SourceRating::Nsfw,
        _ => match word.as_str() {
            "general" => SourceRating::Safe,
            "sensitive" => SourceRating::Questionable,
            _ => SourceRating::Unknown,
        },
    }
}

/// "Adult: Yes/No" cell of a doujinshi lexicon entry
pub struct AdultFlagExtractor {
    pattern: Regex,
}

impl AdultFlagExtractor {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(
                r"(?is)<td[^>]*>\s*<b>\s*Adult:\s*</b>\s*</td>\s*<td[^>]*>\s*([a-z]+)\s*</td>",
            )?,
        })
    }
}

impl RatingExtractor for AdultFlagExtractor {
    fn extract(&self, page: &str) -> SourceRating {
        let flag = self
            .pattern
            .captures(page)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_lowercase());

        match flag.as_deref() {
            Some("yes") => SourceRating::Nsfw,
            Some("no") => SourceRating::Safe,
            _ => SourceRating::Unknown,
        }
    }

    fn name(&self) -> &'static str {
        "AdultFlag"
    }
}

/// Rates a page by whether a marker element is present
pub struct MarkerExtractor {
    name: &'static str,
    pattern: Regex,
    present: SourceRating,
    absent: SourceRating,
}

impl MarkerExtractor {
    pub fn new(
        name: &'static str,
        pattern: &str,
        present: SourceRating,
        absent: SourceRating,
    ) -> Result<Self, regex::Error> {
        Ok(Self {
            name,
            pattern: Regex::new(pattern)?,
            present,
            absent,
        })
    }

    /// Pixiv shows an "R-18" introduction modal on adult works
    pub fn pixiv() -> Result<Self, regex::Error> {
        Self::new(
            "PixivR18Marker",
            r#"(?is)<div[^>]*class="[^"]*introduction-modal[^"]*"[^>]*>\s*<p[^>]*class="[^"]*title[^"]*"[^>]*>\s*R-18"#,
            SourceRating::Nsfw,
            SourceRating::Safe,
        )
    }

    /// DeviantArt gates mature deviations behind a "Mature Content" heading
    pub fn deviantart() -> Result<Self, regex::Error> {
        Self::new(
            "MatureContentHeading",
            r"(?i)<h1[^>]*>\s*Mature Content\s*</h1>",
            SourceRating::Nsfw,
            SourceRating::Safe,
        )
    }
}

impl RatingExtractor for MarkerExtractor {
    fn extract(&self, page: &str) -> SourceRating {
        if self.pattern.is_match(page) {
            self.present
        } else {
            self.absent
        }
    }

    fn name(&self) -> &'static str {
        self.name
    }
}

/// Booru-style "Rating: <word>" field; the word is taken from capture group 1
pub struct RatingFieldExtractor {
    name: &'static str,
    pattern: Regex,
}

impl RatingFieldExtractor {
    pub fn new(name: &'static str, pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            name,
            pattern: Regex::new(pattern)?,
        })
    }

    /// Danbooru, Gelbooru, Sankaku and Idol Complex sidebars, with or without the `<li>`
    pub fn booru() -> Result<Self, regex::Error> {
        Self::new("BooruRatingField", r"(?i)(?:<li[^>]*>\s*)?\bRating:\s*([a-z]+)")
    }

    /// Moebooru sidebars (Yande.re, Konachan); the vote span after the word is optional
    pub fn moebooru() -> Result<Self, regex::Error> {
        Self::new(
            "MoebooruRatingField",
            r#"(?i)(?:<li[^>]*>\s*)?\bRating:\s*([a-z]+)(?:\s*<span[^>]*class="vote-desc")?"#,
        )
    }

    /// e621 wraps the word in a styled span
    pub fn e621() -> Result<Self, regex::Error> {
        Self::new(
            "E621RatingField",
            r#"(?i)<li[^>]*>\s*Rating:\s*<span[^>]*class="[^"]*"[^>]*>\s*([a-z]+)\s*</span>"#,
        )
    }
}

impl RatingExtractor for RatingFieldExtractor {
    fn extract(&self, page: &str) -> SourceRating {
        self.pattern
            .captures(page)
            .and_then(|caps| caps.get(1))
            .map(|m| rating_from_word(m.as_str()))
            .unwrap_or(SourceRating::Unknown)
    }

    fn name(&self) -> &'static str {
        self.name
    }
}

/// How a result from a given index gets its rating
#[derive(Clone)]
pub enum RatingStrategy {
    /// Fetch the result's first URL and run the extractor on the body
    Fetch(Arc<dyn RatingExtractor>),
    /// No fetch; the index only hosts content of this rating
    Fixed(SourceRating),
    /// No fetch; rating stays `Unknown`
    Unrated,
}

impl RatingStrategy {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Fetch(extractor) => extractor.name(),
            Self::Fixed(_) => "Fixed",
            Self::Unrated => "Unrated",
        }
    }

    pub fn needs_fetch(&self) -> bool {
        matches!(self, Self::Fetch(_))
    }
}

impl std::fmt::Debug for RatingStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fixed(rating) => write!(f, "Fixed({:?})", rating),
            other => write!(f, "{}", other.name()),
        }
    }
}

/// Lookup table from site index to rating strategy.
///
/// Indexes without an entry resolve to `RatingStrategy::Unrated`.
pub struct RatingStrategyTable {
    strategies: HashMap<SiteIndex, RatingStrategy>,
}

impl RatingStrategyTable {
    pub fn empty() -> Self {
        Self {
            strategies: HashMap::new(),
        }
    }

    /// Table for every source with a known rating rule
    pub fn standard() -> Result<Self, regex::Error> {
        let adult_flag: Arc<dyn RatingExtractor> = Arc::new(AdultFlagExtractor::new()?);
        let pixiv: Arc<dyn RatingExtractor> = Arc::new(MarkerExtractor::pixiv()?);
        let deviantart: Arc<dyn RatingExtractor> = Arc::new(MarkerExtractor::deviantart()?);
        let booru: Arc<dyn RatingExtractor> = Arc::new(RatingFieldExtractor::booru()?);
        let moebooru: Arc<dyn RatingExtractor> = Arc::new(RatingFieldExtractor::moebooru()?);
        let e621: Arc<dyn RatingExtractor> = Arc::new(RatingFieldExtractor::e621()?);

        let table = Self::empty()
            .with(SiteIndex::DoujinshiDb, RatingStrategy::Fetch(adult_flag))
            .with(SiteIndex::Pixiv, RatingStrategy::Fetch(pixiv.clone()))
            .with(SiteIndex::PixivArchive, RatingStrategy::Fetch(pixiv))
            .with(SiteIndex::Danbooru, RatingStrategy::Fetch(booru.clone()))
            .with(SiteIndex::Gelbooru, RatingStrategy::Fetch(booru.clone()))
            .with(SiteIndex::SankakuChannel, RatingStrategy::Fetch(booru.clone()))
            .with(SiteIndex::IdolComplex, RatingStrategy::Fetch(booru))
            .with(SiteIndex::Yandere, RatingStrategy::Fetch(moebooru.clone()))
            .with(SiteIndex::Konachan, RatingStrategy::Fetch(moebooru))
            .with(SiteIndex::E621, RatingStrategy::Fetch(e621))
            .with(SiteIndex::Fakku, RatingStrategy::Fixed(SourceRating::Nsfw))
            .with(SiteIndex::TwoDMarket, RatingStrategy::Fixed(SourceRating::Nsfw))
            .with(SiteIndex::HMisc, RatingStrategy::Fixed(SourceRating::Nsfw))
            .with(SiteIndex::DeviantArt, RatingStrategy::Fetch(deviantart));

        Ok(table)
    }

    /// Add or replace the strategy for one index
    pub fn with(mut self, index: SiteIndex, strategy: RatingStrategy) -> Self {
        self.strategies.insert(index, strategy);
        self
    }

    pub fn strategy_for(&self, index: SiteIndex) -> RatingStrategy {
        self.strategies
            .get(&index)
            .cloned()
            .unwrap_or(RatingStrategy::Unrated)
    }
}
