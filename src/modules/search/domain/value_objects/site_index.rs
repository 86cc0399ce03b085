use serde::{Deserialize, Serialize};
use std::fmt;

/// Source databases known to the search service, keyed by their numeric
/// `index_id`. Ids the crate does not know are kept as `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub enum SiteIndex {
    HMagazines,
    HGameCg,
    DoujinshiDb,
    Pixiv,
    PixivArchive,
    NicoNicoSeiga,
    Danbooru,
    Drawr,
    Nijie,
    Yandere,
    OpeningsMoe,
    Shutterstock,
    Fakku,
    HMisc,
    TwoDMarket,
    MediBang,
    Anime,
    HAnime,
    Movies,
    Shows,
    Gelbooru,
    Konachan,
    SankakuChannel,
    AnimePictures,
    E621,
    IdolComplex,
    BcyIllust,
    BcyCosplay,
    PortalGraphics,
    DeviantArt,
    Pawoo,
    Madokami,
    MangaDex,
    EHentai,
    ArtStation,
    FurAffinity,
    Twitter,
    FurryNetwork,
    Kemono,
    Skeb,
    Other(u32),
}

impl SiteIndex {
    /// Every named index, in id order
    pub const ALL: [SiteIndex; 40] = [
        Self::HMagazines,
        Self::HGameCg,
        Self::DoujinshiDb,
        Self::Pixiv,
        Self::PixivArchive,
        Self::NicoNicoSeiga,
        Self::Danbooru,
        Self::Drawr,
        Self::Nijie,
        Self::Yandere,
        Self::OpeningsMoe,
        Self::Shutterstock,
        Self::Fakku,
        Self::HMisc,
        Self::TwoDMarket,
        Self::MediBang,
        Self::Anime,
        Self::HAnime,
        Self::Movies,
        Self::Shows,
        Self::Gelbooru,
        Self::Konachan,
        Self::SankakuChannel,
        Self::AnimePictures,
        Self::E621,
        Self::IdolComplex,
        Self::BcyIllust,
        Self::BcyCosplay,
        Self::PortalGraphics,
        Self::DeviantArt,
        Self::Pawoo,
        Self::Madokami,
        Self::MangaDex,
        Self::EHentai,
        Self::ArtStation,
        Self::FurAffinity,
        Self::Twitter,
        Self::FurryNetwork,
        Self::Kemono,
        Self::Skeb,
    ];

    /// Selector value that enables every database
    pub const ALL_DATABASES: u32 = 999;

    pub fn id(&self) -> u32 {
        match self {
            Self::HMagazines => 0,
            Self::HGameCg => 2,
            Self::DoujinshiDb => 3,
            Self::Pixiv => 5,
            Self::PixivArchive => 6,
            Self::NicoNicoSeiga => 8,
            Self::Danbooru => 9,
            Self::Drawr => 10,
            Self::Nijie => 11,
            Self::Yandere => 12,
            Self::OpeningsMoe => 13,
            Self::Shutterstock => 14,
            Self::Fakku => 15,
            Self::HMisc => 16,
            Self::TwoDMarket => 17,
            Self::MediBang => 18,
            Self::Anime => 19,
            Self::HAnime => 20,
            Self::Movies => 21,
            Self::Shows => 22,
            Self::Gelbooru => 23,
            Self::Konachan => 24,
            Self::SankakuChannel => 25,
            Self::AnimePictures => 26,
            Self::E621 => 27,
            Self::IdolComplex => 28,
            Self::BcyIllust => 29,
            Self::BcyCosplay => 30,
            Self::PortalGraphics => 31,
            Self::DeviantArt => 32,
            Self::Pawoo => 33,
            Self::Madokami => 34,
            Self::MangaDex => 35,
            Self::EHentai => 36,
            Self::ArtStation => 37,
            Self::FurAffinity => 38,
            Self::Twitter => 39,
            Self::FurryNetwork => 40,
            Self::Kemono => 41,
            Self::Skeb => 42,
            Self::Other(id) => *id,
        }
    }

    /// Human readable source name shown next to a result
    pub fn display_name(&self) -> String {
        let name = match self {
            Self::HMagazines => "H-Magazines",
            Self::HGameCg => "H-Game CG",
            Self::DoujinshiDb => "DoujinshiDB",
            Self::Pixiv => "Pixiv",
            Self::PixivArchive => "Pixiv (Archive)",
            Self::NicoNicoSeiga => "Nico Nico Seiga",
            Self::Danbooru => "Danbooru",
            Self::Drawr => "Drawr",
            Self::Nijie => "Nijie",
            Self::Yandere => "Yande.re",
            Self::OpeningsMoe => "Openings.moe",
            Self::Shutterstock => "Shutterstock",
            Self::Fakku => "FAKKU",
            Self::HMisc => "H-Misc",
            Self::TwoDMarket => "2D-Market",
            Self::MediBang => "MediBang",
            Self::Anime => "Anime",
            Self::HAnime => "H-Anime",
            Self::Movies => "Movies",
            Self::Shows => "Shows",
            Self::Gelbooru => "Gelbooru",
            Self::Konachan => "Konachan",
            Self::SankakuChannel => "Sankaku Channel",
            Self::AnimePictures => "Anime-Pictures",
            Self::E621 => "e621",
            Self::IdolComplex => "Idol Complex",
            Self::BcyIllust => "bcy.net Illust",
            Self::BcyCosplay => "bcy.net Cosplay",
            Self::PortalGraphics => "PortalGraphics",
            Self::DeviantArt => "DeviantArt",
            Self::Pawoo => "Pawoo",
            Self::Madokami => "Madokami",
            Self::MangaDex => "MangaDex",
            Self::EHentai => "E-Hentai",
            Self::ArtStation => "ArtStation",
            Self::FurAffinity => "FurAffinity",
            Self::Twitter => "Twitter",
            Self::FurryNetwork => "Furry Network",
            Self::Kemono => "Kemono",
            Self::Skeb => "Skeb",
            Self::Other(id) => return format!("Index #{}", id),
        };
        name.to_string()
    }

    /// Bit for the `dbmask`/`dbmaski` fields; `None` past the 64-bit range
    pub fn mask_bit(&self) -> Option<u64> {
        let id = self.id();
        if id < 64 {
            Some(1u64 << id)
        } else {
            None
        }
    }
}

impl From<u32> for SiteIndex {
    fn from(id: u32) -> Self {
        Self::ALL
            .iter()
            .copied()
            .find(|index| index.id() == id)
            .unwrap_or(Self::Other(id))
    }
}

impl From<SiteIndex> for u32 {
    fn from(index: SiteIndex) -> Self {
        index.id()
    }
}

impl fmt::Display for SiteIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ids_are_unique_and_round_trip() {
        let ids: HashSet<u32> = SiteIndex::ALL.iter().map(|i| i.id()).collect();
        assert_eq!(ids.len(), SiteIndex::ALL.len());

        for index in SiteIndex::ALL {
            assert_eq!(SiteIndex::from(index.id()), index);
        }
    }

    #[test]
    fn test_unrecognized_id_is_kept() {
        assert_eq!(SiteIndex::from(1), SiteIndex::Other(1));
        assert_eq!(SiteIndex::from(500).id(), 500);
        assert_eq!(SiteIndex::Other(500).display_name(), "Index #500");
    }

    #[test]
    fn test_deserialize_from_number() {
        let index: SiteIndex = serde_json::from_str("9").unwrap();
        assert_eq!(index, SiteIndex::Danbooru);
    }

    #[test]
    fn test_mask_bit() {
        assert_eq!(SiteIndex::Danbooru.mask_bit(), Some(1 << 9));
        assert_eq!(SiteIndex::Other(64).mask_bit(), None);
    }
}
