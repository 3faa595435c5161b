use serde::{Deserialize, Serialize};

/// The fixed set of genre labels a user can pick from. Event rows carry
/// free-text, possibly comma-joined genre strings and are matched against
/// these labels by substring, so the enum only constrains user preferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Genre {
    Pop,
    Rock,
    #[serde(rename = "Hip-Hop")]
    HipHop,
    Electronic,
    Indie,
    Jazz,
    Classical,
    Metal,
    Funk,
    #[serde(rename = "R&B")]
    RnB,
    Folk,
    Country,
    Reggae,
    Latino,
    Turbofolk,
}

impl Genre {
    pub fn as_str(&self) -> &'static str {
        match self {
            Genre::Pop => "Pop",
            Genre::Rock => "Rock",
            Genre::HipHop => "Hip-Hop",
            Genre::Electronic => "Electronic",
            Genre::Indie => "Indie",
            Genre::Jazz => "Jazz",
            Genre::Classical => "Classical",
            Genre::Metal => "Metal",
            Genre::Funk => "Funk",
            Genre::RnB => "R&B",
            Genre::Folk => "Folk",
            Genre::Country => "Country",
            Genre::Reggae => "Reggae",
            Genre::Latino => "Latino",
            Genre::Turbofolk => "Turbofolk",
        }
    }
}

impl std::fmt::Display for Genre {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Splits raw artist entries on commas and trims surrounding whitespace,
/// so `["A, B, C"]` becomes `["A", "B", "C"]`. This is the only
/// normalization artist names ever get; matching stays exact afterwards.
pub fn split_artist_entries(raw: &[String]) -> Vec<String> {
    raw.iter()
        .flat_map(|entry| entry.split(','))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn genre_labels_round_trip_through_serde() {
        let json = serde_json::to_string(&Genre::HipHop).unwrap();
        assert_eq!(json, "\"Hip-Hop\"");
        let back: Genre = serde_json::from_str("\"R&B\"").unwrap();
        assert_eq!(back, Genre::RnB);
    }

    #[test]
    fn unknown_genre_label_is_rejected() {
        assert!(serde_json::from_str::<Genre>("\"Polka\"").is_err());
    }

    #[test]
    fn artist_entries_split_on_commas_and_trim() {
        let raw = vec!["A, B, C".to_string(), "Dua Lipa".to_string()];
        assert_eq!(split_artist_entries(&raw), vec!["A", "B", "C", "Dua Lipa"]);
    }

    #[test]
    fn empty_artist_entries_are_dropped() {
        let raw = vec![" , ".to_string(), "".to_string()];
        assert!(split_artist_entries(&raw).is_empty());
    }
}
