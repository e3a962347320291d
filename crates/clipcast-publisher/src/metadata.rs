//! Title/description/tag composition for one publish.

use rand::seq::SliceRandom;
use rand::Rng;

use clipcast_core::config::PublishConfig;

/// Everything the upload tool needs besides the file itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishMetadata {
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub privacy: String,
    pub category: Option<String>,
}

/// Compose metadata for a candidate file name.
///
/// The description is drawn from the configured pool; the marker tag is
/// appended when neither the title nor the description already carries it
/// (the description check is case-insensitive). Tags are a randomly sized
/// subset of the pool, at least one when the pool is non-empty.
pub fn compose<R: Rng>(file_name: &str, cfg: &PublishConfig, rng: &mut R) -> PublishMetadata {
    let title = derive_title(file_name, cfg.title_max_chars);

    let mut description = cfg
        .descriptions
        .choose(rng)
        .cloned()
        .unwrap_or_default();
    let marker_lower = cfg.marker.to_lowercase();
    if !cfg.marker.is_empty()
        && !title.contains(&cfg.marker)
        && !description.to_lowercase().contains(&marker_lower)
    {
        description = format!("{} {}", description, cfg.marker).trim().to_string();
    }

    let tags = if cfg.tag_pool.is_empty() {
        Vec::new()
    } else {
        let count = rng.gen_range(1..=cfg.tag_pool.len());
        cfg.tag_pool
            .choose_multiple(rng, count)
            .cloned()
            .collect()
    };

    PublishMetadata {
        title,
        description,
        tags,
        privacy: cfg.privacy.clone(),
        category: cfg.category.clone(),
    }
}

/// Derive a publish title from a file name: drop the extension, collapse
/// whitespace runs, and truncate to `max_chars` with an ellipsis marker.
pub fn derive_title(file_name: &str, max_chars: usize) -> String {
    let stem = match file_name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => file_name,
    };
    let collapsed = stem.split_whitespace().collect::<Vec<_>>().join(" ");

    if collapsed.chars().count() <= max_chars {
        return collapsed;
    }
    let mut truncated: String = collapsed
        .chars()
        .take(max_chars.saturating_sub(1))
        .collect();
    truncated.push('…');
    truncated
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn title_drops_the_extension() {
        assert_eq!(derive_title("holiday clip.mp4", 95), "holiday clip");
    }

    #[test]
    fn title_without_extension_is_kept_whole() {
        assert_eq!(derive_title("raw-footage", 95), "raw-footage");
    }

    #[test]
    fn hidden_file_style_names_keep_their_name() {
        // ".webm" has an empty stem — fall back to the full name.
        assert_eq!(derive_title(".webm", 95), ".webm");
    }

    #[test]
    fn title_collapses_whitespace_runs() {
        assert_eq!(derive_title("a   b\t\tc  d.mov", 95), "a b c d");
    }

    #[test]
    fn long_title_is_truncated_with_an_ellipsis() {
        let name = format!("{}.mp4", "x".repeat(200));
        let title = derive_title(&name, 95);
        assert_eq!(title.chars().count(), 95);
        assert!(title.ends_with('…'));
    }

    #[test]
    fn title_at_the_limit_is_not_touched() {
        let name = format!("{}.mp4", "x".repeat(95));
        let title = derive_title(&name, 95);
        assert_eq!(title, "x".repeat(95));
    }

    fn test_config() -> PublishConfig {
        PublishConfig {
            descriptions: vec!["Clip of the day".to_string()],
            tag_pool: vec!["shorts".to_string(), "fun".to_string(), "daily".to_string()],
            ..PublishConfig::default()
        }
    }

    #[test]
    fn marker_is_appended_when_absent_everywhere() {
        let cfg = test_config();
        let meta = compose("clip.mp4", &cfg, &mut StdRng::seed_from_u64(1));
        assert!(meta.description.ends_with("#Shorts"));
    }

    #[test]
    fn marker_is_not_duplicated_when_description_has_it() {
        let cfg = PublishConfig {
            descriptions: vec!["Already tagged #shorts".to_string()],
            ..test_config()
        };
        let meta = compose("clip.mp4", &cfg, &mut StdRng::seed_from_u64(1));
        assert_eq!(meta.description, "Already tagged #shorts");
    }

    #[test]
    fn marker_is_not_appended_when_the_title_has_it() {
        let cfg = PublishConfig {
            descriptions: vec!["plain".to_string()],
            ..test_config()
        };
        let meta = compose("best of #Shorts.mp4", &cfg, &mut StdRng::seed_from_u64(1));
        assert_eq!(meta.description, "plain");
    }

    #[test]
    fn tags_are_a_nonempty_subset_of_the_pool() {
        let cfg = test_config();
        for seed in 0..50 {
            let meta = compose("clip.mp4", &cfg, &mut StdRng::seed_from_u64(seed));
            assert!(!meta.tags.is_empty());
            assert!(meta.tags.len() <= cfg.tag_pool.len());
            for tag in &meta.tags {
                assert!(cfg.tag_pool.contains(tag));
            }
        }
    }

    #[test]
    fn empty_tag_pool_yields_no_tags() {
        let cfg = PublishConfig {
            tag_pool: Vec::new(),
            ..test_config()
        };
        let meta = compose("clip.mp4", &cfg, &mut StdRng::seed_from_u64(9));
        assert!(meta.tags.is_empty());
    }

    #[test]
    fn privacy_and_category_come_from_config() {
        let cfg = test_config();
        let meta = compose("clip.mp4", &cfg, &mut StdRng::seed_from_u64(2));
        assert_eq!(meta.privacy, "public");
        assert_eq!(meta.category.as_deref(), Some("22"));
    }
}
