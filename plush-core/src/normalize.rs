//! Post normalization.
//!
//! Every path from a raw record to an [`ExtendedPost`] goes through
//! [`normalize_at`]. Alternate field spellings are resolved by one
//! precedence table:
//!
//! | Canonical field | Sources, in order                                   |
//! |-----------------|-----------------------------------------------------|
//! | `user_id`       | `user_id`, `userId`                                 |
//! | `timestamp`     | `created_at`, `createdAt`, `timestamp`, now         |
//! | `updatedAt`     | `updated_at`, `updatedAt`, creation time            |
//! | `content`       | `content`, `description`                            |
//! | `image`         | `image`, `image_url`                                |
//! | `for_sale`      | option, `for_sale`, `forSale`, false                |
//! | `username`      | profile username, profile first name, record        |
//! |                 | username, caller default, `"User"`                  |
//! | ordering time   | `timestamp`, `created_at`, epoch                    |
//!
//! The ordering time is read from canonical posts, where normalization has
//! already made `timestamp` and `created_at` equal, so both rows agree on
//! anything this module produced.
//! Empty strings and the Unix epoch count as "not defined", which is what
//! makes [`convert_post_to_extended_post`] idempotent on canonical posts.

use chrono::{DateTime, Utc};
use plushie_types::{ExtendedPost, RawPost, UserInfo};

/// Display name used when nothing better is known.
pub const FALLBACK_USERNAME: &str = "User";

/// Caller overrides for [`normalize`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizeOptions {
    /// Force the marketplace flag instead of reading it from the record.
    pub for_sale: Option<bool>,
    /// Display name to use when the profile has none.
    pub default_username: Option<String>,
}

impl NormalizeOptions {
    /// Options forcing the marketplace flag.
    pub fn for_sale(for_sale: bool) -> Self {
        Self {
            for_sale: Some(for_sale),
            default_username: None,
        }
    }

    /// Set the fallback display name.
    pub fn with_default_username(mut self, username: &str) -> Self {
        self.default_username = Some(username.to_string());
        self
    }
}

/// Normalize a raw record into the canonical shape, stamping missing
/// creation times with the current time.
pub fn normalize(
    raw: &RawPost,
    user: Option<&UserInfo>,
    options: &NormalizeOptions,
) -> ExtendedPost {
    normalize_at(raw, user, options, Utc::now())
}

/// Normalize a raw record, using `now` for missing creation times.
///
/// When `user` is `None` the profile joined onto the record is used.
pub fn normalize_at(
    raw: &RawPost,
    user: Option<&UserInfo>,
    options: &NormalizeOptions,
    now: DateTime<Utc>,
) -> ExtendedPost {
    let user_id = first_text([&raw.user_id, &raw.user_id_alias]);
    let created = first_time([raw.created_at, raw.created_at_alias, raw.timestamp]).unwrap_or(now);
    let updated = first_time([raw.updated_at, raw.updated_at_alias]).unwrap_or(created);
    let for_sale = options
        .for_sale
        .or(raw.for_sale)
        .or(raw.for_sale_alias)
        .unwrap_or(false);

    ExtendedPost {
        id: raw.id.clone().unwrap_or_default(),
        user_id_alias: user_id.clone(),
        user_id,
        username: resolve_username(raw, user.or(raw.profile.as_ref()), options),
        title: first_text([&raw.title]),
        content: first_text([&raw.content, &raw.description]),
        image: first_text([&raw.image, &raw.image_url]),
        tags: raw.tags.clone().unwrap_or_default(),
        likes: raw.likes.unwrap_or(0),
        comments: raw.comments.unwrap_or(0),
        timestamp: created,
        created_at: created,
        created_at_alias: created,
        updated_at: updated,
        for_sale,
        price: raw.price.unwrap_or(0.0),
        brand: first_text([&raw.brand]),
        condition: first_text([&raw.condition]),
        material: first_text([&raw.material]),
        species: first_text([&raw.species]),
        delivery_method: first_text([&raw.delivery_method]),
        delivery_cost: raw.delivery_cost.unwrap_or(0.0),
        color: first_text([&raw.color]),
        sold: raw.sold.unwrap_or(false),
    }
}

/// Normalize a post shown in the social feed (never for sale).
pub fn normalize_for_feed(raw: &RawPost, user: Option<&UserInfo>) -> ExtendedPost {
    normalize(raw, user, &NormalizeOptions::for_sale(false))
}

/// Normalize a marketplace listing (always for sale).
pub fn normalize_for_marketplace(raw: &RawPost, user: Option<&UserInfo>) -> ExtendedPost {
    normalize(raw, user, &NormalizeOptions::for_sale(true))
}

/// Reconcile a post that may carry either naming convention.
///
/// Whichever spelling is defined wins (current spelling first) and is
/// mirrored into both fields. Converting a converted post returns it
/// unchanged.
pub fn convert_post_to_extended_post(post: &ExtendedPost) -> ExtendedPost {
    normalize_at(
        &RawPost::from(post),
        None,
        &NormalizeOptions::default(),
        Utc::now(),
    )
}

/// The time a canonical post is ordered by.
pub fn ordering_time(post: &ExtendedPost) -> DateTime<Utc> {
    first_time([Some(post.timestamp), Some(post.created_at)]).unwrap_or_default()
}

/// True for the epoch placeholder that stands in for a missing time.
pub fn is_unset(at: &DateTime<Utc>) -> bool {
    *at == DateTime::<Utc>::default()
}

static NO_NAME: Option<String> = None;

fn resolve_username(raw: &RawPost, user: Option<&UserInfo>, options: &NormalizeOptions) -> String {
    let (username, first_name) = match user {
        Some(info) => (&info.username, &info.first_name),
        None => (&NO_NAME, &NO_NAME),
    };
    let resolved = first_text([username, first_name, &raw.username, &options.default_username]);
    if resolved.is_empty() {
        FALLBACK_USERNAME.to_string()
    } else {
        resolved
    }
}

fn first_text<'a>(candidates: impl IntoIterator<Item = &'a Option<String>>) -> String {
    candidates
        .into_iter()
        .flatten()
        .find(|s| !s.is_empty())
        .cloned()
        .unwrap_or_default()
}

fn first_time(candidates: impl IntoIterator<Item = Option<DateTime<Utc>>>) -> Option<DateTime<Utc>> {
    candidates.into_iter().flatten().find(|at| !is_unset(at))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use plushie_types::PostId;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, hour, 0, 0).unwrap()
    }

    fn full_raw() -> RawPost {
        RawPost {
            id: Some(PostId::new("p-1")),
            user_id: Some("u-1".into()),
            title: Some("Mochi the bunny".into()),
            content: Some("Found at a con".into()),
            image: Some("https://img/mochi.png".into()),
            tags: Some(vec!["bunny".into(), "jellycat".into()]),
            likes: Some(5),
            comments: Some(2),
            created_at: Some(at(9)),
            updated_at: Some(at(10)),
            price: Some(20.0),
            brand: Some("Jellycat".into()),
            ..RawPost::default()
        }
    }

    // ===========================================
    // Username Resolution
    // ===========================================

    #[test]
    fn username_prefers_profile_username() {
        let user = UserInfo {
            username: Some("mochi_fan".into()),
            first_name: Some("Ada".into()),
            avatar_url: None,
        };
        let post = normalize_at(&RawPost::default(), Some(&user), &NormalizeOptions::default(), at(0));
        assert_eq!(post.username, "mochi_fan");
    }

    #[test]
    fn username_falls_back_to_first_name() {
        let user = UserInfo {
            username: None,
            first_name: Some("Ada".into()),
            avatar_url: None,
        };
        let post = normalize_at(&RawPost::default(), Some(&user), &NormalizeOptions::default(), at(0));
        assert_eq!(post.username, "Ada");
    }

    #[test]
    fn username_falls_back_to_caller_default() {
        let options = NormalizeOptions::default().with_default_username("guest");
        let post = normalize_at(&RawPost::default(), Some(&UserInfo::default()), &options, at(0));
        assert_eq!(post.username, "guest");
    }

    #[test]
    fn username_falls_back_to_literal_user() {
        let post = normalize_at(&RawPost::default(), None, &NormalizeOptions::default(), at(0));
        assert_eq!(post.username, FALLBACK_USERNAME);
    }

    #[test]
    fn empty_username_counts_as_missing() {
        let user = UserInfo {
            username: Some(String::new()),
            first_name: Some("Ada".into()),
            avatar_url: None,
        };
        let post = normalize_at(&RawPost::default(), Some(&user), &NormalizeOptions::default(), at(0));
        assert_eq!(post.username, "Ada");
    }

    #[test]
    fn joined_profile_used_when_no_user_given() {
        let raw = RawPost {
            profile: Some(UserInfo::with_username("from_join")),
            ..RawPost::default()
        };
        let post = normalize_at(&raw, None, &NormalizeOptions::default(), at(0));
        assert_eq!(post.username, "from_join");
    }

    #[test]
    fn explicit_user_beats_joined_profile() {
        let raw = RawPost {
            profile: Some(UserInfo::with_username("from_join")),
            ..RawPost::default()
        };
        let user = UserInfo::with_username("explicit");
        let post = normalize_at(&raw, Some(&user), &NormalizeOptions::default(), at(0));
        assert_eq!(post.username, "explicit");
    }

    // ===========================================
    // Marketplace Flag
    // ===========================================

    #[test]
    fn for_sale_option_overrides_record() {
        let raw = RawPost {
            for_sale: Some(true),
            ..RawPost::default()
        };
        let post = normalize_at(&raw, None, &NormalizeOptions::for_sale(false), at(0));
        assert!(!post.for_sale);
    }

    #[test]
    fn for_sale_read_from_either_spelling() {
        let current = RawPost {
            for_sale: Some(true),
            ..RawPost::default()
        };
        let legacy = RawPost {
            for_sale_alias: Some(true),
            ..RawPost::default()
        };
        let options = NormalizeOptions::default();
        assert!(normalize_at(&current, None, &options, at(0)).for_sale);
        assert!(normalize_at(&legacy, None, &options, at(0)).for_sale);
        assert!(!normalize_at(&RawPost::default(), None, &options, at(0)).for_sale);
    }

    #[test]
    fn feed_and_marketplace_variants_force_flag() {
        let listed = RawPost {
            for_sale: Some(true),
            ..full_raw()
        };
        assert!(!normalize_for_feed(&listed, None).for_sale);
        assert!(normalize_for_marketplace(&full_raw(), None).for_sale);
    }

    // ===========================================
    // Timestamps
    // ===========================================

    #[test]
    fn creation_time_written_to_all_three_fields() {
        let post = normalize_at(&full_raw(), None, &NormalizeOptions::default(), at(23));
        assert_eq!(post.timestamp, at(9));
        assert_eq!(post.created_at, at(9));
        assert_eq!(post.created_at_alias, at(9));
        assert_eq!(post.updated_at, at(10));
    }

    #[test]
    fn legacy_creation_spellings_are_read() {
        let camel = RawPost {
            created_at_alias: Some(at(3)),
            ..RawPost::default()
        };
        let feed = RawPost {
            timestamp: Some(at(4)),
            ..RawPost::default()
        };
        let options = NormalizeOptions::default();
        assert_eq!(normalize_at(&camel, None, &options, at(0)).created_at, at(3));
        assert_eq!(normalize_at(&feed, None, &options, at(0)).created_at, at(4));
    }

    #[test]
    fn updated_at_falls_back_to_creation_time() {
        let raw = RawPost {
            created_at: Some(at(7)),
            ..RawPost::default()
        };
        let post = normalize_at(&raw, None, &NormalizeOptions::default(), at(0));
        assert_eq!(post.updated_at, at(7));
    }

    #[test]
    fn missing_creation_time_uses_now() {
        let post = normalize_at(&RawPost::default(), None, &NormalizeOptions::default(), at(12));
        assert_eq!(post.timestamp, at(12));
        assert_eq!(post.created_at_alias, at(12));
        assert_eq!(post.updated_at, at(12));
    }

    // ===========================================
    // Defaults
    // ===========================================

    #[test]
    fn empty_record_resolves_every_field() {
        let post = normalize_at(&RawPost::default(), None, &NormalizeOptions::default(), at(1));

        assert!(post.id.is_empty());
        assert_eq!(post.user_id, "");
        assert_eq!(post.user_id_alias, "");
        assert_eq!(post.title, "");
        assert_eq!(post.content, "");
        assert_eq!(post.image, "");
        assert!(post.tags.is_empty());
        assert_eq!(post.likes, 0);
        assert_eq!(post.comments, 0);
        assert_eq!(post.price, 0.0);
        assert_eq!(post.delivery_cost, 0.0);
        assert!(!post.sold);
        assert!(!post.for_sale);
        assert!(!is_unset(&post.timestamp));
    }

    #[test]
    fn body_and_image_fall_back_to_alternate_fields() {
        let raw = RawPost {
            description: Some("listing text".into()),
            image_url: Some("bucket/key.png".into()),
            ..RawPost::default()
        };
        let post = normalize_at(&raw, None, &NormalizeOptions::default(), at(0));
        assert_eq!(post.content, "listing text");
        assert_eq!(post.image, "bucket/key.png");
    }

    // ===========================================
    // Idempotence
    // ===========================================

    #[test]
    fn renormalizing_output_is_identity() {
        let user = UserInfo::with_username("mochi_fan");
        let options = NormalizeOptions::for_sale(true);
        let once = normalize_at(&full_raw(), Some(&user), &options, at(0));

        let twice = normalize_at(
            &RawPost::from(&once),
            None,
            &NormalizeOptions::default(),
            at(22),
        );
        assert_eq!(once, twice);
    }

    #[test]
    fn renormalizing_sparse_output_is_identity() {
        let once = normalize_at(&RawPost::default(), None, &NormalizeOptions::default(), at(5));
        let twice = normalize_at(&RawPost::from(&once), None, &NormalizeOptions::default(), at(6));
        assert_eq!(once, twice);
    }

    // ===========================================
    // Alias Reconciliation
    // ===========================================

    #[test]
    fn convert_mirrors_legacy_user_id() {
        let post = ExtendedPost {
            user_id_alias: "u-legacy".into(),
            ..normalize_at(&RawPost::default(), None, &NormalizeOptions::default(), at(1))
        };
        let converted = convert_post_to_extended_post(&post);
        assert_eq!(converted.user_id, "u-legacy");
        assert_eq!(converted.user_id_alias, "u-legacy");
    }

    #[test]
    fn convert_prefers_current_spelling_when_both_present() {
        let post = ExtendedPost {
            user_id: "u-new".into(),
            user_id_alias: "u-old".into(),
            ..normalize_at(&RawPost::default(), None, &NormalizeOptions::default(), at(1))
        };
        let converted = convert_post_to_extended_post(&post);
        assert_eq!(converted.user_id, "u-new");
        assert_eq!(converted.user_id_alias, "u-new");
    }

    #[test]
    fn convert_mirrors_legacy_created_at() {
        let post = ExtendedPost {
            created_at_alias: at(8),
            ..ExtendedPost::default()
        };
        let converted = convert_post_to_extended_post(&post);
        assert_eq!(converted.timestamp, at(8));
        assert_eq!(converted.created_at, at(8));
        assert_eq!(converted.updated_at, at(8));
    }

    #[test]
    fn convert_is_idempotent() {
        let post = normalize_at(&full_raw(), None, &NormalizeOptions::default(), at(0));
        let once = convert_post_to_extended_post(&post);
        let twice = convert_post_to_extended_post(&once);
        assert_eq!(post, once);
        assert_eq!(once, twice);
    }

    #[test]
    fn convert_stamps_posts_without_any_time() {
        let once = convert_post_to_extended_post(&ExtendedPost::default());
        assert!(!is_unset(&once.timestamp));
        assert_eq!(once.username, FALLBACK_USERNAME);
        assert_eq!(convert_post_to_extended_post(&once), once);
    }
}
