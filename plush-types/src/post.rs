//! Raw and canonical post records.
//!
//! Posts reach the application from several places (the hosted posts table,
//! joined profile queries, the offline queue written by older builds), and
//! the schema drifted between `snake_case` and `camelCase` along the way.
//! [`RawPost`] accepts every spelling side by side; [`ExtendedPost`] is the
//! one canonical shape, with the identifier and timestamp aliases written
//! out twice so older readers keep working.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::PostId;

/// Profile information joined onto a post by the data source.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UserInfo {
    /// Chosen display name.
    pub username: Option<String>,
    /// Given name, used when no username was chosen.
    pub first_name: Option<String>,
    /// Avatar image reference.
    pub avatar_url: Option<String>,
}

impl UserInfo {
    /// Profile with only a username set.
    pub fn with_username(username: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            ..Self::default()
        }
    }
}

/// A post record as received from any data source.
///
/// Every field is optional and alternate spellings of the same field are
/// kept apart, so a record carrying both `user_id` and `userId` still
/// deserializes.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawPost {
    /// Post identifier.
    pub id: Option<PostId>,
    /// Owning user (current spelling).
    pub user_id: Option<String>,
    /// Owning user (legacy spelling).
    #[serde(rename = "userId")]
    pub user_id_alias: Option<String>,
    /// Display name carried on the record itself.
    pub username: Option<String>,
    /// Joined profile row.
    pub profile: Option<UserInfo>,
    /// Post title.
    pub title: Option<String>,
    /// Free-text body.
    pub content: Option<String>,
    /// Free-text body (marketplace spelling).
    pub description: Option<String>,
    /// Image reference.
    pub image: Option<String>,
    /// Image reference (storage bucket spelling).
    pub image_url: Option<String>,
    /// Tags.
    pub tags: Option<Vec<String>>,
    /// Like count.
    #[serde(alias = "likes_count")]
    pub likes: Option<u64>,
    /// Comment count.
    #[serde(alias = "comments_count")]
    pub comments: Option<u64>,
    /// Creation time (current spelling).
    pub created_at: Option<DateTime<Utc>>,
    /// Creation time (legacy spelling).
    #[serde(rename = "createdAt")]
    pub created_at_alias: Option<DateTime<Utc>>,
    /// Creation time as written by the feed screens.
    pub timestamp: Option<DateTime<Utc>>,
    /// Last update time (current spelling).
    pub updated_at: Option<DateTime<Utc>>,
    /// Last update time (legacy spelling).
    #[serde(rename = "updatedAt")]
    pub updated_at_alias: Option<DateTime<Utc>>,
    /// Marketplace flag (current spelling).
    pub for_sale: Option<bool>,
    /// Marketplace flag (legacy spelling).
    #[serde(rename = "forSale")]
    pub for_sale_alias: Option<bool>,
    /// Asking price.
    pub price: Option<f64>,
    /// Plushie brand.
    pub brand: Option<String>,
    /// Item condition.
    pub condition: Option<String>,
    /// Material.
    pub material: Option<String>,
    /// Species or character.
    pub species: Option<String>,
    /// Delivery method.
    pub delivery_method: Option<String>,
    /// Delivery cost.
    pub delivery_cost: Option<f64>,
    /// Color.
    pub color: Option<String>,
    /// Sold flag.
    pub sold: Option<bool>,
}

/// The canonical in-memory post.
///
/// No field is ever missing: absent values are resolved to empty strings,
/// zero, `false`, an empty tag list or a concrete timestamp during
/// normalization. `user_id`/`userId` and `timestamp`/`created_at`/`createdAt`
/// always hold the same value.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtendedPost {
    /// Post identifier.
    pub id: PostId,
    /// Owning user.
    pub user_id: String,
    /// Mirror of `user_id` for legacy readers.
    #[serde(rename = "userId")]
    pub user_id_alias: String,
    /// Resolved display name of the owner.
    pub username: String,
    /// Post title.
    pub title: String,
    /// Free-text body.
    pub content: String,
    /// Image reference.
    pub image: String,
    /// Tags.
    pub tags: Vec<String>,
    /// Like count.
    pub likes: u64,
    /// Comment count.
    pub comments: u64,
    /// Creation time.
    pub timestamp: DateTime<Utc>,
    /// Mirror of `timestamp` (current spelling).
    pub created_at: DateTime<Utc>,
    /// Mirror of `timestamp` (legacy spelling).
    #[serde(rename = "createdAt")]
    pub created_at_alias: DateTime<Utc>,
    /// Last update time.
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
    /// Listed on the marketplace.
    pub for_sale: bool,
    /// Asking price.
    pub price: f64,
    /// Plushie brand.
    pub brand: String,
    /// Item condition.
    pub condition: String,
    /// Material.
    pub material: String,
    /// Species or character.
    pub species: String,
    /// Delivery method.
    pub delivery_method: String,
    /// Delivery cost.
    pub delivery_cost: f64,
    /// Color.
    pub color: String,
    /// Sold flag.
    pub sold: bool,
}

impl From<&ExtendedPost> for RawPost {
    /// Lossless: normalizing the result reproduces the canonical post.
    fn from(post: &ExtendedPost) -> Self {
        Self {
            id: Some(post.id.clone()),
            user_id: Some(post.user_id.clone()),
            user_id_alias: Some(post.user_id_alias.clone()),
            username: Some(post.username.clone()),
            profile: None,
            title: Some(post.title.clone()),
            content: Some(post.content.clone()),
            description: None,
            image: Some(post.image.clone()),
            image_url: None,
            tags: Some(post.tags.clone()),
            likes: Some(post.likes),
            comments: Some(post.comments),
            created_at: Some(post.created_at),
            created_at_alias: Some(post.created_at_alias),
            timestamp: Some(post.timestamp),
            updated_at: Some(post.updated_at),
            updated_at_alias: Some(post.updated_at),
            for_sale: Some(post.for_sale),
            for_sale_alias: Some(post.for_sale),
            price: Some(post.price),
            brand: Some(post.brand.clone()),
            condition: Some(post.condition.clone()),
            material: Some(post.material.clone()),
            species: Some(post.species.clone()),
            delivery_method: Some(post.delivery_method.clone()),
            delivery_cost: Some(post.delivery_cost),
            color: Some(post.color.clone()),
            sold: Some(post.sold),
        }
    }
}
