use serde::{Deserialize, Serialize};

use super::{ContentKind, ContentRecord, RecordMeta};

/// Slug under which the site's single About profile is stored.
pub const ABOUT_SLUG: &str = "about";

/// One entry in the experience timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    pub id: String,
    #[schema(example = "Acme Studio")]
    pub company: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "2021 - 2024")]
    pub period: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlight: Option<bool>,
}

/// The About section: a short profile plus an experience list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct About {
    #[serde(default = "default_slug")]
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tagline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub experiences: Vec<Experience>,
    #[serde(flatten)]
    pub meta: RecordMeta,
}

fn default_slug() -> String {
    ABOUT_SLUG.to_string()
}

impl About {
    /// A profile with no content, used when nothing has been stored yet.
    pub fn empty(slug: &str) -> Self {
        Self {
            slug: slug.to_string(),
            name: None,
            tagline: None,
            bio: None,
            avatar_url: None,
            experiences: Vec::new(),
            meta: RecordMeta::default(),
        }
    }
}

impl ContentRecord for About {
    const KIND: ContentKind = ContentKind::About;
    const DRAFT_KEY: &'static str = "kreo:about:draft";
    const PUBLISHED_KEY: &'static str = "kreo:about:published";
    const SLUG_FALLBACK: &'static str = ABOUT_SLUG;

    fn slug(&self) -> &str {
        &self.slug
    }

    fn meta(&self) -> &RecordMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut RecordMeta {
        &mut self.meta
    }

    fn media_urls(&self) -> Vec<&str> {
        self.avatar_url
            .as_deref()
            .into_iter()
            .chain(
                self.experiences
                    .iter()
                    .filter_map(|exp| exp.logo_url.as_deref()),
            )
            .collect()
    }

    fn media_urls_mut(&mut self) -> Vec<&mut String> {
        let mut urls: Vec<&mut String> = self.avatar_url.iter_mut().collect();
        urls.extend(
            self.experiences
                .iter_mut()
                .filter_map(|exp| exp.logo_url.as_mut()),
        );
        urls
    }
}
