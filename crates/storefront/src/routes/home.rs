//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::IntoResponse;
use tracing::instrument;
use wardrobe_core::Category;

use crate::middleware::PageContext;

/// A feature card on the home page.
#[derive(Clone)]
pub struct Feature {
    pub title: &'static str,
    pub body: &'static str,
}

/// Features highlighted below the hero.
pub const FEATURES: [Feature; 3] = [
    Feature {
        title: "Quality Clothing",
        body: "Only the best fabrics and latest trends for you.",
    },
    Feature {
        title: "Fast Delivery",
        body: "Get your orders delivered quickly and safely.",
    },
    Feature {
        title: "Easy Returns",
        body: "Not satisfied? Return products hassle-free.",
    },
];

/// A category shortcut.
#[derive(Clone)]
pub struct CategoryLink {
    pub href: String,
    pub label: &'static str,
}

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub ctx: PageContext,
    pub features: Vec<Feature>,
    pub categories: Vec<CategoryLink>,
}

/// Display the home page.
#[instrument(skip(ctx))]
pub async fn home(ctx: PageContext) -> impl IntoResponse {
    HomeTemplate {
        ctx,
        features: FEATURES.to_vec(),
        categories: Category::ALL
            .into_iter()
            .map(|c| CategoryLink {
                href: format!("/products/{}", c.slug()),
                label: c.plural(),
            })
            .collect(),
    }
}
