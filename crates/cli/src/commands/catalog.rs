//! Catalog browsing: `wardrobe products` and `wardrobe show`.

use wardrobe_core::catalog::{find_product, in_category};
use wardrobe_core::{CatalogFilter, Category, GenderFilter, Product, ProductId};

use super::{CliError, Context};

/// Fetch the catalog, authenticated when a login is stored.
async fn fetch(ctx: &Context) -> Result<Vec<Product>, CliError> {
    let token = ctx.session.load()?.map(|s| s.token());
    ctx.api
        .list_products(token.as_ref())
        .await
        .map_err(|e| ctx.api_error(e))
}

fn print_row(product: &Product) {
    println!(
        "{:<26} {:<32} {:>10}  {:<8} {}",
        product.id,
        product.name,
        product.unit_price().display(),
        product.category.map_or("-", Category::label),
        product.gender.map_or("-", |g| g.as_str()),
    );
}

/// List products matching the search, gender and category.
///
/// # Errors
///
/// Returns an error for an unknown category or a failed request.
pub async fn list(
    ctx: &Context,
    query: &str,
    gender: &str,
    category: Option<&str>,
) -> Result<(), CliError> {
    let category = category
        .map(|slug| {
            Category::from_slug(slug)
                .ok_or_else(|| CliError::Invalid(format!("Unknown category: {slug}")))
        })
        .transpose()?;

    let catalog = fetch(ctx).await?;
    let catalog = match category {
        Some(category) => in_category(&catalog, category),
        None => catalog,
    };
    let filter = CatalogFilter::new(query, GenderFilter::parse(gender));
    let visible = filter.apply(&catalog);

    if visible.is_empty() {
        if filter.is_unrestricted() {
            println!("No products found.");
        } else {
            println!("No products match your search.");
        }
        return Ok(());
    }
    for product in &visible {
        print_row(product);
    }
    tracing::debug!(shown = visible.len(), total = catalog.len(), "Listed products");
    Ok(())
}

/// Print one product in full.
///
/// # Errors
///
/// Returns an error if the product does not exist or the request fails.
pub async fn show(ctx: &Context, id: &str) -> Result<(), CliError> {
    let catalog = fetch(ctx).await?;
    let product = find_product(&catalog, &ProductId::new(id))
        .ok_or_else(|| CliError::Invalid(format!("Product not found: {id}")))?;

    println!("{}", product.name);
    println!("  id:          {}", product.id);
    println!("  price:       {}", product.unit_price().display());
    if let Some(category) = product.category {
        println!("  category:    {}", category.label());
    }
    if let Some(gender) = product.gender {
        println!("  gender:      {}", gender.as_str());
    }
    if !product.sizes.is_empty() {
        println!("  sizes:       {}", product.sizes.join(", "));
    }
    if !product.colors.is_empty() {
        println!("  colors:      {}", product.colors.join(", "));
    }
    println!("  stock:       {}", product.stock);
    println!("  image:       {}", ctx.api.image_url(product.image.as_deref()));
    if !product.description.is_empty() {
        println!();
        println!("{}", product.description);
    }
    Ok(())
}
