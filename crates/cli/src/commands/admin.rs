//! `wardrobe add-product`.

use std::path::Path;

use wardrobe_core::NewProduct;
use wardrobe_core::catalog::NewProductForm;
use wardrobe_core::catalog::new_product::is_allowed_image;
use wardrobe_storefront::api::ImageUpload;

use super::{CliError, Context};

/// MIME type for an accepted image extension.
fn content_type(file_name: &str) -> Option<&'static str> {
    let extension = Path::new(file_name)
        .extension()?
        .to_str()?
        .to_ascii_lowercase();
    match extension.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        _ => None,
    }
}

fn read_image(path: &Path) -> Result<ImageUpload, CliError> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_string();
    if !is_allowed_image(&file_name) {
        return Err(CliError::Invalid(
            "Image must be a png, jpg, jpeg or gif file".to_string(),
        ));
    }
    let bytes = std::fs::read(path).map_err(|source| CliError::Read {
        path: path.display().to_string(),
        source,
    })?;
    Ok(ImageUpload {
        content_type: content_type(&file_name).map(str::to_string),
        file_name,
        bytes,
    })
}

/// Create a product. Admin login required.
///
/// # Errors
///
/// Returns an error when the form is invalid, the login is not an admin, or
/// the API refuses the product.
pub async fn add_product(
    ctx: &Context,
    form: &NewProductForm,
    image: Option<&Path>,
) -> Result<(), CliError> {
    let session = ctx.require_session()?;
    if !session.role.is_admin() {
        return Err(CliError::Forbidden);
    }

    let product = NewProduct::from_form(form).map_err(|errors| {
        let messages: Vec<_> = errors.into_iter().map(|e| e.message).collect();
        CliError::Invalid(messages.join("\n"))
    })?;
    let image = image.map(read_image).transpose()?;

    let created = ctx
        .api
        .create_product(&session.token(), &product, image)
        .await
        .map_err(|e| ctx.api_error(e))?;

    tracing::info!(product_id = %created.id, "Product created");
    println!("Product added successfully! {} (id: {})", created.name, created.id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_by_extension() {
        assert_eq!(content_type("shirt.PNG"), Some("image/png"));
        assert_eq!(content_type("a.jpeg"), Some("image/jpeg"));
        assert_eq!(content_type("a.gif"), Some("image/gif"));
        assert_eq!(content_type("a.webp"), None);
        assert_eq!(content_type("noext"), None);
    }

    #[test]
    fn test_read_image_rejects_other_types() {
        let err = read_image(Path::new("/tmp/notes.txt"));
        assert!(matches!(err, Err(CliError::Invalid(_))));
    }
}
