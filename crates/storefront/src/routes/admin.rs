//! Admin product creation.
//!
//! The form is validated locally first; the shop API has the final say.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Multipart, State, multipart::MultipartError},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;
use tracing::instrument;
use wardrobe_core::catalog::new_product::is_allowed_image;
use wardrobe_core::catalog::{FieldError, NewProductForm};
use wardrobe_core::{Category, Gender, NewProduct};

use crate::api::{ApiError, ImageUpload};
use crate::error::{AppError, Result};
use crate::middleware::session::push_flash;
use crate::middleware::{PageContext, RequireAdmin};
use crate::models::Flash;
use crate::state::AppState;

/// Largest accepted upload, in bytes.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// A `<select>` entry.
#[derive(Clone)]
pub struct SelectOption {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

/// Add-product page template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/new_product.html")]
pub struct NewProductTemplate {
    pub ctx: PageContext,
    pub form: NewProductForm,
    pub categories: Vec<SelectOption>,
    pub genders: Vec<SelectOption>,
    pub errors: Vec<String>,
}

impl NewProductTemplate {
    fn new(ctx: PageContext, form: NewProductForm, errors: Vec<String>) -> Self {
        let category = if form.category.trim().is_empty() {
            Category::TShirt
        } else {
            Category::from_label(&form.category)
        };
        let gender = Gender::parse(&form.gender);
        Self {
            categories: Category::ALL
                .into_iter()
                .map(|c| SelectOption {
                    value: c.label(),
                    label: c.label(),
                    selected: c == category,
                })
                .collect(),
            genders: Gender::ALL
                .into_iter()
                .map(|g| SelectOption {
                    value: g.as_str(),
                    label: match g {
                        Gender::Men => "Men",
                        Gender::Women => "Women",
                    },
                    selected: Some(g) == gender,
                })
                .collect(),
            ctx,
            form,
            errors,
        }
    }
}

fn bad_multipart(e: &MultipartError) -> AppError {
    AppError::BadRequest(format!("Invalid form upload: {e}"))
}

/// Split a multipart body into the text form and the optional image.
async fn read_form(mut multipart: Multipart) -> Result<(NewProductForm, Option<ImageUpload>)> {
    let mut form = NewProductForm::default();
    let mut image = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| bad_multipart(&e))? {
        let name = field.name().unwrap_or_default().to_string();
        if name == "image" {
            let file_name = field.file_name().unwrap_or_default().to_string();
            let content_type = field.content_type().map(str::to_string);
            let bytes = field.bytes().await.map_err(|e| bad_multipart(&e))?;
            if !file_name.is_empty() && !bytes.is_empty() {
                image = Some(ImageUpload {
                    file_name,
                    content_type,
                    bytes: bytes.to_vec(),
                });
            }
            continue;
        }

        let value = field.text().await.map_err(|e| bad_multipart(&e))?;
        match name.as_str() {
            "name" => form.name = value,
            "description" => form.description = value,
            "price" => form.price = value,
            "stock" => form.stock = value,
            "category" => form.category = value,
            "gender" => form.gender = value,
            "sizes" => form.sizes = value,
            "colors" => form.colors = value,
            other => tracing::debug!(field = other, "Ignoring unknown form field"),
        }
    }

    Ok((form, image))
}

/// Display the add-product form.
#[instrument(skip_all)]
pub async fn new_product(RequireAdmin(_admin): RequireAdmin, ctx: PageContext) -> impl IntoResponse {
    NewProductTemplate::new(ctx, NewProductForm::default(), Vec::new())
}

/// Create the product.
#[instrument(skip_all)]
pub async fn create_product(
    State(state): State<AppState>,
    session: Session,
    RequireAdmin(admin): RequireAdmin,
    ctx: PageContext,
    multipart: Multipart,
) -> Result<Response> {
    let (form, image) = read_form(multipart).await?;

    let mut errors: Vec<String> = Vec::new();
    if let Some(upload) = &image
        && !is_allowed_image(&upload.file_name)
    {
        errors.push("Image must be a png, jpg, jpeg or gif file".to_string());
    }
    let product = match NewProduct::from_form(&form) {
        Ok(product) => Some(product),
        Err(field_errors) => {
            errors.extend(field_errors.iter().map(|e: &FieldError| e.message.clone()));
            None
        }
    };

    let Some(product) = product.filter(|_| errors.is_empty()) else {
        return Ok(NewProductTemplate::new(ctx, form, errors).into_response());
    };

    match state
        .api()
        .create_product(&admin.token(), &product, image)
        .await
    {
        Ok(created) => {
            tracing::info!(product_id = %created.id, "Product created");
            push_flash(
                &session,
                Flash::success(format!("Product added successfully! {}", created.name)),
            )
            .await?;
            Ok(Redirect::to("/products").into_response())
        }
        Err(ApiError::SessionExpired) => Err(ApiError::SessionExpired.into()),
        Err(e) => {
            tracing::warn!(error = %e, "Product creation failed");
            Ok(NewProductTemplate::new(ctx, form, vec![e.user_message()]).into_response())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_preselects_submitted_values() {
        let form = NewProductForm {
            category: "pant".to_string(),
            gender: "women".to_string(),
            ..NewProductForm::default()
        };
        let template = NewProductTemplate::new(PageContext::default(), form, Vec::new());
        let category: Vec<_> = template
            .categories
            .iter()
            .filter(|o| o.selected)
            .map(|o| o.value)
            .collect();
        let gender: Vec<_> = template
            .genders
            .iter()
            .filter(|o| o.selected)
            .map(|o| o.value)
            .collect();
        assert_eq!(category, ["Pant"]);
        assert_eq!(gender, ["women"]);
    }
}
