//! `wardrobe order` and `wardrobe orders`.

use wardrobe_core::{ProductId, Selection};

use super::{CliError, Context};

/// Place an order for the given product ids.
///
/// Repeated ids are ordered once.
///
/// # Errors
///
/// Returns an error when no ids are given, nobody is logged in, or the API
/// refuses the order.
pub async fn place(ctx: &Context, ids: &[String]) -> Result<(), CliError> {
    let selection: Selection = ids
        .iter()
        .map(|id| id.trim())
        .filter(|id| !id.is_empty())
        .map(ProductId::new)
        .collect();
    if selection.is_empty() {
        return Err(CliError::Invalid("Select products first!".to_string()));
    }

    let session = ctx.require_session()?;
    let order = ctx
        .api
        .create_order(&session.token(), &selection)
        .await
        .map_err(|e| ctx.api_error(e))?;

    println!("Order placed successfully!");
    if let Some(id) = &order.id {
        println!("  order: {id}");
    }
    println!("  items: {}", order.products.len());
    if let Some(warning) = &order.warning {
        println!("  {warning}");
    }
    Ok(())
}

/// Print the order history.
///
/// # Errors
///
/// Returns an error if nobody is logged in or the request fails.
pub async fn list(ctx: &Context) -> Result<(), CliError> {
    let session = ctx.require_session()?;
    let orders = ctx
        .api
        .list_orders(&session.token())
        .await
        .map_err(|e| ctx.api_error(e))?;

    if orders.is_empty() {
        println!("You have no orders yet.");
        return Ok(());
    }
    for order in &orders {
        println!("Order {}  total {}", order.id, order.total().display());
        for line in &order.products {
            match line.unit_price() {
                Some(price) => println!("  - {} ({})", line.label(), price.display()),
                None => println!("  - {}", line.label()),
            }
        }
        if let Some(warning) = &order.warning {
            println!("  {warning}");
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;
    use wardrobe_core::Role;
    use wardrobe_storefront::api::ApiClient;
    use wardrobe_storefront::config::ApiConfig;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::session::{SessionFile, StoredSession};

    fn logged_in(server: &MockServer) -> (tempfile::TempDir, Context) {
        let dir = tempfile::tempdir().unwrap();
        let session = SessionFile::new(dir.path().join("session.json"));
        session
            .save(&StoredSession::new(
                "ada@example.com".to_string(),
                Role::User,
                "stale-token".to_string(),
            ))
            .unwrap();
        let config = ApiConfig::from_base(&format!("{}/api", server.uri())).unwrap();
        let ctx = Context {
            api: ApiClient::new(&config),
            session,
        };
        (dir, ctx)
    }

    #[tokio::test]
    async fn test_rejected_token_removes_session_file() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/orders"))
            .and(header("authorization", "Bearer stale-token"))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(json!({"msg": "Token has expired"})),
            )
            .expect(1)
            .mount(&server)
            .await;
        let (_dir, ctx) = logged_in(&server);

        let err = list(&ctx).await.unwrap_err();

        assert!(matches!(err, CliError::SessionExpired));
        assert!(ctx.session.load().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_rejected_order_keeps_session_file() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/orders"))
            .respond_with(
                ResponseTemplate::new(400).set_body_json(json!({"error": "No valid products found"})),
            )
            .mount(&server)
            .await;
        let (_dir, ctx) = logged_in(&server);

        let err = place(&ctx, &["p1".to_string()]).await.unwrap_err();

        assert!(matches!(err, CliError::Api(_)));
        assert_eq!(err.to_string(), "No valid products found");
        assert!(ctx.session.load().unwrap().is_some());
    }

    #[tokio::test]
    async fn test_blank_ids_are_not_submitted() {
        let server = MockServer::start().await;
        let (_dir, ctx) = logged_in(&server);

        let err = place(&ctx, &[" ".to_string()]).await.unwrap_err();

        assert!(matches!(err, CliError::Invalid(_)));
        assert!(server.received_requests().await.unwrap().is_empty());
    }
}
