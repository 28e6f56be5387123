use axum::{extract::State, Json};
use chrono::Utc;
use tracing::{info, warn};

use crate::{
    shopify::data::{CustomerUpdate, EmailMarketingConsent, Metafield, NewCustomer},
    web::{
        data::{DeserSubscription, SubscribeResponse, ValidSubscription},
        WebResult,
    },
    AppState,
};

const METAFIELD_TYPE: &str = "single_line_text_field";

#[tracing::instrument(
    name = "Upserting popup subscriber",
    skip(app_state, subscription),
    fields(subscriber_email = tracing::field::Empty)
)]
pub async fn subscribe(
    State(app_state): State<AppState>,
    Json(subscription): Json<DeserSubscription>,
) -> WebResult<Json<SubscribeResponse>> {
    let subscription: ValidSubscription = subscription.try_into()?;
    tracing::Span::current().record("subscriber_email", subscription.email.as_ref());

    let outcome = upsert_customer(&app_state, &subscription).await?;

    let message = if outcome.existing_customer {
        "Marketing consent updated for existing customer."
    } else {
        "Customer created and subscribed."
    };

    Ok(Json(SubscribeResponse {
        success: true,
        message: message.to_string(),
        customer_id: outcome.customer_id,
        email: subscription.email.as_ref().to_string(),
        existing_customer: outcome.existing_customer,
    }))
}

struct UpsertOutcome {
    customer_id: u64,
    existing_customer: bool,
}

/// Search by email, then update the first hit or create a new customer.
/// The two outbound calls are strictly sequential; a failed search is
/// terminal, a failed update falls through to create when configured to.
async fn upsert_customer(
    app_state: &AppState,
    subscription: &ValidSubscription,
) -> WebResult<UpsertOutcome> {
    let config = &app_state.subscribe_config;
    let client = &app_state.admin_client;
    let email = subscription.email.as_ref();
    let new_tags = subscription.tags.as_deref().unwrap_or(&config.tags);

    if let Some(existing) = client.find_customer_by_email(email).await? {
        let merged_tags = merge_tags(&existing.tags, new_tags);
        let update = CustomerUpdate {
            id: existing.id,
            email_marketing_consent: EmailMarketingConsent::subscribed_now(),
            tags: &merged_tags,
        };

        match client.update_marketing_consent(update).await {
            Ok(()) => {
                info!("updated marketing consent for customer {}", existing.id);
                return Ok(UpsertOutcome {
                    customer_id: existing.id,
                    existing_customer: true,
                });
            }
            Err(er) if config.fallback_on_update_failure => {
                // The record may need re-creation, or the failure may be transient.
                warn!(
                    "update of customer {} failed, falling back to create: {er}",
                    existing.id
                );
            }
            Err(er) => return Err(er.into()),
        }
    }

    let source = subscription.source.as_deref().unwrap_or(&config.source);
    let discount_code = subscription
        .discount_code
        .as_deref()
        .unwrap_or(&config.discount_code);

    let new_customer = NewCustomer {
        email,
        email_marketing_consent: EmailMarketingConsent::subscribed_now(),
        tags: new_tags,
        note: build_note(source, discount_code),
        metafields: vec![
            Metafield {
                namespace: &config.metafield_namespace,
                key: "source",
                value: source,
                value_type: METAFIELD_TYPE,
            },
            Metafield {
                namespace: &config.metafield_namespace,
                key: "discount_code",
                value: discount_code,
                value_type: METAFIELD_TYPE,
            },
        ],
    };

    let created = client.create_customer(new_customer).await?;
    info!("created customer {}", created.id);

    Ok(UpsertOutcome {
        customer_id: created.id,
        existing_customer: false,
    })
}

// ###################################
// ->   HELPERS
// ###################################

/// Plain concatenation, no dedup: repeated submissions from the same address
/// accumulate repeated tags. Preserved existing behavior.
fn merge_tags(existing: &str, new: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{existing},{new}")
    }
}

fn build_note(source: &str, discount_code: &str) -> String {
    format!(
        "Captured from {source} signup on {}. Discount code: {discount_code}.",
        Utc::now().to_rfc3339()
    )
}
