use axum::{
    extract::{Query, State},
    Json,
};
use tracing::instrument;

use crate::{
    app_state::AppState,
    error::{ApiError, Result},
    models::pricing::{PricingQuery, PricingQuote, PricingResponse},
    pricing::{catalog, final_price, to_minor_units, Region},
    services::{PromoSelection, PromoService},
};

/// GET /api/v1/pricing?locale=hi-IN&timezone=Asia/Kolkata&promo_code=SAVE20
#[instrument(skip(state))]
pub async fn get_pricing(
    State(state): State<AppState>,
    Query(query): Query<PricingQuery>,
) -> Result<Json<PricingResponse>> {
    let quote = build_quote(&state.promo_service, &query).await?;

    Ok(Json(PricingResponse {
        success: true,
        quote,
    }))
}

async fn build_quote(promo_service: &PromoService, query: &PricingQuery) -> Result<PricingQuote> {
    let region = Region::resolve(
        query.locale.as_deref().unwrap_or_default(),
        query.timezone.as_deref().unwrap_or_default(),
    );
    let plan = catalog::price_for(region);

    let mut selection = PromoSelection::new();
    let promo = match query.promo_code.as_deref() {
        Some(code) => Some(selection.apply(promo_service, code).await),
        None => None,
    };

    let discount_percentage = selection.active_discount();
    let final_price = final_price(plan.base_price, discount_percentage);
    let amount_minor = to_minor_units(final_price).ok_or_else(|| {
        ApiError::Internal(anyhow::anyhow!(
            "Price {} {} out of range",
            final_price,
            plan.currency
        ))
    })?;

    Ok(PricingQuote {
        region,
        plan,
        promo,
        discount_percentage,
        final_price,
        amount_minor,
    })
}
