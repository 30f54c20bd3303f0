use axum::extract::{Extension, State};
use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};

use crate::billing::{period_end, processing_fee, quote_price, SubscriptionStatus};
use crate::database::models::{NewPayment, PaymentReceipt, Plan, UserSubscription};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser, JsonObject};
use crate::state::AppState;
use crate::validation::parse_payment_submission;

#[derive(Debug, Serialize)]
pub struct SubscriptionOverview {
    pub status: SubscriptionStatus,
    pub subscription: Option<UserSubscription>,
    pub plan: Option<Plan>,
}

/// GET /api/subscriptions/me
pub async fn my_subscription(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<SubscriptionOverview> {
    let subscription = state.subscriptions.find_subscription(user.user_id).await?;
    let status = SubscriptionStatus::evaluate(subscription.as_ref(), Utc::now());

    let plan = match &subscription {
        Some(sub) => state.plans.find_plan(sub.plan_id).await?,
        None => None,
    };

    Ok(ApiResponse::success(SubscriptionOverview {
        status,
        subscription,
        plan,
    }))
}

/// POST /api/subscriptions/payments
pub async fn submit_payment(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    JsonObject(payload): JsonObject,
) -> ApiResult<PaymentReceipt> {
    let submission = parse_payment_submission(&payload).map_err(|e| {
        warn!(user_id = user.user_id, fields = ?e.fields(), "Rejected payment submission");
        e
    })?;

    let plan = state
        .plans
        .find_plan(submission.plan_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Plan {} not found", submission.plan_id)))?;
    if !plan.is_active {
        return Err(ApiError::bad_request(format!("Plan {} is not available", plan.id)));
    }

    let prices = state.pricing.list_prices(plan.id).await?;
    quote_price(&plan, &prices, &submission.currency, &submission.country_code)
        .check(submission.amount, &submission.currency)
        .map_err(|e| {
            warn!(user_id = user.user_id, plan_id = plan.id, fields = ?e.fields(), "Payment does not match the plan price");
            e
        })?;

    let now = Utc::now();
    let expires_at = match plan.duration() {
        Some(duration) => period_end(now, duration),
        None => {
            warn!(plan_id = plan.id, duration = %plan.duration, "Plan has an unknown duration; subscription will not lapse");
            None
        }
    };

    let payment = NewPayment {
        user_id: user.user_id,
        plan_id: plan.id,
        amount: submission.amount,
        processing_fee: processing_fee(&plan, submission.amount),
        currency: submission.currency,
        country_code: submission.country_code,
        payment_method: submission.payment_method,
        expires_at,
    };

    let receipt = state.subscriptions.record_payment(payment).await?;
    info!(
        user_id = user.user_id,
        plan_id = plan.id,
        fee = %receipt.payment.processing_fee,
        "Payment accepted"
    );
    Ok(ApiResponse::created(receipt))
}

/// POST /api/subscriptions/me/cancel
pub async fn cancel_subscription(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<UserSubscription> {
    let subscription = state
        .subscriptions
        .cancel_subscription(user.user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("No subscription found"))?;
    info!(user_id = user.user_id, "Subscription cancelled");
    Ok(ApiResponse::success(subscription))
}
