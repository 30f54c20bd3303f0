use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use super::manager::DatabaseError;
use super::models::{EditablePlanChanges, GeneralPlanChanges, NewPlan, Plan};
use super::repository::PlanRepository;

const PLAN_COLUMNS: &str = "id, name, description, price, duration, type, max_elections, max_voters_per_election, \
     processing_fee_mandatory, processing_fee_fixed_amount, processing_fee_type, processing_fee_percentage, \
     is_active, created_at, updated_at";

pub struct PgPlanRepository {
    pool: PgPool,
}

impl PgPlanRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PlanRepository for PgPlanRepository {
    async fn list_plans(&self, include_inactive: bool) -> Result<Vec<Plan>, DatabaseError> {
        let sql = format!(
            "SELECT {} FROM subscription_plans WHERE ($1 OR is_active) ORDER BY price, id",
            PLAN_COLUMNS
        );
        let plans = sqlx::query_as::<_, Plan>(&sql)
            .bind(include_inactive)
            .fetch_all(&self.pool)
            .await?;
        Ok(plans)
    }

    async fn find_plan(&self, id: i64) -> Result<Option<Plan>, DatabaseError> {
        let sql = format!("SELECT {} FROM subscription_plans WHERE id = $1", PLAN_COLUMNS);
        let plan = sqlx::query_as::<_, Plan>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(plan)
    }

    async fn create_plan(&self, plan: NewPlan) -> Result<Plan, DatabaseError> {
        let sql = format!(
            "INSERT INTO subscription_plans (
                name, description, price, duration, type, max_elections, max_voters_per_election,
                processing_fee_mandatory, processing_fee_fixed_amount, processing_fee_type, processing_fee_percentage
             ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             RETURNING {}",
            PLAN_COLUMNS
        );
        let created = sqlx::query_as::<_, Plan>(&sql)
            .bind(&plan.name)
            .bind(&plan.description)
            .bind(plan.price)
            .bind(plan.duration.as_str())
            .bind(plan.plan_type.as_str())
            .bind(plan.max_elections)
            .bind(plan.max_voters_per_election)
            .bind(plan.processing_fee_mandatory)
            .bind(plan.processing_fee_fixed_amount)
            .bind(plan.processing_fee_type.map(|t| t.as_str()))
            .bind(plan.processing_fee_percentage)
            .fetch_one(&self.pool)
            .await
            .map_err(DatabaseError::from_query)?;

        debug!(plan_id = created.id, "created subscription plan");
        Ok(created)
    }

    async fn update_general_fields(
        &self,
        id: i64,
        changes: GeneralPlanChanges,
    ) -> Result<Option<Plan>, DatabaseError> {
        let sql = format!(
            "UPDATE subscription_plans SET
                name = COALESCE($2, name),
                description = CASE WHEN $3 THEN $4 ELSE description END,
                price = COALESCE($5, price),
                duration = COALESCE($6, duration),
                type = COALESCE($7, type),
                is_active = COALESCE($8, is_active),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {}",
            PLAN_COLUMNS
        );
        let (set_description, description) = match changes.description {
            Some(description) => (true, description),
            None => (false, None),
        };

        let plan = sqlx::query_as::<_, Plan>(&sql)
            .bind(id)
            .bind(changes.name)
            .bind(set_description)
            .bind(description)
            .bind(changes.price)
            .bind(changes.duration.map(|d| d.as_str()))
            .bind(changes.plan_type.map(|t| t.as_str()))
            .bind(changes.is_active)
            .fetch_optional(&self.pool)
            .await
            .map_err(DatabaseError::from_query)?;
        Ok(plan)
    }

    async fn update_editable_fields(
        &self,
        id: i64,
        changes: EditablePlanChanges,
    ) -> Result<Option<Plan>, DatabaseError> {
        // Unspecified fields bind NULL and keep their stored value
        let sql = format!(
            "UPDATE subscription_plans SET
                max_elections = COALESCE($2, max_elections),
                max_voters_per_election = COALESCE($3, max_voters_per_election),
                processing_fee_mandatory = COALESCE($4, processing_fee_mandatory),
                processing_fee_fixed_amount = COALESCE($5, processing_fee_fixed_amount),
                processing_fee_type = COALESCE($6, processing_fee_type),
                processing_fee_percentage = COALESCE($7, processing_fee_percentage),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {}",
            PLAN_COLUMNS
        );

        let plan = sqlx::query_as::<_, Plan>(&sql)
            .bind(id)
            .bind(changes.max_elections)
            .bind(changes.max_voters_per_election)
            .bind(changes.processing_fee_mandatory)
            .bind(changes.processing_fee_fixed_amount)
            .bind(changes.processing_fee_type.map(|t| t.as_str()))
            .bind(changes.processing_fee_percentage)
            .fetch_optional(&self.pool)
            .await
            .map_err(DatabaseError::from_query)?;
        Ok(plan)
    }

    async fn delete_plan(&self, id: i64) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM subscription_plans WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(DatabaseError::from_query)?;
        Ok(result.rows_affected() > 0)
    }
}
