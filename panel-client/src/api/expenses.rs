//! Expenses (gastos): CRUD with supporting document, approval

use shared::error::{AppError, ErrorCode};
use shared::models::{ApprovalRequest, Expense, ExpenseInput};

use super::Ignored;
use crate::http::HttpClient;
use crate::upload::{MultipartBody, Upload};
use crate::{ClientResult, PanelClient};

fn expense_form(input: &ExpenseInput, support: Option<Upload>) -> ClientResult<MultipartBody> {
    input.validate(support.is_some())?;
    Ok(MultipartBody::from_fields(input.form_fields()).maybe_file(support.map(|f| Upload {
        field: "soporte".into(),
        ..f
    })))
}

impl PanelClient {
    /// `GET /gastos`
    pub async fn list_expenses(&self) -> ClientResult<Vec<Expense>> {
        self.http().get("gastos").await
    }

    /// `POST /gastos`; a supporting document needs an approved status
    pub async fn create_expense(
        &self,
        input: &ExpenseInput,
        support: Option<Upload>,
    ) -> ClientResult<Expense> {
        let body = expense_form(input, support)?;
        let expense: Expense = self.http().post_multipart("gastos", &body).await?;
        tracing::info!(expense_id = expense.id, monto = expense.monto, "Expense created");
        Ok(expense)
    }

    /// `PUT /gastos/{id}`
    pub async fn update_expense(
        &self,
        id: i64,
        input: &ExpenseInput,
        support: Option<Upload>,
    ) -> ClientResult<Expense> {
        let body = expense_form(input, support)?;
        let expense = self
            .http()
            .put_multipart(&format!("gastos/{}", id), &body)
            .await?;
        tracing::info!(expense_id = id, "Expense updated");
        Ok(expense)
    }

    /// `DELETE /gastos/{id}`
    pub async fn delete_expense(&self, id: i64) -> ClientResult<()> {
        let _: Ignored = self.http().delete(&format!("gastos/{}", id)).await?;
        tracing::info!(expense_id = id, "Expense deleted");
        Ok(())
    }

    /// `POST /gastos/{id}/aprobar` with the approver's password
    pub async fn approve_expense(&self, id: i64, password: &str) -> ClientResult<Expense> {
        if password.is_empty() {
            return Err(AppError::new(ErrorCode::ApprovalPasswordInvalid).into());
        }
        let expense: Expense = self
            .http()
            .post(
                &format!("gastos/{}/aprobar", id),
                &ApprovalRequest {
                    password: password.to_string(),
                },
            )
            .await?;
        tracing::info!(expense_id = id, status = expense.status.label(), "Expense approved");
        Ok(expense)
    }
}
