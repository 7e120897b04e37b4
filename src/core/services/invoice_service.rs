//! Invoices and the recurring invoice schedule.

use chrono::NaiveDate;

use crate::core::listing::{ListQuery, PageView, PaginatedFilteredView};
use crate::core::permissions::{Action, Resource, Session};
use crate::core::services::{authorize, ServiceError, ServiceResult};
use crate::domain::common::new_id;
use crate::domain::invoice::{Invoice, InvoiceStatus};
use crate::domain::workspace::Workspace;

/// A scheduled invoice whose next occurrence has come due.
#[derive(Debug, Clone, PartialEq)]
pub struct DueInvoice<'a> {
    pub template: &'a Invoice,
    pub occurrence: NaiveDate,
}

pub struct InvoiceService;

impl InvoiceService {
    /// Adds an invoice for an existing customer. Numbers are unique per company.
    pub fn add(
        workspace: &mut Workspace,
        session: &Session,
        mut invoice: Invoice,
    ) -> ServiceResult<String> {
        authorize(session, Resource::Invoice, Action::Create)?;
        invoice.number = invoice.number.trim().to_string();
        if invoice.number.is_empty() {
            return Err(ServiceError::Invalid("Invoice number cannot be empty".into()));
        }
        ensure_number_free(workspace, &invoice.number)?;
        let customer = workspace.customer(&invoice.customer_id).ok_or_else(|| {
            ServiceError::NotFound(format!("Customer `{}`", invoice.customer_id))
        })?;
        invoice.customer_name = customer.name.clone();
        if let Some(due) = invoice.due_date {
            if due < invoice.issue_date {
                return Err(ServiceError::Invalid(
                    "Due date cannot precede the issue date".into(),
                ));
            }
        }

        let id = invoice.id.clone();
        tracing::info!(
            invoice_id = %id,
            number = %invoice.number,
            scheduled = invoice.is_scheduled(),
            "adding invoice"
        );
        workspace.invoices.push(invoice);
        workspace.touch();
        Ok(id)
    }

    /// Moves an invoice to a new status. Paid and cancelled invoices are frozen.
    pub fn set_status(
        workspace: &mut Workspace,
        session: &Session,
        id: &str,
        status: InvoiceStatus,
    ) -> ServiceResult<()> {
        authorize(session, Resource::Invoice, Action::Update)?;
        let invoice = workspace
            .invoice_mut(id)
            .ok_or_else(|| ServiceError::NotFound(format!("Invoice `{id}`")))?;
        if invoice.status.is_final() && invoice.status != status {
            return Err(ServiceError::Invalid(format!(
                "Invoice `{}` is {} and can no longer change",
                invoice.number, invoice.status
            )));
        }
        tracing::info!(
            invoice_id = %id,
            from = %invoice.status,
            to = %status,
            "invoice status change"
        );
        invoice.status = status;
        workspace.touch();
        Ok(())
    }

    pub fn remove(workspace: &mut Workspace, session: &Session, id: &str) -> ServiceResult<()> {
        authorize(session, Resource::Invoice, Action::Delete)?;
        let before = workspace.invoices.len();
        workspace.invoices.retain(|invoice| invoice.id != id);
        if workspace.invoices.len() == before {
            return Err(ServiceError::NotFound(format!("Invoice `{id}`")));
        }
        workspace.touch();
        Ok(())
    }

    pub fn list<'a>(workspace: &'a Workspace, query: &ListQuery) -> PageView<&'a Invoice> {
        PaginatedFilteredView::apply_searchable(&workspace.invoices, query)
    }

    /// Scheduled invoices whose next ungenerated occurrence is on or before `today`.
    pub fn due_scheduled(workspace: &Workspace, today: NaiveDate) -> Vec<DueInvoice<'_>> {
        workspace
            .invoices
            .iter()
            .filter_map(|invoice| {
                let occurrence = invoice.next_occurrence()?;
                (occurrence <= today).then_some(DueInvoice {
                    template: invoice,
                    occurrence,
                })
            })
            .collect()
    }

    /// Turns one occurrence of a scheduled invoice into a concrete draft.
    ///
    /// The draft keeps the template's lines and its issue-to-due gap, and is
    /// numbered `<template number>-<YYYYMMDD>`. Returns the draft's id.
    pub fn materialize(
        workspace: &mut Workspace,
        session: &Session,
        template_id: &str,
        occurrence: NaiveDate,
    ) -> ServiceResult<String> {
        authorize(session, Resource::Invoice, Action::Create)?;
        let template = workspace
            .invoice(template_id)
            .ok_or_else(|| ServiceError::NotFound(format!("Invoice `{template_id}`")))?;
        let schedule = template.schedule.as_ref().ok_or_else(|| {
            ServiceError::Invalid(format!("Invoice `{}` is not scheduled", template.number))
        })?;
        if schedule
            .occurrences_between(occurrence, occurrence)
            .is_empty()
        {
            return Err(ServiceError::Invalid(format!(
                "{occurrence} is not an occurrence of invoice `{}`",
                template.number
            )));
        }
        if template.last_generated.is_some_and(|last| occurrence <= last) {
            return Err(ServiceError::Invalid(format!(
                "Occurrence {occurrence} of invoice `{}` was already generated",
                template.number
            )));
        }

        let number = format!("{}-{}", template.number, occurrence.format("%Y%m%d"));
        ensure_number_free(workspace, &number)?;
        let due_date = match template.due_date {
            Some(due) => Some(
                occurrence
                    .checked_add_signed(due - template.issue_date)
                    .ok_or_else(|| {
                        ServiceError::Invalid(format!(
                            "Due date of invoice `{}` is out of range for {occurrence}",
                            template.number
                        ))
                    })?,
            ),
            None => None,
        };

        let mut draft = template.clone();
        draft.id = new_id();
        draft.number = number;
        draft.issue_date = occurrence;
        draft.due_date = due_date;
        draft.status = InvoiceStatus::Draft;
        draft.schedule = None;
        draft.last_generated = None;
        let draft_id = draft.id.clone();

        if let Some(template) = workspace.invoice_mut(template_id) {
            template.last_generated = Some(occurrence);
        }
        tracing::info!(
            template_id = %template_id,
            invoice_id = %draft_id,
            %occurrence,
            "generated invoice from schedule"
        );
        workspace.invoices.push(draft);
        workspace.touch();
        Ok(draft_id)
    }
}

/// Invoice numbers are unique per company, ignoring ASCII case.
fn ensure_number_free(workspace: &Workspace, number: &str) -> ServiceResult<()> {
    if workspace
        .invoices
        .iter()
        .any(|existing| existing.number.eq_ignore_ascii_case(number))
    {
        return Err(ServiceError::Invalid(format!(
            "Invoice `{number}` already exists"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::services::test_support::{session, workspace};
    use crate::domain::customer::Customer;
    use crate::domain::invoice::{Frequency, InvoiceLine, Schedule};
    use crate::domain::user::Role;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn workspace_with_customer() -> (Workspace, String) {
        let mut ws = workspace();
        let customer = Customer::new("Initech");
        let id = customer.id.clone();
        ws.customers.push(customer);
        (ws, id)
    }

    #[test]
    fn add_copies_customer_name_and_rejects_duplicates() {
        let (mut ws, customer) = workspace_with_customer();
        let owner = session(Role::Owner);
        let invoice = Invoice::new("INV-7", customer.clone(), "", date(2024, 1, 5));
        let id = InvoiceService::add(&mut ws, &owner, invoice).unwrap();
        assert_eq!(ws.invoice(&id).unwrap().customer_name, "Initech");

        let again = Invoice::new("inv-7", customer, "", date(2024, 1, 6));
        assert!(InvoiceService::add(&mut ws, &owner, again).is_err());
    }

    #[test]
    fn paid_invoices_are_frozen() {
        let (mut ws, customer) = workspace_with_customer();
        let owner = session(Role::Owner);
        let id = InvoiceService::add(
            &mut ws,
            &owner,
            Invoice::new("INV-1", customer, "", date(2024, 1, 5)),
        )
        .unwrap();
        InvoiceService::set_status(&mut ws, &owner, &id, InvoiceStatus::Paid).unwrap();
        let err = InvoiceService::set_status(&mut ws, &owner, &id, InvoiceStatus::Draft)
            .expect_err("frozen");
        assert!(matches!(err, ServiceError::Invalid(_)));
    }

    #[test]
    fn scheduled_invoice_generates_drafts_in_order() {
        let (mut ws, customer) = workspace_with_customer();
        let owner = session(Role::Owner);
        let mut template = Invoice::new("SUB", customer, "", date(2024, 1, 1))
            .with_line(InvoiceLine::new("Subscription", 1.0, 99.0))
            .with_schedule(Schedule::new(Frequency::Monthly, date(2024, 1, 15)));
        template.due_date = Some(date(2024, 1, 31));
        let template_id = InvoiceService::add(&mut ws, &owner, template).unwrap();

        let due = InvoiceService::due_scheduled(&ws, date(2024, 2, 20));
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].occurrence, date(2024, 1, 15));

        let draft_id =
            InvoiceService::materialize(&mut ws, &owner, &template_id, date(2024, 1, 15)).unwrap();
        let draft = ws.invoice(&draft_id).unwrap();
        assert_eq!(draft.number, "SUB-20240115");
        assert_eq!(draft.due_date, Some(date(2024, 2, 14)));
        assert!(!draft.is_scheduled());
        assert!((draft.total() - 99.0).abs() < f64::EPSILON);

        let due = InvoiceService::due_scheduled(&ws, date(2024, 2, 20));
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].occurrence, date(2024, 2, 15));

        let err = InvoiceService::materialize(&mut ws, &owner, &template_id, date(2024, 1, 15))
            .expect_err("already generated");
        assert!(matches!(err, ServiceError::Invalid(_)));
        let err = InvoiceService::materialize(&mut ws, &owner, &template_id, date(2024, 2, 16))
            .expect_err("not an occurrence");
        assert!(matches!(err, ServiceError::Invalid(_)));
    }

    #[test]
    fn generated_number_must_not_clash() {
        let (mut ws, customer) = workspace_with_customer();
        let owner = session(Role::Owner);
        let template = Invoice::new("SUB", customer.clone(), "", date(2024, 1, 1))
            .with_schedule(Schedule::new(Frequency::Monthly, date(2024, 1, 15)));
        let template_id = InvoiceService::add(&mut ws, &owner, template).unwrap();
        let manual = Invoice::new("sub-20240115", customer, "", date(2024, 1, 15));
        InvoiceService::add(&mut ws, &owner, manual).unwrap();

        let err = InvoiceService::materialize(&mut ws, &owner, &template_id, date(2024, 1, 15))
            .expect_err("number taken");

        assert!(matches!(err, ServiceError::Invalid(ref message) if message.contains("exists")));
        assert_eq!(ws.invoices.len(), 2);
        assert_eq!(ws.invoice(&template_id).unwrap().last_generated, None);
    }

    #[test]
    fn unreachable_due_date_is_reported() {
        let (mut ws, customer) = workspace_with_customer();
        let owner = session(Role::Owner);
        let mut template = Invoice::new("FAR", customer, "Initech", date(2024, 1, 1))
            .with_schedule(Schedule::new(Frequency::Monthly, date(2024, 1, 15)));
        template.due_date = Some(NaiveDate::MAX);
        let template_id = template.id.clone();
        ws.invoices.push(template);

        let err = InvoiceService::materialize(&mut ws, &owner, &template_id, date(2024, 1, 15))
            .expect_err("due date overflows");

        assert!(matches!(err, ServiceError::Invalid(_)));
        assert_eq!(ws.invoices.len(), 1);
    }
}
