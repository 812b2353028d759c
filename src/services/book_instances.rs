//! Book instance (copy) management service

use std::collections::HashMap;

use uuid::Uuid;

use super::{Removal, Submission};
use crate::{
    error::{AppError, AppResult},
    models::{
        book::BookSummary,
        book_instance::{
            book_instance_checks, BookInstanceDetail, BookInstanceDraft, BookInstanceFields,
            BookInstanceForm, BookInstanceView,
        },
        BookInstance,
    },
    repository::Repository,
    validation::{validate, FieldError, FormInput},
};

fn not_found() -> AppError {
    AppError::NotFound("Book Copy Not Found".to_string())
}

#[derive(Clone)]
pub struct BookInstancesService {
    repository: Repository,
}

impl BookInstancesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// All copies, each with its book resolved
    pub async fn list(&self) -> AppResult<Vec<BookInstanceView>> {
        let (instances, books) = tokio::try_join!(
            self.repository.book_instances_list(),
            self.repository.books_list(),
        )?;
        let books: HashMap<Uuid, BookSummary> = books
            .iter()
            .map(|book| (book.id, BookSummary::from(book)))
            .collect();

        Ok(instances
            .into_iter()
            .map(|instance| {
                let book = books.get(&instance.book).cloned();
                BookInstanceView::new(instance, book)
            })
            .collect())
    }

    pub async fn detail(&self, id: Uuid) -> AppResult<BookInstanceDetail> {
        let instance = self
            .repository
            .book_instances_get(id)
            .await?
            .ok_or_else(not_found)?;
        self.populate(instance).await
    }

    async fn populate(&self, instance: BookInstance) -> AppResult<BookInstanceDetail> {
        let book = self.repository.books_get(instance.book).await?;
        Ok(BookInstanceDetail {
            bookinstance: BookInstanceView::new(instance, book.as_ref().map(BookSummary::from)),
        })
    }

    /// Empty form listing every book by title
    pub async fn create_form(&self) -> AppResult<BookInstanceForm> {
        Ok(BookInstanceForm::new(self.book_list().await?))
    }

    async fn book_list(&self) -> AppResult<Vec<BookSummary>> {
        let books = self.repository.books_list().await?;
        Ok(books.iter().map(BookSummary::from).collect())
    }

    async fn rejected(
        &self,
        draft: BookInstanceDraft,
        errors: Vec<FieldError>,
    ) -> AppResult<BookInstanceForm> {
        Ok(BookInstanceForm::new(self.book_list().await?)
            .with_draft(draft)
            .with_errors(errors))
    }

    pub async fn create(
        &self,
        input: &FormInput,
    ) -> AppResult<Submission<BookInstance, BookInstanceForm>> {
        let errors = validate(&book_instance_checks(), input);
        let draft = BookInstanceDraft::sanitize(input);

        if !errors.is_empty() {
            tracing::debug!("Book copy create rejected with {} error(s)", errors.len());
            return Ok(Submission::Rejected(self.rejected(draft, errors).await?));
        }

        let instance = self
            .repository
            .book_instances_create(&BookInstanceFields::try_from(draft)?)
            .await?;
        tracing::info!("Created copy {} of book {}", instance.id, instance.book);
        Ok(Submission::Saved(instance))
    }

    pub async fn delete_confirmation(&self, id: Uuid) -> AppResult<Option<BookInstanceDetail>> {
        match self.repository.book_instances_get(id).await? {
            Some(instance) => Ok(Some(self.populate(instance).await?)),
            None => Ok(None),
        }
    }

    /// Copies have no dependents, so a delete is never blocked
    pub async fn delete(&self, id: Uuid) -> AppResult<Removal<BookInstanceDetail>> {
        if !self.repository.book_instances_delete(id).await? {
            return Ok(Removal::Missing);
        }
        tracing::info!("Deleted copy {}", id);
        Ok(Removal::Removed)
    }

    /// Update form prefilled with the stored copy, its book preselected
    pub async fn update_form(&self, id: Uuid) -> AppResult<BookInstanceForm> {
        let (instance, book_list) = tokio::try_join!(
            self.repository.book_instances_get(id),
            self.book_list(),
        )?;
        let instance = instance.ok_or_else(not_found)?;
        Ok(BookInstanceForm::new(book_list).with_draft(instance.into()))
    }

    pub async fn update(
        &self,
        id: Uuid,
        input: &FormInput,
    ) -> AppResult<Submission<BookInstance, BookInstanceForm>> {
        let errors = validate(&book_instance_checks(), input);
        let draft = BookInstanceDraft::sanitize(input).with_id(id);

        if !errors.is_empty() {
            tracing::debug!("Book copy {} update rejected with {} error(s)", id, errors.len());
            return Ok(Submission::Rejected(self.rejected(draft, errors).await?));
        }

        let instance = self
            .repository
            .book_instances_update(id, &BookInstanceFields::try_from(draft)?)
            .await?
            .ok_or_else(not_found)?;
        tracing::info!("Updated copy {}", id);
        Ok(Submission::Saved(instance))
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::models::{book::BookFields, Book, BookInstanceStatus};

    async fn fixture() -> (BookInstancesService, Repository, Book) {
        let repository = Repository::in_memory();
        let book = repository
            .books_create(&BookFields {
                title: "Solaris".to_string(),
                author: Uuid::new_v4(),
                summary: "An ocean.".to_string(),
                isbn: "9780156027601".to_string(),
                genre: Vec::new(),
            })
            .await
            .unwrap();
        (BookInstancesService::new(repository.clone()), repository, book)
    }

    fn copy_form(book: &str, status: &str, due_back: &str) -> FormInput {
        FormInput::from_pairs([
            ("book", book),
            ("imprint", "Harcourt, 2002"),
            ("status", status),
            ("due_back", due_back),
        ])
    }

    #[tokio::test]
    async fn test_create_then_detail() {
        let (service, _, book) = fixture().await;
        let Submission::Saved(copy) = service
            .create(&copy_form(&book.id.to_string(), "Loaned", "2024-07-01"))
            .await
            .unwrap()
        else {
            panic!("expected save");
        };
        assert_eq!(copy.status, BookInstanceStatus::Loaned);
        assert_eq!(copy.due_back, NaiveDate::from_ymd_opt(2024, 7, 1));

        let detail = service.detail(copy.id).await.unwrap();
        assert_eq!(detail.bookinstance.book.unwrap().title, "Solaris");
        assert_eq!(detail.bookinstance.due_back_formatted, "1 July, 2024");
    }

    #[tokio::test]
    async fn test_rejected_create_preselects_book() {
        let (service, repository, book) = fixture().await;
        let book_id = book.id.to_string();
        let Submission::Rejected(form) = service
            .create(&copy_form(&book_id, "Lost", "soon"))
            .await
            .unwrap()
        else {
            panic!("expected rejection");
        };

        let messages: Vec<&str> = form.errors.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, ["Invalid date", "Invalid status"]);
        assert_eq!(form.selected_book.as_deref(), Some(book_id.as_str()));
        assert_eq!(form.book_list.len(), 1);
        assert_eq!(form.status_list.len(), 4);
        assert_eq!(repository.book_instances_count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_list_with_dangling_book() {
        let (service, _, book) = fixture().await;
        service
            .create(&copy_form(&book.id.to_string(), "Available", ""))
            .await
            .unwrap();
        service
            .create(&copy_form(&Uuid::new_v4().to_string(), "", ""))
            .await
            .unwrap();

        let list = service.list().await.unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list.iter().filter(|v| v.book.is_none()).count(), 1);
        assert!(list
            .iter()
            .any(|v| v.status == BookInstanceStatus::Maintenance));
    }

    #[tokio::test]
    async fn test_update_form_and_update() {
        let (service, _, book) = fixture().await;
        let Submission::Saved(copy) = service
            .create(&copy_form(&book.id.to_string(), "Available", ""))
            .await
            .unwrap()
        else {
            panic!("expected save");
        };

        let form = service.update_form(copy.id).await.unwrap();
        assert_eq!(form.selected_book, Some(book.id.to_string()));
        assert_eq!(form.bookinstance.unwrap().status, "Available");

        let Submission::Saved(updated) = service
            .update(copy.id, &copy_form(&book.id.to_string(), "Reserved", ""))
            .await
            .unwrap()
        else {
            panic!("expected save");
        };
        assert_eq!(updated.id, copy.id);
        assert_eq!(updated.status, BookInstanceStatus::Reserved);
    }

    #[tokio::test]
    async fn test_delete() {
        let (service, _, book) = fixture().await;
        let Submission::Saved(copy) = service
            .create(&copy_form(&book.id.to_string(), "", ""))
            .await
            .unwrap()
        else {
            panic!("expected save");
        };

        assert!(service.delete_confirmation(copy.id).await.unwrap().is_some());
        assert!(matches!(service.delete(copy.id).await.unwrap(), Removal::Removed));
        assert!(matches!(service.delete(copy.id).await.unwrap(), Removal::Missing));
        assert!(matches!(service.detail(copy.id).await, Err(AppError::NotFound(_))));
    }
}
